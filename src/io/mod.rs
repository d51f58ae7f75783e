//! Reading and writing networks, statistics, and rate reports.

pub mod error;

mod network;
mod report;
mod stats;

pub use error::Error;

pub use network::{NetworkDocument, ReactionEntry, RestingSetEntry, read_network, write_network};
pub use report::{Molarity, ReportOptions, TimeUnit, write_report};
pub use stats::{ReactionRecord, RestingSetRecord, StatsDocument, export_stats, import_stats};
