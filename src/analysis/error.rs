//! Error types for network analysis.
//!
//! [`Error`] covers failures that abort a pipeline stage: configuration
//! parsing and the two external collaborators. [`QueryError`] covers the
//! non-fatal conditions reported by singular lookups; callers decide whether
//! to log, propagate or ignore them.

use thiserror::Error;

/// Error type returned by external collaborators (enumerator, statistics backend).
pub type ExternalError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building or analyzing a reaction network.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse configuration TOML.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The external reaction enumerator failed.
    #[error("reaction enumeration failed: {0}")]
    Enumeration(String),

    /// The external statistics backend failed.
    #[error("statistics assignment failed: {0}")]
    Statistics(String),
}

impl Error {
    pub fn enumeration(source: ExternalError) -> Self {
        Self::Enumeration(source.to_string())
    }

    pub fn statistics(source: ExternalError) -> Self {
        Self::Statistics(source.to_string())
    }
}

/// Conditions reported by singular query accessors and statistics lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No entity matched the given criteria.
    #[error("no {kind} matched {criteria}")]
    NotFound {
        /// Entity kind that was searched ("reaction", "resting set", ...).
        kind: &'static str,
        /// Human-readable description of the criteria.
        criteria: String,
    },

    /// More than one entity matched where exactly one was expected.
    #[error("{count} {kind}s matched {criteria}, expected exactly one")]
    AmbiguousMatch {
        /// Entity kind that was searched.
        kind: &'static str,
        /// Human-readable description of the criteria.
        criteria: String,
        /// Number of matches.
        count: usize,
    },
}

impl QueryError {
    pub fn not_found(kind: &'static str, criteria: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            criteria: criteria.into(),
        }
    }

    pub fn ambiguous(kind: &'static str, criteria: impl Into<String>, count: usize) -> Self {
        Self::AmbiguousMatch {
            kind,
            criteria: criteria.into(),
            count,
        }
    }
}
