use super::config::Config;
use super::error::ExternalError;
use super::registry::Network;
use crate::model::stats::StatsTable;

/// External statistics assignment step.
///
/// Given the reconciled network, returns a record for every known resting set
/// and condensed reaction, plus any additional ("spurious") entities the
/// backend discovered while analyzing them.
pub trait StatisticsBackend {
    fn assign(&self, network: &Network, config: &Config) -> Result<StatsTable, ExternalError>;
}

/// Backend returning a table computed ahead of time, e.g. one imported from
/// a statistics document.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedStatistics {
    table: StatsTable,
}

impl PrecomputedStatistics {
    pub fn new(table: StatsTable) -> Self {
        Self { table }
    }
}

impl StatisticsBackend for PrecomputedStatistics {
    fn assign(&self, _network: &Network, _config: &Config) -> Result<StatsTable, ExternalError> {
        Ok(self.table.clone())
    }
}
