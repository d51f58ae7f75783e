mod backend;
mod config;
mod error;
mod partition;
mod query;
mod registry;
mod system;

pub use backend::{PrecomputedStatistics, StatisticsBackend};
pub use config::{Config, ConfigOverrides, KindaOverrides, KindaParams};
pub use error::{Error, ExternalError, QueryError};
pub use partition::{Partition, partition};
pub use query::{ComplexQuery, Match, Productivity, Provenance, ReactionQuery, RestingSetQuery};
pub use registry::{Entities, Enumerator, Network, build_network};
pub use system::System;

/// Runs a full analysis session: reconciles `input` (optionally through the
/// enumerator), assigns statistics through `backend`, and partitions the
/// result into known and spurious entities.
pub fn analyze(
    input: Entities,
    enumerator: Option<&dyn Enumerator>,
    backend: &dyn StatisticsBackend,
    config: &Config,
) -> Result<System, Error> {
    let network = build_network(input, enumerator, config)?;

    let stats = backend
        .assign(&network, config)
        .map_err(Error::statistics)?;

    Ok(System::new(network, config.clone()).with_statistics(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::complex::Complex;
    use crate::model::reaction::CondensedReaction;
    use crate::model::resting_set::RestingSet;
    use crate::model::stats::{RestingSetStats, StatsTable};

    struct DiscoveringBackend {
        extra: RestingSet,
    }

    impl StatisticsBackend for DiscoveringBackend {
        fn assign(&self, network: &Network, _config: &Config) -> Result<StatsTable, ExternalError> {
            let mut table = StatsTable::new();
            for rs in network.resting_sets() {
                table.resting_sets.insert(rs.clone(), RestingSetStats::default());
            }
            table
                .resting_sets
                .insert(self.extra.clone(), RestingSetStats::default());
            Ok(table)
        }
    }

    struct BrokenBackend;

    impl StatisticsBackend for BrokenBackend {
        fn assign(&self, _network: &Network, _config: &Config) -> Result<StatsTable, ExternalError> {
            Err("nupack not installed".into())
        }
    }

    fn input() -> Entities {
        let r1 = RestingSet::new("R1", [Complex::new("c1", ["a"], ".")]);
        let r2 = RestingSet::new("R2", [Complex::new("c2", ["b"], ".")]);
        Entities {
            condensed_reactions: vec![CondensedReaction::new([r1.clone(), r1], [r2])],
            ..Entities::new()
        }
    }

    #[test]
    fn analyze_partitions_backend_discoveries() {
        let extra = RestingSet::new("R3", [Complex::new("c3", ["a", "b"], "(+)")]);
        let backend = DiscoveringBackend {
            extra: extra.clone(),
        };

        let system = analyze(input(), None, &backend, &Config::default()).unwrap();

        assert_eq!(system.network().resting_sets().len(), 2);
        assert_eq!(
            system.spurious_resting_sets().iter().collect::<Vec<_>>(),
            vec![&extra]
        );
        assert!(system.stats(&extra).is_ok());
    }

    #[test]
    fn analyze_with_precomputed_statistics() {
        let backend = PrecomputedStatistics::new(StatsTable::new());
        let system = analyze(input(), None, &backend, &Config::default()).unwrap();
        assert!(!system.has_statistics());
        assert!(system.spurious_resting_sets().is_empty());
    }

    #[test]
    fn backend_failure_is_reported() {
        let result = analyze(input(), None, &BrokenBackend, &Config::default());
        assert!(matches!(result, Err(Error::Statistics(msg)) if msg.contains("nupack")));
    }
}
