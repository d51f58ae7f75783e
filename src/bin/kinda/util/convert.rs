use kinda_system::{Productivity, Provenance};

use crate::cli;

impl From<cli::Provenance> for Provenance {
    fn from(value: cli::Provenance) -> Self {
        match value {
            cli::Provenance::Known => Provenance::Known,
            cli::Provenance::Spurious => Provenance::Spurious,
            cli::Provenance::Any => Provenance::Any,
        }
    }
}

/// Maps the mutually exclusive `--productive` / `--unproductive` flags.
pub fn productivity(productive: bool, unproductive: bool) -> Option<Productivity> {
    match (productive, unproductive) {
        (true, _) => Some(Productivity::Productive),
        (_, true) => Some(Productivity::Unproductive),
        _ => None,
    }
}

pub fn report_productivity(kind: cli::ReactionKind) -> Option<Productivity> {
    match kind {
        cli::ReactionKind::Productive => Some(Productivity::Productive),
        cli::ReactionKind::Unproductive => Some(Productivity::Unproductive),
        cli::ReactionKind::All => None,
    }
}

pub fn provenance_label(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Known => "known",
        Provenance::Spurious => "spurious",
        Provenance::Any => "known + spurious",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn productivity_flags() {
        assert_eq!(productivity(false, false), None);
        assert_eq!(productivity(true, false), Some(Productivity::Productive));
        assert_eq!(productivity(false, true), Some(Productivity::Unproductive));
    }

    #[test]
    fn report_productivity_is_tristate() {
        assert_eq!(
            report_productivity(cli::ReactionKind::default()),
            Some(Productivity::Productive)
        );
        assert_eq!(
            report_productivity(cli::ReactionKind::Unproductive),
            Some(Productivity::Unproductive)
        );
        assert_eq!(report_productivity(cli::ReactionKind::All), None);
    }

    #[test]
    fn provenance_from_cli() {
        assert_eq!(Provenance::from(cli::Provenance::Spurious), Provenance::Spurious);
        assert_eq!(Provenance::from(cli::Provenance::default()), Provenance::Any);
    }
}
