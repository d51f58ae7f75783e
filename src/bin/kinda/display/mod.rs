mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{print_complexes, print_reactions, print_resting_sets, print_summary};

#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: crate::io::stderr_is_tty(),
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        if quiet {
            Self { interactive: false }
        } else {
            self
        }
    }

    /// Whether results should also be written as plain text to stdout.
    ///
    /// An interactive session on a terminal gets tables only.
    pub fn plain_output(&self) -> bool {
        !self.interactive || !crate::io::stdout_is_tty()
    }
}
