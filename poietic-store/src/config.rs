//! [StoreConfig]: explicit configuration for a [crate::Design], passed at construction
//! time rather than read from globals or the environment.

/// Configuration for one [crate::Design]. Always constructed explicitly and passed to
/// [crate::Design::new].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Caps how many frames the undo stack retains. `None` means the history is
    /// unbounded unless a caller opts into a limit.
    pub max_history_size: Option<usize>,
    /// When true, `accept`'s constraint-checking pass stops at the first violating
    /// constraint instead of accumulating every violation.
    pub early_exit_constraints: bool,
}

impl StoreConfig {
    pub fn new() -> Self {
        StoreConfig {
            max_history_size: None,
            early_exit_constraints: false,
        }
    }

    pub fn with_max_history_size(mut self, max: usize) -> Self {
        self.max_history_size = Some(max);
        self
    }

    pub fn with_early_exit_constraints(mut self, early_exit: bool) -> Self {
        self.early_exit_constraints = early_exit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
