//! Execution settings for the plan runner.

/// Default limit on plan tree depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings applied while running a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Plans deeper than this are rejected before evaluation.
    pub max_depth: usize,
}

impl RunnerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum plan depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
