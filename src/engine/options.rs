use serde::{Deserialize, Serialize};

/// Default iteration ceiling for a run.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;
/// Default number of vertices per execution interval.
pub const DEFAULT_INTERVAL_SIZE: usize = 1 << 16;

/// Per-run engine configuration threaded into every update callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of iterations (including iteration 0) before the run
    /// stops without having converged.
    pub max_iterations: u32,
    /// When enabled only vertices with outstanding tasks are visited after
    /// iteration 0; otherwise every vertex is visited every iteration.
    pub selective_scheduling: bool,
    /// Vertices per execution interval. Zero runs the whole graph as one interval.
    pub interval_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            selective_scheduling: false,
            interval_size: DEFAULT_INTERVAL_SIZE,
        }
    }
}

impl EngineConfig {
    /// Dense activation with the given iteration ceiling.
    pub fn dense(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..Self::default()
        }
    }

    /// Selective scheduling with the given iteration ceiling.
    pub fn selective(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            selective_scheduling: true,
            ..Self::default()
        }
    }

    /// Overrides the execution interval size.
    pub fn with_interval_size(mut self, interval_size: usize) -> Self {
        self.interval_size = interval_size;
        self
    }
}
