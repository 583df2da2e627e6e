use serde::Serialize;

use super::convergence::RoundSummary;

/// How a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// A full round changed nothing, or selective scheduling ran out of tasks.
    Converged,
    /// A lifecycle hook set the terminal iteration.
    Halted,
    /// The iteration ceiling was reached without a quiescent round.
    IterationLimit,
}

/// Result of [`super::Engine::run`].
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Number of iterations executed, including iteration 0.
    pub iterations: u32,
    /// Per-iteration summaries in order.
    pub rounds: Vec<RoundSummary>,
}

impl RunReport {
    /// Whether the run reached a fixpoint.
    pub fn converged(&self) -> bool {
        self.outcome == RunOutcome::Converged
    }

    /// Number of the last iteration executed, if any ran.
    pub fn last_iteration(&self) -> Option<u32> {
        self.rounds.last().map(|round| round.iteration)
    }

    /// Total updates that reported a change over the run.
    pub fn total_changes(&self) -> usize {
        self.rounds.iter().map(|round| round.changed).sum()
    }
}
