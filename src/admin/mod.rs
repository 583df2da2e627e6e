#![forbid(unsafe_code)]

//! Post-run inspection of simulation results.
//!
//! These helpers never mutate the candidate table. They check the final
//! relation against the data graph and summarize it for reporting.

mod stats;
mod verify;

/// Candidate table and run statistics.
pub use stats::{stats, CandidateStats, PatternVertexStats, RunStatsSection, StatsReport};

/// Simulation result verification.
///
/// Re-checks label agreement and pattern coverage for every live candidate.
pub use verify::{verify, VerifyCounts, VerifyFinding, VerifyLevel, VerifyReport, VerifySeverity};
