use rayon::prelude::*;
use serde::Serialize;

use crate::candidates::CandidateTable;
use crate::engine::{DataGraph, EdgeList};
use crate::pattern::PatternStore;
use crate::types::{Label, PatternVertexId, Result, VertexId};

const MAX_FINDINGS: usize = 32;
const PARALLEL_THRESHOLD: usize = 1024;

/// Specifies the depth of verification checks to perform.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyLevel {
    /// Table shape and label agreement only.
    Fast,
    /// Also re-checks pattern coverage of every live candidate.
    Full,
}

/// Indicates the severity level of a verification finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifySeverity {
    /// Informational message about the verification process.
    Info,
    /// Non-critical issue that may indicate a problem.
    Warning,
    /// The candidate relation is not a valid simulation.
    Error,
}

/// Represents a single issue discovered during verification.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyFinding {
    /// The severity level of this finding.
    pub severity: VerifySeverity,
    /// Human-readable description of the issue.
    pub message: String,
}

impl VerifyFinding {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: VerifySeverity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: VerifySeverity::Warning,
            message: message.into(),
        }
    }
}

/// Statistics collected during verification.
#[derive(Clone, Debug, Default, Serialize)]
pub struct VerifyCounts {
    /// Data vertices with a set indicator.
    pub live_vertices: u64,
    /// Live `(data vertex, pattern vertex)` pairs examined.
    pub candidate_pairs: u64,
    /// Pattern edges checked for coverage.
    pub coverage_checks: u64,
}

/// Complete report of a verification pass.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyReport {
    /// The verification level that was performed.
    pub level: VerifyLevel,
    /// Whether verification passed without any error finding.
    pub success: bool,
    /// Issues discovered, capped at a fixed number.
    pub findings: Vec<VerifyFinding>,
    /// Statistics about what was examined.
    pub counts: VerifyCounts,
}

/// Verifies that `table` is a valid simulation of `pattern` over the graph given
/// by `edges` and the per-vertex `labels`.
///
/// A valid result gives every live candidate `p` of `u` the same label as `u`,
/// and for every pattern edge `p -> q` an out-neighbour `v` of `u` labelled like
/// `q` that still holds `q`. Large tables are checked in parallel.
///
/// # Errors
///
/// Returns an error only if the data graph cannot be built from `edges`.
pub fn verify(
    edges: &EdgeList,
    labels: &[Label],
    pattern: &PatternStore,
    table: &CandidateTable,
    level: VerifyLevel,
) -> Result<VerifyReport> {
    let graph: DataGraph<(), ()> = DataGraph::from_edge_list(edges)?;
    let mut findings = Vec::new();
    let mut counts = VerifyCounts::default();

    if table.vertex_capacity() != graph.vertex_count() {
        push(
            &mut findings,
            VerifyFinding::error(format!(
                "table indexes {} vertices, graph has {}",
                table.vertex_capacity(),
                graph.vertex_count()
            )),
        );
    }
    if labels.len() != graph.vertex_count() {
        push(
            &mut findings,
            VerifyFinding::error(format!(
                "{} labels for {} vertices",
                labels.len(),
                graph.vertex_count()
            )),
        );
    }
    if table.pattern_size() != pattern.vertex_count() {
        push(
            &mut findings,
            VerifyFinding::error(format!(
                "table is {} pattern vertices wide, pattern has {}",
                table.pattern_size(),
                pattern.vertex_count()
            )),
        );
    }
    if !table.is_sealed() {
        push(
            &mut findings,
            VerifyFinding::warning("candidate table was never sealed; refinement did not run"),
        );
    }

    let live: Vec<VertexId> = table.live_vertices().collect();
    counts.live_vertices = live.len() as u64;
    counts.candidate_pairs = table.total_candidates() as u64;

    let checker = Checker {
        graph: &graph,
        labels,
        pattern,
        table,
        coverage: matches!(level, VerifyLevel::Full),
    };
    let results: Vec<(u64, Vec<String>)> = if live.len() >= PARALLEL_THRESHOLD {
        live.par_iter().map(|&u| checker.check(u)).collect()
    } else {
        live.iter().map(|&u| checker.check(u)).collect()
    };
    for (checks, messages) in results {
        counts.coverage_checks += checks;
        for message in messages {
            push(&mut findings, VerifyFinding::error(message));
        }
    }

    let success = findings
        .iter()
        .all(|finding| finding.severity != VerifySeverity::Error);
    Ok(VerifyReport {
        level,
        success,
        findings,
        counts,
    })
}

struct Checker<'a> {
    graph: &'a DataGraph<(), ()>,
    labels: &'a [Label],
    pattern: &'a PatternStore,
    table: &'a CandidateTable,
    coverage: bool,
}

impl Checker<'_> {
    fn label(&self, v: VertexId) -> Option<Label> {
        self.labels.get(v.index()).copied()
    }

    /// Returns the number of coverage checks made and any violations found.
    fn check(&self, u: VertexId) -> (u64, Vec<String>) {
        let mut checks = 0;
        let mut messages = Vec::new();
        for p in self.table.candidates_of(u) {
            if self.label(u) != self.pattern.label_of(p) {
                messages.push(format!("vertex {u} holds {p} but their labels differ"));
                continue;
            }
            if !self.coverage {
                continue;
            }
            for &q in self.pattern.neighbors_of(p) {
                checks += 1;
                if !self.covered(u, q) {
                    messages.push(format!(
                        "vertex {u} holds {p} but no out-neighbour holds {q}"
                    ));
                }
            }
        }
        (checks, messages)
    }

    fn covered(&self, u: VertexId, q: PatternVertexId) -> bool {
        let wanted = self.pattern.label_of(q);
        self.graph
            .out_neighbors(u)
            .any(|v| self.label(v) == wanted && self.table.contains(v, q))
    }
}

fn push(findings: &mut Vec<VerifyFinding>, finding: VerifyFinding) {
    if findings.len() < MAX_FINDINGS {
        findings.push(finding);
    }
}
