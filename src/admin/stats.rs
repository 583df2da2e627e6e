use serde::Serialize;

use crate::candidates::CandidateTable;
use crate::engine::RunReport;
use crate::pattern::PatternStore;
use crate::types::{Label, PatternVertexId};

#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub run: RunStatsSection,
    pub candidates: CandidateStats,
    pub pattern: Vec<PatternVertexStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunStatsSection {
    pub outcome: String,
    pub iterations: u32,
    pub total_changes: usize,
    pub busiest_round: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateStats {
    pub vertex_capacity: usize,
    pub pattern_size: usize,
    pub live_vertices: usize,
    pub candidate_pairs: usize,
    pub allocated_sets: usize,
    pub max_candidates_per_vertex: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternVertexStats {
    pub vertex: PatternVertexId,
    pub label: Option<Label>,
    pub out_degree: usize,
    pub matches: usize,
}

pub fn stats(report: &RunReport, pattern: &PatternStore, table: &CandidateTable) -> StatsReport {
    let busiest_round = report
        .rounds
        .iter()
        .filter(|round| round.changed > 0)
        .max_by_key(|round| round.changed)
        .map(|round| round.iteration);
    let run = RunStatsSection {
        outcome: format!("{:?}", report.outcome).to_lowercase(),
        iterations: report.iterations,
        total_changes: report.total_changes(),
        busiest_round,
    };

    let candidates = CandidateStats {
        vertex_capacity: table.vertex_capacity(),
        pattern_size: table.pattern_size(),
        live_vertices: table.live_vertices().count(),
        candidate_pairs: table.total_candidates(),
        allocated_sets: table.allocated_sets(),
        max_candidates_per_vertex: table
            .live_vertices()
            .map(|u| table.candidate_count(u))
            .max()
            .unwrap_or(0),
    };

    let pattern = pattern
        .vertices()
        .map(|p| PatternVertexStats {
            vertex: p,
            label: pattern.label_of(p),
            out_degree: pattern.neighbors_of(p).len(),
            matches: table.matches_of(p).len(),
        })
        .collect();

    StatsReport {
        run,
        candidates,
        pattern,
    }
}
