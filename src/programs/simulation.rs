//! Graph simulation matching as a vertex program.
//!
//! Every data vertex starts with the pattern vertices that share its label and
//! then repeatedly drops any pattern vertex `p` whose out-neighbourhood it can
//! no longer cover: for each pattern out-neighbour `q` of `p` there must be an
//! out-edge `u -> v` whose label equals `q`'s label and where `v` still holds
//! `q` as a candidate. The computation stops at the first round without a prune.
//!
//! Edge values carry the label of the edge's target: at iteration 0 each vertex
//! writes its own label onto its in-edges.

use std::sync::Arc;

use tracing::{debug, info};

use super::labels::LabelSource;
use crate::candidates::CandidateTable;
use crate::engine::{
    Activity, EdgeList, Engine, EngineConfig, IterationControl, RoundSummary, RunReport,
    UpdateContext, VertexProgram, VertexView,
};
use crate::pattern::PatternStore;
use crate::types::{Label, PatternVertexId, Result};

/// First iteration that refines candidates; seeding happens before it.
const REFINE_FROM: u32 = 2;

/// Vertex program computing the simulation relation of a pattern over a data graph.
pub struct SimulationProgram<L> {
    pattern: Arc<PatternStore>,
    table: CandidateTable,
    labels: L,
    seeded: usize,
    pruned: usize,
    history: Vec<usize>,
}

impl<L: LabelSource> SimulationProgram<L> {
    /// Fresh program for a data graph of `vertex_capacity` vertices.
    pub fn new(pattern: Arc<PatternStore>, vertex_capacity: usize, labels: L) -> Self {
        let table = CandidateTable::new(vertex_capacity, pattern.vertex_count());
        Self::with_table(pattern, table, labels)
    }

    /// Program continuing from an existing table.
    ///
    /// A sealed table skips seeding and refines from iteration 1, which is how
    /// a finished result is re-checked for idempotence.
    pub fn with_table(pattern: Arc<PatternStore>, table: CandidateTable, labels: L) -> Self {
        Self {
            pattern,
            table,
            labels,
            seeded: 0,
            pruned: 0,
            history: Vec::new(),
        }
    }

    /// The candidate table in its current state.
    pub fn table(&self) -> &CandidateTable {
        &self.table
    }

    /// Consumes the program and returns the candidate table.
    pub fn into_table(self) -> CandidateTable {
        self.table
    }

    /// The pattern being matched.
    pub fn pattern(&self) -> &PatternStore {
        &self.pattern
    }

    /// Candidate pairs added during seeding.
    pub fn seeded(&self) -> usize {
        self.seeded
    }

    /// Candidate pairs removed during refinement.
    pub fn pruned(&self) -> usize {
        self.pruned
    }

    /// Total live candidate pairs after each iteration.
    pub fn candidate_history(&self) -> &[usize] {
        &self.history
    }

    fn assign_label(
        &mut self,
        vertex: &mut VertexView<'_, Label, Label>,
        ctx: &mut UpdateContext<'_>,
    ) -> Activity {
        let label = self.labels.label_for(vertex.id());
        vertex.set_value(label);
        for i in 0..vertex.num_in_edges() {
            vertex.set_in_edge(i, label);
        }
        ctx.add_task(vertex.id(), false);
        Activity::Changed
    }

    fn seed(
        &mut self,
        vertex: &mut VertexView<'_, Label, Label>,
        ctx: &mut UpdateContext<'_>,
    ) -> Result<Activity> {
        let u = vertex.id();
        ctx.add_task(u, false);
        if self.table.has_candidates(u) {
            return Ok(Activity::Quiet);
        }
        let label = *vertex.value();
        let mut activity = Activity::Quiet;
        for p in self.pattern.vertices() {
            if self.pattern.label_of(p) == Some(label) && self.table.initialize(u, p)? {
                self.seeded += 1;
                activity = Activity::Changed;
            }
        }
        Ok(activity)
    }

    fn refine(
        &mut self,
        vertex: &mut VertexView<'_, Label, Label>,
        ctx: &mut UpdateContext<'_>,
    ) -> Result<Activity> {
        let u = vertex.id();
        if !self.table.has_candidates(u) {
            return Ok(Activity::Quiet);
        }
        let mut activity = Activity::Quiet;
        for p in self.table.candidates_of(u) {
            if self.covers(vertex, p) {
                continue;
            }
            self.table.prune(u, p)?;
            self.pruned += 1;
            debug!(vertex = u.0, pattern = p.0, "sim.prune");
            activity = Activity::Changed;
        }
        if activity.is_changed() {
            for i in 0..vertex.num_edges() {
                ctx.add_task(vertex.edge(i).far, true);
            }
        }
        Ok(activity)
    }

    /// Whether every pattern out-neighbour of `p` is matched by some out-edge of the vertex.
    fn covers(&self, vertex: &VertexView<'_, Label, Label>, p: PatternVertexId) -> bool {
        self.pattern.neighbors_of(p).iter().all(|&q| {
            let Some(wanted) = self.pattern.label_of(q) else {
                return false;
            };
            vertex
                .out_edges()
                .any(|edge| edge.value == wanted && self.table.contains(edge.far, q))
        })
    }
}

impl<L: LabelSource> VertexProgram for SimulationProgram<L> {
    type Vertex = Label;
    type Edge = Label;

    fn update(
        &mut self,
        vertex: &mut VertexView<'_, Label, Label>,
        ctx: &mut UpdateContext<'_>,
    ) -> Result<Activity> {
        if ctx.iteration() == 0 {
            return Ok(self.assign_label(vertex, ctx));
        }
        if self.table.is_sealed() {
            self.refine(vertex, ctx)
        } else {
            self.seed(vertex, ctx)
        }
    }

    fn before_iteration(&mut self, iteration: u32, _ctl: &mut IterationControl) {
        if iteration >= REFINE_FROM && !self.table.is_sealed() {
            self.table.seal();
            info!(
                live_vertices = self.table.live_vertices().count(),
                candidates = self.seeded,
                "sim.seed"
            );
        }
    }

    fn after_iteration(&mut self, round: &RoundSummary, _ctl: &mut IterationControl) {
        let total = self.table.total_candidates();
        self.history.push(total);
        debug!(
            iteration = round.iteration,
            candidates = total,
            pruned = self.pruned,
            "sim.round"
        );
    }
}

/// Everything a simulation run produces.
#[derive(Debug)]
pub struct SimulationRun {
    /// Engine report.
    pub report: RunReport,
    /// Final candidate table.
    pub table: CandidateTable,
    /// Label assigned to each data vertex.
    pub labels: Vec<Label>,
    /// Live candidate pairs after each iteration.
    pub candidate_history: Vec<usize>,
    /// Candidate pairs removed by refinement.
    pub pruned: usize,
}

/// Runs graph simulation of `pattern` over the graph given by `edges`.
pub fn run_simulation<L: LabelSource>(
    edges: &EdgeList,
    pattern: Arc<PatternStore>,
    labels: L,
    config: &EngineConfig,
) -> Result<SimulationRun> {
    let mut engine: Engine<Label, Label> = Engine::from_edge_list(edges, config.clone())?;
    let mut program = SimulationProgram::new(pattern, engine.graph().vertex_count(), labels);
    let report = engine.run(&mut program)?;
    Ok(SimulationRun {
        report,
        candidate_history: program.candidate_history().to_vec(),
        pruned: program.pruned(),
        table: program.into_table(),
        labels: engine.into_graph().into_vertex_values(),
    })
}

/// Reruns refinement on a finished table. Returns the rerun's report and table.
pub fn rerun_simulation<L: LabelSource>(
    edges: &EdgeList,
    pattern: Arc<PatternStore>,
    mut table: CandidateTable,
    labels: L,
    config: &EngineConfig,
) -> Result<SimulationRun> {
    table.seal();
    let mut engine: Engine<Label, Label> = Engine::from_edge_list(edges, config.clone())?;
    let mut program = SimulationProgram::with_table(pattern, table, labels);
    let report = engine.run(&mut program)?;
    Ok(SimulationRun {
        report,
        candidate_history: program.candidate_history().to_vec(),
        pruned: program.pruned(),
        table: program.into_table(),
        labels: engine.into_graph().into_vertex_values(),
    })
}
