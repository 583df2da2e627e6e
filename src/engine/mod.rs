//! In-memory vertex-centric engine driving [`VertexProgram`]s.
//!
//! The engine owns a [`DataGraph`], walks the vertices of every iteration in
//! execution intervals, invokes the program's lifecycle hooks and update
//! callback, and decides when the run stops:
//!
//! ```text
//! iteration i:  before_iteration
//!                 ├─ before_exec_interval [a..=b]
//!                 │    update(v) for v in [a..=b]  (scheduled vertices only
//!                 │                                 under selective scheduling)
//!                 └─ after_exec_interval  [a..=b]
//!               after_iteration(RoundSummary)
//!               stop if: quiescent round (i > 0) | terminal iteration set
//!                        | no tasks left (selective) | iteration ceiling
//! ```
//!
//! Vertices run one at a time, so two vertices sharing an edge never update
//! concurrently and edge values need no synchronization.

mod convergence;
mod graph;
mod options;
mod program;
mod report;
mod scheduler;
mod vertex;

use std::ops::RangeInclusive;

use tracing::{debug, error, info};

pub use convergence::{Activity, IterationControl, RoundSummary};
pub use graph::{DataGraph, EdgeList};
pub use options::{EngineConfig, DEFAULT_INTERVAL_SIZE, DEFAULT_MAX_ITERATIONS};
pub use program::{UpdateContext, VertexProgram};
pub use report::{RunOutcome, RunReport};
pub use scheduler::Scheduler;
pub use vertex::{Edge, VertexView};

use convergence::ConvergenceTracker;

use crate::types::{Result, VertexId};

/// Drives a vertex program over an in-memory graph.
pub struct Engine<V, E> {
    graph: DataGraph<V, E>,
    config: EngineConfig,
}

impl<V: Clone + Default, E: Copy + Default> Engine<V, E> {
    /// Builds the graph from `edges` with default values and wraps it in an engine.
    pub fn from_edge_list(edges: &EdgeList, config: EngineConfig) -> Result<Self> {
        Ok(Self::new(DataGraph::from_edge_list(edges)?, config))
    }
}

impl<V, E> Engine<V, E> {
    /// Wraps an existing graph.
    pub fn new(graph: DataGraph<V, E>, config: EngineConfig) -> Self {
        Self { graph, config }
    }

    /// Run configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The data graph with its current vertex and edge values.
    pub fn graph(&self) -> &DataGraph<V, E> {
        &self.graph
    }

    /// Consumes the engine and returns the graph.
    pub fn into_graph(self) -> DataGraph<V, E> {
        self.graph
    }

    /// Runs `program` until it converges, halts, or hits the iteration ceiling.
    ///
    /// Iteration 0 visits every vertex. Afterwards every vertex is visited each
    /// iteration under dense activation, and only vertices with outstanding
    /// tasks under selective scheduling.
    pub fn run<P>(&mut self, program: &mut P) -> Result<RunReport>
    where
        P: VertexProgram<Vertex = V, Edge = E>,
        E: Copy,
    {
        let vertex_count = self.graph.vertex_count();
        let selective = self.config.selective_scheduling;
        let windows = intervals(vertex_count, self.config.interval_size);
        let mut scheduler = Scheduler::new(vertex_count);
        scheduler.schedule_all();

        info!(
            vertices = vertex_count,
            edges = self.graph.edge_count(),
            max_iterations = self.config.max_iterations,
            selective,
            intervals = windows.len(),
            "engine.run.start"
        );

        let mut tracker = ConvergenceTracker::default();
        let mut ctl = IterationControl::new(0);
        let mut rounds = Vec::new();
        let mut outcome = RunOutcome::IterationLimit;

        for iteration in 0..self.config.max_iterations {
            ctl.enter(iteration);
            program.before_iteration(iteration, &mut ctl);
            tracker.begin(iteration);

            for window in &windows {
                program.before_exec_interval(window.clone(), &mut ctl);
                let DataGraph {
                    topology,
                    vertex_values,
                    edge_values,
                } = &mut self.graph;
                for raw in window.start().0..=window.end().0 {
                    let id = VertexId(raw);
                    let due = scheduler.take_task(id);
                    if selective && !due {
                        continue;
                    }
                    let mut view = VertexView::new(
                        id,
                        &mut vertex_values[id.index()],
                        topology,
                        edge_values.as_mut_slice(),
                    );
                    let mut ctx = UpdateContext::new(iteration, &self.config, &mut scheduler);
                    let activity = program.update(&mut view, &mut ctx).map_err(|err| {
                        error!(vertex = raw, iteration, error = %err, "engine.update.failed");
                        err
                    })?;
                    tracker.record(activity);
                }
                program.after_exec_interval(window.clone(), &mut ctl);
            }

            let summary = tracker.finish(scheduler.pending_next());
            program.after_iteration(&summary, &mut ctl);
            debug!(
                iteration,
                visited = summary.visited,
                changed = summary.changed,
                scheduled_next = summary.scheduled_next,
                "engine.iteration.done"
            );
            rounds.push(summary);
            scheduler.advance();

            if summary.converged {
                info!(iteration, "engine.run.converged");
                outcome = RunOutcome::Converged;
                break;
            }
            if ctl.stops_after(iteration) {
                outcome = RunOutcome::Halted;
                break;
            }
            if selective && !scheduler.has_tasks() {
                outcome = RunOutcome::Converged;
                break;
            }
        }

        let report = RunReport {
            outcome,
            iterations: rounds.len() as u32,
            rounds,
        };
        info!(
            outcome = ?report.outcome,
            iterations = report.iterations,
            changes = report.total_changes(),
            "engine.run.finished"
        );
        Ok(report)
    }
}

/// Splits `[0, n)` into inclusive windows of at most `size` vertices.
fn intervals(n: usize, size: usize) -> Vec<RangeInclusive<VertexId>> {
    if n == 0 {
        return Vec::new();
    }
    let size = if size == 0 { n } else { size };
    (0..n)
        .step_by(size)
        .map(|start| {
            let end = (start + size).min(n) - 1;
            VertexId(start as u32)..=VertexId(end as u32)
        })
        .collect()
}
