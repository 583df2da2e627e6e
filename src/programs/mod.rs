//! Vertex programs built on the engine's scheduling and convergence protocol.
//!
//! [`simulation`] is the graph simulation matcher. The other three are monotone
//! relaxations that share the same protocol and only differ in their update
//! rule and in what counts as a change.

pub mod coloring;
pub mod components;
pub mod labels;
pub mod shortest_path;
pub mod simulation;

use serde::Serialize;

use crate::engine::{EdgeList, Engine, EngineConfig, RunReport, VertexProgram};
use crate::types::Result;

pub use coloring::{run_coloring, GreedyColoring};
pub use components::{run_components, ConnectedComponents};
pub use labels::{FixedLabels, LabelSource, RandomLabels};
pub use shortest_path::{run_shortest_path, ShortestPath, INFINITY};
pub use simulation::{rerun_simulation, run_simulation, SimulationProgram, SimulationRun};

/// Final per-vertex scalars of a relaxation program plus the run report.
#[derive(Clone, Debug, Serialize)]
pub struct ProgramRun<T> {
    /// Engine report.
    pub report: RunReport,
    /// Final vertex state, indexed by vertex id.
    pub values: Vec<T>,
}

/// Runs `program` over a fresh graph built from `edges`.
pub(crate) fn execute<P>(
    edges: &EdgeList,
    config: &EngineConfig,
    program: &mut P,
) -> Result<ProgramRun<P::Vertex>>
where
    P: VertexProgram,
{
    let mut engine: Engine<P::Vertex, P::Edge> = Engine::from_edge_list(edges, config.clone())?;
    let report = engine.run(program)?;
    Ok(ProgramRun {
        report,
        values: engine.into_graph().into_vertex_values(),
    })
}
