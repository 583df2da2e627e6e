//! Unweighted single-source shortest paths by edge relaxation.
//!
//! The source has distance 1 and every hop adds 1. The value on edge `u -> v`
//! is the best distance offered to `v` through `u`.

use super::{execute, ProgramRun};
use crate::engine::{
    Activity, EdgeList, EngineConfig, UpdateContext, VertexProgram, VertexView,
};
use crate::types::{Result, SimError, VertexId};

/// Distance of a vertex the source cannot reach.
pub const INFINITY: u32 = u32::MAX;

/// Shortest-path relaxation from a single source.
#[derive(Clone, Debug)]
pub struct ShortestPath {
    source: VertexId,
}

impl ShortestPath {
    /// Program computing distances from `source`.
    pub fn new(source: VertexId) -> Self {
        Self { source }
    }

    /// The source vertex.
    pub fn source(&self) -> VertexId {
        self.source
    }
}

impl VertexProgram for ShortestPath {
    type Vertex = u32;
    type Edge = u32;

    fn update(
        &mut self,
        vertex: &mut VertexView<'_, u32, u32>,
        ctx: &mut UpdateContext<'_>,
    ) -> Result<Activity> {
        let id = vertex.id();
        if ctx.iteration() == 0 {
            for i in 0..vertex.num_out_edges() {
                vertex.set_out_edge(i, INFINITY);
            }
            if id == self.source {
                vertex.set_value(1);
                ctx.add_task(id, false);
            } else {
                vertex.set_value(INFINITY);
            }
            return Ok(Activity::Quiet);
        }

        let current = *vertex.value();
        let best = vertex.in_edges().map(|e| e.value).fold(current, u32::min);
        let mut activity = Activity::from_changed(best < current);
        if activity.is_changed() {
            vertex.set_value(best);
        }
        if best == INFINITY {
            return Ok(activity);
        }

        let offer = best.saturating_add(1);
        for i in 0..vertex.num_out_edges() {
            let edge = vertex.out_edge(i);
            if offer < edge.value {
                vertex.set_out_edge(i, offer);
                ctx.add_task(edge.far, true);
                activity = Activity::Changed;
            }
        }
        Ok(activity)
    }
}

/// Distances from `source` over the graph given by `edges`; unreachable vertices hold [`INFINITY`].
pub fn run_shortest_path(
    edges: &EdgeList,
    source: VertexId,
    config: &EngineConfig,
) -> Result<ProgramRun<u32>> {
    if source.index() >= edges.vertex_count() {
        return Err(SimError::InvalidGraph(format!(
            "source {source} outside graph of {} vertices",
            edges.vertex_count()
        )));
    }
    execute(edges, config, &mut ShortestPath::new(source))
}
