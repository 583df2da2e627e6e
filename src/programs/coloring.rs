//! Greedy conflict-driven coloring.
//!
//! Conflicts are resolved towards higher ids: a vertex takes the smallest color
//! not used by its higher-id out-neighbours and leaves lower-id neighbours to
//! move around it. Each vertex publishes its color on the in-edges coming from
//! lower ids, which are exactly the edges its lower neighbours read.
//!
//! A conflicting vertex recomputes its color instead of bumping it by one. Colors
//! are then fixed from the highest id downwards, so the fixpoint is unique and
//! every visit order reaches it. On `0 -> 1 -> 2` this gives `[0, 1, 0]`, where
//! bumping on conflict would stop at `[2, 1, 0]` under dense scheduling.

use super::{execute, ProgramRun};
use crate::engine::{Activity, EdgeList, EngineConfig, UpdateContext, VertexProgram, VertexView};
use crate::types::Result;

/// Greedy coloring program. Vertex and edge values are color indices.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyColoring;

impl GreedyColoring {
    fn publish(vertex: &mut VertexView<'_, u32, u32>, color: u32, ctx: &mut UpdateContext<'_>) {
        let id = vertex.id();
        for i in 0..vertex.num_in_edges() {
            let edge = vertex.in_edge(i);
            if edge.far < id {
                vertex.set_in_edge(i, color);
                if ctx.iteration() > 0 {
                    ctx.add_task(edge.far, false);
                }
            }
        }
    }
}

/// Smallest color absent from `used`.
fn first_free(mut used: Vec<u32>) -> u32 {
    used.sort_unstable();
    used.dedup();
    let mut color = 0;
    for c in used {
        if c != color {
            break;
        }
        color += 1;
    }
    color
}

impl VertexProgram for GreedyColoring {
    type Vertex = u32;
    type Edge = u32;

    fn update(
        &mut self,
        vertex: &mut VertexView<'_, u32, u32>,
        ctx: &mut UpdateContext<'_>,
    ) -> Result<Activity> {
        let id = vertex.id();
        if ctx.iteration() == 0 {
            vertex.set_value(0);
            Self::publish(vertex, 0, ctx);
            ctx.add_task(id, false);
            return Ok(Activity::Quiet);
        }

        let used: Vec<u32> = vertex
            .out_edges()
            .filter(|e| e.far > id)
            .map(|e| e.value)
            .collect();
        let color = first_free(used);
        if color == *vertex.value() {
            return Ok(Activity::Quiet);
        }
        vertex.set_value(color);
        Self::publish(vertex, color, ctx);
        Ok(Activity::Changed)
    }
}

/// Colors the graph given by `edges`.
pub fn run_coloring(edges: &EdgeList, config: &EngineConfig) -> Result<ProgramRun<u32>> {
    execute(edges, config, &mut GreedyColoring)
}
