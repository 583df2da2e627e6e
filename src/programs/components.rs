//! Connected components by minimum-label propagation.
//!
//! Every vertex starts with its own id as label and repeatedly adopts the
//! smallest label seen on its edges. Edge values only ever decrease after
//! iteration 0, so a round without label or edge changes is a fixpoint.

use super::{execute, ProgramRun};
use crate::engine::{Activity, EdgeList, EngineConfig, UpdateContext, VertexProgram, VertexView};
use crate::types::Result;

/// Label propagation program.
#[derive(Clone, Copy, Debug)]
pub struct ConnectedComponents {
    undirected: bool,
}

impl Default for ConnectedComponents {
    fn default() -> Self {
        Self { undirected: true }
    }
}

impl ConnectedComponents {
    /// Weakly connected components: labels travel both ways along every edge.
    pub fn undirected() -> Self {
        Self { undirected: true }
    }

    /// Labels only travel along edge direction, from in-edges to out-edges.
    pub fn directed() -> Self {
        Self { undirected: false }
    }

    /// Whether labels travel against edge direction too.
    pub fn is_undirected(&self) -> bool {
        self.undirected
    }

    fn lower_edges(
        &self,
        vertex: &mut VertexView<'_, u32, u32>,
        label: u32,
        ctx: &mut UpdateContext<'_>,
    ) -> bool {
        let mut lowered = false;
        let (first, count) = if self.undirected {
            (0, vertex.num_edges())
        } else {
            (vertex.num_in_edges(), vertex.num_out_edges())
        };
        for i in first..first + count {
            let edge = vertex.edge(i);
            if label < edge.value {
                vertex.set_edge(i, label);
                ctx.add_task(edge.far, true);
                lowered = true;
            }
        }
        lowered
    }
}

impl VertexProgram for ConnectedComponents {
    type Vertex = u32;
    type Edge = u32;

    fn update(
        &mut self,
        vertex: &mut VertexView<'_, u32, u32>,
        ctx: &mut UpdateContext<'_>,
    ) -> Result<Activity> {
        let id = vertex.id();
        if ctx.iteration() == 0 {
            vertex.set_value(id.0);
            for i in 0..vertex.num_out_edges() {
                vertex.set_out_edge(i, id.0);
            }
            ctx.add_task(id, false);
            return Ok(Activity::Quiet);
        }

        let current = *vertex.value();
        let seen = if self.undirected {
            vertex.edges().map(|e| e.value).min()
        } else {
            vertex.in_edges().map(|e| e.value).min()
        };
        let label = seen.map_or(current, |s| s.min(current));
        let mut activity = Activity::from_changed(label < current);
        if activity.is_changed() {
            vertex.set_value(label);
        }
        if self.lower_edges(vertex, label, ctx) {
            activity = Activity::Changed;
        }
        Ok(activity)
    }
}

/// Component labels of the graph given by `edges`.
pub fn run_components(
    edges: &EdgeList,
    mut program: ConnectedComponents,
    config: &EngineConfig,
) -> Result<ProgramRun<u32>> {
    execute(edges, config, &mut program)
}
