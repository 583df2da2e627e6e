use super::graph::Topology;
use crate::types::VertexId;

/// Snapshot of one incident edge: the endpoint on the far side and the
/// value currently stored on the edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge<E> {
    /// Vertex at the other end of the edge.
    pub far: VertexId,
    /// Value stored on the edge.
    pub value: E,
}

/// Accessor handed to a vertex update for the duration of one callback.
///
/// Edge values are shared between both endpoints of an edge; the engine never
/// runs two adjacent vertices at the same time, so writes need no locking.
/// Combined edge indexing lists in-edges first, then out-edges.
pub struct VertexView<'a, V, E> {
    id: VertexId,
    value: &'a mut V,
    topology: &'a Topology,
    edge_values: &'a mut [E],
}

impl<'a, V, E: Copy> VertexView<'a, V, E> {
    pub(crate) fn new(
        id: VertexId,
        value: &'a mut V,
        topology: &'a Topology,
        edge_values: &'a mut [E],
    ) -> Self {
        Self {
            id,
            value,
            topology,
            edge_values,
        }
    }

    /// Identifier of this vertex.
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Current vertex state.
    #[inline]
    pub fn value(&self) -> &V {
        self.value
    }

    /// Replaces the vertex state.
    #[inline]
    pub fn set_value(&mut self, value: V) {
        *self.value = value;
    }

    /// Number of in-edges.
    #[inline]
    pub fn num_in_edges(&self) -> usize {
        self.topology.in_edge_ids(self.id).len()
    }

    /// Number of out-edges.
    #[inline]
    pub fn num_out_edges(&self) -> usize {
        self.topology.out_edge_ids(self.id).len()
    }

    /// Number of incident edges (in + out).
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_in_edges() + self.num_out_edges()
    }

    /// The `i`-th in-edge; `far` is its source.
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_in_edges()`.
    pub fn in_edge(&self, i: usize) -> Edge<E> {
        let eid = self.topology.in_edge_ids(self.id)[i] as usize;
        Edge {
            far: self.topology.sources[eid],
            value: self.edge_values[eid],
        }
    }

    /// The `i`-th out-edge; `far` is its target.
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_out_edges()`.
    pub fn out_edge(&self, i: usize) -> Edge<E> {
        let eid = self.topology.out_edge_ids(self.id)[i] as usize;
        Edge {
            far: self.topology.targets[eid],
            value: self.edge_values[eid],
        }
    }

    /// The `i`-th incident edge, in-edges first.
    pub fn edge(&self, i: usize) -> Edge<E> {
        let n_in = self.num_in_edges();
        if i < n_in {
            self.in_edge(i)
        } else {
            self.out_edge(i - n_in)
        }
    }

    /// Overwrites the value of the `i`-th in-edge.
    pub fn set_in_edge(&mut self, i: usize, value: E) {
        let eid = self.topology.in_edge_ids(self.id)[i] as usize;
        self.edge_values[eid] = value;
    }

    /// Overwrites the value of the `i`-th out-edge.
    pub fn set_out_edge(&mut self, i: usize, value: E) {
        let eid = self.topology.out_edge_ids(self.id)[i] as usize;
        self.edge_values[eid] = value;
    }

    /// Overwrites the value of the `i`-th incident edge, in-edges first.
    pub fn set_edge(&mut self, i: usize, value: E) {
        let n_in = self.num_in_edges();
        if i < n_in {
            self.set_in_edge(i, value);
        } else {
            self.set_out_edge(i - n_in, value);
        }
    }

    /// Writes `value` onto every incident edge.
    pub fn broadcast(&mut self, value: E) {
        for &eid in self.topology.in_edge_ids(self.id) {
            self.edge_values[eid as usize] = value;
        }
        for &eid in self.topology.out_edge_ids(self.id) {
            self.edge_values[eid as usize] = value;
        }
    }

    /// In-edges in order.
    pub fn in_edges(&self) -> impl Iterator<Item = Edge<E>> + '_ {
        (0..self.num_in_edges()).map(move |i| self.in_edge(i))
    }

    /// Out-edges in order.
    pub fn out_edges(&self) -> impl Iterator<Item = Edge<E>> + '_ {
        (0..self.num_out_edges()).map(move |i| self.out_edge(i))
    }

    /// All incident edges, in-edges first.
    pub fn edges(&self) -> impl Iterator<Item = Edge<E>> + '_ {
        self.in_edges().chain(self.out_edges())
    }

    /// Far endpoints of every incident edge, in-edges first. A neighbour
    /// linked by several edges appears once per edge.
    pub fn neighbors(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.edges().map(|edge| edge.far)
    }
}
