use tracing::debug;

use crate::types::{Result, SimError, VertexId};

/// Vertex counts up to this are accepted whatever the edge count.
const MIN_VERTEX_ALLOWANCE: usize = 1 << 20;
/// Beyond the allowance, ids implied by edges may reach this many vertices per edge.
const MAX_VERTICES_PER_EDGE: usize = 64;

/// Directed edge list used to build a [`DataGraph`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeList {
    reserved: usize,
    vertex_count: usize,
    edges: Vec<(u32, u32)>,
}

impl EdgeList {
    /// Empty edge list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty edge list that reserves ids `[0, n)` even if they have no edges.
    pub fn with_vertex_count(n: usize) -> Self {
        Self {
            reserved: n,
            vertex_count: n,
            edges: Vec::new(),
        }
    }

    /// Appends the directed edge `src -> dst`.
    pub fn push(&mut self, src: u32, dst: u32) {
        self.vertex_count = self
            .vertex_count
            .max(src as usize + 1)
            .max(dst as usize + 1);
        self.edges.push((src, dst));
    }

    /// Raises the vertex count to at least `n`.
    pub fn reserve_vertices(&mut self, n: usize) {
        self.reserved = self.reserved.max(n);
        self.vertex_count = self.vertex_count.max(n);
    }

    /// Number of vertices: the larger of the reserved count and `max id + 1`.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Vertex count requested explicitly, ignoring ids seen on edges.
    pub fn reserved_vertices(&self) -> usize {
        self.reserved
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if there are no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl FromIterator<(u32, u32)> for EdgeList {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let mut list = EdgeList::new();
        for (src, dst) in iter {
            list.push(src, dst);
        }
        list
    }
}

/// Read-only adjacency shared by every vertex view.
///
/// Each edge has one id; the id indexes both the endpoint arrays and the
/// edge value slot shared by the two endpoints.
#[derive(Clone, Debug)]
pub(crate) struct Topology {
    pub(crate) sources: Vec<VertexId>,
    pub(crate) targets: Vec<VertexId>,
    out_offsets: Vec<usize>,
    out_edges: Vec<u32>,
    in_offsets: Vec<usize>,
    in_edges: Vec<u32>,
}

impl Topology {
    fn build(list: &EdgeList) -> Result<Self> {
        let n = list.vertex_count();
        if list.len() > u32::MAX as usize {
            return Err(SimError::InvalidGraph(format!(
                "{} edges exceed the 32-bit edge id space",
                list.len()
            )));
        }
        let allowance = list
            .len()
            .saturating_mul(MAX_VERTICES_PER_EDGE)
            .max(MIN_VERTEX_ALLOWANCE);
        if n > allowance && n > list.reserved_vertices() {
            return Err(SimError::InvalidGraph(format!(
                "vertex id {} implies {n} vertices for only {} edges; \
                 reserve the vertex count explicitly if this is intended",
                n - 1,
                list.len()
            )));
        }
        let mut sources = Vec::with_capacity(list.len());
        let mut targets = Vec::with_capacity(list.len());
        let mut out_degree = vec![0usize; n];
        let mut in_degree = vec![0usize; n];
        for &(src, dst) in list.edges() {
            out_degree[src as usize] += 1;
            in_degree[dst as usize] += 1;
            sources.push(VertexId(src));
            targets.push(VertexId(dst));
        }
        let out_offsets = prefix_sums(&out_degree);
        let in_offsets = prefix_sums(&in_degree);
        let mut out_cursor = out_offsets[..n].to_vec();
        let mut in_cursor = in_offsets[..n].to_vec();
        let mut out_edges = vec![0u32; list.len()];
        let mut in_edges = vec![0u32; list.len()];
        for (eid, &(src, dst)) in list.edges().iter().enumerate() {
            out_edges[out_cursor[src as usize]] = eid as u32;
            out_cursor[src as usize] += 1;
            in_edges[in_cursor[dst as usize]] = eid as u32;
            in_cursor[dst as usize] += 1;
        }
        Ok(Self {
            sources,
            targets,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
        })
    }

    #[inline]
    pub(crate) fn vertex_count(&self) -> usize {
        self.out_offsets.len() - 1
    }

    #[inline]
    pub(crate) fn out_edge_ids(&self, v: VertexId) -> &[u32] {
        let idx = v.index();
        &self.out_edges[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    #[inline]
    pub(crate) fn in_edge_ids(&self, v: VertexId) -> &[u32] {
        let idx = v.index();
        &self.in_edges[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }
}

fn prefix_sums(degrees: &[usize]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(degrees.len() + 1);
    let mut running = 0usize;
    offsets.push(0);
    for d in degrees {
        running += d;
        offsets.push(running);
    }
    offsets
}

/// In-memory data graph with one value per vertex and one shared value per edge.
#[derive(Clone, Debug)]
pub struct DataGraph<V, E> {
    pub(crate) topology: Topology,
    pub(crate) vertex_values: Vec<V>,
    pub(crate) edge_values: Vec<E>,
}

impl<V: Clone + Default, E: Clone + Default> DataGraph<V, E> {
    /// Builds the graph with default vertex and edge values.
    pub fn from_edge_list(list: &EdgeList) -> Result<Self> {
        let topology = Topology::build(list)?;
        debug!(
            vertices = topology.vertex_count(),
            edges = list.len(),
            "engine.graph.built"
        );
        Ok(Self {
            vertex_values: vec![V::default(); topology.vertex_count()],
            edge_values: vec![E::default(); list.len()],
            topology,
        })
    }
}

impl<V, E> DataGraph<V, E> {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_values.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_values.len()
    }

    /// Current value of vertex `v`.
    pub fn vertex_value(&self, v: VertexId) -> Option<&V> {
        self.vertex_values.get(v.index())
    }

    /// All vertex values indexed by vertex id.
    pub fn vertex_values(&self) -> &[V] {
        &self.vertex_values
    }

    /// Consumes the graph and returns the vertex values.
    pub fn into_vertex_values(self) -> Vec<V> {
        self.vertex_values
    }

    /// Current value stored on edge `edge_id`.
    pub fn edge_value(&self, edge_id: usize) -> Option<&E> {
        self.edge_values.get(edge_id)
    }

    /// `(src, dst)` endpoints of edge `edge_id`.
    pub fn endpoints(&self, edge_id: usize) -> Option<(VertexId, VertexId)> {
        Some((
            *self.topology.sources.get(edge_id)?,
            *self.topology.targets.get(edge_id)?,
        ))
    }

    /// Targets of the out-edges of `v`, in edge insertion order.
    pub fn out_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.checked(v)
            .into_iter()
            .flat_map(move |v| self.topology.out_edge_ids(v))
            .map(move |&eid| self.topology.targets[eid as usize])
    }

    /// Sources of the in-edges of `v`, in edge insertion order.
    pub fn in_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.checked(v)
            .into_iter()
            .flat_map(move |v| self.topology.in_edge_ids(v))
            .map(move |&eid| self.topology.sources[eid as usize])
    }

    fn checked(&self, v: VertexId) -> Option<VertexId> {
        (v.index() < self.vertex_count()).then_some(v)
    }
}
