//! Immutable compact adjacency representation of the query pattern.
//!
//! Out-neighbours of every pattern vertex are stored contiguously in one
//! `targets` array indexed by an `offsets` array of length `n + 1`. Nothing in
//! the store is mutable after [`PatternStore::build`].

use serde::Serialize;

use crate::types::{Label, PatternVertexId, Result, SimError};

/// A small labelled query graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatternStore {
    offsets: Vec<u32>,
    targets: Vec<PatternVertexId>,
    labels: Vec<Label>,
}

impl PatternStore {
    /// Builds a pattern of `n` vertices with the given directed edges and labels.
    ///
    /// Edges keep their input order within each source vertex. Fails if
    /// `labels.len() != n` or any endpoint is `>= n`.
    pub fn build(n: usize, edges: &[(u32, u32)], labels: &[Label]) -> Result<Self> {
        if labels.len() != n {
            return Err(SimError::InvalidPattern(format!(
                "expected {n} labels, got {}",
                labels.len()
            )));
        }
        if n > u32::MAX as usize {
            return Err(SimError::InvalidPattern(format!("pattern too large: {n}")));
        }
        let mut degree = vec![0u32; n];
        for &(src, dst) in edges {
            for endpoint in [src, dst] {
                if endpoint as usize >= n {
                    return Err(SimError::InvalidPattern(format!(
                        "edge ({src}, {dst}) references vertex {endpoint} outside [0, {n})"
                    )));
                }
            }
            degree[src as usize] += 1;
        }

        let mut offsets = Vec::with_capacity(n + 1);
        let mut running = 0u32;
        offsets.push(0);
        for d in &degree {
            running += d;
            offsets.push(running);
        }

        let mut cursor: Vec<u32> = offsets[..n].to_vec();
        let mut targets = vec![PatternVertexId(0); edges.len()];
        for &(src, dst) in edges {
            let slot = &mut cursor[src as usize];
            targets[*slot as usize] = PatternVertexId(dst);
            *slot += 1;
        }

        Ok(Self {
            offsets,
            targets,
            labels: labels.to_vec(),
        })
    }

    /// Complete directed pattern on `labels.len()` vertices (every ordered pair, no self loops).
    pub fn clique(labels: &[Label]) -> Result<Self> {
        let n = labels.len() as u32;
        let edges: Vec<(u32, u32)> = (0..n)
            .flat_map(|src| (0..n).filter(move |&dst| dst != src).map(move |dst| (src, dst)))
            .collect();
        Self::build(labels.len(), &edges, labels)
    }

    /// Number of pattern vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of pattern edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    /// Ordered out-neighbours of `p`. Empty for ids outside the pattern.
    #[inline]
    pub fn neighbors_of(&self, p: PatternVertexId) -> &[PatternVertexId] {
        let idx = p.index();
        if idx >= self.vertex_count() {
            return &[];
        }
        let start = self.offsets[idx] as usize;
        let end = self.offsets[idx + 1] as usize;
        &self.targets[start..end]
    }

    /// Label of `p`, or `None` for ids outside the pattern.
    #[inline]
    pub fn label_of(&self, p: PatternVertexId) -> Option<Label> {
        self.labels.get(p.index()).copied()
    }

    /// Iterates all pattern vertex ids.
    pub fn vertices(&self) -> impl Iterator<Item = PatternVertexId> {
        (0..self.vertex_count() as u32).map(PatternVertexId)
    }

    /// Iterates all `(src, dst)` pattern edges in storage order.
    pub fn edges(&self) -> impl Iterator<Item = (PatternVertexId, PatternVertexId)> + '_ {
        self.vertices()
            .flat_map(move |p| self.neighbors_of(p).iter().map(move |&q| (p, q)))
    }
}
