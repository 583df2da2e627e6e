use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::{Label, VertexId};

/// Supplies the label of each data vertex during iteration 0.
///
/// Implementations must be pure: the same vertex always gets the same label,
/// so a rerun over the same graph reproduces the same labelling.
pub trait LabelSource {
    /// Label of `vertex`.
    fn label_for(&self, vertex: VertexId) -> Label;
}

impl<L: LabelSource + ?Sized> LabelSource for &L {
    fn label_for(&self, vertex: VertexId) -> Label {
        (**self).label_for(vertex)
    }
}

/// Explicit labels with a fallback for unlisted vertices.
#[derive(Clone, Debug, Default)]
pub struct FixedLabels {
    labels: HashMap<VertexId, Label>,
    fallback: Label,
}

impl FixedLabels {
    /// Labels from `(vertex, label)` pairs; unlisted vertices get `fallback`.
    pub fn new(pairs: impl IntoIterator<Item = (VertexId, Label)>, fallback: Label) -> Self {
        Self {
            labels: pairs.into_iter().collect(),
            fallback,
        }
    }

    /// Labels indexed by position: vertex `i` gets `labels[i]`.
    pub fn from_slice(labels: &[Label], fallback: Label) -> Self {
        Self::new(
            labels
                .iter()
                .enumerate()
                .map(|(idx, &label)| (VertexId(idx as u32), label)),
            fallback,
        )
    }

    /// Overrides the label of one vertex.
    pub fn set(&mut self, vertex: VertexId, label: Label) {
        self.labels.insert(vertex, label);
    }

    /// Number of explicitly labelled vertices.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if no vertex is explicitly labelled.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl LabelSource for FixedLabels {
    fn label_for(&self, vertex: VertexId) -> Label {
        self.labels.get(&vertex).copied().unwrap_or(self.fallback)
    }
}

/// Seeded pseudo-random labels drawn uniformly from `[0, domain)`.
///
/// Each vertex reads its own ChaCha stream, so the label depends only on the
/// seed and the vertex id, never on visitation order.
#[derive(Clone, Debug)]
pub struct RandomLabels {
    seed: u64,
    domain: u32,
}

impl RandomLabels {
    /// Random labels in `[0, domain)`; a zero domain is treated as one label.
    pub fn new(seed: u64, domain: u32) -> Self {
        Self {
            seed,
            domain: domain.max(1),
        }
    }

    /// Size of the label domain.
    pub fn domain(&self) -> u32 {
        self.domain
    }

    /// Labels for ids `[0, n)`, e.g. to label a generated pattern.
    pub fn take(&self, n: usize) -> Vec<Label> {
        (0..n as u32).map(|v| self.label_for(VertexId(v))).collect()
    }
}

impl LabelSource for RandomLabels {
    fn label_for(&self, vertex: VertexId) -> Label {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(u64::from(vertex.0));
        Label(rng.gen_range(0..self.domain))
    }
}
