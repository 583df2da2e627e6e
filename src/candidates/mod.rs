//! Two-level candidate table for graph simulation.
//!
//! For each data vertex the table keeps an *indicator* bit ("has at least one
//! live pattern candidate") and, only while the indicator is set, a bitset over
//! pattern vertex ids. Storage for a vertex's set is allocated on first
//! [`CandidateTable::initialize`] and handed back to the arena in the same step
//! that clears the indicator, so an unset indicator never has storage behind it.
//!
//! Candidate sets grow only while the table is open for seeding. After
//! [`CandidateTable::seal`] they can only shrink.

mod arena;

use std::collections::BTreeMap;

use arena::{SetArena, SlotId};
pub use roaring::RoaringBitmap;

use crate::types::{PatternVertexId, Result, SimError, VertexId};

/// Per-data-vertex candidate sets plus the global indicator bitmap.
#[derive(Clone, Debug)]
pub struct CandidateTable {
    indicator: RoaringBitmap,
    slots: Vec<Option<SlotId>>,
    arena: SetArena,
    pattern_size: usize,
    sealed: bool,
}

impl CandidateTable {
    /// Creates an empty table for `vertex_capacity` data vertices and a
    /// pattern of `pattern_size` vertices.
    pub fn new(vertex_capacity: usize, pattern_size: usize) -> Self {
        Self {
            indicator: RoaringBitmap::new(),
            slots: vec![None; vertex_capacity],
            arena: SetArena::default(),
            pattern_size,
            sealed: false,
        }
    }

    /// Number of data vertices the table can index.
    pub fn vertex_capacity(&self) -> usize {
        self.slots.len()
    }

    /// Width of every candidate set.
    pub fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Indicator read. Vertices outside the table have no candidates.
    #[inline]
    pub fn has_candidates(&self, u: VertexId) -> bool {
        self.indicator.contains(u.0)
    }

    /// The live candidate set of `u`.
    ///
    /// Fails with [`SimError::Invariant`] when `u` has no candidates.
    pub fn candidate_set(&self, u: VertexId) -> Result<&RoaringBitmap> {
        match self.slot(u) {
            Some(slot) => Ok(self.arena.get(slot)),
            None => Err(SimError::invariant(u, "candidate set read on unset indicator")),
        }
    }

    /// Returns `true` if `p` is a live candidate of `u`.
    #[inline]
    pub fn contains(&self, u: VertexId, p: PatternVertexId) -> bool {
        self.slot(u)
            .map(|slot| self.arena.get(slot).contains(p.0))
            .unwrap_or(false)
    }

    /// Adds `p` to the candidate set of `u` and sets its indicator.
    ///
    /// Only valid before [`CandidateTable::seal`]. Returns whether `p` was newly added.
    pub fn initialize(&mut self, u: VertexId, p: PatternVertexId) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_pattern(p)?;
        if self.sealed {
            return Err(SimError::invariant(u, "candidate seeded after table was sealed"));
        }
        let slot = match self.slots[u.index()] {
            Some(slot) => slot,
            None => {
                let slot = self.arena.alloc();
                self.slots[u.index()] = Some(slot);
                self.indicator.insert(u.0);
                slot
            }
        };
        Ok(self.arena.get_mut(slot).insert(p.0))
    }

    /// Removes `p` from the candidate set of `u`.
    ///
    /// When the set becomes empty the indicator is cleared and the storage
    /// released in the same call. Returns whether `p` was present. Fails with
    /// [`SimError::Invariant`] when `u` has no candidates.
    pub fn prune(&mut self, u: VertexId, p: PatternVertexId) -> Result<bool> {
        self.check_pattern(p)?;
        let Some(slot) = self.slot(u) else {
            return Err(SimError::invariant(u, "prune on vertex without candidates"));
        };
        let set = self.arena.get_mut(slot);
        let removed = set.remove(p.0);
        if set.is_empty() {
            self.release(u, slot);
        }
        Ok(removed)
    }

    /// Closes the seeding phase; afterwards candidate sets only shrink.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether [`CandidateTable::seal`] has been called.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of live candidates of `u` (zero when the indicator is unset).
    pub fn candidate_count(&self, u: VertexId) -> usize {
        self.slot(u)
            .map(|slot| self.arena.get(slot).len() as usize)
            .unwrap_or(0)
    }

    /// Candidates of `u` in ascending order.
    pub fn candidates_of(&self, u: VertexId) -> Vec<PatternVertexId> {
        self.slot(u)
            .map(|slot| {
                self.arena
                    .get(slot)
                    .iter()
                    .map(PatternVertexId)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Data vertices whose indicator is set, ascending.
    pub fn live_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.indicator.iter().map(VertexId)
    }

    /// Total number of live `(data vertex, pattern vertex)` pairs.
    pub fn total_candidates(&self) -> usize {
        self.live_vertices().map(|u| self.candidate_count(u)).sum()
    }

    /// Number of candidate sets currently backed by storage.
    pub fn allocated_sets(&self) -> usize {
        self.arena.live()
    }

    /// Snapshot of every live candidate set.
    pub fn matches(&self) -> BTreeMap<VertexId, Vec<PatternVertexId>> {
        self.live_vertices()
            .map(|u| (u, self.candidates_of(u)))
            .collect()
    }

    /// Consumes the table and returns every live candidate set.
    pub fn into_matches(self) -> BTreeMap<VertexId, Vec<PatternVertexId>> {
        self.matches()
    }

    /// Data vertices that still hold `p` as a candidate.
    pub fn matches_of(&self, p: PatternVertexId) -> Vec<VertexId> {
        self.live_vertices().filter(|&u| self.contains(u, p)).collect()
    }

    #[inline]
    fn slot(&self, u: VertexId) -> Option<SlotId> {
        let slot = self.slots.get(u.index()).copied().flatten();
        debug_assert_eq!(slot.is_some(), self.indicator.contains(u.0));
        slot
    }

    fn release(&mut self, u: VertexId, slot: SlotId) {
        self.slots[u.index()] = None;
        self.indicator.remove(u.0);
        self.arena.release(slot);
    }

    fn check_vertex(&self, u: VertexId) -> Result<()> {
        if u.index() >= self.slots.len() {
            return Err(SimError::invariant(u, "vertex outside candidate table"));
        }
        Ok(())
    }

    fn check_pattern(&self, p: PatternVertexId) -> Result<()> {
        if p.index() >= self.pattern_size {
            return Err(SimError::PatternOutOfRange {
                pattern: p,
                size: self.pattern_size,
            });
        }
        Ok(())
    }
}
