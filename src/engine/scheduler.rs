use std::ops::RangeInclusive;

use roaring::RoaringBitmap;
use tracing::warn;

use crate::types::VertexId;

/// Bitmap task scheduler used for selective (sparse) activation.
///
/// Tasks are kept in two bitmaps: the vertices still due in the current sweep
/// and the vertices due next iteration. An urgent task is also added to the
/// current sweep, so a vertex that has not been visited yet in this iteration
/// runs again before the iteration ends.
#[derive(Clone, Debug)]
pub struct Scheduler {
    vertex_count: u32,
    current: RoaringBitmap,
    next: RoaringBitmap,
}

impl Scheduler {
    /// Scheduler for `vertex_count` vertices with no tasks.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count: u32::try_from(vertex_count).unwrap_or(u32::MAX),
            current: RoaringBitmap::new(),
            next: RoaringBitmap::new(),
        }
    }

    /// Schedules `v` for the next iteration, and for the current sweep too when `urgent`.
    pub fn add_task(&mut self, v: VertexId, urgent: bool) {
        if v.0 >= self.vertex_count {
            warn!(vertex = v.0, "engine.scheduler.task_out_of_range");
            return;
        }
        self.next.insert(v.0);
        if urgent {
            self.current.insert(v.0);
        }
    }

    /// Drops pending current-sweep tasks for every vertex in `range`.
    pub fn remove_tasks(&mut self, range: RangeInclusive<VertexId>) {
        let (start, end) = range.into_inner();
        self.current.remove_range(start.0..=end.0);
    }

    /// Marks every vertex due in the current sweep.
    pub fn schedule_all(&mut self) {
        self.current.insert_range(0..self.vertex_count);
    }

    /// Whether `v` is due in the current sweep.
    pub fn is_scheduled(&self, v: VertexId) -> bool {
        self.current.contains(v.0)
    }

    /// Consumes the current-sweep task for `v`, returning whether there was one.
    pub fn take_task(&mut self, v: VertexId) -> bool {
        self.current.remove(v.0)
    }

    /// Tasks queued for the next iteration.
    pub fn pending_next(&self) -> usize {
        self.next.len() as usize
    }

    /// Whether any vertex is due in the current sweep.
    pub fn has_tasks(&self) -> bool {
        !self.current.is_empty()
    }

    /// Starts a new iteration: next-iteration tasks become the current sweep.
    pub fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.clear();
    }
}
