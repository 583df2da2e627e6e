use std::ops::{BitOr, BitOrAssign};

use serde::Serialize;

/// What a single vertex update did to the computation state.
///
/// Returned by every update instead of flipping a shared "converged" flag;
/// the driver folds these into a [`RoundSummary`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// The update left vertex, edge and candidate state untouched.
    #[default]
    Quiet,
    /// The update changed state; the round is not quiescent.
    Changed,
}

impl Activity {
    /// `Changed` when `changed` is true.
    #[inline]
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            Activity::Changed
        } else {
            Activity::Quiet
        }
    }

    /// Whether this is [`Activity::Changed`].
    #[inline]
    pub fn is_changed(self) -> bool {
        matches!(self, Activity::Changed)
    }
}

impl BitOr for Activity {
    type Output = Activity;

    fn bitor(self, rhs: Self) -> Self::Output {
        Activity::from_changed(self.is_changed() || rhs.is_changed())
    }
}

impl BitOrAssign for Activity {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Aggregate of one iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    /// Iteration number, starting at 0.
    pub iteration: u32,
    /// Vertices updated in this iteration.
    pub visited: usize,
    /// Updates that reported [`Activity::Changed`].
    pub changed: usize,
    /// Tasks queued for the next iteration when the round ended.
    pub scheduled_next: usize,
    /// Whether the round was quiescent. Iteration 0 never is.
    pub converged: bool,
}

/// Handle passed to lifecycle hooks for ending the run early.
#[derive(Debug)]
pub struct IterationControl {
    iteration: u32,
    last_iteration: Option<u32>,
}

impl IterationControl {
    pub(crate) fn new(iteration: u32) -> Self {
        Self {
            iteration,
            last_iteration: None,
        }
    }

    pub(crate) fn enter(&mut self, iteration: u32) {
        self.iteration = iteration;
    }

    /// Iteration the hook runs in.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Makes `iteration` the terminal iteration of the run.
    pub fn set_last_iteration(&mut self, iteration: u32) {
        self.last_iteration = Some(
            self.last_iteration
                .map_or(iteration, |current| current.min(iteration)),
        );
    }

    /// Terminal iteration requested so far, if any.
    pub fn last_iteration(&self) -> Option<u32> {
        self.last_iteration
    }

    pub(crate) fn stops_after(&self, iteration: u32) -> bool {
        self.last_iteration.is_some_and(|last| last <= iteration)
    }
}

/// Folds update activity into per-round verdicts.
///
/// A round after iteration 0 starts converged and stays so only if no update
/// reports a change.
#[derive(Debug, Default)]
pub(crate) struct ConvergenceTracker {
    iteration: u32,
    visited: usize,
    changed: usize,
}

impl ConvergenceTracker {
    pub(crate) fn begin(&mut self, iteration: u32) {
        self.iteration = iteration;
        self.visited = 0;
        self.changed = 0;
    }

    pub(crate) fn record(&mut self, activity: Activity) {
        self.visited += 1;
        if activity.is_changed() {
            self.changed += 1;
        }
    }

    pub(crate) fn finish(&self, scheduled_next: usize) -> RoundSummary {
        RoundSummary {
            iteration: self.iteration,
            visited: self.visited,
            changed: self.changed,
            scheduled_next,
            converged: self.iteration > 0 && self.changed == 0,
        }
    }
}
