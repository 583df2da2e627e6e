use std::ops::RangeInclusive;

use super::convergence::{Activity, IterationControl, RoundSummary};
use super::options::EngineConfig;
use super::scheduler::Scheduler;
use super::vertex::VertexView;
use crate::types::{Result, VertexId};

/// Callback logic invoked by the engine once per vertex per iteration.
///
/// Iteration 0 initializes vertex and edge state without reading neighbours.
/// Later iterations read neighbour state through edge values, may write edge
/// values, schedule neighbours and report whether they changed anything. An
/// error from [`VertexProgram::update`] aborts the run.
pub trait VertexProgram {
    /// Per-vertex state type.
    type Vertex: Clone + Default;
    /// Per-edge value type.
    type Edge: Copy + Default;

    /// Per-vertex update.
    fn update(
        &mut self,
        vertex: &mut VertexView<'_, Self::Vertex, Self::Edge>,
        ctx: &mut UpdateContext<'_>,
    ) -> Result<Activity>;

    /// Called before an iteration starts.
    fn before_iteration(&mut self, _iteration: u32, _ctl: &mut IterationControl) {}

    /// Called after an iteration has finished.
    fn after_iteration(&mut self, _round: &RoundSummary, _ctl: &mut IterationControl) {}

    /// Called before an execution interval is started.
    fn before_exec_interval(
        &mut self,
        _window: RangeInclusive<VertexId>,
        _ctl: &mut IterationControl,
    ) {
    }

    /// Called after an execution interval has finished.
    fn after_exec_interval(
        &mut self,
        _window: RangeInclusive<VertexId>,
        _ctl: &mut IterationControl,
    ) {
    }
}

/// Per-update view of the run: iteration number, configuration and scheduler.
pub struct UpdateContext<'a> {
    iteration: u32,
    config: &'a EngineConfig,
    scheduler: &'a mut Scheduler,
}

impl<'a> UpdateContext<'a> {
    pub(crate) fn new(iteration: u32, config: &'a EngineConfig, scheduler: &'a mut Scheduler) -> Self {
        Self {
            iteration,
            config,
            scheduler,
        }
    }

    /// Current iteration, starting at 0.
    #[inline]
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Run configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Whether selective scheduling is enabled for this run.
    #[inline]
    pub fn selective(&self) -> bool {
        self.config.selective_scheduling
    }

    /// Requests that `v` be revisited; ignored under dense activation.
    #[inline]
    pub fn add_task(&mut self, v: VertexId, urgent: bool) {
        if self.config.selective_scheduling {
            self.scheduler.add_task(v, urgent);
        }
    }

    /// Drops current-sweep tasks in `range`; ignored under dense activation.
    #[inline]
    pub fn remove_tasks(&mut self, range: RangeInclusive<VertexId>) {
        if self.config.selective_scheduling {
            self.scheduler.remove_tasks(range);
        }
    }
}
