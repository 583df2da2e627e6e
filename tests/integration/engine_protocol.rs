#![allow(missing_docs)]

use std::ops::RangeInclusive;

use graphsim::engine::{
    Activity, EdgeList, Engine, EngineConfig, IterationControl, RoundSummary, RunOutcome,
    UpdateContext, VertexProgram, VertexView,
};
use graphsim::{Result, VertexId};

#[derive(Debug, PartialEq, Eq)]
enum Event {
    BeforeIteration(u32),
    BeforeInterval(u32, u32),
    Update(u32, u32),
    AfterInterval(u32, u32),
    AfterIteration(u32),
}

/// Records every callback; vertex 0 keeps itself busy for `busy_rounds` iterations.
struct Recorder {
    events: Vec<Event>,
    busy_rounds: u32,
}

impl Recorder {
    fn new(busy_rounds: u32) -> Self {
        Self {
            events: Vec::new(),
            busy_rounds,
        }
    }
}

impl VertexProgram for Recorder {
    type Vertex = u32;
    type Edge = u32;

    fn update(
        &mut self,
        vertex: &mut VertexView<'_, u32, u32>,
        ctx: &mut UpdateContext<'_>,
    ) -> Result<Activity> {
        self.events.push(Event::Update(ctx.iteration(), vertex.id().0));
        if vertex.id() == VertexId(0) && ctx.iteration() < self.busy_rounds {
            vertex.set_value(ctx.iteration());
            ctx.add_task(vertex.id(), false);
            return Ok(Activity::Changed);
        }
        Ok(Activity::Quiet)
    }

    fn before_iteration(&mut self, iteration: u32, _ctl: &mut IterationControl) {
        self.events.push(Event::BeforeIteration(iteration));
    }

    fn after_iteration(&mut self, round: &RoundSummary, _ctl: &mut IterationControl) {
        self.events.push(Event::AfterIteration(round.iteration));
    }

    fn before_exec_interval(&mut self, window: RangeInclusive<VertexId>, _ctl: &mut IterationControl) {
        self.events
            .push(Event::BeforeInterval(window.start().0, window.end().0));
    }

    fn after_exec_interval(&mut self, window: RangeInclusive<VertexId>, _ctl: &mut IterationControl) {
        self.events
            .push(Event::AfterInterval(window.start().0, window.end().0));
    }
}

fn path(n: u32) -> EdgeList {
    (1..n).map(|v| (v - 1, v)).collect()
}

#[test]
fn hooks_wrap_updates_in_order() {
    let mut engine: Engine<u32, u32> =
        Engine::from_edge_list(&path(3), EngineConfig::dense(10).with_interval_size(2)).unwrap();
    let mut program = Recorder::new(0);
    let report = engine.run(&mut program).unwrap();

    assert_eq!(report.outcome, RunOutcome::Converged);
    assert_eq!(report.iterations, 2);
    let first_iteration: Vec<&Event> = program
        .events
        .iter()
        .take_while(|e| **e != Event::BeforeIteration(1))
        .collect();
    assert_eq!(
        first_iteration,
        vec![
            &Event::BeforeIteration(0),
            &Event::BeforeInterval(0, 1),
            &Event::Update(0, 0),
            &Event::Update(0, 1),
            &Event::AfterInterval(0, 1),
            &Event::BeforeInterval(2, 2),
            &Event::Update(0, 2),
            &Event::AfterInterval(2, 2),
            &Event::AfterIteration(0),
        ]
    );
}

#[test]
fn selective_rounds_visit_only_scheduled_vertices() {
    let mut engine: Engine<u32, u32> =
        Engine::from_edge_list(&path(5), EngineConfig::selective(20)).unwrap();
    let mut program = Recorder::new(4);
    let report = engine.run(&mut program).unwrap();

    let visited: Vec<usize> = report.rounds.iter().map(|r| r.visited).collect();
    // iteration 0 visits everyone, then only vertex 0 keeps rescheduling itself
    assert_eq!(visited, vec![5, 1, 1, 1, 1]);
    assert_eq!(report.outcome, RunOutcome::Converged);
    assert_eq!(engine.graph().vertex_values()[0], 3);
}

#[test]
fn dense_rounds_visit_everyone() {
    let mut engine: Engine<u32, u32> =
        Engine::from_edge_list(&path(5), EngineConfig::dense(20)).unwrap();
    let mut program = Recorder::new(3);
    let report = engine.run(&mut program).unwrap();
    assert!(report.rounds.iter().all(|r| r.visited == 5));
    assert_eq!(report.iterations, 4);
}

#[test]
fn urgent_tasks_run_later_in_the_same_sweep() {
    /// Vertex 0 hands a token down the path; each holder passes it on urgently.
    struct Relay;
    impl VertexProgram for Relay {
        type Vertex = u32;
        type Edge = u32;
        fn update(
            &mut self,
            vertex: &mut VertexView<'_, u32, u32>,
            ctx: &mut UpdateContext<'_>,
        ) -> Result<Activity> {
            let id = vertex.id();
            let holds = ctx.iteration() == 1 && id == VertexId(0)
                || vertex.in_edges().any(|e| e.value == 1) && *vertex.value() == 0;
            if ctx.iteration() == 0 {
                if id == VertexId(0) {
                    ctx.add_task(id, false);
                }
                return Ok(Activity::Quiet);
            }
            if !holds || *vertex.value() == 1 {
                return Ok(Activity::Quiet);
            }
            vertex.set_value(1);
            for i in 0..vertex.num_out_edges() {
                let far = vertex.out_edge(i).far;
                vertex.set_out_edge(i, 1);
                ctx.add_task(far, true);
            }
            Ok(Activity::Changed)
        }
    }

    let mut engine: Engine<u32, u32> =
        Engine::from_edge_list(&path(6), EngineConfig::selective(10)).unwrap();
    let report = engine.run(&mut Relay).unwrap();
    assert_eq!(report.rounds[1].changed, 6);
    assert!(engine.graph().vertex_values().iter().all(|&v| v == 1));
}

#[test]
fn removed_tasks_are_skipped() {
    /// Vertex 0 schedules everyone urgently, then drops the tasks of 2..=3.
    struct Pruner {
        seen: Vec<u32>,
    }
    impl VertexProgram for Pruner {
        type Vertex = u32;
        type Edge = u32;
        fn update(
            &mut self,
            vertex: &mut VertexView<'_, u32, u32>,
            ctx: &mut UpdateContext<'_>,
        ) -> Result<Activity> {
            let id = vertex.id();
            if ctx.iteration() == 0 {
                if id == VertexId(0) {
                    ctx.add_task(id, false);
                }
                return Ok(Activity::Quiet);
            }
            self.seen.push(id.0);
            if id == VertexId(0) {
                for v in 1..5 {
                    ctx.add_task(VertexId(v), true);
                }
                ctx.remove_tasks(VertexId(2)..=VertexId(3));
            }
            Ok(Activity::Quiet)
        }
    }

    let mut engine: Engine<u32, u32> =
        Engine::from_edge_list(&path(5), EngineConfig::selective(2)).unwrap();
    let mut program = Pruner { seen: Vec::new() };
    engine.run(&mut program).unwrap();
    assert_eq!(program.seen, vec![0, 1, 4]);
}

#[test]
fn terminal_iteration_can_be_set_mid_iteration() {
    struct StopInInterval;
    impl VertexProgram for StopInInterval {
        type Vertex = u32;
        type Edge = u32;
        fn update(
            &mut self,
            _vertex: &mut VertexView<'_, u32, u32>,
            _ctx: &mut UpdateContext<'_>,
        ) -> Result<Activity> {
            Ok(Activity::Changed)
        }
        fn after_exec_interval(
            &mut self,
            _window: RangeInclusive<VertexId>,
            ctl: &mut IterationControl,
        ) {
            if ctl.iteration() == 3 {
                ctl.set_last_iteration(3);
            }
        }
    }

    let mut engine: Engine<u32, u32> =
        Engine::from_edge_list(&path(8), EngineConfig::dense(50).with_interval_size(3)).unwrap();
    let report = engine.run(&mut StopInInterval).unwrap();
    assert_eq!(report.outcome, RunOutcome::Halted);
    assert_eq!(report.iterations, 4);
    // the terminal iteration still finishes all its intervals
    assert_eq!(report.rounds[3].visited, 8);
}

#[test]
fn empty_graph_runs_nothing() {
    let mut engine: Engine<u32, u32> =
        Engine::from_edge_list(&EdgeList::new(), EngineConfig::dense(5)).unwrap();
    let report = engine.run(&mut Recorder::new(0)).unwrap();
    assert_eq!(report.outcome, RunOutcome::Converged);
    assert!(report.rounds.iter().all(|r| r.visited == 0));
}
