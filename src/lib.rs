//! Vertex-centric graph computation with a graph simulation matcher.
//!
//! A small in-memory engine runs [`engine::VertexProgram`]s in iterations with
//! edge-resident values, selective scheduling and explicit convergence
//! reporting. On top of it sit the graph simulation program, which computes for
//! every data vertex the pattern vertices it can simulate, and three monotone
//! relaxations: shortest paths, greedy coloring and connected components.
//!
//! ```
//! use std::sync::Arc;
//! use graphsim::{run_simulation, EdgeList, EngineConfig, FixedLabels, Label, PatternStore};
//!
//! let pattern = PatternStore::build(2, &[(0, 1)], &[Label(1), Label(2)]).unwrap();
//! let edges: EdgeList = [(0, 1)].into_iter().collect();
//! let labels = FixedLabels::from_slice(&[Label(1), Label(2)], Label(0));
//! let run = run_simulation(&edges, Arc::new(pattern), labels, &EngineConfig::default()).unwrap();
//! assert!(run.report.converged());
//! assert_eq!(run.table.live_vertices().count(), 2);
//! ```

#![warn(missing_docs)]

pub mod admin;
pub mod candidates;
pub mod cli;
pub mod config;
pub mod engine;
pub mod logging;
pub mod pattern;
pub mod programs;
pub mod types;

pub use candidates::CandidateTable;
pub use config::SimConfig;
pub use engine::{
    Activity, EdgeList, Engine, EngineConfig, RunOutcome, RunReport, VertexProgram,
};
pub use pattern::PatternStore;
pub use programs::{
    rerun_simulation, run_simulation, ConnectedComponents, FixedLabels, GreedyColoring,
    LabelSource, ProgramRun, RandomLabels, ShortestPath, SimulationProgram, SimulationRun,
};
pub use types::{Label, PatternVertexId, Result, SimError, VertexId};
