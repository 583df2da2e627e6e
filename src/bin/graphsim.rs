//! Binary entry point for the graphsim CLI.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use graphsim::{
    admin::{stats, verify, StatsReport, VerifyLevel, VerifyReport},
    cli::{load_edge_list, load_labels, load_pattern, write_matches, write_values},
    config::SimConfig,
    engine::{EdgeList, EngineConfig, RunReport},
    logging::init_logging,
    programs::{
        rerun_simulation, run_coloring, run_components, run_shortest_path, run_simulation,
        ConnectedComponents, LabelSource, ProgramRun, SimulationRun, INFINITY,
    },
    types::{PatternVertexId, VertexId},
};
use serde::Serialize;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser, Debug)]
#[command(
    name = "graphsim",
    version,
    about = "Run graph simulation and relaxation vertex programs over an edge list",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for results"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[arg(long, global = true, value_name = "FILE", help = "TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Iteration ceiling, including iteration 0")]
    max_iterations: Option<u32>,

    #[arg(
        long,
        global = true,
        help = "Only visit vertices with outstanding tasks after iteration 0"
    )]
    selective: bool,

    #[arg(long, global = true, help = "Vertices per execution interval (0 = whole graph)")]
    interval_size: Option<usize>,

    #[arg(
        long,
        global = true,
        env = "GRAPHSIM_LOG",
        help = "Tracing filter directive, e.g. info or graphsim=debug"
    )]
    log_level: Option<String>,
}

#[derive(Args, Debug)]
struct GraphArgs {
    #[arg(long, value_name = "FILE", help = "Edge list with one `src dst` pair per line")]
    edges: PathBuf,

    #[arg(long, value_name = "N", help = "Minimum vertex count, for trailing isolated vertices")]
    vertices: Option<usize>,

    #[arg(long, value_name = "FILE", help = "Write per-vertex results as CSV")]
    out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Unweighted shortest paths from a source (source distance is 1)")]
    Sssp {
        #[command(flatten)]
        graph: GraphArgs,
        #[arg(long, default_value_t = 0, help = "Source vertex")]
        source: u32,
    },

    #[command(about = "Greedy coloring that separates each vertex from its higher-id out-neighbours")]
    Coloring {
        #[command(flatten)]
        graph: GraphArgs,
    },

    #[command(about = "Connected components by minimum-label propagation")]
    Components {
        #[command(flatten)]
        graph: GraphArgs,
        #[arg(long, help = "Propagate labels along edge direction only")]
        directed: bool,
    },

    #[command(about = "Graph simulation of a labelled pattern over the data graph")]
    Simulate(SimulateCmd),
}

#[derive(Args, Debug)]
struct SimulateCmd {
    #[command(flatten)]
    graph: GraphArgs,

    #[arg(long, value_name = "FILE", help = "Pattern file of `v id label` / `e src dst` records")]
    pattern: PathBuf,

    #[arg(long, value_name = "FILE", help = "Data labels as `vertex label` records")]
    labels: Option<PathBuf>,

    #[arg(long, help = "Seed for random data labels (when no label file is given)")]
    seed: Option<u64>,

    #[arg(long, help = "Random labels are drawn from [0, domain)")]
    domain: Option<u32>,

    #[arg(long, value_enum, help = "Re-check the result after the run")]
    verify: Option<VerifyLevelArg>,

    #[arg(long, help = "Rerun refinement on the result and report any further prunes")]
    recheck: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum VerifyLevelArg {
    Fast,
    Full,
}

impl From<VerifyLevelArg> for VerifyLevel {
    fn from(level: VerifyLevelArg) -> Self {
        match level {
            VerifyLevelArg::Fast => VerifyLevel::Fast,
            VerifyLevelArg::Full => VerifyLevel::Full,
        }
    }
}

#[derive(Serialize)]
struct SimulationSummary {
    report: RunReport,
    stats: StatsReport,
    matches: BTreeMap<VertexId, Vec<PatternVertexId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verify: Option<VerifyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recheck_prunes: Option<usize>,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Returns `false` when a requested verification failed.
fn run() -> Result<bool, Box<dyn Error>> {
    let cli = Cli::parse();
    let config = SimConfig::load_or_default(cli.run.config.as_deref())?;
    let level = cli
        .run
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    init_logging(&level)?;
    let engine = build_engine_config(&cli.run, &config);

    match cli.command {
        Command::Sssp { graph, source } => {
            let edges = load_graph(&graph)?;
            let run = run_shortest_path(&edges, VertexId(source), &engine)?;
            finish_values(&cli.format, &graph, "distance", &run, format_distance)?;
        }
        Command::Coloring { graph } => {
            let edges = load_graph(&graph)?;
            let run = run_coloring(&edges, &engine)?;
            finish_values(&cli.format, &graph, "color", &run, |c| c.to_string())?;
        }
        Command::Components { graph, directed } => {
            let edges = load_graph(&graph)?;
            let program = if directed {
                ConnectedComponents::directed()
            } else {
                ConnectedComponents::undirected()
            };
            let run = run_components(&edges, program, &engine)?;
            finish_values(&cli.format, &graph, "component", &run, |c| c.to_string())?;
        }
        Command::Simulate(cmd) => return simulate(&cli.format, &cmd, &config, &engine),
    }
    Ok(true)
}

fn build_engine_config(args: &RunArgs, config: &SimConfig) -> EngineConfig {
    let mut engine = config.engine.clone();
    if let Some(max_iterations) = args.max_iterations {
        engine.max_iterations = max_iterations;
    }
    if args.selective {
        engine.selective_scheduling = true;
    }
    if let Some(interval_size) = args.interval_size {
        engine.interval_size = interval_size;
    }
    engine
}

fn load_graph(args: &GraphArgs) -> Result<EdgeList, Box<dyn Error>> {
    let mut edges = load_edge_list(&args.edges)?;
    if let Some(n) = args.vertices {
        edges.reserve_vertices(n);
    }
    Ok(edges)
}

fn simulate(
    format: &OutputFormat,
    cmd: &SimulateCmd,
    config: &SimConfig,
    engine: &EngineConfig,
) -> Result<bool, Box<dyn Error>> {
    let edges = load_graph(&cmd.graph)?;
    let pattern = Arc::new(load_pattern(&cmd.pattern)?);
    let labels: Box<dyn LabelSource> = match &cmd.labels {
        Some(path) => Box::new(load_labels(path, config.labels.default_label())?),
        None => {
            let mut section = config.labels.clone();
            if let Some(seed) = cmd.seed {
                section.seed = seed;
            }
            if let Some(domain) = cmd.domain {
                section.domain = domain;
            }
            Box::new(section.random_source())
        }
    };

    let SimulationRun {
        report,
        table,
        labels: assigned,
        ..
    } = run_simulation(&edges, pattern.clone(), labels.as_ref(), engine)?;

    let verify_report = match cmd.verify {
        Some(level) => Some(verify(&edges, &assigned, &pattern, &table, level.into())?),
        None => None,
    };
    let summary_stats = stats(&report, &pattern, &table);
    let matches = table.matches();
    if let Some(out) = &cmd.graph.out {
        write_matches(out, &table)?;
    }
    let recheck_prunes = if cmd.recheck {
        let rerun = rerun_simulation(&edges, pattern.clone(), table, labels.as_ref(), engine)?;
        Some(rerun.pruned)
    } else {
        None
    };

    let summary = SimulationSummary {
        report,
        stats: summary_stats,
        matches,
        verify: verify_report,
        recheck_prunes,
    };
    emit(format, &summary, |_| print_simulation_text(&summary))?;
    Ok(summary.verify.as_ref().map_or(true, |report| report.success))
}

fn finish_values<F>(
    format: &OutputFormat,
    graph: &GraphArgs,
    column: &str,
    run: &ProgramRun<u32>,
    render: F,
) -> Result<(), Box<dyn Error>>
where
    F: Fn(u32) -> String,
{
    if let Some(out) = &graph.out {
        let rendered: Vec<String> = run.values.iter().map(|&v| render(v)).collect();
        write_values(out, column, &rendered)?;
    }
    emit(format, run, |_| {
        print_report_line(&run.report);
        println!("vertex {column}");
        for (vertex, &value) in run.values.iter().enumerate() {
            println!("{vertex} {}", render(value));
        }
    })
}

fn format_distance(distance: u32) -> String {
    if distance == INFINITY {
        "inf".to_string()
    } else {
        distance.to_string()
    }
}

fn emit<T, F>(format: &OutputFormat, value: &T, printer: F) -> Result<(), Box<dyn Error>>
where
    T: Serialize,
    F: Fn(OutputFormat),
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{json}");
        }
        OutputFormat::Text => printer(OutputFormat::Text),
    }
    Ok(())
}

fn print_report_line(report: &RunReport) {
    println!(
        "outcome={:?} iterations={} changes={}",
        report.outcome,
        report.iterations,
        report.total_changes()
    );
}

fn print_simulation_text(summary: &SimulationSummary) {
    print_report_line(&summary.report);
    let candidates = &summary.stats.candidates;
    println!(
        "Candidates: live_vertices={} pairs={} allocated_sets={} max_per_vertex={}",
        candidates.live_vertices,
        candidates.candidate_pairs,
        candidates.allocated_sets,
        candidates.max_candidates_per_vertex
    );
    for pattern in &summary.stats.pattern {
        let label = pattern
            .label
            .map(|l| l.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  {} (label={}): out_degree={} matches={}",
            pattern.vertex, label, pattern.out_degree, pattern.matches
        );
    }
    println!("Matches:");
    for (vertex, candidates) in &summary.matches {
        let list: Vec<String> = candidates.iter().map(|p| p.to_string()).collect();
        println!("  {vertex}: {}", list.join(" "));
    }
    if let Some(report) = &summary.verify {
        println!(
            "Verify ({:?}) => success={} live_vertices={} candidate_pairs={} coverage_checks={}",
            report.level,
            report.success,
            report.counts.live_vertices,
            report.counts.candidate_pairs,
            report.counts.coverage_checks
        );
        for finding in &report.findings {
            println!("- {:?}: {}", finding.severity, finding.message);
        }
    }
    if let Some(prunes) = summary.recheck_prunes {
        println!("Recheck: prunes={prunes}");
    }
}
