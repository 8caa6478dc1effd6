use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anstream::eprintln;
use anstream::println;
use clap::Parser;
use clap::ValueEnum;
use indoc::indoc;
use owo_colors::OwoColorize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use graph_search::algorithms::best_first::SearchResult;
use graph_search::algorithms::best_first::search;
use graph_search::algorithms::dfs::depth_first;
use graph_search::cost::Cost;
use graph_search::graph::GraphError;
use graph_search::policy::Heuristic;
use graph_search::policy::NoHeuristic;
use graph_search::policy::Unconstrained;
use graph_search::policy::VertexHeuristic;
use graph_search::policy::WireLimit;
use graph_search::problems::graph_file::GraphFileParseError;
use graph_search::problems::graph_file::GraphProblem;
use graph_search::report::ConsoleReporter;
use graph_search::trace::TraceSink;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const DEMO_GRAPH: &str = indoc! {"
    % Demo graph, used when no input is given
    ponto_inicial(A).
    ponto_final(F).
    orientado(s).
    pode_ir(A,B,2).
    pode_ir(A,C,2).
    pode_ir(B,C,3).
    pode_ir(B,D,1).
    pode_ir(B,E,5).
    pode_ir(C,D,2).
    pode_ir(D,E,1).
    pode_ir(D,F,4).
    pode_ir(E,F,2).
    h(A,F,6).
    h(B,F,4).
    h(C,F,5).
    h(D,F,3).
    h(E,F,2).
    h(F,F,0).
"};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Shortest path, ignoring heuristic values
    Dijkstra,
    /// Best-first search guided by the `h(...)` facts
    Astar,
    /// Greedy search that never revisits a vertex, guided by `h(...)`
    Dfs,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = graph_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Graph definition. A small demo graph is searched when missing.
    #[arg(env = "GRAPH_FILE")]
    pub input: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Algorithm::Dijkstra)]
    pub algorithm: Algorithm,

    /// Maximum accumulated cost of the explored paths.
    #[arg(short, long, conflicts_with = "ask_wire_length")]
    pub wire_length: Option<Cost>,
    /// Asks for the wire length on stdin.
    #[arg(long)]
    pub ask_wire_length: bool,

    /// Only prints the outcome, without the per-iteration trace.
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] GraphFileParseError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid wire length '{0}'")]
    InvalidWireLength(String),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr),
    );
    if let Err(e) = subscriber.try_init() {
        eprintln!("Couldn't set up logging: {e}");
    }
}

fn load(input: Option<&PathBuf>) -> Result<GraphProblem, GraphFileParseError> {
    match input {
        Some(p) => GraphProblem::try_from(p.as_path()),
        None => {
            log::info!("No input given, using the demo graph");
            GraphProblem::try_from(DEMO_GRAPH)
        }
    }
}

fn ask_wire_length() -> Result<Cost, CliError> {
    println!("{}", "Wire length?".bold());
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();
    line.parse::<Cost>()
        .map_err(|_| CliError::InvalidWireLength(line.to_string()))
}

fn best_first<H: Heuristic, S: TraceSink>(
    problem: &GraphProblem,
    wire_length: Option<Cost>,
    sink: &mut S,
) -> Result<SearchResult, GraphError> {
    let (graph, start, goal) = (&problem.graph, &problem.start, &problem.goal);
    match wire_length {
        Some(length) => search::<H, _, _>(graph, start, goal, WireLimit::new(length), sink),
        None => search::<H, _, _>(graph, start, goal, Unconstrained, sink),
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let problem = load(args.input.as_ref())?;
    log::debug!("{problem}");

    let wire_length = match (args.wire_length, args.ask_wire_length) {
        (Some(length), _) => Some(length),
        (None, true) => Some(ask_wire_length()?),
        (None, false) => None,
    };

    println!("{}", "Start of search".bold());
    let mut reporter = ConsoleReporter::new(anstream::stdout().lock()).quiet(args.quiet);
    match args.algorithm {
        Algorithm::Dijkstra => {
            best_first::<NoHeuristic, _>(&problem, wire_length, &mut reporter)?;
        }
        Algorithm::Astar => {
            best_first::<VertexHeuristic, _>(&problem, wire_length, &mut reporter)?;
        }
        Algorithm::Dfs => {
            if wire_length.is_some() {
                log::warn!("DFS ignores the wire length");
            }
            depth_first::<VertexHeuristic, _>(
                &problem.graph,
                &problem.start,
                &problem.goal,
                &mut reporter,
            )?;
        }
    }
    reporter.finish()?;

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.color.write_global();
    init_logging();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
