//! flowcut command-line driver.
//!
//! `flowcut maxflow <graphFile> [resultsFile]` solves max-flow/min-cut,
//! `flowcut bipartite_matching <graphFile> [resultsFile]` solves maximum
//! bipartite matching. Results render to the console; when a results file
//! is given, a one-line record is appended to it as well.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use flowcut_core::algorithm::flow::{solve_bipartite_matching, MaxFlowSolver};
use flowcut_core::io::loader::{load_flow_problem, load_matching_problem, VertexInterner};
use flowcut_core::io::reporter::{ConsoleReporter, Outcome, RecordWriter, Reporter, SolveReport};
use flowcut_core::NodeId;

#[derive(Parser)]
#[command(
    name = "flowcut",
    version,
    about = "Maximum flow, minimum cut and bipartite matching over text graph files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the maximum flow and minimum cut of a capacitated network.
    Maxflow {
        graph_file: PathBuf,
        results_file: Option<PathBuf>,
    },
    /// Compute a maximum bipartite matching via reduction to flow.
    #[command(name = "bipartite_matching")]
    BipartiteMatching {
        graph_file: PathBuf,
        results_file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Maxflow {
            graph_file,
            results_file,
        } => run_maxflow(&graph_file, results_file.as_deref()),
        Command::BipartiteMatching {
            graph_file,
            results_file,
        } => run_matching(&graph_file, results_file.as_deref()),
    }
}

fn run_maxflow(graph_file: &Path, results_file: Option<&Path>) -> anyhow::Result<()> {
    let mut problem = load_flow_problem(graph_file)
        .with_context(|| format!("cannot load graph file {}", graph_file.display()))?;

    let started = Instant::now();
    let solver = MaxFlowSolver::solve(&mut problem.network, problem.source, problem.sink)?;
    let elapsed = started.elapsed();
    log::info!(
        "solved {} in {} searches, {} augmentations",
        graph_file.display(),
        solver.metrics().searches,
        solver.metrics().augmentations
    );

    let report = SolveReport {
        graph_name: graph_name(graph_file),
        vertex_count: problem.vertex_count,
        edge_count: problem.edge_count,
        elapsed,
        outcome: Outcome::MaxFlow {
            source: original_id(&problem.ids, problem.source),
            sink: original_id(&problem.ids, problem.sink),
            value: solver.flow(),
            min_cut: solver
                .min_cut()
                .into_iter()
                .map(|v| original_id(&problem.ids, v))
                .collect(),
        },
    };
    publish(&report, results_file)
}

fn run_matching(graph_file: &Path, results_file: Option<&Path>) -> anyhow::Result<()> {
    let problem = load_matching_problem(graph_file)
        .with_context(|| format!("cannot load graph file {}", graph_file.display()))?;

    let started = Instant::now();
    let matching = solve_bipartite_matching(problem.vertex_count, &problem.edges)?;
    let elapsed = started.elapsed();
    log::info!(
        "matched {} pairs in {}",
        matching.size,
        graph_file.display()
    );

    let report = SolveReport {
        graph_name: graph_name(graph_file),
        vertex_count: problem.vertex_count,
        edge_count: problem.edge_count,
        elapsed,
        outcome: Outcome::Matching {
            size: matching.size,
            pairs: matching
                .pairs
                .into_iter()
                .map(|(a, b)| (original_id(&problem.ids, a), original_id(&problem.ids, b)))
                .collect(),
        },
    };
    publish(&report, results_file)
}

fn publish(report: &SolveReport, results_file: Option<&Path>) -> anyhow::Result<()> {
    ConsoleReporter::stdout()
        .publish(report)
        .context("cannot write report to stdout")?;
    if let Some(path) = results_file {
        RecordWriter::new(path.to_path_buf())
            .publish(report)
            .with_context(|| format!("cannot append record to {}", path.display()))?;
    }
    Ok(())
}

fn graph_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Vertices that never occur in the file keep their dense index.
fn original_id(ids: &VertexInterner, v: NodeId) -> u64 {
    ids.original(v).unwrap_or(v as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_shape_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommands_parse_positionals() {
        let cli = Cli::try_parse_from(["flowcut", "maxflow", "g.txt", "results.txt"]).unwrap();
        match cli.command {
            Command::Maxflow {
                graph_file,
                results_file,
            } => {
                assert_eq!(graph_file, PathBuf::from("g.txt"));
                assert_eq!(results_file, Some(PathBuf::from("results.txt")));
            }
            _ => panic!("parsed the wrong subcommand"),
        }

        let cli = Cli::try_parse_from(["flowcut", "bipartite_matching", "g.txt"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::BipartiteMatching {
                results_file: None,
                ..
            }
        ));
    }

    #[test]
    fn missing_graph_file_is_a_usage_error() {
        assert!(Cli::try_parse_from(["flowcut", "maxflow"]).is_err());
        assert!(Cli::try_parse_from(["flowcut", "scc", "g.txt"]).is_err());
    }
}
