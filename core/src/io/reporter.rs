//! Result reporting.
//!
//! The engine produces a [`SolveReport`]; where it goes is a capability the
//! caller injects ([`Reporter`]). [`ConsoleReporter`] renders the human
//! sections, [`RecordWriter`] appends the one-line space-delimited record
//! `graphName vertexCount edgeCount flowValue elapsedTime` with 6-decimal
//! fixed-point elapsed seconds. All IDs in a report are the original
//! (uninterned) ones.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of one solve, in original vertex IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    MaxFlow {
        source: u64,
        sink: u64,
        value: u64,
        min_cut: Vec<u64>,
    },
    Matching {
        size: usize,
        pairs: Vec<(u64, u64)>,
    },
}

impl Outcome {
    /// The flow value recorded in the results file; for a matching this is
    /// the matching size.
    pub fn flow_value(&self) -> u64 {
        match self {
            Outcome::MaxFlow { value, .. } => *value,
            Outcome::Matching { size, .. } => *size as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub graph_name: String,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub elapsed: Duration,
    pub outcome: Outcome,
}

/// Where reports go. Injected so the engine and its drivers stay free of
/// console and process concerns.
pub trait Reporter {
    fn publish(&mut self, report: &SolveReport) -> io::Result<()>;
}

/// Renders the human-readable console sections.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn publish(&mut self, report: &SolveReport) -> io::Result<()> {
        writeln!(self.out, "Graph Info:")?;
        writeln!(
            self.out,
            "\tVertices - {}, Edges - {}",
            report.vertex_count, report.edge_count
        )?;
        writeln!(self.out)?;
        match &report.outcome {
            Outcome::MaxFlow {
                source,
                sink,
                value,
                min_cut,
            } => {
                writeln!(self.out, "MaxFlow-MinCut Solution:")?;
                writeln!(self.out, "\tSource - {source}, Target - {sink}")?;
                writeln!(self.out, "\tMax Flow Value - {value}")?;
                writeln!(self.out)?;
                writeln!(self.out, "\tNo. of vertices in min cut - {}", min_cut.len())?;
                writeln!(self.out, "\tVertices in min cut -")?;
                write!(self.out, "\t\t")?;
                for v in min_cut {
                    write!(self.out, "{v} ")?;
                }
                writeln!(self.out)?;
            }
            Outcome::Matching { size, pairs } => {
                writeln!(self.out, "Bipartite Matching Solution:")?;
                writeln!(self.out, "\tMaximum Matching Size - {size}")?;
                writeln!(self.out, "\tEdges in the matching -")?;
                for (a, b) in pairs {
                    writeln!(self.out, "\t\t({a}, {b})")?;
                }
            }
        }
        writeln!(self.out)?;
        writeln!(
            self.out,
            "\tTime Taken - {:.6} seconds",
            report.elapsed.as_secs_f64()
        )
    }
}

/// Appends one record line per solve to a results file.
pub struct RecordWriter {
    path: PathBuf,
}

impl RecordWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Reporter for RecordWriter {
    fn publish(&mut self, report: &SolveReport) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{} {} {} {} {:.6}",
            report.graph_name,
            report.vertex_count,
            report.edge_count,
            report.outcome.flow_value(),
            report.elapsed.as_secs_f64()
        )
    }
}
