//! Graph file loading with sparse-ID compaction.
//!
//! File format: a header line, then one edge per line.
//!
//! - max-flow problems: `V E [s t]`, body lines `from to capacity`;
//! - matching problems: `n E`, body lines `from to` (unit capacities).
//!
//! Raw vertex IDs may be sparse; they are interned into the dense range
//! `[0, V)` in first-seen order, with an inverse table kept so results can
//! be reported in the original IDs. Everything the core treats as a
//! precondition (unreadable file, malformed or negative numbers, more
//! distinct IDs than the header admits) is rejected here.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::algorithm::flow::{Capacity, FlowError, FlowNetwork, NodeId};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read graph file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("graph file is missing its header line")]
    MissingHeader,

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Compaction map from raw file vertex IDs to dense indices, with inverse
/// lookup for reporting.
#[derive(Debug, Default, Clone)]
pub struct VertexInterner {
    forward: HashMap<u64, NodeId>,
    inverse: Vec<u64>,
}

impl VertexInterner {
    /// Dense index for `raw`, allocating the next index on first sight.
    pub fn intern(&mut self, raw: u64) -> NodeId {
        let inverse = &mut self.inverse;
        *self.forward.entry(raw).or_insert_with(|| {
            inverse.push(raw);
            inverse.len() - 1
        })
    }

    pub fn get(&self, raw: u64) -> Option<NodeId> {
        self.forward.get(&raw).copied()
    }

    /// The raw ID a dense index was interned from.
    pub fn original(&self, id: NodeId) -> Option<u64> {
        self.inverse.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.inverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inverse.is_empty()
    }
}

/// A loaded max-flow instance, ready to solve.
#[derive(Debug)]
pub struct FlowProblem {
    pub network: FlowNetwork,
    pub source: NodeId,
    pub sink: NodeId,
    pub vertex_count: usize,
    /// Edge count declared by the header (reported as-is).
    pub edge_count: usize,
    pub ids: VertexInterner,
}

/// A loaded bipartite matching instance.
#[derive(Debug)]
pub struct MatchingProblem {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub edges: Vec<(NodeId, NodeId)>,
    pub ids: VertexInterner,
}

/// Loads a `V E [s t]` capacitated network. When the header omits the
/// source and sink they are detected by degree; when it names them, the
/// named IDs must occur in the edge list.
pub fn load_flow_problem(path: &Path) -> Result<FlowProblem, LoadError> {
    let text = read(path)?;
    let mut lines = numbered_lines(&text);

    let (header_line, header) = lines.next().ok_or(LoadError::MissingHeader)?;
    let fields = parse_fields(header, header_line)?;
    let declared = match fields.as_slice() {
        [_, _] => None,
        [_, _, s, t] => Some((*s, *t)),
        _ => {
            return Err(LoadError::Parse {
                line: header_line,
                reason: "expected header `V E` or `V E s t`".into(),
            })
        }
    };
    let vertex_count = fields[0] as usize;
    let edge_count = fields[1] as usize;

    let mut ids = VertexInterner::default();
    let mut network = FlowNetwork::new(vertex_count);
    for (number, line) in lines {
        let fields = parse_fields(line, number)?;
        let [from, to, capacity] = fields.as_slice() else {
            return Err(LoadError::Parse {
                line: number,
                reason: "expected `from to capacity`".into(),
            });
        };
        let v = intern_checked(&mut ids, *from, vertex_count, number)?;
        let w = intern_checked(&mut ids, *to, vertex_count, number)?;
        let capacity: Capacity = *capacity;
        network.add_edge(v, w, capacity);
    }

    let (source, sink) = match declared {
        Some((s, t)) => (
            lookup_terminal(&ids, s, "source", header_line)?,
            lookup_terminal(&ids, t, "sink", header_line)?,
        ),
        None => (network.detect_source()?, network.detect_sink()?),
    };

    debug!(
        "loaded {} ({} vertices, {} edges, source {}, sink {})",
        path.display(),
        vertex_count,
        network.edge_count(),
        source,
        sink
    );
    Ok(FlowProblem {
        network,
        source,
        sink,
        vertex_count,
        edge_count,
        ids,
    })
}

/// Loads an `n E` bipartite edge list (unit capacities, no side labels).
pub fn load_matching_problem(path: &Path) -> Result<MatchingProblem, LoadError> {
    let text = read(path)?;
    let mut lines = numbered_lines(&text);

    let (header_line, header) = lines.next().ok_or(LoadError::MissingHeader)?;
    let fields = parse_fields(header, header_line)?;
    let [vertex_count, edge_count] = fields.as_slice() else {
        return Err(LoadError::Parse {
            line: header_line,
            reason: "expected header `n E`".into(),
        });
    };
    let vertex_count = *vertex_count as usize;
    let edge_count = *edge_count as usize;

    let mut ids = VertexInterner::default();
    let mut edges = Vec::new();
    for (number, line) in lines {
        let fields = parse_fields(line, number)?;
        let [from, to] = fields.as_slice() else {
            return Err(LoadError::Parse {
                line: number,
                reason: "expected `from to`".into(),
            });
        };
        let u = intern_checked(&mut ids, *from, vertex_count, number)?;
        let v = intern_checked(&mut ids, *to, vertex_count, number)?;
        edges.push((u, v));
    }

    debug!(
        "loaded {} ({} vertices, {} edges)",
        path.display(),
        vertex_count,
        edges.len()
    );
    Ok(MatchingProblem {
        vertex_count,
        edge_count,
        edges,
        ids,
    })
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Non-blank lines paired with their 1-based line numbers.
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn parse_fields(line: &str, number: usize) -> Result<Vec<u64>, LoadError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<u64>().map_err(|_| LoadError::Parse {
                line: number,
                reason: format!("invalid non-negative integer `{token}`"),
            })
        })
        .collect()
}

fn intern_checked(
    ids: &mut VertexInterner,
    raw: u64,
    vertex_count: usize,
    number: usize,
) -> Result<NodeId, LoadError> {
    let id = ids.intern(raw);
    if id >= vertex_count {
        return Err(LoadError::Parse {
            line: number,
            reason: format!("more distinct vertex ids than the declared {vertex_count}"),
        });
    }
    Ok(id)
}

fn lookup_terminal(
    ids: &VertexInterner,
    raw: u64,
    what: &str,
    header_line: usize,
) -> Result<NodeId, LoadError> {
    ids.get(raw).ok_or_else(|| LoadError::Parse {
        line: header_line,
        reason: format!("{what} id {raw} does not occur in the edge list"),
    })
}
