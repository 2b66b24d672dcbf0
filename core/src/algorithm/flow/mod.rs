//! Maximum-flow engine
//!
//! The flow module is split along the data/algorithm seam: [`FlowEdge`] and
//! [`FlowNetwork`] are thin data holders, [`MaxFlowSolver`] carries the
//! capacity-scaling Ford-Fulkerson algorithm, and [`matching`] reduces
//! maximum bipartite matching to a unit-capacity flow problem.
//!
//! Edges live in an arena owned by the network and are addressed by stable
//! [`EdgeIndex`] handles; each endpoint's adjacency list stores handles, so
//! the same edge is mutated exactly once and visible from both sides.

pub mod edge;
pub mod matching;
pub mod network;
pub mod solver;

pub use self::edge::FlowEdge;
pub use self::matching::{solve_bipartite_matching, two_color, Matching, Side};
pub use self::network::FlowNetwork;
pub use self::solver::{MaxFlowSolver, SolverMetrics};

/// Dense vertex index in `[0, V)`. Identity is positional.
pub type NodeId = usize;

/// Edge capacity. Non-negative by construction (unsigned, integer only).
pub type Capacity = u64;

/// Flow through an edge, `0 <= flow <= capacity` after every augmentation.
pub type Flow = u64;

/// Stable handle into a network's edge arena.
pub type EdgeIndex = usize;

/// Errors raised by the flow engine.
///
/// All of these are terminal for the current solve; there is no partial
/// result or retry. Malformed input (out-of-range indices, self-loops where
/// a caller disallows them) is a loader precondition and is not re-validated
/// here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// An edge operation was invoked with a vertex that is neither endpoint.
    /// Valid input never produces this; it signals broken path bookkeeping.
    #[error("vertex {vertex} is not an endpoint of edge {from}->{to}")]
    InvalidEndpoint {
        vertex: NodeId,
        from: NodeId,
        to: NodeId,
    },

    /// Automatic source detection found no vertex with in-degree zero.
    #[error("no vertex with in-degree zero; supply the source explicitly")]
    NoSourceFound,

    /// Automatic sink detection found no vertex with out-degree zero.
    #[error("no vertex with out-degree zero; supply the sink explicitly")]
    NoSinkFound,

    /// Two-coloring found an edge joining two vertices on the same side.
    #[error("edge {u}-{v} joins two vertices on the same side; graph is not bipartite")]
    NotBipartite { u: NodeId, v: NodeId },
}
