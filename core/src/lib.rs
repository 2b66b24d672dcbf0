//! flowcut core engine
//!
//! Maximum-flow / minimum-cut over directed capacitated networks using
//! Ford-Fulkerson with capacity scaling, plus maximum bipartite matching
//! via a reduction to flow. The I/O collaborators (graph loader, result
//! reporter) live in [`io`]; the engine itself never touches the process
//! environment, so it can be driven entirely from tests.

pub mod algorithm;
pub mod io;

pub use algorithm::flow::{
    solve_bipartite_matching, Capacity, Flow, FlowEdge, FlowError, FlowNetwork, Matching,
    MaxFlowSolver, NodeId, SolverMetrics,
};
