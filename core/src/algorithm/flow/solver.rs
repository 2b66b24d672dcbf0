//! Capacity-scaling Ford-Fulkerson maximum-flow solver.
//!
//! The solver repeatedly searches the delta-residual graph (edges whose
//! residual capacity is at least the current scaling threshold) breadth
//! first, augments along the first path found by the bottleneck residual
//! capacity, and halves the threshold when no such path exists. The search
//! count is bounded by O(E log maxCapacity) rather than O(E maxFlow), which
//! is the point of scaling; do not replace this with unscaled breadth-first
//! augmentation.

use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Capacity, EdgeIndex, Flow, FlowError, FlowNetwork, NodeId};

/// Search and augmentation counters for one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverMetrics {
    /// Augmenting-path searches, successful or not.
    pub searches: usize,
    /// Completed augmentations.
    pub augmentations: usize,
}

/// Single-use solver: constructed by [`solve`](Self::solve), then queried.
///
/// The solve mutates the network's edge flows in place and owns exclusive
/// access to it for the duration of the call; afterwards both the network
/// and the solver are read-only snapshots of the final state. The visited
/// set left by the final failed search at the smallest threshold is the
/// source side of a minimum cut.
#[derive(Debug)]
pub struct MaxFlowSolver {
    source: NodeId,
    sink: NodeId,
    total_flow: Flow,
    delta: Capacity,
    visited: Vec<bool>,
    parent_edge: Vec<Option<EdgeIndex>>,
    metrics: SolverMetrics,
}

impl MaxFlowSolver {
    /// Runs capacity-scaling Ford-Fulkerson from `source` to `sink`.
    ///
    /// `source` and `sink` must be in range for the network; out-of-range
    /// indices are a caller precondition, not a recoverable error. A solve
    /// with `source == sink` performs no augmentation and reports flow 0.
    pub fn solve(
        network: &mut FlowNetwork,
        source: NodeId,
        sink: NodeId,
    ) -> Result<Self, FlowError> {
        let vertex_count = network.vertex_count();
        let mut solver = Self {
            source,
            sink,
            total_flow: 0,
            delta: init_delta(network),
            visited: vec![false; vertex_count],
            parent_edge: vec![None; vertex_count],
            metrics: SolverMetrics::default(),
        };

        if source == sink {
            solver.visited[source] = true;
            return Ok(solver);
        }

        debug!(
            "capacity scaling: initial delta {} over {} edges",
            solver.delta,
            network.edge_count()
        );
        while solver.delta >= 1 {
            while solver.has_augmenting_path(network)? {
                solver.augment(network)?;
            }
            debug!(
                "delta {} exhausted: flow {} after {} searches",
                solver.delta, solver.total_flow, solver.metrics.searches
            );
            solver.delta /= 2;
        }
        debug!(
            "done: max flow {} ({} searches, {} augmentations)",
            solver.total_flow, solver.metrics.searches, solver.metrics.augmentations
        );
        Ok(solver)
    }

    /// The maximum flow value.
    pub fn flow(&self) -> Flow {
        self.total_flow
    }

    /// Whether `v` lies on the source side of the minimum cut.
    pub fn in_cut(&self, v: NodeId) -> bool {
        self.visited[v]
    }

    /// Vertices on the source side of the minimum cut, ascending.
    pub fn min_cut(&self) -> Vec<NodeId> {
        (0..self.visited.len()).filter(|&v| self.in_cut(v)).collect()
    }

    pub fn metrics(&self) -> SolverMetrics {
        self.metrics
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    /// Breadth-first search restricted to edges with residual capacity at
    /// least `delta`, recording the edge used to reach each vertex. Explores
    /// adjacency lists in insertion order; the first path found wins.
    fn has_augmenting_path(&mut self, network: &FlowNetwork) -> Result<bool, FlowError> {
        self.metrics.searches += 1;
        self.visited.fill(false);
        self.parent_edge.fill(None);

        let mut queue = VecDeque::new();
        self.visited[self.source] = true;
        queue.push_back(self.source);

        while let Some(v) = queue.pop_front() {
            if v == self.sink {
                break;
            }
            for &index in network.adjacent(v) {
                let edge = network.edge(index);
                let w = edge.other(v)?;
                if self.visited[w] {
                    continue;
                }
                if edge.residual_capacity_to(w)? >= self.delta {
                    self.parent_edge[w] = Some(index);
                    self.visited[w] = true;
                    queue.push_back(w);
                }
            }
        }
        Ok(self.visited[self.sink])
    }

    /// Walks the recorded parent chain from sink to source twice: once for
    /// the bottleneck, once to apply it.
    fn augment(&mut self, network: &mut FlowNetwork) -> Result<(), FlowError> {
        let mut bottleneck = Flow::MAX;
        let mut v = self.sink;
        while v != self.source {
            let index = self.parent_edge[v].expect("search recorded a parent for every visited vertex");
            let edge = network.edge(index);
            bottleneck = bottleneck.min(edge.residual_capacity_to(v)?);
            v = edge.other(v)?;
        }

        let mut v = self.sink;
        while v != self.source {
            let index = self.parent_edge[v].expect("search recorded a parent for every visited vertex");
            let next = network.edge(index).other(v)?;
            network.edge_mut(index).add_residual_flow_to(v, bottleneck)?;
            v = next;
        }

        self.total_flow += bottleneck;
        self.metrics.augmentations += 1;
        Ok(())
    }
}

/// Largest power of two not exceeding the maximum edge capacity, 0 for an
/// edgeless (or all-zero-capacity) network, in which case the scaling loop
/// performs no work.
fn init_delta(network: &FlowNetwork) -> Capacity {
    let upper = network.max_capacity();
    if upper == 0 {
        0
    } else {
        1 << (Capacity::BITS - 1 - upper.leading_zeros())
    }
}
