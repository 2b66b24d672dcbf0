//! Flow network: an arena of edges plus handle-based adjacency lists.

use serde::{Deserialize, Serialize};

use super::{Capacity, EdgeIndex, FlowEdge, FlowError, NodeId};

/// Adjacency structure over vertices `0..vertex_count`.
///
/// Every edge is stored once in the arena and its handle appears in exactly
/// two adjacency lists (its endpoints), so traversal from either side sees
/// the same edge state. Insertion order within a list is traversal order;
/// the search algorithm's first-found path depends on it.
///
/// Endpoints passed to [`add_edge`](Self::add_edge) must be in range and
/// capacities are taken as-is; validating raw input is the loader's job,
/// the network does not re-check it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNetwork {
    vertex_count: usize,
    edges: Vec<FlowEdge>,
    adjacency: Vec<Vec<EdgeIndex>>,
    in_degree: Vec<usize>,
    out_degree: Vec<usize>,
}

impl FlowNetwork {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); vertex_count],
            in_degree: vec![0; vertex_count],
            out_degree: vec![0; vertex_count],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds a directed edge `v -> w` and registers its handle with both
    /// endpoints. Returns the handle.
    pub fn add_edge(&mut self, v: NodeId, w: NodeId, capacity: Capacity) -> EdgeIndex {
        let index = self.edges.len();
        self.edges.push(FlowEdge::new(v, w, capacity));
        self.adjacency[v].push(index);
        self.adjacency[w].push(index);
        self.out_degree[v] += 1;
        self.in_degree[w] += 1;
        index
    }

    /// Handles of all edges incident to `v`, as either endpoint, in
    /// insertion order.
    pub fn adjacent(&self, v: NodeId) -> &[EdgeIndex] {
        &self.adjacency[v]
    }

    pub fn edge(&self, index: EdgeIndex) -> &FlowEdge {
        &self.edges[index]
    }

    pub fn edge_mut(&mut self, index: EdgeIndex) -> &mut FlowEdge {
        &mut self.edges[index]
    }

    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter()
    }

    /// Largest edge capacity in the network, 0 when edgeless.
    pub fn max_capacity(&self) -> Capacity {
        self.edges.iter().map(FlowEdge::capacity).max().unwrap_or(0)
    }

    /// First vertex with in-degree zero.
    pub fn detect_source(&self) -> Result<NodeId, FlowError> {
        (0..self.vertex_count)
            .find(|&v| self.in_degree[v] == 0)
            .ok_or(FlowError::NoSourceFound)
    }

    /// First vertex with out-degree zero.
    pub fn detect_sink(&self) -> Result<NodeId, FlowError> {
        (0..self.vertex_count)
            .find(|&v| self.out_degree[v] == 0)
            .ok_or(FlowError::NoSinkFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_is_shared_between_both_adjacency_lists() {
        let mut network = FlowNetwork::new(3);
        let index = network.add_edge(0, 1, 5);

        assert_eq!(network.adjacent(0), &[index]);
        assert_eq!(network.adjacent(1), &[index]);
        assert!(network.adjacent(2).is_empty());

        // Mutation through the handle is visible from both endpoints.
        network.edge_mut(index).add_residual_flow_to(1, 3).unwrap();
        let via_zero = network.adjacent(0)[0];
        let via_one = network.adjacent(1)[0];
        assert_eq!(network.edge(via_zero).flow(), 3);
        assert_eq!(network.edge(via_one).flow(), 3);
    }

    #[test]
    fn adjacency_preserves_insertion_order() {
        let mut network = FlowNetwork::new(4);
        let a = network.add_edge(0, 1, 1);
        let b = network.add_edge(0, 2, 1);
        let c = network.add_edge(3, 0, 1);
        assert_eq!(network.adjacent(0), &[a, b, c]);
    }

    #[test]
    fn detects_source_and_sink_by_degree() {
        let mut network = FlowNetwork::new(4);
        network.add_edge(0, 1, 2);
        network.add_edge(1, 2, 2);
        network.add_edge(2, 3, 2);
        assert_eq!(network.detect_source(), Ok(0));
        assert_eq!(network.detect_sink(), Ok(3));
    }

    #[test]
    fn detection_fails_on_a_cycle() {
        let mut network = FlowNetwork::new(3);
        network.add_edge(0, 1, 1);
        network.add_edge(1, 2, 1);
        network.add_edge(2, 0, 1);
        assert_eq!(network.detect_source(), Err(FlowError::NoSourceFound));
        assert_eq!(network.detect_sink(), Err(FlowError::NoSinkFound));
    }

    #[test]
    fn max_capacity_over_all_edges() {
        let mut network = FlowNetwork::new(3);
        assert_eq!(network.max_capacity(), 0);
        network.add_edge(0, 1, 7);
        network.add_edge(1, 2, 12);
        assert_eq!(network.max_capacity(), 12);
        assert_eq!(network.edge_count(), 2);
    }
}
