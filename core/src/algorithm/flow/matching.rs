//! Maximum bipartite matching via reduction to maximum flow.
//!
//! The input is an edge list on `n` vertices with no side labels. A
//! two-coloring pass assigns sides (and rejects non-bipartite input), then
//! the graph is wired between a super-source and super-sink with unit
//! capacities and handed to [`MaxFlowSolver`]; the flow value equals the
//! matching size and the matched pairs are read back from saturated edges.

use serde::{Deserialize, Serialize};

use super::{FlowError, FlowNetwork, MaxFlowSolver, NodeId};

/// Side assignment produced by two-coloring. Every component's traversal
/// root lands on [`Side::A`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// A maximum matching: its size and the matched `(side A, side B)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    pub size: usize,
    pub pairs: Vec<(NodeId, NodeId)>,
}

/// Two-colors the undirected graph given as an edge list.
///
/// Depth-first per component with an explicit stack (large components must
/// not grow the call stack); the far endpoint of every edge gets the
/// opposite side of the near endpoint, and an edge joining two same-side
/// vertices fails with [`FlowError::NotBipartite`].
pub fn two_color(vertex_count: usize, edges: &[(NodeId, NodeId)]) -> Result<Vec<Side>, FlowError> {
    let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); vertex_count];
    for &(u, v) in edges {
        adjacency[u].push(v);
        adjacency[v].push(u);
    }

    // 0: uncolored, 1: side A, 2: side B.
    let mut color = vec![0u8; vertex_count];
    let mut stack = Vec::new();
    for root in 0..vertex_count {
        if color[root] != 0 {
            continue;
        }
        color[root] = 1;
        stack.push(root);
        while let Some(v) = stack.pop() {
            let far = 3 - color[v];
            for &w in &adjacency[v] {
                if color[w] == 0 {
                    color[w] = far;
                    stack.push(w);
                } else if color[w] == color[v] {
                    return Err(FlowError::NotBipartite { u: v, v: w });
                }
            }
        }
    }

    Ok(color
        .into_iter()
        .map(|c| if c == 2 { Side::B } else { Side::A })
        .collect())
}

/// Solves maximum bipartite matching on `n` vertices.
///
/// Builds a flow network on `n + 2` vertices (`source = n`, `sink = n + 1`):
/// a unit edge from the source to every side-A vertex, from every side-B
/// vertex to the sink, and a unit edge for every input edge directed from
/// its side-A endpoint to its side-B endpoint.
pub fn solve_bipartite_matching(
    vertex_count: usize,
    edges: &[(NodeId, NodeId)],
) -> Result<Matching, FlowError> {
    let sides = two_color(vertex_count, edges)?;

    let source = vertex_count;
    let sink = vertex_count + 1;
    let mut network = FlowNetwork::new(vertex_count + 2);
    for v in 0..vertex_count {
        match sides[v] {
            Side::A => network.add_edge(source, v, 1),
            Side::B => network.add_edge(v, sink, 1),
        };
    }
    for &(u, v) in edges {
        let (a, b) = if sides[u] == Side::A { (u, v) } else { (v, u) };
        network.add_edge(a, b, 1);
    }

    let solver = MaxFlowSolver::solve(&mut network, source, sink)?;

    // Every saturated source edge marks a matched side-A vertex; its partner
    // is behind the unique other saturated edge incident to it.
    let mut pairs = Vec::new();
    for &index in network.adjacent(source) {
        let edge = network.edge(index);
        if edge.flow() == 0 {
            continue;
        }
        let v = edge.to();
        for &partner_index in network.adjacent(v) {
            if partner_index == index {
                continue;
            }
            let partner_edge = network.edge(partner_index);
            if partner_edge.flow() == 0 {
                continue;
            }
            pairs.push((v, partner_edge.other(v)?));
            break;
        }
    }

    Ok(Matching {
        size: solver.flow() as usize,
        pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid_matching(matching: &Matching, edges: &[(NodeId, NodeId)]) {
        assert_eq!(matching.pairs.len(), matching.size);
        let mut used = Vec::new();
        for &(a, b) in &matching.pairs {
            assert!(
                edges.contains(&(a, b)) || edges.contains(&(b, a)),
                "pair ({a}, {b}) is not an input edge"
            );
            assert!(!used.contains(&a), "vertex {a} matched twice");
            assert!(!used.contains(&b), "vertex {b} matched twice");
            used.push(a);
            used.push(b);
        }
    }

    #[test]
    fn two_coloring_splits_a_path() {
        let sides = two_color(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(sides[0], Side::A);
        assert_eq!(sides[1], Side::B);
        assert_eq!(sides[2], Side::A);
        assert_eq!(sides[3], Side::B);
    }

    #[test]
    fn odd_cycle_is_rejected() {
        let err = two_color(3, &[(0, 1), (1, 2), (2, 0)]).unwrap_err();
        assert!(matches!(err, FlowError::NotBipartite { .. }));

        let err = solve_bipartite_matching(3, &[(0, 1), (1, 2), (2, 0)]).unwrap_err();
        assert!(matches!(err, FlowError::NotBipartite { .. }));
    }

    #[test]
    fn isolated_vertices_default_to_side_a() {
        let sides = two_color(3, &[(0, 1)]).unwrap();
        assert_eq!(sides[2], Side::A);
    }

    #[test]
    fn two_by_two_matching_is_perfect_minus_one() {
        let edges = [(0, 2), (0, 3), (1, 2)];
        let matching = solve_bipartite_matching(4, &edges).unwrap();
        assert_eq!(matching.size, 2);
        assert_valid_matching(&matching, &edges);
        // Vertex 1's only neighbor is 2, so a size-2 matching must pair
        // them and send 0 elsewhere.
        assert!(matching.pairs.contains(&(1, 2)));
        assert!(matching.pairs.contains(&(0, 3)));
    }

    #[test]
    fn star_matches_a_single_pair() {
        let edges = [(0, 1), (0, 2), (0, 3)];
        let matching = solve_bipartite_matching(4, &edges).unwrap();
        assert_eq!(matching.size, 1);
        assert_valid_matching(&matching, &edges);
    }

    #[test]
    fn disconnected_components_match_independently() {
        let edges = [(0, 1), (2, 3), (4, 5)];
        let matching = solve_bipartite_matching(6, &edges).unwrap();
        assert_eq!(matching.size, 3);
        assert_valid_matching(&matching, &edges);
    }

    #[test]
    fn edgeless_graph_has_empty_matching() {
        let matching = solve_bipartite_matching(4, &[]).unwrap();
        assert_eq!(matching.size, 0);
        assert!(matching.pairs.is_empty());
    }

    #[test]
    fn six_cycle_has_perfect_matching() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)];
        let matching = solve_bipartite_matching(6, &edges).unwrap();
        assert_eq!(matching.size, 3);
        assert_valid_matching(&matching, &edges);
    }
}
