//! Directed flow edge with residual-capacity bookkeeping.

use serde::{Deserialize, Serialize};

use super::{Capacity, Flow, FlowError, NodeId};

/// A directed edge `from -> to` with a capacity and the current flow.
///
/// The residual operations are endpoint-relative: relative to `to` the edge
/// offers its remaining forward capacity, relative to `from` it offers the
/// already-pushed flow (the cancel direction). The edge never clamps; the
/// solver's bottleneck computation is what keeps `0 <= flow <= capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    from: NodeId,
    to: NodeId,
    capacity: Capacity,
    flow: Flow,
}

impl FlowEdge {
    pub fn new(from: NodeId, to: NodeId, capacity: Capacity) -> Self {
        Self {
            from,
            to,
            capacity,
            flow: 0,
        }
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Returns the endpoint opposite to `vertex`.
    pub fn other(&self, vertex: NodeId) -> Result<NodeId, FlowError> {
        if vertex == self.from {
            Ok(self.to)
        } else if vertex == self.to {
            Ok(self.from)
        } else {
            Err(self.invalid_endpoint(vertex))
        }
    }

    /// Residual capacity toward `vertex`: `capacity - flow` in the forward
    /// direction, `flow` in the cancel direction.
    pub fn residual_capacity_to(&self, vertex: NodeId) -> Result<Flow, FlowError> {
        if vertex == self.from {
            Ok(self.flow)
        } else if vertex == self.to {
            Ok(self.capacity - self.flow)
        } else {
            Err(self.invalid_endpoint(vertex))
        }
    }

    /// Pushes `delta` units of flow toward `vertex`: increases `flow` toward
    /// `to`, decreases it toward `from`. The caller must keep `delta` within
    /// the residual capacity reported for the same endpoint.
    pub fn add_residual_flow_to(&mut self, vertex: NodeId, delta: Flow) -> Result<(), FlowError> {
        if vertex == self.from {
            self.flow -= delta;
            Ok(())
        } else if vertex == self.to {
            self.flow += delta;
            Ok(())
        } else {
            Err(self.invalid_endpoint(vertex))
        }
    }

    fn invalid_endpoint(&self, vertex: NodeId) -> FlowError {
        FlowError::InvalidEndpoint {
            vertex,
            from: self.from,
            to: self.to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_edge_carries_no_flow() {
        let edge = FlowEdge::new(0, 1, 10);
        assert_eq!(edge.from(), 0);
        assert_eq!(edge.to(), 1);
        assert_eq!(edge.capacity(), 10);
        assert_eq!(edge.flow(), 0);
    }

    #[test]
    fn other_returns_opposite_endpoint() {
        let edge = FlowEdge::new(3, 7, 1);
        assert_eq!(edge.other(3), Ok(7));
        assert_eq!(edge.other(7), Ok(3));
    }

    #[test]
    fn other_rejects_foreign_vertex() {
        let edge = FlowEdge::new(3, 7, 1);
        assert_eq!(
            edge.other(5),
            Err(FlowError::InvalidEndpoint {
                vertex: 5,
                from: 3,
                to: 7
            })
        );
    }

    #[test]
    fn residual_capacity_is_endpoint_relative() {
        let mut edge = FlowEdge::new(0, 1, 10);
        assert_eq!(edge.residual_capacity_to(1), Ok(10));
        assert_eq!(edge.residual_capacity_to(0), Ok(0));

        edge.add_residual_flow_to(1, 4).unwrap();
        assert_eq!(edge.flow(), 4);
        assert_eq!(edge.residual_capacity_to(1), Ok(6));
        assert_eq!(edge.residual_capacity_to(0), Ok(4));
    }

    #[test]
    fn pushing_toward_source_cancels_flow() {
        let mut edge = FlowEdge::new(0, 1, 10);
        edge.add_residual_flow_to(1, 7).unwrap();
        edge.add_residual_flow_to(0, 3).unwrap();
        assert_eq!(edge.flow(), 4);
    }

    #[test]
    fn residual_operations_reject_foreign_vertex() {
        let mut edge = FlowEdge::new(0, 1, 10);
        assert!(matches!(
            edge.residual_capacity_to(9),
            Err(FlowError::InvalidEndpoint { vertex: 9, .. })
        ));
        assert!(matches!(
            edge.add_residual_flow_to(9, 1),
            Err(FlowError::InvalidEndpoint { vertex: 9, .. })
        ));
        assert_eq!(edge.flow(), 0);
    }
}
