//! Error types for graph lookups, instance validation, and solver runs.
//!
//! Only fatal conditions are errors. Recoverable situations (an oversized
//! fleet, a balancer that cannot find slack) are reported as outcome values
//! by the components that detect them.

use thiserror::Error;

/// Failure of a [`Graph`](crate::graph::Graph) lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The vertex index is not part of the graph.
    #[error("vertex {0} not found")]
    VertexNotFound(usize),

    /// No edge is stored between the two vertices.
    #[error("edge {from} -> {to} not found")]
    EdgeNotFound { from: usize, to: usize },
}

/// A malformed or inconsistent problem instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    /// The instance lists no vertices at all.
    #[error("instance has no depot")]
    NoDepot,

    /// Vertex 0 carries demand or service time.
    #[error("depot '{0}' must have zero demand and zero service time")]
    DepotHasDemand(String),

    /// A cost entry references a vertex index outside the customer list.
    #[error("cost entry references unknown vertex {0}")]
    UnknownCustomer(usize),

    /// Two vertices share the same name.
    #[error("customer '{0}' is listed more than once")]
    DuplicateCustomer(String),

    /// A customer has negative demand or service time.
    #[error("customer '{0}' has negative demand or service time")]
    NegativeDemand(String),

    /// An edge weight is negative.
    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight { from: usize, to: usize, weight: i64 },

    /// The cost matrix does not cover an ordered vertex pair.
    #[error("cost matrix has no entry for {from} -> {to}")]
    MissingEdge { from: usize, to: usize },

    /// Vehicle count, capacity, or work time is not usable.
    #[error("invalid fleet: {0}")]
    InvalidFleet(String),
}

/// Fatal outcome of an optimization run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The instance was rejected before optimization started.
    #[error("invalid instance: {0}")]
    Instance(#[from] InstanceError),

    /// The fleet cannot serve every customer.
    #[error("{unassigned} customer(s) left unassigned after using all {vehicles} vehicle(s)")]
    InfeasibleFleet { unassigned: usize, vehicles: usize },

    /// A graph lookup failed during optimization.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = SolveError::InfeasibleFleet {
            unassigned: 3,
            vehicles: 2,
        };
        assert_eq!(
            e.to_string(),
            "3 customer(s) left unassigned after using all 2 vehicle(s)"
        );
        let g = GraphError::EdgeNotFound { from: 1, to: 2 };
        assert_eq!(g.to_string(), "edge 1 -> 2 not found");
    }

    #[test]
    fn test_from_instance_error() {
        let e: SolveError = InstanceError::NoDepot.into();
        assert!(matches!(e, SolveError::Instance(InstanceError::NoDepot)));
    }
}
