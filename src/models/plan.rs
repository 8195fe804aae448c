//! Output representation of an optimized solution.

use serde::{Deserialize, Serialize};

use super::Solution;
use crate::graph::Graph;

/// One vehicle's route by customer name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRoute {
    /// Vehicle index.
    pub vehicle: usize,
    /// Customer names in visiting order (depot excluded).
    pub customers: Vec<String>,
    /// Total demand served.
    pub load: i32,
    /// Travel plus service time.
    pub duration: i64,
    /// Travel cost.
    pub cost: i64,
}

/// The routes handed to an [`OutputSink`](super::OutputSink).
///
/// # Examples
///
/// ```
/// use u_cvrp::graph::Graph;
/// use u_cvrp::models::{Customer, Fleet, RoutingPlan, Solution};
///
/// let graph = Graph::from_customers(vec![Customer::depot("D", 0, 0)]);
/// let plan = RoutingPlan::from_solution(&Solution::new(Fleet::new(2, 10, 10)), &graph);
/// assert_eq!(plan.routes.len(), 2);
/// assert_eq!(plan.total_cost, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingPlan {
    /// One entry per vehicle, including unused ones.
    pub routes: Vec<PlannedRoute>,
    /// Sum of route costs.
    pub total_cost: i64,
}

impl RoutingPlan {
    /// Resolves vertex indices of `solution` to customer names.
    pub fn from_solution(solution: &Solution, graph: &Graph) -> Self {
        let routes = solution
            .routes()
            .iter()
            .map(|r| PlannedRoute {
                vehicle: r.vehicle_id(),
                customers: r
                    .customers()
                    .iter()
                    .map(|&c| graph.customer(c).name().to_string())
                    .collect(),
                load: r.load(),
                duration: r.duration(),
                cost: r.cost(),
            })
            .collect();
        Self {
            routes,
            total_cost: solution.total_cost(),
        }
    }
}
