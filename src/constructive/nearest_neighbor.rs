//! Seed-and-extend nearest-neighbor construction.
//!
//! Fills vehicles one after another: each route is seeded with the unassigned
//! customer closest to the depot, then repeatedly extended with the nearest
//! unassigned neighbor of its last customer that keeps the route within
//! capacity and work time (return leg included). When a route accepts nobody
//! else the next vehicle starts.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers.

use crate::error::SolveError;
use crate::evaluation::RouteEvaluator;
use crate::graph::Graph;
use crate::models::{Fleet, RouteMetrics, Solution};

/// Non-fatal result of a successful construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionOutcome {
    /// Every vehicle serves at least one customer.
    Complete,
    /// The fleet is larger than needed; some vehicles stay empty.
    TooManyVehicles {
        /// Number of vehicles without customers.
        empty_routes: usize,
    },
}

/// Builds the initial solution for `graph` with the given fleet.
///
/// Fails with [`SolveError::InfeasibleFleet`] when customers remain after all
/// vehicles have been filled.
///
/// # Examples
///
/// ```
/// use u_cvrp::constructive::{init_solutions, ConstructionOutcome};
/// use u_cvrp::graph::Graph;
/// use u_cvrp::models::{Customer, Fleet};
///
/// let graph = Graph::from_customers(vec![
///     Customer::depot("D", 0, 0),
///     Customer::new("A", 1, 0, 10, 0),
///     Customer::new("B", 2, 0, 10, 0),
///     Customer::new("C", 3, 0, 10, 0),
/// ]);
///
/// let (solution, outcome) = init_solutions(&graph, &Fleet::new(1, 30, 100)).unwrap();
/// assert_eq!(outcome, ConstructionOutcome::Complete);
/// assert_eq!(solution.route(0).customers(), &[1, 2, 3]);
/// ```
pub fn init_solutions(
    graph: &Graph,
    fleet: &Fleet,
) -> Result<(Solution, ConstructionOutcome), SolveError> {
    let evaluator = RouteEvaluator::new(graph, fleet);
    let mut solution = Solution::new(*fleet);
    let mut assigned = vec![false; graph.len()];
    if let Some(depot) = assigned.first_mut() {
        *depot = true;
    }
    let mut remaining = graph.num_customers();
    let by_depot = graph.sort_from_depot();

    for vehicle in 0..fleet.vehicles() {
        if remaining == 0 {
            break;
        }

        let seed = by_depot.iter().map(|&(c, _)| c).find(|&c| {
            !assigned[c] && evaluator.admits(&evaluator.metrics(&[c]))
        });
        let Some(seed) = seed else {
            break;
        };

        let mut seq = vec![seed];
        let mut metrics = evaluator.metrics(&seq);
        assigned[seed] = true;
        remaining -= 1;

        while let Some(&last) = seq.last() {
            let mut next = None;
            for (c, w) in graph.neighborhood(last)? {
                if assigned[c] {
                    continue;
                }
                let customer = graph.customer(c);
                let cost = metrics.cost - graph.weight(last, 0) + w + graph.weight(c, 0);
                let candidate = RouteMetrics {
                    load: metrics.load + customer.demand(),
                    duration: cost + metrics.service_time() + customer.service_time(),
                    cost,
                };
                if evaluator.admits(&candidate) {
                    next = Some((c, candidate));
                    break;
                }
            }
            let Some((c, candidate)) = next else {
                break;
            };
            seq.push(c);
            metrics = candidate;
            assigned[c] = true;
            remaining -= 1;
        }

        solution.replace_route(vehicle, seq, metrics);
    }

    if remaining > 0 {
        return Err(SolveError::InfeasibleFleet {
            unassigned: remaining,
            vehicles: fleet.vehicles(),
        });
    }

    let outcome = match solution.num_empty_routes() {
        0 => ConstructionOutcome::Complete,
        empty_routes => ConstructionOutcome::TooManyVehicles { empty_routes },
    };
    Ok((solution, outcome))
}
