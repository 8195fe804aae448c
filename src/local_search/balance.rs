//! Feasibility repair by moving customers off overloaded routes.
//!
//! While a route exceeds capacity or work time, its customers are tried in
//! order of how cheap they are to remove (largest saving first, later
//! positions first on ties). The first one that some other route can absorb
//! without becoming infeasible is moved to the *nearest* such route (closest
//! member, or the depot for an empty route) at that route's cheapest
//! insertion point. Moves are not required to lower the total cost.

use crate::evaluation::RouteEvaluator;
use crate::graph::Graph;
use crate::models::Solution;

/// Result of a balancing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceOutcome {
    /// Every route respects capacity and work time.
    Balanced,
    /// These routes are still over capacity or work time because no other
    /// route had slack to take any of their customers.
    Infeasible {
        /// Indices of the routes left over-constrained.
        routes: Vec<usize>,
    },
}

impl BalanceOutcome {
    /// Returns `true` for [`BalanceOutcome::Balanced`].
    pub fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// A customer relocation chosen by the balancer.
#[derive(Debug, Clone, Copy)]
struct Transfer {
    pos: usize,
    target: usize,
    insert_at: usize,
}

/// Moves customers until every route is feasible or no route has slack.
///
/// # Examples
///
/// ```
/// use u_cvrp::evaluation::RouteEvaluator;
/// use u_cvrp::graph::Graph;
/// use u_cvrp::local_search::{balance_routes, BalanceOutcome};
/// use u_cvrp::models::{Customer, Fleet, Solution};
///
/// let graph = Graph::from_customers(vec![
///     Customer::depot("D", 0, 0),
///     Customer::new("A", 1, 0, 10, 0),
///     Customer::new("B", 2, 0, 10, 0),
///     Customer::new("C", 3, 0, 10, 0),
/// ]);
/// let fleet = Fleet::new(2, 20, 100);
/// let evaluator = RouteEvaluator::new(&graph, &fleet);
/// let mut solution = Solution::new(fleet);
/// evaluator.assign(&mut solution, 0, vec![1, 2, 3]);
///
/// assert_eq!(balance_routes(&mut solution, &graph), BalanceOutcome::Balanced);
/// assert!(solution.is_feasible());
/// ```
pub fn balance_routes(solution: &mut Solution, graph: &Graph) -> BalanceOutcome {
    let fleet = *solution.fleet();
    let evaluator = RouteEvaluator::new(graph, &fleet);
    let mut stuck = Vec::new();

    for source in 0..solution.num_routes() {
        loop {
            let route = solution.route(source);
            if evaluator.admits(&route.metrics()) {
                break;
            }
            let Some(t) = find_transfer(solution, graph, source) else {
                stuck.push(source);
                break;
            };

            let mut from = solution.route(source).customers().to_vec();
            let customer = from.remove(t.pos);
            let mut to = solution.route(t.target).customers().to_vec();
            to.insert(t.insert_at, customer);
            evaluator.assign(solution, source, from);
            evaluator.assign(solution, t.target, to);
        }
    }

    if stuck.is_empty() {
        BalanceOutcome::Balanced
    } else {
        BalanceOutcome::Infeasible { routes: stuck }
    }
}

fn find_transfer(solution: &Solution, graph: &Graph, source: usize) -> Option<Transfer> {
    let fleet = solution.fleet();
    let seq = solution.route(source).customers();

    let mut order: Vec<(usize, i64)> = (0..seq.len())
        .map(|pos| (pos, removal_saving(graph, seq, pos)))
        .collect();
    // Largest saving first; later positions first on ties.
    order.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    for (pos, _) in order {
        let c = seq[pos];
        let customer = graph.customer(c);
        let mut best: Option<(i64, usize, usize)> = None;

        for (target, route) in solution.routes().iter().enumerate() {
            if target == source || route.load() + customer.demand() > fleet.capacity() {
                continue;
            }
            let (insert_at, added) = cheapest_insertion(graph, route.customers(), c);
            let duration = route.duration() + added + customer.service_time();
            if duration > fleet.max_work_time() {
                continue;
            }
            let nearness = route
                .customers()
                .iter()
                .map(|&x| graph.weight(x, c))
                .min()
                .unwrap_or_else(|| graph.weight(0, c));
            if best.is_none_or(|(cur, _, _)| nearness < cur) {
                best = Some((nearness, target, insert_at));
            }
        }

        if let Some((_, target, insert_at)) = best {
            return Some(Transfer {
                pos,
                target,
                insert_at,
            });
        }
    }
    None
}

fn removal_saving(graph: &Graph, seq: &[usize], pos: usize) -> i64 {
    let prev = if pos == 0 { 0 } else { seq[pos - 1] };
    let next = seq.get(pos + 1).copied().unwrap_or(0);
    let c = seq[pos];
    graph.weight(prev, c) + graph.weight(c, next) - graph.weight(prev, next)
}

fn cheapest_insertion(graph: &Graph, seq: &[usize], c: usize) -> (usize, i64) {
    let mut best = (0, i64::MAX);
    for k in 0..=seq.len() {
        let prev = if k == 0 { 0 } else { seq[k - 1] };
        let next = seq.get(k).copied().unwrap_or(0);
        let added = graph.weight(prev, c) + graph.weight(c, next) - graph.weight(prev, next);
        if added < best.1 {
            best = (k, added);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Fleet};

    fn line() -> Graph {
        Graph::from_customers(vec![
            Customer::depot("D", 0, 0),
            Customer::new("A", 1, 0, 10, 0),
            Customer::new("B", 2, 0, 10, 0),
            Customer::new("C", 3, 0, 10, 0),
            Customer::new("Z", -5, 0, 10, 0),
        ])
    }

    fn solution(graph: &Graph, fleet: Fleet, routes: &[&[usize]]) -> Solution {
        let evaluator = RouteEvaluator::new(graph, &fleet);
        let mut sol = Solution::new(fleet);
        for (i, r) in routes.iter().enumerate() {
            evaluator.assign(&mut sol, i, r.to_vec());
        }
        sol
    }

    #[test]
    fn test_feasible_solution_untouched() {
        let graph = line();
        let fleet = Fleet::new(2, 40, 100);
        let mut sol = solution(&graph, fleet, &[&[1, 2], &[3, 4]]);
        let snapshot = sol.clone();
        assert_eq!(balance_routes(&mut sol, &graph), BalanceOutcome::Balanced);
        assert_eq!(sol, snapshot);
    }

    #[test]
    fn test_moves_trailing_customer_off_overloaded_route() {
        let graph = line();
        let fleet = Fleet::new(2, 30, 100);
        let mut sol = solution(&graph, fleet, &[&[1, 2, 3, 4], &[]]);
        assert!(balance_routes(&mut sol, &graph).is_balanced());
        assert!(sol.is_feasible());
        assert!(sol.is_partition(graph.len()));
        // Z at -5 is by far the most expensive detour.
        assert_eq!(sol.route(1).customers(), &[4]);
        assert_eq!(sol.route(0).customers(), &[1, 2, 3]);
    }

    #[test]
    fn test_prefers_nearest_route_with_slack() {
        let graph = line();
        let fleet = Fleet::new(3, 20, 100);
        // Route 1 holds Z far to the west, route 2 is empty.
        let mut sol = solution(&graph, fleet, &[&[1, 2, 3], &[4], &[]]);
        assert!(balance_routes(&mut sol, &graph).is_balanced());
        assert!(sol.is_feasible());
        assert!(sol.is_partition(graph.len()));
        // C is cheapest to remove and closer to the depot than to Z.
        assert_eq!(sol.route(2).customers(), &[3]);
        assert_eq!(sol.route(1).customers(), &[4]);
    }

    #[test]
    fn test_fills_remaining_slack() {
        let graph = line();
        let fleet = Fleet::new(2, 20, 100);
        let mut sol = solution(&graph, fleet, &[&[1, 2, 3], &[4]]);
        assert_eq!(balance_routes(&mut sol, &graph), BalanceOutcome::Balanced);
        assert_eq!(sol.route(0).customers(), &[1, 2]);
        assert_eq!(sol.route(1).customers(), &[3, 4]);
        let evaluator = RouteEvaluator::new(&graph, &fleet);
        assert!(evaluator.is_consistent(&sol));
    }

    #[test]
    fn test_no_route_with_slack() {
        let graph = line();
        let fleet = Fleet::new(2, 15, 100);
        let mut sol = solution(&graph, fleet, &[&[1, 2, 3], &[4]]);
        assert_eq!(
            balance_routes(&mut sol, &graph),
            BalanceOutcome::Infeasible { routes: vec![0] }
        );
        assert!(sol.is_partition(graph.len()));
    }

    #[test]
    fn test_work_time_repair() {
        let graph = Graph::from_customers(vec![
            Customer::depot("D", 0, 0),
            Customer::new("A", 1, 0, 1, 2),
            Customer::new("B", 2, 0, 1, 2),
            Customer::new("C", 3, 0, 1, 2),
        ]);
        // 6 travel + 6 service > 10
        let fleet = Fleet::new(2, 100, 10);
        let mut sol = solution(&graph, fleet, &[&[1, 2, 3], &[]]);
        assert!(!sol.is_feasible());
        assert!(balance_routes(&mut sol, &graph).is_balanced());
        assert!(sol.is_feasible());
        assert_eq!(sol.route(1).customers(), &[3]);
    }
}
