//! Route evaluator that computes load, duration, cost, and feasibility.

use crate::graph::Graph;
use crate::models::{Fleet, Route, RouteMetrics, Solution, Violation, ViolationType};

/// Travel cost of `depot -> seq[0] -> ... -> seq[n-1] -> depot`.
///
/// An empty sequence costs nothing (the vehicle stays home).
pub fn route_cost(graph: &Graph, seq: &[usize]) -> i64 {
    let (Some(&first), Some(&last)) = (seq.first(), seq.last()) else {
        return 0;
    };
    let inner: i64 = seq.windows(2).map(|w| graph.weight(w[0], w[1])).sum();
    graph.weight(0, first) + inner + graph.weight(last, 0)
}

/// Evaluates customer sequences against a fleet's capacity and work time.
///
/// # Examples
///
/// ```
/// use u_cvrp::graph::Graph;
/// use u_cvrp::models::{Customer, Fleet};
/// use u_cvrp::evaluation::RouteEvaluator;
///
/// let graph = Graph::from_customers(vec![
///     Customer::depot("D", 0, 0),
///     Customer::new("A", 3, 4, 10, 5),
///     Customer::new("B", 6, 8, 20, 5),
/// ]);
/// let fleet = Fleet::new(1, 100, 100);
///
/// let evaluator = RouteEvaluator::new(&graph, &fleet);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert_eq!(route.cost(), 20);
/// assert_eq!(route.duration(), 30);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    graph: &'a Graph,
    fleet: &'a Fleet,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(graph: &'a Graph, fleet: &'a Fleet) -> Self {
        Self { graph, fleet }
    }

    /// Computes the aggregates of a customer sequence.
    pub fn metrics(&self, seq: &[usize]) -> RouteMetrics {
        let mut load = 0;
        let mut service = 0;
        for &c in seq {
            let customer = self.graph.customer(c);
            load += customer.demand();
            service += customer.service_time();
        }
        let cost = route_cost(self.graph, seq);
        RouteMetrics {
            load,
            duration: cost + service,
            cost,
        }
    }

    /// Returns `true` if the aggregates respect capacity and work time.
    pub fn admits(&self, metrics: &RouteMetrics) -> bool {
        self.fleet.admits(metrics.load, metrics.duration)
    }

    /// Builds a route from a sequence of customers.
    ///
    /// Returns the constructed route and any constraint violations found.
    pub fn build_route(&self, vehicle_id: usize, seq: &[usize]) -> (Route, Vec<Violation>) {
        let metrics = self.metrics(seq);
        let mut route = Route::new(vehicle_id);
        route.replace(seq.to_vec(), metrics);
        (route, self.violations(vehicle_id, &metrics))
    }

    /// Evaluates `seq` and stores it as route `index` of `solution`.
    ///
    /// Returns the violations of the new route.
    pub fn assign(&self, solution: &mut Solution, index: usize, seq: Vec<usize>) -> Vec<Violation> {
        let metrics = self.metrics(&seq);
        solution.replace_route(index, seq, metrics);
        self.violations(index, &metrics)
    }

    /// Lists the constraint violations of a route with these aggregates.
    pub fn violations(&self, route_index: usize, metrics: &RouteMetrics) -> Vec<Violation> {
        let mut violations = Vec::new();
        if metrics.load > self.fleet.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index,
                load: metrics.load,
                capacity: self.fleet.capacity(),
            }));
        }
        if metrics.duration > self.fleet.max_work_time() {
            violations.push(Violation::new(ViolationType::MaxWorkTimeExceeded {
                route_index,
                duration: metrics.duration,
                max_work_time: self.fleet.max_work_time(),
            }));
        }
        violations
    }

    /// Returns `true` if every route's cached aggregates match its sequence.
    pub fn is_consistent(&self, solution: &Solution) -> bool {
        solution
            .routes()
            .iter()
            .all(|r| self.metrics(r.customers()) == r.metrics())
            && solution.total_cost() == solution.recompute_total_cost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn setup() -> (Graph, Fleet) {
        let graph = Graph::from_customers(vec![
            Customer::depot("D", 0, 0),
            Customer::new("A", 3, 4, 10, 5),
            Customer::new("B", 6, 8, 20, 5),
            Customer::new("C", 0, 10, 15, 5),
        ]);
        (graph, Fleet::new(2, 50, 100))
    }

    #[test]
    fn test_route_cost_empty() {
        let (graph, _) = setup();
        assert_eq!(route_cost(&graph, &[]), 0);
    }

    #[test]
    fn test_build_route_single() {
        let (graph, fleet) = setup();
        let eval = RouteEvaluator::new(&graph, &fleet);
        let (route, violations) = eval.build_route(0, &[1]);
        assert!(violations.is_empty());
        assert_eq!(route.cost(), 10);
        assert_eq!(route.duration(), 15);
        assert_eq!(route.load(), 10);
    }

    #[test]
    fn test_capacity_violated() {
        let (graph, _) = setup();
        let fleet = Fleet::new(1, 25, 1000);
        let eval = RouteEvaluator::new(&graph, &fleet);
        let (route, violations) = eval.build_route(0, &[1, 2, 3]);
        assert_eq!(route.len(), 3);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded {
                load: 45,
                capacity: 25,
                ..
            }
        ));
    }

    #[test]
    fn test_work_time_violated() {
        let (graph, _) = setup();
        let fleet = Fleet::new(1, 100, 14);
        let eval = RouteEvaluator::new(&graph, &fleet);
        // travel 5 + service 5 + return 5 = 15 > 14
        let (_, violations) = eval.build_route(0, &[1]);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::MaxWorkTimeExceeded { duration: 15, .. }
        ));
    }

    #[test]
    fn test_asymmetric_cost() {
        let (mut graph, fleet) = setup();
        graph.insert_edge(1, 0, 50);
        let eval = RouteEvaluator::new(&graph, &fleet);
        assert_eq!(eval.metrics(&[1]).cost, 55);
        assert_eq!(eval.metrics(&[2, 1]).cost, 10 + 5 + 50);
    }

    #[test]
    fn test_assign_keeps_solution_consistent() {
        let (graph, fleet) = setup();
        let eval = RouteEvaluator::new(&graph, &fleet);
        let mut sol = Solution::new(fleet);
        assert!(eval.assign(&mut sol, 0, vec![1, 2]).is_empty());
        assert!(eval.assign(&mut sol, 1, vec![3]).is_empty());
        assert!(eval.is_consistent(&sol));
        assert_eq!(sol.total_cost(), 20 + 20);
    }
}
