//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! On the depot-padded tour `t`, for each pair of non-adjacent edges
//! (t[i], t[i+1]) and (t[j], t[j+1]), compute the change in cost from
//! reversing the path between them:
//!
//! ```text
//! delta = d(t[i], t[j]) + rev(t[i+1..=j]) + d(t[i+1], t[j+1])
//!       - d(t[i], t[i+1]) - fwd(t[i+1..=j]) - d(t[j], t[j+1])
//! ```
//!
//! The internal path terms vanish for symmetric costs; they are kept so that
//! asymmetric instances are evaluated exactly. Each pass applies the most
//! negative delta; passes repeat until no move improves.
//!
//! # Complexity
//!
//! O(n²) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::tour::Tour;
use crate::evaluation::RouteEvaluator;
use crate::graph::Graph;
use crate::models::Solution;

/// Applies 2-opt to a single customer sequence.
///
/// Returns the improved sequence and its depot-to-depot cost.
///
/// # Examples
///
/// ```
/// use u_cvrp::graph::Graph;
/// use u_cvrp::models::Customer;
/// use u_cvrp::local_search::two_opt_improve;
///
/// let graph = Graph::from_customers(vec![
///     Customer::depot("D", 0, 0),
///     Customer::new("A", 0, 10, 1, 0),
///     Customer::new("B", 10, 10, 1, 0),
///     Customer::new("C", 10, 0, 1, 0),
/// ]);
///
/// // Crossing order A, C, B
/// let (improved, cost) = two_opt_improve(&[1, 3, 2], &graph);
/// assert_eq!(cost, 40);
/// assert!(improved == vec![1, 2, 3] || improved == vec![3, 2, 1]);
/// ```
pub fn two_opt_improve(route: &[usize], graph: &Graph) -> (Vec<usize>, i64) {
    let mut current = route.to_vec();
    loop {
        let tour = Tour::new(graph, &current);
        match best_two_opt(&tour, graph) {
            Some((i, j)) => current[i..j].reverse(),
            None => return (current, tour.cost()),
        }
    }
}

/// Runs 2-opt on every route of `solution`.
///
/// Returns `true` if at least one route got cheaper.
pub fn opt2(solution: &mut Solution, graph: &Graph) -> bool {
    let fleet = *solution.fleet();
    let evaluator = RouteEvaluator::new(graph, &fleet);
    let mut improved = false;
    for idx in 0..solution.num_routes() {
        let route = solution.route(idx);
        if route.len() < 2 {
            continue;
        }
        let before = route.cost();
        let (seq, cost) = two_opt_improve(route.customers(), graph);
        if cost < before {
            evaluator.assign(solution, idx, seq);
            improved = true;
        }
    }
    improved
}

/// Best improving reversal as a half-open range of customer positions.
fn best_two_opt(tour: &Tour, graph: &Graph) -> Option<(usize, usize)> {
    let m = tour.len();
    let mut best: Option<(usize, usize, i64)> = None;
    for i in 0..m.saturating_sub(3) {
        for j in (i + 2)..(m - 1) {
            let (a, b) = (tour.node(i), tour.node(i + 1));
            let (c, d) = (tour.node(j), tour.node(j + 1));
            let delta = graph.weight(a, c) + tour.inner(i + 1, j, true) + graph.weight(b, d)
                - graph.weight(a, b)
                - tour.inner(i + 1, j, false)
                - graph.weight(c, d);
            if delta < 0 && best.is_none_or(|(_, _, cur)| delta < cur) {
                best = Some((i, j, delta));
            }
        }
    }
    // Tour positions i+1..=j are customer positions i..j.
    best.map(|(i, j, _)| (i, j))
}
