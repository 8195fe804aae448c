//! Intra-route 3-opt improvement.
//!
//! # Algorithm
//!
//! Cutting three edges of the depot-padded tour leaves four paths
//! `A - B - C - D`. Keeping `A` and `D` in place, `B` and `C` can be
//! reconnected in either order and either direction: 8 patterns, the
//! identity excluded, leaving 7 candidates (2-opt moves included as special
//! cases). Reversed paths are priced with their backward cost, so
//! asymmetric instances are evaluated exactly.
//!
//! Uses first-improvement over cut triples with the best pattern per triple,
//! restarting after every applied move.
//!
//! # Complexity
//!
//! O(n³) per pass.
//!
//! # Reference
//!
//! Lin, S. (1965). "Computer Solutions of the Traveling Salesman Problem",
//! *Bell System Technical Journal* 44(10), 2245-2269.

use super::tour::Tour;
use crate::evaluation::RouteEvaluator;
use crate::graph::Graph;
use crate::models::Solution;

/// A path `nodes[s..=e]` of the tour, possibly walked backward.
#[derive(Debug, Clone, Copy)]
struct Piece {
    s: usize,
    e: usize,
    reversed: bool,
}

impl Piece {
    fn head(&self, tour: &Tour) -> usize {
        tour.node(if self.reversed { self.e } else { self.s })
    }

    fn tail(&self, tour: &Tour) -> usize {
        tour.node(if self.reversed { self.s } else { self.e })
    }

    fn inner(&self, tour: &Tour) -> i64 {
        tour.inner(self.s, self.e, self.reversed)
    }

    fn push_into(&self, tour: &Tour, out: &mut Vec<usize>) {
        let seg = tour.segment(self.s, self.e);
        if self.reversed {
            out.extend(seg.iter().rev());
        } else {
            out.extend_from_slice(seg);
        }
    }
}

/// Applies 3-opt to a single customer sequence.
///
/// Returns the improved sequence and its depot-to-depot cost.
///
/// # Examples
///
/// ```
/// use u_cvrp::evaluation::route_cost;
/// use u_cvrp::graph::Graph;
/// use u_cvrp::models::Customer;
/// use u_cvrp::local_search::three_opt_improve;
///
/// let graph = Graph::from_customers(vec![
///     Customer::depot("D", 0, 0),
///     Customer::new("A", 20, 0, 1, 0),
///     Customer::new("B", 30, 10, 1, 0),
///     Customer::new("C", 10, 10, 1, 0),
/// ]);
///
/// let (improved, cost) = three_opt_improve(&[1, 3, 2], &graph);
/// assert!(cost < route_cost(&graph, &[1, 3, 2]));
/// assert_eq!(cost, route_cost(&graph, &improved));
/// ```
pub fn three_opt_improve(route: &[usize], graph: &Graph) -> (Vec<usize>, i64) {
    let mut current = route.to_vec();
    loop {
        let tour = Tour::new(graph, &current);
        match first_three_opt(&tour, graph) {
            Some(next) => current = next,
            None => return (current, tour.cost()),
        }
    }
}

/// Runs 3-opt on every route of `solution`.
///
/// Returns `true` if at least one route got cheaper.
pub fn opt3(solution: &mut Solution, graph: &Graph) -> bool {
    let fleet = *solution.fleet();
    let evaluator = RouteEvaluator::new(graph, &fleet);
    let mut improved = false;
    for idx in 0..solution.num_routes() {
        let route = solution.route(idx);
        if route.len() < 2 {
            continue;
        }
        let before = route.cost();
        let (seq, cost) = three_opt_improve(route.customers(), graph);
        if cost < before {
            evaluator.assign(solution, idx, seq);
            improved = true;
        }
    }
    improved
}

/// First cut triple with an improving reconnection; returns the new sequence.
fn first_three_opt(tour: &Tour, graph: &Graph) -> Option<Vec<usize>> {
    let m = tour.len();
    // Cuts after positions i < j < k, with D = nodes[k+1..] keeping the final depot.
    for i in 0..m.saturating_sub(3) {
        for j in (i + 1)..(m - 2) {
            for k in (j + 1)..(m - 1) {
                if let Some((first, second)) = best_pattern(tour, graph, i, j, k) {
                    let mut nodes = Vec::with_capacity(m);
                    nodes.extend_from_slice(tour.segment(0, i));
                    first.push_into(tour, &mut nodes);
                    second.push_into(tour, &mut nodes);
                    nodes.extend_from_slice(tour.segment(k + 1, m - 1));
                    return Some(nodes[1..m - 1].to_vec());
                }
            }
        }
    }
    None
}

/// Best improving reconnection of `B = (i, j]` and `C = (j, k]`, if any.
fn best_pattern(
    tour: &Tour,
    graph: &Graph,
    i: usize,
    j: usize,
    k: usize,
) -> Option<(Piece, Piece)> {
    let a_end = tour.node(i);
    let d_start = tour.node(k + 1);
    let b = Piece {
        s: i + 1,
        e: j,
        reversed: false,
    };
    let c = Piece {
        s: j + 1,
        e: k,
        reversed: false,
    };

    let price = |first: Piece, second: Piece| {
        graph.weight(a_end, first.head(tour))
            + first.inner(tour)
            + graph.weight(first.tail(tour), second.head(tour))
            + second.inner(tour)
            + graph.weight(second.tail(tour), d_start)
    };
    let old_cost = price(b, c);

    let flip = |p: Piece| Piece {
        reversed: true,
        ..p
    };
    let patterns = [
        (b, flip(c)),       // A - B - C' - D
        (flip(b), c),       // A - B' - C - D
        (flip(b), flip(c)), // A - B' - C' - D
        (c, b),             // A - C - B - D
        (c, flip(b)),       // A - C - B' - D
        (flip(c), b),       // A - C' - B - D
        (flip(c), flip(b)), // A - C' - B' - D
    ];

    let mut best: Option<((Piece, Piece), i64)> = None;
    for (first, second) in patterns {
        let delta = price(first, second) - old_cost;
        if delta < 0 && best.is_none_or(|(_, cur)| delta < cur) {
            best = Some(((first, second), delta));
        }
    }
    best.map(|(pattern, _)| pattern)
}
