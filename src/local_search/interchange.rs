//! Inter-route λ-interchange (segment relocation and exchange).
//!
//! # Algorithm
//!
//! An `Interchange { take_a: X, take_b: Y }` removes a segment of `X`
//! consecutive customers from route A and a segment of `Y` consecutive
//! customers from route B (X, Y ∈ {0, 1, 2}, not both zero). Each segment is
//! then reinserted into the *other* route at its cheapest insertion point:
//!
//! ```text
//! A: ... pa [a1 a2] na ...        A': ... pa na ... p [b1] n ...
//! B: ... pb [b1] nb ...     =>    B': ... pb nb ... q [a1 a2] m ...
//! ```
//!
//! `(1, 0)` / `(0, 1)` are pure relocations, `(1, 1)`, `(1, 2)`, `(2, 1)`,
//! `(2, 2)` are exchanges. A move is only considered when both resulting
//! routes respect capacity and work time; it improves when the summed cost of
//! the two routes strictly decreases.
//!
//! # Complexity
//!
//! O(|A| · |B| · (|A| + |B|)) per route pair.
//!
//! # Reference
//!
//! Osman, I.H. (1993). "Metastrategy simulated annealing and tabu search
//! algorithms for the vehicle routing problem", *Annals of Operations
//! Research* 41, 421-451.

use std::fmt;

use crate::evaluation::RouteEvaluator;
use crate::graph::Graph;
use crate::models::{RouteMetrics, Solution};

/// Segment sizes taken from the two routes of a λ-interchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interchange {
    take_a: usize,
    take_b: usize,
}

impl Interchange {
    /// Relocate one customer from A to B.
    pub const OPT10: Self = Self { take_a: 1, take_b: 0 };
    /// Relocate one customer from B to A.
    pub const OPT01: Self = Self { take_a: 0, take_b: 1 };
    /// Swap one customer of A with one of B.
    pub const OPT11: Self = Self { take_a: 1, take_b: 1 };
    /// Swap one customer of A with two of B.
    pub const OPT12: Self = Self { take_a: 1, take_b: 2 };
    /// Swap two customers of A with one of B.
    pub const OPT21: Self = Self { take_a: 2, take_b: 1 };
    /// Swap two customers of A with two of B.
    pub const OPT22: Self = Self { take_a: 2, take_b: 2 };

    /// All six operators in the order the solver tries them.
    pub const ALL: [Self; 6] = [
        Self::OPT10,
        Self::OPT01,
        Self::OPT11,
        Self::OPT12,
        Self::OPT21,
        Self::OPT22,
    ];

    /// Creates an interchange; `None` unless both sizes are ≤ 2 and not both 0.
    pub fn new(take_a: usize, take_b: usize) -> Option<Self> {
        if take_a > 2 || take_b > 2 || take_a + take_b == 0 {
            return None;
        }
        Some(Self { take_a, take_b })
    }

    /// Segment length removed from route A.
    pub fn take_a(&self) -> usize {
        self.take_a
    }

    /// Segment length removed from route B.
    pub fn take_b(&self) -> usize {
        self.take_b
    }

    /// Calls `f` with every feasible move of this kind between routes `a`
    /// and `b`, in generation order (A position outer, B position inner).
    ///
    /// Each segment is placed at its cheapest insertion point in the other
    /// route (earliest point on ties).
    pub fn for_each_move<F>(&self, solution: &Solution, graph: &Graph, a: usize, b: usize, mut f: F)
    where
        F: FnMut(InterchangeMove),
    {
        if a == b {
            return;
        }
        let fleet = solution.fleet();
        let (ra, rb) = (solution.route(a), solution.route(b));
        let (sa, sb) = (ra.customers(), rb.customers());
        if sa.len() < self.take_a || sb.len() < self.take_b {
            return;
        }
        let before = ra.cost() + rb.cost();

        let cuts_b: Vec<Cut> = positions(sb.len(), self.take_b)
            .map(|pos| Cut::new(graph, sb, rb.cost(), pos, self.take_b))
            .collect();

        for pos_a in positions(sa.len(), self.take_a) {
            let cut_a = Cut::new(graph, sa, ra.cost(), pos_a, self.take_a);
            for cut_b in &cuts_b {
                let (insert_b, add_a) = best_insertion(graph, &cut_a.rest, cut_b.segment(sb));
                let (insert_a, add_b) = best_insertion(graph, &cut_b.rest, cut_a.segment(sa));

                let cost_a = cut_a.rest_cost + add_a;
                let metrics_a = RouteMetrics {
                    load: ra.load() - cut_a.stats.load + cut_b.stats.load,
                    duration: cost_a + ra.metrics().service_time() - cut_a.stats.service
                        + cut_b.stats.service,
                    cost: cost_a,
                };
                let cost_b = cut_b.rest_cost + add_b;
                let metrics_b = RouteMetrics {
                    load: rb.load() - cut_b.stats.load + cut_a.stats.load,
                    duration: cost_b + rb.metrics().service_time() - cut_b.stats.service
                        + cut_a.stats.service,
                    cost: cost_b,
                };
                if !fleet.admits(metrics_a.load, metrics_a.duration)
                    || !fleet.admits(metrics_b.load, metrics_b.duration)
                {
                    continue;
                }

                f(InterchangeMove {
                    kind: *self,
                    route_a: a,
                    route_b: b,
                    pos_a: cut_a.pos,
                    pos_b: cut_b.pos,
                    insert_a,
                    insert_b,
                    metrics_a,
                    metrics_b,
                    delta: cost_a + cost_b - before,
                });
            }
        }
    }

    /// Best strictly improving move between routes `a` and `b`.
    pub fn best_move_for_pair(
        &self,
        solution: &Solution,
        graph: &Graph,
        a: usize,
        b: usize,
    ) -> Option<InterchangeMove> {
        let mut best: Option<InterchangeMove> = None;
        self.for_each_move(solution, graph, a, b, |mv| {
            if mv.delta < 0 && best.as_ref().is_none_or(|cur| mv.delta < cur.delta) {
                best = Some(mv);
            }
        });
        best
    }

    /// Best strictly improving move over all ordered route pairs.
    pub fn best_move(&self, solution: &Solution, graph: &Graph) -> Option<InterchangeMove> {
        let n = solution.num_routes();
        let mut best: Option<InterchangeMove> = None;
        for a in 0..n {
            for b in 0..n {
                if let Some(mv) = self.best_move_for_pair(solution, graph, a, b) {
                    if best.as_ref().is_none_or(|cur| mv.delta < cur.delta) {
                        best = Some(mv);
                    }
                }
            }
        }
        best
    }

    /// Applies the best improving move between routes `a` and `b`.
    ///
    /// Returns `true` if the solution changed.
    pub fn improve_pair(&self, solution: &mut Solution, graph: &Graph, a: usize, b: usize) -> bool {
        match self.best_move_for_pair(solution, graph, a, b) {
            Some(mv) => {
                mv.apply(solution, graph);
                true
            }
            None => false,
        }
    }

    /// Applies the best improving move over all route pairs.
    ///
    /// Returns `true` if the solution changed.
    pub fn improve(&self, solution: &mut Solution, graph: &Graph) -> bool {
        match self.best_move(solution, graph) {
            Some(mv) => {
                mv.apply(solution, graph);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Interchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "opt{}{}", self.take_a, self.take_b)
    }
}

/// A fully evaluated λ-interchange between two routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterchangeMove {
    /// Segment sizes.
    pub kind: Interchange,
    /// Route losing the first segment.
    pub route_a: usize,
    /// Route losing the second segment.
    pub route_b: usize,
    /// Start of the segment taken from A.
    pub pos_a: usize,
    /// Start of the segment taken from B.
    pub pos_b: usize,
    /// Insertion index of A's segment in B (after B's segment is removed).
    pub insert_a: usize,
    /// Insertion index of B's segment in A (after A's segment is removed).
    pub insert_b: usize,
    /// Aggregates of A after the move.
    pub metrics_a: RouteMetrics,
    /// Aggregates of B after the move.
    pub metrics_b: RouteMetrics,
    /// Change of the summed route cost.
    pub delta: i64,
}

impl InterchangeMove {
    /// The sequences of A and B after the move.
    pub fn sequences(&self, solution: &Solution) -> (Vec<usize>, Vec<usize>) {
        let sa = solution.route(self.route_a).customers();
        let sb = solution.route(self.route_b).customers();
        let seg_a = &sa[self.pos_a..self.pos_a + self.kind.take_a];
        let seg_b = &sb[self.pos_b..self.pos_b + self.kind.take_b];
        let mut new_a = without(sa, self.pos_a, self.kind.take_a);
        let mut new_b = without(sb, self.pos_b, self.kind.take_b);
        new_a.splice(self.insert_b..self.insert_b, seg_b.iter().copied());
        new_b.splice(self.insert_a..self.insert_a, seg_a.iter().copied());
        (new_a, new_b)
    }

    /// Replaces both routes with their post-move sequences.
    pub fn apply(&self, solution: &mut Solution, graph: &Graph) {
        let (new_a, new_b) = self.sequences(solution);
        let fleet = *solution.fleet();
        let evaluator = RouteEvaluator::new(graph, &fleet);
        evaluator.assign(solution, self.route_a, new_a);
        evaluator.assign(solution, self.route_b, new_b);
        debug_assert_eq!(solution.route(self.route_a).metrics(), self.metrics_a);
        debug_assert_eq!(solution.route(self.route_b).metrics(), self.metrics_b);
    }
}

/// Relocate one customer between two routes (`A -> B`).
pub fn opt10(solution: &mut Solution, graph: &Graph) -> bool {
    Interchange::OPT10.improve(solution, graph)
}

/// Relocate one customer between two routes (`B -> A`).
pub fn opt01(solution: &mut Solution, graph: &Graph) -> bool {
    Interchange::OPT01.improve(solution, graph)
}

/// Swap single customers between two routes.
pub fn opt11(solution: &mut Solution, graph: &Graph) -> bool {
    Interchange::OPT11.improve(solution, graph)
}

/// Swap one customer with a pair of customers.
pub fn opt12(solution: &mut Solution, graph: &Graph) -> bool {
    Interchange::OPT12.improve(solution, graph)
}

/// Swap a pair of customers with one customer.
pub fn opt21(solution: &mut Solution, graph: &Graph) -> bool {
    Interchange::OPT21.improve(solution, graph)
}

/// Swap pairs of customers between two routes.
pub fn opt22(solution: &mut Solution, graph: &Graph) -> bool {
    Interchange::OPT22.improve(solution, graph)
}

#[derive(Debug, Clone, Copy, Default)]
struct SegmentStats {
    load: i32,
    service: i64,
}

/// A route with one segment cut out.
struct Cut {
    pos: usize,
    len: usize,
    rest: Vec<usize>,
    rest_cost: i64,
    stats: SegmentStats,
}

impl Cut {
    fn new(graph: &Graph, seq: &[usize], cost: i64, pos: usize, len: usize) -> Self {
        let stats = seq[pos..pos + len]
            .iter()
            .fold(SegmentStats::default(), |acc, &c| SegmentStats {
                load: acc.load + graph.customer(c).demand(),
                service: acc.service + graph.customer(c).service_time(),
            });
        Self {
            pos,
            len,
            rest: without(seq, pos, len),
            rest_cost: cost - removal_gain(graph, seq, pos, len),
            stats,
        }
    }

    fn segment<'s>(&self, seq: &'s [usize]) -> &'s [usize] {
        &seq[self.pos..self.pos + self.len]
    }
}

/// Start positions of a `len`-segment; a single dummy position for `len == 0`.
fn positions(seq_len: usize, len: usize) -> std::ops::RangeInclusive<usize> {
    if len == 0 {
        0..=0
    } else {
        0..=seq_len - len
    }
}

fn without(seq: &[usize], pos: usize, len: usize) -> Vec<usize> {
    let mut rest = Vec::with_capacity(seq.len() - len);
    rest.extend_from_slice(&seq[..pos]);
    rest.extend_from_slice(&seq[pos + len..]);
    rest
}

fn path_cost(graph: &Graph, seg: &[usize]) -> i64 {
    seg.windows(2).map(|w| graph.weight(w[0], w[1])).sum()
}

/// Cost saved by cutting `seq[pos..pos + len]` and joining its neighbors.
fn removal_gain(graph: &Graph, seq: &[usize], pos: usize, len: usize) -> i64 {
    if len == 0 {
        return 0;
    }
    let prev = if pos == 0 { 0 } else { seq[pos - 1] };
    let next = seq.get(pos + len).copied().unwrap_or(0);
    let seg = &seq[pos..pos + len];
    graph.weight(prev, seg[0]) + path_cost(graph, seg) + graph.weight(seg[len - 1], next)
        - graph.weight(prev, next)
}

/// Cheapest insertion index of `seg` into `rest`, and the added cost.
fn best_insertion(graph: &Graph, rest: &[usize], seg: &[usize]) -> (usize, i64) {
    let (Some(&first), Some(&last)) = (seg.first(), seg.last()) else {
        return (0, 0);
    };
    let inner = path_cost(graph, seg);
    let mut best = (0, i64::MAX);
    for k in 0..=rest.len() {
        let prev = if k == 0 { 0 } else { rest[k - 1] };
        let next = rest.get(k).copied().unwrap_or(0);
        let add =
            graph.weight(prev, first) + inner + graph.weight(last, next) - graph.weight(prev, next);
        if add < best.1 {
            best = (k, add);
        }
    }
    best
}
