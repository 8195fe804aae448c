//! Tabu search over λ-interchange moves.
//!
//! # Algorithm
//!
//! Each step scores every feasible move of the configured
//! [`Interchange`] kinds (all six by default) between every pair of routes,
//! orders them by cost delta (generation order on ties) and applies the
//! first improving one that is admissible:
//!
//! - a move is *tabu* if it would re-create an arc broken within the last
//!   `tenure` rounds;
//! - a tabu move is still admissible if it beats the best cost known to the
//!   search (aspiration).
//!
//! A step without an admissible improving move changes nothing. Searches
//! built with [`TabuSearch::with_worsening`] also accept non-improving
//! moves, which lets them walk out of a local optimum. The arcs the applied
//! move breaks are recorded in [`TabuMemory`] and the round counter advances
//! either way.
//!
//! [`TabuSearch::run`] performs a bounded phase of steps and hands back the
//! best solution it met, never a worse one than it was given.
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Gendreau, M., Hertz, A., Laporte, G. (1994). "A Tabu Search Heuristic for
//! the Vehicle Routing Problem", *Management Science* 40(10), 1276-1290.

use std::collections::HashSet;

use u_metaheur::tabu::TabuConfig;

use super::memory::{MoveSignature, TabuMemory};
use crate::graph::Graph;
use crate::local_search::{Interchange, InterchangeMove};
use crate::models::Solution;

/// What a single tabu step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabuStep {
    /// The applied move.
    pub applied: InterchangeMove,
    /// `true` if the move was tabu and admitted by aspiration.
    pub aspired: bool,
}

/// Summary of a [`TabuSearch::run`] phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabuPhase {
    /// Steps performed (including steps that found no move).
    pub steps: usize,
    /// Moves applied.
    pub moves: usize,
    /// Cost when the phase started.
    pub initial_cost: i64,
    /// Cost of the solution handed back.
    pub final_cost: i64,
}

impl TabuPhase {
    /// Cost reduction achieved by the phase.
    pub fn improvement(&self) -> i64 {
        self.initial_cost - self.final_cost
    }
}

/// Stateful tabu search bound to one graph.
///
/// The memory lives as long as the search, so repeated calls to
/// [`run`](Self::run) share it.
///
/// # Examples
///
/// ```
/// use u_cvrp::evaluation::RouteEvaluator;
/// use u_cvrp::graph::Graph;
/// use u_cvrp::models::{Customer, Fleet, Solution};
/// use u_cvrp::tabu::TabuSearch;
/// use u_metaheur::tabu::TabuConfig;
///
/// let graph = Graph::from_customers(vec![
///     Customer::depot("D", 0, 0),
///     Customer::new("E1", 10, 1, 10, 0),
///     Customer::new("W1", -10, -1, 10, 0),
///     Customer::new("E2", 10, -1, 10, 0),
///     Customer::new("W2", -10, 1, 10, 0),
/// ]);
/// let fleet = Fleet::new(2, 20, 1000);
/// let evaluator = RouteEvaluator::new(&graph, &fleet);
/// let mut solution = Solution::new(fleet);
/// evaluator.assign(&mut solution, 0, vec![1, 4]);
/// evaluator.assign(&mut solution, 1, vec![3, 2]);
///
/// let config = TabuConfig::default().with_max_iterations(10).with_tabu_tenure(3);
/// let mut search = TabuSearch::new(&graph, &config);
/// let phase = search.run(&mut solution);
/// assert!(phase.final_cost < phase.initial_cost);
/// ```
pub struct TabuSearch<'g> {
    graph: &'g Graph,
    memory: TabuMemory,
    kinds: Vec<Interchange>,
    aspiration: bool,
    worsening: bool,
    max_steps: usize,
    max_no_improve: usize,
    near: Option<Vec<Vec<usize>>>,
}

impl<'g> TabuSearch<'g> {
    /// Creates a search using `config` for tenure, aspiration and the phase
    /// bounds (`max_iterations`, `max_no_improve`).
    ///
    /// Candidate moves default to [`Interchange::ALL`], and only improving
    /// moves are taken.
    pub fn new(graph: &'g Graph, config: &TabuConfig) -> Self {
        Self {
            graph,
            memory: TabuMemory::new(config.tabu_tenure),
            kinds: Interchange::ALL.to_vec(),
            aspiration: config.aspiration,
            worsening: false,
            max_steps: config.max_iterations,
            max_no_improve: config.max_no_improve,
            near: None,
        }
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Lets steps apply the best admissible move even when it does not
    /// lower the cost.
    pub fn with_worsening(mut self, worsening: bool) -> Self {
        self.worsening = worsening;
        self
    }

    /// Sets the move kinds scored at every step.
    pub fn with_kinds(mut self, kinds: &[Interchange]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    /// Restricts candidates to granular neighborhoods: a segment may only
    /// enter a route that is empty or holds one of the `k` nearest neighbors
    /// of the segment's first customer.
    pub fn with_candidate_neighbors(mut self, k: usize) -> Self {
        let near = (0..self.graph.len())
            .map(|v| {
                self.graph
                    .neighborhood(v)
                    .map(|list| list.into_iter().take(k).map(|(c, _)| c).collect())
                    .unwrap_or_default()
            })
            .collect();
        self.near = Some(near);
        self
    }

    /// The tabu memory.
    pub fn memory(&self) -> &TabuMemory {
        &self.memory
    }

    /// Current round.
    pub fn round(&self) -> usize {
        self.memory.round()
    }

    /// Performs one step against `best_cost`, the cost to beat for
    /// aspiration.
    ///
    /// Returns `None` and leaves `solution` untouched when no admissible
    /// move exists; the round advances either way.
    pub fn step(&mut self, solution: &mut Solution, best_cost: i64) -> Option<TabuStep> {
        let mut candidates = self.candidates(solution);
        // Stable: equal deltas keep generation order.
        candidates.sort_by_key(|mv| mv.delta);

        let current = solution.total_cost();
        let mut chosen = None;
        for mv in candidates {
            if mv.delta >= 0 && !self.worsening {
                break;
            }
            let (old_arcs, created) = self.arc_changes(solution, &mv);
            let tabu = created.iter().any(|&arc| self.memory.is_tabu(arc));
            if !tabu {
                chosen = Some((mv, old_arcs, false));
                break;
            }
            if self.aspiration && current + mv.delta < best_cost {
                chosen = Some((mv, old_arcs, true));
                break;
            }
        }

        let mut result = None;
        if let Some((mv, old_arcs, aspired)) = chosen {
            mv.apply(solution, self.graph);
            let now: HashSet<MoveSignature> = touched_arcs(solution, &mv).into_iter().collect();
            for arc in old_arcs {
                if !now.contains(&arc) {
                    self.memory.record(arc);
                }
            }
            result = Some(TabuStep {
                applied: mv,
                aspired,
            });
        }
        self.memory.advance();
        result
    }

    /// Runs up to `max_iterations` steps, stopping early after
    /// `max_no_improve` steps without a new best.
    ///
    /// `solution` ends up holding the best solution met during the phase.
    pub fn run(&mut self, solution: &mut Solution) -> TabuPhase {
        let initial_cost = solution.total_cost();
        let mut best = solution.clone();
        let mut best_cost = initial_cost;
        let mut stale = 0;
        let mut phase = TabuPhase {
            steps: 0,
            moves: 0,
            initial_cost,
            final_cost: initial_cost,
        };

        while phase.steps < self.max_steps {
            phase.steps += 1;
            if self.step(solution, best_cost).is_some() {
                phase.moves += 1;
            }
            if solution.total_cost() < best_cost {
                best_cost = solution.total_cost();
                best = solution.clone();
                stale = 0;
            } else {
                stale += 1;
                if stale >= self.max_no_improve {
                    break;
                }
            }
        }

        if solution.total_cost() > best_cost {
            *solution = best;
        }
        phase.final_cost = solution.total_cost();
        phase
    }

    /// Every feasible move of the configured kinds, in generation order.
    fn candidates(&self, solution: &Solution) -> Vec<InterchangeMove> {
        let owner = self.near.as_ref().map(|_| owners(solution, self.graph.len()));
        let n = solution.num_routes();
        let mut out = Vec::new();
        for kind in &self.kinds {
            let symmetric = kind.take_a() == kind.take_b();
            // (0, 1) over (a, b) is (1, 0) over (b, a).
            let mirrored = kind.take_a() < kind.take_b()
                && self
                    .kinds
                    .iter()
                    .any(|k| k.take_a() == kind.take_b() && k.take_b() == kind.take_a());
            if mirrored {
                continue;
            }
            for a in 0..n {
                for b in 0..n {
                    if a == b || (symmetric && b < a) {
                        continue;
                    }
                    kind.for_each_move(solution, self.graph, a, b, |mv| {
                        if self.is_granular(solution, owner.as_deref(), &mv) {
                            out.push(mv);
                        }
                    });
                }
            }
        }
        out
    }

    fn is_granular(
        &self,
        solution: &Solution,
        owner: Option<&[Option<usize>]>,
        mv: &InterchangeMove,
    ) -> bool {
        let (Some(near), Some(owner)) = (self.near.as_ref(), owner) else {
            return true;
        };
        let enters = |seq: &[usize], pos: usize, take: usize, target: usize| {
            if take == 0 || solution.route(target).is_empty() {
                return true;
            }
            near[seq[pos]].iter().any(|&x| owner[x] == Some(target))
        };
        let sa = solution.route(mv.route_a).customers();
        let sb = solution.route(mv.route_b).customers();
        enters(sa, mv.pos_a, mv.kind.take_a(), mv.route_b)
            && enters(sb, mv.pos_b, mv.kind.take_b(), mv.route_a)
    }

    /// Arcs of the two touched routes before the move, and the arcs the move
    /// would create.
    fn arc_changes(
        &self,
        solution: &Solution,
        mv: &InterchangeMove,
    ) -> (Vec<MoveSignature>, Vec<MoveSignature>) {
        let old = touched_arcs(solution, mv);
        let old_set: HashSet<MoveSignature> = old.iter().copied().collect();
        let (new_a, new_b) = mv.sequences(solution);
        let created = MoveSignature::arcs_of(&new_a)
            .into_iter()
            .chain(MoveSignature::arcs_of(&new_b))
            .filter(|arc| !old_set.contains(arc))
            .collect();
        (old, created)
    }
}

/// Arcs of the two routes a move touches.
fn touched_arcs(solution: &Solution, mv: &InterchangeMove) -> Vec<MoveSignature> {
    let mut arcs = MoveSignature::arcs_of(solution.route(mv.route_a).customers());
    arcs.extend(MoveSignature::arcs_of(solution.route(mv.route_b).customers()));
    arcs
}

/// Route index of every vertex, `None` for the depot and unserved vertices.
fn owners(solution: &Solution, num_vertices: usize) -> Vec<Option<usize>> {
    let mut owner = vec![None; num_vertices];
    for (r, route) in solution.routes().iter().enumerate() {
        for &c in route.customers() {
            owner[c] = Some(r);
        }
    }
    owner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{Customer, Fleet};

    fn clusters() -> Graph {
        Graph::from_customers(vec![
            Customer::depot("D", 0, 0),
            Customer::new("E1", 10, 1, 10, 0),
            Customer::new("W1", -10, -1, 10, 0),
            Customer::new("E2", 10, -1, 10, 0),
            Customer::new("W2", -10, 1, 10, 0),
            Customer::new("N1", 1, 12, 10, 0),
            Customer::new("N2", -1, 12, 10, 0),
        ])
    }

    fn solution_with(graph: &Graph, fleet: Fleet, routes: &[&[usize]]) -> Solution {
        let evaluator = RouteEvaluator::new(graph, &fleet);
        let mut sol = Solution::new(fleet);
        for (i, r) in routes.iter().enumerate() {
            evaluator.assign(&mut sol, i, r.to_vec());
        }
        sol
    }

    fn config(steps: usize, tenure: usize) -> TabuConfig {
        TabuConfig::default()
            .with_max_iterations(steps)
            .with_tabu_tenure(tenure)
            .with_max_no_improve(steps)
    }

    #[test]
    fn test_step_takes_best_move() {
        let graph = clusters();
        let fleet = Fleet::new(3, 20, 1000);
        let mut sol = solution_with(&graph, fleet, &[&[1, 4], &[3, 2], &[5, 6]]);
        let before = sol.total_cost();
        let mut search = TabuSearch::new(&graph, &config(1, 5));
        let step = search.step(&mut sol, before).expect("a swap exists");
        assert!(step.applied.delta < 0);
        assert!(!step.aspired);
        assert_eq!(sol.total_cost(), before + step.applied.delta);
        assert!(sol.is_partition(graph.len()));
        assert_eq!(search.round(), 1);
        assert!(!search.memory().is_empty());
    }

    #[test]
    fn test_step_without_moves_advances_round() {
        let graph = clusters();
        let fleet = Fleet::new(1, 100, 1000);
        let mut sol = solution_with(&graph, fleet, &[&[1, 2, 3, 4, 5, 6]]);
        let snapshot = sol.clone();
        let mut search = TabuSearch::new(&graph, &config(1, 5));
        let cost = sol.total_cost();
        assert!(search.step(&mut sol, cost).is_none());
        assert_eq!(search.round(), 1);
        assert_eq!(sol, snapshot);
    }

    #[test]
    fn test_step_at_local_optimum_is_noop() {
        let graph = clusters();
        let fleet = Fleet::new(3, 20, 1000);
        let mut sol = solution_with(&graph, fleet, &[&[1, 3], &[2, 4], &[5, 6]]);
        let snapshot = sol.clone();
        let cost = sol.total_cost();
        let mut search = TabuSearch::new(&graph, &config(1, 5));
        assert!(search.step(&mut sol, cost).is_none());
        assert_eq!(search.round(), 1);
        assert!(search.memory().is_empty());
        assert_eq!(sol, snapshot);

        let mut walker = TabuSearch::new(&graph, &config(1, 5)).with_worsening(true);
        let step = walker.step(&mut sol, cost).expect("a feasible move exists");
        assert!(step.applied.delta >= 0);
        assert_eq!(sol.total_cost(), cost + step.applied.delta);
        assert!(sol.is_partition(graph.len()));
    }

    #[test]
    fn test_mirrored_kinds_scored_once() {
        let graph = clusters();
        let fleet = Fleet::new(3, 30, 1000);
        let sol = solution_with(&graph, fleet, &[&[1, 2], &[3, 4], &[5, 6]]);
        let relocations = TabuSearch::new(&graph, &config(1, 3))
            .with_kinds(&[Interchange::OPT10])
            .candidates(&sol);
        let both = TabuSearch::new(&graph, &config(1, 3))
            .with_kinds(&[Interchange::OPT10, Interchange::OPT01])
            .candidates(&sol);
        assert!(!relocations.is_empty());
        assert_eq!(both, relocations);
    }

    #[test]
    fn test_steps_respect_tabu_memory() {
        let graph = clusters();
        let fleet = Fleet::new(3, 30, 1000);
        let mut sol = solution_with(&graph, fleet, &[&[1, 2], &[3, 4], &[5, 6]]);
        let mut search = TabuSearch::new(&graph, &config(1, 4))
            .with_aspiration(false)
            .with_worsening(true);
        for _ in 0..20 {
            let memory = search.memory().clone();
            let before = sol.clone();
            let Some(step) = search.step(&mut sol, i64::MIN) else {
                continue;
            };
            let old: HashSet<MoveSignature> = before
                .routes()
                .iter()
                .flat_map(|r| MoveSignature::arcs_of(r.customers()))
                .collect();
            for r in [step.applied.route_a, step.applied.route_b] {
                for arc in MoveSignature::arcs_of(sol.route(r).customers()) {
                    assert!(old.contains(&arc) || !memory.is_tabu(arc), "tabu arc {arc:?} re-created");
                }
            }
            assert!(sol.is_partition(graph.len()));
            assert!(sol.is_feasible());
        }
    }

    #[test]
    fn test_aspiration_admits_new_best() {
        let graph = clusters();
        let fleet = Fleet::new(3, 20, 1000);
        let mut sol = solution_with(&graph, fleet, &[&[1, 4], &[3, 2], &[5, 6]]);
        let mut search = TabuSearch::new(&graph, &config(1, 10));
        // Forbid every arc the improving swaps could create.
        for u in 0..graph.len() {
            for v in 0..graph.len() {
                if u != v {
                    search.memory.record(MoveSignature::new(u, v));
                }
            }
        }
        let best = sol.total_cost();
        let step = search.step(&mut sol, best).expect("aspiration admits the swap");
        assert!(step.aspired);
        assert!(sol.total_cost() < best);

        let mut strict = TabuSearch::new(&graph, &config(1, 10)).with_aspiration(false);
        strict.memory = search.memory.clone();
        let mut sol = solution_with(&graph, fleet, &[&[1, 4], &[3, 2], &[5, 6]]);
        let best = sol.total_cost();
        assert!(strict.step(&mut sol, best).is_none());
    }

    #[test]
    fn test_run_never_worsens() {
        let graph = clusters();
        let fleet = Fleet::new(3, 30, 1000);
        let mut sol = solution_with(&graph, fleet, &[&[1, 5], &[3, 2], &[6, 4]]);
        let before = sol.total_cost();
        let mut search = TabuSearch::new(&graph, &config(30, 3));
        let phase = search.run(&mut sol);
        assert_eq!(phase.initial_cost, before);
        assert!(phase.final_cost <= before);
        assert_eq!(phase.final_cost, sol.total_cost());
        assert!(phase.improvement() > 0);
        assert!(sol.is_partition(graph.len()));
        assert!(sol.is_feasible());
        let evaluator = RouteEvaluator::new(&graph, &fleet);
        assert!(evaluator.is_consistent(&sol));
    }

    #[test]
    fn test_run_stops_when_stale() {
        let graph = clusters();
        let fleet = Fleet::new(1, 100, 1000);
        let mut sol = solution_with(&graph, fleet, &[&[1, 2, 3, 4, 5, 6]]);
        let cfg = config(50, 3).with_max_no_improve(4);
        let mut search = TabuSearch::new(&graph, &cfg);
        let phase = search.run(&mut sol);
        assert_eq!(phase.steps, 4);
        assert_eq!(phase.moves, 0);
    }

    #[test]
    fn test_granular_candidates_are_subset() {
        let graph = clusters();
        let fleet = Fleet::new(3, 30, 1000);
        let sol = solution_with(&graph, fleet, &[&[1, 2], &[3, 4], &[5, 6]]);
        let full = TabuSearch::new(&graph, &config(1, 3)).candidates(&sol);
        let granular = TabuSearch::new(&graph, &config(1, 3))
            .with_candidate_neighbors(1)
            .candidates(&sol);
        assert!(granular.len() < full.len());
        assert!(granular.iter().all(|mv| full.contains(mv)));
    }
}
