//! Optimization driver.
//!
//! # Algorithm
//!
//! 1. Build the initial solution with [`init_solutions`].
//! 2. For every outer round:
//!    - run a tabu phase ([`TabuSearch::run`]);
//!    - run an operator phase: balance, then up to `opt_rounds` inner
//!      iterations, then balance again.
//! 3. Report initial and final cost.
//!
//! An inner iteration tries the λ-interchange operators in the order
//! `opt10, opt01, opt11, opt12, opt21, opt22` and stops at the first that
//! applies, then runs `opt2` and `opt3`. The phase ends early when an
//! iteration changes nothing, so a 2-opt/3-opt improvement alone is enough
//! to give the interchanges another try.

use super::config::SolverConfig;
use crate::constructive::{init_solutions, ConstructionOutcome};
use crate::error::SolveError;
use crate::graph::Graph;
use crate::local_search::{balance_routes, opt2, opt3, BalanceOutcome, Interchange};
use crate::log::{LogLevel, LogSink, NullLog};
use crate::models::{
    check_complete, validate_fleet, Fleet, InstanceProvider, OutputSink, RoutingPlan, Solution,
};
use crate::tabu::TabuSearch;

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// The optimized solution.
    pub solution: Solution,
    /// How construction went.
    pub construction: ConstructionOutcome,
    /// Outcome of the last balancing pass.
    pub balance: BalanceOutcome,
    /// Cost of the constructed solution.
    pub initial_cost: i64,
    /// Cost of the optimized solution.
    pub final_cost: i64,
}

impl SolveReport {
    /// Absolute cost reduction.
    pub fn improvement(&self) -> i64 {
        self.initial_cost - self.final_cost
    }

    /// Cost reduction as a percentage of the initial cost (0 when the
    /// initial cost is 0).
    pub fn improvement_percent(&self) -> f64 {
        if self.initial_cost == 0 {
            return 0.0;
        }
        self.improvement() as f64 / self.initial_cost as f64 * 100.0
    }
}

/// Sequences construction, tabu search and local search on one graph.
///
/// # Examples
///
/// ```
/// use u_cvrp::graph::Graph;
/// use u_cvrp::models::{Customer, Fleet};
/// use u_cvrp::solver::Solver;
///
/// let graph = Graph::from_customers(vec![
///     Customer::depot("D", 0, 0),
///     Customer::new("E1", 10, 1, 10, 0),
///     Customer::new("W1", -10, -1, 10, 0),
///     Customer::new("E2", 10, -1, 10, 0),
///     Customer::new("W2", -10, 1, 10, 0),
/// ]);
///
/// let report = Solver::new(&graph, Fleet::new(2, 20, 1000)).solve().unwrap();
/// assert!(report.final_cost <= report.initial_cost);
/// assert!(report.solution.is_feasible());
/// ```
pub struct Solver<'a, L = NullLog> {
    graph: &'a Graph,
    fleet: Fleet,
    config: SolverConfig,
    log: L,
}

impl<'a> Solver<'a, NullLog> {
    /// Creates a silent solver configured for the graph's customer count.
    pub fn new(graph: &'a Graph, fleet: Fleet) -> Self {
        Self {
            graph,
            fleet,
            config: SolverConfig::for_customers(graph.num_customers()),
            log: NullLog,
        }
    }
}

impl<'a, L: LogSink> Solver<'a, L> {
    /// Replaces the log sink.
    pub fn with_log<M: LogSink>(self, log: M) -> Solver<'a, M> {
        Solver {
            graph: self.graph,
            fleet: self.fleet,
            config: self.config,
            log,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs the whole optimization.
    ///
    /// Fails before any optimization if the fleet or graph is invalid, and
    /// with [`SolveError::InfeasibleFleet`] if construction cannot place
    /// every customer.
    pub fn solve(&self) -> Result<SolveReport, SolveError> {
        validate_fleet(&self.fleet)?;
        check_complete(self.graph)?;
        let n = self.graph.num_customers();

        self.log.log(LogLevel::Info, "Initializing...");
        let (mut solution, construction) = match init_solutions(self.graph, &self.fleet) {
            Ok(built) => built,
            Err(e) => {
                self.log.log(LogLevel::Error, &e.to_string());
                return Err(e);
            }
        };
        match construction {
            ConstructionOutcome::Complete => {
                self.log.log(LogLevel::Success, "initial solution uses every vehicle")
            }
            ConstructionOutcome::TooManyVehicles { empty_routes } => self.log.log(
                LogLevel::Warning,
                &format!("fleet is larger than needed: {empty_routes} vehicles unused"),
            ),
        }

        let initial_cost = solution.total_cost();
        self.log_routes(&solution);

        let mut search = TabuSearch::new(self.graph, &self.config.tabu);
        if let Some(k) = self.config.candidate_neighbors {
            search = search.with_candidate_neighbors(k);
        }
        let outer = self.config.outer_rounds.unwrap_or(n);
        let inner = self.config.opt_rounds.unwrap_or(n);

        let mut balance = BalanceOutcome::Balanced;
        for round in 0..outer {
            let phase = search.run(&mut solution);
            self.log.log(
                LogLevel::Verbose,
                &format!("round {round}: tabu search improved {}", phase.improvement()),
            );
            balance = self.opt_phase(&mut solution, inner);
        }

        let final_cost = solution.total_cost();
        let report = SolveReport {
            solution,
            construction,
            balance,
            initial_cost,
            final_cost,
        };
        self.log_routes(&report.solution);
        self.log.log(
            LogLevel::Info,
            &format!(
                "Total improvement: {} ({:.2}%)",
                report.improvement(),
                report.improvement_percent()
            ),
        );
        Ok(report)
    }

    /// Balance, interchange/2-opt/3-opt iterations, balance.
    fn opt_phase(&self, solution: &mut Solution, rounds: usize) -> BalanceOutcome {
        self.balance(solution);
        for i in 0..rounds {
            let before = solution.total_cost();
            let interchanged = Interchange::ALL
                .iter()
                .any(|op| op.improve(solution, self.graph));
            // Both edge-exchange operators run every iteration.
            let reversed = opt2(solution, self.graph);
            let reconnected = opt3(solution, self.graph);
            if !(interchanged || reversed || reconnected) {
                break;
            }
            debug_assert!(solution.total_cost() < before);
            self.log.log(
                LogLevel::Verbose,
                &format!("opt round {i}: cost {}", solution.total_cost()),
            );
        }
        self.balance(solution)
    }

    fn balance(&self, solution: &mut Solution) -> BalanceOutcome {
        let outcome = balance_routes(solution, self.graph);
        if let BalanceOutcome::Infeasible { routes } = &outcome {
            self.log.log(
                LogLevel::Warning,
                &format!("routes {routes:?} remain over capacity or work time"),
            );
        }
        outcome
    }

    fn log_routes(&self, solution: &Solution) {
        let depot = self.graph.customer(0).name();
        for route in solution.routes() {
            let stops: Vec<&str> = route
                .customers()
                .iter()
                .map(|&c| self.graph.customer(c).name())
                .collect();
            self.log.log(
                LogLevel::Verbose,
                &format!(
                    "vehicle {}: {depot} -> {} -> {depot} (load {}, duration {}, cost {})",
                    route.vehicle_id(),
                    stops.join(" -> "),
                    route.load(),
                    route.duration(),
                    route.cost()
                ),
            );
        }
        self.log.log(
            LogLevel::Info,
            &format!("Total cost: {}", solution.total_cost()),
        );
    }
}

/// Runs the solver between an input provider and an output sink.
///
/// With `config == None` the configuration is sized for the instance via
/// [`SolverConfig::for_customers`].
///
/// # Examples
///
/// ```
/// use u_cvrp::log::NullLog;
/// use u_cvrp::models::{CostEntry, Customer, Fleet, Instance, RoutingPlan};
/// use u_cvrp::solver::run;
///
/// let instance = Instance {
///     customers: vec![Customer::depot("D", 0, 0), Customer::new("A", 3, 4, 1, 0)],
///     costs: vec![CostEntry::new(0, 1, 5), CostEntry::new(1, 0, 5)],
///     fleet: Fleet::new(1, 10, 100),
/// };
/// let mut plans: Vec<RoutingPlan> = Vec::new();
/// let report = run(&instance, &mut plans, NullLog, None).unwrap();
/// assert_eq!(report.final_cost, 10);
/// assert_eq!(plans[0].routes[0].customers, vec!["A".to_string()]);
/// ```
pub fn run<P, S, L>(
    provider: &P,
    sink: &mut S,
    log: L,
    config: Option<SolverConfig>,
) -> Result<SolveReport, SolveError>
where
    P: InstanceProvider + ?Sized,
    S: OutputSink + ?Sized,
    L: LogSink,
{
    let instance = provider.provide()?;
    let graph = match instance.build_graph() {
        Ok(graph) => graph,
        Err(e) => {
            log.log(LogLevel::Error, &e.to_string());
            return Err(e.into());
        }
    };
    let config = config.unwrap_or_else(|| SolverConfig::for_customers(graph.num_customers()));
    let report = Solver::new(&graph, instance.fleet)
        .with_log(&log)
        .with_config(config)
        .solve()?;
    sink.accept(&RoutingPlan::from_solution(&report.solution, &graph));
    Ok(report)
}
