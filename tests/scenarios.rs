mod common;

use common::{solution_with, RecordingLog};
use u_cvrp::constructive::{init_solutions, ConstructionOutcome};
use u_cvrp::error::SolveError;
use u_cvrp::graph::Graph;
use u_cvrp::local_search::{opt11, opt2};
use u_cvrp::log::LogLevel;
use u_cvrp::models::{CostEntry, Customer, Fleet, Instance, RoutingPlan};
use u_cvrp::solver::{run, Solver, SolverConfig};

fn square() -> Graph {
    Graph::from_customers(vec![
        Customer::depot("D", 0, 0),
        Customer::new("A", 0, 10, 5, 0),
        Customer::new("B", 10, 10, 5, 0),
        Customer::new("C", 10, 0, 5, 0),
    ])
}

#[test]
fn test_single_vehicle_square() {
    let graph = square();
    let fleet = Fleet::new(1, 15, 1000);
    let (solution, outcome) = init_solutions(&graph, &fleet).unwrap();
    assert_eq!(outcome, ConstructionOutcome::Complete);
    assert_eq!(solution.route(0).len(), 3);
    assert!(solution.is_partition(graph.len()));

    // Out of geometric order: A, C, B crosses the square.
    let mut crossed = solution_with(&graph, fleet, &[vec![1, 3, 2]]);
    assert_eq!(crossed.total_cost(), 48);
    assert!(opt2(&mut crossed, &graph));
    assert_eq!(crossed.total_cost(), 40);
}

#[test]
fn test_swap_between_two_routes() {
    let graph = Graph::from_customers(vec![
        Customer::depot("D", 0, 0),
        Customer::new("E1", 10, 1, 10, 0),
        Customer::new("W1", -10, -1, 10, 0),
        Customer::new("E2", 10, -1, 10, 0),
        Customer::new("W2", -10, 1, 10, 0),
    ]);
    let fleet = Fleet::new(2, 20, 1000);
    let mut solution = solution_with(&graph, fleet, &[vec![1, 4], vec![3, 2]]);
    assert_eq!(solution.total_cost(), 80);

    assert!(opt11(&mut solution, &graph));
    // One route per side: 10 + 2 + 10 each.
    assert_eq!(solution.total_cost(), 44);
    assert!(solution.is_feasible());
    assert!(solution.is_partition(graph.len()));
}

#[test]
fn test_fleet_larger_than_needed() {
    let graph = Graph::from_customers(vec![
        Customer::depot("D", 0, 0),
        Customer::new("A", 1, 0, 10, 0),
        Customer::new("B", 2, 0, 10, 0),
        Customer::new("C", 3, 0, 10, 0),
        Customer::new("E", 4, 0, 10, 0),
    ]);
    let fleet = Fleet::new(5, 20, 1000);

    let (initial, outcome) = init_solutions(&graph, &fleet).unwrap();
    assert_eq!(outcome, ConstructionOutcome::TooManyVehicles { empty_routes: 3 });
    assert!(initial.is_partition(graph.len()));

    let log = RecordingLog::default();
    let report = Solver::new(&graph, fleet).with_log(&log).solve().unwrap();
    assert_eq!(
        report.construction,
        ConstructionOutcome::TooManyVehicles { empty_routes: 3 }
    );
    assert!(log.count(LogLevel::Warning) >= 1);
    assert!(report.solution.is_partition(graph.len()));
    assert_eq!(report.solution.num_empty_routes(), 3);
    assert_eq!(report.final_cost, 12);
}

#[test]
fn test_demand_exceeds_fleet() {
    let graph = square();
    let fleet = Fleet::new(1, 10, 1000);
    assert!(matches!(
        init_solutions(&graph, &fleet),
        Err(SolveError::InfeasibleFleet { unassigned: 1, vehicles: 1 })
    ));

    let log = RecordingLog::default();
    let err = Solver::new(&graph, fleet).with_log(&log).solve().unwrap_err();
    assert!(matches!(err, SolveError::InfeasibleFleet { .. }));
    assert_eq!(log.count(LogLevel::Error), 1);
    assert!(!log.contains("opt round"));
    assert!(!log.contains("Total improvement"));
}

#[test]
fn test_run_aborts_without_output() {
    let graph = square();
    let mut costs = Vec::new();
    for i in 0..graph.len() {
        for j in 0..graph.len() {
            if i != j {
                costs.push(CostEntry::new(i, j, graph.weight(i, j)));
            }
        }
    }
    let instance = Instance {
        customers: graph.customers().to_vec(),
        costs,
        fleet: Fleet::new(1, 10, 1000),
    };
    let mut plans: Vec<RoutingPlan> = Vec::new();
    let log = RecordingLog::default();
    let result = run(&instance, &mut plans, &log, Some(SolverConfig::for_customers(3)));
    assert!(matches!(result, Err(SolveError::InfeasibleFleet { .. })));
    assert!(plans.is_empty());
}

#[test]
fn test_solver_logs_before_and_after() {
    let graph = square();
    let log = RecordingLog::default();
    let report = Solver::new(&graph, Fleet::new(1, 15, 1000))
        .with_log(&log)
        .solve()
        .unwrap();
    assert_eq!(report.final_cost, 40);
    assert_eq!(log.count(LogLevel::Success), 1);
    assert!(log.contains("Total improvement"));
    // Route listing before and after optimization.
    assert!(log.count(LogLevel::Verbose) >= 2);
}
