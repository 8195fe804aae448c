#![allow(dead_code)]

use std::cell::RefCell;

use rand::Rng;
use u_cvrp::evaluation::RouteEvaluator;
use u_cvrp::graph::Graph;
use u_cvrp::log::{LogLevel, LogSink};
use u_cvrp::models::{Customer, Fleet, Solution};

/// Log sink that keeps every message.
#[derive(Debug, Default)]
pub struct RecordingLog {
    pub entries: RefCell<Vec<(LogLevel, String)>>,
}

impl RecordingLog {
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.borrow().iter().any(|(_, m)| m.contains(needle))
    }
}

impl LogSink for RecordingLog {
    fn log(&self, level: LogLevel, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

/// Depot at the center of a 100x100 grid plus `n` random customers.
pub fn random_graph(seed: u64, n: usize, max_demand: i32, max_service: i64) -> Graph {
    let mut rng = u_numflow::random::create_rng(seed);
    let mut customers = vec![Customer::depot("depot", 50, 50)];
    for i in 1..=n {
        customers.push(Customer::new(
            format!("c{i}"),
            rng.random_range(0..100),
            rng.random_range(0..100),
            rng.random_range(1..=max_demand),
            rng.random_range(0..=max_service),
        ));
    }
    Graph::from_customers(customers)
}

/// Solution from explicit customer sequences, one per vehicle.
pub fn solution_with(graph: &Graph, fleet: Fleet, routes: &[Vec<usize>]) -> Solution {
    let evaluator = RouteEvaluator::new(graph, &fleet);
    let mut solution = Solution::new(fleet);
    for (i, seq) in routes.iter().enumerate() {
        evaluator.assign(&mut solution, i, seq.clone());
    }
    solution
}

/// Deals customers round-robin onto `vehicles` routes, ignoring limits.
pub fn round_robin(graph: &Graph, fleet: Fleet) -> Solution {
    let mut routes = vec![Vec::new(); fleet.vehicles()];
    for c in 1..graph.len() {
        routes[(c - 1) % fleet.vehicles()].push(c);
    }
    solution_with(graph, fleet, &routes)
}
