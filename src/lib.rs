//! # u-cvrp
//!
//! Capacitated vehicle routing optimization: a nearest-neighbor constructor
//! followed by tabu search and λ-interchange / 2-opt / 3-opt local search,
//! with capacity and work-time limits per vehicle.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, Fleet, Route, Solution, Instance)
//! - [`graph`] — Customer arena with directed travel costs
//! - [`evaluation`] — Route aggregates and feasibility checking
//! - [`constructive`] — Initial solution construction
//! - [`local_search`] — λ-interchange, 2-opt, 3-opt and route balancing
//! - [`tabu`] — Tabu search over interchange moves
//! - [`solver`] — Driver sequencing all phases
//! - [`log`] — Leveled log sink backed by `tracing`
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use u_cvrp::graph::Graph;
//! use u_cvrp::models::{Customer, Fleet};
//! use u_cvrp::solver::Solver;
//!
//! let graph = Graph::from_customers(vec![
//!     Customer::depot("D", 0, 0),
//!     Customer::new("A", 0, 10, 5, 1),
//!     Customer::new("B", 10, 10, 5, 1),
//!     Customer::new("C", 10, 0, 5, 1),
//! ]);
//! let report = Solver::new(&graph, Fleet::new(1, 20, 100)).solve()?;
//! assert_eq!(report.final_cost, 40);
//! # Ok::<(), u_cvrp::error::SolveError>(())
//! ```

pub mod constructive;
pub mod error;
pub mod evaluation;
pub mod graph;
pub mod local_search;
pub mod log;
pub mod models;
pub mod solver;
pub mod tabu;
