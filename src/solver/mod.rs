//! End-to-end CVRP optimization.
//!
//! - [`Solver`] — construction, tabu phases and operator phases on a graph
//! - [`run`] — the same, wired between an input provider and an output sink
//! - [`SolverConfig`] — round counts and tabu parameters

mod config;
mod driver;

pub use config::{default_tenure, SolverConfig};
pub use driver::{run, SolveReport, Solver};
