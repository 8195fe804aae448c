//! Constructive heuristic for building the initial CVRP solution.
//!
//! - [`init_solutions`] — Seed-and-extend nearest neighbor over the fleet, O(n² log n)

mod nearest_neighbor;

pub use nearest_neighbor::{init_solutions, ConstructionOutcome};
