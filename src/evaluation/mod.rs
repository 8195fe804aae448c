//! Route evaluation.
//!
//! Turns customer sequences into route aggregates (load, duration, cost) and
//! reports capacity and work-time violations.

mod evaluator;

pub use evaluator::{route_cost, RouteEvaluator};
