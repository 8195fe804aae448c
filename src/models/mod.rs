//! Domain model types for capacitated vehicle routing.
//!
//! Provides the core abstractions: customers with demand and service time,
//! a homogeneous fleet, routes as ordered customer sequences with cached
//! aggregates, solutions as one route per vehicle, and the instance and
//! plan types exchanged with the outside world.

mod customer;
mod fleet;
mod plan;
mod problem;
mod route;
mod solution;

pub use customer::Customer;
pub use fleet::Fleet;
pub use plan::{PlannedRoute, RoutingPlan};
pub use problem::{CostEntry, Instance, InstanceProvider, OutputSink};
pub(crate) use problem::{check_complete, validate_fleet};
pub use route::{Route, RouteMetrics};
pub use solution::{Solution, Violation, ViolationType};
