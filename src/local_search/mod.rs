//! Local search operators for improving CVRP solutions.
//!
//! - [`Interchange`] — λ-interchange between two routes (`opt10` ... `opt22`)
//! - [`opt2`] / [`two_opt_improve`] — Intra-route 2-opt edge reversal
//! - [`opt3`] / [`three_opt_improve`] — Intra-route 3-opt reconnection
//! - [`balance_routes`] — Capacity and work-time repair
//!
//! Every operator mutates a [`Solution`](crate::models::Solution) only
//! through [`RouteEvaluator::assign`](crate::evaluation::RouteEvaluator::assign),
//! so route metrics and the cached total cost stay consistent.

mod balance;
mod interchange;
mod three_opt;
mod tour;
mod two_opt;

pub use balance::{balance_routes, BalanceOutcome};
pub use interchange::{opt01, opt10, opt11, opt12, opt21, opt22, Interchange, InterchangeMove};
pub use three_opt::{opt3, three_opt_improve};
pub use two_opt::{opt2, two_opt_improve};
