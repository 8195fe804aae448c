//! Tabu search for CVRP.
//!
//! A trajectory search over λ-interchange moves that forbids re-creating
//! recently broken arcs, so it can walk through worse solutions without
//! cycling back.
//!
//! - [`TabuMemory`] / [`MoveSignature`] — arc-based short-term memory
//! - [`TabuSearch`] — step selection with aspiration and phase runs
//!
//! Tenure, aspiration and phase bounds come from
//! [`u_metaheur::tabu::TabuConfig`].
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod memory;
mod search;

pub use memory::{MoveSignature, TabuMemory};
pub use search::{TabuPhase, TabuSearch, TabuStep};
