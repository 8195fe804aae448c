//! Weighted customer graph.
//!
//! Provides the index-addressed customer arena with directed travel costs,
//! plus the sorted neighborhood queries used to seed construction and
//! candidate lists.

mod weighted;

pub use weighted::{Graph, UNREACHABLE};
