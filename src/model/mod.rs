//! In-memory representation of a scanned software inventory.
//!
//! The scanner fills in files, packages and (optionally) previously known
//! licenses and relationships. The [`pipeline`](crate::pipeline) then derives
//! the normalized fields: license expressions, the license catalog, SPDX
//! identifiers and the relationship graph.

mod inventory;
mod license;

pub use inventory::*;
pub use license::*;
