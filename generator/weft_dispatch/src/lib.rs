//! Copy-Strategy Classification for the weft type matrix
//!
//! Given the validated catalog, this crate decides which copy strategy the
//! generated code takes for every ordered (source, destination) pair, and
//! assembles those decisions into per-anchor dispatch tables.
//! It owns every dispatch decision and emits no text; `weft_codegen`
//! renders the tables it produces.
//!
//! # Architecture
//!
//! ```text
//! &Catalog
//!     ↓
//! classify(src, dst, direction)   (pure; one strategy or a skip)
//!     ↓
//! destination_table / reverse_table
//!     ↓
//! DispatchTable                   (TypeId-keyed cases + one fallback)
//! ```
//!
//! Two invariants are load-bearing and explicit in the types:
//!
//! - A pair is either skipped or classified to exactly one strategy.
//! - Only a destination-anchored table over a Host-dense anchor may carry
//!   `Fallback::Redispatch`; reverse tables always fall back to
//!   `Fallback::Unsupported`, so dispatch terminates after at most one hop.

mod classify;
mod strategy;
mod table;

pub use classify::{classify, Direction};
pub use strategy::{Classified, CopyStrategy, DispatchEntry, Fallback, SkipReason};
pub use table::{destination_table, reverse_table, DispatchTable, ReverseTable, TableError};
