//! C++ Emission Backend for the weft copy-dispatch generator
//!
//! Renders the dispatch tables built by `weft_dispatch` into one C++
//! compilation unit per backend:
//!
//! ```text
//! &Catalog + Backend
//!        ↓
//!   destination_table / reverse_table   (weft_dispatch)
//!        ↓
//!   emit_forward / emit_reverse         (per-type functions)
//!        ↓
//!   generate                            (includes + namespace + functions)
//! ```
//!
//! Emission is a pure function of its inputs: generating the same backend
//! twice from the same catalog produces byte-identical output.

mod context;
mod function;
mod unit;

pub use context::EmitContext;
pub use unit::generate;

use thiserror::Error;
use weft_catalog::Backend;
use weft_dispatch::TableError;

/// Generation failure. No partial output is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    #[error("catalog has no dense {backend} entries to generate a unit for")]
    NoBackendEntries { backend: Backend },

    #[error(transparent)]
    Table(#[from] TableError),
}
