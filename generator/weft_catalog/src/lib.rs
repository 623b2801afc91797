//! Type Descriptor Catalog for the weft copy-dispatch generator
//!
//! The catalog is the read-only input of a generation run: one record per
//! concrete (backend, scalar, density) instantiation of the weft type
//! matrix. Records are externally supplied (typically as JSON) and
//! validated once; every downstream component consumes them immutably.
//!
//! # Architecture
//!
//! ```text
//! Vec<TypeDescriptor> (input)
//!        ↓
//!   Catalog::new     (invariant validation, fail-fast)
//!        ↓
//!   &Catalog         (shared read-only by dispatch + codegen)
//! ```

mod catalog;
mod descriptor;
mod error;

pub use catalog::Catalog;
pub use descriptor::{Backend, Density, ScalarKind, TypeDescriptor, TypeId};
pub use error::CatalogError;
