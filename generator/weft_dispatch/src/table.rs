//! Dispatch-table builders.
//!
//! A table is keyed by `TypeId` so correctness cannot depend on catalog
//! order; the order vector exists only to make emission deterministic.
//! Key collisions are impossible for a validated catalog and are still
//! reported rather than silently overwritten.

use rustc_hash::FxHashMap;
use thiserror::Error;
use weft_catalog::{Catalog, TypeDescriptor, TypeId};

use crate::classify::{classify, Direction};
use crate::strategy::{Classified, DispatchEntry, Fallback};

/// Table construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("dispatch table for `{anchor}` already has a case for type id {type_id}")]
    DuplicateCase { anchor: String, type_id: TypeId },

    #[error("`{anchor}` is sparse and cannot anchor a dispatch table")]
    SparseAnchor { anchor: String },
}

/// Case set for one anchor type, plus its fallback action.
#[derive(Clone, Debug)]
pub struct DispatchTable<'a> {
    anchor: &'a TypeDescriptor,
    order: Vec<TypeId>,
    entries: FxHashMap<TypeId, DispatchEntry<'a>>,
    fallback: Fallback,
}

impl<'a> DispatchTable<'a> {
    fn new(anchor: &'a TypeDescriptor, fallback: Fallback) -> Self {
        Self {
            anchor,
            order: Vec::new(),
            entries: FxHashMap::default(),
            fallback,
        }
    }

    fn insert(&mut self, key: TypeId, entry: DispatchEntry<'a>) -> Result<(), TableError> {
        if self.entries.insert(key, entry).is_some() {
            return Err(TableError::DuplicateCase {
                anchor: self.anchor.display_name.clone(),
                type_id: key,
            });
        }
        self.order.push(key);
        Ok(())
    }

    #[must_use]
    pub fn anchor(&self) -> &'a TypeDescriptor {
        self.anchor
    }

    #[must_use]
    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: TypeId) -> Option<&DispatchEntry<'a>> {
        self.entries.get(&key)
    }

    /// Entries in catalog order, paired with their case label.
    pub fn cases(&self) -> impl Iterator<Item = (TypeId, &DispatchEntry<'a>)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|entry| (*key, entry)))
    }
}

/// Build the destination-anchored table for `destination`.
///
/// Iterates the whole catalog as candidate sources and keys each emitted
/// case by the source's `type_id`. Host-dense destinations fall back to a
/// redispatch through the source's reverse entry; everything else fails
/// with a diagnostic, since redispatching again could recurse.
pub fn destination_table<'a>(
    catalog: &'a Catalog,
    destination: &'a TypeDescriptor,
) -> Result<DispatchTable<'a>, TableError> {
    if destination.is_sparse() {
        return Err(TableError::SparseAnchor {
            anchor: destination.display_name.clone(),
        });
    }

    let fallback = if destination.is_host_dense() {
        Fallback::Redispatch
    } else {
        Fallback::Unsupported
    };

    let mut table = DispatchTable::new(destination, fallback);
    for source in catalog.entries() {
        match classify(source, destination, Direction::Forward) {
            Classified::Skip(_) => {}
            Classified::Emit(entry) => table.insert(source.type_id, entry)?,
        }
    }

    tracing::debug!(
        anchor = %destination.display_name,
        cases = table.len(),
        fallback = ?table.fallback(),
        "built destination table"
    );
    Ok(table)
}

/// Reverse-entry table, or the trap emitted in its place.
#[derive(Clone, Debug)]
pub enum ReverseTable<'a> {
    /// Host-dense sources must always enter through the destination-anchored
    /// path; their reverse entry exists only to report misuse.
    MisuseTrap(&'a TypeDescriptor),
    Table(DispatchTable<'a>),
}

/// Build the source-anchored reverse-entry table for `source`.
///
/// Iterates the whole catalog as candidate destinations and keys each case
/// by the destination's `type_id`. The fallback is always `Unsupported`:
/// a reverse entry never redispatches, which bounds any input pair to one
/// redispatch hop.
pub fn reverse_table<'a>(
    catalog: &'a Catalog,
    source: &'a TypeDescriptor,
) -> Result<ReverseTable<'a>, TableError> {
    if source.is_sparse() {
        return Err(TableError::SparseAnchor {
            anchor: source.display_name.clone(),
        });
    }
    if source.is_host_dense() {
        return Ok(ReverseTable::MisuseTrap(source));
    }

    let mut table = DispatchTable::new(source, Fallback::Unsupported);
    for destination in catalog.entries() {
        match classify(source, destination, Direction::Reverse) {
            Classified::Skip(_) => {}
            Classified::Emit(entry) => table.insert(destination.type_id, entry)?,
        }
    }

    tracing::debug!(
        anchor = %source.display_name,
        cases = table.len(),
        "built reverse-entry table"
    );
    Ok(ReverseTable::Table(table))
}
