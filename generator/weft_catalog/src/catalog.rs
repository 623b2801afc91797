//! The validated catalog.

use rustc_hash::FxHashMap;

use crate::descriptor::{Backend, TypeDescriptor, TypeId};
use crate::error::CatalogError;

/// An ordered, immutable sequence of type descriptors.
///
/// Order is preserved solely so emission is deterministic; dispatch
/// correctness never depends on it (tables are keyed by `TypeId`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<TypeDescriptor>,
}

impl Catalog {
    /// Validate and wrap a descriptor sequence.
    ///
    /// Rejects an empty sequence, duplicate `type_id`s, and descriptors
    /// with empty name fields. The first violation found aborts the run.
    pub fn new(entries: Vec<TypeDescriptor>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen: FxHashMap<TypeId, usize> = FxHashMap::default();
        for (index, desc) in entries.iter().enumerate() {
            if desc.display_name.is_empty() {
                return Err(CatalogError::MissingField {
                    type_id: desc.type_id,
                    field: "display_name",
                });
            }
            if desc.tensor_kind.is_empty() {
                return Err(CatalogError::MissingField {
                    type_id: desc.type_id,
                    field: "tensor_kind",
                });
            }
            if let Some(first) = seen.insert(desc.type_id, index) {
                return Err(CatalogError::DuplicateTypeId {
                    type_id: desc.type_id,
                    first: entries[first].display_name.clone(),
                    second: desc.display_name.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[TypeDescriptor] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dense descriptors owned by `backend`, in catalog order.
    ///
    /// These are the types the module assembler generates functions for.
    pub fn dense_for_backend(
        &self,
        backend: Backend,
    ) -> impl Iterator<Item = &TypeDescriptor> + '_ {
        self.entries
            .iter()
            .filter(move |desc| desc.is_dense() && desc.dense_backend() == backend)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Catalog;
    use crate::descriptor::{Backend, Density, ScalarKind, TypeDescriptor, TypeId};
    use crate::error::CatalogError;

    fn desc(
        backend: Backend,
        scalar: ScalarKind,
        density: Density,
        id: u32,
        name: &str,
    ) -> TypeDescriptor {
        TypeDescriptor {
            backend,
            scalar,
            density,
            type_id: TypeId::new(id),
            display_name: name.to_string(),
            tensor_kind: format!("{name}Tensor"),
        }
    }

    #[test]
    fn valid_catalog_preserves_order() {
        let catalog = Catalog::new(vec![
            desc(Backend::Host, ScalarKind::F32, Density::Dense, 0, "HostFloat32"),
            desc(Backend::Accelerator, ScalarKind::F32, Density::Dense, 1, "AccelFloat32"),
        ])
        .unwrap();

        let names: Vec<&str> = catalog
            .entries()
            .iter()
            .map(|d| d.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["HostFloat32", "AccelFloat32"]);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(Catalog::new(Vec::new()), Err(CatalogError::Empty));
    }

    #[test]
    fn duplicate_type_id_names_both_descriptors() {
        let err = Catalog::new(vec![
            desc(Backend::Host, ScalarKind::F32, Density::Dense, 3, "HostFloat32"),
            desc(Backend::Host, ScalarKind::I64, Density::Dense, 3, "HostInt64"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            CatalogError::DuplicateTypeId {
                type_id: TypeId::new(3),
                first: "HostFloat32".to_string(),
                second: "HostInt64".to_string(),
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("HostFloat32"));
        assert!(msg.contains("HostInt64"));
    }

    #[test]
    fn empty_name_field_is_rejected() {
        let mut bad = desc(Backend::Host, ScalarKind::F32, Density::Dense, 0, "HostFloat32");
        bad.tensor_kind = String::new();
        let err = Catalog::new(vec![bad]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::MissingField {
                type_id: TypeId::new(0),
                field: "tensor_kind",
            }
        );
    }

    #[test]
    fn dense_for_backend_skips_sparse_and_foreign_entries() {
        let catalog = Catalog::new(vec![
            desc(Backend::Host, ScalarKind::F32, Density::Dense, 0, "HostFloat32"),
            desc(Backend::Host, ScalarKind::F32, Density::Sparse, 1, "SparseHostFloat32"),
            desc(Backend::Accelerator, ScalarKind::F32, Density::Dense, 2, "AccelFloat32"),
        ])
        .unwrap();

        let host: Vec<&str> = catalog
            .dense_for_backend(Backend::Host)
            .map(|d| d.display_name.as_str())
            .collect();
        assert_eq!(host, vec!["HostFloat32"]);

        let accel: Vec<&str> = catalog
            .dense_for_backend(Backend::Accelerator)
            .map(|d| d.display_name.as_str())
            .collect();
        assert_eq!(accel, vec!["AccelFloat32"]);
    }
}
