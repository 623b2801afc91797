//! Catalog invariant violations.

use thiserror::Error;

use crate::descriptor::TypeId;

/// A catalog that cannot be used for generation.
///
/// All variants are fail-fast: generation aborts before emitting any output,
/// since continuing would produce uncompilable or contradictory dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog contains no type descriptors")]
    Empty,

    #[error("duplicate type id {type_id}: shared by `{first}` and `{second}`")]
    DuplicateTypeId {
        type_id: TypeId,
        first: String,
        second: String,
    },

    #[error("descriptor with type id {type_id} has an empty `{field}` field")]
    MissingField {
        type_id: TypeId,
        field: &'static str,
    },
}
