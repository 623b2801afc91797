//! Type descriptors.
//!
//! A `TypeDescriptor` identifies one concrete tensor representation in the
//! weft type matrix: its execution domain (`Backend`), element type
//! (`ScalarKind`), and representation (`Density`), plus the stable
//! `TypeId` used as a switch discriminant in generated code.

use std::fmt;

use serde::Deserialize;

/// Execution domain of a tensor's storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Host,
    Accelerator,
}

impl Backend {
    /// Token emitted for this backend in generated code (`Backend::` scope).
    #[must_use]
    pub const fn cpp_name(self) -> &'static str {
        match self {
            Backend::Host => "Host",
            Backend::Accelerator => "Accelerator",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cpp_name())
    }
}

/// Numeric element type of a tensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    F16,
    F32,
    F64,
    I8,
    I16,
    I32,
    I64,
    U8,
}

impl ScalarKind {
    /// Suffix used in generated kernel names (e.g. `copy_accel_f32`).
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            ScalarKind::F16 => "f16",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
        }
    }

    /// Token emitted for this scalar in generated code (`ScalarKind::` scope).
    #[must_use]
    pub const fn cpp_name(self) -> &'static str {
        match self {
            ScalarKind::F16 => "Float16",
            ScalarKind::F32 => "Float32",
            ScalarKind::F64 => "Float64",
            ScalarKind::I8 => "Int8",
            ScalarKind::I16 => "Int16",
            ScalarKind::I32 => "Int32",
            ScalarKind::I64 => "Int64",
            ScalarKind::U8 => "UInt8",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cpp_name())
    }
}

/// Whether a tensor representation is fully materialized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Dense,
    Sparse,
}

/// Stable dispatch identifier, unique across the whole catalog.
///
/// Used verbatim as a `case` label in generated switches, so collisions
/// would produce uncompilable output; `Catalog::new` rejects them up front.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// One concrete instantiation of the weft type matrix.
///
/// Immutable for the duration of a generation run. `display_name` feeds
/// diagnostics and the generated dispatch class name (`{display_name}Type`);
/// `tensor_kind` names the concrete representation and is the kernel-call
/// prefix and header stem. Both come from the catalog, never invented here.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDescriptor {
    pub backend: Backend,
    pub scalar: ScalarKind,
    pub density: Density,
    pub type_id: TypeId,
    pub display_name: String,
    pub tensor_kind: String,
}

impl TypeDescriptor {
    #[must_use]
    pub fn is_dense(&self) -> bool {
        self.density == Density::Dense
    }

    #[must_use]
    pub fn is_sparse(&self) -> bool {
        self.density == Density::Sparse
    }

    /// Backend of this type's dense representation.
    ///
    /// Sparse descriptors share the backend of their dense counterpart, so
    /// this is the `backend` field regardless of density. The module
    /// assembler filters on it when deciding which unit owns a type.
    #[must_use]
    pub fn dense_backend(&self) -> Backend {
        self.backend
    }

    /// Host-memory dense type: the one shape allowed to redispatch.
    #[must_use]
    pub fn is_host_dense(&self) -> bool {
        self.backend == Backend::Host && self.is_dense()
    }
}
