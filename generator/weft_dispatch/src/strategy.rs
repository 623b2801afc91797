//! Strategy tags and per-pair dispatch entries.

use weft_catalog::TypeDescriptor;

/// How one (source, destination) pair is copied in generated code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CopyStrategy {
    /// Both sides live in host memory: delegate to the host fast path,
    /// which handles any scalar conversion internally.
    DirectHostCopy,
    /// Backend- and scalar-specific named kernel call.
    NamedKernel,
    /// `non_blocking`-gated upload branch that falls through to the
    /// synchronous named kernel.
    AsyncHostToAccel,
    /// `non_blocking`-gated download branch, same fallthrough shape.
    AsyncAccelToHost,
}

/// Why a pair gets no case at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Sparse copies are categorically unimplemented at this layer.
    Sparse,
    /// Accelerator→Host pairs are owned exclusively by the reverse-entry
    /// path; the forward builder must not duplicate them.
    ReverseOwned,
}

/// Default branch of a dispatch table.
///
/// `Redispatch` is only ever attached to destination-anchored tables over a
/// Host-dense anchor; everything else is `Unsupported`. Keeping this a
/// two-case variant (rather than backend checks at emission time) makes the
/// one-hop termination guarantee visible in the type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fallback {
    /// Re-enter dispatch through the source type's reverse-entry function.
    Redispatch,
    /// Raise a diagnostic naming both endpoints.
    Unsupported,
}

/// One concrete (source, destination) decision.
///
/// Holds back-references into the catalog, not ownership; entries are
/// recomputed freely since `classify` is pure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DispatchEntry<'a> {
    pub source: &'a TypeDescriptor,
    pub destination: &'a TypeDescriptor,
    pub strategy: CopyStrategy,
    /// Whether the emitted call threads the accelerator execution-context
    /// handle through.
    pub requires_accel_state: bool,
}

/// Classifier outcome: a case to emit, or no case at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Classified<'a> {
    Skip(SkipReason),
    Emit(DispatchEntry<'a>),
}
