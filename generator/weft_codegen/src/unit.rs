//! Module assembly.
//!
//! One compilation unit per backend invocation: banner, includes, then the
//! per-type function pairs in catalog order. The accelerator unit is the
//! one place cross-backend conversions are realized, so it includes every
//! dense type's header; the host unit only sees host types.

use rustc_hash::FxHashSet;
use weft_catalog::{Backend, Catalog};
use weft_dispatch::{destination_table, reverse_table};

use crate::context::EmitContext;
use crate::function::{emit_forward, emit_reverse};
use crate::GenError;

/// Generate the copy-dispatch compilation unit for `backend`.
///
/// Fails before emitting anything if the catalog has no dense entry owned
/// by `backend`. Output is deterministic: same catalog and backend, same
/// bytes.
#[tracing::instrument(level = "debug", skip(catalog))]
pub fn generate(catalog: &Catalog, backend: Backend) -> Result<String, GenError> {
    if catalog.dense_for_backend(backend).next().is_none() {
        return Err(GenError::NoBackendEntries { backend });
    }

    let mut ctx = EmitContext::new();
    ctx.writeln("// @generated by weftgen; do not edit by hand.");
    ctx.newline();
    ctx.writeln("#include \"weft/Config.h\"");
    ctx.newline();
    ctx.writeln("#include \"weft/Runtime.h\"");
    ctx.writeln("#include \"weft/Copy.h\"");
    if backend == Backend::Accelerator {
        ctx.writeln("#include \"weft/accel/AccelContext.h\"");
    }

    // Sparse types have no cases anywhere, so they contribute no header.
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for desc in catalog.entries() {
        if desc.is_sparse() {
            continue;
        }
        if backend == Backend::Host && desc.dense_backend() != Backend::Host {
            continue;
        }
        if seen.insert(desc.tensor_kind.as_str()) {
            ctx.writeln(&format!("#include \"weft/types/{}.h\"", desc.tensor_kind));
        }
    }
    ctx.writeln("#include \"weft/core/TensorImpl.h\"");
    ctx.newline();
    ctx.writeln("namespace weft {");
    ctx.newline();

    for desc in catalog.dense_for_backend(backend) {
        let table = destination_table(catalog, desc)?;
        emit_forward(&mut ctx, &table);
        ctx.newline();
        let reverse = reverse_table(catalog, desc)?;
        emit_reverse(&mut ctx, &reverse);
        ctx.newline();
    }

    ctx.writeln("} // namespace weft");

    let unit = ctx.take_output();
    tracing::debug!(%backend, bytes = unit.len(), "assembled compilation unit");
    Ok(unit)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use weft_catalog::{Backend, Catalog, Density, ScalarKind, TypeDescriptor, TypeId};

    use super::generate;
    use crate::GenError;

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
    fn backend_without_entries_fails_before_any_output() {
        let catalog = Catalog::new(vec![desc(
            Backend::Host,
            ScalarKind::F32,
            Density::Dense,
            0,
            "HostFloat32",
        )])
        .unwrap();

        assert_eq!(
            generate(&catalog, Backend::Accelerator),
            Err(GenError::NoBackendEntries {
                backend: Backend::Accelerator,
            })
        );
    }

    #[test]
    fn unit_opens_with_the_generated_banner() {
        let catalog = Catalog::new(vec![desc(
            Backend::Host,
            ScalarKind::F32,
            Density::Dense,
            0,
            "HostFloat32",
        )])
        .unwrap();

        let unit = generate(&catalog, Backend::Host).unwrap();
        assert!(unit.starts_with("// @generated by weftgen; do not edit by hand.\n"));
    }

    #[test]
    fn host_unit_excludes_accelerator_headers_and_context() {
        let catalog = Catalog::new(vec![
            desc(Backend::Host, ScalarKind::F32, Density::Dense, 0, "HostFloat32"),
            desc(Backend::Accelerator, ScalarKind::F32, Density::Dense, 1, "AccelFloat32"),
        ])
        .unwrap();

        let unit = generate(&catalog, Backend::Host).unwrap();
        assert!(unit.contains("#include \"weft/types/HostFloat32Tensor.h\""));
        assert!(!unit.contains("#include \"weft/types/AccelFloat32Tensor.h\""));
        assert!(!unit.contains("weft/accel/AccelContext.h"));
    }

    #[test]
    fn accel_unit_includes_every_dense_header() {
        let catalog = Catalog::new(vec![
            desc(Backend::Host, ScalarKind::F32, Density::Dense, 0, "HostFloat32"),
            desc(Backend::Accelerator, ScalarKind::F32, Density::Dense, 1, "AccelFloat32"),
        ])
        .unwrap();

        let unit = generate(&catalog, Backend::Accelerator).unwrap();
        assert!(unit.contains("#include \"weft/accel/AccelContext.h\""));
        assert!(unit.contains("#include \"weft/types/HostFloat32Tensor.h\""));
        assert!(unit.contains("#include \"weft/types/AccelFloat32Tensor.h\""));
    }
}
