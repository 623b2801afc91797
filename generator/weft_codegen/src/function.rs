//! Per-type function emission.
//!
//! One `copy_` function per destination anchor and one `copy_from_` per
//! source anchor. Case bodies call backend copy primitives by name; the
//! names are assembled from catalog strings, never invented here.

use weft_catalog::{Backend, TypeDescriptor, TypeId};
use weft_dispatch::{CopyStrategy, DispatchEntry, DispatchTable, Fallback, ReverseTable};

use crate::context::EmitContext;

/// Dispatch class the generated method hangs off.
fn dispatch_class(desc: &TypeDescriptor) -> String {
    format!("{}Type", desc.display_name)
}

/// Argument prefix threading the accelerator execution context.
fn state_prefix(entry: &DispatchEntry<'_>) -> &'static str {
    if entry.requires_accel_state {
        "runtime().accel_state(), "
    } else {
        ""
    }
}

/// Synchronous named-kernel call for a pair: the destination's tensor kind
/// owns the kernel, the source contributes the accel marker and scalar
/// suffix.
fn kernel_call(entry: &DispatchEntry<'_>) -> String {
    let accel_mark = if entry.source.backend == Backend::Accelerator {
        "accel_"
    } else {
        ""
    };
    format!(
        "{}_copy_{}{}({}dst.unsafe_impl(), src.unsafe_impl());",
        entry.destination.tensor_kind,
        accel_mark,
        entry.source.scalar.suffix(),
        state_prefix(entry)
    )
}

fn emit_async_branch(ctx: &mut EmitContext, entry: &DispatchEntry<'_>, direction: &str) {
    ctx.writeln("if (non_blocking) {");
    ctx.indent();
    ctx.writeln(&format!(
        "{}_copy_async_{}({}dst.unsafe_impl(), src.unsafe_impl());",
        entry.destination.tensor_kind,
        direction,
        state_prefix(entry)
    ));
    ctx.writeln("break;");
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_case(ctx: &mut EmitContext, label: TypeId, entry: &DispatchEntry<'_>) {
    ctx.writeln(&format!("case {label}:"));
    ctx.indent();
    match entry.strategy {
        CopyStrategy::DirectHostCopy => {
            ctx.writeln("copy_host(dst, src);");
        }
        CopyStrategy::NamedKernel => {
            ctx.writeln(&kernel_call(entry));
        }
        CopyStrategy::AsyncHostToAccel => {
            emit_async_branch(ctx, entry, "host");
            ctx.writeln(&kernel_call(entry));
        }
        CopyStrategy::AsyncAccelToHost => {
            emit_async_branch(ctx, entry, "accel");
            ctx.writeln(&kernel_call(entry));
        }
    }
    ctx.writeln("break;");
    ctx.dedent();
}

fn emit_prologue(ctx: &mut EmitContext, arg: &str, desc: &TypeDescriptor) {
    ctx.writeln(&format!(
        "checked_tensor_unwrap({arg}, \"{arg}\", Backend::{}, ScalarKind::{});",
        desc.backend.cpp_name(),
        desc.scalar.cpp_name()
    ));
}

fn emit_epilogue(ctx: &mut EmitContext) {
    ctx.writeln("dst.unsafe_impl()->set_wrapped_scalar(src.dim() == 0);");
    ctx.writeln("return dst;");
}

/// Emit the destination-anchored `copy_` function for one table.
pub(crate) fn emit_forward(ctx: &mut EmitContext, table: &DispatchTable<'_>) {
    let dst = table.anchor();
    ctx.writeln(&format!(
        "Tensor& {}::copy_(Tensor& dst, const Tensor& src, bool non_blocking) const {{",
        dispatch_class(dst)
    ));
    ctx.indent();
    emit_prologue(ctx, "dst", dst);
    ctx.writeln("switch (src.type_id()) {");
    ctx.indent();
    for (label, entry) in table.cases() {
        emit_case(ctx, label, entry);
    }
    ctx.writeln("default:");
    ctx.indent();
    match table.fallback() {
        Fallback::Redispatch => {
            ctx.writeln("return src.type().copy_from_(src, dst, non_blocking);");
        }
        Fallback::Unsupported => {
            ctx.writeln(
                "weft_raise(\"copy does not support \", src.type().name(), \" to \", name(), \" copy.\");",
            );
        }
    }
    ctx.dedent();
    ctx.dedent();
    ctx.writeln("}");
    emit_epilogue(ctx);
    ctx.dedent();
    ctx.writeln("}");
}

/// Emit the source-anchored `copy_from_` function for one reverse table.
pub(crate) fn emit_reverse(ctx: &mut EmitContext, reverse: &ReverseTable<'_>) {
    match reverse {
        ReverseTable::MisuseTrap(src) => {
            ctx.writeln(&format!(
                "Tensor& {}::copy_from_(const Tensor& src, Tensor& dst, bool non_blocking) const {{",
                dispatch_class(src)
            ));
            ctx.indent();
            ctx.writeln(
                "weft_raise(\"copy does not support \", src.type().name(), \" to \", dst.type().name(), \" copy (copy_from_ entry).\");",
            );
            ctx.dedent();
            ctx.writeln("}");
        }
        ReverseTable::Table(table) => {
            let src = table.anchor();
            ctx.writeln(&format!(
                "Tensor& {}::copy_from_(const Tensor& src, Tensor& dst, bool non_blocking) const {{",
                dispatch_class(src)
            ));
            ctx.indent();
            emit_prologue(ctx, "src", src);
            ctx.writeln("switch (dst.type_id()) {");
            ctx.indent();
            for (label, entry) in table.cases() {
                emit_case(ctx, label, entry);
            }
            ctx.writeln("default:");
            ctx.indent();
            ctx.writeln(
                "weft_raise(\"copy does not support \", name(), \" to \", dst.type().name(), \" copy.\");",
            );
            ctx.writeln("break;");
            ctx.dedent();
            ctx.dedent();
            ctx.writeln("}");
            emit_epilogue(ctx);
            ctx.dedent();
            ctx.writeln("}");
        }
    }
}
