//! # Standard-library kernel (C5) and library-author facade (C8)
//!
//! Installs the built-in types (`int`, `float`, `bool`, `string`, `Math`,
//! `Ref`) and the top-level functions (`error`, `print`, `print_literal`,
//! `input`) into the root [`Scope`](crate::typechecker::scope::Scope) at
//! type-checking time, and emits their LLVM bodies into a
//! [`CodegenContext`](crate::codegen::CodegenContext) at code-generation
//! time. The analyser (C6) resolves every user-visible operator, attribute
//! access and cast to a call against exactly these symbols; without them
//! the language has no semantics (spec §1).
//!
//! Every built-in is grounded in `original_source/cure/stdlib/builtins/**`;
//! see the per-module doc comments below for the corresponding file.

mod bool_type;
mod float_type;
mod int_type;
mod math;
mod refc;
mod string_type;
mod toplevel;

use inkwell::types::{BasicMetadataTypeEnum, BasicTypeEnum, StructType};
use inkwell::values::{BasicValueEnum, FunctionValue};
use inkwell::AddressSpace;

use crate::codegen::CodegenContext;
use crate::typechecker::scope::Scope;
use crate::typechecker::Type;

/// Install every built-in type's operator/conversion/method signature, plus
/// the top-level functions, into the root scope (C5). Called once, by
/// [`TypeChecker::new`](crate::typechecker::TypeChecker::new), before any
/// user statement is checked.
pub fn install(scope: &mut Scope) {
    int_type::install_types(scope);
    float_type::install_types(scope);
    bool_type::install_types(scope);
    string_type::install_types(scope);
    math::install_types(scope);
    refc::install_types(scope);
    toplevel::install_types(scope);
}

/// Emit every built-in function's LLVM body into `ctx`'s module (C7's
/// prelude step, run once before any user function is generated). Functions
/// are declared under their spec-mandated name (`T.<op>_<U>`, `T.<op>`,
/// `T.<method>`) so the analyser-resolved callee names in rewritten `Call`
/// nodes resolve directly via `ctx.module.get_function`/`ctx.resolve_function`.
pub fn emit<'ctx>(ctx: &CodegenContext<'ctx>) {
    refc::emit(ctx);
    string_type::emit(ctx);
    int_type::emit(ctx);
    float_type::emit(ctx);
    bool_type::emit(ctx);
    math::emit(ctx);
    toplevel::emit(ctx);
}

/// The managed `string` layout (§3): `(data: byte*, length: i64, ref: Ref*)`.
/// Kept local to the stdlib kernel rather than routed through
/// `CodegenContext::get_llvm_type` (which still lowers `Type::String` to a
/// bare pointer for the rest of the codegen tree — an integration gap
/// tracked in DESIGN.md) so every stdlib function agrees on one layout.
pub(crate) fn string_struct_type<'ctx>(ctx: &CodegenContext<'ctx>) -> StructType<'ctx> {
    let ptr = ctx.context.ptr_type(AddressSpace::default());
    let i64t = ctx.context.i64_type();
    ctx.context.struct_type(&[ptr.into(), i64t.into(), ptr.into()], false)
}

/// The `Ref` runtime struct (§3): `(data: byte*, destroy_fn: byte*(byte*)* nullable, ref_count: u64)`.
pub(crate) fn ref_struct_type<'ctx>(ctx: &CodegenContext<'ctx>) -> StructType<'ctx> {
    let ptr = ctx.context.ptr_type(AddressSpace::default());
    let i64t = ctx.context.i64_type();
    ctx.context.struct_type(&[ptr.into(), ptr.into(), i64t.into()], false)
}

pub(crate) fn ptr_type<'ctx>(ctx: &CodegenContext<'ctx>) -> inkwell::types::PointerType<'ctx> {
    ctx.context.ptr_type(AddressSpace::default())
}

/// Declare (if absent) and return the function named `name`. Mirrors C8's
/// `function(...)` decorator: the signature is fixed up front, the body is
/// filled in by the caller immediately after.
pub(crate) fn declare<'ctx>(
    ctx: &CodegenContext<'ctx>,
    name: &str,
    params: &[BasicMetadataTypeEnum<'ctx>],
    ret: Option<BasicTypeEnum<'ctx>>,
) -> FunctionValue<'ctx> {
    if let Some(existing) = ctx.module.get_function(name) {
        return existing;
    }

    let fn_type = match ret {
        Some(ret) => ret.fn_type(params, false),
        None => ctx.context.void_type().fn_type(params, false),
    };

    let function = ctx.module.add_function(name, fn_type, None);
    ctx.store_function(name, function);
    function
}

/// Position the builder at a fresh `entry` block for `function`.
pub(crate) fn open_body<'ctx>(ctx: &CodegenContext<'ctx>, function: FunctionValue<'ctx>) {
    let entry = ctx.context.append_basic_block(function, "entry");
    ctx.builder.position_at_end(entry);
}

/// `DefinitionContext` (C8): the handle a library-author body callback
/// receives. Bundles the pieces every stdlib body needs (position in the
/// module, the function being built, its declared parameter/return types)
/// without threading them as separate arguments through every builder call.
/// Narrower than the reference's `DefinitionContext` (no `pos`/`scope` — the
/// Rust port has no comptime-error reporting path from inside a stdlib body;
/// every stdlib body is total over its declared inputs except the explicit
/// `error(...)` branches, which call this crate's own `toplevel::emit_error_call`).
pub(crate) struct DefinitionContext<'a, 'ctx> {
    pub ctx: &'a CodegenContext<'ctx>,
    pub function: FunctionValue<'ctx>,
}

impl<'a, 'ctx> DefinitionContext<'a, 'ctx> {
    pub fn new(ctx: &'a CodegenContext<'ctx>, function: FunctionValue<'ctx>) -> Self {
        DefinitionContext { ctx, function }
    }

    /// `ctx.param(index)` (§4.8): the `index`-th parameter's value.
    pub fn param(&self, index: u32) -> BasicValueEnum<'ctx> {
        self.function
            .get_nth_param(index)
            .unwrap_or_else(|| panic!("stdlib function has no parameter {index}"))
    }

    /// `ctx.call(name, args)` (§4.8): forward to a previously emitted stdlib
    /// or user function by name.
    pub fn call(&self, name: &str, args: &[BasicValueEnum<'ctx>]) -> Option<BasicValueEnum<'ctx>> {
        let function = self
            .ctx
            .module
            .get_function(name)
            .unwrap_or_else(|| panic!("stdlib function '{name}' called before being emitted"));
        let metadata_args: Vec<_> = args.iter().map(|v| (*v).into()).collect();
        self.ctx
            .builder
            .build_call(function, &metadata_args, "")
            .unwrap()
            .try_as_basic_value()
            .left()
    }

    /// `ctx.error(message)` (§4.8): emit a call to the emitted program's own
    /// `error(string)` and mark the current path unreachable.
    pub fn error(&self, message: &str) {
        toplevel::emit_error_call(self.ctx, message);
        self.ctx.builder.build_unreachable().unwrap();
    }
}
