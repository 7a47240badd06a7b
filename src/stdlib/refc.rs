//! `Ref` (§4.5.2): the reference-count header every managed value carries.
//! Grounded on `original_source/cure/stdlib/builtins/classes/Ref.py`.

use inkwell::types::BasicMetadataTypeEnum;
use inkwell::AddressSpace;

use crate::codegen::CodegenContext;
use crate::typechecker::scope::Scope;
use crate::typechecker::Type;

use super::{declare, open_body, ptr_type, ref_struct_type};

pub fn install_types(scope: &mut Scope) {
    scope
        .add_type("Ref", Type::Ref)
        .expect("Ref registered exactly once");

    scope
        .add_method_to_type(
            Type::Ref,
            "new",
            Type::Function {
                params: vec![Type::Reference(Box::new(Type::Character)), Type::Reference(Box::new(Type::Character))],
                return_value: Box::new(Type::Ref),
            },
        )
        .expect("Ref.new registered exactly once");

    scope
        .add_method_to_type(
            Type::Ref,
            "inc",
            Type::Function {
                params: vec![Type::Ref],
                return_value: Box::new(Type::Void),
            },
        )
        .expect("Ref.inc registered exactly once");

    scope
        .add_method_to_type(
            Type::Ref,
            "dec",
            Type::Function {
                params: vec![Type::Ref],
                return_value: Box::new(Type::Void),
            },
        )
        .expect("Ref.dec registered exactly once");
}

/// `Ref.new(data, destroy_fn) -> Ref*`: `malloc(sizeof(Ref))`, populate the
/// three fields, `ref_count = 1`.
fn emit_new<'ctx>(ctx: &CodegenContext<'ctx>) {
    let ptr = ptr_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![ptr.into(), ptr.into()];
    let function = declare(ctx, "Ref.new", &params, Some(ptr.into()));
    open_body(ctx, function);

    let data = function.get_nth_param(0).unwrap().into_pointer_value();
    let destroy_fn = function.get_nth_param(1).unwrap().into_pointer_value();

    let struct_ty = ref_struct_type(ctx);
    // sizeof(Ref) via the classic GEP-to-index-1-on-null trick.
    let null = struct_ty.ptr_type(AddressSpace::default()).const_null();
    let size_ptr = unsafe {
        ctx.builder
            .build_gep(struct_ty, null, &[ctx.context.i32_type().const_int(1, false)], "ref_size_ptr")
            .unwrap()
    };
    let size = ctx
        .builder
        .build_ptr_to_int(size_ptr, ctx.context.i64_type(), "ref_size")
        .unwrap();

    let malloc = ctx.c_abi.get(ctx, "malloc");
    let mem = ctx
        .builder
        .build_call(malloc, &[size.into()], "ref_mem")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap()
        .into_pointer_value();

    let data_field = ctx.builder.build_struct_gep(struct_ty, mem, 0, "data_field").unwrap();
    ctx.builder.build_store(data_field, data).unwrap();

    let destroy_field = ctx.builder.build_struct_gep(struct_ty, mem, 1, "destroy_field").unwrap();
    ctx.builder.build_store(destroy_field, destroy_fn).unwrap();

    let count_field = ctx.builder.build_struct_gep(struct_ty, mem, 2, "count_field").unwrap();
    ctx.builder
        .build_store(count_field, ctx.context.i64_type().const_int(1, false))
        .unwrap();

    ctx.builder.build_return(Some(&mem)).unwrap();
}

/// `Ref.inc(self)`: `self.ref_count += 1`.
fn emit_inc<'ctx>(ctx: &CodegenContext<'ctx>) {
    let ptr = ptr_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![ptr.into()];
    let function = declare(ctx, "Ref.inc", &params, None);
    open_body(ctx, function);

    let self_ptr = function.get_nth_param(0).unwrap().into_pointer_value();
    let struct_ty = ref_struct_type(ctx);

    let count_field = ctx.builder.build_struct_gep(struct_ty, self_ptr, 2, "count_field").unwrap();
    let count = ctx
        .builder
        .build_load(ctx.context.i64_type(), count_field, "count")
        .unwrap()
        .into_int_value();
    let incremented = ctx
        .builder
        .build_int_add(count, ctx.context.i64_type().const_int(1, false), "incremented")
        .unwrap();
    ctx.builder.build_store(count_field, incremented).unwrap();
    ctx.builder.build_return(None).unwrap();
}

/// `Ref.dec(self)`: `self.ref_count -= 1`; on reaching zero, invoke
/// `destroy_fn(data)` if set, else `free(data)`, null the data slot and free
/// the `Ref` struct itself.
fn emit_dec<'ctx>(ctx: &CodegenContext<'ctx>) {
    let ptr = ptr_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![ptr.into()];
    let function = declare(ctx, "Ref.dec", &params, None);
    open_body(ctx, function);

    let self_ptr = function.get_nth_param(0).unwrap().into_pointer_value();
    let struct_ty = ref_struct_type(ctx);

    let count_field = ctx.builder.build_struct_gep(struct_ty, self_ptr, 2, "count_field").unwrap();
    let count = ctx
        .builder
        .build_load(ctx.context.i64_type(), count_field, "count")
        .unwrap()
        .into_int_value();
    let decremented = ctx
        .builder
        .build_int_sub(count, ctx.context.i64_type().const_int(1, false), "decremented")
        .unwrap();
    ctx.builder.build_store(count_field, decremented).unwrap();

    let is_zero = ctx
        .builder
        .build_int_compare(inkwell::IntPredicate::EQ, decremented, ctx.context.i64_type().const_zero(), "is_zero")
        .unwrap();

    let destroy_block = ctx.context.append_basic_block(function, "destroy");
    let done_block = ctx.context.append_basic_block(function, "done");
    ctx.builder.build_conditional_branch(is_zero, destroy_block, done_block).unwrap();

    ctx.builder.position_at_end(destroy_block);
    let data_field = ctx.builder.build_struct_gep(struct_ty, self_ptr, 0, "data_field").unwrap();
    let data = ctx.builder.build_load(ptr, data_field, "data").unwrap().into_pointer_value();
    let destroy_field = ctx.builder.build_struct_gep(struct_ty, self_ptr, 1, "destroy_field").unwrap();
    let destroy_fn = ctx
        .builder
        .build_load(ptr, destroy_field, "destroy_fn")
        .unwrap()
        .into_pointer_value();

    let has_destroy_fn = ctx
        .builder
        .build_is_not_null(destroy_fn, "has_destroy_fn")
        .unwrap();

    let call_destroy_block = ctx.context.append_basic_block(function, "call_destroy");
    let call_free_block = ctx.context.append_basic_block(function, "call_free");
    let after_destroy_block = ctx.context.append_basic_block(function, "after_destroy");
    ctx.builder
        .build_conditional_branch(has_destroy_fn, call_destroy_block, call_free_block)
        .unwrap();

    ctx.builder.position_at_end(call_destroy_block);
    let destroy_fn_type = ptr.fn_type(&[ptr.into()], false);
    ctx.builder
        .build_indirect_call(destroy_fn_type, destroy_fn, &[data.into()], "")
        .unwrap();
    ctx.builder.build_unconditional_branch(after_destroy_block).unwrap();

    ctx.builder.position_at_end(call_free_block);
    let free = ctx.c_abi.get(ctx, "free");
    ctx.builder.build_call(free, &[data.into()], "").unwrap();
    ctx.builder.build_unconditional_branch(after_destroy_block).unwrap();

    ctx.builder.position_at_end(after_destroy_block);
    ctx.builder.build_store(data_field, ptr.const_null()).unwrap();
    let free_self = ctx.c_abi.get(ctx, "free");
    ctx.builder.build_call(free_self, &[self_ptr.into()], "").unwrap();
    ctx.builder.build_unconditional_branch(done_block).unwrap();

    ctx.builder.position_at_end(done_block);
    ctx.builder.build_return(None).unwrap();
}

pub fn emit<'ctx>(ctx: &CodegenContext<'ctx>) {
    emit_new(ctx);
    emit_inc(ctx);
    emit_dec(ctx);
}
