//! `bool` (§4.5): truth value primitive.
//! Grounded on `original_source/cure/stdlib/builtins/bool.py`.

use inkwell::types::BasicMetadataTypeEnum;

use crate::codegen::CodegenContext;
use crate::typechecker::scope::Scope;
use crate::typechecker::Type;

use super::{declare, open_body, string_struct_type};

pub fn install_types(scope: &mut Scope) {
    scope
        .add_method_to_type(
            Type::Boolean,
            "to_string",
            Type::Function { params: vec![], return_value: Box::new(Type::String) },
        )
        .expect("bool.to_string registered exactly once");

    let binary: &[(&str, Type)] = &[
        ("eq_bool", Type::Boolean),
        ("neq_bool", Type::Boolean),
        ("and_bool", Type::Boolean),
        ("or_bool", Type::Boolean),
    ];
    for (name, ret) in binary {
        scope
            .add_method_to_type(
                Type::Boolean,
                *name,
                Type::Function { params: vec![Type::Boolean], return_value: Box::new(ret.clone()) },
            )
            .expect("bool binary method registered exactly once");
    }

    scope
        .add_method_to_type(
            Type::Boolean,
            "not_",
            Type::Function { params: vec![], return_value: Box::new(Type::Boolean) },
        )
        .expect("bool.not_ registered exactly once");
}

/// `to_string` (§4.5): selects between the `"true"`/`"false"` literals by
/// branching, rather than a `select` on differently-sized buffers, since
/// `string.new` needs a length too.
fn emit_to_string<'ctx>(ctx: &CodegenContext<'ctx>) {
    let bool_t = ctx.context.bool_type();
    let i32t = ctx.context.i32_type();
    let struct_ty = string_struct_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![bool_t.into()];
    let function = declare(ctx, "bool.to_string", &params, Some(struct_ty.into()));
    open_body(ctx, function);

    let self_value = function.get_nth_param(0).unwrap().into_int_value();

    let true_block = ctx.context.append_basic_block(function, "is_true");
    let false_block = ctx.context.append_basic_block(function, "is_false");
    ctx.builder.build_conditional_branch(self_value, true_block, false_block).unwrap();

    let string_new = ctx.module.get_function("string.new").expect("string.new emitted first");

    ctx.builder.position_at_end(true_block);
    let true_lit = ctx.builder.build_global_string_ptr("true", "true_lit").unwrap().as_pointer_value();
    let true_result = ctx
        .builder
        .build_call(string_new, &[true_lit.into(), i32t.const_int(4, false).into()], "true_result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();
    ctx.builder.build_return(Some(&true_result)).unwrap();

    ctx.builder.position_at_end(false_block);
    let false_lit = ctx.builder.build_global_string_ptr("false", "false_lit").unwrap().as_pointer_value();
    let false_result = ctx
        .builder
        .build_call(string_new, &[false_lit.into(), i32t.const_int(5, false).into()], "false_result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();
    ctx.builder.build_return(Some(&false_result)).unwrap();
}

fn emit_binop<'ctx>(
    ctx: &CodegenContext<'ctx>,
    name: &'static str,
    build: impl FnOnce(&CodegenContext<'ctx>, inkwell::values::IntValue<'ctx>, inkwell::values::IntValue<'ctx>) -> inkwell::values::IntValue<'ctx>,
) {
    let bool_t = ctx.context.bool_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![bool_t.into(), bool_t.into()];
    let function = declare(ctx, name, &params, Some(bool_t.into()));
    open_body(ctx, function);
    let lhs = function.get_nth_param(0).unwrap().into_int_value();
    let rhs = function.get_nth_param(1).unwrap().into_int_value();
    let result = build(ctx, lhs, rhs);
    ctx.builder.build_return(Some(&result)).unwrap();
}

fn emit_not<'ctx>(ctx: &CodegenContext<'ctx>) {
    let bool_t = ctx.context.bool_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![bool_t.into()];
    let function = declare(ctx, "bool.not_", &params, Some(bool_t.into()));
    open_body(ctx, function);
    let self_value = function.get_nth_param(0).unwrap().into_int_value();
    let result = ctx.builder.build_not(self_value, "negated").unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

pub fn emit<'ctx>(ctx: &CodegenContext<'ctx>) {
    emit_to_string(ctx);
    emit_binop(ctx, "bool.eq_bool", |ctx, l, r| {
        ctx.builder.build_int_compare(inkwell::IntPredicate::EQ, l, r, "result").unwrap()
    });
    emit_binop(ctx, "bool.neq_bool", |ctx, l, r| {
        ctx.builder.build_int_compare(inkwell::IntPredicate::NE, l, r, "result").unwrap()
    });
    emit_binop(ctx, "bool.and_bool", |ctx, l, r| ctx.builder.build_and(l, r, "result").unwrap());
    emit_binop(ctx, "bool.or_bool", |ctx, l, r| ctx.builder.build_or(l, r, "result").unwrap());
    emit_not(ctx);
}
