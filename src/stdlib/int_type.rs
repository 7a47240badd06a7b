//! `int` (§4.5): 32-bit signed integer primitive (`TypeMap` root entry `int=i32`).
//! Grounded on `original_source/cure/stdlib/builtins/int.py`.

use inkwell::types::BasicMetadataTypeEnum;
use inkwell::IntPredicate;

use crate::codegen::CodegenContext;
use crate::typechecker::scope::Scope;
use crate::typechecker::Type;

use super::{declare, open_body, string_struct_type};

pub fn install_types(scope: &mut Scope) {
    scope
        .add_method_to_type(
            Type::Integer,
            "to_string",
            Type::Function { params: vec![], return_value: Box::new(Type::String) },
        )
        .expect("int.to_string registered exactly once");
    scope
        .add_method_to_type(
            Type::Integer,
            "to_float",
            Type::Function { params: vec![], return_value: Box::new(Type::FloatingPoint) },
        )
        .expect("int.to_float registered exactly once");

    let arith: &[&str] = &["add_int", "sub_int", "mul_int", "div_int", "mod_int"];
    for name in arith {
        scope
            .add_method_to_type(
                Type::Integer,
                *name,
                Type::Function { params: vec![Type::Integer], return_value: Box::new(Type::Integer) },
            )
            .expect("int arithmetic method registered exactly once");
    }

    let cmp: &[&str] = &["eq_int", "neq_int", "lt_int", "gt_int", "lte_int", "gte_int"];
    for name in cmp {
        scope
            .add_method_to_type(
                Type::Integer,
                *name,
                Type::Function { params: vec![Type::Integer], return_value: Box::new(Type::Boolean) },
            )
            .expect("int comparison method registered exactly once");
    }
}

fn emit_to_string<'ctx>(ctx: &CodegenContext<'ctx>) {
    let i32t = ctx.context.i32_type();
    let i64t = ctx.context.i64_type();
    let struct_ty = string_struct_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![i32t.into()];
    let function = declare(ctx, "int.to_string", &params, Some(struct_ty.into()));
    open_body(ctx, function);

    let self_value = function.get_nth_param(0).unwrap().into_int_value();

    let buffer_ty = ctx.context.i8_type().array_type(16);
    let buffer = ctx.builder.build_alloca(buffer_ty, "buffer").unwrap();
    let format = ctx.builder.build_global_string_ptr("%d", "int_fmt").unwrap().as_pointer_value();

    // `snprintf`'s length argument is `i64` per the C-ABI registry (§4.2);
    // `self_value` is already `i32`, matching C's default argument promotion for `int`.
    let snprintf = ctx.c_abi.get(ctx, "snprintf");
    ctx.builder
        .build_call(
            snprintf,
            &[buffer.into(), i64t.const_int(16, false).into(), format.into(), self_value.into()],
            "",
        )
        .unwrap();

    let strlen = ctx.c_abi.get(ctx, "strlen");
    let length = ctx
        .builder
        .build_call(strlen, &[buffer.into()], "length")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap()
        .into_int_value();
    let length = ctx.builder.build_int_truncate(length, i32t, "length_i32").unwrap();

    let string_new = ctx.module.get_function("string.new").expect("string.new emitted first");
    let result = ctx
        .builder
        .build_call(string_new, &[buffer.into(), length.into()], "result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

fn emit_to_float<'ctx>(ctx: &CodegenContext<'ctx>) {
    let i32t = ctx.context.i32_type();
    let f32t = ctx.context.f32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![i32t.into()];
    let function = declare(ctx, "int.to_float", &params, Some(f32t.into()));
    open_body(ctx, function);
    let self_value = function.get_nth_param(0).unwrap().into_int_value();
    let result = ctx.builder.build_signed_int_to_float(self_value, f32t, "as_float").unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

fn emit_binop<'ctx>(
    ctx: &CodegenContext<'ctx>,
    name: &'static str,
    build: impl FnOnce(&CodegenContext<'ctx>, inkwell::values::IntValue<'ctx>, inkwell::values::IntValue<'ctx>) -> inkwell::values::IntValue<'ctx>,
) {
    let i32t = ctx.context.i32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![i32t.into(), i32t.into()];
    let function = declare(ctx, name, &params, Some(i32t.into()));
    open_body(ctx, function);
    let lhs = function.get_nth_param(0).unwrap().into_int_value();
    let rhs = function.get_nth_param(1).unwrap().into_int_value();
    let result = build(ctx, lhs, rhs);
    ctx.builder.build_return(Some(&result)).unwrap();
}

fn emit_cmp<'ctx>(ctx: &CodegenContext<'ctx>, name: &'static str, predicate: IntPredicate) {
    let i32t = ctx.context.i32_type();
    let bool_t = ctx.context.bool_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![i32t.into(), i32t.into()];
    let function = declare(ctx, name, &params, Some(bool_t.into()));
    open_body(ctx, function);
    let lhs = function.get_nth_param(0).unwrap().into_int_value();
    let rhs = function.get_nth_param(1).unwrap().into_int_value();
    let result = ctx.builder.build_int_compare(predicate, lhs, rhs, "result").unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

/// `div_int`/`mod_int` guard against a zero divisor with the stdlib's own
/// `error(...)` call (§4.5) rather than trapping on `sdiv`/`srem`.
fn emit_checked_binop<'ctx>(
    ctx: &CodegenContext<'ctx>,
    name: &'static str,
    message: &str,
    build: impl FnOnce(&CodegenContext<'ctx>, inkwell::values::IntValue<'ctx>, inkwell::values::IntValue<'ctx>) -> inkwell::values::IntValue<'ctx>,
) {
    let i32t = ctx.context.i32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![i32t.into(), i32t.into()];
    let function = declare(ctx, name, &params, Some(i32t.into()));
    open_body(ctx, function);
    let lhs = function.get_nth_param(0).unwrap().into_int_value();
    let rhs = function.get_nth_param(1).unwrap().into_int_value();

    let is_zero = ctx.builder.build_int_compare(IntPredicate::EQ, rhs, i32t.const_zero(), "is_zero").unwrap();
    let error_block = ctx.context.append_basic_block(function, "div_by_zero");
    let ok_block = ctx.context.append_basic_block(function, "ok");
    ctx.builder.build_conditional_branch(is_zero, error_block, ok_block).unwrap();

    ctx.builder.position_at_end(error_block);
    super::toplevel::emit_error_call(ctx, message);
    ctx.builder.build_unreachable().unwrap();

    ctx.builder.position_at_end(ok_block);
    let result = build(ctx, lhs, rhs);
    ctx.builder.build_return(Some(&result)).unwrap();
}

pub fn emit<'ctx>(ctx: &CodegenContext<'ctx>) {
    emit_to_string(ctx);
    emit_to_float(ctx);

    emit_binop(ctx, "int.add_int", |ctx, l, r| ctx.builder.build_int_add(l, r, "sum").unwrap());
    emit_binop(ctx, "int.sub_int", |ctx, l, r| ctx.builder.build_int_sub(l, r, "diff").unwrap());
    emit_binop(ctx, "int.mul_int", |ctx, l, r| ctx.builder.build_int_mul(l, r, "prod").unwrap());
    emit_checked_binop(ctx, "int.div_int", "division by zero", |ctx, l, r| {
        ctx.builder.build_int_signed_div(l, r, "quot").unwrap()
    });
    emit_checked_binop(ctx, "int.mod_int", "modulo by zero", |ctx, l, r| {
        ctx.builder.build_int_signed_rem(l, r, "rem").unwrap()
    });

    emit_cmp(ctx, "int.eq_int", IntPredicate::EQ);
    emit_cmp(ctx, "int.neq_int", IntPredicate::NE);
    emit_cmp(ctx, "int.lt_int", IntPredicate::SLT);
    emit_cmp(ctx, "int.gt_int", IntPredicate::SGT);
    emit_cmp(ctx, "int.lte_int", IntPredicate::SLE);
    emit_cmp(ctx, "int.gte_int", IntPredicate::SGE);
}
