//! `float` (§4.5): 32-bit IEEE-754 floating point primitive (`TypeMap` root entry `float=f32`).
//! Grounded on `original_source/cure/stdlib/builtins/float.py`.

use inkwell::types::BasicMetadataTypeEnum;
use inkwell::FloatPredicate;

use crate::codegen::CodegenContext;
use crate::typechecker::scope::Scope;
use crate::typechecker::Type;

use super::{declare, open_body, string_struct_type};

pub fn install_types(scope: &mut Scope) {
    scope
        .add_method_to_type(
            Type::FloatingPoint,
            "to_string",
            Type::Function { params: vec![], return_value: Box::new(Type::String) },
        )
        .expect("float.to_string registered exactly once");
    scope
        .add_method_to_type(
            Type::FloatingPoint,
            "to_int",
            Type::Function { params: vec![], return_value: Box::new(Type::Integer) },
        )
        .expect("float.to_int registered exactly once");

    let arith: &[&str] = &["add_float", "sub_float", "mul_float", "div_float", "mod_float"];
    for name in arith {
        scope
            .add_method_to_type(
                Type::FloatingPoint,
                *name,
                Type::Function { params: vec![Type::FloatingPoint], return_value: Box::new(Type::FloatingPoint) },
            )
            .expect("float arithmetic method registered exactly once");
    }

    let cmp: &[&str] = &["eq_float", "neq_float", "lt_float", "gt_float", "lte_float", "gte_float"];
    for name in cmp {
        scope
            .add_method_to_type(
                Type::FloatingPoint,
                *name,
                Type::Function { params: vec![Type::FloatingPoint], return_value: Box::new(Type::Boolean) },
            )
            .expect("float comparison method registered exactly once");
    }
}

fn emit_to_string<'ctx>(ctx: &CodegenContext<'ctx>) {
    let f32t = ctx.context.f32_type();
    let f64t = ctx.context.f64_type();
    let i32t = ctx.context.i32_type();
    let i64t = ctx.context.i64_type();
    let struct_ty = string_struct_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![f32t.into()];
    let function = declare(ctx, "float.to_string", &params, Some(struct_ty.into()));
    open_body(ctx, function);

    let self_value = function.get_nth_param(0).unwrap().into_float_value();

    let buffer_ty = ctx.context.i8_type().array_type(64);
    let buffer = ctx.builder.build_alloca(buffer_ty, "buffer").unwrap();
    let format = ctx.builder.build_global_string_ptr("%f", "float_fmt").unwrap().as_pointer_value();

    // C variadic calling convention promotes `float` to `double`; extend before
    // the `snprintf` call regardless of `float`'s own `f32` backend width.
    let promoted = ctx.builder.build_float_ext(self_value, f64t, "promoted").unwrap();
    let snprintf = ctx.c_abi.get(ctx, "snprintf");
    ctx.builder
        .build_call(
            snprintf,
            &[buffer.into(), i64t.const_int(64, false).into(), format.into(), promoted.into()],
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

fn emit_to_int<'ctx>(ctx: &CodegenContext<'ctx>) {
    let f32t = ctx.context.f32_type();
    let i32t = ctx.context.i32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![f32t.into()];
    let function = declare(ctx, "float.to_int", &params, Some(i32t.into()));
    open_body(ctx, function);
    let self_value = function.get_nth_param(0).unwrap().into_float_value();
    let result = ctx.builder.build_float_to_signed_int(self_value, i32t, "as_int").unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

fn emit_binop<'ctx>(
    ctx: &CodegenContext<'ctx>,
    name: &'static str,
    build: impl FnOnce(&CodegenContext<'ctx>, inkwell::values::FloatValue<'ctx>, inkwell::values::FloatValue<'ctx>) -> inkwell::values::FloatValue<'ctx>,
) {
    let f32t = ctx.context.f32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![f32t.into(), f32t.into()];
    let function = declare(ctx, name, &params, Some(f32t.into()));
    open_body(ctx, function);
    let lhs = function.get_nth_param(0).unwrap().into_float_value();
    let rhs = function.get_nth_param(1).unwrap().into_float_value();
    let result = build(ctx, lhs, rhs);
    ctx.builder.build_return(Some(&result)).unwrap();
}

fn emit_checked_binop<'ctx>(
    ctx: &CodegenContext<'ctx>,
    name: &'static str,
    message: &str,
    build: impl FnOnce(&CodegenContext<'ctx>, inkwell::values::FloatValue<'ctx>, inkwell::values::FloatValue<'ctx>) -> inkwell::values::FloatValue<'ctx>,
) {
    let f32t = ctx.context.f32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![f32t.into(), f32t.into()];
    let function = declare(ctx, name, &params, Some(f32t.into()));
    open_body(ctx, function);
    let lhs = function.get_nth_param(0).unwrap().into_float_value();
    let rhs = function.get_nth_param(1).unwrap().into_float_value();

    let is_zero = ctx
        .builder
        .build_float_compare(FloatPredicate::OEQ, rhs, f32t.const_zero(), "is_zero")
        .unwrap();
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

fn emit_cmp<'ctx>(ctx: &CodegenContext<'ctx>, name: &'static str, predicate: FloatPredicate) {
    let f32t = ctx.context.f32_type();
    let bool_t = ctx.context.bool_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![f32t.into(), f32t.into()];
    let function = declare(ctx, name, &params, Some(bool_t.into()));
    open_body(ctx, function);
    let lhs = function.get_nth_param(0).unwrap().into_float_value();
    let rhs = function.get_nth_param(1).unwrap().into_float_value();
    let result = ctx.builder.build_float_compare(predicate, lhs, rhs, "result").unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

pub fn emit<'ctx>(ctx: &CodegenContext<'ctx>) {
    emit_to_string(ctx);
    emit_to_int(ctx);

    emit_binop(ctx, "float.add_float", |ctx, l, r| ctx.builder.build_float_add(l, r, "sum").unwrap());
    emit_binop(ctx, "float.sub_float", |ctx, l, r| ctx.builder.build_float_sub(l, r, "diff").unwrap());
    emit_binop(ctx, "float.mul_float", |ctx, l, r| ctx.builder.build_float_mul(l, r, "prod").unwrap());
    emit_checked_binop(ctx, "float.div_float", "division by zero", |ctx, l, r| {
        ctx.builder.build_float_div(l, r, "quot").unwrap()
    });
    emit_checked_binop(ctx, "float.mod_float", "modulo by zero", |ctx, l, r| {
        ctx.builder.build_float_rem(l, r, "rem").unwrap()
    });

    emit_cmp(ctx, "float.eq_float", FloatPredicate::OEQ);
    emit_cmp(ctx, "float.neq_float", FloatPredicate::ONE);
    emit_cmp(ctx, "float.lt_float", FloatPredicate::OLT);
    emit_cmp(ctx, "float.gt_float", FloatPredicate::OGT);
    emit_cmp(ctx, "float.lte_float", FloatPredicate::OLE);
    emit_cmp(ctx, "float.gte_float", FloatPredicate::OGE);
}
