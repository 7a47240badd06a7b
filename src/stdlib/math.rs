//! `Math` (§4.5): static numeric helpers and constants, registered as a
//! zero-field struct type so `Math.sqrt(...)`/`Math.pi` resolve through the
//! ordinary attribute-access path (§4.6).
//! Grounded on `original_source/cure/stdlib/builtins/classes/Math.py`.

use inkwell::types::BasicMetadataTypeEnum;

use crate::codegen::CodegenContext;
use crate::typechecker::scope::Scope;
use crate::typechecker::Type;

use super::{declare, open_body};

pub(crate) fn math_type() -> Type {
    Type::Struct("Math".to_string(), vec![])
}

pub fn install_types(scope: &mut Scope) {
    let math = math_type();
    scope.add_type("Math", math.clone()).expect("Math registered exactly once");

    scope
        .add_method_to_type(
            math.clone(),
            "pi",
            Type::Function { params: vec![], return_value: Box::new(Type::FloatingPoint) },
        )
        .expect("Math.pi registered exactly once");
    scope
        .add_method_to_type(
            math.clone(),
            "e",
            Type::Function { params: vec![], return_value: Box::new(Type::FloatingPoint) },
        )
        .expect("Math.e registered exactly once");

    scope
        .add_method_to_type(
            math.clone(),
            "floor",
            Type::Function { params: vec![Type::FloatingPoint], return_value: Box::new(Type::Integer) },
        )
        .expect("Math.floor registered exactly once");
    scope
        .add_method_to_type(
            math.clone(),
            "ceil",
            Type::Function { params: vec![Type::FloatingPoint], return_value: Box::new(Type::Integer) },
        )
        .expect("Math.ceil registered exactly once");

    scope
        .add_method_to_type(
            math.clone(),
            "sqrt",
            Type::Function { params: vec![Type::FloatingPoint], return_value: Box::new(Type::FloatingPoint) },
        )
        .expect("Math.sqrt registered exactly once");
    scope.add_overload(
        math.clone(),
        "sqrt",
        Type::Function { params: vec![Type::Integer], return_value: Box::new(Type::Integer) },
    );

    scope
        .add_method_to_type(
            math.clone(),
            "pow",
            Type::Function {
                params: vec![Type::FloatingPoint, Type::FloatingPoint],
                return_value: Box::new(Type::FloatingPoint),
            },
        )
        .expect("Math.pow registered exactly once");
    scope.add_overload(
        math,
        "pow",
        Type::Function { params: vec![Type::Integer, Type::Integer], return_value: Box::new(Type::Integer) },
    );
}

fn emit_constant<'ctx>(ctx: &CodegenContext<'ctx>, name: &'static str, value: f64) {
    let f32t = ctx.context.f32_type();
    let function = declare(ctx, name, &[], Some(f32t.into()));
    open_body(ctx, function);
    let result = f32t.const_float(value);
    ctx.builder.build_return(Some(&result)).unwrap();
}

/// `floor`/`ceil` go straight through `floorf`/`ceilf` (§4.2) since `float`
/// is itself `f32` — no promotion needed.
fn emit_round<'ctx>(ctx: &CodegenContext<'ctx>, name: &'static str, c_fn: &'static str) {
    let f32t = ctx.context.f32_type();
    let i32t = ctx.context.i32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![f32t.into()];
    let function = declare(ctx, name, &params, Some(i32t.into()));
    open_body(ctx, function);

    let self_value = function.get_nth_param(0).unwrap().into_float_value();
    let rounded = ctx
        .builder
        .build_call(ctx.c_abi.get(ctx, c_fn), &[self_value.into()], "rounded")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap()
        .into_float_value();
    let result = ctx.builder.build_float_to_signed_int(rounded, i32t, "as_int").unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

fn emit_sqrt<'ctx>(ctx: &CodegenContext<'ctx>) {
    let f32t = ctx.context.f32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![f32t.into()];
    let function = declare(ctx, "Math.sqrt", &params, Some(f32t.into()));
    open_body(ctx, function);

    let self_value = function.get_nth_param(0).unwrap().into_float_value();
    let result = ctx
        .builder
        .build_call(ctx.c_abi.get(ctx, "sqrtf"), &[self_value.into()], "result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

/// `sqrt(int) -> int` overload: casts through `float`.
fn emit_sqrt_int<'ctx>(ctx: &CodegenContext<'ctx>) {
    let i32t = ctx.context.i32_type();
    let f32t = ctx.context.f32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![i32t.into()];
    let function = declare(ctx, "Math.sqrt_int", &params, Some(i32t.into()));
    open_body(ctx, function);

    let self_value = function.get_nth_param(0).unwrap().into_int_value();
    let as_float = ctx.builder.build_signed_int_to_float(self_value, f32t, "as_float").unwrap();
    let sqrt_fn = ctx.module.get_function("Math.sqrt").expect("Math.sqrt emitted first");
    let result = ctx
        .builder
        .build_call(sqrt_fn, &[as_float.into()], "result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap()
        .into_float_value();
    let as_int = ctx.builder.build_float_to_signed_int(result, i32t, "as_int").unwrap();
    ctx.builder.build_return(Some(&as_int)).unwrap();
}

fn emit_pow<'ctx>(ctx: &CodegenContext<'ctx>) {
    let f32t = ctx.context.f32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![f32t.into(), f32t.into()];
    let function = declare(ctx, "Math.pow", &params, Some(f32t.into()));
    open_body(ctx, function);

    let base = function.get_nth_param(0).unwrap().into_float_value();
    let exponent = function.get_nth_param(1).unwrap().into_float_value();
    let result = ctx
        .builder
        .build_call(ctx.c_abi.get(ctx, "powf"), &[base.into(), exponent.into()], "result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

/// `pow(int, int) -> int` overload: casts through `float`.
fn emit_pow_int<'ctx>(ctx: &CodegenContext<'ctx>) {
    let i32t = ctx.context.i32_type();
    let f32t = ctx.context.f32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![i32t.into(), i32t.into()];
    let function = declare(ctx, "Math.pow_int", &params, Some(i32t.into()));
    open_body(ctx, function);

    let base = function.get_nth_param(0).unwrap().into_int_value();
    let exponent = function.get_nth_param(1).unwrap().into_int_value();
    let base_f = ctx.builder.build_signed_int_to_float(base, f32t, "base_f").unwrap();
    let exp_f = ctx.builder.build_signed_int_to_float(exponent, f32t, "exp_f").unwrap();
    let pow_fn = ctx.module.get_function("Math.pow").expect("Math.pow emitted first");
    let result = ctx
        .builder
        .build_call(pow_fn, &[base_f.into(), exp_f.into()], "result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap()
        .into_float_value();
    let as_int = ctx.builder.build_float_to_signed_int(result, i32t, "as_int").unwrap();
    ctx.builder.build_return(Some(&as_int)).unwrap();
}

pub fn emit<'ctx>(ctx: &CodegenContext<'ctx>) {
    emit_constant(ctx, "Math.pi", std::f64::consts::PI);
    emit_constant(ctx, "Math.e", std::f64::consts::E);
    emit_round(ctx, "Math.floor", "floorf");
    emit_round(ctx, "Math.ceil", "ceilf");
    emit_sqrt(ctx);
    emit_sqrt_int(ctx);
    emit_pow(ctx);
    emit_pow_int(ctx);
}
