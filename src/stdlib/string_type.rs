//! `string` (§4.5.1): the managed `(data, length, ref)` triple.
//! Grounded on `original_source/cure/stdlib/builtins/classes/string.py`.

use inkwell::types::BasicMetadataTypeEnum;
use inkwell::IntPredicate;

use crate::codegen::CodegenContext;
use crate::typechecker::scope::Scope;
use crate::typechecker::Type;

use super::{declare, open_body, ptr_type, string_struct_type};

pub fn install_types(scope: &mut Scope) {
    scope.add_type("string", Type::String).ok();

    let methods: &[(&str, Vec<Type>, Type)] = &[
        (
            "new",
            vec![Type::Reference(Box::new(Type::Character)), Type::Integer],
            Type::String,
        ),
        ("to_string", vec![], Type::String),
        ("get", vec![Type::Integer], Type::String),
        ("parse_int", vec![], Type::Integer),
        ("parse_float", vec![], Type::FloatingPoint),
        ("add_string", vec![Type::String], Type::String),
        ("eq_string", vec![Type::String], Type::Boolean),
        ("neq_string", vec![Type::String], Type::Boolean),
    ];

    for (name, params, ret) in methods {
        scope
            .add_method_to_type(
                Type::String,
                *name,
                Type::Function {
                    params: params.clone(),
                    return_value: Box::new(ret.clone()),
                },
            )
            .expect("string method registered exactly once");
    }

    scope
        .add_method_to_type(
            Type::String,
            "length",
            Type::Function {
                params: vec![],
                return_value: Box::new(Type::Integer),
            },
        )
        .expect("string.length registered exactly once");

    scope
        .add_method_to_type(
            Type::String,
            "set",
            Type::Function {
                params: vec![Type::Integer, Type::String],
                return_value: Box::new(Type::Void),
            },
        )
        .expect("string.set registered exactly once");
}

fn emit_new<'ctx>(ctx: &CodegenContext<'ctx>) {
    let ptr = ptr_type(ctx);
    let i32t = ctx.context.i32_type();
    let i64t = ctx.context.i64_type();
    let struct_ty = string_struct_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![ptr.into(), i32t.into()];
    let function = declare(ctx, "string.new", &params, Some(struct_ty.into()));
    open_body(ctx, function);

    let data = function.get_nth_param(0).unwrap().into_pointer_value();
    let length_i32 = function.get_nth_param(1).unwrap().into_int_value();
    // The `Ref`-managed layout stores `length` as `i64` (§3); the `int`
    // argument is `i32` (`TypeMap` root `int=i32`), so it is sign-extended.
    let length = ctx.builder.build_int_s_extend(length_i32, i64t, "length").unwrap();

    // `destroy_fn` is null: the data buffer behind a `string` is always owned
    // by plain `malloc`, so `Ref.dec` falls through to `free` (§4.5.1).
    let ref_new = ctx.module.get_function("Ref.new").expect("Ref installed before string");
    let ref_ptr = ctx
        .builder
        .build_call(ref_new, &[data.into(), ptr.const_null().into()], "ref")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();

    let mut value = struct_ty.get_undef();
    value = ctx.builder.build_insert_value(value, data, 0, "with_data").unwrap().into_struct_value();
    value = ctx.builder.build_insert_value(value, length, 1, "with_length").unwrap().into_struct_value();
    value = ctx.builder.build_insert_value(value, ref_ptr, 2, "with_ref").unwrap().into_struct_value();

    ctx.builder.build_return(Some(&value)).unwrap();
}

fn emit_to_string<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![struct_ty.into()];
    let function = declare(ctx, "string.to_string", &params, Some(struct_ty.into()));
    open_body(ctx, function);
    let self_value = function.get_nth_param(0).unwrap();
    ctx.builder.build_return(Some(&self_value)).unwrap();
}

/// `length` (§4.5.1): the `i64` field truncated to the `int` (`i32`) return
/// type the stdlib kernel declares for this property.
fn emit_length<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let i32t = ctx.context.i32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![struct_ty.into()];
    let function = declare(ctx, "string.length", &params, Some(i32t.into()));
    open_body(ctx, function);
    let self_value = function.get_nth_param(0).unwrap().into_struct_value();
    let length = ctx.builder.build_extract_value(self_value, 1, "length").unwrap().into_int_value();
    let truncated = ctx.builder.build_int_truncate(length, i32t, "length_i32").unwrap();
    ctx.builder.build_return(Some(&truncated)).unwrap();
}

/// `get(index)` (§4.5.1): negative indices wrap from the end; the bound
/// check is `index > length` (strict, not `>=` — an off-by-one the
/// reference implementation carries deliberately, preserved verbatim per §9).
fn emit_get<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let i32t = ctx.context.i32_type();
    let i64t = ctx.context.i64_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![struct_ty.into(), i32t.into()];
    let function = declare(ctx, "string.get", &params, Some(struct_ty.into()));
    open_body(ctx, function);

    let self_value = function.get_nth_param(0).unwrap().into_struct_value();
    let index_i32 = function.get_nth_param(1).unwrap().into_int_value();
    let index = ctx.builder.build_int_s_extend(index_i32, i64t, "index").unwrap();
    let data = ctx.builder.build_extract_value(self_value, 0, "data").unwrap().into_pointer_value();
    let length = ctx.builder.build_extract_value(self_value, 1, "length").unwrap().into_int_value();

    let is_neg = ctx
        .builder
        .build_int_compare(IntPredicate::SLT, index, i64t.const_zero(), "is_neg_idx")
        .unwrap();

    let neg_block = ctx.context.append_basic_block(function, "neg_idx");
    let merge_block = ctx.context.append_basic_block(function, "merge_idx");
    let entry_block = ctx.builder.get_insert_block().unwrap();
    ctx.builder.build_conditional_branch(is_neg, neg_block, merge_block).unwrap();

    ctx.builder.position_at_end(neg_block);
    let wrapped = ctx.builder.build_int_add(length, index, "wrapped_idx").unwrap();
    ctx.builder.build_unconditional_branch(merge_block).unwrap();

    ctx.builder.position_at_end(merge_block);
    let resolved_index = ctx.builder.build_phi(i64t, "resolved_idx").unwrap();
    resolved_index.add_incoming(&[(&index, entry_block), (&wrapped, neg_block)]);
    let resolved_index = resolved_index.as_basic_value().into_int_value();

    let oob = ctx
        .builder
        .build_int_compare(IntPredicate::SGT, resolved_index, length, "index_oob")
        .unwrap();

    let oob_block = ctx.context.append_basic_block(function, "index_oob_block");
    let ok_block = ctx.context.append_basic_block(function, "index_ok");
    ctx.builder.build_conditional_branch(oob, oob_block, ok_block).unwrap();

    ctx.builder.position_at_end(oob_block);
    super::toplevel::emit_error_call(ctx, "index out of bounds");
    ctx.builder.build_unreachable().unwrap();

    ctx.builder.position_at_end(ok_block);
    let char_ptr = unsafe {
        ctx.builder
            .build_gep(ctx.context.i8_type(), data, &[resolved_index], "char_ptr")
            .unwrap()
    };
    let string_new = ctx.module.get_function("string.new").expect("string.new emitted first");
    let result = ctx
        .builder
        .build_call(string_new, &[char_ptr.into(), i32t.const_int(1, false).into()], "result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

fn emit_parse_int<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let ptr = ptr_type(ctx);
    let i32t = ctx.context.i32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![struct_ty.into()];
    let function = declare(ctx, "string.parse_int", &params, Some(i32t.into()));
    open_body(ctx, function);

    let self_value = function.get_nth_param(0).unwrap().into_struct_value();
    let data = ctx.builder.build_extract_value(self_value, 0, "data").unwrap();
    // `strtol` returns `i64` per the C-ABI registry (§4.2); narrow to `int`.
    let strtol = ctx.c_abi.get(ctx, "strtol");
    let parsed = ctx
        .builder
        .build_call(
            strtol,
            &[data.into(), ptr.const_null().into(), i32t.const_int(10, false).into()],
            "parsed",
        )
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap()
        .into_int_value();
    let result = ctx.builder.build_int_truncate(parsed, i32t, "parsed_i32").unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

fn emit_parse_float<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let ptr = ptr_type(ctx);
    let f32t = ctx.context.f32_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![struct_ty.into()];
    let function = declare(ctx, "string.parse_float", &params, Some(f32t.into()));
    open_body(ctx, function);

    let self_value = function.get_nth_param(0).unwrap().into_struct_value();
    let data = ctx.builder.build_extract_value(self_value, 0, "data").unwrap();
    // `strtod` returns `f64` per the C-ABI registry (§4.2); narrow to `float`.
    let strtod = ctx.c_abi.get(ctx, "strtod");
    let parsed = ctx
        .builder
        .build_call(strtod, &[data.into(), ptr.const_null().into()], "parsed")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap()
        .into_float_value();
    let result = ctx.builder.build_float_trunc(parsed, f32t, "parsed_f32").unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

/// `set(index, value)` (§4.5.1): takes `self` by reference (a pointer to the
/// caller's spilled `string` struct) since it mutates the backing buffer
/// in place; writes `value`'s single byte at `data[index]`.
fn emit_set<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let ptr = ptr_type(ctx);
    let i32t = ctx.context.i32_type();
    let i64t = ctx.context.i64_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![ptr.into(), i32t.into(), struct_ty.into()];
    let function = declare(ctx, "string.set", &params, None);
    open_body(ctx, function);

    let self_ptr = function.get_nth_param(0).unwrap().into_pointer_value();
    let index_i32 = function.get_nth_param(1).unwrap().into_int_value();
    let index = ctx.builder.build_int_s_extend(index_i32, i64t, "index").unwrap();
    let value = function.get_nth_param(2).unwrap().into_struct_value();

    let data_field = ctx.builder.build_struct_gep(struct_ty, self_ptr, 0, "data_field").unwrap();
    let data = ctx
        .builder
        .build_load(ptr, data_field, "data")
        .unwrap()
        .into_pointer_value();
    let char_ptr = unsafe {
        ctx.builder
            .build_gep(ctx.context.i8_type(), data, &[index], "char_ptr")
            .unwrap()
    };
    let value_data = ctx
        .builder
        .build_extract_value(value, 0, "value_data")
        .unwrap()
        .into_pointer_value();
    let byte = ctx
        .builder
        .build_load(ctx.context.i8_type(), value_data, "byte")
        .unwrap();
    ctx.builder.build_store(char_ptr, byte).unwrap();
    ctx.builder.build_return(None).unwrap();
}

fn emit_add_string<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let i64t = ctx.context.i64_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![struct_ty.into(), struct_ty.into()];
    let function = declare(ctx, "string.add_string", &params, Some(struct_ty.into()));
    open_body(ctx, function);

    let lhs = function.get_nth_param(0).unwrap().into_struct_value();
    let rhs = function.get_nth_param(1).unwrap().into_struct_value();

    let lhs_data = ctx.builder.build_extract_value(lhs, 0, "lhs_data").unwrap().into_pointer_value();
    let lhs_len = ctx.builder.build_extract_value(lhs, 1, "lhs_len").unwrap().into_int_value();
    let rhs_data = ctx.builder.build_extract_value(rhs, 0, "rhs_data").unwrap().into_pointer_value();
    let rhs_len = ctx.builder.build_extract_value(rhs, 1, "rhs_len").unwrap().into_int_value();

    let total_len = ctx.builder.build_int_add(lhs_len, rhs_len, "total_len").unwrap();
    let buffer_len = ctx
        .builder
        .build_int_add(total_len, i64t.const_int(1, false), "buffer_len")
        .unwrap();

    let malloc = ctx.c_abi.get(ctx, "malloc");
    let buffer = ctx
        .builder
        .build_call(malloc, &[buffer_len.into()], "buffer")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap()
        .into_pointer_value();

    let memcpy = ctx.c_abi.get(ctx, "memcpy");
    ctx.builder
        .build_call(memcpy, &[buffer.into(), lhs_data.into(), lhs_len.into()], "")
        .unwrap();
    let tail = unsafe {
        ctx.builder
            .build_gep(ctx.context.i8_type(), buffer, &[lhs_len], "tail")
            .unwrap()
    };
    ctx.builder
        .build_call(memcpy, &[tail.into(), rhs_data.into(), rhs_len.into()], "")
        .unwrap();
    let nul = unsafe {
        ctx.builder
            .build_gep(ctx.context.i8_type(), buffer, &[total_len], "nul")
            .unwrap()
    };
    ctx.builder.build_store(nul, ctx.context.i8_type().const_zero()).unwrap();

    let total_len_i32 = ctx.builder.build_int_truncate(total_len, ctx.context.i32_type(), "total_len_i32").unwrap();
    let string_new = ctx.module.get_function("string.new").expect("string.new emitted first");
    let result = ctx
        .builder
        .build_call(string_new, &[buffer.into(), total_len_i32.into()], "result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

fn emit_cmp_string<'ctx>(ctx: &CodegenContext<'ctx>, name: &'static str, predicate: IntPredicate) {
    let struct_ty = string_struct_type(ctx);
    let bool_t = ctx.context.bool_type();
    let params: Vec<BasicMetadataTypeEnum> = vec![struct_ty.into(), struct_ty.into()];
    let function = declare(ctx, name, &params, Some(bool_t.into()));
    open_body(ctx, function);

    let lhs = function.get_nth_param(0).unwrap().into_struct_value();
    let rhs = function.get_nth_param(1).unwrap().into_struct_value();
    let lhs_data = ctx.builder.build_extract_value(lhs, 0, "lhs_data").unwrap();
    let rhs_data = ctx.builder.build_extract_value(rhs, 0, "rhs_data").unwrap();
    let lhs_len = ctx.builder.build_extract_value(lhs, 1, "lhs_len").unwrap();

    let memcmp = ctx.c_abi.get(ctx, "memcmp");
    let cmp = ctx
        .builder
        .build_call(memcmp, &[lhs_data.into(), rhs_data.into(), lhs_len.into()], "cmp")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap()
        .into_int_value();
    let result = ctx
        .builder
        .build_int_compare(predicate, cmp, ctx.context.i32_type().const_zero(), "result")
        .unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

pub fn emit<'ctx>(ctx: &CodegenContext<'ctx>) {
    emit_new(ctx);
    emit_to_string(ctx);
    emit_length(ctx);
    emit_get(ctx);
    emit_parse_int(ctx);
    emit_parse_float(ctx);
    emit_set(ctx);
    emit_add_string(ctx);
    emit_cmp_string(ctx, "string.eq_string", IntPredicate::EQ);
    emit_cmp_string(ctx, "string.neq_string", IntPredicate::NE);
}
