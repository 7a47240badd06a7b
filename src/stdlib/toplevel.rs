//! Top-level (receiver-less) functions (§4.5): `error`, `print`,
//! `print_literal`, `input`/`input(prompt)`.
//! Grounded on `original_source/cure/stdlib/builtins/builtins.py`.

use inkwell::module::Linkage;
use inkwell::types::BasicMetadataTypeEnum;
use inkwell::IntPredicate;

use crate::codegen::CodegenContext;
use crate::typechecker::scope::Scope;
use crate::typechecker::Type;

use super::{declare, open_body, ptr_type, string_struct_type};

pub fn install_types(scope: &mut Scope) {
    scope
        .add_constant(
            "error",
            Type::Function { params: vec![Type::String], return_value: Box::new(Type::Void) },
        )
        .expect("error registered exactly once");

    scope
        .add_constant(
            "print",
            Type::Function { params: vec![Type::Any], return_value: Box::new(Type::Void) },
        )
        .expect("print registered exactly once");

    scope
        .add_constant(
            "print_literal",
            Type::Function { params: vec![Type::String], return_value: Box::new(Type::Void) },
        )
        .expect("print_literal registered exactly once");

    scope
        .add_constant("input", Type::Function { params: vec![], return_value: Box::new(Type::String) })
        .expect("input registered exactly once");
    scope.add_toplevel_overload(
        "input",
        Type::Function { params: vec![Type::String], return_value: Box::new(Type::String) },
    );
}

/// `emit_error_call` (§4.8's `ctx.error`): every stdlib runtime guard (a
/// zero-divisor, an out-of-bounds index...) reaches here with a `&'static
/// str` literal rather than a runtime `string` value, so this builds the
/// `string` argument itself instead of going through a caller-supplied one.
/// Leaves the block open (without a terminator) so callers add their own
/// `build_unreachable` immediately after, matching the call site already
/// present in `int_type`/`float_type`/`string_type`/`DefinitionContext::error`.
pub(crate) fn emit_error_call<'ctx>(ctx: &CodegenContext<'ctx>, message: &str) {
    let i32t = ctx.context.i32_type();
    let literal = ctx.builder.build_global_string_ptr(message, "error_msg").unwrap().as_pointer_value();
    let string_new = ctx.module.get_function("string.new").expect("string.new emitted first");
    let as_string = ctx
        .builder
        .build_call(
            string_new,
            &[literal.into(), i32t.const_int(message.len() as u64, false).into()],
            "error_string",
        )
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();

    let params: Vec<BasicMetadataTypeEnum> = vec![string_struct_type(ctx).into()];
    let error_fn = declare(ctx, "error", &params, None);
    ctx.builder.build_call(error_fn, &[as_string.into()], "").unwrap();
}

/// `error(message) -> never`: `puts` the message, then `exit(1)`. The
/// backend signature is still `void`, not a true bottom type (Rust/LLVM have
/// none to reach for here) - every call site that reaches this function
/// follows it with its own `build_unreachable`.
fn emit_error<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![struct_ty.into()];
    let function = declare(ctx, "error", &params, None);
    open_body(ctx, function);

    let message = function.get_nth_param(0).unwrap().into_struct_value();
    let data = ctx.builder.build_extract_value(message, 0, "data").unwrap();

    let puts = ctx.c_abi.get(ctx, "puts");
    ctx.builder.build_call(puts, &[data.into()], "").unwrap();

    let exit = ctx.c_abi.get(ctx, "exit");
    ctx.builder
        .build_call(exit, &[ctx.context.i32_type().const_int(1, false).into()], "")
        .unwrap();
    ctx.builder.build_unreachable().unwrap();
}

/// One `print` specialization per primitive: convert via that type's
/// `to_string`, `puts` the buffer, then `Ref.dec` the resulting string since
/// nothing else owns it (the Python original's comment: the ordinary
/// reference-counting pass does not reach a library-author callback's own
/// locals). Stands in for the full per-callsite specialization-cache
/// protocol (§4.6.1/§4.7.5) for this one `any`-polymorphic builtin; see
/// DESIGN.md.
fn emit_print_specialization<'ctx>(
    ctx: &CodegenContext<'ctx>,
    suffix: &'static str,
    param_type: BasicMetadataTypeEnum<'ctx>,
    to_string_fn: &str,
) {
    let name: String = format!("print_{suffix}");
    let params: Vec<BasicMetadataTypeEnum> = vec![param_type];
    let function = declare(ctx, &name, &params, None);
    open_body(ctx, function);

    let value = function.get_nth_param(0).unwrap();
    let to_string = ctx.module.get_function(to_string_fn).unwrap_or_else(|| {
        panic!("{to_string_fn} must be emitted before print_{suffix}")
    });
    let as_string = ctx
        .builder
        .build_call(to_string, &[value.into()], "as_string")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap()
        .into_struct_value();

    let data = ctx.builder.build_extract_value(as_string, 0, "data").unwrap();
    let puts = ctx.c_abi.get(ctx, "puts");
    ctx.builder.build_call(puts, &[data.into()], "").unwrap();

    let ref_ptr = ctx.builder.build_extract_value(as_string, 2, "ref").unwrap();
    let ref_dec = ctx.module.get_function("Ref.dec").expect("Ref.dec emitted first");
    ctx.builder.build_call(ref_dec, &[ref_ptr.into()], "").unwrap();

    ctx.builder.build_return(None).unwrap();
}

fn emit_print<'ctx>(ctx: &CodegenContext<'ctx>) {
    let i32t = ctx.context.i32_type();
    let f32t = ctx.context.f32_type();
    let bool_t = ctx.context.bool_type();
    let struct_ty = string_struct_type(ctx);

    emit_print_specialization(ctx, "int", i32t.into(), "int.to_string");
    emit_print_specialization(ctx, "float", f32t.into(), "float.to_string");
    emit_print_specialization(ctx, "bool", bool_t.into(), "bool.to_string");
    emit_print_specialization(ctx, "string", struct_ty.into(), "string.to_string");
}

/// `print_literal(x)`: prints `x` unescaped through `printf`, treating its
/// buffer as the format string itself, exactly as the reference does -
/// callers are responsible for not passing attacker-controlled content.
fn emit_print_literal<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![struct_ty.into()];
    let function = declare(ctx, "print_literal", &params, None);
    open_body(ctx, function);

    let value = function.get_nth_param(0).unwrap().into_struct_value();
    let data = ctx.builder.build_extract_value(value, 0, "data").unwrap();
    let printf = ctx.c_abi.get(ctx, "printf");
    ctx.builder.build_call(printf, &[data.into()], "").unwrap();
    ctx.builder.build_return(None).unwrap();
}

const INPUT_BUFFER_SIZE: u32 = 256;

fn emit_input<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let i64t = ctx.context.i64_type();
    let i8t = ctx.context.i8_type();
    let function = declare(ctx, "input", &[], Some(struct_ty.into()));
    open_body(ctx, function);

    let buffer_ty = i8t.array_type(INPUT_BUFFER_SIZE);
    let buffer_global = ctx.module.add_global(buffer_ty, None, "input_buffer");
    buffer_global.set_linkage(Linkage::Private);
    buffer_global.set_initializer(&buffer_ty.const_zero());
    let buffer = buffer_global.as_pointer_value();

    let fgets = ctx.c_abi.get(ctx, "fgets");
    let stdin = match ctx.c_abi.target() {
        crate::target::Target::Linux => {
            let stdin_global = ctx.c_abi.stdin_global(ctx);
            ctx.builder
                .build_load(ptr_type(ctx), stdin_global.as_pointer_value(), "stdin")
                .unwrap()
                .into_pointer_value()
        }
        crate::target::Target::Windows => {
            let acrt_iob_func = ctx.c_abi.get(ctx, "__acrt_iob_func");
            ctx.builder
                .build_call(acrt_iob_func, &[ctx.context.i32_type().const_zero().into()], "stdin")
                .unwrap()
                .try_as_basic_value()
                .left()
                .unwrap()
                .into_pointer_value()
        }
    };
    ctx.builder
        .build_call(
            fgets,
            &[buffer.into(), ctx.context.i32_type().const_int(INPUT_BUFFER_SIZE as u64, false).into(), stdin.into()],
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

    let one = i64t.const_int(1, false);
    let last_index = ctx.builder.build_int_sub(length, one, "last_index").unwrap();
    let last_char_ptr = unsafe { ctx.builder.build_gep(i8t, buffer, &[last_index], "last_char_ptr").unwrap() };
    let last_char = ctx.builder.build_load(i8t, last_char_ptr, "last_char").unwrap().into_int_value();
    let is_newline = ctx
        .builder
        .build_int_compare(IntPredicate::EQ, last_char, i8t.const_int(b'\n' as u64, false), "is_newline")
        .unwrap();

    let strip_block = ctx.context.append_basic_block(function, "strip_newline");
    let merge_block = ctx.context.append_basic_block(function, "merge_length");
    let entry_block = ctx.builder.get_insert_block().unwrap();
    ctx.builder.build_conditional_branch(is_newline, strip_block, merge_block).unwrap();

    ctx.builder.position_at_end(strip_block);
    ctx.builder.build_store(last_char_ptr, i8t.const_zero()).unwrap();
    let stripped_length = ctx.builder.build_int_sub(length, one, "stripped_length").unwrap();
    ctx.builder.build_unconditional_branch(merge_block).unwrap();

    ctx.builder.position_at_end(merge_block);
    let final_length = ctx.builder.build_phi(i64t, "final_length").unwrap();
    final_length.add_incoming(&[(&length, entry_block), (&stripped_length, strip_block)]);

    let final_length_i32 = ctx
        .builder
        .build_int_truncate(final_length.as_basic_value().into_int_value(), ctx.context.i32_type(), "final_length_i32")
        .unwrap();
    let string_new = ctx.module.get_function("string.new").expect("string.new emitted first");
    let result = ctx
        .builder
        .build_call(string_new, &[buffer.into(), final_length_i32.into()], "result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

/// `input(prompt)` overload: print the prompt (unescaped, via `printf`'s
/// `%s`), then delegate to the zero-argument `input`.
fn emit_input_prompt<'ctx>(ctx: &CodegenContext<'ctx>) {
    let struct_ty = string_struct_type(ctx);
    let params: Vec<BasicMetadataTypeEnum> = vec![struct_ty.into()];
    let function = declare(ctx, "input_prompt", &params, Some(struct_ty.into()));
    open_body(ctx, function);

    let prompt = function.get_nth_param(0).unwrap().into_struct_value();
    let data = ctx.builder.build_extract_value(prompt, 0, "data").unwrap();
    let format = ctx.builder.build_global_string_ptr("%s", "prompt_fmt").unwrap().as_pointer_value();
    let printf = ctx.c_abi.get(ctx, "printf");
    ctx.builder.build_call(printf, &[format.into(), data.into()], "").unwrap();

    let input_fn = ctx.module.get_function("input").expect("input emitted first");
    let result = ctx
        .builder
        .build_call(input_fn, &[], "result")
        .unwrap()
        .try_as_basic_value()
        .left()
        .unwrap();
    ctx.builder.build_return(Some(&result)).unwrap();
}

pub fn emit<'ctx>(ctx: &CodegenContext<'ctx>) {
    emit_error(ctx);
    emit_print(ctx);
    emit_print_literal(ctx);
    emit_input(ctx);
    emit_input_prompt(ctx);
}
