//! # String Literal Code Generation
//!
//! This module implements LLVM code generation for string literals.
//! A literal's character data is stored as a global constant; the value
//! itself is the managed `string` struct built over it via `string.new`
//! (§4.5.1), so a literal participates in the same `Ref`-counting
//! discipline as any other `string` value.

use inkwell::values::BasicValueEnum;

use crate::{
    codegen::CodeGen, parser::ast::AstString, typechecker::Type, typechecker::ValidatedTypeInformation,
};

impl<'ctx> CodeGen<'ctx> for AstString<ValidatedTypeInformation> {
    type ReturnValue = BasicValueEnum<'ctx>;

    fn codegen(&self, ctx: &crate::codegen::CodegenContext<'ctx>) -> Self::ReturnValue {
        let AstString { value, .. } = self;
        let global = ctx.builder.build_global_string_ptr(value, "").unwrap();

        let string_new = ctx
            .module
            .get_function("string.new")
            .expect("string.new emitted before any string literal is generated");
        let length = ctx.context.i32_type().const_int(value.len() as u64, false);
        let string_value = ctx
            .builder
            .build_call(
                string_new,
                &[global.as_pointer_value().into(), length.into()],
                "literal",
            )
            .unwrap()
            .try_as_basic_value()
            .left()
            .expect("string.new returns a value");

        ctx.track_managed_value(&Type::String, string_value)
    }
}
