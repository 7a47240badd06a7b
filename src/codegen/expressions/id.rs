//! # Identifier Expression Code Generation
//!
//! This module implements LLVM code generation for identifier expressions in Y-lang.
//! Identifiers can reference constants, variables, or functions with different
//! resolution and loading strategies.
//!
//! ## Resolution Order
//!
//! 1. **Constants**: Compile-time known values stored globally
//! 2. **Variables**: Runtime values stored in stack or as parameters
//! 3. **Functions**: Function declarations stored in the symbol table
//!
//! ## Type-Specific Handling
//!
//! - **Strings**: Loaded as the managed `(data, length, ref)` struct like any
//!   other by-value local (§4.5.1)
//! - **Other types**: Loaded from memory addresses as values
//!
//! ## Memory Access Patterns
//!
//! Variables and constants are stored as pointers to their stack slot and
//! loaded back on every access.

use inkwell::values::BasicValueEnum;

use crate::{
    codegen::{convert_metadata_to_basic, CodeGen},
    parser::ast::Id,
    typechecker::ValidatedTypeInformation,
};

impl<'ctx> CodeGen<'ctx> for Id<ValidatedTypeInformation> {
    type ReturnValue = BasicValueEnum<'ctx>;

    /// Generates LLVM IR for identifier expressions.
    ///
    /// Resolves identifiers by searching through constants and variables,
    /// handling type-specific loading and access patterns.
    ///
    /// # Returns
    ///
    /// The LLVM value corresponding to the identifier, with appropriate
    /// loading and type conversion applied
    fn codegen(&self, ctx: &crate::codegen::CodegenContext<'ctx>) -> Self::ReturnValue {
        let Id {
            name,
            info: ValidatedTypeInformation { type_id, .. },
            ..
        } = self;

        // First try to find as a constant
        if let Some(constant) = ctx.find_constant(name) {
            // Constants are stored as global variable pointers, so we need to load their values
            return match constant {
                BasicValueEnum::PointerValue(pointer_value) => {
                    let Some(llvm_type) = convert_metadata_to_basic(ctx.get_llvm_type(type_id))
                    else {
                        return constant;
                    };

                    let val = ctx
                        .builder
                        .build_load(llvm_type, pointer_value, &format!("const_{}", name))
                        .unwrap();
                    val
                }
                _ => constant,
            };
        }

        // If not found as constant, try as a variable
        let variable = ctx.find_variable(name);

        let result = match variable {
            BasicValueEnum::PointerValue(pointer_value) => {
                let Some(llvm_type) = convert_metadata_to_basic(ctx.get_llvm_type(type_id)) else {
                    return variable;
                };

                ctx.builder.build_load(llvm_type, pointer_value, "").unwrap()
            }
            variable => variable,
        };

        result
    }
}
