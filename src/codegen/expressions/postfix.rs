//! # Postfix Expression Code Generation
//!
//! This module implements LLVM code generation for postfix expressions in Y-lang.
//! Postfix expressions include array indexing, property access, and function calls.
//!
//! ## Supported Operations
//!
//! ### Array Indexing (`expr[index]`)
//! - **GEP Operations**: Uses LLVM's `build_gep` for safe pointer arithmetic
//! - **Type Safety**: Validates array types and converts indices to appropriate types
//! - **Memory Access**: Loads values from computed array element addresses
//!
//! ### Property Access (`expr.field`)
//! - **Struct Field Access**: Uses `build_struct_gep` for field pointer calculation
//! - **Temporary Allocation**: Handles value structs by allocating temporary storage
//! - **Type Validation**: Ensures accessed fields exist in the struct type
//!
//! ### Function Calls (`expr(args...)`)
//! - **Direct Calls**: Named functions resolved from the module
//! - **Stdlib Methods**: Zero-arg built-in methods resolved via the type checker's
//!   recorded callee mapping (`get_resolved_callee`)
//!
//! ## LLVM Operations Used
//!
//! - **GEP**: For safe pointer arithmetic in arrays and structs
//! - **Load/Store**: For memory access and temporary allocation
//! - **Function Calls**: Direct call patterns

use inkwell::values::{BasicMetadataValueEnum, BasicValueEnum};

use crate::{
    codegen::{convert_metadata_to_basic, CodeGen, CodegenContext},
    parser::ast::{Expression, Postfix},
    typechecker::{Type, ValidatedTypeInformation},
};

impl<'ctx> CodeGen<'ctx> for Postfix<ValidatedTypeInformation> {
    type ReturnValue = Option<BasicValueEnum<'ctx>>;

    /// Generates LLVM IR for postfix expressions.
    ///
    /// This method dispatches to specialized handlers for each type of postfix operation.
    /// Each operation has different LLVM IR generation requirements and memory access patterns.
    ///
    /// ## Operation Dispatch
    ///
    /// - **`Call`**: Handled by `codegen_call` with complex function resolution logic
    /// - **`Index`**: Array element access using GEP and load operations
    /// - **`PropertyAccess`**: Struct field access with type validation and GEP
    ///
    /// ## Memory Access Patterns
    ///
    /// Different postfix operations have different memory access characteristics:
    /// - **Array indexing**: Always results in a load from computed address
    /// - **Property access**: May require temporary allocation for value structs
    /// - **Function calls**: May be direct, indirect, or method calls with varying conventions
    ///
    /// # Returns
    ///
    /// `Some(BasicValueEnum)` containing the result value, or `None` for void operations
    fn codegen(&self, ctx: &crate::codegen::CodegenContext<'ctx>) -> Self::ReturnValue {
        match self {
            Postfix::Call { expr, args, info, .. } => {
                let result = Self::codegen_call(ctx, expr, args);
                result.map(|value| ctx.track_managed_value(&info.type_id, value))
            }
            // Array indexing: expr[index] -> element value
            Postfix::Index { expr, index, .. } => {
                // Generate code for the array expression (should produce a pointer to array)
                let Some(array_value) = expr.codegen(ctx) else {
                    unreachable!("Array expression must produce a value")
                };

                // Generate code for the index expression (should produce an integer)
                let Some(index_value) = index.codegen(ctx) else {
                    unreachable!("Index expression must produce a value")
                };

                let array_ptr = array_value.into_pointer_value();
                let index_int = index_value.into_int_value();

                // Extract array element type from Y-lang type system
                let expr_type = &expr.get_info().type_id;
                let Type::Array(element_type) = expr_type else {
                    unreachable!("Index expression must be on array type")
                };

                // Convert element type to LLVM representation
                let llvm_element_type = ctx.get_llvm_type(element_type);
                let element_basic_type = convert_metadata_to_basic(llvm_element_type)
                    .expect("Array element type must be basic");

                // Use GEP (GetElementPtr) to calculate the address of the indexed element
                // This is safe pointer arithmetic - LLVM ensures bounds are respected
                let element_ptr = unsafe {
                    ctx.builder
                        .build_gep(
                            element_basic_type,
                            array_ptr,
                            &[index_int], // Single index for linear array access
                            "array_index",
                        )
                        .unwrap()
                };

                // Load the actual value from the computed address
                let element_value = ctx
                    .builder
                    .build_load(element_basic_type, element_ptr, "array_elem")
                    .unwrap();

                Some(ctx.track_managed_value(element_type, element_value))
            }
            // Property access: expr.field -> field value, or expr.method() -> a
            // zero-arg call against the callee the analyser resolved (§4.6),
            // mirroring `binary.rs`'s resolved-callee lookup for `s.length`.
            Postfix::PropertyAccess {
                expr,
                property,
                info: ValidatedTypeInformation { context, .. },
                position,
            } if !matches!(&expr.get_info().type_id, Type::Struct(_, _)) => {
                let Some(receiver) = expr.codegen(ctx) else {
                    panic!("receiver expression must produce a value for property access");
                };

                let callee = context.scope.get_resolved_callee(position).unwrap_or_else(|| {
                    panic!(
                        "property access `.{}` at {position:?} has no resolved callee recorded by the analyser",
                        property.name
                    )
                });
                let function = ctx.module.get_function(&callee).unwrap_or_else(|| {
                    panic!("resolved callee '{callee}' was never emitted by the standard-library kernel")
                });

                let value = ctx.track_managed_value(&expr.get_info().type_id, receiver);
                return ctx
                    .builder
                    .build_call(function, &[value.into()], "")
                    .unwrap()
                    .try_as_basic_value()
                    .left();
            }
            // Struct field access: expr.field -> field value
            Postfix::PropertyAccess { expr, property, .. } => {
                // Generate code for the struct expression
                let Some(struct_value) = expr.codegen(ctx) else {
                    panic!("Struct expression must produce a value for property access");
                };

                let property_name = &property.name;

                // Extract struct type information and validate field existence
                // This uses Y-lang's type system to ensure type safety
                let (struct_name, field_types, field_index) = match &expr.get_info().type_id {
                    Type::Struct(struct_name, field_types) => {
                        // Linear search for field index by name
                        let field_index = field_types
                            .iter()
                            .position(|(name, _)| name == property_name)
                            .unwrap_or_else(|| {
                                panic!(
                                    "Field {} not found in struct {}",
                                    property_name, struct_name
                                )
                            });
                        (struct_name.clone(), field_types.clone(), field_index)
                    }
                    other_type => {
                        panic!(
                            "Property access only supported on struct types, got: {:?}",
                            other_type
                        );
                    }
                };

                // Retrieve the corresponding LLVM struct type from the type cache
                let struct_type = {
                    let types_guard = ctx.types.borrow();
                    let struct_type_id = Type::Struct(struct_name.clone(), field_types.clone());

                    match types_guard.get(&struct_type_id) {
                        Some(llvm_type) => {
                            if let inkwell::types::BasicMetadataTypeEnum::StructType(struct_type) =
                                llvm_type
                            {
                                *struct_type
                            } else {
                                panic!(
                                    "Expected struct type for property access, got: {:?}",
                                    llvm_type
                                )
                            }
                        }
                        None => {
                            panic!(
                                "Struct type {} not found in type context for property access",
                                struct_name
                            );
                        }
                    }
                };

                // Handle both pointer and value structs
                // Value structs need temporary allocation for GEP operations
                let struct_ptr = if struct_value.is_pointer_value() {
                    // Already a pointer - use directly
                    struct_value.into_pointer_value()
                } else {
                    // Value struct - allocate temporary storage and store the value
                    let temp_ptr = ctx
                        .builder
                        .build_alloca(struct_type, "temp_struct")
                        .unwrap();
                    ctx.builder.build_store(temp_ptr, struct_value).unwrap();
                    temp_ptr
                };

                // Use struct GEP to get pointer to the specific field
                // Requires two indices: [0, field_index] for struct field access
                let field_ptr = unsafe {
                    ctx.builder
                        .build_gep(
                            struct_type,
                            struct_ptr,
                            &[
                                ctx.context.i32_type().const_zero(), // Struct base offset
                                ctx.context.i32_type().const_int(field_index as u64, false), // Field offset
                            ],
                            &format!(
                                "{}_{}",
                                struct_ptr.get_name().to_string_lossy(),
                                property_name
                            ),
                        )
                        .unwrap()
                };

                // Load the field value from the computed address
                let field_value = ctx
                    .builder
                    .build_load(
                        struct_type
                            .get_field_type_at_index(field_index as u32)
                            .expect("Field type must exist"),
                        field_ptr,
                        property_name,
                    )
                    .unwrap();

                Some(field_value)
            }
        }
    }
}

impl<'ctx> Postfix<ValidatedTypeInformation> {
    /// Generates LLVM IR for a direct function call `name(args...)`.
    ///
    /// Every callee in Cure is a named top-level function, so this always resolves
    /// by name in the module rather than through an indirect/closure value. The
    /// single exception is `print`, whose mangled callee depends on the static
    /// type of its one argument (§4.6.1).
    ///
    /// # Parameters
    ///
    /// * `ctx` - Code generation context
    /// * `expr` - The callee expression, always `Expression::Id`
    /// * `args` - Function arguments to be passed
    ///
    /// # Returns
    ///
    /// `Some(BasicValueEnum)` for non-void functions, `None` for void functions
    fn codegen_call(
        ctx: &CodegenContext<'ctx>,
        expr: &Expression<ValidatedTypeInformation>,
        args: &[Expression<ValidatedTypeInformation>],
    ) -> Option<BasicValueEnum<'ctx>> {
        let Type::Function { .. } = expr.get_info().type_id else {
            unreachable!()
        };

        let call_args = args;
        let args = call_args
            .iter()
            .map(|arg| {
                let Some(arg) = arg.codegen(ctx) else {
                    unreachable!()
                };
                arg.into()
            })
            .collect::<Vec<BasicMetadataValueEnum<'ctx>>>();

        // Every callable in Cure is a named top-level function, so the callee is
        // always resolved by name rather than through an indirect/closure value.
        let Expression::Id(id) = expr else {
            unreachable!("call expression must be a direct function reference")
        };

        // `print`'s single `any` parameter (§4.6.1) fans out to one
        // specialization per concrete argument type rather than a single
        // polymorphic body; resolve the mangled callee from the static
        // type of the one argument at this call site.
        let function_name = if id.name == "print" {
            let arg_type = call_args[0].get_info().type_id.clone();
            format!("print_{}", arg_type.stdlib_name())
        } else {
            id.name.clone()
        };

        let llvm_function = ctx
            .module
            .get_function(&function_name)
            .unwrap_or_else(|| panic!("function '{function_name}' was never declared"));

        ctx.builder
            .build_call(llvm_function, &args, "")
            .unwrap()
            .try_as_basic_value()
            .left()
    }
}
