//! # Variable Initialization Code Generation
//!
//! This module implements LLVM code generation for variable initialization statements in Y-lang.
//! It handles the creation of new variables with initial values, managing both memory allocation
//! and value storage in a single operation.
//!
//! ## Variable Initialization Process
//!
//! Variable initialization in Y-lang follows a three-step process:
//! 1. **Value generation**: Compute the initial value using expression code generation
//! 2. **Memory allocation**: Allocate stack memory for the variable using LLVM alloca
//! 3. **Value storage**: Store the initial value in the allocated memory
//! 4. **Symbol registration**: Register the variable in the current scope for future access
//!
//! ## Memory Management Strategy
//!
//! ### Stack Allocation
//! All Y-lang variables are allocated on the stack using LLVM's `alloca` instruction:
//! - **Automatic cleanup**: Stack variables are automatically freed when scope exits
//! - **Performance**: Stack allocation is faster than heap allocation
//! - **Optimization**: LLVM can optimize stack variable access patterns
//! - **Safety**: No manual memory management required
//!
//! ### Type-driven Allocation
//! The allocation size is determined by the validated type information:
//! - **Primitive types**: Direct mapping to LLVM basic types (i32, f64, i1, etc.)
//! - **Complex types**: Struct and array types use their computed LLVM layouts
//! - **Function types**: Unreachable; no surface syntax stores a function by value
//!
//! ## LLVM Integration
//!
//! ### Alloca Instructions
//! Variable allocation uses LLVM's `alloca` instruction because:
//! - **Scope awareness**: Variables are automatically cleaned up on scope exit
//! - **Register promotion**: LLVM can promote frequently-used variables to registers
//! - **Stack frame optimization**: Multiple allocas can be combined into a single frame
//! - **Debug information**: Stack variables integrate well with debugging tools
//!
//! ### Store Instructions
//! Initial value storage uses LLVM's `store` instruction for:
//! - **Type safety**: Ensures value and storage types are compatible
//! - **Memory ordering**: Respects target architecture memory models
//! - **Optimization**: Enables store-to-load forwarding and elimination
//!
//! ## Symbol Table Integration
//!
//! After memory allocation and initialization, variables are registered in the current scope:
//! - **Name resolution**: Enables future identifier lookups to find the variable
//! - **Scope management**: Variables are automatically removed when scope exits
//! - **Type consistency**: Stored LLVM values maintain type information
//!
//! ## Error Handling
//!
//! The module includes comprehensive error handling for:
//! - **Type conversion failures**: When Y-lang types can't be mapped to LLVM types
//! - **Allocation failures**: When LLVM alloca operations fail
//! - **Store failures**: When value storage operations fail due to type mismatches

use crate::{
    codegen::{convert_metadata_to_basic, CodeGen},
    parser::ast::Initialisation,
    typechecker::ValidatedTypeInformation,
};

impl<'ctx> CodeGen<'ctx> for Initialisation<ValidatedTypeInformation> {
    type ReturnValue = ();

    /// Generates LLVM IR for variable initialization statements.
    ///
    /// This function implements the complete variable initialization process,
    /// from initial value computation to memory allocation and symbol registration.
    /// It serves as the foundation for Y-lang's variable declaration system.
    ///
    /// ## Implementation Process
    ///
    /// 1. **Value Generation**: Generate LLVM IR for the initialization expression
    /// 2. **Type Resolution**: Extract validated type information for memory allocation
    /// 3. **Memory Allocation**: Allocate stack memory using LLVM alloca instruction
    /// 4. **Value Storage**: Store the computed value in the allocated memory
    /// 5. **Symbol Registration**: Register the variable in the current scope
    ///
    /// ## LLVM Alloca Strategy
    ///
    /// The function uses LLVM's `alloca` instruction for variable allocation because:
    ///
    /// ### Stack-based Allocation
    /// - **Automatic cleanup**: No manual memory management required
    /// - **Performance**: Faster than heap allocation for local variables
    /// - **LLVM optimization**: Enables register promotion and stack optimization
    /// - **Debug support**: Better debugging information for stack variables
    ///
    /// ### Type-safe Allocation
    /// The allocation size is computed from Y-lang type information:
    /// - **Metadata conversion**: Converts LLVM metadata types to basic types
    /// - **Size calculation**: LLVM automatically calculates proper size and alignment
    /// - **Type verification**: Ensures allocated memory matches value type
    ///
    /// ## Memory Layout Considerations
    ///
    /// ### Primitive Types
    /// Simple types map directly to LLVM types:
    /// - **Boolean**: `i1` (1 bit, but typically byte-aligned)
    /// - **Character**: `i8` (8 bits, ASCII/UTF-8 code point)
    /// - **Integer**: `i32` (32 bits, signed)
    /// - **Float**: `f64` (64 bits, IEEE 754 double precision)
    ///
    /// ### Complex Types
    /// Structured types use computed layouts:
    /// - **Structs**: Field layout determined by type checker
    /// - **Arrays**: Element type and size determined by type system
    /// - **Functions**: Unreachable; no surface syntax stores a function by value
    ///
    /// ## Error Handling Philosophy
    ///
    /// The function uses different error handling strategies based on error likelihood:
    ///
    /// ### Unreachable Conditions
    /// Some failures are marked as `unreachable!()` because:
    /// - Type checker guarantees valid types before code generation
    /// - Expression code generation must produce values for initialization
    /// - These represent compiler bugs, not user errors
    ///
    /// ### Expected Failures
    /// Other failures use `expect()` with descriptive messages:
    /// - Type conversion failures indicate internal inconsistencies
    /// - Allocation failures suggest memory or type system issues
    /// - Store failures indicate type compatibility problems
    ///
    /// ## Symbol Table Integration
    ///
    /// After successful initialization, the variable is registered in the current scope:
    /// - **Name binding**: Associates the variable name with its LLVM value
    /// - **Type preservation**: LLVM value maintains type information
    /// - **Scope management**: Variable is automatically cleaned up on scope exit
    /// - **Future access**: Enables identifier resolution in subsequent code
    ///
    /// # Returns
    ///
    /// `()` - Variable initialization is a statement-level operation
    ///
    /// # Panics
    ///
    /// - **Type conversion failure**: When Y-lang type can't be converted to LLVM basic type
    /// - **Allocation failure**: When LLVM alloca instruction fails
    /// - **Store failure**: When storing the value in allocated memory fails
    /// - **Value generation failure**: When initialization expression doesn't produce a value
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // Simple initialization: let x = 42
    /// // LLVM IR generated:
    /// // %x = alloca i32
    /// // store i32 42, ptr %x
    ///
    /// // Complex initialization: let point = Point { x: 10, y: 20 }
    /// // LLVM IR generated:
    /// // %point = alloca %Point
    /// // %temp_struct = ... (struct initialization)
    /// // store %Point %temp_struct, ptr %point
    /// ```
    fn codegen(&self, ctx: &crate::codegen::CodegenContext<'ctx>) -> Self::ReturnValue {
        let Initialisation { id, value, .. } = self;

        // Extract validated type information for memory allocation
        // This is crucial for determining the correct LLVM type and allocation size
        let ValidatedTypeInformation { type_id, .. } = value.get_info();

        // Step 1: Generate LLVM IR for the initialization value
        // This computes the value that will be stored in the new variable
        let Some(llvm_value) = value.codegen(ctx) else {
            unreachable!("Initialization value must produce a value")
        };

        // Step 2: Allocate stack memory for the variable
        // Convert Y-lang type to LLVM basic type for proper allocation
        let llvm_alloca = ctx
            .builder
            .build_alloca(
                convert_metadata_to_basic(ctx.get_llvm_type(&type_id))
                    .expect("Type conversion should not fail with validated types"),
                &id.name,
            )
            .expect("Stack allocation should not fail");

        // Step 3: Store the initial value in the allocated memory
        // This establishes the variable's initial state
        if let Err(e) = ctx.builder.build_store(llvm_alloca, llvm_value) {
            panic!("Failed to store initial value: {e}");
        };

        // Step 4: Register the variable in the current scope
        // This enables future identifier lookups to find this variable
        ctx.store_variable(&id.name, llvm_alloca.into());
    }
}
