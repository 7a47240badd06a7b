//! # Constant Declaration Code Generation
//!
//! This module implements LLVM code generation for constant declarations in Y-lang.
//! Constants are immutable global values that are initialized at compile time and
//! accessible throughout the program lifetime.
//!
//! ## Constant vs Variable Semantics
//!
//! Constants differ from regular variables in several key ways:
//! - **Immutability**: Constants cannot be modified after initialization
//! - **Global scope**: Constants are accessible from any point in the program
//! - **Compile-time initialization**: Constant values must be computable at compile time
//! - **Memory location**: Constants are stored in global memory, not on the stack
//! - **Linkage**: Constants use internal linkage to avoid symbol conflicts
//!
//! ## LLVM Global Variable Strategy
//!
//! Y-lang constants are implemented as LLVM global variables with specific attributes:
//!
//! ### Global Memory Allocation
//! - **Lifetime**: Exists for the entire program execution
//! - **Address space**: Uses default address space (0) for normal memory
//! - **Visibility**: Internal linkage prevents external symbol conflicts
//! - **Immutability**: Marked as constant to enable LLVM optimizations
//!
//! ### Optimization Benefits
//! LLVM can optimize constant access through:
//! - **Constant propagation**: Replace constant references with literal values
//! - **Dead code elimination**: Remove unused constants automatically
//! - **Global value numbering**: Merge duplicate constant expressions
//! - **Section placement**: Place constants in read-only memory sections
//!
//! ## Type System Integration
//!
//! ### Supported Constant Types
//! Y-lang supports constants of various types:
//! - **Primitive constants**: Integers, floats, booleans, characters
//! - **String constants**: String literals as global character arrays
//! - **Composite constants**: Structs and arrays with constant elements
//! - **Function constants**: Function pointers
//!
//! ### Type Safety
//! The constant system maintains type safety through:
//! - **Validated types**: Uses type checker results for LLVM type generation
//! - **Basic type conversion**: Ensures LLVM types are compatible with globals
//! - **Initializer compatibility**: Verifies constant values match declared types
//!
//! ## Memory Management
//!
//! ### Global Storage
//! Constants are stored in global memory with specific characteristics:
//! - **Static allocation**: Memory is allocated at program startup
//! - **Read-only semantics**: Marked as immutable for hardware protection
//! - **Automatic cleanup**: Cleaned up automatically at program termination
//! - **Address stability**: Constant addresses never change during execution
//!
//! ### Address Space Handling
//! Uses LLVM's address space system for:
//! - **Default space**: Address space 0 for normal memory access
//! - **Platform flexibility**: Allows target-specific memory layouts
//! - **Optimization opportunities**: Enables address space-specific optimizations
//!
//! ## Symbol Table Integration
//!
//! Constants are registered differently from variables:
//! - **Global scope**: Accessible from any scope level
//! - **Pointer semantics**: Stored as pointer values for consistent access
//! - **Name resolution**: Integrated with the symbol resolution system
//! - **Type preservation**: Maintains type information for compile-time checking

use inkwell::AddressSpace;

use crate::{
    codegen::{CodeGen, CodegenContext},
    parser::ast::Constant,
    typechecker::ValidatedTypeInformation,
};

impl<'ctx> CodeGen<'ctx> for Constant<ValidatedTypeInformation> {
    type ReturnValue = ();

    /// Generates LLVM IR for constant declarations.
    ///
    /// This function implements the complete constant declaration process, creating
    /// immutable global variables that can be accessed throughout the program.
    /// It handles the unique requirements of constants including global storage,
    /// immutability guarantees, and compile-time initialization.
    ///
    /// ## Implementation Strategy
    ///
    /// The constant generation process follows these steps:
    /// 1. **Value computation**: Generate LLVM IR for the constant expression
    /// 2. **Type resolution**: Extract and convert type information for global storage
    /// 3. **Global creation**: Create LLVM global variable with appropriate attributes
    /// 4. **Immutability setup**: Configure the global as constant and read-only
    /// 5. **Initialization**: Set the global's initializer value
    /// 6. **Symbol registration**: Register the constant for future access
    ///
    /// ## LLVM Global Variable Configuration
    ///
    /// ### Address Space Selection
    /// Uses address space 0 (default) because:
    /// - **Compatibility**: Works with all target architectures
    /// - **Optimization**: Enables standard LLVM memory optimizations
    /// - **Simplicity**: No special memory access instructions required
    /// - **Portability**: Consistent behavior across different platforms
    ///
    /// ### Linkage Strategy
    /// Uses internal linkage (`Linkage::Internal`) for several reasons:
    /// - **Symbol isolation**: Prevents name conflicts with external libraries
    /// - **Optimization**: Enables aggressive inlining and constant propagation
    /// - **Security**: Constants are not exposed in the symbol table
    /// - **Binary size**: Unused constants can be eliminated entirely
    ///
    /// ### Immutability Enforcement
    /// The `set_constant(true)` call provides multiple benefits:
    /// - **Memory protection**: May be placed in read-only memory sections
    /// - **Optimization**: LLVM can assume the value never changes
    /// - **Error prevention**: Attempts to modify will be caught at compile time
    /// - **Documentation**: Clearly indicates the value's immutable nature
    ///
    /// ## Type System Integration
    ///
    /// ### Type Conversion Process
    /// The function converts Y-lang types to LLVM types through:
    /// - **Validated types**: Uses type checker results for accuracy
    /// - **Metadata extraction**: Gets LLVM metadata type from Y-lang type
    /// - **Basic type conversion**: Converts to basic types suitable for globals
    /// - **Error handling**: Panics on unsupported type combinations
    ///
    /// ### Supported Type Categories
    /// Different constant types require different handling:
    /// - **Primitive types**: Direct mapping to LLVM constants
    /// - **Aggregate types**: Struct and array constants with recursive initialization
    /// - **String types**: Global character arrays with null termination
    /// - **Function types**: Function pointers
    ///
    /// ## Memory and Performance Characteristics
    ///
    /// ### Global Storage Benefits
    /// - **Lifetime**: Exists for entire program duration
    /// - **Access speed**: No stack frame overhead for access
    /// - **Sharing**: Single instance shared across all uses
    /// - **Cache efficiency**: Co-located with other global data
    ///
    /// ### Compilation Optimizations
    /// LLVM can optimize constant usage through:
    /// - **Constant folding**: Replace references with literal values
    /// - **Dead constant elimination**: Remove unused constants
    /// - **Section merging**: Combine identical constants
    /// - **Cross-module optimization**: Share constants across compilation units
    ///
    /// ## Error Handling and Validation
    ///
    /// ### Runtime Guarantees
    /// The implementation includes several safety checks:
    /// - **Value generation**: Ensures constant expressions produce values
    /// - **Type compatibility**: Verifies types can be converted to basic types
    /// - **Initialization**: Ensures global variables are properly initialized
    ///
    /// ### Compile-time Requirements
    /// Constants must satisfy compile-time computability:
    /// - **Pure expressions**: No side effects during evaluation
    /// - **Known values**: All dependencies must be compile-time constants
    /// - **Type determinism**: Types must be fully resolved before code generation
    ///
    /// # Parameters
    ///
    /// The function operates on the constant declaration structure containing:
    /// - **id**: The constant identifier name
    /// - **value**: The initialization expression
    /// - **type_name**: Optional explicit type annotation (unused in codegen)
    ///
    /// # Returns
    ///
    /// `()` - Constant declaration is a statement-level operation
    ///
    /// # Panics
    ///
    /// - **Value generation failure**: When constant expression doesn't produce a value
    /// - **Type conversion failure**: When Y-lang type can't be converted to LLVM basic type
    /// - **Global creation failure**: When LLVM global variable creation fails
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // Integer constant: const PI_APPROX = 3
    /// // LLVM IR generated:
    /// // @PI_APPROX = internal constant i32 3
    ///
    /// // String constant: const GREETING = "Hello"
    /// // LLVM IR generated:
    /// // @GREETING = internal constant [6 x i8] c"Hello\00"
    ///
    /// // Struct constant: const ORIGIN = Point { x: 0, y: 0 }
    /// // LLVM IR generated:
    /// // @ORIGIN = internal constant %Point { i32 0, i32 0 }
    /// ```
    fn codegen(&self, ctx: &CodegenContext<'ctx>) {
        let Constant {
            id,
            type_name: _,
            value,
            ..
        } = self;

        // Step 1: Generate LLVM IR for the constant's initialization value
        // This must be a compile-time computable expression
        let Some(constant_value) = value.codegen(ctx) else {
            panic!("Constant value must produce a value");
        };

        // Extract the constant name for global variable creation
        let constant_name = &id.name;

        // Step 2: Resolve type information for global variable creation
        // Constants require basic types that can be used in global context
        let value_type_id = &value.get_info().type_id;
        let llvm_type = ctx.get_llvm_type(value_type_id);
        let basic_type = crate::codegen::convert_metadata_to_basic(llvm_type)
            .expect("Constant type must be convertible to basic type");

        // Step 3: Create LLVM global variable for the constant
        // Uses default address space (0) for standard memory access
        let global_variable =
            ctx.module
                .add_global(basic_type, Some(AddressSpace::from(0)), constant_name);

        // Step 4: Configure global variable attributes for constant semantics
        // Mark as constant to enable LLVM optimizations and enforce immutability
        global_variable.set_constant(true);

        // Use internal linkage to prevent external symbol conflicts and enable optimization
        global_variable.set_linkage(inkwell::module::Linkage::Internal);

        // Step 5: Initialize the global variable with the computed constant value
        // This establishes the constant's value at program startup
        global_variable.set_initializer(&constant_value);

        // Step 6: Register the constant in the symbol table for future reference
        // Constants are stored as pointer values for consistent access patterns
        ctx.store_constant(constant_name, global_variable.as_pointer_value().into());
    }
}
