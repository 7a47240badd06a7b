//! # Variable Declaration Code Generation
//!
//! This module implements LLVM code generation for variable declarations in Y-lang.
//! Declarations create typed variables without initial values, allocating memory
//! but leaving it uninitialized until a subsequent assignment operation.
//!
//! ## Declaration vs Initialization
//!
//! Y-lang distinguishes between declarations and initializations:
//! - **Declaration**: `let x: int` - Allocates memory for a variable without setting its value
//! - **Initialization**: `let x = 42` - Allocates memory and sets an initial value
//! - **Combined**: `let x: int = 42` - Explicit type with initialization
//!
//! This module handles pure declarations where only the type is specified.
//!
//! ## Memory Allocation Strategy
//!
//! ### Stack-based Allocation
//! All declared variables are allocated on the stack using LLVM's `alloca` instruction:
//! - **Automatic cleanup**: Variables are freed when scope exits
//! - **Performance**: Stack allocation is faster than heap allocation
//! - **Register promotion**: LLVM can promote variables to registers
//! - **Debug support**: Stack variables have better debugging information
//!
//! ### Type-specific Allocation
//! Each Y-lang type maps to specific LLVM types for optimal performance:
//!
//! #### Primitive Types
//! - **Integer**: `i64` (64-bit signed integers for full range support)
//! - **Float**: `f64` (64-bit IEEE 754 double precision)
//! - **Boolean**: `i1` (single bit, but byte-aligned in memory)
//! - **Character**: `i8` (single byte for ASCII/UTF-8 code points)
//!
//! #### Complex Types
//! - **String**: the managed `(data, length, ref)` struct (§4.5.1), stored by value
//! - **Array**: `ptr` (pointer to array data with separate size tracking)
//! - **Reference**: `ptr` (pointer to referenced data)
//! - **Struct**: Computed layout based on field types
//! - **Tuple**: Computed layout based on element types
//!
//! ## LLVM Integration Details
//!
//! ### Alloca Instructions
//! The module uses LLVM's `alloca` instruction for all allocations because:
//! - **Scope awareness**: Memory is automatically managed by LLVM
//! - **Optimization**: Enables advanced optimization passes
//! - **Type safety**: Each allocation is strongly typed
//! - **Platform independence**: Works consistently across target architectures
//!
//! ### Type System Mapping
//! Y-lang types are mapped to LLVM types through several strategies:
//! - **Direct mapping**: Primitive types have direct LLVM equivalents
//! - **Pointer representation**: Dynamic types use pointer indirection
//! - **Computed layouts**: Complex types use the general type conversion system
//! - **Function handling**: Function types create LLVM function declarations
//!
//! ## Error Handling Philosophy
//!
//! ### Type Validation
//! The module includes comprehensive type validation:
//! - **Void rejection**: Variables cannot have void type (compile-time error)
//! - **Unknown rejection**: Unknown types indicate type checker failures
//! - **Allocation validation**: All allocations must succeed or panic
//!
//! ### Recovery Strategies
//! Different error conditions use different handling approaches:
//! - **Type errors**: Panic with descriptive messages (compiler bugs)
//! - **Allocation failures**: Panic with operation context (system issues)
//! - **Conversion failures**: Expect with explanatory messages (type system bugs)
//!
//! ## Symbol Table Integration
//!
//! After allocation, variables are registered in the current scope:
//! - **Name binding**: Associates variable names with LLVM values
//! - **Type preservation**: LLVM values maintain type information
//! - **Scope management**: Variables are cleaned up on scope exit
//! - **Function specialization**: Function declarations use separate registration

use crate::{
    codegen::{CodeGen, CodegenContext},
    parser::ast::Declaration,
    typechecker::{Type, ValidatedTypeInformation},
};

use super::function::build_llvm_function_type_from_own_types;

impl<'ctx> CodeGen<'ctx> for Declaration<ValidatedTypeInformation> {
    type ReturnValue = ();

    /// Generates LLVM IR for variable declarations.
    ///
    /// This function implements type-specific memory allocation for declared variables,
    /// creating appropriately sized and typed storage without initialization. It serves
    /// as the foundation for Y-lang's variable declaration system and handles the
    /// diverse requirements of different types.
    ///
    /// ## Implementation Strategy
    ///
    /// The function uses a comprehensive type dispatch system:
    /// 1. **Type extraction**: Get validated type information from the declaration
    /// 2. **Type-specific allocation**: Use optimized LLVM types for each Y-lang type
    /// 3. **Memory allocation**: Create stack storage using LLVM alloca instructions
    /// 4. **Symbol registration**: Register the variable for future access
    ///
    /// ## Type-specific Allocation Strategies
    ///
    /// Different Y-lang types require different LLVM representations for optimal performance:
    ///
    /// ### Primitive Types
    /// Direct mapping to LLVM primitive types:
    /// - **Integer (`i64`)**: 64-bit signed integers for full numeric range
    /// - **Float (`f64`)**: IEEE 754 double precision for mathematical accuracy
    /// - **Boolean (`i1`)**: Single bit storage (byte-aligned for memory access)
    /// - **Character (`i8`)**: Single byte for ASCII/UTF-8 compatibility
    ///
    /// ### Pointer-based Types
    /// Dynamic types use pointer indirection for flexibility:
    /// - **String**: Pointer to dynamically allocated string data
    /// - **Array**: Pointer to array elements with separate size information
    /// - **Reference**: Pointer to referenced memory location
    ///
    /// ### Computed Layout Types
    /// Complex types use the general type conversion system:
    /// - **Struct**: Field layout computed by type system
    /// - **Tuple**: Element layout based on component types
    /// - **Function**: Creates LLVM function declarations instead of variables
    ///
    /// ## Memory Management Philosophy
    ///
    /// ### Stack Allocation Benefits
    /// All variables use stack allocation for several reasons:
    /// - **Automatic cleanup**: No manual memory management required
    /// - **Performance**: Faster allocation and deallocation than heap
    /// - **Cache locality**: Better memory access patterns
    /// - **Optimization**: LLVM can optimize stack variable access
    ///
    /// ### Type Safety Guarantees
    /// Each allocation is strongly typed to ensure:
    /// - **Memory safety**: Prevents type confusion and buffer overflows
    /// - **Optimization**: Enables type-based optimizations
    /// - **Debug information**: Provides accurate debugging data
    /// - **Platform consistency**: Works correctly across different architectures
    ///
    /// ## Error Handling Strategy
    ///
    /// ### Invalid Type Handling
    /// The function rejects certain type combinations:
    /// - **Void types**: Variables cannot have void type (semantic error)
    /// - **Unknown types**: Indicates type checker failure (compiler bug)
    /// - Both conditions panic with descriptive error messages
    ///
    /// ### Allocation Failure Handling
    /// All allocation operations use `.expect()` with context:
    /// - **Alloca failures**: Indicate memory or system issues
    /// - **Type conversion failures**: Suggest type system inconsistencies
    /// - **Function creation failures**: Point to module or linkage problems
    ///
    /// ## Special Handling Cases
    ///
    /// ### Function Declarations
    /// Function type declarations create LLVM function declarations rather than variables:
    /// - **Function types**: Create LLVM function with appropriate signature
    /// - **Symbol registration**: Use function-specific storage in symbol table
    /// - **Forward references**: Enable recursive and mutually recursive functions
    ///
    /// ### Integer Size Selection
    /// Uses `i64` for integers to provide:
    /// - **Full range**: Supports large integer values without overflow
    /// - **Platform consistency**: Same representation across 32-bit and 64-bit systems
    /// - **Future compatibility**: Room for language evolution
    ///
    /// # Returns
    ///
    /// `()` - Variable declaration is a statement-level operation
    ///
    /// # Panics
    ///
    /// - **Void variable**: When attempting to declare a variable of void type
    /// - **Unknown type**: When type checker produces unknown type information
    /// - **Allocation failure**: When LLVM alloca instruction fails
    /// - **Type conversion failure**: When complex types can't be converted to basic types
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // Integer declaration: let x: int
    /// // LLVM IR generated: %x = alloca i64
    ///
    /// // String declaration: let name: string
    /// // LLVM IR generated: %name = alloca ptr
    ///
    /// // Struct declaration: let point: Point
    /// // LLVM IR generated: %point = alloca %Point
    ///
    /// // Function declaration: let func: (int, int) -> int
    /// // LLVM IR generated: declare i64 @func(i64, i64)
    /// ```
    fn codegen(&self, ctx: &CodegenContext<'ctx>) -> Self::ReturnValue {
        let Declaration { name, .. } = self;
        let ValidatedTypeInformation { type_id, .. } = &name.info;

        // Dispatch on validated type information to create appropriate LLVM storage
        match type_id {
            Type::Integer => {
                // Integer: i32 (`TypeMap` root entry `int=i32`)
                let llvm_type = ctx.context.i32_type();
                let llvm_alloca = ctx
                    .builder
                    .build_alloca(llvm_type, &name.name)
                    .expect("Failed to build alloca for integer");
                ctx.store_variable(&name.name, llvm_alloca.into());
            }
            Type::FloatingPoint => {
                // Float: IEEE 754 single precision (`TypeMap` root entry `float=f32`)
                let llvm_type = ctx.context.f32_type();
                let llvm_alloca = ctx
                    .builder
                    .build_alloca(llvm_type, &name.name)
                    .expect("Failed to build alloca for float");
                ctx.store_variable(&name.name, llvm_alloca.into());
            }
            Type::Boolean => {
                // Boolean: Use i1 for minimal storage
                // Single bit storage (byte-aligned in memory for performance)
                let llvm_type = ctx.context.bool_type();
                let llvm_alloca = ctx
                    .builder
                    .build_alloca(llvm_type, &name.name)
                    .expect("Failed to build alloca for bool");
                ctx.store_variable(&name.name, llvm_alloca.into());
            }
            Type::Character => {
                // Character: Use i8 for ASCII/UTF-8 compatibility
                // Single byte storage for character code points (0-255)
                let llvm_type = ctx.context.i8_type();
                let llvm_alloca = ctx
                    .builder
                    .build_alloca(llvm_type, &name.name)
                    .expect("Failed to build alloca for char");
                ctx.store_variable(&name.name, llvm_alloca.into());
            }
            Type::String => {
                // String: the managed `(data, length, ref)` struct (§4.5.1),
                // stored by value in its stack slot like any other local.
                let llvm_type = crate::stdlib::string_struct_type(ctx);
                let llvm_alloca = ctx
                    .builder
                    .build_alloca(llvm_type, &name.name)
                    .expect("Failed to build alloca for string");
                ctx.store_variable(&name.name, llvm_alloca.into());
            }
            Type::Void => {
                // INVALID: Void variables are semantically meaningless
                // Variables must be able to store values, but void represents "no value"
                panic!("Cannot declare variable of void type: {}", name.name);
            }
            Type::Unknown => {
                // INVALID: Unknown types indicate type checker failure
                // Should never reach code generation with unresolved types
                panic!("Cannot declare variable of unknown type: {}", name.name);
            }
            Type::Reference(_inner_type) => {
                // Reference: Use pointer for indirection to referenced data
                // References are implemented as pointers to the actual data location
                let llvm_type = ctx.context.ptr_type(Default::default());
                let llvm_alloca = ctx
                    .builder
                    .build_alloca(llvm_type, &name.name)
                    .expect("Failed to build alloca for reference");
                ctx.store_variable(&name.name, llvm_alloca.into());
            }
            Type::Tuple(_items) => {
                // Tuple: Use computed layout from general type conversion system
                // Tuples are laid out as structs with elements in declaration order
                let llvm_type =
                    crate::codegen::convert_metadata_to_basic(ctx.get_llvm_type(type_id))
                        .expect("Failed to convert tuple type");
                let llvm_alloca = ctx
                    .builder
                    .build_alloca(llvm_type, &name.name)
                    .expect("Failed to build alloca for tuple");
                ctx.store_variable(&name.name, llvm_alloca.into());
            }
            Type::Array(_element_type) => {
                // Array: Use pointer for dynamic array management
                // Arrays are implemented as pointers to element data with separate size tracking
                let llvm_type = ctx.context.ptr_type(Default::default());
                let llvm_alloca = ctx
                    .builder
                    .build_alloca(llvm_type, &name.name)
                    .expect("Failed to build alloca for array");
                ctx.store_variable(&name.name, llvm_alloca.into());
            }
            Type::Struct(_name, _items) => {
                // Struct: Use computed layout from general type conversion system
                // Struct layout is determined by field types and ordering
                let llvm_type =
                    crate::codegen::convert_metadata_to_basic(ctx.get_llvm_type(type_id))
                        .expect("Failed to convert struct type");
                let llvm_alloca = ctx
                    .builder
                    .build_alloca(llvm_type, &name.name)
                    .expect("Failed to build alloca for struct");
                ctx.store_variable(&name.name, llvm_alloca.into());
            }
            Type::Function {
                params,
                return_value,
            } => {
                // Function: Create LLVM function declaration instead of variable
                // Function types declare callable entities rather than storage locations
                let llvm_fn_type =
                    build_llvm_function_type_from_own_types(ctx, return_value, params);

                // Create function declaration in the LLVM module
                let llvm_fn_value = ctx.module.add_function(&name.name, llvm_fn_type, None);

                // Register in function symbol table (not variable table)
                ctx.store_function(&name.name, llvm_fn_value);
            }
        }
    }
}
