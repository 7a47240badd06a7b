//! # Statement Code Generation
//!
//! This module implements LLVM code generation for all statement types in Y-lang.
//! Statements are the action-performing constructs of the language that manage
//! program flow, variable lifecycle, and side effects.
//!
//! ## Statement System Architecture
//!
//! Y-lang statements follow a side-effect-oriented design where statements perform
//! actions and manage program state rather than producing values. This complements
//! the expression system to provide a complete programming environment.
//!
//! ### Statement Categories
//!
//! #### Variable Management Statements
//! Statements that handle variable lifecycle and memory management:
//! - **Variable declarations** (`declaration.rs`): Type-specific memory allocation
//! - **Variable initialization** (`initialisation.rs`): Variable creation with initial values
//! - **Assignment statements** (`assignment.rs`): Complex lvalue modification with nested access
//! - **Constant declarations** (`constant.rs`): Immutable global value creation
//!
//! #### Control Flow Statements
//! Statements that control program execution flow:
//! - **While loops** (`while_loop.rs`): Condition-controlled iteration with basic blocks
//! - **Return statements**: Function termination with optional value return
//! - **Expression statements**: Expression evaluation for side effects
//!
//! #### Function Definition Statements
//! Statements that define callable code units:
//! - **Function definitions** (`function.rs`): Named function creation with two-pass compilation
//!
//! ## Code Generation Strategy
//!
//! ### Side Effect Model
//! All statements implement the `CodeGen` trait with `ReturnValue = ()`:
//! - **Action-oriented**: Statements perform actions rather than producing values
//! - **State modification**: Statements modify program state and memory
//! - **Control flow**: Statements can alter program execution flow
//!
//! ### Two-Pass Compilation
//! Complex statements use two-pass compilation for forward references:
//! - **Declaration pass**: Register function and method signatures
//! - **Implementation pass**: Generate actual code bodies
//! - **Forward references**: Enable recursive and mutually recursive constructs
//!
//! ### Memory Management Integration
//! Statements coordinate with LLVM's memory management:
//! - **Stack allocation**: Variables allocated on function stack frames
//! - **Global allocation**: Constants allocated in global memory sections
//! - **Automatic cleanup**: LLVM handles memory cleanup on scope exit
//!
//! ## LLVM Integration Patterns
//!
//! ### Basic Block Management
//! Statements manage LLVM basic blocks for control flow:
//! - **Linear statements**: Execute within existing basic blocks
//! - **Control flow statements**: Create and manage multiple basic blocks
//! - **Terminator handling**: Ensure proper basic block termination
//!
//! ### Symbol Table Integration
//! Statements interact with the symbol table for name management:
//! - **Variable registration**: Store variables in appropriate scopes
//! - **Function registration**: Register functions for call resolution
//! - **Type registration**: Register user-defined types for instantiation
//!
//! ### Scope Management
//! Statements coordinate scope creation and cleanup:
//! - **Scope isolation**: Each scope contains its own variables
//! - **Nested scoping**: Support for nested scopes and shadowing
//! - **Automatic cleanup**: Scope variables cleaned up on exit
//!
//! ## Statement Composition
//!
//! ### Top-Level vs Local Statements
//! Different statement types have different scoping rules:
//! - **Top-level statements**: Module-level constructs with global visibility
//! - **Local statements**: Function-level constructs with local scope
//! - **Context sensitivity**: Statement behavior adapts to context
//!
//! ### Statement Sequencing
//! Statements execute in declaration order with careful dependency management:
//! - **Sequential execution**: Statements execute in source order
//! - **Dependency resolution**: Forward references resolved during compilation
//! - **Side effect ordering**: Side effects occur in predictable order
//!
//! ## Specialized Statement Systems
//!
//! ### Assignment System
//! The assignment system handles complex lvalue expressions:
//! - **Nested access**: Array indexing, struct field access, combinations
//! - **Pointer generation**: Safe LLVM pointer arithmetic using GEP
//! - **Type safety**: Maintains type information throughout assignment
//!
//! ### Function System
//! The function system provides comprehensive function support:
//! - **Standard functions**: Regular named functions with parameters
//! - **Main function handling**: Special C-compatible main function generation
//!
//! ## Error Handling and Safety
//!
//! ### Type Safety Enforcement
//! Statements enforce type safety throughout execution:
//! - **Pre-validated types**: All types validated before code generation
//! - **Memory safety**: No undefined behavior in generated code
//! - **Type consistency**: Operations only performed on compatible types
//!
//! ### Compilation Error Handling
//! Statement compilation uses consistent error handling:
//! - **Fail-fast strategy**: Errors detected and reported immediately
//! - **Context preservation**: Error messages include relevant context
//! - **Recovery mechanisms**: Graceful handling of unexpected conditions
//!
//! ## Performance Considerations
//!
//! ### Compilation Efficiency
//! Statement generation is optimized for fast compilation:
//! - **Single-pass generation**: Most statements generate in one pass
//! - **Efficient algorithms**: O(n) complexity for linear constructs
//! - **Memory efficiency**: Minimal temporary allocations during generation
//!
//! ### Runtime Performance
//! Generated statement code optimizes runtime performance:
//! - **LLVM optimization**: Generated IR enables aggressive optimization
//! - **Efficient patterns**: Uses well-known efficient LLVM patterns
//! - **Minimal overhead**: Direct translation without unnecessary abstraction
//!
//! ## Extension and Customization
//!
//! ### Adding New Statement Types
//! The system supports adding new statement types:
//! - **CodeGen implementation**: New statements implement the `CodeGen` trait
//! - **Pattern matching**: Statement dispatch uses pattern matching for extensibility
//! - **Integration**: New statements integrate with existing symbol and scope systems
//!
//! ### Custom Control Flow
//! Custom control flow constructs can be added:
//! - **Basic block management**: New constructs can create custom basic block patterns
//! - **Terminator handling**: Custom termination and branching logic
//! - **Scope integration**: Custom scoping rules and variable management

pub mod assignment;
pub mod constant;
pub mod declaration;
pub mod function;
pub mod initialisation;
pub mod while_loop;

use crate::{
    parser::ast::{Statement, TopLevelStatement},
    typechecker::{Type, ValidatedTypeInformation},
};

use super::{CodeGen, CodegenContext};

impl<'ctx> CodeGen<'ctx> for Statement<ValidatedTypeInformation> {
    type ReturnValue = ();

    fn codegen(&self, ctx: &CodegenContext<'ctx>) {
        match self {
            Statement::Function(function) => function.codegen(ctx),
            Statement::WhileLoop(while_loop) => while_loop.codegen(ctx),
            Statement::Initialization(initialisation) => initialisation.codegen(ctx),
            Statement::Constant(constant) => constant.codegen(ctx),
            Statement::Assignment(assignment) => assignment.codegen(ctx),
            Statement::Expression(expression) => {
                expression.codegen(ctx);
            }
            Statement::YieldingExpression(expression) => {
                let llvm_return_value = expression.codegen(ctx);

                ctx.release_all_managed_locals();
                if expression.get_info().type_id == Type::Void {
                    if let Err(e) = ctx.builder.build_return(None) {
                        panic!("{e}");
                    }
                } else {
                    let Some(llvm_return_value) = llvm_return_value else {
                        unreachable!("YieldingExpression should always produce a value")
                    };
                    if let Err(e) = ctx.builder.build_return(Some(&llvm_return_value)) {
                        panic!("{e}");
                    }
                }
            }
            Statement::Return(expression) => {
                let Some(llvm_return_value) = expression.codegen(ctx) else {
                    unreachable!()
                };

                ctx.release_all_managed_locals();
                if let Err(e) = ctx.builder.build_return(Some(&llvm_return_value)) {
                    panic!("{e}");
                }
            }
            Statement::Comment(_) => {} // Comments are no-ops in codegen
            Statement::Declaration(declaration) => declaration.codegen(ctx),
        }
    }
}

impl<'ctx> CodeGen<'ctx> for TopLevelStatement<ValidatedTypeInformation> {
    type ReturnValue = ();

    fn codegen(&self, ctx: &CodegenContext<'ctx>) {
        match self {
            TopLevelStatement::Comment(_) => {} // Comments are no-ops in codegen
            TopLevelStatement::Function(function) => function.codegen(ctx),
            TopLevelStatement::Constant(constant) => constant.codegen(ctx),
            TopLevelStatement::Declaration(declaration) => declaration.codegen(ctx),
        }
    }
}

impl TopLevelStatement<ValidatedTypeInformation> {
    /// First pass: Register function declarations without generating bodies
    /// This allows forward references to functions defined later in the file
    pub fn register_function_declaration<'ctx>(&self, ctx: &CodegenContext<'ctx>) {
        match self {
            TopLevelStatement::Function(function) => {
                function.register_declaration(ctx);
            }
            // Other statements don't need declaration registration
            _ => {}
        }
    }
}
