//! # Code Generation Module
//!
//! This module implements LLVM-based code generation for the Y programming language.
//! It transforms the validated AST into executable LLVM IR that can be compiled to native code.
//!
//! ## Architecture Overview
//!
//! The code generation follows a visitor pattern where each AST node implements the `CodeGen` trait.
//! The central coordination is handled by the `CodegenContext` which maintains:
//!
//! - **LLVM Integration**: Direct interface to LLVM's context, module, and IR builder
//! - **Type Management**: Conversion between Y-lang types and LLVM types with caching
//! - **Scope Management**: Lexical scoping for variables, functions, and constants
//!
//! ## Key Design Decisions
//!
//! ### Function Representation
//! `Type::Function` (a function's own signature, not a first-class value - Cure has no
//! function-typed parameters or returns) maps to an opaque `{i8*, i8*}` struct via
//! `get_closure_struct_type`. No surface syntax currently produces a value of that shape;
//! the mapping exists so `get_llvm_type` stays total over `Type`.
//!
//! ### Memory Management
//! - **Stack allocation**: Local variables, function parameters, temporary values
//! - **Static allocation**: Global functions, constants
//!
//! ### Type System Integration
//! The codegen assumes input from a validated type checker and relies on type information
//! for safe LLVM IR generation. Invalid type information will result in panics.

pub mod c_abi;
pub mod expressions;
pub mod statements;

use std::{cell::RefCell, collections::HashMap};

use inkwell::{
    builder::Builder,
    context::Context,
    module::Module,
    types::{BasicMetadataTypeEnum, BasicType, BasicTypeEnum, StructType},
    values::{BasicValueEnum, FunctionValue, PointerValue},
};

use crate::typechecker::Type;

/// Central context for LLVM code generation.
///
/// This structure maintains all the state needed for translating Y-lang AST nodes
/// into LLVM IR. It serves as the coordination point between different code generation
/// phases and manages the interaction with LLVM APIs.
///
/// ## Lifetime Management
///
/// The `'ctx` lifetime parameter ties this context to the LLVM context lifetime,
/// ensuring that all generated LLVM values remain valid for the duration of
/// the code generation process.
///
/// ## Thread Safety
///
/// Uses `RefCell` for interior mutability since LLVM operations require mutable
/// access but the visitor pattern passes immutable references. This is safe because
/// code generation is single-threaded.
pub struct CodegenContext<'ctx> {
    /// LLVM context - provides the global state for LLVM operations
    pub context: &'ctx Context,

    /// LLVM module - container for functions, globals, and metadata
    pub module: Module<'ctx>,

    /// LLVM IR builder - generates instructions within basic blocks
    pub builder: Builder<'ctx>,

    /// Type cache mapping Y-lang types to LLVM types
    /// Avoids expensive type reconstruction and ensures type consistency
    pub types: RefCell<HashMap<Type, BasicMetadataTypeEnum<'ctx>>>,

    /// Lexical scope stack for variable/function resolution
    /// Each scope frame contains variables, functions, and constants in that scope
    pub scopes: RefCell<Vec<ScopeFrame<'ctx>>>,

    /// C-ABI registry (C2): lazily materialised externs for the C runtime
    /// functions the standard-library kernel and emitted `Ref`/`string`
    /// machinery call into.
    pub c_abi: crate::codegen::c_abi::CAbiRegistry<'ctx>,
}

impl<'ctx> CodegenContext<'ctx> {
    /// Build a fresh context around a brand-new module named `main` (§4.7),
    /// targeting the current host (§4.1).
    pub fn new(context: &'ctx Context, module_name: &str) -> Self {
        let module = context.create_module(module_name);
        let builder = context.create_builder();
        let target = crate::target::Target::current();

        CodegenContext {
            context,
            module,
            builder,
            types: RefCell::default(),
            scopes: RefCell::new(vec![ScopeFrame::default()]),
            c_abi: crate::codegen::c_abi::CAbiRegistry::new(target),
        }
    }
}

/// A single scope frame in the lexical scoping stack.
///
/// Uses `RefCell` to allow mutation during variable binding and lookup operations
/// while maintaining the immutable interface of the visitor pattern.
pub type ScopeFrame<'ctx> = RefCell<Scope<'ctx>>;

/// Represents a single lexical scope containing named bindings.
///
/// Each scope maintains separate namespaces for variables, functions, and constants.
/// This separation ensures that identifiers can be properly resolved according to
/// Y-lang's scoping rules.
///
/// ## Storage Strategy
///
/// - **Variables**: Stored as `BasicValueEnum` which can be pointers (for mutable variables)
///   or direct values (for immutable bindings)
/// - **Functions**: Stored as `FunctionValue` representing LLVM function declarations
/// - **Constants**: Stored as `BasicValueEnum` representing compile-time constant values
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Scope<'ctx> {
    /// Variables bound in this scope (both mutable and immutable)
    variables: HashMap<String, BasicValueEnum<'ctx>>,

    /// Functions declared or defined in this scope
    functions: HashMap<String, FunctionValue<'ctx>>,

    /// Compile-time constants defined in this scope
    constants: HashMap<String, BasicValueEnum<'ctx>>,

    /// §4.7.1 `local_symbols`: managed-value temporaries spilled to a stack
    /// slot by `track_managed_value`, awaiting `Ref.dec` on this scope's
    /// exit. Each entry is the slot, the struct type to reload it with, and
    /// the index of its embedded `Ref*` field.
    managed_locals: Vec<(PointerValue<'ctx>, StructType<'ctx>, u32)>,
}

impl<'ctx> CodegenContext<'ctx> {
    /// Converts a Y-lang type to its corresponding LLVM type with caching.
    ///
    /// This is a critical function that bridges the Y-lang type system with LLVM's
    /// type system. It implements a caching strategy to avoid repeated expensive
    /// type conversions and ensures type consistency throughout code generation.
    ///
    /// ## Caching Strategy
    ///
    /// Types are cached in the `types` HashMap to ensure:
    /// 1. **Performance**: Avoid reconstructing complex types repeatedly
    /// 2. **Consistency**: The same Y-lang type always maps to the same LLVM type
    /// 3. **Memory efficiency**: LLVM types are reused rather than duplicated
    ///
    /// ## Type Mapping
    ///
    /// - Primitive types: Direct mapping to LLVM primitives (i64, f64, i1, i8)
    /// - Complex types: Converted to LLVM structs, arrays, or pointers
    /// - Function types: Mapped to the opaque `{i8*, i8*}` struct (see `get_closure_struct_type`)
    ///
    /// # Parameters
    ///
    /// * `our_type` - The Y-lang type to convert
    ///
    /// # Returns
    ///
    /// The corresponding LLVM type as `BasicMetadataTypeEnum`
    ///
    /// # Panics
    ///
    /// Panics if the Y-lang type cannot be converted to an LLVM type (e.g., `Type::Void` or `Type::Unknown`)
    pub fn get_llvm_type(&self, our_type: &Type) -> BasicMetadataTypeEnum<'ctx> {
        // Check cache first for performance and consistency
        {
            let types = self.types.borrow();
            if let Some(entry) = types.get(our_type) {
                return *entry;
            }
        }

        // Convert and cache the new type
        let new_type = convert_our_type_to_llvm_basic_metadata_type(our_type, self);
        {
            let mut types = self.types.borrow_mut();
            types.insert(our_type.clone(), new_type);
        }
        new_type
    }

    /// Returns the LLVM representation of `Type::Function`: an opaque `{i8*, i8*}`
    /// struct. Nothing in the language currently produces a function-typed value, so
    /// this exists only so `get_llvm_type` stays total over `Type`.
    ///
    /// # Returns
    ///
    /// LLVM struct type representing `{i8*, i8*}`
    pub fn get_closure_struct_type(&self) -> inkwell::types::StructType<'ctx> {
        let i8_ptr_type = self.context.ptr_type(inkwell::AddressSpace::default());
        self.context
            .struct_type(&[i8_ptr_type.into(), i8_ptr_type.into()], false)
    }

    /// Enters a new lexical scope.
    ///
    /// Creates a new scope frame and pushes it onto the scope stack.
    /// This should be called when entering any construct that creates
    /// a new scope (functions, blocks, if expressions, etc.).
    ///
    /// The new scope starts empty and inherits nothing from parent scopes,
    /// implementing Y-lang's lexical scoping rules where inner scopes can
    /// shadow outer scope bindings.
    pub fn enter_scope(&self) {
        self.scopes.borrow_mut().push(ScopeFrame::default());
    }

    /// Exits the current lexical scope.
    ///
    /// Removes the current scope frame from the scope stack, discarding
    /// all bindings created in that scope. This should be called when
    /// exiting any scope-creating construct.
    ///
    /// # Panics
    ///
    /// Will panic if called when there are no scopes to exit (scope stack underflow).
    pub fn exit_scope(&self) {
        self.release_managed_locals();
        self.scopes.borrow_mut().pop();
    }

    /// §4.7.1 RC protocol, step 1: track a value produced at a non-excluded
    /// node boundary. If `ty` doesn't need memory management (T1), this is a
    /// no-op passthrough. Otherwise: load `value` if it's a pointer, `Ref.inc`
    /// its embedded `Ref*` field, spill it to a fresh `temp_var` stack slot
    /// registered as a local symbol of the current scope, and return the
    /// reloaded value - exactly the sequence spec'd for every managed-value
    /// node that isn't a declaration or pure control flow.
    pub fn track_managed_value(&self, ty: &Type, value: BasicValueEnum<'ctx>) -> BasicValueEnum<'ctx> {
        if !ty.needs_memory_management() {
            return value;
        }

        let struct_ty = managed_struct_type(self, ty);
        let struct_value = if value.is_pointer_value() {
            self.builder
                .build_load(struct_ty, value.into_pointer_value(), "managed_loaded")
                .unwrap()
                .into_struct_value()
        } else {
            value.into_struct_value()
        };

        let ref_index = managed_ref_field_index(ty);
        let ref_ptr = self
            .builder
            .build_extract_value(struct_value, ref_index, "ref_ptr")
            .unwrap()
            .into_pointer_value();
        let ref_inc = self
            .module
            .get_function("Ref.inc")
            .expect("Ref.inc installed before any managed value is produced");
        self.builder.build_call(ref_inc, &[ref_ptr.into()], "").unwrap();

        let slot = self.builder.build_alloca(struct_ty, "temp_var").unwrap();
        self.builder.build_store(slot, struct_value).unwrap();

        let scopes = self.scopes.borrow();
        scopes.last().inspect(|scope| {
            scope
                .borrow_mut()
                .managed_locals
                .push((slot, struct_ty, ref_index));
        });

        self.builder
            .build_load(struct_ty, slot, "temp_var")
            .unwrap()
    }

    /// §4.7.1: `Ref.inc` a managed-type function parameter on entry and
    /// register it as a local symbol, so the generic scope-exit cleanup
    /// `Ref.dec`s it exactly once. Parameters are never separately dec'd.
    pub fn bind_parameter(&self, ty: &Type, name: impl ToString, value: BasicValueEnum<'ctx>) {
        self.store_variable(name, value);
        if ty.needs_memory_management() {
            self.track_managed_value(ty, value);
        }
    }

    /// §4.7.1 scope-exit cleanup: `Ref.dec` every managed local registered
    /// against the current (innermost) scope. Called automatically from
    /// `exit_scope`.
    pub fn release_managed_locals(&self) {
        let scopes = self.scopes.borrow();
        if let Some(scope) = scopes.last() {
            release_locals_in(self, scope);
        }
    }

    /// §4.7.1 `Return` prologue: `Ref.dec` every managed local registered
    /// against any scope the return is escaping through - every scope but
    /// the root/global one. Must run immediately before the `ret` itself.
    pub fn release_all_managed_locals(&self) {
        let scopes = self.scopes.borrow();
        for scope in scopes.iter().skip(1) {
            release_locals_in(self, scope);
        }
    }

    pub fn find_variable(&self, name: impl ToString) -> BasicValueEnum<'ctx> {
        let name = name.to_string();
        let scopes = self.scopes.borrow();

        scopes
            .iter()
            .rev()
            .find(|scope| scope.borrow().variables.contains_key(&name))
            .and_then(|scope| scope.borrow().variables.get(&name).cloned())
            .unwrap_or_else(|| panic!("epected variable '{name}' to be defined"))
    }

    pub fn resolve_function(&self, name: impl ToString) -> FunctionValue<'ctx> {
        let name = name.to_string();
        let scopes = self.scopes.borrow();

        scopes
            .iter()
            .rev()
            .find(|scope| scope.borrow().functions.contains_key(&name))
            .and_then(|scope| scope.borrow().functions.get(&name).cloned())
            .unwrap_or_else(|| panic!("expected function '{name}' to be defined"))
    }

    pub fn store_variable(&self, name: impl ToString, value: BasicValueEnum<'ctx>) {
        let name = name.to_string();

        let variables = self.scopes.borrow();

        variables.last().inspect(|scope| {
            scope.borrow_mut().variables.insert(name, value);
        });
    }

    pub fn store_constant(&self, name: impl ToString, value: BasicValueEnum<'ctx>) {
        let name = name.to_string();

        let scopes = self.scopes.borrow();

        scopes.last().inspect(|scope| {
            scope.borrow_mut().constants.insert(name, value);
        });
    }

    pub fn find_constant(&self, name: impl ToString) -> Option<BasicValueEnum<'ctx>> {
        let name = name.to_string();
        let scopes = self.scopes.borrow();

        scopes
            .iter()
            .rev()
            .find(|scope| scope.borrow().constants.contains_key(&name))
            .and_then(|scope| scope.borrow().constants.get(&name).cloned())
    }

    pub fn find_function(&self, name: impl ToString) -> FunctionValue<'ctx> {
        let name = name.to_string();
        let scopes = self.scopes.borrow();

        scopes
            .iter()
            .rev()
            .find(|scope| scope.borrow().functions.contains_key(&name))
            .and_then(|scope| scope.borrow().functions.get(&name).cloned())
            .unwrap()
    }

    /// Stores a regular (named) function in the current scope.
    ///
    /// Functions are registered in two related namespaces:
    /// - `functions`: enables later resolution for direct calls
    /// - `variables`: the raw function pointer, for uniformity with other bindings
    pub fn store_function(&self, name: impl ToString, value: FunctionValue<'ctx>) {
        let name = name.to_string();
        let fn_pointer = value.as_global_value().as_pointer_value();

        let scopes = self.scopes.borrow();

        scopes.last().inspect(|scope| {
            let mut scope_frame = scope.borrow_mut();
            scope_frame.functions.insert(name.clone(), value);
            scope_frame.variables.insert(name, fn_pointer.into());
        });
    }
}

/// Core trait for LLVM code generation.
///
/// This trait is implemented by all AST node types that can generate LLVM IR.
/// It follows the visitor pattern where each node knows how to generate code
/// for itself using the provided `CodegenContext`.
///
/// ## Design Principles
///
/// - **Immutable AST**: The `&self` parameter ensures AST nodes are not modified
/// - **Contextual generation**: All LLVM operations go through the shared context
/// - **Type safety**: Return types are specified to match the node's semantic meaning
///
/// ## Return Value Types
///
/// - **Expressions**: `Option<BasicValueEnum<'ctx>>` - may or may not produce values
/// - **Statements**: `()` - perform side effects but don't produce values
/// - **Specialized**: Some nodes have custom return types for their specific needs
pub trait CodeGen<'ctx> {
    /// The type of value this AST node produces during code generation
    type ReturnValue;

    /// Generates LLVM IR for this AST node.
    ///
    /// # Parameters
    ///
    /// * `ctx` - The code generation context containing LLVM state and scoping information
    ///
    /// # Returns
    ///
    /// The result of code generation, type-specific to the implementing node
    fn codegen(&self, ctx: &CodegenContext<'ctx>) -> Self::ReturnValue;
}

/// Converts a Y-lang type to its corresponding LLVM type representation.
///
/// This function handles the mapping between Y-lang's type system and LLVM's type system.
/// It's called by `CodegenContext::get_llvm_type` for types not in the cache.
///
/// ## Type Mapping Strategy
///
/// - **Primitives**: Direct mapping to LLVM built-in types
/// - **Strings**: Represented as `i8*` (pointer to character data)
/// - **Arrays**: Represented as pointers to element type
/// - **Structs**: Converted to LLVM struct types with field layout
/// - **Functions**: Mapped to the opaque `{i8*, i8*}` struct (see `get_closure_struct_type`)
/// - **Tuples**: Converted to LLVM struct types
///
/// ## Memory Layout Considerations
///
/// - Structs use natural alignment (not packed)
/// - Arrays are represented as pointers for dynamic sizing
///
/// # Parameters
///
/// * `our_type` - The Y-lang type to convert
/// * `ctx` - Code generation context for recursive type conversion
///
/// # Returns
///
/// Corresponding LLVM type as `BasicMetadataTypeEnum`
///
/// # Panics
///
/// - `Type::Void`: Cannot be used as BasicMetadataTypeEnum
/// - `Type::Unknown`: Cannot convert unknown types
/// - Failed conversions for complex types
fn convert_our_type_to_llvm_basic_metadata_type<'ctx>(
    our_type: &Type,
    ctx: &CodegenContext<'ctx>,
) -> BasicMetadataTypeEnum<'ctx> {
    match our_type {
        Type::Integer => ctx.context.i32_type().into(),
        Type::FloatingPoint => ctx.context.f32_type().into(),
        Type::Boolean => ctx.context.bool_type().into(),
        Type::Character => ctx.context.i8_type().into(), // UTF-8 char representation
        Type::String => {
            // The managed `(data, length, ref)` layout (§4.5.1) is passed by
            // value everywhere, matching `crate::stdlib::string_struct_type`.
            crate::stdlib::string_struct_type(ctx).into()
        }
        Type::Void => {
            // Void isn't a valid BasicMetadataTypeEnum — can return pointer or dummy
            panic!("Void cannot be used as a BasicMetadataTypeEnum")
        }
        Type::Unknown => {
            panic!("Cannot convert unknown type to LLVM")
        }
        Type::Reference(_) => ctx.context.ptr_type(Default::default()).into(),
        // `any` is the standard-library polymorphism knob (§9); it erases to
        // the same bare pointer every other reference-like value uses.
        Type::Any => ctx.context.ptr_type(Default::default()).into(),
        // The RC header itself is always handled behind a pointer.
        Type::Ref => ctx.context.ptr_type(Default::default()).into(),
        Type::Tuple(items) => {
            let types: Vec<_> = items
                .iter()
                .map(|item_type| {
                    // TODO: what about functions?
                    convert_metadata_to_basic(ctx.get_llvm_type(item_type)).unwrap_or_else(|| {
                        panic!("{item_type:?} can not be converted to a tuple item")
                    })
                })
                .collect();
            let struct_type = ctx.context.struct_type(&types, false);
            struct_type.into()
        }
        Type::Array(element_type) => {
            // TODO: do we actually need this?
            let element_llvm_type = ctx.get_llvm_type(element_type);
            let element_basic_type = convert_metadata_to_basic(element_llvm_type)
                .expect("Array element type must be basic");

            // For now, we'll represent arrays as pointers to their element type
            // This matches how we handle them in codegen (stack-allocated arrays)
            ctx.context.ptr_type(Default::default()).into()
        }
        Type::Struct(_, fields) => {
            let llvm_fields: Vec<_> = fields
                .iter()
                .map(|(_, field_type)| {
                    // TODO: what about functions?
                    convert_metadata_to_basic(ctx.get_llvm_type(field_type)).unwrap_or_else(|| {
                        panic!("{field_type:?} can not be converted to a struct field")
                    })
                })
                .collect();
            let struct_type = ctx.context.struct_type(&llvm_fields, false);
            struct_type.into()
        }
        // Function types are now represented as closure structs {i8*, i8*}
        Type::Function {
            params: _,
            return_value: _,
        } => {
            // All function types use the same closure struct representation
            let closure_struct_type = ctx.get_closure_struct_type();
            closure_struct_type.into()
        }
    }
}

/// The LLVM struct type backing a managed (T1) value: `string`'s fixed
/// `(data, length, ref)` triple, or a managed user `Struct`'s own layout.
fn managed_struct_type<'ctx>(ctx: &CodegenContext<'ctx>, ty: &Type) -> StructType<'ctx> {
    match ty {
        Type::String => crate::stdlib::string_struct_type(ctx),
        _ => convert_metadata_to_basic(ctx.get_llvm_type(ty))
            .expect("managed struct type must be a basic type")
            .into_struct_type(),
    }
}

/// Index of the embedded `Ref*` field within a managed (T1) value's struct
/// layout: fixed at 2 for `string`, found by position for a managed user
/// `Struct`.
fn managed_ref_field_index(ty: &Type) -> u32 {
    match ty {
        Type::String => 2,
        Type::Struct(_, fields) => fields
            .iter()
            .position(|(_, field_type)| matches!(field_type, Type::Ref))
            .expect("needs_memory_management implies a Ref field is present") as u32,
        other => unreachable!("track_managed_value called on non-managed type {other:?}"),
    }
}

/// Drain and `Ref.dec` every managed local registered against `scope`,
/// shared by `release_managed_locals` (current scope only) and
/// `release_all_managed_locals` (every scope but the root).
fn release_locals_in<'ctx>(ctx: &CodegenContext<'ctx>, scope: &ScopeFrame<'ctx>) {
    let locals = std::mem::take(&mut scope.borrow_mut().managed_locals);
    if locals.is_empty() {
        return;
    }

    let ref_dec = ctx
        .module
        .get_function("Ref.dec")
        .expect("Ref.dec installed before any managed value is produced");

    for (slot, struct_ty, ref_index) in locals {
        let value = ctx
            .builder
            .build_load(struct_ty, slot, "managed_release")
            .unwrap()
            .into_struct_value();
        let ref_ptr = ctx
            .builder
            .build_extract_value(value, ref_index, "ref_ptr")
            .unwrap()
            .into_pointer_value();
        ctx.builder.build_call(ref_dec, &[ref_ptr.into()], "").unwrap();
    }
}

/// Converts LLVM metadata type enum to basic type enum.
///
/// LLVM distinguishes between "metadata" types (which can include additional
/// type information) and "basic" types (which can be used for values).
/// This function converts between these representations when possible.
///
/// ## Usage Context
///
/// This is primarily used when creating LLVM instructions that require
/// `BasicTypeEnum` parameters (like `alloca`, `load`, `store`) but we have
/// `BasicMetadataTypeEnum` from our type conversion system.
///
/// ## Conversion Coverage
///
/// Handles all standard LLVM basic types:
/// - Arrays, floats, integers, pointers, structs, vectors
/// - Returns `None` for metadata-only types that can't be used as basic types
///
/// # Parameters
///
/// * `ty` - The metadata type enum to convert
///
/// # Returns
///
/// `Some(BasicTypeEnum)` if conversion is possible, `None` otherwise
fn convert_metadata_to_basic(ty: BasicMetadataTypeEnum) -> Option<BasicTypeEnum> {
    match ty {
        // Standard conversions for all basic LLVM types
        BasicMetadataTypeEnum::ArrayType(t) => Some(BasicTypeEnum::ArrayType(t)),
        BasicMetadataTypeEnum::FloatType(t) => Some(BasicTypeEnum::FloatType(t)),
        BasicMetadataTypeEnum::IntType(t) => Some(BasicTypeEnum::IntType(t)),
        BasicMetadataTypeEnum::PointerType(t) => Some(BasicTypeEnum::PointerType(t)),
        BasicMetadataTypeEnum::StructType(t) => Some(BasicTypeEnum::StructType(t)),
        BasicMetadataTypeEnum::VectorType(t) => Some(BasicTypeEnum::VectorType(t)),

        // Metadata-only types that cannot be converted to basic types
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::managed_ref_field_index;
    use crate::typechecker::Type;

    #[test]
    fn string_ref_field_is_fixed_at_index_2() {
        assert_eq!(managed_ref_field_index(&Type::String), 2);
    }

    #[test]
    fn struct_ref_field_is_found_by_position() {
        let fields = vec![
            ("data".to_string(), Type::Integer),
            ("ref".to_string(), Type::Ref),
        ];
        let ty = Type::Struct("Widget".to_string(), fields);

        assert_eq!(managed_ref_field_index(&ty), 1);
    }

    #[test]
    #[should_panic(expected = "needs_memory_management implies a Ref field is present")]
    fn struct_without_ref_field_panics() {
        let ty = Type::Struct("Widget".to_string(), vec![("data".to_string(), Type::Integer)]);
        managed_ref_field_index(&ty);
    }
}
