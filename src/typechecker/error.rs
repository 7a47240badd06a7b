use std::{error::Error, fmt::Display};

use crate::{lexer::Span, parser::ast::TypeName};

use super::types::Type;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeCheckError {
    TypeMismatch(TypeMismatch, Span),
    UndefinedVariable(UndefinedVariable, Span),
    UndefinedType(UndefinedType, Span),
    InvalidConstantType(InvalidConstantType, Span),
    RedefinedConstant(RedefinedConstant, Span),
    ImmutableReassign(ImmutableReassign, Span),
    UnsupportedBinaryOperation(UnsupportedBinaryOperation, Span),
    UnsupportedOperation(UnsupportedOperation, Span),
    IntegerRange(IntegerRange, Span),
    NoMatchingOverload(NoMatchingOverload, Span),
    UnknownAttribute(UnknownAttribute, Span),
    MissingMainFunction(MissingMainFunction),
    InvalidMainSignature(InvalidMainSignature, Span),
}

impl Display for TypeCheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.span().to_string(self.err()).as_str())
    }
}

impl TypeCheckError {
    fn span(&self) -> Span {
        match self {
            TypeCheckError::TypeMismatch(_, span) => span.clone(),
            TypeCheckError::UndefinedVariable(_, span) => span.clone(),
            TypeCheckError::UndefinedType(_, span) => span.clone(),
            TypeCheckError::InvalidConstantType(_, span) => span.clone(),
            TypeCheckError::RedefinedConstant(_, span) => span.clone(),
            TypeCheckError::ImmutableReassign(_, span) => span.clone(),
            TypeCheckError::UnsupportedBinaryOperation(_, span) => span.clone(),
            TypeCheckError::UnsupportedOperation(_, span) => span.clone(),
            TypeCheckError::IntegerRange(_, span) => span.clone(),
            TypeCheckError::NoMatchingOverload(_, span) => span.clone(),
            TypeCheckError::UnknownAttribute(_, span) => span.clone(),
            TypeCheckError::MissingMainFunction(_) => Span::default(),
            TypeCheckError::InvalidMainSignature(_, span) => span.clone(),
        }
    }

    fn err(&self) -> Box<dyn Error> {
        match self {
            TypeCheckError::TypeMismatch(e, _) => Box::new(e.clone()),
            TypeCheckError::UndefinedVariable(e, _) => Box::new(e.clone()),
            TypeCheckError::UndefinedType(e, _) => Box::new(e.clone()),
            TypeCheckError::InvalidConstantType(e, _) => Box::new(e.clone()),
            TypeCheckError::RedefinedConstant(e, _) => Box::new(e.clone()),
            TypeCheckError::ImmutableReassign(e, _) => Box::new(e.clone()),
            TypeCheckError::UnsupportedBinaryOperation(e, _) => Box::new(e.clone()),
            TypeCheckError::UnsupportedOperation(e, _) => Box::new(e.clone()),
            TypeCheckError::IntegerRange(e, _) => Box::new(e.clone()),
            TypeCheckError::NoMatchingOverload(e, _) => Box::new(e.clone()),
            TypeCheckError::UnknownAttribute(e, _) => Box::new(e.clone()),
            TypeCheckError::MissingMainFunction(e) => Box::new(e.clone()),
            TypeCheckError::InvalidMainSignature(e, _) => Box::new(e.clone()),
        }
    }
}

impl Error for TypeCheckError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMismatch {
    pub expected: Type,
    pub actual: Type,
}

impl Display for TypeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Expected type '{:?}' but got '{:?}'",
            self.expected, self.actual
        ))
    }
}

impl Error for TypeMismatch {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndefinedVariable {
    pub variable_name: String,
}

impl Display for UndefinedVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Tried to access undefined variable {}",
            self.variable_name
        ))
    }
}

impl Error for UndefinedVariable {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndefinedType {
    pub type_name: TypeName,
}

impl Display for UndefinedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Undefined type {}", self.type_name))
    }
}

impl Error for UndefinedType {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidConstantType {
    pub constant_name: String,
}

impl Display for InvalidConstantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Constant '{}' needs to have a valid annotated type",
            self.constant_name
        ))
    }
}

impl Error for InvalidConstantType {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedefinedConstant {
    pub constant_name: String,
}

impl Display for RedefinedConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Constant '{}' is already defined",
            self.constant_name
        ))
    }
}

impl Error for RedefinedConstant {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImmutableReassign {
    pub variable_name: String,
}

impl Display for ImmutableReassign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Can not reassign immutable variable '{}'",
            self.variable_name
        ))
    }
}

impl Error for ImmutableReassign {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedBinaryOperation {
    pub operator: String,
    pub operands: (Type, Type),
}

impl Display for UnsupportedBinaryOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (lhs, rhs) = &self.operands;
        f.write_fmt(format_args!(
            "unsupported operation '{}' for '{lhs:?}' and '{rhs:?}'",
            self.operator
        ))
    }
}

impl Error for UnsupportedBinaryOperation {}

/// Unsupported unary operation, attribute access or cast, i.e. any operator
/// lookup of the form `T.<name>` that did not resolve to a registered
/// function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedOperation {
    pub callee: String,
    pub on: Type,
}

impl Display for UnsupportedOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "unsupported operation: no '{}' defined on '{:?}'",
            self.callee, self.on
        ))
    }
}

impl Error for UnsupportedOperation {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerRange {
    pub value: i64,
    pub too_large: bool,
}

impl Display for IntegerRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let which = if self.too_large { "too large" } else { "too small" };
        f.write_fmt(format_args!(
            "integer literal '{}' is {which} to fit a 32 bit signed integer",
            self.value
        ))
    }
}

impl Error for IntegerRange {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoMatchingOverload {
    pub name: String,
    pub argument_types: Vec<Type>,
}

impl Display for NoMatchingOverload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "no matching overload for '{}' with argument types [{}]",
            self.name,
            self.argument_types
                .iter()
                .map(|t| format!("{t:?}"))
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

impl Error for NoMatchingOverload {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownAttribute {
    pub attribute_name: String,
    pub on: Type,
}

impl Display for UnknownAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "unknown attribute '{}' on '{:?}'",
            self.attribute_name, self.on
        ))
    }
}

impl Error for UnknownAttribute {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingMainFunction;

impl Display for MissingMainFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("program has no 'main' function")
    }
}

impl Error for MissingMainFunction {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidMainSignature;

impl Display for InvalidMainSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("'main' must take no parameters and return 'int'")
    }
}

impl Error for InvalidMainSignature {}
