use std::fmt::Display;

use crate::grammar;
use crate::grammar::FromGrammar;
use crate::lexer::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Literal(String, Span),
    Fn {
        params: Vec<TypeName>,
        return_type: Box<TypeName>,
        position: Span,
    },
    Tuple(Vec<TypeName>, Span),
    Array(Box<TypeName>, Span),
    Reference(Box<TypeName>, Span),
}

impl TypeName {
    pub fn position(&self) -> Span {
        match self {
            TypeName::Literal(_, position) => position.clone(),
            TypeName::Fn { position, .. } => position.clone(),
            TypeName::Tuple(_, position) => position.clone(),
            TypeName::Array(_, position) => position.clone(),
            TypeName::Reference(_, position) => position.clone(),
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeName::Literal(lit, _) => f.write_str(lit.as_str()),
            TypeName::Fn {
                params,
                return_type,
                ..
            } => f.write_fmt(format_args!(
                "({}) -> {return_type}",
                params
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            TypeName::Tuple(lits, _) => f.write_fmt(format_args!(
                "({})",
                lits.iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            TypeName::Array(el, _) => f.write_fmt(format_args!("[{el}]")),
            TypeName::Reference(el, _) => f.write_fmt(format_args!("&{el}")),
        }
    }
}

impl From<&TypeName> for TypeName {
    fn from(value: &TypeName) -> Self {
        value.clone()
    }
}

impl FromGrammar<grammar::TypeName> for TypeName {
    fn transform(item: rust_sitter::Spanned<grammar::TypeName>, source: &str) -> Self {
        let rust_sitter::Spanned { value, span } = item;
        let position = Span::new(span, source);

        match value {
            grammar::TypeName::LiteralType(literal) => {
                TypeName::Literal(literal.typename.value.0.value, position)
            }
            grammar::TypeName::ArrayType(array) => {
                TypeName::Array(Box::new(TypeName::transform(*array.inner, source)), position)
            }
            grammar::TypeName::ReferenceType(reference) => TypeName::Reference(
                Box::new(TypeName::transform(*reference.inner, source)),
                position,
            ),
            grammar::TypeName::TupleType(tuple) => TypeName::Tuple(
                tuple
                    .types
                    .into_iter()
                    .map(|type_name| TypeName::transform(type_name, source))
                    .collect(),
                position,
            ),
            grammar::TypeName::FunctionType(function) => TypeName::Fn {
                params: function
                    .params
                    .types
                    .into_iter()
                    .map(|type_name| TypeName::transform(type_name, source))
                    .collect(),
                return_type: Box::new(TypeName::transform(*function.return_type, source)),
                position,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TypeName;
    use crate::parser::test_helpers::*;

    #[test]
    fn test_parse_simple_literal() {
        let result = parse_type_name("i32").unwrap();
        assert!(matches!(result, TypeName::Literal(ref name, _) if name == "i32"));
    }

    #[test]
    fn test_parse_simple_tuple() {
        let result = parse_type_name("(i32, i32)").unwrap();
        match result {
            TypeName::Tuple(types, _) => {
                assert_eq!(types.len(), 2);
                assert!(matches!(types[0], TypeName::Literal(ref name, _) if name == "i32"));
                assert!(matches!(types[1], TypeName::Literal(ref name, _) if name == "i32"));
            }
            _ => panic!("Expected tuple type"),
        }
    }

    #[test]
    fn test_parse_simple_function() {
        let result = parse_type_name("() -> i32").unwrap();
        match result {
            TypeName::Fn {
                params,
                return_type,
                ..
            } => {
                assert_eq!(params.len(), 0);
                assert!(matches!(*return_type, TypeName::Literal(ref name, _) if name == "i32"));
            }
            _ => panic!("Expected function type"),
        }
    }

    #[test]
    fn test_parse_simple_reference() {
        let result = parse_type_name("&i32").unwrap();
        match result {
            TypeName::Reference(inner, _) => {
                assert!(matches!(*inner, TypeName::Literal(ref name, _) if name == "i32"));
            }
            _ => panic!("Expected reference type"),
        }
    }

    #[test]
    fn test_parse_array() {
        let result = parse_type_name("&[i32]").unwrap();
        match result {
            TypeName::Array(inner, _) => {
                assert!(matches!(*inner, TypeName::Literal(ref name, _) if name == "i32"));
            }
            _ => panic!("Expected array type"),
        }
    }
}
