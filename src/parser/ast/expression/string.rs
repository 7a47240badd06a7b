use crate::grammar;
use crate::grammar::FromGrammar;
use crate::lexer::Span;
use unescape::unescape;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AstString<T> {
    pub value: String,
    pub info: T,
    pub position: Span,
}

impl FromGrammar<grammar::StringLiteral> for AstString<()> {
    fn transform(item: rust_sitter::Spanned<grammar::StringLiteral>, source: &str) -> Self {
        let rust_sitter::Spanned { value, span } = item;
        let grammar::StringLiteral(rust_sitter::Spanned { value: raw, .. }) = value;

        AstString {
            value: unescape(&raw).unwrap_or(raw),
            info: (),
            position: Span::new(span, source),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Expression;
    use crate::parser::test_helpers::*;

    #[test]
    fn test_empty_string_parse() {
        let result = parse_expression(r#""""#).unwrap();
        assert!(matches!(result, Expression::AstString(ref s) if s.value.is_empty()));
    }

    #[test]
    fn test_simple_string_parse() {
        let result = parse_expression(r#""foo""#).unwrap();
        assert!(matches!(result, Expression::AstString(ref s) if s.value == "foo"));
    }

    #[test]
    fn test_string_with_spaces() {
        let result = parse_expression(r#""hello world""#).unwrap();
        assert!(matches!(result, Expression::AstString(ref s) if s.value == "hello world"));
    }

    #[test]
    fn test_string_with_escape_sequences() {
        let result = parse_expression(r#""\t\n""#).unwrap();
        assert!(matches!(result, Expression::AstString(ref s) if s.value == "\t\n"));
    }
}
