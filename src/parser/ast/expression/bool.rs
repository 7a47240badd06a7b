use crate::grammar;
use crate::grammar::FromGrammar;
use crate::lexer::Span;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bool<T> {
    pub value: bool,
    pub position: Span,
    pub info: T,
}

impl<T> Bool<T>
where
    T: Clone,
{
    pub fn get_info(&self) -> T {
        self.info.clone()
    }

    pub fn position(&self) -> Span {
        self.position.clone()
    }
}

impl FromGrammar<grammar::BooleanLiteral> for Bool<()> {
    fn transform(item: rust_sitter::Spanned<grammar::BooleanLiteral>, source: &str) -> Self {
        let rust_sitter::Spanned { value, span } = item;

        Bool {
            value: matches!(value, grammar::BooleanLiteral::True),
            position: Span::new(span, source),
            info: (),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Expression;
    use crate::parser::test_helpers::*;

    #[test]
    fn test_parse_true() {
        let result = parse_expression("true").unwrap();
        assert!(matches!(result, Expression::Bool(ref b) if b.value));
    }

    #[test]
    fn test_parse_false() {
        let result = parse_expression("false").unwrap();
        assert!(matches!(result, Expression::Bool(ref b) if !b.value));
    }
}
