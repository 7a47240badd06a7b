use crate::grammar;
use crate::grammar::FromGrammar;
use crate::lexer::Span;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Character<T> {
    pub character: char,
    pub position: Span,
    pub info: T,
}

impl FromGrammar<grammar::CharacterLiteral> for Character<()> {
    fn transform(item: rust_sitter::Spanned<grammar::CharacterLiteral>, source: &str) -> Self {
        let rust_sitter::Spanned { value, span } = item;
        let grammar::CharacterLiteral(rust_sitter::Spanned { value: character, .. }) = value;

        Character {
            character,
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
    fn test_parse_simple() {
        let result = parse_expression("'a'").unwrap();
        assert!(matches!(result, Expression::Character(ref c) if c.character == 'a'));
    }
}
