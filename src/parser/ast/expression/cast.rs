use crate::grammar;
use crate::grammar::FromGrammar;
use crate::lexer::Span;

use super::{Expression, TypeName};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Cast<T> {
    pub expr: Box<Expression<T>>,
    pub type_name: TypeName,
    pub info: T,
    pub position: Span,
}

impl<T> Cast<T>
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

impl FromGrammar<grammar::CastExpression> for Cast<()> {
    fn transform(item: rust_sitter::Spanned<grammar::CastExpression>, source: &str) -> Self {
        let rust_sitter::Spanned { value, span } = item;

        Cast {
            expr: Box::new(Expression::transform(*value.expression, source)),
            type_name: TypeName::transform(value.type_name, source),
            info: (),
            position: Span::new(span, source),
        }
    }
}
