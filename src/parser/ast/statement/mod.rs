mod assignment;
mod constant;
mod declaration;
mod initialisation;
mod while_loop;

pub use self::assignment::*;
pub use self::constant::*;
pub use self::declaration::*;
pub use self::initialisation::*;
pub use self::while_loop::*;

use crate::grammar::{self, FromGrammar};
use crate::lexer::Span;

use super::{Expression, Function};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Statement<T> {
    Function(Function<T>),
    WhileLoop(WhileLoop<T>),
    Initialization(Initialisation<T>),
    Constant(Constant<T>),
    Assignment(Assignment<T>),
    Expression(Expression<T>),
    YieldingExpression(Expression<T>),
    Return(Expression<T>),
    Comment(String),
    Declaration(Declaration<T>),
}

/// Everything that is allowed at toplevel
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TopLevelStatement<T> {
    Comment(String),
    Function(Function<T>),
    Constant(Constant<T>),
    Declaration(Declaration<T>),
}

impl FromGrammar<grammar::Statement> for Statement<()> {
    fn transform(item: rust_sitter::Spanned<grammar::Statement>, source: &str) -> Self {
        let rust_sitter::Spanned { value, span: _ } = item;

        match value {
            grammar::Statement::FunctionDeclaration(function) => {
                Statement::Function(Function::transform(function, source))
            }
            grammar::Statement::VariableDeclaration(declaration) => {
                Statement::Initialization(Initialisation::transform(declaration, source))
            }
            grammar::Statement::Assignment(assignment) => {
                Statement::Assignment(Assignment::transform(assignment, source))
            }
            grammar::Statement::WhileStatement(while_statement) => {
                Statement::WhileLoop(WhileLoop::transform(while_statement, source))
            }
            grammar::Statement::Constant(constant) => {
                Statement::Constant(Constant::transform(constant, source))
            }
            grammar::Statement::Expression { inner, .. } => {
                Statement::Expression(Expression::transform(inner, source))
            }
            grammar::Statement::YieldingExpression(expression) => {
                Statement::YieldingExpression(Expression::transform(expression, source))
            }
            grammar::Statement::Return { inner, .. } => {
                Statement::Return(Expression::transform(inner, source))
            }
            grammar::Statement::Declaration(declaration) => {
                Statement::Declaration(Declaration::transform(declaration, source))
            }
            grammar::Statement::Comment(comment) => Statement::Comment(comment.value.content),
        }
    }
}

impl FromGrammar<grammar::ToplevelStatement> for TopLevelStatement<()> {
    fn transform(item: rust_sitter::Spanned<grammar::ToplevelStatement>, source: &str) -> Self {
        let rust_sitter::Spanned { value, span: _ } = item;

        match value {
            grammar::ToplevelStatement::FunctionDeclaration(function) => {
                TopLevelStatement::Function(Function::transform(function, source))
            }
            grammar::ToplevelStatement::Constant(constant) => {
                TopLevelStatement::Constant(Constant::transform(constant, source))
            }
            grammar::ToplevelStatement::Declaration(declaration) => {
                TopLevelStatement::Declaration(Declaration::transform(declaration, source))
            }
            grammar::ToplevelStatement::Comment(comment) => {
                TopLevelStatement::Comment(comment.value.content)
            }
        }
    }
}

impl<T> Statement<T>
where
    T: Clone,
{
    pub fn get_info(&self) -> T {
        match self {
            Statement::Function(Function { info, .. }) => info.clone(),
            Statement::WhileLoop(WhileLoop { info, .. }) => info.clone(),
            Statement::Initialization(Initialisation { info, .. }) => info.clone(),
            Statement::Constant(Constant { info, .. }) => info.clone(),
            Statement::Assignment(Assignment { info, .. }) => info.clone(),
            Statement::Expression(exp) => exp.get_info(),
            Statement::YieldingExpression(exp) => exp.get_info(),
            Statement::Return(exp) => exp.get_info(),
            Statement::Comment(_) => unimplemented!("Comments to not have type information"),
            Statement::Declaration(Declaration { info, .. }) => info.clone(),
        }
    }

    pub fn position(&self) -> Span {
        match self {
            Statement::Function(Function { position, .. }) => position.clone(),
            Statement::WhileLoop(WhileLoop { position, .. }) => position.clone(),
            Statement::Initialization(Initialisation { position, .. }) => position.clone(),
            Statement::Constant(Constant { position, .. }) => position.clone(),
            Statement::Assignment(Assignment { position, .. }) => position.clone(),
            Statement::Expression(exp) => exp.position(),
            Statement::YieldingExpression(exp) => exp.position(),
            Statement::Return(exp) => exp.position(),
            Statement::Comment(_) => Span::default(),
            Statement::Declaration(Declaration { position, .. }) => position.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{BinaryOperator, Expression, Num};
    use crate::parser::test_helpers::*;

    use super::*;

    #[test]
    fn test_basic_constant() {
        let program = grammar::parse("const foo: i32 = 42;").expect("should parse");
        let statement = program.statements.first().expect("has a statement");
        let TopLevelStatement::Constant(result) =
            TopLevelStatement::transform(statement.clone(), "const foo: i32 = 42;")
        else {
            panic!("Expected constant");
        };

        assert_eq!(result.id.name, "foo");
        assert!(matches!(
            result.value,
            Expression::Num(Num::Integer(42, (), _))
        ));
    }

    #[test]
    fn test_basic_return() {
        let result = parse_statement("return 42;").unwrap();

        assert!(matches!(
            result,
            Statement::Return(Expression::Num(Num::Integer(42, (), _)))
        ));
    }

    #[test]
    fn test_if_without_semicolon_yields() {
        let result = parse_statement("if (x) { 3 + 4 } else { 42 + 1337 }").unwrap();

        let Statement::YieldingExpression(Expression::If(if_expression)) = result else {
            panic!("Expected yielding if expression");
        };

        assert!(matches!(*if_expression.condition, Expression::Id(_)));
    }

    #[test]
    fn test_if_with_semicolon_is_statement() {
        let result = parse_statement("if (x) { 3 + 4 } else { 42 + 1337 };").unwrap();

        assert!(matches!(result, Statement::Expression(Expression::If(_))));
    }

    #[test]
    fn test_simple_assignment() {
        let result = parse_statement("x = 42;").unwrap();

        let Statement::Assignment(assignment) = result else {
            panic!("Expected assignment statement");
        };

        assert!(matches!(assignment.lvalue, LValue::Id(ref id) if id.name == "x"));
        assert!(matches!(
            assignment.rvalue,
            Expression::Num(Num::Integer(42, (), _))
        ));
    }

    #[test]
    fn test_binary_in_block() {
        let result = parse_block("{ 3 + 4 }").unwrap();

        assert_eq!(result.statements.len(), 1);
        let Statement::YieldingExpression(Expression::Binary(binary)) = &result.statements[0]
        else {
            panic!("Expected yielding binary expression");
        };
        assert!(matches!(binary.operator, BinaryOperator::Add));
    }

    fn parse_block(code: &str) -> Result<crate::parser::ast::Block<()>, String> {
        match parse_expression(code)? {
            Expression::Block(block) => Ok(block),
            _ => Err("Expected block expression".to_string()),
        }
    }
}
