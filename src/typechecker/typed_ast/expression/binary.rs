//! Binary-operator resolution (§4.6): `lhs op rhs` is never codegen'd as a
//! raw operation. It is looked up as `f"{lhs.type}.{op_name}_{rhs.type}"` and
//! rewritten into a call of that stdlib or user-defined method - by the time
//! code generation runs, no node carries a bare `BinaryOperator` anymore; the
//! resolved callee lives in `Scope::resolved_callees`, keyed by this node's
//! span, for the code generator to pick back up (§4.7.5).
//!
//! The inherited grammar's `BinaryOperator` enum only carries the operators
//! its surface syntax parses (no `%`, `!=`, `&&`, `||`) - so the lookup table
//! below is narrower than the full op-name map in §4.6; see DESIGN.md.

use std::{cell::RefCell, rc::Rc};

use crate::typechecker::error::UnsupportedBinaryOperation;
use crate::typechecker::{TypeValidationError, TypedConstruct, ValidatedTypeInformation};
use crate::{
    parser::ast::{BinaryExpression, BinaryOperator},
    typechecker::{
        context::Context, error::TypeCheckError, types::Type, TypeCheckable, TypeInformation,
        TypeResult,
    },
};

/// `(symbol, op_name)` for the operators this grammar actually parses (§4.6's
/// `op_map` restricted to what `BinaryOperator` can hold).
fn operator_names(operator: &BinaryOperator) -> (&'static str, &'static str) {
    match operator {
        BinaryOperator::Add => ("+", "add"),
        BinaryOperator::Substract => ("-", "sub"),
        BinaryOperator::Multiply => ("*", "mul"),
        BinaryOperator::Divide => ("/", "div"),
        BinaryOperator::Equals => ("==", "eq"),
        BinaryOperator::GreaterThan => (">", "gt"),
        BinaryOperator::LessThan => ("<", "lt"),
        BinaryOperator::GreaterOrEqual => (">=", "gte"),
        BinaryOperator::LessOrEqual => ("<=", "lte"),
    }
}

impl TypeCheckable for BinaryExpression<()> {
    type Typed = BinaryExpression<TypeInformation>;

    fn check(self, ctx: &mut Context) -> TypeResult<Self::Typed> {
        let context = ctx.clone();
        let BinaryExpression {
            left,
            right,
            operator,
            position,
            ..
        } = self;

        let left = left.check(ctx)?;
        let right = right.check(ctx)?;

        let left_type = { left.get_info().type_id.borrow() }.clone();
        let right_type = { right.get_info().type_id.borrow() }.clone();

        let type_id = match (left_type, right_type) {
            (Some(left_type), Some(right_type)) => {
                let (symbol, op_name) = operator_names(&operator);
                let method_name = format!("{op_name}_{}", right_type.stdlib_name());

                let signature = ctx.scope.resolve_property_for_type(left_type.clone(), &method_name);
                let Some(Type::Function { return_value, .. }) = signature else {
                    return Err(TypeCheckError::UnsupportedBinaryOperation(
                        UnsupportedBinaryOperation {
                            operator: symbol.to_string(),
                            operands: (left_type, right_type),
                        },
                        position,
                    ));
                };

                let callee = format!("{}.{method_name}", left_type.stdlib_name());
                ctx.scope.record_resolved_callee(&position, callee);

                Some(*return_value)
            }
            // Either operand's type is still being inferred (a same-pass
            // forward reference); defer and let validation surface it if it
            // never resolves.
            _ => None,
        };

        Ok(BinaryExpression {
            left,
            right,
            operator,
            info: TypeInformation {
                type_id: Rc::new(RefCell::new(type_id)),
                context,
            },
            position,
        })
    }

    fn revert(this: &Self::Typed) -> Self {
        let BinaryExpression {
            left,
            right,
            operator,
            position,
            ..
        } = this;

        BinaryExpression {
            left: TypeCheckable::revert(left),
            right: TypeCheckable::revert(right),
            operator: *operator,
            info: (),
            position: position.clone(),
        }
    }
}

impl TypedConstruct for BinaryExpression<TypeInformation> {
    type Validated = BinaryExpression<ValidatedTypeInformation>;

    fn validate(self) -> Result<Self::Validated, TypeValidationError> {
        let BinaryExpression {
            left,
            right,
            operator,
            info,
            position,
        } = self;

        Ok(BinaryExpression {
            left: left.validate()?,
            right: right.validate()?,
            operator,
            info: info.validate(&position)?,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use anyhow::Result;

    use crate::{
        lexer::Span,
        parser::ast::{BinaryExpression, BinaryOperator, Expression, Num},
        typechecker::{context::Context, error::TypeCheckError, types::Type, TypeCheckable},
    };

    #[test]
    fn test_simple_addition() -> Result<()> {
        let mut ctx = Context::default();
        crate::stdlib::install(&mut ctx.scope);
        let exp = BinaryExpression {
            left: Expression::Num(Num::Integer(42, (), Span::default())),
            right: Expression::Num(Num::Integer(1337, (), Span::default())),
            operator: BinaryOperator::Add,
            info: (),
            position: Span::default(),
        };

        let exp = exp.check(&mut ctx)?;

        assert_eq!(exp.info.type_id, Rc::new(RefCell::new(Some(Type::Integer))));

        Ok(())
    }

    #[test]
    fn test_simple_equality() -> Result<()> {
        let mut ctx = Context::default();
        crate::stdlib::install(&mut ctx.scope);
        let exp = BinaryExpression {
            left: Expression::Num(Num::Integer(42, (), Span::default())),
            right: Expression::Num(Num::Integer(1337, (), Span::default())),
            operator: BinaryOperator::Equals,
            info: (),
            position: Span::default(),
        };

        let exp = exp.check(&mut ctx)?;

        assert_eq!(exp.info.type_id, Rc::new(RefCell::new(Some(Type::Boolean))));

        Ok(())
    }

    #[test]
    fn test_addition_with_incompatible_types() -> Result<()> {
        let mut ctx = Context::default();
        crate::stdlib::install(&mut ctx.scope);
        let exp = BinaryExpression {
            left: Expression::Num(Num::Integer(42, (), Span::default())),
            right: Expression::Num(Num::FloatingPoint(1337.0, (), Span::default())),
            operator: BinaryOperator::Add,
            info: (),
            position: Span::default(),
        };

        let res = exp.check(&mut ctx);

        assert!(matches!(res, Err(TypeCheckError::UnsupportedBinaryOperation(_, _))));

        Ok(())
    }

    #[test]
    fn test_comparison_records_resolved_callee() -> Result<()> {
        let mut ctx = Context::default();
        crate::stdlib::install(&mut ctx.scope);
        let exp = BinaryExpression {
            left: Expression::Num(Num::Integer(1, (), Span::default())),
            right: Expression::Num(Num::Integer(2, (), Span::default())),
            operator: BinaryOperator::LessThan,
            info: (),
            position: Span::default(),
        };

        let exp = exp.check(&mut ctx)?;
        assert_eq!(exp.info.type_id, Rc::new(RefCell::new(Some(Type::Boolean))));
        assert_eq!(
            exp.info.context.scope.get_resolved_callee(&Span::default()),
            Some("int.lt_int".to_string())
        );

        Ok(())
    }
}
