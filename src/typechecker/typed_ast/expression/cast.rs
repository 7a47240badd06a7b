//! Cast resolution (§4.6): `obj as T` is looked up as `f"{obj.type}.to_{T}"`
//! and rewritten into a call of that stdlib or user-defined conversion - by
//! the time code generation runs, no node carries a bare target type name
//! anymore; the resolved callee lives in `Scope::resolved_callees`, keyed by
//! this node's span, for the code generator to pick back up (§4.7.5), same
//! as the `BinaryOp` rewrite in `binary.rs`.

use std::{cell::RefCell, rc::Rc};

use crate::typechecker::{TypeValidationError, TypedConstruct, ValidatedTypeInformation};
use crate::{
    parser::ast::Cast,
    typechecker::{
        context::Context,
        error::{TypeCheckError, UndefinedType, UnsupportedOperation},
        types::Type,
        TypeCheckable, TypeInformation, TypeResult,
    },
};

impl TypeCheckable for Cast<()> {
    type Typed = Cast<TypeInformation>;

    fn check(self, ctx: &mut Context) -> TypeResult<Self::Typed> {
        let context = ctx.clone();
        let Cast {
            expr,
            type_name,
            position,
            ..
        } = self;

        let expr = expr.check(ctx)?;

        let Ok(target_type) = Type::try_from((&type_name, &*ctx)) else {
            let type_name_position = type_name.position();
            return Err(TypeCheckError::UndefinedType(
                UndefinedType { type_name },
                type_name_position,
            ));
        };

        let source_type = { expr.get_info().type_id.borrow() }.clone();

        let type_id = match source_type {
            Some(source_type) => {
                let method_name = format!("to_{}", target_type.stdlib_name());

                match ctx
                    .scope
                    .resolve_property_for_type(source_type.clone(), &method_name)
                {
                    Some(Type::Function { return_value, .. }) => {
                        let callee = format!("{}.{method_name}", source_type.stdlib_name());
                        ctx.scope.record_resolved_callee(&position, callee);
                        Some(*return_value)
                    }
                    _ => {
                        return Err(TypeCheckError::UnsupportedOperation(
                            UnsupportedOperation {
                                callee: method_name,
                                on: source_type,
                            },
                            position,
                        ));
                    }
                }
            }
            // The operand's type is still being inferred (a same-pass forward
            // reference); defer and let validation surface it if it never
            // resolves.
            None => None,
        };

        Ok(Cast {
            expr: Box::new(expr),
            type_name,
            info: TypeInformation {
                type_id: Rc::new(RefCell::new(type_id)),
                context,
            },
            position,
        })
    }

    fn revert(this: &Self::Typed) -> Self {
        let Cast {
            expr,
            type_name,
            position,
            ..
        } = this;

        Cast {
            expr: Box::new(TypeCheckable::revert(expr.as_ref())),
            type_name: type_name.clone(),
            info: (),
            position: position.clone(),
        }
    }
}

impl TypedConstruct for Cast<TypeInformation> {
    type Validated = Cast<ValidatedTypeInformation>;

    fn validate(self) -> Result<Self::Validated, TypeValidationError> {
        let Cast {
            expr,
            type_name,
            info,
            position,
        } = self;

        Ok(Cast {
            expr: Box::new(expr.validate()?),
            type_name,
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
        parser::ast::{Cast, Expression, Num, TypeName},
        typechecker::{context::Context, error::TypeCheckError, types::Type, TypeCheckable},
    };

    #[test]
    fn test_int_to_float_cast_resolves_callee() -> Result<()> {
        let mut ctx = Context::default();
        crate::stdlib::install(&mut ctx.scope);

        let cast = Cast {
            expr: Box::new(Expression::Num(Num::Integer(42, (), Span::default()))),
            type_name: TypeName::Literal("float".into(), Span::default()),
            info: (),
            position: Span::default(),
        };

        let cast = cast.check(&mut ctx)?;

        assert_eq!(
            cast.info.type_id,
            Rc::new(RefCell::new(Some(Type::FloatingPoint)))
        );
        assert_eq!(
            cast.info.context.scope.get_resolved_callee(&Span::default()),
            Some("int.to_float".to_string())
        );

        Ok(())
    }

    #[test]
    fn test_unsupported_cast_errors() -> Result<()> {
        let mut ctx = Context::default();
        crate::stdlib::install(&mut ctx.scope);

        let cast = Cast {
            expr: Box::new(Expression::Num(Num::Integer(42, (), Span::default()))),
            type_name: TypeName::Literal("bool".into(), Span::default()),
            info: (),
            position: Span::default(),
        };

        let res = cast.check(&mut ctx);

        assert!(matches!(res, Err(TypeCheckError::UnsupportedOperation(_, _))));

        Ok(())
    }
}
