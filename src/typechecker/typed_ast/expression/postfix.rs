//! Postfix expressions (§4.6): calls, indexing, property access.
//!
//! `Postfix::Call` carries two shapes the spec's `Attribute`/`Call` nodes
//! separate and this grammar doesn't: a plain call `foo(args)` (expr is
//! anything but a property access) and a method/attribute call
//! `obj.method(args)` (expr is itself `Postfix::PropertyAccess`). The latter
//! is where the §4.6 Attribute rewrite applies: `callee = f"{obj.type}.{attr}"`,
//! resolved via the same overload machinery a stdlib or user `Class` method is
//! registered under, with the resolved callee recorded for the code generator
//! to pick back up (§4.7.5) - mirroring the `BinaryOp` rewrite in `binary.rs`.
//! Whether the generated call also passes `obj` as the first argument (a
//! non-static method does, a static one like `Math.floor` doesn't) is a
//! codegen-time decision; this pass only resolves *which* function is called.

use std::{cell::RefCell, rc::Rc};

use crate::typechecker::{TypeValidationError, ValidatedTypeInformation};
use crate::{
    parser::ast::{Expression, Id, Postfix},
    typechecker::{
        context::Context,
        error::{TypeCheckError, TypeMismatch, UndefinedVariable},
        types::Type,
        TypeCheckable, TypeInformation, TypeResult, TypedConstruct,
    },
};

impl TypeCheckable for Postfix<()> {
    type Typed = Postfix<TypeInformation>;

    fn check(self, ctx: &mut Context) -> TypeResult<Self::Typed> {
        let context = ctx.clone();
        match self {
            Postfix::Call {
                expr,
                args,
                position,
                ..
            } => {
                let mut checked_args = vec![];
                for arg in args.into_iter() {
                    checked_args.push(arg.check(ctx)?);
                }

                let arg_types = checked_args
                    .iter()
                    .map(|a| {
                        { a.get_info().type_id.borrow() }
                            .clone()
                            .unwrap_or(Type::Unknown)
                    })
                    .collect::<Vec<_>>();

                if let Expression::Postfix(Postfix::PropertyAccess {
                    expr: obj,
                    property,
                    position: access_position,
                    ..
                }) = *expr
                {
                    let obj = obj.check(ctx)?;
                    let obj_type = { obj.get_info().type_id.borrow() }.clone();

                    let Id {
                        name: method_name,
                        position: method_position,
                        ..
                    } = property;

                    let type_id = match obj_type {
                        Some(obj_type) => {
                            match ctx
                                .scope
                                .resolve_overload(obj_type.clone(), &method_name, &arg_types)
                            {
                                Some(Type::Function { return_value, .. }) => {
                                    let callee = format!("{}.{method_name}", obj_type.stdlib_name());
                                    ctx.scope.record_resolved_callee(&position, callee);
                                    Some(*return_value)
                                }
                                _ => {
                                    return Err(TypeCheckError::UndefinedVariable(
                                        UndefinedVariable {
                                            variable_name: method_name,
                                        },
                                        method_position,
                                    ));
                                }
                            }
                        }
                        None => None,
                    };

                    let property = Id {
                        name: method_name,
                        position: method_position,
                        info: TypeInformation {
                            type_id: Rc::new(RefCell::new(type_id.clone())),
                            context: context.clone(),
                        },
                    };

                    let access_expr = Box::new(Expression::Postfix(Postfix::PropertyAccess {
                        expr: Box::new(obj),
                        property,
                        info: TypeInformation {
                            type_id: Rc::new(RefCell::new(type_id.clone())),
                            context: context.clone(),
                        },
                        position: access_position,
                    }));

                    return Ok(Postfix::Call {
                        expr: access_expr,
                        args: checked_args,
                        info: TypeInformation {
                            type_id: Rc::new(RefCell::new(type_id)),
                            context,
                        },
                        position,
                    });
                }

                let expr = expr.check(ctx)?;
                let expr_type_id = { expr.get_info().type_id.borrow() }.clone();

                let expected_type = Type::Function {
                    params: arg_types.clone(),
                    return_value: Box::new(Type::Unknown),
                };

                let resolve_via_toplevel_overload = |ctx: &Context, name: &str| {
                    ctx.scope.resolve_toplevel_overload(name, &arg_types)
                };

                let type_id = match &expr_type_id {
                    Some(Type::Function {
                        params,
                        return_value,
                    }) => {
                        let mismatched_arity_or_types = params.len() != checked_args.len()
                            || params
                                .iter()
                                .zip(arg_types.iter())
                                .any(|(expected, actual)| {
                                    *actual != Type::Unknown && actual != expected
                                });

                        // The primary signature doesn't accept this call - a
                        // top-level overload (e.g. `input(prompt)` alongside
                        // `input()`) may still apply.
                        if mismatched_arity_or_types {
                            let overload = if let Expression::Id(id_expr) = &expr {
                                resolve_via_toplevel_overload(ctx, &id_expr.name)
                            } else {
                                None
                            };

                            match overload {
                                Some(Type::Function { return_value, .. }) => {
                                    if let Expression::Id(id_expr) = &expr {
                                        ctx.scope
                                            .record_resolved_callee(&position, id_expr.name.clone());
                                    }
                                    Rc::new(RefCell::new(Some(*return_value)))
                                }
                                _ if params.len() != checked_args.len() => {
                                    return Err(TypeCheckError::TypeMismatch(
                                        TypeMismatch {
                                            expected: expected_type,
                                            actual: Type::Function {
                                                params: params.clone(),
                                                return_value: return_value.clone(),
                                            },
                                        },
                                        position,
                                    ));
                                }
                                _ => {
                                    for (i, arg) in checked_args.iter_mut().enumerate() {
                                        let expected = params[i].clone();
                                        let actual = arg_types[i].clone();

                                        if actual != expected {
                                            if actual == Type::Unknown {
                                                arg.update_type(expected)?;
                                            } else {
                                                return Err(TypeCheckError::TypeMismatch(
                                                    TypeMismatch { expected, actual },
                                                    arg.position(),
                                                ));
                                            }
                                        }
                                    }
                                    Rc::new(RefCell::new(Some(return_value.as_ref().clone())))
                                }
                            }
                        } else {
                            for (i, arg) in checked_args.iter_mut().enumerate() {
                                let expected = params[i].clone();
                                let actual = arg_types[i].clone();
                                if actual == Type::Unknown {
                                    arg.update_type(expected)?;
                                }
                            }

                            if let Expression::Id(id_expr) = &expr {
                                ctx.scope
                                    .record_resolved_callee(&position, id_expr.name.clone());
                            }

                            Rc::new(RefCell::new(Some(return_value.as_ref().clone())))
                        }
                    }
                    Some(t) => {
                        return Err(TypeCheckError::TypeMismatch(
                            TypeMismatch {
                                expected: expected_type,
                                actual: t.clone(),
                            },
                            position,
                        ));
                    }
                    _ => Rc::new(RefCell::new(None)),
                };

                Ok(Postfix::Call {
                    expr: Box::new(expr),
                    args: checked_args,
                    info: TypeInformation { type_id, context },
                    position,
                })
            }
            Postfix::Index {
                expr,
                index,
                position,
                ..
            } => {
                let expr = expr.check(ctx)?;
                let index = index.check(ctx)?;

                let expr_type = { expr.get_info().type_id.borrow() }.clone();
                let index_type = { index.get_info().type_id.borrow() }.clone();

                // check, if expr is callable and if index is an integer
                let type_id = match (expr_type, index_type) {
                    // all good
                    (Some(Type::Array(inner)), Some(Type::Integer)) => {
                        Rc::new(RefCell::new(Some(*inner)))
                    }
                    // Nope - not callable
                    (Some(expr_type), Some(Type::Integer)) => {
                        return Err(TypeCheckError::TypeMismatch(
                            TypeMismatch {
                                expected: Type::Array(Box::new(Type::Unknown)),
                                actual: expr_type,
                            },
                            expr.position(),
                        ));
                    }
                    // Not index with an integer
                    (Some(_), Some(index_type)) => {
                        return Err(TypeCheckError::TypeMismatch(
                            TypeMismatch {
                                expected: Type::Integer,
                                actual: index_type,
                            },
                            index.position(),
                        ));
                    }
                    // We somehow have no valuable information about this
                    _ => Rc::new(RefCell::new(None)),
                };

                Ok(Postfix::Index {
                    expr: Box::new(expr),
                    index: Box::new(index),
                    info: TypeInformation { type_id, context },
                    position,
                })
            }
            Postfix::PropertyAccess {
                expr,
                property,
                position,
                ..
            } => {
                let expr = expr.check(ctx)?;

                let Id {
                    name: property_name,
                    position: property_position,
                    ..
                } = property;

                let expr_type = { expr.get_info().type_id.borrow() }.clone();

                // Struct fields take priority over methods/attributes. A bare
                // (call-less) access on anything else that resolves to a
                // zero-argument method - e.g. `s.length` - is the standalone
                // counterpart of the `Call`-wrapped rewrite above: it records
                // its own resolved callee so the generator can emit the call
                // directly, the same way `string.length` resolves for
                // `s.length()`.
                let type_id = match expr_type {
                    Some(type_id) => {
                        let struct_field = if let Type::Struct(_, props) = &type_id {
                            props
                                .iter()
                                .find(|(name, _)| *name == property_name)
                                .map(|(_, prop)| prop.clone())
                        } else {
                            None
                        };

                        match struct_field {
                            Some(field_type) => Some(field_type),
                            None => match ctx.scope.resolve_overload(
                                type_id.clone(),
                                &property_name,
                                &[],
                            ) {
                                Some(Type::Function {
                                    params,
                                    return_value,
                                }) if params.is_empty() => {
                                    let callee =
                                        format!("{}.{property_name}", type_id.stdlib_name());
                                    ctx.scope.record_resolved_callee(&position, callee);
                                    Some(*return_value)
                                }
                                _ => {
                                    return Err(TypeCheckError::UndefinedVariable(
                                        UndefinedVariable {
                                            variable_name: property_name.clone(),
                                        },
                                        property_position,
                                    ));
                                }
                            },
                        }
                    }
                    None => None,
                };

                let type_id = Rc::new(RefCell::new(type_id));

                Ok(Postfix::PropertyAccess {
                    expr: Box::new(expr),
                    property: Id {
                        name: property_name,
                        position: property_position,
                        info: TypeInformation {
                            type_id: type_id.clone(),
                            context: context.clone(),
                        },
                    },
                    info: TypeInformation { type_id, context },
                    position,
                })
            }
        }
    }

    fn revert(this: &Self::Typed) -> Self {
        match this {
            Postfix::Call {
                expr,
                args,
                position,
                ..
            } => Postfix::Call {
                expr: Box::new(TypeCheckable::revert(expr.as_ref())),
                args: args.iter().map(TypeCheckable::revert).collect(),
                info: (),
                position: position.clone(),
            },
            Postfix::Index {
                expr,
                index,
                position,
                ..
            } => Postfix::Index {
                expr: Box::new(TypeCheckable::revert(expr.as_ref())),
                index: Box::new(TypeCheckable::revert(index.as_ref())),
                info: (),
                position: position.clone(),
            },
            Postfix::PropertyAccess {
                expr,
                property,
                position,
                ..
            } => Postfix::PropertyAccess {
                expr: Box::new(TypeCheckable::revert(expr.as_ref())),
                property: TypeCheckable::revert(property),
                info: (),
                position: position.clone(),
            },
        }
    }
}

impl TypedConstruct for Postfix<TypeInformation> {
    type Validated = Postfix<ValidatedTypeInformation>;

    fn validate(self) -> Result<Self::Validated, TypeValidationError> {
        match self {
            Postfix::Call {
                expr,
                args,
                info,
                position,
            } => {
                let mut validated_args = vec![];
                for arg in args {
                    validated_args.push(arg.validate()?);
                }

                Ok(Postfix::Call {
                    expr: Box::new(expr.validate()?),
                    args: validated_args,
                    info: info.validate(&position)?,
                    position,
                })
            }
            Postfix::Index {
                expr,
                index,
                info,
                position,
            } => Ok(Postfix::Index {
                expr: Box::new(expr.validate()?),
                index: Box::new(index.validate()?),
                info: info.validate(&position)?,
                position,
            }),
            Postfix::PropertyAccess {
                expr,
                property,
                info,
                position,
            } => Ok(Postfix::PropertyAccess {
                expr: Box::new(expr.validate()?),
                property: property.validate()?,
                info: info.validate(&position)?,
                position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use anyhow::Result;

    use crate::{
        lexer::Span,
        parser::ast::{Expression, Id, Num, Postfix},
        typechecker::{
            context::Context,
            error::{TypeCheckError, TypeMismatch, UndefinedVariable},
            types::Type,
            TypeCheckable,
        },
    };

    #[test]
    fn test_simple_call() -> Result<()> {
        let mut ctx = Context::default();

        ctx.scope.add_constant(
            "foo",
            Type::Function {
                params: vec![],
                return_value: Box::new(Type::Integer),
            },
        )?;

        let call = Postfix::Call {
            expr: Box::new(Expression::Id(Id {
                name: "foo".into(),
                info: (),
                position: Span::default(),
            })),
            args: vec![],
            info: (),
            position: Span::default(),
        };

        let call = call.check(&mut ctx)?;

        assert_eq!(
            call.get_info().type_id,
            Rc::new(RefCell::new(Some(Type::Integer)))
        );

        Ok(())
    }

    #[test]
    fn test_complex_call() -> Result<()> {
        let mut ctx = Context::default();

        ctx.scope.add_constant(
            "foo",
            Type::Function {
                params: vec![Type::FloatingPoint, Type::Integer],
                return_value: Box::new(Type::Integer),
            },
        )?;

        ctx.scope.add_constant("bar", Type::FloatingPoint)?;

        let call = Postfix::Call {
            expr: Box::new(Expression::Id(Id {
                name: "foo".into(),
                info: (),
                position: Span::default(),
            })),
            args: vec![
                Expression::Id(Id {
                    name: "bar".into(),
                    position: Span::default(),
                    info: (),
                }),
                Expression::Num(Num::Integer(42, (), Span::default())),
            ],
            info: (),
            position: Span::default(),
        };

        let call = call.check(&mut ctx)?;

        assert_eq!(
            call.get_info().type_id,
            Rc::new(RefCell::new(Some(Type::Integer)))
        );

        Ok(())
    }

    #[test]
    fn test_call_mismatch() -> Result<()> {
        let mut ctx = Context::default();

        ctx.scope.add_constant(
            "foo",
            Type::Function {
                params: vec![Type::Integer, Type::FloatingPoint],
                return_value: Box::new(Type::Integer),
            },
        )?;

        ctx.scope.add_constant("bar", Type::FloatingPoint)?;

        let call = Postfix::Call {
            expr: Box::new(Expression::Id(Id {
                name: "foo".into(),
                info: (),
                position: Span::default(),
            })),
            args: vec![
                Expression::Id(Id {
                    name: "bar".into(),
                    position: Span::default(),
                    info: (),
                }),
                Expression::Num(Num::Integer(42, (), Span::default())),
            ],
            info: (),
            position: Span::default(),
        };

        let result = call.check(&mut ctx);

        assert_eq!(
            result,
            Err(TypeCheckError::TypeMismatch(
                TypeMismatch {
                    expected: Type::Integer,
                    actual: Type::FloatingPoint
                },
                Span::default()
            ))
        );

        Ok(())
    }

    #[test]
    fn test_input_overload_resolves_to_single_arg_form() -> Result<()> {
        let mut ctx = Context::default();

        ctx.scope.add_constant(
            "input",
            Type::Function {
                params: vec![],
                return_value: Box::new(Type::String),
            },
        )?;
        ctx.scope.add_toplevel_overload(
            "input",
            Type::Function {
                params: vec![Type::String],
                return_value: Box::new(Type::String),
            },
        );

        ctx.scope.add_constant("prompt", Type::String)?;

        let call = Postfix::Call {
            expr: Box::new(Expression::Id(Id {
                name: "input".into(),
                info: (),
                position: Span::default(),
            })),
            args: vec![Expression::Id(Id {
                name: "prompt".into(),
                info: (),
                position: Span::default(),
            })],
            info: (),
            position: Span::default(),
        };

        let call = call.check(&mut ctx)?;

        assert_eq!(
            call.get_info().type_id,
            Rc::new(RefCell::new(Some(Type::String)))
        );

        Ok(())
    }

    #[test]
    fn test_simple_index() -> Result<()> {
        let mut ctx = Context::default();

        ctx.scope
            .add_constant("foo", Type::Array(Box::new(Type::Integer)))?;

        let index = Postfix::Index {
            expr: Box::new(Expression::Id(Id {
                name: "foo".into(),
                position: Span::default(),
                info: (),
            })),
            index: Box::new(Expression::Num(Num::Integer(10, (), Span::default()))),
            info: (),
            position: Span::default(),
        };

        let index = index.check(&mut ctx)?;

        assert_eq!(
            index.get_info().type_id,
            Rc::new(RefCell::new(Some(Type::Integer)))
        );

        Ok(())
    }

    #[test]
    fn test_call_type_mismatch() -> Result<()> {
        let mut ctx = Context::default();

        ctx.scope
            .add_constant("foo", Type::Array(Box::new(Type::Integer)))?;

        ctx.scope
            .add_constant("bar", Type::Array(Box::new(Type::FloatingPoint)))?;

        let index = Postfix::Index {
            expr: Box::new(Expression::Id(Id {
                name: "foo".into(),
                position: Span::default(),
                info: (),
            })),
            index: Box::new(Expression::Id(Id {
                name: "bar".into(),
                position: Span::default(),
                info: (),
            })),
            info: (),
            position: Span::default(),
        };

        let res = index.check(&mut ctx);

        assert_eq!(
            res,
            Err(TypeCheckError::TypeMismatch(
                TypeMismatch {
                    expected: Type::Integer,
                    actual: Type::Array(Box::new(Type::FloatingPoint))
                },
                Span::default()
            ))
        );

        Ok(())
    }

    #[test]
    fn test_simple_property_access() -> Result<()> {
        let mut ctx = Context::default();

        ctx.scope.add_constant(
            "foo",
            Type::Struct("Foo".into(), vec![("bar".into(), Type::Integer)]),
        )?;

        let access = Postfix::PropertyAccess {
            expr: Box::new(Expression::Id(Id {
                name: "foo".into(),
                position: Span::default(),
                info: (),
            })),
            property: Id {
                name: "bar".into(),
                position: Span::default(),
                info: (),
            },
            info: (),
            position: Span::default(),
        };

        let access = access.check(&mut ctx)?;

        assert_eq!(
            access.get_info().type_id,
            Rc::new(RefCell::new(Some(Type::Integer)))
        );

        Ok(())
    }

    #[test]
    fn test_complex_property_access() -> Result<()> {
        let mut ctx = Context::default();

        ctx.scope.add_constant(
            "foo",
            Type::Struct(
                "Foo".into(),
                vec![(
                    "bar".into(),
                    Type::Struct("Bar".into(), vec![("baz".into(), Type::FloatingPoint)]),
                )],
            ),
        )?;

        let access = Postfix::PropertyAccess {
            expr: Box::new(Expression::Postfix(Postfix::PropertyAccess {
                expr: Box::new(Expression::Id(Id {
                    name: "foo".into(),
                    position: Span::default(),
                    info: (),
                })),
                property: Id {
                    name: "bar".into(),
                    position: Span::default(),
                    info: (),
                },
                info: (),
                position: Span::default(),
            })),
            property: Id {
                name: "baz".into(),
                position: Span::default(),
                info: (),
            },
            info: (),
            position: Span::default(),
        };

        let access = access.check(&mut ctx)?;

        assert_eq!(
            access.get_info().type_id,
            Rc::new(RefCell::new(Some(Type::FloatingPoint)))
        );

        Ok(())
    }

    #[test]
    fn test_missing_property_access() -> Result<()> {
        let mut ctx = Context::default();

        ctx.scope.add_constant(
            "foo",
            Type::Struct("Foo".into(), vec![("bar".into(), Type::Integer)]),
        )?;

        let access = Postfix::PropertyAccess {
            expr: Box::new(Expression::Id(Id {
                name: "foo".into(),
                position: Span::default(),
                info: (),
            })),
            property: Id {
                name: "baz".into(),
                position: Span::default(),
                info: (),
            },
            info: (),
            position: Span::default(),
        };

        let res = access.check(&mut ctx);

        assert_eq!(
            res,
            Err(TypeCheckError::UndefinedVariable(
                UndefinedVariable {
                    variable_name: "baz".into(),
                },
                Span::default()
            ))
        );

        Ok(())
    }

    #[test]
    fn test_method_call_resolves_stdlib_callee() -> Result<()> {
        let mut ctx = Context::default();
        crate::stdlib::install(&mut ctx.scope);

        ctx.scope.add_constant("foo", Type::Integer)?;

        let call = Postfix::Call {
            expr: Box::new(Expression::Postfix(Postfix::PropertyAccess {
                expr: Box::new(Expression::Id(Id {
                    name: "foo".into(),
                    position: Span::default(),
                    info: (),
                })),
                property: Id {
                    name: "to_string".into(),
                    position: Span::default(),
                    info: (),
                },
                info: (),
                position: Span::default(),
            })),
            args: vec![],
            info: (),
            position: Span::default(),
        };

        let call = call.check(&mut ctx)?;

        assert_eq!(
            call.get_info().type_id,
            Rc::new(RefCell::new(Some(Type::String)))
        );
        assert_eq!(
            call.get_info()
                .context
                .scope
                .get_resolved_callee(&Span::default()),
            Some("int.to_string".to_string())
        );

        Ok(())
    }
}
