//! Binary expression code generation (§4.7.5): the analyser (§4.6) never
//! leaves a bare operator on this node by the time it reaches here - it has
//! already rewritten `lhs op rhs` into a resolved callee name, keyed by this
//! node's span in `Scope::resolved_callees`. Code generation's only job is
//! to look that callee back up and emit a call against it, exactly like any
//! other `Call` postfix, so that `int.div_int`'s zero-divisor guard,
//! `string.add_string`'s concatenation and `string.cmp_string`'s `memcmp`
//! comparison all run for `/` and `+`/`==` the same way a direct call would.

use inkwell::values::BasicValueEnum;

use crate::{
    codegen::{CodeGen, CodegenContext},
    parser::ast::BinaryExpression,
    typechecker::ValidatedTypeInformation,
};

impl<'ctx> CodeGen<'ctx> for BinaryExpression<ValidatedTypeInformation> {
    type ReturnValue = BasicValueEnum<'ctx>;

    fn codegen(&self, ctx: &CodegenContext<'ctx>) -> Self::ReturnValue {
        let BinaryExpression {
            left,
            right,
            info: ValidatedTypeInformation { context, type_id },
            position,
            ..
        } = self;

        let Some(left_value) = left.codegen(ctx) else {
            unreachable!()
        };
        let Some(right_value) = right.codegen(ctx) else {
            unreachable!()
        };

        let callee = context.scope.get_resolved_callee(position).unwrap_or_else(|| {
            panic!("binary expression at {position:?} has no resolved callee recorded by the analyser")
        });
        let function = ctx.module.get_function(&callee).unwrap_or_else(|| {
            panic!("resolved callee '{callee}' was never emitted by the standard-library kernel")
        });

        let result = ctx
            .builder
            .build_call(function, &[left_value.into(), right_value.into()], "")
            .unwrap()
            .try_as_basic_value()
            .left()
            .expect("binary operator callees always return a value");

        ctx.track_managed_value(type_id, result)
    }
}
