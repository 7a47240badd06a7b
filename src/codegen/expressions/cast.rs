//! Cast expression code generation (§4.7.5): mirrors `binary.rs` - the
//! analyser (§4.6) has already rewritten `obj as T` into a resolved callee
//! name keyed by this node's span in `Scope::resolved_callees`. Code
//! generation only looks that callee back up and emits a call against it.

use inkwell::values::BasicValueEnum;

use crate::{
    codegen::{CodeGen, CodegenContext},
    parser::ast::Cast,
    typechecker::ValidatedTypeInformation,
};

impl<'ctx> CodeGen<'ctx> for Cast<ValidatedTypeInformation> {
    type ReturnValue = BasicValueEnum<'ctx>;

    fn codegen(&self, ctx: &CodegenContext<'ctx>) -> Self::ReturnValue {
        let Cast {
            expr,
            info: ValidatedTypeInformation { context, type_id },
            position,
            ..
        } = self;

        let Some(expr_value) = expr.codegen(ctx) else {
            unreachable!()
        };

        let callee = context.scope.get_resolved_callee(position).unwrap_or_else(|| {
            panic!("cast expression at {position:?} has no resolved callee recorded by the analyser")
        });
        let function = ctx.module.get_function(&callee).unwrap_or_else(|| {
            panic!("resolved callee '{callee}' was never emitted by the standard-library kernel")
        });

        let result = ctx
            .builder
            .build_call(function, &[expr_value.into()], "")
            .unwrap()
            .try_as_basic_value()
            .left()
            .expect("cast conversion callees always return a value");

        ctx.track_managed_value(type_id, result)
    }
}
