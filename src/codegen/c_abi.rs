//! C-ABI registry (C2).
//!
//! Owns a mapping from C runtime symbol name to a declared LLVM function or
//! global. Every declaration is materialised lazily, on first `get`/`global`,
//! and memoised for the remainder of the compile so repeated lookups never
//! emit duplicate `declare`s.

use std::{cell::RefCell, collections::HashMap};

use inkwell::{
    values::{FunctionValue, GlobalValue},
    AddressSpace,
};

use crate::{codegen::CodegenContext, target::Target};

pub struct CAbiRegistry<'ctx> {
    target: Target,
    functions: RefCell<HashMap<&'static str, FunctionValue<'ctx>>>,
    globals: RefCell<HashMap<&'static str, GlobalValue<'ctx>>>,
}

impl<'ctx> CAbiRegistry<'ctx> {
    pub fn new(target: Target) -> Self {
        CAbiRegistry {
            target,
            functions: RefCell::default(),
            globals: RefCell::default(),
        }
    }

    /// Resolve (declaring on first use) one of the required C-ABI signatures
    /// (§4.2). Panics for any name outside the fixed set below — the
    /// registry is closed, not an arbitrary extern-declaration facility.
    pub fn get(&self, ctx: &CodegenContext<'ctx>, name: &'static str) -> FunctionValue<'ctx> {
        if let Some(existing) = self.functions.borrow().get(name) {
            return *existing;
        }

        let context = ctx.context;
        let ptr = context.ptr_type(AddressSpace::default());
        let i8t = context.i8_type();
        let i32t = context.i32_type();
        let i64t = context.i64_type();
        let f32t = context.f32_type();
        let f64t = context.f64_type();

        let function = match name {
            "snprintf" => i32t.fn_type(&[ptr.into(), i64t.into(), ptr.into()], true),
            "puts" => i32t.fn_type(&[ptr.into()], false),
            "printf" => i32t.fn_type(&[ptr.into()], true),
            "exit" => context.void_type().fn_type(&[i32t.into()], false),
            "malloc" => ptr.fn_type(&[i64t.into()], false),
            "realloc" => ptr.fn_type(&[ptr.into(), i64t.into()], false),
            "free" => context.void_type().fn_type(&[ptr.into()], false),
            "memcpy" => ptr.fn_type(&[ptr.into(), ptr.into(), i64t.into()], false),
            // Redeclared returning i32 rather than i1 (§9: `memcmp` correction) -
            // the semantically meaningful result needs all 32 bits, not just
            // the low one, for callers comparing against zero.
            "memcmp" => i32t.fn_type(&[ptr.into(), ptr.into(), i64t.into()], false),
            "strlen" => i64t.fn_type(&[ptr.into()], false),
            "floorf" => f32t.fn_type(&[f32t.into()], false),
            "ceilf" => f32t.fn_type(&[f32t.into()], false),
            "powf" => f32t.fn_type(&[f32t.into(), f32t.into()], false),
            "sqrtf" => f32t.fn_type(&[f32t.into()], false),
            "strtol" => i64t.fn_type(&[ptr.into(), ptr.into(), i32t.into()], false),
            "strtod" => f64t.fn_type(&[ptr.into(), ptr.into()], false),
            "fgets" => ptr.fn_type(&[ptr.into(), i32t.into(), ptr.into()], false),
            "__acrt_iob_func" => ptr.fn_type(&[i32t.into()], false),
            other => panic!("unknown C-ABI function '{other}'"),
        };

        let _ = i8t;
        let value = ctx.module.add_function(name, function, None);
        self.functions.borrow_mut().insert(name, value);
        value
    }

    /// `fgets`' third parameter on Windows takes an `__acrt_iob_func`-produced
    /// `{byte*}`-shaped `FILE*`; on Linux the same `ptr` slot takes the
    /// dereferenced `stdin` global. Either way the declared signature above
    /// (`ptr`) is unchanged across targets.

    /// Resolve the platform `stdin` handle. On Linux this is the external
    /// global `stdin`; on Windows there is no such global, so callers must
    /// instead call `__acrt_iob_func(0)` (see `get`) to obtain the stream.
    pub fn stdin_global(&self, ctx: &CodegenContext<'ctx>) -> GlobalValue<'ctx> {
        assert_eq!(
            self.target,
            Target::Linux,
            "stdin_global is only defined on Linux; use __acrt_iob_func(0) on Windows"
        );

        if let Some(existing) = self.globals.borrow().get("stdin") {
            return *existing;
        }

        let ptr_type = ctx.context.ptr_type(AddressSpace::default());
        let global = ctx.module.add_global(ptr_type, None, "stdin");
        global.set_linkage(inkwell::module::Linkage::External);
        self.globals.borrow_mut().insert("stdin", global);
        global
    }

    pub fn target(&self) -> Target {
        self.target
    }
}
