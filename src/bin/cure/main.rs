//! # Cure
//!
//! This binary is the compiler of Cure. It combines parser, type checker, and code
//! generator into a single application, either emitting a native executable (`build`)
//! or JIT-executing the program in-process (`run`).

mod cli;

use cli::*;

use std::{fs, path::Path, process::Command};

use anyhow::{anyhow, bail, Context as _};
use clap::CommandFactory;
use inkwell::{
    context::Context,
    module::Module,
    targets::{InitializationConfig, Target as LlvmTarget},
    OptimizationLevel,
};
use log::{error, info};

use cure::codegen::{CodeGen, CodegenContext};
use cure::parser::ast::TopLevelStatement;
use cure::target::Target;
use cure::typechecker::TypeChecker;

fn main() {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let result = match args.command {
        Some(Commands::Build(ref build_args)) => build(build_args),
        Some(Commands::Run(ref run_args)) => run(run_args),
        Some(Commands::Help) | None => print_help(),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

fn print_help() -> anyhow::Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}

/// Parse, type-check and fully codegen the module at `file` into LLVM IR,
/// borrowing `context` for the lifetime of the returned module.
fn compile<'ctx>(context: &'ctx Context, file: &Path) -> anyhow::Result<Module<'ctx>> {
    let file =
        fs::canonicalize(file).with_context(|| format!("cannot find `{}`", file.display()))?;

    info!("compiling `{}`", file.display());

    let source =
        fs::read_to_string(&file).with_context(|| format!("cannot read `{}`", file.display()))?;

    let program = match cure::grammar::parse(&source) {
        Ok(program) => program,
        Err(e) => bail!("syntax error: {e:?}"),
    };

    let statements: Vec<TopLevelStatement<()>> = cure::parser::parse_program(program, &source);

    info!("parsed {} top-level statement(s)", statements.len());

    let checked = TypeChecker::new(statements)
        .check()
        .map_err(|e| anyhow!("{e}"))?;

    let validated = TypeChecker::validate(checked).map_err(|e| anyhow!("{e}"))?;

    info!("type-checked {} top-level statement(s)", validated.len());

    let module_name = file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("main");

    let ctx = CodegenContext::new(context, module_name);

    cure::stdlib::emit(&ctx);

    for statement in &validated {
        statement.register_function_declaration(&ctx);
    }

    for statement in &validated {
        statement.codegen(&ctx);
    }

    Ok(ctx.module)
}

fn build(args: &BuildArgs) -> anyhow::Result<()> {
    let context = Context::create();
    let module = compile(&context, &args.file)?;

    let ir_path = args.file.with_extension("ll");
    module
        .print_to_file(&ir_path)
        .map_err(|e| anyhow!("failed to write `{}`: {e}", ir_path.display()))?;

    let target = Target::current();
    let output = args.output.clone().unwrap_or_else(|| {
        let stem = args.file.with_extension("");
        if target.exe_ext().is_empty() {
            stem
        } else {
            stem.with_extension(target.exe_ext())
        }
    });

    let mut command = Command::new("clang");
    command.arg(&ir_path).arg("-o").arg(&output);
    if args.optimize {
        command.arg("-O2");
    }

    let status = command
        .status()
        .context("failed to invoke `clang` (is it on PATH?)")?;

    if !status.success() {
        bail!("clang exited with {status}");
    }

    info!("wrote executable to `{}`", output.display());

    Ok(())
}

fn run(args: &RunArgs) -> anyhow::Result<()> {
    let context = Context::create();
    let module = compile(&context, &args.file)?;

    LlvmTarget::initialize_native(&InitializationConfig::default())
        .map_err(|e| anyhow!("failed to initialize native target: {e}"))?;

    let optimization_level = if args.optimize {
        OptimizationLevel::Default
    } else {
        OptimizationLevel::None
    };

    let engine = module
        .create_jit_execution_engine(optimization_level)
        .map_err(|e| anyhow!("failed to create JIT engine: {e}"))?;

    let exit_code = unsafe {
        let main_fn = engine
            .get_function::<unsafe extern "C" fn() -> i32>("main")
            .map_err(|e| anyhow!("failed to resolve `main`: {e}"))?;
        main_fn.call()
    };

    std::process::exit(exit_code);
}
