//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for Cure.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Struct containing the CLI configuration for Cure.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Specify the log level of the compiler.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of Cure.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// A log level, where also warnings are logged.
    #[value(alias("1"))]
    Warn,

    /// Also log information about the general state of the compiler, e.g., which files are
    /// compiled, etc.
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally in the compiler.
    #[value(alias("3"))]
    Debug,

    /// Log extra information, such as the generated LLVM IR.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a Cure executable from a source file.
    Build(BuildArgs),

    /// Build and immediately JIT-execute a Cure source file.
    Run(RunArgs),

    /// Print this help message.
    Help,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// The path to the Cure source file.
    #[arg(index = 1)]
    pub file: std::path::PathBuf,

    /// Whether to let LLVM optimize the generated module before emitting it.
    #[arg(long)]
    pub optimize: bool,

    /// The path to the output binary. Defaults to the input file name without
    /// its extension (plus the host's executable suffix).
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// The path to the Cure source file.
    #[arg(index = 1)]
    pub file: std::path::PathBuf,

    /// Whether to let LLVM optimize the generated module before running it.
    #[arg(long)]
    pub optimize: bool,
}
