//! Source position tracking.
//!
//! `rust-sitter` handles tokenization itself; this module only keeps the
//! line/column [`Span`] type used throughout the parser, type checker and
//! codegen for error reporting, converted from `rust-sitter`'s byte-offset
//! spans via [`Span::new`].

mod token;

pub use token::Span;
