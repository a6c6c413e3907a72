//! Core infrastructure for tugparse.
//!
//! This crate provides the language-agnostic pieces shared by the tokenizer,
//! the syntax tree and error reporting:
//! - Byte spans (`[start, end)` offsets into UTF-8 source)
//! - Text utilities for byte offset and line:column conversions

pub mod span;
pub mod text;

pub use span::Span;
