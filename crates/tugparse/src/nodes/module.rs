// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Root nodes returned by the parser entry points.

use super::expression::ExpressionNode;
use super::statement::StatementNode;
use super::traits::Spanned;
use crate::tokenizer::Token;
use tugparse_core::Span;

/// A whole source file: statements followed by `EndOfFile`.
///
/// The `EndOfFile` token owns any trailing trivia, so the module's tokens
/// cover every byte of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode<'a> {
    pub span: Span,
    pub statements: Vec<StatementNode<'a>>,
    pub end_of_file: Token<'a>,
}

/// A single expression list, as accepted by `eval`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalInputNode<'a> {
    pub span: Span,
    pub body: ExpressionNode<'a>,
    pub newlines: Vec<Token<'a>>,
    pub end_of_file: Token<'a>,
}

/// A function type signature: `(argument types) -> return type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncTypeInputNode<'a> {
    pub span: Span,
    pub open: Token<'a>,
    /// A `TypeList` or single type, absent for `()`.
    pub argument_types: Option<ExpressionNode<'a>>,
    pub close: Token<'a>,
    pub arrow: Token<'a>,
    pub returns: ExpressionNode<'a>,
    pub newlines: Vec<Token<'a>>,
    pub end_of_file: Token<'a>,
}

impl Spanned for ModuleNode<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for EvalInputNode<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for FuncTypeInputNode<'_> {
    fn span(&self) -> Span {
        self.span
    }
}
