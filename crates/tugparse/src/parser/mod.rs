// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Recursive-descent parser.
//!
//! The grammar functions are split across submodules by grammar level:
//!
//! - `expression`: the operator-precedence ladder, atoms, trailers,
//!   containers and comprehensions;
//! - `statement`: simple and compound statements, suites and decorators;
//! - `parameters`: `def` and `lambda` parameter lists.
//!
//! Each grammar function looks at the current token, consumes what it
//! recognizes and returns a node whose span runs from its first consumed
//! token to its last. There is exactly one token of lookahead.

mod errors;
mod expression;
mod parameters;
mod statement;

pub use errors::{ParserError, Result};

use crate::nodes::{EvalInputNode, FuncTypeInputNode, ModuleNode};
use crate::options::ParseOptions;
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use tugparse_core::Span;

/// A parser over a single source buffer.
///
/// A parser is consumed by one of the `parse_*` methods; build a new one for
/// every parse.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    /// End offset of the most recently consumed token.
    last_end: u32,
}

impl<'a> Parser<'a> {
    /// Create a parser, scanning the first token.
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError::LexicalError`] if the first token is malformed.
    pub fn new(text: &'a str, options: &ParseOptions) -> Result<'a, Self> {
        Ok(Self {
            tokenizer: Tokenizer::new(text, options)?,
            last_end: 0,
        })
    }

    /// `file_input: (NEWLINE | stmt)* ENDMARKER`
    pub fn parse_module(mut self) -> Result<'a, ModuleNode<'a>> {
        let start = self.start();
        let mut statements = Vec::new();
        while !self.at(TokenKind::EndOfFile) {
            statements.push(self.parse_statement()?);
        }
        let end_of_file = self.bump()?;
        Ok(ModuleNode {
            span: self.span_from(start),
            statements,
            end_of_file,
        })
    }

    /// `eval_input: testlist NEWLINE* ENDMARKER`
    pub fn parse_eval_input(mut self) -> Result<'a, EvalInputNode<'a>> {
        let start = self.start();
        let body = self.parse_test_list()?;
        let newlines = self.parse_trailing_newlines()?;
        let end_of_file = self.expect(TokenKind::EndOfFile)?;
        Ok(EvalInputNode {
            span: self.span_from(start),
            body,
            newlines,
            end_of_file,
        })
    }

    /// `func_type_input: '(' [typelist] ')' '->' test NEWLINE* ENDMARKER`
    pub fn parse_func_type_input(mut self) -> Result<'a, FuncTypeInputNode<'a>> {
        let start = self.start();
        let open = self.expect(TokenKind::LeftParen)?;
        let argument_types = if self.at(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_type_list()?)
        };
        let close = self.expect(TokenKind::RightParen)?;
        let arrow = self.expect(TokenKind::Arrow)?;
        let returns = self.parse_test()?;
        let newlines = self.parse_trailing_newlines()?;
        let end_of_file = self.expect(TokenKind::EndOfFile)?;
        Ok(FuncTypeInputNode {
            span: self.span_from(start),
            open,
            argument_types,
            close,
            arrow,
            returns,
            newlines,
            end_of_file,
        })
    }

    fn parse_trailing_newlines(&mut self) -> Result<'a, Vec<Token<'a>>> {
        let mut newlines = Vec::new();
        while self.at(TokenKind::Newline) {
            newlines.push(self.bump()?);
        }
        Ok(newlines)
    }

    // ------------------------------------------------------------------------
    // Token helpers
    // ------------------------------------------------------------------------

    fn current(&self) -> &Token<'a> {
        self.tokenizer.current()
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Start offset of the current token, for the span of the node about to
    /// be parsed.
    fn start(&self) -> u32 {
        self.current().start()
    }

    /// Consume the current token unconditionally.
    fn bump(&mut self) -> Result<'a, Token<'a>> {
        let token = self.tokenizer.advance()?;
        self.last_end = token.end();
        Ok(token)
    }

    /// Consume the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> Result<'a, Option<Token<'a>>> {
        if self.at(kind) {
            self.bump().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consume a token of the given kind or fail with `Expected ...`.
    fn expect(&mut self, kind: TokenKind) -> Result<'a, Token<'a>> {
        if self.at(kind) {
            self.bump()
        } else {
            Err(self.error(format!(
                "Expected {}, found {}",
                kind,
                self.current().describe()
            )))
        }
    }

    /// A syntax error at the current token.
    fn error(&self, message: impl Into<String>) -> ParserError<'a> {
        ParserError::syntax(self.current(), message)
    }

    /// The span from `start` to the end of the last consumed token.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.last_end.max(start))
    }
}
