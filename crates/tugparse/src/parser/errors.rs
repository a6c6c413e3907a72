// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::tokenizer::Token;
use thiserror::Error;

/// The two disjoint failure kinds of a parse.
///
/// Both carry the byte offset that triggered them. Parsing is fail-fast: the
/// first error of either kind aborts the whole parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParserError<'a> {
    /// Malformed literal, illegal character, unterminated string, bad line
    /// continuation, inconsistent indentation or mismatched bracket.
    #[error("lexical error at offset {offset}: {message}")]
    LexicalError { offset: u32, message: String },
    /// An expected token or structure is absent.
    #[error("syntax error at offset {offset}: {message}")]
    SyntaxError {
        offset: u32,
        message: String,
        token: Box<Token<'a>>,
    },
}

impl<'a> ParserError<'a> {
    pub fn lexical(offset: u32, message: impl Into<String>) -> Self {
        Self::LexicalError {
            offset,
            message: message.into(),
        }
    }

    pub fn syntax(token: &Token<'a>, message: impl Into<String>) -> Self {
        Self::SyntaxError {
            offset: token.start(),
            message: message.into(),
            token: Box::new(token.clone()),
        }
    }

    /// The byte offset where the error was detected.
    pub fn offset(&self) -> u32 {
        match self {
            Self::LexicalError { offset, .. } | Self::SyntaxError { offset, .. } => *offset,
        }
    }

    /// The human-readable message without the offset prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::LexicalError { message, .. } | Self::SyntaxError { message, .. } => message,
        }
    }

    /// The offending token, for syntax errors.
    pub fn token(&self) -> Option<&Token<'a>> {
        match self {
            Self::LexicalError { .. } => None,
            Self::SyntaxError { token, .. } => Some(token),
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::LexicalError { .. })
    }
}

pub type Result<'a, T> = std::result::Result<T, ParserError<'a>>;
