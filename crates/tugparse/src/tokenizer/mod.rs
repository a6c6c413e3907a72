// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Lossless tokenization.
//!
//! The [`Tokenizer`] is pull-based: the parser asks for one token at a time
//! and the tokenizer keeps exactly one token of lookahead. [`tokenize`] drains
//! a tokenizer into a vector for callers that want the whole stream.

mod core;
mod cursor;
mod token;

#[cfg(test)]
mod tests;

pub use self::core::{Tokenizer, MAX_BRACKET_DEPTH};
pub use self::token::{Token, TokenKind, Trivia, TriviaKind, TYPE_COMMENT_PREFIX};

use crate::options::ParseOptions;
use crate::parser::Result;

/// Tokenize `text` into a vector ending with the `EndOfFile` token.
///
/// # Errors
///
/// Returns the first [`LexicalError`](crate::ParserError::LexicalError)
/// encountered.
pub fn tokenize<'a>(text: &'a str, options: &ParseOptions) -> Result<'a, Vec<Token<'a>>> {
    let mut tokenizer = Tokenizer::new(text, options)?;
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.advance()?;
        let done = token.is(TokenKind::EndOfFile);
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
