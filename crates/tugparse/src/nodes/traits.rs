// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Core traits for syntax tree nodes.

use crate::tokenizer::Token;
use tugparse_core::Span;

/// A node or token with a byte range in the source.
///
/// A node's span runs from the start of its first token to the end of its
/// last token. The prefix trivia of the first token lies outside the span.
pub trait Spanned {
    fn span(&self) -> Span;

    fn start(&self) -> u32 {
        self.span().start
    }

    fn end(&self) -> u32 {
        self.span().end
    }

    /// The node's own source text, without leading trivia.
    fn source_text<'s>(&self, source: &'s str) -> Option<&'s str> {
        self.span().slice(source)
    }
}

impl Spanned for Token<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

impl<T: Spanned> Spanned for Box<T> {
    fn span(&self) -> Span {
        (**self).span()
    }
}
