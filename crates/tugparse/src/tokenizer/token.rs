// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Token and trivia records produced by the [`Tokenizer`](super::Tokenizer).
//!
//! Every byte of the input belongs either to a token's own text or to the
//! trivia attached in front of it. Concatenating, in order, each token's
//! prefix trivia followed by the token text reproduces the source exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use tugparse_core::Span;

// ============================================================================
// Trivia
// ============================================================================

/// The kind of a skipped span of source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriviaKind {
    /// Spaces, tabs and form feeds.
    Whitespace,
    /// A `#` comment, up to but excluding the line break.
    Comment,
    /// A line break that does not end a logical line.
    Newline,
    /// A backslash immediately followed by a line break.
    LineContinuation,
}

/// A skipped span of source attached in front of the following token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia<'a> {
    pub kind: TriviaKind,
    pub span: Span,
    pub text: &'a str,
}

// ============================================================================
// Token kinds
// ============================================================================

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Structural markers
    Indent,
    Dedent,
    Newline,
    EndOfFile,

    // Payload-carrying literals
    Name,
    Number,
    String,
    TypeComment,

    // Keywords
    False,
    None,
    True,
    And,
    As,
    Assert,
    Async,
    Await,
    Break,
    Class,
    Continue,
    Def,
    Del,
    Elif,
    Else,
    Except,
    Finally,
    For,
    From,
    Global,
    If,
    Import,
    In,
    Is,
    Lambda,
    Nonlocal,
    Not,
    Or,
    Pass,
    Raise,
    Return,
    Try,
    While,
    With,
    Yield,

    // Operators
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    At,
    LeftShift,
    RightShift,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    ColonEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    NotEqual,
    LessGreater,
    Arrow,

    // Augmented assignment
    PlusEqual,
    MinusEqual,
    StarEqual,
    DoubleStarEqual,
    SlashEqual,
    DoubleSlashEqual,
    PercentEqual,
    AtEqual,
    LeftShiftEqual,
    RightShiftEqual,
    AmpersandEqual,
    PipeEqual,
    CaretEqual,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Colon,
    Semicolon,
    Dot,
    Ellipsis,
    Equal,
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("False", TokenKind::False),
    ("None", TokenKind::None),
    ("True", TokenKind::True),
    ("and", TokenKind::And),
    ("as", TokenKind::As),
    ("assert", TokenKind::Assert),
    ("async", TokenKind::Async),
    ("await", TokenKind::Await),
    ("break", TokenKind::Break),
    ("class", TokenKind::Class),
    ("continue", TokenKind::Continue),
    ("def", TokenKind::Def),
    ("del", TokenKind::Del),
    ("elif", TokenKind::Elif),
    ("else", TokenKind::Else),
    ("except", TokenKind::Except),
    ("finally", TokenKind::Finally),
    ("for", TokenKind::For),
    ("from", TokenKind::From),
    ("global", TokenKind::Global),
    ("if", TokenKind::If),
    ("import", TokenKind::Import),
    ("in", TokenKind::In),
    ("is", TokenKind::Is),
    ("lambda", TokenKind::Lambda),
    ("nonlocal", TokenKind::Nonlocal),
    ("not", TokenKind::Not),
    ("or", TokenKind::Or),
    ("pass", TokenKind::Pass),
    ("raise", TokenKind::Raise),
    ("return", TokenKind::Return),
    ("try", TokenKind::Try),
    ("while", TokenKind::While),
    ("with", TokenKind::With),
    ("yield", TokenKind::Yield),
];

impl TokenKind {
    /// Classify an identifier against the keyword table.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(text, _)| *text == ident)
            .map(|(_, kind)| *kind)
    }

    /// Returns whether this kind is a reserved word.
    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| *kind == self)
    }

    /// Returns whether this kind is a synthetic or line-structure marker.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::Indent | Self::Dedent | Self::Newline | Self::EndOfFile
        )
    }

    /// Returns whether this kind is an augmented assignment operator such as `+=`.
    pub fn is_augmented_assign(self) -> bool {
        matches!(
            self,
            Self::PlusEqual
                | Self::MinusEqual
                | Self::StarEqual
                | Self::DoubleStarEqual
                | Self::SlashEqual
                | Self::DoubleSlashEqual
                | Self::PercentEqual
                | Self::AtEqual
                | Self::LeftShiftEqual
                | Self::RightShiftEqual
                | Self::AmpersandEqual
                | Self::PipeEqual
                | Self::CaretEqual
        )
    }

    /// Returns whether a token of this kind can begin an expression.
    ///
    /// Comma-separated sequences use this to decide whether a comma is a
    /// trailing separator or is followed by another element.
    pub fn starts_expression(self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::Number
                | Self::String
                | Self::False
                | Self::None
                | Self::True
                | Self::Await
                | Self::Lambda
                | Self::Not
                | Self::Plus
                | Self::Minus
                | Self::Tilde
                | Self::Star
                | Self::DoubleStar
                | Self::LeftParen
                | Self::LeftBracket
                | Self::LeftBrace
                | Self::Ellipsis
        )
    }

    /// The fixed source text of this kind, for keywords, operators and
    /// delimiters. Payload and structural kinds return `None`.
    pub fn fixed_text(self) -> Option<&'static str> {
        if let Some((text, _)) = KEYWORDS.iter().find(|(_, kind)| *kind == self) {
            return Some(text);
        }
        let text = match self {
            Self::Indent
            | Self::Dedent
            | Self::Newline
            | Self::EndOfFile
            | Self::Name
            | Self::Number
            | Self::String
            | Self::TypeComment => return None,
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::DoubleStar => "**",
            Self::Slash => "/",
            Self::DoubleSlash => "//",
            Self::Percent => "%",
            Self::At => "@",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::Tilde => "~",
            Self::ColonEqual => ":=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::EqualEqual => "==",
            Self::NotEqual => "!=",
            Self::LessGreater => "<>",
            Self::Arrow => "->",
            Self::PlusEqual => "+=",
            Self::MinusEqual => "-=",
            Self::StarEqual => "*=",
            Self::DoubleStarEqual => "**=",
            Self::SlashEqual => "/=",
            Self::DoubleSlashEqual => "//=",
            Self::PercentEqual => "%=",
            Self::AtEqual => "@=",
            Self::LeftShiftEqual => "<<=",
            Self::RightShiftEqual => ">>=",
            Self::AmpersandEqual => "&=",
            Self::PipeEqual => "|=",
            Self::CaretEqual => "^=",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Ellipsis => "...",
            Self::Equal => "=",
            // Keywords are answered by the table above.
            _ => return None,
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    /// Human-readable description used in error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indent => write!(f, "indent"),
            Self::Dedent => write!(f, "dedent"),
            Self::Newline => write!(f, "newline"),
            Self::EndOfFile => write!(f, "end of file"),
            Self::Name => write!(f, "name"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::TypeComment => write!(f, "type comment"),
            other => match other.fixed_text() {
                Some(text) => write!(f, "'{}'", text),
                None => write!(f, "{:?}", other),
            },
        }
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// A lexical token.
///
/// `text` is the token's own source slice (empty for `Indent`, `Dedent` and
/// `EndOfFile`). `prefix` holds the trivia between the previous token and
/// this one, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub span: Span,
    pub prefix: Vec<Trivia<'a>>,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, span: Span, prefix: Vec<Trivia<'a>>, text: &'a str) -> Self {
        Self {
            kind,
            span,
            prefix,
            text,
        }
    }

    pub fn start(&self) -> u32 {
        self.span.start
    }

    pub fn end(&self) -> u32 {
        self.span.end
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The identifier text, for `Name` tokens.
    pub fn name(&self) -> Option<&'a str> {
        (self.kind == TokenKind::Name).then_some(self.text)
    }

    /// The raw literal text (including base prefix, separators and suffix),
    /// for `Number` tokens.
    pub fn number(&self) -> Option<&'a str> {
        (self.kind == TokenKind::Number).then_some(self.text)
    }

    /// The raw literal text (including prefix and quotes), for `String` tokens.
    pub fn string(&self) -> Option<&'a str> {
        (self.kind == TokenKind::String).then_some(self.text)
    }

    /// The text following `# type: `, for `TypeComment` tokens.
    pub fn type_comment(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::TypeComment => self.text.strip_prefix(TYPE_COMMENT_PREFIX),
            _ => None,
        }
    }

    /// Concatenated prefix trivia text followed by the token text.
    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        for trivia in &self.prefix {
            out.push_str(trivia.text);
        }
        out.push_str(self.text);
        out
    }

    /// A short description used in error messages, such as `'foo'` or
    /// `end of file`.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Indent
            | TokenKind::Dedent
            | TokenKind::Newline
            | TokenKind::EndOfFile => self.kind.to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

/// The literal prefix that turns a comment into a `TypeComment` token.
pub const TYPE_COMMENT_PREFIX: &str = "# type: ";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_round_trips() {
        for (text, kind) in KEYWORDS {
            assert_eq!(TokenKind::keyword(text), Some(*kind));
            assert!(kind.is_keyword());
            assert_eq!(kind.fixed_text(), Some(*text));
        }
        assert_eq!(TokenKind::keyword("print"), None);
        assert_eq!(TokenKind::keyword("false"), None);
    }

    #[test]
    fn display_describes_kinds() {
        assert_eq!(TokenKind::RightParen.to_string(), "')'");
        assert_eq!(TokenKind::EndOfFile.to_string(), "end of file");
        assert_eq!(TokenKind::Lambda.to_string(), "'lambda'");
    }

    #[test]
    fn payload_accessors() {
        let tok = Token::new(TokenKind::Name, Span::new(0, 3), vec![], "foo");
        assert_eq!(tok.name(), Some("foo"));
        assert_eq!(tok.number(), None);

        let comment = Token::new(
            TokenKind::TypeComment,
            Span::new(0, 11),
            vec![],
            "# type: int",
        );
        assert_eq!(comment.type_comment(), Some("int"));
    }

    #[test]
    fn full_text_includes_prefix() {
        let prefix = vec![Trivia {
            kind: TriviaKind::Whitespace,
            span: Span::new(0, 2),
            text: "  ",
        }];
        let tok = Token::new(TokenKind::Name, Span::new(2, 3), prefix, "x");
        assert_eq!(tok.full_text(), "  x");
    }
}
