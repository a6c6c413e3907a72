// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The indentation- and bracket-sensitive scanner.
//!
//! The tokenizer owns three pieces of lexical state:
//!
//! - a **bracket stack** of open `(`, `[` and `{` delimiters; while it is
//!   non-empty, line breaks are trivia (implicit line joining);
//! - an **indent stack** of column widths, starting at `[0]`, compared
//!   against the leading whitespace of each logical line to schedule
//!   synthetic `Indent` and `Dedent` tokens;
//! - the **current token**, replaced on every call to
//!   [`advance`](Tokenizer::advance).
//!
//! Scanning is an explicit loop with two states. At the start of a logical
//! line the scanner measures indentation and folds blank or comment-only
//! lines into trivia; afterwards it accumulates whitespace, comments and
//! line continuations as trivia until a real token is ready.

use super::cursor::Cursor;
use super::token::{Token, TokenKind, Trivia, TriviaKind, TYPE_COMMENT_PREFIX};
use crate::options::ParseOptions;
use crate::parser::{ParserError, Result};
use memchr::memchr2;
use tracing::trace;
use tugparse_core::Span;

/// Deepest bracket nesting accepted before a lexical error.
pub const MAX_BRACKET_DEPTH: usize = 200;

/// Produces one [`Token`] per call to [`advance`](Self::advance).
///
/// A tokenizer belongs to exactly one parse job; it is created from the
/// source buffer and dropped when the parse completes.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    tab_size: u32,
    indent_stack: Vec<u32>,
    brackets: Vec<(char, u32)>,
    pending_indent: bool,
    pending_dedents: u32,
    structural_offset: u32,
    at_line_start: bool,
    trivia: Vec<Trivia<'a>>,
    current: Token<'a>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `text` and scan the first token.
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError::LexicalError`] if the first token is malformed.
    pub fn new(text: &'a str, options: &ParseOptions) -> Result<'a, Self> {
        let mut tokenizer = Self {
            cursor: Cursor::new(text),
            tab_size: options.tab_size(),
            indent_stack: vec![0],
            brackets: Vec::new(),
            pending_indent: false,
            pending_dedents: 0,
            structural_offset: 0,
            at_line_start: true,
            trivia: Vec::with_capacity(4),
            current: Token::new(TokenKind::EndOfFile, Span::empty(0), Vec::new(), ""),
        };
        tokenizer.current = tokenizer.next_token()?;
        Ok(tokenizer)
    }

    /// The token the parser is looking at.
    pub fn current(&self) -> &Token<'a> {
        &self.current
    }

    /// Consume the current token, scanning its successor.
    ///
    /// Once `EndOfFile` has been reached, every further call yields another
    /// empty `EndOfFile` token.
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError::LexicalError`] if the next token is malformed.
    pub fn advance(&mut self) -> Result<'a, Token<'a>> {
        let next = self.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Number of currently open brackets.
    pub fn bracket_depth(&self) -> usize {
        self.brackets.len()
    }

    /// Number of indentation levels above column zero.
    pub fn indent_depth(&self) -> usize {
        self.indent_stack.len() - 1
    }

    fn next_token(&mut self) -> Result<'a, Token<'a>> {
        if self.at_line_start {
            self.at_line_start = false;
            self.scan_line_start()?;
        }
        if self.pending_indent {
            self.pending_indent = false;
            return Ok(self.structural(TokenKind::Indent));
        }
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            return Ok(self.structural(TokenKind::Dedent));
        }
        self.scan_token()
    }

    // ------------------------------------------------------------------------
    // Line start: indentation and blank lines
    // ------------------------------------------------------------------------

    fn scan_line_start(&mut self) -> Result<'a, ()> {
        loop {
            let start = self.cursor.offset();
            let mut col = 0u32;
            while let Some(c) = self.cursor.peek() {
                match c {
                    ' ' => col += 1,
                    '\t' => col = (col / self.tab_size + 1) * self.tab_size,
                    '\x0c' => col = 0,
                    _ => break,
                }
                self.cursor.bump();
            }
            self.push_trivia(TriviaKind::Whitespace, start);

            if self.cursor.peek() == Some('#') {
                self.scan_comment();
            }

            match self.cursor.peek() {
                None => {
                    self.close_indents();
                    return Ok(());
                }
                Some('\r' | '\n') => {
                    let newline = self.cursor.offset();
                    self.cursor.eat_line_break();
                    self.push_trivia(TriviaKind::Newline, newline);
                }
                Some(_) => return self.measure_indent(col),
            }
        }
    }

    fn measure_indent(&mut self, col: u32) -> Result<'a, ()> {
        let offset = self.cursor.offset();
        let top = self.indent_stack.last().copied().unwrap_or(0);
        if col > top {
            trace!(col, offset, "indent");
            self.indent_stack.push(col);
            self.pending_indent = true;
        } else if col < top {
            while self.indent_stack.last().is_some_and(|&level| level > col) {
                self.indent_stack.pop();
                self.pending_dedents += 1;
            }
            if self.indent_stack.last().copied().unwrap_or(0) != col {
                return Err(ParserError::lexical(
                    offset,
                    "Inconsistent indentation level",
                ));
            }
            trace!(col, offset, dedents = self.pending_dedents, "dedent");
        }
        self.structural_offset = offset;
        Ok(())
    }

    /// Schedule one `Dedent` for every open indentation level.
    fn close_indents(&mut self) {
        let levels = self.indent_depth() as u32;
        if levels > 0 {
            trace!(levels, "closing indentation at end of input");
            self.indent_stack.truncate(1);
            self.pending_dedents += levels;
            self.structural_offset = self.cursor.offset();
        }
    }

    fn structural(&self, kind: TokenKind) -> Token<'a> {
        Token::new(kind, Span::empty(self.structural_offset), Vec::new(), "")
    }

    // ------------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------------

    fn scan_token(&mut self) -> Result<'a, Token<'a>> {
        loop {
            let start = self.cursor.offset();
            let Some(c) = self.cursor.peek() else {
                return Ok(self.end_of_file());
            };
            match c {
                ' ' | '\t' | '\x0c' => {
                    self.cursor.eat_while(|c| matches!(c, ' ' | '\t' | '\x0c'));
                    self.push_trivia(TriviaKind::Whitespace, start);
                }
                '#' => {
                    if self.brackets.is_empty()
                        && self.cursor.rest().starts_with(TYPE_COMMENT_PREFIX)
                    {
                        self.skip_to_line_end();
                        return Ok(self.finish(TokenKind::TypeComment, start));
                    }
                    self.scan_comment();
                }
                '\\' => self.scan_line_continuation()?,
                '\r' | '\n' => {
                    self.cursor.eat_line_break();
                    if self.brackets.is_empty() {
                        self.at_line_start = true;
                        return Ok(self.finish(TokenKind::Newline, start));
                    }
                    self.push_trivia(TriviaKind::Newline, start);
                }
                '0'..='9' => {
                    self.scan_number(start)?;
                    return Ok(self.finish(TokenKind::Number, start));
                }
                '.' => {
                    let kind = if self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
                        self.scan_number(start)?;
                        TokenKind::Number
                    } else if self.cursor.rest().starts_with("...") {
                        self.cursor.skip_bytes(3);
                        TokenKind::Ellipsis
                    } else {
                        self.cursor.bump();
                        TokenKind::Dot
                    };
                    return Ok(self.finish(kind, start));
                }
                '\'' | '"' => {
                    self.scan_string(start)?;
                    return Ok(self.finish(TokenKind::String, start));
                }
                c if is_identifier_start(c) => return self.scan_identifier(start),
                _ => {
                    let kind = self.scan_operator(start)?;
                    return Ok(self.finish(kind, start));
                }
            }
        }
    }

    fn end_of_file(&mut self) -> Token<'a> {
        self.close_indents();
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            return self.structural(TokenKind::Dedent);
        }
        self.finish(TokenKind::EndOfFile, self.cursor.offset())
    }

    /// Build a token spanning `start` to the cursor, taking the pending trivia.
    fn finish(&mut self, kind: TokenKind, start: u32) -> Token<'a> {
        let span = Span::new(start, self.cursor.offset());
        let prefix = std::mem::take(&mut self.trivia);
        Token::new(kind, span, prefix, self.cursor.slice_from(start))
    }

    fn push_trivia(&mut self, kind: TriviaKind, start: u32) {
        let end = self.cursor.offset();
        if end > start {
            self.trivia.push(Trivia {
                kind,
                span: Span::new(start, end),
                text: self.cursor.slice_from(start),
            });
        }
    }

    fn skip_to_line_end(&mut self) {
        let rest = self.cursor.rest();
        let len = memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
        self.cursor.skip_bytes(len);
    }

    fn scan_comment(&mut self) {
        let start = self.cursor.offset();
        self.skip_to_line_end();
        self.push_trivia(TriviaKind::Comment, start);
    }

    fn scan_line_continuation(&mut self) -> Result<'a, ()> {
        let start = self.cursor.offset();
        self.cursor.bump();
        if self.cursor.eat_line_break() {
            self.push_trivia(TriviaKind::LineContinuation, start);
            return Ok(());
        }
        let message = if self.cursor.is_eof() {
            "Unexpected end of file after line continuation character"
        } else {
            "Unexpected character after line continuation character"
        };
        Err(ParserError::lexical(start, message))
    }

    fn scan_identifier(&mut self, start: u32) -> Result<'a, Token<'a>> {
        self.cursor.eat_while(is_identifier_continue);
        let ident = self.cursor.slice_from(start);
        if matches!(self.cursor.peek(), Some('\'' | '"')) && is_string_prefix(ident) {
            self.scan_string(start)?;
            return Ok(self.finish(TokenKind::String, start));
        }
        let kind = TokenKind::keyword(ident).unwrap_or(TokenKind::Name);
        Ok(self.finish(kind, start))
    }

    // ------------------------------------------------------------------------
    // Numbers
    // ------------------------------------------------------------------------

    fn scan_number(&mut self, start: u32) -> Result<'a, ()> {
        if self.cursor.peek() == Some('0') {
            let radix = match self.cursor.peek_nth(1) {
                Some('x' | 'X') => Some((16, "hexadecimal")),
                Some('o' | 'O') => Some((8, "octal")),
                Some('b' | 'B') => Some((2, "binary")),
                _ => None,
            };
            if let Some((radix, name)) = radix {
                self.cursor.skip_bytes(2);
                return self.scan_radix_digits(radix, name);
            }
        }

        let mut is_float = false;
        let mut integer = "";
        if self.cursor.eat('.') {
            self.scan_decimal_digits()?;
            is_float = true;
        } else {
            self.scan_decimal_digits()?;
            integer = self.cursor.slice_from(start);
            if self.cursor.eat('.') {
                is_float = true;
                if self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_decimal_digits()?;
                }
            }
        }

        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            match self.cursor.peek_nth(1) {
                Some('0'..='9') => {
                    self.cursor.bump();
                    self.scan_decimal_digits()?;
                    is_float = true;
                }
                Some('+' | '-') => {
                    if !self.cursor.peek_nth(2).is_some_and(|c| c.is_ascii_digit()) {
                        return Err(ParserError::lexical(
                            self.cursor.offset(),
                            "Invalid decimal literal: exponent has no digits",
                        ));
                    }
                    self.cursor.skip_bytes(2);
                    self.scan_decimal_digits()?;
                    is_float = true;
                }
                // `1else`: the `e` starts the next token
                _ => {}
            }
        }

        let is_imaginary = self.cursor.eat('j') || self.cursor.eat('J');
        if !is_float && !is_imaginary && has_leading_zeros(integer) {
            return Err(ParserError::lexical(
                start,
                "Leading zeros in decimal integer literals are not permitted",
            ));
        }
        Ok(())
    }

    /// Scan `digit ('_'? digit)*`. The cursor must be on a digit.
    fn scan_decimal_digits(&mut self) -> Result<'a, ()> {
        loop {
            self.cursor.eat_while(|c| c.is_ascii_digit());
            if self.cursor.peek() != Some('_') {
                return Ok(());
            }
            let underscore = self.cursor.offset();
            self.cursor.bump();
            if !self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(ParserError::lexical(underscore, "Invalid decimal literal"));
            }
        }
    }

    /// Scan the digits after a `0x`/`0o`/`0b` prefix.
    fn scan_radix_digits(&mut self, radix: u32, name: &str) -> Result<'a, ()> {
        let mut seen_digit = false;
        loop {
            match self.cursor.peek() {
                Some(c) if c.is_digit(radix) => {
                    self.cursor.bump();
                    seen_digit = true;
                }
                Some('_') => {
                    let underscore = self.cursor.offset();
                    self.cursor.bump();
                    match self.cursor.peek() {
                        Some(c) if c.is_digit(radix) => {}
                        Some(c) if c.is_ascii_digit() => {
                            return Err(invalid_digit(self.cursor.offset(), c, name));
                        }
                        _ => {
                            return Err(ParserError::lexical(
                                underscore,
                                format!("Invalid {} literal", name),
                            ));
                        }
                    }
                }
                _ => break,
            }
        }

        let offset = self.cursor.offset();
        match self.cursor.peek() {
            Some(c) if c.is_ascii_digit() => Err(invalid_digit(offset, c, name)),
            Some(c) if is_identifier_continue(c) => Err(ParserError::lexical(
                offset,
                format!("Invalid {} literal", name),
            )),
            _ if !seen_digit => Err(ParserError::lexical(
                offset,
                format!("Invalid {} literal", name),
            )),
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------------

    /// Scan a quoted string. The cursor must be on the opening quote; `start`
    /// is the token start, including any prefix letters.
    fn scan_string(&mut self, start: u32) -> Result<'a, ()> {
        let Some(quote) = self.cursor.bump() else {
            return Err(unterminated(start, 1));
        };
        let quote_size = if self.cursor.eat(quote) {
            if !self.cursor.eat(quote) {
                // Two quotes followed by something else: the empty string
                return Ok(());
            }
            3
        } else {
            1
        };

        let mut closing_run = 0;
        loop {
            let Some(c) = self.cursor.bump() else {
                return Err(unterminated(start, quote_size));
            };
            if c == quote {
                closing_run += 1;
                if closing_run == quote_size {
                    return Ok(());
                }
                continue;
            }
            closing_run = 0;
            match c {
                '\\' => {
                    if !self.cursor.eat_line_break() && self.cursor.bump().is_none() {
                        return Err(unterminated(start, quote_size));
                    }
                }
                '\r' | '\n' if quote_size == 1 => return Err(unterminated(start, quote_size)),
                _ => {}
            }
        }
    }

    // ------------------------------------------------------------------------
    // Operators and delimiters
    // ------------------------------------------------------------------------

    fn scan_operator(&mut self, start: u32) -> Result<'a, TokenKind> {
        let Some(c) = self.cursor.bump() else {
            return Err(ParserError::lexical(start, "Unexpected end of file"));
        };
        let kind = match c {
            '(' | '[' | '{' => {
                if self.brackets.len() >= MAX_BRACKET_DEPTH {
                    return Err(ParserError::lexical(start, "Too many nested parentheses"));
                }
                self.brackets.push((c, start));
                match c {
                    '(' => TokenKind::LeftParen,
                    '[' => TokenKind::LeftBracket,
                    _ => TokenKind::LeftBrace,
                }
            }
            ')' | ']' | '}' => {
                self.close_bracket(c, start)?;
                match c {
                    ')' => TokenKind::RightParen,
                    ']' => TokenKind::RightBracket,
                    _ => TokenKind::RightBrace,
                }
            }
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '~' => TokenKind::Tilde,
            ':' => self.with_equal(TokenKind::ColonEqual, TokenKind::Colon),
            '+' => self.with_equal(TokenKind::PlusEqual, TokenKind::Plus),
            '-' => {
                if self.cursor.eat('>') {
                    TokenKind::Arrow
                } else {
                    self.with_equal(TokenKind::MinusEqual, TokenKind::Minus)
                }
            }
            '*' => {
                if self.cursor.eat('*') {
                    self.with_equal(TokenKind::DoubleStarEqual, TokenKind::DoubleStar)
                } else {
                    self.with_equal(TokenKind::StarEqual, TokenKind::Star)
                }
            }
            '/' => {
                if self.cursor.eat('/') {
                    self.with_equal(TokenKind::DoubleSlashEqual, TokenKind::DoubleSlash)
                } else {
                    self.with_equal(TokenKind::SlashEqual, TokenKind::Slash)
                }
            }
            '%' => self.with_equal(TokenKind::PercentEqual, TokenKind::Percent),
            '@' => self.with_equal(TokenKind::AtEqual, TokenKind::At),
            '&' => self.with_equal(TokenKind::AmpersandEqual, TokenKind::Ampersand),
            '|' => self.with_equal(TokenKind::PipeEqual, TokenKind::Pipe),
            '^' => self.with_equal(TokenKind::CaretEqual, TokenKind::Caret),
            '=' => self.with_equal(TokenKind::EqualEqual, TokenKind::Equal),
            '!' if self.cursor.eat('=') => TokenKind::NotEqual,
            '<' => {
                if self.cursor.eat('=') {
                    TokenKind::LessEqual
                } else if self.cursor.eat('<') {
                    self.with_equal(TokenKind::LeftShiftEqual, TokenKind::LeftShift)
                } else if self.cursor.eat('>') {
                    TokenKind::LessGreater
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.cursor.eat('=') {
                    TokenKind::GreaterEqual
                } else if self.cursor.eat('>') {
                    self.with_equal(TokenKind::RightShiftEqual, TokenKind::RightShift)
                } else {
                    TokenKind::Greater
                }
            }
            other => {
                return Err(ParserError::lexical(
                    start,
                    format!("Invalid character '{}'", other.escape_debug()),
                ));
            }
        };
        Ok(kind)
    }

    fn with_equal(&mut self, with: TokenKind, without: TokenKind) -> TokenKind {
        if self.cursor.eat('=') {
            with
        } else {
            without
        }
    }

    fn close_bracket(&mut self, closer: char, offset: u32) -> Result<'a, ()> {
        let expected = match closer {
            ')' => '(',
            ']' => '[',
            _ => '{',
        };
        match self.brackets.pop() {
            Some((opener, _)) if opener == expected => Ok(()),
            Some((opener, _)) => Err(ParserError::lexical(
                offset,
                format!(
                    "Closing bracket '{}' does not match opening bracket '{}'",
                    closer, opener
                ),
            )),
            None => Err(ParserError::lexical(
                offset,
                format!("Unmatched '{}'", closer),
            )),
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_string_prefix(ident: &str) -> bool {
    const PREFIXES: &[&str] = &["r", "u", "b", "f", "br", "rb", "fr", "rf"];
    PREFIXES.iter().any(|p| p.eq_ignore_ascii_case(ident))
}

fn has_leading_zeros(integer: &str) -> bool {
    integer.starts_with('0') && integer.chars().any(|c| matches!(c, '1'..='9'))
}

fn invalid_digit<'a>(offset: u32, digit: char, name: &str) -> ParserError<'a> {
    ParserError::lexical(
        offset,
        format!("Invalid digit '{}' in {} literal", digit, name),
    )
}

fn unterminated<'a>(start: u32, quote_size: u32) -> ParserError<'a> {
    let message = if quote_size == 3 {
        "Unterminated triple-quoted string literal"
    } else {
        "Unterminated string literal"
    };
    ParserError::lexical(start, message)
}
