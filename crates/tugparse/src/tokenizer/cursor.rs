// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

/// A byte-offset cursor over the source buffer that steps one `char` at a
/// time.
pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub(crate) fn offset(&self) -> u32 {
        self.pos as u32
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The unconsumed remainder of the buffer.
    pub(crate) fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_while(&mut self, f: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !f(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Move forward by `len` bytes. `len` must land on a char boundary.
    pub(crate) fn skip_bytes(&mut self, len: usize) {
        self.pos = (self.pos + len).min(self.text.len());
    }

    /// Consume a line break (`\n`, `\r\n` or a lone `\r`) if one is next.
    pub(crate) fn eat_line_break(&mut self) -> bool {
        if self.eat('\r') {
            self.eat('\n');
            true
        } else {
            self.eat('\n')
        }
    }

    /// The text from `start` to the current position.
    pub(crate) fn slice_from(&self, start: u32) -> &'a str {
        &self.text[start as usize..self.pos]
    }
}
