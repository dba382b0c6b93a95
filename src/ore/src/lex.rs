// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lexing utilities.

/// A cursor over a string with a variety of lexing convenience methods.
#[derive(Debug)]
pub struct LexBuf<'a> {
    buf: &'a str,
    pos: usize,
}

impl<'a> LexBuf<'a> {
    /// Creates a new lexical buffer positioned at the start of `buf`.
    pub fn new(buf: &'a str) -> LexBuf<'a> {
        LexBuf { buf, pos: 0 }
    }

    /// Returns the next character in the buffer, if any, without advancing.
    pub fn peek(&self) -> Option<char> {
        self.buf[self.pos..].chars().next()
    }

    /// Returns the next character in the buffer, if any, and advances past it.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Moves the cursor back one character.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the start of the buffer.
    pub fn prev(&mut self) {
        match self.buf[..self.pos].chars().next_back() {
            Some(ch) => self.pos -= ch.len_utf8(),
            None => panic!("LexBuf::prev called at start of buffer"),
        }
    }

    /// Advances past the next character if it is `ch`.
    ///
    /// Returns whether the character was consumed.
    pub fn consume(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    /// Advances past `s` if the buffer continues with `s`, ignoring ASCII
    /// case.
    ///
    /// Returns whether the string was consumed.
    pub fn consume_str_ignore_case(&mut self, s: &str) -> bool {
        let rest = &self.buf[self.pos..];
        if rest.len() >= s.len()
            && rest.is_char_boundary(s.len())
            && rest[..s.len()].eq_ignore_ascii_case(s)
        {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Advances the cursor while `predicate` holds, returning the characters
    /// it skipped over.
    pub fn take_while<P>(&mut self, mut predicate: P) -> &'a str
    where
        P: FnMut(char) -> bool,
    {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.buf[start..self.pos]
    }

    /// Returns the byte offset of the cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the entire underlying buffer.
    pub fn inner(&self) -> &'a str {
        self.buf
    }
}
