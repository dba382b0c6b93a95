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

//! Lexer for the optimizer hint sub-language.
//!
//! The body of a `/*+ ... */` comment is tokenized separately from the
//! statement around it. Identifiers may be bare or quoted with backticks,
//! strings may be quoted with single or double quotes, and any other
//! punctuation is passed through as a [`Token::Op`] so that the arguments of
//! unrecognized hints can be captured verbatim.

use std::fmt;

use sqlkit_ore::lex::LexBuf;

/// A token of the hint sub-language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An identifier. `quoted` records whether it was written in backticks.
    Ident { value: String, quoted: bool },
    /// An unsigned numeric literal, possibly with a fractional part.
    Number(String),
    String(String),
    At,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Op(char),
}

impl Token {
    /// Reports whether the token is the unquoted identifier `keyword`,
    /// ignoring case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Ident { value, quoted: false } if value.eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Ident { value, quoted: false } => f.write_str(value),
            Token::Ident { value, quoted: true } => write!(f, "`{}`", value),
            Token::Number(n) => f.write_str(n),
            Token::String(s) => write!(f, "'{}'", s),
            Token::At => f.write_str("@"),
            Token::Dot => f.write_str("."),
            Token::Comma => f.write_str(","),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::Op(ch) => write!(f, "{}", ch),
        }
    }
}

/// A token and the byte offsets of the text it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct PosToken {
    pub kind: Token,
    pub offset: usize,
    pub end: usize,
}

/// An error that occurred while lexing hint text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LexerError {
    /// The error message.
    pub message: String,
    /// The byte offset at which the error occurred.
    pub pos: usize,
}

impl LexerError {
    fn new<S: Into<String>>(pos: usize, message: S) -> LexerError {
        LexerError {
            pos,
            message: message.into(),
        }
    }
}

macro_rules! bail {
    ($pos:expr, $($fmt:expr),*) => {
        return Err(LexerError::new($pos, format!($($fmt),*)))
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Lexes hint text into tokens.
pub fn lex(text: &str) -> Result<Vec<PosToken>, LexerError> {
    let buf = &mut LexBuf::new(text);
    let mut tokens = vec![];
    loop {
        buf.take_while(|ch| ch.is_ascii_whitespace());
        let offset = buf.pos();
        let kind = match buf.next() {
            None => break,
            Some(ch) if is_ident_start(ch) => {
                buf.prev();
                Token::Ident {
                    value: buf.take_while(is_ident_char).into(),
                    quoted: false,
                }
            }
            Some('0'..='9') => {
                buf.prev();
                // A digit run that continues into identifier characters,
                // like `1idx`, is an identifier.
                let rest = &buf.inner()[offset..];
                let word = rest.find(|ch: char| !is_ident_char(ch)).unwrap_or(rest.len());
                if rest[..word].chars().all(|ch| ch.is_ascii_digit()) {
                    lex_number(buf)
                } else {
                    Token::Ident {
                        value: buf.take_while(is_ident_char).into(),
                        quoted: false,
                    }
                }
            }
            Some('`') => Token::Ident {
                value: lex_quoted(buf, '`', offset)?,
                quoted: true,
            },
            Some(quote @ ('\'' | '"')) => Token::String(lex_quoted(buf, quote, offset)?),
            Some('@') => Token::At,
            Some('.') => Token::Dot,
            Some(',') => Token::Comma,
            Some('(') => Token::LParen,
            Some(')') => Token::RParen,
            Some('[') => Token::LBracket,
            Some(']') => Token::RBracket,
            Some(ch) => Token::Op(ch),
        };
        tokens.push(PosToken {
            kind,
            offset,
            end: buf.pos(),
        });
    }
    Ok(tokens)
}

fn lex_number(buf: &mut LexBuf) -> Token {
    let mut n = buf.take_while(|ch| ch.is_ascii_digit()).to_owned();
    if buf.consume('.') {
        match buf.peek() {
            Some(ch) if ch.is_ascii_digit() => {
                n.push('.');
                n.push_str(buf.take_while(|ch| ch.is_ascii_digit()));
            }
            _ => buf.prev(),
        }
    }
    Token::Number(n)
}

/// Lexes the remainder of a quoted token. A doubled quote character stands
/// for itself.
fn lex_quoted(buf: &mut LexBuf, quote: char, start: usize) -> Result<String, LexerError> {
    let mut s = String::new();
    loop {
        match buf.next() {
            Some(ch) if ch == quote => {
                if buf.consume(quote) {
                    s.push(quote);
                } else {
                    return Ok(s);
                }
            }
            Some(ch) => s.push(ch),
            None => bail!(start, "unterminated quoted string"),
        }
    }
}
