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

//! Parser for the optimizer hint sub-language.
//!
//! The text between `/*+` and `*/` is a list of hints separated by
//! whitespace or commas. Each hint's argument grammar is determined by its
//! name through [`hint_shape`]; hints with unrecognized names keep their
//! argument text verbatim.

use std::fmt;

use tracing::debug;

use crate::ast::{
    hint_shape, HintData, HintShape, HintStorage, HintTable, Ident, QueryType, StorageEngine,
    TableOptimizerHint,
};
use crate::lexer::{self, PosToken, Token};

/// An error produced while parsing hint text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParserError {
    /// The byte offset in the hint text at which the error occurred.
    pub pos: usize,
    /// The error message.
    pub message: String,
}

impl ParserError {
    /// Constructs an error with the provided message at the provided position.
    pub(crate) fn new<S>(pos: usize, message: S) -> ParserError
    where
        S: Into<String>,
    {
        ParserError {
            pos,
            message: message.into(),
        }
    }
}

macro_rules! parser_err {
    ($pos:expr, $($fmt:expr),*) => {
        Err(ParserError::new($pos, format!($($fmt),*)))
    }
}

/// Parses the body of an optimizer hint comment.
///
/// An empty body yields no hints.
pub fn parse_optimizer_hints(text: &str) -> Result<Vec<TableOptimizerHint>, ParserError> {
    let tokens = lexer::lex(text).map_err(|e| ParserError::new(e.pos, e.message))?;
    let mut parser = Parser::new(text, tokens);
    parser.parse_hints().map_err(|e| {
        debug!(pos = e.pos, error = %e.message, "failed to parse optimizer hints");
        e
    })
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<PosToken>,
    index: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, tokens: Vec<PosToken>) -> Parser<'a> {
        Parser {
            text,
            tokens,
            index: 0,
        }
    }

    fn parse_hints(&mut self) -> Result<Vec<TableOptimizerHint>, ParserError> {
        let mut hints = vec![];
        while self.peek_token().is_some() {
            hints.push(self.parse_hint()?);
            self.consume_token(&Token::Comma);
        }
        Ok(hints)
    }

    fn parse_hint(&mut self) -> Result<TableOptimizerHint, ParserError> {
        let pos = self.peek_pos();
        let name = match self.next_token() {
            Some(Token::Ident {
                value,
                quoted: false,
            }) => Ident::new(value),
            other => return self.expected(pos, "hint name", other),
        };
        let Some(shape) = hint_shape(name.as_str()) else {
            return self.parse_unrecognized_hint(name);
        };

        self.expect_token(&Token::LParen)?;
        let mut hint = TableOptimizerHint::new(name);
        if shape == HintShape::QbName {
            hint.qb_name = Some(self.parse_ident()?);
            self.expect_token(&Token::RParen)?;
            return Ok(hint);
        }
        if self.consume_token(&Token::At) {
            hint.qb_name = Some(self.parse_ident()?);
        }
        match shape {
            HintShape::NoArgs | HintShape::QbName => {}
            HintShape::Tables => {
                if !self.peek_is(&Token::RParen) {
                    hint.tables = self.parse_comma_separated(Parser::parse_hint_table)?;
                }
            }
            HintShape::TableIndexes => {
                if !self.peek_is(&Token::RParen) {
                    hint.tables = vec![self.parse_hint_table()?];
                    if let Some(Token::Ident { .. }) = self.peek_token() {
                        hint.indexes = self.parse_comma_separated(Parser::parse_ident)?;
                    }
                }
            }
            HintShape::Uint => hint.data = HintData::Uint(self.parse_uint()?),
            HintShape::MemoryQuota => hint.data = HintData::MemoryQuota(self.parse_memory_quota()?),
            HintShape::Bool => {
                let b = self.parse_one_of_keywords(&[("TRUE", true), ("FALSE", false)])?;
                hint.data = HintData::Bool(b);
            }
            HintShape::QueryType => {
                hint.data = HintData::QueryType(self.parse_one_of_keywords(&[
                    ("OLAP", QueryType::Olap),
                    ("OLTP", QueryType::Oltp),
                ])?)
            }
            HintShape::TimeRange => {
                let from = self.parse_string()?;
                self.expect_token(&Token::Comma)?;
                let to = self.parse_string()?;
                hint.data = HintData::TimeRange { from, to };
            }
            HintShape::Storage => {
                let storages = self.parse_comma_separated(Parser::parse_hint_storage)?;
                hint.data = HintData::Storage(storages);
            }
            HintShape::Strategies => {
                let mut strategies = vec![];
                if !self.peek_is(&Token::RParen) {
                    strategies = self.parse_comma_separated(|parser| {
                        Ok(parser.parse_ident()?.as_str().to_uppercase())
                    })?;
                }
                hint.data = HintData::Strategies(strategies);
            }
            HintShape::RawIdent => {
                hint.data = HintData::Raw(self.parse_bare_ident()?.into_string());
            }
        }
        self.expect_token(&Token::RParen)?;
        Ok(hint)
    }

    /// Captures the argument text of a hint with an unrecognized name,
    /// through the matching close parenthesis.
    fn parse_unrecognized_hint(&mut self, name: Ident) -> Result<TableOptimizerHint, ParserError> {
        debug!(hint = name.as_str(), "passing through unrecognized optimizer hint");
        let open_pos = self.peek_pos();
        self.expect_token(&Token::LParen)?;
        let start = self.prev_end();
        let mut depth = 1;
        let end = loop {
            let Some(token) = self.next_pos_token() else {
                return parser_err!(
                    open_pos,
                    "unbalanced parentheses in arguments of hint {}",
                    name.as_str()
                );
            };
            match token.kind {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        break token.offset;
                    }
                }
                _ => {}
            }
        };
        let raw = self.text[start..end].trim();
        let mut hint = TableOptimizerHint::new(name);
        if !raw.is_empty() {
            hint.data = HintData::Raw(raw.into());
        }
        Ok(hint)
    }

    /// Parses `[schema.]table[@qb][ PARTITION(p, ...)]`.
    fn parse_hint_table(&mut self) -> Result<HintTable, ParserError> {
        let first = self.parse_ident()?;
        let (schema, table) = if self.consume_token(&Token::Dot) {
            (Some(first), self.parse_ident()?)
        } else {
            (None, first)
        };
        let qb_name = if self.consume_token(&Token::At) {
            Some(self.parse_ident()?)
        } else {
            None
        };
        let mut partitions = vec![];
        if self.peek_keyword("PARTITION") && self.peek_nth_token(1) == Some(&Token::LParen) {
            self.index += 2;
            partitions = self.parse_comma_separated(Parser::parse_ident)?;
            self.expect_token(&Token::RParen)?;
        }
        Ok(HintTable {
            schema,
            table,
            qb_name,
            partitions,
        })
    }

    /// Parses `ENGINE[table, ...]`.
    fn parse_hint_storage(&mut self) -> Result<HintStorage, ParserError> {
        let pos = self.peek_pos();
        let engine = match self.next_token() {
            Some(Token::Ident { value, .. }) => match StorageEngine::from_name(&value) {
                Some(engine) => engine,
                None => return parser_err!(pos, "unknown storage engine {}", value),
            },
            other => return self.expected(pos, "TIKV or TIFLASH", other),
        };
        self.expect_token(&Token::LBracket)?;
        let tables = self.parse_comma_separated(Parser::parse_hint_table)?;
        self.expect_token(&Token::RBracket)?;
        Ok(HintStorage { engine, tables })
    }

    fn parse_uint(&mut self) -> Result<u64, ParserError> {
        let pos = self.peek_pos();
        match self.next_token() {
            Some(Token::Number(n)) => n
                .parse()
                .or_else(|_| parser_err!(pos, "invalid unsigned integer {}", n)),
            other => self.expected(pos, "unsigned integer", other),
        }
    }

    /// Parses `n B|KB|MB|GB`, returning a count of bytes. Fractional
    /// quantities are rounded down to a whole byte.
    fn parse_memory_quota(&mut self) -> Result<u64, ParserError> {
        let pos = self.peek_pos();
        let n = match self.next_token() {
            Some(Token::Number(n)) => n,
            other => return self.expected(pos, "memory quota", other),
        };
        let unit_pos = self.peek_pos();
        let unit = self.parse_ident()?;
        let multiplier = match unit.as_str().to_uppercase().as_str() {
            "B" => 1,
            "KB" => bytesize::KIB,
            "MB" => bytesize::MIB,
            "GB" => bytesize::GIB,
            _ => return parser_err!(unit_pos, "unknown memory unit {}", unit.as_str()),
        };
        if let Ok(n) = n.parse::<u64>() {
            return match n.checked_mul(multiplier) {
                Some(bytes) => Ok(bytes),
                None => parser_err!(pos, "memory quota {} {} is out of range", n, unit.as_str()),
            };
        }
        let bytes = match n.parse::<f64>() {
            Ok(n) => (n * multiplier as f64).floor(),
            Err(_) => return parser_err!(pos, "invalid memory quota {}", n),
        };
        if !bytes.is_finite() || bytes >= u64::MAX as f64 {
            return parser_err!(pos, "memory quota {} {} is out of range", n, unit.as_str());
        }
        Ok(bytes as u64)
    }

    fn parse_string(&mut self) -> Result<String, ParserError> {
        let pos = self.peek_pos();
        match self.next_token() {
            Some(Token::String(s)) => Ok(s),
            other => self.expected(pos, "string literal", other),
        }
    }

    fn parse_ident(&mut self) -> Result<Ident, ParserError> {
        let pos = self.peek_pos();
        match self.next_token() {
            Some(Token::Ident { value, .. }) => Ok(Ident::new(value)),
            other => self.expected(pos, "identifier", other),
        }
    }

    /// Parses an identifier that was not written in backticks, and so can
    /// be written back without them.
    fn parse_bare_ident(&mut self) -> Result<Ident, ParserError> {
        let pos = self.peek_pos();
        match self.next_token() {
            Some(Token::Ident {
                value,
                quoted: false,
            }) => Ok(Ident::new(value)),
            other => self.expected(pos, "unquoted identifier", other),
        }
    }

    /// Parses one of the unquoted `keywords`, returning its associated value.
    fn parse_one_of_keywords<T: Copy>(&mut self, keywords: &[(&str, T)]) -> Result<T, ParserError> {
        let pos = self.peek_pos();
        for (keyword, value) in keywords {
            if self.peek_keyword(keyword) {
                self.index += 1;
                return Ok(*value);
            }
        }
        let expected = keywords
            .iter()
            .map(|(keyword, _)| *keyword)
            .collect::<Vec<_>>()
            .join(" or ");
        let found = self.next_token();
        self.expected(pos, expected, found)
    }

    fn parse_comma_separated<T, F>(&mut self, mut f: F) -> Result<Vec<T>, ParserError>
    where
        F: FnMut(&mut Self) -> Result<T, ParserError>,
    {
        let mut values = vec![f(self)?];
        while self.consume_token(&Token::Comma) {
            values.push(f(self)?);
        }
        Ok(values)
    }

    fn expected<D, T>(&self, pos: usize, expected: D, found: Option<Token>) -> Result<T, ParserError>
    where
        D: fmt::Display,
    {
        match found {
            Some(token) => parser_err!(pos, "Expected {}, found {}", expected, token),
            None => parser_err!(pos, "Expected {}, found EOF", expected),
        }
    }

    fn expect_token(&mut self, expected: &Token) -> Result<(), ParserError> {
        let pos = self.peek_pos();
        if self.consume_token(expected) {
            Ok(())
        } else {
            let found = self.next_token();
            self.expected(pos, expected, found)
        }
    }

    fn consume_token(&mut self, expected: &Token) -> bool {
        if self.peek_is(expected) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn peek_is(&self, expected: &Token) -> bool {
        self.peek_token() == Some(expected)
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        self.peek_token().map_or(false, |t| t.is_keyword(keyword))
    }

    fn peek_token(&self) -> Option<&Token> {
        self.peek_nth_token(0)
    }

    fn peek_nth_token(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.index + n).map(|t| &t.kind)
    }

    /// Returns the offset of the next token, or the end of the text if
    /// there are no more tokens.
    fn peek_pos(&self) -> usize {
        self.tokens
            .get(self.index)
            .map_or(self.text.len(), |t| t.offset)
    }

    /// Returns the end offset of the most recently consumed token.
    fn prev_end(&self) -> usize {
        match self.index.checked_sub(1) {
            Some(i) => self.tokens[i].end,
            None => 0,
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        self.next_pos_token().map(|t| t.kind)
    }

    fn next_pos_token(&mut self) -> Option<PosToken> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::display::AstDisplay;

    #[test]
    fn test_parse_hint_list() {
        let hints =
            parse_optimizer_hints("hash_agg(), USE_INDEX(@sel_1 test.t1 PARTITION(p0) c1, c2)")
                .unwrap();
        assert_eq!(hints.len(), 2);
        assert_eq!(hints[0].name.as_str(), "hash_agg");
        let use_index = &hints[1];
        assert_eq!(use_index.qb_name, Some(Ident::new("sel_1")));
        assert_eq!(
            use_index.tables,
            vec![HintTable {
                schema: Some(Ident::new("test")),
                table: Ident::new("t1"),
                qb_name: None,
                partitions: vec![Ident::new("p0")],
            }]
        );
        assert_eq!(use_index.indexes, vec![Ident::new("c1"), Ident::new("c2")]);
        assert!(parse_optimizer_hints("  ").unwrap().is_empty());
    }

    #[test]
    fn test_memory_quota_units() {
        for (text, bytes) in [
            ("MEMORY_QUOTA(1 GB)", bytesize::GIB),
            ("MEMORY_QUOTA(3 mb)", 3 * bytesize::MIB),
            ("MEMORY_QUOTA(2 KB)", 2048),
            ("MEMORY_QUOTA(1.5 KB)", 1536),
            ("MEMORY_QUOTA(0.3 B)", 0),
        ] {
            let hints = parse_optimizer_hints(text).unwrap();
            assert_eq!(hints[0].data, HintData::MemoryQuota(bytes), "{text}");
        }
        for text in [
            "MEMORY_QUOTA(99999999999 GB)",
            "MEMORY_QUOTA(99999999999999999999.5 GB)",
            "MEMORY_QUOTA(18446744073709551616.0 B)",
        ] {
            let err = parse_optimizer_hints(text).unwrap_err();
            assert_eq!(err.pos, 13, "{text}");
            assert!(err.message.ends_with("is out of range"), "{text}: {}", err.message);
        }
    }

    #[test]
    fn test_unrecognized_hint_keeps_arguments() {
        let hints = parse_optimizer_hints("my_hint( a, (b c) ) other()").unwrap();
        assert_eq!(hints[0].data, HintData::Raw("a, (b c)".into()));
        assert_eq!(hints[1].data, HintData::None);
        assert_eq!(
            hints[0].to_ast_string().unwrap(),
            "my_hint(a, (b c))"
        );
    }

    #[test]
    fn test_errors() {
        for (text, pos, message) in [
            ("bka(t1", 6, "Expected ), found EOF"),
            ("nth_plan(x)", 9, "Expected unsigned integer, found x"),
            ("use_toja(yes)", 9, "Expected TRUE or FALSE, found yes"),
            ("memory_quota(1 TB)", 15, "unknown memory unit TB"),
            (
                "resource_group(`my group`)",
                15,
                "Expected unquoted identifier, found `my group`",
            ),
            ("read_from_storage(tidb[t1])", 18, "unknown storage engine tidb"),
            ("my_hint(a (b)", 7, "unbalanced parentheses in arguments of hint my_hint"),
            ("'x'", 0, "Expected hint name, found 'x'"),
        ] {
            let err = parse_optimizer_hints(text).unwrap_err();
            assert_eq!((err.pos, err.message.as_str()), (pos, message), "{text}");
        }
    }
}
