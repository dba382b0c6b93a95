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

//! Canonical SQL text generation.
//!
//! Every AST node implements [`AstDisplay`], which writes the node's
//! canonical SQL text to an [`AstFormatter`]. The formatter owns the output
//! sink and the [`RestoreFlags`] that control quoting and casing, so node
//! implementations never decide on a quote character or keyword case
//! themselves.

use std::fmt;

use bitflags::bitflags;

use crate::ast::RestoreError;

bitflags! {
    /// Options that control how AST nodes are restored to text.
    ///
    /// Flag sets built from raw bits with [`RestoreFlags::from_bits_truncate`]
    /// silently drop bits that do not name a known flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RestoreFlags: u32 {
        /// Quote string literals with `'`.
        const STRING_SINGLE_QUOTES = 1;
        /// Quote string literals with `"`.
        const STRING_DOUBLE_QUOTES = 1 << 1;
        /// Escape backslashes inside string literals.
        const STRING_ESCAPE_BACKSLASH = 1 << 2;
        /// Write keywords in upper case.
        const KEYWORD_UPPERCASE = 1 << 3;
        /// Write keywords in lower case.
        const KEYWORD_LOWERCASE = 1 << 4;
        /// Write identifiers in upper case.
        const NAME_UPPERCASE = 1 << 5;
        /// Write identifiers in lower case.
        const NAME_LOWERCASE = 1 << 6;
        /// Quote identifiers with `"`.
        const NAME_DOUBLE_QUOTES = 1 << 7;
        /// Quote identifiers with `` ` ``.
        const NAME_BACK_QUOTES = 1 << 8;
        /// Surround symbolic binary operators with spaces.
        const SPACES_AROUND_BINARY_OPERATION = 1 << 9;
        /// Replace credentials with a placeholder while restoring.
        const FOR_REDACTION = 1 << 10;
    }
}

impl RestoreFlags {
    /// The flags used by [`AstDisplay::to_ast_string`].
    pub const DEFAULT: RestoreFlags = RestoreFlags::STRING_SINGLE_QUOTES
        .union(RestoreFlags::KEYWORD_UPPERCASE)
        .union(RestoreFlags::NAME_BACK_QUOTES);
}

impl Default for RestoreFlags {
    fn default() -> RestoreFlags {
        RestoreFlags::DEFAULT
    }
}

/// The placeholder written in place of credentials when restoring with
/// [`RestoreFlags::FOR_REDACTION`].
pub const REDACTED: &str = "xxxxxx";

/// An output sink for restored SQL text, along with the flags that govern
/// how the text is written.
#[derive(Debug)]
pub struct AstFormatter<W> {
    buf: W,
    flags: RestoreFlags,
}

impl<W> AstFormatter<W>
where
    W: fmt::Write,
{
    /// Creates a formatter that writes to `buf` according to `flags`.
    pub fn new(buf: W, flags: RestoreFlags) -> AstFormatter<W> {
        AstFormatter { buf, flags }
    }

    /// Returns the flags in effect.
    pub fn flags(&self) -> RestoreFlags {
        self.flags
    }

    /// Reports whether credentials should be replaced with [`REDACTED`].
    pub fn is_redacting(&self) -> bool {
        self.flags.contains(RestoreFlags::FOR_REDACTION)
    }

    /// Writes the canonical text of `node`.
    pub fn write_node<T>(&mut self, node: &T) -> Result<(), RestoreError>
    where
        T: AstDisplay + ?Sized,
    {
        node.fmt(self)
    }

    /// Writes `s` verbatim.
    pub fn write_str<T>(&mut self, s: T) -> Result<(), RestoreError>
    where
        T: fmt::Display,
    {
        write!(self.buf, "{}", s)?;
        Ok(())
    }

    /// Writes a keyword in the configured case.
    pub fn write_keyword(&mut self, keyword: &str) -> Result<(), RestoreError> {
        if self.flags.contains(RestoreFlags::KEYWORD_UPPERCASE) {
            self.write_str(keyword.to_uppercase())
        } else if self.flags.contains(RestoreFlags::KEYWORD_LOWERCASE) {
            self.write_str(keyword.to_lowercase())
        } else {
            self.write_str(keyword)
        }
    }

    /// Writes an identifier, cased and quoted as configured.
    ///
    /// Quote characters embedded in the identifier are doubled.
    pub fn write_name(&mut self, name: &str) -> Result<(), RestoreError> {
        let name = if self.flags.contains(RestoreFlags::NAME_UPPERCASE) {
            name.to_uppercase()
        } else if self.flags.contains(RestoreFlags::NAME_LOWERCASE) {
            name.to_lowercase()
        } else {
            name.to_owned()
        };
        if self.flags.contains(RestoreFlags::NAME_BACK_QUOTES) {
            self.write_str(format_args!("`{}`", name.replace('`', "``")))
        } else if self.flags.contains(RestoreFlags::NAME_DOUBLE_QUOTES) {
            self.write_str(format_args!("\"{}\"", name.replace('"', "\"\"")))
        } else {
            self.write_str(name)
        }
    }

    /// Writes a string literal, quoted and escaped as configured.
    pub fn write_string(&mut self, s: &str) -> Result<(), RestoreError> {
        let s = if self.flags.contains(RestoreFlags::STRING_ESCAPE_BACKSLASH) {
            s.replace('\\', "\\\\")
        } else {
            s.to_owned()
        };
        if self.flags.contains(RestoreFlags::STRING_SINGLE_QUOTES) {
            self.write_str(format_args!("'{}'", s.replace('\'', "''")))
        } else if self.flags.contains(RestoreFlags::STRING_DOUBLE_QUOTES) {
            self.write_str(format_args!("\"{}\"", s.replace('"', "\"\"")))
        } else {
            self.write_str(s)
        }
    }

    /// Writes a string literal holding a credential, which is replaced by
    /// [`REDACTED`] when redacting.
    pub fn write_secret(&mut self, s: &str) -> Result<(), RestoreError> {
        if self.is_redacting() {
            self.write_string(REDACTED)
        } else {
            self.write_string(s)
        }
    }

    /// Consumes the formatter, returning the output sink.
    pub fn into_inner(self) -> W {
        self.buf
    }
}

/// Restores AST nodes to canonical SQL text.
pub trait AstDisplay {
    /// Writes the canonical text of this node to `f`.
    fn fmt<W>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError>
    where
        W: fmt::Write;

    /// Restores this node with [`RestoreFlags::DEFAULT`].
    fn to_ast_string(&self) -> Result<String, RestoreError> {
        self.to_ast_string_with(RestoreFlags::DEFAULT)
    }

    /// Restores this node with the given flags.
    fn to_ast_string_with(&self, flags: RestoreFlags) -> Result<String, RestoreError> {
        let mut f = AstFormatter::new(String::new(), flags);
        self.fmt(&mut f)?;
        Ok(f.into_inner())
    }
}

impl<T> AstDisplay for Box<T>
where
    T: AstDisplay + ?Sized,
{
    fn fmt<W>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError>
    where
        W: fmt::Write,
    {
        (**self).fmt(f)
    }
}

/// Implements [`std::fmt::Display`] in terms of [`AstDisplay`] with the
/// default flags.
#[macro_export]
macro_rules! impl_display {
    ($name:ident) => {
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                use $crate::ast::display::{AstDisplay, AstFormatter, RestoreFlags};
                AstDisplay::fmt(self, &mut AstFormatter::new(f, RestoreFlags::DEFAULT))
                    .map_err(|_| std::fmt::Error)
            }
        }
    };
}

/// A list of nodes written with a separator between consecutive elements.
#[derive(Debug)]
pub struct DisplaySeparated<'a, T> {
    slice: &'a [T],
    sep: &'static str,
}

impl<'a, T> AstDisplay for DisplaySeparated<'a, T>
where
    T: AstDisplay,
{
    fn fmt<W>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError>
    where
        W: fmt::Write,
    {
        let mut delim = "";
        for t in self.slice {
            f.write_str(delim)?;
            delim = self.sep;
            t.fmt(f)?;
        }
        Ok(())
    }
}

/// Writes `slice` with `sep` between its elements.
pub fn separated<'a, T>(slice: &'a [T], sep: &'static str) -> DisplaySeparated<'a, T> {
    DisplaySeparated { slice, sep }
}

/// Writes `slice` with `, ` between its elements.
pub fn comma_separated<T>(slice: &[T]) -> DisplaySeparated<'_, T> {
    DisplaySeparated { slice, sep: ", " }
}
