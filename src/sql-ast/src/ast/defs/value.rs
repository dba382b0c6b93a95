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

use std::fmt;

use crate::ast::display::{AstDisplay, AstFormatter};
use crate::ast::RestoreError;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// `NULL`.
    #[default]
    Null,
    /// `TRUE` or `FALSE`.
    Boolean(bool),
    /// A numeric literal, kept as written to preserve its precision.
    Number(String),
    /// A string literal, unescaped.
    String(String),
    /// A hexadecimal literal such as `X'0A'`, without the prefix and quotes.
    HexString(String),
    /// A bit literal such as `B'0101'`, without the prefix and quotes.
    BitString(String),
}

impl AstDisplay for Value {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match self {
            Value::Null => f.write_keyword("NULL"),
            Value::Boolean(true) => f.write_keyword("TRUE"),
            Value::Boolean(false) => f.write_keyword("FALSE"),
            Value::Number(n) => f.write_str(n),
            Value::String(s) => f.write_string(s),
            Value::HexString(s) => f.write_str(format_args!("X'{}'", s)),
            Value::BitString(s) => f.write_str(format_args!("B'{}'", s)),
        }
    }
}
impl_display!(Value);

/// A column or cast target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DataType {
    /// The type name, e.g. `INT` or `VARCHAR`.
    pub name: String,
    pub length: Option<u64>,
    pub decimals: Option<u64>,
    pub unsigned: bool,
    pub zerofill: bool,
    /// The members of an `ENUM` or `SET` type.
    pub elems: Vec<String>,
    pub charset: Option<String>,
    pub collate: Option<String>,
}

impl DataType {
    /// Creates a type with no modifiers.
    pub fn new<S: Into<String>>(name: S) -> DataType {
        DataType {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the display length.
    pub fn with_length(mut self, length: u64) -> DataType {
        self.length = Some(length);
        self
    }

    /// Marks the type as `UNSIGNED`.
    pub fn unsigned(mut self) -> DataType {
        self.unsigned = true;
        self
    }
}

impl AstDisplay for DataType {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(&self.name)?;
        if !self.elems.is_empty() {
            f.write_str("(")?;
            for (i, elem) in self.elems.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                f.write_string(elem)?;
            }
            f.write_str(")")?;
        } else if let Some(length) = self.length {
            f.write_str(format_args!("({}", length))?;
            if let Some(decimals) = self.decimals {
                f.write_str(format_args!(",{}", decimals))?;
            }
            f.write_str(")")?;
        }
        if self.unsigned {
            f.write_str(" ")?;
            f.write_keyword("UNSIGNED")?;
        }
        if self.zerofill {
            f.write_str(" ")?;
            f.write_keyword("ZEROFILL")?;
        }
        if let Some(charset) = &self.charset {
            f.write_str(" ")?;
            f.write_keyword("CHARACTER SET")?;
            f.write_str(" ")?;
            f.write_str(charset)?;
        }
        if let Some(collate) = &self.collate {
            f.write_str(" ")?;
            f.write_keyword("COLLATE")?;
            f.write_str(" ")?;
            f.write_str(collate)?;
        }
        Ok(())
    }
}
impl_display!(DataType);
