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

use crate::ast::display::{self, AstDisplay, AstFormatter};
use crate::ast::visit::{Accept, Visitor};
use crate::ast::RestoreError;

/// An identifier, stored as written with any quotes removed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ident(String);

impl Ident {
    /// Creates an identifier from its unquoted text.
    pub fn new<S>(s: S) -> Ident
    where
        S: Into<String>,
    {
        Ident(s.into())
    }

    /// Returns the unquoted text of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning its unquoted text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Ident {
    fn from(s: &str) -> Ident {
        Ident(s.into())
    }
}

impl From<String> for Ident {
    fn from(s: String) -> Ident {
        Ident(s)
    }
}

impl AstDisplay for Ident {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_name(&self.0)
    }
}
impl_display!(Ident);

/// A reference to a table, optionally qualified by its schema and narrowed
/// to specific partitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TableName {
    pub schema: Option<Ident>,
    pub name: Ident,
    pub partitions: Vec<Ident>,
}

impl TableName {
    /// Creates an unqualified table name.
    pub fn new<I: Into<Ident>>(name: I) -> TableName {
        TableName {
            schema: None,
            name: name.into(),
            partitions: vec![],
        }
    }

    /// Creates a schema-qualified table name.
    pub fn qualified<S: Into<Ident>, I: Into<Ident>>(schema: S, name: I) -> TableName {
        TableName {
            schema: Some(schema.into()),
            ..TableName::new(name)
        }
    }
}

impl AstDisplay for TableName {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        if let Some(schema) = &self.schema {
            f.write_node(schema)?;
            f.write_str(".")?;
        }
        f.write_node(&self.name)?;
        if !self.partitions.is_empty() {
            f.write_str(" ")?;
            f.write_keyword("PARTITION")?;
            f.write_str("(")?;
            f.write_node(&display::comma_separated(&self.partitions))?;
            f.write_str(")")?;
        }
        Ok(())
    }
}
impl_display!(TableName);

/// A possibly-qualified column reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ColumnName {
    pub schema: Option<Ident>,
    pub table: Option<Ident>,
    pub name: Ident,
}

impl ColumnName {
    /// Creates an unqualified column name.
    pub fn new<I: Into<Ident>>(name: I) -> ColumnName {
        ColumnName {
            schema: None,
            table: None,
            name: name.into(),
        }
    }

    /// Creates a column name qualified by its table.
    pub fn qualified<T: Into<Ident>, I: Into<Ident>>(table: T, name: I) -> ColumnName {
        ColumnName {
            table: Some(table.into()),
            ..ColumnName::new(name)
        }
    }
}

impl AstDisplay for ColumnName {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        if let Some(schema) = &self.schema {
            f.write_node(schema)?;
            f.write_str(".")?;
        }
        if let Some(table) = &self.table {
            f.write_node(table)?;
            f.write_str(".")?;
        }
        f.write_node(&self.name)
    }
}
impl_display!(ColumnName);

impl Accept for TableName {
    /// Table names have no child nodes.
    fn accept_children<V>(&mut self, _: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        true
    }
}
