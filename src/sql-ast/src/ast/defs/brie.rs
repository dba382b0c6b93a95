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

//! Backup and restore to external storage.

use std::fmt;

use crate::ast::display::{self, AstDisplay, AstFormatter};
use crate::ast::visit::{accept_list, Visitor};
use crate::ast::{Ident, RestoreError, TableName};
use crate::redact::redact_storage_url;

/// Whether a [`BrieStmt`] backs up or restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrieKind {
    #[default]
    Backup,
    Restore,
}

/// A tunable of a [`BrieStmt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrieOptionName {
    Concurrency,
    Checksum,
    SendCredentialsToTikv,
    Online,
    RateLimit,
    Snapshot,
    LastBackup,
}

impl BrieOptionName {
    fn as_str(&self) -> &'static str {
        match self {
            BrieOptionName::Concurrency => "CONCURRENCY",
            BrieOptionName::Checksum => "CHECKSUM",
            BrieOptionName::SendCredentialsToTikv => "SEND_CREDENTIALS_TO_TIKV",
            BrieOptionName::Online => "ONLINE",
            BrieOptionName::RateLimit => "RATE_LIMIT",
            BrieOptionName::Snapshot => "SNAPSHOT",
            BrieOptionName::LastBackup => "LAST_BACKUP",
        }
    }
}

/// The value of a [`BrieOption`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BrieOptionValue {
    Uint(u64),
    String(String),
    /// A rate, in bytes per second.
    Rate(u64),
}

/// `NAME = value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrieOption {
    pub name: BrieOptionName,
    pub value: BrieOptionValue,
}

impl AstDisplay for BrieOption {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(self.name.as_str())?;
        f.write_str(" = ")?;
        match &self.value {
            BrieOptionValue::Uint(n) => f.write_str(n),
            BrieOptionValue::String(s) => f.write_string(s),
            BrieOptionValue::Rate(bytes_per_second) => {
                f.write_str(bytes_per_second / bytesize::MIB)?;
                f.write_str(" ")?;
                f.write_keyword("MB")?;
                f.write_str("/")?;
                f.write_keyword("SECOND")
            }
        }
    }
}

/// `BACKUP ... TO 'url'` or `RESTORE ... FROM 'url'`.
///
/// With neither `tables` nor `schemas` the statement covers every database.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrieStmt {
    pub kind: BrieKind,
    pub schemas: Vec<Ident>,
    pub tables: Vec<TableName>,
    /// The storage location, e.g. `s3://bucket/prefix?region=us-west-2`.
    pub storage: String,
    pub options: Vec<BrieOption>,
}

impl AstDisplay for BrieStmt {
    /// Sensitive storage parameters are replaced with a placeholder when
    /// redacting.
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(match self.kind {
            BrieKind::Backup => "BACKUP",
            BrieKind::Restore => "RESTORE",
        })?;
        f.write_str(" ")?;
        if !self.tables.is_empty() {
            f.write_keyword("TABLE")?;
            f.write_str(" ")?;
            f.write_node(&display::comma_separated(&self.tables))?;
        } else {
            f.write_keyword("DATABASE")?;
            f.write_str(" ")?;
            if self.schemas.is_empty() {
                f.write_str("*")?;
            } else {
                f.write_node(&display::comma_separated(&self.schemas))?;
            }
        }
        f.write_str(" ")?;
        f.write_keyword(match self.kind {
            BrieKind::Backup => "TO",
            BrieKind::Restore => "FROM",
        })?;
        f.write_str(" ")?;
        if f.is_redacting() {
            f.write_string(&redact_storage_url(&self.storage))?;
        } else {
            f.write_string(&self.storage)?;
        }
        for option in &self.options {
            f.write_str(" ")?;
            f.write_node(option)?;
        }
        Ok(())
    }
}
impl_display!(BrieStmt);

impl BrieStmt {
    /// Visits each table in order.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_list(&mut self.tables, visitor)
    }
}
