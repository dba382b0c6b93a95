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

//! Data manipulation statements.

use std::fmt;

use crate::ast::display::{self, AstDisplay, AstFormatter};
use crate::ast::hint::write_hints;
use crate::ast::query::{accept_limit, write_order_by_limit, write_where};
use crate::ast::visit::{accept_list, accept_opt, accept_opt_boxed, accept_slot, Accept, Visitor};
use crate::ast::{
    ByItem, ColumnName, Expr, Ident, Limit, RestoreError, Statement, TableName,
    TableOptimizerHint, TableRef,
};

/// `column = expr` in a SET or ON DUPLICATE KEY UPDATE list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    pub column: ColumnName,
    pub expr: Expr,
}

impl AstDisplay for Assignment {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_node(&self.column)?;
        f.write_str("=")?;
        f.write_node(&self.expr)
    }
}
impl_display!(Assignment);

impl Accept for Assignment {
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_slot(&mut self.expr, visitor)
    }
}

/// `INSERT` or `REPLACE`.
///
/// Rows come from exactly one of `values`, `select`, or `setlist`. When all
/// three are empty the statement inserts a single row of defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InsertStmt {
    pub is_replace: bool,
    pub ignore: bool,
    pub table: TableName,
    pub columns: Vec<Ident>,
    pub values: Vec<Vec<Expr>>,
    pub select: Option<Box<Statement>>,
    pub setlist: Vec<Assignment>,
    pub on_duplicate: Vec<Assignment>,
}

impl AstDisplay for InsertStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(if self.is_replace { "REPLACE" } else { "INSERT" })?;
        f.write_str(" ")?;
        if self.ignore {
            f.write_keyword("IGNORE")?;
            f.write_str(" ")?;
        }
        f.write_keyword("INTO")?;
        f.write_str(" ")?;
        f.write_node(&self.table)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            f.write_node(&display::comma_separated(&self.columns))?;
            f.write_str(")")?;
        }
        if !self.values.is_empty() {
            f.write_str(" ")?;
            f.write_keyword("VALUES")?;
            f.write_str(" ")?;
            for (i, row) in self.values.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str("(")?;
                f.write_node(&display::comma_separated(row))?;
                f.write_str(")")?;
            }
        } else if let Some(select) = &self.select {
            f.write_str(" ")?;
            f.write_node(select)?;
        } else if !self.setlist.is_empty() {
            f.write_str(" ")?;
            f.write_keyword("SET")?;
            f.write_str(" ")?;
            f.write_node(&display::comma_separated(&self.setlist))?;
        } else {
            f.write_str(" ")?;
            f.write_keyword("VALUES")?;
            f.write_str(" ()")?;
        }
        if !self.on_duplicate.is_empty() {
            f.write_str(" ")?;
            f.write_keyword("ON DUPLICATE KEY UPDATE")?;
            f.write_str(" ")?;
            f.write_node(&display::comma_separated(&self.on_duplicate))?;
        }
        Ok(())
    }
}
impl_display!(InsertStmt);

impl InsertStmt {
    /// Visits the table, each row of values, the SELECT, the SET list, then
    /// the ON DUPLICATE KEY UPDATE list.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_slot(&mut self.table, visitor)
            && self
                .values
                .iter_mut()
                .all(|row| accept_list(row, visitor))
            && accept_opt_boxed(&mut self.select, visitor)
            && accept_list(&mut self.setlist, visitor)
            && accept_list(&mut self.on_duplicate, visitor)
    }
}

/// `UPDATE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateStmt {
    pub hints: Vec<TableOptimizerHint>,
    pub ignore: bool,
    pub table_refs: TableRef,
    pub assignments: Vec<Assignment>,
    pub selection: Option<Expr>,
    pub order_by: Vec<ByItem>,
    pub limit: Option<Limit>,
}

impl AstDisplay for UpdateStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("UPDATE")?;
        f.write_str(" ")?;
        write_hints(f, &self.hints)?;
        if self.ignore {
            f.write_keyword("IGNORE")?;
            f.write_str(" ")?;
        }
        f.write_node(&self.table_refs)?;
        f.write_str(" ")?;
        f.write_keyword("SET")?;
        f.write_str(" ")?;
        f.write_node(&display::comma_separated(&self.assignments))?;
        write_where(f, self.selection.as_ref())?;
        write_order_by_limit(f, &self.order_by, self.limit.as_ref())
    }
}
impl_display!(UpdateStmt);

impl UpdateStmt {
    /// Visits hints, the table references, assignments, WHERE, ORDER BY,
    /// then LIMIT.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_list(&mut self.hints, visitor)
            && accept_slot(&mut self.table_refs, visitor)
            && accept_list(&mut self.assignments, visitor)
            && accept_opt(&mut self.selection, visitor)
            && accept_list(&mut self.order_by, visitor)
            && accept_limit(&mut self.limit, visitor)
    }
}

/// `DELETE`.
///
/// A non-empty `tables` list makes this a multi-table delete, written either
/// as `DELETE t1, t2 FROM refs` (`before_from`) or
/// `DELETE FROM t1, t2 USING refs`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteStmt {
    pub hints: Vec<TableOptimizerHint>,
    pub ignore: bool,
    pub tables: Vec<TableName>,
    pub before_from: bool,
    pub table_refs: TableRef,
    pub selection: Option<Expr>,
    pub order_by: Vec<ByItem>,
    pub limit: Option<Limit>,
}

impl AstDisplay for DeleteStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("DELETE")?;
        f.write_str(" ")?;
        write_hints(f, &self.hints)?;
        if self.ignore {
            f.write_keyword("IGNORE")?;
            f.write_str(" ")?;
        }
        if self.tables.is_empty() {
            f.write_keyword("FROM")?;
            f.write_str(" ")?;
            f.write_node(&self.table_refs)?;
        } else if self.before_from {
            f.write_node(&display::comma_separated(&self.tables))?;
            f.write_str(" ")?;
            f.write_keyword("FROM")?;
            f.write_str(" ")?;
            f.write_node(&self.table_refs)?;
        } else {
            f.write_keyword("FROM")?;
            f.write_str(" ")?;
            f.write_node(&display::comma_separated(&self.tables))?;
            f.write_str(" ")?;
            f.write_keyword("USING")?;
            f.write_str(" ")?;
            f.write_node(&self.table_refs)?;
        }
        write_where(f, self.selection.as_ref())?;
        write_order_by_limit(f, &self.order_by, self.limit.as_ref())
    }
}
impl_display!(DeleteStmt);

impl DeleteStmt {
    /// Visits hints, the target tables, the table references, WHERE,
    /// ORDER BY, then LIMIT.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_list(&mut self.hints, visitor)
            && accept_list(&mut self.tables, visitor)
            && accept_slot(&mut self.table_refs, visitor)
            && accept_opt(&mut self.selection, visitor)
            && accept_list(&mut self.order_by, visitor)
            && accept_limit(&mut self.limit, visitor)
    }
}

/// How duplicate keys are handled by [`LoadDataStmt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OnDuplicate {
    #[default]
    Error,
    Replace,
    Ignore,
}

/// The `FIELDS` clause of [`LoadDataStmt`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldsClause {
    pub terminated: Option<String>,
    pub enclosed: Option<String>,
    pub escaped: Option<String>,
}

/// The `LINES` clause of [`LoadDataStmt`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinesClause {
    pub starting: Option<String>,
    pub terminated: Option<String>,
}

/// `LOAD DATA [LOCAL] INFILE 'path' INTO TABLE t ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadDataStmt {
    pub local: bool,
    pub path: String,
    pub on_duplicate: OnDuplicate,
    pub table: TableName,
    pub fields: Option<FieldsClause>,
    pub lines: Option<LinesClause>,
    pub ignore_lines: u64,
    pub columns: Vec<ColumnName>,
    pub setlist: Vec<Assignment>,
}

fn write_by<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    keyword: &str,
    value: Option<&String>,
) -> Result<(), RestoreError> {
    if let Some(value) = value {
        f.write_str(" ")?;
        f.write_keyword(keyword)?;
        f.write_str(" ")?;
        f.write_string(value)?;
    }
    Ok(())
}

impl AstDisplay for LoadDataStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("LOAD DATA")?;
        f.write_str(" ")?;
        if self.local {
            f.write_keyword("LOCAL")?;
            f.write_str(" ")?;
        }
        f.write_keyword("INFILE")?;
        f.write_str(" ")?;
        f.write_string(&self.path)?;
        f.write_str(" ")?;
        match self.on_duplicate {
            OnDuplicate::Error => {}
            OnDuplicate::Replace => {
                f.write_keyword("REPLACE")?;
                f.write_str(" ")?;
            }
            OnDuplicate::Ignore => {
                f.write_keyword("IGNORE")?;
                f.write_str(" ")?;
            }
        }
        f.write_keyword("INTO TABLE")?;
        f.write_str(" ")?;
        f.write_node(&self.table)?;
        if let Some(fields) = &self.fields {
            f.write_str(" ")?;
            f.write_keyword("FIELDS")?;
            write_by(f, "TERMINATED BY", fields.terminated.as_ref())?;
            write_by(f, "ENCLOSED BY", fields.enclosed.as_ref())?;
            write_by(f, "ESCAPED BY", fields.escaped.as_ref())?;
        }
        if let Some(lines) = &self.lines {
            f.write_str(" ")?;
            f.write_keyword("LINES")?;
            write_by(f, "STARTING BY", lines.starting.as_ref())?;
            write_by(f, "TERMINATED BY", lines.terminated.as_ref())?;
        }
        if self.ignore_lines > 0 {
            f.write_str(" ")?;
            f.write_keyword("IGNORE")?;
            f.write_str(format_args!(" {} ", self.ignore_lines))?;
            f.write_keyword("LINES")?;
        }
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            f.write_node(&display::comma_separated(&self.columns))?;
            f.write_str(")")?;
        }
        if !self.setlist.is_empty() {
            f.write_str(" ")?;
            f.write_keyword("SET")?;
            f.write_str(" ")?;
            f.write_node(&display::comma_separated(&self.setlist))?;
        }
        Ok(())
    }
}
impl_display!(LoadDataStmt);

impl LoadDataStmt {
    /// Visits the table, then the SET list.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_slot(&mut self.table, visitor) && accept_list(&mut self.setlist, visitor)
    }
}
