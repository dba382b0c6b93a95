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

//! SELECT statements, set operations, and table references.

use std::fmt;

use crate::ast::display::{self, AstDisplay, AstFormatter};
use crate::ast::hint::write_hints;
use crate::ast::visit::{accept_list, accept_opt, accept_slot, Accept, Visitor};
use crate::ast::{Expr, Ident, RestoreError, TableName, TableOptimizerHint};

/// A `SELECT` statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectStmt {
    pub hints: Vec<TableOptimizerHint>,
    pub distinct: bool,
    pub fields: Vec<SelectField>,
    pub from: Option<TableRef>,
    pub selection: Option<Expr>,
    pub group_by: Vec<ByItem>,
    pub having: Option<Expr>,
    pub order_by: Vec<ByItem>,
    pub limit: Option<Limit>,
    /// The operator joining this SELECT to the previous one in a
    /// [`SetOprStmt`].
    pub after_set_operator: Option<SetOprType>,
    /// Whether the statement is wrapped in parentheses.
    pub is_in_braces: bool,
}

impl AstDisplay for SelectStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        if self.is_in_braces {
            f.write_str("(")?;
        }
        f.write_keyword("SELECT")?;
        f.write_str(" ")?;
        write_hints(f, &self.hints)?;
        if self.distinct {
            f.write_keyword("DISTINCT")?;
            f.write_str(" ")?;
        }
        f.write_node(&display::comma_separated(&self.fields))?;
        if let Some(from) = &self.from {
            f.write_str(" ")?;
            f.write_keyword("FROM")?;
            f.write_str(" ")?;
            f.write_node(from)?;
        }
        write_where(f, self.selection.as_ref())?;
        if !self.group_by.is_empty() {
            f.write_str(" ")?;
            f.write_keyword("GROUP BY")?;
            f.write_str(" ")?;
            f.write_node(&display::comma_separated(&self.group_by))?;
        }
        if let Some(having) = &self.having {
            f.write_str(" ")?;
            f.write_keyword("HAVING")?;
            f.write_str(" ")?;
            f.write_node(having)?;
        }
        write_order_by_limit(f, &self.order_by, self.limit.as_ref())?;
        if self.is_in_braces {
            f.write_str(")")?;
        }
        Ok(())
    }
}
impl_display!(SelectStmt);

impl Accept for SelectStmt {
    /// Visits hints, fields, the FROM clause, WHERE, GROUP BY, HAVING,
    /// ORDER BY, then the LIMIT count and offset.
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_list(&mut self.hints, visitor)
            && accept_list(&mut self.fields, visitor)
            && accept_opt(&mut self.from, visitor)
            && accept_opt(&mut self.selection, visitor)
            && accept_list(&mut self.group_by, visitor)
            && accept_opt(&mut self.having, visitor)
            && accept_list(&mut self.order_by, visitor)
            && accept_limit(&mut self.limit, visitor)
    }
}

/// Writes ` WHERE expr`, if there is a filter.
pub(crate) fn write_where<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    selection: Option<&Expr>,
) -> Result<(), RestoreError> {
    if let Some(selection) = selection {
        f.write_str(" ")?;
        f.write_keyword("WHERE")?;
        f.write_str(" ")?;
        f.write_node(selection)?;
    }
    Ok(())
}

/// Writes the ` ORDER BY` and ` LIMIT` clauses that are present.
pub(crate) fn write_order_by_limit<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    order_by: &[ByItem],
    limit: Option<&Limit>,
) -> Result<(), RestoreError> {
    if !order_by.is_empty() {
        f.write_str(" ")?;
        f.write_keyword("ORDER BY")?;
        f.write_str(" ")?;
        f.write_node(&display::comma_separated(order_by))?;
    }
    if let Some(limit) = limit {
        f.write_str(" ")?;
        f.write_keyword("LIMIT")?;
        f.write_str(" ")?;
        f.write_node(limit)?;
    }
    Ok(())
}

pub(crate) fn accept_limit<V>(limit: &mut Option<Limit>, visitor: &mut V) -> bool
where
    V: Visitor + ?Sized,
{
    match limit {
        Some(limit) => {
            accept_slot(&mut limit.count, visitor) && accept_opt(&mut limit.offset, visitor)
        }
        None => true,
    }
}

/// A set operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOprType {
    Union,
    UnionAll,
    Except,
    Intersect,
}

impl AstDisplay for SetOprType {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(match self {
            SetOprType::Union => "UNION",
            SetOprType::UnionAll => "UNION ALL",
            SetOprType::Except => "EXCEPT",
            SetOprType::Intersect => "INTERSECT",
        })
    }
}

/// SELECTs combined with set operators, e.g. `UNION`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetOprStmt {
    /// The combined statements. Every statement but the first records the
    /// operator that precedes it in `after_set_operator`.
    pub selects: Vec<SelectStmt>,
    pub order_by: Vec<ByItem>,
    pub limit: Option<Limit>,
}

impl AstDisplay for SetOprStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        for (i, select) in self.selects.iter().enumerate() {
            if i > 0 {
                let Some(op) = &select.after_set_operator else {
                    return Err(RestoreError::internal(
                        "set operation",
                        format!("operand {} has no set operator", i),
                    ));
                };
                f.write_str(" ")?;
                f.write_node(op)?;
                f.write_str(" ")?;
            }
            f.write_node(select)?;
        }
        write_order_by_limit(f, &self.order_by, self.limit.as_ref())
    }
}
impl_display!(SetOprStmt);

/// A `LIMIT` clause.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Limit {
    pub count: Expr,
    pub offset: Option<Expr>,
}

impl AstDisplay for Limit {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_node(&self.count)?;
        if let Some(offset) = &self.offset {
            f.write_str(" ")?;
            f.write_keyword("OFFSET")?;
            f.write_str(" ")?;
            f.write_node(offset)?;
        }
        Ok(())
    }
}

/// An item in the projection of a SELECT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectField {
    /// `*`, or `table.*` when qualified.
    Wildcard(Option<TableName>),
    /// `expr [AS alias]`.
    Expr { expr: Expr, alias: Option<Ident> },
}

impl Default for SelectField {
    fn default() -> SelectField {
        SelectField::Wildcard(None)
    }
}

impl SelectField {
    /// Creates an unaliased field.
    pub fn expr(expr: Expr) -> SelectField {
        SelectField::Expr { expr, alias: None }
    }
}

impl AstDisplay for SelectField {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match self {
            SelectField::Wildcard(None) => f.write_str("*"),
            SelectField::Wildcard(Some(table)) => {
                f.write_node(table)?;
                f.write_str(".*")
            }
            SelectField::Expr { expr, alias } => {
                f.write_node(expr)?;
                if let Some(alias) = alias {
                    f.write_str(" ")?;
                    f.write_keyword("AS")?;
                    f.write_str(" ")?;
                    f.write_node(alias)?;
                }
                Ok(())
            }
        }
    }
}
impl_display!(SelectField);

impl Accept for SelectField {
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        match self {
            SelectField::Wildcard(table) => accept_opt(table, visitor),
            SelectField::Expr { expr, .. } => accept_slot(expr, visitor),
        }
    }
}

/// An item of an `ORDER BY` or `GROUP BY` list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByItem {
    pub expr: Expr,
    pub desc: bool,
}

impl AstDisplay for ByItem {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_node(&self.expr)?;
        if self.desc {
            f.write_str(" ")?;
            f.write_keyword("DESC")?;
        }
        Ok(())
    }
}
impl_display!(ByItem);

impl Accept for ByItem {
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_slot(&mut self.expr, visitor)
    }
}

/// A table reference in a FROM clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRef {
    /// A named table.
    Table {
        name: TableName,
        alias: Option<Ident>,
    },
    /// A parenthesized subquery.
    Derived {
        subquery: Box<SelectStmt>,
        alias: Option<Ident>,
    },
    /// A join of two table references.
    Join(Box<Join>),
}

impl Default for TableRef {
    fn default() -> TableRef {
        TableRef::table(TableName::default())
    }
}

impl TableRef {
    /// Creates an unaliased table reference.
    pub fn table(name: TableName) -> TableRef {
        TableRef::Table { name, alias: None }
    }
}

impl AstDisplay for TableRef {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        let alias = match self {
            TableRef::Table { name, alias } => {
                f.write_node(name)?;
                alias
            }
            TableRef::Derived { subquery, alias } => {
                f.write_str("(")?;
                f.write_node(subquery)?;
                f.write_str(")")?;
                alias
            }
            TableRef::Join(join) => return f.write_node(join),
        };
        if let Some(alias) = alias {
            f.write_str(" ")?;
            f.write_keyword("AS")?;
            f.write_str(" ")?;
            f.write_node(alias)?;
        }
        Ok(())
    }
}
impl_display!(TableRef);

impl Accept for TableRef {
    /// Joins visit their left side, right side, then the ON condition.
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        match self {
            TableRef::Table { name, .. } => accept_slot(name, visitor),
            TableRef::Derived { subquery, .. } => accept_slot(&mut **subquery, visitor),
            TableRef::Join(join) => {
                accept_slot(&mut join.left, visitor)
                    && accept_slot(&mut join.right, visitor)
                    && accept_opt(&mut join.on, visitor)
            }
        }
    }
}

/// A join of two table references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Join {
    pub left: TableRef,
    pub right: TableRef,
    pub kind: JoinKind,
    pub natural: bool,
    pub on: Option<Expr>,
    pub using: Vec<Ident>,
}

impl AstDisplay for Join {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_node(&self.left)?;
        f.write_str(" ")?;
        if self.natural {
            f.write_keyword("NATURAL")?;
            f.write_str(" ")?;
        }
        f.write_keyword(match self.kind {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Straight => "STRAIGHT_JOIN",
        })?;
        f.write_str(" ")?;
        if let TableRef::Join(_) = self.right {
            f.write_str("(")?;
            f.write_node(&self.right)?;
            f.write_str(")")?;
        } else {
            f.write_node(&self.right)?;
        }
        if let Some(on) = &self.on {
            f.write_str(" ")?;
            f.write_keyword("ON")?;
            f.write_str(" ")?;
            f.write_node(on)?;
        }
        if !self.using.is_empty() {
            f.write_str(" ")?;
            f.write_keyword("USING")?;
            f.write_str(" (")?;
            f.write_node(&display::comma_separated(&self.using))?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// The flavor of a [`Join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Straight,
}
