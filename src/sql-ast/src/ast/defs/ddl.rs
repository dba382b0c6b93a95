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

//! Data definition statements.

use std::fmt;

use crate::ast::display::{self, AstDisplay, AstFormatter};
use crate::ast::visit::{accept_list, accept_opt, accept_opt_boxed, accept_slot, Accept, Visitor};
use crate::ast::{DataType, Expr, Ident, RestoreError, Statement, TableName};

fn write_if_not_exists<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    if_not_exists: bool,
) -> Result<(), RestoreError> {
    if if_not_exists {
        f.write_keyword("IF NOT EXISTS")?;
        f.write_str(" ")?;
    }
    Ok(())
}

fn write_if_exists<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    if_exists: bool,
) -> Result<(), RestoreError> {
    if if_exists {
        f.write_keyword("IF EXISTS")?;
        f.write_str(" ")?;
    }
    Ok(())
}

/// An option of `CREATE DATABASE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseOption {
    Charset(String),
    Collate(String),
}

impl AstDisplay for DatabaseOption {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        let (keyword, value) = match self {
            DatabaseOption::Charset(charset) => ("CHARACTER SET", charset),
            DatabaseOption::Collate(collate) => ("COLLATE", collate),
        };
        f.write_keyword(keyword)?;
        f.write_str(" = ")?;
        f.write_str(value)
    }
}

/// `CREATE DATABASE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateDatabaseStmt {
    pub if_not_exists: bool,
    pub name: Ident,
    pub options: Vec<DatabaseOption>,
}

impl AstDisplay for CreateDatabaseStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("CREATE DATABASE")?;
        f.write_str(" ")?;
        write_if_not_exists(f, self.if_not_exists)?;
        f.write_node(&self.name)?;
        for option in &self.options {
            f.write_str(" ")?;
            f.write_node(option)?;
        }
        Ok(())
    }
}
impl_display!(CreateDatabaseStmt);

/// `DROP DATABASE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropDatabaseStmt {
    pub if_exists: bool,
    pub name: Ident,
}

impl AstDisplay for DropDatabaseStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("DROP DATABASE")?;
        f.write_str(" ")?;
        write_if_exists(f, self.if_exists)?;
        f.write_node(&self.name)
    }
}
impl_display!(DropDatabaseStmt);

/// An attribute of a column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOption {
    NotNull,
    Null,
    Default(Expr),
    AutoIncrement,
    PrimaryKey,
    UniqueKey,
    Comment(String),
    OnUpdate(Expr),
    Collate(String),
    Check { expr: Expr, enforced: bool },
}

impl AstDisplay for ColumnOption {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match self {
            ColumnOption::NotNull => f.write_keyword("NOT NULL"),
            ColumnOption::Null => f.write_keyword("NULL"),
            ColumnOption::Default(expr) => {
                f.write_keyword("DEFAULT")?;
                f.write_str(" ")?;
                f.write_node(expr)
            }
            ColumnOption::AutoIncrement => f.write_keyword("AUTO_INCREMENT"),
            ColumnOption::PrimaryKey => f.write_keyword("PRIMARY KEY"),
            ColumnOption::UniqueKey => f.write_keyword("UNIQUE KEY"),
            ColumnOption::Comment(comment) => {
                f.write_keyword("COMMENT")?;
                f.write_str(" ")?;
                f.write_string(comment)
            }
            ColumnOption::OnUpdate(expr) => {
                f.write_keyword("ON UPDATE")?;
                f.write_str(" ")?;
                f.write_node(expr)
            }
            ColumnOption::Collate(collate) => {
                f.write_keyword("COLLATE")?;
                f.write_str(" ")?;
                f.write_str(collate)
            }
            ColumnOption::Check { expr, enforced } => write_check(f, expr, *enforced),
        }
    }
}

fn write_check<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    expr: &Expr,
    enforced: bool,
) -> Result<(), RestoreError> {
    f.write_keyword("CHECK")?;
    f.write_str("(")?;
    f.write_node(expr)?;
    f.write_str(") ")?;
    f.write_keyword(if enforced { "ENFORCED" } else { "NOT ENFORCED" })
}

/// A column in `CREATE TABLE` or `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnDef {
    pub name: Ident,
    pub data_type: DataType,
    pub options: Vec<ColumnOption>,
}

impl ColumnDef {
    /// Creates a column with no options.
    pub fn new<I: Into<Ident>>(name: I, data_type: DataType) -> ColumnDef {
        ColumnDef {
            name: name.into(),
            data_type,
            options: vec![],
        }
    }
}

impl AstDisplay for ColumnDef {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_node(&self.name)?;
        f.write_str(" ")?;
        f.write_node(&self.data_type)?;
        for option in &self.options {
            f.write_str(" ")?;
            f.write_node(option)?;
        }
        Ok(())
    }
}
impl_display!(ColumnDef);

impl Accept for ColumnDef {
    /// Visits the expressions of the column's options in order.
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        self.options.iter_mut().all(|option| match option {
            ColumnOption::Default(expr)
            | ColumnOption::OnUpdate(expr)
            | ColumnOption::Check { expr, .. } => accept_slot(expr, visitor),
            _ => true,
        })
    }
}

/// A column of an index or key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexPartSpec {
    pub column: Ident,
    /// The prefix length to index.
    pub length: Option<u64>,
    pub desc: bool,
}

impl IndexPartSpec {
    /// Creates a key part covering the whole column in ascending order.
    pub fn new<I: Into<Ident>>(column: I) -> IndexPartSpec {
        IndexPartSpec {
            column: column.into(),
            ..Default::default()
        }
    }
}

impl AstDisplay for IndexPartSpec {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_node(&self.column)?;
        if let Some(length) = self.length {
            f.write_str(format_args!("({})", length))?;
        }
        if self.desc {
            f.write_str(" ")?;
            f.write_keyword("DESC")?;
        }
        Ok(())
    }
}

/// An action taken on referencing rows when a referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceAction {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
    SetDefault,
}

impl AstDisplay for ReferenceAction {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(match self {
            ReferenceAction::Restrict => "RESTRICT",
            ReferenceAction::Cascade => "CASCADE",
            ReferenceAction::SetNull => "SET NULL",
            ReferenceAction::NoAction => "NO ACTION",
            ReferenceAction::SetDefault => "SET DEFAULT",
        })
    }
}

/// The `REFERENCES` clause of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceDef {
    pub table: TableName,
    pub columns: Vec<Ident>,
    pub on_delete: Option<ReferenceAction>,
    pub on_update: Option<ReferenceAction>,
}

impl AstDisplay for ReferenceDef {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("REFERENCES")?;
        f.write_str(" ")?;
        f.write_node(&self.table)?;
        f.write_str("(")?;
        f.write_node(&display::comma_separated(&self.columns))?;
        f.write_str(")")?;
        if let Some(action) = &self.on_delete {
            f.write_str(" ")?;
            f.write_keyword("ON DELETE")?;
            f.write_str(" ")?;
            f.write_node(action)?;
        }
        if let Some(action) = &self.on_update {
            f.write_str(" ")?;
            f.write_keyword("ON UPDATE")?;
            f.write_str(" ")?;
            f.write_node(action)?;
        }
        Ok(())
    }
}

/// What a table constraint enforces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConstraintKind {
    #[default]
    PrimaryKey,
    Index,
    Unique,
    Fulltext,
    ForeignKey(ReferenceDef),
    Check { expr: Expr, enforced: bool },
}

/// A table-level constraint or index definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Constraint {
    pub name: Option<Ident>,
    pub kind: ConstraintKind,
    pub keys: Vec<IndexPartSpec>,
}

impl Constraint {
    fn write_keys<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_str("(")?;
        f.write_node(&display::comma_separated(&self.keys))?;
        f.write_str(")")
    }

    /// Indexes carry their name after the keyword.
    fn write_index<W: fmt::Write>(
        &self,
        f: &mut AstFormatter<W>,
        keyword: &str,
    ) -> Result<(), RestoreError> {
        f.write_keyword(keyword)?;
        if let Some(name) = &self.name {
            f.write_str(" ")?;
            f.write_node(name)?;
        }
        self.write_keys(f)
    }

    fn write_constraint_name<W: fmt::Write>(
        &self,
        f: &mut AstFormatter<W>,
    ) -> Result<(), RestoreError> {
        f.write_keyword("CONSTRAINT")?;
        f.write_str(" ")?;
        if let Some(name) = &self.name {
            f.write_node(name)?;
            f.write_str(" ")?;
        }
        Ok(())
    }
}

impl AstDisplay for Constraint {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match &self.kind {
            ConstraintKind::Index => self.write_index(f, "INDEX"),
            ConstraintKind::Unique => self.write_index(f, "UNIQUE KEY"),
            ConstraintKind::Fulltext => self.write_index(f, "FULLTEXT KEY"),
            ConstraintKind::PrimaryKey => {
                if self.name.is_some() {
                    self.write_constraint_name(f)?;
                }
                f.write_keyword("PRIMARY KEY")?;
                self.write_keys(f)
            }
            ConstraintKind::ForeignKey(reference) => {
                self.write_constraint_name(f)?;
                f.write_keyword("FOREIGN KEY")?;
                f.write_str(" ")?;
                self.write_keys(f)?;
                f.write_str(" ")?;
                f.write_node(reference)
            }
            ConstraintKind::Check { expr, enforced } => {
                self.write_constraint_name(f)?;
                write_check(f, expr, *enforced)
            }
        }
    }
}
impl_display!(Constraint);

impl Accept for Constraint {
    /// Visits the referenced table of a foreign key or the expression of a
    /// check constraint.
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        match &mut self.kind {
            ConstraintKind::ForeignKey(reference) => accept_slot(&mut reference.table, visitor),
            ConstraintKind::Check { expr, .. } => accept_slot(expr, visitor),
            _ => true,
        }
    }
}

/// An option of `CREATE TABLE` or `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOption {
    Engine(String),
    Charset(String),
    Collate(String),
    AutoIncrement(u64),
    Comment(String),
}

impl AstDisplay for TableOption {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match self {
            TableOption::Engine(engine) => {
                f.write_keyword("ENGINE")?;
                f.write_str(" = ")?;
                f.write_str(engine)
            }
            TableOption::Charset(charset) => {
                f.write_keyword("DEFAULT CHARACTER SET")?;
                f.write_str(" = ")?;
                f.write_str(charset)
            }
            TableOption::Collate(collate) => {
                f.write_keyword("DEFAULT COLLATE")?;
                f.write_str(" = ")?;
                f.write_str(collate)
            }
            TableOption::AutoIncrement(n) => {
                f.write_keyword("AUTO_INCREMENT")?;
                f.write_str(format_args!(" = {}", n))
            }
            TableOption::Comment(comment) => {
                f.write_keyword("COMMENT")?;
                f.write_str(" = ")?;
                f.write_string(comment)
            }
        }
    }
}

/// `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateTableStmt {
    pub if_not_exists: bool,
    pub temporary: bool,
    pub table: TableName,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<Constraint>,
    pub options: Vec<TableOption>,
    /// The table whose definition is copied by `CREATE TABLE ... LIKE`.
    pub like: Option<TableName>,
    /// The query that populates the table in `CREATE TABLE ... AS`.
    pub select: Option<Box<Statement>>,
}

impl AstDisplay for CreateTableStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("CREATE")?;
        f.write_str(" ")?;
        if self.temporary {
            f.write_keyword("TEMPORARY")?;
            f.write_str(" ")?;
        }
        f.write_keyword("TABLE")?;
        f.write_str(" ")?;
        write_if_not_exists(f, self.if_not_exists)?;
        f.write_node(&self.table)?;
        if let Some(like) = &self.like {
            f.write_str(" ")?;
            f.write_keyword("LIKE")?;
            f.write_str(" ")?;
            return f.write_node(like);
        }
        if !self.columns.is_empty() || !self.constraints.is_empty() {
            f.write_str(" (")?;
            f.write_node(&display::comma_separated(&self.columns))?;
            if !self.columns.is_empty() && !self.constraints.is_empty() {
                f.write_str(", ")?;
            }
            f.write_node(&display::comma_separated(&self.constraints))?;
            f.write_str(")")?;
        }
        for option in &self.options {
            f.write_str(" ")?;
            f.write_node(option)?;
        }
        if let Some(select) = &self.select {
            f.write_str(" ")?;
            f.write_keyword("AS")?;
            f.write_str(" ")?;
            f.write_node(select)?;
        }
        Ok(())
    }
}
impl_display!(CreateTableStmt);

impl CreateTableStmt {
    /// Visits the table, columns, constraints, the LIKE table, then the
    /// populating query.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_slot(&mut self.table, visitor)
            && accept_list(&mut self.columns, visitor)
            && accept_list(&mut self.constraints, visitor)
            && accept_opt(&mut self.like, visitor)
            && accept_opt_boxed(&mut self.select, visitor)
    }
}

/// `DROP TABLE` or `DROP VIEW`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropTableStmt {
    pub if_exists: bool,
    pub is_view: bool,
    pub temporary: bool,
    pub tables: Vec<TableName>,
}

impl AstDisplay for DropTableStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("DROP")?;
        f.write_str(" ")?;
        if self.temporary {
            f.write_keyword("TEMPORARY")?;
            f.write_str(" ")?;
        }
        f.write_keyword(if self.is_view { "VIEW" } else { "TABLE" })?;
        f.write_str(" ")?;
        write_if_exists(f, self.if_exists)?;
        f.write_node(&display::comma_separated(&self.tables))
    }
}
impl_display!(DropTableStmt);

/// `TRUNCATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TruncateTableStmt {
    pub table: TableName,
}

impl AstDisplay for TruncateTableStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("TRUNCATE TABLE")?;
        f.write_str(" ")?;
        f.write_node(&self.table)
    }
}
impl_display!(TruncateTableStmt);

/// One `old TO new` pair of `RENAME TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableToTable {
    pub old: TableName,
    pub new: TableName,
}

impl AstDisplay for TableToTable {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_node(&self.old)?;
        f.write_str(" ")?;
        f.write_keyword("TO")?;
        f.write_str(" ")?;
        f.write_node(&self.new)
    }
}

/// `RENAME TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenameTableStmt {
    pub pairs: Vec<TableToTable>,
}

impl AstDisplay for RenameTableStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("RENAME TABLE")?;
        f.write_str(" ")?;
        f.write_node(&display::comma_separated(&self.pairs))
    }
}
impl_display!(RenameTableStmt);

impl RenameTableStmt {
    /// Visits the old then the new name of each pair.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        self.pairs.iter_mut().all(|pair| {
            accept_slot(&mut pair.old, visitor) && accept_slot(&mut pair.new, visitor)
        })
    }
}

/// The flavor of an index created by `CREATE INDEX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexKind {
    #[default]
    Plain,
    Unique,
    Fulltext,
    Spatial,
}

/// `CREATE INDEX`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateIndexStmt {
    pub kind: IndexKind,
    pub if_not_exists: bool,
    pub name: Ident,
    pub table: TableName,
    pub parts: Vec<IndexPartSpec>,
}

impl AstDisplay for CreateIndexStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("CREATE")?;
        f.write_str(" ")?;
        match self.kind {
            IndexKind::Plain => {}
            IndexKind::Unique => {
                f.write_keyword("UNIQUE")?;
                f.write_str(" ")?;
            }
            IndexKind::Fulltext => {
                f.write_keyword("FULLTEXT")?;
                f.write_str(" ")?;
            }
            IndexKind::Spatial => {
                f.write_keyword("SPATIAL")?;
                f.write_str(" ")?;
            }
        }
        f.write_keyword("INDEX")?;
        f.write_str(" ")?;
        write_if_not_exists(f, self.if_not_exists)?;
        f.write_node(&self.name)?;
        f.write_str(" ")?;
        f.write_keyword("ON")?;
        f.write_str(" ")?;
        f.write_node(&self.table)?;
        f.write_str(" (")?;
        f.write_node(&display::comma_separated(&self.parts))?;
        f.write_str(")")
    }
}
impl_display!(CreateIndexStmt);

/// `DROP INDEX`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropIndexStmt {
    pub if_exists: bool,
    pub name: Ident,
    pub table: TableName,
}

impl AstDisplay for DropIndexStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("DROP INDEX")?;
        f.write_str(" ")?;
        write_if_exists(f, self.if_exists)?;
        f.write_node(&self.name)?;
        f.write_str(" ")?;
        f.write_keyword("ON")?;
        f.write_str(" ")?;
        f.write_node(&self.table)
    }
}
impl_display!(DropIndexStmt);

/// Where `ALTER TABLE` places a new or modified column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPosition {
    First,
    After(Ident),
}

impl AstDisplay for ColumnPosition {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match self {
            ColumnPosition::First => f.write_keyword("FIRST"),
            ColumnPosition::After(column) => {
                f.write_keyword("AFTER")?;
                f.write_str(" ")?;
                f.write_node(column)
            }
        }
    }
}

fn write_position<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    position: Option<&ColumnPosition>,
) -> Result<(), RestoreError> {
    if let Some(position) = position {
        f.write_str(" ")?;
        f.write_node(position)?;
    }
    Ok(())
}

/// One change made by `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterTableSpec {
    /// `ADD COLUMN`, for one column or a parenthesized list.
    AddColumns {
        columns: Vec<ColumnDef>,
        constraints: Vec<Constraint>,
        position: Option<ColumnPosition>,
    },
    AddConstraint(Constraint),
    DropColumn(Ident),
    DropIndex(Ident),
    DropPrimaryKey,
    ModifyColumn {
        column: ColumnDef,
        position: Option<ColumnPosition>,
    },
    ChangeColumn {
        old: Ident,
        column: ColumnDef,
        position: Option<ColumnPosition>,
    },
    RenameColumn {
        old: Ident,
        new: Ident,
    },
    RenameTable(TableName),
    Options(Vec<TableOption>),
}

impl AstDisplay for AlterTableSpec {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match self {
            AlterTableSpec::AddColumns {
                columns,
                constraints,
                position,
            } => {
                f.write_keyword("ADD COLUMN")?;
                f.write_str(" ")?;
                if let ([column], []) = (columns.as_slice(), constraints.as_slice()) {
                    f.write_node(column)?;
                    return write_position(f, position.as_ref());
                }
                f.write_str("(")?;
                f.write_node(&display::comma_separated(columns))?;
                if !columns.is_empty() && !constraints.is_empty() {
                    f.write_str(", ")?;
                }
                f.write_node(&display::comma_separated(constraints))?;
                f.write_str(")")
            }
            AlterTableSpec::AddConstraint(constraint) => {
                f.write_keyword("ADD")?;
                f.write_str(" ")?;
                f.write_node(constraint)
            }
            AlterTableSpec::DropColumn(column) => {
                f.write_keyword("DROP COLUMN")?;
                f.write_str(" ")?;
                f.write_node(column)
            }
            AlterTableSpec::DropIndex(index) => {
                f.write_keyword("DROP INDEX")?;
                f.write_str(" ")?;
                f.write_node(index)
            }
            AlterTableSpec::DropPrimaryKey => f.write_keyword("DROP PRIMARY KEY"),
            AlterTableSpec::ModifyColumn { column, position } => {
                f.write_keyword("MODIFY COLUMN")?;
                f.write_str(" ")?;
                f.write_node(column)?;
                write_position(f, position.as_ref())
            }
            AlterTableSpec::ChangeColumn {
                old,
                column,
                position,
            } => {
                f.write_keyword("CHANGE COLUMN")?;
                f.write_str(" ")?;
                f.write_node(old)?;
                f.write_str(" ")?;
                f.write_node(column)?;
                write_position(f, position.as_ref())
            }
            AlterTableSpec::RenameColumn { old, new } => {
                f.write_keyword("RENAME COLUMN")?;
                f.write_str(" ")?;
                f.write_node(old)?;
                f.write_str(" ")?;
                f.write_keyword("TO")?;
                f.write_str(" ")?;
                f.write_node(new)
            }
            AlterTableSpec::RenameTable(table) => {
                f.write_keyword("RENAME AS")?;
                f.write_str(" ")?;
                f.write_node(table)
            }
            AlterTableSpec::Options(options) => {
                f.write_node(&display::separated(options, " "))
            }
        }
    }
}

/// `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterTableStmt {
    pub table: TableName,
    pub specs: Vec<AlterTableSpec>,
}

impl AstDisplay for AlterTableStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("ALTER TABLE")?;
        f.write_str(" ")?;
        f.write_node(&self.table)?;
        if !self.specs.is_empty() {
            f.write_str(" ")?;
            f.write_node(&display::comma_separated(&self.specs))?;
        }
        Ok(())
    }
}
impl_display!(AlterTableStmt);

impl AlterTableStmt {
    /// Visits the table, then the columns, constraints, and table names of
    /// each spec in order.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        if !accept_slot(&mut self.table, visitor) {
            return false;
        }
        self.specs.iter_mut().all(|spec| match spec {
            AlterTableSpec::AddColumns {
                columns,
                constraints,
                ..
            } => accept_list(columns, visitor) && accept_list(constraints, visitor),
            AlterTableSpec::AddConstraint(constraint) => accept_slot(constraint, visitor),
            AlterTableSpec::ModifyColumn { column, .. }
            | AlterTableSpec::ChangeColumn { column, .. } => accept_slot(column, visitor),
            AlterTableSpec::RenameTable(table) => accept_slot(table, visitor),
            AlterTableSpec::DropColumn(_)
            | AlterTableSpec::DropIndex(_)
            | AlterTableSpec::DropPrimaryKey
            | AlterTableSpec::RenameColumn { .. }
            | AlterTableSpec::Options(_) => true,
        })
    }
}
