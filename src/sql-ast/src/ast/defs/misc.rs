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

//! Session, transaction, and administrative statements.

use std::fmt;

use crate::ast::display::{self, AstDisplay, AstFormatter};
use crate::ast::visit::{
    accept_list, accept_opt, accept_opt_boxed, accept_slot, Accept, Visitor,
};
use crate::ast::{Expr, Ident, RestoreError, Statement, TableName, UserIdentity};

/// The transaction mode requested by `BEGIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxnMode {
    Pessimistic,
    Optimistic,
}

/// `BEGIN` or `START TRANSACTION`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BeginStmt {
    pub mode: Option<TxnMode>,
    pub read_only: bool,
}

impl AstDisplay for BeginStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match self.mode {
            Some(TxnMode::Pessimistic) => f.write_keyword("BEGIN PESSIMISTIC"),
            Some(TxnMode::Optimistic) => f.write_keyword("BEGIN OPTIMISTIC"),
            None if self.read_only => f.write_keyword("START TRANSACTION READ ONLY"),
            None => f.write_keyword("START TRANSACTION"),
        }
    }
}
impl_display!(BeginStmt);

/// What happens after a transaction ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompletionType {
    #[default]
    Default,
    Chain,
    Release,
}

impl CompletionType {
    fn write_suffix<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        let keyword = match self {
            CompletionType::Default => return Ok(()),
            CompletionType::Chain => "AND CHAIN",
            CompletionType::Release => "RELEASE",
        };
        f.write_str(" ")?;
        f.write_keyword(keyword)
    }
}

/// `COMMIT`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitStmt {
    pub completion: CompletionType,
}

impl AstDisplay for CommitStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("COMMIT")?;
        self.completion.write_suffix(f)
    }
}
impl_display!(CommitStmt);

/// `ROLLBACK`, optionally to a savepoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RollbackStmt {
    pub completion: CompletionType,
    pub savepoint: Option<Ident>,
}

impl AstDisplay for RollbackStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("ROLLBACK")?;
        if let Some(savepoint) = &self.savepoint {
            f.write_str(" ")?;
            f.write_keyword("TO")?;
            f.write_str(" ")?;
            return f.write_node(savepoint);
        }
        self.completion.write_suffix(f)
    }
}
impl_display!(RollbackStmt);

/// `USE db`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UseStmt {
    pub db: Ident,
}

impl AstDisplay for UseStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("USE")?;
        f.write_str(" ")?;
        f.write_node(&self.db)
    }
}
impl_display!(UseStmt);

/// The target of a [`VariableAssignment`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VariableKind {
    /// A user variable, `@name`.
    #[default]
    User,
    /// A system variable in global or session scope.
    System { global: bool },
    /// `NAMES charset [COLLATE collation]`.
    Names { collate: Option<String> },
    /// `CHARACTER SET charset`.
    Charset,
}

/// One assignment of a `SET` statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableAssignment {
    /// The variable name. Unused for `NAMES` and `CHARACTER SET`.
    pub name: String,
    pub value: Expr,
    pub kind: VariableKind,
}

impl AstDisplay for VariableAssignment {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match &self.kind {
            VariableKind::User => {
                f.write_str("@")?;
                f.write_name(&self.name)?;
                f.write_str("=")?;
                f.write_node(&self.value)
            }
            VariableKind::System { global } => {
                f.write_str("@@")?;
                f.write_keyword(if *global { "GLOBAL" } else { "SESSION" })?;
                f.write_str(".")?;
                f.write_str(&self.name)?;
                f.write_str("=")?;
                f.write_node(&self.value)
            }
            VariableKind::Names { collate } => {
                f.write_keyword("NAMES")?;
                f.write_str(" ")?;
                f.write_node(&self.value)?;
                if let Some(collate) = collate {
                    f.write_str(" ")?;
                    f.write_keyword("COLLATE")?;
                    f.write_str(" ")?;
                    f.write_string(collate)?;
                }
                Ok(())
            }
            VariableKind::Charset => {
                f.write_keyword("CHARACTER SET")?;
                f.write_str(" ")?;
                f.write_node(&self.value)
            }
        }
    }
}
impl_display!(VariableAssignment);

impl Accept for VariableAssignment {
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_slot(&mut self.value, visitor)
    }
}

/// `SET assignment, ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetStmt {
    pub variables: Vec<VariableAssignment>,
}

impl AstDisplay for SetStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("SET")?;
        f.write_str(" ")?;
        f.write_node(&display::comma_separated(&self.variables))
    }
}
impl_display!(SetStmt);

/// `PREPARE name FROM 'text'` or `PREPARE name FROM @var`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrepareStmt {
    pub name: Ident,
    pub sql_text: String,
    /// The variable holding the statement text, if it was not given inline.
    pub sql_var: Option<Expr>,
}

impl AstDisplay for PrepareStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("PREPARE")?;
        f.write_str(" ")?;
        f.write_node(&self.name)?;
        f.write_str(" ")?;
        f.write_keyword("FROM")?;
        f.write_str(" ")?;
        match &self.sql_var {
            Some(var) => f.write_node(var),
            None => f.write_string(&self.sql_text),
        }
    }
}
impl_display!(PrepareStmt);

/// `EXECUTE name [USING @var, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecuteStmt {
    pub name: Ident,
    pub using_vars: Vec<Expr>,
}

impl AstDisplay for ExecuteStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("EXECUTE")?;
        f.write_str(" ")?;
        f.write_node(&self.name)?;
        if !self.using_vars.is_empty() {
            f.write_str(" ")?;
            f.write_keyword("USING")?;
            f.write_str(" ")?;
            f.write_node(&display::comma_separated(&self.using_vars))?;
        }
        Ok(())
    }
}
impl_display!(ExecuteStmt);

/// `DEALLOCATE PREPARE name`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeallocateStmt {
    pub name: Ident,
}

impl AstDisplay for DeallocateStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("DEALLOCATE PREPARE")?;
        f.write_str(" ")?;
        f.write_node(&self.name)
    }
}
impl_display!(DeallocateStmt);

/// `DO expr, ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DoStmt {
    pub exprs: Vec<Expr>,
}

impl AstDisplay for DoStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("DO")?;
        f.write_str(" ")?;
        f.write_node(&display::comma_separated(&self.exprs))
    }
}
impl_display!(DoStmt);

/// `EXPLAIN [ANALYZE] [FORMAT = 'fmt'] stmt`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExplainStmt {
    pub stmt: Option<Box<Statement>>,
    pub format: Option<String>,
    pub analyze: bool,
}

impl AstDisplay for ExplainStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("EXPLAIN")?;
        if self.analyze {
            f.write_str(" ")?;
            f.write_keyword("ANALYZE")?;
        }
        if let Some(format) = &self.format {
            f.write_str(" ")?;
            f.write_keyword("FORMAT")?;
            f.write_str(" = ")?;
            f.write_string(format)?;
        }
        if let Some(stmt) = &self.stmt {
            f.write_str(" ")?;
            f.write_node(stmt)?;
        }
        Ok(())
    }
}
impl_display!(ExplainStmt);

/// What a [`ShowStmt`] lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShowKind {
    #[default]
    Databases,
    Tables {
        db: Option<Ident>,
        full: bool,
    },
    CreateTable(TableName),
    CreateDatabase {
        db: Ident,
        if_not_exists: bool,
    },
    Columns {
        table: TableName,
        full: bool,
    },
    Variables {
        global: bool,
    },
    Status {
        global: bool,
    },
    Processlist {
        full: bool,
    },
    Grants(Option<UserIdentity>),
    Warnings,
    Errors,
    Engines,
}

/// The `LIKE` or `WHERE` filter of a [`ShowStmt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowFilter {
    Like(String),
    Where(Expr),
}

/// `SHOW ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowStmt {
    pub kind: ShowKind,
    pub filter: Option<ShowFilter>,
}

fn write_full<W: fmt::Write>(f: &mut AstFormatter<W>, full: bool) -> Result<(), RestoreError> {
    if full {
        f.write_keyword("FULL")?;
        f.write_str(" ")?;
    }
    Ok(())
}

fn write_scope<W: fmt::Write>(f: &mut AstFormatter<W>, global: bool) -> Result<(), RestoreError> {
    f.write_keyword(if global { "GLOBAL" } else { "SESSION" })?;
    f.write_str(" ")
}

impl AstDisplay for ShowStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("SHOW")?;
        f.write_str(" ")?;
        match &self.kind {
            ShowKind::Databases => f.write_keyword("DATABASES")?,
            ShowKind::Tables { db, full } => {
                write_full(f, *full)?;
                f.write_keyword("TABLES")?;
                if let Some(db) = db {
                    f.write_str(" ")?;
                    f.write_keyword("IN")?;
                    f.write_str(" ")?;
                    f.write_node(db)?;
                }
            }
            ShowKind::CreateTable(table) => {
                f.write_keyword("CREATE TABLE")?;
                f.write_str(" ")?;
                f.write_node(table)?;
            }
            ShowKind::CreateDatabase { db, if_not_exists } => {
                f.write_keyword("CREATE DATABASE")?;
                f.write_str(" ")?;
                if *if_not_exists {
                    f.write_keyword("IF NOT EXISTS")?;
                    f.write_str(" ")?;
                }
                f.write_node(db)?;
            }
            ShowKind::Columns { table, full } => {
                write_full(f, *full)?;
                f.write_keyword("COLUMNS")?;
                f.write_str(" ")?;
                f.write_keyword("IN")?;
                f.write_str(" ")?;
                f.write_node(table)?;
            }
            ShowKind::Variables { global } => {
                write_scope(f, *global)?;
                f.write_keyword("VARIABLES")?;
            }
            ShowKind::Status { global } => {
                write_scope(f, *global)?;
                f.write_keyword("STATUS")?;
            }
            ShowKind::Processlist { full } => {
                write_full(f, *full)?;
                f.write_keyword("PROCESSLIST")?;
            }
            ShowKind::Grants(user) => {
                f.write_keyword("GRANTS")?;
                if let Some(user) = user {
                    f.write_str(" ")?;
                    f.write_keyword("FOR")?;
                    f.write_str(" ")?;
                    f.write_node(user)?;
                }
            }
            ShowKind::Warnings => f.write_keyword("WARNINGS")?,
            ShowKind::Errors => f.write_keyword("ERRORS")?,
            ShowKind::Engines => f.write_keyword("ENGINES")?,
        }
        match &self.filter {
            Some(ShowFilter::Like(pattern)) => {
                f.write_str(" ")?;
                f.write_keyword("LIKE")?;
                f.write_str(" ")?;
                f.write_string(pattern)
            }
            Some(ShowFilter::Where(expr)) => {
                f.write_str(" ")?;
                f.write_keyword("WHERE")?;
                f.write_str(" ")?;
                f.write_node(expr)
            }
            None => Ok(()),
        }
    }
}
impl_display!(ShowStmt);

impl ShowStmt {
    /// Visits the table being described, then the WHERE filter.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        let table_ok = match &mut self.kind {
            ShowKind::CreateTable(table) | ShowKind::Columns { table, .. } => {
                accept_slot(table, visitor)
            }
            _ => true,
        };
        table_ok
            && match &mut self.filter {
                Some(ShowFilter::Where(expr)) => accept_slot(expr, visitor),
                _ => true,
            }
    }
}

/// `KILL [TIDB] [QUERY] connection_id`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KillStmt {
    pub connection_id: u64,
    /// Whether only the running query is terminated, not the connection.
    pub query: bool,
    pub tidb_extension: bool,
}

impl AstDisplay for KillStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("KILL")?;
        if self.tidb_extension {
            f.write_str(" ")?;
            f.write_keyword("TIDB")?;
        }
        if self.query {
            f.write_str(" ")?;
            f.write_keyword("QUERY")?;
        }
        f.write_str(format_args!(" {}", self.connection_id))
    }
}
impl_display!(KillStmt);

/// What a [`FlushStmt`] flushes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushKind {
    /// `TABLES [t, ...] [WITH READ LOCK]`.
    Tables {
        tables: Vec<TableName>,
        read_lock: bool,
    },
    Privileges,
    Status,
    Logs,
    TidbPlugins(Vec<Ident>),
}

impl Default for FlushKind {
    fn default() -> FlushKind {
        FlushKind::Tables {
            tables: vec![],
            read_lock: false,
        }
    }
}

/// `FLUSH ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlushStmt {
    pub kind: FlushKind,
    pub no_write_to_binlog: bool,
}

impl AstDisplay for FlushStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("FLUSH")?;
        f.write_str(" ")?;
        if self.no_write_to_binlog {
            f.write_keyword("NO_WRITE_TO_BINLOG")?;
            f.write_str(" ")?;
        }
        match &self.kind {
            FlushKind::Tables { tables, read_lock } => {
                f.write_keyword("TABLES")?;
                if !tables.is_empty() {
                    f.write_str(" ")?;
                    f.write_node(&display::comma_separated(tables))?;
                }
                if *read_lock {
                    f.write_str(" ")?;
                    f.write_keyword("WITH READ LOCK")?;
                }
                Ok(())
            }
            FlushKind::Privileges => f.write_keyword("PRIVILEGES"),
            FlushKind::Status => f.write_keyword("STATUS"),
            FlushKind::Logs => f.write_keyword("LOGS"),
            FlushKind::TidbPlugins(plugins) => {
                f.write_keyword("TIDB PLUGINS")?;
                f.write_str(" ")?;
                f.write_node(&display::comma_separated(plugins))
            }
        }
    }
}
impl_display!(FlushStmt);

/// `SHUTDOWN`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShutdownStmt;

impl AstDisplay for ShutdownStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("SHUTDOWN")
    }
}
impl_display!(ShutdownStmt);

/// `BINLOG 'base64 event'`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BinlogStmt {
    pub text: String,
}

impl AstDisplay for BinlogStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("BINLOG")?;
        f.write_str(" ")?;
        f.write_string(&self.text)
    }
}
impl_display!(BinlogStmt);

/// The operation of an [`AdminStmt`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdminKind {
    #[default]
    ShowDdl,
    ShowDdlJobs(Option<u64>),
    CancelDdlJobs(Vec<i64>),
    CheckTable(Vec<TableName>),
    CheckIndex {
        table: TableName,
        index: Ident,
    },
    RecoverIndex {
        table: TableName,
        index: Ident,
    },
    ShowNextRowId(TableName),
}

/// `ADMIN ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminStmt {
    pub kind: AdminKind,
}

impl AstDisplay for AdminStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("ADMIN")?;
        f.write_str(" ")?;
        match &self.kind {
            AdminKind::ShowDdl => f.write_keyword("SHOW DDL"),
            AdminKind::ShowDdlJobs(count) => {
                f.write_keyword("SHOW DDL JOBS")?;
                if let Some(count) = count {
                    f.write_str(format_args!(" {}", count))?;
                }
                Ok(())
            }
            AdminKind::CancelDdlJobs(jobs) => {
                f.write_keyword("CANCEL DDL JOBS")?;
                for (i, job) in jobs.iter().enumerate() {
                    f.write_str(if i == 0 { " " } else { ", " })?;
                    f.write_str(job)?;
                }
                Ok(())
            }
            AdminKind::CheckTable(tables) => {
                f.write_keyword("CHECK TABLE")?;
                f.write_str(" ")?;
                f.write_node(&display::comma_separated(tables))
            }
            AdminKind::CheckIndex { table, index } => {
                f.write_keyword("CHECK INDEX")?;
                f.write_str(" ")?;
                f.write_node(table)?;
                f.write_str(" ")?;
                f.write_node(index)
            }
            AdminKind::RecoverIndex { table, index } => {
                f.write_keyword("RECOVER INDEX")?;
                f.write_str(" ")?;
                f.write_node(table)?;
                f.write_str(" ")?;
                f.write_node(index)
            }
            AdminKind::ShowNextRowId(table) => {
                f.write_keyword("SHOW")?;
                f.write_str(" ")?;
                f.write_node(table)?;
                f.write_str(" ")?;
                f.write_keyword("NEXT_ROW_ID")
            }
        }
    }
}
impl_display!(AdminStmt);

impl AdminStmt {
    /// Visits the tables the operation names, in order.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        match &mut self.kind {
            AdminKind::CheckTable(tables) => accept_list(tables, visitor),
            AdminKind::CheckIndex { table, .. }
            | AdminKind::RecoverIndex { table, .. }
            | AdminKind::ShowNextRowId(table) => accept_slot(table, visitor),
            AdminKind::ShowDdl | AdminKind::ShowDdlJobs(_) | AdminKind::CancelDdlJobs(_) => true,
        }
    }
}

/// `ANALYZE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalyzeTableStmt {
    pub tables: Vec<TableName>,
    pub partitions: Vec<Ident>,
    pub index_names: Vec<Ident>,
    /// Whether only indexes are analyzed. With an empty `index_names` every
    /// index is.
    pub index_flag: bool,
}

impl AstDisplay for AnalyzeTableStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("ANALYZE TABLE")?;
        f.write_str(" ")?;
        f.write_node(&display::comma_separated(&self.tables))?;
        if !self.partitions.is_empty() {
            f.write_str(" ")?;
            f.write_keyword("PARTITION")?;
            f.write_str(" ")?;
            f.write_node(&display::comma_separated(&self.partitions))?;
        }
        if self.index_flag {
            f.write_str(" ")?;
            f.write_keyword("INDEX")?;
            if !self.index_names.is_empty() {
                f.write_str(" ")?;
                f.write_node(&display::comma_separated(&self.index_names))?;
            }
        }
        Ok(())
    }
}
impl_display!(AnalyzeTableStmt);

/// `DROP STATS table`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropStatsStmt {
    pub table: TableName,
}

impl AstDisplay for DropStatsStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("DROP STATS")?;
        f.write_str(" ")?;
        f.write_node(&self.table)
    }
}
impl_display!(DropStatsStmt);

/// The kind of binlog node a [`ChangeStmt`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
    #[default]
    Pump,
    Drainer,
}

/// `CHANGE PUMP|DRAINER TO NODE_STATE ='state' FOR NODE_ID 'id'`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeStmt {
    pub node_type: NodeType,
    pub state: String,
    pub node_id: String,
}

impl AstDisplay for ChangeStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("CHANGE")?;
        f.write_str(" ")?;
        f.write_keyword(match self.node_type {
            NodeType::Pump => "PUMP",
            NodeType::Drainer => "DRAINER",
        })?;
        f.write_str(" ")?;
        f.write_keyword("TO NODE_STATE")?;
        f.write_str(" =")?;
        f.write_string(&self.state)?;
        f.write_str(" ")?;
        f.write_keyword("FOR NODE_ID")?;
        f.write_str(" ")?;
        f.write_string(&self.node_id)
    }
}
impl_display!(ChangeStmt);

impl SetStmt {
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_list(&mut self.variables, visitor)
    }
}

impl PrepareStmt {
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_opt(&mut self.sql_var, visitor)
    }
}

impl ExecuteStmt {
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_list(&mut self.using_vars, visitor)
    }
}

impl DoStmt {
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_list(&mut self.exprs, visitor)
    }
}

impl ExplainStmt {
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_opt_boxed(&mut self.stmt, visitor)
    }
}

impl FlushStmt {
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        match &mut self.kind {
            FlushKind::Tables { tables, .. } => accept_list(tables, visitor),
            _ => true,
        }
    }
}

impl AnalyzeTableStmt {
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_list(&mut self.tables, visitor)
    }
}

impl DropStatsStmt {
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_slot(&mut self.table, visitor)
    }
}
