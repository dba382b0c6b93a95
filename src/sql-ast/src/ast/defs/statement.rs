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

//! The top-level statement type.

use std::fmt;

use crate::ast::display::{AstDisplay, AstFormatter};
use crate::ast::query::accept_limit;
use crate::ast::visit::{accept_list, accept_slot, Accept, Visitor};
use crate::ast::{
    AdminStmt, AlterTableStmt, AlterUserStmt, AnalyzeTableStmt, BeginStmt, BinlogStmt, BrieStmt,
    ChangeStmt, CommitStmt, CreateDatabaseStmt, CreateIndexStmt, CreateTableStmt, CreateUserStmt,
    DeallocateStmt, DeleteStmt, DoStmt, DropDatabaseStmt, DropIndexStmt, DropStatsStmt,
    DropTableStmt, DropUserStmt, ExecuteStmt, ExplainStmt, FlushStmt, GrantStmt, InsertStmt,
    KillStmt, LoadDataStmt, PrepareStmt, RenameTableStmt, RestoreError, RevokeStmt, RollbackStmt,
    SelectStmt, SetOprStmt, SetPwdStmt, SetStmt, ShowStmt, ShutdownStmt, TruncateTableStmt,
    UpdateStmt, UseStmt,
};
use crate::redact::SensitiveStmt;

macro_rules! statements {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// A SQL statement.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Statement {
            /// `SELECT`, boxed as it is by far the largest variant.
            Select(Box<SelectStmt>),
            $($variant($ty)),*
        }

        impl AstDisplay for Statement {
            fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
                match self {
                    Statement::Select(s) => f.write_node(s),
                    $(Statement::$variant(s) => f.write_node(s)),*
                }
            }
        }

        $(
            impl From<$ty> for Statement {
                fn from(s: $ty) -> Statement {
                    Statement::$variant(s)
                }
            }
        )*
    };
}

statements! {
    SetOpr(SetOprStmt),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
    LoadData(LoadDataStmt),
    CreateDatabase(CreateDatabaseStmt),
    DropDatabase(DropDatabaseStmt),
    CreateTable(CreateTableStmt),
    DropTable(DropTableStmt),
    TruncateTable(TruncateTableStmt),
    RenameTable(RenameTableStmt),
    CreateIndex(CreateIndexStmt),
    DropIndex(DropIndexStmt),
    AlterTable(AlterTableStmt),
    CreateUser(CreateUserStmt),
    AlterUser(AlterUserStmt),
    DropUser(DropUserStmt),
    SetPwd(SetPwdStmt),
    Grant(GrantStmt),
    Revoke(RevokeStmt),
    Brie(BrieStmt),
    Change(ChangeStmt),
    Begin(BeginStmt),
    Commit(CommitStmt),
    Rollback(RollbackStmt),
    Use(UseStmt),
    Set(SetStmt),
    Prepare(PrepareStmt),
    Execute(ExecuteStmt),
    Deallocate(DeallocateStmt),
    Do(DoStmt),
    Explain(ExplainStmt),
    Show(ShowStmt),
    Kill(KillStmt),
    Flush(FlushStmt),
    Shutdown(ShutdownStmt),
    Binlog(BinlogStmt),
    Admin(AdminStmt),
    AnalyzeTable(AnalyzeTableStmt),
    DropStats(DropStatsStmt),
}
impl_display!(Statement);

impl From<SelectStmt> for Statement {
    fn from(select: SelectStmt) -> Statement {
        Statement::Select(Box::new(select))
    }
}

impl Statement {
    /// Returns the statement's redaction capability, if its kind can embed
    /// credentials.
    ///
    /// The answer depends only on the kind of statement, never on its
    /// contents.
    pub fn as_sensitive(&self) -> Option<&dyn SensitiveStmt> {
        match self {
            Statement::SetPwd(s) => Some(s),
            Statement::CreateUser(s) => Some(s),
            Statement::AlterUser(s) => Some(s),
            Statement::Grant(s) => Some(s),
            Statement::Brie(s) => Some(s),
            Statement::Select(_)
            | Statement::SetOpr(_)
            | Statement::Insert(_)
            | Statement::Update(_)
            | Statement::Delete(_)
            | Statement::LoadData(_)
            | Statement::CreateDatabase(_)
            | Statement::DropDatabase(_)
            | Statement::CreateTable(_)
            | Statement::DropTable(_)
            | Statement::TruncateTable(_)
            | Statement::RenameTable(_)
            | Statement::CreateIndex(_)
            | Statement::DropIndex(_)
            | Statement::AlterTable(_)
            | Statement::DropUser(_)
            | Statement::Revoke(_)
            | Statement::Change(_)
            | Statement::Begin(_)
            | Statement::Commit(_)
            | Statement::Rollback(_)
            | Statement::Use(_)
            | Statement::Set(_)
            | Statement::Prepare(_)
            | Statement::Execute(_)
            | Statement::Deallocate(_)
            | Statement::Do(_)
            | Statement::Explain(_)
            | Statement::Show(_)
            | Statement::Kill(_)
            | Statement::Flush(_)
            | Statement::Shutdown(_)
            | Statement::Binlog(_)
            | Statement::Admin(_)
            | Statement::AnalyzeTable(_)
            | Statement::DropStats(_) => None,
        }
    }
}

impl Accept for Statement {
    /// Dispatches to the statement kind. Each kind visits its children in
    /// the order in which they appear in the restored text.
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        match self {
            Statement::Select(s) => Accept::accept_children(&mut **s, visitor),
            Statement::SetOpr(s) => {
                accept_list(&mut s.selects, visitor)
                    && accept_list(&mut s.order_by, visitor)
                    && accept_limit(&mut s.limit, visitor)
            }
            Statement::Insert(s) => s.accept_children(visitor),
            Statement::Update(s) => s.accept_children(visitor),
            Statement::Delete(s) => s.accept_children(visitor),
            Statement::LoadData(s) => s.accept_children(visitor),
            Statement::CreateTable(s) => s.accept_children(visitor),
            Statement::DropTable(s) => accept_list(&mut s.tables, visitor),
            Statement::TruncateTable(s) => accept_slot(&mut s.table, visitor),
            Statement::RenameTable(s) => s.accept_children(visitor),
            Statement::CreateIndex(s) => accept_slot(&mut s.table, visitor),
            Statement::DropIndex(s) => accept_slot(&mut s.table, visitor),
            Statement::AlterTable(s) => s.accept_children(visitor),
            Statement::Grant(s) => s.accept_children(visitor),
            Statement::Revoke(s) => s.accept_children(visitor),
            Statement::Brie(s) => s.accept_children(visitor),
            Statement::Set(s) => s.accept_children(visitor),
            Statement::Prepare(s) => s.accept_children(visitor),
            Statement::Execute(s) => s.accept_children(visitor),
            Statement::Do(s) => s.accept_children(visitor),
            Statement::Explain(s) => s.accept_children(visitor),
            Statement::Show(s) => s.accept_children(visitor),
            Statement::Flush(s) => s.accept_children(visitor),
            Statement::Admin(s) => s.accept_children(visitor),
            Statement::AnalyzeTable(s) => s.accept_children(visitor),
            Statement::DropStats(s) => s.accept_children(visitor),
            Statement::CreateDatabase(_)
            | Statement::DropDatabase(_)
            | Statement::CreateUser(_)
            | Statement::AlterUser(_)
            | Statement::DropUser(_)
            | Statement::SetPwd(_)
            | Statement::Change(_)
            | Statement::Begin(_)
            | Statement::Commit(_)
            | Statement::Rollback(_)
            | Statement::Use(_)
            | Statement::Deallocate(_)
            | Statement::Kill(_)
            | Statement::Shutdown(_)
            | Statement::Binlog(_) => true,
        }
    }
}
