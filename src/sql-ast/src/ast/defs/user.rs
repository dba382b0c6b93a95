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

//! User and privilege management statements.

use std::fmt;

use crate::ast::display::{self, AstDisplay, AstFormatter};
use crate::ast::visit::{accept_list, Accept, Visitor};
use crate::ast::{ColumnName, Ident, RestoreError};

/// A user account, written `'user'@'host'`, or the current user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UserIdentity {
    pub username: String,
    pub hostname: String,
    /// Whether this names the session's own account via `CURRENT_USER`.
    pub current_user: bool,
}

impl UserIdentity {
    /// Creates an identity for `username` connecting from `hostname`.
    pub fn new<U: Into<String>, H: Into<String>>(username: U, hostname: H) -> UserIdentity {
        UserIdentity {
            username: username.into(),
            hostname: hostname.into(),
            current_user: false,
        }
    }
}

impl AstDisplay for UserIdentity {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        if self.current_user {
            return f.write_keyword("CURRENT_USER");
        }
        f.write_name(&self.username)?;
        f.write_str("@")?;
        f.write_name(&self.hostname)
    }
}
impl_display!(UserIdentity);

/// How an account authenticates, as given by an `IDENTIFIED` clause.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthOption {
    /// The authentication plugin, if named with `WITH`.
    pub auth_plugin: Option<String>,
    /// Whether `auth_string` (plaintext) rather than `hash_string` is
    /// authoritative.
    pub by_auth_string: bool,
    pub auth_string: String,
    pub hash_string: String,
}

impl AuthOption {
    /// Creates an option that authenticates with a plaintext password.
    pub fn by_password<S: Into<String>>(password: S) -> AuthOption {
        AuthOption {
            by_auth_string: true,
            auth_string: password.into(),
            ..Default::default()
        }
    }

    /// Creates an option that authenticates with a precomputed hash.
    pub fn by_hash<S: Into<String>>(hash: S) -> AuthOption {
        AuthOption {
            hash_string: hash.into(),
            ..Default::default()
        }
    }
}

impl AstDisplay for AuthOption {
    /// Credentials are replaced with a placeholder when redacting.
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("IDENTIFIED")?;
        if let Some(plugin) = &self.auth_plugin {
            f.write_str(" ")?;
            f.write_keyword("WITH")?;
            f.write_str(" ")?;
            f.write_string(plugin)?;
        }
        f.write_str(" ")?;
        if self.by_auth_string {
            f.write_keyword("BY")?;
            f.write_str(" ")?;
            f.write_secret(&self.auth_string)
        } else if self.auth_plugin.is_some() {
            f.write_keyword("AS")?;
            f.write_str(" ")?;
            f.write_secret(&self.hash_string)
        } else {
            f.write_keyword("BY PASSWORD")?;
            f.write_str(" ")?;
            f.write_secret(&self.hash_string)
        }
    }
}

/// An account and how it authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserSpec {
    pub user: UserIdentity,
    pub auth_opt: Option<AuthOption>,
    /// Whether the account is a role rather than a user.
    pub is_role: bool,
}

impl UserSpec {
    /// Creates a spec for `user` with no authentication clause.
    pub fn new(user: UserIdentity) -> UserSpec {
        UserSpec {
            user,
            auth_opt: None,
            is_role: false,
        }
    }
}

impl AstDisplay for UserSpec {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_node(&self.user)?;
        if let Some(auth_opt) = &self.auth_opt {
            f.write_str(" ")?;
            f.write_node(auth_opt)?;
        }
        Ok(())
    }
}
impl_display!(UserSpec);

/// The TLS requirement of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlsRequirement {
    None,
    Ssl,
    X509,
}

/// Whether an account is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountLock {
    Lock,
    Unlock,
}

fn write_account_options<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    tls: Option<TlsRequirement>,
    lock: Option<AccountLock>,
) -> Result<(), RestoreError> {
    if let Some(tls) = tls {
        f.write_str(" ")?;
        f.write_keyword("REQUIRE")?;
        f.write_str(" ")?;
        f.write_keyword(match tls {
            TlsRequirement::None => "NONE",
            TlsRequirement::Ssl => "SSL",
            TlsRequirement::X509 => "X509",
        })?;
    }
    if let Some(lock) = lock {
        f.write_str(" ")?;
        f.write_keyword(match lock {
            AccountLock::Lock => "ACCOUNT LOCK",
            AccountLock::Unlock => "ACCOUNT UNLOCK",
        })?;
    }
    Ok(())
}

/// `CREATE USER` or `CREATE ROLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateUserStmt {
    pub is_create_role: bool,
    pub if_not_exists: bool,
    pub specs: Vec<UserSpec>,
    pub tls: Option<TlsRequirement>,
    pub lock: Option<AccountLock>,
}

impl AstDisplay for CreateUserStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(if self.is_create_role {
            "CREATE ROLE"
        } else {
            "CREATE USER"
        })?;
        f.write_str(" ")?;
        if self.if_not_exists {
            f.write_keyword("IF NOT EXISTS")?;
            f.write_str(" ")?;
        }
        f.write_node(&display::comma_separated(&self.specs))?;
        write_account_options(f, self.tls, self.lock)
    }
}
impl_display!(CreateUserStmt);

/// `ALTER USER`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterUserStmt {
    pub if_exists: bool,
    /// The new credentials of the session's own account, as set by
    /// `ALTER USER USER() IDENTIFIED BY ...`.
    pub current_auth: Option<AuthOption>,
    pub specs: Vec<UserSpec>,
    pub tls: Option<TlsRequirement>,
    pub lock: Option<AccountLock>,
}

impl AstDisplay for AlterUserStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("ALTER USER")?;
        f.write_str(" ")?;
        if self.if_exists {
            f.write_keyword("IF EXISTS")?;
            f.write_str(" ")?;
        }
        if let Some(auth) = &self.current_auth {
            f.write_keyword("USER")?;
            f.write_str("() ")?;
            return f.write_node(auth);
        }
        f.write_node(&display::comma_separated(&self.specs))?;
        write_account_options(f, self.tls, self.lock)
    }
}
impl_display!(AlterUserStmt);

/// `DROP USER` or `DROP ROLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropUserStmt {
    pub if_exists: bool,
    pub is_drop_role: bool,
    pub users: Vec<UserIdentity>,
}

impl AstDisplay for DropUserStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(if self.is_drop_role {
            "DROP ROLE"
        } else {
            "DROP USER"
        })?;
        f.write_str(" ")?;
        if self.if_exists {
            f.write_keyword("IF EXISTS")?;
            f.write_str(" ")?;
        }
        f.write_node(&display::comma_separated(&self.users))
    }
}
impl_display!(DropUserStmt);

/// `SET PASSWORD [FOR user] = 'password'`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetPwdStmt {
    pub user: Option<UserIdentity>,
    pub password: String,
}

impl AstDisplay for SetPwdStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("SET PASSWORD")?;
        if let Some(user) = &self.user {
            f.write_str(" ")?;
            f.write_keyword("FOR")?;
            f.write_str(" ")?;
            f.write_node(user)?;
        }
        f.write_str("=")?;
        f.write_secret(&self.password)
    }
}
impl_display!(SetPwdStmt);

/// A privilege that can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrivilegeType {
    #[default]
    All,
    Alter,
    Create,
    CreateUser,
    CreateView,
    Delete,
    Drop,
    Event,
    Execute,
    File,
    Grant,
    Index,
    Insert,
    LockTables,
    Process,
    References,
    Reload,
    Select,
    ShowDatabases,
    ShowView,
    Shutdown,
    Super,
    Trigger,
    Update,
    Usage,
}

impl AstDisplay for PrivilegeType {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(match self {
            PrivilegeType::All => "ALL",
            PrivilegeType::Alter => "ALTER",
            PrivilegeType::Create => "CREATE",
            PrivilegeType::CreateUser => "CREATE USER",
            PrivilegeType::CreateView => "CREATE VIEW",
            PrivilegeType::Delete => "DELETE",
            PrivilegeType::Drop => "DROP",
            PrivilegeType::Event => "EVENT",
            PrivilegeType::Execute => "EXECUTE",
            PrivilegeType::File => "FILE",
            PrivilegeType::Grant => "GRANT OPTION",
            PrivilegeType::Index => "INDEX",
            PrivilegeType::Insert => "INSERT",
            PrivilegeType::LockTables => "LOCK TABLES",
            PrivilegeType::Process => "PROCESS",
            PrivilegeType::References => "REFERENCES",
            PrivilegeType::Reload => "RELOAD",
            PrivilegeType::Select => "SELECT",
            PrivilegeType::ShowDatabases => "SHOW DATABASES",
            PrivilegeType::ShowView => "SHOW VIEW",
            PrivilegeType::Shutdown => "SHUTDOWN",
            PrivilegeType::Super => "SUPER",
            PrivilegeType::Trigger => "TRIGGER",
            PrivilegeType::Update => "UPDATE",
            PrivilegeType::Usage => "USAGE",
        })
    }
}

/// A privilege, optionally restricted to some columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrivElem {
    pub priv_type: PrivilegeType,
    pub columns: Vec<ColumnName>,
}

impl AstDisplay for PrivElem {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_node(&self.priv_type)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            f.write_node(&display::comma_separated(&self.columns))?;
            f.write_str(")")?;
        }
        Ok(())
    }
}
impl_display!(PrivElem);

impl Accept for PrivElem {
    /// Privileges have no child nodes.
    fn accept_children<V>(&mut self, _: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        true
    }
}

/// The kind of object a privilege applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectType {
    #[default]
    Unspecified,
    Table,
    Function,
    Procedure,
}

impl ObjectType {
    fn write_prefix<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        let keyword = match self {
            ObjectType::Unspecified => return Ok(()),
            ObjectType::Table => "TABLE",
            ObjectType::Function => "FUNCTION",
            ObjectType::Procedure => "PROCEDURE",
        };
        f.write_keyword(keyword)?;
        f.write_str(" ")
    }
}

/// The scope of a grant: `*.*`, `db.*`, or `db.table`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GrantLevel {
    #[default]
    Global,
    /// All tables of a database, or of the current database if `None`.
    Database(Option<Ident>),
    /// One table, in the current database if the schema is `None`.
    Table {
        schema: Option<Ident>,
        table: Ident,
    },
}

impl AstDisplay for GrantLevel {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match self {
            GrantLevel::Global => f.write_str("*.*"),
            GrantLevel::Database(None) => f.write_str("*"),
            GrantLevel::Database(Some(db)) => {
                f.write_node(db)?;
                f.write_str(".*")
            }
            GrantLevel::Table { schema, table } => {
                if let Some(schema) = schema {
                    f.write_node(schema)?;
                    f.write_str(".")?;
                }
                f.write_node(table)
            }
        }
    }
}

fn write_privileges_on<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    privs: &[PrivElem],
    object_type: ObjectType,
    level: &GrantLevel,
) -> Result<(), RestoreError> {
    f.write_node(&display::comma_separated(privs))?;
    f.write_str(" ")?;
    f.write_keyword("ON")?;
    f.write_str(" ")?;
    object_type.write_prefix(f)?;
    f.write_node(level)
}

/// `GRANT`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrantStmt {
    pub privs: Vec<PrivElem>,
    pub object_type: ObjectType,
    pub level: GrantLevel,
    pub users: Vec<UserSpec>,
    pub tls: Option<TlsRequirement>,
    pub with_grant: bool,
}

impl AstDisplay for GrantStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("GRANT")?;
        f.write_str(" ")?;
        write_privileges_on(f, &self.privs, self.object_type, &self.level)?;
        f.write_str(" ")?;
        f.write_keyword("TO")?;
        f.write_str(" ")?;
        f.write_node(&display::comma_separated(&self.users))?;
        write_account_options(f, self.tls, None)?;
        if self.with_grant {
            f.write_str(" ")?;
            f.write_keyword("WITH GRANT OPTION")?;
        }
        Ok(())
    }
}
impl_display!(GrantStmt);

impl GrantStmt {
    /// Visits each privilege in order.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_list(&mut self.privs, visitor)
    }
}

/// `REVOKE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevokeStmt {
    pub privs: Vec<PrivElem>,
    pub object_type: ObjectType,
    pub level: GrantLevel,
    pub users: Vec<UserSpec>,
}

impl AstDisplay for RevokeStmt {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword("REVOKE")?;
        f.write_str(" ")?;
        write_privileges_on(f, &self.privs, self.object_type, &self.level)?;
        f.write_str(" ")?;
        f.write_keyword("FROM")?;
        f.write_str(" ")?;
        f.write_node(&display::comma_separated(&self.users))
    }
}
impl_display!(RevokeStmt);

impl RevokeStmt {
    /// Visits each privilege in order.
    pub(crate) fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        accept_list(&mut self.privs, visitor)
    }
}
