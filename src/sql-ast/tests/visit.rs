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

//! Traversal and in-place rewriting of syntax trees.

use sqlkit_ast::ast::display::AstDisplay;
use sqlkit_ast::ast::visit::{Accept, Node, Visitor};
use sqlkit_ast::ast::*;

fn select_from(fields: &[&str], table: &str) -> SelectStmt {
    SelectStmt {
        fields: fields
            .iter()
            .map(|f| SelectField::expr(Expr::column(*f)))
            .collect(),
        from: Some(TableRef::table(TableName::new(table))),
        ..Default::default()
    }
}

/// Records the kind of every node entered and left.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Visitor for Recorder {
    fn enter(&mut self, node: Node) -> (Node, bool) {
        self.events.push(format!("enter {}", node.kind()));
        (node, false)
    }

    fn leave(&mut self, node: Node) -> (Node, bool) {
        self.events.push(format!("leave {}", node.kind()));
        (node, true)
    }
}

/// Collects the restored text of every column reference, optionally without
/// descending into nested statements.
#[derive(Default)]
struct Columns {
    skip_subqueries: bool,
    statements: usize,
    columns: Vec<String>,
    enters: usize,
    leaves: usize,
}

impl Visitor for Columns {
    fn enter(&mut self, node: Node) -> (Node, bool) {
        self.enters += 1;
        let skip = match &node {
            Node::Statement(_) => {
                self.statements += 1;
                self.skip_subqueries && self.statements > 1
            }
            Node::Expr(Expr::Column(c)) => {
                self.columns.push(c.to_ast_string().unwrap());
                false
            }
            _ => false,
        };
        (node, skip)
    }

    fn leave(&mut self, node: Node) -> (Node, bool) {
        self.leaves += 1;
        (node, true)
    }
}

struct RenameColumn {
    from: &'static str,
    to: &'static str,
}

impl Visitor for RenameColumn {
    fn leave(&mut self, node: Node) -> (Node, bool) {
        match node {
            Node::Expr(Expr::Column(mut c)) if c.name.as_str() == self.from => {
                c.name = Ident::new(self.to);
                (Node::Expr(Expr::Column(c)), true)
            }
            node => (node, true),
        }
    }
}

struct Noop;

impl Visitor for Noop {}

fn with_subquery() -> Statement {
    let mut outer = select_from(&["a"], "t");
    outer.selection = Some(Expr::InSubquery {
        expr: Box::new(Expr::column("b")),
        subquery: Box::new(select_from(&["c"], "u")),
        negated: false,
    });
    outer.into()
}

#[test]
fn test_enter_leave_order() {
    sqlkit_ore::test::init_logging();
    let selection = Expr::column("b").equals(Expr::number(1));
    let stmt = Statement::from(SelectStmt {
        selection: Some(selection.clone()),
        ..select_from(&["a"], "t")
    });
    let mut recorder = Recorder::default();
    let (_, ok) = stmt.accept(&mut recorder);
    assert!(ok);
    assert_eq!(
        recorder.events,
        vec![
            "enter Statement",
            "enter SelectField",
            "enter Expr",
            "leave Expr",
            "leave SelectField",
            "enter TableRef",
            "enter TableName",
            "leave TableName",
            "leave TableRef",
            "enter Expr",
            "enter Expr",
            "leave Expr",
            "enter Expr",
            "leave Expr",
            "leave Expr",
            "leave Statement",
        ]
    );

    // Expressions can be walked on their own.
    let mut recorder = Recorder::default();
    let (walked, ok) = selection.clone().accept(&mut recorder);
    assert!(ok);
    assert_eq!(recorder.events.len(), 6);
    assert_eq!(walked, selection);
}

#[test]
fn test_noop_visitor_preserves_tree() {
    let stmt = with_subquery();
    let (walked, ok) = stmt.clone().accept(&mut Noop);
    assert!(ok);
    assert_eq!(walked, stmt);
}

#[test]
fn test_subquery_is_a_statement() {
    let mut visitor = Columns::default();
    let (_, ok) = with_subquery().accept(&mut visitor);
    assert!(ok);
    assert_eq!(visitor.statements, 2);
    assert_eq!(visitor.columns, vec!["`a`", "`b`", "`c`"]);
}

#[test]
fn test_skip_children() {
    let mut visitor = Columns {
        skip_subqueries: true,
        ..Default::default()
    };
    let (walked, ok) = with_subquery().accept(&mut visitor);
    assert!(ok);
    assert_eq!(visitor.statements, 2);
    assert_eq!(visitor.columns, vec!["`a`", "`b`"]);
    // Skipped nodes are still left, and are left untouched.
    assert_eq!(visitor.leaves, visitor.enters);
    assert_eq!(walked, with_subquery());
}

#[test]
fn test_rewrite() {
    let mut select = select_from(&["a", "b"], "t");
    select.selection = Some(Expr::column("a").equals(Expr::number(1)));
    select.order_by = vec![ByItem {
        expr: Expr::column("a"),
        desc: false,
    }];
    let stmt = Statement::from(select);

    let mut rename = RenameColumn { from: "a", to: "x" };
    let (stmt, ok) = stmt.accept(&mut rename);
    assert!(ok);
    assert_eq!(
        stmt.to_ast_string().unwrap(),
        "SELECT `x`, `b` FROM `t` WHERE `x`=1 ORDER BY `x`"
    );

    let insert = Statement::from(InsertStmt {
        table: TableName::new("t"),
        select: Some(Box::new(with_subquery())),
        ..Default::default()
    });
    let mut rename = RenameColumn { from: "c", to: "y" };
    let (insert, ok) = insert.accept(&mut rename);
    assert!(ok);
    assert_eq!(
        insert.to_ast_string().unwrap(),
        "INSERT INTO `t` SELECT `a` FROM `t` WHERE `b` IN (SELECT `y` FROM `u`)"
    );
}

/// Stops the traversal after leaving the column named `stop_at`.
struct StopAt {
    stop_at: &'static str,
    entered: Vec<String>,
}

impl Visitor for StopAt {
    fn enter(&mut self, node: Node) -> (Node, bool) {
        if let Node::Expr(Expr::Column(c)) = &node {
            self.entered.push(c.name.as_str().to_owned());
        }
        (node, false)
    }

    fn leave(&mut self, node: Node) -> (Node, bool) {
        let stop = matches!(&node, Node::Expr(Expr::Column(c)) if c.name.as_str() == self.stop_at);
        (node, !stop)
    }
}

#[test]
fn test_early_exit() {
    let stmt = Statement::from(select_from(&["a", "b", "c"], "t"));
    let mut visitor = StopAt {
        stop_at: "b",
        entered: vec![],
    };
    let (walked, ok) = stmt.clone().accept(&mut visitor);
    assert!(!ok);
    assert_eq!(visitor.entered, vec!["a", "b"]);
    assert_eq!(walked, stmt);
}

/// Replaces every table name and column reference below the root with `z`.
struct RenameAll;

impl Visitor for RenameAll {
    fn leave(&mut self, node: Node) -> (Node, bool) {
        let node = match node {
            Node::TableName(_) => Node::TableName(TableName::new("z")),
            Node::Expr(Expr::Column(_)) => Node::Expr(Expr::column("z")),
            node => node,
        };
        (node, true)
    }
}

/// Collects the unqualified text of every table name and column reference.
#[derive(Default)]
struct Names {
    names: Vec<String>,
    tables: usize,
}

impl Visitor for Names {
    fn enter(&mut self, node: Node) -> (Node, bool) {
        match &node {
            Node::TableName(t) => {
                self.tables += 1;
                self.names.push(t.to_ast_string().unwrap());
            }
            Node::Expr(Expr::Column(c)) => self.names.push(c.to_ast_string().unwrap()),
            _ => {}
        }
        (node, false)
    }
}

/// Walks `node` with a recorder, a root replacement, and a visitor that
/// rewrites every table name and column below the root. `children` lists
/// node kinds the walk must reach below the root.
fn assert_walks<T>(node: T, marker: T, children: &[&str])
where
    T: Accept + Clone + PartialEq + std::fmt::Debug,
{
    let kind = Into::<Node>::into(node.clone()).kind();

    let mut recorder = Recorder::default();
    let (walked, ok) = node.clone().accept(&mut recorder);
    assert!(ok);
    assert_eq!(walked, node);
    let enter = format!("enter {}", kind);
    let leave = format!("leave {}", kind);
    assert_eq!(recorder.events.first(), Some(&enter), "{:?}", node);
    assert_eq!(recorder.events.last(), Some(&leave), "{:?}", node);
    let below = &recorder.events[1..recorder.events.len() - 1];
    for child in children {
        let enter = format!("enter {}", child);
        assert!(below.contains(&enter), "{} not reached in {:?}", child, node);
    }

    let mut replace = ReplaceRoot {
        marker: Some(marker.clone().into()),
    };
    let (walked, ok) = node.clone().accept(&mut replace);
    assert!(ok);
    assert_eq!(walked, marker);

    let (renamed, ok) = node.accept(&mut RenameAll);
    assert!(ok);
    let mut names = Names::default();
    renamed.accept(&mut names);
    assert!(names.names.iter().all(|n| n == "`z`"), "{:?}", names.names);
    if children.contains(&"TableName") {
        assert!(names.tables > 0);
    }
}

fn join(left: &str, right: &str) -> TableRef {
    TableRef::Join(Box::new(Join {
        left: TableRef::table(TableName::new(left)),
        right: TableRef::table(TableName::new(right)),
        kind: JoinKind::Left,
        on: Some(Expr::column("a").equals(Expr::column("b"))),
        ..Default::default()
    }))
}

fn hint() -> TableOptimizerHint {
    TableOptimizerHint {
        tables: vec![HintTable::new("t")],
        indexes: vec!["idx".into()],
        ..TableOptimizerHint::new("use_index")
    }
}

fn assign(column: &str, expr: Expr) -> Assignment {
    Assignment {
        column: ColumnName::new(column),
        expr,
    }
}

fn column_with_default() -> ColumnDef {
    ColumnDef {
        options: vec![
            ColumnOption::NotNull,
            ColumnOption::Default(Expr::number(0)),
            ColumnOption::Check {
                expr: Expr::column("c").binary(BinaryOperator::Gt, Expr::number(0)),
                enforced: true,
            },
        ],
        ..ColumnDef::new("c", DataType::new("int"))
    }
}

fn foreign_key() -> Constraint {
    Constraint {
        name: Some("fk".into()),
        kind: ConstraintKind::ForeignKey(ReferenceDef {
            table: TableName::new("parent"),
            columns: vec!["id".into()],
            on_delete: Some(ReferenceAction::Cascade),
            on_update: None,
        }),
        keys: vec![IndexPartSpec::new("c")],
    }
}

fn privileges() -> Vec<PrivElem> {
    vec![
        PrivElem::default(),
        PrivElem {
            priv_type: PrivilegeType::Select,
            columns: vec![ColumnName::new("a"), ColumnName::new("b")],
        },
    ]
}

fn limit() -> Option<Limit> {
    Some(Limit {
        count: Expr::number(10),
        offset: Some(Expr::ParamMarker),
    })
}

#[test]
fn test_every_statement_accepts() {
    let empty: Vec<Statement> = vec![
        SelectStmt::default().into(),
        SetOprStmt::default().into(),
        InsertStmt::default().into(),
        UpdateStmt::default().into(),
        DeleteStmt::default().into(),
        LoadDataStmt::default().into(),
        CreateDatabaseStmt::default().into(),
        DropDatabaseStmt::default().into(),
        CreateTableStmt::default().into(),
        DropTableStmt::default().into(),
        TruncateTableStmt::default().into(),
        RenameTableStmt::default().into(),
        CreateIndexStmt::default().into(),
        DropIndexStmt::default().into(),
        AlterTableStmt::default().into(),
        CreateUserStmt::default().into(),
        AlterUserStmt::default().into(),
        DropUserStmt::default().into(),
        SetPwdStmt::default().into(),
        GrantStmt::default().into(),
        RevokeStmt::default().into(),
        BrieStmt::default().into(),
        ChangeStmt::default().into(),
        BeginStmt::default().into(),
        CommitStmt::default().into(),
        RollbackStmt::default().into(),
        UseStmt::default().into(),
        SetStmt::default().into(),
        PrepareStmt::default().into(),
        ExecuteStmt::default().into(),
        DeallocateStmt::default().into(),
        DoStmt::default().into(),
        ExplainStmt::default().into(),
        ShowStmt::default().into(),
        KillStmt::default().into(),
        FlushStmt::default().into(),
        ShutdownStmt.into(),
        BinlogStmt::default().into(),
        AdminStmt::default().into(),
        AnalyzeTableStmt::default().into(),
        DropStatsStmt::default().into(),
    ];
    let marker = Statement::from(BinlogStmt {
        text: "marker".into(),
    });
    for stmt in empty {
        assert_walks(stmt, marker.clone(), &[]);
    }

    let select = SelectStmt {
        hints: vec![hint()],
        fields: vec![
            SelectField::Wildcard(Some(TableName::new("t"))),
            SelectField::expr(Expr::column("a")),
        ],
        from: Some(join("t", "u")),
        selection: Some(Expr::column("a").equals(Expr::number(1))),
        group_by: vec![ByItem {
            expr: Expr::column("a"),
            desc: false,
        }],
        having: Some(Expr::column("b")),
        order_by: vec![ByItem {
            expr: Expr::column("b"),
            desc: true,
        }],
        limit: limit(),
        ..Default::default()
    };
    let populated: Vec<(Statement, &[&str])> = vec![
        (
            select.clone().into(),
            &["OptimizerHint", "SelectField", "TableRef", "TableName", "Expr", "ByItem"],
        ),
        (
            SetOprStmt {
                selects: vec![
                    select_from(&["a"], "t"),
                    SelectStmt {
                        after_set_operator: Some(SetOprType::UnionAll),
                        ..select_from(&["b"], "u")
                    },
                ],
                order_by: vec![ByItem {
                    expr: Expr::column("a"),
                    desc: false,
                }],
                limit: limit(),
            }
            .into(),
            &["Statement", "SelectField", "TableName", "ByItem", "Expr"],
        ),
        (
            InsertStmt {
                table: TableName::new("t"),
                columns: vec!["a".into(), "b".into()],
                values: vec![vec![Expr::number(1), Expr::Default]],
                on_duplicate: vec![assign("b", Expr::column("b"))],
                ..Default::default()
            }
            .into(),
            &["TableName", "Expr", "Assignment"],
        ),
        (
            InsertStmt {
                table: TableName::new("t"),
                setlist: vec![assign("a", Expr::number(1))],
                ..Default::default()
            }
            .into(),
            &["TableName", "Assignment", "Expr"],
        ),
        (
            UpdateStmt {
                hints: vec![hint()],
                table_refs: join("t", "u"),
                assignments: vec![assign("a", Expr::column("b"))],
                selection: Some(Expr::column("c")),
                order_by: vec![ByItem {
                    expr: Expr::column("a"),
                    desc: false,
                }],
                limit: limit(),
                ..Default::default()
            }
            .into(),
            &["OptimizerHint", "TableRef", "TableName", "Assignment", "Expr", "ByItem"],
        ),
        (
            DeleteStmt {
                hints: vec![hint()],
                tables: vec![TableName::new("t")],
                before_from: true,
                table_refs: join("t", "u"),
                selection: Some(Expr::column("a")),
                limit: limit(),
                ..Default::default()
            }
            .into(),
            &["OptimizerHint", "TableName", "TableRef", "Expr"],
        ),
        (
            LoadDataStmt {
                path: "/tmp/t.csv".into(),
                table: TableName::new("t"),
                setlist: vec![assign("a", Expr::column("b"))],
                ..Default::default()
            }
            .into(),
            &["TableName", "Assignment", "Expr"],
        ),
        (
            CreateTableStmt {
                table: TableName::new("t"),
                columns: vec![column_with_default(), ColumnDef::new("d", DataType::new("text"))],
                constraints: vec![
                    Constraint {
                        keys: vec![IndexPartSpec::new("c")],
                        ..Default::default()
                    },
                    foreign_key(),
                ],
                like: Some(TableName::new("base")),
                select: Some(Box::new(select_from(&["c"], "src").into())),
                ..Default::default()
            }
            .into(),
            &["TableName", "ColumnDef", "Constraint", "Expr", "Statement"],
        ),
        (
            DropTableStmt {
                tables: vec![TableName::new("t"), TableName::qualified("db", "u")],
                ..Default::default()
            }
            .into(),
            &["TableName"],
        ),
        (
            TruncateTableStmt {
                table: TableName::new("t"),
            }
            .into(),
            &["TableName"],
        ),
        (
            RenameTableStmt {
                pairs: vec![TableToTable {
                    old: TableName::new("t"),
                    new: TableName::new("u"),
                }],
            }
            .into(),
            &["TableName"],
        ),
        (
            CreateIndexStmt {
                name: "idx".into(),
                table: TableName::new("t"),
                parts: vec![IndexPartSpec::new("a")],
                ..Default::default()
            }
            .into(),
            &["TableName"],
        ),
        (
            DropIndexStmt {
                name: "idx".into(),
                table: TableName::new("t"),
                ..Default::default()
            }
            .into(),
            &["TableName"],
        ),
        (
            AlterTableStmt {
                table: TableName::new("t"),
                specs: vec![
                    AlterTableSpec::AddColumns {
                        columns: vec![column_with_default()],
                        constraints: vec![foreign_key()],
                        position: None,
                    },
                    AlterTableSpec::AddConstraint(foreign_key()),
                    AlterTableSpec::DropColumn("d".into()),
                    AlterTableSpec::ModifyColumn {
                        column: column_with_default(),
                        position: Some(ColumnPosition::First),
                    },
                    AlterTableSpec::ChangeColumn {
                        old: "c".into(),
                        column: column_with_default(),
                        position: Some(ColumnPosition::After("a".into())),
                    },
                    AlterTableSpec::RenameTable(TableName::new("u")),
                ],
            }
            .into(),
            &["TableName", "ColumnDef", "Constraint", "Expr"],
        ),
        (
            GrantStmt {
                privs: privileges(),
                level: GrantLevel::Database(Some("db".into())),
                users: vec![UserSpec::new(UserIdentity::new("u", "%"))],
                ..Default::default()
            }
            .into(),
            &["PrivElem"],
        ),
        (
            RevokeStmt {
                privs: privileges(),
                users: vec![UserSpec::new(UserIdentity::new("u", "%"))],
                ..Default::default()
            }
            .into(),
            &["PrivElem"],
        ),
        (
            BrieStmt {
                tables: vec![TableName::qualified("db", "t"), TableName::new("u")],
                storage: "local:///tmp/backup".into(),
                ..Default::default()
            }
            .into(),
            &["TableName"],
        ),
        (
            SetStmt {
                variables: vec![
                    VariableAssignment {
                        name: "x".into(),
                        value: Expr::column("a"),
                        kind: VariableKind::User,
                    },
                    VariableAssignment {
                        name: "sql_mode".into(),
                        value: Expr::string(""),
                        kind: VariableKind::System { global: true },
                    },
                ],
            }
            .into(),
            &["VariableAssignment", "Expr"],
        ),
        (
            PrepareStmt {
                name: "s".into(),
                sql_var: Some(Expr::Variable(VariableExpr::user("sql"))),
                ..Default::default()
            }
            .into(),
            &["Expr"],
        ),
        (
            ExecuteStmt {
                name: "s".into(),
                using_vars: vec![Expr::Variable(VariableExpr::user("a"))],
            }
            .into(),
            &["Expr"],
        ),
        (
            DoStmt {
                exprs: vec![Expr::number(1), Expr::column("a")],
            }
            .into(),
            &["Expr"],
        ),
        (
            ExplainStmt {
                stmt: Some(Box::new(select.into())),
                ..Default::default()
            }
            .into(),
            &["Statement", "OptimizerHint", "TableRef", "TableName", "Expr"],
        ),
        (
            ShowStmt {
                kind: ShowKind::Columns {
                    table: TableName::new("t"),
                    full: true,
                },
                filter: Some(ShowFilter::Where(Expr::column("a"))),
            }
            .into(),
            &["TableName", "Expr"],
        ),
        (
            FlushStmt {
                kind: FlushKind::Tables {
                    tables: vec![TableName::new("t"), TableName::new("u")],
                    read_lock: true,
                },
                no_write_to_binlog: false,
            }
            .into(),
            &["TableName"],
        ),
        (
            AdminStmt {
                kind: AdminKind::CheckTable(vec![TableName::new("t")]),
            }
            .into(),
            &["TableName"],
        ),
        (
            AdminStmt {
                kind: AdminKind::RecoverIndex {
                    table: TableName::new("t"),
                    index: "idx".into(),
                },
            }
            .into(),
            &["TableName"],
        ),
        (
            AnalyzeTableStmt {
                tables: vec![TableName::new("t"), TableName::new("u")],
                ..Default::default()
            }
            .into(),
            &["TableName"],
        ),
        (
            DropStatsStmt {
                table: TableName::new("t"),
            }
            .into(),
            &["TableName"],
        ),
    ];
    for (stmt, children) in populated {
        assert_walks(stmt, marker.clone(), children);
    }
}

#[test]
fn test_every_node_kind_accepts() {
    assert_walks(
        TableName::qualified("db", "t"),
        TableName::new("marker"),
        &[],
    );
    assert_walks(
        TableRef::Join(Box::new(Join {
            left: join("t", "u"),
            right: TableRef::Derived {
                subquery: Box::new(select_from(&["a"], "v")),
                alias: Some("d".into()),
            },
            on: Some(Expr::column("a")),
            ..Default::default()
        })),
        TableRef::table(TableName::new("marker")),
        &["TableRef", "TableName", "Statement", "Expr"],
    );
    assert_walks(
        SelectField::Wildcard(Some(TableName::new("t"))),
        SelectField::default(),
        &["TableName"],
    );
    assert_walks(
        SelectField::Expr {
            expr: Expr::column("a").binary(BinaryOperator::Plus, Expr::number(1)),
            alias: Some("b".into()),
        },
        SelectField::default(),
        &["Expr"],
    );
    assert_walks(
        ByItem {
            expr: Expr::column("a"),
            desc: true,
        },
        ByItem::default(),
        &["Expr"],
    );
    assert_walks(
        assign("a", Expr::column("b").binary(BinaryOperator::Plus, Expr::number(1))),
        assign("marker", Expr::Default),
        &["Expr"],
    );
    assert_walks(
        column_with_default(),
        ColumnDef::new("marker", DataType::new("int")),
        &["Expr"],
    );
    assert_walks(foreign_key(), Constraint::default(), &["TableName"]);
    assert_walks(
        Constraint {
            name: Some("chk".into()),
            kind: ConstraintKind::Check {
                expr: Expr::column("a").binary(BinaryOperator::Gt, Expr::number(0)),
                enforced: false,
            },
            keys: vec![],
        },
        Constraint::default(),
        &["Expr"],
    );
    for privilege in privileges() {
        assert_walks(
            privilege,
            PrivElem {
                priv_type: PrivilegeType::Usage,
                columns: vec![],
            },
            &[],
        );
    }
    assert_walks(
        VariableAssignment {
            name: "x".into(),
            value: Expr::Variable(VariableExpr::user("y")),
            kind: VariableKind::System { global: false },
        },
        VariableAssignment::default(),
        &["Expr"],
    );
    assert_walks(hint(), TableOptimizerHint::new("marker"), &[]);
}

/// Replaces the first node entered with `marker` and skips its children.
struct ReplaceRoot {
    marker: Option<Node>,
}

impl Visitor for ReplaceRoot {
    fn enter(&mut self, node: Node) -> (Node, bool) {
        match self.marker.take() {
            Some(marker) => (marker, true),
            None => (node, false),
        }
    }
}

#[test]
fn test_every_expression_accepts() {
    let select = || Box::new(select_from(&["x"], "u"));
    let exprs = vec![
        Expr::Value(Value::Null),
        Expr::column("a"),
        Expr::Variable(VariableExpr::user("v")),
        Expr::Variable(VariableExpr {
            value: Some(Box::new(Expr::number(1))),
            ..VariableExpr::system("sql_mode")
        }),
        Expr::ParamMarker,
        Expr::column("a").binary(BinaryOperator::Plus, Expr::number(1)),
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr: Box::new(Expr::column("a")),
        },
        Expr::IsNull {
            expr: Box::new(Expr::column("a")),
            negated: false,
        },
        Expr::Between {
            expr: Box::new(Expr::column("a")),
            negated: true,
            low: Box::new(Expr::number(1)),
            high: Box::new(Expr::number(2)),
        },
        Expr::InList {
            expr: Box::new(Expr::column("a")),
            list: vec![Expr::number(1), Expr::number(2)],
            negated: false,
        },
        Expr::InSubquery {
            expr: Box::new(Expr::column("a")),
            subquery: select(),
            negated: false,
        },
        Expr::Like {
            expr: Box::new(Expr::column("a")),
            pattern: Box::new(Expr::string("a%")),
            negated: false,
            escape: Some('!'),
        },
        Expr::Function(FuncCall {
            name: "concat".into(),
            args: vec![Expr::column("a"), Expr::string("b")],
        }),
        Expr::Aggregate(AggregateCall {
            name: "sum".into(),
            distinct: true,
            args: vec![Expr::column("a")],
        }),
        Expr::Cast {
            expr: Box::new(Expr::column("a")),
            data_type: DataType::new("char").with_length(3),
        },
        Expr::Subquery(select()),
        Expr::Exists {
            subquery: select(),
            negated: true,
        },
        Expr::Nested(Box::new(Expr::column("a"))),
        Expr::Default,
    ];
    for expr in exprs {
        let (walked, ok) = expr.clone().accept(&mut Noop);
        assert!(ok);
        assert_eq!(walked, expr);

        let mut replace = ReplaceRoot {
            marker: Some(Node::Expr(Expr::ParamMarker)),
        };
        let (walked, ok) = expr.accept(&mut replace);
        assert!(ok);
        assert_eq!(walked, Expr::ParamMarker);
    }
}

struct WrongKind;

impl Visitor for WrongKind {
    fn enter(&mut self, node: Node) -> (Node, bool) {
        match node {
            Node::TableName(_) => (Node::Expr(Expr::number(1)), false),
            node => (node, false),
        }
    }
}

#[test]
#[should_panic(expected = "incompatible Expr node")]
fn test_wrong_kind_replacement_panics() {
    let stmt = Statement::from(select_from(&["a"], "t"));
    let _ = stmt.accept(&mut WrongKind);
}
