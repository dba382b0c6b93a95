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

//! Restores hand-built syntax trees and checks the canonical text.

use sqlkit_ast::ast::display::{AstDisplay, RestoreFlags};
use sqlkit_ast::ast::*;

fn col(table: &str, name: &str) -> Expr {
    Expr::Column(ColumnName::qualified(table, name))
}

fn restore<T: AstDisplay>(node: &T) -> String {
    node.to_ast_string().unwrap()
}

#[test]
fn test_select() {
    sqlkit_ore::test::init_logging();
    let select = SelectStmt {
        hints: vec![
            TableOptimizerHint {
                tables: vec![HintTable::new("t1")],
                ..TableOptimizerHint::new("hash_join")
            },
            TableOptimizerHint {
                tables: vec![HintTable::new("t2")],
                indexes: vec!["idx_a".into()],
                ..TableOptimizerHint::new("use_index")
            },
        ],
        fields: vec![
            SelectField::expr(col("t1", "a")),
            SelectField::Expr {
                expr: Expr::Aggregate(AggregateCall {
                    name: "count".into(),
                    distinct: false,
                    args: vec![],
                }),
                alias: Some("n".into()),
            },
        ],
        from: Some(TableRef::Join(Box::new(Join {
            left: TableRef::table(TableName::new("t1")),
            right: TableRef::table(TableName::new("t2")),
            kind: JoinKind::Left,
            on: Some(col("t1", "a").equals(col("t2", "a"))),
            ..Default::default()
        }))),
        selection: Some(Expr::column("b").equals(Expr::number(1)).and(Expr::IsNull {
            expr: Box::new(Expr::column("c")),
            negated: true,
        })),
        group_by: vec![ByItem {
            expr: col("t1", "a"),
            desc: false,
        }],
        order_by: vec![ByItem {
            expr: Expr::column("n"),
            desc: true,
        }],
        limit: Some(Limit {
            count: Expr::number(10),
            offset: Some(Expr::number(5)),
        }),
        ..Default::default()
    };
    assert_eq!(
        restore(&select),
        "SELECT /*+ HASH_JOIN(`t1`) USE_INDEX(`t2` `idx_a`)*/ `t1`.`a`, COUNT(*) AS `n` \
         FROM `t1` LEFT JOIN `t2` ON `t1`.`a`=`t2`.`a` WHERE `b`=1 AND `c` IS NOT NULL \
         GROUP BY `t1`.`a` ORDER BY `n` DESC LIMIT 10 OFFSET 5"
    );
    // Restoring through the statement wrapper and through Display agree.
    let stmt = Statement::from(select);
    assert_eq!(stmt.to_string(), restore(&stmt));
}

#[test]
fn test_subqueries() {
    let inner = SelectStmt {
        fields: vec![SelectField::expr(Expr::column("b"))],
        from: Some(TableRef::table(TableName::new("u"))),
        ..Default::default()
    };
    let select = SelectStmt {
        fields: vec![SelectField::Wildcard(None)],
        from: Some(TableRef::Derived {
            subquery: Box::new(SelectStmt {
                fields: vec![SelectField::expr(Expr::number(1))],
                ..Default::default()
            }),
            alias: Some("d".into()),
        }),
        selection: Some(Expr::InSubquery {
            expr: Box::new(Expr::column("a")),
            subquery: Box::new(inner),
            negated: true,
        }),
        ..Default::default()
    };
    assert_eq!(
        restore(&select),
        "SELECT * FROM (SELECT 1) AS `d` WHERE `a` NOT IN (SELECT `b` FROM `u`)"
    );
}

#[test]
fn test_set_operation() {
    let one = SelectStmt {
        fields: vec![SelectField::expr(Expr::number(1))],
        ..Default::default()
    };
    let two = SelectStmt {
        fields: vec![SelectField::expr(Expr::number(2))],
        after_set_operator: Some(SetOprType::UnionAll),
        ..Default::default()
    };
    let stmt = SetOprStmt {
        selects: vec![one.clone(), two],
        order_by: vec![],
        limit: Some(Limit {
            count: Expr::number(1),
            offset: None,
        }),
    };
    assert_eq!(restore(&stmt), "SELECT 1 UNION ALL SELECT 2 LIMIT 1");

    // Every operand after the first must say how it is combined.
    let broken = SetOprStmt {
        selects: vec![one.clone(), one],
        ..Default::default()
    };
    match broken.to_ast_string() {
        Err(RestoreError::Internal { node, .. }) => assert_eq!(node, "set operation"),
        other => panic!("expected an internal error, got {:?}", other),
    }
}

#[test]
fn test_hint_payload_mismatch() {
    let hint = TableOptimizerHint {
        data: HintData::Bool(true),
        ..TableOptimizerHint::new("memory_quota")
    };
    match hint.to_ast_string() {
        Err(RestoreError::Internal { node, detail }) => {
            assert_eq!(node, "optimizer hint");
            assert!(detail.starts_with("memory_quota expects"), "{}", detail);
        }
        other => panic!("expected an internal error, got {:?}", other),
    }
}

#[test]
fn test_insert() {
    let insert = InsertStmt {
        table: TableName::new("t"),
        ..Default::default()
    };
    assert_eq!(restore(&insert), "INSERT INTO `t` VALUES ()");

    let insert = InsertStmt {
        ignore: true,
        table: TableName::new("t"),
        columns: vec!["a".into(), "b".into()],
        values: vec![
            vec![Expr::number(1), Expr::string("x")],
            vec![Expr::Default, Expr::ParamMarker],
        ],
        on_duplicate: vec![Assignment {
            column: ColumnName::new("b"),
            expr: Expr::string("y"),
        }],
        ..Default::default()
    };
    assert_eq!(
        restore(&insert),
        "INSERT IGNORE INTO `t` (`a`, `b`) VALUES (1, 'x'), (DEFAULT, ?) \
         ON DUPLICATE KEY UPDATE `b`='y'"
    );
}

#[test]
fn test_multi_table_delete() {
    let delete = DeleteStmt {
        tables: vec![TableName::new("t1")],
        before_from: true,
        table_refs: TableRef::Join(Box::new(Join {
            left: TableRef::table(TableName::new("t1")),
            right: TableRef::table(TableName::new("t2")),
            on: Some(col("t1", "id").equals(col("t2", "id"))),
            ..Default::default()
        })),
        selection: Some(col("t2", "x").binary(BinaryOperator::Gt, Expr::number(1))),
        ..Default::default()
    };
    assert_eq!(
        restore(&delete),
        "DELETE `t1` FROM `t1` JOIN `t2` ON `t1`.`id`=`t2`.`id` WHERE `t2`.`x`>1"
    );
}

#[test]
fn test_create_table() {
    let create = CreateTableStmt {
        if_not_exists: true,
        table: TableName::qualified("test", "t"),
        columns: vec![
            ColumnDef {
                options: vec![ColumnOption::NotNull, ColumnOption::AutoIncrement],
                ..ColumnDef::new("id", DataType::new("int").unsigned())
            },
            ColumnDef {
                options: vec![
                    ColumnOption::Default(Expr::string("")),
                    ColumnOption::Comment("the name".into()),
                ],
                ..ColumnDef::new("name", DataType::new("varchar").with_length(64))
            },
        ],
        constraints: vec![
            Constraint {
                name: None,
                kind: ConstraintKind::PrimaryKey,
                keys: vec![IndexPartSpec::new("id")],
            },
            Constraint {
                name: Some("fk_owner".into()),
                kind: ConstraintKind::ForeignKey(ReferenceDef {
                    table: TableName::new("owner"),
                    columns: vec!["id".into()],
                    on_delete: Some(ReferenceAction::Cascade),
                    on_update: None,
                }),
                keys: vec![IndexPartSpec::new("name")],
            },
        ],
        options: vec![
            TableOption::Engine("InnoDB".into()),
            TableOption::Charset("utf8mb4".into()),
        ],
        ..Default::default()
    };
    assert_eq!(
        restore(&create),
        "CREATE TABLE IF NOT EXISTS `test`.`t` (`id` INT UNSIGNED NOT NULL AUTO_INCREMENT, \
         `name` VARCHAR(64) DEFAULT '' COMMENT 'the name', PRIMARY KEY(`id`), \
         CONSTRAINT `fk_owner` FOREIGN KEY (`name`) REFERENCES `owner`(`id`) ON DELETE CASCADE) \
         ENGINE = InnoDB DEFAULT CHARACTER SET = utf8mb4"
    );
}

#[test]
fn test_alter_table() {
    let mut alter = AlterTableStmt {
        table: TableName::new("t"),
        specs: vec![],
    };
    assert_eq!(restore(&alter), "ALTER TABLE `t`");

    alter.specs = vec![
        AlterTableSpec::AddColumns {
            columns: vec![ColumnDef::new("c", DataType::new("int"))],
            constraints: vec![],
            position: Some(ColumnPosition::First),
        },
        AlterTableSpec::DropColumn("d".into()),
        AlterTableSpec::DropPrimaryKey,
    ];
    assert_eq!(
        restore(&alter),
        "ALTER TABLE `t` ADD COLUMN `c` INT FIRST, DROP COLUMN `d`, DROP PRIMARY KEY"
    );
}

#[test]
fn test_create_index() {
    let create = CreateIndexStmt {
        kind: IndexKind::Unique,
        name: "idx".into(),
        table: TableName::new("t"),
        parts: vec![
            IndexPartSpec {
                length: Some(10),
                ..IndexPartSpec::new("a")
            },
            IndexPartSpec {
                desc: true,
                ..IndexPartSpec::new("b")
            },
        ],
        ..Default::default()
    };
    assert_eq!(
        restore(&create),
        "CREATE UNIQUE INDEX `idx` ON `t` (`a`(10), `b` DESC)"
    );
}

#[test]
fn test_load_data() {
    let load = LoadDataStmt {
        path: "/tmp/t.csv".into(),
        table: TableName::new("t"),
        fields: Some(FieldsClause {
            terminated: Some("ab".into()),
            enclosed: Some("b".into()),
            escaped: None,
        }),
        ..Default::default()
    };
    assert_eq!(
        restore(&load),
        "LOAD DATA INFILE '/tmp/t.csv' INTO TABLE `t` FIELDS TERMINATED BY 'ab' ENCLOSED BY 'b'"
    );

    let load = LoadDataStmt {
        local: true,
        path: "/tmp/t.csv".into(),
        on_duplicate: OnDuplicate::Replace,
        table: TableName::new("t"),
        lines: Some(LinesClause {
            starting: Some("xxx".into()),
            terminated: None,
        }),
        ignore_lines: 1,
        columns: vec![ColumnName::new("a"), ColumnName::new("b")],
        setlist: vec![Assignment {
            column: ColumnName::new("c"),
            expr: Expr::number(1),
        }],
        ..Default::default()
    };
    assert_eq!(
        restore(&load),
        "LOAD DATA LOCAL INFILE '/tmp/t.csv' REPLACE INTO TABLE `t` LINES STARTING BY 'xxx' \
         IGNORE 1 LINES (`a`, `b`) SET `c`=1"
    );
}

#[test]
fn test_change() {
    let change = ChangeStmt {
        node_type: NodeType::Pump,
        state: "paused".into(),
        node_id: "127.0.0.1:9090".into(),
    };
    assert_eq!(
        restore(&change),
        "CHANGE PUMP TO NODE_STATE ='paused' FOR NODE_ID '127.0.0.1:9090'"
    );
    let change = ChangeStmt {
        node_type: NodeType::Drainer,
        state: "online".into(),
        node_id: "drainer-1".into(),
    };
    assert_eq!(
        restore(&change),
        "CHANGE DRAINER TO NODE_STATE ='online' FOR NODE_ID 'drainer-1'"
    );
}

#[test]
fn test_set_variables() {
    let set = SetStmt {
        variables: vec![
            VariableAssignment {
                name: "a".into(),
                value: Expr::number(1),
                kind: VariableKind::User,
            },
            VariableAssignment {
                name: "autocommit".into(),
                value: Expr::number(0),
                kind: VariableKind::System { global: true },
            },
            VariableAssignment {
                name: String::new(),
                value: Expr::string("utf8mb4"),
                kind: VariableKind::Names {
                    collate: Some("utf8mb4_bin".into()),
                },
            },
        ],
    };
    assert_eq!(
        restore(&set),
        "SET @`a`=1, @@GLOBAL.autocommit=0, NAMES 'utf8mb4' COLLATE 'utf8mb4_bin'"
    );
}

#[test]
fn test_grant() {
    let grant = GrantStmt {
        privs: vec![
            PrivElem {
                priv_type: PrivilegeType::Select,
                columns: vec![],
            },
            PrivElem {
                priv_type: PrivilegeType::Update,
                columns: vec![ColumnName::new("a")],
            },
        ],
        level: GrantLevel::Database(Some("db".into())),
        users: vec![UserSpec::new(UserIdentity::new("u", "%"))],
        with_grant: true,
        ..Default::default()
    };
    assert_eq!(
        restore(&grant),
        "GRANT SELECT, UPDATE (`a`) ON `db`.* TO `u`@`%` WITH GRANT OPTION"
    );
}

#[test]
fn test_flags() {
    let select = SelectStmt {
        fields: vec![SelectField::Wildcard(None)],
        from: Some(TableRef::table(TableName::new("t"))),
        selection: Some(
            Expr::column("a")
                .equals(Expr::string("x"))
                .and(Expr::column("b").binary(BinaryOperator::Lt, Expr::number(3))),
        ),
        ..Default::default()
    };
    let flags = RestoreFlags::KEYWORD_LOWERCASE
        | RestoreFlags::NAME_DOUBLE_QUOTES
        | RestoreFlags::STRING_SINGLE_QUOTES
        | RestoreFlags::SPACES_AROUND_BINARY_OPERATION;
    assert_eq!(
        select.to_ast_string_with(flags).unwrap(),
        r#"select * from "t" where "a" = 'x' and "b" < 3"#
    );

    let flags = RestoreFlags::KEYWORD_UPPERCASE
        | RestoreFlags::NAME_UPPERCASE
        | RestoreFlags::STRING_DOUBLE_QUOTES;
    assert_eq!(
        select.to_ast_string_with(flags).unwrap(),
        r#"SELECT * FROM T WHERE A="x" AND B<3"#
    );

    let value = Value::String(r"it's a \ test".into());
    assert_eq!(
        value
            .to_ast_string_with(RestoreFlags::DEFAULT | RestoreFlags::STRING_ESCAPE_BACKSLASH)
            .unwrap(),
        r"'it''s a \\ test'"
    );
    assert_eq!(restore(&value), r"'it''s a \ test'");
}
