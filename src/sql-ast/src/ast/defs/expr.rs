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

use crate::ast::display::{self, AstDisplay, AstFormatter, RestoreFlags};
use crate::ast::visit::{accept_list, accept_opt_boxed, accept_slot, Accept, Visitor};
use crate::ast::{ColumnName, DataType, Ident, RestoreError, SelectStmt, Value};

/// A scalar expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A literal value.
    Value(Value),
    /// A column reference.
    Column(ColumnName),
    /// A user (`@a`) or system (`@@a`) variable.
    Variable(VariableExpr),
    /// A `?` placeholder in a prepared statement.
    ParamMarker,
    /// `left op right`.
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// `op expr`.
    UnaryOp { op: UnaryOperator, expr: Box<Expr> },
    /// `expr IS [NOT] NULL`.
    IsNull { expr: Box<Expr>, negated: bool },
    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// `expr [NOT] IN (list)`.
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// `expr [NOT] IN (subquery)`.
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<SelectStmt>,
        negated: bool,
    },
    /// `expr [NOT] LIKE pattern [ESCAPE 'c']`.
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        negated: bool,
        escape: Option<char>,
    },
    /// A scalar function call.
    Function(FuncCall),
    /// An aggregate function call.
    Aggregate(AggregateCall),
    /// `CAST(expr AS data_type)`.
    Cast {
        expr: Box<Expr>,
        data_type: DataType,
    },
    /// A parenthesized scalar subquery.
    Subquery(Box<SelectStmt>),
    /// `[NOT] EXISTS (subquery)`.
    Exists {
        subquery: Box<SelectStmt>,
        negated: bool,
    },
    /// A parenthesized expression.
    Nested(Box<Expr>),
    /// The `DEFAULT` keyword in a value list.
    Default,
}

impl Default for Expr {
    fn default() -> Expr {
        Expr::Value(Value::Null)
    }
}

impl Expr {
    /// Creates a reference to an unqualified column.
    pub fn column<I: Into<Ident>>(name: I) -> Expr {
        Expr::Column(ColumnName::new(name))
    }

    /// Creates a numeric literal.
    pub fn number<N: ToString>(n: N) -> Expr {
        Expr::Value(Value::Number(n.to_string()))
    }

    /// Creates a string literal.
    pub fn string<S: Into<String>>(s: S) -> Expr {
        Expr::Value(Value::String(s.into()))
    }

    /// Creates `self op right`.
    pub fn binary(self, op: BinaryOperator, right: Expr) -> Expr {
        Expr::BinaryOp {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates `self = right`.
    pub fn equals(self, right: Expr) -> Expr {
        self.binary(BinaryOperator::Eq, right)
    }

    /// Creates `self AND right`.
    pub fn and(self, right: Expr) -> Expr {
        self.binary(BinaryOperator::And, right)
    }
}

impl AstDisplay for Expr {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        match self {
            Expr::Value(v) => f.write_node(v),
            Expr::Column(c) => f.write_node(c),
            Expr::Variable(v) => f.write_node(v),
            Expr::ParamMarker => f.write_str("?"),
            Expr::BinaryOp { left, op, right } => {
                f.write_node(left)?;
                f.write_node(op)?;
                f.write_node(right)
            }
            Expr::UnaryOp { op, expr } => {
                match op {
                    UnaryOperator::Not => {
                        f.write_keyword("NOT")?;
                        f.write_str(" ")?;
                    }
                    UnaryOperator::Minus => f.write_str("-")?,
                    UnaryOperator::Plus => f.write_str("+")?,
                    UnaryOperator::BitNeg => f.write_str("~")?,
                }
                f.write_node(expr)
            }
            Expr::IsNull { expr, negated } => {
                f.write_node(expr)?;
                f.write_str(" ")?;
                f.write_keyword(if *negated { "IS NOT NULL" } else { "IS NULL" })
            }
            Expr::Between {
                expr,
                negated,
                low,
                high,
            } => {
                f.write_node(expr)?;
                f.write_str(" ")?;
                write_negated(f, *negated)?;
                f.write_keyword("BETWEEN")?;
                f.write_str(" ")?;
                f.write_node(low)?;
                f.write_str(" ")?;
                f.write_keyword("AND")?;
                f.write_str(" ")?;
                f.write_node(high)
            }
            Expr::InList {
                expr,
                list,
                negated,
            } => {
                f.write_node(expr)?;
                f.write_str(" ")?;
                write_negated(f, *negated)?;
                f.write_keyword("IN")?;
                f.write_str(" (")?;
                f.write_node(&display::comma_separated(list))?;
                f.write_str(")")
            }
            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => {
                f.write_node(expr)?;
                f.write_str(" ")?;
                write_negated(f, *negated)?;
                f.write_keyword("IN")?;
                f.write_str(" (")?;
                f.write_node(subquery)?;
                f.write_str(")")
            }
            Expr::Like {
                expr,
                pattern,
                negated,
                escape,
            } => {
                f.write_node(expr)?;
                f.write_str(" ")?;
                write_negated(f, *negated)?;
                f.write_keyword("LIKE")?;
                f.write_str(" ")?;
                f.write_node(pattern)?;
                if let Some(escape) = escape {
                    f.write_str(" ")?;
                    f.write_keyword("ESCAPE")?;
                    f.write_str(" ")?;
                    f.write_string(&escape.to_string())?;
                }
                Ok(())
            }
            Expr::Function(func) => f.write_node(func),
            Expr::Aggregate(agg) => f.write_node(agg),
            Expr::Cast { expr, data_type } => {
                f.write_keyword("CAST")?;
                f.write_str("(")?;
                f.write_node(expr)?;
                f.write_str(" ")?;
                f.write_keyword("AS")?;
                f.write_str(" ")?;
                f.write_node(data_type)?;
                f.write_str(")")
            }
            Expr::Subquery(subquery) => {
                f.write_str("(")?;
                f.write_node(subquery)?;
                f.write_str(")")
            }
            Expr::Exists { subquery, negated } => {
                write_negated(f, *negated)?;
                f.write_keyword("EXISTS")?;
                f.write_str(" (")?;
                f.write_node(subquery)?;
                f.write_str(")")
            }
            Expr::Nested(expr) => {
                f.write_str("(")?;
                f.write_node(expr)?;
                f.write_str(")")
            }
            Expr::Default => f.write_keyword("DEFAULT"),
        }
    }
}
impl_display!(Expr);

fn write_negated<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    negated: bool,
) -> Result<(), RestoreError> {
    if negated {
        f.write_keyword("NOT")?;
        f.write_str(" ")?;
    }
    Ok(())
}

impl Accept for Expr {
    /// Children are visited left to right as they appear in the restored
    /// text. Subqueries are visited as statements.
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        match self {
            Expr::Value(_) | Expr::Column(_) | Expr::ParamMarker | Expr::Default => true,
            Expr::Variable(var) => accept_opt_boxed(&mut var.value, visitor),
            Expr::BinaryOp { left, right, .. } => {
                accept_slot(&mut **left, visitor) && accept_slot(&mut **right, visitor)
            }
            Expr::UnaryOp { expr, .. } | Expr::IsNull { expr, .. } | Expr::Nested(expr) => {
                accept_slot(&mut **expr, visitor)
            }
            Expr::Cast { expr, .. } => accept_slot(&mut **expr, visitor),
            Expr::Between {
                expr, low, high, ..
            } => {
                accept_slot(&mut **expr, visitor)
                    && accept_slot(&mut **low, visitor)
                    && accept_slot(&mut **high, visitor)
            }
            Expr::InList { expr, list, .. } => {
                accept_slot(&mut **expr, visitor) && accept_list(list, visitor)
            }
            Expr::InSubquery { expr, subquery, .. } => {
                accept_slot(&mut **expr, visitor) && accept_slot(&mut **subquery, visitor)
            }
            Expr::Like { expr, pattern, .. } => {
                accept_slot(&mut **expr, visitor) && accept_slot(&mut **pattern, visitor)
            }
            Expr::Function(func) => accept_list(&mut func.args, visitor),
            Expr::Aggregate(agg) => accept_list(&mut agg.args, visitor),
            Expr::Subquery(subquery) | Expr::Exists { subquery, .. } => {
                accept_slot(&mut **subquery, visitor)
            }
        }
    }
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    IntDivide,
    Modulo,
    Eq,
    NotEq,
    NullSafeEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Xor,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
}

impl BinaryOperator {
    fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::IntDivide => "DIV",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::NullSafeEq => "<=>",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Xor => "XOR",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
        }
    }

    fn is_keyword(&self) -> bool {
        matches!(
            self,
            BinaryOperator::IntDivide
                | BinaryOperator::And
                | BinaryOperator::Or
                | BinaryOperator::Xor
        )
    }
}

impl AstDisplay for BinaryOperator {
    /// Keyword operators are always surrounded by spaces; symbolic operators
    /// only when [`RestoreFlags::SPACES_AROUND_BINARY_OPERATION`] is set.
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        if self.is_keyword() {
            f.write_str(" ")?;
            f.write_keyword(self.as_str())?;
            f.write_str(" ")
        } else if f
            .flags()
            .contains(RestoreFlags::SPACES_AROUND_BINARY_OPERATION)
        {
            f.write_str(format_args!(" {} ", self.as_str()))
        } else {
            f.write_str(self.as_str())
        }
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
    BitNeg,
}

/// A user or system variable, optionally being assigned with `:=`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableExpr {
    pub name: String,
    /// Whether this is a system (`@@`) variable.
    pub is_system: bool,
    pub is_global: bool,
    /// Whether the scope was written out, as in `@@SESSION.name`.
    pub explicit_scope: bool,
    pub value: Option<Box<Expr>>,
}

impl VariableExpr {
    /// Creates a reference to the user variable `@name`.
    pub fn user<S: Into<String>>(name: S) -> VariableExpr {
        VariableExpr {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a reference to the system variable `@@name`.
    pub fn system<S: Into<String>>(name: S) -> VariableExpr {
        VariableExpr {
            name: name.into(),
            is_system: true,
            ..Default::default()
        }
    }
}

impl AstDisplay for VariableExpr {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        if self.is_system {
            f.write_str("@@")?;
            if self.explicit_scope {
                f.write_keyword(if self.is_global { "GLOBAL" } else { "SESSION" })?;
                f.write_str(".")?;
            }
            f.write_str(&self.name)?;
        } else {
            f.write_str("@")?;
            f.write_name(&self.name)?;
        }
        if let Some(value) = &self.value {
            f.write_str(":=")?;
            f.write_node(value)?;
        }
        Ok(())
    }
}

/// A scalar function call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncCall {
    pub name: Ident,
    pub args: Vec<Expr>,
}

impl AstDisplay for FuncCall {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(self.name.as_str())?;
        f.write_str("(")?;
        f.write_node(&display::comma_separated(&self.args))?;
        f.write_str(")")
    }
}

/// An aggregate function call.
///
/// An empty argument list restores as `*`, the form `COUNT(*)` takes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregateCall {
    pub name: Ident,
    pub distinct: bool,
    pub args: Vec<Expr>,
}

impl AstDisplay for AggregateCall {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(self.name.as_str())?;
        f.write_str("(")?;
        if self.distinct {
            f.write_keyword("DISTINCT")?;
            f.write_str(" ")?;
        }
        if self.args.is_empty() {
            f.write_str("*")?;
        } else {
            f.write_node(&display::comma_separated(&self.args))?;
        }
        f.write_str(")")
    }
}
