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

//! Depth-first traversal of AST nodes.
//!
//! A [`Visitor`] sees every node twice: [`Visitor::enter`] before the node's
//! children are walked and [`Visitor::leave`] afterwards. Both hooks receive
//! the node by value wrapped in a [`Node`] and hand back the node that should
//! occupy the slot from then on, so a visitor rewrites the tree simply by
//! returning a different node. The driver in [`Accept::accept`] writes the
//! returned node back into the parent's slot before moving on to the next
//! sibling.
//!
//! Each node kind documents the order in which its children are visited on
//! its [`Accept::accept_children`] implementation. Absent optional children
//! are skipped.

use std::fmt;
use std::mem;

use crate::ast::display::{AstDisplay, AstFormatter};
use crate::ast::{
    Assignment, ByItem, ColumnDef, Constraint, Expr, PrivElem, RestoreError, SelectField,
    SelectStmt, Statement, TableName, TableOptimizerHint, TableRef, VariableAssignment,
};

macro_rules! node_kinds {
    ($($kind:ident($ty:ty)),* $(,)?) => {
        /// A visitable AST node of any kind.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Node {
            $($kind($ty)),*
        }

        impl Node {
            /// Returns the name of the node's kind.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(Node::$kind(_) => stringify!($kind)),*
                }
            }
        }

        impl AstDisplay for Node {
            fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
                match self {
                    $(Node::$kind(n) => f.write_node(n)),*
                }
            }
        }

        $(
            impl From<$ty> for Node {
                fn from(n: $ty) -> Node {
                    Node::$kind(n)
                }
            }

            impl TryFrom<Node> for $ty {
                type Error = Node;

                fn try_from(node: Node) -> Result<$ty, Node> {
                    match node {
                        Node::$kind(n) => Ok(n),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

node_kinds! {
    Statement(Statement),
    Expr(Expr),
    TableName(TableName),
    TableRef(TableRef),
    SelectField(SelectField),
    ByItem(ByItem),
    Assignment(Assignment),
    ColumnDef(ColumnDef),
    Constraint(Constraint),
    PrivElem(PrivElem),
    VariableAssignment(VariableAssignment),
    OptimizerHint(TableOptimizerHint),
}

// A SELECT embedded in an expression or table reference is presented to
// visitors as a statement.
impl From<SelectStmt> for Node {
    fn from(select: SelectStmt) -> Node {
        Node::Statement(Statement::Select(Box::new(select)))
    }
}

impl TryFrom<Node> for SelectStmt {
    type Error = Node;

    fn try_from(node: Node) -> Result<SelectStmt, Node> {
        match node {
            Node::Statement(Statement::Select(select)) => Ok(*select),
            other => Err(other),
        }
    }
}

/// Observes, and optionally rewrites, nodes during a traversal.
pub trait Visitor {
    /// Called before the children of `node` are visited.
    ///
    /// Returns the node to continue with and whether to skip its children.
    /// [`Visitor::leave`] is called even when the children are skipped.
    fn enter(&mut self, node: Node) -> (Node, bool) {
        (node, false)
    }

    /// Called after the children of `node` have been visited.
    ///
    /// Returns the node to leave in place and whether the traversal should
    /// continue. Returning `false` abandons the remaining siblings and
    /// ancestors.
    fn leave(&mut self, node: Node) -> (Node, bool) {
        (node, true)
    }
}

/// A node kind that can be walked by a [`Visitor`].
pub trait Accept: Sized + Into<Node> + TryFrom<Node, Error = Node> {
    /// Visits each child of this node in order, stopping early if a child
    /// reports that the traversal should not continue.
    ///
    /// Returns whether the traversal should continue.
    fn accept_children<V>(&mut self, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized;

    /// Walks this node and its descendants with `visitor`.
    ///
    /// Returns the possibly replaced node and whether the traversal ran to
    /// completion.
    ///
    /// # Panics
    ///
    /// Panics if the visitor replaces the node with a node of a different
    /// kind, as the replacement could not be stored in the parent.
    fn accept<V>(self, visitor: &mut V) -> (Self, bool)
    where
        V: Visitor + ?Sized,
    {
        let (node, skip_children) = visitor.enter(self.into());
        let mut node = splice::<Self>(node);
        if !skip_children && !node.accept_children(visitor) {
            return (node, false);
        }
        let (node, ok) = visitor.leave(node.into());
        (splice(node), ok)
    }
}

fn splice<T>(node: Node) -> T
where
    T: TryFrom<Node, Error = Node>,
{
    match T::try_from(node) {
        Ok(n) => n,
        Err(node) => panic!(
            "visitor returned an incompatible {} node for a {} slot",
            node.kind(),
            std::any::type_name::<T>()
        ),
    }
}

/// Walks the node in a required slot, writing back its replacement.
pub(crate) fn accept_slot<T, V>(slot: &mut T, visitor: &mut V) -> bool
where
    T: Accept + Default,
    V: Visitor + ?Sized,
{
    let (node, ok) = mem::take(slot).accept(visitor);
    *slot = node;
    ok
}

/// Walks the node in an optional slot, if present.
pub(crate) fn accept_opt<T, V>(slot: &mut Option<T>, visitor: &mut V) -> bool
where
    T: Accept,
    V: Visitor + ?Sized,
{
    match slot.take() {
        Some(node) => {
            let (node, ok) = node.accept(visitor);
            *slot = Some(node);
            ok
        }
        None => true,
    }
}

/// Walks the boxed node in an optional slot, if present.
pub(crate) fn accept_opt_boxed<T, V>(slot: &mut Option<Box<T>>, visitor: &mut V) -> bool
where
    T: Accept,
    V: Visitor + ?Sized,
{
    match slot.take() {
        Some(node) => {
            let (node, ok) = (*node).accept(visitor);
            *slot = Some(Box::new(node));
            ok
        }
        None => true,
    }
}

/// Walks each node of a list in order.
pub(crate) fn accept_list<T, V>(slots: &mut [T], visitor: &mut V) -> bool
where
    T: Accept + Default,
    V: Visitor + ?Sized,
{
    slots.iter_mut().all(|slot| accept_slot(slot, visitor))
}
