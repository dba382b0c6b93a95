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

//! The abstract syntax tree of a MySQL-compatible SQL dialect.
//!
//! Every node can be written back to canonical SQL text ("restored") through
//! [`ast::display::AstDisplay`], and every statement can be walked and
//! rewritten by an [`ast::visit::Visitor`]. Statements that may carry
//! credentials additionally expose a redacted form through
//! [`redact::SensitiveStmt`].
//!
//! The optimizer hints found in `/*+ ... */` comments have a grammar of their
//! own, which [`parser::parse_optimizer_hints`] parses into
//! [`ast::TableOptimizerHint`] nodes.

#![warn(missing_debug_implementations)]

pub mod ast;
pub mod auth;
pub mod lexer;
pub mod parser;
pub mod redact;
