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

/// An error that prevents a node from being restored to text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    /// The node holds a combination of fields that no parse can produce.
    #[error("internal error while restoring {node}: {detail}")]
    Internal {
        /// The kind of node being restored.
        node: &'static str,
        /// What was inconsistent about it.
        detail: String,
    },
    /// The output sink rejected a write.
    #[error("failed to write restored text")]
    Write(#[from] fmt::Error),
}

impl RestoreError {
    pub(crate) fn internal(node: &'static str, detail: impl Into<String>) -> RestoreError {
        RestoreError::Internal {
            node,
            detail: detail.into(),
        }
    }
}
