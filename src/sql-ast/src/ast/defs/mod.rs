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

mod brie;
mod ddl;
mod dml;
mod expr;
pub(crate) mod hint;
mod misc;
mod name;
pub(crate) mod query;
mod statement;
mod user;
mod value;

pub use brie::*;
pub use ddl::*;
pub use dml::*;
pub use expr::*;
pub use hint::*;
pub use misc::*;
pub use name::*;
pub use query::*;
pub use statement::*;
pub use user::*;
pub use value::*;
