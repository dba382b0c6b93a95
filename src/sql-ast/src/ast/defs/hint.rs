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

//! Optimizer hints.
//!
//! A hint's argument shape is a function of its name alone. [`HINT_SHAPES`]
//! maps every hint name this crate formats specially to its
//! [`HintShape`]; hints whose names are not in the table keep the argument
//! text they were written with.

use std::fmt;

use tracing::debug;

use crate::ast::display::{self, AstDisplay, AstFormatter};
use crate::ast::visit::{Accept, Visitor};
use crate::ast::{Ident, RestoreError};

/// The argument grammar of a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintShape {
    /// `NAME([@qb])`.
    NoArgs,
    /// `QB_NAME(name)`.
    QbName,
    /// `NAME([@qb ]table, ...)`.
    Tables,
    /// `NAME([@qb ]table index, ...)`.
    TableIndexes,
    /// `NAME([@qb ]n)`.
    Uint,
    /// `MEMORY_QUOTA([@qb ]n unit)`.
    MemoryQuota,
    /// `NAME([@qb ]TRUE|FALSE)`.
    Bool,
    /// `QUERY_TYPE([@qb ]OLAP|OLTP)`.
    QueryType,
    /// `TIME_RANGE([@qb ]'from', 'to')`.
    TimeRange,
    /// `READ_FROM_STORAGE([@qb ]ENGINE[table, ...], ...)`.
    Storage,
    /// `NAME([@qb ]STRATEGY, ...)`.
    Strategies,
    /// `NAME([@qb ]ident)`, with the identifier written back unquoted. The
    /// identifier must not be backquoted when parsed.
    RawIdent,
}

/// Hint names, in lower case, and their argument shapes.
pub const HINT_SHAPES: &[(&str, HintShape)] = &[
    ("hash_agg", HintShape::NoArgs),
    ("stream_agg", HintShape::NoArgs),
    ("agg_to_cop", HintShape::NoArgs),
    ("limit_to_cop", HintShape::NoArgs),
    ("read_consistent_replica", HintShape::NoArgs),
    ("mpp_1phase_agg", HintShape::NoArgs),
    ("mpp_2phase_agg", HintShape::NoArgs),
    ("ignore_plan_cache", HintShape::NoArgs),
    ("straight_join", HintShape::NoArgs),
    ("no_decorrelate", HintShape::NoArgs),
    ("qb_name", HintShape::QbName),
    ("bka", HintShape::Tables),
    ("no_bka", HintShape::Tables),
    ("bnl", HintShape::Tables),
    ("no_bnl", HintShape::Tables),
    ("derived_condition_pushdown", HintShape::Tables),
    ("no_derived_condition_pushdown", HintShape::Tables),
    ("hash_join", HintShape::Tables),
    ("no_hash_join", HintShape::Tables),
    ("join_fixed_order", HintShape::Tables),
    ("join_order", HintShape::Tables),
    ("join_prefix", HintShape::Tables),
    ("join_suffix", HintShape::Tables),
    ("merge", HintShape::Tables),
    ("no_merge", HintShape::Tables),
    ("leading", HintShape::Tables),
    ("merge_join", HintShape::Tables),
    ("no_merge_join", HintShape::Tables),
    ("broadcast_join", HintShape::Tables),
    ("shuffle_join", HintShape::Tables),
    ("inl_join", HintShape::Tables),
    ("no_index_join", HintShape::Tables),
    ("inl_hash_join", HintShape::Tables),
    ("no_index_hash_join", HintShape::Tables),
    ("inl_merge_join", HintShape::Tables),
    ("no_index_merge_join", HintShape::Tables),
    ("hash_join_build", HintShape::Tables),
    ("hash_join_probe", HintShape::Tables),
    ("tidb_smj", HintShape::Tables),
    ("tidb_inlj", HintShape::Tables),
    ("tidb_hj", HintShape::Tables),
    ("group_index", HintShape::TableIndexes),
    ("no_group_index", HintShape::TableIndexes),
    ("index", HintShape::TableIndexes),
    ("no_index", HintShape::TableIndexes),
    ("join_index", HintShape::TableIndexes),
    ("no_join_index", HintShape::TableIndexes),
    ("index_merge", HintShape::TableIndexes),
    ("no_index_merge", HintShape::TableIndexes),
    ("use_index", HintShape::TableIndexes),
    ("force_index", HintShape::TableIndexes),
    ("ignore_index", HintShape::TableIndexes),
    ("use_index_merge", HintShape::TableIndexes),
    ("order_index", HintShape::TableIndexes),
    ("no_order_index", HintShape::TableIndexes),
    ("mrr", HintShape::TableIndexes),
    ("no_mrr", HintShape::TableIndexes),
    ("no_icp", HintShape::TableIndexes),
    ("no_range_optimization", HintShape::TableIndexes),
    ("skip_scan", HintShape::TableIndexes),
    ("no_skip_scan", HintShape::TableIndexes),
    ("max_execution_time", HintShape::Uint),
    ("nth_plan", HintShape::Uint),
    ("memory_quota", HintShape::MemoryQuota),
    ("use_toja", HintShape::Bool),
    ("use_cascades", HintShape::Bool),
    ("query_type", HintShape::QueryType),
    ("time_range", HintShape::TimeRange),
    ("read_from_storage", HintShape::Storage),
    ("semijoin", HintShape::Strategies),
    ("no_semijoin", HintShape::Strategies),
    ("subquery", HintShape::Strategies),
    ("resource_group", HintShape::RawIdent),
];

/// Looks up the argument shape of the hint named `name`, ignoring case.
pub fn hint_shape(name: &str) -> Option<HintShape> {
    HINT_SHAPES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, shape)| *shape)
}

/// An optimizer hint, as written inside a `/*+ ... */` comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableOptimizerHint {
    /// The hint name, as written.
    pub name: Ident,
    /// The query block the hint applies to. For `QB_NAME` this is the name
    /// being assigned.
    pub qb_name: Option<Ident>,
    pub tables: Vec<HintTable>,
    pub indexes: Vec<Ident>,
    pub data: HintData,
}

impl TableOptimizerHint {
    /// Creates a hint with no arguments.
    pub fn new<I: Into<Ident>>(name: I) -> TableOptimizerHint {
        TableOptimizerHint {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the argument shape implied by the hint's name, or `None` if
    /// the name is not recognized.
    pub fn shape(&self) -> Option<HintShape> {
        hint_shape(self.name.as_str())
    }

    fn mismatch(&self, shape: HintShape) -> RestoreError {
        RestoreError::internal(
            "optimizer hint",
            format!(
                "{} expects {:?} arguments but carries {:?}",
                self.name.as_str(),
                shape,
                self.data
            ),
        )
    }
}

/// Argument values beyond the qualifier, tables, and indexes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HintData {
    #[default]
    None,
    Uint(u64),
    /// A memory quota, in bytes.
    MemoryQuota(u64),
    Bool(bool),
    QueryType(QueryType),
    TimeRange { from: String, to: String },
    Storage(Vec<HintStorage>),
    /// Strategy names, in upper case.
    Strategies(Vec<String>),
    /// Argument text written back verbatim: the identifier of a raw
    /// identifier hint, or the full argument text of an unrecognized hint.
    Raw(String),
}

/// A table named in a hint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HintTable {
    pub schema: Option<Ident>,
    pub table: Ident,
    pub qb_name: Option<Ident>,
    pub partitions: Vec<Ident>,
}

impl HintTable {
    /// Creates an unqualified hint table.
    pub fn new<I: Into<Ident>>(table: I) -> HintTable {
        HintTable {
            table: table.into(),
            ..Default::default()
        }
    }
}

impl AstDisplay for HintTable {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        if let Some(schema) = &self.schema {
            f.write_node(schema)?;
            f.write_str(".")?;
        }
        f.write_node(&self.table)?;
        if let Some(qb_name) = &self.qb_name {
            f.write_str("@")?;
            f.write_node(qb_name)?;
        }
        if !self.partitions.is_empty() {
            f.write_str(" ")?;
            f.write_keyword("PARTITION")?;
            f.write_str("(")?;
            f.write_node(&display::comma_separated(&self.partitions))?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// The tables a `READ_FROM_STORAGE` hint routes to one storage engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintStorage {
    pub engine: StorageEngine,
    pub tables: Vec<HintTable>,
}

impl AstDisplay for HintStorage {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_node(&self.engine)?;
        f.write_str("[")?;
        f.write_node(&display::comma_separated(&self.tables))?;
        f.write_str("]")
    }
}

/// A storage engine named by `READ_FROM_STORAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageEngine {
    Tikv,
    Tiflash,
}

impl StorageEngine {
    /// Parses an engine name, ignoring case.
    pub fn from_name(name: &str) -> Option<StorageEngine> {
        if name.eq_ignore_ascii_case("tikv") {
            Some(StorageEngine::Tikv)
        } else if name.eq_ignore_ascii_case("tiflash") {
            Some(StorageEngine::Tiflash)
        } else {
            None
        }
    }
}

impl AstDisplay for StorageEngine {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(match self {
            StorageEngine::Tikv => "TIKV",
            StorageEngine::Tiflash => "TIFLASH",
        })
    }
}

/// The workload a `QUERY_TYPE` hint declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Olap,
    Oltp,
}

impl AstDisplay for QueryType {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        f.write_keyword(match self {
            QueryType::Olap => "OLAP",
            QueryType::Oltp => "OLTP",
        })
    }
}

impl AstDisplay for TableOptimizerHint {
    fn fmt<W: fmt::Write>(&self, f: &mut AstFormatter<W>) -> Result<(), RestoreError> {
        let Some(shape) = self.shape() else {
            debug!(hint = self.name.as_str(), "restoring unrecognized optimizer hint verbatim");
            f.write_str(self.name.as_str())?;
            f.write_str("(")?;
            return match &self.data {
                HintData::Raw(raw) => {
                    f.write_str(raw)?;
                    f.write_str(")")
                }
                HintData::None => f.write_str(")"),
                _ => Err(RestoreError::internal(
                    "optimizer hint",
                    format!("unrecognized hint {} carries typed arguments", self.name.as_str()),
                )),
            };
        };

        f.write_keyword(self.name.as_str())?;
        f.write_str("(")?;
        if shape == HintShape::QbName {
            if let Some(qb_name) = &self.qb_name {
                f.write_node(qb_name)?;
            }
            return f.write_str(")");
        }
        if let Some(qb_name) = &self.qb_name {
            f.write_str("@")?;
            f.write_node(qb_name)?;
            if shape != HintShape::NoArgs {
                f.write_str(" ")?;
            }
        }

        match (shape, &self.data) {
            (HintShape::NoArgs, HintData::None) => {}
            (HintShape::Tables, HintData::None) => {
                f.write_node(&display::comma_separated(&self.tables))?;
            }
            (HintShape::TableIndexes, HintData::None) => {
                f.write_node(&display::comma_separated(&self.tables))?;
                if !self.indexes.is_empty() {
                    f.write_str(" ")?;
                    f.write_node(&display::comma_separated(&self.indexes))?;
                }
            }
            (HintShape::Uint, HintData::Uint(n)) => f.write_str(n)?,
            (HintShape::MemoryQuota, HintData::MemoryQuota(bytes)) => {
                f.write_str(bytes / bytesize::MIB)?;
                f.write_str(" MB")?;
            }
            (HintShape::Bool, HintData::Bool(b)) => {
                f.write_keyword(if *b { "TRUE" } else { "FALSE" })?;
            }
            (HintShape::QueryType, HintData::QueryType(query_type)) => f.write_node(query_type)?,
            (HintShape::TimeRange, HintData::TimeRange { from, to }) => {
                f.write_string(from)?;
                f.write_str(", ")?;
                f.write_string(to)?;
            }
            (HintShape::Storage, HintData::Storage(storages)) => {
                f.write_node(&display::comma_separated(storages))?;
            }
            (HintShape::Strategies, HintData::Strategies(strategies)) => {
                for (i, strategy) in strategies.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_keyword(strategy)?;
                }
            }
            (HintShape::RawIdent, HintData::Raw(ident)) => f.write_str(ident)?,
            (shape, _) => return Err(self.mismatch(shape)),
        }
        f.write_str(")")
    }
}
impl_display!(TableOptimizerHint);

impl Accept for TableOptimizerHint {
    /// Hints have no child nodes.
    fn accept_children<V>(&mut self, _: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        true
    }
}

/// Restores the hint comment that opens a SELECT, UPDATE or DELETE, with a
/// trailing space, or nothing if there are no hints.
pub(crate) fn write_hints<W: fmt::Write>(
    f: &mut AstFormatter<W>,
    hints: &[TableOptimizerHint],
) -> Result<(), RestoreError> {
    if hints.is_empty() {
        return Ok(());
    }
    f.write_str("/*+ ")?;
    f.write_node(&display::separated(hints, " "))?;
    f.write_str("*/ ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::display::AstDisplay;

    #[test]
    fn test_shape_lookup_ignores_case() {
        assert_eq!(hint_shape("USE_INDEX"), Some(HintShape::TableIndexes));
        assert_eq!(hint_shape("Memory_Quota"), Some(HintShape::MemoryQuota));
        assert_eq!(hint_shape("no_such_hint"), None);
    }

    #[test]
    fn test_shape_table_names_are_unique_and_lowercase() {
        for (i, (name, _)) in HINT_SHAPES.iter().enumerate() {
            assert_eq!(*name, name.to_lowercase());
            assert!(
                HINT_SHAPES[i + 1..].iter().all(|(other, _)| other != name),
                "{} listed twice",
                name
            );
        }
    }

    #[test]
    fn test_mismatched_payload_is_internal_error() {
        let hint = TableOptimizerHint {
            data: HintData::Bool(true),
            ..TableOptimizerHint::new("max_execution_time")
        };
        assert!(matches!(
            hint.to_ast_string(),
            Err(RestoreError::Internal { .. })
        ));
    }

    #[test]
    fn test_qualifier_spacing() {
        let hint = TableOptimizerHint {
            qb_name: Some("sel1".into()),
            ..TableOptimizerHint::new("hash_agg")
        };
        assert_eq!(hint.to_ast_string().unwrap(), "HASH_AGG(@`sel1`)");

        let hint = TableOptimizerHint {
            qb_name: Some("qb1".into()),
            ..TableOptimizerHint::new("bka")
        };
        assert_eq!(hint.to_ast_string().unwrap(), "BKA(@`qb1` )");
    }

    #[test]
    fn test_unrecognized_hint_passes_through() {
        let hint = TableOptimizerHint {
            data: HintData::Raw("t1, 'x' (y)".into()),
            ..TableOptimizerHint::new("brand_new_hint")
        };
        assert_eq!(hint.to_ast_string().unwrap(), "brand_new_hint(t1, 'x' (y))");
    }
}
