//! Access plans
//!
//! An [`AccessPlan`] names the index to scan, the equality key condition
//! forming the scan key and the residual filter applied to scanned items.
//! Plans are immutable and carry no store handle.

use super::criteria::SearchField;
use crate::store::{FilterExpression, KeyCondition, QueryInput};

/// Which index a plan scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPath {
    /// Table primary key (title HASH, album RANGE)
    PrimaryKey,
    /// Single-attribute global secondary index
    SecondaryIndex(SearchField),
}

impl AccessPath {
    /// Index name passed to the store, `None` for the primary key
    pub fn index_name(&self) -> Option<&'static str> {
        match self {
            AccessPath::PrimaryKey => None,
            AccessPath::SecondaryIndex(field) => Some(field.index_name()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessPath::PrimaryKey => "PK_QUERY",
            AccessPath::SecondaryIndex(_) => "INDEX_QUERY",
        }
    }
}

/// Immutable access plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPlan {
    /// Name of the rule that produced this plan
    pub rule: &'static str,
    pub path: AccessPath,
    pub key_condition: KeyCondition,
    /// Conjunctive equality predicates on attributes outside the key
    pub residual: FilterExpression,
}

impl AccessPlan {
    /// Display name of the scanned index
    pub fn index_label(&self) -> &'static str {
        self.path.index_name().unwrap_or("PRIMARY")
    }

    /// Attributes filtered after the scan
    pub fn residual_attributes(&self) -> Vec<&str> {
        self.residual
            .predicates()
            .iter()
            .map(|p| p.attribute.as_str())
            .collect()
    }

    /// Store query equivalent of this plan
    pub fn to_query_input(&self) -> QueryInput {
        let query = match self.path.index_name() {
            None => QueryInput::primary(self.key_condition.clone()),
            Some(index) => QueryInput::on_index(index, self.key_condition.clone()),
        };
        query.with_filter(self.residual.clone())
    }
}
