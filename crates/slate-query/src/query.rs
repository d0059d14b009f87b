use bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::sort::Sort;

/// A finished, store-independent query description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    /// Target collection.
    pub source: String,
    /// Requested fields. Empty or `["*"]` selects everything.
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
    pub groups: Vec<String>,
    pub aggregate: Option<Aggregate>,
    pub orders: Vec<Sort>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    /// Server-side execution budget, in seconds.
    pub timeout: Option<u64>,
    /// Index hint handed to the store as-is.
    pub hint: Option<Bson>,
    /// Explicit projection; wins over `columns` for the same field.
    pub projections: Document,
    /// Driver options merged over everything the compiler emits.
    pub options: Document,
    /// Restrict aggregate output to the requested columns.
    pub paginating: bool,
}

impl Query {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Default::default()
        }
    }

    /// Requested columns with the `*` wildcard removed.
    pub fn selected_columns(&self) -> Vec<String> {
        if self.columns.iter().any(|c| c == "*") {
            return Vec::new();
        }
        self.columns.clone()
    }

    pub fn is_aggregate(&self) -> bool {
        !self.groups.is_empty() || self.aggregate.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub function: String,
    pub columns: Vec<String>,
}
