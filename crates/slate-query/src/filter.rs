use bson::Document;
use serde::{Deserialize, Serialize};

use crate::query::Query;
use crate::value::QueryValue;

/// How a clause chains onto the clauses before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

/// One predicate of a query's boolean filter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub boolean: LogicalOp,
    #[serde(flatten)]
    pub clause: Clause,
}

impl Filter {
    pub fn and(clause: Clause) -> Self {
        Self {
            boolean: LogicalOp::And,
            clause,
        }
    }

    pub fn or(clause: Clause) -> Self {
        Self {
            boolean: LogicalOp::Or,
            clause,
        }
    }
}

fn default_operator() -> String {
    "=".to_string()
}

/// The clause kinds, each carrying only the fields it compiles from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Clause {
    Basic {
        column: String,
        #[serde(default = "default_operator")]
        operator: String,
        value: QueryValue,
    },
    In {
        column: String,
        values: Vec<QueryValue>,
    },
    NotIn {
        column: String,
        values: Vec<QueryValue>,
    },
    Null {
        column: String,
    },
    NotNull {
        column: String,
    },
    Between {
        column: String,
        values: Vec<QueryValue>,
        #[serde(default)]
        not: bool,
    },
    All {
        column: String,
        values: Vec<QueryValue>,
    },
    Nested {
        query: Box<Query>,
    },
    Raw {
        document: Document,
    },
    /// Calendar-day comparison; `value` is a date or date-time.
    Date {
        column: String,
        #[serde(default = "default_operator")]
        operator: String,
        value: QueryValue,
    },
    Month {
        column: String,
        #[serde(default = "default_operator")]
        operator: String,
        value: QueryValue,
    },
    Day {
        column: String,
        #[serde(default = "default_operator")]
        operator: String,
        value: QueryValue,
    },
    Year {
        column: String,
        #[serde(default = "default_operator")]
        operator: String,
        value: QueryValue,
    },
    Time {
        column: String,
        #[serde(default = "default_operator")]
        operator: String,
        value: QueryValue,
    },
}

impl Clause {
    pub fn basic(column: &str, operator: &str, value: impl Into<QueryValue>) -> Self {
        Clause::Basic {
            column: column.to_string(),
            operator: operator.to_string(),
            value: value.into(),
        }
    }

    /// Short name of the clause kind, as it appears in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Clause::Basic { .. } => "basic",
            Clause::In { .. } => "in",
            Clause::NotIn { .. } => "not_in",
            Clause::Null { .. } => "null",
            Clause::NotNull { .. } => "not_null",
            Clause::Between { .. } => "between",
            Clause::All { .. } => "all",
            Clause::Nested { .. } => "nested",
            Clause::Raw { .. } => "raw",
            Clause::Date { .. } => "date",
            Clause::Month { .. } => "month",
            Clause::Day { .. } => "day",
            Clause::Year { .. } => "year",
            Clause::Time { .. } => "time",
        }
    }

    pub fn column(&self) -> Option<&str> {
        match self {
            Clause::Basic { column, .. }
            | Clause::In { column, .. }
            | Clause::NotIn { column, .. }
            | Clause::Null { column }
            | Clause::NotNull { column }
            | Clause::Between { column, .. }
            | Clause::All { column, .. }
            | Clause::Date { column, .. }
            | Clause::Month { column, .. }
            | Clause::Day { column, .. }
            | Clause::Year { column, .. }
            | Clause::Time { column, .. } => Some(column),
            Clause::Nested { .. } | Clause::Raw { .. } => None,
        }
    }

    pub fn operator_mut(&mut self) -> Option<&mut String> {
        match self {
            Clause::Basic { operator, .. }
            | Clause::Date { operator, .. }
            | Clause::Month { operator, .. }
            | Clause::Day { operator, .. }
            | Clause::Year { operator, .. }
            | Clause::Time { operator, .. } => Some(operator),
            _ => None,
        }
    }

    /// The single bound value, for kinds that carry one.
    pub fn value_mut(&mut self) -> Option<&mut QueryValue> {
        match self {
            Clause::Basic { value, .. }
            | Clause::Date { value, .. }
            | Clause::Month { value, .. }
            | Clause::Day { value, .. }
            | Clause::Year { value, .. }
            | Clause::Time { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The bound value list, for kinds that carry one.
    pub fn values_mut(&mut self) -> Option<&mut Vec<QueryValue>> {
        match self {
            Clause::In { values, .. }
            | Clause::NotIn { values, .. }
            | Clause::Between { values, .. }
            | Clause::All { values, .. } => Some(values),
            _ => None,
        }
    }
}
