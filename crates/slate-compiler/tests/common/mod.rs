#![allow(dead_code)]

use bson::Bson;
use slate_compiler::{Command, Compiler};
use slate_query::{Aggregate, Clause, Filter, Query, QueryValue};

pub const COLLECTION: &str = "accounts";
pub const OID: &str = "507f1f77bcf86cd799439011";

pub fn compiler() -> Compiler {
    Compiler::default()
}

pub fn query() -> Query {
    Query::new(COLLECTION)
}

pub fn where_(column: &str, operator: &str, value: impl Into<QueryValue>) -> Filter {
    Filter::and(Clause::basic(column, operator, value))
}

pub fn or_where(column: &str, operator: &str, value: impl Into<QueryValue>) -> Filter {
    Filter::or(Clause::basic(column, operator, value))
}

pub fn values(items: &[&str]) -> Vec<QueryValue> {
    items.iter().map(|s| QueryValue::from(*s)).collect()
}

pub fn aggregate(function: &str, columns: &[&str]) -> Option<Aggregate> {
    Some(Aggregate {
        function: function.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
    })
}

/// Compile `filters` alone and return the query document.
pub fn compile_where(filters: Vec<Filter>) -> bson::Document {
    compiler().compile_filters(&filters).unwrap()
}

pub fn regex_parts(value: &Bson) -> (String, String) {
    match value {
        Bson::RegularExpression(re) => {
            (re.pattern.as_str().to_string(), re.options.as_str().to_string())
        }
        other => panic!("expected regex, got {other:?}"),
    }
}

pub fn unwrap_find(command: Command) -> (String, bson::Document, bson::Document) {
    match command {
        Command::Find {
            collection,
            query,
            options,
        } => (collection, query, options),
        other => panic!("expected Find, got {other:?}"),
    }
}

pub fn unwrap_aggregate(command: Command) -> (Vec<bson::Document>, bson::Document) {
    match command {
        Command::Aggregate {
            pipeline, options, ..
        } => (pipeline, options),
        other => panic!("expected Aggregate, got {other:?}"),
    }
}
