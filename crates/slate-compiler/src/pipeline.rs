use bson::{Bson, Document, doc};
use slate_query::{Aggregate, Query};

use crate::options::{int, sort_document};

/// Separator marking an aggregate over each element of a subdocument array:
/// `items.*.price` unwinds `items` and aggregates `items.price`.
const ARRAY_WILDCARD: &str = ".*.";

/// Build the aggregation stages for a query whose filter document has
/// already been compiled.
pub fn compile_pipeline(query: &Query, filter: Document) -> Vec<Document> {
    let columns = query.selected_columns();
    let mut unwinds = Vec::new();
    let mut group = Document::new();

    if query.is_aggregate() {
        group.insert("_id", group_key(&query.groups));
    }

    if !query.groups.is_empty() {
        for column in &query.groups {
            group.insert(column.clone(), doc! { "$last": format!("${column}") });
        }
        for column in columns.iter().filter(|c| !query.groups.contains(*c)) {
            group.insert(column.replace('.', "_"), doc! { "$last": format!("${column}") });
        }
    }

    if let Some(aggregate) = &query.aggregate {
        accumulate(aggregate, &mut group, &mut unwinds);
    }

    let mut projections = query.projections.clone();
    if query.paginating {
        for column in &columns {
            projections.insert(column.clone(), 1);
        }
    }

    let mut pipeline = Vec::new();
    if !filter.is_empty() {
        pipeline.push(doc! { "$match": filter });
    }
    for path in unwinds {
        pipeline.push(doc! { "$unwind": format!("${path}") });
    }
    if !group.is_empty() {
        pipeline.push(doc! { "$group": group });
    }
    if !query.orders.is_empty() {
        pipeline.push(doc! { "$sort": sort_document(&query.orders) });
    }
    if let Some(offset) = query.offset.filter(|o| *o > 0) {
        pipeline.push(doc! { "$skip": int(offset) });
    }
    if let Some(limit) = query.limit.filter(|l| *l > 0) {
        pipeline.push(doc! { "$limit": int(limit) });
    }
    if !projections.is_empty() {
        pipeline.push(doc! { "$project": projections });
    }
    pipeline
}

/// `{column: "$column"}` per grouping column, or null to fold every input
/// document into one group.
fn group_key(groups: &[String]) -> Bson {
    if groups.is_empty() {
        return Bson::Null;
    }
    let key: Document = groups
        .iter()
        .map(|column| (column.clone(), Bson::String(format!("${column}"))))
        .collect();
    Bson::Document(key)
}

/// Write the aggregate accumulator. Every column targets the same
/// `aggregate` key, so only the last column survives.
fn accumulate(aggregate: &Aggregate, group: &mut Document, unwinds: &mut Vec<String>) {
    for column in &aggregate.columns {
        let parts: Vec<&str> = column.split(ARRAY_WILDCARD).collect();
        let column = if let [array, field] = parts.as_slice() {
            unwinds.push(array.to_string());
            format!("{array}.{field}")
        } else {
            column.clone()
        };

        let accumulator = if aggregate.function == "count" {
            doc! { "$sum": 1 }
        } else {
            doc! { format!("${}", aggregate.function): format!("${column}") }
        };
        group.insert("aggregate", accumulator);
    }
}
