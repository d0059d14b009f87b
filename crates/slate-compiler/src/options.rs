use bson::{Bson, Document, doc};
use slate_query::{Query, Sort};

/// Build the options document shared by find and aggregate commands.
///
/// Zero offsets, limits and timeouts count as unset. Caller-supplied
/// options are merged last and win over every generated key.
pub fn compile_options(query: &Query) -> Document {
    let mut options = Document::new();

    if let Some(timeout) = query.timeout.filter(|t| *t > 0) {
        options.insert("maxTimeMS", int(timeout.saturating_mul(1000)));
    }
    if !query.orders.is_empty() {
        options.insert("sort", sort_document(&query.orders));
    }
    if let Some(offset) = query.offset.filter(|o| *o > 0) {
        options.insert("skip", int(offset));
    }
    if let Some(limit) = query.limit.filter(|l| *l > 0) {
        options.insert("limit", int(limit));
    }
    if let Some(hint) = &query.hint {
        options.insert("hint", hint.clone());
    }

    let projection = projection(&query.selected_columns(), &query.projections);
    if !projection.is_empty() {
        options.insert("projection", projection);
    }

    // Decode results as plain ordered mappings rather than typed records.
    options.insert("typeMap", doc! { "root": "array", "document": "array" });

    for (key, value) in &query.options {
        options.insert(key.clone(), value.clone());
    }
    options
}

/// Selected columns as inclusions, overridden by explicit projections.
pub fn projection(columns: &[String], projections: &Document) -> Document {
    let mut projection = Document::new();
    for column in columns {
        projection.insert(column.clone(), true);
    }
    for (key, value) in projections {
        projection.insert(key.clone(), value.clone());
    }
    projection
}

pub fn sort_document(orders: &[Sort]) -> Document {
    orders
        .iter()
        .map(|sort| (sort.field.clone(), Bson::Int32(sort.direction.as_i32())))
        .collect()
}

/// Counts encode as 32-bit when they fit.
pub(crate) fn int(n: u64) -> Bson {
    match i32::try_from(n) {
        Ok(small) => Bson::Int32(small),
        Err(_) => Bson::Int64(i64::try_from(n).unwrap_or(i64::MAX)),
    }
}
