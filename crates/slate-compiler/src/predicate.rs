use bson::{Bson, Document, doc};
use chrono::{DateTime, NaiveDate};
use slate_query::{Clause, QueryValue};

use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::filter::compile_filters;
use crate::operator::{self, Comparison};
use crate::pattern;

const DAY_MILLIS: i64 = 86_400_000;

/// Compile one clause into a document fragment.
///
/// The clause is expected to be normalized already: lowercase canonical
/// operator, coerced values.
pub fn compile_clause(clause: Clause, config: &CompilerConfig) -> Result<Document, CompileError> {
    match clause {
        Clause::Basic {
            column,
            operator,
            value,
        } => basic(column, &operator, value),
        Clause::In { column, values } => Ok(doc! { column: { "$in": values } }),
        Clause::NotIn { column, values } => Ok(doc! { column: { "$nin": values } }),
        Clause::Null { column } => basic(column, "=", QueryValue::Null),
        Clause::NotNull { column } => basic(column, "!=", QueryValue::Null),
        Clause::Between {
            column,
            values,
            not,
        } => between(column, values, not),
        Clause::All { column, values } => Ok(doc! { column: { "$all": values } }),
        Clause::Nested { query } => compile_filters(&query.filters, config),
        Clause::Raw { document } => Ok(document),
        Clause::Date {
            column,
            operator,
            value,
        } => date(column, &operator, value),
        Clause::Month {
            column,
            operator,
            value,
        } => date_part("$month", column, &operator, value),
        Clause::Day {
            column,
            operator,
            value,
        } => date_part("$dayOfMonth", column, &operator, value),
        Clause::Year {
            column,
            operator,
            value,
        } => date_part("$year", column, &operator, value),
        Clause::Time {
            column,
            operator,
            value,
        } => basic(column, &operator, value),
    }
}

fn basic(column: String, operator: &str, value: QueryValue) -> Result<Document, CompileError> {
    let (operator, value) = match operator {
        "like" | "not like" => {
            let source = value.as_str().ok_or_else(|| {
                CompileError::InvalidQuery(format!("{operator} on {column} needs a string value"))
            })?;
            let regex = pattern::regex(&pattern::like_pattern(source), "i")?;
            let operator = if operator == "like" { "=" } else { operator };
            (operator, QueryValue::Native(regex))
        }
        "regex" | "not regex" | "not regexp" => (operator, pattern::regex_value(value)?),
        _ => (operator, value),
    };

    Ok(match operator::lookup(operator) {
        Comparison::Equality => doc! { column: value },
        Comparison::Token(token) => doc! { column: { token: value } },
    })
}

/// `not` yields an OR of the two inclusive bounds, not the complement of
/// the range.
fn between(column: String, values: Vec<QueryValue>, not: bool) -> Result<Document, CompileError> {
    let [low, high]: [QueryValue; 2] = values.try_into().map_err(|_| CompileError::MissingField {
        clause: "between",
        field: "values",
    })?;

    if not {
        let below = doc! { column.as_str(): { "$lte": low } };
        let above = doc! { column.as_str(): { "$gte": high } };
        Ok(doc! { "$or": [below, above] })
    } else {
        Ok(doc! { column: { "$gte": low, "$lte": high } })
    }
}

/// Compare against a whole UTC calendar day.
fn date(column: String, operator: &str, value: QueryValue) -> Result<Document, CompileError> {
    let start = day_start(&value)?;
    let end = start.checked_add(DAY_MILLIS - 1).ok_or_else(out_of_range)?;
    let first = Bson::DateTime(bson::DateTime::from_millis(start));
    let last = Bson::DateTime(bson::DateTime::from_millis(end));

    match operator {
        "=" => Ok(doc! { column: { "$gte": first, "$lte": last } }),
        "!=" | "<>" => {
            let before = doc! { column.as_str(): { "$lt": first } };
            let after = doc! { column.as_str(): { "$gt": last } };
            Ok(doc! { "$or": [before, after] })
        }
        "<" | ">=" => Ok(doc! { column: { comparison_token(operator): first } }),
        ">" | "<=" => Ok(doc! { column: { comparison_token(operator): last } }),
        other => Err(CompileError::InvalidQuery(format!(
            "unsupported operator for date comparison: {other}"
        ))),
    }
}

/// Compare one component of a stored date through `$expr`.
fn date_part(
    function: &str,
    column: String,
    operator: &str,
    value: QueryValue,
) -> Result<Document, CompileError> {
    let number = match value {
        QueryValue::Int(n) => n,
        QueryValue::String(ref s) => s.trim().parse::<i64>().map_err(|_| {
            CompileError::InvalidQuery(format!("{function} comparison needs an integer, got {s:?}"))
        })?,
        other => {
            return Err(CompileError::InvalidQuery(format!(
                "{function} comparison needs an integer, got {other:?}"
            )));
        }
    };
    let token = comparison_token(operator);
    let field = format!("${column}");

    Ok(doc! {
        "$expr": { token: [{ function: field }, QueryValue::Int(number)] }
    })
}

fn comparison_token(operator: &str) -> String {
    match operator::lookup(operator) {
        Comparison::Equality => "$eq".to_string(),
        Comparison::Token(token) => token,
    }
}

/// Millisecond timestamp of UTC midnight for the day a value falls on.
fn day_start(value: &QueryValue) -> Result<i64, CompileError> {
    let millis = match value {
        QueryValue::Native(Bson::DateTime(dt)) => dt.timestamp_millis(),
        QueryValue::DateTime(dt) => dt.timestamp_millis(),
        QueryValue::String(s) => {
            if let Ok(day) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
                day.and_hms_opt(0, 0, 0)
                    .map(|midnight| midnight.and_utc().timestamp_millis())
                    .ok_or_else(|| CompileError::InvalidQuery(format!("invalid date: {s}")))?
            } else {
                DateTime::parse_from_rfc3339(s.trim())
                    .map_err(|e| CompileError::InvalidQuery(format!("invalid date {s:?}: {e}")))?
                    .timestamp_millis()
            }
        }
        other => {
            return Err(CompileError::InvalidQuery(format!(
                "date comparison needs a date, got {other:?}"
            )));
        }
    };
    millis
        .div_euclid(DAY_MILLIS)
        .checked_mul(DAY_MILLIS)
        .ok_or_else(out_of_range)
}

fn out_of_range() -> CompileError {
    CompileError::InvalidQuery("date out of range".to_string())
}
