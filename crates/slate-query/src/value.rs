use bson::Bson;
use bson::oid::ObjectId;
use chrono::{DateTime, FixedOffset, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A literal bound to a filter clause.
///
/// Decoded untagged. Strings always stay `String`; a date-time is written
/// as `{"$date": "<RFC 3339>"}`. `Native` carries values that are already
/// in their store representation (object ids, regexes, UTC datetimes).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    DateTime(#[serde(with = "extended_date")] DateTime<FixedOffset>),
    String(String),
    Array(Vec<QueryValue>),
    Document(IndexMap<String, QueryValue>),
    Native(Bson),
}

/// `{"$date": "..."}` form of a date-time. Extra keys make it an ordinary
/// document.
mod extended_date {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Wrapped {
        #[serde(rename = "$date")]
        date: DateTime<FixedOffset>,
    }

    pub fn serialize<S: Serializer>(
        date: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        Wrapped { date: *date }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        Wrapped::deserialize(deserializer).map(|wrapped| wrapped.date)
    }
}

impl QueryValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, QueryValue::Null | QueryValue::Native(Bson::Null))
    }
}

impl From<QueryValue> for Bson {
    fn from(value: QueryValue) -> Self {
        match value {
            QueryValue::Null => Bson::Null,
            QueryValue::Bool(b) => Bson::Boolean(b),
            QueryValue::Int(i) => match i32::try_from(i) {
                Ok(small) => Bson::Int32(small),
                Err(_) => Bson::Int64(i),
            },
            QueryValue::Float(f) => Bson::Double(f),
            QueryValue::DateTime(dt) => {
                Bson::DateTime(bson::DateTime::from_millis(dt.timestamp_millis()))
            }
            QueryValue::String(s) => Bson::String(s),
            QueryValue::Array(items) => Bson::Array(items.into_iter().map(Bson::from).collect()),
            QueryValue::Document(fields) => Bson::Document(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Bson::from(value)))
                    .collect(),
            ),
            QueryValue::Native(b) => b,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::String(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::String(s)
    }
}

impl From<i32> for QueryValue {
    fn from(i: i32) -> Self {
        QueryValue::Int(i.into())
    }
}

impl From<i64> for QueryValue {
    fn from(i: i64) -> Self {
        QueryValue::Int(i)
    }
}

impl From<f64> for QueryValue {
    fn from(f: f64) -> Self {
        QueryValue::Float(f)
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Bool(b)
    }
}

impl From<DateTime<FixedOffset>> for QueryValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        QueryValue::DateTime(dt)
    }
}

impl From<DateTime<Utc>> for QueryValue {
    fn from(dt: DateTime<Utc>) -> Self {
        QueryValue::DateTime(dt.into())
    }
}

impl From<ObjectId> for QueryValue {
    fn from(oid: ObjectId) -> Self {
        QueryValue::Native(Bson::ObjectId(oid))
    }
}

impl From<Bson> for QueryValue {
    fn from(b: Bson) -> Self {
        QueryValue::Native(b)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(items: Vec<T>) -> Self {
        QueryValue::Array(items.into_iter().map(Into::into).collect())
    }
}
