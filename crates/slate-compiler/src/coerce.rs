use bson::Bson;
use bson::oid::ObjectId;
use slate_query::QueryValue;

/// True for exactly 24 hexadecimal characters.
pub fn is_object_id_hex(s: &str) -> bool {
    s.len() == 24 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// True when `column` is the identifier field or a path ending in it.
/// An empty identifier field matches nothing.
pub fn is_identifier_column(column: &str, id_field: &str) -> bool {
    if id_field.is_empty() {
        return false;
    }
    if column == id_field {
        return true;
    }
    column
        .strip_suffix(id_field)
        .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Convert a 24-hex-digit string into an ObjectId. Everything else,
/// including values that are already ObjectIds, passes through.
pub fn identifier(value: QueryValue) -> QueryValue {
    match value {
        QueryValue::String(s) if is_object_id_hex(&s) => match ObjectId::parse_str(&s) {
            Ok(oid) => QueryValue::Native(Bson::ObjectId(oid)),
            Err(_) => QueryValue::String(s),
        },
        other => other,
    }
}

/// Replace every date-time, at any depth, with the store's UTC millisecond
/// timestamp. Sub-millisecond precision is truncated.
pub fn dates(value: QueryValue) -> QueryValue {
    match value {
        QueryValue::DateTime(dt) => {
            QueryValue::Native(Bson::DateTime(bson::DateTime::from_millis(dt.timestamp_millis())))
        }
        QueryValue::Array(items) => QueryValue::Array(items.into_iter().map(dates).collect()),
        QueryValue::Document(fields) => QueryValue::Document(
            fields
                .into_iter()
                .map(|(key, value)| (key, dates(value)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    const OID: &str = "507f1f77bcf86cd799439011";

    #[test]
    fn hex_detection() {
        assert!(is_object_id_hex(OID));
        assert!(is_object_id_hex("507F1F77BCF86CD799439011"));
        assert!(!is_object_id_hex("507f1f77bcf86cd79943901"));
        assert!(!is_object_id_hex("507f1f77bcf86cd7994390111"));
        assert!(!is_object_id_hex("507f1f77bcf86cd79943901z"));
    }

    #[test]
    fn identifier_columns() {
        assert!(is_identifier_column("_id", "_id"));
        assert!(is_identifier_column("author._id", "_id"));
        assert!(!is_identifier_column("author_id", "_id"));
        assert!(!is_identifier_column("id", "_id"));
        assert!(is_identifier_column("user.key", "key"));
    }

    #[test]
    fn empty_identifier_field_matches_nothing() {
        assert!(!is_identifier_column("", ""));
        assert!(!is_identifier_column("author.", ""));
        assert!(!is_identifier_column("_id", ""));
    }

    #[test]
    fn identifier_converts_hex_strings_only() {
        let oid = ObjectId::parse_str(OID).unwrap();
        assert_eq!(identifier(OID.into()), QueryValue::Native(Bson::ObjectId(oid)));
        assert_eq!(identifier("abc".into()), QueryValue::String("abc".into()));
        assert_eq!(identifier(QueryValue::Int(7)), QueryValue::Int(7));
        assert_eq!(identifier(oid.into()), QueryValue::Native(Bson::ObjectId(oid)));
    }

    #[test]
    fn dates_convert_recursively() {
        let dt = DateTime::parse_from_rfc3339("2024-01-02T03:04:05.678901Z").unwrap();
        let native = QueryValue::Native(Bson::DateTime(bson::DateTime::from_millis(
            dt.timestamp_millis(),
        )));

        assert_eq!(dates(dt.into()), native);

        let nested = QueryValue::Array(vec![
            QueryValue::Int(1),
            QueryValue::Array(vec![dt.into()]),
        ]);
        assert_eq!(
            dates(nested),
            QueryValue::Array(vec![QueryValue::Int(1), QueryValue::Array(vec![native])])
        );
    }

    #[test]
    fn dates_leave_other_values() {
        assert_eq!(dates("2024".into()), QueryValue::String("2024".into()));
        assert_eq!(dates(QueryValue::Null), QueryValue::Null);
    }
}
