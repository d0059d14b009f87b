use bson::{Bson, Regex};
use slate_query::QueryValue;

use crate::error::CompileError;

/// Build a native regular-expression value. Flags are stored sorted.
pub fn regex(pattern: &str, options: &str) -> Result<Bson, CompileError> {
    let mut flags: Vec<char> = options.chars().collect();
    flags.sort_unstable();
    let options: String = flags.into_iter().collect();

    Ok(Bson::RegularExpression(Regex {
        pattern: pattern.to_string().try_into()?,
        options: options.try_into()?,
    }))
}

/// Translate a SQL `LIKE` value into a regex source.
///
/// Literal text is escaped; every `%` not preceded by a backslash becomes
/// `.*`. The pattern is anchored on each side that does not open with a
/// wildcard.
pub fn like_pattern(value: &str) -> String {
    let escaped = regex::escape(value);
    let mut pattern = String::with_capacity(escaped.len() + 8);
    if !value.starts_with('%') {
        pattern.push('^');
    }

    let mut prev = None;
    for ch in escaped.chars() {
        if ch == '%' && prev != Some('\\') {
            pattern.push_str(".*");
        } else {
            pattern.push(ch);
        }
        prev = Some(ch);
    }

    if !value.ends_with('%') {
        pattern.push('$');
    }
    pattern
}

/// Split a `/pattern/flags` literal.
pub fn split_literal(source: &str) -> Result<(&str, &str), CompileError> {
    let body = source.strip_prefix('/').ok_or_else(|| {
        CompileError::InvalidQuery(format!("regular expression must start with '/': {source}"))
    })?;
    let end = body.rfind('/').ok_or_else(|| {
        CompileError::InvalidQuery(format!("regular expression has no closing '/': {source}"))
    })?;
    Ok((&body[..end], &body[end + 1..]))
}

/// Turn a regex clause value into a native regex. Native regexes pass
/// through; strings are parsed as `/pattern/flags` literals.
pub fn regex_value(value: QueryValue) -> Result<QueryValue, CompileError> {
    match value {
        QueryValue::Native(Bson::RegularExpression(re)) => {
            Ok(QueryValue::Native(Bson::RegularExpression(re)))
        }
        QueryValue::String(source) => {
            let (pattern, flags) = split_literal(&source)?;
            Ok(QueryValue::Native(regex(pattern, flags)?))
        }
        other => Err(CompileError::InvalidQuery(format!(
            "regular expression operand must be a string, got {other:?}"
        ))),
    }
}
