use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Canonical spellings for operators that arrive lowercased.
static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("regexp", "regex"),
        ("elemmatch", "elemMatch"),
        ("geointersects", "geoIntersects"),
        ("geowithin", "geoWithin"),
        ("nearsphere", "nearSphere"),
        ("maxdistance", "maxDistance"),
        ("centersphere", "centerSphere"),
        ("uniquedocs", "uniqueDocs"),
    ])
});

/// Relational operators with a dedicated query token.
static CONVERSIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("!=", "$ne"),
        ("<>", "$ne"),
        ("<", "$lt"),
        ("<=", "$lte"),
        (">", "$gt"),
        (">=", "$gte"),
        ("not like", "$not"),
        ("not regex", "$not"),
        ("not regexp", "$not"),
    ])
});

/// How a normalized operator appears in the compiled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// `{column: value}`
    Equality,
    /// `{column: {token: value}}`
    Token(String),
}

/// Lowercase an operator and apply the alias table.
pub fn normalize(operator: &str) -> String {
    let lower = operator.trim().to_lowercase();
    match ALIASES.get(lower.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => lower,
    }
}

/// Resolve a normalized operator. Operators outside the conversion table
/// are emitted as `$<operator>` so store features without a dedicated rule
/// still pass through.
pub fn lookup(operator: &str) -> Comparison {
    if operator.is_empty() || operator == "=" {
        return Comparison::Equality;
    }
    match CONVERSIONS.get(operator) {
        Some(token) => Comparison::Token(token.to_string()),
        None => Comparison::Token(format!("${operator}")),
    }
}
