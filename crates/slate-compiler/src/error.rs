use std::fmt;

#[derive(Debug)]
pub enum CompileError {
    /// The query description could not be decoded, e.g. an unknown clause kind.
    Configuration(String),
    InvalidQuery(String),
    MissingField {
        clause: &'static str,
        field: &'static str,
    },
    Bson(bson::error::Error),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::InvalidQuery(msg) => write!(f, "invalid query: {msg}"),
            Self::MissingField { clause, field } => {
                write!(f, "missing field `{field}` on {clause} clause")
            }
            Self::Bson(e) => write!(f, "bson: {e}"),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bson(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bson::error::Error> for CompileError {
    fn from(e: bson::error::Error) -> Self {
        Self::Bson(e)
    }
}
