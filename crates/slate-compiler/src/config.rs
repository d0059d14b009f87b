use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Field holding the document identifier. Clauses on this field, or on a
    /// path ending in `.<id_field>`, have hex-string values coerced to ObjectIds.
    pub id_field: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            id_field: "_id".to_string(),
        }
    }
}
