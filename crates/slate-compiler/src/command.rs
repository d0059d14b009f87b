use bson::{Document, doc};

/// A compiled command, ready for the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Find {
        collection: String,
        query: Document,
        options: Document,
    },
    Distinct {
        collection: String,
        column: String,
        query: Document,
    },
    Aggregate {
        collection: String,
        pipeline: Vec<Document>,
        options: Document,
    },
}

impl Command {
    pub fn collection(&self) -> &str {
        match self {
            Command::Find { collection, .. }
            | Command::Distinct { collection, .. }
            | Command::Aggregate { collection, .. } => collection,
        }
    }

    /// Render as a single document keyed by the command's field names.
    pub fn into_document(self) -> Document {
        match self {
            Command::Find {
                collection,
                query,
                options,
            } => doc! { "collection": collection, "query": query, "options": options },
            Command::Distinct {
                collection,
                column,
                query,
            } => doc! { "collection": collection, "column": column, "query": query },
            Command::Aggregate {
                collection,
                pipeline,
                options,
            } => doc! { "collection": collection, "pipeline": pipeline, "options": options },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aggregate() {
        let command = Command::Aggregate {
            collection: "orders".into(),
            pipeline: vec![doc! { "$limit": 1 }],
            options: doc! {},
        };
        assert_eq!(command.collection(), "orders");
        assert_eq!(
            command.into_document(),
            doc! { "collection": "orders", "pipeline": [{ "$limit": 1 }], "options": {} }
        );
    }
}
