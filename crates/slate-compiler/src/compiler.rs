use bson::Document;
use slate_query::{Filter, Query};
use tracing::debug;

use crate::command::Command;
use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::filter::compile_filters;
use crate::options::compile_options;
use crate::pipeline::compile_pipeline;

/// Stateless translator from query descriptions to store commands.
///
/// Holds only read-only configuration, so one instance can be shared
/// across threads and every call returns a fresh [`Command`].
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Aggregate when the query groups or aggregates, find otherwise.
    pub fn compile(&self, query: &Query) -> Result<Command, CompileError> {
        if query.is_aggregate() {
            self.compile_aggregate(query)
        } else {
            self.compile_find(query)
        }
    }

    /// Decode a JSON query description and compile it.
    pub fn compile_json(&self, json: &str) -> Result<Command, CompileError> {
        let query: Query =
            serde_json::from_str(json).map_err(|e| CompileError::Configuration(e.to_string()))?;
        self.compile(&query)
    }

    pub fn compile_find(&self, query: &Query) -> Result<Command, CompileError> {
        debug!(collection = %query.source, filters = query.filters.len(), "compiling find");
        Ok(Command::Find {
            collection: query.source.clone(),
            query: self.compile_filters(&query.filters)?,
            options: compile_options(query),
        })
    }

    /// Distinct over the first selected column, or the identifier field.
    pub fn compile_distinct(&self, query: &Query) -> Result<Command, CompileError> {
        let column = query
            .selected_columns()
            .into_iter()
            .next()
            .unwrap_or_else(|| self.config.id_field.clone());
        debug!(collection = %query.source, %column, "compiling distinct");
        Ok(Command::Distinct {
            collection: query.source.clone(),
            column,
            query: self.compile_filters(&query.filters)?,
        })
    }

    pub fn compile_aggregate(&self, query: &Query) -> Result<Command, CompileError> {
        let filter = self.compile_filters(&query.filters)?;
        let pipeline = compile_pipeline(query, filter);
        debug!(collection = %query.source, stages = pipeline.len(), "compiled aggregate");
        Ok(Command::Aggregate {
            collection: query.source.clone(),
            pipeline,
            options: compile_options(query),
        })
    }

    pub fn compile_filters(&self, filters: &[Filter]) -> Result<Document, CompileError> {
        compile_filters(filters, &self.config)
    }
}
