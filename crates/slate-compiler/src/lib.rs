//! Compiles relational query descriptions into document-store commands:
//! find queries with options, distinct requests and aggregation pipelines.

pub mod coerce;
mod command;
mod compiler;
mod config;
mod error;
mod filter;
mod merge;
pub mod operator;
mod options;
pub mod pattern;
mod pipeline;
mod predicate;

pub use bson::{Bson, Document};
pub use command::Command;
pub use compiler::Compiler;
pub use config::CompilerConfig;
pub use error::CompileError;
pub use merge::deep_merge;
pub use options::compile_options;
pub use predicate::compile_clause;
