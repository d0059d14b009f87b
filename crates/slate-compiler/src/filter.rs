use bson::{Document, doc};
use slate_query::{Clause, Filter, LogicalOp};
use tracing::trace;

use crate::coerce;
use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::merge::deep_merge;
use crate::operator;
use crate::predicate::compile_clause;

/// Compile an ordered filter list into one query document.
///
/// The first clause inherits the second clause's boolean when it is `and`.
/// `or` clauses are wrapped in `$or`; with more than one clause every other
/// clause is wrapped in `$and`. Wrapped fragments are deep-merged so
/// repeated wrappers accumulate into a single condition list. An empty
/// list compiles to the empty document.
pub fn compile_filters(
    filters: &[Filter],
    config: &CompilerConfig,
) -> Result<Document, CompileError> {
    let mut compiled = Document::new();
    let chained = filters.len() > 1;

    for (i, filter) in filters.iter().enumerate() {
        let boolean = if i == 0 && chained && filter.boolean == LogicalOp::And {
            filters[1].boolean
        } else {
            filter.boolean
        };

        let clause = prepare(filter.clause.clone(), config);
        trace!(kind = clause.kind(), ?boolean, "compiling clause");
        let fragment = compile_clause(clause, config)?;

        let wrapped = match boolean {
            LogicalOp::Or => doc! { "$or": [fragment] },
            LogicalOp::And if chained => doc! { "$and": [fragment] },
            LogicalOp::And => fragment,
        };
        deep_merge(&mut compiled, wrapped);
    }

    Ok(compiled)
}

/// Normalize the operator and coerce identifier and date-time values.
fn prepare(mut clause: Clause, config: &CompilerConfig) -> Clause {
    if let Some(op) = clause.operator_mut() {
        *op = operator::normalize(op);
    }

    let identifier = clause
        .column()
        .is_some_and(|column| coerce::is_identifier_column(column, &config.id_field));

    if let Some(value) = clause.value_mut() {
        let mut taken = std::mem::take(value);
        if identifier {
            taken = coerce::identifier(taken);
        }
        *value = coerce::dates(taken);
    } else if let Some(values) = clause.values_mut() {
        for value in values.iter_mut() {
            let mut taken = std::mem::take(value);
            if identifier {
                taken = coerce::identifier(taken);
            }
            *value = coerce::dates(taken);
        }
    }

    clause
}
