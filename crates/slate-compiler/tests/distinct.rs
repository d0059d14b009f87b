mod common;
use common::*;

use bson::doc;
use slate_compiler::{Command, Compiler, CompilerConfig};

fn unwrap_distinct(command: Command) -> (String, String, bson::Document) {
    match command {
        Command::Distinct {
            collection,
            column,
            query,
        } => (collection, column, query),
        other => panic!("expected Distinct, got {other:?}"),
    }
}

#[test]
fn defaults_to_identifier() {
    let (collection, column, filter) =
        unwrap_distinct(compiler().compile_distinct(&query()).unwrap());
    assert_eq!(collection, COLLECTION);
    assert_eq!(column, "_id");
    assert!(filter.is_empty());
}

#[test]
fn uses_first_selected_column() {
    let mut q = query();
    q.columns = vec!["region".into(), "status".into()];
    q.filters = vec![where_("status", "=", "active")];

    let (_, column, filter) = unwrap_distinct(compiler().compile_distinct(&q).unwrap());
    assert_eq!(column, "region");
    assert_eq!(filter, doc! { "status": "active" });
}

#[test]
fn wildcard_falls_back_to_configured_identifier() {
    let compiler = Compiler::new(CompilerConfig {
        id_field: "key".into(),
    });
    let mut q = query();
    q.columns = vec!["*".into()];

    let (_, column, _) = unwrap_distinct(compiler.compile_distinct(&q).unwrap());
    assert_eq!(column, "key");
}

#[test]
fn ignores_paging_and_options() {
    let mut q = query();
    q.columns = vec!["region".into()];
    q.limit = Some(5);
    q.timeout = Some(1);
    q.options = doc! { "collation": { "locale": "en" } };

    let document = compiler().compile_distinct(&q).unwrap().into_document();
    assert_eq!(
        document,
        doc! { "collection": COLLECTION, "column": "region", "query": {} }
    );
}
