use std::io::Read;

use slate_compiler::{Command, CompileError, Compiler, CompilerConfig};
use slate_query::Query;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: slate-compile [--distinct] [FILE]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut distinct = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--distinct" => distinct = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return;
            }
            _ if path.is_none() && !arg.starts_with("--") => path = Some(arg),
            _ => {
                eprintln!("{USAGE}");
                std::process::exit(2);
            }
        }
    }

    let mut config = CompilerConfig::default();
    if let Some(id_field) = std::env::var("SLATE_ID_FIELD")
        .ok()
        .filter(|f| !f.trim().is_empty())
    {
        config.id_field = id_field;
    }
    let compiler = Compiler::new(config);

    let input = read_input(path.as_deref()).unwrap_or_else(|e| {
        eprintln!("failed to read query: {e}");
        std::process::exit(1);
    });

    let command = compile(&compiler, &input, distinct).unwrap_or_else(|e| {
        eprintln!("compile failed: {e}");
        std::process::exit(1);
    });
    tracing::debug!(collection = command.collection(), "compiled");

    match serde_json::to_string_pretty(&command.into_document()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to render command: {e}");
            std::process::exit(1);
        }
    }
}

fn read_input(path: Option<&str>) -> std::io::Result<String> {
    match path {
        Some("-") | None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
        Some(path) => std::fs::read_to_string(path),
    }
}

fn compile(compiler: &Compiler, input: &str, distinct: bool) -> Result<Command, CompileError> {
    if !distinct {
        return compiler.compile_json(input);
    }
    let query: Query =
        serde_json::from_str(input).map_err(|e| CompileError::Configuration(e.to_string()))?;
    compiler.compile_distinct(&query)
}
