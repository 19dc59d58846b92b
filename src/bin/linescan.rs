//! Command-line interface for linescan
//! Tokenizes a source file line by line and dumps the resulting spans as
//! JSON, one object per line. Useful for inspecting what a theme layer
//! would receive.
//!
//! Usage:
//!   linescan tokenize `<path>` [--dialect ts|js]

use clap::{Arg, Command};

use linescan::{Dialect, Scanner, Tokenizer};

fn main() {
    let matches = Command::new("linescan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect per-line tokenization of TypeScript/JavaScript sources")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokenize")
                .about("Tokenize a file and print spans as JSON, one line per source line")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("dialect")
                        .long("dialect")
                        .short('d')
                        .help("Dialect to tokenize as ('ts' or 'js')")
                        .default_value("js"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokenize", tokenize_matches)) => {
            let path = tokenize_matches.get_one::<String>("path").unwrap();
            let dialect = tokenize_matches.get_one::<String>("dialect").unwrap();
            handle_tokenize_command(path, dialect);
        }
        _ => unreachable!(),
    }
}

/// Handle the tokenize command
fn handle_tokenize_command(path: &str, dialect: &str) {
    let dialect = match dialect {
        "ts" => Dialect::TypeScript,
        "js" => Dialect::JavaScript,
        other => {
            eprintln!("Unknown dialect '{}' (expected 'ts' or 'js')", other);
            std::process::exit(2);
        }
    };

    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });

    // The CLI has no program-aware service behind it, so both dialects run
    // the line-local scanner; the dialect still selects the scope suffix.
    let tokenizer =
        Tokenizer::with_lexical_classifier(dialect, path.to_string(), Box::new(Scanner::new()));
    let mut state = tokenizer.initial_state();

    for (line_number, line) in source.lines().enumerate() {
        let result = tokenizer.tokenize_line(&state, line).unwrap_or_else(|e| {
            eprintln!("Tokenize error on line {}: {}", line_number, e);
            std::process::exit(1);
        });

        let record = serde_json::json!({
            "line": line_number,
            "text": line,
            "tokens": result.tokens,
        });
        println!("{}", record);

        state = result.end_state;
    }
}
