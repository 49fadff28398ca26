//! CLI entry point: open a database file, decode it, and print either a
//! plain-text or JSON dump.
//!
//! Grounded in the teacher's `main.rs` for the "open, then dump" shape and
//! in `Daniel-Boll-build-your-own-x-in-y/src/main.rs` for argument
//! handling and logging-at-startup wiring.

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (path, json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };

    match sqlitedump::database::Database::open(&path) {
        Ok(db) => {
            let rendered = if json {
                sqlitedump::render::json::dump(&db)
            } else {
                sqlitedump::render::text::dump(&db)
            };
            match rendered {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::from(0)
                }
                Err(e) => {
                    print_error(&e, json);
                    ExitCode::from(1)
                }
            }
        }
        Err(e) => {
            print_error(&e, json);
            ExitCode::from(1)
        }
    }
}

/// `--json` may appear either before or after the path argument, matching
/// `original_source/src/main.c`'s flag handling.
fn parse_args(args: &[String]) -> anyhow::Result<(String, bool)> {
    let mut json = false;
    let mut path = None;
    for arg in args {
        if arg == "--json" {
            json = true;
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            anyhow::bail!("usage: sqlitedump [--json] <path>");
        }
    }
    path.map(|p| (p, json))
        .ok_or_else(|| anyhow::anyhow!("usage: sqlitedump [--json] <path>"))
}

fn print_error(e: &sqlitedump::error::Error, json: bool) {
    if json {
        let doc = serde_json::json!({ "error": e.to_string() });
        println!("{doc}");
    } else {
        println!("{e}");
    }
}
