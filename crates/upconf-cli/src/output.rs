//! Output formatting helpers for the `upconf` CLI.

use std::io::{self, Write};

use serde::Serialize;
use upconf::ResolvedConfig;

use crate::context::RuntimeContext;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a search or load result.
///
/// JSON mode prints the serialized result (or `null`). Text mode prints a
/// header line with the file path followed by the configuration; `--quiet`
/// drops the header.
pub fn output_result(ctx: &RuntimeContext, result: Option<&ResolvedConfig>) {
    if ctx.json {
        output_json(&result);
        return;
    }

    let Some(found) = result else {
        return;
    };
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match found.config() {
        Some(config) => {
            if !ctx.quiet {
                let _ = writeln!(handle, "Found config at {}", found.filepath().display());
            }
            match serde_json::to_string_pretty(config) {
                Ok(json) => {
                    let _ = writeln!(handle, "{}", json);
                }
                Err(e) => {
                    eprintln!("Error: failed to serialize JSON: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            if !ctx.quiet {
                let _ = writeln!(handle, "Found empty config at {}", found.filepath().display());
            }
        }
    }
}
