//! Output formatting for human-readable and JSON modes.
//!
//! Human mode uses colored terminal output.
//! JSON mode outputs pure JSON with no ANSI escapes.

use colored::Colorize;
use serde::Serialize;

/// Prints a success message.
pub fn print_success(msg: &str, json_mode: bool) {
    if json_mode {
        let obj = serde_json::json!({ "status": "ok", "message": msg });
        println!("{obj}");
    } else {
        println!("{} {}", "✓".green().bold(), msg);
    }
}

/// Prints a single key-value pair in human mode.
pub fn print_kv(key: &str, value: &str) {
    println!("{}: {}", key.cyan().bold(), value);
}

/// Prints a heading line in human mode.
pub fn print_heading(text: &str) {
    println!("{}", text.bold());
}

/// Prints a serializable value: compact JSON in JSON mode, indented
/// JSON otherwise.
pub fn print_value<T: Serialize>(value: &T, json_mode: bool) {
    let rendered = if json_mode {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };

    match rendered {
        Ok(s) => println!("{s}"),
        Err(e) => print_error(&format!("json serialization failed: {e}"), json_mode),
    }
}

/// Prints an error message to stderr.
pub fn print_error(msg: &str, json_mode: bool) {
    if json_mode {
        let obj = serde_json::json!({ "error": msg });
        eprintln!("{obj}");
    } else {
        eprintln!("{} {}", "error:".red().bold(), msg);
    }
}
