//! Command output formatting.

use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T) {
    match serde_json::to_string_pretty(item) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{item:#?}"),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}
