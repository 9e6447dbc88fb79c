//! Terminal output formatting.
//!
//! Human-readable lines with colored symbols, or one JSON object per line
//! in `--json` mode. Quiet mode suppresses everything except warnings and
//! errors.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use serde_json::{json, Value};

/// Output mode chosen by the global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Set the output mode. Only the first call takes effect.
pub fn configure(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

fn current() -> OutputConfig {
    OUTPUT_CONFIG.get().copied().unwrap_or_default()
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

fn suppressed() -> bool {
    let config = current();
    !config.json && config.quiet
}

fn emit(kind: &str, payload: Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Print a whole JSON document.
pub fn json_output(value: Value) {
    println!("{value}");
}

/// Print the application name and version.
pub fn header() {
    if is_json() || suppressed() {
        return;
    }
    println!("{} {}", "addrlink".bold(), env!("CARGO_PKG_VERSION").dimmed());
    println!();
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if is_json() {
        emit("field", json!({ "label": label, "value": value.to_string() }));
        return;
    }
    if suppressed() {
        return;
    }
    println!("  {:<14} {}", label.dimmed(), value);
}

pub fn section(title: &str) {
    if is_json() || suppressed() {
        return;
    }
    println!();
    println!("{}", title.bold());
}

pub fn success(message: &str) {
    if is_json() {
        emit("success", json!({ "message": message }));
        return;
    }
    if suppressed() {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

pub fn warning(message: &str) {
    if is_json() {
        emit("warning", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

pub fn note(message: &str) {
    if is_json() || suppressed() {
        return;
    }
    println!("  {}", message.dimmed());
}

/// Print pre-rendered multi-line text, such as a table.
pub fn lines(text: &str) {
    if is_json() || suppressed() {
        return;
    }
    for line in text.lines() {
        println!("  {line}");
    }
}

pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.cyan())
}
