use std::fmt::Display;

use colored::Colorize;

/// Print a success message.
pub fn success(msg: impl Display) {
    println!("  {} {msg}", "✓".green());
}

/// Print a warning message.
pub fn warning(msg: impl Display) {
    println!("  {} {msg}", "⚠".yellow());
}

/// Print an error message to stderr.
pub fn error(msg: impl Display) {
    eprintln!("  {} {msg}", "✗".red());
}

/// Print a bold section title preceded by a blank line.
pub fn header(title: impl Display) {
    println!("\n{}", title.to_string().bold());
}

/// Print an indented `label: value` pair.
pub fn field(label: &str, value: impl Display) {
    println!("    {:<8} {value}", format!("{label}:").dimmed());
}
