//! Terminal output helpers.
//!
//! Status lines go to stdout, errors to stderr. Colors come from owo-colors.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Print a heading with colored styling and clear separation
pub fn print_heading(text: &str) {
    let line = "=".repeat(50);
    println!("\n{}", line.bright_blue());
    println!("{}", format!(" {} ", text).bold().bright_white());
    println!("{}\n", line.bright_blue());
}

/// Print a section heading (smaller than main heading) with colored styling
pub fn print_section(text: &str) {
    println!("\n{}", format!(" {} ", text).bold().white());
    println!("{}", "-".repeat(40).blue());
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("  {}: {}", label.bright_cyan(), value);
}

/// Print a list entry
pub fn print_list_item<T: Display>(index: usize, value: T) {
    println!("  {}. {}", index, value.dimmed());
}

/// Print an error message with red styling
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".bold().bright_red(), message);
}

/// Print a success message with green styling
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a warning message with yellow styling
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}

/// Print a failure line for one item of a batch
pub fn print_failure(message: &str) {
    println!("{} {}", "✗".bright_red(), message);
}
