//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print amount owed (red, indented)
pub fn owes(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg.to_string().red());
}

/// Print amount to receive (green, indented)
pub fn receives(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg.to_string().green());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print dimmed hint, e.g. for empty lists
pub fn hint(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().dimmed());
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print prompt without newline (cyan)
pub fn prompt(msg: &(impl std::fmt::Display + ?Sized)) {
    use std::io::Write;
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}

/// Format an amount for display, e.g. `1250 BDT`.
pub fn money(amount: f64, decimals: usize, currency: &str) -> String {
    format!("{:.*} {}", decimals, amount, currency)
}

/// True when [`money`] would print the amount as zero.
pub fn rounds_to_zero(amount: f64, decimals: usize) -> bool {
    format!("{:.*}", decimals, amount.abs())
        .parse::<f64>()
        .map_or(false, |v| v == 0.0)
}
