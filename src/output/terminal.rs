//! Terminal output utilities.
//!
//! Turns styled report tokens into ANSI-colored text.

use super::show_net::{Line, Style, Token};
use colored::{ColoredString, Colorize};

/// Format a value as a left-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// The value padded to `width`, or followed by a single space when it is
/// already at least that wide, so adjacent columns never run together.
pub fn pad_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();

    if value_str.len() >= width {
        format!("{value_str} ")
    } else {
        format!("{value_str:<width$}")
    }
}

/// Color one token by its style.
fn colorize(token: &Token) -> ColoredString {
    let text = token.text.as_str();
    match token.style {
        Style::Label => text.white(),
        Style::Address => text.blue(),
        Style::HostBits => text.yellow(),
        Style::NetBits => text.green(),
        Style::MaskBits => text.red(),
        Style::ClassBits => text.magenta(),
        Style::Separator => text.white(),
    }
}

/// Render report lines to a string, one line per entry, each ending in `\n`.
///
/// Colors follow the `colored` crate's global switch, so output piped
/// to a file or with `NO_COLOR` set comes out as plain text.
pub fn render(lines: &[Line]) -> String {
    let mut out = String::new();
    for line in lines {
        for token in line {
            out.push_str(&colorize(token).to_string());
        }
        out.push('\n');
    }
    out
}
