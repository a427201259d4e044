//! One-line status messages around selection and launch.
//!
//! Progress and outcomes go to standard output next to the menu, so they
//! stay in order with it; errors go to standard error.

use owo_colors::{OwoColorize, Style};

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    /// Symbol and style of the symbol; the message text uses the same color.
    fn marker(self) -> (&'static str, Style) {
        match self {
            Tone::Success => ("✓", Style::new().green()),
            Tone::Error => ("✗", Style::new().red()),
            Tone::Warning => ("⚠", Style::new().yellow()),
            Tone::Info => ("→", Style::new().cyan()),
        }
    }

    fn line(self, message: &str) -> String {
        let (symbol, style) = self.marker();
        let text = match self {
            Tone::Info => message.style(style).to_string(),
            _ => message.style(style.bold()).to_string(),
        };
        format!("  {} {}", symbol.style(style), text)
    }
}

pub fn print_success(message: &str) {
    println!("{}", Tone::Success.line(message));
}

/// Prints to standard error.
pub fn print_error(message: &str) {
    eprintln!("{}", Tone::Error.line(message));
}

pub fn print_warning(message: &str) {
    println!("{}", Tone::Warning.line(message));
}

pub fn print_info(message: &str) {
    println!("{}", Tone::Info.line(message));
}
