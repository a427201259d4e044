//! General output formatting utilities.

use std::time::Duration;

use owo_colors::OwoColorize;

/// Prints a key-value pair with consistent formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {} {}", key.bright_black().bold(), value.bold().white());
}

/// Formats a duration the way a person would say it.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis % 1000 == 0 {
        let secs = millis / 1000;
        format!("{} second{}", secs, if secs == 1 { "" } else { "s" })
    } else {
        format!("{:.1} seconds", duration.as_secs_f64())
    }
}
