//! Terminal rendering of the package selection.

use std::io::Write;
use std::time::Duration;

use devrun_core::{Selection, SelectionReason, SelectionView};
use owo_colors::OwoColorize;

use super::{format_duration, print_error, print_info, print_section_header, print_warning, SectionStyle};

/// Prints the selection menu and status lines to standard output.
pub struct TerminalView {
    task: String,
}

impl TerminalView {
    pub fn new(task: impl Into<String>) -> Self {
        Self { task: task.into() }
    }
}

impl SelectionView for TerminalView {
    fn menu(&mut self, candidates: &[String], default: Option<&str>) {
        print_section_header(&format!("Available {} servers:", self.task), SectionStyle::Primary);
        for (idx, name) in candidates.iter().enumerate() {
            let marker = if Some(name.as_str()) == default {
                " (default)".bright_black().to_string()
            } else {
                String::new()
            };
            println!(
                "  {} {}{}",
                format!("{:2}.", idx + 1).bright_black(),
                name.bold().white(),
                marker
            );
        }
        println!();
    }

    fn prompt(&mut self, count: usize, default: Option<(&str, Duration)>) {
        let range = format!("(1-{})", count);
        match default {
            Some((name, timeout)) => println!(
                "Enter the number of the {} server to start {} or wait {} for default ({}):",
                self.task,
                range.cyan(),
                format_duration(timeout),
                name.bold()
            ),
            None => println!(
                "Enter the number of the {} server to start {}:",
                self.task,
                range.cyan()
            ),
        }
        // Nothing to report to if stdout is gone; the selection goes on.
        let _ = std::io::stdout().flush();
    }

    fn invalid_input(&mut self, input: &str, fallback: Option<&str>) {
        if input.is_empty() {
            print_error("Invalid selection!");
        } else {
            print_error(&format!("Invalid selection: {}", input));
        }
        if let Some(name) = fallback {
            print_warning(&format!("Falling back to default package: {}", name));
        }
    }

    fn resolved(&mut self, selection: &Selection) {
        match selection.reason {
            SelectionReason::OnlyCandidate => print_info(&format!(
                "Only one package available. Starting {} automatically...",
                selection.name
            )),
            SelectionReason::Timeout => {
                println!();
                print_warning(&format!(
                    "Selection timeout reached. Starting default package: {}",
                    selection.name
                ));
            }
            SelectionReason::BlankInput => {
                print_info(&format!("Starting default package: {}", selection.name))
            }
            SelectionReason::Explicit
            | SelectionReason::UserChoice
            | SelectionReason::InvalidInputFallback => {}
        }
    }
}
