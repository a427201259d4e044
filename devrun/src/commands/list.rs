//! Listing of packages that offer the task.

use anyhow::Result;
use devrun_core::{Config, Discovery, Error};
use owo_colors::OwoColorize;

use crate::formatting::{print_candidate_table, print_section_header, SectionStyle};

pub fn cmd_list(config: &Config, json: bool) -> Result<()> {
    let candidates = Discovery::new(config).discover();

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else if !candidates.is_empty() {
        print_section_header(
            &format!("Packages with {} scripts", config.task),
            SectionStyle::Primary,
        );
        print_candidate_table(&candidates);
        println!();
        println!("  Run {} to start one.", "devrun <package>".bold());
    }

    if candidates.is_empty() {
        return Err(Error::NoCandidates {
            task: config.task.clone(),
        }
        .into());
    }

    Ok(())
}
