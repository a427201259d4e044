//! Table formatting utilities using comfy-table.

use comfy_table::{Cell, Table};
use devrun_core::Candidate;

/// Prints discovered packages with their directories and scripts.
pub fn print_candidate_table(candidates: &[Candidate]) {
    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Package").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Directory").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Scripts").add_attribute(comfy_table::Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

    for (idx, candidate) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1).fg(comfy_table::Color::DarkGrey),
            Cell::new(&candidate.name).fg(comfy_table::Color::White),
            Cell::new(candidate.path.display()).fg(comfy_table::Color::DarkGrey),
            Cell::new(candidate.scripts.join(", ")).fg(comfy_table::Color::Cyan),
        ]);
    }

    println!("{}", table);
}
