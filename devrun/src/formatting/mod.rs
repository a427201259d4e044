//! Terminal output formatting.
//!
//! Colors, symbols and layout for everything `devrun` prints, including the
//! terminal rendering of the package selection menu.

mod headers;
mod output;
mod status;
mod tables;
mod view;

pub use headers::{print_section_header, SectionStyle};
pub use output::{format_duration, print_key_value};
pub use status::{print_error, print_info, print_success, print_warning};
pub use tables::print_candidate_table;
pub use view::TerminalView;
