//! Command implementations for the CLI.

mod dev;
mod list;

pub use dev::cmd_dev;
pub use list::cmd_list;
