//! Shared command handler patterns

mod list;

pub use list::{print_item, run_list_command};
