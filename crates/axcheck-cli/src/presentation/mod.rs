//! Terminal formatting helpers shared by the handlers.

mod tables;

pub use tables::{format_flag, print_separator, truncate_string};
