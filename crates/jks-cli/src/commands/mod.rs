//! CLI subcommand implementations.

pub mod day;
pub mod layout;
pub mod util;
