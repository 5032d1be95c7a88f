//! CLI subcommand implementations

pub mod export;
pub mod import;
pub mod validate;
