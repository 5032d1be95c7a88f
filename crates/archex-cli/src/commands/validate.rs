//! Validate command
//!
//! Usage: archex validate <MODEL>

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to a system model JSON file
    pub model: PathBuf,
}

/// Execute validate command
pub fn execute(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(&args.model)?;
    let system: archex_core::System = serde_json::from_str(&json)?;

    archex_core::validate_system(&system)?;

    println!("✓ {} is valid", system.name);
    Ok(())
}
