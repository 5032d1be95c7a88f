//! Export command
//!
//! Usage: archex export <MODEL> [--output <FILE>]

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Path to a system model JSON file
    pub model: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute export command
pub fn execute(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Load the system model
    let json = std::fs::read_to_string(&args.model)?;
    let system: archex_core::System = serde_json::from_str(&json)?;

    // Convert to a service template document
    let template = archex_tosca::export_system(&system)?;
    let yaml = serde_yaml::to_string(&template)?;

    // Output
    if let Some(output_path) = args.output {
        std::fs::write(&output_path, yaml)?;
        println!("✓ Exported to {}", output_path.display());
    } else {
        print!("{}", yaml);
    }

    Ok(())
}
