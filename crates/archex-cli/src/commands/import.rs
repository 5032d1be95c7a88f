//! Import command
//!
//! Usage: archex import <DOCUMENT> [--name <NAME>] [--output <FILE>]

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to a TOSCA service template YAML file
    pub document: PathBuf,

    /// System name (default: derived from the document file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute import command
pub fn execute(args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Load the document
    let text = std::fs::read_to_string(&args.document)?;

    let source_name = args
        .document
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "imported".to_string());

    // Convert to a system model; --name overrides the derived name
    let mut system = archex_tosca::import_document(&source_name, &text)?;
    if let Some(name) = args.name {
        system.name = name;
    }

    let json = serde_json::to_string_pretty(&system)?;

    // Output
    if let Some(output_path) = args.output {
        std::fs::write(&output_path, json)?;
        println!("✓ Imported to {}", output_path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}
