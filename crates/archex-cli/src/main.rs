//! Archex CLI
//!
//! Command-line interface for converting architecture models to and from
//! TOSCA service templates

use archex_core::logging::{self, Profile};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "archex")]
#[command(about = "Archex - Architecture model conversion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export a system model to a TOSCA service template
    Export(commands::export::ExportArgs),
    /// Import a TOSCA service template into a system model
    Import(commands::import::ImportArgs),
    /// Check the referential integrity of a system model
    Validate(commands::validate::ValidateArgs),
}

fn main() {
    logging::init(Profile::Development);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export(args) => commands::export::execute(args),
        Commands::Import(args) => commands::import::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
