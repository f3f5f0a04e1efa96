//! # sgkit CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sgkit_cli::codegen::{run_codegen, CodegenArgs};
use sgkit_cli::migrate::{run_migrate, MigrateArgs};
use sgkit_cli::validate::{run_validate, ValidateArgs};

/// Subgraph Kit — manifest validation and code generation.
///
/// Validates subgraph manifests against the manifest schema and the
/// referenced ABIs, generates the AssemblyScript template module, and
/// migrates manifests from retired spec versions.
#[derive(Parser, Debug)]
#[command(name = "sgkit", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a manifest and run the full validation battery.
    Validate(ValidateArgs),

    /// Generate the AssemblyScript module for the manifest's templates.
    Codegen(CodegenArgs),

    /// Upgrade a manifest from the previous spec version.
    Migrate(MigrateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Codegen(args) => run_codegen(&args),
        Commands::Migrate(args) => run_migrate(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
