//! # Migrate Subcommand
//!
//! Applies the spec-version text migration to a manifest, printing the
//! result or rewriting the file in place.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sgkit_manifest::migration::migrate_spec_version;
use sgkit_manifest::SPEC_VERSION;

/// Arguments for the `sgkit migrate` subcommand.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Path to the subgraph manifest.
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Rewrite the manifest file instead of printing to stdout.
    #[arg(long)]
    pub in_place: bool,
}

/// Execute the migrate subcommand.
///
/// Returns exit code: 0 on success, 2 on operational error.
pub fn run_migrate(args: &MigrateArgs) -> Result<u8> {
    let source = fs::read_to_string(&args.manifest)
        .with_context(|| format!("failed to read {}", args.manifest.display()))?;
    let migrated = migrate_spec_version(&source);

    if args.in_place {
        fs::write(&args.manifest, &migrated)
            .with_context(|| format!("failed to write {}", args.manifest.display()))?;
        println!(
            "Migrated {} to specVersion {SPEC_VERSION}",
            args.manifest.display()
        );
    } else {
        print!("{migrated}");
    }
    Ok(0)
}
