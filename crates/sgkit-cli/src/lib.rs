//! # sgkit-cli — Subgraph Kit Command-Line Interface
//!
//! The thin shell over the library crates. Subcommand handlers parse
//! arguments, call into `sgkit-manifest` and `sgkit-codegen`, print the
//! results, and translate outcomes into exit codes.
//!
//! ## Subcommands
//!
//! - `validate` — load and validate a manifest, reporting every finding
//! - `codegen` — generate the AssemblyScript template module
//! - `migrate` — upgrade a manifest from the previous spec version
//!
//! ## Exit codes
//!
//! `0` success, `1` validation or generation failure, `2` operational error
//! (unreadable file, unwritable output).
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to the domain crates; no validation logic here.

use std::path::Path;

use sgkit_manifest::{LoadOptions, ManifestError, Subgraph};

pub mod codegen;
pub mod migrate;
pub mod validate;

/// Load a manifest for a subcommand, reporting failures to stderr.
///
/// `Err` carries the exit code for an already-reported failure: `1` for
/// validation findings, `2` for operational errors.
pub(crate) fn load_reported(path: &Path, options: &LoadOptions) -> Result<Subgraph, u8> {
    match Subgraph::load(path, options) {
        Ok(subgraph) => Ok(subgraph),
        Err(ManifestError::Validation(text)) => {
            eprintln!("{text}");
            Err(1)
        }
        Err(e) => {
            eprintln!("{e}");
            Err(2)
        }
    }
}
