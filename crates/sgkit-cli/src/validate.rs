//! # Validate Subcommand
//!
//! Loads a manifest and runs structural and semantic validation, printing
//! the combined report. Warnings print on success; any error fails the
//! command with every finding in one report.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use sgkit_manifest::LoadOptions;

/// Arguments for the `sgkit validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the subgraph manifest.
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Check the manifest shape only; skip ABI and cross-reference checks.
    #[arg(long)]
    pub skip_validation: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure, 2 on
/// operational error.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    tracing::debug!(manifest = %args.manifest.display(), "loading manifest");
    let options = LoadOptions {
        skip_validation: args.skip_validation,
    };
    let subgraph = match crate::load_reported(&args.manifest, &options) {
        Ok(subgraph) => subgraph,
        Err(code) => return Ok(code),
    };

    if let Some(warning) = &subgraph.warning {
        // The combined warning text carries its own trailing newline.
        print!("{warning}");
    }
    println!("OK");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MANIFEST: &str = "specVersion: 0.0.2\n\
        schema:\n\
        \x20 file: ./schema.graphql\n\
        dataSources:\n\
        \x20 - kind: ethereum/contract\n\
        \x20   name: Gravatar\n\
        \x20   source:\n\
        \x20     abi: Gravity\n\
        \x20   mapping:\n\
        \x20     apiVersion: 0.0.1\n\
        \x20     language: wasm/assemblyscript\n\
        \x20     file: ./src/mapping.ts\n\
        \x20     entities:\n\
        \x20       - Gravatar\n\
        \x20     abis:\n\
        \x20       - name: Gravity\n\
        \x20         file: ./abis/Gravity.json\n\
        \x20     eventHandlers:\n\
        \x20       - event: NewGravatar(uint256,address,string,string)\n\
        \x20         handler: handleNewGravatar\n";

    const GRAVITY_ABI: &str = r#"[
        {
            "type": "event",
            "name": "NewGravatar",
            "inputs": [
                {"name": "id", "type": "uint256"},
                {"name": "owner", "type": "address"},
                {"name": "displayName", "type": "string"},
                {"name": "imageUrl", "type": "string"}
            ]
        }
    ]"#;

    fn write_project(dir: &std::path::Path) -> PathBuf {
        fs::write(dir.join("schema.graphql"), "type Gravatar @entity {\n  id: ID!\n}\n").unwrap();
        fs::create_dir_all(dir.join("abis")).unwrap();
        fs::write(dir.join("abis/Gravity.json"), GRAVITY_ABI).unwrap();
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("src/mapping.ts"), "export { }\n").unwrap();
        let path = dir.join("subgraph.yaml");
        fs::write(&path, MANIFEST).unwrap();
        path
    }

    #[test]
    fn test_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_project(dir.path());

        let ok = ValidateArgs {
            manifest: path.clone(),
            skip_validation: false,
        };
        assert_eq!(run_validate(&ok).unwrap(), 0);

        fs::write(&path, MANIFEST.replace("specVersion: 0.0.2\n", "")).unwrap();
        assert_eq!(run_validate(&ok).unwrap(), 1);

        let missing = ValidateArgs {
            manifest: dir.path().join("nope.yaml"),
            skip_validation: false,
        };
        assert_eq!(run_validate(&missing).unwrap(), 2);
    }
}
