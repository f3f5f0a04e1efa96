//! # Codegen Subcommand
//!
//! Loads a manifest and writes the generated AssemblyScript module for its
//! templates: one import block, then one class per template in declaration
//! order.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sgkit_codegen::DataSourceTemplateCodeGenerator;
use sgkit_manifest::LoadOptions;

/// Arguments for the `sgkit codegen` subcommand.
#[derive(Args, Debug)]
pub struct CodegenArgs {
    /// Path to the subgraph manifest.
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Directory the generated module is written to.
    #[arg(short, long, default_value = "generated")]
    pub output_dir: PathBuf,
}

/// Execute the codegen subcommand.
///
/// Returns exit code: 0 on success, 1 on validation or generation failure,
/// 2 on operational error.
pub fn run_codegen(args: &CodegenArgs) -> Result<u8> {
    let subgraph = match crate::load_reported(&args.manifest, &LoadOptions::default()) {
        Ok(subgraph) => subgraph,
        Err(code) => return Ok(code),
    };

    let templates = &subgraph.manifest.templates;
    if templates.is_empty() {
        println!("No data source templates in the manifest; nothing to generate.");
        return Ok(0);
    }
    tracing::debug!(templates = templates.len(), "generating template classes");

    let mut module = String::new();
    for (position, template) in templates.iter().enumerate() {
        let generator = DataSourceTemplateCodeGenerator::new(template);
        if position == 0 {
            for import in generator.generate_module_imports() {
                module.push_str(&import.to_string());
            }
        }
        let classes = match generator.generate_types() {
            Ok(classes) => classes,
            Err(e) => {
                eprintln!("{e}");
                return Ok(1);
            }
        };
        for klass in classes {
            module.push('\n');
            module.push_str(&klass.to_string());
        }
    }

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;
    let out_path = args.output_dir.join("templates.ts");
    fs::write(&out_path, module)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    println!("Generated {}", out_path.display());
    Ok(0)
}
