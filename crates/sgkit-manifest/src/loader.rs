//! # Manifest Loading
//!
//! Orchestrates a load: read the file, parse YAML, run structural
//! validation, and only on a fully valid shape run the semantic battery.
//! Structural findings abort immediately with one combined message;
//! semantic findings are collected across every check before the load
//! fails, so the user sees all of them in one pass. Warnings never fail a
//! load and travel alongside the result.
//!
//! `skip_validation` bypasses the semantic battery and the warning pass.
//! The structural phase, including the spec-version gate and the entity
//! schema parse, always runs.

use std::path::{Path, PathBuf};

use sgkit_core::{combined_error_message, combined_warning_message, display_path, RawValue};

use crate::error::{ManifestError, ManifestResult};
use crate::model::Manifest;
use crate::writer::to_yaml_string;
use crate::{semantic, structural};

/// Knobs for [`Subgraph::load`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Skip the semantic battery and the warning pass.
    pub skip_validation: bool,
}

/// A successfully loaded manifest plus the combined warning text, if any
/// warnings fired.
#[derive(Debug, Clone, PartialEq)]
pub struct Subgraph {
    pub manifest: Manifest,
    pub warning: Option<String>,
}

impl Subgraph {
    /// Load and validate the manifest at `path`.
    pub fn load(path: &Path, options: &LoadOptions) -> ManifestResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ManifestError::FileNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(ManifestError::Io(e)),
        };
        let value: serde_yaml::Value =
            serde_yaml::from_str(&text).map_err(|source| ManifestError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        let raw = RawValue::from_yaml(value.clone()).map_err(|source| ManifestError::Document {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest_dir = manifest_dir_of(path);

        let mut findings = structural::validate_manifest(&raw, &manifest_dir)?;
        if findings.is_empty() {
            findings.extend(structural::validate_spec_version(&raw));
        }
        if findings.is_empty() {
            findings.extend(structural::validate_entity_schema(&raw, &manifest_dir));
        }
        if !findings.is_empty() {
            return Err(ManifestError::Validation(combined_error_message(
                &display_path(path),
                &findings,
            )));
        }

        let manifest: Manifest =
            serde_yaml::from_value(value).map_err(|source| ManifestError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;

        if options.skip_validation {
            return Ok(Subgraph {
                manifest,
                warning: None,
            });
        }

        let errors = semantic::validate_semantics(&manifest, &manifest_dir);
        if !errors.is_empty() {
            return Err(ManifestError::Validation(combined_error_message(
                &display_path(path),
                &errors,
            )));
        }

        let warnings = semantic::collect_warnings(&manifest);
        let warning = if warnings.is_empty() {
            None
        } else {
            Some(combined_warning_message(&display_path(path), &warnings))
        };
        Ok(Subgraph { manifest, warning })
    }

    /// Serialize a manifest back to YAML at `path`.
    pub fn write(manifest: &Manifest, path: &Path) -> ManifestResult<()> {
        let value = serde_yaml::to_value(manifest).map_err(ManifestError::Serialize)?;
        let raw = RawValue::from_yaml(value).map_err(|source| ManifestError::Document {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, to_yaml_string(&raw))?;
        Ok(())
    }
}

// Relative references in a manifest resolve against its own directory, so a
// bare file name means the current directory.
fn manifest_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if parent != Path::new("") => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
