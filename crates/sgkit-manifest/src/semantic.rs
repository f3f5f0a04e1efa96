//! # Semantic Validation
//!
//! The battery of independent checks run against a structurally valid,
//! typed manifest. Checks never short-circuit each other; the loader
//! concatenates everything they report. Within a check, findings follow
//! manifest declaration order, and any name or signature list embedded in
//! a message is sorted so repeated runs produce identical output.
//!
//! Checks that need an ABI resolve it through `source.abi` and the
//! mapping's `abis` table. When that resolution or load fails, the
//! signature-coverage checks stay silent for that data source; the ABI
//! reference and ABI file checks already report the underlying problem.

use std::collections::BTreeSet;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use sgkit_abi::Abi;
use sgkit_core::{ManifestPath, ValidationError, ValidationWarning};

use crate::model::{DataSource, DataSourceKind, Manifest};
use crate::structural::resolve_file;

/// Repository URL shipped with the example subgraph scaffold.
pub const EXAMPLE_REPOSITORY: &str = "https://github.com/graphprotocol/example-subgraph";

/// Description shipped with the example subgraph scaffold.
pub const EXAMPLE_DESCRIPTION: &str = "Gravatar for Ethereum";

/// Run every semantic check and collect the findings.
pub fn validate_semantics(manifest: &Manifest, manifest_dir: &Path) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(check_abi_references(manifest));
    errors.extend(check_abi_files(manifest, manifest_dir));
    errors.extend(check_contract_addresses(manifest));
    errors.extend(check_event_handlers(manifest, manifest_dir));
    errors.extend(check_call_handlers(manifest, manifest_dir));
    errors.extend(check_handler_presence(manifest));
    errors.extend(check_name_uniqueness(manifest));
    errors
}

/// Non-fatal findings about placeholder content left over from the example
/// project.
pub fn collect_warnings(manifest: &Manifest) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    if manifest.repository.as_deref() == Some(EXAMPLE_REPOSITORY) {
        warnings.push(ValidationWarning::new(
            ManifestPath::root().key("repository"),
            format!(
                "The repository is still set to {EXAMPLE_REPOSITORY}.\n\
                 Please replace it with a link to your subgraph source code."
            ),
        ));
    }
    if manifest.description.as_deref() == Some(EXAMPLE_DESCRIPTION) {
        warnings.push(ValidationWarning::new(
            ManifestPath::root().key("description"),
            "The description is still the one from the example subgraph.\n\
             Please update it to tell users more about your subgraph.",
        ));
    }
    warnings
}

/// `source.abi` must name an entry in the mapping's `abis` table.
fn check_abi_references(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (base, data_source) in manifest.data_sources_and_templates() {
        if data_source.known_kind() != Some(DataSourceKind::EthereumContract) {
            continue;
        }
        let mut names: Vec<&str> = data_source
            .mapping
            .abis
            .iter()
            .map(|abi_ref| abi_ref.name.as_str())
            .collect();
        if names.iter().any(|name| *name == data_source.source.abi) {
            continue;
        }
        names.sort_unstable();
        let mut message = format!(
            "ABI name '{}' not found in mapping > abis.\nAvailable ABIs:",
            data_source.source.abi
        );
        for name in names {
            message.push_str(&format!("\n- {name}"));
        }
        errors.push(ValidationError::new(
            base.key("source").key("abi"),
            message,
        ));
    }
    errors
}

/// Every `{name, file}` pair in a mapping must load as an ABI.
fn check_abi_files(manifest: &Manifest, manifest_dir: &Path) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (base, data_source) in manifest.data_sources_and_templates() {
        if data_source.known_kind() != Some(DataSourceKind::EthereumContract) {
            continue;
        }
        for (index, abi_ref) in data_source.mapping.abis.iter().enumerate() {
            let file = resolve_file(manifest_dir, &abi_ref.file);
            if let Err(e) = Abi::load(&abi_ref.name, &file) {
                errors.push(ValidationError::new(
                    base.key("mapping").key("abis").index(index).key("file"),
                    e.to_string(),
                ));
            }
        }
    }
    errors
}

/// A declared contract address must be 40 hex digits, with or without the
/// `0x` prefix. Templates bind addresses at instantiation time and carry
/// none to check.
fn check_contract_addresses(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, data_source) in manifest.data_sources.iter().enumerate() {
        if data_source.known_kind() != Some(DataSourceKind::EthereumContract) {
            continue;
        }
        let Some(address) = data_source.source.address.as_deref() else {
            continue;
        };
        if !address_pattern().is_match(address) {
            errors.push(ValidationError::new(
                ManifestPath::root()
                    .key("dataSources")
                    .index(index)
                    .key("source")
                    .key("address"),
                format!(
                    "Contract address is not a valid Ethereum address: {address}\n\
                     Address must be 40 hexadecimal characters, optionally prefixed with 0x."
                ),
            ));
        }
    }
    errors
}

/// Every declared event handler signature must exist in the resolved ABI.
fn check_event_handlers(manifest: &Manifest, manifest_dir: &Path) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (base, data_source) in manifest.data_sources_and_templates() {
        if data_source.known_kind() != Some(DataSourceKind::EthereumContract) {
            continue;
        }
        let Some(abi) = resolve_abi(data_source, manifest_dir) else {
            continue;
        };
        let known = abi.event_signatures();
        for (index, handler) in data_source.mapping.event_handlers.iter().enumerate() {
            if !known.contains(&handler.event) {
                errors.push(ValidationError::new(
                    base.key("eventHandlers").index(index),
                    missing_signature_message("Event", "events", &handler.event, &abi.name, &known),
                ));
            }
        }
    }
    errors
}

/// Every declared call handler signature must exist in the resolved ABI.
fn check_call_handlers(manifest: &Manifest, manifest_dir: &Path) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (base, data_source) in manifest.data_sources_and_templates() {
        if data_source.known_kind() != Some(DataSourceKind::EthereumContract) {
            continue;
        }
        let Some(abi) = resolve_abi(data_source, manifest_dir) else {
            continue;
        };
        let known = abi.call_function_signatures();
        for (index, handler) in data_source.mapping.call_handlers.iter().enumerate() {
            if !known.contains(&handler.function) {
                errors.push(ValidationError::new(
                    base.key("callHandlers").index(index),
                    missing_signature_message(
                        "Call function",
                        "call functions",
                        &handler.function,
                        &abi.name,
                        &known,
                    ),
                ));
            }
        }
    }
    errors
}

/// A mapping with no handlers at all would never index anything.
fn check_handler_presence(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (base, data_source) in manifest.data_sources_and_templates() {
        if data_source.mapping.has_handlers() {
            continue;
        }
        errors.push(ValidationError::new(
            base.key("mapping"),
            "Mapping has no event, call or block handlers defined.\n\
             At least one handler is required for a data source to be indexed.",
        ));
    }
    errors
}

/// Names must be unique within `dataSources` and, separately, within
/// `templates`. The error points at the second occurrence.
fn check_name_uniqueness(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = duplicate_names(&manifest.data_sources, "dataSources", |name| {
        format!("More than one data source named '{name}'. Data source names must be unique.")
    });
    errors.extend(duplicate_names(&manifest.templates, "templates", |name| {
        format!("More than one template named '{name}'. Template names must be unique.")
    }));
    errors
}

fn duplicate_names(
    collection: &[DataSource],
    collection_key: &str,
    message_of: impl Fn(&str) -> String,
) -> Vec<ValidationError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut errors = Vec::new();
    for (index, entry) in collection.iter().enumerate() {
        if !seen.insert(entry.name.as_str()) {
            errors.push(ValidationError::new(
                ManifestPath::root()
                    .key(collection_key)
                    .index(index)
                    .key("name"),
                message_of(&entry.name),
            ));
        }
    }
    errors
}

fn resolve_abi(data_source: &DataSource, manifest_dir: &Path) -> Option<Abi> {
    let abi_ref = data_source
        .mapping
        .abis
        .iter()
        .find(|candidate| candidate.name == data_source.source.abi)?;
    Abi::load(&abi_ref.name, &resolve_file(manifest_dir, &abi_ref.file)).ok()
}

fn missing_signature_message(
    noun: &str,
    plural: &str,
    signature: &str,
    abi_name: &str,
    available: &BTreeSet<String>,
) -> String {
    let mut message = format!(
        "{noun} with signature '{signature}' not present in ABI '{abi_name}'.\nAvailable {plural}:"
    );
    for candidate in available {
        message.push_str(&format!("\n- {candidate}"));
    }
    message
}

fn address_pattern() -> &'static Regex {
    static ADDRESS_PATTERN: OnceLock<Regex> = OnceLock::new();
    ADDRESS_PATTERN
        .get_or_init(|| Regex::new(r"^(0x)?[0-9a-fA-F]{40}$").expect("valid address pattern"))
}
