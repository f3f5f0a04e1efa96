//! # Contract Interface Loading and Signatures
//!
//! An [`Abi`] is the parsed contents of one contract ABI JSON file, bound to
//! the name the manifest refers to it by. The file must be a JSON array of
//! interface entries; compiler metadata wrappers are not unwrapped.
//!
//! ## Signature form
//!
//! Handler declarations bind to interface members by canonical signature,
//! `Name(type1,type2,…)` with no spaces and no parameter names. Tuple-typed
//! parameters flatten to their member types in parentheses, carrying any
//! array suffix: `tuple` → `(…)`, `tuple[]` → `(…)[]`, `tuple[3]` → `(…)[3]`,
//! recursively for nested tuples. All other type strings pass through
//! verbatim.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AbiError, AbiResult};

/// One parameter of an interface entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    /// Parameter name. Not part of the canonical signature.
    #[serde(default)]
    pub name: String,
    /// Solidity type expression, e.g. `uint256`, `address[]`, `tuple[2]`.
    #[serde(rename = "type")]
    pub sol_type: String,
    /// Member parameters when `sol_type` is a tuple form.
    #[serde(default)]
    pub components: Vec<AbiParam>,
}

/// One entry of a contract interface: an event, function, constructor, etc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiEntry {
    /// Entry kind: `event`, `function`, `constructor`, `fallback`, …
    #[serde(rename = "type")]
    pub kind: String,
    /// Member name. Absent for constructors and fallbacks.
    #[serde(default)]
    pub name: Option<String>,
    /// Input parameters in declaration order.
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
}

impl AbiEntry {
    /// The canonical signature of this entry, if it has a name.
    pub fn signature(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        let params: Vec<String> = self.inputs.iter().map(render_parameter).collect();
        Some(format!("{}({})", name, params.join(",")))
    }
}

/// A contract interface loaded from disk.
#[derive(Debug, Clone)]
pub struct Abi {
    /// Name the manifest binds this interface to.
    pub name: String,
    /// File the interface was loaded from.
    pub file: PathBuf,
    /// Interface entries in file order.
    pub entries: Vec<AbiEntry>,
}

impl Abi {
    /// Load a contract interface from a JSON file.
    ///
    /// The file must contain a JSON array of interface entries. Missing
    /// files, unparseable JSON, and non-array payloads each fail with their
    /// own [`AbiError`] variant.
    pub fn load(name: &str, file: &Path) -> AbiResult<Self> {
        let content = std::fs::read_to_string(file).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AbiError::FileNotFound {
                    path: file.to_path_buf(),
                }
            } else {
                AbiError::Io(e)
            }
        })?;
        let data: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| AbiError::Parse {
                path: file.to_path_buf(),
                source: e,
            })?;
        if !data.is_array() {
            return Err(AbiError::NotAnArray {
                path: file.to_path_buf(),
            });
        }
        let entries: Vec<AbiEntry> =
            serde_json::from_value(data).map_err(|e| AbiError::Parse {
                path: file.to_path_buf(),
                source: e,
            })?;
        Ok(Self {
            name: name.to_string(),
            file: file.to_path_buf(),
            entries,
        })
    }

    /// Canonical signatures of all `event` entries.
    pub fn event_signatures(&self) -> BTreeSet<String> {
        self.signatures_of_kind("event")
    }

    /// Canonical signatures of all `function` entries.
    pub fn call_function_signatures(&self) -> BTreeSet<String> {
        self.signatures_of_kind("function")
    }

    fn signatures_of_kind(&self, kind: &str) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .filter_map(AbiEntry::signature)
            .collect()
    }
}

/// Render one parameter for the canonical signature.
fn render_parameter(param: &AbiParam) -> String {
    match param.sol_type.strip_prefix("tuple") {
        Some(suffix) if suffix.is_empty() || suffix.starts_with('[') => {
            let members: Vec<String> = param.components.iter().map(render_parameter).collect();
            format!("({}){}", members.join(","), suffix)
        }
        _ => param.sol_type.clone(),
    }
}
