//! # Typed Manifest Model
//!
//! The strongly typed view of a manifest, deserialized only after structural
//! validation has passed. Semantic checks and code generation work against
//! these types instead of the raw value tree.
//!
//! File references stay as the relative strings written in the manifest;
//! callers resolve them against the manifest's directory when they touch the
//! filesystem.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use sgkit_core::ManifestPath;

/// Data source kinds this tool knows how to index and generate code for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    EthereumContract,
}

impl DataSourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            DataSourceKind::EthereumContract => "ethereum/contract",
        }
    }

    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "ethereum/contract" => Some(DataSourceKind::EthereumContract),
            _ => None,
        }
    }
}

/// A parsed subgraph manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub spec_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    pub schema: SchemaRef,
    pub data_sources: Vec<DataSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<Template>,
}

impl Manifest {
    /// All data sources and templates paired with the path each one lives
    /// at, for checks that treat both collections alike.
    pub fn data_sources_and_templates(&self) -> Vec<(ManifestPath, &DataSource)> {
        let mut out = Vec::with_capacity(self.data_sources.len() + self.templates.len());
        for (index, data_source) in self.data_sources.iter().enumerate() {
            out.push((
                ManifestPath::root().key("dataSources").index(index),
                data_source,
            ));
        }
        for (index, template) in self.templates.iter().enumerate() {
            out.push((ManifestPath::root().key("templates").index(index), template));
        }
        out
    }
}

/// Reference to the entity schema file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRef {
    pub file: String,
}

/// One data source definition. Templates share the exact same shape, so the
/// alias below stands in wherever the distinction is only positional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    pub source: Source,
    pub mapping: Mapping,
}

pub type Template = DataSource;

impl DataSource {
    /// The kind, if it is one this tool supports.
    pub fn known_kind(&self) -> Option<DataSourceKind> {
        DataSourceKind::parse(&self.kind)
    }
}

/// The on-chain source a data source observes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub abi: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_start_block"
    )]
    pub start_block: Option<u64>,
}

/// The mapping section: which module handles which events, calls and blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub api_version: String,
    pub language: String,
    pub file: String,
    pub entities: Vec<String>,
    pub abis: Vec<AbiRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_handlers: Vec<EventHandler>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub call_handlers: Vec<CallHandler>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_handlers: Vec<BlockHandler>,
}

impl Mapping {
    pub fn has_handlers(&self) -> bool {
        !self.event_handlers.is_empty()
            || !self.call_handlers.is_empty()
            || !self.block_handlers.is_empty()
    }
}

/// A named ABI file available to the mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiRef {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHandler {
    pub event: String,
    pub handler: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallHandler {
    pub function: String,
    pub handler: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHandler {
    pub handler: String,
}

// YAML writers disagree on whether block numbers are numbers or strings, so
// both spellings deserialize.
fn deserialize_start_block<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Literal {
        Number(u64),
        Text(String),
    }
    match Option::<Literal>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Literal::Number(n)) => Ok(Some(n)),
        Some(Literal::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid startBlock '{s}': {e}"))),
    }
}
