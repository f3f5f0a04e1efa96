//! # sgkit-manifest
//!
//! Loading, validation and write-back for subgraph manifests.
//!
//! A load runs in two phases. The structural phase checks the raw YAML
//! document against the bundled meta-schema and fails fast: nothing else
//! can be trusted until the shape is right. The semantic phase then runs a
//! battery of independent checks over the typed manifest (ABI references,
//! ABI files, addresses, signature coverage, handler presence, name
//! uniqueness) and reports every finding at once, each tagged with the path
//! it refers to. Placeholder-content findings surface as warnings and never
//! fail the load.
//!
//! ## Modules
//!
//! - [`loader`] — the `load`/`write` entry points
//! - [`model`] — the typed manifest
//! - [`structural`] — meta-schema validation of the raw document
//! - [`semantic`] — the check battery and warning pass
//! - [`migration`] — spec-version text migration
//! - [`error`] — the crate's error type

pub mod error;
pub mod loader;
pub mod migration;
pub mod model;
pub mod semantic;
pub mod structural;

mod schema;
mod writer;

pub use error::{ManifestError, ManifestResult};
pub use loader::{LoadOptions, Subgraph};
pub use model::{
    AbiRef, BlockHandler, CallHandler, DataSource, DataSourceKind, EventHandler, Manifest,
    Mapping, SchemaRef, Source, Template,
};

/// The manifest spec version this tool supports.
pub const SPEC_VERSION: &str = "0.0.2";

/// The retired spec version [`migration::migrate_spec_version`] upgrades
/// from.
pub const PREVIOUS_SPEC_VERSION: &str = "0.0.1";
