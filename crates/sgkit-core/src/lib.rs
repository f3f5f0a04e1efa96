//! # sgkit-core — Foundational Types for Subgraph Kit
//!
//! This crate is the bedrock of Subgraph Kit. It defines the primitives every
//! other crate in the workspace builds on: the order-preserving value tree a
//! parsed manifest becomes, the path type that addresses positions inside that
//! tree, and the path-tagged diagnostics every validation stage produces.
//! Every other `sgkit-*` crate depends on `sgkit-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **One value tree for all document work.** YAML input is converted into
//!    [`RawValue`] exactly once per load. The tree preserves mapping key order
//!    so that diagnostics and write-back reflect the document as authored.
//!
//! 2. **Paths are data, not strings.** [`ManifestPath`] is a sequence of
//!    [`PathSegment`]s. Rendering (`a > b > 0`, or `/` for the root) happens
//!    only at the reporting boundary.
//!
//! 3. **Diagnostics carry position, never fix it up later.** Both
//!    [`ValidationError`] and [`ValidationWarning`] are created with the path
//!    they refer to; combined report rendering is a pure function over them.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sgkit-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostic;
pub mod path;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use diagnostic::{
    combined_error_message, combined_warning_message, display_path, ValidationError,
    ValidationWarning,
};
pub use path::{ManifestPath, PathSegment};
pub use value::{RawValue, ValueError};
