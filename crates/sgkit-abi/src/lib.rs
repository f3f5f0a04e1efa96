//! # sgkit-abi — Contract Interface Model
//!
//! Loads contract ABI JSON files and answers the one question the rest of
//! the workspace asks of them: which event and call-function signatures does
//! this interface declare?
//!
//! Signatures are rendered in the canonical `Name(type1,type2,…)` form that
//! manifests use to bind handlers, including recursive tuple flattening, so
//! a handler declaration can be matched against an interface by plain string
//! equality.

pub mod abi;
pub mod error;

pub use abi::{Abi, AbiEntry, AbiParam};
pub use error::{AbiError, AbiResult};
