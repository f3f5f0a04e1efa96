//! # sgkit-codegen
//!
//! Generates the AssemblyScript glue for data source templates. Each
//! template in a loaded manifest becomes one exported class whose static
//! `create` and `createWithContext` helpers ask the host runtime to start
//! indexing a new instance of the template at a given address.
//!
//! Generation is all or nothing: a template of an unsupported kind fails
//! with [`CodegenError::UnsupportedKind`] and produces no partial output.

pub mod error;
pub mod template;
pub mod typescript;

pub use error::{CodegenError, CodegenResult};
pub use template::DataSourceTemplateCodeGenerator;
pub use typescript::{Klass, ModuleImports, NamedType, Param, StaticMethod};
