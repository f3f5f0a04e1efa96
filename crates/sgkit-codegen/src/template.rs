//! # Template Code Generation
//!
//! Turns one data source template into its generated AssemblyScript
//! surface: the host-runtime imports and a class named after the template
//! whose static helpers instantiate it at a concrete address.

use sgkit_manifest::{DataSourceKind, Template};

use crate::error::{CodegenError, CodegenResult};
use crate::typescript::{Klass, ModuleImports, NamedType, Param, StaticMethod};

/// Host runtime module the generated code imports from.
const RUNTIME_MODULE: &str = "@graphprotocol/graph-ts";

/// Generates code for a single template declaration.
pub struct DataSourceTemplateCodeGenerator<'a> {
    template: &'a Template,
}

impl<'a> DataSourceTemplateCodeGenerator<'a> {
    pub fn new(template: &'a Template) -> Self {
        Self { template }
    }

    /// The host-runtime types the generated class depends on.
    pub fn generate_module_imports(&self) -> Vec<ModuleImports> {
        vec![ModuleImports::new(
            ["Address", "DataSourceTemplate", "DataSourceContext"],
            RUNTIME_MODULE,
        )]
    }

    /// The generated classes for this template, or the fatal unsupported
    /// kind error. Unknown kind strings fail before the kind dispatch.
    pub fn generate_types(&self) -> CodegenResult<Vec<Klass>> {
        let kind = self
            .template
            .known_kind()
            .ok_or_else(|| CodegenError::UnsupportedKind {
                kind: self.template.kind.clone(),
            })?;
        match kind {
            DataSourceKind::EthereumContract => Ok(vec![self.ethereum_contract_class()]),
        }
    }

    fn ethereum_contract_class(&self) -> Klass {
        let name = &self.template.name;
        Klass {
            name: name.clone(),
            extends: Some("DataSourceTemplate".to_string()),
            methods: vec![
                StaticMethod {
                    name: "create".to_string(),
                    params: vec![Param::new("address", "Address")],
                    return_type: NamedType::new("void"),
                    body: format!("DataSourceTemplate.create('{name}', [address.toHex()])"),
                },
                StaticMethod {
                    name: "createWithContext".to_string(),
                    params: vec![
                        Param::new("address", "Address"),
                        Param::new("context", "DataSourceContext"),
                    ],
                    return_type: NamedType::new("void"),
                    body: format!(
                        "DataSourceTemplate.createWithContext('{name}', [address.toHex()], context)"
                    ),
                },
            ],
        }
    }
}
