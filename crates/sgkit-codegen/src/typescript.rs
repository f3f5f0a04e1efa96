//! # AssemblyScript Source Fragments
//!
//! A minimal source model for the generated code: imports, classes, static
//! methods and their parameters, each rendering itself through `Display`.
//! The generator assembles these values; nothing here knows anything about
//! manifests.

use std::fmt;

/// A type reference by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub name: String,
}

impl NamedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One `name: Type` method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub param_type: NamedType,
}

impl Param {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: NamedType::new(param_type),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.param_type)
    }
}

/// A static method with a single-expression body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMethod {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: NamedType,
    pub body: String,
}

impl fmt::Display for StaticMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(Param::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "  static {}({}): {} {{", self.name, params, self.return_type)?;
        writeln!(f, "    {}", self.body)?;
        writeln!(f, "  }}")
    }
}

/// An exported class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Klass {
    pub name: String,
    pub extends: Option<String>,
    pub methods: Vec<StaticMethod>,
}

impl fmt::Display for Klass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extends {
            Some(parent) => writeln!(f, "export class {} extends {} {{", self.name, parent)?,
            None => writeln!(f, "export class {} {{", self.name)?,
        }
        for (position, method) in self.methods.iter().enumerate() {
            if position > 0 {
                writeln!(f)?;
            }
            write!(f, "{method}")?;
        }
        writeln!(f, "}}")
    }
}

/// One `import { a, b } from 'module'` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleImports {
    pub names: Vec<String>,
    pub module: String,
}

impl ModuleImports {
    pub fn new<I, S>(names: I, module: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            module: module.into(),
        }
    }
}

impl fmt::Display for ModuleImports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "import {{ {} }} from '{}'",
            self.names.join(", "),
            self.module
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_renders_name_and_type() {
        assert_eq!(Param::new("address", "Address").to_string(), "address: Address");
    }

    #[test]
    fn test_static_method_layout() {
        let method = StaticMethod {
            name: "create".to_string(),
            params: vec![Param::new("address", "Address")],
            return_type: NamedType::new("void"),
            body: "DataSourceTemplate.create('Gravatar', [address.toHex()])".to_string(),
        };
        assert_eq!(
            method.to_string(),
            "  static create(address: Address): void {\n\
             \x20   DataSourceTemplate.create('Gravatar', [address.toHex()])\n\
             \x20 }\n"
        );
    }

    #[test]
    fn test_klass_separates_methods_with_blank_lines() {
        let klass = Klass {
            name: "Gravatar".to_string(),
            extends: Some("DataSourceTemplate".to_string()),
            methods: vec![
                StaticMethod {
                    name: "first".to_string(),
                    params: Vec::new(),
                    return_type: NamedType::new("void"),
                    body: "a()".to_string(),
                },
                StaticMethod {
                    name: "second".to_string(),
                    params: Vec::new(),
                    return_type: NamedType::new("void"),
                    body: "b()".to_string(),
                },
            ],
        };
        assert_eq!(
            klass.to_string(),
            "export class Gravatar extends DataSourceTemplate {\n\
             \x20 static first(): void {\n\
             \x20   a()\n\
             \x20 }\n\
             \n\
             \x20 static second(): void {\n\
             \x20   b()\n\
             \x20 }\n\
             }\n"
        );
    }

    #[test]
    fn test_module_imports_line() {
        let imports = ModuleImports::new(["Address", "DataSourceTemplate"], "@graphprotocol/graph-ts");
        assert_eq!(
            imports.to_string(),
            "import { Address, DataSourceTemplate } from '@graphprotocol/graph-ts'\n"
        );
    }
}
