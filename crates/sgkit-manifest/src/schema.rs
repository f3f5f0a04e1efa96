//! Bundled meta-schema access.
//!
//! The manifest's structural shape is described by a GraphQL SDL document
//! compiled into the binary. [`MetaSchema`] parses it once per validation
//! pass and indexes its type definitions by name so the traversal can chase
//! named-type references in constant time. The schema is data here, not
//! logic; the traversal in [`crate::structural`] is schema-agnostic.

use std::collections::HashMap;

use graphql_parser::schema::{Definition, Document, EnumType, ObjectType, TypeDefinition};

/// GraphQL SDL document describing the shape of a valid manifest.
pub(crate) const MANIFEST_SCHEMA: &str = include_str!("manifest.graphql");

/// Name of the object type a manifest document is validated against.
pub(crate) const ROOT_TYPE: &str = "SubgraphManifest";

/// A parsed schema with object and enum definitions indexed by name.
pub(crate) struct MetaSchema<'a> {
    objects: HashMap<&'a str, &'a ObjectType<'a, String>>,
    enums: HashMap<&'a str, &'a EnumType<'a, String>>,
}

impl<'a> MetaSchema<'a> {
    /// Index the type definitions of a parsed SDL document.
    pub(crate) fn from_document(document: &'a Document<'a, String>) -> Self {
        let mut objects = HashMap::new();
        let mut enums = HashMap::new();
        for definition in &document.definitions {
            if let Definition::TypeDefinition(type_definition) = definition {
                match type_definition {
                    TypeDefinition::Object(object) => {
                        objects.insert(object.name.as_str(), object);
                    }
                    TypeDefinition::Enum(enum_type) => {
                        enums.insert(enum_type.name.as_str(), enum_type);
                    }
                    _ => {}
                }
            }
        }
        Self { objects, enums }
    }

    /// Look up an object type by name.
    pub(crate) fn object(&self, name: &str) -> Option<&'a ObjectType<'a, String>> {
        self.objects.get(name).copied()
    }

    /// Look up an enum type by name.
    pub(crate) fn enum_type(&self, name: &str) -> Option<&'a EnumType<'a, String>> {
        self.enums.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_parser::parse_schema;

    #[test]
    fn test_bundled_schema_parses_and_has_root() {
        let document = parse_schema::<String>(MANIFEST_SCHEMA).unwrap();
        let schema = MetaSchema::from_document(&document);
        let root = schema.object(ROOT_TYPE).unwrap();
        let field_names: Vec<_> = root.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            field_names,
            vec![
                "specVersion",
                "description",
                "repository",
                "schema",
                "dataSources",
                "templates"
            ]
        );
    }

    #[test]
    fn test_bundled_schema_defines_all_referenced_objects() {
        let document = parse_schema::<String>(MANIFEST_SCHEMA).unwrap();
        let schema = MetaSchema::from_document(&document);
        for name in [
            "Schema",
            "DataSource",
            "DataSourceTemplate",
            "ContractSource",
            "ContractMapping",
            "ContractAbi",
            "ContractEventHandler",
            "ContractCallHandler",
            "ContractBlockHandler",
        ] {
            assert!(schema.object(name).is_some(), "missing type {name}");
        }
    }

    #[test]
    fn test_unknown_type_lookup_is_none() {
        let document = parse_schema::<String>(MANIFEST_SCHEMA).unwrap();
        let schema = MetaSchema::from_document(&document);
        assert!(schema.object("Nope").is_none());
        assert!(schema.enum_type("Nope").is_none());
    }
}
