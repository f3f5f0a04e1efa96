//! # Structural Validation
//!
//! Validates the raw manifest tree against the bundled SDL meta-schema. The
//! traversal is driven entirely by the schema: non-null wrappers demand a
//! value, list wrappers recurse per element with the index appended to the
//! path, object types check their declared fields and reject unknown keys,
//! and named scalars type-check the leaf. Nothing in here knows what a data
//! source is; the meta-schema does.
//!
//! Structural validation is the fail-fast phase of a load. The spec-version
//! gate and the entity-schema parse also run here, before any semantic check
//! can assume a well-shaped tree.
//!
//! ## Errors
//!
//! Every finding is a [`ValidationError`] tagged with the path to the node
//! it refers to; file checks resolve relative paths against the manifest's
//! directory before testing existence.

use std::path::{Path, PathBuf};

use graphql_parser::schema::{EnumType, Field, ObjectType, Type};

use sgkit_core::{ManifestPath, RawValue, ValidationError};

use crate::error::{ManifestError, ManifestResult};
use crate::schema::{MetaSchema, MANIFEST_SCHEMA, ROOT_TYPE};
use crate::{PREVIOUS_SPEC_VERSION, SPEC_VERSION};

/// Resolve a file reference from the manifest against the manifest's
/// directory. Absolute references pass through untouched.
pub(crate) fn resolve_file(manifest_dir: &Path, reference: &str) -> PathBuf {
    let candidate = Path::new(reference);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        manifest_dir.join(candidate)
    }
}

/// Validate the raw document against the bundled meta-schema.
///
/// Returns the collected errors in traversal order; an empty vector means
/// the document is structurally valid. The `Err` arm fires only when the
/// bundled meta-schema itself cannot be parsed.
pub fn validate_manifest(
    manifest: &RawValue,
    manifest_dir: &Path,
) -> ManifestResult<Vec<ValidationError>> {
    let document =
        graphql_parser::parse_schema::<String>(MANIFEST_SCHEMA).map_err(|e| {
            ManifestError::SchemaParse {
                reason: e.to_string(),
            }
        })?;
    let schema = MetaSchema::from_document(&document);
    if schema.object(ROOT_TYPE).is_none() {
        return Err(ManifestError::SchemaParse {
            reason: format!("meta-schema does not define the {ROOT_TYPE} type"),
        });
    }
    let context = Context {
        schema: &schema,
        manifest_dir,
    };
    // The document root is an implicit non-null SubgraphManifest.
    if manifest.is_null() {
        return Ok(vec![ValidationError::new(
            ManifestPath::root(),
            "No value provided",
        )]);
    }
    Ok(validate_named_type(
        manifest,
        ROOT_TYPE,
        &ManifestPath::root(),
        &context,
    ))
}

/// Check the declared `specVersion` against the supported version.
///
/// Runs after shape validation, so the field is known to be a string. A
/// stale previous version gets a pointer at the migration command.
pub fn validate_spec_version(manifest: &RawValue) -> Vec<ValidationError> {
    let declared = manifest
        .get("specVersion")
        .and_then(RawValue::as_str)
        .unwrap_or_default();
    if declared == SPEC_VERSION {
        return Vec::new();
    }
    let mut message = format!(
        "Unsupported specVersion '{declared}'. This tool only supports specVersion {SPEC_VERSION}."
    );
    if declared == PREVIOUS_SPEC_VERSION {
        message.push_str(&format!(
            "\nRun 'sgkit migrate <manifest>' to upgrade it to specVersion {SPEC_VERSION}."
        ));
    }
    vec![ValidationError::new(
        ManifestPath::root().key("specVersion"),
        message,
    )]
}

/// Parse the entity schema file referenced by `schema.file`.
///
/// The file's existence was already checked by the `File` scalar rule; this
/// verifies it is a syntactically valid GraphQL SDL document. Errors are
/// reported at `schema > file`.
pub fn validate_entity_schema(manifest: &RawValue, manifest_dir: &Path) -> Vec<ValidationError> {
    let Some(reference) = manifest
        .get("schema")
        .and_then(|schema| schema.get("file"))
        .and_then(RawValue::as_str)
    else {
        return Vec::new();
    };
    let path = ManifestPath::root().key("schema").key("file");
    let resolved = resolve_file(manifest_dir, reference);
    let content = match std::fs::read_to_string(&resolved) {
        Ok(content) => content,
        Err(e) => {
            return vec![ValidationError::new(
                path,
                format!("Failed to read schema file {}: {e}", resolved.display()),
            )]
        }
    };
    match graphql_parser::parse_schema::<String>(&content) {
        Ok(_) => Vec::new(),
        Err(e) => vec![ValidationError::new(
            path,
            format!("Failed to parse GraphQL schema: {e}"),
        )],
    }
}

// ---------------------------------------------------------------------------
// Schema-driven traversal
// ---------------------------------------------------------------------------

struct Context<'a> {
    schema: &'a MetaSchema<'a>,
    manifest_dir: &'a Path,
}

fn validate_value<'a>(
    value: &RawValue,
    ty: &Type<'a, String>,
    path: &ManifestPath,
    context: &Context<'a>,
) -> Vec<ValidationError> {
    match ty {
        Type::NonNullType(inner) => {
            if value.is_null() {
                vec![ValidationError::new(path.clone(), "No value provided")]
            } else {
                validate_value(value, inner, path, context)
            }
        }
        Type::ListType(inner) => match value.as_list() {
            Some(items) => items
                .iter()
                .enumerate()
                .flat_map(|(index, item)| validate_value(item, inner, &path.index(index), context))
                .collect(),
            None => vec![ValidationError::new(
                path.clone(),
                format!("Expected list, found {}:\n{}", value.kind_name(), value),
            )],
        },
        Type::NamedType(name) => validate_named_type(value, name, path, context),
    }
}

fn validate_named_type<'a>(
    value: &RawValue,
    name: &str,
    path: &ManifestPath,
    context: &Context<'a>,
) -> Vec<ValidationError> {
    match name {
        "String" => match value {
            RawValue::String(_) => Vec::new(),
            other => vec![ValidationError::new(
                path.clone(),
                format!("Expected string, found {}:\n{}", other.kind_name(), other),
            )],
        },
        "Boolean" => match value {
            RawValue::Bool(_) => Vec::new(),
            other => vec![ValidationError::new(
                path.clone(),
                format!("Expected boolean, found {}:\n{}", other.kind_name(), other),
            )],
        },
        "BigInt" => match value {
            RawValue::Int(_) => Vec::new(),
            RawValue::String(s) if is_big_int_literal(s) => Vec::new(),
            other => vec![ValidationError::new(
                path.clone(),
                format!("Expected BigInt, found {}:\n{}", other.kind_name(), other),
            )],
        },
        "File" => match value {
            RawValue::String(reference) => {
                let resolved = resolve_file(context.manifest_dir, reference);
                if resolved.exists() {
                    Vec::new()
                } else {
                    vec![ValidationError::new(
                        path.clone(),
                        format!("File does not exist: {}", resolved.display()),
                    )]
                }
            }
            other => vec![ValidationError::new(
                path.clone(),
                format!("Expected filename, found {}:\n{}", other.kind_name(), other),
            )],
        },
        // Opaque JSON payloads pass through unchecked.
        "JSON" => Vec::new(),
        other => {
            if let Some(object) = context.schema.object(other) {
                validate_object_value(value, object, path, context)
            } else if let Some(enum_type) = context.schema.enum_type(other) {
                validate_enum_value(value, enum_type, path)
            } else {
                vec![ValidationError::new(
                    path.clone(),
                    format!("No validator for unsupported schema type: {other}"),
                )]
            }
        }
    }
}

fn validate_object_value<'a>(
    value: &RawValue,
    object: &ObjectType<'a, String>,
    path: &ManifestPath,
    context: &Context<'a>,
) -> Vec<ValidationError> {
    let Some(entries) = value.as_map() else {
        return vec![ValidationError::new(
            path.clone(),
            format!("Expected map, found {}:\n{}", value.kind_name(), value),
        )];
    };
    let mut errors: Vec<ValidationError> = object
        .fields
        .iter()
        .flat_map(|field| validate_field(value, field, path, context))
        .collect();
    errors.extend(
        entries
            .iter()
            .filter(|(key, _)| !object.fields.iter().any(|field| field.name == *key))
            .map(|(key, _)| {
                ValidationError::new(path.clone(), format!("Unexpected key in map: {key}"))
            }),
    );
    errors
}

fn validate_field<'a>(
    map: &RawValue,
    field: &Field<'a, String>,
    parent: &ManifestPath,
    context: &Context<'a>,
) -> Vec<ValidationError> {
    let path = parent.key(field.name.clone());
    match map.get(&field.name) {
        Some(value) => validate_value(value, &field.field_type, &path, context),
        None => {
            if matches!(field.field_type, Type::NonNullType(_)) {
                vec![ValidationError::new(path, "No value provided")]
            } else {
                Vec::new()
            }
        }
    }
}

fn validate_enum_value(
    value: &RawValue,
    enum_type: &EnumType<'_, String>,
    path: &ManifestPath,
) -> Vec<ValidationError> {
    let allowed: Vec<&str> = enum_type
        .values
        .iter()
        .map(|ev| ev.name.as_str())
        .collect();
    let matches = value
        .as_str()
        .map_or(false, |s| allowed.iter().any(|a| *a == s));
    if matches {
        Vec::new()
    } else {
        vec![ValidationError::new(
            path.clone(),
            format!(
                "Unexpected enum value: {value}, allowed values are: {}",
                allowed.join(", ")
            ),
        )]
    }
}

/// Decimal integer literal, optionally negative.
fn is_big_int_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
