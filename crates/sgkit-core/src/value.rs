//! # Raw Manifest Values
//!
//! The order-preserving value tree a parsed manifest document becomes.
//!
//! serde_yaml's own value type stores mappings in an order-preserving map,
//! but downstream code would have to thread YAML details (tags, non-string
//! keys) through every consumer. Converting once into [`RawValue`] at the
//! load boundary gives the rest of the workspace a single, YAML-free tree:
//! mappings are key/value pair lists in document order, keys are plain
//! strings, tags are stripped.
//!
//! ## Design
//!
//! - Conversion happens exactly once per load; the tree is immutable after.
//! - Mapping order is the author's order, so diagnostics and write-back
//!   follow the document as written.
//! - Non-string mapping keys are coerced to their scalar rendering; keys
//!   that are themselves collections are rejected.

use thiserror::Error;

/// Errors converting a foreign document value into a [`RawValue`].
#[derive(Error, Debug)]
pub enum ValueError {
    /// YAML permits collection-valued mapping keys; manifests do not.
    #[error("unsupported collection-valued mapping key in document")]
    NonScalarKey,

    /// A numeric scalar outside the integer and float domains.
    #[error("unsupported numeric value in document: {value}")]
    UnrepresentableNumber { value: String },
}

/// A parsed document value with mapping order preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Explicit null or empty node.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar. Wide enough for the full signed and unsigned
    /// 64-bit ranges YAML integers arrive in.
    Int(i128),
    /// Floating-point scalar. Never produced by well-formed manifests, but
    /// carried so validation can name it in error messages.
    Float(f64),
    /// String scalar.
    String(String),
    /// Sequence of values.
    List(Vec<RawValue>),
    /// Mapping as key/value pairs in document order.
    Map(Vec<(String, RawValue)>),
}

impl RawValue {
    /// Convert a parsed YAML value into the raw tree.
    ///
    /// Handles the type mapping differences between YAML and the manifest
    /// value model: tags are stripped, scalar mapping keys are coerced to
    /// strings, and integers keep their exact value across the full
    /// unsigned 64-bit range.
    pub fn from_yaml(yaml: serde_yaml::Value) -> Result<Self, ValueError> {
        match yaml {
            serde_yaml::Value::Null => Ok(Self::Null),
            serde_yaml::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i.into()))
                } else if let Some(u) = n.as_u64() {
                    Ok(Self::Int(u.into()))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(ValueError::UnrepresentableNumber {
                        value: n.to_string(),
                    })
                }
            }
            serde_yaml::Value::String(s) => Ok(Self::String(s)),
            serde_yaml::Value::Sequence(seq) => {
                let items: Result<Vec<_>, _> = seq.into_iter().map(Self::from_yaml).collect();
                Ok(Self::List(items?))
            }
            serde_yaml::Value::Mapping(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (k, v) in map {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        _ => return Err(ValueError::NonScalarKey),
                    };
                    entries.push((key, Self::from_yaml(v)?));
                }
                Ok(Self::Map(entries))
            }
            // Strip YAML tags and process the inner value.
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(tagged.value),
        }
    }

    /// The value's kind as it appears in validation messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Borrow the string contents, if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the sequence items, if this is a list.
    pub fn as_list(&self) -> Option<&[RawValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the mapping entries in document order, if this is a map.
    pub fn as_map(&self) -> Option<&[(String, RawValue)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key in a map value. `None` for missing keys and non-maps.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.as_map()
            .and_then(|entries| entries.iter().find(|(k, _)| k == key))
            .map(|(_, v)| v)
    }

    /// Whether this value is the null node.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Single-line rendering used when a validation message quotes the value it
/// rejected. Strings render bare, collections in flow style.
impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> RawValue {
        let yaml: serde_yaml::Value = serde_yaml::from_str(input).unwrap();
        RawValue::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_mapping_order_is_preserved() {
        let value = parse("zebra: 1\napple: 2\nmango: 3\n");
        let keys: Vec<_> = value
            .as_map()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_scalar_keys_are_coerced() {
        let value = parse("1: one\ntrue: yes\n");
        assert_eq!(value.get("1"), Some(&RawValue::String("one".to_string())));
        assert_eq!(value.get("true"), Some(&RawValue::String("yes".to_string())));
    }

    #[test]
    fn test_collection_key_is_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: 1\n").unwrap();
        assert!(RawValue::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_integers_above_i64_stay_exact() {
        let value = parse("block: 9223372036854775808\n");
        assert_eq!(
            value.get("block"),
            Some(&RawValue::Int(9_223_372_036_854_775_808))
        );
    }

    #[test]
    fn test_floats_stay_floats() {
        let value = parse("block: 123.0\n");
        assert_eq!(value.get("block"), Some(&RawValue::Float(123.0)));
    }

    #[test]
    fn test_tagged_value_is_unwrapped() {
        let value = parse("network: !opaque mainnet\n");
        assert_eq!(
            value.get("network").and_then(RawValue::as_str),
            Some("mainnet")
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(parse("[1]").kind_name(), "list");
        assert_eq!(parse("a: 1").kind_name(), "map");
        assert_eq!(parse("hello").kind_name(), "string");
        assert_eq!(parse("12").kind_name(), "number");
        assert_eq!(parse("true").kind_name(), "boolean");
    }

    #[test]
    fn test_display_flow_rendering() {
        let value = parse("kind: ethereum/contract\nids: [1, 2]\n");
        assert_eq!(value.to_string(), "{kind: ethereum/contract, ids: [1, 2]}");
    }

    #[test]
    fn test_get_on_non_map_is_none() {
        assert_eq!(parse("[1, 2]").get("anything"), None);
    }
}
