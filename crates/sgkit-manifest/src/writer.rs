//! # YAML Writer
//!
//! Renders a value tree back to manifest YAML: two-space indent, block
//! style for non-empty maps and sequences, plain scalars wherever YAML then
//! reads back the same value, and long plain strings folded at column 80 on
//! space boundaries. Quoting is the fallback, not the default, so written
//! manifests look like hand-written ones.

use sgkit_core::RawValue;

const MAX_WIDTH: usize = 80;

/// Render a tree as a YAML document ending in a newline.
pub(crate) fn to_yaml_string(root: &RawValue) -> String {
    let mut out = String::new();
    match root {
        RawValue::Map(entries) if !entries.is_empty() => {
            write_map(&mut out, entries, 0, None);
        }
        RawValue::List(items) if !items.is_empty() => {
            for item in items {
                write_item(&mut out, item, 0);
            }
        }
        other => {
            push_scalar(&mut out, other, 0, 0);
            // Leading space from the scalar writer is key-value framing;
            // a bare document does not want it.
            out = out.trim_start().to_string();
            out.push('\n');
        }
    }
    out
}

fn write_map(
    out: &mut String,
    entries: &[(String, RawValue)],
    level: usize,
    mut first_prefix: Option<&str>,
) {
    for (key, value) in entries {
        let prefix = match first_prefix.take() {
            Some(dash) => dash.to_string(),
            None => "  ".repeat(level),
        };
        write_entry(out, &prefix, key, value, level);
    }
}

fn write_entry(out: &mut String, prefix: &str, key: &str, value: &RawValue, level: usize) {
    let rendered_key = render_key(key);
    match value {
        RawValue::Map(entries) if !entries.is_empty() => {
            out.push_str(prefix);
            out.push_str(&rendered_key);
            out.push_str(":\n");
            write_map(out, entries, level + 1, None);
        }
        RawValue::List(items) if !items.is_empty() => {
            out.push_str(prefix);
            out.push_str(&rendered_key);
            out.push_str(":\n");
            for item in items {
                write_item(out, item, level + 1);
            }
        }
        other => {
            out.push_str(prefix);
            out.push_str(&rendered_key);
            out.push(':');
            push_scalar(out, other, prefix.len() + rendered_key.len() + 1, level);
            out.push('\n');
        }
    }
}

fn write_item(out: &mut String, value: &RawValue, level: usize) {
    let indent = "  ".repeat(level);
    match value {
        RawValue::Map(entries) if !entries.is_empty() => {
            let dash = format!("{indent}- ");
            write_map(out, entries, level + 1, Some(&dash));
        }
        RawValue::List(items) if !items.is_empty() => {
            out.push_str(&indent);
            out.push_str("-\n");
            for item in items {
                write_item(out, item, level + 1);
            }
        }
        other => {
            out.push_str(&indent);
            out.push('-');
            push_scalar(out, other, indent.len() + 1, level);
            out.push('\n');
        }
    }
}

fn push_scalar(out: &mut String, value: &RawValue, used: usize, level: usize) {
    match value {
        RawValue::Null => out.push_str(" null"),
        RawValue::Bool(true) => out.push_str(" true"),
        RawValue::Bool(false) => out.push_str(" false"),
        RawValue::Int(n) => {
            out.push(' ');
            out.push_str(&n.to_string());
        }
        RawValue::Float(x) => {
            out.push(' ');
            out.push_str(&x.to_string());
        }
        RawValue::String(s) => push_string(out, s, used, level),
        RawValue::List(_) => out.push_str(" []"),
        RawValue::Map(_) => out.push_str(" {}"),
    }
}

fn push_string(out: &mut String, s: &str, used: usize, level: usize) {
    if is_plain(s) {
        if used + 1 + s.len() > MAX_WIDTH && can_fold(s) {
            push_folded(out, s, used, level);
        } else {
            out.push(' ');
            out.push_str(s);
        }
    } else if s.chars().any(char::is_control) {
        out.push(' ');
        out.push_str(&quote_double(s));
    } else {
        out.push(' ');
        out.push_str(&quote_single(s));
    }
}

// Greedy wrap at spaces; continuation lines are indented one level deeper
// than the key so the parser reads them as the same plain scalar.
fn push_folded(out: &mut String, text: &str, used: usize, level: usize) {
    let continuation = "  ".repeat(level + 1);
    let mut column = used;
    for (position, word) in text.split(' ').enumerate() {
        if position > 0 && column + 1 + word.len() > MAX_WIDTH {
            out.push('\n');
            out.push_str(&continuation);
            out.push_str(word);
            column = continuation.len() + word.len();
        } else {
            out.push(' ');
            out.push_str(word);
            column += 1 + word.len();
        }
    }
}

fn render_key(key: &str) -> String {
    if is_plain(key) {
        key.to_string()
    } else {
        quote_single(key)
    }
}

fn quote_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn quote_double(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Conservative test for strings YAML reads back unchanged without quotes.
fn is_plain(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    if s.chars().any(|c| c.is_control()) {
        return false;
    }
    if first.is_whitespace() || s.ends_with(|c: char| c.is_whitespace()) {
        return false;
    }
    if matches!(
        first,
        '-' | '?' | ':' | ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\''
            | '"' | '%' | '@' | '`'
    ) {
        return false;
    }
    if s.contains(": ") || s.ends_with(':') || s.contains(" #") {
        return false;
    }
    !reads_as_other_scalar(s)
}

// Strings the YAML core schema would resolve to null, bool or a number.
fn reads_as_other_scalar(s: &str) -> bool {
    matches!(
        s,
        "null" | "Null" | "NULL" | "~" | "true" | "True" | "TRUE" | "false" | "False" | "FALSE"
    ) || s.parse::<i64>().is_ok()
        || s.parse::<f64>().is_ok()
        || is_radix_literal(s)
        || matches!(
            s,
            ".inf" | "-.inf" | "+.inf" | ".Inf" | "-.Inf" | "+.Inf" | ".INF" | "-.INF" | "+.INF"
                | ".nan" | ".NaN" | ".NAN"
        )
}

fn is_radix_literal(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    if let Some(hex) = body.strip_prefix("0x") {
        return !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }
    if let Some(octal) = body.strip_prefix("0o") {
        return !octal.is_empty() && octal.bytes().all(|b| (b'0'..=b'7').contains(&b));
    }
    false
}

// Folding turns line breaks back into single spaces on read, so every gap
// must be a single space and no wrapped word may start a line with an
// indicator character.
fn can_fold(s: &str) -> bool {
    s.split(' ').all(|word| {
        !word.is_empty()
            && !word.starts_with([
                '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"',
                '%', '@', '`',
            ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(yaml: &str) -> RawValue {
        RawValue::from_yaml(serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    #[test]
    fn test_block_layout_matches_manifest_conventions() {
        let tree = raw(
            r#"
specVersion: 0.0.2
schema:
  file: ./schema.graphql
dataSources:
  - kind: ethereum/contract
    name: Gravatar
    mapping:
      entities:
        - Gravatar
"#,
        );
        assert_eq!(
            to_yaml_string(&tree),
            "specVersion: 0.0.2\n\
             schema:\n\
             \x20 file: ./schema.graphql\n\
             dataSources:\n\
             \x20 - kind: ethereum/contract\n\
             \x20   name: Gravatar\n\
             \x20   mapping:\n\
             \x20     entities:\n\
             \x20       - Gravatar\n"
        );
    }

    #[test]
    fn test_long_plain_scalar_folds_at_column_80() {
        let word = "aaaaaaaaaa";
        let text = vec![word; 12].join(" ");
        let tree = RawValue::Map(vec![("description".to_string(), RawValue::String(text.clone()))]);

        let written = to_yaml_string(&tree);
        let expected_first = format!("description: {}", vec![word; 6].join(" "));
        let expected_second = format!("  {}", vec![word; 6].join(" "));
        assert_eq!(written, format!("{expected_first}\n{expected_second}\n"));
        assert!(written.lines().all(|line| line.len() <= 80));

        let reparsed = raw(&written);
        assert_eq!(reparsed.get("description"), Some(&RawValue::String(text)));
    }

    #[test]
    fn test_folded_scalar_under_a_sequence_item_indents_past_the_dash() {
        let word = "aaaaaaaaaa";
        let text = vec![word; 10].join(" ");
        let tree = RawValue::Map(vec![(
            "dataSources".to_string(),
            RawValue::List(vec![RawValue::Map(vec![(
                "description".to_string(),
                RawValue::String(text.clone()),
            )])]),
        )]);

        let written = to_yaml_string(&tree);
        let reparsed = raw(&written);
        let items = reparsed.get("dataSources").unwrap().as_list().unwrap();
        assert_eq!(items[0].get("description"), Some(&RawValue::String(text)));
    }

    #[test]
    fn test_number_and_keyword_lookalikes_are_quoted() {
        let tree = RawValue::Map(vec![
            ("a".to_string(), RawValue::String("6175244".to_string())),
            ("b".to_string(), RawValue::String("true".to_string())),
            (
                "c".to_string(),
                RawValue::String("0x2E645469f354BB4F5c8a05B3b30A929361cf77eC".to_string()),
            ),
            ("d".to_string(), RawValue::String("0.0.2".to_string())),
        ]);
        assert_eq!(
            to_yaml_string(&tree),
            "a: '6175244'\n\
             b: 'true'\n\
             c: '0x2E645469f354BB4F5c8a05B3b30A929361cf77eC'\n\
             d: 0.0.2\n"
        );
    }

    #[test]
    fn test_reserved_characters_force_quoting() {
        let tree = RawValue::Map(vec![
            ("a".to_string(), RawValue::String("key: value".to_string())),
            ("b".to_string(), RawValue::String("it's".to_string())),
            ("c".to_string(), RawValue::String("- entry".to_string())),
            ("d".to_string(), RawValue::String(String::new())),
        ]);
        assert_eq!(
            to_yaml_string(&tree),
            "a: 'key: value'\nb: 'it''s'\nc: '- entry'\nd: ''\n"
        );
    }

    #[test]
    fn test_control_characters_use_double_quotes() {
        let tree = RawValue::Map(vec![(
            "note".to_string(),
            RawValue::String("first\nsecond".to_string()),
        )]);
        let written = to_yaml_string(&tree);
        assert_eq!(written, "note: \"first\\nsecond\"\n");
        let reparsed = raw(&written);
        assert_eq!(
            reparsed.get("note"),
            Some(&RawValue::String("first\nsecond".to_string()))
        );

        let tree = RawValue::Map(vec![(
            "bell".to_string(),
            RawValue::String("ding\u{0007}".to_string()),
        )]);
        let written = to_yaml_string(&tree);
        assert_eq!(written, "bell: \"ding\\u0007\"\n");
        let reparsed = raw(&written);
        assert_eq!(
            reparsed.get("bell"),
            Some(&RawValue::String("ding\u{0007}".to_string()))
        );
    }

    #[test]
    fn test_empty_collections_stay_inline() {
        let tree = RawValue::Map(vec![
            ("templates".to_string(), RawValue::List(Vec::new())),
            ("extra".to_string(), RawValue::Map(Vec::new())),
        ]);
        assert_eq!(to_yaml_string(&tree), "templates: []\nextra: {}\n");
    }

    #[test]
    fn test_scalars_render_bare() {
        let tree = RawValue::Map(vec![
            ("startBlock".to_string(), RawValue::Int(6175244)),
            ("enabled".to_string(), RawValue::Bool(true)),
            ("nothing".to_string(), RawValue::Null),
        ]);
        assert_eq!(
            to_yaml_string(&tree),
            "startBlock: 6175244\nenabled: true\nnothing: null\n"
        );
    }

    proptest! {
        #[test]
        fn prop_written_map_reparses_to_same_value(
            entries in proptest::collection::btree_map("[a-z][a-zA-Z0-9]{0,8}", "[ -~]{0,70}", 1..6)
        ) {
            let tree = RawValue::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, RawValue::String(value)))
                    .collect(),
            );
            let written = to_yaml_string(&tree);
            let reparsed = RawValue::from_yaml(serde_yaml::from_str(&written).unwrap()).unwrap();
            prop_assert_eq!(reparsed, tree);
        }

        #[test]
        fn prop_folding_preserves_word_sequences(words in proptest::collection::vec("[a-zA-Z0-9]{1,12}", 1..40)) {
            let text = words.join(" ");
            let tree = RawValue::Map(vec![("description".to_string(), RawValue::String(text.clone()))]);
            let written = to_yaml_string(&tree);
            let reparsed = RawValue::from_yaml(serde_yaml::from_str(&written).unwrap()).unwrap();
            prop_assert_eq!(reparsed.get("description"), Some(&RawValue::String(text)));
        }
    }
}
