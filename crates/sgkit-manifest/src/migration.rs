//! # Spec-Version Migration
//!
//! Upgrades manifest source text from the previous spec version to the
//! current one. This is plain text substitution, never a load/write cycle:
//! the manifest being migrated does not pass validation yet, and the
//! migration must not reformat anything the user wrote.

use crate::{PREVIOUS_SPEC_VERSION, SPEC_VERSION};

/// Rewrite `specVersion: 0.0.1` lines to the supported version. Quoted
/// variants count and CRLF endings survive; every other line passes
/// through byte for byte.
pub fn migrate_spec_version(source: &str) -> String {
    source
        .split('\n')
        .map(migrate_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn migrate_line(line: &str) -> String {
    // Splitting on '\n' leaves the '\r' of a CRLF ending on the line.
    let (body, eol) = match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    };
    let trimmed = body.trim_start();
    let indent = &body[..body.len() - trimmed.len()];
    let Some(rest) = trimmed.strip_prefix("specVersion:") else {
        return line.to_string();
    };
    let value = rest.trim();
    let unquoted = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
        .unwrap_or(value);
    if unquoted == PREVIOUS_SPEC_VERSION {
        format!("{indent}specVersion: {SPEC_VERSION}{eol}")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_previous_version() {
        let source = "specVersion: 0.0.1\nschema:\n  file: ./schema.graphql\n";
        assert_eq!(
            migrate_spec_version(source),
            "specVersion: 0.0.2\nschema:\n  file: ./schema.graphql\n"
        );
    }

    #[test]
    fn test_quoted_variants_are_recognized() {
        assert_eq!(
            migrate_spec_version("specVersion: '0.0.1'"),
            "specVersion: 0.0.2"
        );
        assert_eq!(
            migrate_spec_version("specVersion: \"0.0.1\""),
            "specVersion: 0.0.2"
        );
    }

    #[test]
    fn test_indentation_is_preserved() {
        assert_eq!(
            migrate_spec_version("  specVersion: 0.0.1"),
            "  specVersion: 0.0.2"
        );
    }

    #[test]
    fn test_crlf_line_endings_are_preserved() {
        let source = "specVersion: 0.0.1\r\nschema:\r\n  file: ./schema.graphql\r\n";
        assert_eq!(
            migrate_spec_version(source),
            "specVersion: 0.0.2\r\nschema:\r\n  file: ./schema.graphql\r\n"
        );
    }

    #[test]
    fn test_other_versions_and_lines_pass_through() {
        let source = "specVersion: 0.0.2\ndescription: specVersion: 0.0.1 lookalike\n";
        assert_eq!(migrate_spec_version(source), source);
    }

    #[test]
    fn test_migration_is_idempotent() {
        let source = "specVersion: 0.0.1\ndataSources: []\n";
        let once = migrate_spec_version(source);
        assert_eq!(migrate_spec_version(&once), once);
    }
}
