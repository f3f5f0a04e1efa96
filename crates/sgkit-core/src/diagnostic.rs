//! # Validation Diagnostics
//!
//! Path-tagged errors and warnings, and the combined report text built from
//! them. Every validation stage produces these; nothing downstream invents
//! its own message framing.
//!
//! ## Report format
//!
//! Errors for one manifest are folded into a single block:
//!
//! ```text
//! Error in subgraph.yaml:
//!
//!   Path: dataSources > 0 > source > abi
//!   first message line
//!   second message line
//! ```
//!
//! Warnings use the same shape with a `Warnings in …:` header, four-space
//! indentation, and a trailing newline. Multi-line messages are re-indented
//! so every line sits under its `Path:` header.

use std::path::{Path, PathBuf};

use crate::path::ManifestPath;

/// A fatal finding at a position in the manifest tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Where in the tree the problem sits.
    pub path: ManifestPath,
    /// Human-readable description, possibly spanning multiple lines.
    pub message: String,
}

impl ValidationError {
    /// Construct an error at `path`.
    pub fn new(path: ManifestPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A non-fatal finding at a position in the manifest tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Where in the tree the finding sits.
    pub path: ManifestPath,
    /// Human-readable description, possibly spanning multiple lines.
    pub message: String,
}

impl ValidationWarning {
    /// Construct a warning at `path`.
    pub fn new(path: ManifestPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Fold all errors for one manifest into the combined report text.
///
/// `manifest_path` is rendered as given; callers wanting a working-directory
/// relative header pass it through [`display_path`] first.
pub fn combined_error_message(manifest_path: &Path, errors: &[ValidationError]) -> String {
    errors.iter().fold(
        format!("Error in {}:", manifest_path.display()),
        |message, error| {
            format!(
                "{}\n\n  Path: {}\n  {}",
                message,
                error.path,
                indent_continuation(&error.message, "  "),
            )
        },
    )
}

/// Fold all warnings for one manifest into the combined report text.
///
/// Same shape as [`combined_error_message`] with four-space indentation and
/// a trailing newline.
pub fn combined_warning_message(manifest_path: &Path, warnings: &[ValidationWarning]) -> String {
    let body = warnings.iter().fold(
        format!("Warnings in {}:", manifest_path.display()),
        |message, warning| {
            format!(
                "{}\n\n    Path: {}\n    {}",
                message,
                warning.path,
                indent_continuation(&warning.message, "    "),
            )
        },
    );
    format!("{body}\n")
}

/// Render `path` relative to the current working directory when it sits
/// underneath it; otherwise unchanged.
pub fn display_path(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Re-indent the continuation lines of a multi-line message.
fn indent_continuation(message: &str, indent: &str) -> String {
    message.replace('\n', &format!("\n{indent}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn err(path: ManifestPath, message: &str) -> ValidationError {
        ValidationError::new(path, message)
    }

    #[test]
    fn test_single_error_block() {
        let message = combined_error_message(
            Path::new("subgraph.yaml"),
            &[err(
                ManifestPath::root().key("dataSources").index(0).key("name"),
                "No value provided",
            )],
        );
        assert_eq!(
            message,
            "Error in subgraph.yaml:\n\n  Path: dataSources > 0 > name\n  No value provided"
        );
    }

    #[test]
    fn test_errors_concatenate_in_order() {
        let message = combined_error_message(
            Path::new("subgraph.yaml"),
            &[
                err(ManifestPath::root().key("specVersion"), "No value provided"),
                err(ManifestPath::root().key("schema"), "No value provided"),
            ],
        );
        assert_eq!(
            message,
            "Error in subgraph.yaml:\n\
             \n\
             \x20 Path: specVersion\n\
             \x20 No value provided\n\
             \n\
             \x20 Path: schema\n\
             \x20 No value provided"
        );
    }

    #[test]
    fn test_root_path_renders_as_slash() {
        let message = combined_error_message(
            Path::new("subgraph.yaml"),
            &[err(ManifestPath::root(), "Expected map, found list:\n[]")],
        );
        assert!(message.contains("\n  Path: /\n"));
    }

    #[test]
    fn test_multiline_message_is_reindented() {
        let message = combined_error_message(
            Path::new("subgraph.yaml"),
            &[err(
                ManifestPath::root().key("dataSources").index(0).key("source").key("abi"),
                "ABI name 'Gravatar' not found in mapping > abis.\nAvailable ABIs:\n- Gravity",
            )],
        );
        assert!(message.ends_with(
            "  Path: dataSources > 0 > source > abi\n\
             \x20 ABI name 'Gravatar' not found in mapping > abis.\n\
             \x20 Available ABIs:\n\
             \x20 - Gravity"
        ));
    }

    #[test]
    fn test_warning_block_has_trailing_newline_and_four_space_indent() {
        let message = combined_warning_message(
            Path::new("subgraph.yaml"),
            &[ValidationWarning::new(
                ManifestPath::root().key("repository"),
                "The repository is still set to an example value.\nPlease replace it.",
            )],
        );
        assert_eq!(
            message,
            "Warnings in subgraph.yaml:\n\
             \n\
             \x20   Path: repository\n\
             \x20   The repository is still set to an example value.\n\
             \x20   Please replace it.\n"
        );
    }

    proptest! {
        /// Every rendered line after the header is indented by at least two
        /// spaces, regardless of message content.
        #[test]
        fn prop_error_lines_stay_indented(lines in proptest::collection::vec("[a-zA-Z0-9 .,'-]{0,40}", 1..5)) {
            let message = combined_error_message(
                Path::new("subgraph.yaml"),
                &[err(ManifestPath::root().key("schema"), &lines.join("\n"))],
            );
            for line in message.lines().skip(1) {
                prop_assert!(line.is_empty() || line.starts_with("  "));
            }
        }
    }
}
