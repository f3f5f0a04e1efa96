//! Code generation errors.

use thiserror::Error;

/// Why generation for a template failed. Generation never degrades to
/// partial output; any error here aborts the whole template.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The template declares a kind this generator has no backend for.
    #[error("unsupported data source kind '{kind}': only 'ethereum/contract' is supported")]
    UnsupportedKind { kind: String },
}

pub type CodegenResult<T> = Result<T, CodegenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_display() {
        let error = CodegenError::UnsupportedKind {
            kind: "near/receipt".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "unsupported data source kind 'near/receipt': only 'ethereum/contract' is supported"
        );
    }
}
