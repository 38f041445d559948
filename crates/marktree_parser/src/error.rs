//! Parse error types.

use thiserror::Error;

/// What made the tree builder give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The source contains raw HTML, which has no place in the node schema.
    RawHtml,
    /// The grammar engine produced a construct the node schema cannot express.
    Unsupported,
    /// The grammar engine itself rejected the source.
    Engine,
}

/// Failure of [`parse`](crate::parse).
///
/// The whole parse is aborted at the first offending section; no partial tree
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Parsing a section of the Markdown document failed: {reason}. Ensure that the source \
     document does not contain raw HTML, which is currently not supported.\n\n\
     Problematic section:\n\n{fragment}"
)]
pub struct ParseFailure {
    /// What kind of failure this is.
    pub kind: FailureKind,
    /// The offending section of the source.
    pub fragment: String,
    /// Byte offset of the fragment in the source, when known.
    pub offset: Option<usize>,
    /// The underlying diagnostic.
    pub reason: String,
}

impl ParseFailure {
    /// Creates a new raw HTML failure.
    pub fn raw_html(fragment: impl Into<String>, offset: Option<usize>) -> Self {
        Self {
            kind: FailureKind::RawHtml,
            fragment: fragment.into(),
            offset,
            reason: "raw HTML is not part of the node schema".to_string(),
        }
    }

    /// Creates a new unsupported construct failure.
    pub fn unsupported(
        construct: &str,
        fragment: impl Into<String>,
        offset: Option<usize>,
    ) -> Self {
        Self {
            kind: FailureKind::Unsupported,
            fragment: fragment.into(),
            offset,
            reason: format!("unsupported construct `{construct}`"),
        }
    }

    /// Creates a new grammar engine failure.
    pub fn engine(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Engine,
            fragment: fragment.into(),
            offset: None,
            reason: message.into(),
        }
    }
}

/// Errors that can occur while reading [`Options`](crate::Options).
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The options are not valid JSON or contain unknown keys.
    #[error("Invalid options: {0}")]
    Invalid(#[from] serde_json::Error),
}
