//! Error types for lexicard-core.

use thiserror::Error;

/// Result type alias using ResolveError.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Fatal lookup conditions. Malformed source payloads never surface here;
/// extraction and pool building degrade them to empty contributions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no dictionary data found for \"{expression}\"")]
    NoDictionaryData { expression: String },

    #[error(
        "no contextual sentence found for \"{expression}\"; try another expression or add a sentence manually"
    )]
    NoContextualSentence { expression: String },
}
