//! Error types for depot paths and workspace configuration

/// A depot path that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("depot path is empty")]
    Empty,
    #[error("depot path '{0}' does not start with //")]
    MissingRoot(String),
    #[error("depot path '{0}' contains an empty segment")]
    EmptySegment(String),
    #[error("depot path '{0}' contains a '..' segment")]
    ParentSegment(String),
    #[error("depot path '{0}' contains a quote or control character")]
    InvalidChar(String),
}

/// Workspace configuration that cannot produce a usable view
///
/// Always surfaced to the caller, never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("depot spec line {line} must start with //: '{text}'")]
    MalformedDepotLine { line: usize, text: String },
    #[error("depot spec line {line}: {source}")]
    InvalidPath {
        line: usize,
        #[source]
        source: PathError,
    },
    #[error("client root name '{0}' must be a single path segment")]
    InvalidClientRoot(String),
    #[error("view line {line} is not a '<depot> <client>' pair: '{text}'")]
    MalformedViewLine { line: usize, text: String },
    #[error("no depot spec configured")]
    NoView,
}
