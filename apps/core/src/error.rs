use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Kinds of resource an audit operation reads from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Transcript,
    TokenCounts,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ResourceKind::Transcript => "transcript",
            ResourceKind::TokenCounts => "token count store",
        };
        write!(f, "{}", label)
    }
}

/// Crate-wide error type, consolidating every fatal condition of the audit stages.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required resource (transcript, token counts) does not exist.
    #[error("Missing {kind}: {}", path.display())]
    MissingResource { kind: ResourceKind, path: PathBuf },

    /// The lexical validator could not be initialized from its dictionary.
    #[error("Word validator unavailable ({}): {reason}", path.display())]
    CapabilityUnavailable { path: PathBuf, reason: String },

    /// A lexicon line could not be parsed; the whole lexicon is rejected.
    #[error("Malformed lexicon {} at line {line} ('{content}'): {reason}", path.display())]
    MalformedLexicon {
        path: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    /// A token store line is not a `word,count` pair.
    #[error("Malformed token count store {} at line {line}: '{content}'", path.display())]
    MalformedCounts {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// A word's weighted score does not fit in an `i64`.
    #[error("Sentiment score overflow at word '{word}'")]
    ScoreOverflow { word: String },

    /// Represents configuration-related errors (e.g., invalid environment values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents JSON (de)serialization failures.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Represents data validation errors.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for AuditError {
    fn from(err: validator::ValidationErrors) -> Self {
        AuditError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<tempfile::PersistError> for AuditError {
    fn from(err: tempfile::PersistError) -> Self {
        AuditError::Io(err.error)
    }
}

/// Result alias used across the crate.
pub type AuditResult<T> = Result<T, AuditError>;
