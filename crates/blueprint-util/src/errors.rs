use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all blueprint operations.
#[derive(Debug, Error, Diagnostic)]
pub enum BlueprintError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed version or version-range syntax.
    #[error("Parse error: {message}")]
    #[diagnostic(help("Check the version or range expression for typos"))]
    Parse { message: String },

    /// A version lookup found no match (catalog entry, BOM pin, mapping).
    #[error("Resolution miss: {message}")]
    Resolution { message: String },

    /// A build-model invariant was broken, e.g. inserting a dependency id
    /// that is already present without an explicit remove. Indicates a
    /// rule-authoring bug and aborts generation.
    #[error("Invariant violation: {message}")]
    #[diagnostic(help("A transformation rule mutated the build descriptor illegally"))]
    Invariant { message: String },

    /// Invalid or malformed catalog data.
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    /// Network request failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl BlueprintError {
    /// Whether this error must abort the whole generation run.
    ///
    /// Everything except an invariant violation degrades gracefully: the
    /// offending transformation is skipped and generation continues.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BlueprintError::Invariant { .. })
    }

    pub fn parse(message: impl Into<String>) -> Self {
        BlueprintError::Parse {
            message: message.into(),
        }
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        BlueprintError::Resolution {
            message: message.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        BlueprintError::Invariant {
            message: message.into(),
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type BlueprintResult<T> = miette::Result<T>;
