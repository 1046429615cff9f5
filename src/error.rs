//! Unified error types for deck-diff.
//!
//! This module provides the error hierarchy shared by the comparison core
//! and the collaborators around it (conversion, revision retrieval, I/O),
//! with chained context for debugging and user-facing messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for deck-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DeckDiffError {
    /// The alignment produced a pairing that breaks its own invariants
    #[error("Alignment failed: {context}")]
    Alignment {
        context: String,
        #[source]
        source: AlignmentErrorKind,
    },

    /// The layout configuration left nothing to render
    #[error("Layout planning failed: {context}")]
    Layout {
        context: String,
        #[source]
        source: LayoutErrorKind,
    },

    /// Errors while turning a presentation into slide images
    #[error("Conversion failed: {context}")]
    Conversion {
        context: String,
        #[source]
        source: ConversionErrorKind,
    },

    /// Errors while retrieving a prior revision of a file
    #[error("Revision retrieval failed: {context}")]
    Source {
        context: String,
        #[source]
        source: SourceErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Malformed input rejected at construction time
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific alignment error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AlignmentErrorKind {
    #[error("Pairing invariant violated: {0}")]
    InvariantViolation(String),
}

/// Specific layout error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LayoutErrorKind {
    #[error("No pages left to show from {input} classified slides")]
    EmptyPlan { input: usize },
}

/// Specific conversion error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConversionErrorKind {
    #[error("Required tool not found on PATH: {0}")]
    ToolNotFound(String),

    #[error("{tool} exited with status {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("{tool} did not finish within {seconds}s")]
    TimedOut { tool: String, seconds: u64 },

    #[error("No slide images produced")]
    NoOutput,

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
}

/// Specific revision retrieval error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SourceErrorKind {
    #[error("Not inside a git work tree: {0}")]
    NotARepository(String),

    #[error("git {command} failed: {stderr}")]
    GitFailed { command: String, stderr: String },

    #[error("File is not tracked at {rev}: {path}")]
    MissingAtRevision { rev: String, path: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for deck-diff operations
pub type Result<T> = std::result::Result<T, DeckDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl DeckDiffError {
    /// Create an invariant violation raised by the alignment step
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Alignment {
            context: "pairing verification".to_string(),
            source: AlignmentErrorKind::InvariantViolation(message.into()),
        }
    }

    /// Create an empty-plan layout error
    pub fn empty_plan(input: usize) -> Self {
        Self::Layout {
            context: "all classified slides were suppressed".to_string(),
            source: LayoutErrorKind::EmptyPlan { input },
        }
    }

    /// Create a conversion error with context
    pub fn conversion(context: impl Into<String>, source: ConversionErrorKind) -> Self {
        Self::Conversion {
            context: context.into(),
            source,
        }
    }

    /// Create a revision retrieval error with context
    pub fn revision(context: impl Into<String>, source: SourceErrorKind) -> Self {
        Self::Source {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the caller may proceed, e.g. by retrying with default layout flags.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Layout { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for DeckDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// building a chain that shows the path through the code.
///
/// ```ignore
/// use deck_diff::error::ErrorContext;
///
/// let deck = deck_from_manifest(name, &content, Some(dir))
///     .with_context(|| format!("sidecars in {}", dir.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DeckDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: DeckDiffError, new_ctx: &str) -> DeckDiffError {
    match err {
        DeckDiffError::Alignment {
            context: existing,
            source,
        } => DeckDiffError::Alignment {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DeckDiffError::Layout {
            context: existing,
            source,
        } => DeckDiffError::Layout {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DeckDiffError::Conversion {
            context: existing,
            source,
        } => DeckDiffError::Conversion {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DeckDiffError::Source {
            context: existing,
            source,
        } => DeckDiffError::Source {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DeckDiffError::Io {
            path,
            message,
            source,
        } => DeckDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        DeckDiffError::Config(msg) => DeckDiffError::Config(chain_context(new_ctx, &msg)),
        DeckDiffError::Validation(msg) => DeckDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to a validation error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to a validation error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| DeckDiffError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| DeckDiffError::Validation(f().into()))
    }
}
