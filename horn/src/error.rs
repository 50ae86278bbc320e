use crate::term::Span;
use std::fmt;
use std::sync::Arc;

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_name: Option<String>,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// Error types for the Horn system with source location tracking
#[derive(Debug, Clone)]
pub enum HornError {
    /// Parse error with source location
    Parse(Box<ErrorDetails>),
    /// Resolution exceeded the configured recursion depth
    RecursionLimit(usize),
    /// Engine error without a specific source location
    Engine(String),
}

impl HornError {
    /// Create a parse error
    pub fn parse(
        message: impl Into<String>,
        span: Span,
        source_name: impl Into<String>,
        source_text: impl Into<Arc<str>>,
    ) -> Self {
        HornError::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_name: Some(source_name.into()),
            source_text: source_text.into(),
            suggestion: None,
        }))
    }

    /// Create a parse error with a suggestion for fixing it
    pub fn parse_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        span: Span,
        source_name: impl Into<String>,
        source_text: impl Into<Arc<str>>,
    ) -> Self {
        HornError::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_name: Some(source_name.into()),
            source_text: source_text.into(),
            suggestion: Some(suggestion.into()),
        }))
    }

    /// Create an engine error
    pub fn engine(message: impl Into<String>) -> Self {
        HornError::Engine(message.into())
    }

    /// Location details, when the error carries them
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            HornError::Parse(details) => Some(details),
            _ => None,
        }
    }
}

impl fmt::Display for HornError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HornError::Parse(details) => {
                write!(f, "{}", details.message)?;
                if let Some(name) = &details.source_name {
                    write!(f, " in {}", name)?;
                }
                write!(f, " at line {}, column {}", details.span.line, details.span.col)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " ({})", suggestion)?;
                }
                Ok(())
            }
            HornError::RecursionLimit(limit) => {
                write!(f, "Recursion limit of {} nested resolutions exceeded", limit)
            }
            HornError::Engine(message) => write!(f, "Engine error: {}", message),
        }
    }
}

impl std::error::Error for HornError {}
