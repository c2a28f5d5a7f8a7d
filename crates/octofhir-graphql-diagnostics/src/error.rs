//! GraphQL error types
//!
//! Construction and extension fail fast with a single structured error.
//! Coercion problems are deliberately not represented here: they are
//! aggregated data returned to the caller, defined alongside the coercion
//! functions in the types crate.

use crate::{ErrorCode, SourceLocation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - schema construction cannot proceed
    Error,
    /// Warning - potential issue but can continue
    Warning,
    /// Information - informational message
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message with location and context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Source location
    pub location: Option<SourceLocation>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

/// Main error type for schema construction, reconstruction, and extension
#[derive(Debug, Clone, Error)]
pub enum GraphQLError {
    /// Build error (malformed definitions, duplicate names, unresolved references)
    #[error("{code}: {message}")]
    Build {
        code: ErrorCode,
        message: String,
        location: Option<SourceLocation>,
    },

    /// Shape error (malformed introspection payload)
    #[error("{code}: {message} (at {path})")]
    Shape {
        code: ErrorCode,
        message: String,
        /// Path of the offending field within the payload, e.g. `types[3].ofType`
        path: String,
    },

    /// Extension error (unknown extension target, kind mismatch, duplicate member)
    #[error("{code}: {message}")]
    Extension {
        code: ErrorCode,
        message: String,
        location: Option<SourceLocation>,
    },
}

impl GraphQLError {
    /// Create a build error
    pub fn build(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Build {
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Create a build error with a source location
    pub fn build_at(
        code: ErrorCode,
        message: impl Into<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        Self::Build {
            code,
            message: message.into(),
            location,
        }
    }

    /// Create a shape error with the offending payload path
    pub fn shape(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Shape {
            code,
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create an extension error
    pub fn extension(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Extension {
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Create an extension error with a source location
    pub fn extension_at(
        code: ErrorCode,
        message: impl Into<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        Self::Extension {
            code,
            message: message.into(),
            location,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Build { code, .. } => *code,
            Self::Shape { code, .. } => *code,
            Self::Extension { code, .. } => *code,
        }
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        match self {
            Self::Build { message, .. } => message,
            Self::Shape { message, .. } => message,
            Self::Extension { message, .. } => message,
        }
    }

    /// Get the location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Build { location, .. } => location.as_ref(),
            Self::Extension { location, .. } => location.as_ref(),
            Self::Shape { .. } => None,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Build { code, message, location } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(loc) = location {
                    diag = diag.with_location(loc.clone());
                }
                diag
            }
            Self::Shape { code, message, path } => {
                Diagnostic::error(*code, message.clone()).with_help(format!("payload path: {path}"))
            }
            Self::Extension { code, message, location } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(loc) = location {
                    diag = diag.with_location(loc.clone());
                }
                diag
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GQL0001, GQL0100};

    #[test]
    fn test_build_error() {
        let err = GraphQLError::build_at(
            GQL0001,
            "Type 'Query' is defined more than once",
            Some(SourceLocation::new(4, 1, 40, 4)),
        );

        assert!(matches!(err, GraphQLError::Build { .. }));
        assert_eq!(err.code(), GQL0001);
        assert_eq!(err.location().unwrap().line, 4);
    }

    #[test]
    fn test_shape_error_display() {
        let err = GraphQLError::shape(GQL0100, "Introspection payload has no queryType", "queryType");
        let rendered = err.to_string();
        assert!(rendered.contains("GQL0100"));
        assert!(rendered.contains("queryType"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error(GQL0001, "Duplicate type")
            .with_location(SourceLocation::new(1, 5, 4, 1));

        assert!(diag.to_string().contains("GQL0001"));
        assert!(diag.to_string().contains("1:5"));
    }
}
