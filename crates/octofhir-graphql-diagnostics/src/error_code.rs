//! GraphQL error codes following a structured numbering system
//!
//! Error code ranges:
//! - GQL0001-GQL0099: Build errors (schema construction from a document)
//! - GQL0100-GQL0199: Shape errors (malformed introspection payload)
//! - GQL0200-GQL0299: Extension errors (schema extension)
//! - GQL0300-GQL0399: Coercion errors (aggregated input coercion, never raised)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a build error (0001-0099)
    pub const fn is_build_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a shape error (0100-0199)
    pub const fn is_shape_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is an extension error (0200-0299)
    pub const fn is_extension_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a coercion error (0300-0399)
    pub const fn is_coercion_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GQL{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

// Static error info storage
static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

use std::collections::HashMap;
use std::sync::LazyLock;

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Build errors (0001-0099)
    map.insert(1, ErrorInfo::new("Duplicate type definition"));
    map.insert(2, ErrorInfo::new("Duplicate directive definition"));
    map.insert(
        3,
        ErrorInfo::new("Unknown type reference")
            .with_help("Every referenced type must be defined in the same document"),
    );
    map.insert(4, ErrorInfo::new("Multiple schema definitions"));
    map.insert(
        5,
        ErrorInfo::new("Type system extension in schema document")
            .with_help("Extensions are only valid as input to extend_schema"),
    );
    map.insert(6, ErrorInfo::new("Root operation type must be an Object type"));
    map.insert(7, ErrorInfo::new("Union member must be an Object type"));
    map.insert(8, ErrorInfo::new("Invalid type for an input position"));
    map.insert(9, ErrorInfo::new("Duplicate root operation type"));
    map.insert(10, ErrorInfo::new("Duplicate member definition"));

    // Shape errors (0100-0199)
    map.insert(100, ErrorInfo::new("Missing query root type"));
    map.insert(101, ErrorInfo::new("Unrecognized type kind"));
    map.insert(102, ErrorInfo::new("Wrapper type missing ofType"));
    map.insert(103, ErrorInfo::new("Missing required member list"));
    map.insert(104, ErrorInfo::new("Missing type name"));
    map.insert(105, ErrorInfo::new("Unresolvable type reference in payload"));
    map.insert(106, ErrorInfo::new("Invalid payload structure"));
    map.insert(107, ErrorInfo::new("Root type is not an Object type"));

    // Extension errors (0200-0299)
    map.insert(200, ErrorInfo::new("Unknown type to extend"));
    map.insert(201, ErrorInfo::new("Extension kind does not match extended type"));
    map.insert(202, ErrorInfo::new("Duplicate member in extension"));
    map.insert(203, ErrorInfo::new("Type already defined in base schema"));
    map.insert(204, ErrorInfo::new("Directive already defined in base schema"));
    map.insert(205, ErrorInfo::new("Root operation type already defined"));

    // Coercion errors (0300-0399)
    map.insert(300, ErrorInfo::new("Invalid scalar value"));
    map.insert(301, ErrorInfo::new("Invalid enum value"));
    map.insert(302, ErrorInfo::new("Null provided for non-null type"));
    map.insert(303, ErrorInfo::new("Missing required input field"));
    map.insert(304, ErrorInfo::new("Unknown input field"));
    map.insert(305, ErrorInfo::new("Input value is not an input object"));
    map.insert(306, ErrorInfo::new("Type cannot be used for input coercion"));

    map
});

// Convenient error code constants

// Build errors
pub const GQL0001: ErrorCode = ErrorCode::new(1);
pub const GQL0002: ErrorCode = ErrorCode::new(2);
pub const GQL0003: ErrorCode = ErrorCode::new(3);
pub const GQL0004: ErrorCode = ErrorCode::new(4);
pub const GQL0005: ErrorCode = ErrorCode::new(5);
pub const GQL0006: ErrorCode = ErrorCode::new(6);
pub const GQL0007: ErrorCode = ErrorCode::new(7);
pub const GQL0008: ErrorCode = ErrorCode::new(8);
pub const GQL0009: ErrorCode = ErrorCode::new(9);
pub const GQL0010: ErrorCode = ErrorCode::new(10);

// Shape errors
pub const GQL0100: ErrorCode = ErrorCode::new(100);
pub const GQL0101: ErrorCode = ErrorCode::new(101);
pub const GQL0102: ErrorCode = ErrorCode::new(102);
pub const GQL0103: ErrorCode = ErrorCode::new(103);
pub const GQL0104: ErrorCode = ErrorCode::new(104);
pub const GQL0105: ErrorCode = ErrorCode::new(105);
pub const GQL0106: ErrorCode = ErrorCode::new(106);
pub const GQL0107: ErrorCode = ErrorCode::new(107);

// Extension errors
pub const GQL0200: ErrorCode = ErrorCode::new(200);
pub const GQL0201: ErrorCode = ErrorCode::new(201);
pub const GQL0202: ErrorCode = ErrorCode::new(202);
pub const GQL0203: ErrorCode = ErrorCode::new(203);
pub const GQL0204: ErrorCode = ErrorCode::new(204);
pub const GQL0205: ErrorCode = ErrorCode::new(205);

// Coercion errors
pub const GQL0300: ErrorCode = ErrorCode::new(300);
pub const GQL0301: ErrorCode = ErrorCode::new(301);
pub const GQL0302: ErrorCode = ErrorCode::new(302);
pub const GQL0303: ErrorCode = ErrorCode::new(303);
pub const GQL0304: ErrorCode = ErrorCode::new(304);
pub const GQL0305: ErrorCode = ErrorCode::new(305);
pub const GQL0306: ErrorCode = ErrorCode::new(306);
