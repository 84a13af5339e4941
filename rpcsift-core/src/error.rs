//! Error types for rpcsift
//!
//! This module provides two families of errors:
//!
//! - **Error**: failures of the decoder itself (uses thiserror)
//! - **ErrorObject**: the `error` member of a decoded JSON-RPC response, as
//!   sent by a remote peer
//!
//! # Decoder Errors
//!
//! Decoding arbitrary network input must never bring the process down, so
//! every failure is reported through [`Error`]:
//!
//! - `Syntax`: the bytes are not valid JSON
//! - `UnrecognizedShape`: valid JSON that is none of request/response/notification
//! - `TypeMismatch`: a member exists but holds the wrong JSON kind
//! - `UnsupportedIdKind`: an `id` that is an array, object or boolean
//!
//! # Response Errors
//!
//! Real servers attach nonstandard members to their error objects, so
//! [`ErrorObject`] keeps the whole object as an open map and offers typed
//! accessors for the members JSON-RPC 2.0 defines (`code`, `message`, `data`).
//!
//! # Examples
//!
//! ```rust
//! use rpcsift_core::{codec, Error};
//!
//! let err = codec::decode(br#"{"method":"#).unwrap_err();
//! assert!(matches!(err, Error::Syntax(_)));
//! assert_eq!(err.code(), -32700);
//! ```

use crate::payload::{integral, JsonKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for rpcsift operations
pub type Result<T> = std::result::Result<T, Error>;

/// Decoder error type
///
/// Errors carry owned strings rather than the underlying `serde_json::Error`,
/// which keeps the enum `Clone` and comparable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is not syntactically valid JSON
    ///
    /// Includes premature end of input and trailing characters after the
    /// top-level value.
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Valid JSON that matches none of the three message shapes
    ///
    /// Raised for non-object top-level values, a missing `jsonrpc` member,
    /// or an object with neither `method` nor any of `id`/`result`/`error`.
    #[error("Unrecognized message shape: {0}")]
    UnrecognizedShape(String),

    /// A member is present but holds the wrong JSON kind
    #[error("Type mismatch in `{field}`: expected {expected}")]
    TypeMismatch {
        /// Name of the offending member
        field: &'static str,
        /// Human-readable description of what was expected
        expected: &'static str,
    },

    /// An `id` member that is neither string, number nor null
    #[error("Unsupported id kind: {0}")]
    UnsupportedIdKind(JsonKind),

    /// A payload could not be converted to or from a caller type
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// The JSON-RPC error code a peer would answer this failure with
    ///
    /// Transports use this to build the error response for a message that
    /// could not be decoded.
    pub fn code(&self) -> i64 {
        match self {
            Error::Syntax(_) => StandardCode::ParseError.code(),
            Error::UnrecognizedShape(_)
            | Error::TypeMismatch { .. }
            | Error::UnsupportedIdKind(_) => StandardCode::InvalidRequest.code(),
            Error::Serialization(_) => StandardCode::InternalError.code(),
        }
    }

    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        Error::UnrecognizedShape(reason.into())
    }
}

/// Error codes reserved by JSON-RPC 2.0
///
/// - `-32700`: Parse error
/// - `-32600`: Invalid Request
/// - `-32601`: Method not found
/// - `-32602`: Invalid params
/// - `-32603`: Internal error
/// - `-32000 to -32099`: Server error (implementation-defined)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    /// Implementation-defined server error, carrying the exact code
    ServerError(i64),
}

impl StandardCode {
    /// Look up a reserved code, returning `None` for application codes
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -32700 => Some(StandardCode::ParseError),
            -32600 => Some(StandardCode::InvalidRequest),
            -32601 => Some(StandardCode::MethodNotFound),
            -32602 => Some(StandardCode::InvalidParams),
            -32603 => Some(StandardCode::InternalError),
            -32099..=-32000 => Some(StandardCode::ServerError(code)),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            StandardCode::ParseError => -32700,
            StandardCode::InvalidRequest => -32600,
            StandardCode::MethodNotFound => -32601,
            StandardCode::InvalidParams => -32602,
            StandardCode::InternalError => -32603,
            StandardCode::ServerError(code) => *code,
        }
    }
}

/// The `error` member of a JSON-RPC response
///
/// Kept as an open JSON object rather than a fixed struct. JSON-RPC 2.0 says
/// an error carries an integer `code`, a string `message` and optional `data`,
/// but servers in the wild add their own members and occasionally send codes
/// in float form. Nothing is dropped or coerced here; the accessors return
/// `None` when a member is missing or has an unexpected kind.
///
/// # Examples
///
/// ```rust
/// use rpcsift_core::ErrorObject;
/// use serde_json::json;
///
/// let error: ErrorObject = serde_json::from_value(json!({
///     "code": -32601,
///     "message": "Method not found",
///     "trace_id": "a1b2"
/// })).unwrap();
///
/// assert_eq!(error.code_i64(), Some(-32601));
/// assert_eq!(error.message(), Some("Method not found"));
/// assert_eq!(error.get("trace_id"), Some(&json!("a1b2")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorObject(serde_json::Map<String, serde_json::Value>);

impl ErrorObject {
    /// The `code` member in its native JSON numeric form
    pub fn code(&self) -> Option<&serde_json::Number> {
        self.0.get("code").and_then(serde_json::Value::as_number)
    }

    /// The `code` member as an integer
    ///
    /// Float forms with no fractional part (`-32600.0`) are accepted.
    pub fn code_i64(&self) -> Option<i64> {
        self.code().and_then(integral)
    }

    /// The reserved JSON-RPC meaning of `code`, if it has one
    pub fn standard_code(&self) -> Option<StandardCode> {
        self.code_i64().and_then(StandardCode::from_code)
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(serde_json::Value::as_str)
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.0.get("data")
    }

    /// Any member by name, including nonstandard ones
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// All members, in the order the underlying map yields them
    pub fn members(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }

    pub fn into_members(self) -> serde_json::Map<String, serde_json::Value> {
        self.0
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for ErrorObject {
    fn from(members: serde_json::Map<String, serde_json::Value>) -> Self {
        ErrorObject(members)
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.message()) {
            (Some(code), Some(message)) => write!(f, "JSON-RPC error {}: {}", code, message),
            (Some(code), None) => write!(f, "JSON-RPC error {}", code),
            (None, Some(message)) => write!(f, "JSON-RPC error: {}", message),
            (None, None) => write!(f, "JSON-RPC error: {}", serde_json::Value::Object(self.0.clone())),
        }
    }
}

impl std::error::Error for ErrorObject {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error_object(value: serde_json::Value) -> ErrorObject {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::Syntax("eof".into()).code(), -32700);
        assert_eq!(Error::shape("not an object").code(), -32600);
        assert_eq!(
            Error::TypeMismatch { field: "method", expected: "string" }.code(),
            -32600
        );
        assert_eq!(Error::UnsupportedIdKind(JsonKind::Bool).code(), -32600);
        assert_eq!(Error::Serialization("boom".into()).code(), -32603);
    }

    #[test]
    fn test_error_display() {
        let err = Error::TypeMismatch { field: "method", expected: "string" };
        assert_eq!(err.to_string(), "Type mismatch in `method`: expected string");

        let err = Error::UnsupportedIdKind(JsonKind::Array);
        assert_eq!(err.to_string(), "Unsupported id kind: array");
    }

    #[test]
    fn test_standard_code_lookup() {
        assert_eq!(StandardCode::from_code(-32700), Some(StandardCode::ParseError));
        assert_eq!(StandardCode::from_code(-32601), Some(StandardCode::MethodNotFound));
        assert_eq!(StandardCode::from_code(-32050), Some(StandardCode::ServerError(-32050)));
        assert_eq!(StandardCode::from_code(-31999), None);
        assert_eq!(StandardCode::from_code(1001), None);
        assert_eq!(StandardCode::ServerError(-32001).code(), -32001);
    }

    #[test]
    fn test_error_object_accessors() {
        let error = error_object(json!({
            "code": -32602,
            "message": "Invalid params",
            "data": {"missing": ["to"]}
        }));

        assert_eq!(error.code_i64(), Some(-32602));
        assert_eq!(error.standard_code(), Some(StandardCode::InvalidParams));
        assert_eq!(error.message(), Some("Invalid params"));
        assert_eq!(error.data(), Some(&json!({"missing": ["to"]})));
    }

    #[test]
    fn test_error_object_float_code() {
        let error = error_object(json!({"code": -32000.0, "message": "header not found"}));
        assert!(error.code().unwrap().is_f64());
        assert_eq!(error.code_i64(), Some(-32000));

        let error = error_object(json!({"code": 1.5}));
        assert_eq!(error.code_i64(), None);
    }

    #[test]
    fn test_error_object_tolerates_missing_members() {
        let error = error_object(json!({"reason": "rate limited"}));
        assert!(error.code().is_none());
        assert!(error.message().is_none());
        assert_eq!(error.to_string(), r#"JSON-RPC error: {"reason":"rate limited"}"#);
    }

    #[test]
    fn test_error_object_display() {
        let error = error_object(json!({"code": -32600, "message": "Invalid request"}));
        assert_eq!(error.to_string(), "JSON-RPC error -32600: Invalid request");
    }
}
