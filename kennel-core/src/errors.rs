//! # Errors
//!
//! Kennel services report failures with a structured [`KennelError`]:
//! - a kind that fixes the HTTP status code
//! - a client-safe message
//! - an optional list of field-level messages (validation)
//! - an optional inner cause that is logged, never returned
//!
//! A `KennelError` travels inside `anyhow::Error` so services can keep using
//! `?`; the transport downcasts it back when building the response.

use std::fmt;

use anyhow::Error as AnyError;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,     // 400
    NotFound,       // 404
    GeneralError,   // 500
    NotImplemented, // 501
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::GeneralError => 500,
            ErrorKind::NotImplemented => 501,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::GeneralError => "GeneralError",
            ErrorKind::NotImplemented => "NotImplemented",
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

/// A structured Kennel error that can live inside `anyhow::Error`.
#[derive(Debug)]
pub struct KennelError {
    pub kind: ErrorKind,
    pub message: String,
    pub errors: Option<Vec<String>>,
    pub source: Option<AnyError>,
}

impl KennelError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            errors: None,
            source: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_source(mut self, source: impl Into<AnyError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Convert into `anyhow::Error` so it flows through `?`.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Downcast an `anyhow::Error` to a `KennelError` if possible.
    pub fn from_anyhow(err: &AnyError) -> Option<&KennelError> {
        err.downcast_ref::<KennelError>()
    }

    /// Find a `KennelError` anywhere in the chain, even under `.context(..)`.
    pub fn find_in(err: &AnyError) -> Option<&KennelError> {
        err.chain().find_map(|e| e.downcast_ref::<KennelError>())
    }

    /// A copy suitable for returning to clients: the inner `source` is dropped.
    pub fn sanitize_for_client(&self) -> KennelError {
        KennelError {
            kind: self.kind,
            message: self.message.clone(),
            errors: self.errors.clone(),
            source: None,
        }
    }

    /// Response payload.
    ///
    /// - field errors present: `{"errors": [..]}`
    /// - other client errors: `{"message": ".."}`
    /// - everything else: `{"error": ".."}`
    pub fn to_json(&self) -> Value {
        if let Some(errors) = &self.errors {
            return json!({ "errors": errors });
        }
        match self.kind {
            ErrorKind::BadRequest => json!({ "message": self.message }),
            _ => json!({ "error": self.message }),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotImplemented, msg)
    }
}

impl fmt::Display for KennelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for KennelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;
    use serde_json::json;

    use super::*;

    #[test]
    fn field_errors_render_as_errors_list() {
        let err = KennelError::bad_request("Validation failed")
            .with_errors(vec!["name should be a string".into()]);

        assert_eq!(err.code(), 400);
        assert_eq!(err.to_json(), json!({"errors": ["name should be a string"]}));
    }

    #[test]
    fn bad_request_without_list_renders_message() {
        let err = KennelError::bad_request("id should be a number");
        assert_eq!(err.to_json(), json!({"message": "id should be a number"}));
    }

    #[test]
    fn server_errors_render_error_and_drop_source() {
        let err = KennelError::general_error("Failed to create dog")
            .with_source(anyhow::anyhow!("disk I/O error"));

        let safe = err.sanitize_for_client();
        assert!(safe.source.is_none());
        assert_eq!(safe.to_json(), json!({"error": "Failed to create dog"}));
        assert!(!safe.to_json().to_string().contains("disk"));
    }

    #[test]
    fn found_through_context_layers() {
        let err: anyhow::Result<()> =
            Err(KennelError::not_found("Dog not found").into_anyhow());
        let err = err.context("while patching").unwrap_err();

        let found = KennelError::find_in(&err).expect("kennel error in chain");
        assert_eq!(found.kind, ErrorKind::NotFound);
    }

    #[test]
    fn kind_decides_status_and_display() {
        let err = KennelError::not_found("Dog not found");
        assert_eq!(err.code(), 404);
        assert!(!err.kind.is_server_error());
        assert_eq!(err.to_string(), "NotFound (404): Dog not found");

        assert!(KennelError::not_implemented("nope").kind.is_server_error());
    }
}
