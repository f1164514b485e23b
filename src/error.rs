use crate::transport::TransportError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "config.base_url", "request.text")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected value, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "tts", "voices", "storage")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the client.
///
/// `synthesize` and `list_voices` never hand this to callers directly; they fold it
/// into a failure outcome. It is surfaced by construction, configuration loading and
/// direct calls to the audio store.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Remote error: HTTP {status} ({class}): {body}")]
    Remote {
        status: u16,
        class: RemoteErrorClass,
        body: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::validation_with_context(msg, ErrorContext::new())
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Build a remote error from a non-2xx response.
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Error::Remote {
            status,
            class: RemoteErrorClass::from_http_status(status),
            body: body.into(),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// Coarse category used in failure outcomes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Remote { .. } => ErrorKind::Remote,
            Error::Io(_) => ErrorKind::Filesystem,
            Error::Serialization(_) => ErrorKind::Decode,
        }
    }

    /// HTTP status of the response that caused the error, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body text, if the remote service answered.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Remote { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(TransportError::Timeout(_)))
    }
}

/// Category of a failed call, serialized alongside the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or empty required input
    Validation,
    /// Network, DNS, connect or timeout failure
    Transport,
    /// Non-2xx response from the service
    Remote,
    /// Could not create the output directory or write the audio file
    Filesystem,
    /// The service answered 2xx but the body could not be decoded
    Decode,
    /// Invalid client configuration
    Configuration,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Transport => "transport",
            Self::Remote => "remote",
            Self::Filesystem => "filesystem",
            Self::Decode => "decode",
            Self::Configuration => "configuration",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of a non-2xx response by HTTP status.
///
/// Informational only: the client never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorClass {
    /// 400 / 422: malformed request or invalid parameters
    InvalidRequest,
    /// 401: invalid, expired or missing API key
    Authentication,
    /// 403: valid key without access to the resource
    PermissionDenied,
    /// 404: unknown voice or endpoint
    NotFound,
    /// 413: text exceeds the payload limit
    RequestTooLarge,
    /// 429: rate limit or concurrency limit exceeded
    RateLimited,
    /// 500: internal error on the service side
    ServerError,
    /// 502 / 503: service temporarily unavailable
    Overloaded,
    /// 408 / 504
    Timeout,
    Unknown,
}

impl RemoteErrorClass {
    /// Returns the standard name (e.g., `"rate_limited"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RequestTooLarge => "request_too_large",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::Overloaded => "overloaded",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }

    /// Returns `true` for classes caused by the request itself (4xx family).
    #[inline]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest
                | Self::Authentication
                | Self::PermissionDenied
                | Self::NotFound
                | Self::RequestTooLarge
        )
    }

    /// Maps an HTTP status code to the most likely class.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            413 => Self::RequestTooLarge,
            429 => Self::RateLimited,
            500 => Self::ServerError,
            502 | 503 => Self::Overloaded,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for RemoteErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_carries_status_class_and_body() {
        let err = Error::remote(401, "{\"detail\":\"invalid api key\"}");
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.response_body(), Some("{\"detail\":\"invalid api key\"}"));
        assert!(err.to_string().contains("HTTP 401 (authentication)"));
    }

    #[test]
    fn status_mapping() {
        assert_eq!(RemoteErrorClass::from_http_status(400), RemoteErrorClass::InvalidRequest);
        assert_eq!(RemoteErrorClass::from_http_status(422), RemoteErrorClass::InvalidRequest);
        assert_eq!(RemoteErrorClass::from_http_status(429), RemoteErrorClass::RateLimited);
        assert_eq!(RemoteErrorClass::from_http_status(503), RemoteErrorClass::Overloaded);
        assert_eq!(RemoteErrorClass::from_http_status(418), RemoteErrorClass::Unknown);
        assert!(RemoteErrorClass::NotFound.is_client_error());
        assert!(!RemoteErrorClass::ServerError.is_client_error());
    }

    #[test]
    fn validation_context_is_rendered() {
        let err = Error::validation_with_context(
            "text must not be empty",
            ErrorContext::new().with_field_path("request.text").with_source("tts"),
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "Validation error: text must not be empty (field: request.text, source: tts)"
        );
        assert!(err.context().is_some());
    }

    #[test]
    fn io_errors_are_filesystem_kind() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.kind(), ErrorKind::Filesystem);
        assert_eq!(err.status_code(), None);
    }
}
