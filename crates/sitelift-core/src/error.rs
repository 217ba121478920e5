// ── Core error types ──
//
// User-facing errors from sitelift-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<sitelift_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

use crate::output::OutputError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to engine at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("No open deployment -- call connect() first")]
    DeploymentNotOpen,

    #[error("Engine request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Argument validation (before any engine call) ─────────────────
    #[error("Missing required argument '{field}' for {resource}")]
    MissingArgument { resource: String, field: String },

    #[error("Invalid value for required argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    // ── Result validation ────────────────────────────────────────────
    #[error("Provider did not return required output '{output}' for {resource}")]
    MissingOutput { resource: String, output: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Deferred values ──────────────────────────────────────────────
    #[error("Deferred value error: {0}")]
    Value(#[from] OutputError),

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Engine error: {message}")]
    Api {
        message: String,
        /// The engine-specific error code (e.g., "UNKNOWN_TYPE").
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sitelift_api::Error> for CoreError {
    fn from(err: sitelift_api::Error) -> Self {
        match err {
            sitelift_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            sitelift_api::Error::InvalidToken => CoreError::AuthenticationFailed {
                message: "Invalid engine token".into(),
            },
            sitelift_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            sitelift_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            sitelift_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            sitelift_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            sitelift_api::Error::RateLimited { retry_after_secs } => CoreError::Api {
                message: format!("Rate limited -- retry after {retry_after_secs}s"),
                code: Some("rate_limited".into()),
                status: Some(429),
            },
            sitelift_api::Error::Engine {
                message,
                code,
                status,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            sitelift_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
