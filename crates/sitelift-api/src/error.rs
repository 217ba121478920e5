use thiserror::Error;

/// Top-level error type for the `sitelift-api` crate.
///
/// Covers every failure mode of the engine API surface: authentication,
/// transport, and structured engine responses. `sitelift-core` maps these
/// into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Authentication failed (malformed token header, account issues).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Access token rejected by the engine.
    #[error("Invalid engine token")]
    InvalidToken,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Rate limited by a hosted engine. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Engine API ──────────────────────────────────────────────────
    /// Structured error from the deployment engine.
    #[error("Engine error (HTTP {status}): {message}")]
    Engine {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::RateLimited { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Engine { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the engine error code, if available.
    pub fn engine_error_code(&self) -> Option<&str> {
        match self {
            Self::Engine { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
