//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use sitelift_core::CoreError;

/// Exit codes per the CLI spec.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const ENGINE: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to engine at {url}")]
    #[diagnostic(
        code(sitelift::connection_failed),
        help(
            "Check that the deployment engine is running and accessible.\n\
             URL: {url}\n\
             Try: sitelift info --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS certificate verification failed for {url}")]
    #[diagnostic(
        code(sitelift::tls_error),
        help(
            "The engine is using a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { url: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(sitelift::auth_failed),
        help(
            "Verify your engine access token.\n\
             Run: sitelift config set-token --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    // ── Engine ───────────────────────────────────────────────────────

    #[error("Engine error ({code}): {message}")]
    #[diagnostic(code(sitelift::engine_error))]
    EngineError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sitelift::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(sitelift::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: sitelift config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(sitelift::no_config),
        help(
            "Create one with: sitelift config init\n\
             Or pass the engine directly: sitelift --engine <URL> …\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(sitelift::config))]
    Config(#[from] sitelift_config::ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Interactive prompt failed: {reason}")]
    #[diagnostic(
        code(sitelift::prompt),
        help("Re-run in an interactive terminal, or pass values via flags.")
    )]
    Prompt { reason: String },

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(sitelift::timeout),
        help("Increase timeout with --timeout or check engine responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::EngineError { .. } => exit_code::ENGINE,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::Prompt { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message: _ } => CliError::AuthFailed {
                profile: "current".into(),
            },

            CoreError::DeploymentNotOpen => CliError::ConnectionFailed {
                url: "(no deployment)".into(),
                source: "Deployment session is not open".into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::MissingArgument { resource, field } => CliError::Validation {
                field,
                reason: format!("required by {resource}"),
            },

            CoreError::InvalidArgument { field, reason } => CliError::Validation { field, reason },

            CoreError::MissingOutput { resource, output } => CliError::EngineError {
                code: "missing_output".into(),
                message: format!("provider did not return '{output}' for {resource}"),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Value(err) => CliError::EngineError {
                code: "unresolved_value".into(),
                message: err.to_string(),
            },

            CoreError::Api {
                message,
                code,
                status: _,
            } => CliError::EngineError {
                code: code.unwrap_or_default(),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::EngineError {
                code: "internal".into(),
                message,
            },
        }
    }
}
