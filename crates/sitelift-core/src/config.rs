// ── Runtime connection configuration ──
//
// These types describe *how* to reach a deployment engine. They carry
// credential data and connection tuning, but never touch disk. The CLI
// (or any embedding program) constructs an `EngineConfig` and hands it in.

use secrecy::SecretString;
use url::Url;

/// How to authenticate with a deployment engine.
#[derive(Debug, Clone)]
pub enum EngineCredentials {
    /// Bearer access token (hosted engines).
    Token(SecretString),
    /// No credentials. Local engines on the loopback interface accept
    /// anonymous requests; hosted engines reject them with 401.
    Anonymous,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-hosted engines behind self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single deployment engine.
///
/// Built by CLI/programs, passed to `Context` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine URL (e.g., `http://127.0.0.1:7071`).
    pub url: Url,
    /// Authentication method and credentials.
    pub auth: EngineCredentials,
    /// Project the deployment belongs to.
    pub project: String,
    /// Stack to deploy into (e.g., "dev", "prod").
    pub stack: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: std::time::Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:7071".parse().expect("default URL is valid"),
            auth: EngineCredentials::Anonymous,
            project: "main".into(),
            stack: "dev".into(),
            tls: TlsVerification::default(),
            timeout: std::time::Duration::from_secs(30),
        }
    }
}
