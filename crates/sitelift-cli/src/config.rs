//! CLI-owned profile resolution: translates `sitelift-config` profiles
//! plus global flags into a `sitelift_core::EngineConfig`.
//!
//! Shared types and the credential chain live in `sitelift-config`;
//! this module only layers flag/env precedence on top.

use std::time::Duration;

use secrecy::SecretString;

use sitelift_config::{Config, Profile, resolve_credentials};
use sitelift_core::{EngineConfig, EngineCredentials, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate a `Profile` + global flags into an `EngineConfig`.
///
/// This is the single boundary where profile types cross into core types.
/// Precedence per field: flag > env (clap-provided) > profile > default.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<EngineConfig, CliError> {
    // 1. Engine URL
    let url_str = global.engine.as_deref().unwrap_or(&profile.engine);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "engine".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. Credentials (flag wins, then the config crate's chain)
    let auth = match global.token {
        Some(ref token) => EngineCredentials::Token(SecretString::from(token.clone())),
        None => resolve_credentials(profile, profile_name),
    };

    // 3. TLS verification
    let tls = if global.insecure || profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    // 4. Project / stack
    let project = global
        .project
        .as_deref()
        .unwrap_or(&profile.project)
        .to_owned();
    let stack = global.stack.as_deref().unwrap_or(&profile.stack).to_owned();

    // 5. Timeout
    let timeout = Duration::from_secs(global.timeout);

    Ok(EngineConfig {
        url,
        auth,
        project,
        stack,
        tls,
        timeout,
    })
}
