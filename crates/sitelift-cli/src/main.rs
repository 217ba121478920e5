mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need an engine connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global).await,

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "sitelift", &mut std::io::stdout());
            Ok(())
        }

        // All other commands require an engine connection
        cmd => {
            let engine_config = build_engine_config(&cli.global)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, engine_config, &cli.global).await
        }
    }
}

/// Build an `EngineConfig` from the config file, profile, and CLI overrides.
fn build_engine_config(global: &cli::GlobalOpts) -> Result<sitelift_core::EngineConfig, CliError> {
    let cfg = sitelift_config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    // If a profile exists, use it with CLI flag overrides
    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return config::resolve_profile(profile, &profile_name, global);
    }

    // No profile found -- try to build from CLI flags / env vars alone
    let url_str = global.engine.as_deref().ok_or_else(|| CliError::NoConfig {
        path: sitelift_config::config_path().display().to_string(),
    })?;

    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "engine".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let auth = match global.token {
        Some(ref token) => {
            sitelift_core::EngineCredentials::Token(secrecy::SecretString::from(token.clone()))
        }
        None => sitelift_core::EngineCredentials::Anonymous,
    };

    let tls = if global.insecure {
        sitelift_core::TlsVerification::DangerAcceptInvalid
    } else {
        sitelift_core::TlsVerification::SystemDefaults
    };

    Ok(sitelift_core::EngineConfig {
        url,
        auth,
        project: global.project.clone().unwrap_or_else(|| "main".into()),
        stack: global.stack.clone().unwrap_or_else(|| "dev".into()),
        tls,
        timeout: std::time::Duration::from_secs(global.timeout),
    })
}
