//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};
use serde::Serialize;
use tabled::Tabled;

use sitelift_config::{self as config_store, Config, Profile, config_path, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt {
        reason: e.to_string(),
    }
}

fn keyring_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "keyring".into(),
        reason: e.to_string(),
    }
}

fn resolve_profile_name(global: &GlobalOpts, explicit: Option<String>, cfg: &Config) -> String {
    explicit
        .or_else(|| global.profile.clone())
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

// ── Rows ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProfileSummary {
    name: String,
    engine: String,
    project: String,
    stack: String,
    default: bool,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Engine")]
    engine: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Stack")]
    stack: String,
    #[tabled(rename = "Default")]
    default: String,
}

impl From<&ProfileSummary> for ProfileRow {
    fn from(p: &ProfileSummary) -> Self {
        Self {
            name: p.name.clone(),
            engine: p.engine.clone(),
            project: p.project.clone(),
            stack: p.stack.clone(),
            default: if p.default { "*".into() } else { String::new() },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => init(global),

        // ── Show: resolved configuration as TOML ────────────────────
        ConfigCommand::Show => {
            let mut cfg = config_store::load_config_or_default();
            // Never echo plaintext tokens back.
            for profile in cfg.profiles.values_mut() {
                if profile.token.is_some() {
                    profile.token = Some("<redacted>".into());
                }
            }
            let toml_str = toml::to_string_pretty(&cfg).map_err(|e| CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            })?;
            output::print_output(&toml_str, global.quiet);
            Ok(())
        }

        // ── Profiles: list ──────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config_store::load_config_or_default();
            let default = cfg.default_profile.clone().unwrap_or_default();

            let mut summaries: Vec<ProfileSummary> = cfg
                .profiles
                .iter()
                .map(|(name, profile)| ProfileSummary {
                    name: name.clone(),
                    engine: profile.engine.clone(),
                    project: profile.project.clone(),
                    stack: profile.stack.clone(),
                    default: *name == default,
                })
                .collect();
            summaries.sort_by(|a, b| a.name.cmp(&b.name));

            let rendered = output::render_list(
                &global.output,
                &summaries,
                |p| ProfileRow::from(p),
                |p| p.name.clone(),
            );
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        // ── Use: set default profile ────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config_store::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                let mut available: Vec<&str> =
                    cfg.profiles.keys().map(String::as_str).collect();
                available.sort_unstable();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: available.join(", "),
                });
            }
            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }

        // ── SetToken: store in keyring ──────────────────────────────
        ConfigCommand::SetToken { profile } => {
            let cfg = config_store::load_config_or_default();
            let profile_name = resolve_profile_name(global, profile, &cfg);

            let token = rpassword::prompt_password("Engine access token: ")
                .map_err(prompt_err)?;
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "token cannot be empty".into(),
                });
            }

            let entry = keyring::Entry::new("sitelift", &format!("{profile_name}/token"))
                .map_err(keyring_err)?;
            entry.set_password(&token).map_err(keyring_err)?;

            if !global.quiet {
                eprintln!("Token for profile '{profile_name}' stored in system keyring");
            }
            Ok(())
        }
    }
}

// ── Init wizard ─────────────────────────────────────────────────────

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config_path();
    eprintln!("sitelift — configuration wizard");
    eprintln!("  Config path: {}\n", path.display());

    let mut cfg = config_store::load_config_or_default();

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    if cfg.profiles.contains_key(&profile_name) && !global.yes {
        let overwrite = Confirm::new()
            .with_prompt(format!("Profile '{profile_name}' exists -- overwrite?"))
            .default(false)
            .interact()
            .map_err(prompt_err)?;
        if !overwrite {
            return Ok(());
        }
    }

    // 2. Engine URL
    let engine: String = Input::new()
        .with_prompt("Engine URL")
        .default("http://127.0.0.1:7071".into())
        .interact_text()
        .map_err(prompt_err)?;

    // 3. Project / stack
    let project: String = Input::new()
        .with_prompt("Project")
        .default("main".into())
        .interact_text()
        .map_err(prompt_err)?;
    let stack: String = Input::new()
        .with_prompt("Stack")
        .default("dev".into())
        .interact_text()
        .map_err(prompt_err)?;

    // 4. Credentials
    let auth_choices = &["No token (local engine)", "Access token"];
    let auth_selection = Select::new()
        .with_prompt("Authentication")
        .items(auth_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let token_field = if auth_selection == 1 {
        let token = rpassword::prompt_password("Engine access token: ").map_err(prompt_err)?;
        if token.is_empty() {
            return Err(CliError::Validation {
                field: "token".into(),
                reason: "token cannot be empty".into(),
            });
        }

        let store_choices = &[
            "Store in system keyring (recommended)",
            "Save to config file (plaintext)",
        ];
        let store_selection = Select::new()
            .with_prompt("Where to store the token?")
            .items(store_choices)
            .default(0)
            .interact()
            .map_err(prompt_err)?;

        if store_selection == 0 {
            let entry = keyring::Entry::new("sitelift", &format!("{profile_name}/token"))
                .map_err(keyring_err)?;
            entry.set_password(&token).map_err(keyring_err)?;
            eprintln!("  Token stored in system keyring");
            None
        } else {
            Some(token)
        }
    } else {
        None
    };

    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            engine,
            project,
            stack,
            token: token_field,
            token_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        },
    );
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(profile_name.clone());
    }

    save_config(&cfg)?;
    eprintln!("\nProfile '{profile_name}' written to {}", path.display());
    Ok(())
}
