//! Clap derive structures for the `sitelift` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sitelift -- provision static websites through a deployment engine
#[derive(Debug, Parser)]
#[command(
    name = "sitelift",
    version,
    about = "Provision static websites on Azure from the command line",
    long_about = "Registers the azure-static-website component with a sitelift\n\
        deployment engine: a storage origin for your files, an optional CDN,\n\
        and an optional custom-domain DNS binding. All provisioning runs\n\
        engine-side; this tool only submits the request and reports the URLs.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Engine profile to use
    #[arg(long, short = 'p', env = "SITELIFT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Engine URL (overrides profile)
    #[arg(long, short = 'e', env = "SITELIFT_ENGINE", global = true)]
    pub engine: Option<String>,

    /// Project the deployment belongs to
    #[arg(long, env = "SITELIFT_PROJECT", global = true)]
    pub project: Option<String>,

    /// Stack to deploy into
    #[arg(long, short = 's', env = "SITELIFT_STACK", global = true)]
    pub stack: Option<String>,

    /// Engine access token
    #[arg(long, env = "SITELIFT_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SITELIFT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SITELIFT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SITELIFT_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Provision a static website
    #[command(alias = "up")]
    Deploy(DeployArgs),

    /// Engine version and protocol info
    Info,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEPLOY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Root directory containing the website's contents
    #[arg(long, required = true, value_name = "DIR")]
    pub site_path: String,

    /// Logical resource name for the website
    #[arg(long, default_value = "website")]
    pub name: String,

    /// Default document for the site (provider default: index.html)
    #[arg(long)]
    pub index_document: Option<String>,

    /// Default 404 error page (provider default: error.html)
    #[arg(long)]
    pub error_document: Option<String>,

    /// Provision a CDN in front of the storage origin
    #[arg(long)]
    pub with_cdn: bool,

    /// DNS zone that will serve the site from a custom domain
    #[arg(long, value_name = "ZONE")]
    pub dns_zone: Option<String>,

    /// Resource group the DNS zone is attached to
    #[arg(long, requires = "dns_zone")]
    pub domain_resource_group: Option<String>,

    /// Subdomain used to access the site (apex/root of the zone when omitted)
    #[arg(long, requires = "dns_zone")]
    pub subdomain: Option<String>,

    /// Ask the engine to refuse deletion of the provisioned resources
    #[arg(long)]
    pub protect: bool,

    /// Publish the site URLs as deployment outputs
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    pub publish_outputs: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an engine access token in the system keyring
    SetToken {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
