//! Clap derive structures for the `cfops` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cfops -- manage Cloud Foundry apps, services, and routes by name
#[derive(Debug, Parser)]
#[command(
    name = "cfops",
    version,
    about = "Manage Cloud Foundry applications, services, and routes",
    long_about = "A CLI for the Cloud Foundry Cloud Controller API.\n\n\
        Resources are addressed by name within the targeted organization\n\
        and space; asynchronous platform jobs are awaited before returning.",
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
    /// Foundation profile to use
    #[arg(long, short = 'p', env = "CFOPS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Cloud Controller API URL (overrides profile)
    #[arg(long, short = 'a', env = "CFOPS_API", global = true)]
    pub api: Option<String>,

    /// Target organization (overrides profile)
    #[arg(long, env = "CFOPS_ORG", global = true)]
    pub org: Option<String>,

    /// Target space (overrides profile)
    #[arg(long, short = 's', env = "CFOPS_SPACE", global = true)]
    pub space: Option<String>,

    /// Bearer token (e.g. from `cf oauth-token`)
    #[arg(long, env = "CFOPS_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CFOPS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Skip TLS certificate verification
    #[arg(long, short = 'k', env = "CFOPS_SKIP_SSL_VALIDATION", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "CFOPS_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,

    /// Give up waiting on a platform job after this many seconds
    #[arg(long, env = "CFOPS_JOB_TIMEOUT", global = true)]
    pub job_timeout: Option<u64>,

    /// Reject ambiguous names instead of taking the first match
    #[arg(long, global = true)]
    pub strict_names: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

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

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// View organizations
    #[command(alias = "org")]
    Orgs(OrgsArgs),

    /// View spaces in the targeted organization
    #[command(alias = "space")]
    Spaces(SpacesArgs),

    /// Manage applications in the targeted space
    #[command(alias = "app")]
    Apps(AppsArgs),

    /// Manage service instances and bindings
    #[command(alias = "svc")]
    Services(ServicesArgs),

    /// Manage routes and their mappings
    #[command(alias = "route")]
    Routes(RoutesArgs),

    /// View shared and private domains
    #[command(alias = "domain")]
    Domains(DomainsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared route arguments ───────────────────────────────────────────

/// A route addressed by its parts.
#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Domain name (e.g. apps.example.com)
    pub domain: String,

    /// Hostname; omit for a bare-domain route
    #[arg(long = "hostname", short = 'n')]
    pub host: Option<String>,

    /// Path, including the leading '/'
    #[arg(long)]
    pub path: Option<String>,

    /// Port, for TCP routes
    #[arg(long)]
    pub port: Option<u16>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ORGS / SPACES / DOMAINS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OrgsArgs {
    #[command(subcommand)]
    pub command: OrgsCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrgsCommand {
    /// List organizations
    #[command(alias = "ls")]
    List,

    /// Show an organization and its spaces
    Get {
        /// Organization name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct SpacesArgs {
    #[command(subcommand)]
    pub command: SpacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SpacesCommand {
    /// List spaces in the targeted organization
    #[command(alias = "ls")]
    List,

    /// Show a space with its applications and services
    Get {
        /// Space name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct DomainsArgs {
    #[command(subcommand)]
    pub command: DomainsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DomainsCommand {
    /// List private and shared domains visible to the organization
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AppsArgs {
    #[command(subcommand)]
    pub command: AppsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// List applications in the targeted space
    #[command(alias = "ls")]
    List,

    /// Show application details and routes
    Get {
        /// Application name
        name: String,
    },

    /// Start an application
    Start {
        /// Application name
        name: String,
    },

    /// Stop an application
    Stop {
        /// Application name
        name: String,
    },

    /// Delete an application
    #[command(alias = "rm")]
    Delete {
        /// Application name
        name: String,

        /// Also delete the application's routes
        #[arg(long, short = 'r')]
        delete_routes: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List service instances in the targeted space
    #[command(alias = "ls")]
    List,

    /// Show a service instance and its bound applications
    Get {
        /// Service instance name
        name: String,
    },

    /// Create a managed service instance
    Create {
        /// Service label in the marketplace
        service: String,

        /// Plan name
        plan: String,

        /// Name for the new instance
        name: String,

        /// Arbitrary parameters as inline JSON
        #[arg(long, short = 'c', conflicts_with = "config_file")]
        config: Option<String>,

        /// Arbitrary parameters from a JSON file
        #[arg(long)]
        config_file: Option<PathBuf>,

        /// Comma-separated tags
        #[arg(long, short = 't', value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Delete a service instance
    #[command(alias = "rm")]
    Delete {
        /// Service instance name
        name: String,
    },

    /// Bind a service instance to an application
    Bind {
        /// Application name
        app: String,

        /// Service instance name
        service_instance: String,

        /// Binding parameters as inline JSON
        #[arg(long, short = 'c')]
        config: Option<String>,
    },

    /// Unbind a service instance from an application
    Unbind {
        /// Application name
        app: String,

        /// Service instance name
        service_instance: String,
    },

    /// Bind a route to a route service instance
    BindRoute {
        /// Service instance name
        service_instance: String,

        #[command(flatten)]
        route: RouteArgs,

        /// Binding parameters as inline JSON
        #[arg(long, short = 'c')]
        config: Option<String>,
    },

    /// Unbind a route from a route service instance
    UnbindRoute {
        /// Service instance name
        service_instance: String,

        #[command(flatten)]
        route: RouteArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROUTES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RoutesArgs {
    #[command(subcommand)]
    pub command: RoutesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoutesCommand {
    /// List routes in the targeted space
    #[command(alias = "ls")]
    List,

    /// Create a route in the targeted space
    Create(RouteArgs),

    /// Delete a route
    #[command(alias = "rm")]
    Delete(RouteArgs),

    /// Map a route to an application, creating the route if needed
    Map {
        /// Application name
        app: String,

        #[command(flatten)]
        route: RouteArgs,
    },

    /// Remove a route from an application
    Unmap {
        /// Application name
        app: String,

        #[command(flatten)]
        route: RouteArgs,
    },
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

    /// Display current configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Set the organization and space targeted by a profile
    Target {
        /// Organization name
        #[arg(long)]
        org: Option<String>,

        /// Space name
        #[arg(long)]
        space: Option<String>,
    },

    /// Store a bearer token or password in the system keyring
    SetSecret {
        /// Which secret to store
        #[arg(value_enum)]
        kind: SecretKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SecretKind {
    Token,
    Password,
}

impl SecretKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Password => "password",
        }
    }
}

// ── Completions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
