//! Clap derive structures for the `lmsync` CLI.
//!
//! Defines the command tree, global flags, and shared value types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use lmsync_api::models::Property;
use lmsync_core::Intent;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lmsync -- declarative management of LogicMonitor monitoring state
#[derive(Debug, Parser)]
#[command(
    name = "lmsync",
    version,
    about = "Reconcile LogicMonitor devices, groups, and alert tuning",
    long_about = "Declarative CLI for the LogicMonitor REST API.\n\n\
        Describe the desired state of a device, device group, or alert\n\
        tuning edit; lmsync resolves names to ids, diffs against the\n\
        account, and applies only what differs.",
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
    /// Account profile to use
    #[arg(long, short = 'p', env = "LMSYNC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Account name (overrides profile)
    #[arg(long, short = 'c', env = "LMSYNC_COMPANY", global = true)]
    pub company: Option<String>,

    /// API token access id (overrides profile)
    #[arg(long, env = "LMSYNC_ACCESS_ID", global = true)]
    pub access_id: Option<String>,

    /// API token access key
    #[arg(long, env = "LMSYNC_ACCESS_KEY", global = true, hide_env = true)]
    pub access_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LMSYNC_OUTPUT",
        default_value = "plain",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Resolve and diff only; apply nothing
    #[arg(long, global = true)]
    pub check: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "LMSYNC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable one-line summary (default)
    Plain,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
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

/// Desired existence of a managed resource.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum State {
    Present,
    Absent,
}

impl From<State> for Intent {
    fn from(state: State) -> Self {
        match state {
            State::Present => Intent::Present,
            State::Absent => Intent::Absent,
        }
    }
}

/// Parse a `name=value` pair into a custom property.
pub fn parse_property(raw: &str) -> Result<Property, String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok(Property::new(name, value)),
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage monitored devices
    #[command(alias = "dev", alias = "d")]
    Device(DeviceArgs),

    /// Manage device groups
    #[command(alias = "g")]
    Group(GroupArgs),

    /// Apply alert tuning edits
    #[command(alias = "t")]
    Tuning(TuningArgs),

    /// Manage configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DeviceArgs {
    #[command(subcommand)]
    pub command: DeviceCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// Reconcile one device toward its desired state
    Apply(DeviceApplyArgs),
}

#[derive(Debug, Args)]
pub struct DeviceApplyArgs {
    /// Hostname or IP of the device (the remote identity key)
    #[arg(long)]
    pub name: String,

    /// Display name; defaults to the hostname
    #[arg(long)]
    pub display_name: Option<String>,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Host group name (defaults to the root group)
    #[arg(long)]
    pub host_group: Option<String>,

    /// Auto-balanced collector group name
    #[arg(long)]
    pub collector_group: String,

    /// Custom property as name=value (repeatable)
    #[arg(long = "property", value_parser = parse_property)]
    pub properties: Vec<Property>,

    /// Disable alerting on the device
    #[arg(long)]
    pub alert_disable: bool,

    /// Netflow collector (by description); enables netflow
    #[arg(long)]
    pub netflow_collector: Option<String>,

    /// Desired existence
    #[arg(long, value_enum, default_value = "present")]
    pub state: State,
}

// ── Device groups ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// Reconcile one device group toward its desired state
    Apply(GroupApplyArgs),
}

#[derive(Debug, Args)]
pub struct GroupApplyArgs {
    /// Group name
    #[arg(long)]
    pub name: String,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Parent group name (defaults to the root group)
    #[arg(long)]
    pub parent_group: Option<String>,

    /// Default collector group name for members
    #[arg(long)]
    pub collector_group: String,

    /// Custom property as name=value (repeatable)
    #[arg(long = "property", value_parser = parse_property)]
    pub properties: Vec<Property>,

    /// Disable alerting on the group
    #[arg(long)]
    pub alert_disable: bool,

    /// Desired existence
    #[arg(long, value_enum, default_value = "present")]
    pub state: State,
}

// ── Tuning ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TuningArgs {
    #[command(subcommand)]
    pub command: TuningCommand,
}

#[derive(Debug, Subcommand)]
pub enum TuningCommand {
    /// Apply one alert tuning edit (always applied, never diffed)
    Apply(TuningApplyArgs),
}

#[derive(Debug, Args)]
pub struct TuningApplyArgs {
    /// Device, by display name
    #[arg(long)]
    pub device: String,

    /// Datasource display name
    #[arg(long)]
    pub datasource: String,

    /// Instance name
    #[arg(long)]
    pub instance: String,

    /// Datapoint name; omit to tune the whole instance
    #[arg(long)]
    pub datapoint: Option<String>,

    /// Alert threshold expression, e.g. "> 95 98" (requires --datapoint)
    #[arg(long, requires = "datapoint")]
    pub threshold: Option<String>,

    /// Disable alerting on the target
    #[arg(long)]
    pub alert_disable: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the effective configuration (secrets masked)
    Show,

    /// Store an access key in the system keyring (read from stdin)
    SetKey(SetKeyArgs),
}

#[derive(Debug, Args)]
pub struct SetKeyArgs {
    /// Profile the key belongs to
    #[arg(long, default_value = "default")]
    pub profile: String,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
