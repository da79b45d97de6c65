//! Clap derive structures for the `usmctl` CLI.
//!
//! Only clap and std are used here: build.rs includes this file to render
//! man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// usmctl -- manage AlienVault USM Anywhere sensors, keys and jobs
#[derive(Debug, Parser)]
#[command(
    name = "usmctl",
    version,
    about = "Manage AlienVault USM Anywhere from the command line",
    long_about = "Control-plane client for AlienVault USM Anywhere.\n\n\
        Provisions sensors through their local appliance API, manages\n\
        activation keys and AWS collection jobs, and reports license capacity.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "USM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Tenant host or URL (overrides profile)
    #[arg(long, env = "USM_HOST", global = true)]
    pub host: Option<String>,

    /// Login email (overrides profile)
    #[arg(long, env = "USM_USERNAME", global = true)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "USM_PASSWORD", global = true, hide = true)]
    pub password: Option<String>,

    /// Control-plane API version
    #[arg(long, env = "USM_API_VERSION", global = true, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub api_version: Option<u8>,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "USM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "USM_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "USM_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

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
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.clone().unwrap_or_default()
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
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
    /// Manage and provision sensors
    #[command(alias = "s")]
    Sensors(SensorsArgs),

    /// Manage sensor activation keys
    #[command(alias = "k")]
    Keys(KeysArgs),

    /// Manage AWS collection jobs
    #[command(alias = "j")]
    Jobs(JobsArgs),

    /// Show license limits and capacity
    License(LicenseArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SENSORS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SensorsArgs {
    #[command(subcommand)]
    pub command: SensorsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SensorsCommand {
    /// List registered sensors
    #[command(alias = "ls")]
    List,

    /// Show a sensor (a disconnected sensor is deregistered)
    Get {
        /// Sensor ID
        id: String,
    },

    /// Change a sensor's name or description
    Update {
        /// Sensor ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Deregister a sensor
    #[command(alias = "rm")]
    Delete {
        /// Sensor ID
        id: String,
    },

    /// Deregister every sensor that has lost its connection
    Sweep,

    /// Register a freshly deployed appliance and wait until it is ready
    Provision(ProvisionArgs),
}

#[derive(Debug, Args)]
pub struct ProvisionArgs {
    /// IP address of the appliance's local API
    #[arg(long)]
    pub ip: String,

    /// Name to register the sensor under (must be unique)
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Use this activation code instead of minting a key
    #[arg(long, env = "USM_ACTIVATION_CODE", hide_env_values = true)]
    pub activation_code: Option<String>,

    /// Give up after this many seconds [default: from config, else 3600]
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  KEYS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct KeysArgs {
    #[command(subcommand)]
    pub command: KeysCommand,
}

#[derive(Debug, Subcommand)]
pub enum KeysCommand {
    /// List activation keys
    #[command(alias = "ls")]
    List {
        /// Only keys no sensor has used yet
        #[arg(long)]
        unconsumed: bool,
    },

    /// Show an activation key
    Get {
        /// Key ID (the activation code)
        id: String,
    },

    /// Mint an activation key
    Create {
        /// Return an existing unconsumed key when there is one
        #[arg(long)]
        reuse: bool,
    },

    /// Revoke an activation key
    #[command(alias = "rm")]
    Delete {
        /// Key ID (the activation code)
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  JOBS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub command: JobsCommand,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum JobKind {
    /// Every scheduled job, including built-in ones
    #[default]
    All,
    /// S3 bucket collection jobs
    Bucket,
    /// CloudWatch log stream collection jobs
    Cloudwatch,
}

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List scheduled jobs
    #[command(alias = "ls")]
    List {
        #[arg(long, default_value = "all")]
        kind: JobKind,
    },

    /// Show a job
    Get {
        /// Job ID
        id: String,

        #[arg(long, default_value = "all")]
        kind: JobKind,
    },

    /// Delete a job
    #[command(alias = "rm")]
    Delete {
        /// Job ID
        id: String,

        #[arg(long, default_value = "all")]
        kind: JobKind,
    },

    /// Create an S3 bucket collection job
    CreateBucket(BucketJobArgs),

    /// Create a CloudWatch log stream collection job
    CreateCloudwatch(CloudWatchJobArgs),

    /// Change an S3 bucket collection job
    UpdateBucket(BucketJobUpdate),

    /// Change a CloudWatch log stream collection job
    UpdateCloudwatch(CloudWatchJobUpdate),
}

#[derive(Debug, Args)]
pub struct JobCommonArgs {
    /// Sensor that runs the job
    #[arg(long)]
    pub sensor: String,

    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// `hourly`, `daily`, or a control-plane cron expression
    #[arg(long, default_value = "hourly")]
    pub schedule: String,

    /// Create the job disabled
    #[arg(long)]
    pub disabled: bool,

    /// `raw` or `syslog`
    #[arg(long, default_value = "raw")]
    pub source_format: String,

    /// Force a specific parsing plugin
    #[arg(long)]
    pub plugin: Option<String>,
}

#[derive(Debug, Args)]
pub struct BucketJobArgs {
    #[command(flatten)]
    pub common: JobCommonArgs,

    /// S3 bucket name
    #[arg(long)]
    pub bucket: String,

    /// Key prefix inside the bucket
    #[arg(long, default_value = "")]
    pub path: String,
}

#[derive(Debug, Args)]
pub struct CloudWatchJobArgs {
    #[command(flatten)]
    pub common: JobCommonArgs,

    /// AWS region, e.g. eu-west-1
    #[arg(long)]
    pub region: String,

    /// Log group name
    #[arg(long)]
    pub group: String,

    /// Log stream name
    #[arg(long)]
    pub stream: String,
}

/// Fields shared by job updates; omitted flags keep the current value.
#[derive(Debug, Args)]
pub struct JobCommonUpdate {
    /// Job ID
    pub id: String,

    #[arg(long)]
    pub sensor: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub schedule: Option<String>,

    #[arg(long)]
    pub disabled: Option<bool>,

    #[arg(long)]
    pub source_format: Option<String>,

    #[arg(long)]
    pub plugin: Option<String>,
}

#[derive(Debug, Args)]
pub struct BucketJobUpdate {
    #[command(flatten)]
    pub common: JobCommonUpdate,

    #[arg(long)]
    pub bucket: Option<String>,

    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Debug, Args)]
pub struct CloudWatchJobUpdate {
    #[command(flatten)]
    pub common: JobCommonUpdate,

    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub group: Option<String>,

    #[arg(long)]
    pub stream: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LICENSE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LicenseArgs {
    #[command(subcommand)]
    pub command: LicenseCommand,
}

#[derive(Debug, Subcommand)]
pub enum LicenseCommand {
    /// Show license limits and expiry
    Show,

    /// Report whether another sensor or key fits under the license
    Capacity,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
