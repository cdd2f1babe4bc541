//! CLI command implementations.

pub mod config;
pub mod quote;
pub mod render;
pub mod transform;
pub mod validate;

use clap::{Args, Subcommand};

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Option sets file (default: catalog.path from config).
    pub catalog: Option<String>,

    /// Product handle.
    #[arg(long, default_value = "product")]
    pub handle: String,

    /// Product tags, comma separated.
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Write the HTML to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Option sets file (default: catalog.path from config).
    pub catalog: Option<String>,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Option sets file (default: catalog.path from config).
    pub catalog: Option<String>,

    /// Product handle.
    #[arg(long, default_value = "product")]
    pub handle: String,

    /// Product tags, comma separated.
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// A selection as `Name=Value`; repeatable.
    #[arg(short, long = "select")]
    pub selections: Vec<String>,
}

/// Arguments for the transform command.
#[derive(Args)]
pub struct TransformArgs {
    /// Cart snapshot JSON file.
    pub input: String,

    /// Replay the result this many times and check later passes are no-ops.
    #[arg(long, default_value = "1")]
    pub passes: usize,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Overwrite an existing config without asking.
        #[arg(short, long)]
        force: bool,

        /// Write options.json instead of options.toml.
        #[arg(long = "as-json")]
        as_json: bool,
    },
    /// Validate the config file.
    Validate,
}
