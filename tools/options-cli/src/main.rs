//! Options CLI - Command line tool for product options.
//!
//! Commands:
//! - `options render` - Render the option form for a product
//! - `options validate` - Check option sets for authoring mistakes
//! - `options quote` - Compute line properties for selections
//! - `options transform` - Run the cart transform on a snapshot
//! - `options config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, QuoteArgs, RenderArgs, TransformArgs, ValidateArgs};

/// Options CLI - Author and check custom product options
#[derive(Parser)]
#[command(name = "options")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the option form for a product
    Render(RenderArgs),

    /// Validate option sets
    Validate(ValidateArgs),

    /// Compute line properties and surcharge for selections
    Quote(QuoteArgs),

    /// Run the cart transform on an input document
    Transform(TransformArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Render(args) => commands::render::run(args, &ctx).await,
        Commands::Validate(args) => commands::validate::run(args, &ctx).await,
        Commands::Quote(args) => commands::quote::run(args, &ctx).await,
        Commands::Transform(args) => commands::transform::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
