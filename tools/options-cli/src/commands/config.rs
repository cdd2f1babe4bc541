//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force, as_json } => init_config(force, as_json, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(not set)"),
    );

    ctx.output.info("[render]");
    ctx.output.kv("class_prefix", &ctx.config.render.class_prefix);
    ctx.output.kv("currency", &ctx.config.render.currency);
    ctx.output.kv("notice_ms", &ctx.config.render.notice_ms.to_string());
    ctx.output.kv(
        "number range",
        &format!(
            "{}..={}",
            ctx.config.render.number_min, ctx.config.render.number_max
        ),
    );

    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &ctx.config.logging.format);

    Ok(())
}

async fn init_config(force: bool, as_json: bool, ctx: &Context) -> Result<()> {
    let name = if as_json { "options.json" } else { "options.toml" };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.warn("Config file left unchanged");
            return Ok(());
        }
    }

    if as_json {
        let Some(path) = config_path.to_str() else {
            bail!("Config path is not valid UTF-8: {}", config_path.display());
        };
        CliConfig::default().save(path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.check();

    if let Some(path) = ctx.config.catalog.path.as_deref() {
        let resolved = ctx.resolve_path(path);
        if !resolved.exists() {
            ctx.output.warn(&format!(
                "Warning: catalog.path {} does not exist",
                resolved.display()
            ));
        }
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
