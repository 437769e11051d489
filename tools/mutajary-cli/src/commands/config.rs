//! Configuration management commands.

use anyhow::{bail, Result};
use mutajary_storefront::config::generate_default_config;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { project_id, force } => init_config(&project_id, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.output.is_json() {
        ctx.output.json(config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[store]");
    ctx.output.kv("name", &config.store.name);
    ctx.output.kv("currency", &config.store.currency);

    ctx.output.info("[docstore]");
    ctx.output.kv("base_url", &config.docstore.base_url);
    ctx.output.kv("project_id", &config.docstore.project_id);
    ctx.output.kv(
        "api_key",
        if config.docstore.api_key.is_some() { "(set)" } else { "(unset)" },
    );
    ctx.output.kv("products_collection", &config.docstore.products_collection);
    ctx.output.kv("orders_collection", &config.docstore.orders_collection);

    ctx.output.info("[relay]");
    ctx.output.kv(
        "endpoint",
        config.relay.endpoint.as_deref().unwrap_or("(unset)"),
    );
    ctx.output.kv("subject", &config.relay.subject);

    ctx.output.info("[cart]");
    ctx.output.kv("storage_key", &config.cart.storage_key);
    ctx.output.kv("data_dir", &config.data_dir().display().to_string());

    ctx.output.info("[pages]");
    ctx.output.kv("confirmation", &config.pages.confirmation);

    Ok(())
}

fn init_config(project_id: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("mutajary.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config(project_id))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let report = ctx.config.validate();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": report.is_valid(),
            "errors": report.errors,
            "warnings": report.warnings,
        }));
    } else {
        for error in &report.errors {
            ctx.output.error(&format!("Error: {}", error));
        }
        for warning in &report.warnings {
            ctx.output.warn(&format!("Warning: {}", warning));
        }
    }

    if !report.is_valid() {
        bail!("Configuration has {} error(s)", report.errors.len());
    }

    if report.warnings.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        ctx.output.success("Configuration is valid (with warnings)");
    }

    Ok(())
}
