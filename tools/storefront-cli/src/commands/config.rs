//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, app_name } => init_config(force, &app_name, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let store = &ctx.config.store;
    ctx.output.info("[store]");
    ctx.output.kv("currency", &store.currency);
    ctx.output.kv("data_file", &store.data_file);
    ctx.output.kv("user", &store.user);

    let notifications = &ctx.config.notifications;
    ctx.output.info("[notifications]");
    ctx.output.kv("endpoint", &notifications.endpoint);
    ctx.output.kv(
        "project_id",
        notifications.project_id.as_deref().unwrap_or("(not set)"),
    );
    ctx.output.kv("app_name", &notifications.app_name);
    ctx.output.kv("android_channel", &notifications.android_channel.id);

    if ctx.config.currency().is_err() {
        ctx.output
            .warn(&format!("Unknown currency code: {}", store.currency));
    }
    Ok(())
}

fn init_config(force: bool, app_name: &str, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(app_name))?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    Ok(())
}
