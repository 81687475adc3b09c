use std::io::Write;

use anyhow::Result;
use tracing::info;

use super::{CommandInfo, Context, OptionInfo, Permission, options};
use crate::{
    error::CliError,
    prompt::{self, select_device_type},
    tui::apps::{application_details, applications_table},
};

pub const TYPE: OptionInfo = OptionInfo {
    signature: "type",
    parameter: Some("type"),
    description: "application type",
    aliases: &["t"],
    required: None,
};

pub const REMOVE_CONFIRMATION: &str = "Are you sure you want to delete the application?";

pub static CREATE: CommandInfo = CommandInfo {
    signature: "app create <name>",
    description: "create an application",
    help: "Use this command to create a new fleet application.

You can specify the application device type with the `--type` option.
Otherwise, an interactive dropdown will be shown for you to select from.

You can see a list of supported device types with

    $ fleet devices supported

Examples:

    $ fleet app create MyApp
    $ fleet app create MyApp --type raspberry-pi",
    options: &[TYPE],
    permission: Permission::User,
    primary: true,
};

pub static LIST: CommandInfo = CommandInfo {
    signature: "apps",
    description: "list all applications",
    help: "Use this command to list all your applications.

Only the most important bits of information are shown for each application.
For detailed information, use `fleet app <name>` instead.

Examples:

    $ fleet apps",
    options: &[],
    permission: Permission::User,
    primary: true,
};

pub static INFO: CommandInfo = CommandInfo {
    signature: "app <name>",
    description: "list a single application",
    help: "Use this command to show detailed information for a single application.

Examples:

    $ fleet app MyApp",
    options: &[],
    permission: Permission::User,
    primary: true,
};

pub static RESTART: CommandInfo = CommandInfo {
    signature: "app restart <name>",
    description: "restart an application",
    help: "Use this command to restart all devices that belong to an application.

Examples:

    $ fleet app restart MyApp",
    options: &[],
    permission: Permission::User,
    primary: false,
};

pub static REMOVE: CommandInfo = CommandInfo {
    signature: "app rm <name>",
    description: "remove an application",
    help: "Use this command to remove a fleet application.

This command asks for confirmation interactively.
You can skip it by passing the `--yes` option.

Examples:

    $ fleet app rm MyApp
    $ fleet app rm MyApp --yes",
    options: &[options::YES],
    permission: Permission::User,
    primary: false,
};

/// The existence check and the create call are two requests; a concurrent
/// creator can still win in between, in which case the platform rejects the
/// create and that error is returned.
pub async fn create(ctx: &mut Context<'_>, name: &str, device_type: Option<String>) -> Result<()> {
    if ctx.platform.has_application(name).await? {
        return Err(CliError::DuplicateApplication.into());
    }

    let device_type = match device_type.filter(|t| !t.is_empty()) {
        Some(device_type) => device_type,
        None => select_device_type(ctx.platform, ctx.prompter).await?,
    };

    let application = ctx.platform.create_application(name, &device_type).await?;
    info!(id = application.id, "created application {}", application.app_name);
    writeln!(
        ctx.out,
        "Application created: {} ({}, id {})",
        application.app_name, application.device_type, application.id
    )?;
    Ok(())
}

pub async fn list(ctx: &mut Context<'_>) -> Result<()> {
    let applications = ctx.platform.list_applications().await?;
    writeln!(ctx.out, "{}", applications_table(&applications, ctx.ansi))?;
    Ok(())
}

pub async fn info(ctx: &mut Context<'_>, name: &str) -> Result<()> {
    let application = ctx.platform.get_application(name).await?;
    writeln!(ctx.out, "{}", application_details(&application, ctx.ansi))?;
    Ok(())
}

pub async fn restart(ctx: &mut Context<'_>, name: &str) -> Result<()> {
    ctx.platform.restart_application(name).await?;
    info!("restart requested for {}", name);
    Ok(())
}

pub async fn remove(ctx: &mut Context<'_>, name: &str, yes: bool) -> Result<()> {
    if !prompt::confirm(ctx.prompter, yes, REMOVE_CONFIRMATION)? {
        return Err(CliError::Aborted.into());
    }
    ctx.platform.remove_application(name).await?;
    info!("removed application {}", name);
    Ok(())
}
