use std::io::Write;

use anyhow::Result;

use super::{CommandInfo, Context, Permission};
use crate::tui::devices::device_types_table;

pub static SUPPORTED: CommandInfo = CommandInfo {
    signature: "devices supported",
    description: "list all supported device types",
    help: "Use this command to list the device types the platform supports.

These are the values accepted by `fleet app create --type`.

Examples:

    $ fleet devices supported",
    options: &[],
    permission: Permission::User,
    primary: false,
};

pub async fn supported(ctx: &mut Context<'_>) -> Result<()> {
    let mut device_types = ctx.platform.supported_device_types().await?;
    device_types.sort_by(|a, b| a.slug.cmp(&b.slug));
    writeln!(ctx.out, "{}", device_types_table(&device_types, ctx.ansi))?;
    Ok(())
}
