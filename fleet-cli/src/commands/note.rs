use anyhow::Result;
use tracing::{debug, info};

use super::{CommandInfo, Context, Permission, options};
use crate::error::CliError;

pub static SET: CommandInfo = CommandInfo {
    signature: "note [<note>]",
    description: "set a device note",
    help: "Use this command to set or update a device note.

If the note argument is omitted, the note is read from `stdin`.

Examples:

    $ fleet note \"My useful note\" --device 7cf02a6
    $ cat note.txt | fleet note --device 7cf02a6",
    options: &[options::DEVICE],
    permission: Permission::User,
    primary: false,
};

/// Attach a note to a device. Without a positional note, piped stdin is used.
pub async fn set(ctx: &mut Context<'_>, device: &str, note: Option<&str>) -> Result<()> {
    let note = match note.filter(|n| !n.is_empty()) {
        Some(note) => note.to_string(),
        None => {
            debug!("no note argument, reading stdin");
            let piped = ctx.input.read_piped()?.unwrap_or_default();
            // blank piped input counts as no input
            if piped.trim().is_empty() {
                return Err(CliError::MissingNoteContent.into());
            }
            piped.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    ctx.platform.set_device_note(device, &note).await?;
    info!("note set on device {}", device);
    Ok(())
}
