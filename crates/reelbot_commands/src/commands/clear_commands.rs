use itertools::Itertools;
use poise::serenity_prelude::Command as AppCommand;

use super::*;

/// Remove all registered application (slash) commands.
///
/// Clears the commands of this server, or the global ones when run as `!!clearcommands global`.
#[poise::command(
    prefix_command,
    guild_only,
    rename = "clearcommands",
    custom_data = "CmdMeta { perms: PermissionLevel::Admin }",
    hide_in_help
)]
pub async fn clear_commands(ctx: Ctx<'_>, #[rest] scope: Option<String>) -> Res<()> {
    let global = match scope.as_deref().map(str::trim) {
        None | Some("") => false,
        Some(x) if x.eq_ignore_ascii_case("global") => true,
        Some(_) => abort_with!("Usage: `!!clearcommands [global]`"),
    };
    let http = ctx.http();

    let removed = if global {
        let commands = AppCommand::get_global_commands(http).await?;
        AppCommand::set_global_commands(http, Vec::new()).await?;
        commands
    } else {
        let guild_id = ctx.guild_id().user_error("This can only be used in a server")?;
        let commands = guild_id.get_commands(http).await?;
        guild_id.set_commands(http, Vec::new()).await?;
        commands
    };
    for command in &removed {
        tracing::debug!(deleted_command_name = %command.name, global, "Deleted application command");
    }

    let names = removed.iter().map(|x| x.name.as_str()).join(", ");
    let scope = if global { "global" } else { "server" };
    ctx.say_success(if names.is_empty() {
        format!("There were no {scope} commands to delete")
    } else {
        format!("Deleted {scope} commands: {names}")
    })
    .await?;
    ctx.log_notice(format!("[COMMAND] {} cleared {scope} application commands", ctx.author().tag()))
        .await;
    Ok(())
}
