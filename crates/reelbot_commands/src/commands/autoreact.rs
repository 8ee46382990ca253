use poise::serenity_prelude::{CreateEmbed, Mentionable};
use reelbot_db::Settings;

use super::*;

const USAGE: &str = "ℹ️ Invalid subcommand. Use `!!autoreact enable|disable|setemojis|status`.";
const SETEMOJIS_USAGE: &str = "⚠️ Usage: `!!autoreact setemojis 😄 👎`";

/// Manage automatic reactions.
#[poise::command(
    prefix_command,
    guild_only,
    subcommands("enable", "disable", "set_emojis", "autoreact_status"),
    custom_data = "CmdMeta { perms: PermissionLevel::Admin }"
)]
pub async fn autoreact(ctx: Ctx<'_>, #[rest] subcommand: Option<String>) -> Res<()> {
    if subcommand.map_or(true, |x| x.trim().is_empty()) {
        reply_status(ctx).await
    } else {
        ctx.say(USAGE).await?;
        Ok(())
    }
}

/// Enable auto-reactions in this channel.
#[poise::command(
    prefix_command,
    guild_only,
    custom_data = "CmdMeta { perms: PermissionLevel::Admin }"
)]
pub async fn enable(ctx: Ctx<'_>) -> Res<()> {
    let channel_id = ctx.channel_id();
    ctx.get_db()
        .update_settings(|s| {
            s.enabled = true;
            s.channel_id = Some(channel_id);
        })
        .await?;
    ctx.say("✅ Auto-react has been **enabled** for this channel.").await?;
    ctx.log_notice(format!(
        "[COMMAND] {} enabled auto-react in {}",
        ctx.author().tag(),
        channel_id.mention()
    ))
    .await;
    Ok(())
}

/// Disable auto-reactions.
#[poise::command(
    prefix_command,
    guild_only,
    custom_data = "CmdMeta { perms: PermissionLevel::Admin }"
)]
pub async fn disable(ctx: Ctx<'_>) -> Res<()> {
    ctx.get_db().update_settings(|s| s.enabled = false).await?;
    ctx.say("❌ Auto-react has been **disabled**.").await?;
    ctx.log_notice(format!("[COMMAND] {} disabled auto-react", ctx.author().tag())).await;
    Ok(())
}

/// Set the two emojis to react with.
#[poise::command(
    prefix_command,
    guild_only,
    rename = "setemojis",
    custom_data = "CmdMeta { perms: PermissionLevel::Admin }"
)]
pub async fn set_emojis(ctx: Ctx<'_>, #[rest] emojis: Option<String>) -> Res<()> {
    let Some((first, second)) = emojis.as_deref().and_then(parse_emoji_pair) else {
        ctx.say(SETEMOJIS_USAGE).await?;
        return Ok(());
    };
    let emojis = vec![first.to_string(), second.to_string()];
    ctx.get_db().update_settings(move |s| s.emojis = emojis).await?;
    ctx.say(format!("✅ Emojis have been updated to {first} and {second}")).await?;
    ctx.log_notice(format!(
        "[COMMAND] {} set auto-react emojis to {first} {second}",
        ctx.author().tag()
    ))
    .await;
    Ok(())
}

/// Show the auto-react settings.
#[poise::command(
    prefix_command,
    guild_only,
    rename = "status",
    custom_data = "CmdMeta { perms: PermissionLevel::Admin }"
)]
pub async fn autoreact_status(ctx: Ctx<'_>) -> Res<()> {
    reply_status(ctx).await
}

async fn reply_status(ctx: Ctx<'_>) -> Res<()> {
    let settings = ctx.get_db().get_settings().await;
    ctx.reply_embed(status_embed(&settings)).await?;
    Ok(())
}

fn status_embed(settings: &Settings) -> CreateEmbed {
    CreateEmbed::default()
        .color(if settings.enabled { 0x4caf50u32 } else { 0xf44336u32 })
        .title("Auto-Reaction System Status")
        .field(
            "Service Status",
            if settings.enabled { "**Enabled**" } else { "**Disabled**" },
            true,
        )
        .field(
            "Target Channel",
            settings.channel_id.map_or_else(|| "Not Set".to_string(), |c| c.mention().to_string()),
            true,
        )
        .field("Reaction Emojis", settings.emojis.join(" "), true)
}

/// The first two words of `input`, if there are at least two.
fn parse_emoji_pair(input: &str) -> Option<(&str, &str)> {
    let mut words = input.split_whitespace();
    Some((words.next()?, words.next()?))
}
