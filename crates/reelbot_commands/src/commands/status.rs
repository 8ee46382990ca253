use std::time::Duration;

use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter, Mentionable};
use reelbot_db::Settings;
use reelbot_util::{embeds, util};

use super::*;

/// Show the current status of the bot and its systems.
#[poise::command(prefix_command, custom_data = "CmdMeta { perms: PermissionLevel::User }")]
pub async fn status(ctx: Ctx<'_>) -> Res<()> {
    let shard_latency = {
        let shard_manager = ctx.framework().shard_manager.as_ref();
        let shard_runners = shard_manager.runners.lock().await;
        shard_runners.values().find_map(|runner| runner.latency)
    };
    let settings = ctx.get_db().get_settings().await;
    let started = ctx.get_config().time_started;

    ctx.reply_embed(
        status_embed(shard_latency, &settings)
            .field("Up since", util::format_date_detailed(started), false),
    )
    .await?;
    Ok(())
}

fn status_embed(latency: Option<Duration>, settings: &Settings) -> CreateEmbed {
    let autoreact = match settings.channel_id {
        Some(channel_id) if settings.enabled => format!("✅ Enabled in {}", channel_id.mention()),
        _ => "❌ Disabled".to_string(),
    };
    embeds::base_embed()
        .color(embeds::COLOR_INFO)
        .title("🤖 Bot Status & Health")
        .field(
            "Ping",
            latency.map_or_else(|| "N/A".to_string(), |x| format!("**{}ms**", x.as_millis())),
            true,
        )
        .field("Auto-Reactions", autoreact, true)
        .field("Current Emojis", settings.emojis.join(" "), true)
        .footer(CreateEmbedFooter::new("All systems operational."))
}
