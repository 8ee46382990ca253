use reelbot_util::bot_log::find_log_channel;

use super::*;

/// Once the guild is available, find the #logs channel to mirror log lines to.
pub async fn guild_create(ctx: &client::Context, data: &UserData, guild: &Guild) -> Result<()> {
    match find_log_channel(guild) {
        Some(channel_id) => {
            data.bot_log.set_channel(Some(channel_id));
            data.bot_log
                .log_notice(&ctx.http, format!("✅ Logging to Discord channel <#{channel_id}> is enabled."))
                .await;
        }
        None => {
            tracing::warn!(
                guild.id = %guild.id,
                "Could not find a #logs channel. Logging to Discord is disabled."
            );
        }
    }
    Ok(())
}
