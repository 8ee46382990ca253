use poise::serenity_prelude::ActivityData;

use super::*;

pub async fn ready(ctx: &client::Context, data: &UserData, data_about_bot: &Ready) -> Result<()> {
    tracing::info!(
        bot.user = %data_about_bot.user.tag(),
        bot.guilds = data_about_bot.guilds.len(),
        enrichment.tickets = data.tickets.is_some(),
        enrichment.forums = data.forums.is_some(),
        "Reelbot is ready!"
    );
    ctx.set_activity(Some(ActivityData::watching("for new requests")));
    Ok(())
}
