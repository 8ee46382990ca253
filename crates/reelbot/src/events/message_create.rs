use poise::serenity_prelude::ReactionType;
use reelbot_enrichment::{CandidateMessage, TicketOutcome};

use super::*;

pub async fn message_create(ctx: &client::Context, data: &UserData, msg: &Message) -> Result<()> {
    if takes_auto_react(msg.author.bot, msg.webhook_id.is_some()) {
        auto_react(ctx, data, msg).await;
    }

    if let Some(tickets) = &data.tickets {
        let candidate = CandidateMessage::from_message(msg);
        if let TicketOutcome::Enriched { title } =
            tickets.on_message(&sink(ctx), msg.channel_id, &candidate).await
        {
            tracing::info!(channel.id = %msg.channel_id, title, "Enriched ticket");
        }
    }
    Ok(())
}

/// Bots only get reactions when they post through a webhook.
fn takes_auto_react(author_is_bot: bool, from_webhook: bool) -> bool {
    !author_is_bot || from_webhook
}

#[tracing::instrument(skip_all, fields(msg.id = %msg.id, msg.channel_id = %msg.channel_id))]
async fn auto_react(ctx: &client::Context, data: &UserData, msg: &Message) {
    let settings = data.db.get_settings().await;
    if !settings.reacts_in(msg.channel_id) {
        return;
    }
    for emoji in &settings.emojis {
        let result = msg
            .react(ctx, reaction_type(emoji))
            .await
            .with_context(|| format!("Failed to react with {emoji}"));
        log_error!(result);
    }
}

/// Custom emojis are stored in their `<:name:id>` form, anything else is unicode.
fn reaction_type(emoji: &str) -> ReactionType {
    ReactionType::try_from(emoji).unwrap_or_else(|_| ReactionType::Unicode(emoji.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_humans_and_webhooks_get_reactions() {
        assert!(takes_auto_react(false, false));
        assert!(takes_auto_react(true, true));
        assert!(!takes_auto_react(true, false));
    }

    #[test]
    fn emojis_become_reactions() {
        assert_eq!(reaction_type("🔥"), ReactionType::Unicode("🔥".to_string()));
        assert!(matches!(
            reaction_type("<:pog:1180000000000000000>"),
            ReactionType::Custom { id, .. } if id == EmojiId::new(1180000000000000000)
        ));
    }
}
