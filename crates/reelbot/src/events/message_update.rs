use reelbot_enrichment::{CandidateMessage, TicketOutcome};

use super::*;

/// The ticket bot often posts an empty message and edits the embed in afterwards.
pub async fn message_update(
    ctx: &client::Context,
    data: &UserData,
    new: Option<&Message>,
    event: &MessageUpdateEvent,
) -> Result<()> {
    let Some(tickets) = &data.tickets else { return Ok(()) };
    if !tickets.is_watched(event.channel_id) {
        return Ok(());
    }

    let fetched;
    let candidate = match CandidateMessage::from_update(event) {
        Some(candidate) => candidate,
        None => {
            let msg = match new {
                Some(msg) => msg,
                None => {
                    fetched = event
                        .channel_id
                        .message(ctx, event.id)
                        .await
                        .context("Failed to fetch edited message")?;
                    &fetched
                }
            };
            CandidateMessage::from_message(msg)
        }
    };

    if let TicketOutcome::Enriched { title } =
        tickets.on_message(&sink(ctx), event.channel_id, &candidate).await
    {
        tracing::info!(channel.id = %event.channel_id, title, "Enriched ticket after edit");
    }
    Ok(())
}
