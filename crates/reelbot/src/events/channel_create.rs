use super::*;

/// Start watching new ticket channels.
pub fn channel_create(data: &UserData, channel: &GuildChannel) {
    let Some(tickets) = &data.tickets else { return };
    if tickets.on_channel_create(channel.id, channel.parent_id, channel.kind) {
        tracing::info!(
            channel.id = %channel.id,
            channel.name = %channel.name,
            "New ticket channel, waiting for the ticket embed"
        );
    }
}
