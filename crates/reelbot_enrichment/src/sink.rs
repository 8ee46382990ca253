use std::sync::Arc;

use anyhow::Context;
use reelbot_media::embed::media_embed;
use serenity::{
    all::{ChannelId, CreateMessage, Http},
    async_trait,
};

use crate::{EnrichmentReply, EnrichmentSink};

/// Posts enrichment replies into Discord channels.
#[derive(Clone)]
pub struct DiscordSink {
    http: Arc<Http>,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl EnrichmentSink for DiscordSink {
    async fn send(&self, channel_id: ChannelId, reply: &EnrichmentReply) -> anyhow::Result<()> {
        let message = match reply {
            EnrichmentReply::Found(summary) => CreateMessage::new().embed(media_embed(summary)),
            other => CreateMessage::new().content(other.notice().unwrap_or_default()),
        };
        channel_id
            .send_message(self.http.as_ref(), message)
            .await
            .with_context(|| format!("Failed to send enrichment reply to {channel_id}"))?;
        Ok(())
    }
}
