//! Mirror of important log lines into the guild's `#logs` channel.

use std::{fmt::Display, sync::Arc};

use chrono::{DateTime, SecondsFormat, Utc};
use poise::serenity_prelude::{ChannelId, ChannelType, Guild, Http};

use crate::{log_error, util::ellipsis_text};

pub const LOG_CHANNEL_NAME: &str = "logs";
const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Clone, Default)]
pub struct BotLog {
    channel: Arc<parking_lot::RwLock<Option<ChannelId>>>,
}

impl BotLog {
    pub fn channel(&self) -> Option<ChannelId> {
        *self.channel.read()
    }

    pub fn set_channel(&self, channel_id: Option<ChannelId>) {
        *self.channel.write() = channel_id;
    }

    /// Log `text` at info level and post it to the mirror channel, if one is set.
    /// Failing to post is logged and otherwise ignored.
    pub async fn log_notice(&self, http: &Http, text: impl Display) {
        let text = text.to_string();
        tracing::info!(notice = %text, "{}", text);
        if let Some(channel_id) = self.channel() {
            let line = format_log_line(Utc::now(), &text);
            log_error!("Failed to mirror log line", channel_id.say(http, line).await);
        }
    }
}

/// Pick the text channel called `#logs`, preferring the one listed first in the guild.
pub fn find_log_channel(guild: &Guild) -> Option<ChannelId> {
    pick_log_channel(
        guild.channels.values().map(|c| (c.id, c.name.as_str(), c.kind, c.position)),
    )
}

fn pick_log_channel<'a>(
    channels: impl Iterator<Item = (ChannelId, &'a str, ChannelType, u16)>,
) -> Option<ChannelId> {
    channels
        .filter(|(_, name, kind, _)| *name == LOG_CHANNEL_NAME && *kind == ChannelType::Text)
        .min_by_key(|(id, _, _, position)| (*position, *id))
        .map(|(id, ..)| id)
}

fn format_log_line(time: DateTime<Utc>, text: &str) -> String {
    let line = format!("`[{}]` {}", time.to_rfc3339_opts(SecondsFormat::Millis, true), text);
    ellipsis_text(&line, MAX_MESSAGE_LEN)
}
