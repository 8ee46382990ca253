use std::{collections::HashSet, num::NonZeroU64, time::Duration};

use anyhow::Context;
use poise::serenity_prelude::{ChannelId, RoleId, UserId};

use crate::util::{parse_optional_env_var, required_env_var};

#[derive(Debug)]
pub struct Config {
    pub discord_token: String,
    pub tmdb_api_key: String,
    pub jsonbin_bin_id: String,
    pub jsonbin_api_key: String,

    /// Port of the keep-alive endpoint.
    pub port: u16,

    pub ticket_bot: Option<UserId>,
    pub category_tickets: Option<ChannelId>,
    pub channels_forum: HashSet<ChannelId>,
    pub channel_announcements: Option<ChannelId>,
    pub role_new_release: Option<RoleId>,

    pub watch_expiry: Duration,
    pub forum_grace: Duration,
    pub lookup_timeout: Duration,

    pub time_started: chrono::DateTime<chrono::Utc>,
}

impl Config {
    pub fn from_environment() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the config from any variable source, `std::env` in production.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let snowflake = |key: &str| parse_optional_env_var::<_, NonZeroU64>(&vars, key);
        let secs = |key: &str, default: u64| {
            parse_optional_env_var::<_, u64>(&vars, key)
                .map(|x| Duration::from_secs(x.unwrap_or(default)))
        };

        Ok(Config {
            discord_token: required_env_var(&vars, "TOKEN")?,
            tmdb_api_key: required_env_var(&vars, "TMDB_API_KEY")?,
            jsonbin_bin_id: required_env_var(&vars, "JSONBIN_BIN_ID")?,
            jsonbin_api_key: required_env_var(&vars, "JSONBIN_API_KEY")?,
            port: parse_optional_env_var(&vars, "PORT")?.unwrap_or(10000),

            ticket_bot: snowflake("TICKET_BOT_ID")?.map(UserId::from),
            category_tickets: snowflake("TICKET_CATEGORY_ID")?.map(ChannelId::from),
            channels_forum: vars("FORUM_CHANNEL_IDS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|x| !x.is_empty())
                .map(|x| Ok(ChannelId::from(x.parse::<NonZeroU64>()?)))
                .collect::<anyhow::Result<_>>()
                .context("Failed to parse env-var FORUM_CHANNEL_IDS")?,
            channel_announcements: snowflake("ANNOUNCEMENT_CHANNEL_ID")?.map(ChannelId::from),
            role_new_release: snowflake("NEW_RELEASE_ROLE_ID")?.map(RoleId::from),

            watch_expiry: secs("WATCH_EXPIRY_SECS", 120)?,
            forum_grace: secs("FORUM_GRACE_SECS", 2)?,
            lookup_timeout: secs("LOOKUP_TIMEOUT_SECS", 15)?,

            time_started: chrono::Utc::now(),
        })
    }

    /// Ticket bot and ticket category, if both are configured.
    pub fn ticket_source(&self) -> Option<(UserId, ChannelId)> {
        Some((self.ticket_bot?, self.category_tickets?))
    }
}
