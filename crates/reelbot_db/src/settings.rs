use anyhow::Result;
use serde::{Deserialize, Serialize};
use serenity::{all::ChannelId, async_trait};

/// The persisted settings document.
///
/// Field names are camelCase so that documents written by earlier versions of the bot
/// keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub channel_id: Option<ChannelId>,
    #[serde(default = "default_emojis")]
    pub emojis: Vec<String>,
}

fn default_emojis() -> Vec<String> {
    vec!["🔥".to_string(), "💯".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self { enabled: false, channel_id: None, emojis: default_emojis() }
    }
}

impl Settings {
    /// Whether auto-react applies to messages in `channel_id`.
    pub fn reacts_in(&self, channel_id: ChannelId) -> bool {
        self.enabled && self.channel_id == Some(channel_id)
    }
}

/// Remote document holding the [`Settings`].
#[async_trait]
pub trait SettingsStore: std::fmt::Debug + Send + Sync {
    /// `Ok(None)` when no document has been stored yet.
    async fn get(&self) -> Result<Option<Settings>>;
    async fn save(&self, settings: &Settings) -> Result<()>;
}
