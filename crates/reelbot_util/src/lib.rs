pub mod bot_log;
pub mod config;
pub mod embeds;
pub mod extensions;
pub mod prelude;
pub mod util;

use std::sync::Arc;

use reelbot_db::Db;
use reelbot_enrichment::{ForumWatcher, TicketWatcher};
use reelbot_media::MediaLookup;

/// Shared state handed to every command and event handler.
#[derive(Clone)]
pub struct UserData {
    pub config: Arc<config::Config>,
    pub db: Arc<Db>,
    pub media: Arc<dyn MediaLookup>,
    /// `None` when ticket enrichment isn't configured.
    pub tickets: Option<Arc<TicketWatcher>>,
    /// `None` when no forums are configured.
    pub forums: Option<Arc<ForumWatcher>>,
    pub bot_log: bot_log::BotLog,
}
