use std::{collections::HashSet, sync::Arc, time::Duration};

use reelbot_media::MediaLookup;
use serenity::all::ChannelId;

use crate::{enrich, EnrichmentSink};

#[derive(Debug, Clone)]
pub struct ForumWatcherConfig {
    pub forums: HashSet<ChannelId>,
    /// Wait before replying, so the starter message is posted before our reply.
    pub grace: Duration,
    pub lookup_timeout: Duration,
}

/// Replies to new posts in the request forums with a summary of the title they ask for.
pub struct ForumWatcher {
    config: ForumWatcherConfig,
    lookup: Arc<dyn MediaLookup>,
}

impl std::fmt::Debug for ForumWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForumWatcher").field("config", &self.config).finish_non_exhaustive()
    }
}

impl ForumWatcher {
    pub fn new(config: ForumWatcherConfig, lookup: Arc<dyn MediaLookup>) -> Self {
        Self { config, lookup }
    }

    pub fn watches(&self, parent_id: Option<ChannelId>) -> bool {
        parent_id.is_some_and(|id| self.config.forums.contains(&id))
    }

    /// Handle a new thread. Returns whether it was in a watched forum and got a reply.
    pub async fn on_thread_create(
        &self,
        sink: &dyn EnrichmentSink,
        thread_id: ChannelId,
        parent_id: Option<ChannelId>,
        title: &str,
    ) -> bool {
        if !self.watches(parent_id) {
            return false;
        }
        tracing::info!(thread_id = %thread_id, title, "New forum post, enriching");
        tokio::time::sleep(self.config.grace).await;
        enrich(self.lookup.as_ref(), sink, thread_id, title, self.config.lookup_timeout).await;
        true
    }
}
