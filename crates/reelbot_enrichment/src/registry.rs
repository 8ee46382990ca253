use std::{
    collections::HashMap,
    sync::{Arc, Weak},
    time::Duration,
};

use parking_lot::Mutex;
use serenity::all::ChannelId;
use tokio::{task::AbortHandle, time::Instant};

#[derive(Debug)]
struct WatchEntry {
    created_at: Instant,
    expiry_task: AbortHandle,
}

type Entries = Mutex<HashMap<ChannelId, WatchEntry>>;

/// Channels waiting for their ticket embed, each with an expiry timer.
///
/// The lock is only held for map operations, never across an `.await`.
#[derive(Debug)]
pub struct WatchRegistry {
    entries: Arc<Entries>,
    expiry: Duration,
}

impl WatchRegistry {
    pub fn new(expiry: Duration) -> Self {
        Self { entries: Arc::new(Mutex::new(HashMap::new())), expiry }
    }

    /// Start watching `channel_id`. Returns `false` if it was already watched.
    pub fn register(&self, channel_id: ChannelId) -> bool {
        let mut entries = self.entries.lock();
        if entries.contains_key(&channel_id) {
            return false;
        }
        let created_at = Instant::now();
        let expiry_task = tokio::spawn(expire_after(
            Arc::downgrade(&self.entries),
            channel_id,
            created_at,
            self.expiry,
        ))
        .abort_handle();
        entries.insert(channel_id, WatchEntry { created_at, expiry_task });
        tracing::debug!(channel_id = %channel_id, "Watching ticket channel");
        true
    }

    pub fn is_watched(&self, channel_id: ChannelId) -> bool {
        self.entries.lock().contains_key(&channel_id)
    }

    /// Stop watching `channel_id` and cancel its expiry.
    ///
    /// Returns `true` only for the one caller that actually removed the entry.
    pub fn resolve(&self, channel_id: ChannelId) -> bool {
        let removed = self.entries.lock().remove(&channel_id);
        match removed {
            Some(entry) => {
                entry.expiry_task.abort();
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for WatchRegistry {
    fn drop(&mut self) {
        for (_, entry) in self.entries.lock().drain() {
            entry.expiry_task.abort();
        }
    }
}

async fn expire_after(
    entries: Weak<Entries>,
    channel_id: ChannelId,
    created_at: Instant,
    expiry: Duration,
) {
    tokio::time::sleep_until(created_at + expiry).await;
    let Some(entries) = entries.upgrade() else { return };
    let mut entries = entries.lock();
    // A resolved and re-registered channel has a newer entry that must survive.
    if entries.get(&channel_id).is_some_and(|e| e.created_at == created_at) {
        entries.remove(&channel_id);
        tracing::info!(
            channel_id = %channel_id,
            expiry_secs = expiry.as_secs(),
            "Ticket watch expired without a qualifying embed, abandoning channel"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const EXPIRY: Duration = Duration::from_secs(120);

    #[tokio::test(start_paused = true)]
    async fn register_is_idempotent() {
        let registry = WatchRegistry::new(EXPIRY);
        let channel = ChannelId::new(1);
        assert!(registry.register(channel));
        assert!(!registry.register(channel));
        assert_eq!(registry.len(), 1);
        assert!(registry.is_watched(channel));
    }

    #[tokio::test(start_paused = true)]
    async fn resolve_succeeds_exactly_once() {
        let registry = WatchRegistry::new(EXPIRY);
        let channel = ChannelId::new(1);
        registry.register(channel);
        assert!(registry.resolve(channel));
        assert!(!registry.resolve(channel));
        assert!(!registry.is_watched(channel));
    }

    #[tokio::test(start_paused = true)]
    async fn resolving_unknown_channel_is_a_noop() {
        let registry = WatchRegistry::new(EXPIRY);
        assert!(!registry.resolve(ChannelId::new(99)));
        assert!(registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn entries_expire() {
        let registry = WatchRegistry::new(EXPIRY);
        let channel = ChannelId::new(1);
        registry.register(channel);

        tokio::time::sleep(Duration::from_secs(119)).await;
        assert!(registry.is_watched(channel));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!registry.is_watched(channel));
        assert!(logs_contain("abandoning channel"));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_expiry_keeps_newer_entry() {
        let registry = WatchRegistry::new(EXPIRY);
        let channel = ChannelId::new(1);
        registry.register(channel);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(registry.resolve(channel));
        assert!(registry.register(channel));

        // past the first registration's deadline, before the second one's
        tokio::time::sleep(Duration::from_secs(90)).await;
        assert!(registry.is_watched(channel));

        tokio::time::sleep(Duration::from_secs(40)).await;
        assert!(!registry.is_watched(channel));
    }
}
