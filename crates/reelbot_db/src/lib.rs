use anyhow::{Context, Result};
use serenity::prelude::RwLock;

pub mod jsonbin;
pub mod settings;

pub use jsonbin::JsonBinStore;
pub use settings::{Settings, SettingsStore};

/// Settings service. Keeps the last known settings document in memory and writes every
/// change through to the backing [`SettingsStore`].
#[derive(Debug)]
pub struct Db {
    store: Box<dyn SettingsStore>,
    settings: RwLock<Settings>,
}

impl Db {
    /// Load the settings document, creating and saving the default one if the store is empty.
    pub async fn new(store: impl SettingsStore + 'static) -> Result<Self> {
        let settings = match store.get().await.context("Failed to load settings")? {
            Some(settings) => settings,
            None => {
                tracing::warn!("No settings found in store, creating default settings");
                let settings = Settings::default();
                store.save(&settings).await.context("Failed to save default settings")?;
                settings
            }
        };
        tracing::info!(
            settings.enabled = settings.enabled,
            settings.channel_id = ?settings.channel_id,
            "Loaded settings"
        );
        Ok(Self { store: Box::new(store), settings: RwLock::new(settings) })
    }

    pub async fn get_settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Apply `update` to a copy of the settings and persist it.
    /// The in-memory copy only changes once the store accepted the new document.
    pub async fn update_settings(
        &self,
        update: impl FnOnce(&mut Settings) + Send,
    ) -> Result<Settings> {
        let mut current = self.settings.write().await;
        let mut updated = current.clone();
        update(&mut updated);
        self.store.save(&updated).await.context("Failed to save settings")?;
        *current = updated.clone();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serenity::{all::ChannelId, async_trait};
    use std::sync::Arc;

    #[derive(Debug, Default, Clone)]
    struct MemoryStore {
        doc: Arc<Mutex<Option<Settings>>>,
        saves: Arc<Mutex<usize>>,
        fail_saves: bool,
    }

    #[async_trait]
    impl SettingsStore for MemoryStore {
        async fn get(&self) -> Result<Option<Settings>> {
            Ok(self.doc.lock().clone())
        }

        async fn save(&self, settings: &Settings) -> Result<()> {
            if self.fail_saves {
                anyhow::bail!("store unavailable");
            }
            *self.saves.lock() += 1;
            *self.doc.lock() = Some(settings.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn empty_store_gets_default_settings() {
        let store = MemoryStore::default();
        let db = Db::new(store.clone()).await.unwrap();
        assert_eq!(db.get_settings().await, Settings::default());
        assert_eq!(*store.doc.lock(), Some(Settings::default()));
        assert_eq!(*store.saves.lock(), 1);
    }

    #[tokio::test]
    async fn existing_settings_are_not_overwritten() {
        let existing = Settings { enabled: true, channel_id: Some(ChannelId::new(42)), emojis: vec!["👍".into()] };
        let store = MemoryStore { doc: Arc::new(Mutex::new(Some(existing.clone()))), ..Default::default() };
        let db = Db::new(store.clone()).await.unwrap();
        assert_eq!(db.get_settings().await, existing);
        assert_eq!(*store.saves.lock(), 0);
    }

    #[tokio::test]
    async fn updates_are_written_through() {
        let store = MemoryStore::default();
        let db = Db::new(store.clone()).await.unwrap();
        let updated = db
            .update_settings(|s| {
                s.enabled = true;
                s.channel_id = Some(ChannelId::new(7));
            })
            .await
            .unwrap();
        assert!(updated.enabled);
        assert_eq!(db.get_settings().await, updated);
        assert_eq!(*store.doc.lock(), Some(updated));
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_settings() {
        let existing = Settings::default();
        let store = MemoryStore {
            doc: Arc::new(Mutex::new(Some(existing.clone()))),
            fail_saves: true,
            ..Default::default()
        };
        let db = Db::new(store).await.unwrap();
        assert!(db.update_settings(|s| s.enabled = true).await.is_err());
        assert_eq!(db.get_settings().await, existing);
    }
}
