use std::{sync::Arc, time::Duration};

use reelbot_media::MediaLookup;
use serenity::all::{ChannelId, ChannelType, UserId};

use crate::{enrich, extract, CandidateMessage, EnrichmentSink, Extraction, WatchRegistry};

#[derive(Debug, Clone)]
pub struct TicketWatcherConfig {
    /// Author of the ticket embeds.
    pub ticket_bot: UserId,
    /// Category new ticket channels are created in.
    pub category: ChannelId,
    pub expiry: Duration,
    pub lookup_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketOutcome {
    /// Not a watched channel, or not a ticket-bot embed.
    Ignored,
    /// A ticket-bot embed without a title yet.
    StillWatching,
    /// This call claimed the ticket and replied for `title`.
    Enriched { title: String },
}

/// Watches freshly created ticket channels until the ticket bot posts (or edits in) the
/// embed carrying the requested title, then replies exactly once with its summary.
pub struct TicketWatcher {
    config: TicketWatcherConfig,
    registry: WatchRegistry,
    lookup: Arc<dyn MediaLookup>,
}

impl std::fmt::Debug for TicketWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketWatcher")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl TicketWatcher {
    pub fn new(config: TicketWatcherConfig, lookup: Arc<dyn MediaLookup>) -> Self {
        let registry = WatchRegistry::new(config.expiry);
        Self { config, registry, lookup }
    }

    pub fn is_watched(&self, channel_id: ChannelId) -> bool {
        self.registry.is_watched(channel_id)
    }

    /// Start watching a channel if it is a text channel in the ticket category.
    pub fn on_channel_create(
        &self,
        channel_id: ChannelId,
        parent_id: Option<ChannelId>,
        kind: ChannelType,
    ) -> bool {
        if kind != ChannelType::Text || parent_id != Some(self.config.category) {
            return false;
        }
        self.registry.register(channel_id)
    }

    /// Handle a created or edited message in `channel_id`.
    ///
    /// The watch is resolved before anything is awaited, so of several racing events for
    /// the same ticket only one gets to look the title up and reply.
    pub async fn on_message(
        &self,
        sink: &dyn EnrichmentSink,
        channel_id: ChannelId,
        msg: &CandidateMessage<'_>,
    ) -> TicketOutcome {
        if !self.registry.is_watched(channel_id) {
            return TicketOutcome::Ignored;
        }
        let title = match extract(msg, self.config.ticket_bot) {
            None => return TicketOutcome::Ignored,
            Some(Extraction::NotFound) => return TicketOutcome::StillWatching,
            Some(Extraction::Title(title)) => title,
        };
        if !self.registry.resolve(channel_id) {
            tracing::debug!(channel_id = %channel_id, "Ticket already claimed by another event");
            return TicketOutcome::Ignored;
        }

        tracing::info!(channel_id = %channel_id, title = %title, "Enriching ticket");
        enrich(self.lookup.as_ref(), sink, channel_id, &title, self.config.lookup_timeout).await;
        TicketOutcome::Enriched { title }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        extract::{CandidateEmbed, CandidateField},
        testing::{FakeLookup, RecordingSink},
        EnrichmentReply,
    };

    const TICKET_BOT: UserId = UserId::new(557628352828014614);
    const CATEGORY: ChannelId = ChannelId::new(1000);
    const TICKET: ChannelId = ChannelId::new(1001);

    fn watcher(lookup: FakeLookup) -> (TicketWatcher, Arc<FakeLookup>) {
        let lookup = Arc::new(lookup);
        let config = TicketWatcherConfig {
            ticket_bot: TICKET_BOT,
            category: CATEGORY,
            expiry: Duration::from_secs(120),
            lookup_timeout: Duration::from_secs(15),
        };
        (TicketWatcher::new(config, lookup.clone()), lookup)
    }

    fn ticket_embed(field: &'static str, value: &'static str) -> CandidateMessage<'static> {
        CandidateMessage {
            author_id: TICKET_BOT,
            embeds: vec![CandidateEmbed { fields: vec![CandidateField { name: field, value }] }],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn only_text_channels_in_the_category_are_watched() {
        let (watcher, _) = watcher(FakeLookup::default());
        assert!(!watcher.on_channel_create(TICKET, Some(ChannelId::new(5)), ChannelType::Text));
        assert!(!watcher.on_channel_create(TICKET, Some(CATEGORY), ChannelType::Voice));
        assert!(!watcher.on_channel_create(TICKET, None, ChannelType::Text));
        assert!(!watcher.is_watched(TICKET));

        assert!(watcher.on_channel_create(TICKET, Some(CATEGORY), ChannelType::Text));
        assert!(watcher.is_watched(TICKET));
    }

    #[tokio::test(start_paused = true)]
    async fn replies_once_per_ticket() {
        let (watcher, lookup) = watcher(FakeLookup::knowing(&["Suits"]));
        let sink = RecordingSink::default();
        watcher.on_channel_create(TICKET, Some(CATEGORY), ChannelType::Text);

        let msg = ticket_embed("Series Name (Primary)", "Suits");
        let first = watcher.on_message(&sink, TICKET, &msg).await;
        let second = watcher.on_message(&sink, TICKET, &msg).await;

        assert_eq!(first, TicketOutcome::Enriched { title: "Suits".into() });
        assert_eq!(second, TicketOutcome::Ignored);
        assert_eq!(lookup.queries(), vec!["Suits"]);
        assert_eq!(sink.sent().len(), 1);
        assert!(!watcher.is_watched(TICKET));
    }

    #[tokio::test(start_paused = true)]
    async fn racing_events_reply_once() {
        let (watcher, lookup) =
            watcher(FakeLookup::knowing(&["Dune"]).with_delay(Duration::from_secs(1)));
        let sink = RecordingSink::default();
        watcher.on_channel_create(TICKET, Some(CATEGORY), ChannelType::Text);

        let created = ticket_embed("Movie Name", "Dune");
        let edited = ticket_embed("Movie Name", "Dune");
        let (a, b) = tokio::join!(
            watcher.on_message(&sink, TICKET, &created),
            watcher.on_message(&sink, TICKET, &edited),
        );

        let enriched = [a, b].iter().filter(|o| matches!(o, TicketOutcome::Enriched { .. })).count();
        assert_eq!(enriched, 1);
        assert_eq!(lookup.queries().len(), 1);
        assert_eq!(sink.sent().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_watching_until_the_title_shows_up() {
        let (watcher, _) = watcher(FakeLookup::knowing(&["Dune"]));
        let sink = RecordingSink::default();
        watcher.on_channel_create(TICKET, Some(CATEGORY), ChannelType::Text);

        let placeholder = ticket_embed("Movie Name", " ");
        assert_eq!(watcher.on_message(&sink, TICKET, &placeholder).await, TicketOutcome::StillWatching);
        assert!(watcher.is_watched(TICKET));

        let impostor = CandidateMessage { author_id: UserId::new(7), ..ticket_embed("Movie Name", "Dune") };
        assert_eq!(watcher.on_message(&sink, TICKET, &impostor).await, TicketOutcome::Ignored);
        assert!(watcher.is_watched(TICKET));
        assert!(sink.sent().is_empty());

        let filled = ticket_embed("Movie Name", "Dune");
        assert_eq!(
            watcher.on_message(&sink, TICKET, &filled).await,
            TicketOutcome::Enriched { title: "Dune".into() }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_titles_still_consume_the_watch() {
        let (watcher, _) = watcher(FakeLookup::default());
        let sink = RecordingSink::default();
        watcher.on_channel_create(TICKET, Some(CATEGORY), ChannelType::Text);

        let msg = ticket_embed("Movie Name", "Zzzqqq123");
        watcher.on_message(&sink, TICKET, &msg).await;

        assert!(!watcher.is_watched(TICKET));
        assert_eq!(
            sink.sent(),
            vec![(TICKET, EnrichmentReply::NotFound { query: "Zzzqqq123".into() })]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn title_just_before_expiry_is_handled() {
        let (watcher, _) = watcher(FakeLookup::knowing(&["Dune"]));
        let sink = RecordingSink::default();
        watcher.on_channel_create(TICKET, Some(CATEGORY), ChannelType::Text);

        tokio::time::sleep(Duration::from_secs(119)).await;
        let msg = ticket_embed("Movie Name", "Dune");
        assert_eq!(
            watcher.on_message(&sink, TICKET, &msg).await,
            TicketOutcome::Enriched { title: "Dune".into() }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn expired_tickets_are_ignored() {
        let (watcher, lookup) = watcher(FakeLookup::knowing(&["Dune"]));
        let sink = RecordingSink::default();
        watcher.on_channel_create(TICKET, Some(CATEGORY), ChannelType::Text);

        tokio::time::sleep(Duration::from_secs(121)).await;
        let msg = ticket_embed("Movie Name", "Dune");
        assert_eq!(watcher.on_message(&sink, TICKET, &msg).await, TicketOutcome::Ignored);
        assert!(lookup.queries().is_empty());
        assert!(sink.sent().is_empty());
    }
}
