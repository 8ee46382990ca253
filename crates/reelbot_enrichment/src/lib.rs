use std::time::Duration;

use reelbot_media::{MediaLookup, MediaSummary};
use serenity::{all::ChannelId, async_trait};

pub mod extract;
pub mod forum;
pub mod registry;
pub mod sink;
pub mod ticket;

pub use extract::{extract, CandidateMessage, Extraction};
pub use forum::{ForumWatcher, ForumWatcherConfig};
pub use registry::WatchRegistry;
pub use sink::DiscordSink;
pub use ticket::{TicketOutcome, TicketWatcher, TicketWatcherConfig};

/// What gets posted back into a ticket channel or forum thread.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentReply {
    Found(Box<MediaSummary>),
    NotFound { query: String },
    Failed { query: String },
}

impl EnrichmentReply {
    /// Plain-text notice for replies that carry no summary.
    pub fn notice(&self) -> Option<String> {
        match self {
            EnrichmentReply::Found(_) => None,
            EnrichmentReply::NotFound { query } => {
                Some(format!("I couldn't find any results for \"{query}\". Please check the title."))
            }
            EnrichmentReply::Failed { .. } => {
                Some("Sorry, an unexpected error occurred while fetching data.".to_string())
            }
        }
    }
}

/// Where enrichment replies end up. Implemented for Discord by [`DiscordSink`].
#[async_trait]
pub trait EnrichmentSink: Send + Sync {
    async fn send(&self, channel_id: ChannelId, reply: &EnrichmentReply) -> anyhow::Result<()>;
}

/// Look `query` up and post whatever came out of it into `channel_id`.
///
/// Lookup failures and timeouts turn into a [`EnrichmentReply::Failed`] notice; a failure
/// to post is only logged.
#[tracing::instrument(skip_all, fields(channel_id = %channel_id, query = %query))]
pub async fn enrich(
    lookup: &dyn MediaLookup,
    sink: &dyn EnrichmentSink,
    channel_id: ChannelId,
    query: &str,
    timeout: Duration,
) -> EnrichmentReply {
    let reply = match tokio::time::timeout(timeout, lookup.lookup(query)).await {
        Ok(Ok(Some(summary))) => EnrichmentReply::Found(Box::new(summary)),
        Ok(Ok(None)) => {
            tracing::info!(query, "No media found for query");
            EnrichmentReply::NotFound { query: query.to_string() }
        }
        Ok(Err(err)) => {
            tracing::warn!(query, error.message = %err, "Media lookup failed");
            EnrichmentReply::Failed { query: query.to_string() }
        }
        Err(_) => {
            tracing::warn!(query, timeout_secs = timeout.as_secs(), "Media lookup timed out");
            EnrichmentReply::Failed { query: query.to_string() }
        }
    };

    if let Err(err) = sink.send(channel_id, &reply).await {
        tracing::error!(error.message = %err, "Failed to post enrichment reply: {:?}", err);
    }
    reply
}


#[cfg(test)]
mod tests {
    use super::*;
    use testing::{FakeLookup, RecordingSink};
    use tracing_test::traced_test;

    const CHANNEL: ChannelId = ChannelId::new(10);
    const TIMEOUT: Duration = Duration::from_secs(15);

    #[tokio::test(start_paused = true)]
    async fn found_titles_are_posted() {
        let lookup = FakeLookup::knowing(&["Dune"]);
        let sink = RecordingSink::default();
        let reply = enrich(&lookup, &sink, CHANNEL, "Dune", TIMEOUT).await;
        assert!(matches!(&reply, EnrichmentReply::Found(s) if s.title == "Dune"));
        assert_eq!(sink.sent(), vec![(CHANNEL, reply)]);
    }

    #[tokio::test(start_paused = true)]
    async fn errors_and_misses_become_notices() {
        let lookup = FakeLookup::default();
        let sink = RecordingSink::default();

        let reply = enrich(&lookup, &sink, CHANNEL, "Zzzqqq123", TIMEOUT).await;
        assert_eq!(reply, EnrichmentReply::NotFound { query: "Zzzqqq123".into() });
        assert!(reply.notice().unwrap().contains("\"Zzzqqq123\""));

        let reply = enrich(&lookup, &sink, CHANNEL, "boom", TIMEOUT).await;
        assert_eq!(reply, EnrichmentReply::Failed { query: "boom".into() });
        assert_eq!(sink.sent().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_lookups_time_out() {
        let lookup = FakeLookup::knowing(&["Dune"]).with_delay(Duration::from_secs(60));
        let sink = RecordingSink::default();
        let reply = enrich(&lookup, &sink, CHANNEL, "Dune", TIMEOUT).await;
        assert_eq!(reply, EnrichmentReply::Failed { query: "Dune".into() });
    }

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn failing_sink_is_logged() {
        let lookup = FakeLookup::knowing(&["Dune"]);
        let sink = RecordingSink { fail: true, ..Default::default() };
        enrich(&lookup, &sink, CHANNEL, "Dune", TIMEOUT).await;
        assert!(logs_contain("Failed to post enrichment reply"));
    }
}
