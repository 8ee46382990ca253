//! Movie and TV metadata lookups.
//!
//! Everything that talks to the media database lives here: parsing a free-text
//! query, querying TMDB, and turning the result into a [`MediaSummary`] that the
//! rest of the bot renders with [`embed::media_embed`].

use serenity::async_trait;

pub mod embed;
pub mod format;
pub mod query;
pub mod summary;
pub mod tmdb;

pub use query::MediaQuery;
pub use summary::{MediaKind, MediaSummary};
pub use tmdb::TmdbClient;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Request to the media database failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Empty media query")]
    EmptyQuery,
}

/// Something that can resolve a free-text title (or IMDb id) into a [`MediaSummary`].
///
/// `Ok(None)` means the lookup went through but nothing matched.
#[async_trait]
pub trait MediaLookup: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<Option<MediaSummary>, MediaError>;
}
