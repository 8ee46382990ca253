use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize};
use serenity::async_trait;

use crate::{MediaError, MediaKind, MediaLookup, MediaQuery, MediaSummary};

const TMDB_API: &str = "https://api.themoviedb.org/3";

/// Client for the TMDB v3 API.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), api_key: api_key.into() }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MediaError> {
        let response = self
            .http
            .get(format!("{TMDB_API}/{path}"))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<Option<Hit>, MediaError> {
        let found: FindResponse =
            self.get(&format!("find/{imdb_id}"), &[("external_source", "imdb_id")]).await?;
        Ok(found.first_hit())
    }

    async fn search(&self, text: &str, year: Option<u16>) -> Result<Option<Hit>, MediaError> {
        let year = year.map(|y| y.to_string());
        let mut params = vec![("query", text)];
        if let Some(year) = year.as_deref() {
            params.push(("year", year));
        }
        let found: SearchResponse = self.get("search/multi", &params).await?;
        Ok(found.first_hit())
    }

    async fn details(&self, hit: Hit) -> Result<MediaSummary, MediaError> {
        let details: Details = self
            .get(
                &format!("{}/{}", hit.kind.as_path(), hit.id),
                &[("append_to_response", "credits,external_ids")],
            )
            .await?;
        Ok(details.into_summary(hit.kind))
    }
}

#[async_trait]
impl MediaLookup for TmdbClient {
    #[tracing::instrument(skip(self))]
    async fn lookup(&self, query: &str) -> Result<Option<MediaSummary>, MediaError> {
        let parsed = MediaQuery::parse(query).ok_or(MediaError::EmptyQuery)?;
        tracing::debug!(media.query = ?parsed, "Looking up media");

        let hit = match &parsed {
            MediaQuery::ImdbId(imdb_id) => self.find_by_imdb_id(imdb_id).await?,
            MediaQuery::Search { text, year } => self.search(text, *year).await?,
        };
        let Some(hit) = hit else {
            tracing::info!(media.query = %query, "No media found");
            return Ok(None);
        };

        let summary = self.details(hit).await?;
        tracing::info!(
            media.query = %query,
            media.tmdb_id = summary.tmdb_id,
            media.title = %summary.title,
            "Found media for query"
        );
        Ok(Some(summary))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hit {
    id: u64,
    kind: MediaKind,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: u64,
    media_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

impl SearchResponse {
    /// First result that is a movie or a series; people are skipped.
    fn first_hit(&self) -> Option<Hit> {
        self.results.iter().find_map(|r| {
            let kind = MediaKind::from_media_type(r.media_type.as_deref()?)?;
            Some(Hit { id: r.id, kind })
        })
    }
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    movie_results: Vec<SearchResult>,
    #[serde(default)]
    tv_results: Vec<SearchResult>,
}

impl FindResponse {
    fn first_hit(&self) -> Option<Hit> {
        self.movie_results
            .first()
            .map(|r| Hit { id: r.id, kind: MediaKind::Movie })
            .or_else(|| self.tv_results.first().map(|r| Hit { id: r.id, kind: MediaKind::Tv }))
    }
}

#[derive(Debug, Deserialize)]
struct Genre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CrewMember {
    name: String,
    job: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Credits {
    #[serde(default)]
    crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
struct ExternalIds {
    imdb_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Details {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    popularity: f64,
    #[serde(default)]
    original_language: String,
    budget: Option<u64>,
    revenue: Option<u64>,
    runtime: Option<u32>,
    number_of_seasons: Option<u32>,
    #[serde(default)]
    genres: Vec<Genre>,
    credits: Option<Credits>,
    external_ids: Option<ExternalIds>,
}

impl Details {
    fn into_summary(self, kind: MediaKind) -> MediaSummary {
        let (title, date) = match kind {
            MediaKind::Movie => (self.title.or(self.name), self.release_date),
            MediaKind::Tv => (self.name.or(self.title), self.first_air_date),
        };
        let release_date =
            date.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok());
        let director = self
            .credits
            .unwrap_or_default()
            .crew
            .into_iter()
            .find(|c| c.job.as_deref() == Some("Director"))
            .map(|c| c.name);

        MediaSummary {
            kind,
            tmdb_id: self.id,
            title: title.unwrap_or_default(),
            release_date,
            imdb_id: self.external_ids.and_then(|x| x.imdb_id).filter(|id| !id.is_empty()),
            overview: self.overview,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average,
            popularity: self.popularity,
            original_language: self.original_language,
            budget: self.budget,
            revenue: self.revenue,
            director,
            runtime_minutes: self.runtime,
            number_of_seasons: self.number_of_seasons,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}
