use chrono::{Datelike, NaiveDate};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment used by TMDB for this kind of media.
    pub fn as_path(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }

    pub fn from_media_type(media_type: &str) -> Option<MediaKind> {
        match media_type {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Tv),
            _ => None,
        }
    }
}

/// Normalized view of a movie or series, independent of the TMDB wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSummary {
    pub kind: MediaKind,
    pub tmdb_id: u64,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub imdb_id: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f64,
    pub popularity: f64,
    pub original_language: String,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub director: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub number_of_seasons: Option<u32>,
    pub genres: Vec<String>,
}

impl MediaSummary {
    pub fn year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    /// `Title (2010)`, or `Title (N/A)` when the release date is unknown.
    pub fn display_title(&self) -> String {
        match self.year() {
            Some(year) => format!("{} ({})", self.title, year),
            None => format!("{} (N/A)", self.title),
        }
    }

    /// IMDb page if the id is known, TMDB page otherwise.
    pub fn url(&self) -> String {
        match &self.imdb_id {
            Some(imdb_id) => format!("https://www.imdb.com/title/{imdb_id}/"),
            None => format!("https://www.themoviedb.org/{}/{}", self.kind.as_path(), self.tmdb_id),
        }
    }

    pub fn poster_url(&self) -> Option<String> {
        self.poster_path.as_ref().map(|p| format!("{IMAGE_BASE}/w500{p}"))
    }

    pub fn backdrop_url(&self) -> Option<String> {
        self.backdrop_path.as_ref().map(|p| format!("{IMAGE_BASE}/w1280{p}"))
    }

    pub fn genre_list(&self) -> Option<String> {
        if self.genres.is_empty() {
            None
        } else {
            Some(self.genres.join(", "))
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_movie() -> MediaSummary {
    MediaSummary {
        kind: MediaKind::Movie,
        tmdb_id: 27205,
        title: "Inception".to_string(),
        release_date: NaiveDate::from_ymd_opt(2010, 7, 15),
        imdb_id: Some("tt1375666".to_string()),
        overview: Some("Cobb, a skilled thief...".to_string()),
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: None,
        vote_average: 8.369,
        popularity: 83.52,
        original_language: "en".to_string(),
        budget: Some(160_000_000),
        revenue: Some(825_532_764),
        director: Some("Christopher Nolan".to_string()),
        runtime_minutes: Some(148),
        number_of_seasons: None,
        genres: vec!["Action".to_string(), "Science Fiction".to_string()],
    }
}
