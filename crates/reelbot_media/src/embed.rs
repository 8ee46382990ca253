use chrono::{NaiveDate, Utc};
use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::{
    format::{format_currency, format_release_date, format_runtime, NOT_AVAILABLE},
    MediaKind, MediaSummary,
};

pub const MEDIA_COLOR: u32 = 0x5f0005;
const TMDB_FOOTER: &str = "Powered by The Movie Database (TMDB)";
const TMDB_ICON: &str = "https://www.themoviedb.org/assets/2/v4/logos/v2/blue_square_2-d537fb228cf3ded9042015820c37f6af27cfd725480174cf28f2679d9e2fb42a.svg";

/// The `(name, value, inline)` triples shown for a summary.
pub fn summary_fields(summary: &MediaSummary, today: NaiveDate) -> Vec<(&'static str, String, bool)> {
    let runtime = match summary.kind {
        MediaKind::Movie => format_runtime(summary.runtime_minutes),
        MediaKind::Tv => summary
            .number_of_seasons
            .map(|n| format!("{n} Seasons"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    };

    vec![
        ("⭐ Rating", format!("{:.1}/10", summary.vote_average), true),
        ("🏆 Popularity", format!("#{}", summary.popularity.round() as i64), true),
        ("🗣️ Language", language(&summary.original_language), true),
        ("💰 Budget", format_currency(summary.budget), true),
        ("📈 Box Office", format_currency(summary.revenue), true),
        (
            "🎬 Director",
            summary.director.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            true,
        ),
        ("⏳ Runtime", runtime, true),
        ("🎭 Genres", summary.genre_list().unwrap_or_else(|| NOT_AVAILABLE.to_string()), false),
        ("🗓️ Release Date", format_release_date(summary.release_date, today), false),
    ]
}

/// Discord rejects embeds with an empty field value.
fn language(code: &str) -> String {
    match code.trim() {
        "" => NOT_AVAILABLE.to_string(),
        code => code.to_uppercase(),
    }
}

/// Render a summary as the standard media info embed.
pub fn media_embed(summary: &MediaSummary) -> CreateEmbed {
    let mut e = CreateEmbed::new()
        .colour(MEDIA_COLOR)
        .title(summary.display_title())
        .url(summary.url())
        .description(
            summary
                .overview
                .clone()
                .filter(|o| !o.trim().is_empty())
                .unwrap_or_else(|| "No synopsis available.".to_string()),
        )
        .fields(summary_fields(summary, Utc::now().date_naive()))
        .footer(CreateEmbedFooter::new(TMDB_FOOTER).icon_url(TMDB_ICON));

    if let Some(poster) = summary.poster_url() {
        e = e.thumbnail(poster);
    }
    if let Some(backdrop) = summary.backdrop_url() {
        e = e.image(backdrop);
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::sample_movie;

    fn field<'a>(fields: &'a [(&'static str, String, bool)], name: &str) -> &'a str {
        fields.iter().find(|(n, _, _)| *n == name).map(|(_, v, _)| v.as_str()).unwrap()
    }

    #[test]
    fn movie_fields_are_rendered() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let fields = summary_fields(&sample_movie(), today);
        assert_eq!(field(&fields, "⭐ Rating"), "8.4/10");
        assert_eq!(field(&fields, "🏆 Popularity"), "#84");
        assert_eq!(field(&fields, "🗣️ Language"), "EN");
        assert_eq!(field(&fields, "💰 Budget"), "$160,000,000");
        assert_eq!(field(&fields, "⏳ Runtime"), "2h 28m");
        assert_eq!(field(&fields, "🎭 Genres"), "Action, Science Fiction");
        assert_eq!(field(&fields, "🗓️ Release Date"), "July 15, 2010 (16 years ago)");
    }

    #[test]
    fn series_show_season_count() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let mut series = sample_movie();
        series.kind = MediaKind::Tv;
        series.runtime_minutes = None;
        series.number_of_seasons = Some(9);
        series.genres.clear();
        series.director = None;
        series.original_language = String::new();
        let fields = summary_fields(&series, today);
        assert_eq!(field(&fields, "⏳ Runtime"), "9 Seasons");
        assert_eq!(field(&fields, "🎭 Genres"), "N/A");
        assert_eq!(field(&fields, "🎬 Director"), "N/A");
        assert_eq!(field(&fields, "🗣️ Language"), "N/A");
    }
}
