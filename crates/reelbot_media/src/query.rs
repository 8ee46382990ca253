use regex::Regex;

lazy_static::lazy_static! {
    static ref IMDB_ID: Regex = Regex::new(r"^tt\d+$").unwrap();
    static ref YEAR: Regex = Regex::new(r"\((\d{4})\)").unwrap();
    static ref YEAR_GROUP: Regex = Regex::new(r"\s*\(\d{4}\)\s*").unwrap();
}

/// A parsed user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaQuery {
    /// An IMDb title id such as `tt1375666`.
    ImdbId(String),
    /// Free text, optionally narrowed down by a `(YYYY)` release year.
    Search { text: String, year: Option<u16> },
}

impl MediaQuery {
    /// Parse a query. Returns `None` for blank input.
    ///
    /// `"Dune (2021)"` becomes a search for `"Dune"` restricted to 2021.
    pub fn parse(input: &str) -> Option<MediaQuery> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if IMDB_ID.is_match(input) {
            return Some(MediaQuery::ImdbId(input.to_string()));
        }

        let year = YEAR
            .captures(input)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u16>().ok());

        let query = match year {
            Some(year) => {
                let text = YEAR_GROUP.replace(input, " ").trim().to_string();
                if text.is_empty() {
                    MediaQuery::Search { text: input.to_string(), year: None }
                } else {
                    MediaQuery::Search { text, year: Some(year) }
                }
            }
            None => MediaQuery::Search { text: input.to_string(), year: None },
        };
        Some(query)
    }
}
