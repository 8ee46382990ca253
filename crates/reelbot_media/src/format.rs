use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

pub const NOT_AVAILABLE: &str = "N/A";

/// Format a dollar amount with thousands separators. Zero counts as unknown.
pub fn format_currency(amount: Option<u64>) -> String {
    match amount {
        None | Some(0) => NOT_AVAILABLE.to_string(),
        Some(amount) => {
            let digits = amount.to_string().chars().collect_vec();
            let grouped = digits
                .rchunks(3)
                .rev()
                .map(|chunk| chunk.iter().collect::<String>())
                .join(",");
            format!("${grouped}")
        }
    }
}

/// Format a runtime in minutes as `2h 28m`.
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        None | Some(0) => NOT_AVAILABLE.to_string(),
        Some(minutes) => format!("{}h {}m", minutes / 60, minutes % 60),
    }
}

/// Format a release date as `July 16, 2010 (16 years ago)`, relative to `today`.
pub fn format_release_date(date: Option<NaiveDate>, today: NaiveDate) -> String {
    match date {
        None => NOT_AVAILABLE.to_string(),
        Some(date) => {
            let years = today.year() - date.year();
            format!("{} ({} years ago)", date.format("%B %-d, %Y"), years)
        }
    }
}
