use anyhow::{anyhow, Context, Result};

/// return with an error value immediately.
#[macro_export]
macro_rules! abort_with {
    ($err:literal) => {
        return Err(UserErr::other($err).into())
    };
    ($err:expr) => {
        return Err($err.into())
    };
}

/// If the result of the given code is an error, log it nicely. Otherwise just ignore the value.
#[macro_export]
macro_rules! log_error {
    ($e:expr) => {
        if let Err(e) = $e {
            let e = ::anyhow::anyhow!(e);
            tracing::error!(
                error.message = %&e,
                error.root_cause = %e.root_cause(),
                "{:?}",
                e
            );
        }
    };
    ($context:expr, $e:expr $(,)?) => {
        if let Err(e) = $e {
            let e = ::anyhow::anyhow!(e).context($context);
            tracing::error!(
                error.message = %&e,
                error.root_cause = %e.root_cause(),
                "{:?}",
                e
            );
        }
    };
}

/// Cut `text` down to at most `max_len` bytes, marking the cut with `...`.
pub fn ellipsis_text(text: &str, max_len: usize) -> String {
    if text.len() > max_len {
        let mut cutoff = max_len.saturating_sub(3);
        while !text.is_char_boundary(cutoff) {
            cutoff -= 1;
        }
        format!("{}...", text.split_at(cutoff).0)
    } else {
        text.to_string()
    }
}

/// Get a variable from `vars`, returning an Err with a
/// nice error message mentioning the missing variable in case the value is not found.
pub fn required_env_var(vars: impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    vars(key)
        .filter(|x| !x.trim().is_empty())
        .with_context(|| format!("Missing environment variable {}", key))
}

/// Parse an optional variable with FromStr. A missing or empty variable is `Ok(None)`.
pub fn parse_optional_env_var<E, T>(
    vars: impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>>
where
    E: Into<anyhow::Error>,
    T: std::str::FromStr<Err = E>,
{
    match vars(key).filter(|x| !x.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: E| anyhow!(e))
            .with_context(|| format!("Failed to parse env-var {}", key)),
        None => Ok(None),
    }
}

/// Format a date into a discord relative-time timestamp.
pub fn format_date_ago(date: chrono::DateTime<chrono::Utc>) -> String {
    format!("<t:{}:R>", date.timestamp())
}

/// Format a date into a discord absolute-time timestamp.
pub fn format_date(date: chrono::DateTime<chrono::Utc>) -> String {
    format!("<t:{}>", date.timestamp())
}

/// Format a date, showing both the concrete date and the "n days ago"-format.
pub fn format_date_detailed(date: chrono::DateTime<chrono::Utc>) -> String {
    format!("{} ({})", format_date(date), format_date_ago(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn ellipsis_respects_char_boundaries() {
        assert_eq!(ellipsis_text("short", 10), "short");
        assert_eq!(ellipsis_text("abcdefghij", 8), "abcde...");
        assert_eq!(ellipsis_text("ééééé", 8), "éé...");
    }

    #[test]
    fn env_var_helpers() {
        let vars = vars(&[("PORT", " 8080 "), ("EMPTY", "  "), ("BAD", "abc")]);
        assert_eq!(parse_optional_env_var::<_, u16>(&vars, "PORT").unwrap(), Some(8080));
        assert!(required_env_var(&vars, "EMPTY").is_err());
        assert!(required_env_var(&vars, "MISSING").is_err());
        assert_eq!(parse_optional_env_var::<_, u16>(&vars, "EMPTY").unwrap(), None);
        assert!(parse_optional_env_var::<_, u16>(&vars, "BAD").is_err());
    }

    #[test]
    fn discord_timestamps() {
        let date = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(format_date_detailed(date), "<t:1700000000> (<t:1700000000:R>)");
    }
}
