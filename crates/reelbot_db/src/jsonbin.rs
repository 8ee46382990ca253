use anyhow::{Context, Result};
use serde::Deserialize;
use serenity::async_trait;

use crate::{Settings, SettingsStore};

const JSONBIN_API: &str = "https://api.jsonbin.io/v3";

/// [`SettingsStore`] backed by a single jsonbin.io bin.
#[derive(Debug, Clone)]
pub struct JsonBinStore {
    http: reqwest::Client,
    bin_id: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct LatestBin {
    #[serde(default)]
    record: serde_json::Value,
}

impl JsonBinStore {
    pub fn new(bin_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            bin_id: bin_id.into(),
            api_key: api_key.into(),
        }
    }

    fn bin_url(&self) -> String {
        format!("{JSONBIN_API}/b/{}", self.bin_id)
    }
}

/// A fresh bin holds `null` or `{}`, neither of which counts as a settings document.
fn parse_record(record: serde_json::Value) -> Result<Option<Settings>> {
    match &record {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(map) if map.is_empty() => Ok(None),
        _ => Ok(Some(serde_json::from_value(record).context("Malformed settings document")?)),
    }
}

#[async_trait]
impl SettingsStore for JsonBinStore {
    #[tracing::instrument(skip_all, fields(jsonbin.bin_id = %self.bin_id))]
    async fn get(&self) -> Result<Option<Settings>> {
        let latest: LatestBin = self
            .http
            .get(format!("{}/latest", self.bin_url()))
            .header("X-Master-Key", &self.api_key)
            .send()
            .await
            .context("Failed to request settings document")?
            .error_for_status()
            .context("Settings store rejected the request")?
            .json()
            .await
            .context("Failed to decode settings document")?;
        parse_record(latest.record)
    }

    #[tracing::instrument(skip_all, fields(jsonbin.bin_id = %self.bin_id))]
    async fn save(&self, settings: &Settings) -> Result<()> {
        self.http
            .put(self.bin_url())
            .header("X-Master-Key", &self.api_key)
            .json(settings)
            .send()
            .await
            .context("Failed to send settings document")?
            .error_for_status()
            .context("Settings store rejected the update")?;
        tracing::debug!("Saved settings document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_bins_have_no_settings() {
        assert_eq!(parse_record(json!(null)).unwrap(), None);
        assert_eq!(parse_record(json!({})).unwrap(), None);
    }

    #[test]
    fn records_are_decoded() {
        let record = json!({"enabled": false, "channelId": null, "emojis": ["😄", "👎"]});
        let settings = parse_record(record).unwrap().unwrap();
        assert_eq!(settings.emojis, vec!["😄", "👎"]);
    }

    #[test]
    fn malformed_records_are_errors() {
        assert!(parse_record(json!({"enabled": "yes"})).is_err());
    }
}
