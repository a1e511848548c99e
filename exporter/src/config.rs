use std::path::PathBuf;

use anyhow::{Context, Result};
use meetup_core::{ApiKey, DEFAULT_BASE_URL, DEFAULT_GROUP};

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub group: String,
    pub output: PathBuf,
}

impl ExportConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source. `MEETUP_API_KEY` is
    /// required and must not be blank; the rest fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = ApiKey::new(lookup("MEETUP_API_KEY").unwrap_or_default())
            .context("MEETUP_API_KEY must be set")?;
        Ok(Self {
            api_key,
            base_url: lookup("MEETUP_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            group: lookup("MEETUP_GROUP").unwrap_or_else(|| DEFAULT_GROUP.to_string()),
            output: lookup("MEETUP_EVENTS_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("events.csv")),
        })
    }
}
