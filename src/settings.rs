use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

const ENV_PREFIX: &str = "REVIEWS";
const DEFAULT_CONFIG_FILE: &str = "reviews";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub top: usize,
    pub timeout_secs: u64,
    pub max_redirects: usize,
    pub user_agent: String,
    pub format: ReportFormat,
    /// Dealer review page base; expanded to `pages` page URLs when no URLs are given.
    pub dealer: Option<String>,
    pub pages: u32,
    /// JSON word -> polarity file merged over the built-in lexicon.
    pub lexicon: Option<PathBuf>,
}

impl Settings {
    /// Defaults, then `reviews.toml` (or `file`), then `REVIEWS_*` env vars.
    ///
    /// Not validated here: CLI overrides still apply on top, so callers run
    /// [`Settings::validate`] once every layer is in.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("top", 3)?
            .set_default("timeout_secs", 30)?
            .set_default("max_redirects", 10)?
            .set_default("user_agent", concat!("review_ranker/", env!("CARGO_PKG_VERSION")))?
            .set_default("format", "text")?
            .set_default("pages", 5)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be at least 1".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".into()));
        }
        Ok(())
    }

    /// The ordered page list for this run.
    pub fn page_urls(&self, explicit: &[String]) -> Result<Vec<String>, ConfigError> {
        if !explicit.is_empty() {
            return Ok(explicit.to_vec());
        }
        match &self.dealer {
            Some(base) if self.pages > 0 => Ok(dealer_page_urls(base, self.pages)),
            Some(_) => Err(ConfigError::Invalid("pages must be at least 1".into())),
            None => Err(ConfigError::Invalid(
                "no page URLs given; pass URLs or --dealer <URL>".into(),
            )),
        }
    }
}

/// `<base>/page<k>/?filter=ALL_REVIEWS#link` for k in 1..=pages.
pub fn dealer_page_urls(base: &str, pages: u32) -> Vec<String> {
    let base = base.trim_end_matches('/');
    (1..=pages)
        .map(|k| format!("{}/page{}/?filter=ALL_REVIEWS#link", base, k))
        .collect()
}
