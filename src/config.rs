use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_URL: &str = "https://myanimelist.net/anime/21/One_piece/reviews";
const CONFIG_FILE: &str = "anime_reviews";
const ENV_PREFIX: &str = "REVIEWS";

/// Runtime settings. Layered as defaults, then `anime_reviews.toml` in the
/// working directory (optional), then `REVIEWS_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub min_rating: f64,
    pub head: usize,
    pub block_selector: String,
    pub rating_selector: String,
    pub text_selector: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            min_rating: 8.0,
            head: 5,
            block_selector: "div.review-element".to_string(),
            rating_selector: "div.rating".to_string(),
            text_selector: "div.text".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::layered(Environment::with_prefix(ENV_PREFIX))
    }

    fn layered(env: Environment) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(env)
            .build()
            .context("Failed to read configuration")?;
        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self> {
        config
            .try_deserialize()
            .context("Invalid configuration values")
    }
}
