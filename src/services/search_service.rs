use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

pub const YOUTUBE_MAX_RESULTS: &str = "6";

const USER_AGENT: &str = concat!(
    "AiTutorServer/",
    env!("CARGO_PKG_VERSION"),
    " (contact@example.com)"
);

/// Thin proxy over the YouTube Data and Wikipedia search APIs.
pub struct SearchService {
    client: reqwest::Client,
    youtube_api_key: Option<SecretString>,
    youtube_api_base: String,
    wikipedia_api_base: String,
}

impl SearchService {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            youtube_api_key: config.youtube_api_key.clone(),
            youtube_api_base: config.youtube_api_base.trim_end_matches('/').to_string(),
            wikipedia_api_base: config.wikipedia_api_base.clone(),
        })
    }

    pub async fn search_videos(&self, query: &str) -> AppResult<Vec<Value>> {
        let query = require_query(query)?;
        let api_key = self.youtube_api_key.as_ref().ok_or_else(|| {
            AppError::InternalError(
                "YouTube API Key is missing in server configuration".to_string(),
            )
        })?;

        log::info!("YouTube search query: {}", query);

        let url = format!("{}/search", self.youtube_api_base);
        let params = [
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("maxResults", YOUTUBE_MAX_RESULTS),
            ("key", api_key.expose_secret()),
        ];

        let body = self.get_json(&url, &params).await.map_err(|e| {
            log::error!("YouTube API error: {}", e);
            AppError::InternalError("Failed to fetch videos from YouTube".to_string())
        })?;

        let items = youtube_items(&body);
        log::info!("YouTube found {} videos for: {}", items.len(), query);
        Ok(items)
    }

    pub async fn search_articles(&self, query: &str) -> AppResult<Vec<Value>> {
        let query = require_query(query)?;

        log::info!("Wikipedia search query: {}", query);

        let params = [
            ("action", "query"),
            ("format", "json"),
            ("origin", "*"),
            ("list", "search"),
            ("srsearch", query),
        ];

        let body = self
            .get_json(&self.wikipedia_api_base, &params)
            .await
            .map_err(|e| {
                log::error!("Wikipedia API error: {}", e);
                AppError::InternalError("Failed to fetch articles from Wikipedia".to_string())
            })?;

        let results = wikipedia_results(&body);
        log::info!("Wikipedia found {} results for: {}", results.len(), query);
        Ok(results)
    }

    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, reqwest::Error> {
        self.client
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }
}

fn require_query(query: &str) -> AppResult<&str> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::ValidationError(
            "Query parameter is required".to_string(),
        ));
    }
    Ok(query)
}

/// `items` of a YouTube search response, or nothing.
pub fn youtube_items(body: &Value) -> Vec<Value> {
    body.get("items")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// `query.search` of a Wikipedia search response, or nothing.
pub fn wikipedia_results(body: &Value) -> Vec<Value> {
    body.pointer("/query/search")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
