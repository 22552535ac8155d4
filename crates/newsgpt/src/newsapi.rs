//! Client for the newsapi.org top headlines endpoint
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::headlines::{Category, HeadlineQuery};

pub const NEWSAPI_HOST: &str = "https://newsapi.org";
/// Returned to the model whenever the upstream reports a failure
pub const NO_ARTICLES: &str = "No articles found";

/// Something that can look up top headlines
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Returns the articles as a JSON array, or `NO_ARTICLES` when the upstream reports an
    /// error. Only transport failures are returned as `Err`.
    async fn top_headlines(&self, query: &HeadlineQuery) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    pub host: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeadlinesResponse {
    status: String,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    articles: Vec<Value>,
    #[serde(default)]
    message: Option<String>,
}

pub struct NewsApiClient {
    client: Client,
    config: NewsApiConfig,
}

impl NewsApiClient {
    pub fn new(config: NewsApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .build()?;

        Ok(Self { client, config })
    }

    fn params(query: &HeadlineQuery) -> Vec<(&'static str, String)> {
        let category = query.category.unwrap_or(Category::General);
        let mut params = vec![("category", category.to_string())];
        if let Some(q) = &query.query {
            params.push(("q", q.clone()));
        }
        if let Some(country) = &query.country {
            params.push(("country", country.clone()));
        }
        params
    }
}

#[async_trait]
impl HeadlineSource for NewsApiClient {
    async fn top_headlines(&self, query: &HeadlineQuery) -> Result<String> {
        let url = format!(
            "{}/v2/top-headlines",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .query(&Self::params(query))
            .send()
            .await?;

        // newsapi.org reports failures in the body, whatever the status code
        let data: HeadlinesResponse = response.json().await?;

        if data.status == "ok" {
            tracing::info!(
                "Processing {} articles from newsapi.org",
                data.total_results.unwrap_or(data.articles.len() as u64)
            );
            Ok(serde_json::to_string(&data.articles)?)
        } else {
            tracing::warn!(
                "Request failed with message: {}",
                data.message.as_deref().unwrap_or("unknown error")
            );
            Ok(NO_ARTICLES.to_string())
        }
    }
}
