use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{SearchError, SearchHit, WebSearch};
use crate::config::Secret;

const API_URL: &str = "https://api.tavily.com/search";

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Option<Vec<TavilyResult>>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl From<TavilyResult> for SearchHit {
    fn from(r: TavilyResult) -> Self {
        SearchHit {
            title: r.title.unwrap_or_else(|| "Unknown".to_string()),
            body: r.content.unwrap_or_default(),
            url: r.url.unwrap_or_default(),
        }
    }
}

/// Credentialed search via the Tavily API. Only built when a real key is configured.
#[derive(Clone)]
pub struct TavilyClient {
    http: Client,
    api_key: Secret,
    url: String,
}

impl TavilyClient {
    pub fn new(http: Client, api_key: &str) -> Self {
        Self {
            http,
            api_key: Secret::new(api_key),
            url: API_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_url(http: Client, url: &str) -> Self {
        Self {
            http,
            api_key: Secret::new("tvly-test"),
            url: url.to_string(),
        }
    }
}

impl WebSearch for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let request = SearchRequest {
            query,
            max_results,
            search_depth: "basic",
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;
        let results = body
            .results
            .ok_or_else(|| SearchError::Parse("missing `results` field".to_string()))?;

        debug!(hits = results.len(), "tavily results received");
        Ok(results
            .into_iter()
            .take(max_results)
            .map(SearchHit::from)
            .collect())
    }
}
