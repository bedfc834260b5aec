//! Web search: query building, result screening, provider clients, and the supplement section.

pub mod duckduckgo;
pub mod filter;
pub mod query;
pub mod supplement;
pub mod tavily;

pub use duckduckgo::DuckDuckGoClient;
pub use supplement::web_search_supplement;
pub use tavily::TavilyClient;

/// One web result, normalized across providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub body: String,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search failed: status {0}")]
    Status(u16),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Abstraction over a web search backend.
/// Implemented by `DuckDuckGoClient` and `TavilyClient`; mock implementations used in tests.
pub trait WebSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}
