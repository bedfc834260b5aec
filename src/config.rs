use std::env;
use std::fmt;

use tracing::debug;

pub const DEFAULT_MODEL: &str = "qwen-turbo";
pub const DEFAULT_DASHSCOPE_BASE: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
/// Value shipped in the sample `.env`; treated the same as no key.
pub const TAVILY_PLACEHOLDER_KEY: &str = "tvly-your-api-key";

/// Which search backend is tried first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchProvider {
    /// Keyless HTML search, falls back to Tavily when it yields nothing.
    #[default]
    DuckDuckGo,
    Tavily,
    Unsupported(String),
}

impl SearchProvider {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "duckduckgo" => SearchProvider::DuckDuckGo,
            "tavily" => SearchProvider::Tavily,
            other => SearchProvider::Unsupported(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone, Default)]
pub struct WebSearchSettings {
    pub enabled: bool,
    pub provider: SearchProvider,
    pub tavily_api_key: Option<Secret>,
    /// DuckDuckGo `kl` region code such as `pt-pt`.
    pub duckduckgo_region: Option<String>,
}

impl WebSearchSettings {
    /// The Tavily key, unless it is missing or still the sample placeholder.
    pub fn usable_tavily_key(&self) -> Option<&str> {
        self.tavily_api_key
            .as_ref()
            .map(Secret::expose)
            .filter(|k| *k != TAVILY_PLACEHOLDER_KEY)
    }
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub model: String,
    pub api_key: Option<Secret>,
    pub base_url: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_DASHSCOPE_BASE.to_string(),
        }
    }
}

/// Runtime configuration, read once at startup and passed down explicitly.
///
/// Environment variables:
/// - `USE_WEB_SEARCH`: `true` enables the web section (default: off)
/// - `WEB_SEARCH_PROVIDER`: `duckduckgo` (default) or `tavily`
/// - `TAVILY_API_KEY`: enables the Tavily provider
/// - `DUCKDUCKGO_REGION`: optional DuckDuckGo region code
/// - `QWEN_MODEL_NAME`: summarization model (default: `qwen-turbo`)
/// - `DASHSCOPE_API_KEY`: summarization credential
/// - `DASHSCOPE_BASE_URL`: OpenAI-compatible endpoint override
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub web_search: WebSearchSettings,
    pub llm: LlmSettings,
}

impl Config {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let web_search = WebSearchSettings {
            enabled: get("USE_WEB_SEARCH").is_some_and(|v| v.eq_ignore_ascii_case("true")),
            provider: get("WEB_SEARCH_PROVIDER")
                .map(|p| SearchProvider::parse(&p))
                .unwrap_or_default(),
            tavily_api_key: get("TAVILY_API_KEY").map(Secret::new),
            duckduckgo_region: get("DUCKDUCKGO_REGION"),
        };

        let llm = LlmSettings {
            model: get("QWEN_MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: get("DASHSCOPE_API_KEY").map(Secret::new),
            base_url: get("DASHSCOPE_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_DASHSCOPE_BASE.to_string()),
        };

        Self { web_search, llm }
    }
}
