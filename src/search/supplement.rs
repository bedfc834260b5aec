use tracing::{debug, info, warn};

use super::filter::filter_search_results;
use super::query::optimize_search_query;
use super::{SearchError, SearchHit, WebSearch};
use crate::config::{SearchProvider, WebSearchSettings};
use crate::document::Excerpt;
use crate::lang::Language;
use crate::text::{single_line, truncate_chars};

const PRIMARY_MAX_RESULTS: usize = 5;
const SECONDARY_MAX_RESULTS: usize = 2;
const SHOWN_RESULTS: usize = 2;
const SNIPPET_CHARS: usize = 150;

/// Result of asking one provider for hits.
#[derive(Debug)]
pub enum ProviderOutcome {
    Found(Vec<SearchHit>),
    Unavailable(String),
    Failed(String),
}

impl From<Result<Vec<SearchHit>, SearchError>> for ProviderOutcome {
    fn from(result: Result<Vec<SearchHit>, SearchError>) -> Self {
        match result {
            Ok(hits) => ProviderOutcome::Found(hits),
            Err(e) => ProviderOutcome::Failed(e.to_string()),
        }
    }
}

/// Best-effort web section for the report.
///
/// Returns `None` when search is disabled, the provider is unknown, or no provider produced
/// anything. DuckDuckGo results are screened by the relevance filter; when that leaves nothing
/// (or the request fails) Tavily is tried next, if a key is configured.
pub async fn web_search_supplement(
    settings: &WebSearchSettings,
    primary: &impl WebSearch,
    secondary: Option<&impl WebSearch>,
    question: &str,
    excerpts: &[Excerpt],
    language: Language,
) -> Option<String> {
    if !settings.enabled {
        debug!("web search disabled");
        return None;
    }

    let query = if excerpts.is_empty() {
        format!("trocaz pigeon {question} bird")
    } else {
        let optimized = optimize_search_query(question, excerpts);
        info!(query = %optimized, "optimized search query");
        optimized
    };

    match &settings.provider {
        SearchProvider::DuckDuckGo => {
            match search_primary(primary, &query, question).await {
                ProviderOutcome::Found(hits) if !hits.is_empty() => {
                    return Some(format_hits(&hits, language));
                }
                outcome => log_outcome("duckduckgo", &outcome),
            }
            info!(provider = "tavily", "primary search produced nothing, trying fallback");
        }
        SearchProvider::Tavily => {}
        SearchProvider::Unsupported(name) => {
            warn!(provider = %name, "unsupported web search provider");
            return None;
        }
    }

    match search_secondary(secondary, question).await {
        ProviderOutcome::Found(hits) if !hits.is_empty() => Some(format_hits(&hits, language)),
        outcome => {
            log_outcome("tavily", &outcome);
            None
        }
    }
}

async fn search_primary(primary: &impl WebSearch, query: &str, question: &str) -> ProviderOutcome {
    match primary.search(query, PRIMARY_MAX_RESULTS).await {
        Ok(raw) => {
            let raw_count = raw.len();
            let kept = filter_search_results(raw, question);
            info!(raw = raw_count, kept = kept.len(), "filtered duckduckgo results");
            ProviderOutcome::Found(kept)
        }
        Err(e) => Err::<Vec<SearchHit>, _>(e).into(),
    }
}

async fn search_secondary(secondary: Option<&impl WebSearch>, question: &str) -> ProviderOutcome {
    let Some(client) = secondary else {
        return ProviderOutcome::Unavailable("TAVILY_API_KEY not configured".to_string());
    };
    let query = format!("trocaz pigeon {question}");
    client.search(&query, SECONDARY_MAX_RESULTS).await.into()
}

fn log_outcome(provider: &str, outcome: &ProviderOutcome) {
    match outcome {
        ProviderOutcome::Found(_) => info!(provider, "no usable results"),
        ProviderOutcome::Unavailable(reason) => debug!(provider, reason = %reason, "provider skipped"),
        ProviderOutcome::Failed(reason) => warn!(provider, reason = %reason, "web search failed"),
    }
}

/// Renders the first hits as a numbered list under the language's header.
pub fn format_hits(hits: &[SearchHit], language: Language) -> String {
    let mut out = String::from(language.pick(
        "🌐 **Internet Information:**\n\n",
        "🌐 **Informação da Internet:**\n\n",
    ));

    for (i, hit) in hits.iter().take(SHOWN_RESULTS).enumerate() {
        let title = if hit.title.trim().is_empty() {
            "Unknown".to_string()
        } else {
            single_line(&hit.title)
        };
        let snippet = truncate_chars(&hit.body, SNIPPET_CHARS);
        out.push_str(&format!(
            "{}. **{title}**\n   {snippet}...\n   🔗 {}\n\n",
            i + 1,
            hit.url
        ));
    }

    out.trim().to_string()
}
