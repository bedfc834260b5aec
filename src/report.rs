use reqwest::Client;
use tracing::info;

use crate::config::{Config, WebSearchSettings};
use crate::document::Excerpt;
use crate::lang::Language;
use crate::llm::{DashScopeClient, Summarizer};
use crate::search::{DuckDuckGoClient, TavilyClient, WebSearch, web_search_supplement};
use crate::summary::summarize_fact_check;

/// Builds fact-check reports from a summarizer and up to two search providers.
pub struct FactChecker<L, P, S> {
    llm: L,
    primary: P,
    secondary: Option<S>,
    web_search: WebSearchSettings,
}

impl FactChecker<DashScopeClient, DuckDuckGoClient, TavilyClient> {
    /// Production wiring. Tavily is only set up when a real key is configured.
    pub fn from_config(http: Client, config: &Config) -> Self {
        let web = &config.web_search;
        let secondary = web
            .usable_tavily_key()
            .map(|key| TavilyClient::new(http.clone(), key));
        Self {
            llm: DashScopeClient::new(http.clone(), &config.llm),
            primary: DuckDuckGoClient::new(http, web.duckduckgo_region.clone()),
            secondary,
            web_search: web.clone(),
        }
    }
}

impl<L: Summarizer, P: WebSearch, S: WebSearch> FactChecker<L, P, S> {
    #[cfg(test)]
    pub(crate) fn new(llm: L, primary: P, secondary: Option<S>, web_search: WebSearchSettings) -> Self {
        Self {
            llm,
            primary,
            secondary,
            web_search,
        }
    }

    /// Summary first, then the optional web section, under a bilingual header.
    pub async fn generate(
        &self,
        question: &str,
        excerpts: &[Excerpt],
        ai_answer: &str,
        language: Language,
    ) -> String {
        let summary = summarize_fact_check(&self.llm, question, excerpts, ai_answer, language).await;

        let web = web_search_supplement(
            &self.web_search,
            &self.primary,
            self.secondary.as_ref(),
            question,
            excerpts,
            language,
        )
        .await;

        info!(web_section = web.is_some(), "fact-check report assembled");
        assemble(&summary, web.as_deref(), language)
    }
}

fn assemble(summary: &str, web: Option<&str>, language: Language) -> String {
    let header = language.pick(
        "📋 **Fact-Check Based on Scientific Knowledge**\n\n",
        "📋 **Verificação de Factos Baseada em Conhecimento Científico**\n\n",
    );

    let mut content = format!("{header}{summary}");
    if let Some(web) = web {
        content.push_str("\n\n---\n\n");
        content.push_str(web);
    }
    content
}
