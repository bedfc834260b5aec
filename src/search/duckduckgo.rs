use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::{SearchError, SearchHit, WebSearch};

const HTML_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Keyless search against DuckDuckGo's HTML results page.
#[derive(Clone)]
pub struct DuckDuckGoClient {
    http: Client,
    endpoint: String,
    region: Option<String>,
}

impl DuckDuckGoClient {
    pub fn new(http: Client, region: Option<String>) -> Self {
        Self {
            http,
            endpoint: HTML_ENDPOINT.to_string(),
            region,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_endpoint(http: Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            region: None,
        }
    }

    fn search_url(&self, query: &str) -> Result<Url, SearchError> {
        let mut params = vec![("q", query)];
        if let Some(region) = &self.region {
            params.push(("kl", region.as_str()));
        }
        Url::parse_with_params(&self.endpoint, &params)
            .map_err(|e| SearchError::Parse(format!("bad endpoint: {e}")))
    }
}

impl WebSearch for DuckDuckGoClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let url = self.search_url(query)?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        let hits = parse_results(&html, max_results);
        debug!(hits = hits.len(), "duckduckgo results parsed");
        Ok(hits)
    }
}

/// Extracts organic results from the HTML page. Ads and entries without a link are skipped.
fn parse_results(html: &str, max_results: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let (Ok(result_sel), Ok(link_sel), Ok(snippet_sel)) = (
        Selector::parse("div.result"),
        Selector::parse("a.result__a"),
        Selector::parse(".result__snippet"),
    ) else {
        return Vec::new();
    };

    document
        .select(&result_sel)
        .filter(|result| !is_ad(result))
        .filter_map(|result| {
            let link = result.select(&link_sel).next()?;
            let url = resolve_href(link.value().attr("href")?)?;
            let body = result
                .select(&snippet_sel)
                .next()
                .map(|s| element_text(&s))
                .unwrap_or_default();
            Some(SearchHit {
                title: element_text(&link),
                body,
                url,
            })
        })
        .take(max_results)
        .collect()
}

fn is_ad(result: &ElementRef<'_>) -> bool {
    result.value().classes().any(|c| c == "result--ad")
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Result links go through a `/l/?uddg=<target>` redirect; unwrap it to the target URL.
fn resolve_href(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    let mut parsed = Url::parse(&absolute).ok()?;

    let redirect = parsed
        .path()
        .starts_with("/l/")
        .then(|| parsed.query_pairs().find(|(k, _)| k == "uddg"))
        .flatten()
        .map(|(_, target)| target.into_owned());
    if let Some(target) = redirect {
        parsed = Url::parse(&target).ok()?;
    }

    match parsed.scheme() {
        "http" | "https" => Some(parsed.to_string()),
        _ => None,
    }
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_success_parses_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/html/"))
            .and(query_param("q", "Trocaz pigeon"))
            .respond_with(ResponseTemplate::new(200).set_body_string(super::tests::SAMPLE))
            .mount(&server)
            .await;

        let client =
            DuckDuckGoClient::with_endpoint(Client::new(), &format!("{}/html/", server.uri()));
        let hits = client.search("Trocaz pigeon", 5).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn search_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/html/"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client =
            DuckDuckGoClient::with_endpoint(Client::new(), &format!("{}/html/", server.uri()));
        let result = client.search("Trocaz pigeon", 5).await;
        assert!(matches!(result, Err(SearchError::Status(403))));
    }
}
