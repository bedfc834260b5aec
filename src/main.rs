mod config;
mod document;
mod filename;
mod lang;
mod llm;
mod report;
mod search;
mod summary;
mod text;

pub const USER_AGENT: &str = concat!("factcheck/", env!("CARGO_PKG_VERSION"));

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::info;

use config::Config;
use document::Excerpt;
use lang::Language;
use report::FactChecker;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a bilingual fact-check report for a question about the Trocaz pigeon.
///
/// Configuration is read from the environment (and `.env`): USE_WEB_SEARCH,
/// WEB_SEARCH_PROVIDER, TAVILY_API_KEY, DUCKDUCKGO_REGION, QWEN_MODEL_NAME,
/// DASHSCOPE_API_KEY, DASHSCOPE_BASE_URL.
#[derive(Parser, Debug)]
#[command(name = "factcheck", version, about)]
struct Cli {
    /// The user's question
    #[arg(long, short)]
    question: String,

    /// The AI-generated answer to fact-check
    #[arg(long, short, required_unless_present = "answer_file", conflicts_with = "answer_file")]
    answer: Option<String>,

    /// Read the AI-generated answer from a file instead
    #[arg(long)]
    answer_file: Option<PathBuf>,

    /// JSON array of retrieved documents: [{"page_content": "...", "metadata": {"source_file": "...", "page": 1}}]
    #[arg(long, short)]
    docs: Option<PathBuf>,

    /// Report language: "English" (default) or "Portuguese"
    #[arg(long, short, default_value = "English")]
    language: Language,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid documents file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_excerpts(path: Option<&Path>) -> Result<Vec<Excerpt>, CliError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = read_file(path)?;
    serde_json::from_str(&raw).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("factcheck=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let ai_answer = match (&cli.answer, &cli.answer_file) {
        (Some(answer), _) => answer.clone(),
        (None, Some(path)) => read_file(path)?,
        (None, None) => String::new(),
    };
    let excerpts = load_excerpts(cli.docs.as_deref())?;

    let config = Config::from_env();
    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    info!(
        excerpts = excerpts.len(),
        language = ?cli.language,
        web_search = config.web_search.enabled,
        model = %config.llm.model,
        "generating fact-check report"
    );

    let checker = FactChecker::from_config(http, &config);
    let report = checker
        .generate(&cli.question, &excerpts, &ai_answer, cli.language)
        .await;

    println!("{report}");
    Ok(())
}
