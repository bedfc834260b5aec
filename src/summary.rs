use tracing::{info, warn};

use crate::document::Excerpt;
use crate::filename::friendly_filename;
use crate::lang::Language;
use crate::llm::Summarizer;
use crate::text::truncate_chars;

/// Low temperature keeps the summary close to the source material.
pub const SUMMARY_TEMPERATURE: f32 = 0.3;

const MAX_EXCERPTS: usize = 3;
const EXCERPT_CHARS: usize = 500;
const FALLBACK_CHARS: usize = 200;

/// Summarizes how the top excerpts bear on the AI answer, with a source footer.
///
/// Never fails: if the model call errors, the first excerpt is quoted instead.
pub async fn summarize_fact_check(
    llm: &impl Summarizer,
    question: &str,
    excerpts: &[Excerpt],
    ai_answer: &str,
    language: Language,
) -> String {
    let used = &excerpts[..excerpts.len().min(MAX_EXCERPTS)];
    let prompt = build_prompt(question, ai_answer, &reference_blocks(used), language);

    match llm.complete(&prompt, SUMMARY_TEMPERATURE).await {
        Ok(summary) => {
            info!(excerpts = used.len(), "fact-check summary generated");
            format!("{}{}", summary.trim(), citation_footer(used, language))
        }
        Err(e) => {
            warn!(error = %e, "summary generation failed, quoting first excerpt");
            fallback_text(excerpts.first(), language)
        }
    }
}

fn citation(excerpt: &Excerpt) -> (String, String) {
    (
        friendly_filename(excerpt.source_file.as_deref()),
        excerpt.page_label(),
    )
}

fn reference_blocks(excerpts: &[Excerpt]) -> String {
    excerpts
        .iter()
        .enumerate()
        .map(|(i, excerpt)| {
            let (name, page) = citation(excerpt);
            format!(
                "[Source {}: {name}, Page {page}]\n{}",
                i + 1,
                truncate_chars(&excerpt.content, EXCERPT_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn citation_footer(excerpts: &[Excerpt], language: Language) -> String {
    let sources = excerpts
        .iter()
        .map(|excerpt| {
            let (name, page) = citation(excerpt);
            format!("{name} (p.{page})")
        })
        .collect::<Vec<_>>()
        .join(", ");
    let label = language.pick("Sources", "Fontes");
    format!("\n\n📚 **{label}:** {sources}")
}

fn fallback_text(first: Option<&Excerpt>, language: Language) -> String {
    let (name, page) = first.map_or_else(
        || (friendly_filename(None), "N/A".to_string()),
        citation,
    );
    let quoted = first.map_or("", |e| truncate_chars(&e.content, FALLBACK_CHARS));

    match language {
        Language::English => format!(
            "📄 Information from documents:\n\n{quoted}...\n\n📚 Source: {name} (p.{page})"
        ),
        Language::Portuguese => format!(
            "📄 Informação extraída dos documentos:\n\n{quoted}...\n\n📚 Fonte: {name} (p.{page})"
        ),
    }
}

fn build_prompt(question: &str, ai_answer: &str, references: &str, language: Language) -> String {
    match language {
        Language::English => format!(
            "You are a scientific fact-checker. Based on the provided documents, create a clear and concise summary.

**User's Question:** {question}

**AI's Answer:** {ai_answer}

**Reference Documents:**
{references}

**Your Task:**
1. Summarize key points from the documents that support the answer
2. Mention specific data (numbers, locations, dates) if available
3. Keep the summary under 100 words
4. Use simple, clear language
5. If documents don't support the answer, indicate that

**Factual Summary:**"
        ),
        Language::Portuguese => format!(
            "Tu és um verificador de factos científico. Com base nos documentos fornecidos, cria um resumo claro e conciso.

**Pergunta do utilizador:** {question}

**Resposta da IA:** {ai_answer}

**Documentos de referência:**
{references}

**Tua tarefa:**
1. Resume os pontos-chave dos documentos que apoiam a resposta
2. Menciona dados específicos (números, locais, datas) se disponíveis
3. Mantém o resumo abaixo de 100 palavras
4. Usa linguagem simples e clara
5. Se os documentos não apoiam a resposta, indica isso

**Resumo factual:**"
        ),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm::LlmError;
    use std::sync::Mutex;

    /// Records prompts and replies with a fixed completion, or fails when `reply` is `None`.
    pub(crate) struct MockLlm {
        reply: Option<String>,
        pub(crate) prompts: Mutex<Vec<(String, f32)>>,
    }

    impl MockLlm {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl Summarizer for MockLlm {
        async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
            self.prompts
                .lock()
                .unwrap()
                .push((prompt.to_string(), temperature));
            self.reply.clone().ok_or(LlmError::RateLimited)
        }
    }

    fn excerpts() -> Vec<Excerpt> {
        vec![
            Excerpt::new("A".repeat(600), Some("Madeira-2021.pdf"), Some(3)),
            Excerpt::new("second excerpt", Some("pdfs/foo_bar-baz.pdf"), Some(7)),
            Excerpt::new("third excerpt", None, None),
            Excerpt::new("fourth excerpt is ignored", Some("condor0811.pdf"), Some(1)),
        ]
    }

    #[tokio::test]
    async fn success_appends_sources_for_first_three_excerpts() {
        let llm = MockLlm::replying("\n  The pigeon is endemic to Madeira.  \n");
        let out = summarize_fact_check(&llm, "q", &excerpts(), "answer", Language::English).await;

        assert_eq!(
            out,
            "The pigeon is endemic to Madeira.\n\n📚 **Sources:** \
             Flood_2021_Oriole_Birding_Tour_Report_Madeira_Endemics_and_Seabirds.pdf (p.3), \
             Foo Bar Baz.Pdf (p.7), Unknown Document (p.N/A)"
        );
    }

    #[tokio::test]
    async fn prompt_embeds_question_answer_and_truncated_excerpts() {
        let llm = MockLlm::replying("ok");
        summarize_fact_check(&llm, "Is it rare?", &excerpts(), "Yes, very.", Language::English)
            .await;

        let prompts = llm.prompts.lock().unwrap();
        let (prompt, temperature) = &prompts[0];
        assert_eq!(*temperature, SUMMARY_TEMPERATURE);
        assert!(prompt.contains("**User's Question:** Is it rare?"));
        assert!(prompt.contains("**AI's Answer:** Yes, very."));
        assert!(prompt.contains(
            "[Source 1: Flood_2021_Oriole_Birding_Tour_Report_Madeira_Endemics_and_Seabirds.pdf, Page 3]"
        ));
        assert!(prompt.contains(&"A".repeat(500)));
        assert!(!prompt.contains(&"A".repeat(501)));
        assert!(prompt.contains("[Source 3: Unknown Document, Page N/A]\nthird excerpt"));
        assert!(!prompt.contains("fourth excerpt"));
    }

    #[tokio::test]
    async fn portuguese_prompt_and_footer() {
        let llm = MockLlm::replying("Resumo.");
        let out =
            summarize_fact_check(&llm, "q", &excerpts(), "a", Language::Portuguese).await;

        assert!(out.starts_with("Resumo.\n\n📚 **Fontes:** "));
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].0.starts_with("Tu és um verificador de factos científico."));
        assert!(prompts[0].0.contains("**Documentos de referência:**"));
    }

    #[tokio::test]
    async fn failure_quotes_first_excerpt_only() {
        let llm = MockLlm::failing();
        let out = summarize_fact_check(&llm, "q", &excerpts(), "a", Language::English).await;

        assert_eq!(
            out,
            format!(
                "📄 Information from documents:\n\n{}...\n\n📚 Source: \
                 Flood_2021_Oriole_Birding_Tour_Report_Madeira_Endemics_and_Seabirds.pdf (p.3)",
                "A".repeat(200)
            )
        );
        assert!(!out.contains("Foo Bar Baz"));
    }

    #[tokio::test]
    async fn portuguese_failure_uses_fonte() {
        let llm = MockLlm::failing();
        let out = summarize_fact_check(&llm, "q", &excerpts(), "a", Language::Portuguese).await;
        assert!(out.starts_with("📄 Informação extraída dos documentos:"));
        assert!(out.contains("📚 Fonte: Flood_2021"));
    }

    #[tokio::test]
    async fn no_excerpts_still_returns_text() {
        let ok = summarize_fact_check(&MockLlm::replying("S"), "q", &[], "a", Language::English).await;
        assert_eq!(ok, "S\n\n📚 **Sources:** ");

        let failed = summarize_fact_check(&MockLlm::failing(), "q", &[], "a", Language::English).await;
        assert!(failed.contains("📚 Source: Unknown Document (p.N/A)"));
    }
}
