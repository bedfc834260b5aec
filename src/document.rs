use std::fmt;

use serde::Deserialize;

/// A retrieved document slice as produced by the retrieval pipeline.
///
/// Deserializes from `{ "page_content": "...", "metadata": { "source_file": "...", "page": 3 } }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawDocument")]
pub struct Excerpt {
    pub content: String,
    pub source_file: Option<String>,
    pub page: Option<PageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    Number(u64),
    Label(String),
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRef::Number(n) => write!(f, "{n}"),
            PageRef::Label(s) => f.write_str(s),
        }
    }
}

impl Excerpt {
    #[cfg(test)]
    pub(crate) fn new(content: impl Into<String>, source_file: Option<&str>, page: Option<u64>) -> Self {
        Self {
            content: content.into(),
            source_file: source_file.map(str::to_string),
            page: page.map(PageRef::Number),
        }
    }

    pub fn page_label(&self) -> String {
        self.page
            .as_ref()
            .map_or_else(|| "N/A".to_string(), PageRef::to_string)
    }
}

#[derive(Deserialize)]
struct RawDocument {
    page_content: String,
    #[serde(default)]
    metadata: RawMetadata,
}

#[derive(Deserialize, Default)]
struct RawMetadata {
    source_file: Option<String>,
    page: Option<PageRef>,
}

impl From<RawDocument> for Excerpt {
    fn from(raw: RawDocument) -> Self {
        Self {
            content: raw.page_content,
            source_file: raw.metadata.source_file.filter(|s| !s.is_empty()),
            page: raw.metadata.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_retrieval_document_shape() {
        let docs: Vec<Excerpt> = serde_json::from_str(
            r#"[
                {"page_content": "text", "metadata": {"source_file": "a/b.pdf", "page": 4}},
                {"page_content": "more", "metadata": {"page": "iv"}},
                {"page_content": "bare"}
            ]"#,
        )
        .unwrap();

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].source_file.as_deref(), Some("a/b.pdf"));
        assert_eq!(docs[0].page_label(), "4");
        assert!(docs[1].source_file.is_none());
        assert_eq!(docs[1].page_label(), "iv");
        assert_eq!(docs[2].page_label(), "N/A");
    }

    #[test]
    fn ignores_unrelated_metadata_fields() {
        let doc: Excerpt = serde_json::from_str(
            r#"{"page_content": "x", "metadata": {"source_file": "f.pdf", "chunk_id": 9, "score": 0.7}}"#,
        )
        .unwrap();
        assert_eq!(doc.source_file.as_deref(), Some("f.pdf"));
        assert!(doc.page.is_none());
    }
}
