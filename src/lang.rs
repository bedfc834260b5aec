use std::str::FromStr;

/// Output language of the report. Anything that is not Portuguese falls back to English.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Portuguese,
}

impl Language {
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        match lower.as_str() {
            "portuguese" | "pt" => Language::Portuguese,
            _ => Language::English,
        }
    }

    /// Picks the English or Portuguese variant of a fixed string.
    pub fn pick<'a>(self, en: &'a str, pt: &'a str) -> &'a str {
        match self {
            Language::English => en,
            Language::Portuguese => pt,
        }
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Language::parse(s))
    }
}
