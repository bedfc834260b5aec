use std::collections::HashSet;

use crate::document::Excerpt;

const BASE_QUERY: &str = "Trocaz pigeon";
pub const BINOMIAL_NAME: &str = "Columba trocaz";

const SCANNED_EXCERPTS: usize = 2;

const CONTEXT_KEYWORDS: &[&str] = &[
    "trocaz pigeon",
    "madeira laurel pigeon",
    "columba trocaz",
    "pigeon",
    "endemic",
    "madeira",
    "conservation",
    "endangered",
    "breeding",
    "nesting",
    "habitat",
    "species",
    "population",
    "laurel forest",
    "bird",
    "avian",
    "macaronesia",
    "azores",
    "canary islands",
    "forest bird",
    "laurel",
    "feeding",
    "migration",
    "protected",
];

/// Context suffixes in priority order: the first rule with any matching keyword wins.
const SUFFIX_RULES: &[(&[&str], &str)] = &[
    (&["conservation", "endangered"], "conservation status IUCN"),
    (&["breeding", "nesting"], "breeding behavior nesting sites"),
    (&["laurel forest", "habitat"], "laurel forest habitat Madeira"),
    (&["macaronesia", "azores"], "Macaronesian islands distribution"),
];
const GENERIC_SUFFIX: &str = "endemic bird species biology";

/// Builds a species-focused web query from the topics the top excerpts talk about.
///
/// The question itself is not used; the excerpts already carry its context.
pub fn optimize_search_query(_question: &str, excerpts: &[Excerpt]) -> String {
    let found = context_keywords(excerpts);

    let suffix = SUFFIX_RULES
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|t| found.contains(t)))
        .map_or(GENERIC_SUFFIX, |(_, suffix)| *suffix);

    format!("{BASE_QUERY} {suffix} {BINOMIAL_NAME}")
}

fn context_keywords(excerpts: &[Excerpt]) -> HashSet<&'static str> {
    let mut found = HashSet::new();
    for excerpt in excerpts.iter().take(SCANNED_EXCERPTS) {
        let content = excerpt.content.to_lowercase();
        found.extend(CONTEXT_KEYWORDS.iter().copied().filter(|k| content.contains(k)));
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excerpt(text: &str) -> Excerpt {
        Excerpt::new(text, Some("doc.pdf"), Some(1))
    }

    #[test]
    fn endangered_selects_conservation_suffix() {
        let docs = [excerpt("The species is listed as Endangered on Madeira.")];
        assert_eq!(
            optimize_search_query("q", &docs),
            "Trocaz pigeon conservation status IUCN Columba trocaz"
        );
    }

    #[test]
    fn conservation_outranks_breeding() {
        let docs = [
            excerpt("Breeding occurs in spring."),
            excerpt("Conservation measures were introduced."),
        ];
        assert!(optimize_search_query("q", &docs).contains("conservation status IUCN"));
    }

    #[test]
    fn nesting_selects_breeding_suffix() {
        let docs = [excerpt("Nesting sites are in tall trees.")];
        assert_eq!(
            optimize_search_query("q", &docs),
            "Trocaz pigeon breeding behavior nesting sites Columba trocaz"
        );
    }

    #[test]
    fn habitat_selects_laurel_forest_suffix() {
        let docs = [excerpt("Its habitat is the Laurisilva.")];
        assert!(optimize_search_query("q", &docs).contains("laurel forest habitat Madeira"));
    }

    #[test]
    fn azores_selects_island_suffix() {
        let docs = [excerpt("Related pigeons live on the Azores.")];
        assert!(optimize_search_query("q", &docs).contains("Macaronesian islands distribution"));
    }

    #[test]
    fn no_keywords_selects_generic_suffix() {
        let docs = [excerpt("Lorem ipsum dolor sit amet.")];
        assert_eq!(
            optimize_search_query("q", &docs),
            "Trocaz pigeon endemic bird species biology Columba trocaz"
        );
    }

    #[test]
    fn only_first_two_excerpts_are_scanned() {
        let docs = [
            excerpt("nothing here"),
            excerpt("nothing here either"),
            excerpt("endangered"),
        ];
        assert!(optimize_search_query("q", &docs).contains("endemic bird species biology"));
    }

    #[test]
    fn query_always_ends_with_binomial_name() {
        for text in ["endangered", "breeding", "habitat", "azores", "nothing"] {
            let query = optimize_search_query("q", &[excerpt(text)]);
            assert!(query.ends_with(BINOMIAL_NAME), "got: {query}");
        }
    }
}
