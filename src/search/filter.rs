use tracing::debug;

use super::SearchHit;
use crate::text::truncate_chars;

const RELEVANT_KEYWORDS: &[&str] = &[
    "trocaz pigeon",
    "madeira laurel pigeon",
    "columba trocaz",
    "pigeon",
    "bird",
    "endemic",
    "madeira",
    "conservation",
    "endangered",
    "breeding",
    "habitat",
    "species",
    "population",
    "laurel forest",
    "avian",
    "macaronesia",
    "azores",
    "canary islands",
    "forest bird",
    "laurel",
    "feeding",
    "migration",
    "protected",
    "ornithology",
    "wildlife",
    "biodiversity",
    "columbidae",
    "island endemic",
    "atlantic islands",
];

/// Off-topic markers: software, games, vehicles. Matching any of them drops the hit.
const IRRELEVANT_KEYWORDS: &[&str] = &[
    "framework",
    "programming",
    "code",
    "software",
    "api",
    "rust",
    "编程",
    "框架",
    "开发",
    "代码",
    "github",
    "npm",
    "cargo",
    "gaming",
    "video game",
    "game character",
    "fictional",
    "car",
    "automotive",
    "vehicle",
    "transportation",
];

const SPECIES_NAMES: &[&str] = &["trocaz pigeon", "madeira laurel pigeon", "columba trocaz"];

/// Keeps hits that look like they are about the bird, preserving their order.
///
/// Deny keywords win over everything. A hit without any domain keyword survives only if its
/// title names the species.
pub fn filter_search_results(hits: Vec<SearchHit>, _question: &str) -> Vec<SearchHit> {
    hits.into_iter().filter(is_relevant).collect()
}

fn is_relevant(hit: &SearchHit) -> bool {
    let title = hit.title.to_lowercase();
    let combined = format!("{title} {}", hit.body.to_lowercase());

    if IRRELEVANT_KEYWORDS.iter().any(|k| combined.contains(k)) {
        debug!(title = %truncate_chars(&hit.title, 50), "dropping off-topic result");
        return false;
    }

    RELEVANT_KEYWORDS.iter().any(|k| combined.contains(k))
        || SPECIES_NAMES.iter().any(|name| title.contains(name))
}
