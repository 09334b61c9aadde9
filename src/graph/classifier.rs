// Keyword categorisation of project names. Lists are checked in priority order,
// keywords in list order; the first substring hit decides.

use crate::graph::types::Category;

pub const KW_AI: &[&str] = &["ai", "artificial", "machine", "bittensor", "tensor", "cerebral", "deep"];
pub const KW_GAMING: &[&str] = &["game", "gaming", "play", "metaverse", "axie", "sandbox", "immutable", "gala"];
pub const KW_RWA: &[&str] = &["real", "rwa", "tokenized", "asset", "real world", "toke", "tokenize"];
pub const KW_MEME: &[&str] = &["meme", "doge", "dogecoin", "shiba", "pepe"];

const RULES: [(Category, &[&str]); 4] = [
    (Category::AI, KW_AI),
    (Category::Gaming, KW_GAMING),
    (Category::RWA, KW_RWA),
    (Category::Meme, KW_MEME),
];

pub fn classify(text: &str) -> Category {
    let text = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Classify from the `name + " " + symbol` text the builder uses. Absent parts count as empty.
pub fn classify_project(name: Option<&str>, symbol: Option<&str>) -> Category {
    classify(&format!("{} {}", name.unwrap_or_default(), symbol.unwrap_or_default()))
}
