use rust_embed::Embed;

use crate::catalog::loader::{self, CatalogError};
use crate::catalog::word::WordRecord;

pub const DEFAULT_LIST: &str = "starter";

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordListAssets;

/// Load a word list bundled into the binary by name (file stem).
pub fn load(name: &str) -> Result<Vec<WordRecord>, CatalogError> {
    let filename = format!("{name}.json");
    let file = WordListAssets::get(&filename)
        .ok_or_else(|| CatalogError::UnknownList(name.to_string()))?;
    let content = String::from_utf8_lossy(file.data.as_ref());
    loader::parse_catalog(&content)
}

pub fn available() -> Vec<String> {
    let mut names: Vec<String> = WordListAssets::iter()
        .filter_map(|f| f.strip_suffix(".json").map(|n| n.to_string()))
        .collect();
    names.sort();
    names
}
