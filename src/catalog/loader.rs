use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::catalog::word::WordRecord;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file type {0:?}: expected a .json or .txt file")]
    UnsupportedFile(String),
    #[error("failed to parse file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid format: expected an array of words or an object with a \"words\" property")]
    InvalidShape,
    #[error("no built-in word list named {0:?}")]
    UnknownList(String),
    #[error("file must contain at least one word")]
    Empty,
    #[error("word at index {index} is missing required field {field:?}")]
    MissingField { index: usize, field: &'static str },
    #[error("word at index {index} has invalid {field:?} field (must be an array)")]
    NotAnArray { index: usize, field: &'static str },
}

const REQUIRED_STRINGS: [&str; 3] = ["headword", "PoS", "IPA"];
const REQUIRED_ARRAYS: [&str; 2] = ["definitions", "examples"];

/// Read and validate a catalog file. Only `.json` and `.txt` files holding
/// JSON are accepted.
pub fn load_file(path: &Path) -> Result<Vec<WordRecord>, CatalogError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != "json" && ext != "txt" {
        return Err(CatalogError::UnsupportedFile(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog(&content)
}

/// Parse catalog JSON: either a bare array of records or `{"words": [...]}`.
/// The whole catalog is rejected on the first malformed record.
pub fn parse_catalog(content: &str) -> Result<Vec<WordRecord>, CatalogError> {
    let data: Value = serde_json::from_str(content)?;

    let entries = match data {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("words") {
            Some(Value::Array(items)) => items,
            _ => return Err(CatalogError::InvalidShape),
        },
        _ => return Err(CatalogError::InvalidShape),
    };

    if entries.is_empty() {
        return Err(CatalogError::Empty);
    }

    for (index, entry) in entries.iter().enumerate() {
        validate_entry(index, entry)?;
    }

    let words: Vec<WordRecord> = serde_json::from_value(Value::Array(entries))?;
    Ok(words)
}

fn validate_entry(index: usize, entry: &Value) -> Result<(), CatalogError> {
    for field in REQUIRED_STRINGS {
        match entry.get(field).and_then(Value::as_str) {
            Some(s) if !s.is_empty() => {}
            _ => return Err(CatalogError::MissingField { index, field }),
        }
    }
    for field in REQUIRED_ARRAYS {
        let ok = entry
            .get(field)
            .and_then(Value::as_array)
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !ok {
            return Err(CatalogError::NotAnArray { index, field });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_WORD: &str = r#"[{
        "headword": "hello",
        "PoS": "interjection",
        "IPA": "[həˈloʊ]",
        "definitions": ["привет", "здравствуйте"],
        "examples": ["*Hello*, how are you?"]
    }]"#;

    #[test]
    fn test_parse_bare_array() {
        let words = parse_catalog(ONE_WORD).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].definitions.len(), 2);
    }

    #[test]
    fn test_parse_words_property() {
        let wrapped = format!(r#"{{"words": {ONE_WORD}}}"#);
        let words = parse_catalog(&wrapped).unwrap();
        assert_eq!(words[0].headword, "hello");
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert!(matches!(parse_catalog("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(matches!(
            parse_catalog(r#"{"entries": []}"#),
            Err(CatalogError::InvalidShape)
        ));
        assert!(matches!(parse_catalog("42"), Err(CatalogError::InvalidShape)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(parse_catalog("not json"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_reports_first_bad_index_and_field() {
        let json = r#"[
            {"headword": "a", "PoS": "n", "IPA": "/a/", "definitions": [], "examples": []},
            {"headword": "b", "PoS": "", "IPA": "/b/", "definitions": [], "examples": []}
        ]"#;
        let err = parse_catalog(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingField { index: 1, field: "PoS" }
        ));
        assert_eq!(
            err.to_string(),
            "word at index 1 is missing required field \"PoS\""
        );
    }

    #[test]
    fn test_rejects_non_array_examples() {
        let json = r#"[{"headword": "a", "PoS": "n", "IPA": "/a/", "definitions": [], "examples": "x"}]"#;
        assert!(matches!(
            parse_catalog(json),
            Err(CatalogError::NotAnArray { index: 0, field: "examples" })
        ));
    }

    #[test]
    fn test_load_file_checks_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let bad = dir.path().join("words.csv");
        fs::write(&bad, ONE_WORD).unwrap();
        assert!(matches!(load_file(&bad), Err(CatalogError::UnsupportedFile(_))));

        let good = dir.path().join("words.txt");
        fs::write(&good, ONE_WORD).unwrap();
        assert_eq!(load_file(&good).unwrap().len(), 1);
    }
}
