use serde::{Deserialize, Serialize};

/// A single vocabulary entry as supplied by the user. Never mutated once a
/// catalog is loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub headword: String,
    #[serde(rename = "PoS")]
    pub part_of_speech: String,
    #[serde(rename = "IPA")]
    pub phonetic: String,
    pub definitions: Vec<String>,
    pub examples: Vec<String>,
}

impl WordRecord {
    pub fn new(headword: &str, part_of_speech: &str, phonetic: &str) -> Self {
        Self {
            headword: headword.to_string(),
            part_of_speech: part_of_speech.to_string(),
            phonetic: phonetic.to_string(),
            definitions: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn with_definitions<I, S>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definitions = definitions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    /// Key used to match a catalog entry against a live learning word.
    /// Duplicate headword + part-of-speech pairs are indistinguishable.
    pub fn match_key(&self) -> (&str, &str) {
        (&self.headword, &self.part_of_speech)
    }

    /// Example strings split into sentences on runs of two or more spaces.
    pub fn example_sentences(&self) -> Vec<&str> {
        self.examples
            .iter()
            .flat_map(|example| split_on_wide_gaps(example))
            .collect()
    }
}

fn split_on_wide_gaps(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut run_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if run_start.is_none() {
                run_start = Some(i);
            }
            continue;
        }
        if let Some(rs) = run_start.take() {
            let gap = &text[rs..i];
            if gap.chars().count() >= 2 {
                sentences.push(&text[start..rs]);
                start = i;
            }
        }
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
