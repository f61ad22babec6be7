use serde::{Deserialize, Serialize};

use crate::catalog::word::WordRecord;

pub const MAX_MISS_COUNT: u8 = 4;
pub const MAX_CORRECT_AFTER_MISS: u8 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordState {
    #[default]
    Learning,
    Consolidating,
    Learned,
}

/// A catalog word plus the mastery counters tracked while it sits in the queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningWord {
    #[serde(flatten)]
    pub word: WordRecord,
    /// Headword plus offset within its page. Not unique across pages.
    pub id: String,
    pub miss_count: u8,
    pub correct_after_miss: u8,
    pub state: WordState,
}

impl LearningWord {
    pub fn new(word: WordRecord, offset: usize) -> Self {
        let id = format!("{}-{offset}", word.headword);
        Self {
            word,
            id,
            miss_count: 0,
            correct_after_miss: 0,
            state: WordState::Learning,
        }
    }

    pub fn headword(&self) -> &str {
        &self.word.headword
    }

    pub fn matches(&self, record: &WordRecord) -> bool {
        self.word.match_key() == record.match_key()
    }

    /// Correct answers needed after a miss before the word leaves the queue.
    pub fn required_correct(&self) -> u8 {
        if self.miss_count >= MAX_MISS_COUNT {
            MAX_CORRECT_AFTER_MISS
        } else {
            1
        }
    }

    pub fn record_miss(&mut self) {
        self.miss_count = self.miss_count.saturating_add(1).min(MAX_MISS_COUNT);
        self.correct_after_miss = 0;
        self.state = WordState::Consolidating;
    }

    /// Count a correct answer on a previously missed word. Returns true once
    /// enough correct answers have accumulated for the word to be learned.
    pub fn record_correct(&mut self) -> bool {
        self.correct_after_miss = self
            .correct_after_miss
            .saturating_add(1)
            .min(MAX_CORRECT_AFTER_MISS);
        self.correct_after_miss >= self.required_correct()
    }

    /// Pull counters read from disk back into range.
    pub fn clamp_counters(&mut self) {
        self.miss_count = self.miss_count.min(MAX_MISS_COUNT);
        self.correct_after_miss = self.correct_after_miss.min(MAX_CORRECT_AFTER_MISS);
    }
}

/// Fresh zero-state learning words for a page, ids offset within the page.
pub fn materialize(records: &[WordRecord]) -> Vec<LearningWord> {
    records
        .iter()
        .enumerate()
        .map(|(offset, record)| LearningWord::new(record.clone(), offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(headword: &str) -> WordRecord {
        WordRecord::new(headword, "noun", "/x/")
    }

    #[test]
    fn test_fresh_word_has_zero_counters() {
        let lw = LearningWord::new(word("cat"), 3);
        assert_eq!(lw.id, "cat-3");
        assert_eq!(lw.miss_count, 0);
        assert_eq!(lw.correct_after_miss, 0);
        assert_eq!(lw.state, WordState::Learning);
    }

    #[test]
    fn test_materialize_uses_page_offsets() {
        let words = materialize(&[word("a"), word("b"), word("a")]);
        let ids: Vec<&str> = words.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a-0", "b-1", "a-2"]);
    }

    #[test]
    fn test_miss_count_caps_at_four() {
        let mut lw = LearningWord::new(word("dog"), 0);
        for _ in 0..7 {
            lw.record_miss();
        }
        assert_eq!(lw.miss_count, MAX_MISS_COUNT);
        assert_eq!(lw.state, WordState::Consolidating);
        assert_eq!(lw.required_correct(), 10);
    }

    #[test]
    fn test_miss_resets_correct_streak() {
        let mut lw = LearningWord::new(word("dog"), 0);
        lw.record_miss();
        lw.correct_after_miss = 0;
        lw.miss_count = 4;
        assert!(!lw.record_correct());
        assert!(!lw.record_correct());
        assert_eq!(lw.correct_after_miss, 2);
        lw.record_miss();
        assert_eq!(lw.correct_after_miss, 0);
    }

    #[test]
    fn test_out_of_range_counters_do_not_overflow() {
        let mut lw = LearningWord::new(word("dog"), 0);
        lw.miss_count = u8::MAX;
        lw.correct_after_miss = u8::MAX;
        assert!(lw.record_correct());
        assert_eq!(lw.correct_after_miss, MAX_CORRECT_AFTER_MISS);
        lw.record_miss();
        assert_eq!(lw.miss_count, MAX_MISS_COUNT);

        lw.miss_count = 200;
        lw.correct_after_miss = 77;
        lw.clamp_counters();
        assert_eq!(lw.miss_count, MAX_MISS_COUNT);
        assert_eq!(lw.correct_after_miss, MAX_CORRECT_AFTER_MISS);
    }

    #[test]
    fn test_serialized_shape() {
        let lw = LearningWord::new(word("cat"), 0);
        let value = serde_json::to_value(&lw).unwrap();
        assert_eq!(value["headword"], "cat");
        assert_eq!(value["PoS"], "noun");
        assert_eq!(value["missCount"], 0);
        assert_eq!(value["correctAfterMiss"], 0);
        assert_eq!(value["state"], "learning");
        let back: LearningWord = serde_json::from_value(value).unwrap();
        assert_eq!(back, lw);
    }
}
