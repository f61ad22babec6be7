use serde::{Deserialize, Serialize};

use crate::engine::mastery::LearningWord;

/// Slots a known-but-previously-missed word is pushed back.
pub const KNOWN_DEFER_OFFSET: usize = 5;
/// Slots a missed word is pushed back.
pub const MISSED_DEFER_OFFSET: usize = 2;
/// At or below this length a missed word goes to the end of the queue.
pub const SHORT_QUEUE_LEN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnownOutcome {
    /// The word left the queue.
    Learned,
    /// The word was reinserted at this position.
    Deferred(usize),
}

/// The ordered working set for the active page plus the review cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningQueue {
    words: Vec<LearningWord>,
    current_index: usize,
    translation_visible: bool,
}

impl LearningQueue {
    pub fn new(words: Vec<LearningWord>) -> Self {
        Self {
            words,
            current_index: 0,
            translation_visible: false,
        }
    }

    /// Rebuild from persisted parts, clamping a stale cursor into range.
    pub fn from_parts(words: Vec<LearningWord>, current_index: usize) -> Self {
        let mut queue = Self::new(words);
        queue.current_index = current_index;
        queue.clamp_cursor();
        queue
    }

    pub fn words(&self) -> &[LearningWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&LearningWord> {
        self.words.get(self.current_index)
    }

    pub fn translation_visible(&self) -> bool {
        self.translation_visible
    }

    pub fn reveal(&mut self) {
        self.translation_visible = true;
    }

    pub fn hide(&mut self) {
        self.translation_visible = false;
    }

    /// Replace the contents with a freshly materialized page.
    pub fn reset(&mut self, words: Vec<LearningWord>) {
        self.words = words;
        self.current_index = 0;
        self.translation_visible = false;
    }

    /// Mark the current word as known. Never-missed words leave immediately;
    /// missed words leave once they have collected enough correct answers and
    /// are otherwise pushed back `KNOWN_DEFER_OFFSET` slots.
    ///
    /// Returns `None` on an empty queue.
    pub fn mark_known(&mut self) -> Option<KnownOutcome> {
        if self.current_index >= self.words.len() {
            return None;
        }

        let idx = self.current_index;
        let learned = if self.words[idx].miss_count == 0 {
            true
        } else {
            self.words[idx].record_correct()
        };

        let outcome = if learned {
            self.words.remove(idx);
            KnownOutcome::Learned
        } else {
            let word = self.words.remove(idx);
            let target = (idx + KNOWN_DEFER_OFFSET).min(self.words.len());
            self.words.insert(target, word);
            KnownOutcome::Deferred(target)
        };

        self.clamp_cursor();
        self.translation_visible = false;
        Some(outcome)
    }

    /// Mark the current word as missed and push it back a couple of slots (or
    /// to the end of a short queue). The cursor keeps its numeric position, so
    /// it now addresses whichever word slid into that slot.
    ///
    /// Returns the reinsertion position, or `None` on an empty queue.
    pub fn mark_missed(&mut self) -> Option<usize> {
        if self.current_index >= self.words.len() {
            return None;
        }

        let idx = self.current_index;
        let mut word = self.words.remove(idx);
        word.record_miss();

        let target = if self.words.len() <= SHORT_QUEUE_LEN {
            self.words.len()
        } else {
            (idx + MISSED_DEFER_OFFSET).min(self.words.len())
        };
        self.words.insert(target, word);

        self.translation_visible = false;
        Some(target)
    }

    fn clamp_cursor(&mut self) {
        if self.current_index >= self.words.len() {
            self.current_index = self.words.len().saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::word::WordRecord;
    use crate::engine::mastery::{WordState, materialize};

    fn queue_of(n: usize) -> LearningQueue {
        let records: Vec<WordRecord> = (0..n)
            .map(|i| WordRecord::new(&format!("w{i}"), "noun", "/w/"))
            .collect();
        LearningQueue::new(materialize(&records))
    }

    fn order(queue: &LearningQueue) -> Vec<&str> {
        queue.words().iter().map(|w| w.headword()).collect()
    }

    #[test]
    fn test_current_on_empty_queue() {
        let mut queue = LearningQueue::default();
        assert!(queue.current().is_none());
        assert_eq!(queue.mark_known(), None);
        assert_eq!(queue.mark_missed(), None);
    }

    #[test]
    fn test_reveal_and_hide_only_toggle_visibility() {
        let mut queue = queue_of(3);
        let before = queue.words().to_vec();
        queue.reveal();
        assert!(queue.translation_visible());
        queue.hide();
        assert!(!queue.translation_visible());
        assert_eq!(queue.words(), &before[..]);
        assert_eq!(queue.current_index(), 0);
    }

    #[test]
    fn test_known_clean_word_is_removed() {
        let mut queue = queue_of(4);
        queue.reveal();
        assert_eq!(queue.mark_known(), Some(KnownOutcome::Learned));
        assert_eq!(order(&queue), vec!["w1", "w2", "w3"]);
        assert_eq!(queue.current_index(), 0);
        assert!(!queue.translation_visible());
    }

    #[test]
    fn test_known_at_tail_clamps_cursor() {
        let mut queue = LearningQueue::from_parts(queue_of(3).words().to_vec(), 2);
        queue.mark_known();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current_index(), 1);
        assert_eq!(queue.current().unwrap().headword(), "w1");
    }

    #[test]
    fn test_missed_word_moves_two_slots() {
        let mut queue = queue_of(6);
        assert_eq!(queue.mark_missed(), Some(2));
        assert_eq!(order(&queue), vec!["w1", "w2", "w0", "w3", "w4", "w5"]);
        assert_eq!(queue.current_index(), 0);
        assert_eq!(queue.current().unwrap().headword(), "w1");

        let w0 = &queue.words()[2];
        assert_eq!(w0.miss_count, 1);
        assert_eq!(w0.state, WordState::Consolidating);
    }

    #[test]
    fn test_missed_in_short_queue_appends() {
        let mut queue = queue_of(3);
        // two words remain after removal, so the missed word goes last
        assert_eq!(queue.mark_missed(), Some(2));
        assert_eq!(order(&queue), vec!["w1", "w2", "w0"]);

        let mut queue = LearningQueue::from_parts(queue_of(2).words().to_vec(), 1);
        assert_eq!(queue.mark_missed(), Some(1));
        assert_eq!(order(&queue), vec!["w0", "w1"]);
        assert_eq!(queue.current_index(), 1);
    }

    #[test]
    fn test_missed_near_tail_clamps_target() {
        let mut queue = LearningQueue::from_parts(queue_of(5).words().to_vec(), 3);
        assert_eq!(queue.mark_missed(), Some(4));
        assert_eq!(order(&queue), vec!["w0", "w1", "w2", "w4", "w3"]);
        assert_eq!(queue.current_index(), 3);
    }

    #[test]
    fn test_known_after_miss_defers_five_slots_when_not_done() {
        let mut queue = queue_of(10);
        // miss w0 four times so it needs ten correct answers
        for _ in 0..4 {
            let pos = queue.words().iter().position(|w| w.headword() == "w0").unwrap();
            queue = LearningQueue::from_parts(queue.words().to_vec(), pos);
            queue.mark_missed();
        }
        let pos = queue.words().iter().position(|w| w.headword() == "w0").unwrap();
        let mut queue = LearningQueue::from_parts(queue.words().to_vec(), pos);
        let outcome = queue.mark_known();
        assert_eq!(outcome, Some(KnownOutcome::Deferred((pos + 5).min(9))));
        assert_eq!(queue.len(), 10);
    }

    #[test]
    fn test_single_miss_needs_one_correct() {
        let mut queue = queue_of(1);
        queue.mark_missed();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.mark_known(), Some(KnownOutcome::Learned));
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), 0);
    }

    #[test]
    fn test_capped_word_needs_ten_correct() {
        let mut queue = queue_of(1);
        for _ in 0..4 {
            queue.mark_missed();
        }
        for _ in 0..9 {
            assert_eq!(queue.mark_known(), Some(KnownOutcome::Deferred(0)));
        }
        assert_eq!(queue.words()[0].correct_after_miss, 9);
        assert_eq!(queue.mark_known(), Some(KnownOutcome::Learned));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_from_parts_clamps_stale_cursor() {
        let queue = LearningQueue::from_parts(queue_of(2).words().to_vec(), 7);
        assert_eq!(queue.current_index(), 1);
        let queue = LearningQueue::from_parts(Vec::new(), 3);
        assert_eq!(queue.current_index(), 0);
    }
}
