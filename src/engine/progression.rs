use serde::{Deserialize, Serialize};

use crate::catalog::pager::Pager;
use crate::catalog::word::WordRecord;
use crate::engine::mastery::materialize;
use crate::engine::queue::LearningQueue;

/// A pass with at most this many misses counts as a high-quality set.
pub const CLEAN_SET_MAX_MISSES: u32 = 3;
/// Consecutive high-quality sets needed to move on to the next page.
pub const HQ_SETS_TO_ADVANCE: u32 = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub current_page: usize,
    pub total_pages: usize,
    pub hq_sets: u32,
    /// Every miss event since the last pass or page reset, repeats included.
    pub missed_in_current_set: u32,
    pub words_per_page: usize,
}

impl LearningStats {
    pub fn new(catalog_len: usize, pager: &Pager) -> Self {
        Self {
            current_page: 0,
            total_pages: pager.total_pages(catalog_len),
            hq_sets: 0,
            missed_in_current_set: 0,
            words_per_page: pager.page_size(),
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOutcome {
    /// The same page was reloaded from scratch.
    Repeated { clean: bool },
    /// The next page was loaded.
    Advanced { page: usize },
    /// The last page was mastered; the queue stays empty.
    Finished,
}

/// Score a cleared queue and decide what to load next. Called when the queue
/// has just become empty.
pub fn complete_set(
    stats: &mut LearningStats,
    queue: &mut LearningQueue,
    catalog: &[WordRecord],
    pager: &Pager,
) -> SetOutcome {
    let clean = stats.missed_in_current_set <= CLEAN_SET_MAX_MISSES;
    if clean {
        stats.hq_sets += 1;
    }

    let outcome = if stats.hq_sets >= HQ_SETS_TO_ADVANCE {
        if stats.has_next_page() {
            stats.current_page += 1;
            stats.hq_sets = 0;
            stats.missed_in_current_set = 0;
            queue.reset(materialize(pager.page(catalog, stats.current_page)));
            SetOutcome::Advanced {
                page: stats.current_page,
            }
        } else {
            queue.reset(Vec::new());
            SetOutcome::Finished
        }
    } else {
        stats.missed_in_current_set = 0;
        queue.reset(materialize(pager.page(catalog, stats.current_page)));
        SetOutcome::Repeated { clean }
    };

    log::debug!(
        "set complete: {outcome:?} (page {}/{}, hq sets {})",
        stats.current_page + 1,
        stats.total_pages,
        stats.hq_sets
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(n: usize) -> Vec<WordRecord> {
        (0..n)
            .map(|i| WordRecord::new(&format!("w{i}"), "noun", "/w/"))
            .collect()
    }

    #[test]
    fn test_new_stats_counts_pages() {
        let stats = LearningStats::new(141, &Pager::new(70));
        assert_eq!(stats.total_pages, 3);
        assert_eq!(stats.words_per_page, 70);
        assert!(stats.has_next_page());
    }

    #[test]
    fn test_clean_pass_increments_hq_and_reloads_page() {
        let words = catalog(5);
        let pager = Pager::new(3);
        let mut stats = LearningStats::new(words.len(), &pager);
        stats.missed_in_current_set = 3;
        let mut queue = LearningQueue::default();

        let outcome = complete_set(&mut stats, &mut queue, &words, &pager);
        assert_eq!(outcome, SetOutcome::Repeated { clean: true });
        assert_eq!(stats.hq_sets, 1);
        assert_eq!(stats.missed_in_current_set, 0);
        assert_eq!(queue.len(), 3);
        assert!(queue.words().iter().all(|w| w.miss_count == 0));
    }

    #[test]
    fn test_dirty_pass_keeps_hq_count() {
        let words = catalog(5);
        let pager = Pager::new(3);
        let mut stats = LearningStats::new(words.len(), &pager);
        stats.hq_sets = 2;
        stats.missed_in_current_set = 4;
        let mut queue = LearningQueue::default();

        let outcome = complete_set(&mut stats, &mut queue, &words, &pager);
        assert_eq!(outcome, SetOutcome::Repeated { clean: false });
        assert_eq!(stats.hq_sets, 2);
        assert_eq!(stats.missed_in_current_set, 0);
        assert_eq!(stats.current_page, 0);
    }

    #[test]
    fn test_third_clean_pass_advances() {
        let words = catalog(5);
        let pager = Pager::new(3);
        let mut stats = LearningStats::new(words.len(), &pager);
        stats.hq_sets = 2;
        let mut queue = LearningQueue::default();

        let outcome = complete_set(&mut stats, &mut queue, &words, &pager);
        assert_eq!(outcome, SetOutcome::Advanced { page: 1 });
        assert_eq!(stats.current_page, 1);
        assert_eq!(stats.hq_sets, 0);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.words()[0].headword(), "w3");
        assert_eq!(queue.words()[0].id, "w3-0");
    }

    #[test]
    fn test_last_page_finishes_with_empty_queue() {
        let words = catalog(2);
        let pager = Pager::new(3);
        let mut stats = LearningStats::new(words.len(), &pager);
        stats.hq_sets = 2;
        let mut queue = LearningQueue::default();

        let outcome = complete_set(&mut stats, &mut queue, &words, &pager);
        assert_eq!(outcome, SetOutcome::Finished);
        assert!(queue.is_empty());
        assert_eq!(stats.current_page, 0);
    }
}
