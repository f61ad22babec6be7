use std::borrow::Cow;

use crate::catalog::pager::{DEFAULT_PAGE_SIZE, Pager};
use crate::catalog::word::WordRecord;
use crate::engine::history::{DEFAULT_HISTORY_CAPACITY, HistoryLog, Snapshot};
use crate::engine::mastery::{LearningWord, materialize};
use crate::engine::progression::{self, LearningStats, SetOutcome};
use crate::engine::queue::{KnownOutcome, LearningQueue};
use crate::engine::view::{ViewMode, ViewSource};
use crate::store::blob::{BlobStore, StoreError};
use crate::store::schema::{CATALOG_KEY, LEARNING_STATE_KEY, LearningStateData, SCHEMA_VERSION};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    pub words_per_page: usize,
    pub history_capacity: usize,
    pub default_view: ViewMode,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            words_per_page: DEFAULT_PAGE_SIZE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_view: ViewMode::V1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnownReport {
    pub outcome: KnownOutcome,
    /// Set when this answer cleared the queue.
    pub set: Option<SetOutcome>,
}

/// One learner's drilling session over a catalog. Owns all engine state;
/// callers read projections and invoke review operations.
pub struct LearningSession {
    catalog: Vec<WordRecord>,
    pager: Pager,
    queue: LearningQueue,
    stats: LearningStats,
    history: HistoryLog<Snapshot>,
    view_mode: ViewMode,
    store: Option<Box<dyn BlobStore>>,
    last_persist_error: Option<String>,
}

impl LearningSession {
    /// A fresh in-memory session starting at page 0.
    pub fn new(catalog: Vec<WordRecord>, options: SessionOptions) -> Self {
        let pager = Pager::new(options.words_per_page);
        let stats = LearningStats::new(catalog.len(), &pager);
        let queue = LearningQueue::new(materialize(pager.page(&catalog, 0)));
        Self {
            catalog,
            pager,
            queue,
            stats,
            history: HistoryLog::new(options.history_capacity),
            view_mode: options.default_view,
            store: None,
            last_persist_error: None,
        }
    }

    /// Rebuild a session from `store`: resume saved progress when a usable
    /// state document exists, otherwise start the stored catalog at page 0.
    /// Unreadable documents are treated as absent.
    pub fn restore(store: Box<dyn BlobStore>, options: SessionOptions) -> Self {
        let catalog = read_document::<Vec<WordRecord>>(store.as_ref(), CATALOG_KEY)
            .unwrap_or_default();
        let saved = read_document::<LearningStateData>(store.as_ref(), LEARNING_STATE_KEY);

        let mut session = match saved {
            Some(data) if data.is_resumable() && !catalog.is_empty() => {
                log::info!(
                    "resuming page {} with {} words queued",
                    data.stats.current_page + 1,
                    data.queue.len()
                );
                Self::resume(catalog, data, options)
            }
            Some(data) => {
                if data.needs_reset() {
                    log::warn!(
                        "discarding saved state with schema version {} (expected {SCHEMA_VERSION})",
                        data.schema_version
                    );
                }
                Self::new(catalog, options)
            }
            None => Self::new(catalog, options),
        };
        session.store = Some(store);
        session
    }

    fn resume(catalog: Vec<WordRecord>, data: LearningStateData, options: SessionOptions) -> Self {
        // the saved page size decides page bounds, otherwise the queue would
        // not line up with the page it came from
        let page_size = if data.stats.words_per_page == 0 {
            options.words_per_page
        } else {
            data.stats.words_per_page
        };
        let pager = Pager::new(page_size);

        let mut queue = data.queue;
        for word in &mut queue {
            word.clamp_counters();
        }

        let mut stats = data.stats;
        stats.words_per_page = pager.page_size();
        stats.total_pages = pager.total_pages(catalog.len());

        Self {
            catalog,
            pager,
            queue: LearningQueue::from_parts(queue, data.current_index),
            stats,
            history: HistoryLog::new(options.history_capacity),
            view_mode: data.view_mode,
            store: None,
            last_persist_error: None,
        }
    }

    pub fn with_store(mut self, store: Box<dyn BlobStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the catalog and start over at page 0. History is discarded.
    pub fn load_catalog(&mut self, catalog: Vec<WordRecord>) {
        log::info!("loaded catalog with {} words", catalog.len());
        self.catalog = catalog;
        self.start_over();

        if let Some(store) = &self.store {
            let result = serde_json::to_string(&self.catalog)
                .map_err(StoreError::from)
                .and_then(|json| store.write(CATALOG_KEY, &json));
            self.record_persist(result);
        }
        self.persist();
    }

    /// Drop all progress on the current catalog and start at page 0.
    pub fn reset_progress(&mut self) {
        self.start_over();
        self.persist();
    }

    fn start_over(&mut self) {
        self.stats = LearningStats::new(self.catalog.len(), &self.pager);
        self.queue = LearningQueue::new(materialize(self.pager.page(&self.catalog, 0)));
        self.history.clear();
    }

    pub fn catalog(&self) -> &[WordRecord] {
        &self.catalog
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn queue(&self) -> &LearningQueue {
        &self.queue
    }

    pub fn stats(&self) -> &LearningStats {
        &self.stats
    }

    pub fn current_word(&self) -> Option<&LearningWord> {
        self.queue.current()
    }

    pub fn current_index(&self) -> usize {
        self.queue.current_index()
    }

    pub fn translation_visible(&self) -> bool {
        self.queue.translation_visible()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Every page of the catalog has been mastered.
    pub fn is_finished(&self) -> bool {
        !self.catalog.is_empty() && self.queue.is_empty()
    }

    /// Share of the active page that has left the queue this pass.
    pub fn page_progress(&self) -> f64 {
        let page_len = self
            .pager
            .page_bounds(self.stats.current_page, self.catalog.len())
            .len();
        if page_len == 0 {
            return 0.0;
        }
        1.0 - (self.queue.len() as f64 / page_len as f64).min(1.0)
    }

    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    pub fn reveal(&mut self) {
        self.queue.reveal();
    }

    pub fn hide(&mut self) {
        self.queue.hide();
    }

    /// The learner knew the current word. No-op on an empty queue.
    pub fn mark_known(&mut self) -> Option<KnownReport> {
        self.queue.current()?;
        let snapshot = self.snapshot();
        self.history.push(snapshot);

        let outcome = self.queue.mark_known()?;
        let set = if self.queue.is_empty() {
            Some(progression::complete_set(
                &mut self.stats,
                &mut self.queue,
                &self.catalog,
                &self.pager,
            ))
        } else {
            None
        };

        self.persist();
        Some(KnownReport { outcome, set })
    }

    /// The learner missed the current word. Returns where it was reinserted,
    /// or `None` on an empty queue.
    pub fn mark_missed(&mut self) -> Option<usize> {
        self.queue.current()?;
        let snapshot = self.snapshot();
        self.history.push(snapshot);

        let target = self.queue.mark_missed()?;
        self.stats.missed_in_current_set += 1;

        self.persist();
        Some(target)
    }

    /// Step back one review action. Returns false when there is nothing to
    /// undo. Undone actions cannot be redone.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.queue = snapshot.queue;
        self.stats = snapshot.stats;
        self.persist();
        true
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            self.view_mode = mode;
            self.persist();
        }
    }

    pub fn words_for_view(&self) -> Vec<Cow<'_, LearningWord>> {
        self.words_for(self.view_mode)
    }

    pub fn words_for(&self, mode: ViewMode) -> Vec<Cow<'_, LearningWord>> {
        ViewSource {
            queue: &self.queue,
            catalog: &self.catalog,
            pager: &self.pager,
            current_page: self.stats.current_page,
        }
        .project(mode)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            queue: self.queue.clone(),
            stats: self.stats.clone(),
        }
    }

    pub fn state_data(&self) -> LearningStateData {
        LearningStateData {
            schema_version: SCHEMA_VERSION,
            saved_at: Some(chrono::Utc::now()),
            queue: self.queue.words().to_vec(),
            current_index: self.queue.current_index(),
            stats: self.stats.clone(),
            view_mode: self.view_mode,
        }
    }

    /// Best effort: a failed write is logged and remembered, never raised,
    /// and the in-memory state stays as it is.
    fn persist(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        let result = serde_json::to_string(&self.state_data())
            .map_err(StoreError::from)
            .and_then(|json| store.write(LEARNING_STATE_KEY, &json));
        self.record_persist(result);
    }

    fn record_persist(&mut self, result: Result<(), StoreError>) {
        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                log::warn!("failed to save progress: {e}");
                self.last_persist_error = Some(e.to_string());
            }
        }
    }
}

fn read_document<T: serde::de::DeserializeOwned>(store: &dyn BlobStore, key: &str) -> Option<T> {
    match store.read(key) {
        Ok(Some(content)) => match serde_json::from_str(&content) {
            Ok(doc) => Some(doc),
            Err(e) => {
                log::warn!("ignoring unreadable {key} document: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("failed to read {key}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::store::blob::MemoryStore;

    fn catalog(n: usize) -> Vec<WordRecord> {
        (0..n)
            .map(|i| WordRecord::new(&format!("w{i}"), "noun", "/w/"))
            .collect()
    }

    fn options(words_per_page: usize) -> SessionOptions {
        SessionOptions {
            words_per_page,
            ..SessionOptions::default()
        }
    }

    #[test]
    fn test_every_review_is_persisted() {
        let store = Rc::new(MemoryStore::new());
        let mut session =
            LearningSession::new(catalog(4), options(4)).with_store(Box::new(store.clone()));

        session.mark_missed();
        let saved: LearningStateData =
            serde_json::from_str(&store.get(LEARNING_STATE_KEY).unwrap()).unwrap();
        assert_eq!(saved.stats.missed_in_current_set, 1);
        assert_eq!(saved.queue.len(), 4);
        assert_eq!(saved.queue[2].miss_count, 1);

        session.set_view_mode(ViewMode::V3);
        let saved: LearningStateData =
            serde_json::from_str(&store.get(LEARNING_STATE_KEY).unwrap()).unwrap();
        assert_eq!(saved.view_mode, ViewMode::V3);
    }

    #[test]
    fn test_restore_resumes_saved_queue() {
        let store = Rc::new(MemoryStore::new());
        {
            let mut session = LearningSession::new(Vec::new(), options(3))
                .with_store(Box::new(store.clone()));
            session.load_catalog(catalog(5));
            session.mark_known();
            session.mark_missed();
        }

        let session = LearningSession::restore(Box::new(store.clone()), options(3));
        assert_eq!(session.catalog().len(), 5);
        assert_eq!(session.queue().len(), 2);
        assert_eq!(session.stats().missed_in_current_set, 1);
        assert_eq!(session.stats().total_pages, 2);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_restore_with_empty_saved_queue_starts_fresh() {
        let store = Rc::new(MemoryStore::new());
        store.insert(CATALOG_KEY, &serde_json::to_string(&catalog(3)).unwrap());
        let mut data = LearningSession::new(catalog(3), options(3)).state_data();
        data.queue.clear();
        data.stats.hq_sets = 2;
        store.insert(LEARNING_STATE_KEY, &serde_json::to_string(&data).unwrap());

        let session = LearningSession::restore(Box::new(store.clone()), options(3));
        assert_eq!(session.queue().len(), 3);
        assert_eq!(session.stats().hq_sets, 0);
    }

    #[test]
    fn test_restore_ignores_corrupt_state() {
        let store = Rc::new(MemoryStore::new());
        store.insert(CATALOG_KEY, &serde_json::to_string(&catalog(2)).unwrap());
        store.insert(LEARNING_STATE_KEY, "{not json");

        let session = LearningSession::restore(Box::new(store.clone()), options(70));
        assert_eq!(session.queue().len(), 2);
        assert_eq!(session.stats().current_page, 0);
    }

    #[test]
    fn test_restore_clamps_out_of_range_counters() {
        let store = Rc::new(MemoryStore::new());
        store.insert(CATALOG_KEY, &serde_json::to_string(&catalog(3)).unwrap());
        let mut data = LearningSession::new(catalog(3), options(3)).state_data();
        data.queue[0].miss_count = u8::MAX;
        data.queue[0].correct_after_miss = 250;
        store.insert(LEARNING_STATE_KEY, &serde_json::to_string(&data).unwrap());

        let mut session = LearningSession::restore(Box::new(store.clone()), options(3));
        let word = session.current_word().unwrap();
        assert_eq!(word.miss_count, 4);
        assert_eq!(word.correct_after_miss, 10);

        session.mark_missed();
        assert_eq!(session.queue().words()[2].miss_count, 4);
        assert_eq!(session.queue().words()[2].correct_after_miss, 0);
    }

    #[test]
    fn test_restore_keeps_saved_page_size() {
        let store = Rc::new(MemoryStore::new());
        {
            let mut session = LearningSession::new(Vec::new(), options(2))
                .with_store(Box::new(store.clone()));
            session.load_catalog(catalog(5));
            session.mark_missed();
        }
        let session = LearningSession::restore(Box::new(store.clone()), options(70));
        assert_eq!(session.pager().page_size(), 2);
        assert_eq!(session.stats().total_pages, 3);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut session = LearningSession::new(catalog(3), options(3))
            .with_store(Box::new(MemoryStore::read_only()));

        session.mark_missed();
        assert_eq!(session.stats().missed_in_current_set, 1);
        assert_eq!(session.queue().words()[2].miss_count, 1);
        assert!(session.last_persist_error().is_some());
        assert!(session.can_undo());
    }

    #[test]
    fn test_empty_catalog_is_inert() {
        let mut session = LearningSession::new(Vec::new(), SessionOptions::default());
        assert!(session.current_word().is_none());
        assert!(session.mark_known().is_none());
        assert!(session.mark_missed().is_none());
        assert!(!session.undo());
        assert!(!session.is_finished());
        assert_eq!(session.stats().total_pages, 0);
        assert_eq!(session.page_progress(), 0.0);
    }

    #[test]
    fn test_load_catalog_clears_history() {
        let mut session = LearningSession::new(catalog(3), options(3));
        session.mark_missed();
        assert!(session.can_undo());
        session.load_catalog(catalog(2));
        assert!(!session.can_undo());
        assert_eq!(session.queue().len(), 2);
        assert_eq!(session.stats().missed_in_current_set, 0);
    }
}
