use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::mastery::LearningWord;
use crate::engine::progression::LearningStats;
use crate::engine::view::ViewMode;

pub const SCHEMA_VERSION: u32 = 1;

pub const CATALOG_KEY: &str = "catalog";
pub const LEARNING_STATE_KEY: &str = "learning_state";

/// Persisted review progress. The catalog is stored separately under
/// `CATALOG_KEY` as a bare array of word records.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStateData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    pub queue: Vec<LearningWord>,
    pub current_index: usize,
    pub stats: LearningStats,
    #[serde(default)]
    pub view_mode: ViewMode,
}

// Documents written before versioning carry no version field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl LearningStateData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    /// Whether the document holds a queue worth resuming.
    pub fn is_resumable(&self) -> bool {
        !self.needs_reset() && !self.queue.is_empty()
    }
}
