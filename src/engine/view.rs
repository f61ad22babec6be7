use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::pager::Pager;
use crate::catalog::word::WordRecord;
use crate::engine::mastery::LearningWord;
use crate::engine::queue::LearningQueue;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// The current word only.
    #[default]
    V1,
    /// The live queue in review order.
    V2,
    /// The active page in catalog order.
    V3,
    /// The whole catalog in catalog order.
    V4,
}

pub const ALL_VIEW_MODES: [ViewMode; 4] = [ViewMode::V1, ViewMode::V2, ViewMode::V3, ViewMode::V4];

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::V1 => "v1",
            ViewMode::V2 => "v2",
            ViewMode::V3 => "v3",
            ViewMode::V4 => "v4",
        }
    }

    pub fn from_digit(ch: char) -> Option<Self> {
        match ch {
            '1' => Some(ViewMode::V1),
            '2' => Some(ViewMode::V2),
            '3' => Some(ViewMode::V3),
            '4' => Some(ViewMode::V4),
            _ => None,
        }
    }

    pub fn is_list(self) -> bool {
        self != ViewMode::V1
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(ViewMode::V1),
            "v2" | "2" => Ok(ViewMode::V2),
            "v3" | "3" => Ok(ViewMode::V3),
            "v4" | "4" => Ok(ViewMode::V4),
            other => Err(format!("unknown view mode {other:?} (expected v1, v2, v3 or v4)")),
        }
    }
}

/// Read-only inputs a projection is computed from.
pub struct ViewSource<'a> {
    pub queue: &'a LearningQueue,
    pub catalog: &'a [WordRecord],
    pub pager: &'a Pager,
    pub current_page: usize,
}

impl<'a> ViewSource<'a> {
    /// Words to display for `mode`. Live queue entries are borrowed; catalog
    /// words absent from the queue are synthesized with zero counters and
    /// never enter the queue.
    pub fn project(&self, mode: ViewMode) -> Vec<Cow<'a, LearningWord>> {
        let queue: &'a LearningQueue = self.queue;
        let catalog: &'a [WordRecord] = self.catalog;
        match mode {
            ViewMode::V1 => queue.current().map(Cow::Borrowed).into_iter().collect(),
            ViewMode::V2 => queue.words().iter().map(Cow::Borrowed).collect(),
            ViewMode::V3 => {
                let bounds = self.pager.page_bounds(self.current_page, catalog.len());
                self.overlay(bounds.start, &catalog[bounds])
            }
            ViewMode::V4 => self.overlay(0, catalog),
        }
    }

    fn overlay(&self, first_index: usize, records: &'a [WordRecord]) -> Vec<Cow<'a, LearningWord>> {
        let page_size = self.pager.page_size();
        let queue: &'a LearningQueue = self.queue;
        let live = queue.words();

        records
            .iter()
            .enumerate()
            .map(|(i, record)| match live.iter().find(|w| w.matches(record)) {
                Some(word) => Cow::Borrowed(word),
                None => {
                    let offset = (first_index + i) % page_size;
                    Cow::Owned(LearningWord::new(record.clone(), offset))
                }
            })
            .collect()
    }
}
