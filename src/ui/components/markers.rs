use crate::engine::mastery::LearningWord;
use crate::engine::view::ViewMode;

const SQUARE: char = '■';

/// Miss counter as shown next to a word: a bare number on the card view,
/// one square per miss in the queue and page lists, nothing in the catalog list.
pub fn miss_marker(mode: ViewMode, word: &LearningWord) -> Option<String> {
    if mode == ViewMode::V4 || word.miss_count == 0 {
        return None;
    }
    match mode {
        ViewMode::V1 => Some(word.miss_count.to_string()),
        _ => Some(SQUARE.to_string().repeat(word.miss_count as usize)),
    }
}

/// Correct-after-miss counter: a number on the card view, squares in groups
/// of three in the list views.
pub fn correct_marker(mode: ViewMode, word: &LearningWord) -> Option<String> {
    if mode == ViewMode::V4 || word.correct_after_miss == 0 {
        return None;
    }
    if mode == ViewMode::V1 {
        return Some(word.correct_after_miss.to_string());
    }

    let count = word.correct_after_miss as usize;
    let mut groups: Vec<String> = vec![SQUARE.to_string().repeat(3); count / 3];
    if count % 3 > 0 {
        groups.push(SQUARE.to_string().repeat(count % 3));
    }
    Some(groups.join(" "))
}
