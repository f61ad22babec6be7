use std::path::MAIN_SEPARATOR;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Cap on directory entries scanned per completion.
const MAX_SCAN: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Single-line editor for a word-list path, with Tab completion over
/// directories and `.json` / `.txt` files.
pub struct PathInput {
    text: String,
    /// Cursor position in chars.
    cursor: usize,
    completions: Vec<String>,
    completion_index: Option<usize>,
    pub completion_error: bool,
}

impl PathInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
            completions: Vec::new(),
            completion_index: None,
            completion_error: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    /// Text before the cursor, the char under it, and the rest.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let at = self.byte_at(self.cursor);
        match self.text[at..].chars().next() {
            Some(ch) => (&self.text[..at], Some(ch), &self.text[at + ch.len_utf8()..]),
            None => (&self.text, None, ""),
        }
    }

    /// Path with a leading `~` expanded to the home directory.
    pub fn expanded(&self) -> String {
        expand_home(self.text.trim())
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if !matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.completions.clear();
            self.completion_index = None;
            self.completion_error = false;
        }

        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_at(self.cursor);
            }
            KeyCode::Delete if self.cursor < self.len() => self.remove_at(self.cursor),
            KeyCode::Tab => self.complete(true),
            KeyCode::BackTab => self.complete(false),
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char(ch) if !ctrl => {
                let at = self.byte_at(self.cursor);
                self.text.insert(at, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn remove_at(&mut self, char_idx: usize) {
        let at = self.byte_at(char_idx);
        if let Some(ch) = self.text[at..].chars().next() {
            self.text.replace_range(at..at + ch.len_utf8(), "");
        }
    }

    fn complete(&mut self, forward: bool) {
        if self.cursor < self.len() {
            return;
        }

        match self.completion_index {
            None => {
                self.completions = self.scan_completions();
                if self.completions.is_empty() {
                    return;
                }
                self.completion_index = Some(0);
            }
            Some(idx) => {
                let count = self.completions.len();
                self.completion_index = Some(if forward {
                    (idx + 1) % count
                } else {
                    (idx + count - 1) % count
                });
            }
        }

        if let Some(idx) = self.completion_index {
            self.text = self.completions[idx].clone();
            self.cursor = self.len();
        }
    }

    fn scan_completions(&mut self) -> Vec<String> {
        let seed = self.text.clone();
        let split = seed.rfind(['/', '\\']).map(|pos| pos + 1).unwrap_or(0);
        let (dir_part, partial) = seed.split_at(split);

        let read_from = if dir_part.is_empty() {
            ".".to_string()
        } else {
            expand_home(dir_part)
        };

        let entries = match std::fs::read_dir(&read_from) {
            Ok(rd) => rd,
            Err(_) => {
                self.completion_error = true;
                return Vec::new();
            }
        };

        let listed = entries.take(MAX_SCAN).filter_map(|entry| {
            let entry = entry.ok()?;
            let name = entry.file_name().to_string_lossy().to_string();
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            Some((name, is_dir))
        });
        candidates(listed, dir_part, partial)
    }
}

/// Filter and order completion candidates: directories first, then word-list
/// files, alphabetical within each group. Hidden entries only when asked for.
pub fn candidates(
    entries: impl Iterator<Item = (String, bool)>,
    dir_part: &str,
    partial: &str,
) -> Vec<String> {
    let include_hidden = partial.starts_with('.');
    let mut found: Vec<(bool, String)> = entries
        .filter(|(name, _)| include_hidden || !name.starts_with('.'))
        .filter(|(name, _)| name.starts_with(partial))
        .filter(|(name, is_dir)| *is_dir || is_word_list_file(name))
        .map(|(name, is_dir)| {
            let full = if is_dir {
                format!("{dir_part}{name}{MAIN_SEPARATOR}")
            } else {
                format!("{dir_part}{name}")
            };
            (is_dir, full)
        })
        .collect();

    found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    found.into_iter().map(|(_, path)| path).collect()
}

fn is_word_list_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".json") || lower.ends_with(".txt")
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) => format!("{}{rest}", home.to_string_lossy()),
        _ => path.to_string(),
    }
}
