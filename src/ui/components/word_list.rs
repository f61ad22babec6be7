use std::borrow::Cow;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::mastery::{LearningWord, WordState};
use crate::engine::view::ViewMode;
use crate::ui::components::markers;
use crate::ui::theme::Theme;

pub struct WordList<'a> {
    words: &'a [Cow<'a, LearningWord>],
    mode: ViewMode,
    current_index: usize,
    current_id: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> WordList<'a> {
    pub fn new(
        words: &'a [Cow<'a, LearningWord>],
        mode: ViewMode,
        current_index: usize,
        current_id: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            words,
            mode,
            current_index,
            current_id,
            theme,
        }
    }

    /// Row to highlight: by cursor position in the queue view, by id elsewhere.
    pub fn highlighted_row(&self) -> Option<usize> {
        match self.mode {
            ViewMode::V2 => (self.current_index < self.words.len()).then_some(self.current_index),
            _ => {
                let id = self.current_id?;
                self.words.iter().position(|w| w.id == id)
            }
        }
    }

    fn title(&self) -> String {
        match self.mode {
            ViewMode::V2 => format!(" Queue ({}) ", self.words.len()),
            ViewMode::V3 => format!(" Page ({}) ", self.words.len()),
            _ => format!(" All words ({}) ", self.words.len()),
        }
    }
}

/// First row to draw so that `focus` stays roughly centered.
pub fn scroll_offset(focus: Option<usize>, total: usize, visible: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    let focus = focus.unwrap_or(0);
    focus
        .saturating_sub(visible / 2)
        .min(total - visible)
}

impl Widget for WordList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.title())
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height as usize;
        let highlighted = self.highlighted_row();
        let offset = scroll_offset(highlighted, self.words.len(), visible);

        let lines: Vec<Line> = self
            .words
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, word)| {
                let is_current = highlighted == Some(i);
                let headword_color = if word.state == WordState::Consolidating {
                    colors.consolidating()
                } else {
                    colors.headword()
                };
                let row_style = if is_current {
                    Style::default().bg(colors.current_bg())
                } else {
                    Style::default()
                };

                let mut spans = vec![
                    Span::styled(
                        if is_current { " > " } else { "   " },
                        Style::default().fg(colors.accent()),
                    ),
                    Span::styled(
                        format!("{:<18}", word.headword()),
                        Style::default()
                            .fg(headword_color)
                            .add_modifier(if is_current {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                    ),
                    Span::styled(
                        format!("{:<14}", word.word.part_of_speech),
                        Style::default().fg(colors.muted()),
                    ),
                    Span::styled(
                        format!("{:<18}", word.word.phonetic),
                        Style::default().fg(colors.fg()),
                    ),
                ];
                if let Some(misses) = markers::miss_marker(self.mode, word) {
                    spans.push(Span::styled(misses, Style::default().fg(colors.miss_marker())));
                    spans.push(Span::raw(" "));
                }
                if let Some(correct) = markers::correct_marker(self.mode, word) {
                    spans.push(Span::styled(
                        correct,
                        Style::default().fg(colors.correct_marker()),
                    ));
                }

                Line::from(spans).style(row_style)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::word::WordRecord;
    use crate::engine::mastery::materialize;

    #[test]
    fn test_scroll_offset_keeps_focus_visible() {
        assert_eq!(scroll_offset(Some(3), 5, 10), 0);
        assert_eq!(scroll_offset(Some(50), 100, 10), 45);
        assert_eq!(scroll_offset(Some(99), 100, 10), 90);
        assert_eq!(scroll_offset(None, 100, 10), 0);
        assert_eq!(scroll_offset(Some(5), 100, 0), 0);
    }

    #[test]
    fn test_highlight_by_index_and_id() {
        let records = vec![
            WordRecord::new("a", "noun", "/a/"),
            WordRecord::new("b", "noun", "/b/"),
        ];
        let words: Vec<Cow<LearningWord>> =
            materialize(&records).into_iter().map(Cow::Owned).collect();
        let theme = Theme::default();

        let queue_view = WordList::new(&words, ViewMode::V2, 1, Some("a-0"), &theme);
        assert_eq!(queue_view.highlighted_row(), Some(1));

        let page_view = WordList::new(&words, ViewMode::V3, 1, Some("a-0"), &theme);
        assert_eq!(page_view.highlighted_row(), Some(0));

        let finished = WordList::new(&words, ViewMode::V4, 0, None, &theme);
        assert_eq!(finished.highlighted_row(), None);
    }
}
