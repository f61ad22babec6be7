use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::mastery::{MAX_MISS_COUNT, WordState};
use crate::engine::progression::{CLEAN_SET_MAX_MISSES, HQ_SETS_TO_ADVANCE};
use crate::session::LearningSession;
use crate::ui::theme::Theme;

pub struct SessionSidebar<'a> {
    session: &'a LearningSession,
    theme: &'a Theme,
}

impl<'a> SessionSidebar<'a> {
    pub fn new(session: &'a LearningSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for SessionSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let words = self.session.queue().words();
        let stats = self.session.stats();

        let consolidating = words
            .iter()
            .filter(|w| w.state == WordState::Consolidating)
            .count();
        let stubborn = words
            .iter()
            .filter(|w| w.miss_count >= MAX_MISS_COUNT)
            .count();
        let clean_so_far = stats.missed_in_current_set <= CLEAN_SET_MAX_MISSES;

        let label = Style::default().fg(colors.fg());
        let lines = vec![
            Line::from(vec![
                Span::styled("Queued: ", label),
                Span::styled(words.len().to_string(), Style::default().fg(colors.accent())),
            ]),
            Line::from(vec![
                Span::styled("Consolidating: ", label),
                Span::styled(
                    consolidating.to_string(),
                    Style::default().fg(colors.consolidating()),
                ),
            ]),
            Line::from(vec![
                Span::styled("Needs 10 in a row: ", label),
                Span::styled(stubborn.to_string(), Style::default().fg(colors.miss_marker())),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("This pass: ", label),
                if clean_so_far {
                    Span::styled("clean", Style::default().fg(colors.success()))
                } else {
                    Span::styled("too many misses", Style::default().fg(colors.error()))
                },
            ]),
            Line::from(vec![
                Span::styled("Cleared: ", label),
                Span::styled(
                    format!("{:.0}%", self.session.page_progress() * 100.0),
                    Style::default().fg(colors.accent()),
                ),
            ]),
            Line::from(vec![
                Span::styled("HQ sets: ", label),
                Span::styled(
                    format!("{} / {HQ_SETS_TO_ADVANCE}", stats.hq_sets),
                    Style::default().fg(colors.accent()),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Undo: ", label),
                if self.session.can_undo() {
                    Span::styled("available", Style::default().fg(colors.success()))
                } else {
                    Span::styled("nothing to undo", Style::default().fg(colors.muted()))
                },
            ]),
        ];

        let block = Block::bordered()
            .title(" Session ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
