use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::progression::{CLEAN_SET_MAX_MISSES, LearningStats};
use crate::engine::view::{ALL_VIEW_MODES, ViewMode};
use crate::ui::theme::Theme;

pub struct StatsHeader<'a> {
    stats: &'a LearningStats,
    view_mode: ViewMode,
    theme: &'a Theme,
}

impl<'a> StatsHeader<'a> {
    pub fn new(stats: &'a LearningStats, view_mode: ViewMode, theme: &'a Theme) -> Self {
        Self {
            stats,
            view_mode,
            theme,
        }
    }
}

impl Widget for StatsHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" lexdrill ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(18)])
            .split(inner);

        let label = Style::default().fg(colors.muted());
        let value = Style::default()
            .fg(colors.header_fg())
            .add_modifier(Modifier::BOLD);
        let missed_style = if self.stats.missed_in_current_set > CLEAN_SET_MAX_MISSES {
            Style::default().fg(colors.error()).add_modifier(Modifier::BOLD)
        } else {
            value
        };

        let page = if self.stats.total_pages == 0 {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.stats.current_page + 1, self.stats.total_pages)
        };

        let stats_line = Line::from(vec![
            Span::styled(" page: ", label),
            Span::styled(page, value),
            Span::styled("   HQ sets: ", label),
            Span::styled(self.stats.hq_sets.to_string(), value),
            Span::styled("   missed: ", label),
            Span::styled(self.stats.missed_in_current_set.to_string(), missed_style),
        ]);
        Paragraph::new(stats_line).render(halves[0], buf);

        let mut tabs: Vec<Span> = Vec::new();
        for mode in ALL_VIEW_MODES {
            let style = if mode == self.view_mode {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.muted())
            };
            tabs.push(Span::styled(format!(" {mode} "), style));
            tabs.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(tabs)).render(halves[1], buf);
    }
}
