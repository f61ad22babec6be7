use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::pager::Pager;
use crate::catalog::word::WordRecord;
use crate::ui::theme::Theme;

/// Entries shown per dictionary page.
pub const DICTIONARY_PAGE_SIZE: usize = 10;

/// Read-only browser over the whole catalog, one page at a time.
pub struct DictionaryView<'a> {
    catalog: &'a [WordRecord],
    page: usize,
    theme: &'a Theme,
}

impl<'a> DictionaryView<'a> {
    pub fn new(catalog: &'a [WordRecord], page: usize, theme: &'a Theme) -> Self {
        Self {
            catalog,
            page,
            theme,
        }
    }

    pub fn total_pages(catalog_len: usize) -> usize {
        Pager::new(DICTIONARY_PAGE_SIZE).total_pages(catalog_len)
    }
}

impl Widget for DictionaryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Dictionary ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        if self.catalog.is_empty() {
            Paragraph::new("The dictionary is empty. Load a word list to start.")
                .style(Style::default().fg(colors.muted()))
                .alignment(Alignment::Center)
                .render(sections[0], buf);
            return;
        }

        let pager = Pager::new(DICTIONARY_PAGE_SIZE);
        let mut lines: Vec<Line> = Vec::new();
        for word in pager.page(self.catalog, self.page) {
            lines.push(Line::from(vec![
                Span::styled(
                    word.headword.clone(),
                    Style::default()
                        .fg(colors.headword())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    word.part_of_speech.clone(),
                    Style::default()
                        .fg(colors.muted())
                        .add_modifier(Modifier::ITALIC),
                ),
                Span::raw("  "),
                Span::styled(word.phonetic.clone(), Style::default().fg(colors.fg())),
            ]));
            lines.push(Line::from(Span::styled(
                format!("   {}", word.definitions.join("; ")),
                Style::default().fg(colors.fg()),
            )));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(sections[0], buf);

        let total = Self::total_pages(self.catalog.len());
        let nav = Line::from(vec![
            Span::styled(
                if self.page > 0 { "← Prev   " } else { "         " },
                Style::default().fg(colors.accent()),
            ),
            Span::styled(
                format!("Page {} of {}", self.page + 1, total),
                Style::default().fg(colors.fg()),
            ),
            Span::styled(
                if self.page + 1 < total { "   Next →" } else { "         " },
                Style::default().fg(colors.accent()),
            ),
        ]);
        Paragraph::new(nav)
            .alignment(Alignment::Center)
            .render(sections[1], buf);
    }
}
