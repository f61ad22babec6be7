use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::mastery::LearningWord;
use crate::engine::view::ViewMode;
use crate::ui::components::markers;
use crate::ui::markup::{self, Emphasis};
use crate::ui::theme::{Theme, ThemeColors};

/// Single-word card: headword with counters, then definitions and examples
/// once the translation is revealed.
pub struct WordCard<'a> {
    word: &'a LearningWord,
    revealed: bool,
    theme: &'a Theme,
}

impl<'a> WordCard<'a> {
    pub fn new(word: &'a LearningWord, revealed: bool, theme: &'a Theme) -> Self {
        Self {
            word,
            revealed,
            theme,
        }
    }
}

fn markup_line<'t>(
    bullet: &'t str,
    text: &str,
    allow_italic: bool,
    colors: &ThemeColors,
) -> Line<'t> {
    let base = Style::default().fg(colors.fg());
    let mut spans = vec![Span::styled(bullet, Style::default().fg(colors.muted()))];
    for (segment, emphasis) in markup::parse(text, allow_italic) {
        let style = match emphasis {
            Emphasis::Plain => base,
            Emphasis::Italic => base.add_modifier(Modifier::ITALIC),
            Emphasis::Bold => base.fg(colors.accent()).add_modifier(Modifier::BOLD),
        };
        spans.push(Span::styled(segment, style));
    }
    Line::from(spans)
}

impl Widget for WordCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let word = self.word;

        let block = Block::bordered()
            .border_style(Style::default().fg(if word.miss_count > 0 {
                colors.consolidating()
            } else {
                colors.border_focused()
            }))
            .style(Style::default().bg(colors.bg()));

        let mut headline = vec![Span::styled(
            word.headword().to_string(),
            Style::default()
                .fg(colors.headword())
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(misses) = markers::miss_marker(ViewMode::V1, word) {
            headline.push(Span::raw("  "));
            headline.push(Span::styled(misses, Style::default().fg(colors.miss_marker())));
        }
        if let Some(correct) = markers::correct_marker(ViewMode::V1, word) {
            headline.push(Span::raw(" "));
            headline.push(Span::styled(
                correct,
                Style::default().fg(colors.correct_marker()),
            ));
        }

        let mut lines = vec![
            Line::from(""),
            Line::from(headline),
            Line::from(vec![
                Span::styled(
                    word.word.part_of_speech.clone(),
                    Style::default()
                        .fg(colors.muted())
                        .add_modifier(Modifier::ITALIC),
                ),
                Span::raw("  "),
                Span::styled(word.word.phonetic.clone(), Style::default().fg(colors.fg())),
            ]),
            Line::from(""),
        ];

        if self.revealed {
            lines.push(Line::from(Span::styled(
                "Definitions",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            for definition in &word.word.definitions {
                lines.push(markup_line(" • ", definition, true, colors));
            }

            let sentences = word.word.example_sentences();
            if !sentences.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Examples",
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                )));
                for sentence in sentences {
                    lines.push(markup_line(" – ", sentence, false, colors));
                }
            }
        } else {
            lines.push(Line::from(Span::styled(
                "press [space] to reveal the translation",
                Style::default().fg(colors.muted()),
            )));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
