use std::path::Path;

use crate::catalog::{builtin, loader};
use crate::config::Config;
use crate::engine::progression::SetOutcome;
use crate::engine::view::ViewMode;
use crate::session::LearningSession;
use crate::ui::components::dictionary::DictionaryView;
use crate::ui::path_input::PathInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Learning,
    Dictionary,
    LoadWords,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

pub struct App {
    pub screen: AppScreen,
    pub session: LearningSession,
    pub theme: Theme,
    pub config: Config,
    pub status: Option<StatusMessage>,
    pub dictionary_page: usize,
    pub path_input: Option<PathInput>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, session: LearningSession) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_default();
        let screen = if session.catalog().is_empty() {
            AppScreen::LoadWords
        } else {
            AppScreen::Learning
        };
        let mut app = Self {
            screen,
            session,
            theme,
            config,
            status: None,
            dictionary_page: 0,
            path_input: None,
            should_quit: false,
        };
        if app.screen == AppScreen::LoadWords {
            app.path_input = Some(PathInput::new(""));
        }
        app
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    /// Space on the learning screen: show the translation, or hide it again.
    pub fn toggle_translation(&mut self) {
        if self.session.translation_visible() {
            self.session.hide();
        } else {
            self.session.reveal();
        }
    }

    /// With the translation hidden this only reveals it; the word is graded
    /// on the next press.
    pub fn mark_known(&mut self) {
        if !self.session.translation_visible() {
            self.session.reveal();
            return;
        }
        let Some(report) = self.session.mark_known() else {
            return;
        };
        self.status = None;
        match report.set {
            Some(SetOutcome::Repeated { clean: true }) => {
                let hq_sets = self.session.stats().hq_sets;
                self.set_status(
                    StatusKind::Success,
                    format!("Clean pass! {hq_sets} high-quality passes on this page"),
                );
            }
            Some(SetOutcome::Repeated { clean: false }) => {
                self.set_status(StatusKind::Info, "Pass complete, going through the page again");
            }
            Some(SetOutcome::Advanced { page }) => {
                let total = self.session.stats().total_pages;
                self.set_status(
                    StatusKind::Success,
                    format!("Page mastered, moving to page {} of {total}", page + 1),
                );
            }
            Some(SetOutcome::Finished) => {
                self.set_status(StatusKind::Success, "Every page mastered");
            }
            None => {}
        }
        self.surface_persist_error();
    }

    /// Ignored until the translation has been revealed.
    pub fn mark_missed(&mut self) {
        if !self.session.translation_visible() {
            return;
        }
        if self.session.mark_missed().is_some() {
            self.status = None;
            self.surface_persist_error();
        }
    }

    pub fn undo(&mut self) {
        if self.session.undo() {
            self.set_status(StatusKind::Info, "Undone");
            self.surface_persist_error();
        } else {
            self.set_status(StatusKind::Info, "Nothing to undo");
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.session.set_view_mode(mode);
        self.surface_persist_error();
    }

    fn surface_persist_error(&mut self) {
        if let Some(err) = self.session.last_persist_error() {
            let text = format!("Progress not saved: {err}");
            self.set_status(StatusKind::Error, text);
        }
    }

    pub fn go_to_learning(&mut self) {
        self.path_input = None;
        self.screen = AppScreen::Learning;
    }

    pub fn go_to_dictionary(&mut self) {
        self.dictionary_page = 0;
        self.screen = AppScreen::Dictionary;
    }

    pub fn dictionary_next(&mut self) {
        let total = DictionaryView::total_pages(self.session.catalog().len());
        if self.dictionary_page + 1 < total {
            self.dictionary_page += 1;
        }
    }

    pub fn dictionary_prev(&mut self) {
        self.dictionary_page = self.dictionary_page.saturating_sub(1);
    }

    pub fn go_to_load_words(&mut self) {
        self.path_input = Some(PathInput::new(""));
        self.screen = AppScreen::LoadWords;
    }

    /// Leave the load screen; with no catalog there is nothing to go back to.
    pub fn cancel_load_words(&mut self) {
        if self.session.catalog().is_empty() {
            self.should_quit = true;
        } else {
            self.go_to_learning();
        }
    }

    /// Load the file named in the path input. Errors stay on the load screen.
    pub fn submit_load_words(&mut self) {
        let Some(input) = self.path_input.as_ref() else {
            return;
        };
        let raw = input.expanded();
        if raw.is_empty() {
            self.set_status(StatusKind::Error, "Enter a path to a .json or .txt word list");
            return;
        }
        self.load_catalog_file(Path::new(&raw));
    }

    pub fn load_catalog_file(&mut self, path: &Path) -> bool {
        match loader::load_file(path) {
            Ok(words) => {
                let count = words.len();
                self.session.load_catalog(words);
                self.set_status(
                    StatusKind::Success,
                    format!("Loaded {count} words from {}", path.display()),
                );
                self.surface_persist_error();
                self.dictionary_page = 0;
                self.go_to_learning();
                true
            }
            Err(e) => {
                log::warn!("failed to load {}: {e}", path.display());
                self.set_status(StatusKind::Error, e.to_string());
                false
            }
        }
    }

    pub fn load_builtin(&mut self, name: &str) -> bool {
        match builtin::load(name) {
            Ok(words) => {
                let count = words.len();
                self.session.load_catalog(words);
                self.set_status(
                    StatusKind::Success,
                    format!("Loaded built-in list '{name}' ({count} words)"),
                );
                self.surface_persist_error();
                self.dictionary_page = 0;
                self.go_to_learning();
                true
            }
            Err(e) => {
                self.set_status(StatusKind::Error, e.to_string());
                false
            }
        }
    }

    pub fn reset_progress(&mut self) {
        self.session.reset_progress();
        self.set_status(StatusKind::Info, "Progress reset to page 1");
        self.surface_persist_error();
    }

    /// Switch to the next bundled theme and remember it in the config file.
    pub fn cycle_theme(&mut self) {
        let Some(name) = Theme::next_name(&self.config.theme) else {
            return;
        };
        let Some(theme) = Theme::load(&name) else {
            return;
        };
        self.theme = theme;
        self.config.theme = name;
        if let Err(e) = self.config.save() {
            log::warn!("failed to save config: {e}");
            self.set_status(StatusKind::Error, format!("Theme not saved: {e}"));
        } else {
            self.set_status(StatusKind::Info, format!("Theme: {}", self.config.theme));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::word::WordRecord;
    use crate::session::SessionOptions;

    fn words(n: usize) -> Vec<WordRecord> {
        (0..n)
            .map(|i| {
                WordRecord::new(&format!("w{i}"), "noun", "/w/").with_definitions([format!("d{i}")])
            })
            .collect()
    }

    fn app_with(n: usize) -> App {
        let session = LearningSession::new(words(n), SessionOptions::default());
        App::new(Config::default(), session)
    }

    #[test]
    fn test_empty_catalog_opens_load_screen() {
        let app = app_with(0);
        assert_eq!(app.screen, AppScreen::LoadWords);
        assert!(app.path_input.is_some());

        let app = app_with(3);
        assert_eq!(app.screen, AppScreen::Learning);
    }

    #[test]
    fn test_cancel_load_without_catalog_quits() {
        let mut app = app_with(0);
        app.cancel_load_words();
        assert!(app.should_quit);

        let mut app = app_with(2);
        app.go_to_load_words();
        app.cancel_load_words();
        assert!(!app.should_quit);
        assert_eq!(app.screen, AppScreen::Learning);
    }

    #[test]
    fn test_toggle_translation() {
        let mut app = app_with(2);
        app.toggle_translation();
        assert!(app.session.translation_visible());
        app.toggle_translation();
        assert!(!app.session.translation_visible());
    }

    #[test]
    fn test_answers_need_a_revealed_translation() {
        let mut app = app_with(3);
        let queue = app.session.queue().clone();
        let stats = app.session.stats().clone();

        app.mark_missed();
        assert!(!app.session.translation_visible());
        app.mark_known();
        assert!(app.session.translation_visible());

        assert_eq!(app.session.queue().words(), queue.words());
        assert_eq!(app.session.stats(), &stats);
        assert!(!app.session.can_undo());

        // revealed, the same keys grade the word and hide the next one
        app.mark_missed();
        assert_eq!(app.session.stats().missed_in_current_set, 1);
        assert!(!app.session.translation_visible());
        app.mark_known();
        assert_eq!(app.session.stats().missed_in_current_set, 1);
        assert_eq!(app.session.queue().len(), 3);
    }

    #[test]
    fn test_clean_pass_sets_status() {
        let mut app = app_with(1);
        app.toggle_translation();
        app.mark_known();
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Success);
        assert!(status.text.contains("1 high-quality"));
    }

    #[test]
    fn test_undo_status() {
        let mut app = app_with(3);
        app.undo();
        assert_eq!(app.status.as_ref().unwrap().text, "Nothing to undo");
        app.toggle_translation();
        app.mark_missed();
        app.undo();
        assert_eq!(app.status.as_ref().unwrap().text, "Undone");
        assert_eq!(app.session.queue().words()[0].miss_count, 0);
    }

    #[test]
    fn test_dictionary_paging_is_bounded() {
        let mut app = app_with(25);
        app.go_to_dictionary();
        app.dictionary_prev();
        assert_eq!(app.dictionary_page, 0);
        app.dictionary_next();
        app.dictionary_next();
        app.dictionary_next();
        assert_eq!(app.dictionary_page, 2);
    }

    #[test]
    fn test_load_catalog_file_errors_stay_on_screen() {
        let dir = tempfile::TempDir::new().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"[{"headword": "x"}]"#).unwrap();

        let mut app = app_with(0);
        assert!(!app.load_catalog_file(&bad));
        assert_eq!(app.screen, AppScreen::LoadWords);
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);

        let good = dir.path().join("good.txt");
        std::fs::write(
            &good,
            r#"{"words": [{"headword": "cat", "PoS": "noun", "IPA": "/kæt/", "definitions": ["кошка"], "examples": []}]}"#,
        )
        .unwrap();
        assert!(app.load_catalog_file(&good));
        assert_eq!(app.screen, AppScreen::Learning);
        assert_eq!(app.session.catalog().len(), 1);
    }

    #[test]
    fn test_load_builtin() {
        let mut app = app_with(0);
        assert!(app.load_builtin(builtin::DEFAULT_LIST));
        assert!(!app.session.catalog().is_empty());
        assert!(!app.load_builtin("no-such-list"));
    }
}
