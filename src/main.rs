mod app;
mod catalog;
mod config;
mod engine;
mod event;
mod session;
mod store;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use app::{App, AppScreen, StatusKind};
use catalog::{builtin, loader};
use config::Config;
use engine::view::ViewMode;
use event::{AppEvent, EventHandler};
use session::LearningSession;
use store::json_store::JsonStore;
use store::schema::LEARNING_STATE_KEY;
use ui::components::dictionary::DictionaryView;
use ui::components::progress_bar::ProgressBar;
use ui::components::session_sidebar::SessionSidebar;
use ui::components::stats_header::StatsHeader;
use ui::components::word_card::WordCard;
use ui::components::word_list::WordList;
use ui::layout::{AppLayout, pack_hint_lines};

#[derive(Parser)]
#[command(
    name = "lexdrill",
    version,
    about = "Terminal vocabulary drill with a spaced re-exposure learning queue"
)]
struct Cli {
    #[arg(short, long, help = "Load a word list (.json or .txt) and start over")]
    catalog: Option<PathBuf>,

    #[arg(short, long, help = "Load a built-in word list by name and start over")]
    builtin: Option<String>,

    #[arg(short, long, help = "Words per page")]
    words_per_page: Option<usize>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "View mode used when no progress is saved (v1-v4)")]
    view: Option<ViewMode>,

    #[arg(long, help = "Discard saved progress and start the catalog from page 1")]
    reset: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(n) = cli.words_per_page {
        config.words_per_page = n;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(view) = cli.view {
        config.default_view = view;
    }
    config.normalize();

    init_logging(&config)?;

    let store = JsonStore::with_base_dir(config.data_path())
        .with_context(|| format!("cannot open data directory {}", config.data_dir))?;
    if cli.reset {
        store.clear(&[LEARNING_STATE_KEY])?;
        log::info!("saved progress cleared");
    }

    let mut session = LearningSession::restore(Box::new(store), config.session_options());
    if let Some(path) = cli.catalog {
        let words = loader::load_file(&path)
            .with_context(|| format!("cannot load word list {}", path.display()))?;
        session.load_catalog(words);
    } else if let Some(name) = cli.builtin {
        let words = builtin::load(&name).with_context(|| {
            format!("available lists: {}", builtin::available().join(", "))
        })?;
        session.load_catalog(words);
    }

    let mut app = App::new(config, session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("{err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// The terminal belongs to the TUI, so log records go to a file in the data
/// directory. `RUST_LOG` overrides the default `warn` filter.
fn init_logging(config: &Config) -> Result<()> {
    let dir = config.data_path();
    fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("lexdrill.log"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Learning => handle_learning_key(app, key),
        AppScreen::Dictionary => handle_dictionary_key(app, key),
        AppScreen::LoadWords => handle_load_words_key(app, key),
    }
}

fn handle_learning_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('z') if ctrl => app.undo(),
        KeyCode::Char('u') => app.undo(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(' ') => app.toggle_translation(),
        KeyCode::Right | KeyCode::Char('l') => app.mark_known(),
        KeyCode::Left | KeyCode::Char('h') => app.mark_missed(),
        KeyCode::Char(ch @ '1'..='4') => {
            if let Some(mode) = ViewMode::from_digit(ch) {
                app.set_view_mode(mode);
            }
        }
        KeyCode::Char('d') => app.go_to_dictionary(),
        KeyCode::Char('o') => app.go_to_load_words(),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('R') => app.reset_progress(),
        _ => {}
    }
}

fn handle_dictionary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('d') => app.go_to_learning(),
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => app.dictionary_next(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => app.dictionary_prev(),
        _ => {}
    }
}

fn handle_load_words_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('b') {
        app.load_builtin(builtin::DEFAULT_LIST);
        return;
    }

    let Some(input) = app.path_input.as_mut() else {
        app.go_to_learning();
        return;
    };
    match input.handle(key) {
        ui::path_input::InputResult::Submit => app.submit_load_words(),
        ui::path_input::InputResult::Cancel => app.cancel_load_words(),
        ui::path_input::InputResult::Continue => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Learning => render_learning(frame, app),
        AppScreen::Dictionary => render_dictionary(frame, app),
        AppScreen::LoadWords => render_load_words(frame, app),
    }
}

fn render_learning(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let session = &app.session;
    let layout = AppLayout::new(area);

    frame.render_widget(
        StatsHeader::new(session.stats(), session.view_mode(), &app.theme),
        layout.header,
    );

    let mode = session.view_mode();
    if !mode.is_list() {
        match session.current_word() {
            Some(word) => frame.render_widget(
                WordCard::new(word, session.translation_visible(), &app.theme),
                layout.main,
            ),
            None => render_all_learned(frame, app, layout.main),
        }
    } else {
        let words = session.words_for_view();
        let current_id = session.current_word().map(|w| w.id.as_str());
        frame.render_widget(
            WordList::new(&words, mode, session.current_index(), current_id, &app.theme),
            layout.main,
        );
    }

    if let Some(sidebar) = layout.sidebar {
        frame.render_widget(SessionSidebar::new(session, &app.theme), sidebar);
    }

    if let Some(progress_area) = layout.progress {
        let bounds = session
            .pager()
            .page_bounds(session.stats().current_page, session.catalog().len());
        let done = bounds.len().saturating_sub(session.queue().len());
        frame.render_widget(
            ProgressBar::new("Page progress", done, bounds.len(), &app.theme),
            progress_area,
        );
    }

    let hints = [
        "[Space] Reveal",
        "[→/l] Know",
        "[←/h] Miss",
        "[u/Ctrl+Z] Undo",
        "[1-4] View",
        "[d] Dictionary",
        "[o] Open list",
        "[t] Theme",
        "[q] Quit",
    ];
    render_footer(frame, app, &hints, layout.footer);
}

fn render_all_learned(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let block = Block::bordered()
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "All words learned!",
            Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} words mastered", app.session.catalog().len()),
            Style::default().fg(colors.fg()),
        )),
        Line::from(Span::styled(
            "Press 4 to review the last page, o to open another list",
            Style::default().fg(colors.muted()),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, frame.buffer_mut());
}

fn render_dictionary(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    frame.render_widget(
        DictionaryView::new(app.session.catalog(), app.dictionary_page, &app.theme),
        chunks[0],
    );
    render_footer(
        frame,
        app,
        &["[←/→] Page", "[Esc/d] Back", "[q] Quit"],
        chunks[1],
    );
}

fn render_load_words(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(70, 50, area);
    let block = Block::bordered()
        .title(" Load word list ")
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let intro = if app.session.catalog().is_empty() {
        "Your dictionary is empty. Load a .json or .txt file with an array of words \
         (headword, PoS, IPA, definitions, examples)."
    } else {
        "Loading a new list replaces the dictionary and starts over from page 1."
    };
    Paragraph::new(intro)
        .style(Style::default().fg(colors.fg()))
        .wrap(Wrap { trim: true })
        .render(rows[0], frame.buffer_mut());

    if let Some(input) = &app.path_input {
        let (before, cursor, after) = input.render_parts();
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.accent());
        let line = Line::from(vec![
            Span::styled("Path: ", Style::default().fg(colors.muted())),
            Span::styled(before.to_string(), Style::default().fg(colors.fg())),
            Span::styled(cursor.map(String::from).unwrap_or_else(|| " ".into()), cursor_style),
            Span::styled(after.to_string(), Style::default().fg(colors.fg())),
        ]);
        Paragraph::new(line).render(rows[1], frame.buffer_mut());

        if input.completion_error {
            Paragraph::new(Span::styled(
                "Cannot read that directory",
                Style::default().fg(colors.warning()),
            ))
            .render(rows[2], frame.buffer_mut());
        }
    }

    let hint = Line::from(Span::styled(
        format!(
            "[Enter] Load  [Tab] Complete  [Ctrl+B] Built-in '{}'  [Esc] Back",
            builtin::DEFAULT_LIST
        ),
        Style::default().fg(colors.accent()),
    ));
    let mut lines = vec![hint];
    if let Some(status) = &app.status {
        lines.push(status_line(app, status));
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(rows[3], frame.buffer_mut());
}

fn status_line<'a>(app: &App, status: &'a app::StatusMessage) -> Line<'a> {
    let colors = &app.theme.colors;
    let color = match status.kind {
        StatusKind::Info => colors.accent(),
        StatusKind::Success => colors.success(),
        StatusKind::Error => colors.error(),
    };
    Line::from(Span::styled(status.text.as_str(), Style::default().fg(color)))
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, hints: &[&str], area: Rect) {
    let colors = &app.theme.colors;
    let block = Block::bordered().border_style(Style::default().fg(colors.border()));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let line = match &app.status {
        Some(status) if app.screen != AppScreen::LoadWords => status_line(app, status),
        _ => {
            let packed = pack_hint_lines(hints, inner.width as usize);
            Line::from(Span::styled(
                packed.into_iter().next().unwrap_or_default(),
                Style::default().fg(colors.muted()),
            ))
        }
    };
    Paragraph::new(line).render(inner, frame.buffer_mut());
}
