//! Ratatui-based tree browser
//!
//! Owns the terminal and the event loop. Loading runs on a background
//! thread and reports back over a channel, so the tree stays responsive
//! while a slow endpoint is fetched.

use super::events::{EventResult, poll_and_handle};
use super::state::ViewState;
use super::theme::Theme;
use super::widgets::{HelpBar, HintContext, SearchBar, StatusBar, TreeList};
use crate::session::{LoadState, Session};
use crate::source::{LoadFailure, TaxonomySource};
use crate::state::SelectedItem;
use crate::taxonomy::Taxonomy;
use crate::ui::error::{Result, UiError};
use crate::view::Row;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Longest wait for terminal input when no debounce deadline is pending
const IDLE_POLL: Duration = Duration::from_millis(50);

type LoadResult = std::result::Result<Taxonomy, LoadFailure>;

/// Runs loads on a worker thread, one at a time
struct Loader {
    source: Arc<dyn TaxonomySource>,
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
}

impl Loader {
    fn new(source: Arc<dyn TaxonomySource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tx, rx }
    }

    /// Start a load unless one is already in flight
    fn request(&self, session: &mut Session) {
        if !session.begin_load() {
            return;
        }
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        debug!(source = %source.describe(), "starting background load");
        thread::spawn(move || {
            // The receiver only goes away when the browser has exited
            let _ = tx.send(source.load());
        });
    }

    /// Hand a finished load to the session
    fn poll(&self, session: &mut Session) -> Result<bool> {
        match self.rx.try_recv() {
            Ok(result) => {
                session.finish_load(result);
                Ok(true)
            }
            Err(TryRecvError::Empty) => Ok(false),
            Err(TryRecvError::Disconnected) => Err(UiError::LoaderDisconnected),
        }
    }
}

/// Interactive taxonomy browser
pub struct Browser {
    theme: Theme,
}

impl Default for Browser {
    fn default() -> Self {
        Self::new()
    }
}

impl Browser {
    /// Create a new browser
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
        }
    }

    /// Set custom theme
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    /// Browse the taxonomy produced by `source`
    ///
    /// Loading starts immediately in the background. `query`, if given, is
    /// applied as soon as the tree is shown. Returns the item that was
    /// selected when the user quit.
    ///
    /// # Errors
    ///
    /// Returns `UiError` if the terminal cannot be set up or drawn to.
    pub fn run(
        &self,
        session: &mut Session,
        source: Arc<dyn TaxonomySource>,
        query: Option<&str>,
    ) -> Result<Option<SelectedItem>> {
        let mut terminal = Self::setup_terminal()?;

        // Run the event loop, ensuring cleanup happens
        let result = self.run_loop(&mut terminal, session, source, query);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            warn!(error = %e, "terminal cleanup failed");
        }

        result
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        session: &mut Session,
        source: Arc<dyn TaxonomySource>,
        query: Option<&str>,
    ) -> Result<Option<SelectedItem>> {
        let source_name = source.describe();
        let loader = Loader::new(source);
        let mut view = ViewState::new();

        loader.request(session);
        if let Some(query) = query {
            let now = Instant::now();
            session.set_input(query, now);
            session.tick(now + session.debounce_window());
        }

        while !view.should_exit {
            loader.poll(session)?;
            session.tick(Instant::now());

            terminal.draw(|frame| self.render(frame, session, &mut view, &source_name))?;

            let timeout = session
                .next_deadline()
                .map_or(IDLE_POLL, |deadline| {
                    deadline.saturating_duration_since(Instant::now()).min(IDLE_POLL)
                });

            match poll_and_handle(session, &mut view, timeout)? {
                EventResult::Quit => view.should_exit = true,
                EventResult::Reload => loader.request(session),
                EventResult::Continue | EventResult::Ignored => {}
            }
        }

        Ok(session.selected_item())
    }

    fn render(&self, frame: &mut Frame, session: &Session, view: &mut ViewState, source_name: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(3),    // Tree
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let rows = session.rows();
        view.visible_height = chunks[1].height.saturating_sub(2) as usize;
        view.sync(rows.len());

        let search = SearchBar::new(session.input(), ">", &self.theme)
            .pending(session.next_deadline().is_some());
        frame.render_widget(search, chunks[0]);

        let title = match session.active_query() {
            Some(query) => format!(" Taxonomy · {} matches for \"{query}\" ", match_count(&rows)),
            None => " Taxonomy ".to_string(),
        };
        let placeholder = match session.load_state() {
            LoadState::Loading | LoadState::Empty => "Loading…",
            LoadState::Failed { .. } => "Could not load the taxonomy",
            LoadState::Ready if session.active_query().is_some() => "No matches",
            LoadState::Ready => "No categories",
        };
        let tree = TreeList::new(&rows, view, &self.theme)
            .title(title)
            .placeholder(placeholder);
        frame.render_widget(tree, chunks[1]);

        let selected = session.selected_item();
        let status = StatusBar::new(session.load_state(), selected.as_ref(), source_name, &self.theme);
        frame.render_widget(status, chunks[2]);

        let hints = HintContext::new(session, rows.get(view.cursor));
        frame.render_widget(HelpBar::new(hints, &self.theme), chunks[3]);
    }
}

/// Rows whose own name matched, as opposed to ancestors kept for context
/// and children of a matching subcategory
fn match_count(rows: &[Row<'_>]) -> usize {
    rows.iter()
        .filter(|row| row.segments.iter().any(|segment| segment.matched))
        .count()
}
