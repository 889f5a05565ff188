//! Interactive session state
//!
//! Ties the store, the search debouncer and the load status together and
//! routes discrete user actions to them. Frontends own the clock and the
//! terminal; they call into the session and redraw from [`Session::rows`].

use crate::search::{Debouncer, SearchEffect};
use crate::source::{LoadFailure, TaxonomySource};
use crate::state::{SelectedItem, TreeState};
use crate::taxonomy::{NodePath, Taxonomy, TaxonomyStore};
use crate::view::{Row, visible_rows};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Status of the most recent load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet
    Empty,
    /// A load is in flight
    Loading,
    /// The store holds the result of the last load
    Ready,
    /// The last load failed; the store keeps whatever it held before
    Failed {
        message: String,
        /// Whether reloading the same source is expected to help
        retryable: bool,
    },
}

/// One browsing session over a taxonomy
#[derive(Debug)]
pub struct Session {
    store: TaxonomyStore,
    debouncer: Debouncer,
    /// Raw contents of the search box
    input: String,
    load_state: LoadState,
    /// Bumped whenever the displayed projection changes
    generation: u64,
}

impl Session {
    /// Empty session waiting for its first load
    #[must_use]
    pub fn new(debounce_window: Duration) -> Self {
        Self {
            store: TaxonomyStore::default(),
            debouncer: Debouncer::new(debounce_window),
            input: String::new(),
            load_state: LoadState::Empty,
            generation: 0,
        }
    }

    /// Session over an already loaded taxonomy
    #[must_use]
    pub fn with_taxonomy(taxonomy: Taxonomy, debounce_window: Duration) -> Self {
        let mut session = Self::new(debounce_window);
        session.store = TaxonomyStore::new(taxonomy);
        session.load_state = LoadState::Ready;
        session
    }

    #[must_use]
    pub const fn store(&self) -> &TaxonomyStore {
        &self.store
    }

    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    /// Raw search box text
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Query the displayed tree is filtered by
    #[must_use]
    pub fn active_query(&self) -> Option<&str> {
        self.debouncer.active_query()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn debounce_window(&self) -> Duration {
        self.debouncer.window()
    }

    /// When the pending keystroke becomes due, if any
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    // Loading

    /// Mark a load as started
    ///
    /// Returns `false` when a load is already in flight; the caller must not
    /// start another one.
    pub fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            debug!("load already in flight, ignoring refresh");
            return false;
        }
        self.load_state = LoadState::Loading;
        true
    }

    /// Apply the outcome of a load started with [`Session::begin_load`]
    ///
    /// On success the store is replaced wholesale. On failure the previous
    /// store is kept and the error is recorded for display.
    pub fn finish_load(&mut self, result: Result<Taxonomy, LoadFailure>) {
        match result {
            Ok(taxonomy) => {
                info!(nodes = taxonomy.node_count(), "taxonomy loaded");
                self.store.replace(taxonomy);
                self.load_state = LoadState::Ready;
                self.generation += 1;
            }
            Err(err) => {
                warn!(error = %err, "taxonomy load failed");
                self.load_state = LoadState::Failed {
                    message: err.to_string(),
                    retryable: err.is_retryable(),
                };
            }
        }
    }

    /// Load synchronously from `source`
    ///
    /// Does nothing if a load is already in flight.
    pub fn load_from(&mut self, source: &dyn TaxonomySource) {
        if self.begin_load() {
            debug!(source = %source.describe(), "loading taxonomy");
            self.finish_load(source.load());
        }
    }

    // Search

    /// Replace the search box text
    pub fn set_input(&mut self, text: impl Into<String>, now: Instant) {
        self.input = text.into();
        let effect = self.debouncer.keystroke(self.input.clone(), now);
        self.apply(effect);
    }

    pub fn push_char(&mut self, ch: char, now: Instant) {
        let mut text = self.input.clone();
        text.push(ch);
        self.set_input(text, now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        let mut text = self.input.clone();
        if text.pop().is_some() {
            self.set_input(text, now);
        }
    }

    /// Empty the search box immediately, leaving search mode
    pub fn clear_search(&mut self, now: Instant) {
        self.input.clear();
        let effect = self.debouncer.clear(now);
        self.apply(effect);
    }

    /// Advance the debounce timer; returns `true` if the view changed
    pub fn tick(&mut self, now: Instant) -> bool {
        let effect = self.debouncer.fire(now);
        self.apply(effect)
    }

    fn apply(&mut self, effect: SearchEffect) -> bool {
        match effect {
            SearchEffect::None => false,
            SearchEffect::Recompute(query) => {
                debug!(%query, "search applied");
                self.generation += 1;
                true
            }
            SearchEffect::ResetExpansion => {
                debug!("search cleared, collapsing tree");
                self.store.update(|_, state| state.collapsed_all());
                self.generation += 1;
                true
            }
        }
    }

    // Selection and expansion

    /// Click on the selection control of `path`
    ///
    /// Honours the selection lock: while another node is selected this does
    /// nothing. Clicking the selected node toggles it off. Returns `true`
    /// if the selection changed.
    pub fn activate(&mut self, path: &NodePath) -> bool {
        if !self.store.state().is_selectable(path) {
            debug!(%path, "activation ignored: selection locked");
            return false;
        }
        self.update_state(|tax, state| state.select(tax, path.clone()))
    }

    /// Drop the selection from anywhere
    pub fn clear_selection(&mut self) -> bool {
        self.update_state(|_, state| state.cleared())
    }

    /// Expand or collapse the category/subcategory at `path`
    pub fn toggle_expanded(&mut self, path: &NodePath) -> bool {
        self.update_state(|tax, state| state.toggle_expanded(tax, path))
    }

    fn update_state<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&Taxonomy, &TreeState) -> TreeState,
    {
        let before = Arc::clone(self.store.state());
        self.store.update(f);
        let changed = !Arc::ptr_eq(&before, self.store.state());
        if changed {
            self.generation += 1;
        }
        changed
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<SelectedItem> {
        self.store.selected_item()
    }

    /// Rows to draw, in display order
    #[must_use]
    pub fn rows(&self) -> Vec<Row<'_>> {
        visible_rows(
            self.store.taxonomy(),
            self.store.state(),
            self.store.line_ids(),
            self.active_query(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::debounce::DEFAULT_WINDOW;
    use crate::source::FixtureSource;
    use crate::taxonomy::NodeKind;
    use crate::testing::{FailingSource, sample_session, sample_taxonomy};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_load_from_fixture() {
        let mut session = Session::new(DEFAULT_WINDOW);
        assert_eq!(session.load_state(), &LoadState::Empty);
        session.load_from(&FixtureSource);
        assert_eq!(session.load_state(), &LoadState::Ready);
        assert_eq!(session.rows().len(), 7);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_tree() {
        let mut session = sample_session();
        session.activate(&NodePath::category("tax-records"));

        session.load_from(&FailingSource);

        assert!(matches!(
            session.load_state(),
            LoadState::Failed { message, retryable: true } if message.contains("503")
        ));
        assert_eq!(session.store().taxonomy().as_ref(), &sample_taxonomy());
        assert!(session.store().state().is_selected(&NodePath::category("tax-records")));
    }

    #[test]
    fn test_failed_first_load_leaves_empty_tree() {
        let mut session = Session::new(DEFAULT_WINDOW);
        session.load_from(&FailingSource);
        assert!(session.rows().is_empty());
        session.load_from(&FixtureSource);
        assert_eq!(session.load_state(), &LoadState::Ready);
    }

    #[test]
    fn test_no_second_load_while_in_flight() {
        let mut session = Session::new(DEFAULT_WINDOW);
        assert!(session.begin_load());
        assert!(!session.begin_load());
        session.finish_load(Ok(sample_taxonomy()));
        assert!(session.begin_load());
    }

    #[test]
    fn test_reload_resets_state_and_selection() {
        let mut session = sample_session();
        session.activate(&NodePath::category("tax-records"));
        session.toggle_expanded(&NodePath::category("hr-records"));

        session.load_from(&FixtureSource);

        assert!(session.selected_item().is_none());
        assert_eq!(session.store().state().expanded_count(), 0);
    }

    #[test]
    fn test_activate_respects_lock() {
        let mut session = sample_session();
        let tax = NodePath::category("tax-records");
        let hr = NodePath::category("hr-records");

        assert!(session.activate(&tax));
        assert!(!session.activate(&hr));
        assert!(session.store().state().is_selected(&tax));

        // Re-clicking the selected node unlocks
        assert!(session.activate(&tax));
        assert!(session.selected_item().is_none());
        assert!(session.activate(&hr));
    }

    #[test]
    fn test_expansion_works_while_locked() {
        let mut session = sample_session();
        session.activate(&NodePath::category("tax-records"));
        assert!(session.toggle_expanded(&NodePath::category("hr-records")));
    }

    #[test]
    fn test_unknown_activation_is_noop() {
        let mut session = sample_session();
        let generation = session.generation();
        assert!(!session.activate(&NodePath::category("gone")));
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn test_search_applies_after_window() {
        let t0 = Instant::now();
        let mut session = sample_session();
        for (i, ch) in "tax".chars().enumerate() {
            session.push_char(ch, t0 + ms(i as u64 * 50));
        }
        assert_eq!(session.active_query(), None);
        assert_eq!(session.rows().len(), 7);

        assert!(!session.tick(t0 + ms(200)));
        assert!(session.tick(t0 + ms(250)));
        assert_eq!(session.active_query(), Some("tax"));

        let rows = session.rows();
        assert!(rows.iter().any(|r| r.kind() == NodeKind::RecordType));
        assert!(rows.iter().filter(|r| r.kind() != NodeKind::RecordType).all(|r| r.expanded));
    }

    #[test]
    fn test_clearing_search_collapses_everything() {
        let t0 = Instant::now();
        let mut session = sample_session();
        session.toggle_expanded(&NodePath::category("hr-records"));
        session.set_input("tax", t0);
        session.tick(t0 + DEFAULT_WINDOW);

        session.clear_search(t0 + ms(500));

        assert_eq!(session.input(), "");
        assert_eq!(session.active_query(), None);
        assert_eq!(session.store().state().expanded_count(), 0);
        assert!(session.rows().iter().all(|r| !r.expanded));
    }

    #[test]
    fn test_manual_expansion_survives_query_changes() {
        let t0 = Instant::now();
        let mut session = sample_session();
        let hr = NodePath::category("hr-records");
        session.toggle_expanded(&hr);

        session.set_input("tax", t0);
        session.tick(t0 + DEFAULT_WINDOW);
        session.set_input("payroll", t0 + ms(200));
        session.tick(t0 + ms(200) + DEFAULT_WINDOW);

        assert!(session.store().state().is_expanded(&hr));
    }

    #[test]
    fn test_pop_char_on_empty_input_is_noop() {
        let t0 = Instant::now();
        let mut session = sample_session();
        session.pop_char(t0);
        assert_eq!(session.next_deadline(), None);
    }

    #[test]
    fn test_selection_hidden_by_filter_is_still_cleared() {
        let t0 = Instant::now();
        let mut session = sample_session();
        session.activate(&NodePath::record("hr-records", "employee-files", "performance-reviews"));
        session.set_input("tax", t0);
        session.tick(t0 + DEFAULT_WINDOW);

        // The selected record is filtered out, but the lock still applies
        assert!(session.rows().iter().all(|r| !r.selectable));
        session.clear_selection();
        assert!(session.rows().iter().all(|r| r.selectable));
    }
}
