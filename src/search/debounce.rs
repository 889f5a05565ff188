//! Search input debouncing
//!
//! Raw keystrokes do not refilter the tree directly. Each keystroke (re)arms
//! a single deadline; the query is applied once no keystroke has arrived for
//! the whole window. Time is passed in by the caller so the machine can be
//! driven by a real event loop or by tests.
//!
//! | phase      | event          | next phase  | effect             |
//! |------------|----------------|-------------|--------------------|
//! | Idle       | keystroke ""   | Idle        | -                  |
//! | Idle       | keystroke q    | Debouncing  | -                  |
//! | Debouncing | keystroke q    | Debouncing  | - (deadline reset) |
//! | Debouncing | fire, q        | Filtered    | `Recompute(q)`     |
//! | Debouncing | fire, ""       | Idle        | `ResetExpansion`   |
//! | Filtered   | keystroke q    | Debouncing  | -                  |
//! | *          | clear          | Idle        | `ResetExpansion`   |
//!
//! A fire before the deadline does nothing. Expansion is only reset when
//! leaving a previously applied query, never on ordinary keystrokes.

use std::time::{Duration, Instant};
use tracing::trace;

/// Default quiescence window
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(150);

/// Where the search input currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPhase {
    /// No query applied
    Idle,
    /// A keystroke arrived and the window has not elapsed yet
    Debouncing {
        /// Latest raw input
        pending: String,
        /// When `pending` becomes due
        deadline: Instant,
        /// Query still shown while waiting, if one was applied before
        applied: Option<String>,
    },
    /// A stable query is applied
    Filtered { query: String },
}

/// Input to the debouncer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The raw input changed to this text
    Keystroke(String),
    /// The pending deadline may have passed
    TimerFire,
    /// The input was cleared explicitly
    Clear,
}

/// What the caller has to do after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    None,
    /// Refilter the tree with this query
    Recompute(String),
    /// Leave search mode: collapse every category and subcategory
    ResetExpansion,
}

/// Debounced search input state machine
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    phase: SearchPhase,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Debouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            phase: SearchPhase::Idle,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    #[must_use]
    pub const fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// The query the displayed tree is filtered by
    #[must_use]
    pub fn active_query(&self) -> Option<&str> {
        match &self.phase {
            SearchPhase::Idle => None,
            SearchPhase::Debouncing { applied, .. } => applied.as_deref(),
            SearchPhase::Filtered { query } => Some(query),
        }
    }

    /// The pending deadline, if a keystroke is waiting
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        match &self.phase {
            SearchPhase::Debouncing { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    /// Apply one event at time `now`
    pub fn handle(&mut self, event: SearchEvent, now: Instant) -> SearchEffect {
        let phase = std::mem::replace(&mut self.phase, SearchPhase::Idle);
        let (next, effect) = self.transition(phase, event, now);
        trace!(?next, ?effect, "search transition");
        self.phase = next;
        effect
    }

    pub fn keystroke(&mut self, text: impl Into<String>, now: Instant) -> SearchEffect {
        self.handle(SearchEvent::Keystroke(text.into()), now)
    }

    pub fn fire(&mut self, now: Instant) -> SearchEffect {
        self.handle(SearchEvent::TimerFire, now)
    }

    pub fn clear(&mut self, now: Instant) -> SearchEffect {
        self.handle(SearchEvent::Clear, now)
    }

    fn transition(
        &self,
        phase: SearchPhase,
        event: SearchEvent,
        now: Instant,
    ) -> (SearchPhase, SearchEffect) {
        use SearchEffect as E;
        use SearchPhase as P;

        match (phase, event) {
            (P::Idle, SearchEvent::Keystroke(text)) if super::is_blank(&text) => (P::Idle, E::None),
            (P::Idle, SearchEvent::Keystroke(pending)) => (
                P::Debouncing {
                    pending,
                    deadline: now + self.window,
                    applied: None,
                },
                E::None,
            ),
            (P::Debouncing { applied, .. }, SearchEvent::Keystroke(pending)) => (
                P::Debouncing {
                    pending,
                    deadline: now + self.window,
                    applied,
                },
                E::None,
            ),
            (P::Filtered { query }, SearchEvent::Keystroke(pending)) => (
                P::Debouncing {
                    pending,
                    deadline: now + self.window,
                    applied: Some(query),
                },
                E::None,
            ),

            (
                P::Debouncing {
                    pending,
                    deadline,
                    applied,
                },
                SearchEvent::TimerFire,
            ) => {
                if now < deadline {
                    (
                        P::Debouncing {
                            pending,
                            deadline,
                            applied,
                        },
                        E::None,
                    )
                } else if super::is_blank(&pending) {
                    (P::Idle, reset_if(applied.is_some()))
                } else {
                    (
                        P::Filtered {
                            query: pending.clone(),
                        },
                        E::Recompute(pending),
                    )
                }
            }
            (phase @ (P::Idle | P::Filtered { .. }), SearchEvent::TimerFire) => (phase, E::None),

            (P::Idle, SearchEvent::Clear) => (P::Idle, E::None),
            (P::Debouncing { applied, .. }, SearchEvent::Clear) => {
                (P::Idle, reset_if(applied.is_some()))
            }
            (P::Filtered { .. }, SearchEvent::Clear) => (P::Idle, E::ResetExpansion),
        }
    }
}

const fn reset_if(applied: bool) -> SearchEffect {
    if applied {
        SearchEffect::ResetExpansion
    } else {
        SearchEffect::None
    }
}
