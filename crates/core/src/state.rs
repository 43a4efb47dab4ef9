//! View state and its transitions.
//!
//! `ViewState` is the single source of truth for what the page shows:
//! which section is current, which view mode is active and whether a
//! navigation is in progress. Everything the page displays is derived
//! from it.

use lexi_types::{SectionIndex, SectionVisibility, ViewMode};

/// Why a request did not change anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Another navigation is still in progress; the request is dropped.
    Busy,
    /// The target lies outside `[0, total)`.
    OutOfRange(i64),
    /// A `popstate` entry without a section index.
    NoHistoryState,
    /// The requested view mode is already active.
    Unchanged,
}

/// Proof that a navigation was accepted.
///
/// Carries the generation it was accepted under so a response arriving
/// after the state has moved on can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTicket {
    index: SectionIndex,
    generation: u64,
}

impl NavigationTicket {
    pub fn index(&self) -> SectionIndex {
        self.index
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    current: SectionIndex,
    total: usize,
    mode: ViewMode,
    navigating: bool,
    server_rendered: bool,
    generation: u64,
    toc_expanded: bool,
}

impl ViewState {
    pub fn new(total: usize, current: SectionIndex, mode: ViewMode, server_rendered: bool) -> Self {
        Self {
            current: SectionIndex::clamped(current.as_i64(), total),
            total,
            mode,
            navigating: false,
            server_rendered,
            generation: 0,
            toc_expanded: false,
        }
    }

    pub fn current(&self) -> SectionIndex {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    pub fn is_server_rendered(&self) -> bool {
        self.server_rendered
    }

    pub fn toc_expanded(&self) -> bool {
        self.toc_expanded
    }

    /// Accept a navigation to `target`, or say why not.
    ///
    /// On acceptance the navigator becomes busy and `current` moves to the
    /// target immediately; [`finish`] must follow whatever happens next.
    ///
    /// [`finish`]: ViewState::finish
    pub fn begin(&mut self, target: i64) -> Result<NavigationTicket, Rejection> {
        if self.navigating {
            return Err(Rejection::Busy);
        }
        let index = SectionIndex::checked(target, self.total).ok_or(Rejection::OutOfRange(target))?;

        self.navigating = true;
        self.current = index;
        self.generation += 1;
        Ok(NavigationTicket {
            index,
            generation: self.generation,
        })
    }

    /// End the navigation in progress, successful or not.
    pub fn finish(&mut self) {
        self.navigating = false;
    }

    /// Whether no other navigation was accepted since `ticket`.
    pub fn is_current(&self, ticket: &NavigationTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Take over the index the server declared for `ticket`'s request.
    ///
    /// Only in-range values are adopted. Returns the index that is current
    /// afterwards.
    pub fn adopt(&mut self, ticket: &NavigationTicket, declared: i64) -> SectionIndex {
        if self.is_current(ticket) {
            if let Some(index) = SectionIndex::checked(declared, self.total) {
                self.current = index;
            }
        }
        self.current
    }

    /// Move `current` without a navigation (full-text scrolling).
    pub fn jump_to(&mut self, index: SectionIndex) {
        if index.get() < self.total {
            self.current = index;
        }
    }

    /// Returns `false` when `mode` was already active.
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn toggle_toc(&mut self) -> bool {
        self.toc_expanded = !self.toc_expanded;
        self.toc_expanded
    }

    /// Which pre-rendered sections should be visible right now.
    pub fn visibility(&self) -> SectionVisibility {
        SectionVisibility::for_mode(self.mode, self.current)
    }

    /// The index `step` sections away from `current`, unchecked.
    pub fn offset(&self, step: i64) -> i64 {
        self.current.as_i64().saturating_add(step)
    }
}
