//! Navigation controls: their rendered state and the inputs they produce.
//!
//! Rendering is a projection of [`ViewState`]; the host applies the
//! returned [`ControlsState`] to every control instance on the page. Inputs
//! arrive as [`Command`]s, whatever element or event produced them.

use crate::state::ViewState;
use lexi_types::{ControlsState, HistoryState, Labels, ViewMode};
use std::collections::HashSet;
use std::hash::Hash;

/// Computes the rendered state of every navigation control.
pub fn project(state: &ViewState, labels: &Labels) -> ControlsState {
    let current = state.current();
    let total = state.total();
    ControlsState {
        current,
        total,
        mode: state.mode(),
        navigating: state.is_navigating(),
        prev_disabled: current.get() == 0,
        next_disabled: total == 0 || current.is_last(total),
        prev_label: labels.previous_aria(),
        next_label: labels.next_aria(),
        jump_value: current.get().to_string(),
        jump_display: current.ordinal().to_string(),
    }
}

/// Direction of a relative move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

impl Step {
    pub fn delta(self) -> i64 {
        match self {
            Step::Previous => -1,
            Step::Next => 1,
        }
    }
}

/// Maps a `KeyboardEvent.key` value to a step.
pub fn key_step(key: &str) -> Option<Step> {
    match key {
        "ArrowLeft" => Some(Step::Previous),
        "ArrowRight" => Some(Step::Next),
        _ => None,
    }
}

/// A user or browser input the navigator reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A table-of-contents link was activated (`-1` is the document top).
    Toc(i64),
    /// A previous/next button or arrow key.
    Step(Step),
    /// The jump select changed.
    Jump(i64),
    SetMode(ViewMode),
    ToggleToc,
    /// A `popstate` event with whatever state it carried.
    Restore(Option<HistoryState>),
}

/// Tracks whether the primary view toggle is on screen and decides when
/// the floating copy should change visibility.
#[derive(Debug, Default, Clone, Copy)]
pub struct FloatingToggle {
    visible: bool,
}

impl FloatingToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feed one intersection observation of the primary toggle. Returns the
    /// new visibility of the floating copy when it changes.
    pub fn observe(&mut self, primary_in_view: bool) -> Option<bool> {
        let visible = !primary_in_view;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }
}

/// Kinds of control the host attaches listeners to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    TocLinks,
    PrevButtons,
    NextButtons,
    JumpSelect,
    Keyboard,
    ViewToggle,
    FloatingToggle,
    TocToggle,
    Print,
    CopyCitation,
    PopState,
}

impl ControlKind {
    pub const ALL: [ControlKind; 11] = [
        ControlKind::TocLinks,
        ControlKind::PrevButtons,
        ControlKind::NextButtons,
        ControlKind::JumpSelect,
        ControlKind::Keyboard,
        ControlKind::ViewToggle,
        ControlKind::FloatingToggle,
        ControlKind::TocToggle,
        ControlKind::Print,
        ControlKind::CopyCitation,
        ControlKind::PopState,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindingKey {
    Control(ControlKind),
    /// A subtree whose commentary toggles are handled by one delegated
    /// listener, keyed by a stable identifier of its root.
    CommentaryRoot(String),
}

/// Remembers what already has listeners attached.
///
/// Every bind goes through [`claim`]; a second claim for the same key is
/// refused, so binding twice never doubles a handler.
///
/// [`claim`]: BindingRegistry::claim
#[derive(Debug, Clone)]
pub struct BindingRegistry<K = BindingKey> {
    bound: HashSet<K>,
}

impl<K> Default for BindingRegistry<K> {
    fn default() -> Self {
        Self {
            bound: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> BindingRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `key` was not bound yet and now is.
    pub fn claim(&mut self, key: K) -> bool {
        self.bound.insert(key)
    }

    pub fn is_bound(&self, key: &K) -> bool {
        self.bound.contains(key)
    }

    pub fn release(&mut self, key: &K) -> bool {
        self.bound.remove(key)
    }

    /// Forget every binding, returning what was bound.
    pub fn release_all(&mut self) -> Vec<K> {
        self.bound.drain().collect()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_types::SectionIndex;

    fn state_at(current: usize, total: usize) -> ViewState {
        ViewState::new(
            total,
            SectionIndex::new(current),
            ViewMode::SingleSection,
            false,
        )
    }

    #[test]
    fn test_boundaries_disable_buttons() {
        let labels = Labels::default();

        let first = project(&state_at(0, 5), &labels);
        assert!(first.prev_disabled);
        assert!(!first.next_disabled);

        let last = project(&state_at(4, 5), &labels);
        assert!(!last.prev_disabled);
        assert!(last.next_disabled);

        let middle = project(&state_at(3, 5), &labels);
        assert!(!middle.prev_disabled);
        assert!(!middle.next_disabled);
        assert_eq!(middle.jump_value, "3");
        assert_eq!(middle.jump_display, "4");
    }

    #[test]
    fn test_single_section_document() {
        let controls = project(&state_at(0, 1), &Labels::default());
        assert!(controls.prev_disabled);
        assert!(controls.next_disabled);
    }

    #[test]
    fn test_labels_are_composed() {
        let labels = Labels {
            previous: "Précédent".to_string(),
            section: "Article".to_string(),
            ..Labels::default()
        };
        let controls = project(&state_at(1, 3), &labels);
        assert_eq!(controls.prev_label, "Précédent Article");
        assert_eq!(controls.next_label, "Next Article");
    }

    #[test]
    fn test_key_step() {
        assert_eq!(key_step("ArrowLeft"), Some(Step::Previous));
        assert_eq!(key_step("ArrowRight"), Some(Step::Next));
        assert_eq!(key_step("ArrowUp"), None);
        assert_eq!(Step::Previous.delta(), -1);
    }

    #[test]
    fn test_floating_toggle_follows_primary() {
        let mut floating = FloatingToggle::new();
        assert_eq!(floating.observe(true), None);
        assert_eq!(floating.observe(false), Some(true));
        assert_eq!(floating.observe(false), None);
        assert_eq!(floating.observe(true), Some(false));
        assert!(!floating.is_visible());
    }

    #[test]
    fn test_registry_claims_once() {
        let mut registry = BindingRegistry::new();
        assert!(registry.claim(BindingKey::Control(ControlKind::PrevButtons)));
        assert!(!registry.claim(BindingKey::Control(ControlKind::PrevButtons)));
        assert!(registry.claim(BindingKey::CommentaryRoot("doc-1".to_string())));
        assert_eq!(registry.len(), 2);

        let released = registry.release_all();
        assert_eq!(released.len(), 2);
        assert!(registry.is_empty());
        assert!(registry.claim(BindingKey::Control(ControlKind::PrevButtons)));
    }

    #[test]
    fn test_binding_twice_runs_handler_once() {
        let mut registry = BindingRegistry::new();
        let mut handlers: Vec<fn(&mut u32)> = Vec::new();
        for _ in 0..2 {
            if registry.claim(BindingKey::Control(ControlKind::TocToggle)) {
                handlers.push(|flips| *flips += 1);
            }
        }

        let mut flips = 0;
        for handler in &handlers {
            handler(&mut flips);
        }
        assert_eq!(flips, 1);
    }
}
