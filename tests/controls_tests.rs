mod common;

use common::{TestNavigator, ajax_navigator};
use lexi::types::{HistoryState, Labels, SectionIndex, ViewMode};
use lexi::{
    BindingKey, BindingRegistry, Command, ControlKind, FloatingToggle, NavigationOutcome,
    Rejection, Step, toggle_commentary,
};

/// A host that attaches one handler per claimed control, the way the
/// browser binder does.
#[derive(Default)]
struct FakeHost {
    registry: BindingRegistry,
    handlers: Vec<(ControlKind, fn() -> Command)>,
}

impl FakeHost {
    fn bind(&mut self, kind: ControlKind, handler: fn() -> Command) {
        if self.registry.claim(BindingKey::Control(kind)) {
            self.handlers.push((kind, handler));
        }
    }

    fn bind_all(&mut self) {
        self.bind(ControlKind::NextButtons, || Command::Step(Step::Next));
        self.bind(ControlKind::PrevButtons, || Command::Step(Step::Previous));
        self.bind(ControlKind::TocToggle, || Command::ToggleToc);
    }

    async fn click(&self, nav: &TestNavigator, kind: ControlKind) -> Vec<NavigationOutcome> {
        let mut outcomes = Vec::new();
        for (bound, handler) in &self.handlers {
            if *bound == kind {
                outcomes.push(nav.dispatch(handler()).await);
            }
        }
        outcomes
    }
}

#[tokio::test]
async fn test_binding_twice_moves_one_section_per_click() {
    let nav = ajax_navigator(5, "https://example.org/doc/");
    nav.start().await;

    let mut host = FakeHost::default();
    host.bind_all();
    host.bind_all();
    assert_eq!(host.handlers.len(), 3);
    assert_eq!(host.registry.len(), 3);

    let outcomes = host.click(&nav, ControlKind::NextButtons).await;
    assert_eq!(outcomes, vec![NavigationOutcome::Fetched]);
    assert_eq!(nav.current_index(), SectionIndex::new(1));

    host.click(&nav, ControlKind::TocToggle).await;
    assert!(nav.view().toc_expanded());
}

#[test]
fn test_released_controls_can_be_bound_again() {
    let mut host = FakeHost::default();
    host.bind_all();
    let released = host.registry.release_all();
    assert_eq!(released.len(), 3);
    assert!(host.registry.is_empty());
    assert!(host.registry.claim(BindingKey::Control(ControlKind::NextButtons)));
    assert!(!host.registry.claim(BindingKey::Control(ControlKind::NextButtons)));
}

#[tokio::test]
async fn test_commands_route_to_operations() {
    let nav = ajax_navigator(4, "https://example.org/doc/");
    nav.start().await;

    assert_eq!(nav.dispatch(Command::Jump(3)).await, NavigationOutcome::Fetched);
    assert_eq!(nav.current_index(), SectionIndex::new(3));

    assert_eq!(
        nav.dispatch(Command::SetMode(ViewMode::SingleSection)).await,
        NavigationOutcome::Ignored(Rejection::Unchanged)
    );
    assert_eq!(
        nav.dispatch(Command::SetMode(ViewMode::FullText)).await,
        NavigationOutcome::Applied
    );

    assert_eq!(
        nav.dispatch(Command::Restore(Some(HistoryState { section_index: 0 }))).await,
        NavigationOutcome::Cached
    );
    assert_eq!(nav.history().push_count(), 1);

    assert_eq!(nav.dispatch(Command::Toc(2)).await, NavigationOutcome::Fetched);
    assert_eq!(nav.history().push_count(), 2);
}

#[test]
fn test_commentary_toggle_flips_back_and_forth() {
    let labels = Labels::default();

    let opened = toggle_commentary(Some("false"), &labels);
    assert_eq!(opened.expanded_attr(), "true");
    assert_eq!(opened.hidden_attr(), "false");
    assert_eq!(opened.label, "Hide Commentary");

    let closed = toggle_commentary(Some(opened.expanded_attr()), &labels);
    assert_eq!(closed.expanded_attr(), "false");
    assert_eq!(closed.hidden_attr(), "true");
    assert_eq!(closed.label, "Show Commentary");
}

#[test]
fn test_commentary_roots_are_bound_once() {
    let mut registry = BindingRegistry::new();
    let root = BindingKey::CommentaryRoot("lexi-doc-42".to_string());
    assert!(registry.claim(root.clone()));
    assert!(!registry.claim(root.clone()));
    assert!(registry.claim(BindingKey::CommentaryRoot("preview".to_string())));
    assert!(registry.release(&root));
    assert!(registry.claim(root));
}

#[test]
fn test_floating_toggle_follows_primary_visibility() {
    let mut floating = FloatingToggle::new();
    assert!(!floating.is_visible());

    assert_eq!(floating.observe(true), None);
    assert_eq!(floating.observe(false), Some(true));
    assert_eq!(floating.observe(false), None);
    assert!(floating.is_visible());
    assert_eq!(floating.observe(true), Some(false));
}
