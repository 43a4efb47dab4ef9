mod common;

use common::{
    GatedSource, TestResult, ajax_navigator, fixtures, navigator_with, server_rendered_navigator,
    settle_until,
};
use lexi::traits::RecordedBody;
use lexi::types::{HistoryState, ScrollTarget, SectionIndex, ViewMode};
use lexi::{FetchError, NavigateOptions, NavigationOutcome, Rejection, Step};
use std::rc::Rc;
use tokio::task::LocalSet;

fn internal_error() -> FetchError {
    FetchError::Http {
        status: 500,
        status_text: "Internal Server Error".to_string(),
    }
}

#[tokio::test]
async fn test_out_of_range_targets_change_nothing() {
    let nav = ajax_navigator(4, "https://example.org/doc/?sec=2");
    nav.start().await;
    let requests = nav.source().request_count();
    let pushes = nav.history().push_count();

    for target in [-1, 4, 99, i64::MIN] {
        let outcome = nav.request_navigate(target, NavigateOptions::default()).await;
        assert_eq!(outcome, NavigationOutcome::Ignored(Rejection::OutOfRange(target)));
    }

    assert_eq!(nav.current_index(), SectionIndex::new(2));
    assert_eq!(nav.source().request_count(), requests);
    assert_eq!(nav.history().push_count(), pushes);
    assert!(!nav.is_navigating());
}

#[tokio::test]
async fn test_revisiting_a_section_issues_one_request() {
    let nav = ajax_navigator(3, "https://example.org/doc/");
    nav.start().await;

    assert_eq!(
        nav.request_navigate(2, NavigateOptions::default()).await,
        NavigationOutcome::Fetched
    );
    let first = nav.cached(SectionIndex::new(2)).unwrap();
    nav.request_navigate(0, NavigateOptions::default()).await;
    assert_eq!(
        nav.request_navigate(2, NavigateOptions::default()).await,
        NavigationOutcome::Cached
    );

    assert_eq!(nav.source().requests_for(SectionIndex::new(2)), 1);
    assert_eq!(nav.cached(SectionIndex::new(2)).unwrap(), first);
    assert_eq!(
        nav.view().body(),
        &RecordedBody::Html(fixtures::section_html(2))
    );
}

#[tokio::test]
async fn test_request_during_pending_navigation_is_dropped() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let nav = Rc::new(navigator_with(
                fixtures::config(4),
                GatedSource::new(fixtures::sections(4)),
                "https://example.org/doc/",
            ));
            nav.start().await;
            let open = nav.source().close();

            let pending = {
                let nav = Rc::clone(&nav);
                tokio::task::spawn_local(async move {
                    nav.request_navigate(1, NavigateOptions::default()).await
                })
            };
            settle_until(|| nav.is_navigating()).await;
            assert!(nav.is_navigating());
            assert_eq!(
                nav.view().body(),
                &RecordedBody::Loading("Loading...".to_string())
            );

            assert_eq!(
                nav.request_navigate(2, NavigateOptions::default()).await,
                NavigationOutcome::Ignored(Rejection::Busy)
            );
            assert_eq!(
                nav.restore(Some(HistoryState::new(SectionIndex::new(3)))).await,
                NavigationOutcome::Ignored(Rejection::Busy)
            );

            open.send(()).unwrap();
            assert_eq!(pending.await.unwrap(), NavigationOutcome::Fetched);
            assert_eq!(nav.current_index(), SectionIndex::new(1));
            assert_eq!(nav.source().inner.requests_for(SectionIndex::new(2)), 0);
            assert_eq!(nav.history().push_count(), 1);
            assert!(!nav.is_navigating());
        })
        .await;
}

#[tokio::test]
async fn test_back_restores_previous_section_without_push() {
    let nav = ajax_navigator(5, "https://example.org/doc/?lang=de");
    nav.start().await;
    nav.request_navigate(1, NavigateOptions::default()).await;
    nav.request_navigate(3, NavigateOptions::default()).await;
    assert_eq!(nav.history().push_count(), 2);
    assert_eq!(
        nav.history().current().url,
        "https://example.org/doc/?lang=de&sec=3"
    );

    let popped = nav.history_mut().back().unwrap();
    assert_eq!(popped, Some(HistoryState { section_index: 1 }));
    nav.restore(popped).await;
    assert_eq!(nav.current_index(), SectionIndex::new(1));

    let landing = nav.history_mut().back().unwrap();
    assert_eq!(landing, Some(HistoryState { section_index: 0 }));
    nav.restore(landing).await;
    assert_eq!(nav.current_index(), SectionIndex::FIRST);

    assert_eq!(nav.history().push_count(), 2);
    assert_eq!(
        nav.history().current().url,
        "https://example.org/doc/?lang=de"
    );
}

#[tokio::test]
async fn test_history_entry_without_state_is_ignored() {
    let nav = ajax_navigator(3, "/doc/");
    nav.start().await;
    assert_eq!(
        nav.restore(None).await,
        NavigationOutcome::Ignored(Rejection::NoHistoryState)
    );
}

#[tokio::test]
async fn test_mode_switch_keeps_position() -> TestResult {
    let nav = server_rendered_navigator(4, "https://example.org/doc/");
    assert_eq!(nav.start().await, NavigationOutcome::Applied);
    assert_eq!(nav.mode(), ViewMode::FullText);
    assert_eq!(nav.view().visible_sections(), vec![0, 1, 2, 3]);

    assert!(nav.set_mode(ViewMode::SingleSection));
    assert_eq!(nav.view().visible_sections(), vec![0]);

    assert_eq!(
        nav.request_navigate(2, NavigateOptions::default()).await,
        NavigationOutcome::Revealed
    );
    assert_eq!(nav.view().visible_sections(), vec![2]);
    assert_eq!(nav.view().last_scroll(), Some(ScrollTarget::Top));

    assert!(nav.set_mode(ViewMode::FullText));
    assert_eq!(nav.current_index(), SectionIndex::new(2));
    assert_eq!(nav.view().visible_sections(), vec![0, 1, 2, 3]);
    assert_eq!(
        nav.view().last_scroll(),
        Some(ScrollTarget::Section(SectionIndex::new(2)))
    );
    assert_eq!(nav.view().controls().map(|c| c.mode), Some(ViewMode::FullText));

    assert!(!nav.set_mode(ViewMode::FullText));
    Ok(())
}

#[tokio::test]
async fn test_toc_in_full_text_scrolls_without_history() {
    let nav = server_rendered_navigator(4, "https://example.org/doc/");
    nav.start().await;

    assert_eq!(nav.activate_toc(3).await, NavigationOutcome::Scrolled);
    assert_eq!(nav.current_index(), SectionIndex::new(3));
    assert_eq!(nav.mode(), ViewMode::FullText);
    assert_eq!(nav.history().push_count(), 0);

    assert_eq!(nav.activate_toc(-1).await, NavigationOutcome::Scrolled);
    assert_eq!(nav.view().last_scroll(), Some(ScrollTarget::Top));
    assert_eq!(nav.current_index(), SectionIndex::FIRST);
}

#[tokio::test]
async fn test_boundaries_disable_prev_and_next() {
    let nav = ajax_navigator(3, "https://example.org/doc/");
    nav.start().await;

    let controls = nav.view().controls().cloned().unwrap();
    assert!(controls.prev_disabled);
    assert!(!controls.next_disabled);
    assert_eq!(controls.prev_label, "Previous Section");
    assert_eq!(
        nav.step(Step::Previous).await,
        NavigationOutcome::Ignored(Rejection::OutOfRange(-1))
    );

    nav.step(Step::Next).await;
    let controls = nav.view().controls().cloned().unwrap();
    assert!(!controls.prev_disabled && !controls.next_disabled);

    nav.step(Step::Next).await;
    let controls = nav.view().controls().cloned().unwrap();
    assert!(!controls.prev_disabled);
    assert!(controls.next_disabled);
    assert_eq!(
        nav.step(Step::Next).await,
        NavigationOutcome::Ignored(Rejection::OutOfRange(3))
    );
    assert_eq!(nav.key_target("ArrowRight", true), None);
    assert_eq!(nav.key_target("ArrowLeft", true), Some(1));
    assert_eq!(nav.key_target("ArrowLeft", false), None);
}

#[tokio::test]
async fn test_section_query_selects_fourth_entry() {
    let nav = ajax_navigator(5, "https://example.org/doc/?sec=3");
    nav.start().await;

    assert_eq!(nav.current_index(), SectionIndex::new(3));
    let controls = nav.view().controls().cloned().unwrap();
    assert_eq!(controls.jump_value, "3");
    assert_eq!(controls.jump_display, "4");
    assert!(!controls.prev_disabled);
    assert!(!controls.next_disabled);
    assert!(controls.is_active(3));
}

#[tokio::test]
async fn test_loaded_section_is_cached_and_announced() {
    let source = lexi::InMemorySectionSource::new();
    source.insert(SectionIndex::new(0), "<p>first</p>");
    source.insert(SectionIndex::new(2), "<p>X</p>");
    let nav = navigator_with(fixtures::config(3), source, "https://example.org/doc/");
    nav.start().await;

    assert_eq!(
        nav.request_navigate(2, NavigateOptions::default()).await,
        NavigationOutcome::Fetched
    );
    assert_eq!(nav.cached(SectionIndex::new(2)).as_deref(), Some("<p>X</p>"));
    assert!(nav.view().body().text().contains('X'));
    assert_eq!(
        nav.live_region().text("lexi-announcer-42"),
        Some("Section 3 loaded")
    );
}

#[tokio::test]
async fn test_failed_load_retries_on_next_visit() {
    let source = fixtures::sections(3);
    source.fail(SectionIndex::new(1), internal_error());
    let nav = navigator_with(fixtures::config(3), source, "https://example.org/doc/");
    nav.start().await;

    let outcome = nav.request_navigate(1, NavigateOptions::default()).await;
    assert_eq!(outcome, NavigationOutcome::Failed(internal_error()));
    assert_eq!(
        nav.view().body(),
        &RecordedBody::Error("Error loading section".to_string())
    );
    assert_eq!(nav.live_region().last_message(), Some("Error loading section"));
    assert!(!nav.is_navigating());
    assert!(nav.cached(SectionIndex::new(1)).is_none());

    nav.source().insert(SectionIndex::new(1), "<p>recovered</p>");
    assert_eq!(
        nav.request_navigate(1, NavigateOptions::default()).await,
        NavigationOutcome::Fetched
    );
    assert_eq!(nav.source().requests_for(SectionIndex::new(1)), 2);
    assert_eq!(nav.live_region().last_message(), Some("Section 2 loaded"));
}

#[tokio::test]
async fn test_prefetch_warms_next_section_only() {
    let nav = ajax_navigator(3, "https://example.org/doc/");
    nav.start().await;

    assert!(nav.prefetch_next().await);
    assert!(nav.cached(SectionIndex::new(1)).is_some());
    assert_eq!(nav.current_index(), SectionIndex::FIRST);

    assert_eq!(
        nav.request_navigate(1, NavigateOptions::default()).await,
        NavigationOutcome::Cached
    );
    assert_eq!(nav.source().requests_for(SectionIndex::new(1)), 1);

    nav.request_navigate(2, NavigateOptions::default()).await;
    assert!(!nav.prefetch_next().await);
}

#[tokio::test]
async fn test_address_bar_follows_server_declared_section() {
    let source = fixtures::sections(5);
    source.insert_payload(
        SectionIndex::new(1),
        lexi::types::SectionPayload::new("<h2>Moved</h2>").with_index(3),
    );
    let nav = navigator_with(fixtures::config(5), source, "https://example.org/doc/");
    nav.start().await;

    assert_eq!(
        nav.request_navigate(1, NavigateOptions::default()).await,
        NavigationOutcome::Fetched
    );
    assert_eq!(nav.current_index(), SectionIndex::new(3));
    assert_eq!(nav.history().current().url, "https://example.org/doc/?sec=3");
    assert_eq!(
        nav.history().current().state,
        Some(HistoryState { section_index: 3 })
    );
    assert_eq!(nav.history().push_count(), 1);

    let landing = nav.history_mut().back().unwrap();
    assert_eq!(landing, Some(HistoryState { section_index: 0 }));
}
