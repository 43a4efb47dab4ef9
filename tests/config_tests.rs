mod common;

use chrono::NaiveDate;
use common::{TestResult, fixtures, navigator_with};
use lexi::citation::{format_accessed, print_document};
use lexi::types::{PageConfig, SectionIndex, ViewMode};
use lexi::{InMemorySectionSource, NavigationOutcome, NavigatorConfig, PagePlan};
use serde_json::json;

#[test]
fn test_page_config_resolves_endpoint_and_labels() -> TestResult {
    let page = PageConfig::from_json(&fixtures::page_config().to_string())?;
    let config = NavigatorConfig::from(page);

    let endpoint = config.endpoint.as_ref().ok_or("endpoint missing")?;
    assert_eq!(
        endpoint.url_for(2),
        "https://example.org/wp-json/lexi/v1/section?post=42&index=2"
    );
    assert_eq!(config.total_sections, Some(5));
    assert_eq!(config.initial_mode, Some(ViewMode::SingleSection));
    assert_eq!(config.announcer_id(), "lexi-announcer-42");
    assert_eq!(config.labels.loading, "Chargement...");
    assert_eq!(config.labels.section_loaded(3), "Section 3 chargée");
    assert_eq!(config.labels.error, "Error loading section");
    Ok(())
}

#[test]
fn test_missing_post_id_disables_endpoint() -> TestResult {
    let json = json!({ "restUrl": fixtures::ENDPOINT, "postId": 0 }).to_string();
    let page = PageConfig::from_json(&json)?;
    let config = NavigatorConfig::from(page);
    assert!(config.endpoint.is_none());
    assert!(config.total_sections.is_none());
    assert_eq!(config.announcer_id(), "lexi-announcer");
    Ok(())
}

#[test]
fn test_unknown_view_is_rejected() {
    let json = json!({ "initialView": "grid" }).to_string();
    assert!(PageConfig::from_json(&json).is_err());
}

#[tokio::test]
async fn test_page_without_endpoint_reports_error() {
    let mut config = fixtures::config(3);
    config.endpoint = None;
    let nav = navigator_with(config, InMemorySectionSource::unavailable(), "/doc/");

    assert_eq!(nav.start().await, NavigationOutcome::Applied);
    let outcome = nav
        .request_navigate(1, lexi::NavigateOptions::default())
        .await;
    assert!(matches!(outcome, NavigationOutcome::Failed(_)));
    assert!(!nav.is_navigating());
    assert_eq!(nav.live_region().last_message(), Some("Error loading section"));
}

#[test]
fn test_plan_matches_navigator_start() -> TestResult {
    let config = fixtures::page_config().to_string();
    let plan = PagePlan::from_json(&config, "https://example.org/doc/?sec=9", 5, true)?;
    assert_eq!(plan.current, SectionIndex::new(4));
    assert_eq!(plan.mode, ViewMode::SingleSection);
    assert_eq!(plan.permalinks.len(), 5);
    assert_eq!(plan.permalinks[4], "https://example.org/doc/?sec=4");
    Ok(())
}

#[tokio::test]
async fn test_citation_uses_current_url_and_heading() {
    let nav = common::ajax_navigator(3, "https://example.org/doc/");
    nav.start().await;
    nav.request_navigate(2, lexi::NavigateOptions::default()).await;

    let accessed = format_accessed(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
    let citation = nav.citation(Some(" Article 3 "), "Model Law", &accessed);
    assert_eq!(
        citation,
        "Article 3. Model Law. Available at: https://example.org/doc/?sec=2 (Accessed: 3/7/2026)"
    );

    let fallback = nav.citation(None, "Model Law", &accessed);
    assert!(fallback.starts_with("Section 3. Model Law."));
}

#[test]
fn test_print_document_escapes_titles() {
    let html = print_document("Q&A <Guide>", "Part 1", "<p>Body</p>");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Q&amp;A &lt;Guide&gt; - Part 1</title>"));
    assert!(html.contains("<h1>Part 1</h1><p>Body</p>"));
    assert!(html.contains(".lexi-commentary-toggle { display: none; }"));
}
