//! Navigator configuration.
//!
//! [`PageConfig`] mirrors the object the server injects into the page
//! (`window.letlexiSectionNav`). It is lenient about scalar types because
//! the injecting side may stringify numbers. [`NavigatorConfig`] is the
//! typed, fully defaulted form the navigator works with.

use crate::ids::DocumentId;
use crate::labels::Labels;
use crate::view::ViewMode;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Raw configuration as injected by the page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub rest_url: Option<String>,
    pub post_id: Option<DocumentId>,
    #[serde(deserialize_with = "lenient_count")]
    pub total_sections: Option<usize>,
    pub i18n: Labels,
    pub initial_view: Option<ViewMode>,
    #[serde(deserialize_with = "lenient_count")]
    pub sticky_offset: Option<usize>,
}

impl PageConfig {
    /// Parses the injected configuration from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The REST source of section markup for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEndpoint {
    base_url: String,
    document_id: DocumentId,
}

impl SectionEndpoint {
    pub fn new(base_url: impl Into<String>, document_id: DocumentId) -> Self {
        Self {
            base_url: base_url.into(),
            document_id,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    /// The request URL for one section: `{base}?post={id}&index={n}`.
    ///
    /// Bases that already carry a query string (plain permalinks expose
    /// REST routes as `?rest_route=…`) are extended with `&`.
    pub fn url_for(&self, index: usize) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}post={}&index={}",
            self.base_url, separator, self.document_id, index
        )
    }
}

/// Typed navigator configuration, immutable for the page lifetime.
#[derive(Debug, Clone, Default)]
pub struct NavigatorConfig {
    /// `None` when either the REST URL or the document id is missing; the
    /// navigator then only works with sections already in the page.
    pub endpoint: Option<SectionEndpoint>,
    pub document_id: Option<DocumentId>,
    /// `None` means "count the TOC entries at initialization".
    pub total_sections: Option<usize>,
    pub labels: Labels,
    pub initial_mode: Option<ViewMode>,
    pub sticky_offset: u32,
}

impl NavigatorConfig {
    /// Identifier of the live region used for announcements.
    pub fn announcer_id(&self) -> String {
        match &self.document_id {
            Some(id) => format!("lexi-announcer-{}", id),
            None => "lexi-announcer".to_string(),
        }
    }
}

impl From<PageConfig> for NavigatorConfig {
    fn from(page: PageConfig) -> Self {
        let rest_url = page
            .rest_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        let document_id = page
            .post_id
            .filter(|id| !id.as_str().is_empty() && id.as_str() != "0");
        let endpoint = match (&rest_url, &document_id) {
            (Some(url), Some(id)) => Some(SectionEndpoint::new(url.clone(), id.clone())),
            _ => None,
        };

        Self {
            endpoint,
            document_id,
            total_sections: page.total_sections.filter(|&n| n > 0),
            labels: page.i18n,
            initial_mode: page.initial_view,
            sticky_offset: page
                .sticky_offset
                .and_then(|offset| u32::try_from(offset).ok())
                .unwrap_or(0),
        }
    }
}

/// Accepts `5`, `5.0`, `"5"` and `null` for counts. Anything else,
/// negative numbers included, reads as no count.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => usize::try_from(n).ok(),
        Some(Raw::Float(f)) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
            Some(f as usize)
        }
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        Some(Raw::Float(_) | Raw::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_config_full() {
        let page = PageConfig::from_json(
            r#"{
                "restUrl": "https://example.org/wp-json/letlexi/v1/section",
                "postId": 42,
                "totalSections": "5",
                "i18n": { "loading": "Cargando..." },
                "initialView": "single"
            }"#,
        )
        .unwrap();
        let config = NavigatorConfig::from(page);

        let endpoint = config.endpoint.as_ref().unwrap();
        assert_eq!(
            endpoint.url_for(3),
            "https://example.org/wp-json/letlexi/v1/section?post=42&index=3"
        );
        assert_eq!(config.total_sections, Some(5));
        assert_eq!(config.labels.loading, "Cargando...");
        assert_eq!(config.labels.error, "Error loading section");
        assert_eq!(config.initial_mode, Some(ViewMode::SingleSection));
        assert_eq!(config.announcer_id(), "lexi-announcer-42");
    }

    #[test]
    fn test_page_config_empty_object() {
        let config = NavigatorConfig::from(PageConfig::from_json("{}").unwrap());
        assert!(config.endpoint.is_none());
        assert!(config.document_id.is_none());
        assert!(config.total_sections.is_none());
        assert_eq!(config.sticky_offset, 0);
        assert_eq!(config.announcer_id(), "lexi-announcer");
    }

    #[test]
    fn test_endpoint_requires_both_url_and_id() {
        let config = NavigatorConfig::from(
            PageConfig::from_json(r#"{"restUrl": "https://example.org/x", "postId": ""}"#).unwrap(),
        );
        assert!(config.endpoint.is_none());

        let config = NavigatorConfig::from(
            PageConfig::from_json(r#"{"restUrl": "  ", "postId": 7}"#).unwrap(),
        );
        assert!(config.endpoint.is_none());
        assert_eq!(config.document_id, Some(DocumentId::from("7")));
    }

    #[test]
    fn test_unreadable_counts_fall_back() {
        for raw in ["-1", "5.5", "true", "\"five\"", "[5]"] {
            let json = format!(r#"{{"totalSections": {raw}, "stickyOffset": {raw}}}"#);
            let config = NavigatorConfig::from(PageConfig::from_json(&json).unwrap());
            assert_eq!(config.total_sections, None, "totalSections {raw}");
            assert_eq!(config.sticky_offset, 0, "stickyOffset {raw}");
        }

        let config = NavigatorConfig::from(
            PageConfig::from_json(r#"{"totalSections": 5.0}"#).unwrap(),
        );
        assert_eq!(config.total_sections, Some(5));
    }

    #[test]
    fn test_zero_total_means_derive_from_page() {
        let config = NavigatorConfig::from(
            PageConfig::from_json(r#"{"totalSections": 0}"#).unwrap(),
        );
        assert_eq!(config.total_sections, None);
    }

    #[test]
    fn test_url_for_extends_existing_query() {
        let endpoint = SectionEndpoint::new(
            "https://example.org/?rest_route=/letlexi/v1/section",
            DocumentId::from("9"),
        );
        assert_eq!(
            endpoint.url_for(0),
            "https://example.org/?rest_route=/letlexi/v1/section&post=9&index=0"
        );
    }
}
