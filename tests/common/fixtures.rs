use lexi::types::{DocumentId, SectionEndpoint};
use lexi::{InMemorySectionSource, NavigatorConfig};
use serde_json::{Value, json};

pub const ENDPOINT: &str = "https://example.org/wp-json/lexi/v1/section";
pub const DOCUMENT_ID: u64 = 42;

/// Configuration of a document with a working section endpoint.
pub fn config(total: usize) -> NavigatorConfig {
    let id = DocumentId::from(DOCUMENT_ID);
    NavigatorConfig {
        endpoint: Some(SectionEndpoint::new(ENDPOINT, id.clone())),
        document_id: Some(id),
        total_sections: Some(total),
        ..NavigatorConfig::default()
    }
}

/// Markup of fixture section `index`.
pub fn section_html(index: usize) -> String {
    format!("<h2 class=\"lexi-section-title\">Article {}</h2><p>Body {}</p>", index + 1, index + 1)
}

pub fn sections(total: usize) -> InMemorySectionSource {
    InMemorySectionSource::with_sections((0..total).map(section_html))
}

/// The object a WordPress page injects as `window.letlexiSectionNav`.
pub fn page_config() -> Value {
    json!({
        "restUrl": ENDPOINT,
        "postId": "42",
        "totalSections": 5,
        "initialView": "single",
        "i18n": {
            "loading": "Chargement...",
            "section": "Section",
            "loaded": "chargée"
        }
    })
}
