//! Citation text and the standalone print document for one section.

use chrono::{Local, NaiveDate};
use lexi_types::{Labels, SectionIndex};
use quick_xml::escape::escape;

const PRINT_STYLES: &str = concat!(
    "body { font-family: Arial, sans-serif; line-height: 1.6; margin: 20px; }",
    "h1, h2, h3, h4, h5, h6 { color: #333; margin-top: 0; }",
    ".lexi-section { margin-bottom: 20px; }",
    ".lexi-commentary-section { margin-top: 15px; padding: 10px; background: #f8f9fa; border-left: 3px solid #007cba; }",
    ".lexi-commentary-toggle { display: none; }",
    ".lexi-commentary-content { display: block !important; }",
    "@media print { body { margin: 0; } }",
);

/// Title of the section at `index`, falling back to "Section 3" when the
/// section has no heading text.
pub fn section_title(heading: Option<&str>, index: SectionIndex, labels: &Labels) -> String {
    match heading.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => text.to_string(),
        None => labels.section_title(index.ordinal()),
    }
}

/// `"<section>. <document>. Available at: <url> (Accessed: <date>)"`
pub fn citation(section_title: &str, document_title: &str, url: &str, accessed: &str) -> String {
    format!(
        "{}. {}. Available at: {} (Accessed: {})",
        section_title, document_title, url, accessed
    )
}

/// Date as it appears in a citation, e.g. "10/15/2026".
pub fn format_accessed(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn accessed_today() -> String {
    format_accessed(Local::now().date_naive())
}

/// A complete HTML document printing one section.
///
/// Titles are escaped; `section_html` is the section's own markup and is
/// inserted as is. Commentary is expanded and its toggles hidden.
pub fn print_document(document_title: &str, section_title: &str, section_html: &str) -> String {
    let window_title = format!("{} - {}", document_title, section_title);
    format!(
        "<!DOCTYPE html><html><head><title>{}</title><style>{}</style></head><body><h1>{}</h1>{}</body></html>",
        escape(window_title.as_str()),
        PRINT_STYLES,
        escape(section_title),
        section_html
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_format() {
        let text = citation(
            "Article 3",
            "Civil Code",
            "https://example.org/code/?sec=2",
            "10/15/2026",
        );
        assert_eq!(
            text,
            "Article 3. Civil Code. Available at: https://example.org/code/?sec=2 (Accessed: 10/15/2026)"
        );
    }

    #[test]
    fn test_section_title_fallback() {
        let labels = Labels::default();
        assert_eq!(
            section_title(Some("  Article 3 "), SectionIndex::new(2), &labels),
            "Article 3"
        );
        assert_eq!(section_title(Some(""), SectionIndex::new(2), &labels), "Section 3");
        assert_eq!(section_title(None, SectionIndex::new(0), &labels), "Section 1");
    }

    #[test]
    fn test_format_accessed() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_accessed(date), "3/7/2026");
    }

    #[test]
    fn test_print_document_escapes_titles() {
        let html = print_document("Code <Civil>", "Art. 1 & 2", "<p>Body</p>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Code &lt;Civil&gt; - Art. 1 &amp; 2</title>"));
        assert!(html.contains("<h1>Art. 1 &amp; 2</h1><p>Body</p>"));
        assert!(html.contains(".lexi-commentary-toggle { display: none; }"));
        assert!(html.ends_with("</body></html>"));
    }
}
