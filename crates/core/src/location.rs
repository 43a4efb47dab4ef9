//! Reading and writing the section position in the URL.
//!
//! The position lives in the `sec` query parameter (zero-based). Anchors
//! rendered by the server (`#sec-5`, or `#sec-<document>-5`) are honoured
//! on load but never written.

use lexi_types::SectionIndex;
use once_cell::sync::Lazy;
use regex::Regex;

/// Name of the query parameter that carries the section index.
pub const SECTION_PARAM: &str = "sec";

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid leading integer pattern"));

static SECTION_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#sec-(?:\d+-)?(\d+)$").expect("valid section hash pattern"));

/// The parts of a URL the navigator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Everything before `?` or `#`.
    pub base: &'a str,
    /// Query string without the leading `?`.
    pub query: Option<&'a str>,
    /// Fragment including the leading `#`.
    pub hash: Option<&'a str>,
}

impl<'a> UrlParts<'a> {
    pub fn split(url: &'a str) -> Self {
        let (rest, hash) = match url.find('#') {
            Some(pos) => (&url[..pos], Some(&url[pos..])),
            None => (url, None),
        };
        let (base, query) = match rest.find('?') {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };
        Self { base, query, hash }
    }

    /// Raw value of the first `sec` parameter, if present.
    pub fn section_param(&self) -> Option<&'a str> {
        self.query?
            .split('&')
            .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
            .find(|(key, _)| *key == SECTION_PARAM)
            .map(|(_, value)| value)
    }
}

/// Parses the leading integer of `value` the way browsers' `parseInt` does:
/// `"3"`, `" 3"` and `"3abc"` all give 3; `"abc"` gives nothing.
fn leading_integer(value: &str) -> Option<i64> {
    let captures = LEADING_INTEGER.captures(value)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Section index encoded in a `#sec-…` fragment, unclamped.
pub fn hash_section(hash: &str) -> Option<i64> {
    let captures = SECTION_HASH.captures(hash)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Derives the starting section from the page URL.
///
/// Precedence: the `sec` query parameter, then a `#sec-…` fragment, then
/// the first section. Values are clamped into `[0, total)`.
pub fn initial_index(url: &str, total: usize) -> SectionIndex {
    let parts = UrlParts::split(url);

    if let Some(raw) = parts.section_param().and_then(leading_integer) {
        return SectionIndex::clamped(raw, total);
    }
    if let Some(raw) = parts.hash.and_then(hash_section) {
        return SectionIndex::clamped(raw, total);
    }
    SectionIndex::FIRST
}

/// Returns `url` with `sec` set to `index`.
///
/// Other parameters keep their order and encoding; the first existing
/// `sec` is updated in place and any duplicates are dropped. The fragment
/// is preserved.
pub fn with_section_param(url: &str, index: SectionIndex) -> String {
    let parts = UrlParts::split(url);
    let value = format!("{}={}", SECTION_PARAM, index);

    let mut pairs: Vec<&str> = Vec::new();
    let mut replaced = false;
    for pair in parts.query.unwrap_or("").split('&').filter(|p| !p.is_empty()) {
        let key = pair.split_once('=').map_or(pair, |(key, _)| key);
        if key == SECTION_PARAM {
            if !replaced {
                pairs.push(&value);
                replaced = true;
            }
        } else {
            pairs.push(pair);
        }
    }
    if !replaced {
        pairs.push(&value);
    }

    let mut out = String::with_capacity(url.len() + value.len() + 1);
    out.push_str(parts.base);
    out.push('?');
    out.push_str(&pairs.join("&"));
    if let Some(hash) = parts.hash {
        out.push_str(hash);
    }
    out
}
