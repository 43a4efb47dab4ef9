//! Section source backed by the REST endpoint.

use lexi_core::types::{SectionEndpoint, SectionIndex, SectionPayload};
use lexi_core::{FetchError, SectionSource};
use lexi_core::traits::parse_section_body;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Fetches sections with `GET {endpoint}?post={id}&index={n}`.
///
/// Without an endpoint the source reports itself unavailable and every
/// fetch fails with [`FetchError::Unavailable`].
#[derive(Debug, Clone)]
pub struct RestSectionSource {
    endpoint: Option<SectionEndpoint>,
}

impl RestSectionSource {
    pub fn new(endpoint: Option<SectionEndpoint>) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> Option<&SectionEndpoint> {
        self.endpoint.as_ref()
    }
}

impl SectionSource for RestSectionSource {
    async fn fetch(&self, index: SectionIndex) -> Result<SectionPayload, FetchError> {
        let endpoint = self
            .endpoint
            .as_ref()
            .ok_or_else(|| FetchError::Unavailable("no section endpoint configured".to_string()))?;
        let body = fetch_text(&endpoint.url_for(index.get())).await?;
        parse_section_body(&body)
    }

    fn name(&self) -> &'static str {
        "RestSectionSource"
    }

    fn is_available(&self) -> bool {
        self.endpoint.is_some()
    }
}

fn transport(context: &str, value: wasm_bindgen::JsValue) -> FetchError {
    let detail = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{:?}", value));
    FetchError::Transport(format!("{}: {}", context, detail))
}

/// Fetch a URL and return its body as text.
///
/// Non-2xx responses are errors; the body is not read for them.
pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    let window = web_sys::window()
        .ok_or_else(|| FetchError::Unavailable("No window object available".to_string()))?;

    let opts = web_sys::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web_sys::RequestMode::Cors);

    let request = web_sys::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| transport("Failed to create request", e))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| transport("Failed to set headers", e))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| transport("Fetch failed", e))?;

    let response: web_sys::Response = response_value
        .dyn_into()
        .map_err(|_| FetchError::Transport("Failed to convert response".to_string()))?;

    if !response.ok() {
        return Err(FetchError::Http {
            status: response.status(),
            status_text: response.status_text(),
        });
    }

    let text = JsFuture::from(
        response
            .text()
            .map_err(|e| transport("Failed to read response body", e))?,
    )
    .await
    .map_err(|e| transport("Failed to read response body", e))?;

    text.as_string()
        .ok_or_else(|| FetchError::Malformed("response body is not text".to_string()))
}
