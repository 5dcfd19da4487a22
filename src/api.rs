// Catalog API client. One-shot fetches, no retry: each call either returns
// the decoded body or a typed error carrying the HTTP status or message.

use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::error::{js_message, AppError};
use crate::types::{CatalogItem, MovieRequest};

/// Base path the catalog API is served under.
pub const API_BASE_URL: &str = "/api";

/// A named category row served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKey {
    Classics,
    GoldenAge,
}

impl SectionKey {
    /// Sections rendered on the landing page, in page order.
    pub const ALL: [SectionKey; 2] = [SectionKey::Classics, SectionKey::GoldenAge];

    /// Path segment under `/cartoons/sections/`.
    pub fn slug(&self) -> &'static str {
        match self {
            SectionKey::Classics => "classics",
            SectionKey::GoldenAge => "golden-age",
        }
    }

    /// Element id of the card row this section fills.
    pub fn row_id(&self) -> &'static str {
        match self {
            SectionKey::Classics => "classicCartoonsRow",
            SectionKey::GoldenAge => "goldenAgeGemsRow",
        }
    }

    /// Element id of the wrapping content section, hidden during search.
    pub fn section_id(&self) -> &'static str {
        match self {
            SectionKey::Classics => "classicCartoonsSection",
            SectionKey::GoldenAge => "goldenAgeGemsSection",
        }
    }
}

/// Shape of an API error body, e.g. `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: String,
}

/// Client for the catalog endpoints.
pub struct CatalogApi {
    base_url: String,
}

impl Default for CatalogApi {
    fn default() -> Self {
        CatalogApi::new(API_BASE_URL)
    }
}

impl CatalogApi {
    pub fn new(base_url: &str) -> Self {
        CatalogApi {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn featured_url(&self) -> String {
        format!("{}/cartoons/featured", self.base_url)
    }

    pub fn section_url(&self, key: SectionKey) -> String {
        format!("{}/cartoons/sections/{}", self.base_url, key.slug())
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/cartoons/search?query={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    pub fn requests_url(&self) -> String {
        format!("{}/movie-requests/", self.base_url)
    }

    /// Fetch the featured item. A JSON `null` body decodes to `None`.
    pub async fn fetch_featured(&self) -> Result<Option<CatalogItem>, AppError> {
        let value = get_json(&self.featured_url()).await?;
        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    /// Fetch one category section, in the order the API returns it.
    pub async fn fetch_section(&self, key: SectionKey) -> Result<Vec<CatalogItem>, AppError> {
        let value = get_json(&self.section_url(key)).await?;
        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    /// Search by query string. A 404 status surfaces as
    /// `AppError::Http { status: 404 }`; the caller maps it to "zero results".
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, AppError> {
        let value = get_json(&self.search_url(query)).await?;
        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    /// POST a movie request. On a non-success status the server's `detail`
    /// is surfaced when the body parses, otherwise the bare status.
    pub async fn submit_request(&self, request: &MovieRequest) -> Result<(), AppError> {
        let body = serde_json::to_string(request)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));
        let headers = Headers::new().map_err(|e| AppError::Network(js_message(&e)))?;
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| AppError::Network(js_message(&e)))?;
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(&self.requests_url(), &opts)
            .map_err(|e| AppError::Network(js_message(&e)))?;
        let response = send(&request).await?;
        if response.ok() {
            return Ok(());
        }

        let status = response.status();
        match read_json(&response).await {
            Ok(value) => match serde_wasm_bindgen::from_value::<ErrorBody>(value) {
                Ok(body) if !body.detail.is_empty() => Err(AppError::Rejected(body.detail)),
                _ => Err(AppError::Http { status }),
            },
            Err(_) => Err(AppError::Http { status }),
        }
    }
}

/// GET a URL and return the decoded JSON body as a `JsValue`.
async fn get_json(url: &str) -> Result<JsValue, AppError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| AppError::Network(js_message(&e)))?;
    let response = send(&request).await?;
    if !response.ok() {
        return Err(AppError::Http {
            status: response.status(),
        });
    }
    read_json(&response).await
}

async fn send(request: &Request) -> Result<Response, AppError> {
    let window = web_sys::window().ok_or_else(|| AppError::Network("no window".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| AppError::Network(js_message(&e)))?;
    value
        .dyn_into::<Response>()
        .map_err(|_| AppError::Decode("fetch did not yield a Response".to_string()))
}

async fn read_json(response: &Response) -> Result<JsValue, AppError> {
    let promise = response
        .json()
        .map_err(|e| AppError::Decode(js_message(&e)))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| AppError::Decode(js_message(&e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls() {
        let api = CatalogApi::default();
        assert_eq!(api.featured_url(), "/api/cartoons/featured");
        assert_eq!(
            api.section_url(SectionKey::Classics),
            "/api/cartoons/sections/classics"
        );
        assert_eq!(
            api.section_url(SectionKey::GoldenAge),
            "/api/cartoons/sections/golden-age"
        );
        assert_eq!(api.requests_url(), "/api/movie-requests/");
    }

    #[test]
    fn search_url_percent_encodes_query() {
        let api = CatalogApi::default();
        assert_eq!(
            api.search_url("tom & jerry"),
            "/api/cartoons/search?query=tom%20%26%20jerry"
        );
        assert_eq!(api.search_url("felix"), "/api/cartoons/search?query=felix");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = CatalogApi::new("http://127.0.0.1:8000/api/");
        assert_eq!(
            api.featured_url(),
            "http://127.0.0.1:8000/api/cartoons/featured"
        );
    }

    #[test]
    fn section_element_ids_are_distinct() {
        assert_ne!(
            SectionKey::Classics.row_id(),
            SectionKey::GoldenAge.row_id()
        );
        assert_ne!(
            SectionKey::Classics.section_id(),
            SectionKey::GoldenAge.section_id()
        );
    }
}
