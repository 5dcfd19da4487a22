// Catalog record types as received from the API, plus the display helpers
// the renderer needs. Items are read-only; nothing here touches the DOM.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Number of description characters shown in the hero blurb.
pub const HERO_BLURB_CHARS: usize = 120;

/// One playable title with metadata, decoded from the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
    pub poster_url: String,
    #[serde(default)]
    pub hero_image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl CatalogItem {
    /// Image used for the hero banner background. Falls back to the poster
    /// when no dedicated hero image is set.
    pub fn hero_background(&self) -> &str {
        self.hero_image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.poster_url)
    }

    /// Hero description line: first 120 characters of the description with a
    /// year suffix, e.g. `An outrageous romp... (1948)`.
    pub fn hero_blurb(&self) -> String {
        format!(
            "{}... ({})",
            truncate_chars(&self.description, HERO_BLURB_CHARS),
            self.year
        )
    }

    /// Alt text for the poster image.
    pub fn poster_alt(&self) -> String {
        format!("{} Poster", self.title)
    }

    /// Whether this item carries a playable video reference.
    pub fn is_playable(&self) -> bool {
        self.video_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Truncate to at most `max` characters without splitting a code point.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// A "request a title" payload. Built from trimmed form input, sent once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRequest {
    pub movie_name: String,
    pub user_email: String,
}

impl MovieRequest {
    /// Validate and construct a request from raw form field values.
    /// Both fields must be non-empty after trimming.
    pub fn new(movie_name: &str, user_email: &str) -> Result<Self, AppError> {
        let movie_name = movie_name.trim();
        let user_email = user_email.trim();
        if movie_name.is_empty() || user_email.is_empty() {
            return Err(AppError::InvalidInput(
                "Please fill in all fields.".to_string(),
            ));
        }
        Ok(MovieRequest {
            movie_name: movie_name.to_string(),
            user_email: user_email.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(description: &str, hero: Option<&str>, video: Option<&str>) -> CatalogItem {
        CatalogItem {
            id: 1,
            title: "Steamboat Willie".to_string(),
            year: 1928,
            description: description.to_string(),
            poster_url: "posters/willie.png".to_string(),
            hero_image_url: hero.map(str::to_string),
            video_url: video.map(str::to_string),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn decodes_full_item_json() {
        let json = r#"{
            "id": 7,
            "title": "Felix in Hollywood",
            "year": 1923,
            "description": "Felix heads west.",
            "poster_url": "felix.png",
            "hero_image_url": "felix-wide.png",
            "video_url": "felix.mp4",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        }"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.year, 1923);
        assert_eq!(item.hero_image_url.as_deref(), Some("felix-wide.png"));
        assert!(item.is_playable());
    }

    #[test]
    fn decodes_item_with_null_and_absent_optionals() {
        let json = r#"{
            "id": 1,
            "title": "A",
            "year": 1990,
            "description": "",
            "poster_url": "a.png",
            "hero_image_url": null
        }"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.hero_image_url, None);
        assert_eq!(item.video_url, None);
        assert!(!item.is_playable());
    }

    #[test]
    fn decodes_minimal_item_without_description() {
        let json = r#"{"id":1,"title":"A","year":1990,"poster_url":"a.png"}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "A");
        assert_eq!(item.year, 1990);
        assert_eq!(item.description, "");
        assert!(!item.is_playable());
    }

    #[test]
    fn hero_background_falls_back_to_poster() {
        assert_eq!(item("", None, None).hero_background(), "posters/willie.png");
        assert_eq!(
            item("", Some(""), None).hero_background(),
            "posters/willie.png"
        );
        assert_eq!(item("", Some("wide.png"), None).hero_background(), "wide.png");
    }

    #[test]
    fn hero_blurb_truncates_and_appends_year() {
        let long = "x".repeat(200);
        let blurb = item(&long, None, None).hero_blurb();
        assert_eq!(blurb, format!("{}... (1928)", "x".repeat(120)));

        let short = item("Short one.", None, None).hero_blurb();
        assert_eq!(short, "Short one.... (1928)");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "héllo wörld".repeat(20);
        let cut = truncate_chars(&text, HERO_BLURB_CHARS);
        assert_eq!(cut.chars().count(), HERO_BLURB_CHARS);
    }

    #[test]
    fn movie_request_trims_fields() {
        let req = MovieRequest::new("  Fantasia  ", " user@example.com ").unwrap();
        assert_eq!(req.movie_name, "Fantasia");
        assert_eq!(req.user_email, "user@example.com");
    }

    #[test]
    fn movie_request_rejects_empty_fields() {
        assert!(MovieRequest::new("", "user@example.com").is_err());
        assert!(MovieRequest::new("Fantasia", "   ").is_err());
    }

    #[test]
    fn movie_request_serializes_snake_case() {
        let req = MovieRequest::new("Fantasia", "user@example.com").unwrap();
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["movie_name"], "Fantasia");
        assert_eq!(value["user_email"], "user@example.com");
    }

    proptest! {
        /// The blurb never splits a code point and always ends with the year
        /// suffix, regardless of description contents.
        #[test]
        fn hero_blurb_is_well_formed(description in "\\PC{0,300}", year in 1900i32..2100) {
            let mut it = item(&description, None, None);
            it.year = year;
            let blurb = it.hero_blurb();
            let suffix = format!("... ({})", year);
            prop_assert!(blurb.ends_with(&suffix));
            prop_assert!(blurb.chars().count() <= HERO_BLURB_CHARS + 12);
        }

        /// Truncation output is always a prefix of the input and never longer
        /// than the limit.
        #[test]
        fn truncate_is_prefix_within_limit(text in "\\PC{0,300}") {
            let cut = truncate_chars(&text, HERO_BLURB_CHARS);
            prop_assert!(text.starts_with(cut));
            prop_assert!(cut.chars().count() <= HERO_BLURB_CHARS);
        }
    }
}
