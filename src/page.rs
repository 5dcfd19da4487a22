// One-time DOM lookups. Every element the components touch is resolved here
// at initialization and handed out through this context, not re-queried from
// ambient globals. Required elements fail construction; optional regions
// degrade with a console warning at their call sites.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlImageElement, HtmlInputElement,
    HtmlVideoElement,
};

use crate::error::AppError;

/// Resolved page structure for one session.
pub struct PageContext {
    pub document: Document,

    // Hero banner
    pub hero_section: HtmlElement,
    pub hero_poster: HtmlImageElement,
    pub hero_title: HtmlElement,
    pub hero_description: HtmlElement,
    pub watch_button: HtmlElement,

    // Request modal
    pub request_modal: HtmlElement,
    pub request_open_btn: HtmlElement,
    pub request_close_btn: HtmlElement,
    pub request_form: HtmlFormElement,
    pub movie_name_input: HtmlInputElement,
    pub email_input: HtmlInputElement,

    // Video player modal
    pub player_modal: HtmlElement,
    pub player: HtmlVideoElement,
    pub player_heading: HtmlElement,
    pub player_close_btn: HtmlElement,

    // Shared surfaces
    pub notification: HtmlElement,
    pub search_input: HtmlInputElement,
    pub main_content: HtmlElement,
    pub current_year: Option<HtmlElement>,
}

impl PageContext {
    pub fn new(document: Document) -> Result<Self, AppError> {
        let hero_section: HtmlElement = required(&document, "heroSection")?;
        let watch_button = hero_section
            .query_selector(".watch-button")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| AppError::missing("heroSection .watch-button"))?;

        Ok(PageContext {
            hero_poster: required(&document, "heroPoster")?,
            hero_title: required(&document, "heroTitle")?,
            hero_description: required(&document, "heroDescription")?,
            request_modal: required(&document, "movieRequestModal")?,
            request_open_btn: required(&document, "movieRequestBtn")?,
            request_close_btn: required(&document, "movieRequestModalCloseBtn")?,
            request_form: required(&document, "movieRequestForm")?,
            movie_name_input: required(&document, "movieName")?,
            email_input: required(&document, "email")?,
            player_modal: required(&document, "videoPlayerModal")?,
            player: required(&document, "cartoonPlayer")?,
            player_heading: required(&document, "videoPlayerModalHeading")?,
            player_close_btn: required(&document, "videoModalCloseBtn")?,
            notification: required(&document, "notification")?,
            search_input: required(&document, "searchInput")?,
            main_content: required(&document, "mainContentContainer")?,
            current_year: document
                .get_element_by_id("currentYear")
                .and_then(|el| el.dyn_into().ok()),
            hero_section,
            watch_button,
            document,
        })
    }

    /// Look up an optional element by id, e.g. a row container.
    pub fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    pub fn create_element(&self, tag: &str) -> Result<Element, AppError> {
        self.document
            .create_element(tag)
            .map_err(|_| AppError::MissingElement(format!("cannot create <{tag}>")))
    }
}

fn required<T: JsCast>(document: &Document, id: &str) -> Result<T, AppError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| AppError::missing(id))?
        .dyn_into::<T>()
        .map_err(|_| AppError::MissingElement(format!("{id} has an unexpected element type")))
}
