// Turns catalog records into DOM cards and populates the hero banner and
// category rows. Each population re-fetches; failures degrade to explicit
// inline text, never a silent blank region.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, Element, HtmlImageElement, HtmlMediaElement, KeyboardEvent};

use crate::api::{CatalogApi, SectionKey};
use crate::error::AppError;
use crate::modal::Modal;
use crate::notify::Notifier;
use crate::page::PageContext;
use crate::types::CatalogItem;

pub const NO_FEATURED_TITLE: &str = "No Featured Cartoon Available";
pub const NO_FEATURED_BODY: &str = "Please check back later.";
pub const FEATURED_ERROR_TITLE: &str = "Error Loading Featured";
pub const FEATURED_ERROR_BODY: &str = "Could not fetch featured content.";
pub const NO_SECTION_ITEMS_MSG: &str = "No cartoons found in this category yet.";
pub const SECTION_ERROR_MSG: &str = "Error loading cartoons. Please try again later.";
pub const AUTOPLAY_BLOCKED_MSG: &str = "Autoplay blocked. Press play on the video.";

pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/150x220.png?text=Not+Available";
pub const POSTER_ERROR: &str = "https://via.placeholder.com/150x220.png?text=Error";
pub const CARD_IMAGE_FALLBACK: &str = "https://via.placeholder.com/180x250.png?text=Image+Missing";

/// Notification text for an item without a playable video.
pub fn unavailable_message(title: &str) -> String {
    format!("Video for {title} is not available yet.")
}

pub fn card_aria_label(title: &str) -> String {
    format!("Play {title}")
}

pub fn watch_aria_label(title: &str) -> String {
    format!("Watch {title}")
}

/// Fetch the featured item and populate the hero banner. The null sentinel
/// and a fetch failure get distinct copy; both hide the watch action.
pub async fn populate_hero(
    ctx: &Rc<PageContext>,
    api: &CatalogApi,
    notifier: &Rc<Notifier>,
    player: &Rc<Modal>,
) {
    match api.fetch_featured().await {
        Ok(Some(item)) => {
            let _ = ctx.hero_section.style().set_property(
                "background-image",
                &format!("url('{}')", item.hero_background()),
            );
            ctx.hero_poster.set_src(&item.poster_url);
            ctx.hero_poster.set_alt(&item.poster_alt());
            ctx.hero_title.set_text_content(Some(&item.title));
            ctx.hero_description.set_text_content(Some(&item.hero_blurb()));

            let _ = ctx
                .watch_button
                .style()
                .set_property("display", "inline-block");
            let _ = ctx
                .watch_button
                .set_attribute("aria-label", &watch_aria_label(&item.title));
            let on_watch = {
                let ctx = ctx.clone();
                let notifier = notifier.clone();
                let player = player.clone();
                Closure::<dyn FnMut()>::new(move || {
                    play_item(&ctx, &player, &notifier, &item);
                })
            };
            let _ = ctx
                .watch_button
                .add_event_listener_with_callback("click", on_watch.as_ref().unchecked_ref());
            on_watch.forget();
        }
        Ok(None) => {
            ctx.hero_title.set_text_content(Some(NO_FEATURED_TITLE));
            ctx.hero_description.set_text_content(Some(NO_FEATURED_BODY));
            ctx.hero_poster.set_src(POSTER_PLACEHOLDER);
            let _ = ctx.watch_button.style().set_property("display", "none");
        }
        Err(err) => {
            console::error_1(&format!("Failed to load featured cartoon: {err}").into());
            ctx.hero_title.set_text_content(Some(FEATURED_ERROR_TITLE));
            ctx.hero_description
                .set_text_content(Some(FEATURED_ERROR_BODY));
            ctx.hero_poster.set_src(POSTER_ERROR);
            let _ = ctx.watch_button.style().set_property("display", "none");
        }
    }
}

/// Fetch one category section and fill its row with cards, in API order.
/// A missing row container is a warned no-op.
pub async fn populate_row(
    ctx: &Rc<PageContext>,
    api: &CatalogApi,
    notifier: &Rc<Notifier>,
    player: &Rc<Modal>,
    key: SectionKey,
) {
    let Some(row) = ctx.element_by_id(key.row_id()) else {
        console::warn_1(&format!("Cartoon row '{}' not found.", key.row_id()).into());
        return;
    };
    row.set_inner_html("");

    match api.fetch_section(key).await {
        Ok(items) if items.is_empty() => {
            render_message(ctx, &row, NO_SECTION_ITEMS_MSG, "var(--text-secondary)");
        }
        Ok(items) => {
            for item in items {
                match create_card(ctx, notifier, player, item) {
                    Ok(card) => {
                        let _ = row.append_child(&card);
                    }
                    Err(err) => {
                        console::error_1(&format!("Failed to build card: {err}").into());
                    }
                }
            }
        }
        Err(err) => {
            console::error_1(
                &format!("Failed to load cartoons for '{}': {err}", key.row_id()).into(),
            );
            render_message(ctx, &row, SECTION_ERROR_MSG, "var(--accent-hover)");
        }
    }
}

/// Map one catalog item to one interactive card element. Click and
/// Enter/Space act identically: open the player when a video reference
/// exists, otherwise notify that the title is not available yet.
pub fn create_card(
    ctx: &Rc<PageContext>,
    notifier: &Rc<Notifier>,
    player: &Rc<Modal>,
    item: CatalogItem,
) -> Result<Element, AppError> {
    let card = ctx.create_element("div")?;
    card.set_class_name("cartoon-card");
    let _ = card.set_attribute("role", "button");
    let _ = card.set_attribute("tabindex", "0");
    let _ = card.set_attribute("aria-label", &card_aria_label(&item.title));

    let poster: HtmlImageElement = ctx
        .create_element("img")?
        .dyn_into()
        .map_err(|_| AppError::missing("img"))?;
    poster.set_src(&item.poster_url);
    poster.set_alt(&item.poster_alt());
    let _ = poster.set_attribute("loading", "lazy");
    let on_image_error = {
        let poster = poster.clone();
        let fired = Cell::new(false);
        Closure::<dyn FnMut()>::new(move || {
            // Swap in the placeholder once; if that one also fails, stop.
            if !fired.replace(true) {
                poster.set_src(CARD_IMAGE_FALLBACK);
            }
        })
    };
    let _ =
        poster.add_event_listener_with_callback("error", on_image_error.as_ref().unchecked_ref());
    on_image_error.forget();
    let _ = card.append_child(&poster);

    let info = ctx.create_element("div")?;
    info.set_class_name("cartoon-card-info");
    let title = ctx.create_element("h3")?;
    title.set_text_content(Some(&item.title));
    let year = ctx.create_element("p")?;
    year.set_text_content(Some(&item.year.to_string()));
    let _ = info.append_child(&title);
    let _ = info.append_child(&year);
    let _ = card.append_child(&info);

    let on_click = {
        let ctx = ctx.clone();
        let notifier = notifier.clone();
        let player = player.clone();
        let item = item.clone();
        Closure::<dyn FnMut()>::new(move || {
            play_item(&ctx, &player, &notifier, &item);
        })
    };
    let _ = card.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();

    let on_key = {
        let ctx = ctx.clone();
        let notifier = notifier.clone();
        let player = player.clone();
        let item = item.clone();
        Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == "Enter" || event.key() == " " {
                // Space would otherwise scroll the page.
                event.prevent_default();
                play_item(&ctx, &player, &notifier, &item);
            }
        })
    };
    let _ = card.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref());
    on_key.forget();

    Ok(card)
}

/// Open the player modal for a playable item, or notify that it is not
/// available yet. Autoplay rejection degrades to a notification.
pub fn play_item(
    ctx: &Rc<PageContext>,
    player: &Rc<Modal>,
    notifier: &Rc<Notifier>,
    item: &CatalogItem,
) {
    let Some(video_url) = item.video_url.as_deref().filter(|url| !url.is_empty()) else {
        notifier.error(&unavailable_message(&item.title));
        return;
    };

    ctx.player_heading.set_text_content(Some(&item.title));
    let media: HtmlMediaElement = ctx.player.clone().into();
    media.set_src(video_url);
    player.open();

    match media.play() {
        Ok(promise) => {
            let notifier = notifier.clone();
            spawn_local(async move {
                if JsFuture::from(promise).await.is_err() {
                    notifier.error(AUTOPLAY_BLOCKED_MSG);
                }
            });
        }
        Err(_) => notifier.error(AUTOPLAY_BLOCKED_MSG),
    }
}

/// Replace a container's content with one line of status text.
pub fn render_message(ctx: &Rc<PageContext>, container: &Element, text: &str, color: &str) {
    container.set_inner_html("");
    if let Ok(line) = ctx.create_element("p") {
        line.set_text_content(Some(text));
        if let Some(line) = line.dyn_ref::<web_sys::HtmlElement>() {
            let _ = line.style().set_property("color", color);
        }
        let _ = container.append_child(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_featured_and_error_copy_are_distinct() {
        assert_ne!(NO_FEATURED_TITLE, FEATURED_ERROR_TITLE);
        assert_ne!(NO_FEATURED_BODY, FEATURED_ERROR_BODY);
    }

    #[test]
    fn empty_section_message_matches_page_copy() {
        assert_eq!(NO_SECTION_ITEMS_MSG, "No cartoons found in this category yet.");
        assert_ne!(NO_SECTION_ITEMS_MSG, SECTION_ERROR_MSG);
    }

    #[test]
    fn action_labels_name_the_title() {
        assert_eq!(card_aria_label("Felix"), "Play Felix");
        assert_eq!(watch_aria_label("Felix"), "Watch Felix");
        assert!(unavailable_message("Felix").contains("Felix"));
    }
}
