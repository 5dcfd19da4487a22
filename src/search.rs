// Enter-to-search flow. Results replace the page's primary content: a
// dedicated region is created once and reused, other sections are hidden.
// Overlapping searches are resolved by generation: each search captures a
// token and a stale completion is dropped.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, Element, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions};

use crate::api::{CatalogApi, SectionKey};
use crate::modal::Modal;
use crate::notify::Notifier;
use crate::page::PageContext;
use crate::render;
use crate::types::CatalogItem;

pub const RESULTS_SECTION_ID: &str = "searchResultsSection";
pub const RESULTS_ROW_ID: &str = "searchResultsRow";
pub const NO_MATCHES_MSG: &str = "No cartoons found matching your search.";
pub const SEARCH_FAILED_MSG: &str = "Search failed. Please try again.";

pub fn results_heading(query: &str) -> String {
    format!("Search Results for \"{query}\"")
}

pub fn no_results_message(query: &str) -> String {
    format!("No results found for \"{query}\".")
}

/// Attach the Enter handler to the search field.
pub fn install(
    ctx: Rc<PageContext>,
    api: Rc<CatalogApi>,
    notifier: Rc<Notifier>,
    player: Rc<Modal>,
) {
    let generation = Rc::new(Cell::new(0_u64));
    let search_input = ctx.search_input.clone();

    let on_key = {
        let input = ctx.search_input.clone();
        Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() != "Enter" {
                return;
            }
            let query = input.value().trim().to_string();
            if query.is_empty() {
                return;
            }

            let token = generation.get().wrapping_add(1);
            generation.set(token);

            let ctx = ctx.clone();
            let api = api.clone();
            let notifier = notifier.clone();
            let player = player.clone();
            let generation = generation.clone();
            spawn_local(async move {
                let outcome = api.search(&query).await;
                if generation.get() != token {
                    // A newer search raced past this one; drop the result.
                    return;
                }
                match outcome {
                    Ok(results) => display_results(&ctx, &notifier, &player, &results, &query),
                    Err(err) if err.is_not_found() => {
                        notifier.error(&no_results_message(&query));
                    }
                    Err(err) => {
                        console::error_1(&format!("Search failed: {err}").into());
                        notifier.error(SEARCH_FAILED_MSG);
                    }
                }
            });
        })
    };
    let _ =
        search_input.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref());
    on_key.forget();
}

/// Render results (possibly empty) into the dedicated region, hiding the
/// category sections for the duration.
fn display_results(
    ctx: &Rc<PageContext>,
    notifier: &Rc<Notifier>,
    player: &Rc<Modal>,
    results: &[CatalogItem],
    query: &str,
) {
    for key in SectionKey::ALL {
        if let Some(section) = ctx.element_by_id(key.section_id()) {
            if let Some(section) = section.dyn_ref::<HtmlElement>() {
                let _ = section.style().set_property("display", "none");
            }
        }
    }

    let section = match results_section(ctx) {
        Some(section) => section,
        None => {
            console::error_1(&"Main content container not found for search results.".into());
            return;
        }
    };

    section.set_inner_html("");
    let Ok(heading) = ctx.create_element("h2") else {
        return;
    };
    heading.set_text_content(Some(&results_heading(query)));
    let _ = heading.set_attribute("id", "searchResultsTitle");
    let _ = section.append_child(&heading);

    let Ok(row) = ctx.create_element("div") else {
        return;
    };
    row.set_class_name("cartoon-row");
    let _ = row.set_attribute("id", RESULTS_ROW_ID);
    let _ = section.append_child(&row);

    if results.is_empty() {
        render::render_message(ctx, &row, NO_MATCHES_MSG, "var(--text-secondary)");
    } else {
        for item in results {
            if let Ok(card) = render::create_card(ctx, notifier, player, item.clone()) {
                let _ = row.append_child(&card);
            }
        }
    }

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    section.scroll_into_view_with_scroll_into_view_options(&options);
}

/// The results region, created on first use and reused afterwards.
fn results_section(ctx: &Rc<PageContext>) -> Option<Element> {
    if let Some(existing) = ctx.element_by_id(RESULTS_SECTION_ID) {
        return Some(existing);
    }

    let section = ctx.create_element("section").ok()?;
    let _ = section.set_attribute("id", RESULTS_SECTION_ID);
    section.set_class_name("content-section");

    match ctx.main_content.query_selector(".content-section").ok()? {
        Some(first) => {
            let _ = ctx.main_content.insert_before(&section, Some(&first));
        }
        None => {
            let _ = ctx.main_content.append_child(&section);
        }
    }
    Some(section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_quote_the_query() {
        assert_eq!(results_heading("felix"), "Search Results for \"felix\"");
        assert_eq!(no_results_message("felix"), "No results found for \"felix\".");
    }

    #[test]
    fn no_matches_message_differs_from_failure_message() {
        assert_ne!(NO_MATCHES_MSG, SEARCH_FAILED_MSG);
    }
}
