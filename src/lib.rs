// toonstream: Rust/WASM single-page front end for a cartoon catalog site.
// Fetches the featured item and category rows, renders them, and wires the
// player/request modals, search, and the shared notification surface.

mod api;
mod error;
mod form;
mod modal;
mod notify;
mod page;
mod render;
mod search;
mod types;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlMediaElement};

pub use api::{CatalogApi, SectionKey, API_BASE_URL};
pub use error::AppError;
pub use modal::Modal;
pub use notify::{Notifier, NOTIFY_HIDE_MS};
pub use page::PageContext;
pub use types::{CatalogItem, MovieRequest, HERO_BLURB_CHARS};

/// Entry point: install the panic hook and boot the page.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = boot().await {
            report_boot_failure(&err);
        }
    });
}

/// Build the page context, populate the hero and both category rows in
/// sequence, then attach all event listeners once. Fetch failures are
/// handled inside each population step; only missing page structure
/// aborts the remainder of initialization.
async fn boot() -> Result<(), AppError> {
    let window = web_sys::window().ok_or_else(|| AppError::missing("window"))?;
    let document = window
        .document()
        .ok_or_else(|| AppError::missing("document"))?;

    let ctx = Rc::new(PageContext::new(document)?);
    let api = Rc::new(CatalogApi::default());
    let notifier = Rc::new(Notifier::new(ctx.notification.clone()));

    let player_modal = {
        let media: HtmlMediaElement = ctx.player.clone().into();
        Rc::new(
            Modal::new(ctx.player_modal.clone())
                .focus_on_open(ctx.player_close_btn.clone())
                .on_close(move || {
                    // Stop playback and drop the source so nothing keeps
                    // playing in the background and no stale source persists.
                    let _ = media.pause();
                    let _ = media.remove_attribute("src");
                    media.load();
                }),
        )
    };
    let request_modal = Rc::new(
        Modal::new(ctx.request_modal.clone())
            .focus_on_open(ctx.movie_name_input.clone().into()),
    );

    render::populate_hero(&ctx, &api, &notifier, &player_modal).await;
    for key in SectionKey::ALL {
        render::populate_row(&ctx, &api, &notifier, &player_modal, key).await;
    }

    let on_open_request = {
        let request_modal = request_modal.clone();
        Closure::<dyn FnMut()>::new(move || {
            request_modal.open();
        })
    };
    let _ = ctx
        .request_open_btn
        .add_event_listener_with_callback("click", on_open_request.as_ref().unchecked_ref());
    on_open_request.forget();

    modal::bind_close_button(&request_modal, &ctx.request_close_btn);
    modal::bind_close_button(&player_modal, &ctx.player_close_btn);
    modal::install_dismissal(&window, vec![request_modal.clone(), player_modal.clone()]);

    search::install(ctx.clone(), api.clone(), notifier.clone(), player_modal);
    form::install(ctx.clone(), api, notifier, request_modal);

    set_copyright_year(&ctx);
    Ok(())
}

fn set_copyright_year(ctx: &PageContext) {
    if let Some(span) = &ctx.current_year {
        let year = js_sys::Date::new_0().get_full_year();
        span.set_text_content(Some(&year.to_string()));
    }
}

/// Initialization failed before the notification surface was available;
/// log, and surface the generic message directly if the element exists.
fn report_boot_failure(err: &AppError) {
    console::error_1(&format!("Error initializing page: {err}").into());
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("notification"))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };
    element.set_text_content(Some("Could not initialize the page. Please try refreshing."));
    element.set_class_name("notification error");
    let _ = element.style().set_property("display", "block");
}
