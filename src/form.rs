// Movie-request form flow: local validation, one POST, transient outcome
// notification. A submission in flight blocks re-entry until it settles;
// every failure is terminal for that attempt.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, Event};

use crate::api::CatalogApi;
use crate::modal::Modal;
use crate::notify::Notifier;
use crate::page::PageContext;
use crate::types::MovieRequest;

pub const REQUEST_SENT_MSG: &str = "Request sent! You will be notified if the movie is added.";

pub fn install(
    ctx: Rc<PageContext>,
    api: Rc<CatalogApi>,
    notifier: Rc<Notifier>,
    request_modal: Rc<Modal>,
) {
    let in_flight = Rc::new(Cell::new(false));
    let form_el = ctx.request_form.clone();

    let on_submit = {
        let form = ctx.request_form.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();

            let request =
                match MovieRequest::new(&ctx.movie_name_input.value(), &ctx.email_input.value()) {
                    Ok(request) => request,
                    Err(err) => {
                        // Empty field: no network call is made.
                        notifier.error(&err.to_string());
                        return;
                    }
                };

            if in_flight.replace(true) {
                return;
            }

            let api = api.clone();
            let notifier = notifier.clone();
            let request_modal = request_modal.clone();
            let form = form.clone();
            let in_flight = in_flight.clone();
            spawn_local(async move {
                let outcome = api.submit_request(&request).await;
                in_flight.set(false);
                match outcome {
                    Ok(()) => {
                        request_modal.close();
                        form.reset();
                        notifier.info(REQUEST_SENT_MSG);
                    }
                    Err(err) => {
                        console::error_1(&format!("Failed to submit movie request: {err}").into());
                        notifier.error(&format!("Error: {err}"));
                    }
                }
            });
        })
    };
    let _ = form_el.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref());
    on_submit.forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn server_detail_is_surfaced_verbatim() {
        let err = AppError::Rejected("Cartoon already requested".to_string());
        assert_eq!(format!("Error: {err}"), "Error: Cartoon already requested");
    }

    #[test]
    fn validation_failure_copy_asks_for_all_fields() {
        let err = MovieRequest::new("", "").unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields.");
    }
}
