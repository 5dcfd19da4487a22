// Shared transient status line. Every show call bumps a sequence number and
// arms a hide timer carrying that number; a timer only hides the surface if
// its number is still current, so a newer notification keeps its full
// display interval.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// How long a notification stays visible, in milliseconds.
pub const NOTIFY_HIDE_MS: i32 = 3_500;

pub struct Notifier {
    element: HtmlElement,
    seq: Rc<Cell<u64>>,
}

impl Notifier {
    pub fn new(element: HtmlElement) -> Self {
        Notifier {
            element,
            seq: Rc::new(Cell::new(0)),
        }
    }

    pub fn info(&self, message: &str) {
        self.show(message, false);
    }

    pub fn error(&self, message: &str) {
        self.show(message, true);
    }

    fn show(&self, message: &str, is_error: bool) {
        let seq = self.seq.get().wrapping_add(1);
        self.seq.set(seq);

        self.element.set_text_content(Some(message));
        self.element.set_class_name("notification");
        if is_error {
            let _ = self.element.class_list().add_1("error");
        }
        let _ = self.element.style().set_property("display", "block");

        let element = self.element.clone();
        let seq_cell = self.seq.clone();
        let hide = Closure::once_into_js(move || {
            if seq_cell.get() == seq {
                let _ = element.style().set_property("display", "none");
            }
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                hide.unchecked_ref(),
                NOTIFY_HIDE_MS,
            );
        }
    }
}
