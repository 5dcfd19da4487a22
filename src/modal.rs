// One modal abstraction for both overlays, parameterized by the element to
// focus on open and an optional close side-effect. Dismissal (close buttons,
// Escape, backdrop clicks) is wired once for all instances.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent, Window};

/// A two-state overlay: closed or open.
pub struct Modal {
    root: HtmlElement,
    focus_target: Option<HtmlElement>,
    on_close: Option<Box<dyn Fn()>>,
}

impl Modal {
    pub fn new(root: HtmlElement) -> Self {
        Modal {
            root,
            focus_target: None,
            on_close: None,
        }
    }

    /// Element to receive focus when the modal opens.
    pub fn focus_on_open(mut self, target: HtmlElement) -> Self {
        self.focus_target = Some(target);
        self
    }

    /// Side-effect run on every close, e.g. resetting the video element.
    pub fn on_close(mut self, effect: impl Fn() + 'static) -> Self {
        self.on_close = Some(Box::new(effect));
        self
    }

    pub fn open(&self) {
        let _ = self.root.style().set_property("display", "flex");
        let _ = self.root.set_attribute("aria-hidden", "false");
        if let Some(target) = &self.focus_target {
            let _ = target.focus();
        }
    }

    pub fn close(&self) {
        let _ = self.root.style().set_property("display", "none");
        let _ = self.root.set_attribute("aria-hidden", "true");
        if let Some(effect) = &self.on_close {
            effect();
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self.root.style().get_property_value("display").as_deref(),
            Ok("flex")
        )
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }
}

/// Close on click and on Enter/Space, matching the close controls' role.
pub fn bind_close_button(modal: &Rc<Modal>, button: &HtmlElement) {
    let on_click = {
        let modal = modal.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            modal.close();
        })
    };
    let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();

    let on_key = {
        let modal = modal.clone();
        Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == "Enter" || event.key() == " " {
                modal.close();
            }
        })
    };
    let _ = button.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref());
    on_key.forget();
}

/// Install shared dismissal handling: Escape closes whichever modals are
/// open (each checked independently), and a click landing exactly on a
/// modal's backdrop closes that modal.
pub fn install_dismissal(window: &Window, modals: Vec<Rc<Modal>>) {
    let on_escape = {
        let modals = modals.clone();
        Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() != "Escape" {
                return;
            }
            for modal in &modals {
                if modal.is_open() {
                    modal.close();
                }
            }
        })
    };
    let _ = window.add_event_listener_with_callback("keydown", on_escape.as_ref().unchecked_ref());
    on_escape.forget();

    for modal in modals {
        let on_backdrop = {
            let modal = modal.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(target) = event.target() else {
                    return;
                };
                if js_sys::Object::is(target.as_ref(), modal.root().as_ref()) {
                    modal.close();
                }
            })
        };
        let _ = modal
            .root()
            .add_event_listener_with_callback("click", on_backdrop.as_ref().unchecked_ref());
        on_backdrop.forget();
    }
}
