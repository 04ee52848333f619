//! Examgen client entry point
//!
//! Binds the enhancement layer to the rendered page on wasm; the native
//! build only runs a smoke check of the core logic.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement};

    use examgen_client::autosave::{ExamForm, StatusIndicator};
    use examgen_client::consts::AUTOSAVE_INTERVAL_MS;
    use examgen_client::{AnswerSet, AutosaveController, LocalStorageStore, confirm, nav};

    /// Handles that keep the page wiring alive.
    ///
    /// Dropping cancels the autosave interval and deregisters every
    /// listener; normally the browser tears the page down instead.
    pub struct PageEnhancements {
        _autosave: Option<AutosaveWiring>,
        _cancel_listeners: Vec<Listener>,
    }

    struct AutosaveWiring {
        _interval: gloo_timers::callback::Interval,
        _listeners: Vec<Listener>,
    }

    /// Owned DOM event listener; deregisters itself on drop.
    struct Listener {
        target: web_sys::EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Listener {
        fn new(
            target: &web_sys::EventTarget,
            event: &'static str,
            handler: impl FnMut(web_sys::Event) + 'static,
        ) -> Self {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            Self {
                target: target.clone(),
                event,
                closure,
            }
        }
    }

    impl Drop for Listener {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        }
    }

    /// Run the full enhancement pass over the rendered page.
    pub fn enhance(document: &Document) -> PageEnhancements {
        activate_widgets(document);
        let cancel_listeners = setup_cancel_buttons(document);
        let autosave = setup_autosave(document);
        highlight_nav(document);

        PageEnhancements {
            _autosave: autosave,
            _cancel_listeners: cancel_listeners,
        }
    }

    /// The rendered `#exam-form`, plus the owning document (question
    /// cards live outside the form).
    #[derive(Clone)]
    struct DomExamForm {
        form: HtmlFormElement,
        document: Document,
    }

    impl DomExamForm {
        fn find(document: &Document) -> Option<Self> {
            let form = document
                .get_element_by_id("exam-form")?
                .dyn_into::<HtmlFormElement>()
                .ok()?;
            Some(Self {
                form,
                document: document.clone(),
            })
        }

        fn element(&self) -> &HtmlFormElement {
            &self.form
        }

        fn inputs(&self, selector: &str) -> Vec<HtmlInputElement> {
            let mut inputs = Vec::new();
            if let Ok(list) = self.form.query_selector_all(selector) {
                for i in 0..list.length() {
                    if let Some(input) = list
                        .item(i)
                        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
                    {
                        inputs.push(input);
                    }
                }
            }
            inputs
        }

        /// Inputs counted as answered: checked radios plus text fields
        /// with a non-blank value.
        fn answered_count(&self) -> usize {
            self.inputs(r#"input[type="radio"]:checked, input[type="text"]"#)
                .iter()
                .filter(|input| !input.value().trim().is_empty())
                .count()
        }

        /// Question cards rendered on the page, one per question
        fn question_count(&self) -> usize {
            self.document
                .query_selector_all(".question-card")
                .map(|list| list.length() as usize)
                .unwrap_or(0)
        }
    }

    impl ExamForm for DomExamForm {
        fn snapshot(&self) -> AnswerSet {
            let mut answers = AnswerSet::new();
            for input in self.inputs(r#"input[type="radio"]:checked, input[type="text"]"#) {
                let value = input.value();
                if input.type_() == "radio" || !value.is_empty() {
                    answers.insert(input.name(), value);
                }
            }
            answers
        }

        fn select_radio(&self, name: &str, value: &str) -> bool {
            let selector = format!(r#"input[type="radio"][name="{name}"][value="{value}"]"#);
            match self
                .form
                .query_selector(&selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                Some(radio) => {
                    radio.set_checked(true);
                    true
                }
                None => false,
            }
        }

        fn set_text(&self, name: &str, value: &str) -> bool {
            let selector = format!(r#"input[type="text"][name="{name}"]"#);
            match self
                .form
                .query_selector(&selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                Some(input) => {
                    input.set_value(value);
                    true
                }
                None => false,
            }
        }
    }

    /// The `#autosave-status` element; every update is skipped when the
    /// page has no indicator.
    #[derive(Clone)]
    struct DomStatusIndicator {
        el: Option<Element>,
    }

    impl DomStatusIndicator {
        fn find(document: &Document) -> Self {
            Self {
                el: document.get_element_by_id("autosave-status"),
            }
        }

        fn update(&self, text: &str, remove: &[&str], add: &str) {
            if let Some(el) = &self.el {
                el.set_text_content(Some(text));
                let classes = el.class_list();
                for class in remove {
                    let _ = classes.remove_1(class);
                }
                let _ = classes.add_1(add);
            }
        }
    }

    impl StatusIndicator for DomStatusIndicator {
        fn saving(&self) {
            self.update("Saving...", &["text-success", "text-info"], "text-muted");
        }

        fn saved(&self) {
            let ts = js_sys::Date::new_0().to_locale_time_string("en-US");
            self.update(&format!("Saved at {ts}"), &["text-muted"], "text-success");
        }

        fn restored(&self) {
            self.update("Restored saved answers", &[], "text-info");
        }
    }

    fn setup_autosave(document: &Document) -> Option<AutosaveWiring> {
        let form = DomExamForm::find(document)?;
        let status = DomStatusIndicator::find(document);
        let controller = Rc::new(AutosaveController::new(LocalStorageStore));

        // One-shot restore, before any save can overwrite the blob
        controller.restore(&form, &status);

        // Periodic saves, cancelled when the wiring is dropped
        let interval = {
            let controller = controller.clone();
            let form = form.clone();
            let status = status.clone();
            gloo_timers::callback::Interval::new(AUTOSAVE_INTERVAL_MS, move || {
                controller.save(&form, &status);
            })
        };

        let mut listeners = Vec::new();

        // Any input change saves immediately
        {
            let controller = controller.clone();
            let form = form.clone();
            let status = status.clone();
            listeners.push(Listener::new(
                form.element().as_ref(),
                "input",
                move |_event| {
                    status.saving();
                    controller.save(&form, &status);
                },
            ));
        }

        // Confirm submission of a mostly-unanswered exam
        {
            let form = form.clone();
            listeners.push(Listener::new(form.element().as_ref(), "submit", move |event| {
                let answered = form.answered_count();
                let total = form.question_count();
                if let Some(warning) = confirm::submit_warning(answered, total) {
                    if !confirm_dialog(&warning) {
                        event.prevent_default();
                    }
                }
            }));
        }

        // A submit attempt leaves no residual local state
        listeners.push(Listener::new(form.element().as_ref(), "submit", move |_event| {
            controller.clear();
        }));

        Some(AutosaveWiring {
            _interval: interval,
            _listeners: listeners,
        })
    }

    fn confirm_dialog(message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn setup_cancel_buttons(document: &Document) -> Vec<Listener> {
        let mut listeners = Vec::new();
        if let Ok(buttons) = document.query_selector_all(".cancel-exam-btn") {
            for i in 0..buttons.length() {
                let Some(button) = buttons.item(i) else { continue };
                listeners.push(Listener::new(button.as_ref(), "click", move |event| {
                    if !confirm_dialog(confirm::CANCEL_EXAM_PROMPT) {
                        event.prevent_default();
                    }
                }));
            }
        }
        listeners
    }

    /// Mark the nav link pointing at the current page
    fn highlight_nav(document: &Document) {
        let Some(path) = web_sys::window().and_then(|w| w.location().pathname().ok()) else {
            return;
        };
        let Ok(links) = document.query_selector_all(".nav-link") else {
            return;
        };
        for i in 0..links.length() {
            let Some(link) = links.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            if link
                .get_attribute("href")
                .is_some_and(|href| nav::is_active(&href, &path))
            {
                let _ = link.class_list().add_1("active");
            }
        }
    }

    /// Construct Bootstrap tooltips and popovers for elements declaring
    /// them via data attributes. The bootstrap bundle is loaded by the
    /// page, not by this module; when it is missing the activation is
    /// skipped with a warning.
    fn activate_widgets(document: &Document) {
        activate_widget_kind(document, "Tooltip", r#"[data-bs-toggle="tooltip"]"#);
        activate_widget_kind(document, "Popover", r#"[data-bs-toggle="popover"]"#);
    }

    fn activate_widget_kind(document: &Document, kind: &str, selector: &str) {
        let Ok(ns) = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("bootstrap"))
        else {
            return;
        };
        if ns.is_undefined() {
            log::warn!("bootstrap global missing, {kind} activation skipped");
            return;
        }
        let Ok(ctor) = js_sys::Reflect::get(&ns, &JsValue::from_str(kind)) else {
            return;
        };
        let Ok(ctor) = ctor.dyn_into::<js_sys::Function>() else {
            return;
        };
        let Ok(list) = document.query_selector_all(selector) else {
            return;
        };
        for i in 0..list.length() {
            if let Some(el) = list.item(i) {
                let args = js_sys::Array::of1(el.as_ref());
                if js_sys::Reflect::construct(&ctor, &args).is_err() {
                    log::warn!("{kind} activation failed");
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    /// Keeps the listeners and the autosave interval alive for the page
    /// lifetime; page unload drops them with the wasm instance.
    static ENHANCEMENTS: std::cell::RefCell<Option<wasm_page::PageEnhancements>> =
        const { std::cell::RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Examgen client starting...");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document available, enhancements skipped");
        return;
    };

    let enhancements = wasm_page::enhance(&document);
    ENHANCEMENTS.with(|slot| *slot.borrow_mut() = Some(enhancements));

    log::info!("Examgen client running!");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Examgen client (native) starting...");
    log::info!("DOM wiring requires a browser - run with `trunk serve` for the web version");

    // Run smoke checks
    println!("\nRunning core logic smoke checks...");
    smoke_check_core();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check_core() {
    use examgen_client::{AnswerSet, AnswerStore, AutosaveController, MemoryStore, confirm};

    let mut answers = AnswerSet::new();
    answers.insert("q1", "b");
    answers.insert("q2", "Paris");

    let blob = serde_json::to_string(&answers).expect("answer set serializes");
    let parsed = AnswerSet::from_json(&blob).expect("blob parses back");
    assert_eq!(parsed, answers, "Round trip should preserve answers");

    let store = MemoryStore::new();
    store.set(AutosaveController::<MemoryStore>::STORAGE_KEY, &blob);
    assert_eq!(
        store.get(AutosaveController::<MemoryStore>::STORAGE_KEY).as_deref(),
        Some(blob.as_str())
    );

    assert!(confirm::submit_warning(1, 4).is_some(), "1 of 4 should prompt");
    assert!(confirm::submit_warning(3, 4).is_none(), "3 of 4 should not prompt");

    println!("✓ Core logic smoke checks passed!");
}
