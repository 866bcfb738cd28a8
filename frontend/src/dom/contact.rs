use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use super::page::{set_class, Page};
use super::toast::NotificationHost;
use crate::config::{self, FieldFlags, SiteSettings};
use crate::contact::{
    ContactController, ContactSubmission, ContactView, EmailJsDispatcher, SimulatedDispatcher,
    SiteDispatcher, TimerPause,
};
use crate::toast::Severity;

const FIELD_SELECTOR: &str = ".form__group input, .form__group textarea, .form__group select";

struct DomContactView {
    page: Page,
    form: HtmlFormElement,
    button: Option<HtmlButtonElement>,
    loading_label: &'static str,
    original_label: RefCell<Option<String>>,
    notifications: Rc<NotificationHost>,
}

impl ContactView for DomContactView {
    fn set_pending(&self, pending: bool) {
        let Some(button) = self.button.as_ref() else {
            return;
        };
        if pending {
            *self.original_label.borrow_mut() = Some(button.inner_html());
            button.set_inner_html(self.loading_label);
            button.set_disabled(true);
        } else {
            if let Some(label) = self.original_label.borrow_mut().take() {
                button.set_inner_html(&label);
            }
            button.set_disabled(false);
        }
    }

    fn reset_fields(&self) {
        self.form.reset();
    }

    fn clear_field_flags(&self) {
        for input in self.page.query_all(".form__group input, .form__group textarea") {
            set_class(&input, "has-value", false);
            if let Some(group) = input.parent_element() {
                set_class(&group, "focused", false);
            }
        }
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notifications.show(message, severity);
    }

    fn celebrate(&self) {
        show_success_overlay(&self.page);
    }
}

pub fn bind_contact(page: &Page, settings: &SiteSettings, notifications: Rc<NotificationHost>) {
    let Some(form) = page
        .by_id("contact-form")
        .and_then(|f| f.dyn_into::<HtmlFormElement>().ok())
    else {
        debug!("No #contact-form on this page");
        return;
    };

    if let Some(css) = settings.spinner_stylesheet {
        page.inject_stylesheet(Some("spinner-styles"), css);
    }

    let dispatcher = if settings.live_mail {
        let key = config::emailjs_public_key();
        if key.is_empty() {
            warn!("EMAILJS_PUBLIC_KEY was not set at build time, deliveries will be rejected");
        }
        SiteDispatcher::EmailJs(EmailJsDispatcher::new(config::EMAILJS_ENDPOINT, key))
    } else {
        SiteDispatcher::Simulated(SimulatedDispatcher::new(settings.simulated_delivery_ms))
    };

    let button = form
        .query_selector(r#"button[type="submit"]"#)
        .ok()
        .flatten()
        .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok());

    let view = DomContactView {
        page: page.clone(),
        form: form.clone(),
        button,
        loading_label: settings.loading_label,
        original_label: RefCell::new(None),
        notifications,
    };
    let controller = Rc::new(ContactController::new(
        dispatcher,
        view,
        TimerPause,
        settings.contact.clone(),
    ));

    let source = form.clone();
    EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let submission = read_submission(&source);
            debug!("Contact form submitted while {:?}", controller.state());
            let controller = controller.clone();
            spawn_local(async move {
                if let Err(e) = controller.submit(submission).await {
                    debug!("Submission settled with error: {}", e);
                }
            });
        },
    )
    .forget();
}

fn read_submission(form: &HtmlFormElement) -> ContactSubmission {
    ContactSubmission {
        nombre: field_value(form, "#nombre"),
        email: field_value(form, "#email"),
        telefono: field_value(form, "#telefono"),
        servicio: selected_text(form, "#servicio"),
        mensaje: field_value(form, "#mensaje"),
        website: field_value(form, "#website"),
    }
}

fn field_value(form: &HtmlFormElement, selector: &str) -> String {
    let Some(element) = form.query_selector(selector).ok().flatten() else {
        return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

/// Text of the chosen `<option>`, which reads better in the mail than its
/// value.
fn selected_text(form: &HtmlFormElement, selector: &str) -> String {
    let select = form
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|s| s.dyn_into::<HtmlSelectElement>().ok());
    let Some(select) = select else {
        return field_value(form, selector);
    };
    let Ok(index) = u32::try_from(select.selected_index()) else {
        return String::new();
    };
    select
        .item(index)
        .and_then(|o| o.dyn_into::<HtmlOptionElement>().ok())
        .map(|o| o.text())
        .unwrap_or_default()
}

pub fn bind_field_flags(page: &Page, mode: FieldFlags) {
    if mode == FieldFlags::None {
        return;
    }
    for field in page.query_all(FIELD_SELECTOR) {
        set_class(&field, "has-value", has_value(&field));

        let target = field.clone();
        EventListener::new(&field, "input", move |_| {
            set_class(&target, "has-value", has_value(&target));
        })
        .forget();

        if mode == FieldFlags::ValueAndFocus {
            for (event, focused) in [("focus", true), ("blur", false)] {
                let target = field.clone();
                EventListener::new(&field, event, move |_| {
                    if let Some(group) = target.parent_element() {
                        set_class(&group, "focused", focused);
                    }
                })
                .forget();
            }
        }
    }
}

fn has_value(field: &Element) -> bool {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        !input.value().is_empty()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        !area.value().is_empty()
    } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
        !select.value().is_empty()
    } else {
        false
    }
}

const CHECKMARK: &str = r##"<div class="success-checkmark"><svg viewBox="0 0 52 52"><circle cx="26" cy="26" r="25" fill="none" stroke="#10B981" stroke-width="2"/><path fill="none" stroke="#10B981" stroke-width="3" d="M14.1 27.2l7.1 7.2 16.7-16.8"/></svg></div>"##;

/// Checkmark overlay: visible for 2s, fades for 0.5s, then removed.
fn show_success_overlay(page: &Page) {
    let Ok(overlay) = page.document.create_element("div") else {
        return;
    };
    overlay.set_class_name("success-overlay");
    overlay.set_inner_html(CHECKMARK);
    if page.body.append_child(&overlay).is_err() {
        return;
    }

    Timeout::new(2000, move || {
        set_class(&overlay, "fade-out", true);
        Timeout::new(500, move || overlay.remove()).forget();
    })
    .forget();
}
