use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::motion::throttle::{Admission, Throttle};
use crate::motion::viewport::{BoundingBox, Viewport};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(format!("{:?}", value))
    }
}

/// Handles to the live page, cloned into every listener.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub body: HtmlElement,
}

impl Page {
    pub fn current() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let document = window.document().ok_or(DomError::NoDocument)?;
        let body = document.body().ok_or(DomError::NoBody)?;
        Ok(Self { window, document, body })
    }

    /// Milliseconds on the same clock animation frames report.
    pub fn now(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    pub fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// Appends a `<style>` to the head. With an id, only once per page.
    pub fn inject_stylesheet(&self, id: Option<&str>, css: &str) {
        if let Some(id) = id {
            if self.by_id(id).is_some() {
                return;
            }
        }
        let Ok(style) = self.document.create_element("style") else {
            return;
        };
        if let Some(id) = id {
            style.set_id(id);
        }
        style.set_text_content(Some(css));
        if let Some(head) = self.document.head() {
            let _ = head.append_child(&style);
        }
    }

    /// Runs `handler` on scroll, at most once per `throttle_ms`, always
    /// evaluating the trailing event of a burst.
    pub fn on_scroll<F>(&self, throttle_ms: f64, handler: F)
    where
        F: FnMut() + 'static,
    {
        let handler = Rc::new(RefCell::new(handler));
        let throttle = Rc::new(RefCell::new(Throttle::new(throttle_ms)));
        let page = self.clone();

        EventListener::new(&self.window, "scroll", move |_| {
            let admission = throttle.borrow_mut().admit(page.now());
            match admission {
                Admission::Run => (handler.borrow_mut())(),
                Admission::Defer { wait_ms } => {
                    let handler = handler.clone();
                    let throttle = throttle.clone();
                    let page = page.clone();
                    Timeout::new(wait_ms.ceil() as u32, move || {
                        throttle.borrow_mut().flush(page.now());
                        (handler.borrow_mut())();
                    })
                    .forget();
                }
                Admission::Skip => {}
            }
        })
        .forget();
    }

    pub fn offset_top(element: &Element) -> f64 {
        element
            .dyn_ref::<HtmlElement>()
            .map_or(0.0, |e| f64::from(e.offset_top()))
    }

    pub fn offset_height(element: &Element) -> f64 {
        element
            .dyn_ref::<HtmlElement>()
            .map_or(0.0, |e| f64::from(e.offset_height()))
    }
}

impl Viewport for Page {
    type Node = Element;

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn bounding_box(&self, node: &Element) -> Option<BoundingBox> {
        if !node.is_connected() {
            return None;
        }
        let rect = node.get_bounding_client_rect();
        Some(BoundingBox::new(rect.top(), rect.height()))
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}
