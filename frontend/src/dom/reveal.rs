use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::page::{set_class, set_style, DomError, Page};
use crate::config::{RevealDriver, RevealSettings};
use crate::motion::reveal::{RevealRegistry, Stagger, Transition};
use crate::motion::visibility::RevealPolicy;

const INDEX_ATTR: &str = "data-reveal-index";

type Registry = Rc<RefCell<RevealRegistry<Element>>>;

pub fn bind_reveal(page: &Page, settings: &RevealSettings, throttle_ms: f64) -> Result<(), DomError> {
    let elements = page.query_all(settings.selector);
    if elements.is_empty() {
        debug!("No reveal targets for {}", settings.selector);
        return Ok(());
    }
    if let Some(css) = settings.stylesheet {
        page.inject_stylesheet(None, css);
    }

    let registry: Registry = Rc::new(RefCell::new(RevealRegistry::new(elements, settings.stagger)));
    if let Some(class) = settings.pending_class {
        for node in registry.borrow().nodes() {
            set_class(node, class, true);
        }
    }

    match settings.driver {
        RevealDriver::Poll => {
            let settings = settings.clone();
            let page_for_tick = page.clone();
            let pending = registry.borrow().pending();
            let tick = move || {
                if registry.borrow().pending() == 0 {
                    return;
                }
                let transitions = registry.borrow_mut().poll(&page_for_tick, settings.policy);
                for transition in &transitions {
                    apply(transition, &settings);
                }
            };
            tick();
            page.on_scroll(throttle_ms, tick);
            info!("Polling {} reveal targets", pending);
        }
        RevealDriver::Observe { root_margin } => {
            let threshold = match settings.policy {
                RevealPolicy::Threshold { fraction } => fraction,
                RevealPolicy::Margin { .. } => 0.0,
            };
            let pending = registry.borrow().pending();
            let settings = settings.clone();
            observe_once(registry, threshold, Some(root_margin), move |transition| {
                apply(transition, &settings)
            })?;
            info!("Observing {} reveal targets", pending);
        }
    }
    Ok(())
}

/// Highlighted words get their own observer: half visible, no stagger.
pub fn bind_highlights(page: &Page) -> Result<(), DomError> {
    let elements = page.query_all(".highlight");
    if elements.is_empty() {
        return Ok(());
    }
    let registry: Registry = Rc::new(RefCell::new(RevealRegistry::new(elements, Stagger::None)));
    observe_once(registry, 0.5, None, |transition| {
        set_class(&transition.node, "highlight-animate", true);
    })
}

fn apply(transition: &Transition<Element>, settings: &RevealSettings) {
    set_style(
        &transition.node,
        settings.delay_property,
        &format!("{}ms", transition.delay_ms),
    );
    for class in settings.revealed_classes {
        set_class(&transition.node, class, true);
    }
}

/// Registers every node with an `IntersectionObserver` and stops watching
/// each one after its first crossing.
fn observe_once<F>(
    registry: Registry,
    threshold: f64,
    root_margin: Option<&str>,
    on_reveal: F,
) -> Result<(), DomError>
where
    F: Fn(&Transition<Element>) + 'static,
{
    let watched = registry.clone();
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let target = entry.target();
            let Some(index) = target
                .get_attribute(INDEX_ATTR)
                .and_then(|v| v.parse::<usize>().ok())
            else {
                continue;
            };

            let transition = watched.borrow_mut().intersected(index, entry.is_intersecting());
            if let Some(transition) = transition {
                on_reveal(&transition);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

    for (index, node) in registry.borrow().nodes().enumerate() {
        let _ = node.set_attribute(INDEX_ATTR, &index.to_string());
        observer.observe(node);
    }

    callback.forget();
    Ok(())
}
