use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node, ScrollBehavior, ScrollToOptions};

use super::page::{set_class, Page};
use crate::config::SiteSettings;
use crate::motion::viewport::Viewport;
use crate::nav::{anchor_scroll_target, header_scrolled, link_targets, NavSection, NavState, ScrollLock};

pub fn bind_header(page: &Page, settings: &SiteSettings) {
    let Some(header) = page.by_id("header") else {
        debug!("No #header on this page");
        return;
    };
    let threshold = settings.header_scrolled_after;
    let page_for_tick = page.clone();
    let tick = move || {
        let scrolled = header_scrolled(page_for_tick.scroll_offset(), threshold);
        set_class(&header, "scrolled", scrolled);
    };
    tick();
    // Unthrottled.
    page.on_scroll(0.0, tick);
}

pub fn bind_navigation(page: &Page, settings: &SiteSettings) {
    let state = Rc::new(RefCell::new(NavState::new(settings.close_menu_on_outside_click)));
    bind_menu(page, &state);
    bind_active_link(page, &state, settings);
}

fn apply_lock(page: &Page, menu: Option<&Element>, lock: ScrollLock) {
    let open = lock == ScrollLock::Locked;
    if let Some(menu) = menu {
        set_class(menu, "show", open);
    }
    let _ = page
        .body
        .style()
        .set_property("overflow", if open { "hidden" } else { "" });
}

fn bind_menu(page: &Page, state: &Rc<RefCell<NavState>>) {
    let menu = page.by_id("nav-menu");

    let on = |target: &Element, transition: fn(&mut NavState) -> ScrollLock| {
        let page = page.clone();
        let menu = menu.clone();
        let state = state.clone();
        EventListener::new(target, "click", move |_| {
            let lock = transition(&mut *state.borrow_mut());
            apply_lock(&page, menu.as_ref(), lock);
            debug!("Nav menu {:?}", state.borrow().menu());
        })
        .forget();
    };

    match page.by_id("nav-toggle") {
        Some(toggle) => on(&toggle, NavState::toggle_clicked),
        None => debug!("No #nav-toggle, mobile menu stays closed"),
    }
    if let Some(close) = page.by_id("nav-close") {
        on(&close, NavState::close_clicked);
    }
    for link in page.query_all(".nav__link") {
        on(&link, NavState::link_clicked);
    }

    if state.borrow().outside_close_enabled() {
        let document = page.document.clone();
        let page = page.clone();
        let state = state.clone();
        EventListener::new(&document, "click", move |event| {
            let Some(menu) = menu.as_ref() else { return };
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = target.as_ref().map_or(false, |node| {
                menu.contains(Some(node))
                    || page
                        .by_id("nav-toggle")
                        .map_or(false, |toggle| toggle.contains(Some(node)))
            });
            if inside {
                return;
            }
            let lock = state.borrow_mut().outside_clicked();
            if let Some(lock) = lock {
                apply_lock(&page, Some(menu), lock);
            }
        })
        .forget();
    }
}

fn bind_active_link(page: &Page, state: &Rc<RefCell<NavState>>, settings: &SiteSettings) {
    let section_nodes = page.query_all("section[id]");
    if section_nodes.is_empty() {
        debug!("No sections with ids, active link tracking off");
        return;
    }

    let lead = settings.nav_section_lead;
    let page_for_tick = page.clone();
    let state = state.clone();
    let tick = move || {
        // Layout is re-measured on every tick on purpose; sections move as
        // images load and the menu reflows.
        let sections: Vec<NavSection> = section_nodes
            .iter()
            .map(|node| {
                NavSection::from_layout(
                    node.id(),
                    Page::offset_top(node),
                    Page::offset_height(node),
                    lead,
                )
            })
            .collect();

        let changed = state
            .borrow_mut()
            .scrolled(page_for_tick.scroll_offset(), &sections);
        if !changed {
            return;
        }

        let state = state.borrow();
        for link in page_for_tick.query_all(".nav__link") {
            let href = link.get_attribute("href").unwrap_or_default();
            let active = state.active().map_or(false, |id| link_targets(&href, id));
            set_class(&link, "active", active);
        }
    };
    tick();
    page.on_scroll(settings.scroll_throttle_ms, tick);
}

pub fn bind_smooth_anchors(page: &Page) {
    for anchor in page.query_all(r##"a[href^="#"]"##) {
        let page = page.clone();
        let link = anchor.clone();
        EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let href = link.get_attribute("href").unwrap_or_default();
                // A bare "#" isn't a valid selector.
                if href.len() < 2 {
                    return;
                }
                event.prevent_default();
                let Some(target) = page.query(&href) else {
                    return;
                };
                let header_height = page.by_id("header").map_or(0.0, |h| Page::offset_height(&h));
                let options = ScrollToOptions::new();
                options.set_top(anchor_scroll_target(Page::offset_top(&target), header_height));
                options.set_behavior(ScrollBehavior::Smooth);
                page.window.scroll_to_with_scroll_to_options(&options);
            },
        )
        .forget();
    }
}
