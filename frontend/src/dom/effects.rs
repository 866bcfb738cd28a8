use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, ScrollRestoration};

use super::page::{set_class, set_style, Page};
use crate::config::{Parallax, SiteSettings};
use crate::effects::{hero_intro_delay, parallax_shift, scroll_progress, Ripple};
use crate::motion::viewport::Viewport;
use crate::motion::visibility::section_reached;

pub fn bind_effects(page: &Page, settings: &SiteSettings) {
    if settings.scroll_to_top_on_load {
        page.window.scroll_to_with_x_and_y(0.0, 0.0);
        if let Ok(history) = page.window.history() {
            let _ = history.set_scroll_restoration(ScrollRestoration::Manual);
        }
    }
    if settings.hero_intro {
        hero_intro(page);
    }
    match settings.parallax {
        Parallax::None => {}
        Parallax::HeroVar => hero_parallax(page, settings.scroll_throttle_ms),
        Parallax::HeroImage => hero_image_parallax(page, settings.scroll_throttle_ms),
    }
    if settings.ripple {
        ripples(page);
    }
    if settings.scroll_progress {
        progress_bar(page, settings.scroll_throttle_ms);
    }
    if settings.section_reveal {
        section_reveal(page, settings.scroll_throttle_ms);
    }
}

fn hero_intro(page: &Page) {
    let lines = page.query_all(".hero__subtitle, .hero__title, .hero__description, .hero__buttons");
    for (index, line) in lines.into_iter().enumerate() {
        set_style(&line, "opacity", "0");
        set_style(&line, "transform", "translateY(40px)");
        Timeout::new(hero_intro_delay(index), move || {
            set_style(&line, "transition", "opacity 0.8s ease, transform 0.8s ease");
            set_style(&line, "opacity", "1");
            set_style(&line, "transform", "translateY(0)");
        })
        .forget();
    }
}

fn hero_parallax(page: &Page, throttle_ms: f64) {
    let Some(hero) = page.query(".hero") else {
        debug!("No .hero, parallax off");
        return;
    };
    let scroll_page = page.clone();
    page.on_scroll(throttle_ms, move || {
        let limit = Page::offset_height(&hero);
        if let Some(shift) = parallax_shift(scroll_page.scroll_offset(), limit) {
            set_style(&hero, "--parallax", &format!("{}px", shift));
        }
    });
}

fn hero_image_parallax(page: &Page, throttle_ms: f64) {
    let Some(image) = page.query(".hero__bg img") else {
        debug!("No hero background image, parallax off");
        return;
    };
    let scroll_page = page.clone();
    page.on_scroll(throttle_ms, move || {
        let limit = scroll_page.viewport_height();
        if let Some(shift) = parallax_shift(scroll_page.scroll_offset(), limit) {
            set_style(&image, "transform", &format!("scale(1.1) translateY({}px)", shift));
        }
    });
}

fn ripples(page: &Page) {
    for button in page.query_all(".btn") {
        let page = page.clone();
        let target = button.clone();
        EventListener::new(&button, "click", move |event| {
            let Some(click) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = target.get_bounding_client_rect();
            let ripple = Ripple::at(
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
                f64::from(click.client_x()),
                f64::from(click.client_y()),
            );
            let Ok(span) = page.document.create_element("span") else {
                return;
            };
            let _ = span.set_attribute("style", &ripple.css());
            set_style(&target, "position", "relative");
            set_style(&target, "overflow", "hidden");
            if target.append_child(&span).is_ok() {
                Timeout::new(600, move || span.remove()).forget();
            }
        })
        .forget();
    }
}

fn progress_bar(page: &Page, throttle_ms: f64) {
    let Ok(bar) = page.document.create_element("div") else {
        return;
    };
    bar.set_class_name("scroll-progress");
    if page.body.append_child(&bar).is_err() {
        return;
    }
    let scroll_page = page.clone();
    page.on_scroll(throttle_ms, move || {
        let document_height = scroll_page
            .document
            .document_element()
            .map_or(0.0, |root| f64::from(root.scroll_height()));
        let percent = scroll_progress(
            scroll_page.scroll_offset(),
            document_height,
            scroll_page.viewport_height(),
        );
        set_style(&bar, "width", &format!("{}%", percent));
    });
}

fn section_reveal(page: &Page, throttle_ms: f64) {
    let sections = page.query_all("section");
    let scroll_page = page.clone();
    let tick = move || {
        let viewport_height = scroll_page.viewport_height();
        for section in &sections {
            let reached = scroll_page
                .bounding_box(section)
                .map_or(false, |bbox| section_reached(&bbox, viewport_height, 0.85));
            if reached {
                set_class(section, "section-visible", true);
            }
        }
    };
    tick();
    page.on_scroll(throttle_ms, tick);
}
