use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use log::{debug, info, warn};
use web_sys::Element;

use super::page::Page;
use crate::config::CounterSettings;
use crate::motion::counter::{parse_target, CounterTask, StatsCounters};
use crate::motion::viewport::Viewport;

pub fn bind_counters(page: &Page, settings: CounterSettings, throttle_ms: f64) {
    let stats = page.query_all(".stat__number");
    if stats.is_empty() || page.query(".nosotros__stats").is_none() {
        debug!("No stats block on this page");
        return;
    }

    let group = Rc::new(RefCell::new(StatsCounters::default()));
    let page_for_tick = page.clone();
    let tick = move || {
        if group.borrow().has_started() {
            return;
        }
        let section = page_for_tick
            .query(".nosotros__stats")
            .and_then(|s| page_for_tick.bounding_box(&s));
        let viewport_height = page_for_tick.viewport_height();
        if !group.borrow_mut().try_start(section, viewport_height) {
            return;
        }

        info!("Stats in view, starting {} counters", stats.len());
        let now = page_for_tick.now();
        for stat in &stats {
            let raw = stat.get_attribute("data-target").unwrap_or_default();
            match parse_target(&raw) {
                Some(target) => run(
                    stat.clone(),
                    CounterTask::new(target, settings.duration_ms, settings.easing, now),
                ),
                None => warn!("Skipping counter with data-target {:?}", raw),
            }
        }
    };
    tick();
    page.on_scroll(throttle_ms, tick);
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

fn run(element: Element, task: CounterTask) {
    schedule(element, Rc::new(RefCell::new(task)), Rc::default());
}

/// One frame per callback; the chain ends when the task reports done.
fn schedule(element: Element, task: Rc<RefCell<CounterTask>>, slot: FrameSlot) {
    let next = slot.clone();
    let handle = request_animation_frame(move |timestamp| {
        next.borrow_mut().take();
        let frame = task.borrow_mut().frame(timestamp);
        element.set_text_content(Some(&frame.value.to_string()));
        if !frame.done {
            schedule(element, task, next);
        }
    });
    *slot.borrow_mut() = Some(handle);
}
