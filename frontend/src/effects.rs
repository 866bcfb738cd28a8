//! Small scroll and click effects.

/// Hero parallax shift. `None` once the hero has scrolled past `limit`;
/// the last applied value is left in place then.
pub fn parallax_shift(scroll: f64, limit: f64) -> Option<f64> {
    (scroll < limit).then(|| scroll * 0.3)
}

/// Scroll progress in percent, clamped to `0..=100`. Pages shorter than the
/// viewport report 0.
pub fn scroll_progress(scroll: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll / scrollable * 100.0).clamp(0.0, 100.0)
}

/// When each hero line starts fading in on load.
pub fn hero_intro_delay(index: usize) -> u32 {
    100 + index as u32 * 200
}

/// Where a click ripple sits inside its button, in button-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub diameter: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    pub fn at(button_left: f64, button_top: f64, width: f64, height: f64, click_x: f64, click_y: f64) -> Self {
        let diameter = width.max(height);
        let radius = diameter / 2.0;
        Self {
            diameter,
            left: click_x - button_left - radius,
            top: click_y - button_top - radius,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "position: absolute; width: {d}px; height: {d}px; left: {l}px; top: {t}px; \
             background: rgba(255, 255, 255, 0.4); border-radius: 50%; transform: scale(0); \
             animation: ripple 0.6s ease-out; pointer-events: none;",
            d = self.diameter,
            l = self.left,
            t = self.top
        )
    }
}
