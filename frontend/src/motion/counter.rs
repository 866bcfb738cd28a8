use super::viewport::BoundingBox;
use super::visibility::section_in_view;

/// Nominal frame length the linear stepper is tuned for (60fps).
const FRAME_MS: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Adds `target / (duration / 16)` every frame, whatever the real frame
    /// time is.
    LinearStep,
    /// Time based `1 - (1 - t)^4`.
    QuarticOut,
}

impl Easing {
    /// Eased progress for the time based curves.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::LinearStep => t,
            Easing::QuarticOut => 1.0 - (1.0 - t).powi(4),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: u32,
    pub done: bool,
}

#[derive(Debug)]
pub struct CounterTask {
    target: u32,
    duration_ms: f64,
    easing: Easing,
    started_at: f64,
    current: f64,
    done: bool,
}

impl CounterTask {
    pub fn new(target: u32, duration_ms: f64, easing: Easing, started_at: f64) -> Self {
        Self {
            target,
            duration_ms,
            easing,
            started_at,
            current: 0.0,
            done: false,
        }
    }

    /// Advances one animation frame. The last frame always lands exactly on
    /// the target; frames after that keep returning it.
    pub fn frame(&mut self, now: f64) -> CounterFrame {
        if self.done {
            return self.finished();
        }

        let target = f64::from(self.target);
        match self.easing {
            Easing::LinearStep => {
                self.current += target / (self.duration_ms / FRAME_MS);
                if self.current < target {
                    return self.running(self.current);
                }
            }
            Easing::QuarticOut => {
                let progress = if self.duration_ms > 0.0 {
                    ((now - self.started_at).max(0.0) / self.duration_ms).min(1.0)
                } else {
                    1.0
                };
                if progress < 1.0 {
                    return self.running(self.easing.apply(progress) * target);
                }
            }
        }

        self.done = true;
        self.finished()
    }

    fn running(&self, value: f64) -> CounterFrame {
        CounterFrame {
            value: value.floor() as u32,
            done: false,
        }
    }

    fn finished(&self) -> CounterFrame {
        CounterFrame {
            value: self.target,
            done: true,
        }
    }
}

/// Reads a `data-target` attribute the way `parseInt` does: optional
/// leading whitespace, then digits, ignoring anything after them. Empty,
/// non numeric and negative values yield `None` and the counter is skipped.
pub fn parse_target(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: &str = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .map_or(unsigned, |end| &unsigned[..end]);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// The stats block starts its counters once, the first time it scrolls
/// into view.
#[derive(Debug, Default)]
pub struct StatsCounters {
    started: bool,
}

impl StatsCounters {
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Returns true exactly once: on the first call where the section is on
    /// screen. A missing section never starts anything.
    pub fn try_start(&mut self, section: Option<BoundingBox>, viewport_height: f64) -> bool {
        if self.started {
            return false;
        }
        match section {
            Some(bbox) if section_in_view(&bbox, viewport_height) => {
                self.started = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_until(task: &mut CounterTask, until: f64) -> CounterFrame {
        let mut last = task.frame(0.0);
        let mut now = 16.0;
        while now <= until && !last.done {
            last = task.frame(now);
            now += 16.0;
        }
        last
    }

    #[test]
    fn linear_step_is_halfway_at_half_time() {
        let mut task = CounterTask::new(250, 2000.0, Easing::LinearStep, 0.0);
        let frame = run_until(&mut task, 1000.0);

        assert!(!frame.done);
        assert!((124..=126).contains(&frame.value), "got {}", frame.value);
    }

    #[test]
    fn linear_step_lands_on_target() {
        let mut task = CounterTask::new(250, 2000.0, Easing::LinearStep, 0.0);
        let frame = run_until(&mut task, 2000.0);

        assert_eq!(frame, CounterFrame { value: 250, done: true });
        assert!(task.done);
        assert_eq!(task.frame(5000.0).value, 250);
    }

    #[test]
    fn quartic_out_front_loads_progress() {
        let mut task = CounterTask::new(1000, 2500.0, Easing::QuarticOut, 0.0);
        // t = 0.4 -> 1 - 0.6^4 = 0.8704
        assert_eq!(task.frame(1000.0), CounterFrame { value: 870, done: false });
        assert_eq!(task.frame(2500.0), CounterFrame { value: 1000, done: true });
    }

    #[test]
    fn quartic_out_measures_from_start_time() {
        let mut task = CounterTask::new(100, 1000.0, Easing::QuarticOut, 5000.0);
        assert_eq!(task.frame(5000.0).value, 0);
        assert!(task.frame(6000.0).done);
    }

    #[test]
    fn zero_duration_finishes_on_first_frame() {
        let mut linear = CounterTask::new(15, 0.0, Easing::LinearStep, 0.0);
        let mut quartic = CounterTask::new(15, 0.0, Easing::QuarticOut, 0.0);
        assert_eq!(linear.frame(0.0), CounterFrame { value: 15, done: true });
        assert_eq!(quartic.frame(0.0), CounterFrame { value: 15, done: true });
    }

    #[test]
    fn zero_target_is_immediately_done() {
        let mut task = CounterTask::new(0, 2000.0, Easing::LinearStep, 0.0);
        assert_eq!(task.frame(0.0), CounterFrame { value: 0, done: true });
    }

    #[test]
    fn parse_target_follows_parse_int() {
        assert_eq!(parse_target("250"), Some(250));
        assert_eq!(parse_target("  35+"), Some(35));
        assert_eq!(parse_target("+12"), Some(12));
        assert_eq!(parse_target("98%"), Some(98));
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target("-4"), None);
        assert_eq!(parse_target("99999999999"), None);
    }

    #[test]
    fn stats_start_once() {
        let mut stats = StatsCounters::default();
        assert!(!stats.try_start(None, 800.0));
        assert!(!stats.try_start(Some(BoundingBox::new(900.0, 200.0)), 800.0));
        assert!(stats.try_start(Some(BoundingBox::new(500.0, 200.0)), 800.0));
        assert!(!stats.try_start(Some(BoundingBox::new(300.0, 200.0)), 800.0));
        assert!(stats.has_started());
    }

    proptest! {
        #[test]
        fn every_easing_ends_exactly_on_target(
            target in 0u32..1_000_000,
            duration in 1.0f64..10_000.0,
            quartic in any::<bool>(),
        ) {
            let easing = if quartic { Easing::QuarticOut } else { Easing::LinearStep };
            let mut task = CounterTask::new(target, duration, easing, 0.0);
            let mut now = 0.0;
            let mut frame = task.frame(now);
            while !frame.done {
                prop_assert!(frame.value <= target);
                now += 16.0;
                frame = task.frame(now);
                prop_assert!(now <= duration + 32.0);
            }
            prop_assert_eq!(frame.value, target);
        }
    }
}
