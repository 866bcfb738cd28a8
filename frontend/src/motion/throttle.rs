/// What a throttled caller should do with the event it just received.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Admission {
    /// Run the handler now.
    Run,
    /// Too soon. Run once after `wait_ms`, then call [`Throttle::flush`].
    Defer { wait_ms: f64 },
    /// Too soon, and a deferred run is already queued.
    Skip,
}

/// Samples a noisy event source (scroll) at a bounded rate.
///
/// The leading event runs immediately; events inside the window collapse into
/// one trailing run so the last scroll position is always evaluated.
#[derive(Debug)]
pub struct Throttle {
    window_ms: f64,
    last_run: Option<f64>,
    trailing: bool,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            last_run: None,
            trailing: false,
        }
    }

    pub fn admit(&mut self, now: f64) -> Admission {
        let elapsed = self.last_run.map(|last| now - last);
        match elapsed {
            Some(elapsed) if elapsed < self.window_ms => {
                if self.trailing {
                    Admission::Skip
                } else {
                    self.trailing = true;
                    Admission::Defer {
                        wait_ms: self.window_ms - elapsed,
                    }
                }
            }
            _ => {
                self.last_run = Some(now);
                Admission::Run
            }
        }
    }

    /// Records the deferred run.
    pub fn flush(&mut self, now: f64) {
        self.trailing = false;
        self.last_run = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_window_always_runs() {
        let mut throttle = Throttle::new(0.0);
        assert_eq!(throttle.admit(0.0), Admission::Run);
        assert_eq!(throttle.admit(0.0), Admission::Run);
        assert_eq!(throttle.admit(1.0), Admission::Run);
    }

    #[test]
    fn burst_collapses_to_one_trailing_run() {
        let mut throttle = Throttle::new(16.0);
        assert_eq!(throttle.admit(100.0), Admission::Run);
        assert_eq!(throttle.admit(104.0), Admission::Defer { wait_ms: 12.0 });
        assert_eq!(throttle.admit(108.0), Admission::Skip);
        assert_eq!(throttle.admit(115.0), Admission::Skip);

        throttle.flush(116.0);
        assert_eq!(throttle.admit(120.0), Admission::Defer { wait_ms: 12.0 });
        throttle.flush(132.0);
        assert_eq!(throttle.admit(150.0), Admission::Run);
    }

    #[test]
    fn at_most_one_run_per_window() {
        let mut throttle = Throttle::new(50.0);
        let runs = (0..100)
            .map(|t| throttle.admit(t as f64))
            .filter(|a| *a == Admission::Run)
            .count();
        assert_eq!(runs, 2);
    }
}
