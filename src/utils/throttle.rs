/// Source of "now" in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by `Date.now()`.
#[derive(Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        web_sys::js_sys::Date::now()
    }
}

/// Leading-edge throttle: the wrapped callback runs on the first call and then
/// ignores every call until `window_ms` has elapsed. Dropped calls are not
/// replayed later.
pub struct Throttle<C, F> {
    clock: C,
    window_ms: f64,
    last_run: Option<f64>,
    callback: F,
}

impl<C: Clock, F: FnMut()> Throttle<C, F> {
    pub fn new(clock: C, window_ms: u32, callback: F) -> Self {
        Self {
            clock,
            window_ms: f64::from(window_ms),
            last_run: None,
            callback,
        }
    }

    /// Runs the callback unless the previous run is still inside the window.
    /// Returns whether it ran.
    pub fn call(&mut self) -> bool {
        let now = self.clock.now_ms();
        if let Some(last) = self.last_run {
            if now - last < self.window_ms {
                return false;
            }
        }
        self.last_run = Some(now);
        (self.callback)();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct ManualClock(pub Rc<Cell<f64>>);

    impl ManualClock {
        pub fn advance(&self, ms: f64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    fn counting(clock: &ManualClock, window: u32) -> (Rc<Cell<u32>>, Throttle<ManualClock, impl FnMut()>) {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let throttle = Throttle::new(clock.clone(), window, move || counter.set(counter.get() + 1));
        (runs, throttle)
    }

    #[test]
    fn second_call_inside_window_is_dropped() {
        let clock = ManualClock::default();
        let (runs, mut throttle) = counting(&clock, 16);

        assert!(throttle.call());
        clock.advance(5.0);
        assert!(!throttle.call());
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn runs_again_once_window_has_passed() {
        let clock = ManualClock::default();
        let (runs, mut throttle) = counting(&clock, 16);

        throttle.call();
        clock.advance(16.0);
        assert!(throttle.call());
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn dropped_calls_do_not_extend_the_window() {
        let clock = ManualClock::default();
        let (runs, mut throttle) = counting(&clock, 16);

        throttle.call();
        for _ in 0..3 {
            clock.advance(5.0);
            throttle.call();
        }
        // 15ms since the first run, still inside.
        assert_eq!(runs.get(), 1);
        clock.advance(1.0);
        throttle.call();
        assert_eq!(runs.get(), 2);
    }
}
