//! Fixed-rate render loop pacing.
//!
//! A frame is drawn, then the next one is scheduled after whatever is left
//! of the frame interval. A new frame never starts while one is drawing or
//! already scheduled, so a slow frame delays the next instead of stacking
//! them up.

#[cfg(test)]
#[path = "render_loop_test.rs"]
mod render_loop_test;

/// Where the loop is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Drawing,
    Scheduled,
}

/// Tracks the idle → drawing → scheduled → idle cycle.
#[derive(Debug)]
pub struct FramePacer {
    interval_ms: f64,
    phase: Phase,
    started_ms: f64,
}

impl FramePacer {
    /// Pace frames `interval_ms` apart, start to start.
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms: interval_ms.max(0.0), phase: Phase::Idle, started_ms: 0.0 }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The scheduled timer fired.
    pub fn wake(&mut self) {
        if self.phase == Phase::Scheduled {
            self.phase = Phase::Idle;
        }
    }

    /// Start drawing. Returns `false` when a frame is already in flight.
    pub fn begin_frame(&mut self, now_ms: f64) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Drawing;
        self.started_ms = now_ms;
        true
    }

    /// Finish drawing and return the delay before the next frame, in whole
    /// milliseconds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn end_frame(&mut self, now_ms: f64) -> u32 {
        self.phase = Phase::Scheduled;
        let elapsed = (now_ms - self.started_ms).max(0.0);
        let delay = (self.interval_ms - elapsed).max(0.0).round();
        delay as u32
    }
}

#[cfg(feature = "browser")]
pub use driver::start;

#[cfg(feature = "browser")]
mod driver {
    use std::cell::RefCell;
    use std::rc::Rc;

    use canvas::engine::Engine;
    use gloo_timers::callback::Timeout;
    use web_sys::HtmlElement;

    use super::FramePacer;
    use crate::state::session::Session;

    struct Loop {
        session: Rc<RefCell<Session>>,
        engine: Rc<RefCell<Engine>>,
        host: HtmlElement,
        pacer: RefCell<FramePacer>,
    }

    /// Start drawing `session` into `engine`'s canvas, sized to `host`.
    pub fn start(session: Rc<RefCell<Session>>, engine: Rc<RefCell<Engine>>, host: HtmlElement) {
        let interval = session.borrow().config.frame_interval_ms();
        let state = Rc::new(Loop { session, engine, host, pacer: RefCell::new(FramePacer::new(interval)) });
        schedule(state, 0);
    }

    fn schedule(state: Rc<Loop>, delay_ms: u32) {
        Timeout::new(delay_ms, move || tick(state)).forget();
    }

    fn tick(state: Rc<Loop>) {
        let now = js_sys::Date::now();
        {
            let mut pacer = state.pacer.borrow_mut();
            pacer.wake();
            if !pacer.begin_frame(now) {
                return;
            }
        }

        let rect = state.host.get_bounding_client_rect();
        {
            let mut session = state.session.borrow_mut();
            session.rolls.expire(now);
            if let Err(err) = state.engine.borrow_mut().render(&mut session.engine, rect.width(), rect.height()) {
                log::error!("frame render failed: {err:?}");
            }
        }

        let delay = state.pacer.borrow_mut().end_frame(js_sys::Date::now());
        schedule(state, delay);
    }
}
