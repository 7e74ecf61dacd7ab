//! Frame-driven host for a wheel
//!
//! The browser calls back once per animation frame with a timestamp. The
//! `FrameClock` turns that into whole fixed ticks so spin length does not
//! depend on display refresh rate, and `WheelHost` runs them until detached.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::wheel::{SpinOutcome, TickInput, Wheel, tick};

/// Fixed-timestep accumulator fed by animation-frame timestamps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f64,
    last_time_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks due at `now_ms`.
    ///
    /// The first frame runs exactly one tick. Backlog beyond `MAX_SUBSTEPS`
    /// (a hidden tab, a debugger pause) is dropped.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, 0.1),
            None => SIM_DT,
        };
        self.last_time_ms = Some(now_ms);
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Forget timing history (after a pause or re-attach)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}

/// Owns a wheel and drives it from an animation loop
#[derive(Debug)]
pub struct WheelHost {
    pub wheel: Wheel,
    input: TickInput,
    clock: FrameClock,
    attached: bool,
}

impl WheelHost {
    pub fn new(wheel: Wheel) -> Self {
        Self {
            wheel,
            input: TickInput::default(),
            clock: FrameClock::new(),
            attached: true,
        }
    }

    /// Queue a random spin for the next tick
    pub fn request_spin(&mut self) {
        self.input.spin = true;
    }

    /// Queue a spin at an explicit velocity for the next tick
    pub fn request_impulse(&mut self, velocity: f64) {
        self.input.impulse = Some(velocity);
    }

    /// Queue cancellation of the current spin
    pub fn request_cancel(&mut self) {
        self.input.cancel = true;
    }

    /// Run the ticks due at `now_ms`. Returns any spin that completed.
    pub fn frame(&mut self, now_ms: f64) -> Option<SpinOutcome> {
        if !self.attached {
            return None;
        }

        let mut outcome = None;
        for _ in 0..self.clock.advance(now_ms) {
            if let Some(done) = tick(&mut self.wheel, &self.input) {
                outcome = Some(done);
            }
            // One-shot inputs apply to a single tick
            self.input = TickInput::default();
        }
        outcome
    }

    /// Stop driving the wheel. An in-flight spin is abandoned and never
    /// announces a winner.
    pub fn detach(&mut self) {
        if self.attached {
            log::info!("Wheel host detached");
        }
        self.attached = false;
        self.input = TickInput::default();
        self.wheel.cancel();
    }

    /// Resume driving after a detach
    pub fn reattach(&mut self) {
        self.attached = true;
        self.clock.reset();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Spin once without an animation loop, one tick per step.
///
/// Gives up after `max_ticks`, abandoning the spin.
pub fn run_headless(wheel: &mut Wheel, max_ticks: u64) -> Option<SpinOutcome> {
    if !wheel.is_spinning() && !wheel.start() {
        return None;
    }
    for _ in 0..max_ticks {
        if let Some(outcome) = wheel.tick() {
            return Some(outcome);
        }
    }
    log::warn!("Headless spin did not settle within {max_ticks} ticks");
    wheel.cancel();
    None
}
