/// Upper bound on ticks returned from a single `advance` call. A stalled
/// host frame skips simulation time instead of spiraling into catch-up.
const MAX_TICKS_PER_ADVANCE: u32 = 8;

/// Converts variable frame deltas into a whole number of fixed simulation
/// ticks, carrying the remainder between calls.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    carry: f32,
}

impl FixedTimestep {
    /// A timestep firing `hz` times per second.
    pub fn new(hz: f32) -> Self {
        Self {
            step: 1.0 / hz,
            carry: 0.0,
        }
    }

    /// Seconds per tick.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Consume `dt` seconds and return how many whole ticks elapsed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.carry += dt.max(0.0);
        let mut ticks = 0;
        while self.carry >= self.step && ticks < MAX_TICKS_PER_ADVANCE {
            self.carry -= self.step;
            ticks += 1;
        }
        if self.carry >= self.step {
            // The host fell too far behind; drop the backlog.
            self.carry = 0.0;
        }
        ticks
    }
}
