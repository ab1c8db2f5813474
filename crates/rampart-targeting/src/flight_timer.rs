//! Remaining flight time of the most recently fired projectile.

/// Counts down in whole fixed steps and never goes negative.
/// Only a new shot re-arms it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightTimer {
    remaining: f64,
}

impl FlightTimer {
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// True while a projectile is still in the air.
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Start timing a new projectile.
    pub fn arm(&mut self, flight_time: f64) {
        self.remaining = if flight_time.is_finite() {
            flight_time.max(0.0)
        } else {
            0.0
        };
    }

    /// Consume `elapsed` seconds worth of whole fixed steps.
    pub fn step(&mut self, elapsed: f64) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - elapsed).max(0.0);
        }
    }
}
