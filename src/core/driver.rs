use tracing::warn;

use super::simulation::{Command, Simulation};

/// Fixed simulation step.
pub const TICK_PERIOD_MS: f64 = 100.0;
/// Longest catch-up a single `advance` will run; older backlog is dropped.
pub const MAX_CATCH_UP_TICKS: u32 = 600;

/// Turns wall-clock time into whole fixed-period ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDriver {
    pub period_ms: f64,
    accumulated_ms: f64,
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(TICK_PERIOD_MS)
    }
}

impl TickDriver {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms: if period_ms.is_finite() && period_ms > 0.0 {
                period_ms
            } else {
                TICK_PERIOD_MS
            },
            accumulated_ms: 0.0,
        }
    }

    pub fn pending_ms(&self) -> f64 {
        self.accumulated_ms
    }

    /// Number of ticks now due after `elapsed_ms` more wall-clock time.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulated_ms += elapsed_ms;
        }
        let due = (self.accumulated_ms / self.period_ms).floor();
        if due >= f64::from(MAX_CATCH_UP_TICKS) {
            self.accumulated_ms = 0.0;
            return MAX_CATCH_UP_TICKS;
        }
        let due = due as u32;
        self.accumulated_ms -= f64::from(due) * self.period_ms;
        due
    }

    /// Advances the clock and runs every due tick against `simulation`,
    /// returning how many were applied.
    pub fn drive(&mut self, simulation: &mut Simulation, elapsed_ms: f64) -> u32 {
        let due = self.advance(elapsed_ms);
        for applied in 0..due {
            if let Err(rejection) = simulation.apply(Command::Tick {
                delta_ms: self.period_ms,
            }) {
                warn!("tick rejected after {applied} of {due}: {rejection}");
                return applied;
            }
        }
        due
    }
}
