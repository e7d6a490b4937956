use crate::model::{CoreState, CoreStatus};

/// Global production multiplier while the core is discharging.
pub const CORE_BOOST_FACTOR: f64 = 5.0;
/// Charge gained per second, in percent.
pub const CORE_CHARGE_RATE: f64 = 2.5;
pub const DISCHARGE_DURATION_MS: f64 = 10_000.0;
pub const FULL_CHARGE: f64 = 100.0;

/// Effective capacitor tuning after core-tree bonuses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreParams {
    pub charge_rate_per_second: f64,
    pub boost_factor: f64,
    pub discharge_duration_ms: f64,
}

impl Default for CoreParams {
    fn default() -> Self {
        Self {
            charge_rate_per_second: CORE_CHARGE_RATE,
            boost_factor: CORE_BOOST_FACTOR,
            discharge_duration_ms: DISCHARGE_DURATION_MS,
        }
    }
}

impl CoreParams {
    pub fn multiplier(&self, state: &CoreState) -> f64 {
        if state.is_active() {
            self.boost_factor
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreAction {
    Tick { delta_ms: f64 },
    Activate,
}

/// Pure transition function of the capacitor.
///
/// `Activate` outside `Ready` returns the input unchanged. Every other path
/// returns a state with `charge` in `[0, 100]` and a non-negative timer.
pub fn core_reducer(state: CoreState, action: CoreAction, params: &CoreParams) -> CoreState {
    match action {
        CoreAction::Activate => activate(state, params),
        CoreAction::Tick { delta_ms } => tick(state, delta_ms, params),
    }
}

fn activate(state: CoreState, params: &CoreParams) -> CoreState {
    if state.status != CoreStatus::Ready {
        return state;
    }
    let mut next = state;
    next.status = CoreStatus::Active;
    next.charge = 0.0;
    next.active_time_remaining_ms = non_negative(params.discharge_duration_ms);
    next.stats.activations = next.stats.activations.saturating_add(1);
    next
}

fn tick(state: CoreState, delta_ms: f64, params: &CoreParams) -> CoreState {
    let delta_ms = non_negative(delta_ms);
    let mut next = state;
    next.charge = non_negative(next.charge).min(FULL_CHARGE);
    next.active_time_remaining_ms = non_negative(next.active_time_remaining_ms);

    match next.status {
        CoreStatus::Charging => {
            let rate = non_negative(params.charge_rate_per_second);
            next.charge = (next.charge + rate * delta_ms / 1000.0).min(FULL_CHARGE);
            if next.charge >= FULL_CHARGE {
                next.charge = FULL_CHARGE;
                next.status = CoreStatus::Ready;
            }
            next.active_time_remaining_ms = 0.0;
        }
        CoreStatus::Ready => {}
        CoreStatus::Active => {
            next.active_time_remaining_ms -= delta_ms;
            if next.active_time_remaining_ms <= 0.0 {
                next.active_time_remaining_ms = 0.0;
                next.charge = 0.0;
                next.status = CoreStatus::Charging;
            }
        }
    }

    next
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else if value > 0.0 {
        f64::MAX
    } else {
        0.0
    }
}
