#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickDeltas {
    pub gained: f64,
    pub spent: f64,
}

impl TickDeltas {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceLedger {
    pub energy: f64,
    /// Lifetime counter. Only a hard reset lowers it.
    pub total_generated: f64,
    pub generated_this_run: f64,
    pub max_energy: Option<f64>,
    pub tick_deltas: TickDeltas,
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ResourceLedger {
    pub fn new(max_energy: Option<f64>) -> Self {
        Self {
            energy: 0.0,
            total_generated: 0.0,
            generated_this_run: 0.0,
            max_energy,
            tick_deltas: TickDeltas::default(),
        }
    }

    pub fn begin_tick(&mut self) {
        self.tick_deltas.reset();
    }

    /// Earned energy: counts toward `total_generated`. Returns what was applied.
    pub fn add_energy(&mut self, amount: f64) -> f64 {
        let applied = self.credit(amount);
        if applied > 0.0 {
            self.total_generated += applied;
            self.generated_this_run += applied;
        }
        applied
    }

    /// Moves energy in without counting it as generated (withdrawals, loans).
    pub fn credit(&mut self, amount: f64) -> f64 {
        if !(amount.is_finite() && amount > 0.0) {
            return 0.0;
        }
        let previous = self.energy;
        self.energy = self.clamp(self.energy + amount);
        let applied = (self.energy - previous).max(0.0);
        self.tick_deltas.gained += applied;
        applied
    }

    pub fn can_afford(&self, amount: f64) -> bool {
        amount.is_finite() && amount >= 0.0 && amount <= self.energy
    }

    pub fn spend_energy(&mut self, amount: f64) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.energy -= amount;
        self.tick_deltas.spent += amount;
        true
    }

    /// Starts a fresh run seeded with `amount`. Lifetime totals survive.
    pub fn grant_starting_energy(&mut self, amount: f64) {
        let seed = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self.energy = self.clamp(seed);
        self.generated_this_run = 0.0;
        self.tick_deltas.reset();
    }

    fn clamp(&self, value: f64) -> f64 {
        match self.max_energy {
            Some(max) => value.min(max),
            None => value,
        }
    }
}
