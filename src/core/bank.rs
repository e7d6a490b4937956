use serde::{Deserialize, Serialize};

pub const BANK_UNLOCK_COST: f64 = 10_000.0;
/// Compound interest earned by savings, per second.
pub const SAVINGS_RATE_PER_SECOND: f64 = 0.001;
/// Compound interest charged on loans, per second.
pub const LOAN_RATE_PER_SECOND: f64 = 0.002;
/// Outstanding loans may not exceed this share of lifetime generation.
pub const LOAN_LIMIT_FRACTION: f64 = 0.5;

/// Savings and loan balances held outside the spendable ledger.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BankAccount {
    pub unlocked: bool,
    pub savings: f64,
    pub loan: f64,
}

impl BankAccount {
    pub fn accrue(&mut self, delta_ms: f64) {
        if !self.unlocked || !(delta_ms.is_finite() && delta_ms > 0.0) {
            return;
        }
        let seconds = delta_ms / 1000.0;
        if self.savings > 0.0 {
            self.savings *= (1.0 + SAVINGS_RATE_PER_SECOND).powf(seconds);
        }
        if self.loan > 0.0 {
            self.loan *= (1.0 + LOAN_RATE_PER_SECOND).powf(seconds);
        }
    }

    pub fn loan_limit(total_generated: f64) -> f64 {
        (total_generated * LOAN_LIMIT_FRACTION).max(0.0)
    }

    pub fn clear_balances(&mut self) {
        self.savings = 0.0;
        self.loan = 0.0;
    }
}
