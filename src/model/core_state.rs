use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoreStatus {
    #[default]
    Charging,
    Ready,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreStats {
    pub activations: u64,
}

/// Capacitor state. `charge` is a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreState {
    pub charge: f64,
    pub status: CoreStatus,
    pub active_time_remaining_ms: f64,
    pub stats: CoreStats,
}

impl CoreState {
    pub fn is_active(&self) -> bool {
        self.status == CoreStatus::Active
    }
}
