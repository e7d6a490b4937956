use serde::{Deserialize, Serialize};

/// World-level tunables that vary between configurations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EconomyConfig {
    /// Optional ceiling on spendable energy. Reaching it also enables ascension.
    pub max_energy: Option<f64>,
    pub ascension_min_upgrades: u32,
    pub ascension_upgrades_per_point: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            max_energy: None,
            ascension_min_upgrades: 100,
            ascension_upgrades_per_point: 25,
        }
    }
}
