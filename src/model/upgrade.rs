use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpgradeKind {
    /// Flat passive energy per second.
    Production,
    /// Flat energy per manual click.
    Click,
    /// Percentage bonus applied to all passive production.
    Booster,
}

/// Static catalog entry. Supplied by the data loader and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_cost: f64,
    pub base_production: f64,
    #[serde(rename = "type")]
    pub kind: UpgradeKind,
    #[serde(default)]
    pub color: String,
    /// Lifetime-generated energy needed before the upgrade shows up.
    #[serde(default)]
    pub unlock_cost: f64,
    #[serde(default)]
    pub required_upgrade_id: Option<String>,
    #[serde(default)]
    pub required_ascension: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeInstance {
    pub id: String,
    pub owned: u32,
    pub tier: u32,
    /// Discounted price for exactly one upcoming level, set by a tier purchase.
    pub next_level_cost_override: Option<f64>,
}

impl UpgradeInstance {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owned: 0,
            tier: 0,
            next_level_cost_override: None,
        }
    }

    pub fn reset(&mut self) {
        self.owned = 0;
        self.tier = 0;
        self.next_level_cost_override = None;
    }
}
