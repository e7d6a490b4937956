use serde::{Deserialize, Serialize};

/// Which skill tree a node belongs to. Each tree is paid in its own currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeKind {
    /// Paid in ascension points.
    Ascension,
    /// Paid in quantum shards.
    Core,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum NodeEffect {
    #[default]
    None,
    ProductionMultiplier(f64),
    ClickMultiplier(f64),
    CostMultiplier(f64),
    StartingEnergy(f64),
    ChargeRateMultiplier(f64),
    BoostMultiplierBonus(f64),
    BoostDurationMs(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestigeNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub cost: u64,
    #[serde(default)]
    pub effect: NodeEffect,
    /// Every id listed here must already be purchased.
    #[serde(default)]
    pub required: Vec<String>,
}
