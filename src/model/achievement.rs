use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AchievementCondition {
    TotalGenerated(f64),
    TotalClicks(u64),
    UpgradesOwned(u32),
    AscensionLevel(u32),
    CoreActivations(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AchievementReward {
    #[default]
    None,
    ProductionMultiplier(f64),
    CostMultiplier(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub condition: AchievementCondition,
    #[serde(default)]
    pub reward: AchievementReward,
}
