use serde::{Deserialize, Serialize};

use crate::model::{AchievementCondition, AchievementDefinition, AchievementReward};

use super::DataError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementCatalog {
    #[serde(default)]
    pub achievements: Vec<AchievementDefinition>,
}

impl AchievementCatalog {
    pub fn new(achievements: Vec<AchievementDefinition>) -> Self {
        Self { achievements }
    }

    pub fn validate(&self) -> Result<(), DataError> {
        for (index, entry) in self.achievements.iter().enumerate() {
            if self.achievements[..index]
                .iter()
                .any(|other| other.id == entry.id)
            {
                return Err(DataError::DuplicateAchievementId(entry.id.clone()));
            }
            if !reward_is_valid(entry.reward) || !condition_is_valid(entry.condition) {
                return Err(DataError::InvalidAchievementValue(entry.id.clone()));
            }
        }
        Ok(())
    }
}

fn reward_is_valid(reward: AchievementReward) -> bool {
    match reward {
        AchievementReward::None => true,
        AchievementReward::ProductionMultiplier(value) => value.is_finite() && value > 0.0,
        AchievementReward::CostMultiplier(value) => value.is_finite() && value > 0.0 && value <= 1.0,
    }
}

fn condition_is_valid(condition: AchievementCondition) -> bool {
    match condition {
        AchievementCondition::TotalGenerated(value) => value.is_finite() && value >= 0.0,
        _ => true,
    }
}
