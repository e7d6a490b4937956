use serde::{Deserialize, Serialize};

use crate::model::UpgradeDefinition;

use super::DataError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeCatalog {
    #[serde(default)]
    pub upgrades: Vec<UpgradeDefinition>,
}

impl UpgradeCatalog {
    pub fn new(upgrades: Vec<UpgradeDefinition>) -> Self {
        Self { upgrades }
    }

    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.upgrades.iter().position(|entry| entry.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&UpgradeDefinition> {
        self.upgrades.iter().find(|entry| entry.id == id)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        for (index, entry) in self.upgrades.iter().enumerate() {
            if self.upgrades[..index].iter().any(|other| other.id == entry.id) {
                return Err(DataError::DuplicateUpgradeId(entry.id.clone()));
            }
            if !(entry.base_cost.is_finite() && entry.base_cost > 0.0) {
                return Err(DataError::InvalidUpgradeValue {
                    upgrade: entry.id.clone(),
                    field: "baseCost",
                });
            }
            if !(entry.base_production.is_finite() && entry.base_production >= 0.0) {
                return Err(DataError::InvalidUpgradeValue {
                    upgrade: entry.id.clone(),
                    field: "baseProduction",
                });
            }
            if !(entry.unlock_cost.is_finite() && entry.unlock_cost >= 0.0) {
                return Err(DataError::InvalidUpgradeValue {
                    upgrade: entry.id.clone(),
                    field: "unlockCost",
                });
            }
            if let Some(required) = &entry.required_upgrade_id
                && (required == &entry.id || self.get(required).is_none())
            {
                return Err(DataError::UnknownRequiredUpgrade {
                    upgrade: entry.id.clone(),
                    required: required.clone(),
                });
            }
        }
        Ok(())
    }
}
