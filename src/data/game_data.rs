use serde::{Deserialize, Serialize};

use super::{AchievementCatalog, DataError, EconomyConfig, PrestigeTree, UpgradeCatalog};

/// Everything the engine reads but never writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    pub upgrades: UpgradeCatalog,
    pub ascension_tree: PrestigeTree,
    pub core_tree: PrestigeTree,
    pub achievements: AchievementCatalog,
    pub economy: EconomyConfig,
}

impl GameData {
    pub fn validate(&self) -> Result<(), DataError> {
        self.upgrades.validate()?;
        self.ascension_tree.validate()?;
        self.core_tree.validate()?;
        self.achievements.validate()?;
        if let Some(max_energy) = self.economy.max_energy
            && !(max_energy.is_finite() && max_energy > 0.0)
        {
            return Err(DataError::InvalidEconomy("maxEnergy"));
        }
        if self.economy.ascension_upgrades_per_point == 0 {
            return Err(DataError::InvalidEconomy("ascensionUpgradesPerPoint"));
        }
        Ok(())
    }
}
