mod achievement;
mod core_state;
mod prestige;
mod settings;
mod upgrade;

pub use achievement::{AchievementCondition, AchievementDefinition, AchievementReward};
pub use core_state::{CoreState, CoreStats, CoreStatus};
pub use prestige::{NodeEffect, PrestigeNode, TreeKind};
pub use settings::Settings;
pub use upgrade::{UpgradeDefinition, UpgradeInstance, UpgradeKind};
