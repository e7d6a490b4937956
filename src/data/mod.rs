mod achievement_data;
mod economy;
mod game_data;
mod loader;
mod prestige_tree;
mod upgrade_data;

pub use achievement_data::AchievementCatalog;
pub use economy::EconomyConfig;
pub use game_data::GameData;
pub use loader::{
    bundled_assets_dir, load_bundled_game_data, load_game_data_from_dir, load_game_data_from_str,
};
pub use prestige_tree::PrestigeTree;
pub use upgrade_data::UpgradeCatalog;

/// Integrity problems in externally supplied tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("duplicate upgrade id: {0}")]
    DuplicateUpgradeId(String),

    #[error("upgrade {upgrade} has an invalid {field}")]
    InvalidUpgradeValue { upgrade: String, field: &'static str },

    #[error("upgrade {upgrade} requires unknown upgrade {required}")]
    UnknownRequiredUpgrade { upgrade: String, required: String },

    #[error("duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("node {0} has an out-of-range effect value")]
    InvalidNodeEffect(String),

    #[error("prerequisite {prereq} for node {node} does not exist")]
    UnknownPrerequisite { node: String, prereq: String },

    #[error("prerequisite cycle involving node {0}")]
    CyclicPrerequisites(String),

    #[error("tree has no free root node")]
    MissingRoot,

    #[error("duplicate achievement id: {0}")]
    DuplicateAchievementId(String),

    #[error("achievement {0} has an out-of-range condition or reward")]
    InvalidAchievementValue(String),

    #[error("economy config has an invalid {0}")]
    InvalidEconomy(&'static str),
}
