use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{AchievementCatalog, EconomyConfig, GameData, PrestigeTree, UpgradeCatalog};

const UPGRADES_FILE: &str = "upgrades.json";
const ASCENSION_TREE_FILE: &str = "ascension_tree.json";
const CORE_TREE_FILE: &str = "core_tree.json";
const ACHIEVEMENTS_FILE: &str = "achievements.json";
const ECONOMY_FILE: &str = "economy.json";

pub fn bundled_assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

pub fn load_bundled_game_data() -> Result<GameData> {
    load_game_data_from_dir(bundled_assets_dir())
}

/// Reads every table from `dir`. `economy.json` is optional; the rest are not.
pub fn load_game_data_from_dir(dir: impl AsRef<Path>) -> Result<GameData> {
    let dir = dir.as_ref();
    let upgrades: UpgradeCatalog = read_json(&dir.join(UPGRADES_FILE), "upgrade catalog")?;
    let ascension_tree: PrestigeTree =
        read_json(&dir.join(ASCENSION_TREE_FILE), "ascension tree")?;
    let core_tree: PrestigeTree = read_json(&dir.join(CORE_TREE_FILE), "core tree")?;
    let achievements: AchievementCatalog =
        read_json(&dir.join(ACHIEVEMENTS_FILE), "achievements")?;

    let economy_path = dir.join(ECONOMY_FILE);
    let economy: EconomyConfig = if economy_path.exists() {
        read_json(&economy_path, "economy config")?
    } else {
        EconomyConfig::default()
    };

    let data = GameData {
        upgrades,
        ascension_tree,
        core_tree,
        achievements,
        economy,
    };
    data.validate()
        .with_context(|| format!("invalid game data in {}", dir.display()))?;
    debug!(
        upgrades = data.upgrades.len(),
        ascension_nodes = data.ascension_tree.nodes.len(),
        core_nodes = data.core_tree.nodes.len(),
        dir = %dir.display(),
        "game data loaded"
    );
    Ok(data)
}

pub fn load_game_data_from_str(json: &str) -> Result<GameData> {
    let data: GameData = serde_json::from_str(json).context("failed parsing game data JSON")?;
    data.validate().context("invalid game data")?;
    Ok(data)
}

fn read_json<T>(path: &Path, label: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {label} file: {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing {label} file as JSON: {}", path.display()))
}
