use serde::{Deserialize, Serialize};

use crate::core::BankAccount;
use crate::model::{CoreState, Settings, UpgradeInstance};

pub const SAVE_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SaveLedger {
    pub energy: f64,
    pub total_generated: f64,
    pub generated_this_run: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SavePrestige {
    pub ascension_level: u32,
    pub ascension_points: u64,
    pub quantum_shards: u64,
    pub purchased_ascension: Vec<String>,
    pub purchased_core: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub version: u32,
    pub ledger: SaveLedger,
    pub upgrades: Vec<UpgradeInstance>,
    pub core: CoreState,
    pub prestige: SavePrestige,
    pub achievements: Vec<String>,
    pub bank: BankAccount,
    pub total_clicks: u64,
    pub total_ticks: u64,
    pub settings: Settings,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            ledger: SaveLedger::default(),
            upgrades: Vec::new(),
            core: CoreState::default(),
            prestige: SavePrestige::default(),
            achievements: Vec::new(),
            bank: BankAccount::default(),
            total_clicks: 0,
            total_ticks: 0,
            settings: Settings::default(),
        }
    }
}
