use crate::model::{UpgradeDefinition, UpgradeInstance, UpgradeKind};

use super::economy::total_output;

/// Energy per manual click before any upgrades.
pub const BASE_CLICK: f64 = 1.0;

/// Multiplicative factors composed on top of raw upgrade output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub prestige_production: f64,
    pub prestige_click: f64,
    pub achievement_production: f64,
    pub core: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            prestige_production: 1.0,
            prestige_click: 1.0,
            achievement_production: 1.0,
            core: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionSummary {
    /// Flat energy per second before multipliers.
    pub base_production: f64,
    pub click_power: f64,
    pub booster_bonus_percent: f64,
    pub global_multiplier: f64,
    /// Energy per second actually applied by a tick.
    pub effective_production: f64,
}

pub fn summarize<'a, I>(upgrades: I, multipliers: &Multipliers) -> ProductionSummary
where
    I: IntoIterator<Item = (&'a UpgradeDefinition, &'a UpgradeInstance)>,
{
    let mut base_production = 0.0;
    let mut click_output = 0.0;
    let mut booster_bonus_percent = 0.0;

    for (definition, instance) in upgrades {
        let output = total_output(definition, instance);
        match definition.kind {
            UpgradeKind::Production => base_production += output,
            UpgradeKind::Click => click_output += output,
            UpgradeKind::Booster => booster_bonus_percent += output,
        }
    }

    let global_multiplier = (1.0 + booster_bonus_percent / 100.0)
        * multipliers.prestige_production
        * multipliers.achievement_production
        * multipliers.core;

    ProductionSummary {
        base_production,
        click_power: (BASE_CLICK + click_output) * multipliers.prestige_click,
        booster_bonus_percent,
        global_multiplier,
        effective_production: base_production * global_multiplier,
    }
}
