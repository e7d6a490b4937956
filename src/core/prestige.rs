use std::collections::BTreeSet;

use crate::data::{EconomyConfig, GameData, PrestigeTree};
use crate::model::{NodeEffect, PrestigeNode, TreeKind};

use super::capacitor::CoreParams;
use super::rejection::Rejection;

/// Permanent progress that survives ascension.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrestigeLedger {
    pub ascension_level: u32,
    pub ascension_points: u64,
    pub quantum_shards: u64,
    pub purchased_ascension: BTreeSet<String>,
    pub purchased_core: BTreeSet<String>,
}

impl PrestigeLedger {
    pub fn new(data: &GameData) -> Self {
        Self {
            purchased_ascension: data.ascension_tree.root_ids(),
            purchased_core: data.core_tree.root_ids(),
            ..Self::default()
        }
    }

    pub fn purchased(&self, tree: TreeKind) -> &BTreeSet<String> {
        match tree {
            TreeKind::Ascension => &self.purchased_ascension,
            TreeKind::Core => &self.purchased_core,
        }
    }

    pub fn currency(&self, tree: TreeKind) -> u64 {
        match tree {
            TreeKind::Ascension => self.ascension_points,
            TreeKind::Core => self.quantum_shards,
        }
    }

    /// Validates a purchase without changing anything.
    pub fn check_purchase<'a>(
        &self,
        definition: &'a PrestigeTree,
        tree: TreeKind,
        id: &str,
    ) -> Result<&'a PrestigeNode, Rejection> {
        let node = definition.get(id).ok_or_else(|| Rejection::UnknownNode {
            tree,
            id: id.to_string(),
        })?;
        let purchased = self.purchased(tree);
        if purchased.contains(id) {
            return Err(Rejection::AlreadyPurchased(id.to_string()));
        }
        if let Some(missing) = node.required.iter().find(|req| !purchased.contains(*req)) {
            return Err(Rejection::PrerequisiteNotMet {
                node: id.to_string(),
                missing: missing.clone(),
            });
        }
        let available = self.currency(tree);
        if available < node.cost {
            return Err(Rejection::InsufficientCurrency {
                required: node.cost,
                available,
            });
        }
        Ok(node)
    }

    pub fn purchase(
        &mut self,
        definition: &PrestigeTree,
        tree: TreeKind,
        id: &str,
    ) -> Result<u64, Rejection> {
        let cost = self.check_purchase(definition, tree, id)?.cost;
        match tree {
            TreeKind::Ascension => {
                self.ascension_points -= cost;
                self.purchased_ascension.insert(id.to_string());
            }
            TreeKind::Core => {
                self.quantum_shards -= cost;
                self.purchased_core.insert(id.to_string());
            }
        }
        Ok(cost)
    }

    /// Credits an ascension: one level plus `gain` of both currencies.
    pub fn award(&mut self, gain: u64) {
        self.ascension_level = self.ascension_level.saturating_add(1);
        self.ascension_points = self.ascension_points.saturating_add(gain);
        self.quantum_shards = self.quantum_shards.saturating_add(gain);
    }

    pub fn bonuses(&self, data: &GameData) -> PrestigeBonuses {
        let mut bonuses = PrestigeBonuses::default();
        let owned = self
            .purchased_ascension
            .iter()
            .filter_map(|id| data.ascension_tree.get(id))
            .chain(
                self.purchased_core
                    .iter()
                    .filter_map(|id| data.core_tree.get(id)),
            );
        for node in owned {
            bonuses.apply(node.effect);
        }
        bonuses
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrestigeBonuses {
    pub production_multiplier: f64,
    pub click_multiplier: f64,
    pub cost_multiplier: f64,
    pub starting_energy: f64,
    pub charge_rate_multiplier: f64,
    pub boost_multiplier_bonus: f64,
    pub boost_duration_bonus_ms: f64,
}

impl Default for PrestigeBonuses {
    fn default() -> Self {
        Self {
            production_multiplier: 1.0,
            click_multiplier: 1.0,
            cost_multiplier: 1.0,
            starting_energy: 0.0,
            charge_rate_multiplier: 1.0,
            boost_multiplier_bonus: 0.0,
            boost_duration_bonus_ms: 0.0,
        }
    }
}

impl PrestigeBonuses {
    fn apply(&mut self, effect: NodeEffect) {
        match effect {
            NodeEffect::None => {}
            NodeEffect::ProductionMultiplier(value) => self.production_multiplier *= value,
            NodeEffect::ClickMultiplier(value) => self.click_multiplier *= value,
            NodeEffect::CostMultiplier(value) => self.cost_multiplier *= value,
            NodeEffect::StartingEnergy(value) => self.starting_energy += value,
            NodeEffect::ChargeRateMultiplier(value) => self.charge_rate_multiplier *= value,
            NodeEffect::BoostMultiplierBonus(value) => self.boost_multiplier_bonus += value,
            NodeEffect::BoostDurationMs(value) => self.boost_duration_bonus_ms += value,
        }
    }

    pub fn core_params(&self) -> CoreParams {
        let base = CoreParams::default();
        CoreParams {
            charge_rate_per_second: base.charge_rate_per_second * self.charge_rate_multiplier,
            boost_factor: base.boost_factor + self.boost_multiplier_bonus,
            discharge_duration_ms: base.discharge_duration_ms + self.boost_duration_bonus_ms,
        }
    }
}

pub fn can_ascend(total_owned: u64, energy: f64, config: &EconomyConfig) -> bool {
    let energy_capped = config.max_energy.is_some_and(|max| energy >= max);
    energy_capped || total_owned >= u64::from(config.ascension_min_upgrades)
}

pub fn ascension_gain(total_owned: u64, config: &EconomyConfig) -> u64 {
    let per_point = u64::from(config.ascension_upgrades_per_point.max(1));
    1 + total_owned / per_point
}
