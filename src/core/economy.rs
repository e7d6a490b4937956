//! Upgrade pricing: exponential level costs, tier thresholds and bulk buying.
//!
//! Bulk purchases block at a tier threshold: if the pending tier upgrade is
//! unaffordable, nothing past that threshold is bought, even when the next
//! normal level would fit the budget.

use crate::model::{UpgradeDefinition, UpgradeInstance, UpgradeKind};

/// Per-level price growth.
pub const COST_GROWTH: f64 = 1.15;
/// Units per tier threshold.
pub const TIER_INTERVAL: u32 = 10;
/// A tier upgrade costs this many times the current level price.
pub const TIER_COST_FACTOR: f64 = 10.0;
/// Price factor for the single level bought right after a tier.
pub const TIER_DISCOUNT: f64 = 0.9;
/// Per-tier output multiplier for production and click upgrades.
pub const TIER_PRODUCTION_MULTIPLIER: f64 = 3.0;
/// Per-tier output multiplier for boosters.
pub const BOOSTER_TIER_MULTIPLIER: f64 = 2.0;
pub const MAX_UPGRADE_LEVEL: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyAmount {
    Count(u32),
    Max,
}

/// Result of planning a bulk purchase, including the state it leads to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulkPurchase {
    pub levels: u32,
    pub tiers: u32,
    pub total_cost: f64,
    pub owned_after: u32,
    pub tier_after: u32,
    pub override_after: Option<f64>,
}

impl BulkPurchase {
    pub fn is_empty(&self) -> bool {
        self.levels == 0 && self.tiers == 0
    }
}

pub fn level_cost(
    base_cost: f64,
    owned: u32,
    cost_multiplier: f64,
    cost_override: Option<f64>,
) -> f64 {
    match cost_override {
        Some(cost) => cost,
        None => (base_cost * COST_GROWTH.powi(owned as i32) * cost_multiplier).floor(),
    }
}

/// Price of the next normal level, honouring a pending discount.
pub fn next_level_cost(
    definition: &UpgradeDefinition,
    instance: &UpgradeInstance,
    cost_multiplier: f64,
) -> f64 {
    level_cost(
        definition.base_cost,
        instance.owned,
        cost_multiplier,
        instance.next_level_cost_override,
    )
}

pub fn tiers_unlocked(owned: u32) -> u32 {
    owned / TIER_INTERVAL
}

pub fn tier_pending(owned: u32, tier: u32) -> bool {
    tier < tiers_unlocked(owned)
}

pub fn tier_cost(definition: &UpgradeDefinition, owned: u32, cost_multiplier: f64) -> f64 {
    TIER_COST_FACTOR * level_cost(definition.base_cost, owned, cost_multiplier, None)
}

pub fn discounted_level_cost(tier_cost: f64) -> f64 {
    (tier_cost * TIER_DISCOUNT).floor()
}

pub fn tier_multiplier(kind: UpgradeKind) -> f64 {
    match kind {
        UpgradeKind::Production | UpgradeKind::Click => TIER_PRODUCTION_MULTIPLIER,
        UpgradeKind::Booster => BOOSTER_TIER_MULTIPLIER,
    }
}

/// Output of one owned unit after tier multipliers.
pub fn unit_output(definition: &UpgradeDefinition, tier: u32) -> f64 {
    definition.base_production * tier_multiplier(definition.kind).powi(tier as i32)
}

pub fn total_output(definition: &UpgradeDefinition, instance: &UpgradeInstance) -> f64 {
    unit_output(definition, instance.tier) * f64::from(instance.owned)
}

pub fn calculate_bulk_buy(
    definition: &UpgradeDefinition,
    instance: &UpgradeInstance,
    amount: BuyAmount,
    available_energy: f64,
    cost_multiplier: f64,
) -> BulkPurchase {
    plan_purchase(
        definition,
        instance,
        amount,
        available_energy.max(0.0),
        cost_multiplier,
    )
}

/// Full price of `amount` more levels, ignoring the current balance.
pub fn calculate_theoretical_bulk_buy(
    definition: &UpgradeDefinition,
    instance: &UpgradeInstance,
    amount: BuyAmount,
    cost_multiplier: f64,
) -> BulkPurchase {
    plan_purchase(definition, instance, amount, f64::INFINITY, cost_multiplier)
}

fn plan_purchase(
    definition: &UpgradeDefinition,
    instance: &UpgradeInstance,
    amount: BuyAmount,
    budget: f64,
    cost_multiplier: f64,
) -> BulkPurchase {
    let capacity = MAX_UPGRADE_LEVEL.saturating_sub(instance.owned);
    let target = match amount {
        BuyAmount::Count(count) => count.min(capacity),
        BuyAmount::Max => capacity,
    };

    let mut plan = BulkPurchase {
        levels: 0,
        tiers: 0,
        total_cost: 0.0,
        owned_after: instance.owned,
        tier_after: instance.tier,
        override_after: instance.next_level_cost_override,
    };

    'levels: while plan.levels < target {
        while tier_pending(plan.owned_after, plan.tier_after) {
            let cost = tier_cost(definition, plan.owned_after, cost_multiplier);
            let next_total = plan.total_cost + cost;
            if next_total > budget {
                break 'levels;
            }
            plan.total_cost = next_total;
            plan.tier_after += 1;
            plan.tiers += 1;
            plan.override_after = Some(discounted_level_cost(cost));
        }

        let cost = level_cost(
            definition.base_cost,
            plan.owned_after,
            cost_multiplier,
            plan.override_after,
        );
        let next_total = plan.total_cost + cost;
        if next_total > budget {
            break;
        }
        plan.total_cost = next_total;
        plan.owned_after += 1;
        plan.levels += 1;
        plan.override_after = None;
    }

    plan
}

/// Whether an upgrade is shown and purchasable. Owned upgrades always are.
pub fn is_unlocked(
    definition: &UpgradeDefinition,
    owned: u32,
    total_generated: f64,
    parent_owned: Option<u32>,
    ascension_level: u32,
) -> bool {
    if owned > 0 {
        return true;
    }
    let parent_ok = match (&definition.required_upgrade_id, parent_owned) {
        (None, _) => true,
        (Some(_), Some(count)) => count > 0,
        (Some(_), None) => false,
    };
    total_generated >= definition.unlock_cost
        && parent_ok
        && ascension_level >= definition.required_ascension
}
