use std::sync::Arc;

use tracing::{debug, info};

use crate::data::GameData;
use crate::model::{CoreState, TreeKind, UpgradeDefinition, UpgradeInstance};

use super::achievements::{AchievementLedger, Progress};
use super::bank::{BANK_UNLOCK_COST, BankAccount};
use super::capacitor::{CoreAction, CoreParams, core_reducer};
use super::economy::{
    self, BulkPurchase, BuyAmount, MAX_UPGRADE_LEVEL, calculate_bulk_buy,
    calculate_theoretical_bulk_buy, discounted_level_cost, is_unlocked, tier_pending,
};
use super::prestige::{PrestigeBonuses, PrestigeLedger, ascension_gain, can_ascend};
use super::production::{Multipliers, ProductionSummary, summarize};
use super::rejection::Rejection;
use super::resource_store::ResourceLedger;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tick { delta_ms: f64 },
    Click,
    BuyUpgrade { id: String, amount: BuyAmount },
    BuyUpgradeTier { id: String },
    ActivateCore,
    Ascend,
    BuyPrestigeNode { tree: TreeKind, id: String },
    Reset { hard: bool },
    UnlockBank,
    Deposit { amount: f64 },
    Withdraw { amount: f64 },
    TakeLoan { amount: f64 },
    RepayLoan { amount: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Ticked { produced: f64 },
    Clicked { gained: f64 },
    UpgradePurchased { id: String, levels: u32, tiers: u32, cost: f64 },
    TierPurchased { id: String, tier: u32, cost: f64 },
    CoreActivated,
    Ascended { level: u32, gain: u64 },
    NodePurchased { tree: TreeKind, id: String, cost: u64 },
    Reset { hard: bool },
    BankUnlocked,
    Deposited { amount: f64 },
    Withdrew { amount: f64 },
    LoanTaken { amount: f64 },
    LoanRepaid { amount: f64 },
}

/// The whole mutable game state plus a shared handle to the static tables.
///
/// `upgrades` is index-aligned with `data.upgrades`.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub data: Arc<GameData>,
    pub resources: ResourceLedger,
    pub upgrades: Vec<UpgradeInstance>,
    pub core: CoreState,
    pub prestige: PrestigeLedger,
    pub achievements: AchievementLedger,
    pub bank: BankAccount,
    pub total_clicks: u64,
    pub tick_index: u64,
}

impl Simulation {
    pub fn new(data: Arc<GameData>) -> Self {
        let upgrades = data
            .upgrades
            .upgrades
            .iter()
            .map(|definition| UpgradeInstance::new(definition.id.clone()))
            .collect();
        Self {
            resources: ResourceLedger::new(data.economy.max_energy),
            upgrades,
            core: CoreState::default(),
            prestige: PrestigeLedger::new(&data),
            achievements: AchievementLedger::default(),
            bank: BankAccount::default(),
            total_clicks: 0,
            tick_index: 0,
            data,
        }
    }

    /// Applies `command` in place. On `Err` the state is exactly as before.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, Rejection> {
        let outcome = match command {
            Command::Tick { delta_ms } => self.tick(delta_ms),
            Command::Click => Ok(self.click()),
            Command::BuyUpgrade { id, amount } => self.buy_upgrade(&id, amount),
            Command::BuyUpgradeTier { id } => self.buy_upgrade_tier(&id),
            Command::ActivateCore => self.activate_core(),
            Command::Ascend => self.ascend(),
            Command::BuyPrestigeNode { tree, id } => self.buy_prestige_node(tree, &id),
            Command::Reset { hard } => Ok(self.reset(hard)),
            Command::UnlockBank => self.unlock_bank(),
            Command::Deposit { amount } => self.deposit(amount),
            Command::Withdraw { amount } => self.withdraw(amount),
            Command::TakeLoan { amount } => self.take_loan(amount),
            Command::RepayLoan { amount } => self.repay_loan(amount),
        }?;

        self.evaluate_achievements();
        if !matches!(outcome, CommandOutcome::Ticked { .. }) {
            debug!(?outcome, "command applied");
        }
        Ok(outcome)
    }

    /// Pure form of [`Simulation::apply`]: the receiver is left untouched.
    pub fn reduce(&self, command: Command) -> (Simulation, Result<CommandOutcome, Rejection>) {
        let mut next = self.clone();
        let result = next.apply(command);
        (next, result)
    }

    pub fn upgrade(&self, id: &str) -> Option<(&UpgradeDefinition, &UpgradeInstance)> {
        let index = self.data.upgrades.index_of(id)?;
        Some((&self.data.upgrades.upgrades[index], self.upgrades.get(index)?))
    }

    pub fn upgrade_entries(&self) -> impl Iterator<Item = (&UpgradeDefinition, &UpgradeInstance)> {
        self.data.upgrades.upgrades.iter().zip(self.upgrades.iter())
    }

    pub fn total_owned(&self) -> u64 {
        self.upgrades
            .iter()
            .map(|instance| u64::from(instance.owned))
            .sum()
    }

    pub fn bonuses(&self) -> PrestigeBonuses {
        self.prestige.bonuses(&self.data)
    }

    pub fn core_params(&self) -> CoreParams {
        self.bonuses().core_params()
    }

    /// Product of every active cost reduction.
    pub fn cost_multiplier(&self) -> f64 {
        self.bonuses().cost_multiplier * self.achievements.cost_multiplier(&self.data.achievements)
    }

    pub fn multipliers(&self) -> Multipliers {
        let bonuses = self.bonuses();
        Multipliers {
            prestige_production: bonuses.production_multiplier,
            prestige_click: bonuses.click_multiplier,
            achievement_production: self
                .achievements
                .production_multiplier(&self.data.achievements),
            core: bonuses.core_params().multiplier(&self.core),
        }
    }

    pub fn production_summary(&self) -> ProductionSummary {
        summarize(self.upgrade_entries(), &self.multipliers())
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.upgrade(id)
            .is_some_and(|(definition, instance)| self.unlocked(definition, instance))
    }

    pub fn next_cost(&self, id: &str) -> Option<f64> {
        let (definition, instance) = self.upgrade(id)?;
        Some(economy::next_level_cost(
            definition,
            instance,
            self.cost_multiplier(),
        ))
    }

    /// Price of the pending tier upgrade, if one is available.
    pub fn tier_cost(&self, id: &str) -> Option<f64> {
        let (definition, instance) = self.upgrade(id)?;
        tier_pending(instance.owned, instance.tier)
            .then(|| economy::tier_cost(definition, instance.owned, self.cost_multiplier()))
    }

    pub fn affordable(&self, id: &str, amount: BuyAmount) -> Option<BulkPurchase> {
        let (definition, instance) = self.upgrade(id)?;
        Some(calculate_bulk_buy(
            definition,
            instance,
            amount,
            self.resources.energy,
            self.cost_multiplier(),
        ))
    }

    pub fn theoretical_cost(&self, id: &str, amount: BuyAmount) -> Option<BulkPurchase> {
        let (definition, instance) = self.upgrade(id)?;
        Some(calculate_theoretical_bulk_buy(
            definition,
            instance,
            amount,
            self.cost_multiplier(),
        ))
    }

    pub fn can_ascend(&self) -> bool {
        can_ascend(
            self.total_owned(),
            self.resources.energy,
            &self.data.economy,
        )
    }

    pub fn pending_ascension_gain(&self) -> u64 {
        ascension_gain(self.total_owned(), &self.data.economy)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            total_generated: self.resources.total_generated,
            total_clicks: self.total_clicks,
            upgrades_owned: self.total_owned(),
            ascension_level: self.prestige.ascension_level,
            core_activations: self.core.stats.activations,
        }
    }

    fn unlocked(&self, definition: &UpgradeDefinition, instance: &UpgradeInstance) -> bool {
        let parent_owned = definition
            .required_upgrade_id
            .as_deref()
            .map(|parent| self.upgrade(parent).map_or(0, |(_, entry)| entry.owned));
        is_unlocked(
            definition,
            instance.owned,
            self.resources.total_generated,
            parent_owned,
            self.prestige.ascension_level,
        )
    }

    fn locate(&self, id: &str) -> Result<usize, Rejection> {
        let index = self
            .data
            .upgrades
            .index_of(id)
            .filter(|index| *index < self.upgrades.len())
            .ok_or_else(|| Rejection::UnknownUpgrade(id.to_string()))?;
        let definition = &self.data.upgrades.upgrades[index];
        if !self.unlocked(definition, &self.upgrades[index]) {
            return Err(Rejection::UpgradeLocked(id.to_string()));
        }
        Ok(index)
    }

    fn tick(&mut self, delta_ms: f64) -> Result<CommandOutcome, Rejection> {
        if !(delta_ms.is_finite() && delta_ms >= 0.0) {
            return Err(Rejection::InvalidAmount);
        }
        self.resources.begin_tick();
        self.tick_index += 1;

        // Production reads the core before it advances, so a discharge
        // that ends this tick still boosts it.
        let produced = self.produce_energy(delta_ms);
        self.advance_core(delta_ms);
        self.bank.accrue(delta_ms);

        Ok(CommandOutcome::Ticked { produced })
    }

    fn produce_energy(&mut self, delta_ms: f64) -> f64 {
        let rate = self.production_summary().effective_production;
        self.resources.add_energy(rate * delta_ms / 1000.0)
    }

    fn advance_core(&mut self, delta_ms: f64) {
        let params = self.core_params();
        self.core = core_reducer(self.core, CoreAction::Tick { delta_ms }, &params);
    }

    fn click(&mut self) -> CommandOutcome {
        let power = self.production_summary().click_power;
        let gained = self.resources.add_energy(power);
        self.total_clicks = self.total_clicks.saturating_add(1);
        CommandOutcome::Clicked { gained }
    }

    fn buy_upgrade(&mut self, id: &str, amount: BuyAmount) -> Result<CommandOutcome, Rejection> {
        if amount == BuyAmount::Count(0) {
            return Err(Rejection::InvalidAmount);
        }
        let index = self.locate(id)?;
        let definition = &self.data.upgrades.upgrades[index];
        let instance = &self.upgrades[index];
        if instance.owned >= MAX_UPGRADE_LEVEL {
            return Err(Rejection::MaxLevelReached(id.to_string()));
        }

        let cost_multiplier = self.cost_multiplier();
        let plan = calculate_bulk_buy(
            definition,
            instance,
            amount,
            self.resources.energy,
            cost_multiplier,
        );
        if plan.is_empty() {
            let required = if tier_pending(instance.owned, instance.tier) {
                economy::tier_cost(definition, instance.owned, cost_multiplier)
            } else {
                economy::next_level_cost(definition, instance, cost_multiplier)
            };
            return Err(Rejection::InsufficientEnergy {
                required,
                available: self.resources.energy,
            });
        }
        if !self.resources.spend_energy(plan.total_cost) {
            return Err(Rejection::InsufficientEnergy {
                required: plan.total_cost,
                available: self.resources.energy,
            });
        }

        let instance = &mut self.upgrades[index];
        instance.owned = plan.owned_after;
        instance.tier = plan.tier_after;
        instance.next_level_cost_override = plan.override_after;
        debug_assert!(instance.tier <= instance.owned / economy::TIER_INTERVAL);

        Ok(CommandOutcome::UpgradePurchased {
            id: id.to_string(),
            levels: plan.levels,
            tiers: plan.tiers,
            cost: plan.total_cost,
        })
    }

    fn buy_upgrade_tier(&mut self, id: &str) -> Result<CommandOutcome, Rejection> {
        let index = self.locate(id)?;
        let definition = &self.data.upgrades.upgrades[index];
        let instance = &self.upgrades[index];
        if !tier_pending(instance.owned, instance.tier) {
            return Err(Rejection::NoTierAvailable(id.to_string()));
        }

        let cost = economy::tier_cost(definition, instance.owned, self.cost_multiplier());
        if !self.resources.spend_energy(cost) {
            return Err(Rejection::InsufficientEnergy {
                required: cost,
                available: self.resources.energy,
            });
        }

        let instance = &mut self.upgrades[index];
        instance.tier += 1;
        // A capped upgrade has no next level to discount.
        instance.next_level_cost_override = (instance.owned < economy::MAX_UPGRADE_LEVEL)
            .then(|| discounted_level_cost(cost));

        Ok(CommandOutcome::TierPurchased {
            id: id.to_string(),
            tier: instance.tier,
            cost,
        })
    }

    fn activate_core(&mut self) -> Result<CommandOutcome, Rejection> {
        let params = self.core_params();
        let next = core_reducer(self.core, CoreAction::Activate, &params);
        if next == self.core {
            return Err(Rejection::CoreNotReady);
        }
        self.core = next;
        Ok(CommandOutcome::CoreActivated)
    }

    fn ascend(&mut self) -> Result<CommandOutcome, Rejection> {
        if !self.can_ascend() {
            return Err(Rejection::AscensionUnavailable {
                owned: self.total_owned(),
                required: u64::from(self.data.economy.ascension_min_upgrades),
            });
        }

        let gain = self.pending_ascension_gain();
        self.prestige.award(gain);
        self.start_new_run();

        info!(level = self.prestige.ascension_level, gain, "ascended");
        Ok(CommandOutcome::Ascended {
            level: self.prestige.ascension_level,
            gain,
        })
    }

    fn buy_prestige_node(&mut self, tree: TreeKind, id: &str) -> Result<CommandOutcome, Rejection> {
        let definition = match tree {
            TreeKind::Ascension => &self.data.ascension_tree,
            TreeKind::Core => &self.data.core_tree,
        };
        let cost = self.prestige.purchase(definition, tree, id)?;
        Ok(CommandOutcome::NodePurchased {
            tree,
            id: id.to_string(),
            cost,
        })
    }

    fn reset(&mut self, hard: bool) -> CommandOutcome {
        if hard {
            *self = Simulation::new(Arc::clone(&self.data));
        } else {
            self.start_new_run();
        }
        info!(hard, "run reset");
        CommandOutcome::Reset { hard }
    }

    /// Clears run progress. Prestige, achievements, clicks, core telemetry and
    /// the bank unlock carry over.
    fn start_new_run(&mut self) {
        let starting_energy = self.bonuses().starting_energy;
        for instance in &mut self.upgrades {
            instance.reset();
        }
        self.core = CoreState {
            stats: self.core.stats,
            ..CoreState::default()
        };
        self.bank.clear_balances();
        self.resources.grant_starting_energy(starting_energy);
    }

    fn unlock_bank(&mut self) -> Result<CommandOutcome, Rejection> {
        if self.bank.unlocked {
            return Err(Rejection::BankAlreadyUnlocked);
        }
        if !self.resources.spend_energy(BANK_UNLOCK_COST) {
            return Err(Rejection::InsufficientEnergy {
                required: BANK_UNLOCK_COST,
                available: self.resources.energy,
            });
        }
        self.bank.unlocked = true;
        Ok(CommandOutcome::BankUnlocked)
    }

    fn check_bank(&self, amount: f64) -> Result<(), Rejection> {
        if !self.bank.unlocked {
            return Err(Rejection::BankLocked);
        }
        if !(amount.is_finite() && amount > 0.0) {
            return Err(Rejection::InvalidAmount);
        }
        Ok(())
    }

    fn deposit(&mut self, amount: f64) -> Result<CommandOutcome, Rejection> {
        self.check_bank(amount)?;
        if !self.resources.spend_energy(amount) {
            return Err(Rejection::InsufficientEnergy {
                required: amount,
                available: self.resources.energy,
            });
        }
        self.bank.savings += amount;
        Ok(CommandOutcome::Deposited { amount })
    }

    fn withdraw(&mut self, amount: f64) -> Result<CommandOutcome, Rejection> {
        self.check_bank(amount)?;
        if amount > self.bank.savings {
            return Err(Rejection::InsufficientSavings {
                requested: amount,
                available: self.bank.savings,
            });
        }
        let applied = self.resources.credit(amount);
        self.bank.savings -= applied;
        Ok(CommandOutcome::Withdrew { amount: applied })
    }

    fn take_loan(&mut self, amount: f64) -> Result<CommandOutcome, Rejection> {
        self.check_bank(amount)?;
        let limit = BankAccount::loan_limit(self.resources.total_generated);
        if self.bank.loan + amount > limit {
            return Err(Rejection::LoanLimitExceeded { limit });
        }
        let applied = self.resources.credit(amount);
        self.bank.loan += applied;
        Ok(CommandOutcome::LoanTaken { amount: applied })
    }

    fn repay_loan(&mut self, amount: f64) -> Result<CommandOutcome, Rejection> {
        self.check_bank(amount)?;
        if self.bank.loan <= 0.0 {
            return Err(Rejection::NoOutstandingLoan);
        }
        let payment = amount.min(self.bank.loan);
        if !self.resources.spend_energy(payment) {
            return Err(Rejection::InsufficientEnergy {
                required: payment,
                available: self.resources.energy,
            });
        }
        self.bank.loan -= payment;
        if self.bank.loan < 1e-9 {
            self.bank.loan = 0.0;
        }
        Ok(CommandOutcome::LoanRepaid { amount: payment })
    }

    fn evaluate_achievements(&mut self) {
        let progress = self.progress();
        for id in self.achievements.evaluate(&self.data.achievements, &progress) {
            debug!(%id, "achievement unlocked");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Command, CommandOutcome, Simulation};
    use crate::core::economy::BuyAmount;
    use crate::core::rejection::Rejection;
    use crate::data::{GameData, PrestigeTree, UpgradeCatalog};
    use crate::model::{
        CoreStatus, NodeEffect, PrestigeNode, TreeKind, UpgradeDefinition, UpgradeKind,
    };

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn upgrade(
        id: &str,
        kind: UpgradeKind,
        base_cost: f64,
        base_production: f64,
    ) -> UpgradeDefinition {
        UpgradeDefinition {
            id: id.to_string(),
            name: String::new(),
            description: String::new(),
            base_cost,
            base_production,
            kind,
            color: String::new(),
            unlock_cost: 0.0,
            required_upgrade_id: None,
            required_ascension: 0,
        }
    }

    fn root(id: &str) -> PrestigeNode {
        PrestigeNode {
            id: id.to_string(),
            name: String::new(),
            cost: 0,
            effect: NodeEffect::None,
            required: Vec::new(),
        }
    }

    fn sim() -> Simulation {
        let data = GameData {
            upgrades: UpgradeCatalog::new(vec![
                upgrade("cell", UpgradeKind::Production, 15.0, 1.0),
                upgrade("boost", UpgradeKind::Booster, 100.0, 10.0),
                upgrade("glove", UpgradeKind::Click, 50.0, 1.0),
            ]),
            ascension_tree: PrestigeTree::new(vec![
                root("origin"),
                PrestigeNode {
                    id: "head_start".to_string(),
                    name: String::new(),
                    cost: 1,
                    effect: NodeEffect::StartingEnergy(250.0),
                    required: vec!["origin".to_string()],
                },
            ]),
            core_tree: PrestigeTree::new(vec![root("core_origin")]),
            ..GameData::default()
        };
        Simulation::new(Arc::new(data))
    }

    #[test]
    fn tick_applies_production_for_elapsed_time() {
        let mut sim = sim();
        sim.upgrades[0].owned = 5;
        sim.upgrades[1].owned = 2;

        sim.apply(Command::Tick { delta_ms: 1000.0 })
            .expect("tick should apply");

        assert_eq!(sim.tick_index, 1);
        assert_close(sim.resources.energy, 6.0);
        assert_close(sim.resources.total_generated, 6.0);
    }

    #[test]
    fn click_adds_click_power_and_counts() {
        let mut sim = sim();
        sim.upgrades[2].owned = 2;

        let outcome = sim.apply(Command::Click).expect("click should apply");

        assert_eq!(outcome, CommandOutcome::Clicked { gained: 3.0 });
        assert_eq!(sim.total_clicks, 1);
    }

    #[test]
    fn single_purchase_spends_exact_cost() {
        let mut sim = sim();
        sim.resources.add_energy(20.0);

        sim.apply(Command::BuyUpgrade {
            id: "cell".to_string(),
            amount: BuyAmount::Count(1),
        })
        .expect("purchase should apply");

        assert_eq!(sim.upgrades[0].owned, 1);
        assert_close(sim.resources.energy, 5.0);
        assert_eq!(sim.next_cost("cell"), Some(17.0));
    }

    #[test]
    fn tier_discount_is_consumed_by_exactly_one_purchase() {
        let mut sim = sim();
        sim.upgrades[0].owned = 10;
        sim.resources.add_energy(10_000.0);

        assert_eq!(sim.tier_cost("cell"), Some(600.0));
        sim.apply(Command::BuyUpgradeTier {
            id: "cell".to_string(),
        })
        .expect("tier should apply");
        assert_eq!(sim.upgrades[0].tier, 1);
        assert_eq!(sim.upgrades[0].next_level_cost_override, Some(540.0));
        assert_eq!(sim.next_cost("cell"), Some(540.0));

        let before = sim.resources.energy;
        sim.apply(Command::BuyUpgrade {
            id: "cell".to_string(),
            amount: BuyAmount::Count(1),
        })
        .expect("discounted level should apply");
        assert_close(before - sim.resources.energy, 540.0);
        assert_eq!(sim.upgrades[0].next_level_cost_override, None);

        let standard = (15.0 * 1.15_f64.powi(11)).floor();
        assert_eq!(sim.next_cost("cell"), Some(standard));
    }

    #[test]
    fn final_tier_at_level_cap_leaves_no_discount() {
        let mut sim = sim();
        sim.upgrades[0].owned = crate::core::economy::MAX_UPGRADE_LEVEL;
        sim.upgrades[0].tier = 99;
        sim.resources.add_energy(1e70);

        let outcome = sim
            .apply(Command::BuyUpgradeTier {
                id: "cell".to_string(),
            })
            .expect("final tier should apply");
        assert!(matches!(
            outcome,
            CommandOutcome::TierPurchased { tier: 100, .. }
        ));
        assert_eq!(sim.upgrades[0].next_level_cost_override, None);

        let result = sim.apply(Command::BuyUpgrade {
            id: "cell".to_string(),
            amount: BuyAmount::Count(1),
        });
        assert!(matches!(result, Err(Rejection::MaxLevelReached(_))));
    }

    #[test]
    fn tier_purchase_needs_a_threshold() {
        let mut sim = sim();
        sim.upgrades[0].owned = 9;
        sim.resources.add_energy(1e9);

        assert_eq!(
            sim.apply(Command::BuyUpgradeTier {
                id: "cell".to_string()
            }),
            Err(Rejection::NoTierAvailable("cell".to_string()))
        );
    }

    #[test]
    fn unaffordable_purchase_is_rejected_without_change() {
        let mut sim = sim();
        sim.resources.add_energy(10.0);
        let before = sim.clone();
        let command = Command::BuyUpgrade {
            id: "cell".to_string(),
            amount: BuyAmount::Count(1),
        };

        let (first, first_result) = sim.reduce(command.clone());
        let (second, second_result) = first.reduce(command);

        assert!(matches!(
            first_result,
            Err(Rejection::InsufficientEnergy { .. })
        ));
        assert_eq!(first_result, second_result);
        assert_eq!(first, before);
        assert_eq!(second, before);
    }

    #[test]
    fn zero_amount_and_unknown_ids_are_rejected() {
        let mut sim = sim();
        assert_eq!(
            sim.apply(Command::BuyUpgrade {
                id: "cell".to_string(),
                amount: BuyAmount::Count(0),
            }),
            Err(Rejection::InvalidAmount)
        );
        assert_eq!(
            sim.apply(Command::BuyUpgrade {
                id: "ghost".to_string(),
                amount: BuyAmount::Max,
            }),
            Err(Rejection::UnknownUpgrade("ghost".to_string()))
        );
    }

    #[test]
    fn core_boost_multiplies_production_while_active() {
        let mut sim = sim();
        sim.upgrades[0].owned = 2;
        sim.core.status = CoreStatus::Ready;
        sim.core.charge = 100.0;

        sim.apply(Command::ActivateCore).expect("core should activate");
        sim.apply(Command::Tick { delta_ms: 1000.0 })
            .expect("tick should apply");

        assert_close(sim.resources.energy, 10.0);
        assert_eq!(sim.core.stats.activations, 1);
        assert_eq!(sim.apply(Command::ActivateCore), Err(Rejection::CoreNotReady));
    }

    #[test]
    fn ascension_resets_run_but_keeps_permanent_progress() {
        let mut sim = sim();
        sim.upgrades[0].owned = 60;
        sim.upgrades[0].tier = 6;
        sim.upgrades[1].owned = 40;
        sim.resources.add_energy(5000.0);
        sim.total_clicks = 12;
        sim.bank.unlocked = true;
        sim.bank.savings = 300.0;

        let outcome = sim.apply(Command::Ascend).expect("ascension should apply");

        assert_eq!(outcome, CommandOutcome::Ascended { level: 1, gain: 5 });
        assert_eq!(sim.prestige.ascension_points, 5);
        assert_eq!(sim.prestige.quantum_shards, 5);
        assert_eq!(sim.total_owned(), 0);
        assert!(sim.upgrades.iter().all(|entry| entry.tier == 0));
        assert_eq!(sim.resources.energy, 0.0);
        assert_eq!(sim.resources.total_generated, 5000.0);
        assert_eq!(sim.total_clicks, 12);
        assert!(sim.bank.unlocked);
        assert_eq!(sim.bank.savings, 0.0);
    }

    #[test]
    fn ascension_below_threshold_is_rejected() {
        let mut sim = sim();
        sim.upgrades[0].owned = 99;
        assert_eq!(
            sim.apply(Command::Ascend),
            Err(Rejection::AscensionUnavailable {
                owned: 99,
                required: 100,
            })
        );
    }

    #[test]
    fn starting_energy_seeds_the_next_run() {
        let mut sim = sim();
        sim.prestige.ascension_points = 1;
        sim.apply(Command::BuyPrestigeNode {
            tree: TreeKind::Ascension,
            id: "head_start".to_string(),
        })
        .expect("node should apply");
        sim.upgrades[0].owned = 100;

        sim.apply(Command::Ascend).expect("ascension should apply");

        assert_eq!(sim.resources.energy, 250.0);
        assert!(sim.prestige.purchased_ascension.contains("head_start"));
    }

    #[test]
    fn hard_reset_restores_initial_state() {
        let mut sim = sim();
        sim.upgrades[0].owned = 120;
        sim.apply(Command::Ascend).expect("ascension should apply");
        sim.apply(Command::Click).expect("click should apply");

        sim.apply(Command::Reset { hard: true })
            .expect("reset should apply");

        assert_eq!(sim, Simulation::new(Arc::clone(&sim.data)));
    }

    #[test]
    fn soft_reset_keeps_prestige() {
        let mut sim = sim();
        sim.prestige.ascension_level = 2;
        sim.upgrades[0].owned = 3;

        sim.apply(Command::Reset { hard: false })
            .expect("reset should apply");

        assert_eq!(sim.total_owned(), 0);
        assert_eq!(sim.prestige.ascension_level, 2);
    }

    #[test]
    fn bank_moves_energy_without_minting_generation() {
        let mut sim = sim();
        sim.resources.add_energy(20_000.0);

        assert_eq!(
            sim.apply(Command::Deposit { amount: 5.0 }),
            Err(Rejection::BankLocked)
        );
        sim.apply(Command::UnlockBank).expect("bank should unlock");
        sim.apply(Command::Deposit { amount: 4000.0 })
            .expect("deposit should apply");
        sim.apply(Command::Withdraw { amount: 1000.0 })
            .expect("withdraw should apply");

        assert_close(sim.resources.energy, 7000.0);
        assert_close(sim.bank.savings, 3000.0);
        assert_close(sim.resources.total_generated, 20_000.0);
        assert!(matches!(
            sim.apply(Command::Withdraw { amount: 5000.0 }),
            Err(Rejection::InsufficientSavings { .. })
        ));
    }

    #[test]
    fn loans_are_capped_and_repayable() {
        let mut sim = sim();
        sim.resources.add_energy(20_000.0);
        sim.apply(Command::UnlockBank).expect("bank should unlock");

        assert_eq!(
            sim.apply(Command::TakeLoan { amount: 10_001.0 }),
            Err(Rejection::LoanLimitExceeded { limit: 10_000.0 })
        );
        sim.apply(Command::TakeLoan { amount: 2000.0 })
            .expect("loan should apply");
        let repaid = sim
            .apply(Command::RepayLoan { amount: 5000.0 })
            .expect("repayment should apply");

        assert_eq!(repaid, CommandOutcome::LoanRepaid { amount: 2000.0 });
        assert_eq!(sim.bank.loan, 0.0);
        assert_eq!(
            sim.apply(Command::RepayLoan { amount: 1.0 }),
            Err(Rejection::NoOutstandingLoan)
        );
    }

    #[test]
    fn negative_tick_is_rejected() {
        let mut sim = sim();
        assert_eq!(
            sim.apply(Command::Tick { delta_ms: -1.0 }),
            Err(Rejection::InvalidAmount)
        );
        assert_eq!(sim.tick_index, 0);
    }
}
