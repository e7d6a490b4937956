mod achievements;
mod bank;
mod capacitor;
mod driver;
mod economy;
mod prestige;
mod production;
mod rejection;
mod resource_store;
mod simulation;

pub use achievements::{AchievementLedger, Progress, condition_met, newly_unlocked};
pub use bank::{
    BANK_UNLOCK_COST, BankAccount, LOAN_LIMIT_FRACTION, LOAN_RATE_PER_SECOND,
    SAVINGS_RATE_PER_SECOND,
};
pub use capacitor::{
    CORE_BOOST_FACTOR, CORE_CHARGE_RATE, CoreAction, CoreParams, DISCHARGE_DURATION_MS,
    FULL_CHARGE, core_reducer,
};
pub use driver::{MAX_CATCH_UP_TICKS, TICK_PERIOD_MS, TickDriver};
pub use economy::{
    BOOSTER_TIER_MULTIPLIER, BulkPurchase, BuyAmount, COST_GROWTH, MAX_UPGRADE_LEVEL,
    TIER_COST_FACTOR, TIER_DISCOUNT, TIER_INTERVAL, TIER_PRODUCTION_MULTIPLIER,
    calculate_bulk_buy, calculate_theoretical_bulk_buy, discounted_level_cost, is_unlocked,
    level_cost, next_level_cost, tier_cost, tier_multiplier, tier_pending, tiers_unlocked,
    total_output, unit_output,
};
pub use prestige::{PrestigeBonuses, PrestigeLedger, ascension_gain, can_ascend};
pub use production::{BASE_CLICK, Multipliers, ProductionSummary, summarize};
pub use rejection::Rejection;
pub use resource_store::{ResourceLedger, TickDeltas};
pub use simulation::{Command, CommandOutcome, Simulation};
