use std::sync::Arc;

use energy_idle::core::{
    CoreAction, CoreParams, DISCHARGE_DURATION_MS, TickDriver, core_reducer, level_cost,
};
use energy_idle::data::load_bundled_game_data;
use energy_idle::{
    BuyAmount, Command, CommandOutcome, CoreState, CoreStatus, GameData, Rejection, Simulation,
    TreeKind,
};

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= EPSILON,
        "expected {expected}, got {actual}"
    );
}

fn bundled() -> Arc<GameData> {
    Arc::new(load_bundled_game_data().expect("bundled data should load"))
}

fn upgrade_index(sim: &Simulation, id: &str) -> usize {
    sim.data
        .upgrades
        .index_of(id)
        .expect("upgrade should exist in the bundled catalog")
}

fn buy(id: &str, amount: BuyAmount) -> Command {
    Command::BuyUpgrade {
        id: id.to_string(),
        amount,
    }
}

#[test]
fn repeated_commands_are_deterministic() {
    let mut a = Simulation::new(bundled());
    let mut b = a.clone();

    let script = [
        Command::Click,
        Command::Click,
        Command::Tick { delta_ms: 100.0 },
        buy("solar_cell", BuyAmount::Max),
        Command::Tick { delta_ms: 2500.0 },
        Command::ActivateCore,
        buy("kinetic_glove", BuyAmount::Count(1)),
    ];
    for _ in 0..20 {
        for command in &script {
            let left = a.apply(command.clone());
            let right = b.apply(command.clone());
            assert_eq!(left, right);
            assert_eq!(a, b);
        }
    }
}

#[test]
fn level_cost_follows_exponential_growth() {
    assert_eq!(level_cost(15.0, 0, 1.0, None), 15.0);
    assert_eq!(level_cost(15.0, 1, 1.0, None), 17.0);
    assert_eq!(level_cost(15.0, 10, 1.0, None), 60.0);
    assert_eq!(level_cost(15.0, 10, 1.0, Some(540.0)), 540.0);
}

#[test]
fn tier_discount_applies_to_exactly_one_purchase() {
    let mut sim = Simulation::new(bundled());
    let solar = upgrade_index(&sim, "solar_cell");
    sim.upgrades[solar].owned = 10;
    sim.resources.energy = 5_000.0;

    assert_eq!(sim.next_cost("solar_cell"), Some(60.0));
    assert_eq!(sim.tier_cost("solar_cell"), Some(600.0));

    let outcome = sim
        .apply(Command::BuyUpgradeTier {
            id: "solar_cell".to_string(),
        })
        .expect("tier purchase should apply");
    assert_eq!(
        outcome,
        CommandOutcome::TierPurchased {
            id: "solar_cell".to_string(),
            tier: 1,
            cost: 600.0,
        }
    );
    assert_eq!(sim.upgrades[solar].next_level_cost_override, Some(540.0));

    sim.apply(buy("solar_cell", BuyAmount::Count(1)))
        .expect("discounted level should apply");
    assert_close(sim.resources.energy, 5_000.0 - 600.0 - 540.0);
    assert_eq!(sim.upgrades[solar].next_level_cost_override, None);
    assert_eq!(sim.next_cost("solar_cell"), Some(level_cost(15.0, 11, 1.0, None)));
}

#[test]
fn bulk_buy_stops_at_an_unaffordable_tier() {
    let mut sim = Simulation::new(bundled());
    let solar = upgrade_index(&sim, "solar_cell");
    sim.upgrades[solar].owned = 9;
    sim.resources.energy = 200.0;

    let outcome = sim
        .apply(buy("solar_cell", BuyAmount::Max))
        .expect("one level should fit");

    assert!(matches!(
        outcome,
        CommandOutcome::UpgradePurchased {
            levels: 1,
            tiers: 0,
            ..
        }
    ));
    assert_eq!(sim.upgrades[solar].owned, 10);
    assert!(matches!(
        sim.apply(buy("solar_cell", BuyAmount::Count(1))),
        Err(Rejection::InsufficientEnergy { required, .. }) if required == 600.0
    ));
}

#[test]
fn unaffordable_purchase_twice_leaves_identical_state() {
    let sim = Simulation::new(bundled());
    let command = buy("solar_cell", BuyAmount::Count(1));

    let (once, first) = sim.reduce(command.clone());
    let (twice, second) = once.reduce(command);

    assert!(first.is_err());
    assert_eq!(first, second);
    assert_eq!(once, sim);
    assert_eq!(twice, sim);
}

#[test]
fn core_cycle_scenarios() {
    let params = CoreParams::default();
    let charging = CoreState {
        charge: 98.0,
        ..CoreState::default()
    };

    let ready = core_reducer(charging, CoreAction::Tick { delta_ms: 2000.0 }, &params);
    assert_eq!(ready.charge, 100.0);
    assert_eq!(ready.status, CoreStatus::Ready);

    let active = core_reducer(ready, CoreAction::Activate, &params);
    assert_eq!(active.status, CoreStatus::Active);
    assert_eq!(active.charge, 0.0);
    assert_eq!(active.active_time_remaining_ms, DISCHARGE_DURATION_MS);
    assert_eq!(active.stats.activations, 1);

    let ending = CoreState {
        active_time_remaining_ms: 50.0,
        ..active
    };
    let drained = core_reducer(ending, CoreAction::Tick { delta_ms: 100.0 }, &params);
    assert_eq!(drained.status, CoreStatus::Charging);
    assert_eq!(drained.active_time_remaining_ms, 0.0);
    assert_eq!(drained.charge, 0.0);

    assert_eq!(core_reducer(drained, CoreAction::Activate, &params), drained);
}

#[test]
fn core_charges_to_ready_through_ticks() {
    let mut sim = Simulation::new(bundled());

    for _ in 0..400 {
        sim.apply(Command::Tick { delta_ms: 100.0 })
            .expect("tick should apply");
    }

    assert_eq!(sim.core.status, CoreStatus::Ready);
    sim.apply(Command::ActivateCore)
        .expect("core should activate");
    assert!(sim.achievements.is_unlocked("first_discharge"));
}

#[test]
fn ascension_resets_the_run_and_keeps_permanent_progress() {
    let mut sim = Simulation::new(bundled());
    let solar = upgrade_index(&sim, "solar_cell");
    sim.prestige.ascension_points = 3;
    sim.apply(Command::BuyPrestigeNode {
        tree: TreeKind::Ascension,
        id: "head_start".to_string(),
    })
    .expect("head start should be purchasable");
    for _ in 0..5 {
        sim.apply(Command::Click).expect("click should apply");
    }
    sim.upgrades[solar].owned = 120;
    sim.upgrades[solar].tier = 12;
    sim.resources.energy = 42.0;

    let outcome = sim.apply(Command::Ascend).expect("ascension should apply");

    assert_eq!(outcome, CommandOutcome::Ascended { level: 1, gain: 5 });
    assert_eq!(sim.prestige.ascension_points, 1 + 5);
    assert_eq!(sim.prestige.quantum_shards, 5);
    assert!(sim.prestige.purchased_ascension.contains("head_start"));
    assert!(sim.prestige.purchased_core.contains("core_origin"));
    assert_eq!(sim.total_owned(), 0);
    assert_eq!(sim.upgrades[solar].tier, 0);
    assert_eq!(sim.resources.energy, 1000.0);
    assert_eq!(sim.total_clicks, 5);
    assert!(sim.achievements.is_unlocked("transcendent"));
}

#[test]
fn prestige_purchase_checks_prerequisites_and_currency() {
    let mut sim = Simulation::new(bundled());
    sim.prestige.ascension_points = 10;

    assert!(matches!(
        sim.apply(Command::BuyPrestigeNode {
            tree: TreeKind::Ascension,
            id: "overdrive".to_string(),
        }),
        Err(Rejection::PrerequisiteNotMet { .. })
    ));
    assert!(matches!(
        sim.apply(Command::BuyPrestigeNode {
            tree: TreeKind::Core,
            id: "rapid_charge".to_string(),
        }),
        Err(Rejection::InsufficientCurrency { .. })
    ));
    assert_eq!(
        sim.apply(Command::BuyPrestigeNode {
            tree: TreeKind::Ascension,
            id: "origin".to_string(),
        }),
        Err(Rejection::AlreadyPurchased("origin".to_string()))
    );
    assert_eq!(sim.prestige.ascension_points, 10);
}

#[test]
fn tick_driver_runs_whole_periods() {
    let mut sim = Simulation::new(bundled());
    let solar = upgrade_index(&sim, "solar_cell");
    sim.upgrades[solar].owned = 2;
    let mut driver = TickDriver::default();

    assert_eq!(driver.drive(&mut sim, 1_050.0), 10);
    assert_eq!(sim.tick_index, 10);
    assert_close(sim.resources.energy, 1.0);
    assert_close(driver.pending_ms(), 50.0);
}

#[test]
fn lifetime_total_never_decreases_over_a_session() {
    let mut sim = Simulation::new(bundled());
    let mut previous = 0.0;
    let script = [
        Command::Click,
        buy("solar_cell", BuyAmount::Max),
        Command::Tick { delta_ms: 500.0 },
        Command::Reset { hard: false },
        buy("kinetic_glove", BuyAmount::Count(2)),
    ];

    for round in 0..30 {
        for command in &script {
            let _ = sim.apply(command.clone());
            assert!(
                sim.resources.total_generated >= previous,
                "total dropped in round {round}"
            );
            previous = sim.resources.total_generated;
        }
    }
}
