use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use bevy::prelude::*;
use energy_idle::core::{AchievementLedger, BankAccount, newly_unlocked};
use energy_idle::{
    Command, CommandOutcome, Simulation, format_energy, load_or_default,
    save_data_from_simulation, save_to_json_string,
};

use super::resources::{GameAction, Notifications, RuntimeConfig, SessionState};

pub fn apply_game_actions(
    mut actions: EventReader<GameAction>,
    mut session: ResMut<SessionState>,
    mut notifications: ResMut<Notifications>,
    config: Res<RuntimeConfig>,
) {
    for action in actions.read() {
        let Some(command) = command_for(&mut session, &mut notifications, &config, action) else {
            continue;
        };

        let before = session.simulation.achievements.clone();
        match session.simulation.apply(command) {
            Ok(outcome) => {
                if let Some(message) = describe(&outcome, session.settings.scientific_notation) {
                    notifications.push(message, config.notification_seconds);
                }
            }
            Err(rejection) => debug!("action {action:?} rejected: {rejection}"),
        }
        announce_achievements(&session, &before, &mut notifications, &config);
    }
}

fn command_for(
    session: &mut SessionState,
    notifications: &mut Notifications,
    config: &RuntimeConfig,
    action: &GameAction,
) -> Option<Command> {
    if !matches!(action, GameAction::Ascend) {
        session.ascend_armed = false;
    }

    let command = match action {
        GameAction::Click => Command::Click,
        GameAction::BuyUpgrade { id, amount } => Command::BuyUpgrade {
            id: id.clone(),
            amount: *amount,
        },
        GameAction::BuyTier { id } => Command::BuyUpgradeTier { id: id.clone() },
        GameAction::ActivateCore => Command::ActivateCore,
        GameAction::Ascend => {
            if session.settings.confirm_before_ascend && !session.ascend_armed {
                if session.simulation.can_ascend() {
                    session.ascend_armed = true;
                    notifications.push(
                        format!(
                            "Press A again to ascend for {} points",
                            session.simulation.pending_ascension_gain()
                        ),
                        config.notification_seconds,
                    );
                }
                return None;
            }
            session.ascend_armed = false;
            Command::Ascend
        }
        GameAction::BuyNode { tree, id } => Command::BuyPrestigeNode {
            tree: *tree,
            id: id.clone(),
        },
        GameAction::Reset { hard } => Command::Reset { hard: *hard },
        GameAction::UnlockBank => Command::UnlockBank,
        GameAction::Deposit { .. }
        | GameAction::Withdraw { .. }
        | GameAction::TakeLoan { .. }
        | GameAction::RepayLoan => bank_command(&session.simulation, action)?,
    };
    Some(command)
}

/// Sizes a bank action against the current balances.
fn bank_command(simulation: &Simulation, action: &GameAction) -> Option<Command> {
    let command = match action {
        GameAction::Deposit { fraction } => Command::Deposit {
            amount: (simulation.resources.energy * fraction).floor(),
        },
        GameAction::Withdraw { fraction } => Command::Withdraw {
            amount: simulation.bank.savings * fraction,
        },
        GameAction::TakeLoan { fraction } => {
            let limit = BankAccount::loan_limit(simulation.resources.total_generated);
            Command::TakeLoan {
                amount: ((limit - simulation.bank.loan).max(0.0) * fraction).floor(),
            }
        }
        GameAction::RepayLoan => Command::RepayLoan {
            amount: simulation.bank.loan.min(simulation.resources.energy),
        },
        _ => return None,
    };
    Some(command)
}

fn describe(outcome: &CommandOutcome, scientific: bool) -> Option<String> {
    let message = match outcome {
        CommandOutcome::TierPurchased { id, tier, .. } => format!("{id} reached tier {tier}"),
        CommandOutcome::CoreActivated => "Core discharging".to_string(),
        CommandOutcome::Ascended { level, gain } => {
            format!("Ascended to level {level} (+{gain} points)")
        }
        CommandOutcome::NodePurchased { id, .. } => format!("Unlocked {id}"),
        CommandOutcome::Reset { hard: true } => "Game wiped".to_string(),
        CommandOutcome::Reset { hard: false } => "Run restarted".to_string(),
        CommandOutcome::BankUnlocked => "Bank unlocked".to_string(),
        CommandOutcome::LoanTaken { amount } => {
            format!("Borrowed {}", format_energy(*amount, scientific))
        }
        CommandOutcome::LoanRepaid { amount } => {
            format!("Repaid {}", format_energy(*amount, scientific))
        }
        _ => return None,
    };
    Some(message)
}

fn announce_achievements(
    session: &SessionState,
    before: &AchievementLedger,
    notifications: &mut Notifications,
    config: &RuntimeConfig,
) {
    let catalog = &session.simulation.data.achievements;
    for id in newly_unlocked(before, &session.simulation.achievements) {
        let name = catalog
            .achievements
            .iter()
            .find(|entry| entry.id == id)
            .map_or(id.as_str(), |entry| entry.name.as_str());
        info!(%id, "achievement unlocked");
        notifications.push(format!("Achievement: {name}"), config.notification_seconds);
    }
}

pub fn tick_simulation(
    time: Res<Time>,
    mut session: ResMut<SessionState>,
    mut notifications: ResMut<Notifications>,
    config: Res<RuntimeConfig>,
) {
    let steps = session
        .tick_timer
        .tick(time.delta())
        .times_finished_this_tick();
    if steps == 0 {
        return;
    }

    let delta_ms = session.tick_period_ms();
    let before = session.simulation.achievements.clone();
    for _ in 0..steps {
        if let Err(rejection) = session.simulation.apply(Command::Tick { delta_ms }) {
            warn!("tick rejected: {rejection}");
            break;
        }
    }
    announce_achievements(&session, &before, &mut notifications, &config);
}

pub fn handle_save_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<SessionState>,
    mut notifications: ResMut<Notifications>,
    config: Res<RuntimeConfig>,
) {
    if keys.just_pressed(KeyCode::F5) {
        let result = write_save(&session, &config);
        record_save_result(&mut session, result);
        if session.last_save_error.is_none() {
            notifications.push("Game saved".to_string(), config.notification_seconds);
        }
    }

    if keys.just_pressed(KeyCode::F9) {
        match fs::read_to_string(&config.save_path) {
            Ok(text) => {
                let data = Arc::clone(&session.simulation.data);
                let (simulation, settings) = load_or_default(data, &text);
                session.simulation = simulation;
                session.settings = settings;
                session.last_save_error = None;
                notifications.push("Game loaded".to_string(), config.notification_seconds);
            }
            Err(err) => {
                session.last_save_error = Some(format!("load failed: {err}"));
            }
        }
    }
}

pub fn autosave_session(
    time: Res<Time>,
    mut session: ResMut<SessionState>,
    config: Res<RuntimeConfig>,
) {
    if !session.autosave_timer.tick(time.delta()).just_finished() {
        return;
    }
    let result = write_save(&session, &config);
    record_save_result(&mut session, result);
}

fn write_save(session: &SessionState, config: &RuntimeConfig) -> Result<()> {
    let save = save_data_from_simulation(&session.simulation, &session.settings);
    let json = save_to_json_string(&save)?;
    fs::write(&config.save_path, json)
        .with_context(|| format!("failed writing save file: {}", config.save_path.display()))
}

fn record_save_result(session: &mut SessionState, result: Result<()>) {
    match result {
        Ok(()) => session.last_save_error = None,
        Err(err) => {
            warn!("save failed: {err:#}");
            session.last_save_error = Some(format!("{err:#}"));
        }
    }
}
