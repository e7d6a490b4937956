use bevy::prelude::*;
use energy_idle::{BuyAmount, TreeKind};

use super::resources::{GameAction, SessionState, ShopSelection};
use super::state::SimRunState;

pub fn handle_keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<SessionState>,
    mut selection: ResMut<ShopSelection>,
    run_state: Res<State<SimRunState>>,
    mut next_run_state: ResMut<NextState<SimRunState>>,
) {
    let upgrade_count = session.simulation.upgrades.len();
    if keys.just_pressed(KeyCode::ArrowUp) {
        selection.upgrade = ShopSelection::step(selection.upgrade, upgrade_count, -1);
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        selection.upgrade = ShopSelection::step(selection.upgrade, upgrade_count, 1);
    }

    if keys.just_pressed(KeyCode::Tab) {
        selection.tree = match selection.tree {
            TreeKind::Ascension => TreeKind::Core,
            TreeKind::Core => TreeKind::Ascension,
        };
        selection.node = 0;
    }
    let node_count = match selection.tree {
        TreeKind::Ascension => session.simulation.data.ascension_tree.nodes.len(),
        TreeKind::Core => session.simulation.data.core_tree.nodes.len(),
    };
    if keys.just_pressed(KeyCode::KeyQ) {
        selection.node = ShopSelection::step(selection.node, node_count, -1);
    }
    if keys.just_pressed(KeyCode::KeyE) {
        selection.node = ShopSelection::step(selection.node, node_count, 1);
    }

    if keys.just_pressed(KeyCode::KeyN) {
        session.settings.scientific_notation = !session.settings.scientific_notation;
    }

    if keys.just_pressed(KeyCode::KeyP) {
        let next = match run_state.get() {
            SimRunState::Running => SimRunState::Paused,
            SimRunState::Paused => SimRunState::Running,
        };
        next_run_state.set(next);
    }
}

pub fn emit_game_actions(
    keys: Res<ButtonInput<KeyCode>>,
    session: Res<SessionState>,
    selection: Res<ShopSelection>,
    mut actions: EventWriter<GameAction>,
) {
    let shift = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);

    if keys.just_pressed(KeyCode::Space) {
        actions.send(GameAction::Click);
    }

    let selected_upgrade = session
        .simulation
        .data
        .upgrades
        .upgrades
        .get(selection.upgrade)
        .map(|definition| definition.id.clone());
    if let Some(id) = selected_upgrade {
        if keys.just_pressed(KeyCode::KeyB) {
            actions.send(GameAction::BuyUpgrade {
                id: id.clone(),
                amount: BuyAmount::Count(if shift { 10 } else { 1 }),
            });
        }
        if keys.just_pressed(KeyCode::KeyM) {
            actions.send(GameAction::BuyUpgrade {
                id: id.clone(),
                amount: BuyAmount::Max,
            });
        }
        if keys.just_pressed(KeyCode::KeyT) {
            actions.send(GameAction::BuyTier { id });
        }
    }

    if keys.just_pressed(KeyCode::KeyC) {
        actions.send(GameAction::ActivateCore);
    }
    if keys.just_pressed(KeyCode::KeyA) {
        actions.send(GameAction::Ascend);
    }

    if keys.just_pressed(KeyCode::Enter) {
        let tree = match selection.tree {
            TreeKind::Ascension => &session.simulation.data.ascension_tree,
            TreeKind::Core => &session.simulation.data.core_tree,
        };
        if let Some(node) = tree.nodes.get(selection.node) {
            actions.send(GameAction::BuyNode {
                tree: selection.tree,
                id: node.id.clone(),
            });
        }
    }

    if keys.just_pressed(KeyCode::KeyU) {
        actions.send(GameAction::UnlockBank);
    }
    if keys.just_pressed(KeyCode::KeyD) {
        actions.send(GameAction::Deposit { fraction: 0.5 });
    }
    if keys.just_pressed(KeyCode::KeyW) {
        actions.send(GameAction::Withdraw { fraction: 1.0 });
    }
    if keys.just_pressed(KeyCode::KeyL) {
        actions.send(GameAction::TakeLoan { fraction: 0.5 });
    }
    if keys.just_pressed(KeyCode::KeyK) {
        actions.send(GameAction::RepayLoan);
    }

    if keys.just_pressed(KeyCode::KeyR) {
        actions.send(GameAction::Reset { hard: shift });
    }
}
