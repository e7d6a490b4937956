mod input;
mod resources;
mod setup;
mod simulation;
mod state;
mod view;

use bevy::prelude::*;

use resources::{GameAction, Notifications, RuntimeConfig, ShopSelection};
use state::{AppPhase, SimRunState};

pub struct EnergyAppPlugin;

impl Plugin for EnergyAppPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppPhase>()
            .init_state::<SimRunState>()
            .init_resource::<RuntimeConfig>()
            .init_resource::<ShopSelection>()
            .init_resource::<Notifications>()
            .add_event::<GameAction>()
            .add_systems(Startup, setup::spawn_camera)
            .add_systems(OnEnter(AppPhase::Boot), setup::bootstrap_session)
            .add_systems(OnEnter(AppPhase::InGame), view::spawn_hud)
            .add_systems(
                Update,
                (
                    input::handle_keyboard_controls,
                    input::emit_game_actions,
                    simulation::handle_save_hotkeys,
                    simulation::apply_game_actions,
                    simulation::tick_simulation.run_if(in_state(SimRunState::Running)),
                    simulation::autosave_session,
                    view::refresh_hud,
                    view::refresh_shop,
                    view::refresh_notifications,
                )
                    .chain()
                    .run_if(in_state(AppPhase::InGame)),
            );
    }
}
