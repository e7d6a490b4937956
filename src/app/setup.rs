use std::fs;
use std::sync::Arc;

use bevy::prelude::*;
use energy_idle::{GameData, Settings, Simulation, load_game_data_from_dir, load_or_default};

use super::resources::{RuntimeConfig, SessionState};
use super::state::{AppPhase, SimRunState};

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("PrimaryCamera"), Camera2d));
}

pub fn bootstrap_session(
    mut commands: Commands,
    config: Res<RuntimeConfig>,
    mut next_phase: ResMut<NextState<AppPhase>>,
    mut next_run_state: ResMut<NextState<SimRunState>>,
) {
    let data = match load_game_data_from_dir(&config.assets_dir) {
        Ok(data) => data,
        Err(err) => {
            error!("failed loading game data, starting with an empty catalog: {err:#}");
            GameData::default()
        }
    };
    let data = Arc::new(data);

    let (simulation, settings) = match fs::read_to_string(&config.save_path) {
        Ok(text) => load_or_default(Arc::clone(&data), &text),
        Err(_) => (Simulation::new(data), Settings::default()),
    };
    info!(
        ticks = simulation.tick_index,
        ascension = simulation.prestige.ascension_level,
        "session ready"
    );

    commands.insert_resource(SessionState {
        simulation,
        settings,
        tick_timer: Timer::new(config.tick_period(), TimerMode::Repeating),
        autosave_timer: Timer::from_seconds(
            config.auto_save_interval_seconds.max(1.0),
            TimerMode::Repeating,
        ),
        last_save_error: None,
        ascend_armed: false,
    });

    next_run_state.set(SimRunState::Running);
    next_phase.set(AppPhase::InGame);
}
