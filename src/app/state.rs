use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum AppPhase {
    #[default]
    Boot,
    InGame,
}

/// Paused sessions still accept purchases; only the tick timer stops.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum SimRunState {
    #[default]
    Running,
    Paused,
}
