use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use energy_idle::{BuyAmount, Settings, Simulation, TreeKind, data::bundled_assets_dir};

#[derive(Resource, Debug, Clone)]
pub struct RuntimeConfig {
    pub tick_hz: f32,
    pub save_path: PathBuf,
    pub auto_save_interval_seconds: f32,
    pub assets_dir: PathBuf,
    pub notification_seconds: f32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_hz: 10.0,
            save_path: PathBuf::from("energy_idle_save.json"),
            auto_save_interval_seconds: 30.0,
            assets_dir: bundled_assets_dir(),
            notification_seconds: 4.0,
        }
    }
}

impl RuntimeConfig {
    /// Tick timer period, computed in f64 so 10 Hz is exactly 100 ms.
    pub fn tick_period(&self) -> Duration {
        let hz = f64::from(self.tick_hz);
        let seconds = if hz.is_finite() && hz > 0.0 {
            (1.0 / hz).max(0.01)
        } else {
            0.1
        };
        Duration::from_nanos((seconds * 1e9).round() as u64)
    }
}

#[derive(Resource, Debug)]
pub struct SessionState {
    pub simulation: Simulation,
    pub settings: Settings,
    pub tick_timer: Timer,
    pub autosave_timer: Timer,
    pub last_save_error: Option<String>,
    /// Set by a first ascend press when confirmation is on.
    pub ascend_armed: bool,
}

impl SessionState {
    pub fn tick_period_ms(&self) -> f64 {
        self.tick_timer.duration().as_secs_f64() * 1000.0
    }
}

/// Cursor over the upgrade shop and the prestige trees.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ShopSelection {
    pub upgrade: usize,
    pub tree: TreeKind,
    pub node: usize,
}

impl Default for ShopSelection {
    fn default() -> Self {
        Self {
            upgrade: 0,
            tree: TreeKind::Ascension,
            node: 0,
        }
    }
}

impl ShopSelection {
    pub fn step(index: usize, len: usize, delta: isize) -> usize {
        if len == 0 {
            return 0;
        }
        (index as isize + delta).rem_euclid(len as isize) as usize
    }
}

#[derive(Event, Debug, Clone)]
pub enum GameAction {
    Click,
    BuyUpgrade { id: String, amount: BuyAmount },
    BuyTier { id: String },
    ActivateCore,
    Ascend,
    BuyNode { tree: TreeKind, id: String },
    Reset { hard: bool },
    UnlockBank,
    Deposit { fraction: f64 },
    Withdraw { fraction: f64 },
    TakeLoan { fraction: f64 },
    RepayLoan,
}

#[derive(Resource, Debug, Default)]
pub struct Notifications {
    pub entries: VecDeque<(String, Timer)>,
}

impl Notifications {
    pub const MAX_VISIBLE: usize = 4;

    pub fn push(&mut self, message: String, seconds: f32) {
        self.entries
            .push_back((message, Timer::from_seconds(seconds, TimerMode::Once)));
        while self.entries.len() > Self::MAX_VISIBLE {
            self.entries.pop_front();
        }
    }
}

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct ShopText;

#[derive(Component)]
pub struct NotificationText;
