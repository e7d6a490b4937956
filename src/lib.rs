pub mod core;
pub mod data;
pub mod format;
pub mod model;
pub mod save;

pub use core::{
    BuyAmount, Command, CommandOutcome, CoreParams, ProductionSummary, Rejection,
    ResourceLedger, Simulation, TickDriver,
};
pub use data::{
    DataError, GameData, load_bundled_game_data, load_game_data_from_dir, load_game_data_from_str,
};
pub use format::{format_duration_ms, format_energy};
pub use model::{
    CoreState, CoreStatus, NodeEffect, PrestigeNode, Settings, TreeKind, UpgradeDefinition,
    UpgradeInstance, UpgradeKind,
};
pub use save::{
    SaveData, apply_save_data, export_to_base64, import_from_base64, load_from_json_string,
    load_or_default, save_data_from_simulation, save_to_json_string,
};
