mod bridge;
mod codec;
mod model;

pub use bridge::{apply_save_data, load_or_default, save_data_from_simulation};
pub use codec::{
    decode_save, export_to_base64, import_from_base64, load_from_json_string, save_to_json_string,
};
pub use model::{SAVE_VERSION, SaveData, SaveLedger, SavePrestige};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{
        SAVE_VERSION, SaveData, SaveLedger, SavePrestige, apply_save_data, decode_save,
        export_to_base64, import_from_base64, load_from_json_string, load_or_default,
        save_data_from_simulation, save_to_json_string,
    };
    use crate::core::{BankAccount, BuyAmount, Command};
    use crate::data::{GameData, load_bundled_game_data};
    use crate::model::{CoreState, CoreStats, CoreStatus, Settings, UpgradeInstance};
    use crate::Simulation;

    fn bundled() -> Arc<GameData> {
        Arc::new(load_bundled_game_data().expect("bundled data should load"))
    }

    fn sample_save() -> SaveData {
        SaveData {
            version: SAVE_VERSION,
            ledger: SaveLedger {
                energy: 1234.5,
                total_generated: 98_765.0,
                generated_this_run: 4321.0,
            },
            upgrades: vec![UpgradeInstance {
                id: "solar_cell".to_string(),
                owned: 23,
                tier: 2,
                next_level_cost_override: Some(540.0),
            }],
            core: CoreState {
                charge: 40.0,
                status: CoreStatus::Charging,
                active_time_remaining_ms: 0.0,
                stats: CoreStats { activations: 3 },
            },
            prestige: SavePrestige {
                ascension_level: 2,
                ascension_points: 7,
                quantum_shards: 4,
                purchased_ascension: vec!["origin".to_string(), "efficient_grid".to_string()],
                purchased_core: vec!["core_origin".to_string()],
            },
            achievements: vec!["first_spark".to_string()],
            bank: BankAccount {
                unlocked: true,
                savings: 50.0,
                loan: 0.0,
            },
            total_clicks: 77,
            total_ticks: 4200,
            settings: Settings {
                scientific_notation: true,
                ..Settings::default()
            },
        }
    }

    #[test]
    fn save_json_round_trip() {
        let original = sample_save();
        let json = save_to_json_string(&original).expect("save JSON should serialize");
        let restored = load_from_json_string(&json).expect("save JSON should deserialize");

        assert_eq!(restored, original);
    }

    #[test]
    fn save_base64_round_trip() {
        let original = sample_save();
        let encoded = export_to_base64(&original).expect("save should export to base64");
        let restored = import_from_base64(&encoded).expect("save should import from base64");

        assert_eq!(restored, original);
    }

    #[test]
    fn wrapped_exports_and_either_format_decode() {
        let original = sample_save();
        let encoded = export_to_base64(&original).expect("save should export to base64");
        let wrapped = encoded
            .as_bytes()
            .chunks(60)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        let json = save_to_json_string(&original).expect("save JSON should serialize");

        assert_eq!(decode_save(&wrapped).expect("wrapped export decodes"), original);
        assert_eq!(decode_save(&json).expect("JSON decodes"), original);
        assert!(decode_save("%%%").is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let save = load_from_json_string(r#"{"total_clicks": 5}"#).expect("partial save parses");

        assert_eq!(save.total_clicks, 5);
        assert_eq!(save.version, SAVE_VERSION);
        assert!(save.upgrades.is_empty());
    }

    #[test]
    fn simulation_bridge_round_trip() {
        let mut sim = Simulation::new(bundled());
        for _ in 0..40 {
            sim.apply(Command::Click).expect("click should apply");
        }
        sim.apply(Command::BuyUpgrade {
            id: "solar_cell".to_string(),
            amount: BuyAmount::Max,
        })
        .expect("purchase should apply");
        for _ in 0..25 {
            sim.apply(Command::Tick { delta_ms: 100.0 })
                .expect("tick should apply");
        }

        let save = save_data_from_simulation(&sim, &Settings::default());
        let mut restored = Simulation::new(bundled());
        apply_save_data(&mut restored, &save).expect("save apply should succeed");

        // Per-tick deltas are transient and not persisted.
        restored.resources.tick_deltas = sim.resources.tick_deltas;
        assert_eq!(restored, sim);
    }

    #[test]
    fn restore_clamps_and_skips_unknown_ids() {
        let mut save = sample_save();
        save.ledger.energy = -10.0;
        save.upgrades.push(UpgradeInstance {
            id: "retired_upgrade".to_string(),
            owned: 4,
            tier: 0,
            next_level_cost_override: None,
        });
        save.upgrades[0].tier = 9;
        save.core.charge = 250.0;
        save.prestige.purchased_ascension.push("ghost_node".to_string());
        save.achievements.push("ghost_achievement".to_string());

        let mut sim = Simulation::new(bundled());
        apply_save_data(&mut sim, &save).expect("save apply should succeed");

        assert_eq!(sim.resources.energy, 0.0);
        let (_, solar) = sim.upgrade("solar_cell").expect("solar cell exists");
        assert_eq!(solar.owned, 23);
        assert_eq!(solar.tier, 2);
        assert_eq!(sim.core.charge, 100.0);
        assert_eq!(sim.core.status, CoreStatus::Ready);
        assert!(!sim.prestige.purchased_ascension.contains("ghost_node"));
        assert!(sim.prestige.purchased_ascension.contains("efficient_grid"));
        assert!(!sim.achievements.is_unlocked("ghost_achievement"));
        assert!(sim.achievements.is_unlocked("first_spark"));
    }

    #[test]
    fn rejected_restore_leaves_simulation_untouched() {
        let mut sim = Simulation::new(bundled());
        sim.apply(Command::Click).expect("click should apply");
        let before = sim.clone();

        let mut save = sample_save();
        save.version = SAVE_VERSION + 1;
        assert!(apply_save_data(&mut sim, &save).is_err());

        let mut save = sample_save();
        save.ledger.total_generated = f64::NAN;
        assert!(apply_save_data(&mut sim, &save).is_err());

        assert_eq!(sim, before);
    }

    #[test]
    fn unreadable_save_yields_fresh_game() {
        let data = bundled();
        let (sim, settings) = load_or_default(Arc::clone(&data), "not json at all");

        assert_eq!(sim, Simulation::new(data));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn readable_save_restores_settings() {
        let json = save_to_json_string(&sample_save()).expect("save JSON should serialize");
        let (sim, settings) = load_or_default(bundled(), &json);

        assert!(settings.scientific_notation);
        assert_eq!(sim.total_clicks, 77);
        assert_eq!(sim.prestige.ascension_level, 2);
    }
}
