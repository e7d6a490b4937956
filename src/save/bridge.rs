use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::warn;

use crate::Simulation;
use crate::core::{FULL_CHARGE, MAX_UPGRADE_LEVEL, TIER_INTERVAL};
use crate::data::GameData;
use crate::model::{CoreState, CoreStatus, Settings};

use super::{SAVE_VERSION, SaveData, SaveLedger, SavePrestige, decode_save};

pub fn save_data_from_simulation(sim: &Simulation, settings: &Settings) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        ledger: SaveLedger {
            energy: sim.resources.energy,
            total_generated: sim.resources.total_generated,
            generated_this_run: sim.resources.generated_this_run,
        },
        upgrades: sim.upgrades.clone(),
        core: sim.core,
        prestige: SavePrestige {
            ascension_level: sim.prestige.ascension_level,
            ascension_points: sim.prestige.ascension_points,
            quantum_shards: sim.prestige.quantum_shards,
            purchased_ascension: sim.prestige.purchased_ascension.iter().cloned().collect(),
            purchased_core: sim.prestige.purchased_core.iter().cloned().collect(),
        },
        achievements: sim.achievements.unlocked.iter().cloned().collect(),
        bank: sim.bank,
        total_clicks: sim.total_clicks,
        total_ticks: sim.tick_index,
        settings: *settings,
    }
}

/// Restores `save` into `sim`. Out-of-range values are clamped and unknown ids
/// are skipped; on error `sim` is left as it was.
pub fn apply_save_data(sim: &mut Simulation, save: &SaveData) -> Result<()> {
    if save.version > SAVE_VERSION {
        bail!(
            "save version {} is newer than supported version {SAVE_VERSION}",
            save.version
        );
    }
    let ledger = &save.ledger;
    if ![ledger.energy, ledger.total_generated, ledger.generated_this_run]
        .iter()
        .all(|value| value.is_finite())
    {
        bail!("save ledger holds a non-finite value");
    }

    let mut restored = Simulation::new(Arc::clone(&sim.data));

    let max_energy = restored.resources.max_energy;
    restored.resources.energy = match max_energy {
        Some(max) => ledger.energy.clamp(0.0, max),
        None => ledger.energy.max(0.0),
    };
    restored.resources.total_generated = ledger.total_generated.max(0.0);
    restored.resources.generated_this_run = ledger
        .generated_this_run
        .clamp(0.0, restored.resources.total_generated);

    for entry in &save.upgrades {
        let Some(index) = restored.data.upgrades.index_of(&entry.id) else {
            warn!(id = %entry.id, "skipping unknown upgrade in save");
            continue;
        };
        let instance = &mut restored.upgrades[index];
        instance.owned = entry.owned.min(MAX_UPGRADE_LEVEL);
        instance.tier = entry.tier.min(instance.owned / TIER_INTERVAL);
        instance.next_level_cost_override = entry
            .next_level_cost_override
            .filter(|cost| cost.is_finite() && *cost >= 0.0);
    }

    restored.core = sanitize_core(save.core);

    let prestige = &save.prestige;
    restored.prestige.ascension_level = prestige.ascension_level;
    restored.prestige.ascension_points = prestige.ascension_points;
    restored.prestige.quantum_shards = prestige.quantum_shards;
    restored.prestige.purchased_ascension.extend(
        prestige
            .purchased_ascension
            .iter()
            .filter(|id| restored.data.ascension_tree.get(id).is_some())
            .cloned(),
    );
    restored.prestige.purchased_core.extend(
        prestige
            .purchased_core
            .iter()
            .filter(|id| restored.data.core_tree.get(id).is_some())
            .cloned(),
    );

    restored.achievements.unlocked.extend(
        save.achievements
            .iter()
            .filter(|id| {
                restored
                    .data
                    .achievements
                    .achievements
                    .iter()
                    .any(|entry| &entry.id == *id)
            })
            .cloned(),
    );

    restored.bank = save.bank;
    restored.bank.savings = non_negative(restored.bank.savings);
    restored.bank.loan = non_negative(restored.bank.loan);
    restored.total_clicks = save.total_clicks;
    restored.tick_index = save.total_ticks;

    *sim = restored;
    Ok(())
}

/// Decodes and applies a JSON or base64 snapshot, falling back to a fresh game.
pub fn load_or_default(data: Arc<GameData>, text: &str) -> (Simulation, Settings) {
    let mut sim = Simulation::new(data);
    let loaded = decode_save(text).and_then(|save| {
        apply_save_data(&mut sim, &save)?;
        Ok(save.settings)
    });
    match loaded {
        Ok(settings) => (sim, settings),
        Err(err) => {
            warn!("discarding unreadable save: {err:#}");
            (sim, Settings::default())
        }
    }
}

fn sanitize_core(core: CoreState) -> CoreState {
    let charge = non_negative(core.charge).min(FULL_CHARGE);
    let remaining = non_negative(core.active_time_remaining_ms);
    let mut sanitized = CoreState {
        charge,
        active_time_remaining_ms: remaining,
        ..core
    };
    match core.status {
        CoreStatus::Active if remaining <= 0.0 => {
            sanitized.status = CoreStatus::Charging;
            sanitized.charge = 0.0;
        }
        CoreStatus::Ready if charge < FULL_CHARGE => sanitized.status = CoreStatus::Charging,
        CoreStatus::Charging if charge >= FULL_CHARGE => sanitized.status = CoreStatus::Ready,
        _ => {}
    }
    if sanitized.status != CoreStatus::Active {
        sanitized.active_time_remaining_ms = 0.0;
    }
    sanitized
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
