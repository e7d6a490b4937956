use std::fmt::Write as _;

use bevy::prelude::*;
use energy_idle::core::BANK_UNLOCK_COST;
use energy_idle::format::format_rate;
use energy_idle::{BuyAmount, CoreStatus, TreeKind, format_duration_ms, format_energy};

use super::resources::{
    HudText, NotificationText, Notifications, SessionState, ShopSelection, ShopText,
};
use super::state::SimRunState;

const TEXT_COLOR: Color = Color::srgb(0.94, 0.97, 0.99);
const NOTIFICATION_COLOR: Color = Color::srgb(0.98, 0.85, 0.35);

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("HudText"),
        HudText,
        Text::new("Initializing..."),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(10.0),
            ..default()
        },
    ));
    commands.spawn((
        Name::new("ShopText"),
        ShopText,
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(190.0),
            ..default()
        },
    ));
    commands.spawn((
        Name::new("NotificationText"),
        NotificationText,
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(NOTIFICATION_COLOR),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(12.0),
            top: Val::Px(10.0),
            ..default()
        },
    ));
}

pub fn refresh_hud(
    session: Res<SessionState>,
    run_state: Res<State<SimRunState>>,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut hud) = hud_query.get_single_mut() else {
        return;
    };

    let sim = &session.simulation;
    let scientific = session.settings.scientific_notation;
    let summary = sim.production_summary();

    let run_label = match run_state.get() {
        SimRunState::Running => "RUNNING",
        SimRunState::Paused => "PAUSED",
    };
    let core_line = match sim.core.status {
        CoreStatus::Charging => format!("Core: charging {:.0}%", sim.core.charge),
        CoreStatus::Ready => "Core: READY (C to discharge)".to_string(),
        CoreStatus::Active => format!(
            "Core: ACTIVE x{:.1} ({} left)",
            sim.core_params().boost_factor,
            format_duration_ms(sim.core.active_time_remaining_ms)
        ),
    };
    let bank_line = if sim.bank.unlocked {
        format!(
            "Bank: savings {}  loan {}  (D deposit half, W withdraw, L borrow, K repay)",
            format_energy(sim.bank.savings, scientific),
            format_energy(sim.bank.loan, scientific)
        )
    } else {
        format!(
            "Bank: locked (U to unlock for {})",
            format_energy(BANK_UNLOCK_COST, scientific)
        )
    };
    let save_line = session
        .last_save_error
        .as_deref()
        .map(|msg| format!("Save: {msg}"))
        .unwrap_or_else(|| "Save: OK (F5 save, F9 load, autosave on)".to_string());

    *hud = Text::new(format!(
        "Energy: {}  Production: {}  Click: {}  [{}]\nLifetime: {}  Boosters: +{:.0}%  Multiplier: x{:.2}\n{}\nAscension {}  Points {}  Shards {}  Upgrades {}  Next gain {}{}\n{}\n{}",
        format_energy(sim.resources.energy, scientific),
        format_rate(summary.effective_production, scientific),
        format_energy(summary.click_power, scientific),
        run_label,
        format_energy(sim.resources.total_generated, scientific),
        summary.booster_bonus_percent,
        summary.global_multiplier,
        core_line,
        sim.prestige.ascension_level,
        sim.prestige.ascension_points,
        sim.prestige.quantum_shards,
        sim.total_owned(),
        sim.pending_ascension_gain(),
        if sim.can_ascend() { " (A to ascend)" } else { "" },
        bank_line,
        save_line,
    ));
}

pub fn refresh_shop(
    session: Res<SessionState>,
    selection: Res<ShopSelection>,
    mut shop_query: Query<&mut Text, With<ShopText>>,
) {
    let Ok(mut shop) = shop_query.get_single_mut() else {
        return;
    };

    let sim = &session.simulation;
    let scientific = session.settings.scientific_notation;
    let mut body = String::from(
        "Space click | Up/Down select | B buy (Shift x10) | M max | T tier | P pause | N notation\n",
    );

    for (index, (definition, instance)) in sim.upgrade_entries().enumerate() {
        let marker = if index == selection.upgrade { ">" } else { " " };
        if !sim.is_visible(&definition.id) {
            let _ = writeln!(body, "{marker} ??? (locked)");
            continue;
        }
        let next = sim
            .next_cost(&definition.id)
            .map(|cost| format_energy(cost, scientific))
            .unwrap_or_default();
        let tier = sim
            .tier_cost(&definition.id)
            .map(|cost| {
                format!(
                    "  tier {} ready: {}",
                    instance.tier + 1,
                    format_energy(cost, scientific)
                )
            })
            .unwrap_or_default();
        let ten = sim
            .theoretical_cost(&definition.id, BuyAmount::Count(10))
            .map(|plan| format_energy(plan.total_cost, scientific))
            .unwrap_or_default();
        let _ = writeln!(
            body,
            "{marker} {} x{} (T{})  next {}  x10 {}{}",
            definition.name, instance.owned, instance.tier, next, ten, tier
        );
    }

    let (label, tree, purchased) = match selection.tree {
        TreeKind::Ascension => (
            "Ascension tree (points)",
            &sim.data.ascension_tree,
            &sim.prestige.purchased_ascension,
        ),
        TreeKind::Core => (
            "Core tree (shards)",
            &sim.data.core_tree,
            &sim.prestige.purchased_core,
        ),
    };
    let _ = writeln!(body, "\n{label}: Tab switch | Q/E select | Enter buy");
    for (index, node) in tree.nodes.iter().enumerate() {
        let marker = if index == selection.node { ">" } else { " " };
        let state = if purchased.contains(&node.id) {
            "owned".to_string()
        } else {
            format!("cost {}", node.cost)
        };
        let _ = writeln!(body, "{marker} {} [{state}]", node.name);
    }

    *shop = Text::new(body);
}

pub fn refresh_notifications(
    time: Res<Time>,
    mut notifications: ResMut<Notifications>,
    mut text_query: Query<&mut Text, With<NotificationText>>,
) {
    for (_, timer) in notifications.entries.iter_mut() {
        timer.tick(time.delta());
    }
    notifications
        .entries
        .retain(|(_, timer)| !timer.finished());

    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };
    let body = notifications
        .entries
        .iter()
        .map(|(message, _)| message.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    *text = Text::new(body);
}
