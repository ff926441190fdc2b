//! Damage/health bridge: healing, player defeat, and best-effort health-bar
//! reporting.
//!
//! Reporting keys off `Changed<…Health>`, so a bar refresh follows every
//! health mutation (damage, heal, or the initial spawn) within the same frame.

use crate::boss::BossHealth;
use crate::config::CombatConfig;
use crate::context::SceneReadiness;
use crate::events::{BarTint, HealRequested, HealthBar, HealthBarUpdate, PlayerDefeated};
use crate::player::{PlayerCombatant, PlayerHealth};
use bevy::prelude::*;

/// Per-battle heal pool.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HealCharges {
    pub remaining: u32,
    pub amount: f32,
}

impl HealCharges {
    pub fn from_config(config: &CombatConfig) -> Self {
        Self {
            remaining: config.heal_charges,
            amount: config.heal_amount,
        }
    }
}

impl FromWorld for HealCharges {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<CombatConfig>()
            .map(Self::from_config)
            .unwrap_or_else(|| Self::from_config(&CombatConfig::default()))
    }
}

/// Spend one heal per request.  Ignored while gated, when the pool is empty,
/// when the player is already full, or once the player is defeated.
pub fn heal_system(
    mut requests: MessageReader<HealRequested>,
    mut q_players: Query<(&PlayerCombatant, &mut PlayerHealth)>,
    mut charges: ResMut<HealCharges>,
    readiness: Res<SceneReadiness>,
) {
    for request in requests.read() {
        if !readiness.is_ready() || charges.remaining == 0 {
            continue;
        }
        let Ok((combatant, mut health)) = q_players.get_mut(request.player) else {
            continue;
        };
        if combatant.defeated || health.is_full() {
            continue;
        }
        let restored = health.heal(charges.amount);
        charges.remaining -= 1;
        info!(
            "Healed {restored} ({} heal(s) left, health {})",
            charges.remaining, health.health
        );
    }
}

/// Fire [`PlayerDefeated`] once when a player's health reaches zero.
pub fn player_defeat_system(
    mut q_players: Query<(Entity, &mut PlayerCombatant, &PlayerHealth)>,
    mut defeated: MessageWriter<PlayerDefeated>,
) {
    for (entity, mut combatant, health) in q_players.iter_mut() {
        if combatant.defeated || !health.is_depleted() {
            continue;
        }
        combatant.defeated = true;
        warn!("Player defeated");
        defeated.write(PlayerDefeated { player: entity });
    }
}

pub fn report_player_health_system(
    q: Query<&PlayerHealth, Changed<PlayerHealth>>,
    mut bars: MessageWriter<HealthBarUpdate>,
) {
    for health in q.iter() {
        bars.write(HealthBarUpdate {
            bar: HealthBar::Player,
            percent: health.percent(),
            tint: BarTint::Green,
        });
    }
}

pub fn report_boss_health_system(
    q: Query<&BossHealth, Changed<BossHealth>>,
    mut bars: MessageWriter<HealthBarUpdate>,
) {
    for health in q.iter() {
        let percent = health.percent();
        bars.write(HealthBarUpdate {
            bar: HealthBar::Boss,
            percent,
            tint: BarTint::for_percent(percent),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::boss_bundle;
    use crate::combat::test_app;
    use crate::player::player_bundle;
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct Reports {
        bars: Vec<HealthBarUpdate>,
        defeats: usize,
    }

    fn collect(
        mut bars: MessageReader<HealthBarUpdate>,
        mut defeats: MessageReader<PlayerDefeated>,
        mut reports: ResMut<Reports>,
    ) {
        reports.bars.extend(bars.read().copied());
        reports.defeats += defeats.read().count();
    }

    fn app_with_player(health: f32) -> (App, Entity) {
        let mut app = test_app();
        app.init_resource::<Reports>()
            .add_systems(PostUpdate, collect);
        let player = app
            .world_mut()
            .spawn(player_bundle(&CombatConfig::default(), Vec2::new(200.0, 300.0)))
            .id();
        app.world_mut().get_mut::<PlayerHealth>(player).unwrap().health = health;
        (app, player)
    }

    fn heal(app: &mut App, player: Entity) {
        app.world_mut().write_message(HealRequested { player });
        app.update();
    }

    #[test]
    fn heal_restores_up_to_max_and_spends_a_charge() {
        let (mut app, player) = app_with_player(60.0);

        heal(&mut app, player);
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().health, 85.0);
        heal(&mut app, player);
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().health, 100.0);
        assert_eq!(app.world().resource::<HealCharges>().remaining, 1);
    }

    #[test]
    fn full_health_heal_keeps_the_charge() {
        let (mut app, player) = app_with_player(100.0);
        heal(&mut app, player);
        assert_eq!(app.world().resource::<HealCharges>().remaining, 3);
    }

    #[test]
    fn heal_pool_runs_dry() {
        let (mut app, player) = app_with_player(10.0);
        for _ in 0..4 {
            heal(&mut app, player);
        }
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().health, 85.0);
        assert_eq!(app.world().resource::<HealCharges>().remaining, 0);
    }

    #[test]
    fn closed_gate_blocks_healing() {
        let (mut app, player) = app_with_player(50.0);
        app.insert_resource(SceneReadiness::default());
        heal(&mut app, player);
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().health, 50.0);
        assert_eq!(app.world().resource::<HealCharges>().remaining, 3);
    }

    #[test]
    fn player_defeat_reported_once() {
        let (mut app, player) = app_with_player(0.0);
        for _ in 0..4 {
            app.update();
        }
        assert_eq!(app.world().resource::<Reports>().defeats, 1);
        assert!(app.world().get::<PlayerCombatant>(player).unwrap().defeated);
    }

    #[test]
    fn health_changes_reach_the_bar_sink() {
        let (mut app, player) = app_with_player(100.0);
        let boss = app
            .world_mut()
            .spawn(boss_bundle(
                &CombatConfig::default(),
                Vec2::new(800.0, 300.0),
                Duration::ZERO,
            ))
            .id();
        app.update();
        app.world_mut().resource_mut::<Reports>().bars.clear();

        app.world_mut().get_mut::<PlayerHealth>(player).unwrap().health = 50.0;
        app.world_mut().get_mut::<BossHealth>(boss).unwrap().points = 750.0;
        app.update();

        let bars = &app.world().resource::<Reports>().bars;
        assert!(bars.contains(&HealthBarUpdate {
            bar: HealthBar::Player,
            percent: 50.0,
            tint: BarTint::Green,
        }));
        assert!(bars.contains(&HealthBarUpdate {
            bar: HealthBar::Boss,
            percent: 50.0,
            tint: BarTint::Maroon,
        }));

        // Nothing changed: nothing reported.
        app.world_mut().resource_mut::<Reports>().bars.clear();
        app.update();
        assert!(app.world().resource::<Reports>().bars.is_empty());
    }
}
