//! Combat plugin: registers resources and messages, and schedules the
//! per-tick combat pipeline.
//!
//! ## Pipeline (one chained `Update` pass while in `GameState::BossFight`)
//!
//! | # | System | Role |
//! |---|--------|------|
//! | 1 | `boss_stage_system` | stage / interval / anger refresh, defeat detection |
//! | 2 | `boss_chase_system` | optional idle drift |
//! | 3 | `projectile_flight_system` | move projectiles, resolve hits |
//! | 4 | `charge_attack_system` | wind-up / dash, resolve hit |
//! | 5 | `slash_effect_system` | age slash effects |
//! | 6 | `boss_roster_system` | prune boss lists, release `is_charging` |
//! | 7 | `boss_attack_system` | cadence + attack selection |
//! | 8 | `player_movement_system` | step players inside the arena |
//! | 9 | `player_facing_system` | facing from horizontal velocity |
//! | 10 | `player_attack_system` | melee / arrow dispatch |
//! | 11 | `player_projectile_roster_system` | prune player arrow lists |
//! | 12 | `heal_system` | heal requests |
//! | 13 | `player_defeat_system` | one-shot defeat message |
//! | 14–15 | `report_*_health_system` | health-bar sink |
//!
//! Finished primitives are despawned in `PostUpdate` by
//! [`despawn_completed`], after the whole pass has run.

use crate::boss::{
    boss_attack_system, boss_chase_system, boss_roster_system, boss_stage_system,
};
use crate::charge::{charge_attack_system, ChargeAttack};
use crate::config::CombatConfig;
use crate::context::{tick_combat_clock_system, ArenaBounds, CombatClock, CombatRng, SceneReadiness};
use crate::effect::{slash_effect_system, SlashEffect};
use crate::entity::{despawn_completed, CombatKind};
use crate::events::{
    AttackRequested, BossDefeated, HealRequested, HealthBarUpdate, PlayerDefeated,
};
use crate::health::{
    heal_system, player_defeat_system, report_boss_health_system, report_player_health_system,
    HealCharges,
};
use crate::player::{
    player_attack_system, player_facing_system, player_movement_system,
    player_projectile_roster_system,
};
use crate::projectile::{projectile_flight_system, Projectile};
use crate::scene::GameState;
use bevy::prelude::*;
use bevy::time::TimeSystems;

/// The chained combat pass; input systems order themselves before it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombatSystems;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatConfig>()
            .init_resource::<ArenaBounds>()
            .init_resource::<SceneReadiness>()
            .init_resource::<CombatClock>()
            .init_resource::<CombatRng>()
            .init_resource::<HealCharges>()
            .add_message::<HealthBarUpdate>()
            .add_message::<BossDefeated>()
            .add_message::<PlayerDefeated>()
            .add_message::<AttackRequested>()
            .add_message::<HealRequested>()
            .add_systems(First, tick_combat_clock_system.after(TimeSystems))
            .add_systems(
                Update,
                (
                    boss_stage_system,
                    boss_chase_system,
                    projectile_flight_system,
                    charge_attack_system,
                    slash_effect_system,
                    boss_roster_system,
                    boss_attack_system,
                    player_movement_system,
                    player_facing_system,
                    player_attack_system,
                    player_projectile_roster_system,
                    heal_system,
                    player_defeat_system,
                    report_player_health_system,
                    report_boss_health_system,
                )
                    .chain()
                    .in_set(CombatSystems)
                    .run_if(in_state(GameState::BossFight)),
            )
            .add_systems(
                PostUpdate,
                (
                    despawn_completed::<Projectile>,
                    despawn_completed::<ChargeAttack>,
                    despawn_completed::<SlashEffect>,
                ),
            )
            .add_systems(OnExit(GameState::BossFight), teardown_combat_system);
    }
}

/// Despawn every combat participant when the fight scene is left.
pub fn teardown_combat_system(mut commands: Commands, q: Query<Entity, With<CombatKind>>) {
    let mut count = 0;
    for entity in q.iter() {
        commands.entity(entity).try_despawn();
        count += 1;
    }
    info!("Combat teardown: {count} entities released");
}

/// Headless app with the combat pipeline live, the gate open, a seeded RNG
/// and a manual clock at zero.
#[cfg(test)]
pub(crate) fn test_app() -> App {
    use bevy::state::app::StatesPlugin;
    use std::time::Duration;

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_state(GameState::BossFight)
        .insert_resource(CombatConfig::default())
        .insert_resource(CombatClock::manual(Duration::ZERO))
        .insert_resource(SceneReadiness::ready())
        .insert_resource(CombatRng::seeded(7))
        .add_plugins(CombatPlugin);
    app
}
