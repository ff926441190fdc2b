//! Battle scene: game state, arena setup, the intro countdown that opens the
//! readiness gate, and the battle outcome.
//!
//! ## Lifecycle
//!
//! | Schedule | System | Effect |
//! |----------|--------|--------|
//! | `OnEnter(BossFight)` | [`spawn_battle_system`] | reset per-battle resources, spawn boss + player, close the gate |
//! | `Update` | [`intro_countdown_system`] | open the gate once the intro has elapsed |
//! | `Update` | [`battle_outcome_system`] | record victory / defeat |
//! | `OnExit(BossFight)` | [`close_gate_system`] | close the gate (entities are released by the combat plugin) |

use crate::boss::boss_bundle;
use crate::combat::CombatSystems;
use crate::config::CombatConfig;
use crate::context::{ArenaBounds, CombatClock, CombatRng, SceneReadiness};
use crate::events::{BossDefeated, PlayerDefeated};
use crate::health::HealCharges;
use crate::player::player_bundle;
use bevy::prelude::*;
use std::time::Duration;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Overworld,
    BossFight,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BattleOutcome {
    #[default]
    Pending,
    Victory,
    Defeat,
}

/// Combat-clock time at which the readiness gate opens.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroCountdown {
    pub opens_at: Duration,
}

pub struct BattleScenePlugin;

impl Plugin for BattleScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<BattleOutcome>()
            .add_systems(OnEnter(GameState::BossFight), spawn_battle_system)
            .add_systems(
                Update,
                (
                    intro_countdown_system.before(CombatSystems),
                    battle_outcome_system.after(CombatSystems),
                )
                    .run_if(in_state(GameState::BossFight)),
            )
            .add_systems(OnExit(GameState::BossFight), close_gate_system);
    }
}

/// Reset per-battle state and spawn the combatants: boss on the right,
/// player on the left, both at mid-height.
pub fn spawn_battle_system(
    mut commands: Commands,
    config: Res<CombatConfig>,
    clock: Res<CombatClock>,
) {
    let now = clock.now();
    let bounds = ArenaBounds::from_config(&config);
    let mid = bounds.center().y;

    commands.insert_resource(bounds);
    commands.insert_resource(HealCharges::from_config(&config));
    commands.insert_resource(CombatRng::from_config(&config));
    commands.insert_resource(SceneReadiness::default());
    commands.insert_resource(BattleOutcome::Pending);
    commands.insert_resource(IntroCountdown {
        opens_at: now + Duration::from_secs_f32(config.intro_duration_secs.max(0.0)),
    });

    commands.spawn(boss_bundle(
        &config,
        Vec2::new(config.arena_width * 0.75, mid),
        now,
    ));
    commands.spawn(player_bundle(&config, Vec2::new(config.arena_width * 0.25, mid)));

    info!(
        "Boss fight begins ({}×{} arena, intro {:.1}s)",
        config.arena_width, config.arena_height, config.intro_duration_secs
    );
}

/// Open the readiness gate once the intro countdown elapses.
pub fn intro_countdown_system(
    countdown: Option<Res<IntroCountdown>>,
    clock: Res<CombatClock>,
    mut readiness: ResMut<SceneReadiness>,
) {
    let Some(countdown) = countdown else {
        return;
    };
    if !readiness.is_ready() && clock.now() >= countdown.opens_at {
        readiness.set_ready(true);
        info!("Fight!");
    }
}

/// First outcome wins; later messages are ignored.
pub fn battle_outcome_system(
    mut victories: MessageReader<BossDefeated>,
    mut defeats: MessageReader<PlayerDefeated>,
    mut outcome: ResMut<BattleOutcome>,
) {
    let won = victories.read().count() > 0;
    let lost = defeats.read().count() > 0;
    if *outcome != BattleOutcome::Pending {
        return;
    }
    if won {
        *outcome = BattleOutcome::Victory;
        info!("Victory");
    } else if lost {
        *outcome = BattleOutcome::Defeat;
        info!("Defeat");
    }
}

pub fn close_gate_system(mut readiness: ResMut<SceneReadiness>) {
    readiness.set_ready(false);
}
