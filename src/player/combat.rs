//! Player attack dispatch, facing, movement, and arrow bookkeeping.
//!
//! ## Attack dispatch
//!
//! | Distance to nearest live boss | Effect |
//! |---|---|
//! | `< melee_range` | melee damage straight to boss health + slash effect |
//! | otherwise | one arrow toward `position ± arrow_aim_distance` along facing |
//!
//! Requests inside the cooldown window are dropped.  With no live boss the
//! request is dropped and the cooldown timer is left untouched.

use super::state::{Facing, PlayerCombatant, PlayerHealth, PlayerMotion};
use crate::boss::{Boss, BossHealth};
use crate::config::CombatConfig;
use crate::context::{ArenaBounds, CombatClock, SceneReadiness};
use crate::effect::SlashEffect;
use crate::entity::{nearest_to, CombatKind};
use crate::events::AttackRequested;
use crate::projectile::Projectile;
use bevy::prelude::*;

// ── Attack ────────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn player_attack_system(
    mut commands: Commands,
    mut requests: MessageReader<AttackRequested>,
    mut q_players: Query<(&mut PlayerCombatant, &PlayerHealth, &Transform), Without<Boss>>,
    mut q_bosses: Query<(Entity, &Boss, &mut BossHealth, &Transform), Without<PlayerCombatant>>,
    clock: Res<CombatClock>,
    readiness: Res<SceneReadiness>,
    config: Res<CombatConfig>,
) {
    let now = clock.now();
    for request in requests.read() {
        let Ok((mut combatant, health, transform)) = q_players.get_mut(request.player) else {
            continue;
        };
        if combatant.defeated || health.is_depleted() || !combatant.cooldown_ready(now) {
            continue;
        }

        let pos = transform.translation.truncate();
        let bosses = q_bosses
            .iter()
            .filter(|(_, boss, _, _)| !boss.is_defeated())
            .map(|(e, _, _, t)| (e, t.translation.truncate()));
        let Some((boss, boss_pos, distance)) = nearest_to(pos, bosses) else {
            continue;
        };

        combatant.last_attack_time = Some(now);

        if distance < config.melee_range {
            if readiness.is_ready() {
                if let Ok((_, _, mut boss_health, _)) = q_bosses.get_mut(boss) {
                    boss_health.take_damage(config.melee_damage);
                    debug!("Melee hit for {}", config.melee_damage);
                }
            }
            let slash_at = pos.lerp(boss_pos, 0.5);
            commands.spawn((
                CombatKind::Effect,
                SlashEffect::new(combatant.facing, config.slash_lifetime_ticks),
                Transform::from_translation(slash_at.extend(0.7)),
            ));
        } else {
            let target = pos + Vec2::X * combatant.facing.sign() * config.arrow_aim_distance;
            let arrow = Projectile::arrow(request.player, pos, target, &config);
            let id = commands
                .spawn((
                    CombatKind::Projectile,
                    arrow,
                    Transform::from_translation(pos.extend(0.3)),
                ))
                .id();
            combatant.active_projectiles.push(id);
        }
    }
}

/// Drop finished arrows from each player's list.
pub fn player_projectile_roster_system(
    mut q_players: Query<&mut PlayerCombatant>,
    q_projectiles: Query<&Projectile>,
) {
    for mut combatant in q_players.iter_mut() {
        combatant
            .active_projectiles
            .retain(|e| q_projectiles.get(*e).is_ok_and(|p| !p.complete));
    }
}

// ── Facing / movement ─────────────────────────────────────────────────────────

/// Track the sign of the last non-zero horizontal velocity.
pub fn player_facing_system(mut q: Query<(&mut PlayerCombatant, &PlayerMotion)>) {
    for (mut combatant, motion) in q.iter_mut() {
        if let Some(facing) = Facing::from_velocity(motion.velocity.x) {
            if combatant.facing != facing {
                combatant.facing = facing;
            }
        }
    }
}

/// Step each living player by `velocity × player_step`, clamped to the arena.
pub fn player_movement_system(
    mut q: Query<(&PlayerCombatant, &PlayerMotion, &mut Transform)>,
    bounds: Res<ArenaBounds>,
    config: Res<CombatConfig>,
) {
    for (combatant, motion, mut transform) in q.iter_mut() {
        if combatant.defeated || motion.velocity == Vec2::ZERO {
            continue;
        }
        let next = bounds.clamp(transform.translation.truncate() + motion.velocity * config.player_step);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}
