//! Two-phase dash attack.
//!
//! `Charging` is a stationary wind-up: the attack sits on the boss and grows
//! its telegraph ring.  After `charge_delay` of wall-clock time it switches to
//! `Dashing`, where it drives the boss's own `Transform` along a heading
//! fixed at spawn.  The dash ends at `max_distance`, at the arena edge (the
//! boss is left on the edge), or on its first (and only) hit.

use crate::boss::{Boss, Stage};
use crate::config::CombatConfig;
use crate::context::{ArenaBounds, CombatClock, SceneReadiness};
use crate::entity::{nearest_to, Terminal};
use crate::player::{PlayerCombatant, PlayerHealth};
use crate::projectile::heading;
use bevy::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargePhase {
    #[default]
    Charging,
    Dashing,
    Done,
}

#[derive(Component, Debug, Clone)]
pub struct ChargeAttack {
    /// The boss this charge moves while dashing.
    pub boss: Entity,
    pub phase: ChargePhase,
    pub charge_start: Duration,
    pub charge_delay: Duration,
    pub direction: Vec2,
    pub charge_speed: f32,
    pub distance_traveled: f32,
    pub max_distance: f32,
    pub hit_radius: f32,
    pub base_damage: f32,
    pub stage_three_modifier: f32,
    /// Current telegraph ring radius; grows during `Charging`.
    pub telegraph: f32,
    pub telegraph_max: f32,
    pub complete: bool,
}

impl ChargeAttack {
    pub fn new(
        boss: Entity,
        origin: Vec2,
        target: Vec2,
        now: Duration,
        config: &CombatConfig,
    ) -> Self {
        Self {
            boss,
            phase: ChargePhase::Charging,
            charge_start: now,
            charge_delay: config.charge_delay(),
            direction: heading(origin, target),
            charge_speed: config.charge_speed,
            distance_traveled: 0.0,
            max_distance: config.charge_max_distance,
            hit_radius: config.charge_hit_radius,
            base_damage: config.charge_damage,
            stage_three_modifier: config.charge_stage_three_modifier,
            telegraph: 0.0,
            telegraph_max: config.charge_telegraph_radius,
            complete: false,
        }
    }

    /// Telegraph radius after `elapsed` of wind-up, capped at `telegraph_max`.
    pub fn telegraph_radius(&self, elapsed: Duration) -> f32 {
        if self.charge_delay.is_zero() {
            return self.telegraph_max;
        }
        let progress = elapsed.as_secs_f32() / self.charge_delay.as_secs_f32();
        (progress * self.telegraph_max).min(self.telegraph_max)
    }

    /// `round(base × modifier)`; the modifier only applies in stage 3.
    pub fn damage_for(&self, stage: Stage) -> f32 {
        let modifier = if stage == Stage::Three {
            self.stage_three_modifier
        } else {
            1.0
        };
        (self.base_damage * modifier).round()
    }

    fn finish(&mut self) {
        self.phase = ChargePhase::Done;
        self.complete = true;
    }
}

impl Terminal for ChargeAttack {
    fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Advance every live charge by one tick.
#[allow(clippy::type_complexity)]
pub fn charge_attack_system(
    mut q_charges: Query<
        (&mut ChargeAttack, &mut Transform),
        (Without<Boss>, Without<PlayerCombatant>),
    >,
    mut q_bosses: Query<(&Boss, &mut Transform), (Without<ChargeAttack>, Without<PlayerCombatant>)>,
    mut q_players: Query<
        (Entity, &Transform, &mut PlayerHealth),
        (With<PlayerCombatant>, Without<Boss>, Without<ChargeAttack>),
    >,
    clock: Res<CombatClock>,
    bounds: Res<ArenaBounds>,
    readiness: Res<SceneReadiness>,
) {
    for (mut charge, mut transform) in q_charges.iter_mut() {
        if charge.complete {
            continue;
        }
        let Ok((boss, mut boss_transform)) = q_bosses.get_mut(charge.boss) else {
            // Owner gone; nothing left to drive.
            charge.finish();
            continue;
        };
        if boss.is_defeated() {
            continue;
        }

        match charge.phase {
            ChargePhase::Charging => {
                transform.translation.x = boss_transform.translation.x;
                transform.translation.y = boss_transform.translation.y;

                let elapsed = clock.since(charge.charge_start);
                charge.telegraph = charge.telegraph_radius(elapsed);
                if elapsed >= charge.charge_delay {
                    charge.phase = ChargePhase::Dashing;
                    info!("Reaper dashes");
                }
            }
            ChargePhase::Dashing => {
                let step = charge.direction * charge.charge_speed;
                boss_transform.translation.x += step.x;
                boss_transform.translation.y += step.y;
                let pos = boss_transform.translation.truncate();
                transform.translation.x = pos.x;
                transform.translation.y = pos.y;
                charge.distance_traveled += charge.charge_speed;

                if !bounds.contains(pos) {
                    // Stop on the edge, not past it.
                    let edge = bounds.clamp(pos);
                    boss_transform.translation.x = edge.x;
                    boss_transform.translation.y = edge.y;
                    transform.translation.x = edge.x;
                    transform.translation.y = edge.y;
                    charge.finish();
                    continue;
                }
                if charge.distance_traveled > charge.max_distance {
                    charge.finish();
                    continue;
                }
                if !readiness.is_ready() {
                    continue;
                }

                let players = q_players
                    .iter()
                    .map(|(e, t, _)| (e, t.translation.truncate()));
                let Some((player, _, distance)) = nearest_to(pos, players) else {
                    continue;
                };
                if distance <= charge.hit_radius {
                    if let Ok((_, _, mut health)) = q_players.get_mut(player) {
                        let damage = charge.damage_for(boss.stage);
                        health.take_damage(damage);
                        info!("Reaper dash hits for {damage}");
                    }
                    charge.finish();
                }
            }
            ChargePhase::Done => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::{boss_bundle, BossHealth};
    use crate::combat::test_app;
    use crate::entity::CombatKind;
    use crate::player::player_bundle;

    fn spawn_charge(app: &mut App, boss: Entity, target: Vec2, phase: ChargePhase) -> Entity {
        let config = CombatConfig::default();
        let origin = app
            .world()
            .get::<Transform>(boss)
            .unwrap()
            .translation
            .truncate();
        let now = app.world().resource::<CombatClock>().now();
        let mut charge = ChargeAttack::new(boss, origin, target, now, &config);
        charge.phase = phase;
        app.world_mut()
            .spawn((
                CombatKind::Charge,
                charge,
                Transform::from_translation(origin.extend(0.4)),
            ))
            .id()
    }

    fn boss_pos(app: &App, boss: Entity) -> Vec2 {
        app.world()
            .get::<Transform>(boss)
            .unwrap()
            .translation
            .truncate()
    }

    #[test]
    fn telegraph_grows_then_caps() {
        let config = CombatConfig::default();
        let owner = World::new().spawn_empty().id();
        let charge = ChargeAttack::new(owner, Vec2::ZERO, Vec2::X, Duration::ZERO, &config);
        assert_eq!(charge.telegraph_radius(Duration::ZERO), 0.0);
        assert!((charge.telegraph_radius(Duration::from_millis(250)) - 30.0).abs() < 1e-4);
        assert_eq!(charge.telegraph_radius(Duration::from_millis(900)), 60.0);
    }

    #[test]
    fn stage_three_bonus_rounds_half_up() {
        let config = CombatConfig::default();
        let owner = World::new().spawn_empty().id();
        let charge = ChargeAttack::new(owner, Vec2::ZERO, Vec2::X, Duration::ZERO, &config);
        assert_eq!(charge.damage_for(Stage::One), 25.0);
        assert_eq!(charge.damage_for(Stage::Two), 25.0);
        assert_eq!(charge.damage_for(Stage::Three), 38.0);
    }

    #[test]
    fn wind_up_pins_boss_then_dashes_after_delay() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(300.0, 300.0), Duration::ZERO))
            .id();
        let charge = spawn_charge(&mut app, boss, Vec2::new(600.0, 300.0), ChargePhase::Charging);

        app.world_mut()
            .resource_mut::<CombatClock>()
            .advance(Duration::from_millis(250));
        app.update();
        assert_eq!(boss_pos(&app, boss), Vec2::new(300.0, 300.0));
        let state = app.world().get::<ChargeAttack>(charge).unwrap();
        assert_eq!(state.phase, ChargePhase::Charging);
        assert!((state.telegraph - 30.0).abs() < 1e-3);

        app.world_mut()
            .resource_mut::<CombatClock>()
            .advance(Duration::from_millis(250));
        app.update();
        assert_eq!(
            app.world().get::<ChargeAttack>(charge).unwrap().phase,
            ChargePhase::Dashing
        );

        app.update();
        assert_eq!(boss_pos(&app, boss), Vec2::new(308.0, 300.0));
    }

    #[test]
    fn dash_hits_once_for_base_damage() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(400.0, 300.0), Duration::ZERO))
            .id();
        // After one 8 px step the player is 60 px away: inside the 80 px radius.
        let player = app
            .world_mut()
            .spawn(player_bundle(&config, Vec2::new(468.0, 300.0)))
            .id();
        let charge = spawn_charge(&mut app, boss, Vec2::new(900.0, 300.0), ChargePhase::Dashing);

        app.update();
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().health, 75.0);
        assert!(app.world().get::<ChargeAttack>(charge).unwrap().complete);

        app.update();
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().health, 75.0);
        assert!(app.world().get_entity(charge).is_err());
    }

    #[test]
    fn dash_hits_at_exactly_the_hit_radius() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(400.0, 300.0), Duration::ZERO))
            .id();
        // Boss steps to 408; the player at 488 is then exactly 80 px away.
        let player = app
            .world_mut()
            .spawn(player_bundle(&config, Vec2::new(488.0, 300.0)))
            .id();
        let charge = spawn_charge(&mut app, boss, Vec2::new(900.0, 300.0), ChargePhase::Dashing);

        app.update();
        assert_eq!(boss_pos(&app, boss), Vec2::new(408.0, 300.0));
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().health, 75.0);
        assert!(app.world().get::<ChargeAttack>(charge).unwrap().complete);
    }

    #[test]
    fn dash_off_the_arena_leaves_boss_on_the_edge() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(150.0, 300.0), Duration::ZERO))
            .id();
        let charge = spawn_charge(&mut app, boss, Vec2::new(5.0, 300.0), ChargePhase::Dashing);

        // 150 → 6 in 18 steps; the 19th would land on x = -2.
        for _ in 0..18 {
            app.update();
        }
        assert!(!app.world().get::<ChargeAttack>(charge).unwrap().complete);
        app.update();

        assert!(app.world().get_entity(charge).is_err());
        let pos = boss_pos(&app, boss);
        assert_eq!(pos, Vec2::new(0.0, 300.0));
        assert!(app.world().resource::<ArenaBounds>().contains(pos));
    }

    #[test]
    fn stage_three_dash_applies_bonus() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(400.0, 300.0), Duration::ZERO))
            .id();
        app.world_mut().get_mut::<BossHealth>(boss).unwrap().points = 300.0;
        let player = app
            .world_mut()
            .spawn(player_bundle(&config, Vec2::new(468.0, 300.0)))
            .id();
        spawn_charge(&mut app, boss, Vec2::new(900.0, 300.0), ChargePhase::Dashing);

        app.update();
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().health, 62.0);
    }

    #[test]
    fn dash_stops_at_travel_cap() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(100.0, 300.0), Duration::ZERO))
            .id();
        let charge = spawn_charge(&mut app, boss, Vec2::new(1000.0, 300.0), ChargePhase::Dashing);

        // 300 px cap at 8 px per tick: the 38th step crosses it.
        for _ in 0..37 {
            app.update();
        }
        assert!(!app.world().get::<ChargeAttack>(charge).unwrap().complete);
        app.update();
        assert!(app.world().get_entity(charge).is_err());
        assert_eq!(boss_pos(&app, boss), Vec2::new(404.0, 300.0));

        app.update();
        assert_eq!(boss_pos(&app, boss), Vec2::new(404.0, 300.0));
    }

    #[test]
    fn closed_gate_dash_moves_but_never_damages() {
        let mut app = test_app();
        app.insert_resource(SceneReadiness::default());
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(400.0, 300.0), Duration::ZERO))
            .id();
        let player = app
            .world_mut()
            .spawn(player_bundle(&config, Vec2::new(420.0, 300.0)))
            .id();
        let charge = spawn_charge(&mut app, boss, Vec2::new(900.0, 300.0), ChargePhase::Dashing);

        for _ in 0..4 {
            app.update();
        }
        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().health, 100.0);
        assert!(!app.world().get::<ChargeAttack>(charge).unwrap().complete);
        assert_eq!(boss_pos(&app, boss), Vec2::new(432.0, 300.0));
    }
}
