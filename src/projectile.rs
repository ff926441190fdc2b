//! Ballistic attack primitive shared by boss fireballs and player arrows.
//!
//! A projectile computes its heading once at spawn and never re-aims.  Each
//! tick it advances `speed` pixels, then (gate permitting) tests the opposing
//! side for a hit within `hit_distance`.  The first hit applies
//! `round(damage × damage_multiplier)` and completes the projectile; leaving
//! the arena or exceeding `max_range` completes it without damage.

use crate::boss::{Boss, BossHealth};
use crate::config::CombatConfig;
use crate::context::{ArenaBounds, SceneReadiness};
use crate::entity::{nearest_to, Terminal};
use crate::player::{PlayerCombatant, PlayerHealth};
use bevy::prelude::*;

/// Which side fired the projectile, and therefore which side it can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    BossFireball,
    PlayerRanged,
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// The boss or player that fired it.
    pub owner: Entity,
    pub source: Vec2,
    /// Aim point; only used to derive `direction`.
    pub target: Vec2,
    /// Unit heading, fixed at spawn.
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub damage_multiplier: f32,
    pub hit_distance: f32,
    pub max_range: f32,
    pub traveled: f32,
    pub complete: bool,
}

impl Projectile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: ProjectileKind,
        owner: Entity,
        source: Vec2,
        target: Vec2,
        speed: f32,
        damage: f32,
        hit_distance: f32,
        max_range: f32,
    ) -> Self {
        Self {
            kind,
            owner,
            source,
            target,
            direction: heading(source, target),
            speed,
            damage,
            damage_multiplier: 1.0,
            hit_distance,
            max_range,
            traveled: 0.0,
            complete: false,
        }
    }

    /// Boss fireball carrying the boss's anger multiplier at spawn time.
    pub fn fireball(
        owner: Entity,
        source: Vec2,
        target: Vec2,
        anger_modifier: f32,
        config: &CombatConfig,
    ) -> Self {
        Self {
            damage_multiplier: anger_modifier,
            ..Self::new(
                ProjectileKind::BossFireball,
                owner,
                source,
                target,
                config.fireball_speed,
                config.fireball_damage,
                config.fireball_hit_distance,
                config.fireball_max_range,
            )
        }
    }

    pub fn arrow(owner: Entity, source: Vec2, target: Vec2, config: &CombatConfig) -> Self {
        Self::new(
            ProjectileKind::PlayerRanged,
            owner,
            source,
            target,
            config.arrow_speed,
            config.ranged_damage,
            config.arrow_hit_distance,
            config.arrow_max_range,
        )
    }

    /// Damage dealt on hit, rounded to whole points.
    #[inline]
    pub fn hit_damage(&self) -> f32 {
        (self.damage * self.damage_multiplier).round()
    }

    /// Advance one step; returns the new position.
    pub fn step(&mut self, position: Vec2) -> Vec2 {
        self.traveled += self.speed;
        position + self.direction * self.speed
    }
}

impl Terminal for Projectile {
    fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Unit vector from `from` toward `to` via `atan2`; a zero offset heads +X.
pub fn heading(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    Vec2::from_angle(delta.y.atan2(delta.x))
}

/// Move every live projectile and resolve hits.
///
/// Fireballs owned by a defeated boss are frozen.  Arrows never hit a
/// defeated boss.
pub fn projectile_flight_system(
    mut q_projectiles: Query<
        (&mut Projectile, &mut Transform),
        (Without<Boss>, Without<PlayerCombatant>),
    >,
    mut q_players: Query<(Entity, &Transform, &mut PlayerHealth), With<PlayerCombatant>>,
    mut q_bosses: Query<(Entity, &Boss, &mut BossHealth, &Transform)>,
    bounds: Res<ArenaBounds>,
    readiness: Res<SceneReadiness>,
) {
    for (mut projectile, mut transform) in q_projectiles.iter_mut() {
        if projectile.complete {
            continue;
        }
        if projectile.kind == ProjectileKind::BossFireball
            && q_bosses
                .get(projectile.owner)
                .is_ok_and(|(_, boss, _, _)| boss.is_defeated())
        {
            continue;
        }

        let pos = projectile.step(transform.translation.truncate());
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;

        if readiness.is_ready() {
            let damage = projectile.hit_damage();
            let hit = match projectile.kind {
                ProjectileKind::BossFireball => {
                    let players = q_players
                        .iter()
                        .map(|(e, t, _)| (e, t.translation.truncate()));
                    match nearest_to(pos, players) {
                        Some((player, _, d)) if d < projectile.hit_distance => {
                            if let Ok((_, _, mut health)) = q_players.get_mut(player) {
                                health.take_damage(damage);
                                debug!("Fireball hit for {damage}");
                            }
                            true
                        }
                        _ => false,
                    }
                }
                ProjectileKind::PlayerRanged => {
                    let bosses = q_bosses
                        .iter()
                        .filter(|(_, boss, _, _)| !boss.is_defeated())
                        .map(|(e, _, _, t)| (e, t.translation.truncate()));
                    match nearest_to(pos, bosses) {
                        Some((boss, _, d)) if d < projectile.hit_distance => {
                            if let Ok((_, _, mut health, _)) = q_bosses.get_mut(boss) {
                                health.take_damage(damage);
                                debug!("Arrow hit for {damage}");
                            }
                            true
                        }
                        _ => false,
                    }
                }
            };
            if hit {
                projectile.complete = true;
                continue;
            }
        }

        if projectile.traveled > projectile.max_range || !bounds.contains(pos) {
            projectile.complete = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::boss_bundle;
    use crate::combat::test_app;
    use crate::player::player_bundle;
    use std::time::Duration;

    fn spawn_projectile(app: &mut App, projectile: Projectile) -> Entity {
        let origin = projectile.source;
        app.world_mut()
            .spawn((
                crate::entity::CombatKind::Projectile,
                projectile,
                Transform::from_translation(origin.extend(0.3)),
            ))
            .id()
    }

    fn position(app: &App, entity: Entity) -> Vec2 {
        app.world()
            .get::<Transform>(entity)
            .unwrap()
            .translation
            .truncate()
    }

    #[test]
    fn heading_is_unit_length_and_defaults_along_x() {
        let h = heading(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert!((h - Vec2::new(0.6, 0.8)).length() < 1e-5);
        assert!((heading(Vec2::ONE, Vec2::ONE) - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn fireball_damage_scales_with_anger() {
        let config = CombatConfig::default();
        let owner = World::new().spawn_empty().id();
        let calm = Projectile::fireball(owner, Vec2::ZERO, Vec2::X, 1.0, &config);
        let angry = Projectile::fireball(owner, Vec2::ZERO, Vec2::X, 2.0, &config);
        assert_eq!(calm.hit_damage(), config.fireball_damage);
        assert_eq!(angry.hit_damage(), config.fireball_damage * 2.0);
    }

    #[test]
    fn projectile_keeps_its_spawn_heading() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let player = app
            .world_mut()
            .spawn(player_bundle(&config, Vec2::new(900.0, 100.0)))
            .id();
        let arrow = Projectile::arrow(player, Vec2::new(100.0, 300.0), Vec2::new(600.0, 300.0), &config);
        let id = spawn_projectile(&mut app, arrow);

        // Moving the player must not bend the flight path.
        app.world_mut()
            .get_mut::<Transform>(player)
            .unwrap()
            .translation = Vec3::new(100.0, 500.0, 0.0);
        for _ in 0..3 {
            app.update();
        }

        let pos = position(&app, id);
        assert!((pos.y - 300.0).abs() < 1e-4);
        assert!((pos.x - (100.0 + 3.0 * config.arrow_speed)).abs() < 1e-3);
    }

    #[test]
    fn fireball_hits_player_once_and_completes() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(800.0, 300.0), Duration::ZERO))
            .id();
        let player = app
            .world_mut()
            .spawn(player_bundle(&config, Vec2::new(300.0, 300.0)))
            .id();
        // Source just outside the hit distance.
        let fireball = Projectile::fireball(
            boss,
            Vec2::new(345.0, 300.0),
            Vec2::new(300.0, 300.0),
            2.0,
            &config,
        );
        let id = spawn_projectile(&mut app, fireball);

        app.update();
        assert!(app.world().get::<Projectile>(id).unwrap().complete);
        let health = app.world().get::<PlayerHealth>(player).unwrap();
        assert_eq!(health.health, 100.0 - 2.0 * config.fireball_damage);

        // Despawned in PostUpdate; nothing further is applied.
        app.update();
        assert!(app.world().get_entity(id).is_err());
        let health = app.world().get::<PlayerHealth>(player).unwrap();
        assert_eq!(health.health, 100.0 - 2.0 * config.fireball_damage);
    }

    #[test]
    fn closed_gate_lets_projectile_pass_through_harmlessly() {
        let mut app = test_app();
        app.insert_resource(SceneReadiness::default());
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(900.0, 300.0), Duration::ZERO))
            .id();
        let player = app
            .world_mut()
            .spawn(player_bundle(&config, Vec2::new(300.0, 300.0)))
            .id();
        let fireball = Projectile::fireball(
            boss,
            Vec2::new(310.0, 300.0),
            Vec2::new(0.0, 300.0),
            1.0,
            &config,
        );
        let id = spawn_projectile(&mut app, fireball);

        for _ in 0..5 {
            app.update();
        }

        assert_eq!(app.world().get::<PlayerHealth>(player).unwrap().health, 100.0);
        assert!(position(&app, id).x < 300.0);
    }

    #[test]
    fn projectile_expires_at_arena_edge_without_damage() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let player = app
            .world_mut()
            .spawn(player_bundle(&config, Vec2::new(500.0, 300.0)))
            .id();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(900.0, 500.0), Duration::ZERO))
            .id();
        let arrow = Projectile::arrow(player, Vec2::new(10.0, 100.0), Vec2::new(-500.0, 100.0), &config);
        let id = spawn_projectile(&mut app, arrow);

        for _ in 0..3 {
            app.update();
        }

        assert!(app.world().get_entity(id).is_err());
        assert_eq!(
            app.world().get::<BossHealth>(boss).unwrap().points,
            config.boss_initial_health
        );
    }

    #[test]
    fn projectile_expires_past_max_range() {
        let mut app = test_app();
        let config = CombatConfig {
            arrow_max_range: 25.0,
            ..Default::default()
        };
        let owner = app.world_mut().spawn_empty().id();
        let arrow = Projectile::arrow(owner, Vec2::new(100.0, 300.0), Vec2::new(900.0, 300.0), &config);
        let id = spawn_projectile(&mut app, arrow);

        // 10, 20, 30 px: expires on the third step.
        app.update();
        app.update();
        assert!(!app.world().get::<Projectile>(id).unwrap().complete);
        app.update();
        assert!(app.world().get_entity(id).is_err());
    }

    #[test]
    fn arrow_ignores_defeated_boss() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(400.0, 300.0), Duration::ZERO))
            .id();
        app.world_mut().get_mut::<BossHealth>(boss).unwrap().points = 0.0;
        app.update();

        let owner = app.world_mut().spawn_empty().id();
        let arrow = Projectile::arrow(owner, Vec2::new(380.0, 300.0), Vec2::new(900.0, 300.0), &config);
        let id = spawn_projectile(&mut app, arrow);
        app.update();

        assert!(!app.world().get::<Projectile>(id).unwrap().complete);
        assert_eq!(app.world().get::<BossHealth>(boss).unwrap().points, 0.0);
    }

    #[test]
    fn fireballs_of_defeated_boss_are_frozen() {
        let mut app = test_app();
        let config = CombatConfig::default();
        let boss = app
            .world_mut()
            .spawn(boss_bundle(&config, Vec2::new(800.0, 300.0), Duration::ZERO))
            .id();
        let fireball = Projectile::fireball(
            boss,
            Vec2::new(600.0, 300.0),
            Vec2::new(0.0, 300.0),
            1.0,
            &config,
        );
        let id = spawn_projectile(&mut app, fireball);
        app.world_mut().get_mut::<BossHealth>(boss).unwrap().points = 0.0;

        for _ in 0..3 {
            app.update();
        }

        assert_eq!(position(&app, id), Vec2::new(600.0, 300.0));
        assert_eq!(app.world().get::<Projectile>(id).unwrap().traveled, 0.0);
    }
}
