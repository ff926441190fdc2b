//! Presentation: camera, gizmo drawing of every combat participant, and the
//! HUD sink that turns [`HealthBarUpdate`] messages into on-screen bars.
//!
//! Gizmos are immediate-mode: everything here is redrawn each frame from
//! component state, so despawned entities simply stop appearing.

use crate::boss::{Boss, Stage};
use crate::charge::{ChargeAttack, ChargePhase};
use crate::context::ArenaBounds;
use crate::effect::SlashEffect;
use crate::entity::Hitbox;
use crate::events::{BarTint, HealthBar, HealthBarUpdate};
use crate::player::{PlayerCombatant, PlayerHealth};
use crate::projectile::{Projectile, ProjectileKind};
use bevy::prelude::*;

pub struct CombatRenderPlugin;

impl Plugin for CombatRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudState>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (hud_sink_system, combat_gizmo_system, health_bar_gizmo_system).chain(),
            );
    }
}

// ── HUD sink ──────────────────────────────────────────────────────────────────

/// Last reported bar values.  Stale until the next update arrives.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HudState {
    pub player_percent: f32,
    pub boss_percent: f32,
    pub boss_tint: BarTint,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            player_percent: 100.0,
            boss_percent: 100.0,
            boss_tint: BarTint::Red,
        }
    }
}

pub fn hud_sink_system(mut updates: MessageReader<HealthBarUpdate>, mut hud: ResMut<HudState>) {
    for update in updates.read() {
        match update.bar {
            HealthBar::Player => hud.player_percent = update.percent,
            HealthBar::Boss => {
                hud.boss_percent = update.percent;
                hud.boss_tint = update.tint;
            }
        }
    }
}

// ── Camera ────────────────────────────────────────────────────────────────────

/// 2D camera centred on the arena so world coordinates match canvas pixels.
pub fn setup_camera(mut commands: Commands, bounds: Res<ArenaBounds>) {
    commands.spawn((Camera2d, Transform::from_translation(bounds.center().extend(999.0))));
}

// ── Gizmos ────────────────────────────────────────────────────────────────────

fn stage_color(stage: Stage) -> Color {
    match stage {
        Stage::One => Color::srgb(0.85, 0.85, 0.9),
        Stage::Two => Color::srgb(0.8, 0.3, 0.3),
        Stage::Three => Color::srgb(0.7, 0.2, 0.95),
    }
}

#[allow(clippy::type_complexity)]
pub fn combat_gizmo_system(
    mut gizmos: Gizmos,
    q_bosses: Query<(&Boss, &Hitbox, &Transform)>,
    q_players: Query<(&PlayerCombatant, &PlayerHealth, &Hitbox, &Transform)>,
    q_projectiles: Query<(&Projectile, &Transform)>,
    q_charges: Query<(&ChargeAttack, &Transform)>,
    q_slashes: Query<(&SlashEffect, &Transform)>,
) {
    for (boss, hitbox, transform) in q_bosses.iter() {
        let pos = transform.translation.truncate();
        let color = if boss.is_defeated() {
            Color::srgba(0.4, 0.4, 0.4, 0.5)
        } else {
            stage_color(boss.stage)
        };
        gizmos.rect_2d(pos, hitbox.size(), color);
        gizmos.rect_2d(pos, hitbox.sprite_size, Color::srgba(1.0, 1.0, 1.0, 0.1));
    }

    for (combatant, health, hitbox, transform) in q_players.iter() {
        let pos = transform.translation.truncate();
        let color = if combatant.defeated {
            Color::srgba(0.4, 0.4, 0.4, 0.5)
        } else {
            let frac = health.percent() / 100.0;
            Color::srgb(1.0 - frac * 0.8, frac * 0.6 + 0.2, frac)
        };
        gizmos.rect_2d(pos, hitbox.size(), color);
        let nose = pos + Vec2::X * combatant.facing.sign() * hitbox.size().x;
        gizmos.line_2d(pos, nose, Color::WHITE);
    }

    for (projectile, transform) in q_projectiles.iter() {
        let pos = transform.translation.truncate();
        match projectile.kind {
            ProjectileKind::BossFireball => {
                let color = if projectile.damage_multiplier > 1.0 {
                    Color::srgb(1.0, 0.25, 0.05)
                } else {
                    Color::srgb(1.0, 0.6, 0.1)
                };
                gizmos.circle_2d(pos, 10.0, color);
            }
            ProjectileKind::PlayerRanged => {
                let tail = pos - projectile.direction * 18.0;
                gizmos.line_2d(tail, pos, Color::srgb(1.0, 0.9, 0.2));
            }
        }
    }

    for (charge, transform) in q_charges.iter() {
        let pos = transform.translation.truncate();
        match charge.phase {
            ChargePhase::Charging => {
                gizmos.circle_2d(pos, charge.telegraph, Color::srgba(1.0, 0.1, 0.1, 0.7));
            }
            ChargePhase::Dashing => {
                gizmos.circle_2d(pos, charge.hit_radius, Color::srgba(1.0, 0.1, 0.1, 0.3));
            }
            ChargePhase::Done => {}
        }
    }

    for (slash, transform) in q_slashes.iter() {
        let pos = transform.translation.truncate();
        let sweep = 30.0 * (1.0 - slash.progress());
        let dir = slash.facing.sign();
        gizmos.line_2d(
            pos + Vec2::new(-dir * 10.0, sweep),
            pos + Vec2::new(dir * 10.0, -sweep),
            Color::srgba(1.0, 1.0, 1.0, 1.0 - slash.progress()),
        );
    }
}

/// Two bars across the top of the arena: player on the left, boss on the right.
pub fn health_bar_gizmo_system(
    mut gizmos: Gizmos,
    hud: Res<HudState>,
    bounds: Res<ArenaBounds>,
) {
    let top = bounds.rect.max.y - 20.0;
    let width = bounds.rect.width() * 0.35;
    let track = Color::srgba(0.25, 0.0, 0.0, 0.8);

    let player_start = Vec2::new(bounds.rect.min.x + 20.0, top);
    let boss_start = Vec2::new(bounds.rect.max.x - 20.0 - width, top);

    for (start, percent, tint) in [
        (player_start, hud.player_percent, BarTint::Green),
        (boss_start, hud.boss_percent, hud.boss_tint),
    ] {
        gizmos.line_2d(start, start + Vec2::X * width, track);
        let fill = width * (percent / 100.0).clamp(0.0, 1.0);
        if fill > 0.0 {
            gizmos.line_2d(start, start + Vec2::X * fill, tint.color());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_keeps_the_latest_value_per_bar() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<HealthBarUpdate>()
            .init_resource::<HudState>()
            .add_systems(Update, hud_sink_system);

        app.world_mut().write_message(HealthBarUpdate {
            bar: HealthBar::Boss,
            percent: 60.0,
            tint: BarTint::Maroon,
        });
        app.world_mut().write_message(HealthBarUpdate {
            bar: HealthBar::Boss,
            percent: 20.0,
            tint: BarTint::Purple,
        });
        app.world_mut().write_message(HealthBarUpdate {
            bar: HealthBar::Player,
            percent: 75.0,
            tint: BarTint::Green,
        });
        app.update();

        let hud = app.world().resource::<HudState>();
        assert_eq!(hud.boss_percent, 20.0);
        assert_eq!(hud.boss_tint, BarTint::Purple);
        assert_eq!(hud.player_percent, 75.0);
    }

    #[test]
    fn no_updates_leave_the_bars_stale() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<HealthBarUpdate>()
            .init_resource::<HudState>()
            .add_systems(Update, hud_sink_system);
        app.update();
        assert_eq!(*app.world().resource::<HudState>(), HudState::default());
    }
}
