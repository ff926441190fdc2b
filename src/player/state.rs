//! Player components.
//!
//! Systems that mutate this state live in the sibling modules:
//! - [`super::combat`]: attack dispatch, facing, movement
//! - [`super::control`]: keyboard → motion / input edges

use crate::config::CombatConfig;
use crate::constants::{PLAYER_HITBOX_HEIGHT_FRACTION, PLAYER_HITBOX_WIDTH_FRACTION};
use crate::entity::{CombatKind, Hitbox};
use bevy::prelude::*;
use std::time::Duration;

// ── Components ─────────────────────────────────────────────────────────────────

/// Horizontal facing; never undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// `-1.0` for left, `+1.0` for right.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing implied by horizontal velocity `vx`, or `None` when still.
    pub fn from_velocity(vx: f32) -> Option<Self> {
        if vx > 0.0 {
            Some(Facing::Right)
        } else if vx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Player-side attack dispatcher state.
#[derive(Component, Debug, Clone)]
pub struct PlayerCombatant {
    /// `None` until the first attack, so the opening attack is never blocked.
    pub last_attack_time: Option<Duration>,
    pub attack_cooldown: Duration,
    pub facing: Facing,
    /// In-flight arrows, oldest first.
    pub active_projectiles: Vec<Entity>,
    pub defeated: bool,
}

impl PlayerCombatant {
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            last_attack_time: None,
            attack_cooldown: config.player_attack_cooldown(),
            facing: Facing::default(),
            active_projectiles: Vec::new(),
            defeated: false,
        }
    }

    #[inline]
    pub fn cooldown_ready(&self, now: Duration) -> bool {
        self.last_attack_time
            .is_none_or(|last| now.saturating_sub(last) >= self.attack_cooldown)
    }
}

/// Player hit points in `0..=max`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerHealth {
    pub health: f32,
    pub max: f32,
}

impl PlayerHealth {
    pub fn new(max: f32) -> Self {
        Self { health: max, max }
    }

    #[inline]
    pub fn percent(&self) -> f32 {
        if self.max > 0.0 {
            (self.health / self.max * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.health <= 0.0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.health >= self.max
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Heal up to `max`; returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max);
        self.health - before
    }
}

/// Movement intent in `[-1, 1]` per axis, scaled by `player_step` each tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerMotion {
    pub velocity: Vec2,
}

// ── Spawn ──────────────────────────────────────────────────────────────────────

pub fn player_bundle(config: &CombatConfig, position: Vec2) -> impl Bundle {
    (
        CombatKind::Player,
        PlayerCombatant::new(config),
        PlayerHealth::new(config.player_max_health),
        PlayerMotion::default(),
        Hitbox {
            sprite_size: Vec2::splat(config.player_sprite_size),
            width_fraction: PLAYER_HITBOX_WIDTH_FRACTION,
            height_fraction: PLAYER_HITBOX_HEIGHT_FRACTION,
        },
        Transform::from_translation(position.extend(0.6)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_keeps_last_value_when_still() {
        assert_eq!(Facing::from_velocity(2.0), Some(Facing::Right));
        assert_eq!(Facing::from_velocity(-0.5), Some(Facing::Left));
        assert_eq!(Facing::from_velocity(0.0), None);
        assert_eq!(Facing::default(), Facing::Right);
    }

    #[test]
    fn heal_is_capped_at_max() {
        let mut health = PlayerHealth {
            health: 90.0,
            max: 100.0,
        };
        assert_eq!(health.heal(25.0), 10.0);
        assert!(health.is_full());
    }

    #[test]
    fn first_attack_is_never_on_cooldown() {
        let combatant = PlayerCombatant::new(&CombatConfig::default());
        assert!(combatant.cooldown_ready(Duration::ZERO));
    }
}
