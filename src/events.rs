//! Messages crossing the combat-core boundary.
//!
//! Outbound messages are the presentation side-channel: health-bar updates
//! and the one-shot defeat notifications.  A message nobody reads is simply
//! dropped, so a HUD that is not mounted yet costs nothing.
//!
//! Inbound messages are input edges (attack / heal presses) written by the
//! control layer or by tests.

use bevy::prelude::*;

/// Which on-screen bar a [`HealthBarUpdate`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthBar {
    Player,
    Boss,
}

/// Bar fill colour.  The boss bar follows the boss's stage thresholds; the
/// player bar is always [`BarTint::Green`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarTint {
    Green,
    Red,
    Maroon,
    Purple,
}

impl BarTint {
    /// `< 33 %` purple, `< 66 %` maroon, otherwise red.
    pub fn for_percent(percent: f32) -> Self {
        if percent < 33.0 {
            BarTint::Purple
        } else if percent < 66.0 {
            BarTint::Maroon
        } else {
            BarTint::Red
        }
    }

    pub fn color(self) -> Color {
        match self {
            BarTint::Green => Color::srgb(0.2, 0.85, 0.3),
            BarTint::Red => Color::srgb(1.0, 0.0, 0.0),
            BarTint::Maroon => Color::srgb(0.5, 0.0, 0.0),
            BarTint::Purple => Color::srgb(0.63, 0.13, 0.94),
        }
    }
}

/// Best-effort health-bar refresh, `percent` in `0..=100`.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct HealthBarUpdate {
    pub bar: HealthBar,
    pub percent: f32,
    pub tint: BarTint,
}

/// Fired once when a boss's health reaches zero.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossDefeated {
    pub boss: Entity,
}

/// Fired once when a player's health reaches zero.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDefeated {
    pub player: Entity,
}

/// Attack button pressed (edge, not level).
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRequested {
    pub player: Entity,
}

/// Heal button pressed (edge, not level).
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealRequested {
    pub player: Entity,
}
