//! Shared entity vocabulary: kind tags, hitboxes, capabilities, the typed
//! roster query, and the positional helpers every combat primitive uses.

use crate::error::{Capability, CombatError, CombatResult};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

// ── Kind tag ──────────────────────────────────────────────────────────────────

/// Explicit variant tag carried by every combat participant.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatKind {
    Boss,
    Player,
    Projectile,
    Charge,
    Effect,
}

// ── Hitbox ────────────────────────────────────────────────────────────────────

/// Sprite bounds plus the fraction of them that is solid.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub sprite_size: Vec2,
    pub width_fraction: f32,
    pub height_fraction: f32,
}

impl Hitbox {
    pub fn square(size: f32, fraction: f32) -> Self {
        Self {
            sprite_size: Vec2::splat(size),
            width_fraction: fraction,
            height_fraction: fraction,
        }
    }

    /// Solid width/height in pixels.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.sprite_size.x * self.width_fraction,
            self.sprite_size.y * self.height_fraction,
        )
    }
}

// ── Capabilities ──────────────────────────────────────────────────────────────

/// Per-variant capability set.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub variant: &'static str,
    pub can_explode: bool,
}

impl Capabilities {
    /// The reaper boss: never explodes.
    pub const REAPER: Self = Self {
        variant: "reaper",
        can_explode: false,
    };

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Explode => self.can_explode,
        }
    }

    /// `Err(CapabilityNotSupported)` when this variant lacks `capability`.
    pub fn require(&self, capability: Capability) -> CombatResult<()> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(CombatError::CapabilityNotSupported {
                variant: self.variant,
                capability,
            })
        }
    }
}

// ── Terminal flag ─────────────────────────────────────────────────────────────

/// Attack primitives and effects that finish on their own.
///
/// Once `is_complete` returns `true` the entity is never updated again and is
/// despawned by [`despawn_completed`] after the frame's update pass.
pub trait Terminal {
    fn is_complete(&self) -> bool;
}

/// Despawn every `T` whose terminal flag is set.
///
/// Registered in `PostUpdate` so removals never race the `Update` traversal.
pub fn despawn_completed<T: Component + Terminal>(
    mut commands: Commands,
    q: Query<(Entity, &T)>,
) {
    for (entity, item) in q.iter() {
        if item.is_complete() {
            commands.entity(entity).despawn();
        }
    }
}

// ── Roster ────────────────────────────────────────────────────────────────────

/// Typed, read-only view over every tagged combat participant.
#[derive(SystemParam)]
pub struct CombatRoster<'w, 's> {
    members: Query<'w, 's, (Entity, &'static CombatKind, &'static Transform)>,
}

impl CombatRoster<'_, '_> {
    /// Entities of `kind` with their positions, in query order.
    pub fn of_kind(&self, kind: CombatKind) -> impl Iterator<Item = (Entity, Vec2)> + '_ {
        self.members
            .iter()
            .filter(move |(_, k, _)| **k == kind)
            .map(|(e, _, t)| (e, t.translation.truncate()))
    }

    /// Nearest entity of `kind` to `from`: `(entity, position, distance)`.
    pub fn nearest(&self, kind: CombatKind, from: Vec2) -> Option<(Entity, Vec2, f32)> {
        nearest_to(from, self.of_kind(kind))
    }
}

// ── Positional helpers ────────────────────────────────────────────────────────

/// Euclidean nearest candidate; ties keep the first one seen.
pub fn nearest_to(
    from: Vec2,
    candidates: impl IntoIterator<Item = (Entity, Vec2)>,
) -> Option<(Entity, Vec2, f32)> {
    let mut best: Option<(Entity, Vec2, f32)> = None;
    for (entity, pos) in candidates {
        let dist = from.distance(pos);
        if best.is_none_or(|(_, _, d)| dist < d) {
            best = Some((entity, pos, dist));
        }
    }
    best
}

/// One step of `speed` pixels from `position` toward `target`.
///
/// Heading is `atan2(dy, dx)`; a zero offset keeps heading along +X.
pub fn move_toward(position: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let delta = target - position;
    let angle = delta.y.atan2(delta.x);
    position + Vec2::new(angle.cos(), angle.sin()) * speed
}
