//! Scene context consumed by the combat core: arena bounds, the readiness
//! gate, the wall-clock source, and the attack-selection RNG.
//!
//! The combat core only *reads* [`SceneReadiness`]; the scene layer
//! ([`crate::scene`]) owns writing it.

use crate::config::CombatConfig;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

// ── Arena bounds ──────────────────────────────────────────────────────────────

/// Playable canvas rectangle.  Projectiles and dashes that leave it expire.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ArenaBounds {
    pub rect: Rect,
}

impl ArenaBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, width, height),
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.arena_width, config.arena_height)
    }

    /// Inclusive containment test (the canvas edge itself is still inside).
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.rect.min.x
            && point.x <= self.rect.max.x
            && point.y >= self.rect.min.y
            && point.y <= self.rect.max.y
    }

    /// Nearest point inside the arena.
    #[inline]
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.rect.min, self.rect.max)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

impl FromWorld for ArenaBounds {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<CombatConfig>()
            .map(Self::from_config)
            .unwrap_or_else(|| Self::from_config(&CombatConfig::default()))
    }
}

// ── Readiness gate ────────────────────────────────────────────────────────────

/// Level-triggered gate over every health mutation in the combat core.
///
/// While closed, entities keep moving and animating but no damage (or heal)
/// is applied.  Closed by default: the scene opens it once the intro is over.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneReadiness {
    ready: bool,
}

impl SceneReadiness {
    pub fn ready() -> Self {
        Self { ready: true }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Scene-layer only.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockSource {
    /// Mirror Bevy's virtual `Time` every frame.
    #[default]
    Virtual,
    /// Only advanced explicitly by its owner.
    Manual,
}

/// Wall-clock timestamp source for attack cadence, cooldowns and wind-ups.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CombatClock {
    now: Duration,
    source: ClockSource,
}

impl CombatClock {
    pub fn manual(start: Duration) -> Self {
        Self {
            now: start,
            source: ClockSource::Manual,
        }
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Time since `earlier`, saturating at zero for timestamps in the future.
    #[inline]
    pub fn since(&self, earlier: Duration) -> Duration {
        self.now.saturating_sub(earlier)
    }
}

/// Copy Bevy's elapsed time into a virtual-mode [`CombatClock`].
pub fn tick_combat_clock_system(time: Res<Time>, mut clock: ResMut<CombatClock>) {
    if clock.source == ClockSource::Virtual {
        clock.now = time.elapsed();
    }
}

// ── RNG ───────────────────────────────────────────────────────────────────────

/// Uniform roll source for attack selection; reproducible given a seed.
#[derive(Resource, Debug, Clone)]
pub struct CombatRng(StdRng);

impl CombatRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        match config.rng_seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Uniform value in `[0, 1)`.
    #[inline]
    pub fn roll(&mut self) -> f32 {
        self.0.gen::<f32>()
    }
}

impl FromWorld for CombatRng {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<CombatConfig>()
            .map(Self::from_config)
            .unwrap_or_else(Self::from_entropy)
    }
}
