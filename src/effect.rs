//! Short-lived, visual-only melee slash.

use crate::entity::Terminal;
use crate::player::Facing;
use bevy::prelude::*;

/// Self-expiring slash arc; counts ticks up to `max_lifetime`.
#[derive(Component, Debug, Clone)]
pub struct SlashEffect {
    pub facing: Facing,
    pub lifetime: u32,
    pub max_lifetime: u32,
    pub complete: bool,
}

impl SlashEffect {
    pub fn new(facing: Facing, max_lifetime: u32) -> Self {
        Self {
            facing,
            lifetime: 0,
            max_lifetime,
            complete: false,
        }
    }

    /// `0.0` when fresh, `1.0` on the final tick.
    pub fn progress(&self) -> f32 {
        if self.max_lifetime == 0 {
            1.0
        } else {
            self.lifetime as f32 / self.max_lifetime as f32
        }
    }
}

impl Terminal for SlashEffect {
    fn is_complete(&self) -> bool {
        self.complete
    }
}

pub fn slash_effect_system(mut q: Query<&mut SlashEffect>) {
    for mut slash in q.iter_mut() {
        if slash.complete {
            continue;
        }
        slash.lifetime += 1;
        if slash.lifetime >= slash.max_lifetime {
            slash.complete = true;
        }
    }
}
