//! Keyboard bindings for the player.
//!
//! The combat core never polls devices: this module turns key state into
//! [`PlayerMotion`] and into [`AttackRequested`] / [`HealRequested`] edges.
//! All systems are gated on [`GameState::BossFight`], so leaving the fight
//! releases the bindings along with the scene.
//!
//! | Key | Effect |
//! |-----|--------|
//! | W / A / S / D | move |
//! | Space | attack (on press) |
//! | E | heal (on press) |

use super::state::{PlayerCombatant, PlayerMotion};
use crate::combat::CombatSystems;
use crate::events::{AttackRequested, HealRequested};
use crate::scene::GameState;
use bevy::prelude::*;

pub struct PlayerControlPlugin;

impl Plugin for PlayerControlPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (keyboard_motion_system, keyboard_action_system)
                .before(CombatSystems)
                .run_if(in_state(GameState::BossFight)),
        );
    }
}

/// WASD → per-axis movement intent in `[-1, 1]`.
pub fn keyboard_motion_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut q: Query<&mut PlayerMotion, With<PlayerCombatant>>,
) {
    let mut velocity = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        velocity.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        velocity.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        velocity.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        velocity.x += 1.0;
    }
    for mut motion in q.iter_mut() {
        motion.velocity = velocity;
    }
}

/// Space / E presses → input edges for every player entity.
pub fn keyboard_action_system(
    keys: Res<ButtonInput<KeyCode>>,
    q: Query<Entity, With<PlayerCombatant>>,
    mut attacks: MessageWriter<AttackRequested>,
    mut heals: MessageWriter<HealRequested>,
) {
    let attack = keys.just_pressed(KeyCode::Space);
    let heal = keys.just_pressed(KeyCode::KeyE);
    if !(attack || heal) {
        return;
    }
    for player in q.iter() {
        if attack {
            attacks.write(AttackRequested { player });
        }
        if heal {
            heals.write(HealRequested { player });
        }
    }
}
