//! Player module: combatant state, attack dispatch, and keyboard control.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | Components (`PlayerCombatant`, `PlayerHealth`, `PlayerMotion`, `Facing`) and `player_bundle` |
//! | [`combat`] | Attack dispatch (melee vs. arrow), arrow roster, facing, movement |
//! | [`control`] | `PlayerControlPlugin`: WASD motion, Space / E input edges |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::player::*` imports.

pub mod combat;
pub mod control;
pub mod state;

pub use combat::{
    player_attack_system, player_facing_system, player_movement_system,
    player_projectile_roster_system,
};
pub use control::PlayerControlPlugin;
pub use state::{player_bundle, Facing, PlayerCombatant, PlayerHealth, PlayerMotion};
