//! Reaper Duel combat engine library
//!
//! A staged 2D boss fight built on Bevy: a reaper boss with fireball and
//! dash attacks, a player with melee/arrow dispatch, and the health bridge
//! that reports both sides to a HUD.

pub mod boss;
pub mod charge;
pub mod combat;
pub mod config;
pub mod constants;
pub mod context;
pub mod effect;
pub mod entity;
pub mod error;
pub mod events;
pub mod health;
pub mod player;
pub mod projectile;
pub mod rendering;
pub mod scene;
