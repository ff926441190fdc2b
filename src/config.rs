//! Runtime combat configuration loaded from `assets/combat.toml`.
//!
//! [`CombatConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  The game binary reads `assets/combat.toml` before
//! building the app and overwrites the defaults with any values present in the
//! file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `CombatConfig::default()`.

use crate::constants::*;
use crate::error::CombatResult;
use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default location of the combat tuning file, relative to the working directory.
pub const COMBAT_CONFIG_PATH: &str = "assets/combat.toml";

/// Runtime-tunable combat configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // ── Arena ─────────────────────────────────────────────────────────────────
    pub arena_width: f32,
    pub arena_height: f32,

    // ── Boss ──────────────────────────────────────────────────────────────────
    pub boss_initial_health: f32,
    pub boss_attack_interval_ms: u64,
    pub attack_prob_shift: f32,
    pub boss_idle_chase_speed: f32,
    pub boss_sprite_size: f32,
    pub boss_hitbox_fraction: f32,

    // ── Fireball ──────────────────────────────────────────────────────────────
    pub fireball_speed: f32,
    pub fireball_damage: f32,
    pub fireball_hit_distance: f32,
    pub fireball_max_range: f32,

    // ── Charge attack ─────────────────────────────────────────────────────────
    pub charge_delay_ms: u64,
    pub charge_speed: f32,
    pub charge_max_distance: f32,
    pub charge_hit_radius: f32,
    pub charge_damage: f32,
    pub charge_stage_three_modifier: f32,
    pub charge_telegraph_radius: f32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_max_health: f32,
    pub player_attack_cooldown_ms: u64,
    pub melee_range: f32,
    pub melee_damage: f32,
    pub ranged_damage: f32,
    pub arrow_speed: f32,
    pub arrow_hit_distance: f32,
    pub arrow_max_range: f32,
    pub arrow_aim_distance: f32,
    pub player_step: f32,
    pub player_sprite_size: f32,
    pub slash_lifetime_ticks: u32,

    // ── Healing ───────────────────────────────────────────────────────────────
    pub heal_charges: u32,
    pub heal_amount: f32,

    // ── Scene ─────────────────────────────────────────────────────────────────
    pub intro_duration_secs: f32,
    /// Fixed seed for the attack-selection RNG; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            // Arena
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            // Boss
            boss_initial_health: BOSS_INITIAL_HEALTH,
            boss_attack_interval_ms: BOSS_INITIAL_ATTACK_INTERVAL_MS,
            attack_prob_shift: ATTACK_PROB_SHIFT,
            boss_idle_chase_speed: BOSS_IDLE_CHASE_SPEED,
            boss_sprite_size: BOSS_SPRITE_SIZE,
            boss_hitbox_fraction: BOSS_HITBOX_FRACTION,
            // Fireball
            fireball_speed: FIREBALL_SPEED,
            fireball_damage: FIREBALL_DAMAGE,
            fireball_hit_distance: FIREBALL_HIT_DISTANCE,
            fireball_max_range: FIREBALL_MAX_RANGE,
            // Charge attack
            charge_delay_ms: CHARGE_DELAY_MS,
            charge_speed: CHARGE_SPEED,
            charge_max_distance: CHARGE_MAX_DISTANCE,
            charge_hit_radius: CHARGE_HIT_RADIUS,
            charge_damage: CHARGE_DAMAGE,
            charge_stage_three_modifier: CHARGE_STAGE_THREE_MODIFIER,
            charge_telegraph_radius: CHARGE_TELEGRAPH_RADIUS,
            // Player
            player_max_health: PLAYER_MAX_HEALTH,
            player_attack_cooldown_ms: PLAYER_ATTACK_COOLDOWN_MS,
            melee_range: MELEE_RANGE,
            melee_damage: MELEE_DAMAGE,
            ranged_damage: RANGED_DAMAGE,
            arrow_speed: ARROW_SPEED,
            arrow_hit_distance: ARROW_HIT_DISTANCE,
            arrow_max_range: ARROW_MAX_RANGE,
            arrow_aim_distance: ARROW_AIM_DISTANCE,
            player_step: PLAYER_STEP,
            player_sprite_size: PLAYER_SPRITE_SIZE,
            slash_lifetime_ticks: SLASH_LIFETIME_TICKS,
            // Healing
            heal_charges: HEAL_CHARGES,
            heal_amount: HEAL_AMOUNT,
            // Scene
            intro_duration_secs: INTRO_DURATION_SECS,
            rng_seed: None,
        }
    }
}

impl CombatConfig {
    /// Parse a (possibly partial) TOML document; absent keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> CombatResult<Self> {
        Ok(toml::from_str::<CombatConfig>(contents)?)
    }

    /// Read and parse a config file.
    pub fn from_file(path: impl AsRef<Path>) -> CombatResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    #[inline]
    pub fn boss_attack_interval(&self) -> Duration {
        Duration::from_millis(self.boss_attack_interval_ms)
    }

    #[inline]
    pub fn charge_delay(&self) -> Duration {
        Duration::from_millis(self.charge_delay_ms)
    }

    #[inline]
    pub fn player_attack_cooldown(&self) -> Duration {
        Duration::from_millis(self.player_attack_cooldown_ms)
    }
}

/// Load `path`, falling back to compiled defaults.
///
/// Runs before the Bevy app (and its log plugin) exists, so it reports to
/// stdout/stderr directly.  A missing file is silently ignored; a malformed
/// one is reported but does not abort the game.
pub fn load_combat_config(path: &str) -> CombatConfig {
    if !Path::new(path).exists() {
        println!("ℹ No {path} found; using compiled defaults");
        return CombatConfig::default();
    }
    match CombatConfig::from_file(path) {
        Ok(loaded) => {
            println!("✓ Loaded combat config from {path}");
            loaded
        }
        Err(e) => {
            eprintln!("⚠ Failed to load {path}: {e}; using defaults");
            CombatConfig::default()
        }
    }
}
