//! Centralised combat and arena tuning constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  Every constant is mirrored by a field on
//! [`crate::config::CombatConfig`], which can override it at runtime from
//! `assets/combat.toml`.
//!
//! ## Units
//!
//! - Distances and speeds are in arena pixels.  Speeds are **per tick**: the
//!   combat core advances moving primitives once per frame.
//! - Cadences (attack interval, cooldown, charge wind-up) are wall-clock
//!   milliseconds so they stay frame-rate independent.

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Width of the playable arena (pixels).  Matches the boss-room background.
pub const ARENA_WIDTH: f32 = 1038.0;

/// Height of the playable arena (pixels).
pub const ARENA_HEIGHT: f32 = 580.0;

// ── Boss ──────────────────────────────────────────────────────────────────────

/// Starting (and maximum) boss health.
pub const BOSS_INITIAL_HEALTH: f32 = 1500.0;

/// Attack interval used before the first stage evaluation (ms).
pub const BOSS_INITIAL_ATTACK_INTERVAL_MS: u64 = 2000;

/// Attack interval while in stage 1 (ms).
pub const STAGE_ONE_ATTACK_INTERVAL_MS: u64 = 2000;

/// Attack interval while in stage 2 (ms).
pub const STAGE_TWO_ATTACK_INTERVAL_MS: u64 = 1500;

/// Attack interval while in stage 3 (ms).
pub const STAGE_THREE_ATTACK_INTERVAL_MS: u64 = 1000;

/// Health ratio below which the boss enters stage 3.
pub const STAGE_THREE_RATIO: f32 = 0.33;

/// Health ratio below which the boss enters stage 2.
pub const STAGE_TWO_RATIO: f32 = 0.66;

/// Health ratio at or below which the anger modifier doubles boss damage.
pub const ANGER_RATIO: f32 = 0.5;

/// Per-stage bias added to both attack-selection thresholds.
///
/// `shift = ATTACK_PROB_SHIFT × (stage − 1)`, so stage 1 never shifts.
pub const ATTACK_PROB_SHIFT: f32 = 0.05;

/// Base roll threshold below which a stage ≥ 2 boss charges.
pub const CHARGE_ROLL_THRESHOLD: f32 = 0.3;

/// Base roll threshold below which the boss throws a fireball.
pub const FIREBALL_ROLL_THRESHOLD: f32 = 0.6;

/// Idle chase speed (pixels/tick).  `0.0` keeps the boss stationary between
/// attacks, which is how the reaper fight plays.
pub const BOSS_IDLE_CHASE_SPEED: f32 = 0.0;

/// Boss sprite bounds (pixels) and the fraction of them that counts as hitbox.
pub const BOSS_SPRITE_SIZE: f32 = 120.0;
pub const BOSS_HITBOX_FRACTION: f32 = 0.6;

// ── Fireball ──────────────────────────────────────────────────────────────────

pub const FIREBALL_SPEED: f32 = 6.0;

/// Base fireball damage before the boss's anger modifier.
pub const FIREBALL_DAMAGE: f32 = 10.0;

/// Centre-to-centre distance at which a fireball connects with a player.
pub const FIREBALL_HIT_DISTANCE: f32 = 40.0;

/// Distance after which an unhit fireball fizzles.
pub const FIREBALL_MAX_RANGE: f32 = 900.0;

// ── Charge attack ─────────────────────────────────────────────────────────────

/// Wind-up before the dash starts (ms).
pub const CHARGE_DELAY_MS: u64 = 500;

/// Dash speed (pixels/tick).
pub const CHARGE_SPEED: f32 = 8.0;

/// Dash length cap (pixels).
pub const CHARGE_MAX_DISTANCE: f32 = 300.0;

/// Sweep radius of the dash.  Larger than a fireball's to read as melee.
pub const CHARGE_HIT_RADIUS: f32 = 80.0;

/// Base dash damage before the stage bonus.
pub const CHARGE_DAMAGE: f32 = 25.0;

/// Dash damage multiplier while the boss is in stage 3.
pub const CHARGE_STAGE_THREE_MODIFIER: f32 = 1.5;

/// Maximum telegraph glow radius reached at the end of the wind-up.
pub const CHARGE_TELEGRAPH_RADIUS: f32 = 60.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Minimum interval between two accepted attack triggers (ms).
pub const PLAYER_ATTACK_COOLDOWN_MS: u64 = 500;

/// Below this distance to the boss an attack is a melee swing.
pub const MELEE_RANGE: f32 = 100.0;

/// Melee damage: 1.5× the ranged damage.
pub const MELEE_DAMAGE: f32 = 15.0;

pub const RANGED_DAMAGE: f32 = 10.0;

pub const ARROW_SPEED: f32 = 10.0;
pub const ARROW_HIT_DISTANCE: f32 = 60.0;
pub const ARROW_MAX_RANGE: f32 = 1200.0;

/// Horizontal distance of the point an arrow is aimed at.
pub const ARROW_AIM_DISTANCE: f32 = 500.0;

/// Player walk speed (pixels/tick) applied by the keyboard controls.
pub const PLAYER_STEP: f32 = 4.0;

pub const PLAYER_SPRITE_SIZE: f32 = 64.0;
pub const PLAYER_HITBOX_WIDTH_FRACTION: f32 = 0.45;
pub const PLAYER_HITBOX_HEIGHT_FRACTION: f32 = 0.2;

/// Lifetime of the melee slash effect in ticks.
pub const SLASH_LIFETIME_TICKS: u32 = 15;

// ── Healing ───────────────────────────────────────────────────────────────────

/// Heals available per battle.
pub const HEAL_CHARGES: u32 = 3;

/// Health restored per heal.
pub const HEAL_AMOUNT: f32 = 25.0;

// ── Scene ─────────────────────────────────────────────────────────────────────

/// Seconds between entering the boss room and opening the readiness gate.
pub const INTRO_DURATION_SECS: f32 = 2.0;
