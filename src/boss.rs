//! The reaper boss: staged health, attack scheduling, and probabilistic
//! attack selection.
//!
//! ## Stage table
//!
//! | Health ratio      | Stage | Attack interval | Attack mix (base roll thresholds) |
//! |-------------------|-------|-----------------|-----------------------------------|
//! | `>= 0.66`         | 1     | 2000 ms         | fireball `< 0.60`                 |
//! | `0.33 ..< 0.66`   | 2     | 1500 ms         | charge `< 0.35`, fireball `< 0.65`|
//! | `< 0.33`          | 3     | 1000 ms         | charge `< 0.40`, fireball `< 0.70`|
//!
//! The anger modifier (2× fireball damage) switches on at `ratio <= 0.5`.
//!
//! Stage, interval and anger are pure functions of the current health ratio
//! and are recomputed every tick; nothing is cached across health changes.
//!
//! Once health reaches zero the boss is [`BossState::Defeated`]: it stops all
//! per-tick logic, its in-flight attacks freeze, and [`BossDefeated`] fires
//! exactly once.

use crate::charge::ChargeAttack;
use crate::config::CombatConfig;
use crate::constants::{
    ANGER_RATIO, CHARGE_ROLL_THRESHOLD, FIREBALL_ROLL_THRESHOLD, STAGE_ONE_ATTACK_INTERVAL_MS,
    STAGE_THREE_ATTACK_INTERVAL_MS, STAGE_THREE_RATIO, STAGE_TWO_ATTACK_INTERVAL_MS,
    STAGE_TWO_RATIO,
};
use crate::context::{CombatClock, CombatRng};
use crate::entity::{nearest_to, move_toward, Capabilities, CombatKind, CombatRoster, Hitbox};
use crate::error::{Capability, CombatResult};
use crate::events::BossDefeated;
use crate::player::PlayerCombatant;
use crate::projectile::Projectile;
use bevy::prelude::*;
use std::time::Duration;

// ── Stage ─────────────────────────────────────────────────────────────────────

/// Difficulty tier derived from the boss's health ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    #[default]
    One,
    Two,
    Three,
}

impl Stage {
    /// Strict less-than thresholds: exactly `0.33` is stage 2, exactly `0.66` stage 1.
    pub fn for_ratio(ratio: f32) -> Self {
        if ratio < STAGE_THREE_RATIO {
            Stage::Three
        } else if ratio < STAGE_TWO_RATIO {
            Stage::Two
        } else {
            Stage::One
        }
    }

    #[inline]
    pub fn number(self) -> u8 {
        match self {
            Stage::One => 1,
            Stage::Two => 2,
            Stage::Three => 3,
        }
    }

    pub fn attack_interval(self) -> Duration {
        Duration::from_millis(match self {
            Stage::One => STAGE_ONE_ATTACK_INTERVAL_MS,
            Stage::Two => STAGE_TWO_ATTACK_INTERVAL_MS,
            Stage::Three => STAGE_THREE_ATTACK_INTERVAL_MS,
        })
    }
}

/// Boss damage multiplier: `2` at or below half health, else `1`.
pub fn anger_modifier_for_ratio(ratio: f32) -> f32 {
    if ratio <= ANGER_RATIO {
        2.0
    } else {
        1.0
    }
}

// ── Attack selection ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackChoice {
    Charge,
    Fireball,
    Hold,
}

/// Map a uniform roll `r ∈ [0, 1)` to an attack.
///
/// `shift = prob_shift × (stage − 1)`.  Charges are only available from
/// stage 2; a roll above both thresholds holds fire for this interval.
pub fn select_attack(r: f32, stage: Stage, prob_shift: f32) -> AttackChoice {
    let shift = prob_shift * f32::from(stage.number() - 1);
    if stage >= Stage::Two && r < CHARGE_ROLL_THRESHOLD + shift {
        AttackChoice::Charge
    } else if r < FIREBALL_ROLL_THRESHOLD + shift {
        AttackChoice::Fireball
    } else {
        AttackChoice::Hold
    }
}

// ── Components ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BossState {
    #[default]
    Alive,
    Defeated,
}

/// Boss health pool; `points ∈ [0, full]`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BossHealth {
    pub points: f32,
    pub full: f32,
}

impl BossHealth {
    pub fn new(full: f32) -> Self {
        Self { points: full, full }
    }

    #[inline]
    pub fn ratio(&self) -> f32 {
        if self.full > 0.0 {
            self.points / self.full
        } else {
            0.0
        }
    }

    /// Clamped to `0..=100`.
    #[inline]
    pub fn percent(&self) -> f32 {
        (self.ratio() * 100.0).clamp(0.0, 100.0)
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.points <= 0.0
    }

    /// Subtract `amount`, never dropping below zero.
    pub fn take_damage(&mut self, amount: f32) {
        self.points = (self.points - amount).max(0.0);
    }
}

/// Boss AI state.  Health lives in [`BossHealth`] so HUD reporting can key
/// off `Changed<BossHealth>` without the per-tick stage refresh tripping it.
#[derive(Component, Debug, Clone)]
pub struct Boss {
    pub stage: Stage,
    pub attack_interval: Duration,
    pub anger_modifier: f32,
    pub attack_prob_shift: f32,
    pub last_attack_time: Duration,
    /// In-flight fireballs, oldest first.
    pub active_projectiles: Vec<Entity>,
    /// In-flight charges; at most one drives the boss at a time.
    pub active_charges: Vec<Entity>,
    pub is_charging: bool,
    pub state: BossState,
    victory_notified: bool,
}

impl Boss {
    pub fn new(config: &CombatConfig, now: Duration) -> Self {
        Self {
            stage: Stage::One,
            attack_interval: config.boss_attack_interval(),
            anger_modifier: 1.0,
            attack_prob_shift: config.attack_prob_shift,
            last_attack_time: now,
            active_projectiles: Vec::new(),
            active_charges: Vec::new(),
            is_charging: false,
            state: BossState::Alive,
            victory_notified: false,
        }
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.state == BossState::Defeated
    }

    /// Recompute stage, attack interval and anger from `health`.
    pub fn refresh_stage(&mut self, health: &BossHealth) {
        let ratio = health.ratio();
        self.stage = Stage::for_ratio(ratio);
        self.attack_interval = self.stage.attack_interval();
        self.anger_modifier = anger_modifier_for_ratio(ratio);
    }

    /// Enter the terminal state.  Returns `true` only the first time, which is
    /// when the victory notification must be sent.
    pub fn mark_defeated(&mut self) -> bool {
        self.state = BossState::Defeated;
        if self.victory_notified {
            false
        } else {
            self.victory_notified = true;
            true
        }
    }

    #[inline]
    pub fn attack_due(&self, now: Duration) -> bool {
        now.saturating_sub(self.last_attack_time) >= self.attack_interval
    }
}

/// Spawnable boss entity at `position`.
pub fn boss_bundle(config: &CombatConfig, position: Vec2, now: Duration) -> impl Bundle {
    (
        CombatKind::Boss,
        Boss::new(config, now),
        BossHealth::new(config.boss_initial_health),
        Capabilities::REAPER,
        Hitbox::square(config.boss_sprite_size, config.boss_hitbox_fraction),
        Transform::from_translation(position.extend(0.5)),
    )
}

/// Self-destruct.  Variants without [`Capability::Explode`] refuse with
/// `CapabilityNotSupported`; capable ones drop their health to zero.
pub fn explode(capabilities: &Capabilities, health: &mut BossHealth) -> CombatResult<()> {
    capabilities.require(Capability::Explode)?;
    health.points = 0.0;
    Ok(())
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Stage refresh and defeat detection.
pub fn boss_stage_system(
    mut q_bosses: Query<(Entity, &mut Boss, &BossHealth)>,
    mut defeated: MessageWriter<BossDefeated>,
) {
    for (entity, mut boss, health) in q_bosses.iter_mut() {
        if boss.is_defeated() {
            continue;
        }
        if health.is_depleted() {
            if boss.mark_defeated() {
                info!("Reaper defeated");
                defeated.write(BossDefeated { boss: entity });
            }
            continue;
        }

        let previous = boss.stage;
        boss.refresh_stage(health);
        if boss.stage != previous {
            info!(
                "Reaper enters stage {} ({:.0}% health)",
                boss.stage.number(),
                health.percent()
            );
        }
    }
}

/// Optional idle drift toward the nearest player; inert at speed `0.0`.
pub fn boss_chase_system(
    mut q_bosses: Query<(&Boss, &mut Transform), Without<PlayerCombatant>>,
    q_players: Query<(Entity, &Transform), With<PlayerCombatant>>,
    config: Res<CombatConfig>,
) {
    if config.boss_idle_chase_speed <= 0.0 {
        return;
    }
    for (boss, mut transform) in q_bosses.iter_mut() {
        if boss.is_defeated() || boss.is_charging {
            continue;
        }
        let pos = transform.translation.truncate();
        let players = q_players
            .iter()
            .map(|(e, t)| (e, t.translation.truncate()));
        let Some((_, target, _)) = nearest_to(pos, players) else {
            continue;
        };
        let next = move_toward(pos, target, config.boss_idle_chase_speed);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}

/// Drop finished fireballs/charges from the boss's lists and release the
/// charging flag once no charge remains.
pub fn boss_roster_system(
    mut q_bosses: Query<&mut Boss>,
    q_projectiles: Query<&Projectile>,
    q_charges: Query<&ChargeAttack>,
) {
    for mut boss in q_bosses.iter_mut() {
        if boss.is_defeated() {
            continue;
        }
        boss.active_projectiles
            .retain(|e| q_projectiles.get(*e).is_ok_and(|p| !p.complete));
        boss.active_charges
            .retain(|e| q_charges.get(*e).is_ok_and(|c| !c.complete));
        if boss.active_charges.is_empty() {
            boss.is_charging = false;
        }
    }
}

/// Attack scheduler: once per interval, roll an attack against the nearest
/// player.  The timer resets whether or not anything fired.
pub fn boss_attack_system(
    mut commands: Commands,
    mut q_bosses: Query<(Entity, &mut Boss, &Transform)>,
    roster: CombatRoster,
    clock: Res<CombatClock>,
    mut rng: ResMut<CombatRng>,
    config: Res<CombatConfig>,
) {
    let now = clock.now();
    for (entity, mut boss, transform) in q_bosses.iter_mut() {
        if boss.is_defeated() || !boss.attack_due(now) {
            continue;
        }
        let origin = transform.translation.truncate();
        if let Some((_, target, _)) = roster.nearest(CombatKind::Player, origin) {
            let choice = select_attack(rng.roll(), boss.stage, boss.attack_prob_shift);
            perform_attack(&mut commands, entity, &mut boss, choice, origin, target, now, &config);
        }
        boss.last_attack_time = now;
    }
}

/// Spawn the primitive for `choice` and register it with the boss.
#[allow(clippy::too_many_arguments)]
fn perform_attack(
    commands: &mut Commands,
    boss_entity: Entity,
    boss: &mut Boss,
    choice: AttackChoice,
    origin: Vec2,
    target: Vec2,
    now: Duration,
    config: &CombatConfig,
) {
    match choice {
        AttackChoice::Charge if boss.is_charging => {
            debug!("Charge rolled while a dash is in flight; holding");
        }
        AttackChoice::Charge => {
            let charge = ChargeAttack::new(boss_entity, origin, target, now, config);
            let id = commands
                .spawn((
                    CombatKind::Charge,
                    charge,
                    Transform::from_translation(origin.extend(0.4)),
                ))
                .id();
            boss.active_charges.push(id);
            boss.is_charging = true;
        }
        AttackChoice::Fireball => {
            let fireball =
                Projectile::fireball(boss_entity, origin, target, boss.anger_modifier, config);
            let id = commands
                .spawn((
                    CombatKind::Projectile,
                    fireball,
                    Transform::from_translation(origin.extend(0.3)),
                ))
                .id();
            boss.active_projectiles.push(id);
        }
        AttackChoice::Hold => {}
    }
}
