//! Sleep pulse ability
//!
//! Activation is an instant circular hit-test at full radius. The expanding
//! ring kept in [`PulsePool`] is cosmetic and has no gameplay effect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, EnemyKind, Player};
use crate::consts::*;

/// One expanding pulse ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepPulse {
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub age: f32,
    pub duration: f32,
}

impl SleepPulse {
    pub fn new(origin: Vec2, max_radius: f32) -> Self {
        Self {
            origin,
            radius: 0.0,
            max_radius,
            age: 0.0,
            duration: PULSE_GROWTH_DURATION,
        }
    }

    /// Growth progress in `[0, 1]`, for fading the ring
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.age / self.duration).clamp(0.0, 1.0)
    }
}

/// Live pulse rings, owned by the game state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PulsePool {
    pulses: Vec<SleepPulse>,
}

impl PulsePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, origin: Vec2, max_radius: f32) {
        self.pulses.push(SleepPulse::new(origin, max_radius));
    }

    /// Grow every ring and drop the ones that have finished
    pub fn update(&mut self, dt: f32) {
        for pulse in &mut self.pulses {
            pulse.age += dt;
            pulse.radius = (pulse.radius + dt * pulse.max_radius * PULSE_GROWTH_RATE)
                .min(pulse.max_radius);
        }
        self.pulses.retain(|p| p.age < p.duration);
    }

    pub fn clear(&mut self) {
        self.pulses.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SleepPulse> {
        self.pulses.iter()
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }
}

/// Result of a successful activation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SleepPulseOutcome {
    pub origin: Vec2,
    pub radius: f32,
    /// Ids of bosses brought to zero health, to be removed at end of tick
    pub defeated: Vec<u32>,
    /// `(boss id, remaining health)` for each boss hit
    pub boss_hits: Vec<(u32, i32)>,
    /// Enemies that fell asleep
    pub slept: Vec<u32>,
    /// Armored enemies that absorbed a pulse without falling asleep
    pub resisted: Vec<u32>,
}

/// Fire the sleep pulse from the player's center.
///
/// Returns `None` while on cooldown. Struck bosses still sleep (briefly) even
/// on the hit that defeats them; removal is left to the caller.
pub fn activate_sleep_ability(
    player: &mut Player,
    enemies: &mut [Enemy],
    pulses: &mut PulsePool,
    elapsed: f32,
) -> Option<SleepPulseOutcome> {
    if elapsed < player.sleep_ready_at {
        return None;
    }
    player.sleep_ready_at = elapsed + SLEEP_COOLDOWN;

    let extended = player.extended_sleep_active(elapsed);
    let (radius, duration) = if extended {
        (
            SLEEP_RADIUS * EXTENDED_SLEEP_MULTIPLIER,
            SLEEP_DURATION * EXTENDED_SLEEP_MULTIPLIER,
        )
    } else {
        (SLEEP_RADIUS, SLEEP_DURATION)
    };

    let origin = player.center();
    pulses.spawn(origin, radius);

    let mut outcome = SleepPulseOutcome {
        origin,
        radius,
        ..Default::default()
    };
    let radius_sq = radius * radius;

    for enemy in enemies.iter_mut() {
        if enemy.center().distance_squared(origin) > radius_sq {
            continue;
        }

        match &mut enemy.kind {
            EnemyKind::Boss { health, .. } => {
                *health -= 1;
                let remaining = *health;
                enemy.sleep(elapsed, duration * BOSS_SLEEP_FACTOR);
                outcome.boss_hits.push((enemy.id, remaining));
                if remaining <= 0 {
                    log::info!("Boss {} defeated", enemy.id);
                    outcome.defeated.push(enemy.id);
                }
            }
            EnemyKind::DrowsySnail {
                pulses_required,
                pulses_received,
            } => {
                *pulses_received += 1;
                if *pulses_received >= *pulses_required {
                    *pulses_received = 0;
                    enemy.sleep(elapsed, duration);
                    outcome.slept.push(enemy.id);
                } else {
                    outcome.resisted.push(enemy.id);
                }
            }
            _ => {
                enemy.sleep(elapsed, duration);
                outcome.slept.push(enemy.id);
            }
        }
    }

    log::debug!(
        "Sleep pulse at ({:.1}, {:.1}) r={:.1}: {} slept, {} boss hits",
        origin.x,
        origin.y,
        radius,
        outcome.slept.len(),
        outcome.boss_hits.len()
    );

    Some(outcome)
}

/// Remaining cooldown as a fraction of the full cooldown
pub fn cooldown_ratio(player: &Player, elapsed: f32) -> f32 {
    ((player.sleep_ready_at - elapsed) / SLEEP_COOLDOWN).clamp(0.0, 1.0)
}
