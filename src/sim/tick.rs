//! Fixed timestep simulation tick
//!
//! Each tick runs, in order: input, physics, enemy update, enemy
//! interactions, collectibles, checkpoint/gate checks, removal of defeated
//! enemies, pulse ring growth and the fall-out-of-world check.

use super::ability::activate_sleep_ability;
use super::collectibles::{collect_notes, collect_pickups};
use super::collision::apply_physics;
use super::enemy::{carry_rider, handle_enemy_interactions, supporting_enemy, update_enemies};
use super::entity::PickupKind;
use super::level::AdvanceResult;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal intent in `[-1, 1]`
    pub move_x: f32,
    /// Jump pressed this tick
    pub jump: bool,
    /// Sleep pulse pressed this tick
    pub sleep: bool,
    /// Puff Float pressed this tick
    pub float: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Completed => {
            // Rings fired on the final tick still play out
            state.pulses.update(dt);
            return;
        }
        GamePhase::Transition { remaining } => {
            state.levels.update_run_time(dt);
            state.pulses.update(dt);
            advance_transition(state, remaining - dt);
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.elapsed += dt;
    state.levels.update_run_time(dt);
    let elapsed = state.elapsed;
    let prev = state.player.pos;

    // === Input ===
    apply_input(state, input, dt);

    // === Physics ===
    apply_physics(
        &mut state.player,
        &state.enemies,
        &state.platforms,
        dt,
        prev.x,
        prev.y,
    );
    let player = &mut state.player;
    if player.is_floating && (player.grounded || elapsed >= player.float_until) {
        player.is_floating = false;
    }

    // === Enemies ===
    let support = supporting_enemy(&state.player, &state.enemies);
    update_enemies(&mut state.enemies, elapsed, dt);
    if let Some(support) = support {
        carry_rider(&mut state.player, &state.enemies, support);
    }

    let contact = handle_enemy_interactions(&mut state.player, &state.enemies, prev, elapsed);
    if contact.bounced {
        state.events.push(GameEvent::Bounced);
    }
    if contact.took_damage {
        state.events.push(GameEvent::DamageTaken {
            health: state.player.health,
        });
        if state.player.health <= 0 {
            state.respawn();
        }
    }

    // === Collectibles ===
    for note in collect_notes(&mut state.player, &mut state.notes, elapsed) {
        state.levels.track_note_collected();
        state.events.push(GameEvent::NoteCollected { combo: note.combo });
    }
    for pickup in collect_pickups(&mut state.player, &mut state.pickups, elapsed) {
        state.events.push(GameEvent::PickupCollected(pickup.kind));
        match pickup.kind {
            PickupKind::Health if pickup.healed > 0 => state.events.push(GameEvent::HealthRestored),
            PickupKind::GoldenMelodyShard => state.levels.track_shard_collected(),
            kind if kind.is_power_up() => state.events.push(GameEvent::PowerUpActivated(kind)),
            _ => {}
        }
    }

    // === Checkpoint & gate ===
    check_checkpoint(state);
    check_gate(state);

    // === Defeated enemies ===
    remove_defeated(state);

    state.pulses.update(dt);

    if state.phase == GamePhase::Playing && state.player.pos.y < DEATH_Y {
        log::debug!("Player fell out of the world");
        state.respawn();
    }
}

/// Movement, coyote time, jump, float and the sleep pulse
fn apply_input(state: &mut GameState, input: &TickInput, dt: f32) {
    let elapsed = state.elapsed;
    let player = &mut state.player;

    let speed = if player.speed_boost_active(elapsed) {
        PLAYER_SPEED * SPEED_BOOST_MULTIPLIER
    } else {
        PLAYER_SPEED
    };
    player.vel.x = input.move_x.clamp(-1.0, 1.0) * speed;

    if player.grounded {
        player.coyote_time = COYOTE_TIME;
    } else {
        player.coyote_time = (player.coyote_time - dt).max(0.0);
    }

    if input.jump && (player.grounded || player.coyote_time > 0.0) {
        let boost = if player.super_jump_active(elapsed) {
            SUPER_JUMP_MULTIPLIER
        } else {
            1.0
        };
        player.vel.y = JUMP_VELOCITY * boost;
        player.grounded = false;
        player.coyote_time = 0.0;
        state.events.push(GameEvent::Jumped);
    }

    if input.float && !player.grounded && !player.is_floating && elapsed >= player.float_ready_at {
        player.is_floating = true;
        player.float_until = elapsed + FLOAT_DURATION;
        player.float_ready_at = elapsed + FLOAT_COOLDOWN;
        state.events.push(GameEvent::FloatStarted);
    }

    if !input.sleep {
        return;
    }
    let Some(outcome) = activate_sleep_ability(
        &mut state.player,
        &mut state.enemies,
        &mut state.pulses,
        elapsed,
    ) else {
        return;
    };

    state.events.push(GameEvent::SleepPulse {
        origin: outcome.origin,
        radius: outcome.radius,
    });
    for id in outcome.slept {
        state.events.push(GameEvent::EnemySlept { id });
    }
    for (_, remaining_health) in outcome.boss_hits {
        state
            .events
            .push(GameEvent::BossHit { remaining_health });
    }
    state.pending_removals.extend(outcome.defeated);
}

fn check_checkpoint(state: &mut GameState) {
    if state.checkpoint_active || !state.player.rect().intersects(&state.level.checkpoint) {
        return;
    }
    state.checkpoint_active = true;
    state.player.respawn = state.level.spawn;
    state.events.push(GameEvent::CheckpointReached);
    log::debug!("Checkpoint reached in level {}", state.level.index + 1);
}

fn check_gate(state: &mut GameState) {
    if state.phase != GamePhase::Playing || !state.gate_open() {
        return;
    }
    let gate = state.level.gate.expanded(GATE_TOLERANCE);
    if !state.player.rect().intersects(&gate) {
        return;
    }

    state.events.push(GameEvent::LevelCompleted {
        index: state.level.index,
    });
    match state.levels.advance(state.player.health) {
        AdvanceResult::Next(start) => {
            state.pending_level = Some(start);
            state.phase = GamePhase::Transition {
                remaining: LEVEL_TRANSITION_DELAY,
            };
        }
        AdvanceResult::Completed(stats) => {
            state.phase = GamePhase::Completed;
            state.events.push(GameEvent::RunCompleted(stats));
        }
    }
}

/// Compact the enemy list, dropping everything defeated this tick
fn remove_defeated(state: &mut GameState) {
    if state.pending_removals.is_empty() {
        return;
    }
    let pending = std::mem::take(&mut state.pending_removals);
    let mut bosses_removed = 0;
    state.enemies.retain(|enemy| {
        if !pending.contains(&enemy.id) {
            return true;
        }
        if enemy.is_boss() {
            bosses_removed += 1;
        }
        false
    });

    for _ in 0..bosses_removed {
        state.events.push(GameEvent::BossDefeated);
    }
    state.boss_remaining = state.boss_remaining.saturating_sub(bosses_removed);
}

fn advance_transition(state: &mut GameState, remaining: f32) {
    if remaining > 0.0 {
        state.phase = GamePhase::Transition { remaining };
        return;
    }
    match state.pending_level.take() {
        Some(start) => state.load(start),
        None => state.phase = GamePhase::Playing,
    }
}
