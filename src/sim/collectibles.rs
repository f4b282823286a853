//! Note and pickup collection

use super::entity::{Note, Pickup, PickupKind, Player};
use crate::consts::*;

/// A note picked up this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteCollected {
    pub index: usize,
    /// Combo count after this note
    pub combo: u32,
}

/// A pickup consumed this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupCollected {
    pub kind: PickupKind,
    /// Health actually restored (Health pickups at full health restore 0)
    pub healed: i32,
}

/// Collect every uncollected note within reach of the player's center
pub fn collect_notes(player: &mut Player, notes: &mut [Note], elapsed: f32) -> Vec<NoteCollected> {
    let center = player.center();
    let reach_sq = NOTE_PICKUP_RADIUS * NOTE_PICKUP_RADIUS;
    let mut collected = Vec::new();

    for (index, note) in notes.iter_mut().enumerate() {
        if note.is_collected() || note.pos.distance_squared(center) > reach_sq {
            continue;
        }
        if !note.collect() {
            continue;
        }

        player.notes += 1;
        if elapsed - player.last_collect_time > COMBO_WINDOW || player.combo_count == 0 {
            player.combo_count = 1;
        } else {
            player.combo_count += 1;
        }
        player.last_collect_time = elapsed;

        collected.push(NoteCollected {
            index,
            combo: player.combo_count,
        });
    }

    collected
}

/// Collect every uncollected pickup overlapping the player and apply its effect
pub fn collect_pickups(
    player: &mut Player,
    pickups: &mut [Pickup],
    elapsed: f32,
) -> Vec<PickupCollected> {
    let rect = player.rect();
    let mut collected = Vec::new();

    for pickup in pickups.iter_mut() {
        if pickup.is_collected() || !rect.intersects(&pickup.rect()) {
            continue;
        }
        if !pickup.collect() {
            continue;
        }

        let expires = elapsed + POWER_UP_DURATION;
        let mut healed = 0;
        match pickup.kind {
            PickupKind::Health => healed = player.heal(1),
            PickupKind::SpeedBoost => player.speed_boost_until = expires,
            PickupKind::SuperJump => player.super_jump_until = expires,
            PickupKind::ExtendedSleep => player.extended_sleep_until = expires,
            // Counted by the level manager only
            PickupKind::GoldenMelodyShard => {}
        }

        collected.push(PickupCollected {
            kind: pickup.kind,
            healed,
        });
    }

    collected
}
