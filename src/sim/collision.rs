//! Player physics and AABB collision resolution
//!
//! Gravity is integrated first, then each axis is moved and resolved in turn
//! (vertical, then horizontal). Which face was crossed is decided from the
//! player's position at the start of the tick, so fast falls can't tunnel
//! through thin platforms as long as they are crossed within one step.
//!
//! Rects are resolved in list order without re-checking; when several solids
//! qualify at once the last one wins.

use super::entity::{Enemy, EnemyKind, Player};
use super::rect::Rect;
use crate::consts::*;

/// Integrate gravity and velocity for one step and resolve collisions
/// against platforms plus any enemy that is currently walkable.
pub fn apply_physics(
    player: &mut Player,
    enemies: &[Enemy],
    platforms: &[Rect],
    dt: f32,
    prev_x: f32,
    prev_y: f32,
) {
    let gravity_multiplier = if player.is_floating {
        FLOAT_GRAVITY_REDUCTION
    } else {
        1.0
    };
    player.vel.y -= GRAVITY * gravity_multiplier * dt;

    let solids = collect_solid_rects(platforms, enemies);

    player.pos.y += player.vel.y * dt;
    resolve_vertical(player, prev_y, &solids);

    player.pos.x += player.vel.x * dt;
    resolve_horizontal(player, prev_x, &solids);
}

/// Static platforms followed by walkable enemy footprints, in enemy order
pub fn collect_solid_rects(platforms: &[Rect], enemies: &[Enemy]) -> Vec<Rect> {
    let mut rects = platforms.to_vec();
    rects.extend(enemies.iter().filter_map(solid_rect));
    rects
}

/// The rect an enemy contributes to the solid set this tick, if any
pub fn solid_rect(enemy: &Enemy) -> Option<Rect> {
    let rect = enemy.rect();
    match enemy.kind {
        EnemyKind::SleeperPlatform | EnemyKind::GrumbleRock { .. } | EnemyKind::DrowsySnail { .. } => {
            Some(rect)
        }
        EnemyKind::BounceCritter { .. } if enemy.is_asleep() => Some(rect),
        // A sleeping puffer is a soft cloud: only its top slice is walkable
        EnemyKind::PuffyPuffer { .. } if enemy.is_asleep() => {
            let h = rect.h * PUFFER_PLATFORM_FRACTION;
            Some(Rect::new(rect.x, rect.top() - h, rect.w, h))
        }
        _ => None,
    }
}

fn resolve_vertical(player: &mut Player, prev_y: f32, solids: &[Rect]) {
    player.grounded = false;
    for rect in solids {
        if !player.rect().intersects(rect) {
            continue;
        }
        if player.vel.y <= 0.0 && prev_y >= rect.top() {
            // Landed on top
            player.pos.y = rect.top();
            player.vel.y = 0.0;
            player.grounded = true;
        } else if player.vel.y > 0.0 && prev_y + player.size.y <= rect.y {
            // Bumped head on underside
            player.pos.y = rect.y - player.size.y;
            player.vel.y = 0.0;
        }
    }
}

fn resolve_horizontal(player: &mut Player, prev_x: f32, solids: &[Rect]) {
    for rect in solids {
        if !player.rect().intersects(rect) {
            continue;
        }
        if player.vel.x > 0.0 && prev_x + player.size.x <= rect.x {
            player.pos.x = rect.x - player.size.x;
            player.vel.x = 0.0;
        } else if player.vel.x < 0.0 && prev_x >= rect.right() {
            player.pos.x = rect.right();
            player.vel.x = 0.0;
        }
    }
}
