//! Enemy behavior: wake timers, per-kind motion and player contact
//!
//! Enemies only fall asleep through the sleep pulse; waking is purely
//! timer-driven and happens on the first update at or past `sleep_until`.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::collision::solid_rect;
use super::entity::{Enemy, EnemyKind, EnemyState, Player};
use super::rect::Rect;
use crate::consts::*;

/// What happened when the player touched enemies this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactOutcome {
    /// Sprang off a sleeping critter
    pub bounced: bool,
    /// Took a hit from an awake enemy
    pub took_damage: bool,
}

/// Advance every enemy by one step
pub fn update_enemies(enemies: &mut [Enemy], elapsed: f32, dt: f32) {
    for enemy in enemies.iter_mut() {
        if enemy.is_asleep() && elapsed >= enemy.sleep_until {
            enemy.wake();
        }

        match enemy.state {
            EnemyState::Awake => update_awake(enemy, elapsed, dt),
            EnemyState::Asleep => update_asleep(enemy, dt),
        }
    }
}

fn update_awake(enemy: &mut Enemy, elapsed: f32, dt: f32) {
    match enemy.kind {
        EnemyKind::BounceCritter { bob } => {
            if let Some(bob) = bob {
                enemy.pos.y = enemy.base_y + (elapsed * bob.freq * TAU).sin() * bob.amp;
            }
        }
        EnemyKind::Boss { .. } => {
            patrol(enemy, dt);
            enemy.pos.y = enemy.base_y + (elapsed * BOSS_BOB_SPEED).sin() * BOSS_BOB_AMPLITUDE;
        }
        EnemyKind::SleeperPlatform
        | EnemyKind::GrumbleRock { .. }
        | EnemyKind::PuffyPuffer { .. }
        | EnemyKind::DrowsySnail { .. } => patrol(enemy, dt),
    }
}

fn update_asleep(enemy: &mut Enemy, dt: f32) {
    match &mut enemy.kind {
        EnemyKind::BounceCritter { .. } | EnemyKind::Boss { .. } => enemy.pos.y = enemy.base_y,
        EnemyKind::GrumbleRock {
            lift,
            lift_start_y,
            lift_progress,
        } => {
            let step = if lift.duration > 0.0 {
                dt / lift.duration
            } else {
                0.0
            };
            *lift_progress = (*lift_progress + step) % 1.0;
            enemy.pos.y = *lift_start_y + (*lift_progress * PI).sin() * lift.height;
        }
        EnemyKind::PuffyPuffer { deflation_progress } => {
            *deflation_progress = (*deflation_progress + dt * PUFFER_DEFLATE_RATE).min(1.0);
            enemy.pos.y = enemy.base_y + *deflation_progress * PUFFER_DEFLATE_OFFSET;
        }
        EnemyKind::SleeperPlatform | EnemyKind::DrowsySnail { .. } => {}
    }
}

/// Move horizontally, turning around at the patrol bounds
fn patrol(enemy: &mut Enemy, dt: f32) {
    enemy.pos.x += enemy.vel.x * dt;
    let Some(bounds) = enemy.patrol else {
        return;
    };
    if enemy.pos.x < bounds.x_min {
        enemy.pos.x = bounds.x_min;
        enemy.direction = 1.0;
        enemy.vel.x = enemy.awake_speed.abs();
    }
    if enemy.pos.x + enemy.size.x > bounds.x_max {
        enemy.pos.x = bounds.x_max - enemy.size.x;
        enemy.direction = -1.0;
        enemy.vel.x = -enemy.awake_speed.abs();
    }
}

/// The walkable enemy a grounded player is standing on, with its surface height
pub fn supporting_enemy(player: &Player, enemies: &[Enemy]) -> Option<(u32, f32)> {
    if !player.grounded {
        return None;
    }
    let feet = player.rect();
    enemies
        .iter()
        .filter_map(|enemy| solid_rect(enemy).map(|rect| (enemy.id, rect)))
        .filter(|(_, rect)| {
            (rect.top() - feet.y).abs() <= RIDE_TOLERANCE
                && feet.x < rect.right()
                && feet.right() > rect.x
        })
        .last()
        .map(|(id, rect)| (id, rect.top()))
}

/// Move a rider by however far its support's surface moved this step
pub fn carry_rider(player: &mut Player, enemies: &[Enemy], support: (u32, f32)) {
    let (id, old_top) = support;
    let Some(rect) = enemies
        .iter()
        .find(|enemy| enemy.id == id)
        .and_then(solid_rect)
    else {
        return;
    };
    player.pos.y += rect.top() - old_top;
}

/// Resolve player contact with enemies: springboard bounces off sleeping
/// critters and at most one hit from an awake enemy per tick.
pub fn handle_enemy_interactions(
    player: &mut Player,
    enemies: &[Enemy],
    prev: Vec2,
    elapsed: f32,
) -> ContactOutcome {
    let mut outcome = ContactOutcome::default();

    for enemy in enemies {
        let rect = enemy.rect();

        if matches!(enemy.kind, EnemyKind::BounceCritter { .. }) && enemy.is_asleep() {
            // Sleeping critters are solid, so a landed player rests exactly on
            // top; reach a little above the surface to catch that contact.
            let pad = Rect::new(rect.x, rect.y, rect.w, rect.h + BOUNCE_LANDING_SLOP);
            let was_above = prev.y >= rect.top() - BOUNCE_LANDING_SLOP;
            if player.rect().intersects(&pad) && was_above && player.vel.y <= 0.0 {
                player.pos.y = rect.top();
                player.bounce();
                outcome.bounced = true;
            }
            continue;
        }

        if !player.rect().intersects(&rect) {
            continue;
        }

        if enemy.is_harmful() && !player.is_invulnerable(elapsed) {
            player.hurt(1);
            player.invulnerable_until = elapsed + INVULN_TIME;
            player.pos = prev;
            player.vel = Vec2::ZERO;
            player.grounded = false;
            player.coyote_time = 0.0;
            outcome.took_damage = true;
            break;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{EnemySpawn, SpawnKind};

    fn spawn(kind: SpawnKind, x: f32, y: f32) -> EnemySpawn {
        EnemySpawn::new(kind, x, y)
    }

    #[test]
    fn test_wakes_on_first_tick_past_deadline() {
        let mut enemies = vec![Enemy::from_spawn(1, &spawn(SpawnKind::SleeperPlatform, 0.0, 0.0))];
        enemies[0].sleep(0.0, 1.0);

        update_enemies(&mut enemies, 0.99, SIM_DT);
        assert!(enemies[0].is_asleep());

        update_enemies(&mut enemies, 1.0, SIM_DT);
        assert_eq!(enemies[0].state, EnemyState::Awake);
        assert!(enemies[0].is_harmful());
    }

    #[test]
    fn test_patrol_turns_at_bounds() {
        let mut enemies = vec![Enemy::from_spawn(
            1,
            &spawn(SpawnKind::SleeperPlatform, 16.99, 4.5).with_patrol(12.0, 20.0),
        )];
        // Width 3: right edge passes 20 on the first step
        update_enemies(&mut enemies, SIM_DT, SIM_DT);
        assert_eq!(enemies[0].pos.x, 17.0);
        assert_eq!(enemies[0].direction, -1.0);
        assert_eq!(enemies[0].vel.x, -2.0);

        enemies[0].pos.x = 12.01;
        update_enemies(&mut enemies, 2.0 * SIM_DT, SIM_DT);
        assert_eq!(enemies[0].pos.x, 12.0);
        assert_eq!(enemies[0].direction, 1.0);
        assert_eq!(enemies[0].vel.x, 2.0);
    }

    #[test]
    fn test_sleeping_enemy_holds_still() {
        let mut enemies = vec![Enemy::from_spawn(
            1,
            &spawn(SpawnKind::DrowsySnail, 44.0, 1.0).with_patrol(42.0, 54.0),
        )];
        enemies[0].sleep(0.0, SLEEP_DURATION);
        for i in 1..60 {
            update_enemies(&mut enemies, i as f32 * SIM_DT, SIM_DT);
        }
        assert_eq!(enemies[0].pos, Vec2::new(44.0, 1.0));
    }

    #[test]
    fn test_critter_bobs_awake_and_rests_asleep() {
        let mut enemies = vec![Enemy::from_spawn(
            1,
            &spawn(SpawnKind::BounceCritter, 28.0, 3.5).with_bob(1.0, 1.0),
        )];
        // Quarter cycle: peak of the bob
        update_enemies(&mut enemies, 0.25, SIM_DT);
        assert!((enemies[0].pos.y - 4.5).abs() < 1e-4);
        assert_eq!(enemies[0].pos.x, 28.0);

        enemies[0].sleep(0.25, SLEEP_DURATION);
        update_enemies(&mut enemies, 0.3, SIM_DT);
        assert_eq!(enemies[0].pos.y, 3.5);
    }

    #[test]
    fn test_boss_bobs_while_awake() {
        let mut enemies = vec![Enemy::from_spawn(1, &spawn(SpawnKind::Boss, 30.0, 1.0))];
        let elapsed = std::f32::consts::FRAC_PI_2 / BOSS_BOB_SPEED;
        update_enemies(&mut enemies, elapsed, SIM_DT);
        assert!((enemies[0].pos.y - (1.0 + BOSS_BOB_AMPLITUDE)).abs() < 1e-4);

        enemies[0].sleep(elapsed, 1.0);
        update_enemies(&mut enemies, elapsed + SIM_DT, SIM_DT);
        assert_eq!(enemies[0].pos.y, 1.0);
    }

    #[test]
    fn test_grumble_rock_lift_cycle() {
        let mut enemies = vec![Enemy::from_spawn(
            1,
            &spawn(SpawnKind::GrumbleRock, 27.0, 1.0).with_lift(3.0, 6.0),
        )];
        enemies[0].sleep(0.0, 100.0);

        // Half the cycle: top of the lift
        update_enemies(&mut enemies, 3.0, 3.0);
        assert!((enemies[0].pos.y - 4.0).abs() < 1e-4);

        // Full cycle wraps back to the start height
        update_enemies(&mut enemies, 6.0, 3.0);
        assert!((enemies[0].pos.y - 1.0).abs() < 1e-4);
        assert!(matches!(
            enemies[0].kind,
            EnemyKind::GrumbleRock { lift_progress, .. } if lift_progress < 1e-4
        ));
    }

    #[test]
    fn test_puffer_deflates_once_and_clamps() {
        let mut enemies = vec![Enemy::from_spawn(1, &spawn(SpawnKind::PuffyPuffer, 18.5, 1.5))];
        enemies[0].sleep(0.0, 100.0);
        update_enemies(&mut enemies, 1.0, 1.0);
        assert!((enemies[0].pos.y - (1.5 + 0.5 * PUFFER_DEFLATE_OFFSET)).abs() < 1e-5);

        update_enemies(&mut enemies, 5.0, 4.0);
        assert!(matches!(
            enemies[0].kind,
            EnemyKind::PuffyPuffer { deflation_progress } if deflation_progress == 1.0
        ));
        assert!((enemies[0].pos.y - (1.5 + PUFFER_DEFLATE_OFFSET)).abs() < 1e-5);
    }

    #[test]
    fn test_deflating_puffer_carries_rider() {
        let mut enemies = vec![Enemy::from_spawn(1, &spawn(SpawnKind::PuffyPuffer, 18.5, 1.5))];
        enemies[0].sleep(0.0, 100.0);
        let top = solid_rect(&enemies[0]).expect("sleeping puffer is walkable").top();
        let mut player = Player::new(Vec2::new(19.0, top), MAX_HEALTH);
        player.grounded = true;

        for i in 1..=150 {
            let support = supporting_enemy(&player, &enemies).expect("standing on the cloud");
            update_enemies(&mut enemies, i as f32 * SIM_DT, SIM_DT);
            carry_rider(&mut player, &enemies, support);
        }
        let cloud = solid_rect(&enemies[0]).expect("sleeping puffer is walkable");
        assert!((player.pos.y - cloud.top()).abs() < 1e-4);
        assert!((cloud.top() - (top + PUFFER_DEFLATE_OFFSET)).abs() < 1e-4);
    }

    #[test]
    fn test_no_support_when_airborne_or_beside() {
        let enemies = [Enemy::from_spawn(1, &spawn(SpawnKind::GrumbleRock, 5.0, 1.0))];
        let mut player = Player::new(Vec2::new(5.5, 3.0), MAX_HEALTH);
        assert_eq!(supporting_enemy(&player, &enemies), None);

        player.grounded = true;
        assert_eq!(supporting_enemy(&player, &enemies), Some((1, 3.0)));

        player.pos.x = 8.0;
        assert_eq!(supporting_enemy(&player, &enemies), None);
    }

    #[test]
    fn test_contact_damage_restores_previous_position() {
        let enemies = vec![Enemy::from_spawn(1, &spawn(SpawnKind::Boss, 3.0, 1.0))];
        let mut player = Player::new(Vec2::new(2.5, 1.0), MAX_HEALTH);
        player.vel = Vec2::new(8.0, 0.0);
        let prev = Vec2::new(1.5, 1.0);

        let outcome = handle_enemy_interactions(&mut player, &enemies, prev, 2.0);
        assert!(outcome.took_damage);
        assert_eq!(player.health, MAX_HEALTH - 1);
        assert_eq!(player.pos, prev);
        assert_eq!(player.vel, Vec2::ZERO);
        assert_eq!(player.invulnerable_until, 2.0 + INVULN_TIME);

        // Invulnerable: second contact does nothing
        player.pos = Vec2::new(2.5, 1.0);
        let outcome = handle_enemy_interactions(&mut player, &enemies, prev, 2.5);
        assert!(!outcome.took_damage);
        assert_eq!(player.health, MAX_HEALTH - 1);
    }

    #[test]
    fn test_one_hit_per_tick() {
        let enemies = vec![
            Enemy::from_spawn(1, &spawn(SpawnKind::Boss, 3.0, 1.0)),
            Enemy::from_spawn(2, &spawn(SpawnKind::DrowsySnail, 2.0, 1.0)),
        ];
        let mut player = Player::new(Vec2::new(2.5, 1.0), MAX_HEALTH);
        handle_enemy_interactions(&mut player, &enemies, Vec2::new(0.0, 1.0), 0.0);
        assert_eq!(player.health, MAX_HEALTH - 1);
    }

    #[test]
    fn test_sleeping_enemy_is_harmless() {
        let mut boss = Enemy::from_spawn(1, &spawn(SpawnKind::Boss, 3.0, 1.0));
        boss.sleep(0.0, 2.0);
        let mut player = Player::new(Vec2::new(3.5, 1.5), MAX_HEALTH);
        let outcome = handle_enemy_interactions(&mut player, &[boss], Vec2::new(3.5, 1.5), 0.5);
        assert_eq!(outcome, ContactOutcome::default());
        assert_eq!(player.health, MAX_HEALTH);
    }

    #[test]
    fn test_bounce_off_sleeping_critter() {
        let mut critter = Enemy::from_spawn(1, &spawn(SpawnKind::BounceCritter, 28.0, 3.5));
        critter.sleep(0.0, SLEEP_DURATION);
        // Resting exactly on top, as the collision pass leaves it
        let mut player = Player::new(Vec2::new(28.2, 4.9), MAX_HEALTH);
        player.grounded = true;

        let outcome = handle_enemy_interactions(&mut player, &[critter], Vec2::new(28.2, 5.1), 1.0);
        assert!(outcome.bounced);
        assert_eq!(player.vel.y, BOUNCE_VELOCITY);
        assert!(!player.grounded);
        assert_eq!(player.health, MAX_HEALTH);
    }

    #[test]
    fn test_no_bounce_from_below() {
        let mut critter = Enemy::from_spawn(1, &spawn(SpawnKind::BounceCritter, 28.0, 3.5));
        critter.sleep(0.0, SLEEP_DURATION);
        let mut player = Player::new(Vec2::new(28.2, 2.5), MAX_HEALTH);
        player.vel.y = 5.0;
        let outcome = handle_enemy_interactions(&mut player, &[critter], Vec2::new(28.2, 2.4), 1.0);
        assert!(!outcome.bounced);
        assert_eq!(player.vel.y, 5.0);
    }
}
