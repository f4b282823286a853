//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;

use lullaby::consts::*;
use lullaby::levels::{EnemySpawn, Point, SpawnKind, builtin_levels};
use lullaby::sim::{
    AdvanceResult, Enemy, EnemyState, GameState, LevelManager, Note, Player, PulsePool, Rect,
    TickInput, activate_sleep_ability, apply_physics, collect_notes, tick, update_enemies,
};

#[derive(Debug, Clone)]
enum HealthOp {
    Hurt(i32),
    Heal(i32),
}

fn health_op() -> impl Strategy<Value = HealthOp> {
    prop_oneof![
        (0..5i32).prop_map(HealthOp::Hurt),
        (0..5i32).prop_map(HealthOp::Heal),
    ]
}

fn tick_input() -> impl Strategy<Value = TickInput> {
    (-1.0f32..=1.0, any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(move_x, jump, sleep, float)| TickInput {
            move_x,
            jump,
            sleep,
            float,
        },
    )
}

proptest! {
    #[test]
    fn health_stays_in_range(ops in prop::collection::vec(health_op(), 0..40)) {
        let mut player = Player::new(Vec2::ZERO, MAX_HEALTH);
        for op in ops {
            match op {
                HealthOp::Hurt(n) => { player.hurt(n); }
                HealthOp::Heal(n) => { player.heal(n); }
            }
            prop_assert!((0..=MAX_HEALTH).contains(&player.health));
        }
    }

    #[test]
    fn notes_never_uncollect(offsets in prop::collection::vec((-1.0f32..1.0, -1.0f32..1.0), 1..12),
                             moves in prop::collection::vec((-2.0f32..2.0, -2.0f32..2.0), 1..20)) {
        let mut player = Player::new(Vec2::ZERO, MAX_HEALTH);
        let mut notes: Vec<Note> = offsets
            .iter()
            .map(|&(x, y)| Note::from_spawn(&Point::new(x, y)))
            .collect();
        let mut seen = vec![false; notes.len()];

        for (i, (dx, dy)) in moves.into_iter().enumerate() {
            player.pos = Vec2::new(dx, dy);
            collect_notes(&mut player, &mut notes, i as f32 * 0.5);
            for (note, was) in notes.iter().zip(seen.iter_mut()) {
                prop_assert!(!*was || note.is_collected());
                *was = note.is_collected();
            }
        }
        let collected = notes.iter().filter(|n| n.is_collected()).count() as u32;
        prop_assert_eq!(player.notes, collected);
    }

    #[test]
    fn sleeping_enemy_wakes_on_first_tick_past_deadline(duration in 0.05f32..6.0, start in 0.0f32..10.0) {
        let mut enemies = vec![Enemy::from_spawn(1, &EnemySpawn::new(SpawnKind::SleeperPlatform, 0.0, 0.0))];
        enemies[0].sleep(start, duration);
        prop_assert!(enemies[0].sleep_until > start);

        let mut elapsed = start;
        loop {
            elapsed += SIM_DT;
            update_enemies(&mut enemies, elapsed, SIM_DT);
            if elapsed >= enemies[0].sleep_until || enemies[0].state == EnemyState::Awake {
                break;
            }
            prop_assert!(enemies[0].is_asleep());
        }
        prop_assert_eq!(enemies[0].state, EnemyState::Awake);
    }

    #[test]
    fn snail_sleeps_on_second_pulse(gap in 1.5f32..60.0) {
        let mut player = Player::new(Vec2::new(10.0, 1.0), MAX_HEALTH);
        let mut snail = Enemy::from_spawn(1, &EnemySpawn::new(SpawnKind::DrowsySnail, 0.0, 0.0));
        snail.pos = player.center() - snail.size / 2.0;
        let mut enemies = vec![snail];
        let mut pulses = PulsePool::new();

        prop_assert!(activate_sleep_ability(&mut player, &mut enemies, &mut pulses, 0.0).is_some());
        prop_assert_eq!(enemies[0].state, EnemyState::Awake);
        prop_assert!(activate_sleep_ability(&mut player, &mut enemies, &mut pulses, gap).is_some());
        prop_assert!(enemies[0].is_asleep());
    }

    #[test]
    fn landing_from_above_grounds(x in 0.5f32..8.0, height in 0.0f32..0.3, vy in -15.0f32..-0.1) {
        let platforms = [Rect::new(0.0, 0.0, 10.0, 1.0)];
        let mut player = Player::new(Vec2::new(x, 1.0 + height), MAX_HEALTH);
        player.vel.y = vy;
        let prev = player.pos;
        let predicted = prev.y + (vy - GRAVITY * SIM_DT) * SIM_DT;
        apply_physics(&mut player, &[], &platforms, SIM_DT, prev.x, prev.y);
        if predicted < 1.0 {
            prop_assert!(player.grounded);
            prop_assert_eq!(player.vel.y, 0.0);
            prop_assert_eq!(player.pos.y, 1.0);
        }
        prop_assert!(player.pos.y >= 1.0);
    }

    #[test]
    fn carry_over_never_zero(health in -10i32..10) {
        let mut levels = LevelManager::new(builtin_levels()).expect("built-in levels are valid");
        levels.reset_run();
        match levels.advance(health) {
            AdvanceResult::Next(start) => {
                prop_assert!(start.preserved_health >= 1);
                prop_assert!(start.preserved_health <= MAX_HEALTH);
            }
            AdvanceResult::Completed(_) => prop_assert!(false, "first level is not final"),
        }
    }

    #[test]
    fn random_play_keeps_invariants(inputs in prop::collection::vec(tick_input(), 1..400)) {
        let mut state = GameState::new(builtin_levels()).expect("built-in levels are valid");
        for input in &inputs {
            tick(&mut state, input, SIM_DT);
            prop_assert!((0..=state.player.max_health).contains(&state.player.health));
            prop_assert!(state.player.pos.y >= DEATH_Y - 1.0);
            prop_assert!(state.pending_removals.is_empty());
            let mut ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), state.enemies.len());
        }
    }
}
