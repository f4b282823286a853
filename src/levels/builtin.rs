//! Built-in level set

use super::{EnemySpawn, LevelData, PickupSpawn, Point, SpawnKind};
use crate::sim::entity::PickupKind;
use crate::sim::rect::Rect;

/// The three levels of a standard run, in play order
pub fn builtin_levels() -> Vec<LevelData> {
    vec![meadow_lullaby(), cloud_hop(), conductors_keep()]
}

fn meadow_lullaby() -> LevelData {
    LevelData {
        name: "Meadow Lullaby".to_string(),
        platforms: vec![
            Rect::new(0.0, 0.0, 60.0, 1.0),
            Rect::new(6.0, 2.0, 4.0, 1.0),
            Rect::new(12.0, 3.5, 5.0, 1.0),
            Rect::new(19.0, 5.5, 4.0, 1.0),
            Rect::new(27.0, 2.5, 5.0, 1.0),
            Rect::new(32.0, 4.5, 4.0, 1.0),
            Rect::new(42.0, 3.0, 5.0, 1.0),
            Rect::new(52.0, 2.0, 6.0, 1.0),
        ],
        enemies: vec![
            EnemySpawn::new(SpawnKind::SleeperPlatform, 14.0, 4.5).with_patrol(12.0, 20.0),
            EnemySpawn::new(SpawnKind::BounceCritter, 28.0, 3.5).with_bob(1.0, 1.2),
            EnemySpawn::new(SpawnKind::SleeperPlatform, 36.0, 5.0).with_patrol(34.0, 40.0),
            EnemySpawn::new(SpawnKind::BounceCritter, 48.0, 3.5).with_bob(1.2, 1.0),
        ],
        notes: vec![
            Point::new(4.0, 2.2),
            Point::new(18.0, 6.7),
            Point::new(33.0, 6.3),
            Point::new(45.0, 5.0),
            Point::new(56.0, 3.0),
        ],
        pickups: vec![PickupSpawn {
            kind: PickupKind::Health,
            x: 24.0,
            y: 1.2,
        }],
        checkpoint: Point::new(2.0, 0.0),
        gate: Rect::new(60.0, 1.0, 2.0, 4.0),
        note_goal: None,
    }
}

fn cloud_hop() -> LevelData {
    LevelData {
        name: "Cloud Hop".to_string(),
        platforms: vec![
            Rect::new(0.0, 0.0, 18.0, 1.0),
            Rect::new(24.0, 0.0, 10.0, 1.0),
            Rect::new(40.0, 0.0, 30.0, 1.0),
            Rect::new(9.0, 3.0, 4.0, 1.0),
            Rect::new(36.0, 5.0, 3.0, 1.0),
            Rect::new(55.0, 4.0, 5.0, 1.0),
        ],
        enemies: vec![
            EnemySpawn::new(SpawnKind::PuffyPuffer, 18.5, 1.5).with_patrol(18.0, 24.0),
            EnemySpawn::new(SpawnKind::GrumbleRock, 27.0, 1.0)
                .with_patrol(24.0, 34.0)
                .with_lift(3.0, 6.0),
            EnemySpawn::new(SpawnKind::PuffyPuffer, 34.5, 2.0).with_patrol(34.0, 40.0),
            EnemySpawn::new(SpawnKind::DrowsySnail, 46.0, 1.0)
                .with_patrol(42.0, 54.0)
                .with_sleep_pulses(2),
            EnemySpawn::new(SpawnKind::BounceCritter, 61.0, 2.0).with_bob(0.8, 1.4),
        ],
        notes: vec![
            Point::new(11.0, 4.6),
            Point::new(21.0, 4.2),
            Point::new(30.0, 5.0),
            Point::new(37.5, 6.6),
            Point::new(57.0, 5.6),
            Point::new(64.0, 2.0),
        ],
        pickups: vec![
            PickupSpawn {
                kind: PickupKind::SpeedBoost,
                x: 10.5,
                y: 4.2,
            },
            PickupSpawn {
                kind: PickupKind::SuperJump,
                x: 44.0,
                y: 1.2,
            },
            PickupSpawn {
                kind: PickupKind::Health,
                x: 56.0,
                y: 5.2,
            },
        ],
        checkpoint: Point::new(2.0, 0.0),
        note_goal: Some(5),
        gate: Rect::new(67.0, 1.0, 2.0, 4.0),
    }
}

fn conductors_keep() -> LevelData {
    LevelData {
        name: "The Conductor's Keep".to_string(),
        platforms: vec![
            Rect::new(0.0, 0.0, 72.0, 1.0),
            Rect::new(8.0, 3.0, 4.0, 1.0),
            Rect::new(16.0, 5.0, 4.0, 1.0),
            Rect::new(46.0, 4.0, 3.0, 1.0),
            Rect::new(60.0, 3.0, 4.0, 1.0),
        ],
        enemies: vec![
            EnemySpawn::new(SpawnKind::SleeperPlatform, 22.0, 6.5).with_patrol(21.0, 28.0),
            EnemySpawn::new(SpawnKind::Boss, 32.0, 1.0)
                .with_patrol(28.0, 44.0)
                .with_health(3),
            EnemySpawn::new(SpawnKind::DrowsySnail, 52.0, 1.0)
                .with_patrol(50.0, 58.0)
                .with_sleep_pulses(3),
        ],
        notes: vec![
            Point::new(10.0, 4.6),
            Point::new(18.0, 6.6),
            Point::new(38.0, 6.0),
            Point::new(47.5, 5.6),
            Point::new(62.0, 4.6),
        ],
        pickups: vec![
            PickupSpawn {
                kind: PickupKind::ExtendedSleep,
                x: 17.5,
                y: 6.2,
            },
            PickupSpawn {
                kind: PickupKind::GoldenMelodyShard,
                x: 24.0,
                y: 8.5,
            },
        ],
        checkpoint: Point::new(2.0, 0.0),
        gate: Rect::new(68.0, 1.0, 2.0, 4.0),
        note_goal: None,
    }
}
