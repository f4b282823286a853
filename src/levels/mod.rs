//! Level data provider
//!
//! Levels are static, read-only descriptors: platform rects, enemy spawn
//! descriptors, note/pickup positions, a checkpoint and an exit gate. They come
//! either from the built-in set or from a JSON level pack, and are validated
//! once before the level manager ever sees them.

mod builtin;

pub use builtin::builtin_levels;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::entity::{Bob, Lift, Patrol, PickupKind};
use crate::sim::rect::Rect;

/// Errors raised while loading or validating level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level pack contains no levels")]
    NoLevels,
    #[error("level `{level}`: {what} is not a finite rectangle with positive size")]
    InvalidRect { level: String, what: String },
    #[error("level `{level}`: enemy {enemy} has an empty patrol range {x_min}..{x_max}")]
    EmptyPatrol {
        level: String,
        enemy: usize,
        x_min: f32,
        x_max: f32,
    },
    #[error("level `{level}`: note goal {goal} exceeds the {available} notes placed")]
    UnreachableNoteGoal {
        level: String,
        goal: u32,
        available: usize,
    },
    #[error("level index {0} is out of range")]
    UnknownLevel(usize),
    #[error("malformed level pack: {0}")]
    Json(#[from] serde_json::Error),
}

/// A point in world space (notes, checkpoints)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which enemy a spawn descriptor creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    SleeperPlatform,
    BounceCritter,
    Boss,
    GrumbleRock,
    PuffyPuffer,
    DrowsySnail,
}

/// Static enemy placement. Kind-specific fields are ignored by kinds that
/// don't use them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: SpawnKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub patrol: Option<Patrol>,
    #[serde(default)]
    pub bob: Option<Bob>,
    /// Boss hit points
    #[serde(default)]
    pub health: Option<i32>,
    /// Pulses a DrowsySnail needs before it falls asleep
    #[serde(default)]
    pub sleep_pulses_required: Option<u32>,
    /// GrumbleRock lift while asleep
    #[serde(default)]
    pub lift: Option<Lift>,
}

impl EnemySpawn {
    /// Bare spawn with no kind-specific data
    pub fn new(kind: SpawnKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            patrol: None,
            bob: None,
            health: None,
            sleep_pulses_required: None,
            lift: None,
        }
    }

    pub fn with_patrol(mut self, x_min: f32, x_max: f32) -> Self {
        self.patrol = Some(Patrol { x_min, x_max });
        self
    }

    pub fn with_bob(mut self, amp: f32, freq: f32) -> Self {
        self.bob = Some(Bob { amp, freq });
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_sleep_pulses(mut self, required: u32) -> Self {
        self.sleep_pulses_required = Some(required);
        self
    }

    pub fn with_lift(mut self, height: f32, duration: f32) -> Self {
        self.lift = Some(Lift { height, duration });
        self
    }
}

/// Static pickup placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupSpawn {
    pub kind: PickupKind,
    pub x: f32,
    pub y: f32,
}

/// One level's authored content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub notes: Vec<Point>,
    #[serde(default)]
    pub pickups: Vec<PickupSpawn>,
    pub checkpoint: Point,
    pub gate: Rect,
    /// Notes required to open the gate (defaults to every note placed)
    #[serde(default)]
    pub note_goal: Option<u32>,
}

impl LevelData {
    /// Notes required before the gate opens
    pub fn note_goal(&self) -> u32 {
        self.note_goal.unwrap_or(self.notes.len() as u32)
    }

    /// Bosses that must be defeated before the gate opens
    pub fn boss_count(&self) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.kind == SpawnKind::Boss)
            .count()
    }

    /// Check the level can be loaded and finished
    pub fn validate(&self) -> Result<(), LevelError> {
        let invalid = |what: String| LevelError::InvalidRect {
            level: self.name.clone(),
            what,
        };

        for (i, platform) in self.platforms.iter().enumerate() {
            if !platform.is_well_formed() {
                return Err(invalid(format!("platform {i}")));
            }
        }
        if !self.gate.is_well_formed() {
            return Err(invalid("gate".to_string()));
        }

        for (i, enemy) in self.enemies.iter().enumerate() {
            let Some(patrol) = enemy.patrol else {
                continue;
            };
            if patrol.x_min >= patrol.x_max {
                return Err(LevelError::EmptyPatrol {
                    level: self.name.clone(),
                    enemy: i,
                    x_min: patrol.x_min,
                    x_max: patrol.x_max,
                });
            }
        }

        let goal = self.note_goal();
        if goal as usize > self.notes.len() {
            return Err(LevelError::UnreachableNoteGoal {
                level: self.name.clone(),
                goal,
                available: self.notes.len(),
            });
        }

        Ok(())
    }
}

/// Validate a whole level pack
pub fn validate_all(levels: &[LevelData]) -> Result<(), LevelError> {
    if levels.is_empty() {
        return Err(LevelError::NoLevels);
    }
    levels.iter().try_for_each(LevelData::validate)
}

/// Parse and validate a JSON level pack (an array of levels)
pub fn from_json(json: &str) -> Result<Vec<LevelData>, LevelError> {
    let levels: Vec<LevelData> = serde_json::from_str(json)?;
    validate_all(&levels)?;
    log::info!("Loaded level pack with {} levels", levels.len());
    Ok(levels)
}
