//! Level progression
//!
//! Walks an ordered, pre-validated level list. Each load produces a
//! [`LevelStart`] snapshot; the last level's gate ends the run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Enemy;
use super::rect::Rect;
use crate::consts::*;
use crate::levels::{LevelData, LevelError, validate_all};

/// Playable extent of a level, for camera clamping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBounds {
    pub width: f32,
    pub height: f32,
}

impl LevelBounds {
    /// Largest right/top extent of everything in the level, plus a margin,
    /// never smaller than the minimum world size
    pub fn compute(level: &LevelData) -> Self {
        let mut max_x: f32 = 0.0;
        let mut max_y: f32 = 0.0;
        let mut include = |rect: Rect| {
            max_x = max_x.max(rect.right());
            max_y = max_y.max(rect.top());
        };

        for platform in &level.platforms {
            include(*platform);
        }
        for note in &level.notes {
            include(Rect::new(note.x, note.y, 0.0, 0.0));
        }
        for pickup in &level.pickups {
            include(Rect::new(pickup.x, pickup.y, PICKUP_SIZE, PICKUP_SIZE));
        }
        // Instantiate a sample so the kind's footprint is accounted for
        for (i, spawn) in level.enemies.iter().enumerate() {
            include(Enemy::from_spawn(i as u32, spawn).rect());
        }
        include(level.gate);

        Self {
            width: (max_x + WORLD_MARGIN).max(WORLD_WIDTH),
            height: (max_y + WORLD_MARGIN).max(WORLD_HEIGHT),
        }
    }
}

/// Everything needed to (re)build the world for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelStart {
    pub index: usize,
    pub level: LevelData,
    pub note_goal: u32,
    pub checkpoint: Rect,
    pub gate: Rect,
    pub bounds: LevelBounds,
    pub spawn: Vec2,
    pub preserved_health: i32,
    pub boss_count: usize,
}

/// Aggregate statistics for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub completed: bool,
    pub total_time: f32,
    pub notes_collected: u32,
    pub overall_note_goal: u32,
    pub shards_collected: u32,
    pub levels: usize,
}

/// What happened when the current level's gate was passed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult {
    Next(LevelStart),
    Completed(RunStats),
}

impl AdvanceResult {
    pub fn is_completed(&self) -> bool {
        matches!(self, AdvanceResult::Completed(_))
    }
}

/// Progression state machine over an ordered level list
#[derive(Debug, Clone)]
pub struct LevelManager {
    levels: Vec<LevelData>,
    overall_note_goal: u32,
    current_index: usize,
    notes_collected: u32,
    shards_collected: u32,
    run_time: f32,
    completion_time: Option<f32>,
}

impl LevelManager {
    pub fn new(levels: Vec<LevelData>) -> Result<Self, LevelError> {
        validate_all(&levels)?;
        let overall_note_goal = levels.iter().map(LevelData::note_goal).sum();
        Ok(Self {
            levels,
            overall_note_goal,
            current_index: 0,
            notes_collected: 0,
            shards_collected: 0,
            run_time: 0.0,
            completion_time: None,
        })
    }

    /// Start over from the first level with full health
    pub fn reset_run(&mut self) -> LevelStart {
        self.current_index = 0;
        self.notes_collected = 0;
        self.shards_collected = 0;
        self.run_time = 0.0;
        self.completion_time = None;
        log::info!("Run reset");
        self.build_level_start(0, MAX_HEALTH)
    }

    /// Jump to a specific level. Health is carried over when given,
    /// otherwise the player starts full.
    pub fn load_level(
        &mut self,
        index: usize,
        carry_health: Option<i32>,
    ) -> Result<LevelStart, LevelError> {
        if index >= self.levels.len() {
            log::warn!("Ignoring request to load unknown level {index}");
            return Err(LevelError::UnknownLevel(index));
        }
        self.current_index = index;
        self.completion_time = None;
        let health = carry_health.map_or(MAX_HEALTH, carry_over);
        Ok(self.build_level_start(index, health))
    }

    /// Move past the current level's gate
    pub fn advance(&mut self, player_health: i32) -> AdvanceResult {
        let next = self.current_index + 1;
        if next < self.levels.len() {
            self.current_index = next;
            let start = self.build_level_start(next, carry_over(player_health));
            log::info!(
                "Advancing to level {} ({})",
                next + 1,
                start.level.name
            );
            return AdvanceResult::Next(start);
        }

        if self.completion_time.is_none() {
            self.completion_time = Some(self.run_time);
        }
        let stats = self.stats();
        log::info!(
            "Run completed in {:.1}s with {}/{} notes",
            stats.total_time,
            stats.notes_collected,
            stats.overall_note_goal
        );
        AdvanceResult::Completed(stats)
    }

    pub fn track_note_collected(&mut self) {
        self.notes_collected += 1;
    }

    pub fn track_shard_collected(&mut self) {
        self.shards_collected += 1;
    }

    /// Accrue run time; frozen once the run is complete
    pub fn update_run_time(&mut self, dt: f32) {
        if self.completion_time.is_none() {
            self.run_time += dt;
        }
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            completed: self.is_completed(),
            total_time: self.completion_time.unwrap_or(self.run_time),
            notes_collected: self.notes_collected,
            overall_note_goal: self.overall_note_goal,
            shards_collected: self.shards_collected,
            levels: self.levels.len(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_final_level(&self) -> bool {
        self.current_index + 1 == self.levels.len()
    }

    pub fn notes_collected(&self) -> u32 {
        self.notes_collected
    }

    fn build_level_start(&self, index: usize, health: i32) -> LevelStart {
        let level = &self.levels[index];
        let checkpoint = Rect::new(
            level.checkpoint.x,
            level.checkpoint.y,
            CHECKPOINT_WIDTH,
            CHECKPOINT_HEIGHT,
        );
        LevelStart {
            index,
            level: level.clone(),
            note_goal: level.note_goal(),
            checkpoint,
            gate: level.gate,
            bounds: LevelBounds::compute(level),
            spawn: Vec2::new(level.checkpoint.x, level.checkpoint.y + 1.0),
            preserved_health: health,
            boss_count: level.boss_count(),
        }
    }
}

/// Health carried into the next level is never zero
fn carry_over(health: i32) -> i32 {
    health.clamp(1, MAX_HEALTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::builtin_levels;

    fn manager() -> LevelManager {
        LevelManager::new(builtin_levels()).expect("built-in levels are valid")
    }

    #[test]
    fn test_reset_run_starts_first_level_full_health() {
        let mut levels = manager();
        let start = levels.reset_run();
        assert_eq!(start.index, 0);
        assert_eq!(start.preserved_health, MAX_HEALTH);
        assert_eq!(start.spawn, Vec2::new(2.0, 1.0));
        assert_eq!(start.checkpoint, Rect::new(2.0, 0.0, CHECKPOINT_WIDTH, CHECKPOINT_HEIGHT));
        assert_eq!(start.note_goal, 5);
    }

    #[test]
    fn test_advance_carries_health_floor() {
        let mut levels = manager();
        levels.reset_run();
        match levels.advance(0) {
            AdvanceResult::Next(start) => {
                assert_eq!(start.index, 1);
                assert!(start.preserved_health >= 1);
            }
            AdvanceResult::Completed(_) => panic!("first level is not final"),
        }
        match levels.advance(99) {
            AdvanceResult::Next(start) => assert_eq!(start.preserved_health, MAX_HEALTH),
            AdvanceResult::Completed(_) => panic!("second level is not final"),
        }
    }

    #[test]
    fn test_run_completion_stats() {
        let mut levels = manager();
        levels.reset_run();
        for _ in 0..7 {
            levels.track_note_collected();
        }
        levels.track_shard_collected();
        levels.update_run_time(12.5);

        assert!(!levels.advance(3).is_completed());
        assert!(!levels.advance(3).is_completed());
        let result = levels.advance(2);
        let AdvanceResult::Completed(stats) = result else {
            panic!("last level should complete the run");
        };
        assert!(stats.completed);
        assert_eq!(stats.notes_collected, 7);
        assert_eq!(stats.shards_collected, 1);
        assert_eq!(stats.overall_note_goal, 5 + 5 + 5);
        assert_eq!(stats.total_time, 12.5);

        // Frozen after completion
        levels.update_run_time(1.0);
        assert_eq!(levels.stats().total_time, 12.5);
    }

    #[test]
    fn test_load_unknown_level() {
        let mut levels = manager();
        assert!(matches!(levels.load_level(9, None), Err(LevelError::UnknownLevel(9))));
        let start = levels.load_level(2, Some(0)).expect("level 3 exists");
        assert_eq!(start.preserved_health, 1);
        assert_eq!(start.boss_count, 1);
        assert!(levels.is_final_level());
    }

    #[test]
    fn test_bounds_floor_and_extent() {
        let mut level = builtin_levels().remove(0);
        level.platforms = vec![Rect::new(0.0, 0.0, 10.0, 1.0)];
        level.enemies.clear();
        level.notes.clear();
        level.pickups.clear();
        level.note_goal = None;
        level.gate = Rect::new(8.0, 1.0, 2.0, 4.0);
        assert_eq!(
            LevelBounds::compute(&level),
            LevelBounds {
                width: WORLD_WIDTH,
                height: WORLD_HEIGHT
            }
        );

        level.gate = Rect::new(80.0, 1.0, 2.0, 20.0);
        let bounds = LevelBounds::compute(&level);
        assert_eq!(bounds.width, 82.0 + WORLD_MARGIN);
        assert_eq!(bounds.height, 21.0 + WORLD_MARGIN);
    }

    #[test]
    fn test_empty_pack_rejected() {
        assert!(matches!(LevelManager::new(Vec::new()), Err(LevelError::NoLevels)));
    }
}
