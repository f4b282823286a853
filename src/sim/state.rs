//! Game state and core simulation types
//!
//! `GameState` owns the whole world for the level being played, plus the
//! level manager that knows how to build the next one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ability::{PulsePool, cooldown_ratio};
use super::entity::{Enemy, Note, Pickup, PickupKind, Player};
use super::level::{LevelManager, LevelStart, RunStats};
use super::rect::Rect;
use crate::levels::{LevelData, LevelError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Gate passed; the next level loads when the countdown runs out
    Transition { remaining: f32 },
    /// Final gate passed
    Completed,
}

/// Fire-and-forget notifications for audio/VFX collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    NoteCollected { combo: u32 },
    PickupCollected(PickupKind),
    PowerUpActivated(PickupKind),
    HealthRestored,
    DamageTaken { health: i32 },
    Jumped,
    Bounced,
    FloatStarted,
    SleepPulse { origin: Vec2, radius: f32 },
    EnemySlept { id: u32 },
    BossHit { remaining_health: i32 },
    BossDefeated,
    CheckpointReached,
    Respawned,
    LevelCompleted { index: usize },
    LevelStarted { index: usize },
    RunCompleted(RunStats),
}

/// Flat view of what the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub health: i32,
    pub max_health: i32,
    /// 1.0 right after using the sleep pulse, 0.0 when ready
    pub cooldown_ratio: f32,
    pub notes: u32,
    pub note_goal: u32,
    /// 1-based
    pub level_number: usize,
    pub level_name: String,
    /// `(current, max)` of the first live boss
    pub boss_health: Option<(i32, i32)>,
    pub combo: u32,
    pub speed_boost: bool,
    pub super_jump: bool,
    pub extended_sleep: bool,
    pub floating: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Simulation clock (seconds since the run started)
    pub elapsed: f32,
    pub time_ticks: u64,

    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub notes: Vec<Note>,
    pub pickups: Vec<Pickup>,
    pub platforms: Vec<Rect>,
    pub pulses: PulsePool,

    /// Snapshot the current level was built from
    pub level: LevelStart,
    pub levels: LevelManager,
    /// Live bosses; the gate stays shut until this reaches zero
    pub boss_remaining: usize,
    pub checkpoint_active: bool,

    /// Enemy ids to drop in the end-of-tick compaction
    pub pending_removals: Vec<u32>,
    /// Level waiting for the transition countdown
    pub pending_level: Option<LevelStart>,
    /// Events produced since the last `take_events`
    pub events: Vec<GameEvent>,

    next_entity_id: u32,
}

impl GameState {
    /// Build a run over `levels`, starting at the first one
    pub fn new(levels: Vec<LevelData>) -> Result<Self, LevelError> {
        let mut manager = LevelManager::new(levels)?;
        let start = manager.reset_run();
        let mut state = Self {
            phase: GamePhase::Playing,
            elapsed: 0.0,
            time_ticks: 0,
            player: Player::new(start.spawn, start.preserved_health),
            enemies: Vec::new(),
            notes: Vec::new(),
            pickups: Vec::new(),
            platforms: Vec::new(),
            pulses: PulsePool::new(),
            level: start.clone(),
            levels: manager,
            boss_remaining: 0,
            checkpoint_active: false,
            pending_removals: Vec::new(),
            pending_level: None,
            events: Vec::new(),
            next_entity_id: 1,
        };
        state.load(start);
        Ok(state)
    }

    /// Get next entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Rebuild the world from a level snapshot. Cancels any pending transition.
    pub fn load(&mut self, start: LevelStart) {
        let enemies: Vec<Enemy> = start
            .level
            .enemies
            .iter()
            .map(|spawn| Enemy::from_spawn(self.next_entity_id(), spawn))
            .collect();

        self.player = Player::new(start.spawn, start.preserved_health);
        self.enemies = enemies;
        self.notes = start.level.notes.iter().map(Note::from_spawn).collect();
        self.pickups = start.level.pickups.iter().map(Pickup::from_spawn).collect();
        self.platforms = start.level.platforms.clone();
        self.pulses.clear();
        self.boss_remaining = start.boss_count;
        self.checkpoint_active = false;
        self.pending_removals.clear();
        self.pending_level = None;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelStarted { index: start.index });

        log::info!(
            "Level {} ({}) loaded: {} enemies, {} notes, goal {}",
            start.index + 1,
            start.level.name,
            self.enemies.len(),
            self.notes.len(),
            start.note_goal
        );
        self.level = start;
    }

    /// Start the whole run over from the first level
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.events.clear();
        let start = self.levels.reset_run();
        self.load(start);
    }

    /// Jump straight to a level with full health
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        let start = self.levels.load_level(index, None)?;
        self.load(start);
        Ok(())
    }

    /// Send the player back to the last checkpoint (or spawn)
    pub fn respawn(&mut self) {
        self.player.respawn_at_checkpoint(self.elapsed);
        self.pulses.clear();
        self.events.push(GameEvent::Respawned);
        log::debug!(
            "Respawned at ({:.1}, {:.1})",
            self.player.respawn.x,
            self.player.respawn.y
        );
    }

    /// Notes collected and no bosses left
    pub fn gate_open(&self) -> bool {
        self.player.notes >= self.level.note_goal && self.boss_remaining == 0
    }

    pub fn is_completed(&self) -> bool {
        self.phase == GamePhase::Completed
    }

    /// Drain events for the collaborators
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        let now = self.elapsed;
        HudSnapshot {
            health: self.player.health,
            max_health: self.player.max_health,
            cooldown_ratio: cooldown_ratio(&self.player, now),
            notes: self.player.notes,
            note_goal: self.level.note_goal,
            level_number: self.level.index + 1,
            level_name: self.level.level.name.clone(),
            boss_health: self.enemies.iter().find_map(Enemy::boss_health),
            combo: self.player.combo_count,
            speed_boost: self.player.speed_boost_active(now),
            super_jump: self.player.super_jump_active(now),
            extended_sleep: self.player.extended_sleep_active(now),
            floating: self.player.is_floating,
        }
    }
}
