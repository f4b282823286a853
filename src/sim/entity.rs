//! Entity model: player, enemies, notes and pickups
//!
//! Plain data plus the few state transitions every system agrees on
//! (sleep/wake, one-way collection, clamped health).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::levels::{EnemySpawn, PickupSpawn, Point, SpawnKind};

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub grounded: bool,
    /// Remaining grace period for jumping after leaving a ledge
    pub coyote_time: f32,
    /// Absolute time the sleep pulse becomes available
    pub sleep_ready_at: f32,
    pub invulnerable_until: f32,
    /// Notes collected in the current level
    pub notes: u32,
    /// Last checkpoint or spawn
    pub respawn: Vec2,
    pub is_floating: bool,
    pub float_until: f32,
    pub float_ready_at: f32,
    pub speed_boost_until: f32,
    pub super_jump_until: f32,
    pub extended_sleep_until: f32,
    pub combo_count: u32,
    pub last_collect_time: f32,
}

impl Player {
    pub fn new(spawn: Vec2, health: i32) -> Self {
        Self {
            pos: spawn,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            health: health.clamp(0, MAX_HEALTH),
            max_health: MAX_HEALTH,
            grounded: false,
            coyote_time: 0.0,
            sleep_ready_at: 0.0,
            invulnerable_until: 0.0,
            notes: 0,
            respawn: spawn,
            is_floating: false,
            float_until: 0.0,
            float_ready_at: 0.0,
            speed_boost_until: 0.0,
            super_jump_until: 0.0,
            extended_sleep_until: 0.0,
            combo_count: 0,
            last_collect_time: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_invulnerable(&self, now: f32) -> bool {
        now < self.invulnerable_until
    }

    pub fn speed_boost_active(&self, now: f32) -> bool {
        now < self.speed_boost_until
    }

    pub fn super_jump_active(&self, now: f32) -> bool {
        now < self.super_jump_until
    }

    pub fn extended_sleep_active(&self, now: f32) -> bool {
        now < self.extended_sleep_until
    }

    /// Restore health up to the maximum; returns the amount actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Lose health, never dropping below zero; returns true if now out of health
    pub fn hurt(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount).max(0);
        self.health == 0
    }

    /// Launch upward off a sleeping critter
    pub fn bounce(&mut self) {
        self.vel.y = BOUNCE_VELOCITY;
        self.grounded = false;
    }

    /// Put the player back at the respawn point with full health
    pub fn respawn_at_checkpoint(&mut self, now: f32) {
        self.health = self.max_health;
        self.pos = self.respawn;
        self.vel = Vec2::ZERO;
        self.grounded = false;
        self.coyote_time = 0.0;
        self.is_floating = false;
        self.invulnerable_until = now + RESPAWN_INVULN_TIME;
    }
}

/// Awake enemies hurt on contact; asleep enemies are inert (and often walkable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Awake,
    Asleep,
}

/// Horizontal patrol bounds (the enemy's whole footprint stays inside)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    pub x_min: f32,
    pub x_max: f32,
}

/// Vertical sinusoidal bob
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bob {
    pub amp: f32,
    /// Cycles per second
    pub freq: f32,
}

/// Half-sine lift cycle of a sleeping GrumbleRock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lift {
    pub height: f32,
    /// Seconds per cycle
    pub duration: f32,
}

impl Default for Lift {
    fn default() -> Self {
        Self {
            height: ROCK_LIFT_HEIGHT,
            duration: ROCK_LIFT_DURATION,
        }
    }
}

/// Enemy kind with its kind-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Moving platform; always solid, harmful while awake
    SleeperPlatform,
    /// Bobs in place; a springboard while asleep
    BounceCritter { bob: Option<Bob> },
    /// Takes a point of damage per pulse; must be defeated to open the gate
    Boss { health: i32, max_health: i32 },
    /// Always solid; rises and falls while asleep, carrying the player
    GrumbleRock {
        lift: Lift,
        lift_start_y: f32,
        lift_progress: f32,
    },
    /// Deflates into a cloud platform while asleep
    PuffyPuffer { deflation_progress: f32 },
    /// Armored: needs several pulses before it falls asleep
    DrowsySnail {
        pulses_required: u32,
        pulses_received: u32,
    },
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable identifier; survives removal of other enemies
    pub id: u32,
    /// Bottom-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub sleep_until: f32,
    /// `sleep_until - TELEGRAPH_WINDOW`: when the wake-up warning starts
    pub telegraph_start: f32,
    pub patrol: Option<Patrol>,
    pub awake_speed: f32,
    /// Resting height for bobbing/deflating
    pub base_y: f32,
    /// +1.0 moving right, -1.0 moving left
    pub direction: f32,
}

impl Enemy {
    /// Instantiate an enemy from its static spawn descriptor
    pub fn from_spawn(id: u32, spawn: &EnemySpawn) -> Self {
        let (size, awake_speed, kind) = match spawn.kind {
            SpawnKind::SleeperPlatform => (Vec2::new(3.0, 0.8), 2.0, EnemyKind::SleeperPlatform),
            SpawnKind::BounceCritter => (
                Vec2::new(1.4, 1.4),
                0.0,
                EnemyKind::BounceCritter { bob: spawn.bob },
            ),
            SpawnKind::Boss => {
                let health = spawn.health.unwrap_or(BOSS_DEFAULT_HEALTH);
                (
                    Vec2::new(4.0, 3.0),
                    1.5,
                    EnemyKind::Boss {
                        health,
                        max_health: health,
                    },
                )
            }
            SpawnKind::GrumbleRock => (
                Vec2::new(2.0, 2.0),
                1.0,
                EnemyKind::GrumbleRock {
                    lift: spawn.lift.unwrap_or_default(),
                    lift_start_y: spawn.y,
                    lift_progress: 0.0,
                },
            ),
            SpawnKind::PuffyPuffer => (
                Vec2::new(2.5, 1.8),
                0.5,
                EnemyKind::PuffyPuffer {
                    deflation_progress: 0.0,
                },
            ),
            SpawnKind::DrowsySnail => (
                Vec2::new(1.8, 1.6),
                0.8,
                EnemyKind::DrowsySnail {
                    pulses_required: spawn
                        .sleep_pulses_required
                        .filter(|&n| n > 0)
                        .unwrap_or(SNAIL_PULSES_REQUIRED),
                    pulses_received: 0,
                },
            ),
        };

        Self {
            id,
            pos: Vec2::new(spawn.x, spawn.y),
            size,
            vel: Vec2::new(awake_speed, 0.0),
            kind,
            state: EnemyState::Awake,
            sleep_until: 0.0,
            telegraph_start: 0.0,
            patrol: spawn.patrol,
            awake_speed,
            base_y: spawn.y,
            direction: 1.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn is_asleep(&self) -> bool {
        self.state == EnemyState::Asleep
    }

    /// Contact damage applies exactly while awake
    #[inline]
    pub fn is_harmful(&self) -> bool {
        self.state == EnemyState::Awake
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss { .. })
    }

    /// Asleep and inside the wake-up warning window
    pub fn is_telegraphing(&self, now: f32) -> bool {
        self.is_asleep() && now >= self.telegraph_start
    }

    /// Boss hit points as `(current, max)`
    pub fn boss_health(&self) -> Option<(i32, i32)> {
        match self.kind {
            EnemyKind::Boss { health, max_health } => Some((health, max_health)),
            _ => None,
        }
    }

    /// Fall asleep until `now + duration`, resetting kind-specific motion
    pub fn sleep(&mut self, now: f32, duration: f32) {
        self.state = EnemyState::Asleep;
        self.sleep_until = now + duration;
        self.telegraph_start = self.sleep_until - TELEGRAPH_WINDOW;
        self.vel = Vec2::ZERO;

        match &mut self.kind {
            EnemyKind::GrumbleRock {
                lift_start_y,
                lift_progress,
                ..
            } => {
                *lift_start_y = self.pos.y;
                *lift_progress = 0.0;
            }
            EnemyKind::PuffyPuffer { deflation_progress } => *deflation_progress = 0.0,
            _ => {}
        }
    }

    /// Wake up and resume patrolling in the current direction
    pub fn wake(&mut self) {
        self.state = EnemyState::Awake;
        self.sleep_until = 0.0;
        self.telegraph_start = 0.0;
        self.vel.x = self.awake_speed * self.direction;

        match &mut self.kind {
            EnemyKind::GrumbleRock { lift_start_y, .. } => self.pos.y = *lift_start_y,
            EnemyKind::PuffyPuffer { deflation_progress } => {
                *deflation_progress = 0.0;
                self.pos.y = self.base_y;
            }
            _ => {}
        }
    }
}

/// A note collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub pos: Vec2,
    collected: bool,
}

impl Note {
    pub fn from_spawn(spawn: &Point) -> Self {
        Self {
            pos: Vec2::new(spawn.x, spawn.y),
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark collected; returns false if it already was
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

/// Pickup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    GoldenMelodyShard,
    SpeedBoost,
    SuperJump,
    ExtendedSleep,
}

impl PickupKind {
    /// Timed power-ups (as opposed to instant effects)
    pub fn is_power_up(&self) -> bool {
        matches!(
            self,
            PickupKind::SpeedBoost | PickupKind::SuperJump | PickupKind::ExtendedSleep
        )
    }
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: Vec2,
    collected: bool,
}

impl Pickup {
    pub fn from_spawn(spawn: &PickupSpawn) -> Self {
        Self {
            kind: spawn.kind,
            pos: Vec2::new(spawn.x, spawn.y),
            size: Vec2::splat(PICKUP_SIZE),
            collected: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark collected; returns false if it already was
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}
