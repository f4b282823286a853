//! Lullaby - a cozy side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, enemies, sleep pulse, pickups, levels)
//! - `levels`: Static level data and JSON level packs
//! - `platform`: Input/render/audio/HUD collaborator seams
//! - `game`: Fixed-timestep orchestrator driving `sim` for a frontend
//! - `settings`: Key bindings and presentation preferences

pub mod game;
pub mod levels;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{FrameClock, Frontend, Game};
pub use levels::{LevelData, LevelError};
pub use settings::{KeyBindings, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Longest real frame time fed to the accumulator (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.25;

    /// World units per second squared
    pub const GRAVITY: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 8.0;
    pub const JUMP_VELOCITY: f32 = 11.0;
    pub const COYOTE_TIME: f32 = 0.1;
    pub const BOUNCE_VELOCITY: f32 = 11.0;
    /// Previous-bottom slack when landing on a sleeping critter
    pub const BOUNCE_LANDING_SLOP: f32 = 0.1;
    /// How close the player's feet must be to a moving solid to ride it
    pub const RIDE_TOLERANCE: f32 = 1e-3;

    /// Player footprint and default spawn
    pub const PLAYER_WIDTH: f32 = 0.9;
    pub const PLAYER_HEIGHT: f32 = 1.2;
    pub const PLAYER_SPAWN_X: f32 = 2.0;
    pub const PLAYER_SPAWN_Y: f32 = 1.0;

    pub const MAX_HEALTH: i32 = 3;
    pub const INVULN_TIME: f32 = 1.0;
    pub const RESPAWN_INVULN_TIME: f32 = 0.5;
    /// Falling below this height forces a respawn
    pub const DEATH_Y: f32 = -5.0;

    /// Sleep pulse ability
    pub const SLEEP_COOLDOWN: f32 = 1.5;
    pub const SLEEP_RADIUS: f32 = 3.0;
    pub const SLEEP_DURATION: f32 = 4.0;
    /// Enemies flash for this long before waking
    pub const TELEGRAPH_WINDOW: f32 = 0.5;
    /// Bosses shrug off sleep faster
    pub const BOSS_SLEEP_FACTOR: f32 = 0.6;
    pub const BOSS_DEFAULT_HEALTH: i32 = 5;
    pub const BOSS_BOB_AMPLITUDE: f32 = 0.3;
    pub const BOSS_BOB_SPEED: f32 = 1.5;
    pub const SNAIL_PULSES_REQUIRED: u32 = 2;
    pub const PUFFER_DEFLATE_RATE: f32 = 0.5;
    pub const PUFFER_DEFLATE_OFFSET: f32 = 0.6;
    /// Share of a sleeping puffer's height that can be stood on
    pub const PUFFER_PLATFORM_FRACTION: f32 = 0.4;
    pub const ROCK_LIFT_HEIGHT: f32 = 3.0;
    pub const ROCK_LIFT_DURATION: f32 = 6.0;

    /// Visual ring growth window (seconds)
    pub const PULSE_GROWTH_DURATION: f32 = 0.3;
    /// Ring radius grows by `dt * max_radius * PULSE_GROWTH_RATE`
    pub const PULSE_GROWTH_RATE: f32 = 6.0;

    /// Puff float ability
    pub const FLOAT_DURATION: f32 = 2.0;
    pub const FLOAT_GRAVITY_REDUCTION: f32 = 0.3;
    pub const FLOAT_COOLDOWN: f32 = 3.0;

    /// Power-ups
    pub const POWER_UP_DURATION: f32 = 8.0;
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;
    pub const SUPER_JUMP_MULTIPLIER: f32 = 1.4;
    /// Applied to both sleep radius and sleep duration
    pub const EXTENDED_SLEEP_MULTIPLIER: f32 = 1.5;

    /// Collectibles
    pub const NOTE_PICKUP_RADIUS: f32 = 0.4;
    pub const COMBO_WINDOW: f32 = 2.0;
    pub const PICKUP_SIZE: f32 = 1.0;

    /// Level layout
    pub const WORLD_WIDTH: f32 = 64.0;
    pub const WORLD_HEIGHT: f32 = 16.0;
    pub const WORLD_MARGIN: f32 = 4.0;
    pub const CHECKPOINT_WIDTH: f32 = 2.0;
    pub const CHECKPOINT_HEIGHT: f32 = 3.0;
    pub const GATE_TOLERANCE: f32 = 0.1;
    /// Pause between reaching a gate and the next level appearing (seconds)
    pub const LEVEL_TRANSITION_DELAY: f32 = 1.5;
}

