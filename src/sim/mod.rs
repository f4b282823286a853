//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - One clock (`GameState::elapsed`) drives every timer
//! - Stable iteration order (list order, stable enemy ids)
//! - No rendering or platform dependencies

pub mod ability;
pub mod collectibles;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use ability::{PulsePool, SleepPulse, SleepPulseOutcome, activate_sleep_ability};
pub use collectibles::{collect_notes, collect_pickups};
pub use collision::{apply_physics, collect_solid_rects};
pub use enemy::{ContactOutcome, handle_enemy_interactions, update_enemies};
pub use entity::{
    Bob, Enemy, EnemyKind, EnemyState, Lift, Note, Patrol, Pickup, PickupKind, Player,
};
pub use level::{AdvanceResult, LevelBounds, LevelManager, LevelStart, RunStats};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, HudSnapshot};
pub use tick::{TickInput, tick};
