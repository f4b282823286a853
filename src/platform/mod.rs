//! Platform abstraction layer
//!
//! The simulation talks to the outside world through these seams only:
//! - Input (polled key state with edge-triggered presses)
//! - Rendering (read-only state snapshot)
//! - Audio/VFX (fire-and-forget events)
//! - HUD (flat snapshot, plus a restart request going the other way)

pub mod input;

pub use input::{Action, InputSource, KeyboardState, poll_tick_input};

use crate::sim::{GameEvent, GameState, HudSnapshot};

/// Draws the world. Never writes back into the simulation.
pub trait RenderSink {
    fn render(&mut self, state: &GameState);
}

/// Audio and visual-effect triggers
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Heads-up display
pub trait HudSink {
    fn update_hud(&mut self, hud: &HudSnapshot);

    /// True once per restart-button click
    fn take_restart_request(&mut self) -> bool {
        false
    }
}

/// Headless collaborators: tallies events and keeps the last HUD snapshot
#[derive(Debug, Default)]
pub struct NullFrontend {
    pub frames_rendered: u64,
    pub events: Vec<GameEvent>,
    pub last_hud: Option<HudSnapshot>,
    pub restart_requested: bool,
}

impl RenderSink for NullFrontend {
    fn render(&mut self, _state: &GameState) {
        self.frames_rendered += 1;
    }
}

impl EventSink for NullFrontend {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(*event);
    }
}

impl HudSink for NullFrontend {
    fn update_hud(&mut self, hud: &HudSnapshot) {
        self.last_hud = Some(hud.clone());
    }

    fn take_restart_request(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }
}
