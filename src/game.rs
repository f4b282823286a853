//! Fixed-timestep orchestrator
//!
//! Turns variable real frame times into fixed simulation steps, feeds each
//! step its input, forwards events, then hands the final state to the
//! renderer and HUD once per frame.

use crate::consts::*;
use crate::levels::{LevelData, LevelError};
use crate::platform::{Action, EventSink, HudSink, InputSource, RenderSink, poll_tick_input};
use crate::sim::{GameState, tick};

/// Accumulator that converts real time into whole fixed steps
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame's real time (clamped) and return how many steps to run
    pub fn advance(&mut self, real_dt: f32) -> u32 {
        let dt = if real_dt.is_finite() {
            real_dt.clamp(0.0, MAX_FRAME_TIME)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }

    /// Leftover time as a fraction of a step, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Everything the game hands results to
pub trait Frontend: RenderSink + EventSink + HudSink {}

impl<T: RenderSink + EventSink + HudSink> Frontend for T {}

/// Owns the simulation and drives it from real frame times
pub struct Game<I: InputSource> {
    state: GameState,
    clock: FrameClock,
    input: I,
}

impl<I: InputSource> Game<I> {
    pub fn new(levels: Vec<LevelData>, input: I) -> Result<Self, LevelError> {
        Ok(Self {
            state: GameState::new(levels)?,
            clock: FrameClock::new(),
            input,
        })
    }

    /// Run one rendered frame. Returns the number of simulation steps taken.
    pub fn frame<F: Frontend + ?Sized>(&mut self, real_dt: f32, frontend: &mut F) -> u32 {
        if frontend.take_restart_request() || self.input.consume_press(Action::Restart) {
            self.restart();
        }

        let steps = self.clock.advance(real_dt);
        for _ in 0..steps {
            let input = poll_tick_input(&mut self.input);
            tick(&mut self.state, &input, SIM_DT);
            for event in self.state.take_events() {
                frontend.on_event(&event);
            }
        }
        // Events from a restart/load that happened outside a step
        for event in self.state.take_events() {
            frontend.on_event(&event);
        }

        frontend.render(&self.state);
        frontend.update_hud(&self.state.hud_snapshot());
        steps
    }

    /// Start the run over; drops any pending level transition
    pub fn restart(&mut self) {
        log::info!("Restarting run");
        self.state.restart();
        self.clock.reset();
    }

    /// Jump to a level (full health); drops any pending level transition
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        self.state.load_level(index)?;
        self.clock.reset();
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }
}
