//! Keyboard input
//!
//! Held keys are polled; jump, sleep, float and restart are edge-triggered,
//! so a press is reported at most once until the key is released.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::settings::KeyBindings;
use crate::sim::TickInput;

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
    Sleep,
    Float,
    Restart,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Sleep,
        Action::Float,
        Action::Restart,
    ];
}

/// Anything that can answer "is this held" and "was this just pressed"
pub trait InputSource {
    fn is_down(&self, action: Action) -> bool;

    /// Report a fresh press once, then forget it
    fn consume_press(&mut self, action: Action) -> bool;
}

/// Raw key state fed by the host's key events
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    bindings: KeyBindings,
    down: HashSet<String>,
    pressed: HashSet<String>,
}

impl KeyboardState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Key went down. Auto-repeat of a held key is not a new press.
    pub fn key_down(&mut self, code: &str) {
        if self.down.insert(code.to_string()) {
            self.pressed.insert(code.to_string());
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.down.remove(code);
    }

    /// Drop everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

impl InputSource for KeyboardState {
    fn is_down(&self, action: Action) -> bool {
        self.bindings
            .codes(action)
            .iter()
            .any(|code| self.down.contains(code))
    }

    fn consume_press(&mut self, action: Action) -> bool {
        // Consume every bound code so two keys for one action count once
        let mut hit = false;
        for code in self.bindings.codes(action) {
            hit |= self.pressed.remove(code);
        }
        hit
    }
}

/// Read one tick's worth of intent from an input source
pub fn poll_tick_input<I: InputSource + ?Sized>(input: &mut I) -> TickInput {
    let mut move_x = 0.0;
    if input.is_down(Action::Left) {
        move_x -= 1.0;
    }
    if input.is_down(Action::Right) {
        move_x += 1.0;
    }

    TickInput {
        move_x,
        jump: input.consume_press(Action::Jump),
        sleep: input.consume_press(Action::Sleep),
        float: input.consume_press(Action::Float),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard() -> KeyboardState {
        KeyboardState::new(KeyBindings::default())
    }

    #[test]
    fn test_press_reported_once() {
        let mut keys = keyboard();
        keys.key_down("Space");
        assert!(keys.consume_press(Action::Jump));
        assert!(!keys.consume_press(Action::Jump));

        // Auto-repeat while held is not a new press
        keys.key_down("Space");
        assert!(!keys.consume_press(Action::Jump));
        assert!(keys.is_down(Action::Jump));

        keys.key_up("Space");
        keys.key_down("Space");
        assert!(keys.consume_press(Action::Jump));
    }

    #[test]
    fn test_two_keys_one_press() {
        let mut keys = keyboard();
        keys.key_down("Space");
        keys.key_down("KeyW");
        assert!(keys.consume_press(Action::Jump));
        assert!(!keys.consume_press(Action::Jump));
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut keys = keyboard();
        keys.key_down("KeyA");
        assert_eq!(poll_tick_input(&mut keys).move_x, -1.0);
        keys.key_down("ArrowRight");
        assert_eq!(poll_tick_input(&mut keys).move_x, 0.0);
        keys.key_up("KeyA");
        assert_eq!(poll_tick_input(&mut keys).move_x, 1.0);
    }

    #[test]
    fn test_poll_consumes_presses() {
        let mut keys = keyboard();
        keys.key_down("KeyX");
        keys.key_down("KeyC");
        let first = poll_tick_input(&mut keys);
        assert!(first.sleep && first.float && !first.jump);
        let second = poll_tick_input(&mut keys);
        assert!(!second.sleep && !second.float);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut keys = keyboard();
        keys.key_down("KeyD");
        keys.clear();
        assert!(!keys.is_down(Action::Right));
    }
}
