//! Keyboard input mapped to scene commands.
//!
//! [`KeyboardState`] turns raw key events into press edges, [`KeyBindings`]
//! maps physical keys to [`OrbitAction`]s, and [`InputHandler`] combines both
//! into at most one [`InputCommand`] per key press.

pub mod bindings;
pub mod keyboard;

pub use bindings::{InputCommand, KeyBindings, OrbitAction, parse_key_code};
pub use keyboard::{KeyboardState, RawKeyEvent};

use winit::event::KeyEvent;
use winit::keyboard::PhysicalKey;

/// Per-window input front end.
#[derive(Debug, Clone)]
pub struct InputHandler {
    keyboard: KeyboardState,
    bindings: KeyBindings,
    /// Orbit step in radians.
    step: f32,
}

impl InputHandler {
    pub fn new(bindings: KeyBindings, step: f32) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            bindings,
            step,
        }
    }

    pub fn handle_event(&mut self, event: &KeyEvent) -> Option<InputCommand> {
        self.handle_raw(RawKeyEvent::from(event))
    }

    /// Returns a command only on the press edge of a bound key.
    pub fn handle_raw(&mut self, event: RawKeyEvent) -> Option<InputCommand> {
        if !self.keyboard.process_raw(event) {
            return None;
        }
        let PhysicalKey::Code(code) = event.key else {
            return None;
        };
        let action = self.bindings.action_for(code)?;
        tracing::debug!(?code, ?action, "Key bound to action");
        Some(action.to_command(self.step))
    }

    /// Call once per frame after commands are applied.
    pub fn end_frame(&mut self) {
        self.keyboard.clear_transients();
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geode_scene::SceneCommand;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    fn key(code: KeyCode, state: ElementState, repeat: bool) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat,
        }
    }

    #[test]
    fn test_press_issues_one_command() {
        let mut input = InputHandler::new(KeyBindings::default(), 0.1);
        let cmd = input.handle_raw(key(KeyCode::ArrowUp, ElementState::Pressed, false));
        assert_eq!(cmd, Some(InputCommand::Scene(SceneCommand::RotateTheta(0.1))));
        // Held key repeating does nothing.
        assert_eq!(
            input.handle_raw(key(KeyCode::ArrowUp, ElementState::Pressed, true)),
            None
        );
        assert_eq!(
            input.handle_raw(key(KeyCode::ArrowUp, ElementState::Released, false)),
            None
        );
    }

    #[test]
    fn test_second_press_after_release_issues_again() {
        let mut input = InputHandler::new(KeyBindings::default(), 0.1);
        input.handle_raw(key(KeyCode::Equal, ElementState::Pressed, false));
        input.handle_raw(key(KeyCode::Equal, ElementState::Released, false));
        input.end_frame();
        assert_eq!(
            input.handle_raw(key(KeyCode::Equal, ElementState::Pressed, false)),
            Some(InputCommand::Scene(SceneCommand::IncreaseDepth))
        );
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut input = InputHandler::new(KeyBindings::default(), 0.1);
        assert_eq!(
            input.handle_raw(key(KeyCode::KeyQ, ElementState::Pressed, false)),
            None
        );
        assert!(input.keyboard().is_pressed(PhysicalKey::Code(KeyCode::KeyQ)));
    }

    #[test]
    fn test_escape_quits() {
        let mut input = InputHandler::new(KeyBindings::default(), 0.1);
        assert_eq!(
            input.handle_raw(key(KeyCode::Escape, ElementState::Pressed, false)),
            Some(InputCommand::Quit)
        );
    }
}
