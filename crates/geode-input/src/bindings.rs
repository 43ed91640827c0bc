//! Key → action bindings with string overrides from configuration.

use std::collections::HashMap;
use std::str::FromStr;

use geode_scene::SceneCommand;
use serde::{Deserialize, Serialize};
use tracing::warn;
use winit::keyboard::KeyCode;

/// Something the user can ask for from the keyboard.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitAction {
    ThetaIncrease,
    ThetaDecrease,
    PhiIncrease,
    PhiDecrease,
    IncreaseDepth,
    DecreaseDepth,
    Quit,
}

impl OrbitAction {
    pub const ALL: [OrbitAction; 7] = [
        OrbitAction::ThetaIncrease,
        OrbitAction::ThetaDecrease,
        OrbitAction::PhiIncrease,
        OrbitAction::PhiDecrease,
        OrbitAction::IncreaseDepth,
        OrbitAction::DecreaseDepth,
        OrbitAction::Quit,
    ];

    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            OrbitAction::ThetaIncrease => "theta_increase",
            OrbitAction::ThetaDecrease => "theta_decrease",
            OrbitAction::PhiIncrease => "phi_increase",
            OrbitAction::PhiDecrease => "phi_decrease",
            OrbitAction::IncreaseDepth => "increase_depth",
            OrbitAction::DecreaseDepth => "decrease_depth",
            OrbitAction::Quit => "quit",
        }
    }

    /// The command this action issues for an orbit step of `step` radians.
    pub fn to_command(self, step: f32) -> InputCommand {
        match self {
            OrbitAction::ThetaIncrease => InputCommand::Scene(SceneCommand::RotateTheta(step)),
            OrbitAction::ThetaDecrease => InputCommand::Scene(SceneCommand::RotateTheta(-step)),
            OrbitAction::PhiIncrease => InputCommand::Scene(SceneCommand::RotatePhi(step)),
            OrbitAction::PhiDecrease => InputCommand::Scene(SceneCommand::RotatePhi(-step)),
            OrbitAction::IncreaseDepth => InputCommand::Scene(SceneCommand::IncreaseDepth),
            OrbitAction::DecreaseDepth => InputCommand::Scene(SceneCommand::DecreaseDepth),
            OrbitAction::Quit => InputCommand::Quit,
        }
    }
}

impl FromStr for OrbitAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrbitAction::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    Scene(SceneCommand),
    Quit,
}

/// Physical key → action table.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    keys: HashMap<KeyCode, OrbitAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = HashMap::from([
            (KeyCode::ArrowUp, OrbitAction::ThetaIncrease),
            (KeyCode::ArrowDown, OrbitAction::ThetaDecrease),
            (KeyCode::ArrowRight, OrbitAction::PhiIncrease),
            (KeyCode::ArrowLeft, OrbitAction::PhiDecrease),
            (KeyCode::Equal, OrbitAction::IncreaseDepth),
            (KeyCode::NumpadAdd, OrbitAction::IncreaseDepth),
            (KeyCode::Minus, OrbitAction::DecreaseDepth),
            (KeyCode::NumpadSubtract, OrbitAction::DecreaseDepth),
            (KeyCode::Escape, OrbitAction::Quit),
        ]);
        Self { keys }
    }
}

impl KeyBindings {
    /// Defaults with `overrides` (action name → key name) applied. An
    /// override replaces every default key of its action. Unknown names are
    /// logged and skipped.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut bindings = Self::default();
        for (action_name, key_name) in overrides {
            let action = match action_name.parse::<OrbitAction>() {
                Ok(action) => action,
                Err(e) => {
                    warn!("Ignoring keybinding override: {e}");
                    continue;
                }
            };
            let Some(key) = parse_key_code(key_name) else {
                warn!("Ignoring keybinding override for {action_name}: unknown key {key_name}");
                continue;
            };
            bindings.bind(key, action);
        }
        bindings
    }

    /// Make `key` the only key for `action`.
    pub fn bind(&mut self, key: KeyCode, action: OrbitAction) {
        self.keys.retain(|_, a| *a != action);
        self.keys.insert(key, action);
    }

    pub fn action_for(&self, key: KeyCode) -> Option<OrbitAction> {
        self.keys.get(&key).copied()
    }

    pub fn keys_for(&self, action: OrbitAction) -> Vec<KeyCode> {
        self.keys
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect()
    }
}

/// Parse a [`KeyCode`] from its `Debug` name (e.g. `"ArrowUp"`, `"KeyW"`).
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    if let Some(letter) = name.strip_prefix("Key")
        && letter.len() == 1
    {
        return letter_key(letter.as_bytes()[0]);
    }
    if let Some(digit) = name.strip_prefix("Digit")
        && digit.len() == 1
    {
        return digit_key(digit.as_bytes()[0]);
    }
    Some(match name {
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "Equal" => KeyCode::Equal,
        "Minus" => KeyCode::Minus,
        "NumpadAdd" => KeyCode::NumpadAdd,
        "NumpadSubtract" => KeyCode::NumpadSubtract,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "BracketLeft" => KeyCode::BracketLeft,
        "BracketRight" => KeyCode::BracketRight,
        "Comma" => KeyCode::Comma,
        "Period" => KeyCode::Period,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        _ => return None,
    })
}

fn letter_key(c: u8) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    c.is_ascii_uppercase().then(|| LETTERS[(c - b'A') as usize])
}

fn digit_key(c: u8) -> Option<KeyCode> {
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0,
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];
    c.is_ascii_digit().then(|| DIGITS[(c - b'0') as usize])
}
