//! Abstract navigation commands and the key bindings that produce them.
//!
//! Display back-ends translate their native key events into [`Key`]; the
//! navigator only ever sees the [`Command`] a binding resolves to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A key as reported by a display back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Esc,
    Enter,
    Char(char),
    /// Anything the back-end could not name.
    Other,
}

impl FromStr for Key {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            "esc" | "escape" => Ok(Key::Esc),
            "enter" | "return" => Ok(Key::Enter),
            "space" => Ok(Key::Char(' ')),
            "other" => Ok(Key::Other),
            _ => Err(AppError::InvalidKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Esc => f.write_str("Esc"),
            Key::Enter => f.write_str("Enter"),
            Key::Char(' ') => f.write_str("Space"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Other => f.write_str("Other"),
        }
    }
}

/// Parse a whitespace- or comma-separated key script such as `"Right Right + Esc"`.
pub fn parse_key_script(script: &str) -> Result<Vec<Key>, AppError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    IterInc,
    IterDec,
    /// Keep navigating and refresh the candidate.
    Confirm,
    /// Leave navigation and commit the current candidate.
    Cancel,
}

/// Key lists per control command. Keys bound to nothing resolve to
/// [`Command::Confirm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub pan_up: Vec<Key>,
    pub pan_down: Vec<Key>,
    pub pan_left: Vec<Key>,
    pub pan_right: Vec<Key>,
    pub zoom_in: Vec<Key>,
    pub zoom_out: Vec<Key>,
    pub iter_inc: Vec<Key>,
    pub iter_dec: Vec<Key>,
    pub cancel: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            pan_up: vec![Key::Up, Key::Char('w')],
            pan_down: vec![Key::Down, Key::Char('s')],
            pan_left: vec![Key::Left, Key::Char('a')],
            pan_right: vec![Key::Right, Key::Char('d')],
            zoom_in: vec![Key::Char('+'), Key::Char('=')],
            zoom_out: vec![Key::Char('-')],
            iter_inc: vec![Key::Char(']')],
            iter_dec: vec![Key::Char('[')],
            cancel: vec![Key::Esc],
        }
    }
}

impl KeyBindings {
    pub fn resolve(&self, key: Key) -> Command {
        let table = [
            (&self.cancel, Command::Cancel),
            (&self.pan_up, Command::PanUp),
            (&self.pan_down, Command::PanDown),
            (&self.pan_left, Command::PanLeft),
            (&self.pan_right, Command::PanRight),
            (&self.zoom_in, Command::ZoomIn),
            (&self.zoom_out, Command::ZoomOut),
            (&self.iter_inc, Command::IterInc),
            (&self.iter_dec, Command::IterDec),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.contains(&key))
            .map_or(Command::Confirm, |(_, cmd)| cmd)
    }

    /// One-line legend for the HUD.
    pub fn legend(&self) -> String {
        fn join(keys: &[Key]) -> String {
            keys.iter().map(Key::to_string).collect::<Vec<_>>().join("/")
        }
        format!(
            "pan {} {} {} {} | zoom {} {} | iter {} {} | commit {}",
            join(&self.pan_up),
            join(&self.pan_down),
            join(&self.pan_left),
            join(&self.pan_right),
            join(&self.zoom_in),
            join(&self.zoom_out),
            join(&self.iter_inc),
            join(&self.iter_dec),
            join(&self.cancel),
        )
    }
}
