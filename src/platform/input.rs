//! Raw input to game commands
//!
//! Browser key codes (`KeyboardEvent.code`) and touches are translated here
//! so the event handlers stay thin and the mapping can be tested natively.

use crate::settings::Toggle;
use crate::sim::Command;

/// Whether a key went down or came back up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// Command for a keyboard event, if the key is bound
pub fn command_for_key(code: &str, edge: KeyEdge) -> Option<Command> {
    match (code, edge) {
        ("Space" | "ArrowUp", KeyEdge::Down) => Some(Command::Jump),
        ("ArrowDown", KeyEdge::Down) => Some(Command::DownPressed),
        ("ArrowDown", KeyEdge::Up) => Some(Command::DownReleased),
        _ => None,
    }
}

/// Preference bound to a key press, if any
pub fn toggle_for_key(code: &str, edge: KeyEdge) -> Option<Toggle> {
    if edge != KeyEdge::Down {
        return None;
    }
    match code {
        "KeyH" => Some(Toggle::Hitboxes),
        "KeyF" => Some(Toggle::Fps),
        "KeyC" => Some(Toggle::HighContrast),
        _ => None,
    }
}

/// A tap on the playfield: start, jump or restart
#[inline]
pub fn command_for_touch() -> Command {
    Command::Jump
}

/// Keys whose browser default (scrolling) must be suppressed
pub fn is_game_key(code: &str) -> bool {
    matches!(code, "Space" | "ArrowUp" | "ArrowDown")
}
