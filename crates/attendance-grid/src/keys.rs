//! Keyboard Commands
//!
//! Maps `KeyboardEvent.key` values onto grid commands.

use crate::cell::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What the page looked like when the key was pressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyContext {
    /// Event target is an `input`, `textarea` or `select`.
    pub in_form_field: bool,
    /// A Bootstrap modal is currently shown.
    pub modal_open: bool,
    /// The attendance table is on the page.
    pub grid_present: bool,
}

impl KeyContext {
    fn suppressed(&self) -> bool {
        self.in_form_field || self.modal_open || !self.grid_present
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Navigate(Direction),
    QuickStatus(Status),
    ToggleBatchMode,
    ClearTransient,
}

impl KeyCommand {
    /// Classify a key press. `None` means the event is left to the browser.
    pub fn classify(key: &str, ctx: KeyContext) -> Option<Self> {
        if ctx.suppressed() {
            return None;
        }
        let command = match key {
            "ArrowUp" => KeyCommand::Navigate(Direction::Up),
            "ArrowDown" => KeyCommand::Navigate(Direction::Down),
            "ArrowLeft" => KeyCommand::Navigate(Direction::Left),
            "ArrowRight" => KeyCommand::Navigate(Direction::Right),
            " " => KeyCommand::ToggleBatchMode,
            "Escape" => KeyCommand::ClearTransient,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCommand::QuickStatus(Status::from_digit(c)?),
                    _ => return None,
                }
            }
        };
        Some(command)
    }
}
