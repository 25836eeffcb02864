//! Keyboard shortcut map

use crate::surface::{Key, KeyEvent};

/// Actions reachable from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleTheme,
    ToggleFullscreen,
    ToggleMute,
    SeekBackward,
    SeekForward,
    VolumeUp,
    VolumeDown,
    Download,
    ToggleStreamMenu,
    CopyLink,
    CloseMenus,
}

impl Command {
    /// Commands that act on the media player
    pub fn needs_player(&self) -> bool {
        matches!(
            self,
            Command::ToggleFullscreen
                | Command::ToggleMute
                | Command::SeekBackward
                | Command::SeekForward
                | Command::VolumeUp
                | Command::VolumeDown
        )
    }
}

/// Resolve a key-down to a command
///
/// Ctrl/Cmd+T works everywhere; every other shortcut is ignored while the
/// user types into a text field. Space is handled by the hold detector and
/// never resolves here.
pub fn resolve(event: &KeyEvent) -> Option<Command> {
    let mods = event.modifiers;
    let letter = event.key.letter();

    if mods.command() && letter == Some('t') {
        return Some(Command::ToggleTheme);
    }

    if event.target.accepts_text() {
        return None;
    }

    if mods.command() {
        match letter {
            Some('c') if mods.shift => return Some(Command::CopyLink),
            Some('d') => return Some(Command::Download),
            Some('s') => return Some(Command::ToggleStreamMenu),
            _ => {}
        }
    }

    match event.key {
        Key::Char('f') => Some(Command::ToggleFullscreen),
        Key::Char('m') => Some(Command::ToggleMute),
        Key::Left => Some(Command::SeekBackward),
        Key::Right => Some(Command::SeekForward),
        Key::Up => Some(Command::VolumeUp),
        Key::Down => Some(Command::VolumeDown),
        Key::Escape => Some(Command::CloseMenus),
        _ => None,
    }
}
