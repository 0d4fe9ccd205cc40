//! Key bindings. Pure: maps a key press to a [`Command`] without touching
//! any state, so the bindings can be tested without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::Action;

/// Which part of the screen receives editing and arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Path,
    Symbol,
    Timeframe,
    Chart,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Path, Focus::Symbol, Focus::Timeframe, Focus::Chart];

    pub fn next(self) -> Self {
        Self::ORDER[(self as usize + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self as usize + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Run(Action),
    ClearLogs,
    FocusNext,
    FocusPrev,
    /// Step the focused selector; `true` moves down the list.
    Cycle(bool),
    Type(char),
    Backspace,
    /// Move the chart cursor by one point.
    Cursor(isize),
}

pub fn map_key(key: KeyEvent, focus: Focus) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('o') => Some(Command::Run(Action::Connect)),
            KeyCode::Char('d') => Some(Command::Run(Action::Disconnect)),
            KeyCode::Char('r') => Some(Command::Run(Action::StartRecording)),
            KeyCode::Char('s') => Some(Command::Run(Action::StopRecording)),
            KeyCode::Char('l') => Some(Command::ClearLogs),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::F(2) => Some(Command::Run(Action::Connect)),
        KeyCode::F(3) => Some(Command::Run(Action::Disconnect)),
        KeyCode::F(5) => Some(Command::Run(Action::StartRecording)),
        KeyCode::F(6) => Some(Command::Run(Action::StopRecording)),
        KeyCode::F(8) => Some(Command::ClearLogs),
        KeyCode::Tab => Some(Command::FocusNext),
        KeyCode::BackTab => Some(Command::FocusPrev),
        KeyCode::Up if matches!(focus, Focus::Symbol | Focus::Timeframe) => {
            Some(Command::Cycle(false))
        }
        KeyCode::Down if matches!(focus, Focus::Symbol | Focus::Timeframe) => {
            Some(Command::Cycle(true))
        }
        KeyCode::Left if focus == Focus::Chart => Some(Command::Cursor(-1)),
        KeyCode::Right if focus == Focus::Chart => Some(Command::Cursor(1)),
        KeyCode::Enter if focus == Focus::Path => Some(Command::Run(Action::Connect)),
        KeyCode::Backspace if focus == Focus::Path => Some(Command::Backspace),
        KeyCode::Char(c) if focus == Focus::Path => Some(Command::Type(c)),
        _ => None,
    }
}
