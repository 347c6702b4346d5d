use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use super::app::Message;

pub fn handle_events() -> Result<Option<Message>> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
            return Ok(handle_key(key.code, key.modifiers));
        }
    }

    Ok(None)
}

fn handle_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Message::Quit),

        // Row navigation
        KeyCode::Char('j') | KeyCode::Down => Some(Message::NextRow),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::PrevRow),
        KeyCode::PageDown => Some(Message::PageDown),
        KeyCode::PageUp => Some(Message::PageUp),

        // Filters
        KeyCode::Char('b') => Some(Message::NextBrowser),
        KeyCode::Char('B') => Some(Message::PrevBrowser),
        KeyCode::Char('o') => Some(Message::NextOs),
        KeyCode::Char('O') => Some(Message::PrevOs),

        // Sort
        KeyCode::Char('s') => Some(Message::ToggleSort),

        // Actions
        KeyCode::Enter => Some(Message::Activate),
        KeyCode::Char('r') => Some(Message::Refresh),

        _ => None,
    }
}
