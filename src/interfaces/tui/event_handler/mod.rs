//! Event handling for TUI
//!
//! Handles keyboard events and delegates to appropriate handlers
//!
//! This module is organized by screen type:
//! - account_screens: Login, Home, Settings
//! - link_screens: CreateUrl, Analytics (with delete confirmation)

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::interfaces::tui::app::{App, CurrentScreen};

mod account_screens;
mod link_screens;

use account_screens::*;
use link_screens::*;

/// Handle keyboard input based on current screen
///
/// Returns `true` when the application should exit.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> std::io::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    if app.exiting {
        return Ok(handle_exiting(app, key.code));
    }

    // 守卫检查期间只允许退出
    if app.checking {
        if key.code == KeyCode::Esc {
            app.exiting = true;
        }
        return Ok(false);
    }

    match app.current_screen {
        CurrentScreen::Login => handle_login_screen(app, key),
        CurrentScreen::Home => handle_home_screen(app, key.code),
        CurrentScreen::CreateUrl => handle_create_screen(app, key),
        CurrentScreen::Analytics => handle_analytics_screen(app, key.code),
        CurrentScreen::Settings => handle_settings_screen(app, key.code),
    }
    Ok(false)
}

fn handle_exiting(app: &mut App, key_code: KeyCode) -> bool {
    match key_code {
        KeyCode::Char('y') | KeyCode::Char('Y') => true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.exiting = false;
            false
        }
        _ => false,
    }
}
