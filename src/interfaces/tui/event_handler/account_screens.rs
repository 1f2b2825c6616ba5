//! Login, home and settings screens

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use strum::IntoEnumIterator;

use crate::interfaces::tui::app::App;
use crate::session::{OAuthProvider, Route};

/// Handle login screen input
pub fn handle_login_screen(app: &mut App, key: KeyEvent) {
    if app.login.pending {
        return;
    }
    match key.code {
        KeyCode::Enter => app.submit_login(),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
            let providers: Vec<OAuthProvider> = OAuthProvider::iter().collect();
            let idx = providers
                .iter()
                .position(|p| *p == app.login.provider)
                .unwrap_or(0);
            app.login.provider = providers[(idx + 1) % providers.len()];
        }
        KeyCode::Char(c) => {
            app.login.token_input.push(c);
        }
        KeyCode::Backspace => {
            app.login.token_input.pop();
        }
        KeyCode::Esc => app.exiting = true,
        _ => {}
    }
}

/// Handle home screen input
pub fn handle_home_screen(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('c') | KeyCode::Char('1') => app.navigate(Route::CreateUrl),
        KeyCode::Char('a') | KeyCode::Char('2') => app.navigate(Route::Analytics),
        KeyCode::Char('s') | KeyCode::Char('3') => app.navigate(Route::Settings),
        KeyCode::Char('q') | KeyCode::Esc => app.exiting = true,
        _ => {}
    }
}

/// Handle settings screen input
pub fn handle_settings_screen(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('u') | KeyCode::Enter => app.update_profile(),
        KeyCode::Char('l') => app.logout(),
        KeyCode::Esc | KeyCode::Char('h') => app.navigate(Route::Home),
        KeyCode::Char('q') => app.exiting = true,
        _ => {}
    }
}
