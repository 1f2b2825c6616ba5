//! Create URL and analytics screens

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::interfaces::tui::app::{App, CreateField};
use crate::flows::AliasMode;
use crate::session::Route;

/// Handle create URL screen input
///
/// Ctrl+T toggles generated/custom alias, Ctrl+R resets the form.
pub fn handle_create_screen(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.navigate(Route::Home),
        KeyCode::Enter => app.submit_create(),
        KeyCode::Char('t') if ctrl => {
            if !app.form.is_pending() {
                app.form.alias_mode = app.form.alias_mode.toggle();
                if app.form.alias_mode == AliasMode::Generated {
                    app.create_field = CreateField::Url;
                }
            }
        }
        KeyCode::Char('r') if ctrl => app.reset_create(),
        KeyCode::Tab => {
            if app.form.alias_mode == AliasMode::Custom {
                app.create_field = app.create_field.next();
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if !app.form.is_pending() {
                match app.create_field {
                    CreateField::Url => app.form.destination_url.push(c),
                    CreateField::Alias => app.form.custom_alias.push(c),
                }
            }
        }
        KeyCode::Backspace => {
            if !app.form.is_pending() {
                match app.create_field {
                    CreateField::Url => app.form.destination_url.pop(),
                    CreateField::Alias => app.form.custom_alias.pop(),
                };
            }
        }
        _ => {}
    }
}

/// Handle analytics screen input
pub fn handle_analytics_screen(app: &mut App, key_code: KeyCode) {
    if app.confirm_delete.is_some() {
        match key_code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_delete = None,
            _ => {}
        }
        return;
    }

    match key_code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('y') | KeyCode::Char('c') => app.copy_selected(),
        KeyCode::Char('r') => {
            if !app.analytics_busy {
                app.start_analytics_load();
            }
        }
        KeyCode::Char('n') => app.navigate(Route::CreateUrl),
        KeyCode::Esc | KeyCode::Char('h') => app.navigate(Route::Home),
        KeyCode::Char('q') => app.exiting = true,
        _ => {}
    }
}
