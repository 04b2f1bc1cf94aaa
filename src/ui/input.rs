use crate::app::App;
use crate::util::validate_url_for_open;
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Map a key press to state changes and the action for the event loop.
pub fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => {
            app.select_next();
            Action::Continue
        }
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => {
            app.select_prev();
            Action::Continue
        }
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => {
            app.select_first();
            Action::Continue
        }
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
            app.select_last();
            Action::Continue
        }
        (KeyCode::Char('r'), _) => {
            if app.loading {
                app.set_status("Already fetching...");
                Action::Continue
            } else {
                Action::Refresh
            }
        }
        (KeyCode::Char('o'), _) | (KeyCode::Enter, _) => {
            open_selected(app);
            Action::Continue
        }
        _ => Action::Continue,
    }
}

fn open_selected(app: &mut App) {
    let Some(url) = app.selected_article().map(|a| a.url().to_string()) else {
        return;
    };

    // Validate URL before open::that() to prevent command injection
    match validate_url_for_open(&url) {
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Refusing to open article URL");
            app.set_status(format!("Cannot open link: {}", e));
        }
        Ok(valid) => {
            if let Err(e) = open::that(valid.as_str()) {
                tracing::warn!(url = %url, error = %e, "Failed to open browser");
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status("Opened in browser");
            }
        }
    }
}
