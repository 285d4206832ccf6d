use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::ActionRunner;
use crate::app::{AppState, ViewMode};

/// Applies one key press. Returns `true` when the user confirmed quitting.
pub(crate) fn handle_key_event(key: KeyEvent, app: &mut AppState, runner: &ActionRunner) -> bool {
    if app.confirm_quit {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Esc => {
                app.confirm_quit = false;
                return false;
            }
            _ => {
                app.confirm_quit = false;
            }
        }
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.view_mode == ViewMode::DetailFullscreen {
        return handle_detail_fullscreen_key(key, app);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.confirm_quit = true,
        KeyCode::Char('r') | KeyCode::Char('R') => runner.run_risk_job(app),
        KeyCode::Char('i') | KeyCode::Char('I') => runner.init_risk(app),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Enter | KeyCode::Char('f') | KeyCode::Char('F') => app.enter_detail_fullscreen(),
        _ => {}
    }
    false
}

fn handle_detail_fullscreen_key(key: KeyEvent, app: &mut AppState) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.confirm_quit = true,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('f') | KeyCode::Char('F') => {
            app.exit_detail_fullscreen()
        }
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(app.page_size()),
        KeyCode::PageUp => app.scroll_up(app.page_size()),
        KeyCode::Char('g') => {
            if app.pending_g {
                app.scroll_to_top();
            } else {
                app.pending_g = true;
            }
        }
        KeyCode::Char('G') => app.scroll_to_bottom(),
        _ => app.pending_g = false,
    }
    false
}
