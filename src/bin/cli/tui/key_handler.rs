use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use flipdeck_lib::Screen;

use super::app_state::{TuiState, TERMS_FIELD};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit = true;
        return;
    }

    // A notice blocks everything until acknowledged
    if state.cli.app.peek_notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.dismiss_notice();
        }
        return;
    }

    if state.show_help {
        state.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Tab => state.focus_next(),
        KeyCode::BackTab => state.focus_prev(),
        KeyCode::Enter => state.activate(),
        KeyCode::Esc => state.back(),
        _ if state.is_text_input() => handle_input_key(state, key),
        _ => handle_command_key(state, key),
    }
}

fn handle_input_key(state: &mut TuiState, key: KeyEvent) {
    let Some(field) = state.field_mut() else {
        return;
    };
    match key.code {
        KeyCode::Backspace => {
            field.pop();
        }
        KeyCode::Char(c) => field.push(c),
        _ => {}
    }
}

fn handle_command_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => state.move_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_up(),
        KeyCode::Char('r') => state.reload(),
        KeyCode::Char(' ') => match state.screen() {
            Screen::Register(_) if state.focus == TERMS_FIELD => state.toggle_terms(),
            Screen::Topic(_) => state.flip_selected(),
            _ => {}
        },
        KeyCode::Char('n') => {
            if matches!(state.screen(), Screen::Dashboard(_) | Screen::Topic(_)) {
                state.focus = 1;
            }
        }
        KeyCode::Char('s') => {
            if matches!(state.screen(), Screen::Dashboard(_)) {
                state.sign_out();
            }
        }
        _ => {}
    }
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(clicked) = state
                .list_hit
                .and_then(|hit| hit.item_at(mouse.column, mouse.row))
                .filter(|&index| index < state.list_len())
            else {
                return;
            };
            state.focus = 0;
            if state.selected == clicked {
                state.activate();
            } else {
                state.selected = clicked;
                state.after_action();
            }
        }
        MouseEventKind::ScrollDown => state.move_down(),
        MouseEventKind::ScrollUp => state.move_up(),
        _ => {}
    }
}
