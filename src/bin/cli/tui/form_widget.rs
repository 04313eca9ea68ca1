use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use flipdeck_lib::Screen;

use super::app_state::{TuiState, LOGIN_FIELDS, REGISTER_FIELDS, TERMS_FIELD};

/// Login and register forms
pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let (title, rows, loading, footer) = match state.screen() {
        Screen::Login(s) => (
            " Sign in ",
            vec![
                (LOGIN_FIELDS[0], s.email.clone()),
                (LOGIN_FIELDS[1], mask(&s.password)),
            ],
            s.is_loading(),
            "No account yet? Press Esc to register.",
        ),
        Screen::Register(s) => (
            " Create account ",
            vec![
                (REGISTER_FIELDS[0], s.full_name.clone()),
                (REGISTER_FIELDS[1], s.email.clone()),
                (REGISTER_FIELDS[2], mask(&s.password)),
                (REGISTER_FIELDS[3], mask(&s.confirm_password)),
                (
                    REGISTER_FIELDS[TERMS_FIELD],
                    if s.accepted_terms { "[x]" } else { "[ ]" }.to_string(),
                ),
            ],
            s.is_loading(),
            "Already registered? Press Esc to sign in.",
        ),
        _ => return,
    };

    let width = area.width.min(60);
    let height = (rows.len() as u16 * 3 + 4).min(area.height);
    let form_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(form_area);
    f.render_widget(block, form_area);

    let mut constraints: Vec<Constraint> = rows.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, (label, value)) in rows.iter().enumerate() {
        let focused = i == state.focus;
        let field = Paragraph::new(value.as_str()).block(
            Block::default()
                .title(format!(" {} ", label))
                .borders(Borders::ALL)
                .border_style(if focused {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        );
        f.render_widget(field, chunks[i]);

        if focused && state.is_text_input() {
            let cursor_x = chunks[i].x + 1 + value.chars().count() as u16;
            f.set_cursor_position(Position::new(cursor_x, chunks[i].y + 1));
        }
    }

    let footer = if loading { "Loading..." } else { footer };
    let footer = Paragraph::new(footer).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[rows.len()]);
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
