use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use flipdeck_lib::screens::Face;
use flipdeck_lib::Screen;

use super::app_state::{ListHit, TuiState};

/// Topic view: card form, card list and the selected card. Returns where the list landed.
pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) -> ListHit {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[2]);
    let list_area = panels[0];
    let card_area = panels[1];

    let Screen::Topic(topic) = state.screen() else {
        return ListHit::unscrolled(list_area);
    };

    for (i, (label, value)) in [("Question", &topic.question), ("Answer", &topic.answer)]
        .into_iter()
        .enumerate()
    {
        let focused = state.focus == i + 1;
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
        f.render_widget(field, rows[i]);
        if focused {
            let cursor_x = rows[i].x + 1 + value.chars().count() as u16;
            f.set_cursor_position(Position::new(cursor_x, rows[i].y + 1));
        }
    }

    let title = match topic.topic() {
        Some(t) => format!(" {} ", t.name),
        None => " Flashcards ".to_string(),
    };
    let list_active = state.focus == 0;
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if list_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if topic.cards().is_empty() {
        let empty = Paragraph::new("  No flashcards yet. Add one above!")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, list_area);
        f.render_widget(Block::default().borders(Borders::ALL), card_area);
        return ListHit::unscrolled(list_area);
    }

    let items: Vec<ListItem> = topic
        .cards()
        .iter()
        .map(|view| {
            let marker = if view.is_flipped() { "A" } else { "Q" };
            ListItem::new(format!("[{}] {}", marker, view.card.question))
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, list_area, &mut list_state);
    let hit = ListHit {
        area: list_area,
        offset: list_state.offset(),
    };

    if let Some(view) = topic.cards().get(state.selected) {
        let (label, color) = match view.face() {
            Face::Question => (" Question ", Color::Yellow),
            Face::Answer => (" Answer ", Color::Green),
        };
        let card = Paragraph::new(view.text())
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .title(label)
                    .title_bottom(" Space to flip ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(card, card_area);
    }

    hit
}
