use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use flipdeck_lib::Screen;

use super::app_state::{ListHit, TuiState};

/// Dashboard: new-topic input above the topic list. Returns where the list landed.
pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) -> ListHit {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);
    let input_area = chunks[0];
    let list_area = chunks[1];

    let Screen::Dashboard(dashboard) = state.screen() else {
        return ListHit::unscrolled(list_area);
    };

    let input_active = state.focus == 1;
    let input = Paragraph::new(dashboard.new_topic.as_str()).block(
        Block::default()
            .title(" New topic name ")
            .borders(Borders::ALL)
            .border_style(if input_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            }),
    );
    f.render_widget(input, input_area);
    if input_active {
        let cursor_x = input_area.x + 1 + dashboard.new_topic.chars().count() as u16;
        f.set_cursor_position(Position::new(cursor_x, input_area.y + 1));
    }

    let block = Block::default()
        .title(" Your topics ")
        .borders(Borders::ALL)
        .border_style(if input_active {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        });

    if dashboard.topics().is_empty() {
        let empty = Paragraph::new("  No topics found. Create one!")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, list_area);
        return ListHit::unscrolled(list_area);
    }

    let items: Vec<ListItem> = dashboard
        .topics()
        .iter()
        .map(|topic| ListItem::new(format!("\u{2022} {}", topic.name)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(if input_active { Color::Black } else { Color::DarkGray })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, list_area, &mut list_state);
    let hit = ListHit {
        area: list_area,
        offset: list_state.offset(),
    };

    hit
}
