use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use flipdeck_lib::Screen;

use super::app_state::TuiState;
use super::{card_widget, form_widget, notice_popup, status_bar, topic_list};

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Header, main area, status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    let header_area = outer[0];
    let main_area = outer[1];
    let status_area = outer[2];

    let location = state
        .cli
        .app
        .route()
        .map(|r| r.path())
        .unwrap_or_default();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Flipdeck ", Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}", location), Style::default().fg(Color::DarkGray)),
    ]));
    f.render_widget(header, header_area);

    // Remember the list area for mouse hit-testing
    state.list_hit = match state.screen() {
        Screen::Pending => {
            let loading = Paragraph::new("  Loading...").style(Style::default().fg(Color::DarkGray));
            f.render_widget(loading, main_area);
            None
        }
        Screen::Login(_) | Screen::Register(_) => {
            form_widget::draw(f, main_area, state);
            None
        }
        Screen::Dashboard(_) => Some(topic_list::draw(f, main_area, state)),
        Screen::Topic(_) => Some(card_widget::draw(f, main_area, state)),
    };

    status_bar::draw(f, status_area, state);

    if let Some(notice) = state.cli.app.peek_notice() {
        notice_popup::draw(f, size, notice);
    } else if state.show_help {
        notice_popup::draw_help(f, size);
    }
}
