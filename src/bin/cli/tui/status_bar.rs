use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use flipdeck_lib::Screen;

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    if state.cli.app.peek_notice().is_some() {
        let hint = Paragraph::new(" Enter/Esc: dismiss ")
            .style(Style::default().bg(Color::Yellow).fg(Color::Black));
        f.render_widget(hint, area);
        return;
    }

    let hints = match state.screen() {
        Screen::Pending => " Ctrl-C: quit ",
        Screen::Login(_) => " Tab: next field  Enter: sign in  Esc: register  Ctrl-C: quit ",
        Screen::Register(_) => {
            " Tab: next field  Space: accept terms  Enter: register  Esc: sign in  Ctrl-C: quit "
        }
        Screen::Dashboard(_) if state.focus == 0 => {
            " j/k: navigate  Enter: open  n: new topic  s: sign out  r: reload  ?: help  q: quit "
        }
        Screen::Topic(_) if state.focus == 0 => {
            " j/k: navigate  Space: flip  n: new card  Esc: back  r: reload  ?: help  q: quit "
        }
        _ => " Type to edit  Tab: next field  Enter: save  Esc: back ",
    };

    let status = Paragraph::new(hints)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
