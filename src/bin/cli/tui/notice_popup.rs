use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use flipdeck_lib::screens::Notice;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Modal notice that has to be dismissed
pub fn draw(f: &mut Frame, area: Rect, notice: &Notice) {
    let (title, color) = match notice {
        Notice::Error(_) => (" Error ", Color::Red),
        Notice::Info(_) => (" Notice ", Color::Green),
    };

    let popup = centered(area, 50, 7);
    f.render_widget(Clear, popup);

    let text = vec![
        Line::from(notice.message().to_string()),
        Line::from(""),
        Line::from(Span::styled("Press Enter to continue", Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(paragraph, popup);
}

pub fn draw_help(f: &mut Frame, area: Rect) {
    let popup = centered(area, 46, 12);
    f.render_widget(Clear, popup);

    let lines = [
        ("Tab / Shift-Tab", "cycle fields"),
        ("Enter", "submit, open topic, flip card"),
        ("Space", "flip card, toggle terms"),
        ("Esc", "back"),
        ("n", "focus the create form"),
        ("s", "sign out (dashboard)"),
        ("r", "reload"),
        ("q / Ctrl-C", "quit"),
    ];
    let text: Vec<Line> = lines
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {:<16}", key), Style::default().fg(Color::Cyan)),
                Span::raw(*action),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, popup);
}
