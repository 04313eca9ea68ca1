use anyhow::{bail, Result};

use flipdeck_lib::Screen;

use crate::app::CliApp;
use crate::render::terminal::{paint, wrap_lines, Color};
use crate::OutputFormat;

pub fn run(app: &mut CliApp, format: &OutputFormat, use_color: bool) -> Result<()> {
    app.require_session()?;
    app.finish()?;

    let Screen::Topic(screen) = app.screen() else {
        bail!("Topic is not available");
    };
    let cards: Vec<_> = screen.cards().iter().map(|view| &view.card).collect();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "topic": screen.topic(),
                "cards": cards,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if let Some(topic) = screen.topic() {
                println!("{}", paint(&topic.name, Color::BOLD, use_color));
                println!();
            }
            if cards.is_empty() {
                println!("No flashcards yet. Add one above!");
            }
            for card in cards {
                for line in wrap_lines(&card.question, "Q: ", 76) {
                    println!("{}", paint(&line, Color::YELLOW, use_color));
                }
                for line in wrap_lines(&card.answer, "A: ", 76) {
                    println!("{}", line);
                }
                println!();
            }
        }
    }

    Ok(())
}
