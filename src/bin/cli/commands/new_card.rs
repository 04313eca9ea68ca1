use anyhow::{bail, Result};

use flipdeck_lib::Screen;

use crate::app::CliApp;
use crate::OutputFormat;

pub fn run(app: &mut CliApp, question: &str, answer: &str, format: &OutputFormat) -> Result<()> {
    app.require_session()?;
    app.finish()?;

    let Screen::Topic(screen) = app.screen_mut() else {
        bail!("Topic is not available");
    };
    screen.question = question.to_string();
    screen.answer = answer.to_string();

    app.submit();
    app.finish()?;

    let Screen::Topic(screen) = app.screen() else {
        bail!("Topic is not available");
    };
    let created = screen
        .cards()
        .iter()
        .map(|view| &view.card)
        .find(|card| card.question == question.trim());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        OutputFormat::Plain => {
            let topic = screen
                .topic()
                .map(|t| t.name.clone())
                .unwrap_or_else(|| screen.topic_id().to_string());
            println!("Added card to \"{}\"", topic);
        }
    }

    Ok(())
}
