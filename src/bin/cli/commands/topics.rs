use anyhow::{bail, Result};

use flipdeck_lib::Screen;

use crate::app::CliApp;
use crate::render::terminal::{paint, timestamp, Color};
use crate::OutputFormat;

pub fn run(app: &mut CliApp, format: &OutputFormat, use_color: bool) -> Result<()> {
    app.require_session()?;
    app.finish()?;

    let Screen::Dashboard(dashboard) = app.screen() else {
        bail!("Dashboard is not available");
    };
    let topics = dashboard.topics();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(topics)?);
        }
        OutputFormat::Plain => {
            if topics.is_empty() {
                println!("No topics found. Create one!");
            }
            for topic in topics {
                println!(
                    "{}  {}  {}",
                    paint(&format!("{:>6}", topic.id), Color::CYAN, use_color),
                    topic.name,
                    paint(&timestamp(&topic.created_at), Color::GRAY, use_color)
                );
            }
        }
    }

    Ok(())
}
