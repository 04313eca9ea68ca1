use anyhow::{bail, Result};

use flipdeck_lib::Screen;

use crate::app::CliApp;
use crate::OutputFormat;

pub fn run(app: &mut CliApp, name: &str, format: &OutputFormat) -> Result<()> {
    app.require_session()?;

    let Screen::Dashboard(dashboard) = app.screen_mut() else {
        bail!("Dashboard is not available");
    };
    dashboard.new_topic = name.to_string();

    app.submit();
    app.finish()?;

    let Screen::Dashboard(dashboard) = app.screen() else {
        bail!("Dashboard is not available");
    };
    // The refetched list is newest first
    let created = dashboard
        .topics()
        .iter()
        .find(|t| t.name == name.trim());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        OutputFormat::Plain => match created {
            Some(topic) => println!("Created topic \"{}\" (ID: {})", topic.name, topic.id),
            None => println!("Created topic \"{}\"", name.trim()),
        },
    }

    Ok(())
}
