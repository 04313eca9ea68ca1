use anyhow::{bail, Result};

use flipdeck_lib::router::Route;
use flipdeck_lib::Screen;

use crate::app::CliApp;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

/// Registration fields gathered from the command line
pub struct Form {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub accept_terms: bool,
}

pub fn run(app: &mut CliApp, form: Form, format: &OutputFormat, use_color: bool) -> Result<()> {
    let Screen::Register(screen) = app.screen_mut() else {
        bail!("Already signed in. Run `flipdeck logout` first.");
    };
    screen.full_name = form.full_name;
    screen.email = form.email.clone();
    screen.confirm_password = form.password.clone();
    screen.password = form.password;
    screen.accepted_terms = form.accept_terms;

    app.submit();
    let messages = app.finish()?;
    app.expect_route(&Route::Login)
        .or_else(|_| app.expect_route(&Route::Dashboard))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "email": form.email,
                "messages": messages,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for message in &messages {
                println!("{}", paint(message, Color::GREEN, use_color));
            }
        }
    }

    Ok(())
}
