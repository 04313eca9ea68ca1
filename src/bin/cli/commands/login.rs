use anyhow::{bail, Result};

use flipdeck_lib::router::Route;
use flipdeck_lib::Screen;

use crate::app::CliApp;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &mut CliApp,
    email: &str,
    password: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let Screen::Login(form) = app.screen_mut() else {
        bail!("Already signed in. Run `flipdeck logout` first.");
    };
    form.email = email.to_string();
    form.password = password.to_string();

    app.submit();
    app.finish()?;
    app.expect_route(&Route::Dashboard)?;

    let Some(session) = app.app.services().session.current() else {
        bail!("Sign-in did not produce a session");
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "userId": session.user_id().to_string(),
                "email": session.user.email,
                "expiresAt": session.expires_at.to_rfc3339(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let who = session.user.email.as_deref().unwrap_or(email);
            println!("Signed in as {}", paint(who, Color::BOLD, use_color));
        }
    }

    Ok(())
}
