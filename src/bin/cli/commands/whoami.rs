use anyhow::{Context, Result};

use crate::app::CliApp;
use crate::render::terminal::{paint, timestamp, Color};
use crate::OutputFormat;

pub fn run(app: &CliApp, format: &OutputFormat, use_color: bool) -> Result<()> {
    app.require_session()?;
    let session = app
        .app
        .services()
        .session
        .current()
        .context("No session")?;

    // Profile metadata may have changed since sign-in
    let user = match app.fetch_user() {
        Ok(user) => user,
        Err(e) => {
            log::warn!("{:#}", e);
            session.user.clone()
        }
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": user.id.to_string(),
                "email": user.email,
                "fullName": user.user_metadata.full_name,
                "expiresAt": session.expires_at.to_rfc3339(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let name = user.user_metadata.full_name.as_deref().unwrap_or("-");
            println!("{}", paint(name, Color::BOLD, use_color));
            println!("  Email: {}", user.email.as_deref().unwrap_or("-"));
            println!("  ID: {}", user.id);
            println!("  Session expires: {}", timestamp(&session.expires_at));
            println!(
                "  {}",
                paint(
                    &format!("Stored in {}", app.data_dir.display()),
                    Color::GRAY,
                    use_color
                )
            );
        }
    }

    Ok(())
}
