use anyhow::Result;

use flipdeck_lib::router::Gate;

use crate::app::CliApp;
use crate::OutputFormat;

pub fn run(app: &mut CliApp, format: &OutputFormat) -> Result<()> {
    let was_signed_in = app.app.gate() == Gate::Authenticated;
    if was_signed_in {
        app.sign_out();
        app.finish()?;
    }

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "signedOut": was_signed_in });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if was_signed_in {
                println!("Signed out");
            } else {
                println!("Not signed in");
            }
        }
    }

    Ok(())
}
