use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tokio::runtime::Runtime;

use flipdeck_lib::config::{default_data_dir, ProviderConfig};
use flipdeck_lib::router::{Gate, Route};
use flipdeck_lib::screens::Notice;
use flipdeck_lib::session::User;
use flipdeck_lib::{App, Screen, Services};

/// Log to `{data_dir}/flipdeck.log` so output does not corrupt the TUI
pub fn init_file_logging() -> Result<()> {
    let data_dir = default_data_dir().context("Failed to get data directory")?;
    std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("flipdeck.log"))
        .context("Failed to open log file")?;

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// The application controller plus the runtime that drives its provider calls
pub struct CliApp {
    runtime: Runtime,
    pub app: App,
    pub data_dir: PathBuf,
}

impl CliApp {
    /// Load configuration, connect, and resolve the session for `initial_path`
    pub fn new(config_path: Option<&Path>, initial_path: &str) -> Result<Self> {
        let config = ProviderConfig::load(config_path).context("Failed to load configuration")?;
        let data_dir = default_data_dir().context("Failed to get data directory")?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        let services =
            Services::connect(&config, &data_dir).context("Failed to create provider client")?;
        let mut app = App::new(services, initial_path);
        runtime.block_on(app.start());

        Ok(Self {
            runtime,
            app,
            data_dir,
        })
    }

    pub fn submit(&mut self) {
        self.runtime.block_on(self.app.submit());
    }

    pub fn sign_out(&mut self) {
        self.runtime.block_on(self.app.sign_out());
    }

    pub fn open_topic(&mut self, index: usize) {
        self.runtime.block_on(self.app.open_topic(index));
    }

    pub fn back(&mut self) {
        self.runtime.block_on(self.app.back());
    }

    pub fn reload(&mut self) {
        self.runtime.block_on(self.app.reload());
    }

    pub fn sync_session(&mut self) -> bool {
        self.runtime.block_on(self.app.sync_session())
    }

    /// Current profile from the identity provider
    pub fn fetch_user(&self) -> Result<User> {
        self.runtime
            .block_on(self.app.services().session.fetch_user())
            .context("Failed to fetch user")
    }

    /// Fail unless the stored session let us onto an authenticated screen
    pub fn require_session(&self) -> Result<()> {
        if self.app.gate() != Gate::Authenticated {
            bail!("Not signed in. Run `flipdeck login --email <EMAIL>` first.");
        }
        Ok(())
    }

    /// Drain queued notices. The first error becomes the command's error;
    /// informational messages are returned.
    pub fn finish(&mut self) -> Result<Vec<String>> {
        let mut info = Vec::new();
        for notice in self.app.drain_notices() {
            match notice {
                Notice::Error(message) => bail!(message),
                Notice::Info(message) => info.push(message),
            }
        }
        Ok(info)
    }

    pub fn expect_route(&self, expected: &Route) -> Result<()> {
        match self.app.route() {
            Some(route) if route == expected => Ok(()),
            Some(route) => bail!("Expected to be on {} but ended on {}", expected, route),
            None => bail!("Session has not been resolved"),
        }
    }

    pub fn screen(&self) -> &Screen {
        self.app.screen()
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        self.app.screen_mut()
    }
}

impl Drop for CliApp {
    fn drop(&mut self) {
        self.app.shutdown();
    }
}
