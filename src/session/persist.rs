//! Session persistence across restarts
//!
//! The session JSON is written to `{data_dir}/session.json` (0600 on Unix) and
//! mirrored into the OS keyring when one is available. Loading tries the file
//! first, then the keyring.

use std::fs;
use std::path::{Path, PathBuf};

use super::models::Session;
use super::SessionError;

const KEYRING_SERVICE: &str = "flipdeck-session";

/// File-backed session storage with keyring fallback
pub struct SessionFile {
    path: PathBuf,
    keyring_account: Option<String>,
}

impl SessionFile {
    /// Store the session inside `data_dir`, mirroring to the keyring
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("session.json"),
            keyring_account: Some(data_dir.to_string_lossy().into_owned()),
        }
    }

    /// File-only storage, used where no keyring should be touched
    pub fn file_only(path: PathBuf) -> Self {
        Self {
            path,
            keyring_account: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn keyring_entry(&self) -> Option<keyring::Entry> {
        let account = self.keyring_account.as_deref()?;
        keyring::Entry::new(KEYRING_SERVICE, account).ok()
    }

    /// Load the stored session, if any
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        if let Ok(data) = fs::read_to_string(&self.path) {
            return match serde_json::from_str(&data) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    log::warn!("Discarding unreadable session file {}: {}", self.path.display(), e);
                    Ok(None)
                }
            };
        }

        let stored = self.keyring_entry().and_then(|entry| entry.get_password().ok());
        match stored {
            Some(data) => Ok(serde_json::from_str(&data).ok()),
            None => Ok(None),
        }
    }

    /// Save the session to the file and, best-effort, the keyring
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let value = serde_json::to_string(session)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &value)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
        }

        if let Some(entry) = self.keyring_entry() {
            if let Err(e) = entry.set_password(&value) {
                log::debug!("Keyring unavailable for session mirror: {}", e);
            }
        }

        Ok(())
    }

    /// Remove the session from both stores
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        if let Some(entry) = self.keyring_entry() {
            let _ = entry.delete_credential();
        }
        Ok(())
    }
}
