//! Persistent storage for the session token.
//!
//! A client holds at most one token. It is written on login, read on every
//! request, and removed when the backend rejects it or the user logs out.
//!
//! The file store keeps it in a small TOML document:
//!
//! ```toml
//! token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
//! ```

use crate::error::TokenStoreError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage for the single session token.
///
/// Implementations use interior locking so one store can be shared by the
/// HTTP client, the session guard and the login page.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token. An empty token counts as no token.
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    /// Stores `token`, replacing any previous one.
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Removes the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// File-backed token storage, readable by every invocation of the binary.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// `<config dir>/stockpilot/session.toml`, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("stockpilot").join("session.toml")
        } else if let Some(home_dir) = dirs::home_dir() {
            home_dir
                .join(".config")
                .join("stockpilot")
                .join("session.toml")
        } else {
            PathBuf::from(".stockpilot").join("session.toml")
        }
    }

    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> TokenStoreError {
        TokenStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let file: SessionFile =
            toml::from_str(&contents).map_err(|source| TokenStoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        Ok(file.token.filter(|token| !token.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let contents = toml::to_string_pretty(&SessionFile {
            token: Some(token.to_string()),
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        // The token is a bearer credential: owner read/write only, from the
        // moment the file exists.
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(|e| self.io_error(e))?;

        // `mode` only applies on creation; tighten a file left by an older run
        // before the token goes in.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| self.io_error(e))?;
        }

        file.write_all(contents.as_bytes())
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), "Session token saved.");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session token removed.");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Process-local token storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        let token = self.token.read().map_err(|_| TokenStoreError::Poisoned)?;
        Ok(token.clone().filter(|token| !token.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.token.write().map_err(|_| TokenStoreError::Poisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.write().map_err(|_| TokenStoreError::Poisoned)? = None;
        Ok(())
    }
}
