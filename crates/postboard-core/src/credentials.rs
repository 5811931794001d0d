//! Session token storage.
//!
//! Stores the session token in `<base>/session.json` with restricted permissions (0600).
//! The file holds a single key-value pair under [`TOKEN_KEY`]. Tokens are opaque: they are
//! never parsed, and never logged in full.
//!
//! Storage failures are not fatal. Reads of an unreadable file yield no token, and writes that
//! fail keep the token in memory for the rest of the process.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::paths;

/// Fixed storage key for the session token.
pub const TOKEN_KEY: &str = "token";

/// Persistent holder of the single session token.
#[derive(Debug)]
pub struct TokenStore {
    path: Option<PathBuf>,
    current: Option<String>,
}

impl TokenStore {
    /// Opens the store at the default session path.
    pub fn open_default() -> Self {
        Self::open(paths::session_path())
    }

    /// Opens the store backed by `path`, reading any previously saved token.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match read_token(&path) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(path = %path.display(), "session storage unreadable: {err:#}");
                None
            }
        };
        Self {
            path: Some(path),
            current,
        }
    }

    /// Creates a store with no backing file.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            current: None,
        }
    }

    /// Returns the backing file path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the stored token, if any.
    pub fn load(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Stores `token`, replacing any previous one.
    pub fn save(&mut self, token: &str) {
        self.current = Some(token.to_string());
        if let Some(path) = &self.path
            && let Err(err) = write_token(path, token)
        {
            tracing::warn!(
                path = %path.display(),
                "failed to persist session token, keeping it in memory: {err:#}"
            );
        }
    }

    /// Removes the stored token. Returns true if a token was present.
    pub fn clear(&mut self) -> bool {
        let had_token = self.current.take().is_some();
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => {
                    tracing::warn!(path = %path.display(), "failed to remove session file: {err}");
                }
            }
        }
        had_token
    }
}

fn read_token(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session from {}", path.display()))?;
    let entries: HashMap<String, String> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse session from {}", path.display()))?;

    Ok(entries.get(TOKEN_KEY).cloned())
}

fn write_token(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let entries = HashMap::from([(TOKEN_KEY, token)]);
    let contents = serde_json::to_string_pretty(&entries).context("Failed to serialize session")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 || !token.is_char_boundary(12) {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}
