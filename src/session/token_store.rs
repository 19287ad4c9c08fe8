//! Durable storage for the session bearer token.
//!
//! DESIGN
//! ======
//! The store is read at call time rather than cached: `ApiClient` asks
//! for the token on every request, so a token saved by one handle is
//! immediately visible to every other handle sharing the store.

use std::io;
use std::path::PathBuf;

/// Where the session bearer token lives between runs.
///
/// `load` and `clear` swallow their own failures (logging them) because
/// a missing or unreadable token is the same as being logged out; only
/// `save` reports errors, since losing a fresh login is worth surfacing.
pub trait TokenStore: Send + Sync {
    /// Return the persisted token, if one is present and non-empty.
    fn load(&self) -> Option<String>;

    /// Persist a token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` when the token cannot be written.
    fn save(&self, token: &str) -> io::Result<()>;

    /// Remove the persisted token. Removing an absent token is a no-op.
    fn clear(&self);
}

/// Token storage backed by a single file on disk.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() { None } else { Some(token.to_owned()) }
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => None,
            Err(error) => {
                tracing::warn!(path = %self.path.display(), error = %error, "could not read token file");
                None
            }
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => {
                tracing::warn!(path = %self.path.display(), error = %error, "could not remove token file");
            }
        }
    }
}

/// In-memory token storage for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.token.lock().unwrap() = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}

#[cfg(test)]
#[path = "token_store_test.rs"]
mod tests;
