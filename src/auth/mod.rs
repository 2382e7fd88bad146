//! Read-only credential access for the dispatch path.
//!
//! The pipeline only ever *reads* the credential: [`CredentialStore`] hands
//! out the current bearer token (or nothing, for anonymous users) and the
//! dispatcher substitutes the placeholder token when it is absent.  Writing
//! and persisting credentials belongs to the sign-up flow, which is outside
//! this crate.
//!
//! [`FileCredentialStore`] reads `credential.json` from the platform config
//! directory; [`StaticCredentialStore`] carries a fixed token for wiring
//! and tests.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CredentialStore trait
// ---------------------------------------------------------------------------

/// Read-only view into wherever the credential lives.
///
/// Implementors must be `Send + Sync` so the store can be shared as
/// `Arc<dyn CredentialStore>` with spawned dispatch tasks.
pub trait CredentialStore: Send + Sync {
    /// The current bearer token, or `None` when the user is anonymous.
    fn token(&self) -> Option<String>;
}

// ---------------------------------------------------------------------------
// StaticCredentialStore
// ---------------------------------------------------------------------------

/// A fixed credential, set once at construction.
pub struct StaticCredentialStore {
    token: Option<String>,
}

impl StaticCredentialStore {
    /// Store holding `token` (pass `None` for an anonymous store).
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl CredentialStore for StaticCredentialStore {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }
}

// ---------------------------------------------------------------------------
// FileCredentialStore
// ---------------------------------------------------------------------------

/// On-disk shape of `credential.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialFile {
    token: String,
}

/// Reads the bearer token from a JSON file on every lookup.
///
/// Re-reading per lookup means a credential written by the external sign-up
/// flow is picked up on the next dispatch without a restart.  A missing or
/// malformed file is treated as no credential.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store backed by the platform-appropriate `credential.json`.
    pub fn new() -> Self {
        Self {
            path: crate::config::AppPaths::new().credential_file,
        }
    }

    /// Store backed by an explicit path (useful for tests).
    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<String> {
        let data = std::fs::read_to_string(&self.path).ok()?;
        let file: CredentialFile = match serde_json::from_str(&data) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("credential file {} is malformed: {e}", self.path.display());
                return None;
            }
        };

        if file.token.is_empty() {
            None
        } else {
            Some(file.token)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
