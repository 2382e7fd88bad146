//! Cross-platform application paths using the `dirs` crate.
//!
//! Config dir (settings + credential):
//!   Windows: %APPDATA%\askrelay\
//!   macOS:   ~/Library/Application Support/askrelay/
//!   Linux:   ~/.config/askrelay/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `credential.json`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to `credential.json`, written by the external sign-up
    /// flow and only ever read here.
    pub credential_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "askrelay";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let credential_file = config_dir.join("credential.json");

        Self {
            config_dir,
            settings_file,
            credential_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_non_empty() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert!(paths
            .credential_file
            .file_name()
            .is_some_and(|n| n == "credential.json"));
    }
}
