//! Demo Configuration
//!
//! Loads and saves the demo configuration from `~/.knot/knot.json`.
//! Absent fields pick up their defaults through serde, so a partial
//! config file is fine.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::types::DemoConfig;

/// Config file name within the knot directory.
const CONFIG_FILENAME: &str = "knot.json";

/// Returns the knot directory: `~/.knot`.
pub fn get_knot_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/root"))
        .join(".knot")
}

/// Returns the full path to the config file: `~/.knot/knot.json`.
pub fn get_config_path() -> PathBuf {
    get_knot_dir().join(CONFIG_FILENAME)
}

/// Load the demo config from disk.
///
/// Returns `None` if the config file does not exist or cannot be
/// parsed; callers fall back to [`crate::types::default_config`].
pub fn load_config() -> Option<DemoConfig> {
    let config_path = get_config_path();
    if !config_path.exists() {
        return None;
    }

    let contents = fs::read_to_string(&config_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save the demo config to `~/.knot/knot.json`, creating the directory
/// if needed.
pub fn save_config(config: &DemoConfig) -> Result<()> {
    let dir = get_knot_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create knot directory")?;
    }

    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(get_config_path(), json).context("Failed to write config file")?;

    Ok(())
}

/// Resolve a path that may start with `~` to an absolute path.
///
/// If the path starts with `~`, the tilde is replaced with the user's
/// home directory. Otherwise the path is returned as-is.
pub fn resolve_path(p: &str) -> String {
    if let Some(rest) = p.strip_prefix('~') {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"));
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        home.join(rest).to_string_lossy().to_string()
    } else {
        p.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::default_config;

    #[test]
    fn test_resolve_path_with_tilde() {
        let resolved = resolve_path("~/some/path");
        assert!(!resolved.starts_with('~'));
        assert!(resolved.ends_with("some/path"));
    }

    #[test]
    fn test_resolve_path_without_tilde() {
        let path = "/absolute/path/to/file";
        assert_eq!(resolve_path(path), path);
    }

    #[test]
    fn test_config_survives_a_round_trip() {
        let config = default_config();
        let json = serde_json::to_string(&config).unwrap();
        let back: DemoConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fixpoint_upper, config.fixpoint_upper);
        assert_eq!(back.snapshot_path, config.snapshot_path);
    }
}
