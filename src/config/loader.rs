use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$SHIPDECK_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/shipdeck/config.toml`
/// 4. `~/.config/shipdeck/config.toml`
///
/// When no config file exists anywhere, defaults are used.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit_path {
        Some(path) => Some(path.to_owned()),
        None => find_config(),
    };

    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML from {}", path.display()))?;
    Ok(config)
}

fn find_config() -> Option<PathBuf> {
    // $SHIPDECK_CONFIG
    if let Ok(path) = std::env::var("SHIPDECK_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    // $XDG_CONFIG_HOME/shipdeck/config.toml
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("shipdeck/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // ~/.config/shipdeck/config.toml
    if let Ok(home) = std::env::var("HOME") {
        let p = PathBuf::from(home).join(".config/shipdeck/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}
