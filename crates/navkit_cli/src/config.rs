//! Navkit configuration file handling

use anyhow::{Context, Result};
use navkit_widgets::{DockConfig, DrawerConfig, NavTheme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "navkit.toml";

/// Top-level navkit configuration (navkit.toml)
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct NavkitConfig {
    #[serde(default)]
    pub dock: DockConfig,
    #[serde(default)]
    pub drawer: DrawerConfig,
    #[serde(default)]
    pub theme: NavTheme,
}

impl NavkitConfig {
    /// Load configuration from a file or a directory containing navkit.toml
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = Self::resolve(path);
        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `navkit init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid {}", config_path.display()))
    }

    /// Load the given file, else `./navkit.toml` if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load(Path::new(CONFIG_FILE)),
            None => {
                tracing::debug!("no {CONFIG_FILE} found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse and validate TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: NavkitConfig = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.dock.validate().context("Invalid [dock] section")?;
        self.drawer.validate().context("Invalid [drawer] section")?;
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    fn resolve(path: &Path) -> PathBuf {
        if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        }
    }
}

/// Write a default navkit.toml into `dir`
pub fn write_default(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            config_path.display()
        );
    }
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(&config_path, NavkitConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
