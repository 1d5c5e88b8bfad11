use crate::error::{Result, VckError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "verscheck.toml";

/// Options for the versions check, read from the `[versions-check]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckOptions {
    /// Print the installed packages that require each outdated one
    #[serde(rename = "show-links")]
    pub show_links: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default, rename = "versions-check")]
    versions_check: Option<CheckOptions>,
}

/// Loads [`CheckOptions`] from the project directory
pub struct ConfigLoader {
    project_path: PathBuf,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Missing file or missing table yields the defaults.
    pub fn load(&self) -> Result<CheckOptions> {
        let path = self.project_path.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {} found, using default options", CONFIG_FILE);
            return Ok(CheckOptions::default());
        }

        log::debug!("Reading options from {}", path.display());
        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<CheckOptions> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| VckError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;
        Ok(file.versions_check.unwrap_or_default())
    }
}
