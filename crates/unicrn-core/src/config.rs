//! Project configuration (`unicrn.config.json`)

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Folder used when the project does not configure one
pub const DEFAULT_COMPONENTS_FOLDER: &str = "components";

/// Project-level settings read once per command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Project-relative directory holding `ui/` and `hooks/`
    #[serde(default = "default_components_folder")]
    pub components_folder: String,
}

fn default_components_folder() -> String {
    DEFAULT_COMPONENTS_FOLDER.to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            components_folder: default_components_folder(),
        }
    }
}

impl ProjectConfig {
    /// Directory that component sources and the component index live in
    pub fn ui_dir(&self) -> PathBuf {
        Path::new(&self.components_folder).join("ui")
    }

    /// Directory that hook sources and the hook index live in
    pub fn hooks_dir(&self) -> PathBuf {
        Path::new(&self.components_folder).join("hooks")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read the config file, distinguishing "absent" from "broken"
pub fn try_load_config(path: &Path) -> Result<Option<ProjectConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Load the project config, falling back to defaults
///
/// A missing file is silent. A file that cannot be read or parsed is reported as a
/// warning and never fails the calling command.
pub fn load_config(path: &Path) -> ProjectConfig {
    match try_load_config(path) {
        Ok(Some(config)) => config,
        Ok(None) => ProjectConfig::default(),
        Err(e) => {
            eprintln!("{} {}", "Warning:".yellow(), e);
            eprintln!(
                "         Using default components folder \"{}\"",
                DEFAULT_COMPONENTS_FOLDER
            );
            ProjectConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("unicrn.config.json"));
        assert_eq!(config.components_folder, "components");
    }

    #[test]
    fn test_reads_components_folder() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unicrn.config.json");
        std::fs::write(&path, r#"{ "componentsFolder": "src/ui" }"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config.components_folder, "src/ui");
        assert_eq!(config.ui_dir(), Path::new("src/ui/ui"));
        assert_eq!(config.hooks_dir(), Path::new("src/ui/hooks"));
    }

    #[test]
    fn test_unknown_and_missing_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unicrn.config.json");
        std::fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_unparsable_file_downgrades_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unicrn.config.json");
        std::fs::write(&path, "{ componentsFolder: ").unwrap();

        assert!(matches!(
            try_load_config(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(load_config(&path), ProjectConfig::default());
    }
}
