//! Persistent user settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use allnotes_core::{DiscoveryConfigBuilder, HomeDir};

/// Discovery defaults read from `settings.toml`.
///
/// Every field is optional; unset fields keep the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directories to walk, relative to home unless absolute.
    pub roots: Vec<PathBuf>,

    /// Accepted note file names.
    pub file_names: Option<Vec<String>>,

    /// Exclusion globs.
    pub exclude: Option<Vec<String>>,

    /// Fallback index file, relative to home unless absolute.
    pub index_file: Option<PathBuf>,

    /// Descend into hidden directories.
    pub include_hidden: bool,

    /// Walk depth limit.
    pub max_depth: Option<u32>,
}

impl Settings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("allnotes").join("settings.toml"))
    }

    /// Load settings from the default location, or return defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`.
    ///
    /// A missing file yields defaults silently, an invalid one with a warning.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                tracing::warn!("Ignoring settings file {}: {err}", path.display());
                return Self::default();
            }
        };

        match toml::from_str(&content) {
            Ok(settings) => {
                tracing::debug!("loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                tracing::warn!("Ignoring invalid settings file {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Copy the fields that are set onto `builder`.
    pub fn apply(&self, builder: &mut DiscoveryConfigBuilder, home: &HomeDir) {
        if !self.roots.is_empty() {
            builder.roots(self.roots.iter().map(|r| home.join(r)).collect::<Vec<_>>());
        }
        if let Some(ref names) = self.file_names {
            builder.file_names(names.clone());
        }
        if let Some(ref exclude) = self.exclude {
            builder.exclude(exclude.clone());
        }
        if let Some(ref index) = self.index_file {
            builder.index_file(Some(index.clone()));
        }
        if self.include_hidden {
            builder.include_hidden(true);
        }
        if let Some(depth) = self.max_depth {
            builder.max_depth(Some(depth));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allnotes_core::DiscoveryConfig;
    use tempfile::TempDir;

    #[test]
    fn test_parse_partial_settings() {
        let settings: Settings = toml::from_str(
            r#"
            roots = ["Documents", "/srv/journal"]
            include_hidden = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.roots.len(), 2);
        assert!(settings.include_hidden);
        assert!(settings.file_names.is_none());
        assert!(settings.max_depth.is_none());
    }

    #[test]
    fn test_apply_onto_builder() {
        let home = HomeDir::new("/home/u");
        let settings = Settings {
            roots: vec![PathBuf::from("Documents"), PathBuf::from("/srv/journal")],
            file_names: Some(vec!["journal.txt".into()]),
            max_depth: Some(4),
            ..Settings::default()
        };

        let mut builder = DiscoveryConfig::builder();
        builder.home(home.path().to_path_buf());
        settings.apply(&mut builder, &home);
        let config = builder.build().unwrap();

        assert_eq!(
            config.roots,
            vec![PathBuf::from("/home/u/Documents"), PathBuf::from("/srv/journal")]
        );
        assert_eq!(config.file_names, vec!["journal.txt".to_string()]);
        assert_eq!(config.max_depth, Some(4));
        assert!(!config.exclude.is_empty());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(Settings::load_from(&temp.path().join("settings.toml")), Settings::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "roots = 7").unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
