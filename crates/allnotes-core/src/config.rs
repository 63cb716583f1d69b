//! Discovery configuration and the home directory.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::DiscoveryError;

/// File name of the fallback index, relative to the home directory.
pub const DEFAULT_INDEX_NAME: &str = "allnotes.index";

/// The user's home directory, passed explicitly wherever paths are filtered
/// or shortened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeDir {
    path: PathBuf,
    alias: String,
}

impl HomeDir {
    /// Use `path` as the home directory, displayed as `~`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            alias: "~".to_string(),
        }
    }

    /// Resolve the home directory of the current user.
    pub fn from_env() -> Option<Self> {
        dirs::home_dir().map(Self::new)
    }

    /// Use a different display alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// The home directory itself.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if `path` lies inside the home directory.
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.path)
    }

    /// Resolve a path relative to home. Absolute paths are returned as-is.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }

    /// Render `path` with a leading home directory replaced by the alias.
    ///
    /// Matching is per component, so `/home/ann2` is not shortened when the
    /// home directory is `/home/ann`.
    pub fn shorten(&self, path: &Path) -> String {
        match path.strip_prefix(&self.path) {
            Ok(rest) if rest.as_os_str().is_empty() => self.alias.clone(),
            Ok(rest) => format!("{}/{}", self.alias, rest.display()),
            Err(_) => path.display().to_string(),
        }
    }
}

/// Configuration for locating note files.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct DiscoveryConfig {
    /// Home directory; candidates outside it are rejected.
    pub home: PathBuf,

    /// Directories to walk (empty = the home directory).
    #[builder(default)]
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// File names that identify a note.
    #[builder(default = "default_file_names()")]
    #[serde(default = "default_file_names")]
    pub file_names: Vec<String>,

    /// Fallback index of note paths, one per line relative to home
    /// (None = `~/allnotes.index`).
    #[builder(default)]
    #[serde(default)]
    pub index_file: Option<PathBuf>,

    /// Glob patterns of paths to skip.
    #[builder(default = "default_excludes()")]
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Descend into hidden directories.
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// Follow symbolic links while walking.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Maximum depth to walk (None = unlimited).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Number of walker threads (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_file_names() -> Vec<String> {
    vec!["notes.txt".to_string(), "log.txt".to_string()]
}

fn default_excludes() -> Vec<String> {
    vec![
        "**/Library/Python/**".to_string(),
        "**/*access.log*/**".to_string(),
    ]
}

impl DiscoveryConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.home {
            Some(ref home) if home.as_os_str().is_empty() => {
                return Err("Home directory cannot be empty".to_string());
            }
            Some(_) => {}
            None => return Err("Home directory is required".to_string()),
        }
        if let Some(ref names) = self.file_names
            && names.iter().any(|n| n.is_empty() || n.contains('/'))
        {
            return Err("Note file names must be non-empty and contain no '/'".to_string());
        }
        Ok(())
    }
}

impl From<DiscoveryConfigBuilderError> for DiscoveryError {
    fn from(err: DiscoveryConfigBuilderError) -> Self {
        Self::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl DiscoveryConfig {
    /// Create a new discovery config builder.
    pub fn builder() -> DiscoveryConfigBuilder {
        DiscoveryConfigBuilder::default()
    }

    /// Create a default config rooted at `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            roots: Vec::new(),
            file_names: default_file_names(),
            index_file: None,
            exclude: default_excludes(),
            include_hidden: false,
            follow_symlinks: false,
            max_depth: None,
            threads: 0,
        }
    }

    /// Directories that will actually be walked.
    pub fn effective_roots(&self) -> Vec<PathBuf> {
        if self.roots.is_empty() {
            vec![self.home.clone()]
        } else {
            self.roots.clone()
        }
    }

    /// Location of the fallback index file.
    pub fn index_path(&self) -> PathBuf {
        match self.index_file {
            Some(ref path) => self.home.join(path),
            None => self.home.join(DEFAULT_INDEX_NAME),
        }
    }

    /// Check if `name` is one of the note file names.
    pub fn is_note_name(&self, name: &str) -> bool {
        self.file_names.iter().any(|n| n == name)
    }

    /// The home directory as a [`HomeDir`].
    pub fn home_dir(&self) -> HomeDir {
        HomeDir::new(&self.home)
    }
}
