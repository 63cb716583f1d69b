//! JWalk-based note discovery.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use globset::{Glob, GlobSet, GlobSetBuilder};
use jwalk::{Parallelism, WalkDir};

use allnotes_core::{DiscoveryConfig, DiscoveryError, HomeDir};

/// Locates note files under the configured roots and in the index file.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoteFinder;

impl NoteFinder {
    /// Create a new finder.
    pub fn new() -> Self {
        Self
    }

    /// Find every note file allowed by `config`, sorted and deduplicated.
    ///
    /// Unreadable directories are skipped. A missing index file is ignored,
    /// but one that exists and cannot be read is an error.
    pub fn find(&self, config: &DiscoveryConfig) -> Result<Vec<PathBuf>, DiscoveryError> {
        let excludes = build_excludes(&config.exclude)?;
        let home = HomeDir::new(canonical_or_self(&config.home));
        let mut candidates = BTreeSet::new();

        for root in config.effective_roots() {
            match root.canonicalize() {
                Ok(root) => self.walk(config, &root, &mut candidates),
                Err(err) => tracing::warn!("Skipping root {}: {err}", root.display()),
            }
        }
        let walked = candidates.len();

        let indexed = self.read_index(config, &home, &mut candidates)?;

        let found: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|path| accepts(config, &home, &excludes, path))
            .collect();

        tracing::debug!(
            walked,
            indexed,
            accepted = found.len(),
            "note discovery finished"
        );

        Ok(found)
    }

    /// Collect files with a note name below `root`.
    fn walk(&self, config: &DiscoveryConfig, root: &Path, candidates: &mut BTreeSet<PathBuf>) {
        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };

        let walker = WalkDir::new(root)
            .parallelism(parallelism)
            .skip_hidden(!config.include_hidden)
            .follow_links(config.follow_symlinks)
            .min_depth(0)
            .max_depth(config.max_depth.map(|d| d as usize).unwrap_or(usize::MAX));

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!(path = ?err.path(), "skipping unreadable entry: {err}");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let is_note = entry
                .file_name()
                .to_str()
                .is_some_and(|name| config.is_note_name(name));
            if is_note {
                candidates.insert(entry.path());
            }
        }
    }

    /// Add paths listed in the index file. Returns how many were new.
    fn read_index(
        &self,
        config: &DiscoveryConfig,
        home: &HomeDir,
        candidates: &mut BTreeSet<PathBuf>,
    ) -> Result<usize, DiscoveryError> {
        let index_path = config.index_path();
        if !index_path.is_file() {
            return Ok(0);
        }

        let content =
            std::fs::read_to_string(&index_path).map_err(|e| DiscoveryError::io(&index_path, e))?;

        let mut added = 0;
        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            // `..` would escape the lexical home check below.
            if Path::new(line).components().any(|c| c == Component::ParentDir) {
                tracing::warn!("Ignoring index entry {line:?}: parent directory reference");
                continue;
            }
            if candidates.insert(home.join(line)) {
                added += 1;
            }
        }
        Ok(added)
    }
}

/// Final filter applied to every candidate, walked or indexed.
fn accepts(config: &DiscoveryConfig, home: &HomeDir, excludes: &GlobSet, path: &Path) -> bool {
    let named = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| config.is_note_name(n));

    named && home.contains(path) && !excludes.is_match(path) && path.is_file()
}

fn build_excludes(patterns: &[String]) -> Result<GlobSet, DiscoveryError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| DiscoveryError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| DiscoveryError::InvalidPattern {
        pattern: patterns.join(", "),
        message: e.to_string(),
    })
}

fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_home() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("work/project")).unwrap();
        fs::create_dir_all(root.join("Library/Python/3.9")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();

        fs::write(root.join("notes.txt"), "Mon Jan  2 15:04:05 MST 2006\nhome\n").unwrap();
        fs::write(root.join("work/log.txt"), "Mon Jan  2 15:04:05 MST 2006\nwork\n").unwrap();
        fs::write(root.join("work/project/notes.txt"), "x").unwrap();
        fs::write(root.join("work/project/todo.txt"), "x").unwrap();
        fs::write(root.join("Library/Python/3.9/notes.txt"), "x").unwrap();
        fs::write(root.join(".hidden/notes.txt"), "x").unwrap();

        temp
    }

    fn config_for(temp: &TempDir) -> DiscoveryConfig {
        DiscoveryConfig::new(temp.path().canonicalize().unwrap())
    }

    fn relative(temp: &TempDir, found: &[PathBuf]) -> Vec<String> {
        let base = temp.path().canonicalize().unwrap();
        found
            .iter()
            .map(|p| p.strip_prefix(&base).unwrap().display().to_string())
            .collect()
    }

    #[test]
    fn test_finds_note_files() {
        let temp = create_test_home();
        let found = NoteFinder::new().find(&config_for(&temp)).unwrap();

        assert_eq!(
            relative(&temp, &found),
            vec!["notes.txt", "work/log.txt", "work/project/notes.txt"]
        );
    }

    #[test]
    fn test_include_hidden() {
        let temp = create_test_home();
        let mut config = config_for(&temp);
        config.include_hidden = true;

        let found = NoteFinder::new().find(&config).unwrap();
        assert!(relative(&temp, &found).contains(&".hidden/notes.txt".to_string()));
    }

    #[test]
    fn test_max_depth() {
        let temp = create_test_home();
        let mut config = config_for(&temp);
        config.max_depth = Some(1);

        let found = NoteFinder::new().find(&config).unwrap();
        assert_eq!(relative(&temp, &found), vec!["notes.txt"]);
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let temp = create_test_home();
        let mut config = config_for(&temp);
        config.exclude = vec!["[".to_string()];

        assert!(matches!(
            NoteFinder::new().find(&config),
            Err(DiscoveryError::InvalidPattern { .. })
        ));
    }
}
