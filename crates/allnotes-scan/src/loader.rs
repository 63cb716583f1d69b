//! Reading note files and splitting them into entries.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use allnotes_core::{Note, ParseWarning};
use allnotes_parse::{NoteParser, ParseError};

/// Errors that abort loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A note file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser rejected a timestamp its own recognizer accepted.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Loads and parses note files.
#[derive(Debug)]
pub struct NoteLoader {
    parser: NoteParser,
    parallel: bool,
}

impl NoteLoader {
    /// Create a sequential loader around `parser`.
    pub fn new(parser: NoteParser) -> Self {
        Self {
            parser,
            parallel: false,
        }
    }

    /// Load files on the rayon pool instead of one after another.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The parser used for every file.
    pub fn parser(&self) -> &NoteParser {
        &self.parser
    }

    /// Read and parse a single file.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn load(&self, path: &Path) -> Result<Note, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (text, lossy) = match String::from_utf8(bytes) {
            Ok(text) => (text, false),
            Err(err) => (String::from_utf8_lossy(err.as_bytes()).into_owned(), true),
        };

        let mut note = self.parser.parse(path, text)?;
        if lossy {
            let warning = ParseWarning::invalid_utf8(path);
            tracing::warn!("{}", warning.message);
            note.push_warning(warning);
        }
        Ok(note)
    }

    /// Load every file in `paths`, in order.
    ///
    /// Stops at the first file that fails.
    pub fn load_all<P>(&self, paths: &[P]) -> Result<Vec<Note>, LoadError>
    where
        P: AsRef<Path> + Sync,
    {
        let notes: Vec<Note> = if self.parallel {
            paths
                .par_iter()
                .map(|p| self.load(p.as_ref()))
                .collect::<Result<_, _>>()?
        } else {
            paths
                .iter()
                .map(|p| self.load(p.as_ref()))
                .collect::<Result<_, _>>()?
        };

        let bytes: usize = notes.iter().map(|n| n.text().len()).sum();
        tracing::debug!(notes = notes.len(), bytes, "loaded note files");

        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allnotes_core::WarningKind;
    use std::fs;
    use tempfile::TempDir;

    fn loader() -> NoteLoader {
        NoteLoader::new(NoteParser::standard().unwrap())
    }

    #[test]
    fn test_load_single_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "Mon Jan  2 15:04:05 MST 2006\nhello\n").unwrap();

        let note = loader().load(&path).unwrap();

        assert_eq!(note.path(), path);
        assert_eq!(note.entries().len(), 1);
        assert_eq!(note.entries()[0].body(), "hello");
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gone.txt");

        match loader().load(&path) {
            Err(LoadError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        let mut bytes = b"Mon Jan  2 15:04:05 MST 2006\ncaf".to_vec();
        bytes.push(0xe9);
        fs::write(&path, bytes).unwrap();

        let note = loader().load(&path).unwrap();
        assert_eq!(note.entries()[0].body(), "caf\u{fffd}");
        assert_eq!(note.warnings().len(), 1);
        assert_eq!(note.warnings()[0].kind, WarningKind::InvalidUtf8);
    }

    #[test]
    fn test_parallel_keeps_input_order() {
        let temp = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..16)
            .map(|i| {
                let path = temp.path().join(format!("{i:02}.txt"));
                fs::write(&path, format!("Mon Jan  2 15:04:{i:02} MST 2006\n{i}\n")).unwrap();
                path
            })
            .collect();

        let notes = loader().parallel(true).load_all(&paths).unwrap();

        let loaded: Vec<&Path> = notes.iter().map(|n| n.path()).collect();
        let expected: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
        assert_eq!(loaded, expected);
    }
}
