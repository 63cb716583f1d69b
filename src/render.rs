//! Text and JSON output of the merged feed.

use std::io::{self, Write};

use serde::Serialize;

use allnotes_core::{Entry, HomeDir};

/// Timestamp layout of the text output.
pub const TEXT_TIMESTAMP: &str = "%Y-%m-%d %a %H:%M:%S %z";

/// Writes merged entries for a reader.
#[derive(Debug, Clone, Copy)]
pub struct Presenter<'a> {
    home: &'a HomeDir,
}

/// One entry in the JSON output.
#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    timestamp: String,
    paths: Vec<String>,
    body: &'a str,
}

impl<'a> Presenter<'a> {
    pub fn new(home: &'a HomeDir) -> Self {
        Self { home }
    }

    /// Source paths of `entry`, home-shortened and comma separated.
    pub fn paths(&self, entry: &Entry) -> String {
        entry
            .paths()
            .map(|p| self.home.shorten(p))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Write each entry as a header line, a blank line, the body and another blank line.
    pub fn write_text<W: Write>(&self, out: &mut W, entries: &[Entry]) -> io::Result<()> {
        for entry in entries {
            write!(
                out,
                "{} {}\n\n{}\n\n",
                entry.timestamp().format(TEXT_TIMESTAMP),
                self.paths(entry),
                entry.body()
            )?;
        }
        Ok(())
    }

    /// Write all entries as a pretty-printed JSON array.
    ///
    /// Paths are left absolute.
    pub fn write_json<W: Write>(&self, out: &mut W, entries: &[Entry]) -> io::Result<()> {
        let json: Vec<JsonEntry<'_>> = entries
            .iter()
            .map(|e| JsonEntry {
                timestamp: e.timestamp().to_rfc3339(),
                paths: e.paths().map(|p| p.display().to_string()).collect(),
                body: e.body(),
            })
            .collect();

        serde_json::to_writer_pretty(&mut *out, &json)?;
        writeln!(out)
    }
}
