//! Line-delimited JSON sink
//!
//! Links go to `{dir}/{run_key}.jsonl`, content to `{dir}/{run_key}.md`.
//! Every record is a single JSON-encoded string followed by a newline.

use crate::output::traits::{validate_run_key, OutputResult, OutputSink};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only sink writing one JSON string per line
#[derive(Debug, Clone)]
pub struct JsonlSink {
    dir: PathBuf,
}

impl JsonlSink {
    /// Creates a sink rooted at `dir`
    ///
    /// The directory is created on first write if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory records are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the link stream for a run
    pub fn links_path(&self, run_key: &str) -> PathBuf {
        self.dir.join(format!("{}.jsonl", run_key))
    }

    /// Path of the content stream for a run
    pub fn content_path(&self, run_key: &str) -> PathBuf {
        self.dir.join(format!("{}.md", run_key))
    }

    /// Opens, appends one record, and closes the file
    fn append_record(&self, path: &Path, record: &str) -> OutputResult<()> {
        fs::create_dir_all(&self.dir)?;

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        // One write call per record keeps concurrent appends line-atomic
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

impl OutputSink for JsonlSink {
    fn append_link(&self, run_key: &str, url: &str) -> OutputResult<()> {
        validate_run_key(run_key)?;
        self.append_record(&self.links_path(run_key), url)
    }

    fn append_content(&self, run_key: &str, text: &str) -> OutputResult<()> {
        validate_run_key(run_key)?;
        self.append_record(&self.content_path(run_key), text)
    }
}
