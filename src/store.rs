// src/store.rs
// JSON Lines output: one extracted Word per line, in the order pages finish.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::error::Result;
use crate::word::Word;

/// Create `dir` (and parents) unless it is empty or already there.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub struct WordSink {
    path: PathBuf,
    out: BufWriter<File>,
    written: usize,
}

impl WordSink {
    /// Create or truncate `path`, making parent directories as needed.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            ensure_directory(parent)?;
        }
        let out = BufWriter::new(File::create(&path)?);
        Ok(Self { path, out, written: 0 })
    }

    pub fn write(&mut self, word: &Word) -> Result<()> {
        serde_json::to_writer(&mut self.out, word)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and hand back the path written to.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.out.flush()?;
        Ok(self.path)
    }
}
