//! Scratch mirror: extracted files staged on disk under a temporary root

use crate::error::BeautifyError;
use crate::extract::SourceFile;
use crate::tree::check_segments;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Owns a scratch directory for one run and cleans it up when dropped.
///
/// A root the mirror created is removed entirely; a pre-existing empty
/// directory is only emptied again.
#[derive(Debug)]
pub struct ScratchMirror {
    root: PathBuf,
    created: bool,
}

impl ScratchMirror {
    /// Claim `root`, which must be missing or an empty directory
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, BeautifyError> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| BeautifyError::fs("Failed to create", &root, e))?;
            return Ok(Self { root, created: true });
        }

        let mut entries = fs::read_dir(&root).map_err(|e| BeautifyError::fs("Failed to read", &root, e))?;
        if entries.next().is_some() {
            return Err(BeautifyError::fs(
                "Refusing to stage in",
                &root,
                io::Error::new(io::ErrorKind::AlreadyExists, "scratch directory is not empty"),
            ));
        }
        Ok(Self { root, created: false })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one file per source, creating directories as needed. Same path overwrites.
    pub fn write_all(&self, files: &[SourceFile]) -> Result<(), BeautifyError> {
        for file in files {
            check_segments(&file.segments)?;
            let Some((name, dirs)) = file.segments.split_last() else {
                continue;
            };
            let dir = dirs.iter().fold(self.root.clone(), |acc, d| acc.join(d));
            fs::create_dir_all(&dir).map_err(|e| BeautifyError::fs("Failed to create", &dir, e))?;
            let path = dir.join(name);
            fs::write(&path, &file.content)
                .map_err(|e| BeautifyError::fs("Failed to write", &path, e))?;
        }
        tracing::debug!(files = files.len(), root = %self.root.display(), "staged files");
        Ok(())
    }

    /// Remove the mirror now, reporting failure
    pub fn remove(mut self) -> Result<(), BeautifyError> {
        let root = std::mem::take(&mut self.root);
        clear(&root, self.created).map_err(|e| BeautifyError::fs("Failed to remove", &root, e))
    }
}

fn clear(root: &Path, created: bool) -> io::Result<()> {
    if created {
        return fs::remove_dir_all(root);
    }
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

impl Drop for ScratchMirror {
    fn drop(&mut self) {
        if self.root.as_os_str().is_empty() {
            return;
        }
        if let Err(e) = clear(&self.root, self.created) {
            tracing::warn!(path = %self.root.display(), error = %e, "scratch cleanup failed");
        }
    }
}
