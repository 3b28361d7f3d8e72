//! Scoped ownership of compiled artifacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Owns a compiled object file on disk and removes it when dropped.
///
/// Ownership of the file transfers with the guard: compilation produces it,
/// the scoring step consumes it, and the file is gone once scoring returns,
/// whether scoring succeeded or not. A guard dropped without ever reaching
/// the scorer removes the file too, so an abandoned candidate leaves
/// nothing behind in the temp directory.
#[derive(Debug)]
pub struct Artifact {
    path: PathBuf,
}

impl Artifact {
    /// Take ownership of the file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Artifact { path }
    }

    /// Path to the artifact file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Artifact {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            // Already gone: nothing to release.
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to remove artifact");
            }
        }
    }
}
