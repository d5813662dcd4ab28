//! Temporary image files: random names under one directory, removed when the guard drops.

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, warn};

/// Length of the random part of a staged file name.
pub const FILE_STEM_LEN: usize = 10;

/// `len` random lowercase ASCII letters.
pub fn random_file_stem(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

/// Where photos are written while they are being annotated.
#[derive(Debug, Clone)]
pub struct ImageStaging {
    dir: PathBuf,
    extension: String,
}

impl ImageStaging {
    /// `extension` may be given with or without the leading dot.
    pub fn new(dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `<dir>/<10 lowercase letters>.<extension>`. Does not touch the filesystem.
    pub fn next_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}", random_file_stem(FILE_STEM_LEN), self.extension))
    }

    /// Creates the directory if needed and reserves a fresh path. The file itself is created by
    /// whoever writes to [`StagedImage::path`].
    pub async fn stage(&self) -> std::io::Result<StagedImage> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.next_path();
        debug!(path = %path.display(), "Staged image path");
        Ok(StagedImage { path })
    }
}

/// A staged file path; the file is deleted when this value is dropped, on every exit path.
#[derive(Debug)]
pub struct StagedImage {
    path: PathBuf,
}

impl StagedImage {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedImage {
    fn drop(&mut self) {
        // Blocking unlink on the runtime thread; one small file per interaction.
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed staged image"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove staged image"
            ),
        }
    }
}
