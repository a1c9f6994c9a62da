//! # Description
//! - the artifact encoders and the batch that writes them to disk
//!
//! # Components
//! - coe: decimal `memory_initialization_vector` files, flat and im2col order
//! - mem: hex word files with little-endian pixel packing
//! - ArtifactBatch: stage every artifact in a temporary file, rename them all
//!   at the end so a failed run leaves nothing a consumer could pick up

pub mod coe;
pub mod mem;

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::GenError;

#[derive(Debug, Default)]
pub struct ArtifactBatch {
    // (temporary path, final path)
    staged: Vec<(PathBuf, PathBuf)>,
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

impl ArtifactBatch {
    pub fn new() -> Self {
        ArtifactBatch { staged: Vec::new() }
    }

    /// # Description
    /// - open `<path>.tmp`, hand a buffered writer to `write`, flush and close it
    /// - the file is closed on every exit path; on error the staged file is
    ///   removed when the batch is dropped
    /// # Return
    /// - whatever `write` returns
    pub fn stage<F, R>(&mut self, path: &Path, write: F) -> Result<R, GenError>
    where
        F: FnOnce(&mut BufWriter<File>) -> Result<R, GenError>,
    {
        let tmp = staging_path(path);
        self.staged.push((tmp.clone(), path.to_path_buf()));
        debug!("staging {}", tmp.display());

        let mut writer = BufWriter::new(File::create(&tmp)?);
        let ret = write(&mut writer)?;
        writer.flush()?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(ret)
    }

    /// # Description
    /// - move every staged file to its final path
    /// # Return
    /// - the final paths, in staging order
    pub fn commit(mut self) -> Result<Vec<PathBuf>, GenError> {
        let staged = std::mem::take(&mut self.staged);
        let mut committed = Vec::with_capacity(staged.len());
        for (idx, (tmp, path)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(tmp, path) {
                // the ones not renamed yet are still staged
                self.staged = staged[idx..].to_vec();
                return Err(e.into());
            }
            committed.push(path.clone());
        }
        Ok(committed)
    }
}

impl Drop for ArtifactBatch {
    fn drop(&mut self) {
        for (tmp, _) in &self.staged {
            match fs::remove_file(tmp) {
                Ok(()) => debug!("removed staged file {}", tmp.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!("cannot remove staged file {}: {}", tmp.display(), e),
            }
        }
    }
}
