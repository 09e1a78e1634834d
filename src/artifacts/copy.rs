// src/artifacts/copy.rs

use std::fs::{self, File};
use std::path::Path;

use anyhow::Context;
use tracing::{debug, warn};

use crate::errors::Result;

/// Copy `src` to `dst`, keeping the permission bits and modification time.
///
/// The exported files are executables, so the execute bit must survive the
/// copy. Returns the number of bytes copied.
pub fn copy_preserving_metadata(src: &Path, dst: &Path) -> Result<u64> {
    let metadata = fs::metadata(src).with_context(|| format!("reading metadata of {:?}", src))?;

    let bytes = fs::copy(src, dst).with_context(|| format!("copying {:?} to {:?}", src, dst))?;

    // mtime before permissions: dst may end up read-only.
    match metadata.modified() {
        Ok(modified) => {
            let applied = File::open(dst).and_then(|f| f.set_modified(modified));
            if let Err(err) = applied {
                warn!(path = ?dst, error = %err, "could not preserve modification time");
            }
        }
        Err(err) => debug!(path = ?src, error = %err, "source has no modification time"),
    }

    fs::set_permissions(dst, metadata.permissions())
        .with_context(|| format!("setting permissions of {:?}", dst))?;

    Ok(bytes)
}
