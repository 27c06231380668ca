//! Crash-safe file writes: write to a sibling temp file, `fsync`, then
//! `rename` over the target. The rename is the commit point — a reader (or
//! a crash) only ever observes the prior complete file or the new complete
//! file, never a partial write.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use wfk_domain::error::{Error, Result};

/// Atomically write `contents` to `path`, creating parent directories as needed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(format!("creating directory {}", dir.display()), e))?;
    }

    let tmp_path = sibling_tmp_path(path);
    tracing::debug!(path = %path.display(), tmp = %tmp_path.display(), "writing atomic file");

    let mut file = File::create(&tmp_path).map_err(|e| Error::io(format!("creating temp file {}", tmp_path.display()), e))?;
    file.write_all(contents)
        .map_err(|e| Error::io(format!("writing temp file {}", tmp_path.display()), e))?;
    file.sync_all()
        .map_err(|e| Error::io(format!("fsyncing temp file {}", tmp_path.display()), e))?;
    drop(file);

    std::fs::rename(&tmp_path, path).map_err(|e| Error::io(format!("renaming {} to {}", tmp_path.display(), path.display()), e))?;
    Ok(())
}

/// Atomically remove `path`, succeeding silently if it does not exist.
pub fn remove_atomic(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(format!("removing {}", path.display()), e)),
    }
}

fn sibling_tmp_path(path: &Path) -> std::path::PathBuf {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("state");
    path.with_file_name(format!("{file_name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("file.json");
        write_atomic(&path, b"hello").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        assert!(!sibling_tmp_path(&path).exists());
    }

    #[test]
    fn overwrite_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.json");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn remove_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        remove_atomic(&path).unwrap();
    }
}
