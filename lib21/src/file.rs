//!
//! # File IO
//!
//! Newline-preserving reads, and all-or-nothing writes via a temporary file
//! renamed into place only once fully written.
//!

// Std-Lib Imports
use std::io::Write;
use std::path::Path;

// Crates.io Imports
use log::debug;
use tempfile::{Builder, NamedTempFile};

// Local Imports
use crate::error::{LibError, LibResult};

/// Split `text` into lines, each retaining its trailing newline (if any)
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Read file `path` to a string
pub fn read_to_string(path: impl AsRef<Path>) -> LibResult<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| LibError::io(path, e))
}

/// Create a temporary file in `dir`. On unix it takes the same umask-governed mode as [std::fs::File::create].
fn temp_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Write `contents` to `path`, atomically replacing any existing file
pub fn write_atomic(path: impl AsRef<Path>, contents: &str) -> LibResult<()> {
    write_atomic_with(path, |w| w.write_all(contents.as_bytes()))
}

///
/// Write to `path` through the writer-function `write`, atomically replacing any existing file.
///
/// Content goes first to a temporary file in the destination's directory, which is
/// renamed over `path` only after `write` succeeds and the data is flushed.
/// On any failure the temporary file is removed and `path` is left as it was.
/// An existing destination's permissions carry over to the new file.
///
pub fn write_atomic_with<F>(path: impl AsRef<Path>, write: F) -> LibResult<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = temp_in(dir).map_err(|e| LibError::io(dir, e))?;
    debug!("writing {:?} via {:?}", path, tmp.path());

    write(&mut tmp).map_err(|e| LibError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| LibError::io(tmp.path(), e))?;
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| LibError::io(tmp.path(), e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| LibError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| LibError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_preserving_newlines() {
        assert_eq!(split_lines("a\nb\r\n\nc"), vec!["a\n", "b\r\n", "\n", "c"]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("x\n").concat(), "x\n");
    }
    #[test]
    fn replaces_file() -> LibResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cell.lib");
        std::fs::write(&path, "old\n")?;
        write_atomic(&path, "new\n")?;
        assert_eq!(read_to_string(&path)?, "new\n");
        // Only the destination remains; no temporaries
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }
    #[cfg(unix)]
    #[test]
    fn new_file_mode_follows_umask() -> LibResult<()> {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir()?;
        let plain = dir.path().join("plain.lib");
        let atomic = dir.path().join("atomic.lib");
        std::fs::write(&plain, "x\n")?;
        write_atomic(&atomic, "x\n")?;
        let mode = |p: &Path| -> std::io::Result<u32> {
            Ok(std::fs::metadata(p)?.permissions().mode() & 0o777)
        };
        assert_eq!(mode(atomic.as_path())?, mode(plain.as_path())?);
        Ok(())
    }
    #[test]
    fn failed_write_leaves_original() -> LibResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cell.lib");
        std::fs::write(&path, "original\ncontent\n")?;

        let result = write_atomic_with(&path, |w| {
            w.write_all(b"partial")?;
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        });
        assert!(matches!(result, Err(LibError::Io { .. })));
        assert_eq!(std::fs::read(&path)?, b"original\ncontent\n");
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }
    #[test]
    fn missing_file_reports_path() {
        match read_to_string("/definitely/not/here.lib") {
            Err(LibError::Io { path, .. }) => assert_eq!(path, Path::new("/definitely/not/here.lib")),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
