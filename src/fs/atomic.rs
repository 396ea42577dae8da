//! Atomic file replacement.
//!
//! All atomic writes follow this pattern:
//! 1. Write content to a uniquely named temporary file in the target directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! `rename()` is atomic when source and destination share a filesystem, so a
//! concurrent reader (a node_exporter textfile scrape, say) sees either the
//! old file or the new one, never a partial write. On failure the target is
//! left untouched.

use crate::error::{MonitorError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Mode of files published for scraping.
#[cfg(unix)]
const PUBLISHED_MODE: u32 = 0o644;

/// Content written and synced next to its target but not yet visible there.
///
/// The parent directory must already exist; it is not created. Each stage
/// uses its own uniquely named temporary file, so overlapping writers each
/// perform one whole-file replace. Dropping a staged write without committing removes the temporary file
/// and leaves the target untouched.
#[derive(Debug)]
pub struct StagedWrite {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    /// Write `content` to a temporary file in the directory of `path`.
    pub fn stage<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<Self> {
        let target = path.as_ref().to_path_buf();
        let parent = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !parent.is_dir() {
            return Err(MonitorError::WriteError(format!(
                "directory '{}' does not exist",
                parent.display()
            )));
        }

        let temp = write_and_sync(parent, content)?;
        Ok(Self { temp, target })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rename the staged file over its target.
    pub fn commit(self) -> Result<()> {
        replace(self.temp, &self.target)
    }
}

/// Stage `content` in a fresh temporary file inside `dir`.
///
/// The file is removed again if anything fails before it is persisted.
fn write_and_sync(dir: &Path, content: &[u8]) -> Result<NamedTempFile> {
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
        MonitorError::WriteError(format!(
            "failed to create temporary file in '{}': {}",
            dir.display(),
            e
        ))
    })?;

    temp.write_all(content)
        .and_then(|()| set_published_mode(temp.as_file()))
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| {
            MonitorError::WriteError(format!(
                "failed to write temporary file '{}': {}",
                temp.path().display(),
                e
            ))
        })?;

    Ok(temp)
}

#[cfg(unix)]
fn set_published_mode(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(PUBLISHED_MODE))
}

#[cfg(not(unix))]
fn set_published_mode(_file: &File) -> std::io::Result<()> {
    Ok(())
}

fn replace(temp: NamedTempFile, target: &Path) -> Result<()> {
    temp.persist(target).map_err(|e| {
        MonitorError::WriteError(format!(
            "failed to atomically replace '{}': {}",
            target.display(),
            e.error
        ))
    })?;

    // Persist the directory entry as well
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        StagedWrite::stage(path, content)?.commit()
    }

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("locks.prom");

        atomic_write(&file_path, b"p4_locks_db_read 1\n").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "p4_locks_db_read 1\n");
    }

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("locks.prom");
        fs::write(&file_path, "original content").unwrap();

        atomic_write(&file_path, b"new content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "new content");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("locks.prom");

        atomic_write(&file_path, b"content").unwrap();
        atomic_write(&file_path, b"content again").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("locks.prom")]);
    }

    #[test]
    fn test_atomic_write_missing_directory_keeps_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing").join("locks.prom");

        let err = atomic_write(&file_path, b"content").unwrap_err();

        assert!(matches!(err, MonitorError::WriteError(_)));
        assert!(!temp_dir.path().join("missing").exists());
    }

    #[test]
    fn test_dropped_stage_leaves_target_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("locks.prom");
        fs::write(&file_path, "previous").unwrap();

        let staged = StagedWrite::stage(&file_path, b"next").unwrap();
        assert_eq!(staged.target(), file_path.as_path());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 2);
        drop(staged);

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "previous");
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_commit_publishes_staged_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("locks.prom");

        let staged = StagedWrite::stage(&file_path, b"staged").unwrap();
        assert!(!file_path.exists());
        staged.commit().unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "staged");
    }

    #[cfg(unix)]
    #[test]
    fn test_concurrent_writers_replace_whole_file() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::thread;

        const SIZE: usize = 256 * 1024;
        const ROUNDS: usize = 50;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("locks.prom");
        atomic_write(&file_path, &vec![b'a'; SIZE]).unwrap();

        let done = Arc::new(AtomicBool::new(false));
        let reader = {
            let file_path = file_path.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut torn = 0;
                while !done.load(Ordering::Acquire) {
                    let content = fs::read(&file_path).unwrap();
                    let uniform = content.len() == SIZE
                        && (content.iter().all(|&b| b == b'a')
                            || content.iter().all(|&b| b == b'b'));
                    if !uniform {
                        torn += 1;
                    }
                }
                torn
            })
        };

        let writers: Vec<_> = [b'a', b'b']
            .into_iter()
            .map(|byte| {
                let file_path = file_path.clone();
                thread::spawn(move || {
                    let content = vec![byte; SIZE];
                    (0..ROUNDS)
                        .filter(|_| atomic_write(&file_path, &content).is_err())
                        .count()
                })
            })
            .collect();

        let failed: usize = writers.into_iter().map(|w| w.join().unwrap()).sum();
        done.store(true, Ordering::Release);
        let torn = reader.join().unwrap();

        assert_eq!(failed, 0);
        assert_eq!(torn, 0);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_publishes_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("locks.prom");

        atomic_write(&file_path, b"content").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
