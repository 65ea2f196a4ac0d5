//! Local rule file cache
//!
//! The last successfully fetched rule file is kept on disk so the store can
//! start without a network round trip. Writes go through a temporary file
//! plus rename so a crash mid-write never leaves a torn cache.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, UaDetectorError};

const DATA_FILE: &str = "uas.json";
const VERSION_FILE: &str = "uas.version";

pub struct CacheFiles {
    dir: PathBuf,
}

impl CacheFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn data_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE)
    }

    pub fn version_path(&self) -> PathBuf {
        self.dir.join(VERSION_FILE)
    }

    /// Read the cached rule file, if any.
    pub fn read_data(&self) -> Result<Vec<u8>> {
        fs::read(self.data_path()).map_err(|e| {
            UaDetectorError::io_operation(format!(
                "reading cached rule file {} failed: {}",
                self.data_path().display(),
                e
            ))
        })
    }

    /// Read the cached version sentinel, if any.
    pub fn read_version(&self) -> Result<String> {
        let raw = fs::read_to_string(self.version_path())?;
        Ok(raw.lines().next().unwrap_or("").trim().to_string())
    }

    /// Persist a fetched rule file and its version, atomically.
    pub fn write(&self, bytes: &[u8], version: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            UaDetectorError::io_operation(format!(
                "creating cache directory {} failed: {}",
                self.dir.display(),
                e
            ))
        })?;

        write_atomic(&self.data_path(), bytes)?;
        write_atomic(&self.version_path(), version.as_bytes())?;

        debug!(
            "rule file cache updated: {} ({} bytes, version {})",
            self.data_path().display(),
            bytes.len(),
            version
        );
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, bytes).map_err(|e| {
        UaDetectorError::io_operation(format!("writing {} failed: {}", tmp.display(), e))
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        UaDetectorError::io_operation(format!(
            "renaming {} to {} failed: {}",
            tmp.display(),
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheFiles::new(dir.path());

        cache.write(b"{\"version\":\"1\"}", "1").unwrap();
        assert_eq!(cache.read_data().unwrap(), b"{\"version\":\"1\"}");
        assert_eq!(cache.read_version().unwrap(), "1");

        // no leftover temp files
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".tmp")), "{:?}", names);
    }

    #[test]
    fn test_missing_cache_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheFiles::new(dir.path().join("nope"));
        let err = cache.read_data().unwrap_err();
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_version_reads_first_line_only() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheFiles::new(dir.path());
        cache.write(b"{}", "20260801-01\ntrailing garbage").unwrap();
        assert_eq!(cache.read_version().unwrap(), "20260801-01");
    }
}
