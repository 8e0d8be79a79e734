use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::CacheError;
use crate::fs::atomic_write;
use crate::warn;

/// Translations stored as `<fingerprint>.txt` files in one directory.
///
/// Every failure is non-fatal: a failed read is a miss, and a failed write
/// is reported to the caller, who only logs it.
pub struct ResultCache {
    dir: PathBuf,
}

impl ResultCache {
    /// Opens the cache rooted at `dir`, creating the directory if needed.
    ///
    /// Creation is best-effort; when it fails a warning is logged and the
    /// individual lookups and stores fail on their own.
    pub fn open(dir: PathBuf) -> Self {
        if let Err(source) = fs::create_dir_all(&dir) {
            warn!("{}", CacheError::DirCreate { path: dir.clone(), source });
        }
        Self { dir }
    }

    pub fn entry_path(&self, fingerprint: &str) -> PathBuf {
        self.dir.join(format!("{fingerprint}.txt"))
    }

    /// Returns the stored translation for `fingerprint`, if readable.
    pub fn lookup(&self, fingerprint: &str) -> Option<String> {
        let path = self.entry_path(fingerprint);

        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => {
                warn!("{}", CacheError::Read { path, source });
                None
            }
        }
    }

    /// Stores `text` for `fingerprint`, replacing any previous entry.
    pub fn store(&self, fingerprint: &str, text: &str) -> Result<(), CacheError> {
        let path = self.entry_path(fingerprint);
        atomic_write(&path, text).map_err(|source| CacheError::Write { path, source })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fingerprint::fingerprint;
    use tempfile::TempDir;

    fn create_test_cache(temp_dir: &TempDir) -> ResultCache {
        ResultCache::open(temp_dir.path().join("clijp"))
    }

    #[test]
    fn test_open_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("clijp");
        let _cache = create_test_cache(&temp_dir);
        assert!(dir.is_dir());

        // idempotent
        let again = ResultCache::open(dir.clone());
        assert!(dir.is_dir());
        assert!(again.lookup("missing").is_none());
    }

    #[test]
    fn test_cache_miss() {
        let temp_dir = TempDir::new().unwrap();
        let cache = create_test_cache(&temp_dir);

        assert!(cache.lookup(&fingerprint("Hello\n")).is_none());
    }

    #[test]
    fn test_cache_hit() {
        let temp_dir = TempDir::new().unwrap();
        let cache = create_test_cache(&temp_dir);
        let key = fingerprint("Hello, World!\n");

        cache.store(&key, "こんにちは、世界！\n").unwrap();

        assert_eq!(cache.lookup(&key), Some("こんにちは、世界！\n".to_string()));
    }

    #[test]
    fn test_entry_layout() {
        let temp_dir = TempDir::new().unwrap();
        let cache = create_test_cache(&temp_dir);
        let key = fingerprint("Hello\n");

        cache.store(&key, "こんにちは").unwrap();

        let path = temp_dir.path().join("clijp").join(format!("{key}.txt"));
        assert_eq!(cache.entry_path(&key), path);
        assert_eq!(fs::read_to_string(path).unwrap(), "こんにちは");
    }

    #[test]
    fn test_store_overwrites_entry() {
        let temp_dir = TempDir::new().unwrap();
        let cache = create_test_cache(&temp_dir);
        let key = fingerprint("Hello");

        cache.store(&key, "old").unwrap();
        cache.store(&key, "new").unwrap();

        assert_eq!(cache.lookup(&key), Some("new".to_string()));
    }

    #[test]
    fn test_corrupted_entry_is_a_miss() {
        let temp_dir = TempDir::new().unwrap();
        let cache = create_test_cache(&temp_dir);
        let key = fingerprint("Hello");

        fs::write(cache.entry_path(&key), [0xff, 0xfe, 0x00]).unwrap();

        assert!(cache.lookup(&key).is_none());
    }

    #[test]
    fn test_unusable_directory_fails_gracefully() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the cache directory should be.
        let blocked = temp_dir.path().join("clijp");
        fs::write(&blocked, "not a directory").unwrap();

        let cache = ResultCache::open(blocked);
        let key = fingerprint("Hello");

        assert!(cache.lookup(&key).is_none());
        let err = cache.store(&key, "こんにちは").unwrap_err();
        assert!(matches!(err, CacheError::Write { .. }));
    }
}
