use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;

use super::{CacheError, PersistentCache};

/// Directory-backed cache, one `<key>.json` file per key.
///
/// Writers take an exclusive lock on `<key>.lock`, write a temp file and
/// rename it over the target, so readers only ever see a complete entry.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the entry for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

#[async_trait]
impl PersistentCache for FileCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key);
        tokio::task::spawn_blocking(move || read_entry(&path))
            .await
            .map_err(|e| CacheError::Task(e.to_string()))?
    }

    async fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError> {
        let dir = self.dir.clone();
        let path = self.path_for(key);
        tokio::task::spawn_blocking(move || write_entry(&dir, &path, &bytes))
            .await
            .map_err(|e| CacheError::Task(e.to_string()))?
    }
}

/// Keys may contain anything; file names may not.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CacheError + '_ {
    move |source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn read_entry(path: &Path) -> Result<Option<Vec<u8>>, CacheError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(path)(e)),
    }
}

fn write_entry(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    fs::create_dir_all(dir).map_err(io_error(dir))?;

    let lock_path = path.with_extension("lock");
    let lock = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(io_error(&lock_path))?;
    lock.lock_exclusive().map_err(io_error(&lock_path))?;

    let tmp_path = path.with_extension("json.tmp");
    let result = (|| {
        let mut tmp = File::create(&tmp_path).map_err(io_error(&tmp_path))?;
        tmp.write_all(bytes).map_err(io_error(&tmp_path))?;
        tmp.sync_all().map_err(io_error(&tmp_path))?;
        fs::rename(&tmp_path, path).map_err(io_error(path))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    let _ = FileExt::unlock(&lock);
    result
}
