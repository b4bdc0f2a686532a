use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument};

use super::{KeyValueStore, StorageError};

/// Key-value store keeping one file per key under a directory.
///
/// Writes land in a sibling temp file first and are renamed into place, so a
/// reader only ever sees a complete snapshot.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a key to a file name.
    ///
    /// Bytes outside `[A-Za-z0-9._-]` are percent-encoded, `%` included, so
    /// distinct keys always land in distinct files.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("%{byte:02X}"));
            }
        }
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored entry");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        debug!(path = %path.display(), "Entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("@RocketShoes:cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_survive_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::new(dir.path().join("nested")).set("@RocketShoes:cart", b"[]").await.unwrap();

        let reopened = FileStore::new(dir.path().join("nested"));
        let stored = reopened.get("@RocketShoes:cart").await.unwrap();
        assert_eq!(stored, Some(b"[]".to_vec()));
    }

    #[test]
    fn test_keys_are_encoded_into_file_names() {
        let store = FileStore::new("/tmp/carts");
        assert_eq!(
            store.path_for("@RocketShoes:cart"),
            PathBuf::from("/tmp/carts/%40RocketShoes%3Acart.json")
        );
    }

    #[test]
    fn test_similar_keys_get_distinct_files() {
        let store = FileStore::new("/tmp/carts");
        assert_ne!(store.path_for("a:b"), store.path_for("a_b"));
        assert_ne!(store.path_for("a%3Ab"), store.path_for("a:b"));
    }

    #[tokio::test]
    async fn test_similar_keys_do_not_overwrite_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("a:b", b"[1]").await.unwrap();
        store.set("a_b", b"[2]").await.unwrap();

        assert_eq!(store.get("a:b").await.unwrap(), Some(b"[1]".to_vec()));
        assert_eq!(store.get("a_b").await.unwrap(), Some(b"[2]".to_vec()));
    }
}
