//! File-backed persistence store: one file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::{PersistenceError, PersistenceStore};
use crate::config::CartConfig;

/// Stores each key as a JSON file inside a directory.
///
/// Keys are mapped to file names by keeping `[A-Za-z0-9-]` and writing every
/// other byte as `_XX` (uppercase hex), so `@RocketShoes:cart` lives in
/// `_40RocketShoes_3Acart.json` and distinct keys never share a file. Writes
/// go to a temporary file that is renamed over the target, so readers never
/// observe a half-written blob.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &CartConfig) -> Self {
        Self::new(config.storage_dir.clone())
    }

    /// Returns the directory the key files live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file a key is stored in.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{byte:02X}"));
        }
    }
    stem
}

impl PersistenceStore for FilePersistence {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;

        let target = self.path_for(key);
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", file_stem(key), Uuid::new_v4()));

        if let Err(e) = fs::write(&tmp, blob).and_then(|()| fs::rename(&tmp, &target)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}
