//! Directory-backed storage so persistence scenarios exercise real I/O.
use sparkle_game::StudioStorage;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One `<key>.json` file per storage key under `root`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// A fresh directory under the system temp dir.
    pub fn temporary(label: &str) -> io::Result<Self> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%f");
        Self::new(std::env::temp_dir().join(format!("sparkle-tester-{label}-{stamp}")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn remove_all(&self) -> io::Result<()> {
        match fs::remove_dir_all(&self.root) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StudioStorage for FileStorage {
    type Error = io::Error;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        fs::write(self.path(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        match fs::remove_file(self.path(key)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_round_trip_and_removal_is_idempotent() {
        let storage = FileStorage::temporary("unit").expect("temp dir");
        assert_eq!(storage.read("sparkle.state").unwrap(), None);
        storage.write("sparkle.state", "{\"points\":3}").unwrap();
        assert!(storage.root().join("sparkle.state.json").exists());
        assert_eq!(
            storage.read("sparkle.state").unwrap().as_deref(),
            Some("{\"points\":3}")
        );
        storage.remove("sparkle.state").unwrap();
        storage.remove("sparkle.state").unwrap();
        assert_eq!(storage.read("sparkle.state").unwrap(), None);
        storage.remove_all().unwrap();
        assert!(!storage.root().exists());
    }
}
