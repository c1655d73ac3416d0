use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::store::{Change, KeyValueStore};

/// Store persisted as a flat YAML map.
///
/// Every mutation rewrites the whole file: write `<path>.tmp`, restrict it to
/// 0600 on unix, rename over `<path>`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Load `path`, or start empty when it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_yaml::from_str(&content)
                .with_context(|| format!("invalid store file '{}'", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("store file '{}' not found, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read store '{}'", path.display()))
            }
        };
        info!("store opened at '{}' ({} entries)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create '{}'", parent.display()))?;
        }

        let content = serde_yaml::to_string(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content).with_context(|| format!("failed to write '{}'", tmp.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to move store into '{}'", self.path.display()))?;
        debug!("store written to '{}'", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.entries.insert(key.to_owned(), value.to_owned());
        self.persist().inspect_err(|_| match previous {
            Some(previous) => {
                self.entries.insert(key.to_owned(), previous);
            }
            None => {
                self.entries.remove(key);
            }
        })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if let Some(previous) = self.entries.remove(key) {
            self.persist().inspect_err(|_| {
                self.entries.insert(key.to_owned(), previous);
            })?;
        }
        Ok(())
    }

    /// All changes land in a single file write; on failure none of them stay.
    fn apply(&mut self, changes: &[Change]) -> Result<()> {
        let snapshot = self.entries.clone();
        for change in changes {
            match change {
                Change::Set { key, value } => {
                    self.entries.insert(key.clone(), value.clone());
                }
                Change::Remove { key } => {
                    self.entries.remove(key);
                }
            }
        }
        if self.entries == snapshot {
            return Ok(());
        }
        if let Err(e) = self.persist() {
            self.entries = snapshot;
            return Err(e);
        }
        Ok(())
    }
}
