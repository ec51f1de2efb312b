use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::LikeStoreError;

/// The user's liked quote ids, written back to disk after every toggle.
///
/// On disk the set is a JSON array of id strings, sorted.
#[derive(Debug, Clone, Default)]
pub struct LikeStore {
    ids: BTreeSet<String>,
    path: Option<PathBuf>,
    last_error: Option<String>,
}

impl LikeStore {
    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store at `path`. A missing, unreadable or corrupt file yields an empty set.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = match read_ids(&path) {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable like store");
                BTreeSet::new()
            }
        };
        tracing::debug!(path = %path.display(), liked = ids.len(), "like store opened");
        Self { ids, path: Some(path), last_error: None }
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flips membership of `id`, persists, and returns whether it is now liked.
    pub fn toggle(&mut self, id: &str) -> bool {
        let liked = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };
        self.persist();
        liked
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Message from the most recent failed write, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn persist(&mut self) {
        let Some(path) = &self.path else { return };
        match write_ids(path, &self.ids) {
            Ok(()) => self.last_error = None,
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "failed to persist likes");
                self.last_error = Some(err.to_string());
            }
        }
    }
}

fn read_ids(path: &Path) -> Result<BTreeSet<String>, LikeStoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(source) => return Err(LikeStoreError::Io { path: path.to_path_buf(), source }),
    };
    let ids: Vec<String> = serde_json::from_reader(BufReader::new(file))?;
    Ok(ids.into_iter().collect())
}

fn write_ids(path: &Path, ids: &BTreeSet<String>) -> Result<(), LikeStoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LikeStoreError::Io { path: parent.to_path_buf(), source })?;
    }
    // Write beside the target and rename so a failed write never replaces the previous file.
    let tmp = path.with_extension("json.tmp");
    let result = write_tmp(&tmp, ids)
        .and_then(|()| fs::rename(&tmp, path).map_err(|source| LikeStoreError::Io { path: path.to_path_buf(), source }));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_tmp(tmp: &Path, ids: &BTreeSet<String>) -> Result<(), LikeStoreError> {
    let file = File::create(tmp).map_err(|source| LikeStoreError::Io { path: tmp.to_path_buf(), source })?;
    let mut writer = BufWriter::new(file);
    encode_ids(&mut writer, ids, tmp)?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|source| LikeStoreError::Io { path: tmp.to_path_buf(), source })
}

/// Serializes and flushes, so a short write surfaces here instead of on drop.
fn encode_ids<W: Write>(writer: &mut W, ids: &BTreeSet<String>, path: &Path) -> Result<(), LikeStoreError> {
    serde_json::to_writer(&mut *writer, ids)?;
    writer.flush().map_err(|source| LikeStoreError::Io { path: path.to_path_buf(), source })
}
