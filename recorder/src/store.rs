use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use auton_format::SlotId;
use auton_format::codec::SampleReader;
use tracing::{debug, warn};

use crate::{Error, Result};

const TMP_SUFFIX: &str = ".part";

/// Maps slots to files under a storage root.
///
/// Writes always replace the whole file and go through a temporary file, so a
/// failed save never leaves a half-written log behind.
#[derive(Debug, Clone)]
pub struct SlotStore {
    root: PathBuf,
}

impl SlotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the storage root if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root)?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, slot: SlotId) -> Option<PathBuf> {
        slot.file_name().map(|name| self.root.join(name))
    }

    fn require_path(&self, slot: SlotId) -> Result<PathBuf> {
        self.path(slot).ok_or(Error::NoBackingFile(slot))
    }

    pub fn exists(&self, slot: SlotId) -> bool {
        self.path(slot).is_some_and(|path| path.is_file())
    }

    /// Opens the slot for reading. An absent file is [`Error::NotFound`].
    pub fn open_read(&self, slot: SlotId) -> Result<File> {
        let path = self.require_path(slot)?;
        match File::open(&path) {
            Ok(file) => Ok(file),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(Error::NotFound(slot)),
            Err(err) => Err(err.into()),
        }
    }

    pub fn read(&self, slot: SlotId) -> Result<Vec<u8>> {
        let mut file = self.open_read(slot)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        debug!(%slot, len = bytes.len(), "read slot file");
        Ok(bytes)
    }

    /// Opens the slot as a sample-by-sample stream.
    pub fn stream(&self, slot: SlotId) -> Result<SampleReader<BufReader<File>>> {
        self.open_read(slot)
            .map(|file| SampleReader::new(BufReader::new(file)))
    }

    /// Replaces the slot's contents with `bytes`.
    pub fn replace(&self, slot: SlotId, bytes: &[u8]) -> Result<()> {
        let path = self.require_path(slot)?;
        let tmp = tmp_path(&path);
        let write = || -> io::Result<()> {
            fs::create_dir_all(&self.root)?;
            let mut file = File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        };
        write().map_err(|source| {
            if let Err(err) = fs::remove_file(&tmp) {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!(path = %tmp.display(), "failed to remove temporary file: {err}");
                }
            }
            Error::WriteFailure { slot, source }
        })?;
        debug!(%slot, path = %path.display(), len = bytes.len(), "wrote slot file");
        Ok(())
    }

    /// Deletes the slot's file. Returns false if there was nothing to delete.
    pub fn delete(&self, slot: SlotId) -> Result<bool> {
        let path = self.require_path(slot)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(TMP_SUFFIX);
    PathBuf::from(name)
}
