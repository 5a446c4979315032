use crate::models::error::MvError;
use camino::Utf8Path;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Random-access view over one mod package (a zip-format archive).
///
/// The whole archive is held in memory: nested jar-in-jar mods only ever
/// exist as bytes inside their enclosing entry, so both the on-disk and the
/// in-memory case go through the same buffer. The handle is a plain value;
/// dropping it releases everything, on error paths included.
pub struct ModArchive {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl ModArchive {
    pub fn open(path: &Utf8Path) -> Result<Self, MvError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, MvError> {
        let archive = ZipArchive::new(Cursor::new(bytes))?;
        Ok(Self { archive })
    }

    /// Entry names in archive order.
    pub fn entry_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    pub fn has_entry(&self, name: &str) -> bool {
        self.archive.file_names().any(|n| n == name)
    }

    /// Reads a single entry whole. Fails with `EntryNotFound` when absent.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, MvError> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(MvError::EntryNotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf)?;
        Ok(buf)
    }
}
