use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Display, Debug, Clone, PartialEq, Eq)]
pub enum MvError {
    /// A named entry is absent from an archive.
    #[display("entry not found in archive: {_0}")]
    EntryNotFound(String),
    /// An embedded descriptor could not be decoded, even after lenient recovery.
    #[display("malformed descriptor: {_0}")]
    MalformedDocument(String),
    /// The descriptor decoded but lacks a mandatory section or field.
    #[display("missing mandatory section: {_0}")]
    MissingSection(String),
    /// Every attempted loader format failed; the archive carries no usable mod metadata.
    #[display("no usable mod metadata in {_0}")]
    UnusableArchive(String),
    #[display("file or directory not found: {_0}")]
    FileOrDirectoryNotFound(String),
    #[display("io error: {_0}")]
    IOError(String),
    /// Copy/rename/delete requested on a jar that only exists inside another jar.
    #[display("operation not allowed on nested mod: {_0}")]
    NestedMod(String),
    #[display("unexpected: {_0:?}")]
    Unexpected(Option<String>),
}

impl std::error::Error for MvError {}

impl From<std::io::Error> for MvError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => MvError::FileOrDirectoryNotFound(e.to_string()),
            _ => MvError::IOError(e.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for MvError {
    fn from(e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::FileNotFound => MvError::EntryNotFound(e.to_string()),
            zip::result::ZipError::Io(io) => MvError::IOError(io.to_string()),
            other => MvError::MalformedDocument(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for MvError {
    fn from(e: serde_json::Error) -> Self {
        MvError::MalformedDocument(e.to_string())
    }
}

impl From<toml::de::Error> for MvError {
    fn from(e: toml::de::Error) -> Self {
        MvError::MalformedDocument(e.to_string())
    }
}
