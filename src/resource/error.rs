use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResourceError {
    #[error("failed to open resource '{name}': {source}")]
    Open {
        name: String,
        source: std::io::Error,
    },

    #[error("failed to translate resource '{name}' to a file path: {source}")]
    Locate {
        name: String,
        source: std::io::Error,
    },

    #[error("resource '{name}' is packaged and has no direct file path")]
    Packaged { name: String },

    #[error("failed to open archive '{path}': {source}")]
    Archive {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("failed to read entry '{entry}' from archive '{archive}': {source}")]
    Entry {
        archive: String,
        entry: String,
        source: std::io::Error,
    },
}
