//! Lookup backends for logical resource names.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Where a logical name resolved to.
#[derive(Debug, Clone)]
pub enum Location {
    /// A loose file on the host filesystem.
    File(PathBuf),
    /// Bytes packaged into the application; there is no file path behind them.
    Bytes(Arc<[u8]>),
}

/// A backend that maps logical names to locations.
///
/// Returning `None` means "not here", which lets the resolver fall through to
/// the next registered source.
pub trait ResourceSource: Send + Sync + std::fmt::Debug {
    fn locate(&self, name: &str) -> Option<Location>;
}

/// Resolves names against a root directory.
///
/// `"Test File 1"` maps to `<root>/Test File 1` and `"folder/Test File 3"`
/// maps to `<root>/folder/Test File 3`. Only regular files are found.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSource for DirectorySource {
    fn locate(&self, name: &str) -> Option<Location> {
        if !is_relative_name(name) {
            return None;
        }

        let path = self.root.join(name);
        path.is_file().then_some(Location::File(path))
    }
}

/// Names must stay below the root: no empty names, no absolute paths, no `..`.
fn is_relative_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// An in-memory bundle of named resources.
///
/// ```
/// use stowage::resource::EmbeddedSource;
///
/// let bundle = EmbeddedSource::new()
///     .with_entry("banner.txt", &b"hello"[..])
///     .with_entry("folder/notes.txt", b"nested".to_vec());
/// assert_eq!(bundle.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct EmbeddedSource {
    entries: HashMap<String, Arc<[u8]>>,
}

impl EmbeddedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bytes` under `name`, replacing any earlier entry.
    pub fn with_entry(mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.entries.insert(name.into(), bytes.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceSource for EmbeddedSource {
    fn locate(&self, name: &str) -> Option<Location> {
        self.entries
            .get(name)
            .map(|bytes| Location::Bytes(Arc::clone(bytes)))
    }
}
