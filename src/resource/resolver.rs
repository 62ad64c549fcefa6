use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use zip::ZipArchive;

use super::archive::{self, ArchiveEntry};
use super::source::{DirectorySource, EmbeddedSource, Location, ResourceSource};
use super::ResourceError;

/// An open, unread stream over a resolved resource.
#[derive(Debug)]
pub struct ResourceStream {
    inner: StreamInner,
}

#[derive(Debug)]
enum StreamInner {
    File(File),
    Bytes(Cursor<Arc<[u8]>>),
}

impl Read for ResourceStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            StreamInner::File(file) => file.read(buf),
            StreamInner::Bytes(cursor) => cursor.read(buf),
        }
    }
}

/// Maps logical resource names to streams, file paths, and archive entries.
///
/// Sources are searched in registration order and the first one that knows a
/// name wins. A name that no source knows is "not found", which every
/// operation reports as `None` (or `""` for [`read_all_text`]) without
/// logging. Failures that happen after a resource was found are logged and
/// collapse to the same result.
///
/// [`read_all_text`]: ResourceResolver::read_all_text
///
/// ## Example
///
/// ```no_run
/// use std::io::BufRead;
/// use stowage::ResourceResolver;
///
/// let resolver = ResourceResolver::new("resources");
///
/// let banner = resolver.read_all_text("banner.txt");
/// let mut first_line = String::new();
/// if let Some(mut entry) = resolver.open_archive_entry("archive.zip", "folder/notes.txt") {
///     entry.read_line(&mut first_line)?;
/// }
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ResourceResolver {
    sources: Vec<Box<dyn ResourceSource>>,
}

impl ResourceResolver {
    /// Creates a resolver rooted at a single directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::builder().with_directory(root).build()
    }

    pub fn builder() -> ResourceResolverBuilder {
        ResourceResolverBuilder::default()
    }

    fn locate(&self, name: &str) -> Option<Location> {
        let location = self.sources.iter().find_map(|source| source.locate(name));
        if location.is_none() {
            log::trace!("resource '{}' not found", name);
        }
        location
    }

    /// Opens `name` for reading, or returns `None` if it can't be found or opened.
    pub fn open_stream(&self, name: &str) -> Option<ResourceStream> {
        self.try_open_stream(name).unwrap_or_else(|err| {
            log::error!("{}", err);
            None
        })
    }

    /// Like [`open_stream`](Self::open_stream), but reports why a found
    /// resource could not be opened.
    pub fn try_open_stream(&self, name: &str) -> Result<Option<ResourceStream>, ResourceError> {
        let inner = match self.locate(name) {
            None => return Ok(None),
            Some(Location::File(path)) => {
                let file = File::open(&path).map_err(|source| ResourceError::Open {
                    name: name.to_string(),
                    source,
                })?;
                StreamInner::File(file)
            }
            Some(Location::Bytes(bytes)) => StreamInner::Bytes(Cursor::new(bytes)),
        };

        Ok(Some(ResourceStream { inner }))
    }

    /// Opens `name` wrapped in a line-oriented reader.
    pub fn open_reader(&self, name: &str) -> Option<BufReader<ResourceStream>> {
        self.open_stream(name).map(BufReader::new)
    }

    /// Returns the absolute filesystem path of `name`.
    ///
    /// Packaged resources have no such path; asking for one is logged as a
    /// warning and yields `None`.
    pub fn locate_file(&self, name: &str) -> Option<PathBuf> {
        self.try_locate_file(name).unwrap_or_else(|err| {
            log::warn!("{}", err);
            None
        })
    }

    pub fn try_locate_file(&self, name: &str) -> Result<Option<PathBuf>, ResourceError> {
        match self.locate(name) {
            None => Ok(None),
            Some(Location::File(path)) => path
                .canonicalize()
                .map(Some)
                .map_err(|source| ResourceError::Locate {
                    name: name.to_string(),
                    source,
                }),
            Some(Location::Bytes(_)) => Err(ResourceError::Packaged {
                name: name.to_string(),
            }),
        }
    }

    /// Opens the archive resource `name` for random access.
    pub fn open_archive(&self, name: &str) -> Option<ZipArchive<File>> {
        let opened = self
            .try_locate_file(name)
            .and_then(|path| path.map(|path| archive::open_archive(&path)).transpose());

        opened.unwrap_or_else(|err| {
            log::error!("{}", err);
            None
        })
    }

    /// Opens the entry `entry` inside the archive resource `archive`.
    ///
    /// The archive has to be a locatable file; if it isn't, this returns
    /// `None` without opening anything. Entry names match exactly.
    pub fn open_archive_entry(&self, archive: &str, entry: &str) -> Option<ArchiveEntry> {
        self.try_open_archive_entry(archive, entry).unwrap_or_else(|err| {
            log::error!("{}", err);
            None
        })
    }

    pub fn try_open_archive_entry(
        &self,
        archive: &str,
        entry: &str,
    ) -> Result<Option<ArchiveEntry>, ResourceError> {
        let Some(path) = self.try_locate_file(archive)? else {
            log::trace!("archive '{}' is not a locatable file", archive);
            return Ok(None);
        };
        let zip = archive::open_archive(&path)?;
        archive::read_entry(zip, &path, entry)
    }

    /// Reads every line of `name` and joins them with no separator.
    ///
    /// `"one\ntwo\n"` comes back as `"onetwo"`. Returns `""` if the resource
    /// can't be opened; if reading fails part way, returns what was read.
    pub fn read_all_text(&self, name: &str) -> String {
        let mut text = String::new();
        let Some(reader) = self.open_reader(name) else {
            return text;
        };

        for line in reader.lines() {
            match line {
                Ok(line) => text.push_str(&line),
                Err(err) => {
                    log::error!("failed to read resource '{}': {}", name, err);
                    break;
                }
            }
        }
        text
    }
}

/// Builder for a [`ResourceResolver`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ResourceResolverBuilder {
    sources: Vec<Box<dyn ResourceSource>>,
}

impl ResourceResolverBuilder {
    /// Adds a directory of loose resource files.
    pub fn with_directory(self, root: impl AsRef<Path>) -> Self {
        self.with_source(DirectorySource::new(root))
    }

    /// Adds a bundle of packaged resources.
    pub fn with_embedded(self, bundle: EmbeddedSource) -> Self {
        self.with_source(bundle)
    }

    /// Adds a custom lookup backend. Earlier sources take precedence.
    pub fn with_source(mut self, source: impl ResourceSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn build(self) -> ResourceResolver {
        ResourceResolver {
            sources: self.sources,
        }
    }
}
