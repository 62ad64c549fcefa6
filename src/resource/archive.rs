//! Single-entry lookup inside ZIP archives.

use std::fs::File;
use std::io::{self, BufRead, Cursor, Read};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use super::ResourceError;

/// A stream over one decompressed archive entry.
///
/// The entry keeps the archive it came from open for as long as it lives, so
/// the handle is only released once the stream is dropped.
#[derive(Debug)]
pub struct ArchiveEntry {
    name: String,
    data: Cursor<Vec<u8>>,
    archive: ZipArchive<File>,
}

impl ArchiveEntry {
    /// Path of the entry inside the archive.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decompressed size of the entry in bytes.
    pub fn size(&self) -> u64 {
        self.data.get_ref().len() as u64
    }

    /// Releases the stream and hands back the archive it was read from.
    pub fn into_archive(self) -> ZipArchive<File> {
        self.archive
    }
}

impl Read for ArchiveEntry {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl BufRead for ArchiveEntry {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.data.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.data.consume(amt)
    }
}

pub(super) fn open_archive(path: &Path) -> Result<ZipArchive<File>, ResourceError> {
    let archive_error = |source| ResourceError::Archive {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| archive_error(ZipError::Io(e)))?;
    ZipArchive::new(file).map_err(archive_error)
}

/// Looks up `entry` by exact name and inflates it.
///
/// Returns `Ok(None)` when the archive has no such entry.
pub(super) fn read_entry(
    mut archive: ZipArchive<File>,
    path: &Path,
    entry: &str,
) -> Result<Option<ArchiveEntry>, ResourceError> {
    let data = match archive.by_name(entry) {
        Ok(mut file) => {
            let mut data = Vec::new();
            file.read_to_end(&mut data).map_err(|source| ResourceError::Entry {
                archive: path.display().to_string(),
                entry: entry.to_string(),
                source,
            })?;
            data
        }
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(source) => {
            return Err(ResourceError::Archive {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    Ok(Some(ArchiveEntry {
        name: entry.to_string(),
        data: Cursor::new(data),
        archive,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn write_archive(dir: &TempDir, entries: &[(&str, &str)]) -> std::path::PathBuf {
        let path = dir.path().join("bundle.zip");
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, contents) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_read_entry_inflates_exact_match() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(&dir, &[("a.txt", "alpha"), ("nested/b.txt", "beta\nline")]);

        let archive = open_archive(&path).unwrap();
        let mut entry = read_entry(archive, &path, "nested/b.txt").unwrap().unwrap();

        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        assert_eq!(text, "beta\nline");
        assert_eq!(entry.name(), "nested/b.txt");
        assert_eq!(entry.size(), 9);
    }

    #[test]
    fn test_read_entry_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(&dir, &[("a.txt", "alpha")]);

        let archive = open_archive(&path).unwrap();
        assert!(read_entry(archive, &path, "b.txt").unwrap().is_none());

        let archive = open_archive(&path).unwrap();
        assert!(read_entry(archive, &path, "A.TXT").unwrap().is_none());
    }

    #[test]
    fn test_entry_hands_back_archive() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(&dir, &[("a.txt", "alpha"), ("b.txt", "beta")]);

        let archive = open_archive(&path).unwrap();
        let entry = read_entry(archive, &path, "a.txt").unwrap().unwrap();
        let archive = entry.into_archive();

        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_open_archive_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.zip");
        std::fs::write(&path, b"this is not a zip file").unwrap();

        let result = open_archive(&path);

        assert!(matches!(result, Err(ResourceError::Archive { .. })));
    }
}
