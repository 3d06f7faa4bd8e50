//! Package archive access
//!
//! This module provides traits and implementations for probing a package
//! archive (e.g. an Android APK, which is a zip file) for bundled native
//! libraries. The archive is abstracted behind [`PackageArchive`] so the
//! resolver can be exercised against in-memory stand-ins, and archive opening
//! is deferred behind [`IntoArchive`] so a successful search-path load never
//! touches the archive at all.
//!
//! Bundled libraries live at `lib/<abi>/<mapped-name>` inside the archive,
//! always with forward slashes. This naming convention is a fixed contract
//! with the archive producer.

use crate::{Result, error::archive_error, error::extraction_error};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;

/// A trait for probing entries of an opened package archive.
///
/// `PackageArchive` abstracts the underlying archive format, providing a
/// unified interface for the resolver to look up and stream bundled
/// binaries.
pub trait PackageArchive {
    /// Looks up an entry by its in-archive path and returns a reader over
    /// its uncompressed contents.
    ///
    /// # Returns
    /// * `Ok(Some(reader))` - The entry exists; the reader streams its bytes.
    /// * `Ok(None)` - The entry does not exist. This is not an error;
    ///   resolution skips to the next ABI candidate.
    /// * `Err(error)` - The archive could not be read at this entry.
    fn entry_reader<'a>(&'a mut self, inner_path: &str) -> Result<Option<Box<dyn Read + 'a>>>;
}

/// A trait for converting various inputs into an opened [`PackageArchive`].
///
/// Opening happens only when the resolver actually needs the fallback tier,
/// and a failure to open maps to [`Error::ArchiveUnreadable`], which aborts
/// the whole resolution.
///
/// [`Error::ArchiveUnreadable`]: crate::Error::ArchiveUnreadable
pub trait IntoArchive {
    /// The archive type produced by this conversion.
    type Archive: PackageArchive;

    /// Opens the input as a package archive.
    fn into_archive(self) -> Result<Self::Archive>;
}

/// A package archive backed by a zip file on the filesystem.
///
/// This covers the common case of application distribution archives (APKs,
/// plugin bundles) that carry per-ABI native libraries.
pub struct ZipPackage {
    /// The archive path, used for identification and error reporting.
    path: PathBuf,
    /// The underlying zip reader.
    inner: ZipArchive<File>,
}

impl ZipPackage {
    /// Opens the zip archive at the given path for random-access read.
    ///
    /// # Returns
    /// * `Ok(ZipPackage)` - If the file was opened and its central directory
    ///   parsed.
    /// * `Err` - [`Error::ArchiveUnreadable`] wrapping the open failure.
    ///
    /// [`Error::ArchiveUnreadable`]: crate::Error::ArchiveUnreadable
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| archive_error(format!("failed to open {}", path.display()), err))?;
        let inner = ZipArchive::new(file)
            .map_err(|err| archive_error(format!("failed to read {}", path.display()), err))?;
        Ok(ZipPackage {
            path: path.to_path_buf(),
            inner,
        })
    }

    /// Returns the filesystem path of the archive.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PackageArchive for ZipPackage {
    fn entry_reader<'a>(&'a mut self, inner_path: &str) -> Result<Option<Box<dyn Read + 'a>>> {
        match self.inner.by_name(inner_path) {
            Ok(entry) => Ok(Some(Box::new(entry))),
            Err(ZipError::FileNotFound) => Ok(None),
            Err(err) => Err(extraction_error(
                format!("failed to read entry {inner_path}"),
                err,
            )),
        }
    }
}

impl IntoArchive for ZipPackage {
    type Archive = ZipPackage;

    fn into_archive(self) -> Result<ZipPackage> {
        Ok(self)
    }
}

impl IntoArchive for &Path {
    type Archive = ZipPackage;

    fn into_archive(self) -> Result<ZipPackage> {
        ZipPackage::open(self)
    }
}

impl IntoArchive for PathBuf {
    type Archive = ZipPackage;

    fn into_archive(self) -> Result<ZipPackage> {
        ZipPackage::open(self)
    }
}

impl IntoArchive for &str {
    type Archive = ZipPackage;

    fn into_archive(self) -> Result<ZipPackage> {
        ZipPackage::open(Path::new(self))
    }
}
