//! Host environment capability contract
//!
//! The host application supplies three values the resolver consumes: the
//! ordered list of supported ABI identifiers, the path of the read-only
//! package archive, and a writable process-private scratch directory for
//! temporary extractions. [`HostEnv`] captures that contract; [`StaticHost`]
//! is a plain-value implementation for callers that already hold all three.

use std::path::{Path, PathBuf};

/// Capabilities provided by the host environment.
pub trait HostEnv {
    /// The supported ABI identifiers, in priority order.
    ///
    /// The order is authoritative: the resolver probes candidates
    /// first-match-wins and never re-sorts or scores them.
    fn supported_abis(&self) -> &[String];

    /// The absolute path of the read-only package archive.
    fn archive_path(&self) -> &Path;

    /// A writable, process-private directory for temporary files.
    fn scratch_dir(&self) -> &Path;
}

/// A [`HostEnv`] built from plain values.
#[derive(Clone, Debug)]
pub struct StaticHost {
    abis: Vec<String>,
    archive: PathBuf,
    scratch: PathBuf,
}

impl StaticHost {
    /// Creates a host environment from an ABI priority list, an archive path
    /// and a scratch directory.
    pub fn new(
        abis: impl IntoIterator<Item = impl Into<String>>,
        archive: impl Into<PathBuf>,
        scratch: impl Into<PathBuf>,
    ) -> Self {
        Self {
            abis: abis.into_iter().map(Into::into).collect(),
            archive: archive.into(),
            scratch: scratch.into(),
        }
    }
}

impl HostEnv for StaticHost {
    fn supported_abis(&self) -> &[String] {
        &self.abis
    }

    fn archive_path(&self) -> &Path {
        &self.archive
    }

    fn scratch_dir(&self) -> &Path {
        &self.scratch
    }
}
