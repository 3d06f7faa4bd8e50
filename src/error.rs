use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::Display;

/// The boxed underlying cause carried by [`Error`] variants.
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Error types used throughout the `bundle_loader` library.
///
/// These errors represent the failure conditions that can occur while
/// resolving a native library: opening the package archive, extracting an
/// entry to a temporary file, and asking the platform loader to load it.
///
/// A missing archive entry for an ABI candidate is *not* an error; absent
/// candidates are skipped silently during resolution.
#[derive(Debug)]
pub enum Error {
    /// The package archive could not be opened.
    ///
    /// This is fatal for the whole resolution: without a readable archive no
    /// fallback is possible, so no ABI candidate is ever probed.
    ArchiveUnreadable {
        /// A descriptive message about the open failure.
        msg: Cow<'static, str>,
        /// The underlying open error.
        source: Cause,
    },

    /// An I/O error occurred while copying an archive entry to a temporary
    /// file.
    ///
    /// Recorded per candidate; resolution continues with the next ABI.
    Extraction {
        /// A descriptive message about the extraction failure.
        msg: Cow<'static, str>,
        /// The underlying I/O error.
        source: Cause,
    },

    /// The platform dynamic loader rejected a library, either by name via
    /// search-path resolution or by filesystem path after extraction.
    Load {
        /// A descriptive message about the load failure.
        msg: Cow<'static, str>,
        /// The underlying loader error.
        source: Cause,
    },

    /// Every ABI candidate was either absent from the archive or failed to
    /// load.
    ///
    /// Wraps the most recently recorded cause: the last archive-stage failure
    /// when one exists, otherwise the original search-path load failure.
    Exhausted {
        /// A descriptive message about the exhausted resolution.
        msg: Cow<'static, str>,
        /// The most recent recorded cause.
        source: Cause,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ArchiveUnreadable { msg, .. } => write!(f, "archive unreadable: {msg}"),
            Error::Extraction { msg, .. } => write!(f, "extraction error: {msg}"),
            Error::Load { msg, .. } => write!(f, "load error: {msg}"),
            Error::Exhausted { msg, .. } => write!(f, "resolution exhausted: {msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::ArchiveUnreadable { source, .. }
            | Error::Extraction { source, .. }
            | Error::Load { source, .. }
            | Error::Exhausted { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Creates an [`Error::ArchiveUnreadable`] with the specified message and
/// underlying cause.
#[cold]
#[inline(never)]
pub(crate) fn archive_error(
    msg: impl Into<Cow<'static, str>>,
    source: impl Into<Cause>,
) -> Error {
    Error::ArchiveUnreadable {
        msg: msg.into(),
        source: source.into(),
    }
}

/// Creates an [`Error::Extraction`] with the specified message and underlying
/// cause.
#[cold]
#[inline(never)]
pub(crate) fn extraction_error(
    msg: impl Into<Cow<'static, str>>,
    source: impl Into<Cause>,
) -> Error {
    Error::Extraction {
        msg: msg.into(),
        source: source.into(),
    }
}

/// Creates an [`Error::Load`] with the specified message and underlying
/// cause.
#[cold]
#[inline(never)]
pub(crate) fn load_error(msg: impl Into<Cow<'static, str>>, source: impl Into<Cause>) -> Error {
    Error::Load {
        msg: msg.into(),
        source: source.into(),
    }
}

/// Creates an [`Error::Exhausted`] wrapping the most recent recorded cause.
#[cold]
#[inline(never)]
pub(crate) fn exhausted_error(
    msg: impl Into<Cow<'static, str>>,
    source: impl Into<Cause>,
) -> Error {
    Error::Exhausted {
        msg: msg.into(),
        source: source.into(),
    }
}
