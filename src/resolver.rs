//! Two-tier library resolution
//!
//! The resolver first asks the platform loader to find the library through
//! its standard search paths. Only when that fails does it fall back to the
//! package archive: it walks the host-supplied ABI candidates in priority
//! order, extracts the first matching `lib/<abi>/<mapped-name>` entry to a
//! uniquely named temporary file in the scratch directory, and loads the
//! extraction by path. The temporary file is removed on every exit path,
//! success or failure, so repeated resolutions never accumulate files in the
//! scratch directory.

use crate::{
    Result,
    archive::{IntoArchive, PackageArchive},
    dylib::{DylibLoader, SystemLoader},
    error::{exhausted_error, extraction_error},
    host::HostEnv,
    platform::{Platform, map_library_name},
};
use std::io::{Read, Write};
use std::path::Path;

/// The fixed transfer-buffer size for streaming an archive entry to disk.
const COPY_BUFFER_SIZE: usize = 1024 * 32;

/// Resolves native libraries, falling back to archive extraction when the
/// platform loader's search paths come up empty.
///
/// The resolver is generic over the dynamic-loader implementation so the
/// whole procedure can run against a scripted loader in tests; production
/// callers use the [`SystemLoader`] default.
///
/// # Examples
/// ```no_run
/// use bundle_loader::Resolver;
/// use std::path::Path;
///
/// let resolver = Resolver::new();
/// resolver.resolve(
///     "wg-go",
///     Path::new("/data/app/base.apk"),
///     &["arm64-v8a", "armeabi-v7a"],
///     Path::new("/data/data/com.example/cache"),
/// )?;
/// # Ok::<_, bundle_loader::Error>(())
/// ```
pub struct Resolver<L = SystemLoader> {
    loader: L,
    platform: Platform,
}

impl Resolver<SystemLoader> {
    /// Creates a resolver backed by the platform dynamic loader.
    pub fn new() -> Self {
        Self::with_loader(SystemLoader)
    }
}

impl Default for Resolver<SystemLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: DylibLoader> Resolver<L> {
    /// Creates a resolver backed by a custom dynamic-loader implementation.
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            platform: Platform::current(),
        }
    }

    /// Overrides the platform used for library-name mapping.
    ///
    /// Defaults to [`Platform::current`]; tests use this to exercise foreign
    /// naming conventions.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Resolves `name` using the values supplied by a host environment.
    ///
    /// Equivalent to [`resolve`](Self::resolve) with the environment's
    /// archive path, ABI list and scratch directory.
    pub fn resolve_from(&self, name: &str, env: &impl HostEnv) -> Result<()> {
        self.resolve(
            name,
            env.archive_path(),
            env.supported_abis(),
            env.scratch_dir(),
        )
    }

    /// Loads the native library `name`, extracting it from the package
    /// archive if the platform loader cannot find it.
    ///
    /// The procedure runs to a terminal state with no partial success:
    /// either the library ends up loaded into the process, or an error is
    /// returned and no temporary file is left behind.
    ///
    /// # Arguments
    /// * `name` - The logical library name, e.g. `foo` for `libfoo.so`.
    /// * `archive` - The package archive, opened lazily; a direct load never
    ///   touches it.
    /// * `abis` - ABI candidates in priority order, first match wins.
    /// * `scratch` - A writable directory for the temporary extraction.
    ///
    /// # Errors
    /// * [`Error::ArchiveUnreadable`](crate::Error::ArchiveUnreadable) - The
    ///   fallback tier was needed but the archive could not be opened.
    /// * [`Error::Exhausted`](crate::Error::Exhausted) - Every candidate was
    ///   absent or failed to load; wraps the most recent recorded cause.
    pub fn resolve<A: IntoArchive>(
        &self,
        name: &str,
        archive: A,
        abis: &[impl AsRef<str>],
        scratch: &Path,
    ) -> Result<()> {
        let mapped = map_library_name(name, self.platform);
        let mut last_cause = match self.loader.load_by_name(&mapped) {
            Ok(()) => return Ok(()),
            Err(err) => {
                log::debug!("failed to load {mapped} normally, attempting archive fallback: {err}");
                err
            }
        };

        let mut archive = archive.into_archive()?;
        for abi in abis {
            let inner_path = format!("lib/{}/{}", abi.as_ref(), mapped);
            match self.try_candidate(&mut archive, &inner_path, scratch) {
                Ok(true) => return Ok(()),
                Ok(false) => continue,
                Err(err) => {
                    log::debug!("failed to load archive:/{inner_path}: {err}");
                    last_cause = err;
                }
            }
        }
        Err(exhausted_error(
            format!("no ABI candidate yielded a loadable {mapped}"),
            last_cause,
        ))
    }

    /// Attempts one ABI candidate: probe, extract, load.
    ///
    /// Returns `Ok(false)` when the entry is absent (skip), `Ok(true)` when
    /// the extraction loaded. The temporary file is deleted on every exit
    /// path by the `tempfile` guards.
    fn try_candidate(
        &self,
        archive: &mut impl PackageArchive,
        inner_path: &str,
        scratch: &Path,
    ) -> Result<bool> {
        let Some(mut entry) = archive.entry_reader(inner_path)? else {
            return Ok(false);
        };

        let mut temp = tempfile::Builder::new()
            .prefix("lib")
            .suffix(self.platform.library_suffix())
            .tempfile_in(scratch)
            .map_err(|err| extraction_error("failed to create temporary file", err))?;
        log::debug!(
            "extracting archive:/{inner_path} to {} and loading",
            temp.path().display()
        );

        copy_entry(&mut entry, &mut temp).map_err(|err| {
            extraction_error(format!("failed to extract {inner_path}"), err)
        })?;
        drop(entry);

        // Close the write handle before loading; the path guard still
        // deletes the file when it goes out of scope, whichever way the load
        // attempt ends.
        let (file, temp_path) = temp.into_parts();
        drop(file);
        self.loader.load_by_path(&temp_path)?;
        Ok(true)
    }
}

/// Streams an archive entry to the temporary file in fixed-size chunks.
fn copy_entry(entry: &mut dyn Read, out: &mut impl Write) -> std::io::Result<()> {
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    loop {
        let len = entry.read(&mut buffer)?;
        if len == 0 {
            break;
        }
        out.write_all(&buffer[..len])?;
    }
    out.flush()
}
