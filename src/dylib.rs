//! Dynamic-loader primitives
//!
//! This module abstracts the two operations the resolver needs from the
//! platform dynamic loader: loading a library through standard search-path
//! resolution, and loading one from an explicit filesystem path. The
//! [`SystemLoader`] implementation is backed by `libloading`; tests inject
//! scripted implementations through the [`DylibLoader`] trait.

use crate::{Result, error::load_error};
use std::path::Path;

/// A trait for the platform dynamic-loader operations used during
/// resolution.
///
/// Both operations take platform-mapped file names (`libfoo.so`, `foo.dll`);
/// the logical-to-platform mapping is done by the resolver beforehand.
pub trait DylibLoader {
    /// Loads a library by its mapped file name using the loader's standard
    /// search paths.
    fn load_by_name(&self, mapped_name: &str) -> Result<()>;

    /// Loads a library from an explicit filesystem path.
    fn load_by_path(&self, path: &Path) -> Result<()>;
}

/// The platform dynamic loader.
///
/// A successful load is never unloaded by this crate: the library handle is
/// intentionally leaked so the binding stays in the process-wide symbol
/// table, matching `dlopen` semantics callers expect from a loader of
/// long-lived native libraries.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemLoader;

impl SystemLoader {
    fn load(&self, what: impl AsRef<std::ffi::OsStr>, desc: &str) -> Result<()> {
        // Safety: the loaded library's initialization routines run here; the
        // caller contract of this crate is that bundled libraries are trusted
        // code shipped with the application.
        match unsafe { libloading::Library::new(what.as_ref()) } {
            Ok(library) => {
                // Keep the binding for the lifetime of the process.
                std::mem::forget(library);
                Ok(())
            }
            Err(err) => Err(load_error(format!("failed to load {desc}"), err)),
        }
    }
}

impl DylibLoader for SystemLoader {
    fn load_by_name(&self, mapped_name: &str) -> Result<()> {
        self.load(mapped_name, mapped_name)
    }

    fn load_by_path(&self, path: &Path) -> Result<()> {
        self.load(path, &path.display().to_string())
    }
}
