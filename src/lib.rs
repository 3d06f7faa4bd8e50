//! # bundle_loader
//! A small, dependency-injected library for loading native shared libraries
//! that ship inside an application's package archive (e.g. an Android APK).
//! ## Usage
//! Resolution is two-tiered: the platform dynamic loader is asked first via
//! its standard search paths, and only on failure is the package archive
//! scanned across the host's ABI candidates for an entry at
//! `lib/<abi>/<mapped-name>`, which is extracted to a temporary file, loaded
//! by path, and always deleted afterwards.
//! ## Example
//! ```no_run
//! use bundle_loader::Resolver;
//! use std::path::Path;
//!
//! Resolver::new().resolve(
//!     "wg-go",
//!     Path::new("/data/app/base.apk"),
//!     &["arm64-v8a", "armeabi-v7a", "x86_64"],
//!     Path::new("/data/data/com.example/cache"),
//! )?;
//! # Ok::<_, bundle_loader::Error>(())
//! ```

pub mod archive;
pub mod dylib;
mod error;
pub mod host;
mod macros;
pub mod platform;
mod resolver;

pub use error::{Cause, Error};
pub use resolver::Resolver;

pub type Result<T> = core::result::Result<T, Error>;
