//! Platform-specific shared-library naming
//!
//! Maps a logical library name (e.g. `foo`) to the file name the platform
//! loader expects (`libfoo.so`, `libfoo.dylib`, `foo.dll`). The mapping is a
//! pure function of the [`Platform`] value so that resolution can be
//! exercised against simulated platforms in tests.

use cfg_if::cfg_if;

/// Target platforms with distinct shared-library naming conventions.
///
/// Android follows the Linux convention and is represented by
/// [`Platform::Linux`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// `lib<name>.so`
    Linux,
    /// `lib<name>.dylib`
    MacOs,
    /// `<name>.dll`
    Windows,
}

cfg_if! {
    if #[cfg(target_os = "windows")] {
        const CURRENT: Platform = Platform::Windows;
    } else if #[cfg(any(target_os = "macos", target_os = "ios"))] {
        const CURRENT: Platform = Platform::MacOs;
    } else {
        const CURRENT: Platform = Platform::Linux;
    }
}

impl Platform {
    /// Returns the platform this crate was compiled for.
    pub const fn current() -> Self {
        CURRENT
    }

    /// The file-name prefix for shared libraries on this platform.
    pub const fn library_prefix(&self) -> &'static str {
        match self {
            Platform::Linux | Platform::MacOs => "lib",
            Platform::Windows => "",
        }
    }

    /// The file-name suffix for shared libraries on this platform.
    pub const fn library_suffix(&self) -> &'static str {
        match self {
            Platform::Linux => ".so",
            Platform::MacOs => ".dylib",
            Platform::Windows => ".dll",
        }
    }
}

/// Maps a logical library name to the platform-specific file name.
///
/// The logical name is taken as-is; no extension stripping or validation is
/// performed.
///
/// # Examples
/// ```
/// use bundle_loader::platform::{Platform, map_library_name};
///
/// assert_eq!(map_library_name("foo", Platform::Linux), "libfoo.so");
/// assert_eq!(map_library_name("foo", Platform::Windows), "foo.dll");
/// ```
pub fn map_library_name(name: &str, platform: Platform) -> String {
    format!(
        "{}{}{}",
        platform.library_prefix(),
        name,
        platform.library_suffix()
    )
}
