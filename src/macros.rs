/// Resolve a native library with the default platform loader
/// # Example
/// ```no_run
/// # use bundle_loader::{resolve_library, host::StaticHost};
/// // with explicit archive path, ABI list and scratch directory
/// resolve_library!(
///     "wg-go",
///     "/data/app/base.apk",
///     &["arm64-v8a", "x86_64"],
///     std::path::Path::new("/tmp/scratch")
/// )?;
/// // with a host environment
/// let host = StaticHost::new(["arm64-v8a"], "/data/app/base.apk", "/tmp/scratch");
/// resolve_library!("wg-go", &host)?;
/// # Ok::<_, bundle_loader::Error>(())
/// ```
#[macro_export]
macro_rules! resolve_library {
    ($name:expr, $env:expr) => {
        $crate::Resolver::new().resolve_from($name, $env)
    };
    ($name:expr, $archive:expr, $abis:expr, $scratch:expr) => {
        $crate::Resolver::new().resolve($name, $archive, $abis, $scratch)
    };
}
