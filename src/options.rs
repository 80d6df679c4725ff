//! Configuration request options.

use crate::{Abi, ToolVersion};
use std::path::PathBuf;

/// Options for [`CompilerLocator::configure`](crate::CompilerLocator::configure).
///
/// All fields default to "not requested": the locator picks the native
/// ABI, the highest installed version, and looks the install root up
/// itself.
///
/// # Example
///
/// ```rust
/// use toolchain_discovery::{Abi, ConfigureOptions, ToolVersion};
///
/// // Take the defaults
/// let opts = ConfigureOptions::default();
/// assert!(opts.version.is_none());
///
/// // Pin a specific release and ABI
/// let opts = ConfigureOptions {
///     version: Some(ToolVersion::parse("9.0").unwrap()),
///     abi: Some(Abi::Em64t),
///     ..Default::default()
/// };
/// # let _ = opts;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    /// Compiler release to configure. `None` selects the highest
    /// installed version for the ABI.
    pub version: Option<ToolVersion>,

    /// Target ABI. `None` selects the host's native default.
    pub abi: Option<Abi>,

    /// Explicit toolchain root. When set, registry and filesystem
    /// root lookup are skipped entirely and this directory is trusted
    /// as-is.
    pub topdir: Option<PathBuf>,
}
