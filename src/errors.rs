//! Error and warning types for toolchain configuration.
//!
//! Three tiers, matching how the caller is expected to react:
//!
//! - [`LookupError`]: internal discovery failures (registry, install
//!   dirs). Classifiable so `configure` can decide between aborting
//!   and warning; never escapes the public API unconverted.
//! - [`ConfigError`]: hard configuration errors. Abort configuration.
//! - [`ConfigWarning`]: advisory conditions. Configuration continues;
//!   warnings are returned to the caller and logged.

use crate::Abi;
use std::path::PathBuf;
use thiserror::Error;

/// Failures encountered while looking up an installed toolchain.
///
/// These are internal to discovery: `configure` converts them into a
/// [`ConfigError`] or a [`ConfigWarning`] depending on context. They
/// are still public so callers of the lower-level lookup operations
/// (e.g. [`CompilerLocator::locate_root`](crate::CompilerLocator::locate_root))
/// can match on the kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LookupError {
    /// The expected registry key or value is absent.
    #[error("registry key {key} has no value {name}")]
    MissingRegistry {
        /// The registry key that was opened (or failed to open).
        key: String,
        /// The value that was queried beneath it.
        name: String,
    },

    /// The registry subsystem itself cannot be reached on this host.
    #[error("the host registry is not available")]
    RegistryUnavailable,

    /// No install directory with the expected compiler binary exists
    /// for this version/ABI pair.
    #[error("no compiler installation found for version {version} (abi {abi})")]
    MissingInstall {
        /// The requested version, in raw string form.
        version: String,
        /// The requested ABI.
        abi: Abi,
    },
}

/// Hard configuration errors. These abort configuration and carry
/// enough context (version, ABI, path) for a user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A version string that is not a plain decimal number.
    #[error("invalid compiler version {raw:?}: expected a number like \"80\" or \"9.0\"")]
    InvalidVersion {
        /// The rejected input.
        raw: String,
    },

    /// No ABI was requested and none could be determined for this host.
    #[error("failed to determine a default compiler ABI for this host")]
    AbiUndetermined,

    /// No version was requested and none is installed for the ABI.
    #[error("no installed compiler found for abi {abi}")]
    VersionUndetermined {
        /// The ABI that was searched.
        abi: Abi,
    },

    /// The toolchain root could not be located and no substitute
    /// compiler is reachable on the search path.
    #[error("compiler (version {version}, abi {abi}) not found: {source}")]
    ToolchainNotFound {
        /// The requested version.
        version: String,
        /// The requested ABI.
        abi: Abi,
        /// The underlying lookup failure.
        #[source]
        source: LookupError,
    },

    /// The ABI is recognized but cannot be configured.
    #[error("unsupported compiler ABI: {abi}")]
    UnsupportedAbi {
        /// The offending ABI.
        abi: Abi,
    },

    /// The paired native toolchain is too old for this compiler/ABI.
    #[error(
        "compiler (version {version}, abi {abi}) requires Visual Studio 2005 or above \
         (MSVS_VERSION >= 8.0, found {found})"
    )]
    MsvsTooOld {
        /// The requested compiler version.
        version: String,
        /// The requested ABI.
        abi: Abi,
        /// The MSVS_VERSION value that was found.
        found: f64,
    },

    /// The paired native toolchain targets the wrong platform.
    #[error(
        "compiler (version {version}, abi {abi}) requires MSVS_PLATFORM to be set to \"x64\""
    )]
    MsvsPlatformMismatch {
        /// The requested compiler version.
        version: String,
        /// The requested ABI.
        abi: Abi,
    },

    /// A Platform SDK directory required by the compiler is missing.
    #[error(
        "platform SDK directory {dir} not found, which is required by the compiler \
         (version {version}, abi {abi})"
    )]
    SdkDirMissing {
        /// The directory that was probed.
        dir: PathBuf,
        /// The requested compiler version.
        version: String,
        /// The requested ABI.
        abi: Abi,
    },
}

/// Advisory conditions surfaced during configuration.
///
/// These do not abort configuration. [`CompilerLocator::configure`]
/// returns them so the orchestrator can route them to its own warning
/// channel; each is also logged at `warn` level when it is recorded.
///
/// [`CompilerLocator::configure`]: crate::CompilerLocator::configure
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigWarning {
    /// The install root was not found, but a compiler of the expected
    /// name is already reachable on the search path, so the user has
    /// presumably wired their environment by hand. Path overlays are
    /// skipped.
    #[error(
        "failed to find the compiler install root for version {version}, abi {abi}; \
         using {executable} from the search path"
    )]
    ToolchainRootNotFound {
        /// The requested version.
        version: String,
        /// The requested ABI.
        abi: Abi,
        /// The executable that was found on the search path instead.
        executable: String,
    },

    /// No Platform SDK root was configured; the hardcoded default is
    /// used instead.
    #[error(
        "failed to detect the Microsoft Platform SDK path (set MSVS_PLATFORMSDK); \
         using default: {root}"
    )]
    DefaultPlatformSdk {
        /// The default root that will be probed.
        root: PathBuf,
    },

    /// No license directory was found; the default path is recorded as
    /// a last resort even though it does not exist.
    #[error(
        "compiler license dir was not found. Tried the INTEL_LICENSE_FILE environment \
         variable ({env:?}), the registry ({registry:?}) and the default path ({default}). \
         Using the default path as a last resort."
    )]
    LicenseDirNotFound {
        /// Value of the environment override, if any.
        env: Option<String>,
        /// Value of the registry entry, if any.
        registry: Option<String>,
        /// The default directory recorded despite being absent.
        default: PathBuf,
    },
}

/// Record an advisory warning: collect it for the caller and log it.
pub(crate) fn record_warning(warnings: &mut Vec<ConfigWarning>, warning: ConfigWarning) {
    tracing::warn!("{warning}");
    warnings.push(warning);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_kinds_are_distinguishable() {
        let missing = LookupError::MissingRegistry {
            key: r"Software\Intel\Compilers\C++\9.0\IA32".to_string(),
            name: "ProductDir".to_string(),
        };
        let unavailable = LookupError::RegistryUnavailable;
        let install = LookupError::MissingInstall {
            version: "9.0".to_string(),
            abi: Abi::Ia32,
        };
        assert_ne!(missing, unavailable);
        assert_ne!(missing, install);
        assert_ne!(unavailable, install);
    }

    #[test]
    fn test_config_error_messages_name_version_and_abi() {
        let err = ConfigError::SdkDirMissing {
            dir: PathBuf::from(r"C:\Program Files\Microsoft Platform SDK\Lib\AMD64"),
            version: "9.0".to_string(),
            abi: Abi::Em64t,
        };
        let msg = err.to_string();
        assert!(msg.contains("9.0"));
        assert!(msg.contains("em64t"));
        assert!(msg.contains("AMD64"));
    }

    #[test]
    fn test_unsupported_abi_names_the_abi() {
        let err = ConfigError::UnsupportedAbi { abi: Abi::Ia64 };
        assert!(err.to_string().contains("ia64"));
    }

    #[test]
    fn test_toolchain_not_found_carries_source() {
        let err = ConfigError::ToolchainNotFound {
            version: "80".to_string(),
            abi: Abi::Ia32,
            source: LookupError::MissingInstall {
                version: "80".to_string(),
                abi: Abi::Ia32,
            },
        };
        assert!(err.to_string().contains("80"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::DefaultPlatformSdk {
            root: PathBuf::from(r"C:\Program Files\Microsoft Platform SDK"),
        };
        assert!(warning.to_string().contains("MSVS_PLATFORMSDK"));
    }
}
