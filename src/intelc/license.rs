//! License directory resolution for the Windows toolchain.

use crate::errors::record_warning;
use crate::{ConfigWarning, Host};
use std::path::{Path, PathBuf};

/// Registry key carrying per-product license directories.
const LICENSE_KEY: &str = r"SOFTWARE\Intel\Licenses";

/// Last-resort license directory.
const DEFAULT_LICENSE_DIR: &str = r"C:\Program Files\Common Files\Intel\Licenses";

/// Resolve the compiler license directory.
///
/// Precedence: the `INTEL_LICENSE_FILE` process environment variable,
/// then the registry's `w_cpp` entry, then the hardcoded default. The
/// first two only win if they point at an existing directory; the
/// default is recorded regardless, with an advisory when it too is
/// absent.
pub(super) fn resolve_license_dir(
    host: &dyn Host,
    warnings: &mut Vec<ConfigWarning>,
) -> PathBuf {
    let env_dir = host.env_var("INTEL_LICENSE_FILE");
    let registry_dir = host.registry_value(LICENSE_KEY, "w_cpp").ok();

    for candidate in [env_dir.as_deref(), registry_dir.as_deref()]
        .into_iter()
        .flatten()
    {
        if !candidate.is_empty() && host.path_exists(Path::new(candidate)) {
            return PathBuf::from(candidate);
        }
    }

    let default = PathBuf::from(DEFAULT_LICENSE_DIR);
    if !host.path_exists(&default) {
        record_warning(
            warnings,
            ConfigWarning::LicenseDirNotFound {
                env: env_dir,
                registry: registry_dir,
                default: default.clone(),
            },
        );
    }
    default
}
