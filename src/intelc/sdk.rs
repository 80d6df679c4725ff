//! Microsoft Platform SDK overlay for the 64-bit Windows toolchain.
//!
//! The em64t compiler cannot build against the 32-bit CRT that ships
//! with Visual Studio; it needs the Platform SDK's AMD64 headers,
//! libraries and tools. Every directory here is required: a missing
//! one aborts configuration rather than producing a toolchain that
//! fails halfway into a build.

use crate::environment::join_subdir;
use crate::errors::record_warning;
use crate::{Abi, ConfigError, ConfigWarning, Environment, Host, ToolVersion};
use std::path::PathBuf;

/// Fallback SDK root when `MSVS_PLATFORMSDK` is not configured.
const DEFAULT_SDK_ROOT: &str = r"C:\Program Files\Microsoft Platform SDK";

/// SDK-relative directories required by the 64-bit compiler, each
/// prepended to the named search-path variable.
const SDK_DIRS: [(&str, &str); 8] = [
    ("INCLUDE", r"include"),
    ("INCLUDE", r"include\crt"),
    ("INCLUDE", r"include\crt\sys"),
    ("INCLUDE", r"include\mfc"),
    ("INCLUDE", r"include\atl"),
    ("LIB", r"Lib\AMD64"),
    ("LIB", r"Lib\AMD64\atlmfc"),
    ("PATH", r"Bin\Win64\x86\AMD64"),
];

pub(super) fn overlay_platform_sdk(
    host: &dyn Host,
    env: &mut Environment,
    version: &ToolVersion,
    abi: Abi,
    warnings: &mut Vec<ConfigWarning>,
) -> Result<(), ConfigError> {
    let root = match env.get_str("MSVS_PLATFORMSDK") {
        Some(root) => PathBuf::from(root),
        None => {
            let root = PathBuf::from(DEFAULT_SDK_ROOT);
            record_warning(
                warnings,
                ConfigWarning::DefaultPlatformSdk { root: root.clone() },
            );
            root
        }
    };

    for (var, subdir) in SDK_DIRS {
        let dir = join_subdir(&root, subdir);
        if !host.path_exists(&dir) {
            return Err(ConfigError::SdkDirMissing {
                dir,
                version: version.to_string(),
                abi,
            });
        }
        env.prepend_path(var, dir);
    }
    Ok(())
}
