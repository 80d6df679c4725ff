//! Locator for installed Intel C/C++ compiler toolchains.
//!
//! Discovery is registry-driven on Windows and glob-driven on Linux;
//! configuration overlays the located toolchain's `bin`/`include`/`lib`
//! directories, command names, version marker and license directory
//! onto a caller-owned [`Environment`].

mod discovery;
mod license;
mod sdk;

use crate::environment::join_subdir;
use crate::errors::record_warning;
use crate::{
    Abi, ConfigError, ConfigWarning, ConfigureOptions, Environment, Host, Platform, ToolVersion,
    Value,
};
use std::path::{Path, PathBuf};

/// Configuration hook for the paired native toolchain.
///
/// The Intel compiler rides on top of the platform's base toolchain
/// (MSVC on Windows, GCC on Linux): its headers, libraries and linker
/// environment must be in place before the Intel-specific overlay.
/// The build orchestrator supplies that step through this trait.
pub trait BaseToolchain {
    /// Populate `env` with the native toolchain's settings.
    fn configure(&self, env: &mut Environment) -> Result<(), ConfigError>;
}

/// Locates and configures an installed Intel C/C++ compiler.
///
/// Stateless: every operation reads through the injected [`Host`] and
/// the explicitly selected [`Platform`].
///
/// # Example
///
/// ```rust,no_run
/// use toolchain_discovery::{
///     CompilerLocator, ConfigureOptions, Environment, Platform, SystemHost,
/// };
///
/// let host = SystemHost;
/// let locator = CompilerLocator::new(&host, Platform::current());
///
/// let mut env = Environment::new();
/// match locator.configure(&mut env, &ConfigureOptions::default()) {
///     Ok(warnings) => {
///         for w in &warnings {
///             eprintln!("warning: {w}");
///         }
///         println!("CC = {:?}", env.get_str("CC"));
///     }
///     Err(e) => eprintln!("configuration failed: {e}"),
/// }
/// ```
pub struct CompilerLocator<'a> {
    pub(crate) host: &'a dyn Host,
    pub(crate) platform: Platform,
    base: Option<&'a dyn BaseToolchain>,
}

impl<'a> CompilerLocator<'a> {
    /// A locator for `platform` reading through `host`.
    pub fn new(host: &'a dyn Host, platform: Platform) -> Self {
        Self {
            host,
            platform,
            base: None,
        }
    }

    /// Inject the native-toolchain configuration step.
    #[must_use]
    pub fn with_base_toolchain(mut self, base: &'a dyn BaseToolchain) -> Self {
        self.base = Some(base);
        self
    }

    /// Configure `env` for the requested (or default) version and ABI.
    ///
    /// On success returns the advisory warnings that were recorded;
    /// hard failures abort with a [`ConfigError`]. On an unsupported
    /// platform this is a no-op and returns no warnings.
    pub fn configure(
        &self,
        env: &mut Environment,
        options: &ConfigureOptions,
    ) -> Result<Vec<ConfigWarning>, ConfigError> {
        if self.platform == Platform::Unsupported {
            return Ok(Vec::new());
        }
        let mut warnings = Vec::new();

        let abi = match options.abi {
            Some(abi) => abi,
            None => self.default_abi().ok_or(ConfigError::AbiUndetermined)?,
        };
        let version = match &options.version {
            Some(version) => version.clone(),
            None => self
                .select_default_version(abi)
                .ok_or(ConfigError::VersionUndetermined { abi })?,
        };

        let topdir = if let Some(dir) = &options.topdir {
            Some(dir.clone())
        } else {
            match self.locate_root(&version, abi) {
                Ok(dir) => Some(dir),
                Err(source) => {
                    let executable = self.compiler_executable();
                    if self.host.find_executable(executable).is_some() {
                        record_warning(
                            &mut warnings,
                            ConfigWarning::ToolchainRootNotFound {
                                version: version.to_string(),
                                abi,
                                executable: executable.to_string(),
                            },
                        );
                        None
                    } else {
                        return Err(ConfigError::ToolchainNotFound {
                            version: version.to_string(),
                            abi,
                            source,
                        });
                    }
                }
            }
        };

        tracing::debug!(
            version = %version,
            abi = %abi,
            topdir = ?topdir,
            "configuring Intel C compiler"
        );

        if let Some(topdir) = &topdir {
            match self.platform {
                Platform::Windows => self.overlay_windows(env, topdir, &version, abi, &mut warnings)?,
                Platform::Linux => {
                    self.configure_base(env)?;
                    env.set("INTEL_C_COMPILER_TOP", topdir.to_string_lossy().into_owned());
                    env.prepend_path("INCLUDE", topdir.join("include"));
                    env.prepend_path("LIB", topdir.join("lib"));
                    env.prepend_path("PATH", topdir.join("bin"));
                    env.prepend_path("LD_LIBRARY_PATH", topdir.join("lib"));
                }
                Platform::Unsupported => {}
            }
        }

        match self.platform {
            Platform::Windows => {
                env.set("CC", "icl");
                env.set("CXX", "icl");
                env.set("AR", "xilib");
                env.set("LINK", "xilink");
                // The manifest must be embedded when linking against the
                // VS 2005+ CRT.
                if env.get_num_or("MSVS_VERSION", 0.0) >= 8.0 {
                    env.append_flag("LINKFLAGS", "/MANIFEST");
                }
            }
            _ => {
                env.set("CC", "icc");
                env.set("CXX", "icpc");
                env.set("LINK", "$CC");
                env.set("AR", "xiar");
                env.set("LD", "xild");
            }
        }

        // The major version only, on the normalized scale, for
        // downstream consumers.
        env.set(
            "INTEL_C_COMPILER_VERSION",
            Value::Num(version.normalized(self.platform)),
        );

        if self.platform == Platform::Windows {
            let licdir = license::resolve_license_dir(self.host, &mut warnings);
            env.set("INTEL_LICENSE_FILE", licdir.to_string_lossy().into_owned());
        }

        Ok(warnings)
    }

    /// True if any compiler version is discoverable for any ABI, or
    /// failing that, if the compiler executable is on the search path.
    pub fn exists(&self) -> bool {
        if self.platform == Platform::Unsupported {
            return false;
        }
        if Abi::all().any(|abi| !self.discover_versions(abi).is_empty()) {
            return true;
        }
        self.host.find_executable(self.compiler_executable()).is_some()
    }

    /// The compiler executable name for this platform.
    pub(crate) fn compiler_executable(&self) -> &'static str {
        match self.platform {
            Platform::Windows => "icl",
            _ => "icc",
        }
    }

    fn configure_base(&self, env: &mut Environment) -> Result<(), ConfigError> {
        match self.base {
            Some(base) => base.configure(env),
            None => Ok(()),
        }
    }

    /// Windows overlay: base toolchain, ABI gates, Platform SDK, and
    /// the registry-preferred toolchain subdirectories.
    fn overlay_windows(
        &self,
        env: &mut Environment,
        topdir: &Path,
        version: &ToolVersion,
        abi: Abi,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(), ConfigError> {
        match abi {
            Abi::Ia32 => self.configure_base(env)?,
            Abi::Em64t => {
                let msvs = env.get_num_or("MSVS_VERSION", 0.0);
                if msvs < 8.0 {
                    return Err(ConfigError::MsvsTooOld {
                        version: version.to_string(),
                        abi,
                        found: msvs,
                    });
                }
                if env.get_str("MSVS_PLATFORM") != Some("x64") {
                    return Err(ConfigError::MsvsPlatformMismatch {
                        version: version.to_string(),
                        abi,
                    });
                }
                self.configure_base(env)?;
                sdk::overlay_platform_sdk(self.host, env, version, abi, warnings)?;
            }
            Abi::Ia64 => return Err(ConfigError::UnsupportedAbi { abi }),
            Abi::X86_64 => {}
        }

        env.set("INTEL_C_COMPILER_TOP", topdir.to_string_lossy().into_owned());

        // Prefer the registry-declared subdirectory for each search
        // path; the install's default layout is the fallback.
        let key = discovery::product_key(version, abi);
        let subdirs = [
            ("INCLUDE", "IncludeDir", "Include"),
            ("LIB", "LibDir", "Lib"),
            ("PATH", "BinDir", "Bin"),
        ];
        for (var, value_name, default_subdir) in subdirs {
            match self.host.registry_value(&key, value_name) {
                Ok(raw) => {
                    // Registry values may reference the install root
                    // through the $(ICInstallDir) token.
                    let expanded = raw.replace(
                        "$(ICInstallDir)",
                        &format!("{}\\", topdir.to_string_lossy()),
                    );
                    let entries: Vec<PathBuf> =
                        expanded.split(';').map(PathBuf::from).collect();
                    env.prepend_paths(var, entries);
                }
                Err(_) => env.prepend_path(var, join_subdir(topdir, default_subdir)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;

    struct RecordingBase;

    impl BaseToolchain for RecordingBase {
        fn configure(&self, env: &mut Environment) -> Result<(), ConfigError> {
            env.set("BASE_TOOLCHAIN", "gcc");
            Ok(())
        }
    }

    struct FailingBase;

    impl BaseToolchain for FailingBase {
        fn configure(&self, _env: &mut Environment) -> Result<(), ConfigError> {
            Err(ConfigError::AbiUndetermined)
        }
    }

    fn linux_host() -> MockHost {
        MockHost::new()
            .with_arch("x86_64")
            .with_path("/opt/intel/cce/9.0/bin/icc")
    }

    #[test]
    fn test_base_toolchain_runs_before_overlay() {
        let host = linux_host();
        let base = RecordingBase;
        let locator = CompilerLocator::new(&host, Platform::Linux).with_base_toolchain(&base);
        let mut env = Environment::new();
        locator
            .configure(&mut env, &ConfigureOptions::default())
            .unwrap();
        assert_eq!(env.get_str("BASE_TOOLCHAIN"), Some("gcc"));
        assert_eq!(env.get_str("CC"), Some("icc"));
    }

    #[test]
    fn test_base_toolchain_failure_propagates() {
        let host = linux_host();
        let base = FailingBase;
        let locator = CompilerLocator::new(&host, Platform::Linux).with_base_toolchain(&base);
        let mut env = Environment::new();
        assert!(locator
            .configure(&mut env, &ConfigureOptions::default())
            .is_err());
    }

    #[test]
    fn test_base_toolchain_skipped_when_root_is_missing() {
        // Root lookup fails but icc is on the search path: the base
        // toolchain overlay belongs to the root-found branch only.
        let host = MockHost::new()
            .with_arch("x86_64")
            .with_executable("icc", "/usr/local/bin/icc");
        let base = RecordingBase;
        let locator = CompilerLocator::new(&host, Platform::Linux).with_base_toolchain(&base);
        let mut env = Environment::new();
        let options = ConfigureOptions {
            version: Some(ToolVersion::parse("9.0").unwrap()),
            ..Default::default()
        };
        let warnings = locator.configure(&mut env, &options).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(env.get_str("BASE_TOOLCHAIN").is_none());
    }
}
