//! Version discovery and install-root lookup.
//!
//! Windows keeps installed versions as registry subkeys of the vendor
//! key, each carrying a `ProductDir` value; Linux installs land under
//! two historically different `/opt` layouts. Either way a candidate
//! only counts if its install directory actually holds the compiler
//! binary, so stale registry entries and half-removed installs are
//! discarded rather than deprioritized.

use super::CompilerLocator;
use crate::{Abi, LookupError, Platform, ToolVersion};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Vendor registry key holding one subkey per installed version.
pub(crate) const VENDOR_KEY: &str = r"Software\Intel\Compilers\C++";

/// Registry key for a specific (version, ABI) install.
pub(crate) fn product_key(version: &ToolVersion, abi: Abi) -> String {
    format!(r"{VENDOR_KEY}\{}\{}", version.as_str(), abi.registry_tag())
}

impl CompilerLocator<'_> {
    /// The native default ABI for this platform.
    ///
    /// Linux hosts default to `x86_64` when the machine reports that
    /// architecture and `ia32` otherwise. Windows hosts are classified
    /// through `PROCESSOR_ARCHITEW6432`: `AMD64` means a 32-bit
    /// process on a 64-bit kernel (default `em64t`), any other value
    /// is Itanium, and an unset variable is plain 32-bit.
    pub fn default_abi(&self) -> Option<Abi> {
        match self.platform {
            Platform::Linux => match self.host.machine_arch().as_deref() {
                Some("x86_64") => Some(Abi::X86_64),
                _ => Some(Abi::Ia32),
            },
            Platform::Windows => match self.host.env_var("PROCESSOR_ARCHITEW6432") {
                Some(arch) if arch == "AMD64" => Some(Abi::Em64t),
                Some(_) => Some(Abi::Ia64),
                None => Some(Abi::Ia32),
            },
            Platform::Unsupported => None,
        }
    }

    /// Candidate installed versions for `abi`, deduplicated and sorted
    /// by normalized value, highest first.
    pub fn discover_versions(&self, abi: Abi) -> Vec<ToolVersion> {
        let mut found = match self.platform {
            Platform::Windows => self.discover_registry_versions(abi),
            Platform::Linux => self.discover_glob_versions(),
            Platform::Unsupported => Vec::new(),
        };

        found.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        found.dedup();
        found.sort_by(|a, b| {
            b.normalized(self.platform)
                .total_cmp(&a.normalized(self.platform))
                .then_with(|| a.as_str().cmp(b.as_str()))
        });
        tracing::debug!(abi = %abi, count = found.len(), "discovered compiler versions");
        found
    }

    /// The highest installed version for `abi`, or `None`.
    pub fn select_default_version(&self, abi: Abi) -> Option<ToolVersion> {
        self.discover_versions(abi).into_iter().next()
    }

    /// Locate the top-level install directory for a (version, ABI)
    /// pair.
    ///
    /// The returned root is the directory whose `bin` subdirectory
    /// holds the compiler (`<top>/bin/icc` on Linux,
    /// `<top>\Bin\icl.exe` on Windows).
    ///
    /// # Errors
    ///
    /// - [`LookupError::MissingRegistry`]: the Windows registry has no
    ///   entry for this pair.
    /// - [`LookupError::RegistryUnavailable`]: the registry subsystem
    ///   cannot be reached at all.
    /// - [`LookupError::MissingInstall`]: no candidate directory holds
    ///   the expected compiler binary.
    pub fn locate_root(&self, version: &ToolVersion, abi: Abi) -> Result<PathBuf, LookupError> {
        let missing_install = || LookupError::MissingInstall {
            version: version.to_string(),
            abi,
        };
        match self.platform {
            Platform::Windows => {
                let top = self
                    .host
                    .registry_value(&product_key(version, abi), "ProductDir")?;
                let top = PathBuf::from(top);
                let compiler = top.join("Bin").join("icl.exe");
                if !self.host.path_exists(&compiler) {
                    return Err(missing_install());
                }
                Ok(top)
            }
            Platform::Linux => {
                // First layout is the 9.0-and-later style, second the
                // 8.0 style; x86_64 toolchains only ever shipped in
                // the dedicated cce tree.
                let candidates: Vec<PathBuf> = if abi == Abi::X86_64 {
                    vec![PathBuf::from(format!("/opt/intel/cce/{version}"))]
                } else {
                    vec![
                        PathBuf::from(format!("/opt/intel/cc/{version}")),
                        PathBuf::from(format!("/opt/intel_cc_{version}")),
                    ]
                };
                for top in candidates {
                    if self.host.path_exists(&top.join("bin").join("icc")) {
                        return Ok(top);
                    }
                }
                Err(missing_install())
            }
            Platform::Unsupported => Err(missing_install()),
        }
    }

    fn discover_registry_versions(&self, abi: Abi) -> Vec<ToolVersion> {
        let subkeys = match self.host.registry_subkeys(VENDOR_KEY) {
            Ok(subkeys) => subkeys,
            Err(_) => return Vec::new(),
        };
        let mut found = Vec::new();
        for subkey in subkeys {
            let version = match ToolVersion::parse(&subkey) {
                Ok(version) => version,
                Err(_) => {
                    tracing::debug!(%subkey, "skipping non-version registry subkey");
                    continue;
                }
            };
            match self
                .host
                .registry_value(&product_key(&version, abi), "ProductDir")
            {
                Ok(dir) if self.host.path_exists(Path::new(&dir)) => found.push(version),
                Ok(dir) => {
                    // Left behind by an install that was deleted or
                    // moved rather than uninstalled.
                    tracing::debug!(version = %version, %dir, "ignoring stale registry entry");
                }
                Err(_) => {}
            }
        }
        found
    }

    fn discover_glob_versions(&self) -> Vec<ToolVersion> {
        let mut found = Vec::new();

        // Old style: /opt/intel_cc_80
        let old_style = Regex::new(r"cc_(.*)$").expect("hardcoded pattern");
        for path in self.host.glob_paths("/opt/intel_cc_*") {
            let name = path.to_string_lossy();
            if let Some(caps) = old_style.captures(&name) {
                if let Ok(version) = ToolVersion::parse(&caps[1]) {
                    found.push(version);
                }
            }
        }

        // New style: /opt/intel/cc/9.0 for ia32, /opt/intel/cce/9.0
        // for x86_64.
        let new_style = Regex::new(r"([0-9.]+)$").expect("hardcoded pattern");
        for path in self.host.glob_paths("/opt/intel/cc*/*") {
            let name = path.to_string_lossy();
            if let Some(caps) = new_style.captures(&name) {
                if let Ok(version) = ToolVersion::parse(&caps[1]) {
                    found.push(version);
                }
            }
        }

        found
    }
}
