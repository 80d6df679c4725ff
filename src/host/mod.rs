//! Host access behind a narrow injected interface.
//!
//! Discovery touches the host in exactly four ways: filesystem
//! existence checks, filesystem globs, read-only registry lookups, and
//! search-path executable probes. [`Host`] captures those (plus the
//! process environment and machine architecture signals the default
//! ABI needs) so the locator is unit-testable without a real registry
//! or filesystem.

mod registry;

use crate::LookupError;
use std::path::{Path, PathBuf};

/// Read-only host services used by the discovery tools.
pub trait Host {
    /// True if `path` exists on disk.
    fn path_exists(&self, path: &Path) -> bool;

    /// All paths matching a glob `pattern`, in filesystem order.
    fn glob_paths(&self, pattern: &str) -> Vec<PathBuf>;

    /// Read a registry value `name` under `key` (rooted at
    /// HKEY_LOCAL_MACHINE).
    ///
    /// Fails with [`LookupError::MissingRegistry`] when the key or
    /// value is absent, [`LookupError::RegistryUnavailable`] when the
    /// host has no registry at all.
    fn registry_value(&self, key: &str, name: &str) -> Result<String, LookupError>;

    /// Enumerate the subkeys of `key` (rooted at HKEY_LOCAL_MACHINE).
    ///
    /// An absent key enumerates as empty; only
    /// [`LookupError::RegistryUnavailable`] is an error here.
    fn registry_subkeys(&self, key: &str) -> Result<Vec<String>, LookupError>;

    /// Find an executable on the search path.
    fn find_executable(&self, name: &str) -> Option<PathBuf>;

    /// Read a process environment variable.
    fn env_var(&self, name: &str) -> Option<String>;

    /// The machine architecture tag (e.g. `"x86_64"`), if known.
    fn machine_arch(&self) -> Option<String>;
}

/// The production [`Host`]: real filesystem, registry and search path.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn glob_paths(&self, pattern: &str) -> Vec<PathBuf> {
        match glob::glob(pattern) {
            Ok(entries) => entries.filter_map(Result::ok).collect(),
            Err(e) => {
                tracing::debug!(pattern, error = %e, "bad glob pattern");
                Vec::new()
            }
        }
    }

    fn registry_value(&self, key: &str, name: &str) -> Result<String, LookupError> {
        registry::value(key, name)
    }

    fn registry_subkeys(&self, key: &str) -> Result<Vec<String>, LookupError> {
        registry::subkeys(key)
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn machine_arch(&self) -> Option<String> {
        Some(std::env::consts::ARCH.to_string())
    }
}

/// In-memory [`Host`] for unit tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MockHost {
    paths: std::collections::BTreeSet<PathBuf>,
    values: std::collections::BTreeMap<(String, String), String>,
    subkeys: std::collections::BTreeMap<String, Vec<String>>,
    executables: std::collections::BTreeMap<String, PathBuf>,
    env: std::collections::BTreeMap<String, String>,
    arch: Option<String>,
    registry_available: bool,
}

#[cfg(test)]
impl MockHost {
    pub(crate) fn new() -> Self {
        Self {
            registry_available: true,
            ..Self::default()
        }
    }

    /// Register a path as existing, along with all of its ancestors.
    #[must_use]
    pub(crate) fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                self.paths.insert(ancestor.to_path_buf());
            }
        }
        self
    }

    #[must_use]
    pub(crate) fn with_registry_value(
        mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let name = name.into();
        self.subkeys.entry(key.clone()).or_default();
        self.values.insert((key, name), value.into());
        self
    }

    #[must_use]
    pub(crate) fn with_subkey(
        mut self,
        key: impl Into<String>,
        subkey: impl Into<String>,
    ) -> Self {
        self.subkeys.entry(key.into()).or_default().push(subkey.into());
        self
    }

    #[must_use]
    pub(crate) fn with_executable(
        mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.executables.insert(name.into(), path.into());
        self
    }

    #[must_use]
    pub(crate) fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub(crate) fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = Some(arch.into());
        self
    }

    #[must_use]
    pub(crate) fn without_registry(mut self) -> Self {
        self.registry_available = false;
        self
    }
}

#[cfg(test)]
impl Host for MockHost {
    fn path_exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    fn glob_paths(&self, pattern: &str) -> Vec<PathBuf> {
        let Ok(pattern) = glob::Pattern::new(pattern) else {
            return Vec::new();
        };
        self.paths
            .iter()
            .filter(|p| pattern.matches_path(p))
            .cloned()
            .collect()
    }

    fn registry_value(&self, key: &str, name: &str) -> Result<String, LookupError> {
        if !self.registry_available {
            return Err(LookupError::RegistryUnavailable);
        }
        self.values
            .get(&(key.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| LookupError::MissingRegistry {
                key: key.to_string(),
                name: name.to_string(),
            })
    }

    fn registry_subkeys(&self, key: &str) -> Result<Vec<String>, LookupError> {
        if !self.registry_available {
            return Err(LookupError::RegistryUnavailable);
        }
        Ok(self.subkeys.get(key).cloned().unwrap_or_default())
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        self.executables.get(name).cloned()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }

    fn machine_arch(&self) -> Option<String> {
        self.arch.clone()
    }
}
