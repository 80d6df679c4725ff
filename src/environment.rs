//! The caller-owned construction environment mutated by the tools.
//!
//! This is the narrow slice of a build orchestrator's environment that
//! the discovery tools populate: plain variables (command names, the
//! recorded compiler version), ordered search-path lists (`PATH`,
//! `INCLUDE`, `LIB`, `LD_LIBRARY_PATH`), flag lists (`LINKFLAGS`), and
//! a table of named builders mapping source extensions to actions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single environment variable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A plain string, e.g. a command name or template.
    Str(String),
    /// A numeric marker, e.g. the normalized compiler version.
    Num(f64),
    /// An ordered search-path list. First entry wins.
    PathList(Vec<PathBuf>),
    /// An ordered flag list, e.g. `LINKFLAGS`.
    Flags(Vec<String>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Num(f64::from(n))
    }
}

/// A build action registered for a source extension.
///
/// The environment only records what to run; execution belongs to the
/// orchestrator. `command_var` names the environment variable holding
/// the command template, and `multipass` marks actions the orchestrator
/// must hand to its rerun-until-settled helper (cross references,
/// bibliographies), bounded by the tool's configured retry count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolAction {
    /// Environment variable naming the command template to execute.
    pub command_var: String,
    /// Whether the orchestrator should re-run the command as auxiliary
    /// files settle.
    pub multipass: bool,
}

/// A named builder: a map from source extension to action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Builder {
    actions: BTreeMap<String, ToolAction>,
}

impl Builder {
    /// Register `action` for `extension`, replacing any previous one.
    pub fn set_action(&mut self, extension: &str, action: ToolAction) {
        self.actions.insert(extension.to_string(), action);
    }

    /// The action registered for `extension`, if any.
    pub fn action(&self, extension: &str) -> Option<&ToolAction> {
        self.actions.get(extension)
    }

    /// Registered extensions, in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Number of registered extensions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no action has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Construction environment: ordered key/value store plus builder table.
///
/// # Example
///
/// ```rust
/// use toolchain_discovery::Environment;
///
/// let mut env = Environment::new();
/// env.set("CC", "icc");
/// env.prepend_path("PATH", "/opt/intel/cc/9.0/bin");
///
/// assert_eq!(env.get_str("CC"), Some("icc"));
/// assert_eq!(env.search_paths("PATH").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    vars: BTreeMap<String, Value>,
    builders: BTreeMap<String, Builder>,
}

impl Environment {
    /// An empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// The string value stored under `key`, if it is one.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.vars.get(key) {
            Some(Value::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Read `key` as a number, with `default` when absent.
    ///
    /// String values are parsed; unparseable or non-scalar values fall
    /// back to `default` as well.
    pub fn get_num_or(&self, key: &str, default: f64) -> f64 {
        match self.vars.get(key) {
            Some(Value::Num(n)) => *n,
            Some(Value::Str(s)) => s.parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.vars.insert(key.to_string(), value.into());
    }

    /// True if `key` has any value.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Prepend one entry to the search-path list under `key`.
    ///
    /// The new entry lands first. A pre-existing occurrence of the same
    /// entry is dropped; the relative order of all other entries is
    /// preserved. Creates the list if `key` is absent or not a list.
    pub fn prepend_path(&mut self, key: &str, path: impl Into<PathBuf>) {
        self.prepend_paths(key, [path.into()]);
    }

    /// Prepend several entries to the search-path list under `key`,
    /// keeping their given order at the front of the list.
    pub fn prepend_paths(&mut self, key: &str, paths: impl IntoIterator<Item = PathBuf>) {
        let mut merged: Vec<PathBuf> = paths.into_iter().collect();
        if let Some(Value::PathList(existing)) = self.vars.get(key) {
            for p in existing {
                if !merged.contains(p) {
                    merged.push(p.clone());
                }
            }
        }
        self.vars.insert(key.to_string(), Value::PathList(merged));
    }

    /// The search-path list under `key`, if it is one.
    pub fn search_paths(&self, key: &str) -> Option<&[PathBuf]> {
        match self.vars.get(key) {
            Some(Value::PathList(paths)) => Some(paths),
            _ => None,
        }
    }

    /// Append one flag to the flag list under `key`, creating it if
    /// absent.
    pub fn append_flag(&mut self, key: &str, flag: &str) {
        match self.vars.get_mut(key) {
            Some(Value::Flags(flags)) => flags.push(flag.to_string()),
            _ => {
                self.vars
                    .insert(key.to_string(), Value::Flags(vec![flag.to_string()]));
            }
        }
    }

    /// The flag list under `key`, if it is one.
    pub fn flags(&self, key: &str) -> Option<&[String]> {
        match self.vars.get(key) {
            Some(Value::Flags(flags)) => Some(flags),
            _ => None,
        }
    }

    /// The named builder, created empty if absent.
    pub fn builder_mut(&mut self, name: &str) -> &mut Builder {
        self.builders.entry(name.to_string()).or_default()
    }

    /// The named builder, if registered.
    pub fn builder(&self, name: &str) -> Option<&Builder> {
        self.builders.get(name)
    }
}

/// Join `root` and a relative subdirectory given in `\`-separated form.
///
/// Registry values and SDK layouts name subdirectories Windows-style;
/// this splits on the backslash so the same literals work in tests on
/// any host.
pub(crate) fn join_subdir(root: &Path, subdir: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in subdir.split('\\') {
        path.push(part);
    }
    path
}
