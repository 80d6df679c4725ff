//! ABI tags identifying the supported toolchain variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// The target ABI of an installed compiler toolchain.
///
/// Each variant selects both the registry subtree consulted on Windows
/// and the install-path layout probed on Linux. The set is closed: these
/// are the only ABIs the vendor ever shipped toolchains for.
///
/// # Example
///
/// ```rust
/// use toolchain_discovery::Abi;
///
/// // Iterate over all known ABI tags
/// for abi in Abi::all() {
///     println!("{}: registry subtree {}", abi, abi.registry_tag());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Abi {
    /// 32-bit x86.
    Ia32,
    /// Itanium. Present in vendor registries but not supported for
    /// configuration.
    Ia64,
    /// 64-bit x86 as tagged by the Windows toolchains (aka amd64).
    Em64t,
    /// 64-bit x86 as tagged by the Linux toolchains.
    X86_64,
}

impl Abi {
    /// The upper-case tag used as a registry subtree name on Windows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use toolchain_discovery::Abi;
    ///
    /// assert_eq!(Abi::Em64t.registry_tag(), "EM64T");
    /// assert_eq!(Abi::Ia32.registry_tag(), "IA32");
    /// ```
    pub fn registry_tag(&self) -> &'static str {
        match self {
            Self::Ia32 => "IA32",
            Self::Ia64 => "IA64",
            Self::Em64t => "EM64T",
            Self::X86_64 => "X86_64",
        }
    }

    /// The lower-case tag used in messages and install paths.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Ia32 => "ia32",
            Self::Ia64 => "ia64",
            Self::Em64t => "em64t",
            Self::X86_64 => "x86_64",
        }
    }

    /// Iterator over all known ABI tags.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}

impl fmt::Display for Abi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when parsing an unrecognized ABI tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized ABI tag: {0}")]
pub struct ParseAbiError(String);

impl FromStr for Abi {
    type Err = ParseAbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ia32" => Ok(Self::Ia32),
            "ia64" => Ok(Self::Ia64),
            "em64t" => Ok(Self::Em64t),
            "x86_64" => Ok(Self::X86_64),
            _ => Err(ParseAbiError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tags() {
        assert_eq!(Abi::Ia32.registry_tag(), "IA32");
        assert_eq!(Abi::Ia64.registry_tag(), "IA64");
        assert_eq!(Abi::Em64t.registry_tag(), "EM64T");
        assert_eq!(Abi::X86_64.registry_tag(), "X86_64");
    }

    #[test]
    fn test_display_is_lowercase_tag() {
        assert_eq!(Abi::Em64t.to_string(), "em64t");
        assert_eq!(Abi::X86_64.to_string(), "x86_64");
    }

    #[test]
    fn test_from_str_roundtrip() {
        for abi in Abi::all() {
            assert_eq!(abi.tag().parse::<Abi>().unwrap(), abi);
        }
        // Registry-style upper case parses too
        assert_eq!("EM64T".parse::<Abi>().unwrap(), Abi::Em64t);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("sparc".parse::<Abi>().is_err());
    }

    #[test]
    fn test_all_iterator() {
        let all: Vec<_> = Abi::all().collect();
        assert_eq!(all.len(), 4);
        assert!(all.contains(&Abi::Ia32));
        assert!(all.contains(&Abi::X86_64));
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Abi::Em64t).unwrap();
        let back: Abi = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Abi::Em64t);
    }
}
