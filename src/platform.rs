//! Host platform family selection.

/// The platform family a locator operates on.
///
/// Passed explicitly to [`CompilerLocator`](crate::CompilerLocator)
/// rather than read from process-global state, so discovery logic for
/// either platform can be exercised from tests on any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Windows family: registry-driven discovery.
    Windows,
    /// Linux family: filesystem-glob-driven discovery.
    Linux,
    /// Anything else. Configuration on an unsupported platform is a
    /// no-op, not an error.
    Unsupported,
}

impl Platform {
    /// The platform family of the running process.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Unsupported
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_matches_cfg() {
        let platform = Platform::current();
        #[cfg(target_os = "linux")]
        assert_eq!(platform, Platform::Linux);
        #[cfg(windows)]
        assert_eq!(platform, Platform::Windows);
        #[cfg(not(any(target_os = "linux", windows)))]
        assert_eq!(platform, Platform::Unsupported);
    }
}
