//! Registry reads for [`SystemHost`](super::SystemHost).
//!
//! All lookups are read-only and rooted at HKEY_LOCAL_MACHINE. Off
//! Windows there is no registry; every call reports
//! [`LookupError::RegistryUnavailable`] and the callers fall back to
//! filesystem discovery or their own error handling.

use crate::LookupError;

#[cfg(windows)]
pub(super) fn value(key: &str, name: &str) -> Result<String, LookupError> {
    use winreg::enums::HKEY_LOCAL_MACHINE;
    use winreg::RegKey;

    let missing = || LookupError::MissingRegistry {
        key: key.to_string(),
        name: name.to_string(),
    };
    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let subkey = hklm.open_subkey(key).map_err(|_| missing())?;
    subkey.get_value::<String, _>(name).map_err(|_| missing())
}

#[cfg(windows)]
pub(super) fn subkeys(key: &str) -> Result<Vec<String>, LookupError> {
    use winreg::enums::HKEY_LOCAL_MACHINE;
    use winreg::RegKey;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    match hklm.open_subkey(key) {
        Ok(subkey) => Ok(subkey.enum_keys().filter_map(Result::ok).collect()),
        // An absent key has no subkeys.
        Err(_) => Ok(Vec::new()),
    }
}

#[cfg(not(windows))]
pub(super) fn value(_key: &str, _name: &str) -> Result<String, LookupError> {
    Err(LookupError::RegistryUnavailable)
}

#[cfg(not(windows))]
pub(super) fn subkeys(_key: &str) -> Result<Vec<String>, LookupError> {
    Err(LookupError::RegistryUnavailable)
}
