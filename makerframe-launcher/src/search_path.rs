use std::ffi::OsStr;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use crate::system_error::SystemError;

#[cfg(windows)]
pub const SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const SEPARATOR: &str = ":";

/// Access to an environment block. The launcher only ever reads one variable
/// and writes it back once.
pub trait Environment {
    fn var_os(&self, key: &str) -> Option<OsString>;
    fn set_var(&mut self, key: &str, value: &OsStr) -> Result<(), SystemError>;
}

impl<E: Environment + ?Sized> Environment for &mut E {
    fn var_os(&self, key: &str) -> Option<OsString> {
        (**self).var_os(key)
    }

    fn set_var(&mut self, key: &str, value: &OsStr) -> Result<(), SystemError> {
        (**self).set_var(key, value)
    }
}

/// The environment of the running process, inherited by any child spawned
/// after a write.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }

    #[cfg(windows)]
    fn set_var(&mut self, key: &str, value: &OsStr) -> Result<(), SystemError> {
        crate::windows_api::WindowsApi::set_environment_variable(key, value)
    }

    #[cfg(not(windows))]
    fn set_var(&mut self, key: &str, value: &OsStr) -> Result<(), SystemError> {
        // EINVAL; std::env::set_var panics on these instead of failing
        const INVALID_ARGUMENT: i32 = 22;

        if key.is_empty() || key.contains(['=', '\0']) || value.as_encoded_bytes().contains(&0) {
            return Err(SystemError::from_code(INVALID_ARGUMENT));
        }

        // The launcher is single threaded, nothing else reads the environment
        unsafe {
            std::env::set_var(key, value);
        }

        Ok(())
    }
}

/// Builds the new search path: every entry (joined onto `install_dir`) in the
/// given order, followed by the current value when it is non-empty.
#[must_use]
pub fn compose(
    install_dir: &Path,
    entries: &[PathBuf],
    current: Option<&OsStr>,
    separator: &str,
) -> OsString {
    let mut value = OsString::new();

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            value.push(separator);
        }
        value.push(install_dir.join(entry));
    }

    if let Some(current) = current.filter(|current| !current.is_empty()) {
        if !value.is_empty() {
            value.push(separator);
        }
        value.push(current);
    }

    value
}
