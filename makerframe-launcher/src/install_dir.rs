use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::system_error::SystemError;

/// Longest executable path accepted, in bytes. Matches the limit on extended
/// length paths.
pub const MAX_INSTALL_PATH_LEN: usize = 32_767;

#[derive(Debug, thiserror::Error)]
pub enum InstallDirError {
    #[error("{}", SystemError::from_io(.0))]
    CurrentExe(#[source] io::Error),
    #[error("executable path is {0} bytes long, the limit is {max}", max = MAX_INSTALL_PATH_LEN)]
    TooLong(usize),
    #[error("executable path '{}' has no parent directory", .0.display())]
    NoParent(PathBuf),
}

/// The directory containing the running launcher. Everything the launcher
/// touches is anchored here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallDir(PathBuf);

impl InstallDir {
    pub fn resolve() -> Result<Self, InstallDirError> {
        let exe = std::env::current_exe().map_err(InstallDirError::CurrentExe)?;
        Self::from_exe_path(&exe)
    }

    /// Symlinks and aliases are resolved first, so every way of reaching the
    /// same binary yields the same directory.
    pub fn from_exe_path(exe: &Path) -> Result<Self, InstallDirError> {
        let exe = dunce::canonicalize(exe).unwrap_or_else(|_| exe.to_path_buf());

        let len = exe.as_os_str().len();
        if len > MAX_INSTALL_PATH_LEN {
            return Err(InstallDirError::TooLong(len));
        }

        match exe.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(Self(parent.to_path_buf())),
            _ => Err(InstallDirError::NoParent(exe)),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    #[must_use]
    pub fn companion(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    #[must_use]
    pub fn log_file(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}
