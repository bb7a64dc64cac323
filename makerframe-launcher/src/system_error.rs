use std::io;

/// Shown in place of the system description when the lookup yields nothing.
pub const DESCRIPTION_UNAVAILABLE: &str = "无法取得错误信息。 / error text unavailable";

/// A platform error code, as left behind by a failed OS call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.description())]
pub struct SystemError {
    code: i32,
}

impl SystemError {
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self { code }
    }

    /// The calling thread's last error (`GetLastError` on Windows, `errno`
    /// elsewhere).
    #[must_use]
    pub fn last() -> Self {
        Self::from_io(&io::Error::last_os_error())
    }

    #[must_use]
    pub fn from_io(error: &io::Error) -> Self {
        Self::from_code(error.raw_os_error().unwrap_or_default())
    }

    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Human-readable text for this code from the OS message table.
    #[must_use]
    pub fn description(&self) -> String {
        describe(system_message(self.code))
    }
}

impl From<io::Error> for SystemError {
    fn from(error: io::Error) -> Self {
        Self::from_io(&error)
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for SystemError {
    fn from(error: windows::core::Error) -> Self {
        // HRESULT_FROM_WIN32 wraps a Win32 code as 0x8007xxxx
        let hresult = error.code().0 as u32;
        let code = if hresult & 0xFFFF_0000 == 0x8007_0000 {
            hresult & 0xFFFF
        } else {
            hresult
        };

        Self::from_code(code as i32)
    }
}

/// Strip trailing line breaks and whitespace from a looked-up message,
/// substituting the placeholder when there is nothing left.
#[must_use]
pub fn describe(message: Option<String>) -> String {
    match message {
        Some(message) if !message.trim_end().is_empty() => message.trim_end().to_string(),
        _ => String::from(DESCRIPTION_UNAVAILABLE),
    }
}

#[cfg(windows)]
fn system_message(code: i32) -> Option<String> {
    crate::windows_api::WindowsApi::format_message(code as u32)
}

#[cfg(not(windows))]
fn system_message(code: i32) -> Option<String> {
    let message = io::Error::from_raw_os_error(code).to_string();
    let suffix = format!(" (os error {code})");

    Some(message.strip_suffix(&suffix).unwrap_or(&message).to_string())
}
