use std::ffi::OsStr;
use std::path::Path;

use windows::core::Result as WindowsCrateResult;
use windows::core::HSTRING;
use windows::core::PWSTR;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::Foundation::HANDLE;
use windows::Win32::System::Diagnostics::Debug::FormatMessageW;
use windows::Win32::System::Diagnostics::Debug::FORMAT_MESSAGE_FROM_SYSTEM;
use windows::Win32::System::Diagnostics::Debug::FORMAT_MESSAGE_IGNORE_INSERTS;
use windows::Win32::System::Environment::SetEnvironmentVariableW;
use windows::Win32::System::Threading::CreateProcessW;
use windows::Win32::System::Threading::PROCESS_CREATION_FLAGS;
use windows::Win32::System::Threading::PROCESS_INFORMATION;
use windows::Win32::System::Threading::STARTUPINFOW;
use windows::Win32::UI::WindowsAndMessaging::MessageBoxW;
use windows::Win32::UI::WindowsAndMessaging::MB_ICONERROR;
use windows::Win32::UI::WindowsAndMessaging::MB_OK;

use crate::system_error::SystemError;

// MAKELANGID(LANG_NEUTRAL, SUBLANG_DEFAULT)
const LANG_USER_DEFAULT: u32 = 0x0400;
// FormatMessageW never writes more than 64K bytes into a caller buffer
const MESSAGE_BUFFER_LEN: usize = 32 * 1024;

pub trait ProcessWindowsCrateResult<T> {
    fn process(self) -> Result<T, SystemError>;
}

impl<T> ProcessWindowsCrateResult<T> for WindowsCrateResult<T> {
    fn process(self) -> Result<T, SystemError> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(error.into()),
        }
    }
}

pub struct WindowsApi;

impl WindowsApi {
    /// Blocks until the user dismisses the dialog.
    pub fn message_box_error(title: &str, message: &str) {
        unsafe {
            MessageBoxW(
                None,
                &HSTRING::from(message),
                &HSTRING::from(title),
                MB_ICONERROR | MB_OK,
            );
        }
    }

    /// The buffer covers the largest message the system table can produce.
    pub fn format_message(code: u32) -> Option<String> {
        let mut buffer = vec![0u16; MESSAGE_BUFFER_LEN];

        let len = unsafe {
            FormatMessageW(
                FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
                None,
                code,
                LANG_USER_DEFAULT,
                PWSTR(buffer.as_mut_ptr()),
                MESSAGE_BUFFER_LEN as u32,
                None,
            )
        };

        match len {
            0 => None,
            len => Some(String::from_utf16_lossy(
                &buffer[..(len as usize).min(MESSAGE_BUFFER_LEN)],
            )),
        }
    }

    pub fn set_environment_variable(name: &str, value: &OsStr) -> Result<(), SystemError> {
        unsafe { SetEnvironmentVariableW(&HSTRING::from(name), &HSTRING::from(value)) }.process()
    }

    /// Starts `program` with no arguments, no inherited handles and default
    /// creation flags, then closes the returned process and thread handles.
    /// The child inherits the current environment block.
    pub fn create_process(program: &Path, working_dir: &Path) -> Result<u32, SystemError> {
        let startup_info = STARTUPINFOW {
            cb: std::mem::size_of::<STARTUPINFOW>() as u32,
            ..Default::default()
        };
        let mut process_information = PROCESS_INFORMATION::default();

        unsafe {
            CreateProcessW(
                &HSTRING::from(program),
                None,
                None,
                None,
                false,
                PROCESS_CREATION_FLAGS(0),
                None,
                &HSTRING::from(working_dir),
                &startup_info,
                &mut process_information,
            )
        }
        .process()?;

        Self::close_handle(process_information.hProcess);
        Self::close_handle(process_information.hThread);

        Ok(process_information.dwProcessId)
    }

    fn close_handle(handle: HANDLE) {
        if let Err(error) = unsafe { CloseHandle(handle) } {
            tracing::debug!("could not close handle: {error}");
        }
    }
}
