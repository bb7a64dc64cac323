use std::path::Path;

use crate::system_error::SystemError;

/// Starts a program without waiting for it. Implementations return the new
/// process id and must not keep any handle to the child.
pub trait Spawner {
    fn spawn_detached(&self, program: &Path, working_dir: &Path) -> Result<u32, SystemError>;
}

impl<S: Spawner + ?Sized> Spawner for &S {
    fn spawn_detached(&self, program: &Path, working_dir: &Path) -> Result<u32, SystemError> {
        (**self).spawn_detached(program, working_dir)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    #[cfg(windows)]
    fn spawn_detached(&self, program: &Path, working_dir: &Path) -> Result<u32, SystemError> {
        crate::windows_api::WindowsApi::create_process(program, working_dir)
    }

    #[cfg(not(windows))]
    fn spawn_detached(&self, program: &Path, working_dir: &Path) -> Result<u32, SystemError> {
        use std::process::Command;
        use std::process::Stdio;

        let child = Command::new(program)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(SystemError::from)?;

        // dropping the handle neither waits for nor kills the child
        Ok(child.id())
    }
}
