#![warn(clippy::all)]

pub mod config;
pub mod install_dir;
pub mod launcher;
pub mod logging;
pub mod report;
pub mod search_path;
pub mod spawn;
pub mod system_error;
#[cfg(windows)]
pub mod windows_api;

pub use config::LauncherConfig;
pub use install_dir::InstallDir;
pub use install_dir::InstallDirError;
pub use launcher::LaunchOutcome;
pub use launcher::Launcher;
pub use report::Failure;
pub use report::MessageBox;
pub use report::Notifier;
pub use search_path::Environment;
pub use search_path::ProcessEnvironment;
pub use spawn::ProcessSpawner;
pub use spawn::Spawner;
pub use system_error::SystemError;
