use crate::config::LauncherConfig;
use crate::install_dir::InstallDir;
use crate::report::Failure;
use crate::report::Notifier;
use crate::report::report_failure;
use crate::search_path;
use crate::search_path::Environment;
use crate::spawn::Spawner;
use crate::system_error::SystemError;

pub const LAUNCHER_NAME: &str = "MakerFrameLauncher";

pub const ENVIRONMENT_ERROR_TITLE: &str = "环境错误 / Environment Error";
pub const LAUNCH_ERROR_TITLE: &str = "启动错误 / Launch Error";
pub const PATH_ERROR_TITLE: &str = "路径错误 / Path Error";
pub const PATH_ERROR_MESSAGE: &str =
    "无法确定启动器所在目录. / Unable to determine the launcher directory.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched { pid: u32 },
    Failed(SystemError),
}

impl LaunchOutcome {
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Launched { .. } => 0,
            Self::Failed(_) => 1,
        }
    }
}

/// Runs one launch against whatever environment, dialog and process spawner it
/// is given.
pub struct Launcher<E, N, S> {
    config: LauncherConfig,
    environment: E,
    notifier: N,
    spawner: S,
}

impl<E, N, S> Launcher<E, N, S>
where
    E: Environment,
    N: Notifier,
    S: Spawner,
{
    pub fn new(config: LauncherConfig, environment: E, notifier: N, spawner: S) -> Self {
        Self {
            config,
            environment,
            notifier,
            spawner,
        }
    }

    #[tracing::instrument(skip_all)]
    pub fn run(&mut self, install_dir: &InstallDir) -> LaunchOutcome {
        tracing::info!(
            "{LAUNCHER_NAME} {} started in {}",
            env!("CARGO_PKG_VERSION"),
            install_dir.path().display()
        );

        self.install_search_path(install_dir);

        let outcome = self.launch(install_dir);
        match outcome {
            LaunchOutcome::Launched { .. } => tracing::info!("launcher exited normally"),
            LaunchOutcome::Failed(_) => tracing::info!(
                "launcher exited abnormally (exit code {})",
                outcome.exit_code()
            ),
        }

        outcome
    }

    /// A failure here is reported but does not stop the launch; the child may
    /// still start, just without its libraries on the search path.
    fn install_search_path(&mut self, install_dir: &InstallDir) {
        let key = self.config.search_path_var.as_str();
        let current = self.environment.var_os(key);
        let value = search_path::compose(
            install_dir.path(),
            &self.config.search_path_entries,
            current.as_deref(),
            &self.config.separator,
        );

        match self.environment.set_var(key, &value) {
            Ok(()) => tracing::info!("{key} updated: {}", value.to_string_lossy()),
            Err(error) => report_failure(
                &self.notifier,
                &Failure::new(
                    ENVIRONMENT_ERROR_TITLE,
                    format!("无法设置 {key} 环境变量. / Unable to set the {key} environment variable."),
                ),
                &error,
            ),
        }
    }

    fn launch(&self, install_dir: &InstallDir) -> LaunchOutcome {
        let companion = self.config.companion.as_str();
        let program = install_dir.companion(companion);

        match self.spawner.spawn_detached(&program, install_dir.path()) {
            Ok(pid) => {
                tracing::info!("started {companion} (PID={pid})");
                LaunchOutcome::Launched { pid }
            }
            Err(error) => {
                report_failure(
                    &self.notifier,
                    &Failure::new(
                        LAUNCH_ERROR_TITLE,
                        format!("无法启动 {companion}. / Unable to start {companion}."),
                    ),
                    &error,
                );
                LaunchOutcome::Failed(error)
            }
        }
    }
}
