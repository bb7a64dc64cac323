#![warn(clippy::all)]
#![windows_subsystem = "windows"]

use makerframe_launcher::InstallDir;
use makerframe_launcher::LauncherConfig;
use makerframe_launcher::Launcher;
use makerframe_launcher::MessageBox;
use makerframe_launcher::ProcessEnvironment;
use makerframe_launcher::ProcessSpawner;
use makerframe_launcher::launcher::PATH_ERROR_MESSAGE;
use makerframe_launcher::launcher::PATH_ERROR_TITLE;
use makerframe_launcher::logging;
use makerframe_launcher::report::Failure;
use makerframe_launcher::report::report_unlogged;

fn main() {
    let install_dir = match InstallDir::resolve() {
        Ok(install_dir) => install_dir,
        Err(error) => {
            report_unlogged(
                &MessageBox,
                &Failure::new(PATH_ERROR_TITLE, PATH_ERROR_MESSAGE),
                &error,
            );
            std::process::exit(1);
        }
    };

    let config = LauncherConfig::default();

    // Without a logger the launch still goes ahead
    let _ = logging::init(install_dir.log_file(&config.log_file));

    let mut launcher = Launcher::new(config, ProcessEnvironment, MessageBox, ProcessSpawner);
    let outcome = launcher.run(&install_dir);

    std::process::exit(outcome.exit_code());
}
