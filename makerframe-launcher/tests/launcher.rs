#[cfg(test)]
mod launcher_tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::ffi::OsStr;
    use std::ffi::OsString;
    use std::path::PathBuf;

    use makerframe_launcher::Environment;
    use makerframe_launcher::InstallDir;
    use makerframe_launcher::LaunchOutcome;
    use makerframe_launcher::Launcher;
    use makerframe_launcher::LauncherConfig;
    use makerframe_launcher::Notifier;
    use makerframe_launcher::ProcessSpawner;
    use makerframe_launcher::Spawner;
    use makerframe_launcher::SystemError;
    use makerframe_launcher::launcher::ENVIRONMENT_ERROR_TITLE;
    use makerframe_launcher::launcher::LAUNCH_ERROR_TITLE;
    use makerframe_launcher::logging;
    use makerframe_launcher::search_path;
    use uuid::Uuid;

    // ERROR_NOT_ENOUGH_MEMORY on Windows, ENOEXEC elsewhere; any non-zero code will do
    const WRITE_FAILURE: i32 = 8;

    #[derive(Default)]
    struct FakeEnvironment {
        vars: HashMap<String, OsString>,
        fail_writes: bool,
    }

    impl FakeEnvironment {
        fn with_var(key: &str, value: &str) -> Self {
            let mut vars = HashMap::new();
            vars.insert(key.to_string(), OsString::from(value));
            Self {
                vars,
                fail_writes: false,
            }
        }
    }

    impl Environment for FakeEnvironment {
        fn var_os(&self, key: &str) -> Option<OsString> {
            self.vars.get(key).cloned()
        }

        fn set_var(&mut self, key: &str, value: &OsStr) -> Result<(), SystemError> {
            if self.fail_writes {
                return Err(SystemError::from_code(WRITE_FAILURE));
            }

            self.vars.insert(key.to_string(), value.to_os_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        shown: RefCell<Vec<(String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn show_error(&self, title: &str, message: &str) {
            self.shown
                .borrow_mut()
                .push((title.to_string(), message.to_string()));
        }
    }

    struct FakeSpawner {
        pid: u32,
        calls: RefCell<Vec<(PathBuf, PathBuf)>>,
    }

    impl FakeSpawner {
        fn new(pid: u32) -> Self {
            Self {
                pid,
                calls: RefCell::new(vec![]),
            }
        }
    }

    impl Spawner for FakeSpawner {
        fn spawn_detached(
            &self,
            program: &std::path::Path,
            working_dir: &std::path::Path,
        ) -> Result<u32, SystemError> {
            self.calls
                .borrow_mut()
                .push((program.to_path_buf(), working_dir.to_path_buf()));
            Ok(self.pid)
        }
    }

    struct Scratch {
        dir: PathBuf,
        install_dir: InstallDir,
        log: PathBuf,
    }

    impl Scratch {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("makerframe-launcher-test-{}", Uuid::new_v4()));
            std::fs::create_dir_all(&dir).unwrap();
            let install_dir =
                InstallDir::from_exe_path(&dir.join("MakerFrameLauncher.exe")).unwrap();
            let log = install_dir.log_file("launcher.log");

            Self {
                dir,
                install_dir,
                log,
            }
        }

        fn run<E, N, S>(&self, launcher: &mut Launcher<E, N, S>) -> LaunchOutcome
        where
            E: Environment,
            N: Notifier,
            S: Spawner,
        {
            tracing::subscriber::with_default(logging::subscriber(self.log.clone()), || {
                launcher.run(&self.install_dir)
            })
        }

        fn log_lines(&self) -> Vec<String> {
            std::fs::read_to_string(&self.log)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }

        fn error_lines(&self) -> usize {
            self.log_lines()
                .iter()
                .filter(|line| line.contains(" [ERROR] "))
                .count()
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    fn expected_search_path(scratch: &Scratch, current: Option<&str>) -> OsString {
        let config = LauncherConfig::default();
        search_path::compose(
            scratch.install_dir.path(),
            &config.search_path_entries,
            current.map(OsStr::new),
            &config.separator,
        )
    }

    #[test]
    fn test_launch_prepends_search_path_and_logs_pid() {
        let scratch = Scratch::new();
        let mut environment = FakeEnvironment::with_var("PATH", "/usr/local/bin");
        let notifier = RecordingNotifier::default();
        let spawner = FakeSpawner::new(4242);

        let mut launcher = Launcher::new(
            LauncherConfig::default(),
            &mut environment,
            &notifier,
            &spawner,
        );
        let outcome = scratch.run(&mut launcher);

        assert_eq!(outcome, LaunchOutcome::Launched { pid: 4242 });
        assert_eq!(outcome.exit_code(), 0);
        assert!(notifier.shown.borrow().is_empty());

        let path = environment.var_os("PATH").unwrap();
        assert_eq!(path, expected_search_path(&scratch, Some("/usr/local/bin")));
        assert!(path.to_string_lossy().ends_with("/usr/local/bin"));

        assert_eq!(
            spawner.calls.borrow().as_slice(),
            &[(
                scratch.install_dir.companion("MakerFrame.exe"),
                scratch.install_dir.path().to_path_buf()
            )]
        );

        let lines = scratch.log_lines();
        let pid_line = lines
            .iter()
            .find(|line| line.contains(" [INFO] started MakerFrame.exe (PID="))
            .unwrap();
        let pid = pid_line
            .rsplit("PID=")
            .next()
            .unwrap()
            .trim_end_matches(')')
            .parse::<u32>()
            .unwrap();
        assert!(pid > 0);
        assert_eq!(scratch.error_lines(), 0);
        assert!(lines.last().unwrap().ends_with("launcher exited normally"));
    }

    #[test]
    fn test_every_run_records_pid_and_exit_lines() {
        // the launcher takes its log level from no variable at all
        unsafe {
            std::env::set_var("RUST_LOG", "off");
        }

        let scratch = Scratch::new();
        let mut environment = FakeEnvironment::default();
        let notifier = RecordingNotifier::default();
        let spawner = FakeSpawner::new(77);

        let mut launcher = Launcher::new(
            LauncherConfig::default(),
            &mut environment,
            &notifier,
            &spawner,
        );
        let outcome = scratch.run(&mut launcher);
        assert_eq!(outcome, LaunchOutcome::Launched { pid: 77 });

        let lines = scratch.log_lines();
        assert!(
            lines
                .iter()
                .any(|line| line.ends_with(" [INFO] started MakerFrame.exe (PID=77)"))
        );
        assert!(lines.last().unwrap().ends_with(" [INFO] launcher exited normally"));
    }

    #[test]
    fn test_missing_search_path_yields_fixed_entries_only() {
        let scratch = Scratch::new();
        let mut environment = FakeEnvironment::default();
        let notifier = RecordingNotifier::default();
        let spawner = FakeSpawner::new(1);

        let mut launcher = Launcher::new(
            LauncherConfig::default(),
            &mut environment,
            &notifier,
            &spawner,
        );
        scratch.run(&mut launcher);

        assert_eq!(
            environment.var_os("PATH").unwrap(),
            expected_search_path(&scratch, None)
        );
    }

    #[test]
    fn test_missing_companion_is_fatal() {
        let scratch = Scratch::new();
        let mut environment = FakeEnvironment::with_var("PATH", "/usr/bin");
        let notifier = RecordingNotifier::default();

        let mut launcher = Launcher::new(
            LauncherConfig::default(),
            &mut environment,
            &notifier,
            ProcessSpawner,
        );
        let outcome = scratch.run(&mut launcher);

        assert!(matches!(outcome, LaunchOutcome::Failed(_)));
        assert_eq!(outcome.exit_code(), 1);

        let shown = notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, LAUNCH_ERROR_TITLE);
        assert!(shown[0].1.contains("MakerFrame.exe"));

        assert_eq!(scratch.error_lines(), 2);
        assert!(
            scratch
                .log_lines()
                .last()
                .unwrap()
                .contains("launcher exited abnormally")
        );
    }

    #[test]
    fn test_search_path_failure_is_not_fatal() {
        let scratch = Scratch::new();
        let mut environment = FakeEnvironment::with_var("PATH", "/usr/bin");
        environment.fail_writes = true;
        let notifier = RecordingNotifier::default();
        let spawner = FakeSpawner::new(99);

        let mut launcher = Launcher::new(
            LauncherConfig::default(),
            &mut environment,
            &notifier,
            &spawner,
        );
        let outcome = scratch.run(&mut launcher);

        assert_eq!(outcome, LaunchOutcome::Launched { pid: 99 });
        assert_eq!(spawner.calls.borrow().len(), 1);
        assert_eq!(environment.var_os("PATH"), Some(OsString::from("/usr/bin")));

        let shown = notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, ENVIRONMENT_ERROR_TITLE);
        assert_eq!(scratch.error_lines(), 2);
    }

    #[test]
    fn test_log_is_appended_across_runs() {
        let scratch = Scratch::new();
        let notifier = RecordingNotifier::default();
        let spawner = FakeSpawner::new(5);

        let mut first = FakeEnvironment::default();
        scratch.run(&mut Launcher::new(
            LauncherConfig::default(),
            &mut first,
            &notifier,
            &spawner,
        ));
        let after_first = scratch.log_lines();
        assert!(!after_first.is_empty());

        let mut second = FakeEnvironment::default();
        scratch.run(&mut Launcher::new(
            LauncherConfig::default(),
            &mut second,
            &notifier,
            &spawner,
        ));
        let after_second = scratch.log_lines();

        assert_eq!(after_second.len(), after_first.len() * 2);
        assert_eq!(&after_second[..after_first.len()], after_first.as_slice());
    }

    #[cfg(windows)]
    #[test]
    fn test_install_dir_scenario() {
        let scratch = Scratch::new();
        let install_dir =
            InstallDir::from_exe_path(std::path::Path::new(r"C:\App\MakerFrameLauncher.exe"))
                .unwrap();
        let mut environment = FakeEnvironment::with_var("PATH", r"C:\Other");
        let notifier = RecordingNotifier::default();
        let spawner = FakeSpawner::new(1234);

        let mut launcher = Launcher::new(
            LauncherConfig::default(),
            &mut environment,
            &notifier,
            &spawner,
        );
        let outcome = tracing::subscriber::with_default(
            logging::subscriber(scratch.log.clone()),
            || launcher.run(&install_dir),
        );

        assert_eq!(outcome.exit_code(), 0);
        assert!(
            environment
                .var_os("PATH")
                .unwrap()
                .to_string_lossy()
                .starts_with(r"C:\App\bin\MingW;C:\App\bin\Qt5\bin;C:\App\bin;C:\Other")
        );
        assert_eq!(
            spawner.calls.borrow()[0].0,
            PathBuf::from(r"C:\App\MakerFrame.exe")
        );
    }
}
