use std::path::PathBuf;

use crate::search_path;

pub const COMPANION_EXE: &str = "MakerFrame.exe";
pub const LOG_FILE_NAME: &str = "launcher.log";
pub const SEARCH_PATH_VAR: &str = "PATH";

/// Directories prepended to the search path, relative to the install
/// directory, in the order they should be searched.
pub const SEARCH_PATH_ENTRIES: &[&[&str]] = &[&["bin", "MingW"], &["bin", "Qt5", "bin"], &["bin"]];

/// Fixed settings for a launch. There is no configuration file; everything
/// here is a literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LauncherConfig {
    pub companion: String,
    pub log_file: String,
    pub search_path_var: String,
    pub search_path_entries: Vec<PathBuf>,
    pub separator: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            companion: String::from(COMPANION_EXE),
            log_file: String::from(LOG_FILE_NAME),
            search_path_var: String::from(SEARCH_PATH_VAR),
            search_path_entries: SEARCH_PATH_ENTRIES
                .iter()
                .map(|components| components.iter().collect::<PathBuf>())
                .collect(),
            separator: String::from(search_path::SEPARATOR),
        }
    }
}
