use std::fmt::Display;

use crate::system_error::SystemError;

/// Something that can put an error in front of the user and wait for them to
/// acknowledge it.
pub trait Notifier {
    fn show_error(&self, title: &str, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn show_error(&self, title: &str, message: &str) {
        (**self).show_error(title, message);
    }
}

/// Modal error dialog. Off Windows there is no dialog, so the text goes to
/// stderr instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct MessageBox;

impl Notifier for MessageBox {
    #[cfg(windows)]
    fn show_error(&self, title: &str, message: &str) {
        crate::windows_api::WindowsApi::message_box_error(title, message);
    }

    #[cfg(not(windows))]
    fn show_error(&self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }
}

/// A dialog title plus a one-line summary of what failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub title: String,
    pub message: String,
}

impl Failure {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    fn dialog_text(&self, detail: &str) -> String {
        format!("{}\n\n{detail}", self.message)
    }
}

/// Shows the failure to the user and records it in the log as two `ERROR`
/// lines: the summary, then the system's description of `error`.
pub fn report_failure(notifier: &impl Notifier, failure: &Failure, error: &SystemError) {
    let description = error.description();

    tracing::error!("{}", failure.message);
    tracing::error!("{description} (code {})", error.code());

    notifier.show_error(&failure.title, &failure.dialog_text(&description));
}

/// Dialog only. For the one failure that can happen before there is anywhere
/// to log to.
pub fn report_unlogged(notifier: &impl Notifier, failure: &Failure, detail: &impl Display) {
    notifier.show_error(&failure.title, &failure.dialog_text(&detail.to_string()));
}
