//! Terminal-backed collaborators for a preferences session.

use std::error::Error as _;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use leecher_prefs::{
    ConfirmRequest, Confirmation, Dialogs, ErrorReporter, FileFilter,
    Notifier, PickerOutcome, ServiceError, SessionError, ThemeApplier,
};

use thiserror::Error;

use crate::store::THEMES;

/// Read one trimmed line from stdin off the runtime thread. Returns `None`
/// once stdin is closed.
pub(crate) async fn read_line(prompt: String) -> io::Result<Option<String>> {
    tokio::task::spawn_blocking(move || {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok((read > 0).then(|| line.trim().to_string()))
    })
    .await
    .map_err(io::Error::other)?
}

/// Confirmation prompts and path pickers answered on the terminal.
#[derive(Debug, Default)]
pub(crate) struct ConsoleDialogs;

impl ConsoleDialogs {
    async fn pick_path(
        &self,
        kind: &str,
        initial: Option<&Path>,
    ) -> Result<PickerOutcome, ServiceError> {
        let current = initial
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        let prompt = format!("{kind} [{current}] (empty to cancel): ");

        match read_line(prompt).await.map_err(ServiceError::dialog)? {
            Some(line) if !line.is_empty() => {
                Ok(PickerOutcome::Selected(PathBuf::from(line)))
            },
            _ => Ok(PickerOutcome::Cancelled),
        }
    }
}

#[async_trait]
impl Dialogs for ConsoleDialogs {
    async fn confirm(
        &self,
        request: ConfirmRequest,
    ) -> Result<Confirmation, ServiceError> {
        let prompt = format!("{}: {} [y/N] ", request.title, request.message);
        let answer = read_line(prompt).await.map_err(ServiceError::dialog)?;

        match answer.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("y" | "yes") => Ok(Confirmation::Yes),
            _ => Ok(Confirmation::No),
        }
    }

    async fn pick_folder(
        &self,
        initial: Option<&Path>,
    ) -> Result<PickerOutcome, ServiceError> {
        self.pick_path("folder", initial).await
    }

    async fn pick_file(
        &self,
        filter: FileFilter,
        initial: Option<&Path>,
    ) -> Result<PickerOutcome, ServiceError> {
        let kind = format!("{} (*.{})", filter.description, filter.extension);
        self.pick_path(&kind, initial).await
    }

    fn set_busy(&self) {
        log::debug!("busy");
    }
}

#[derive(Debug, Default)]
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("* {message}");
    }
}

#[derive(Debug, Default)]
pub(crate) struct LogErrorReporter;

impl ErrorReporter for LogErrorReporter {
    fn report_and_show(&self, error: &SessionError) {
        log::error!("{error}");

        eprintln!("error: {error}");
        let mut source = error.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
    }
}

#[derive(Debug, Error)]
#[error("not one of the shipped themes ({})", THEMES.join(", "))]
pub(crate) struct UnknownTheme;

/// Applies themes by name; only shipped themes are accepted.
#[derive(Debug, Default)]
pub(crate) struct ConsoleTheme;

impl ThemeApplier for ConsoleTheme {
    fn apply_theme(&self, theme: &str) -> Result<(), ServiceError> {
        if !THEMES.contains(&theme) {
            return Err(ServiceError::theme(theme, UnknownTheme));
        }

        log::info!("theme '{theme}' applied");
        Ok(())
    }
}
