use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{ServiceError, SessionError};
use crate::model::Preferences;

/// Owner of the committed preferences record.
pub trait PreferencesStore: Send + Sync {
    /// Return the committed record.
    fn current(&self) -> Arc<Preferences>;

    /// Replace the committed record as a whole.
    fn save(&self, preferences: Preferences) -> Result<(), ServiceError>;

    /// Build a factory-default record without committing it.
    fn create_default(&self) -> Preferences;

    /// Return identifiers of the themes that can be selected.
    fn available_themes(&self) -> Vec<String>;
}

pub trait ThemeApplier: Send + Sync {
    fn apply_theme(&self, theme: &str) -> Result<(), ServiceError>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

pub trait ErrorReporter: Send + Sync {
    /// Log the error and present it to the user.
    fn report_and_show(&self, error: &SessionError);
}

/// Yes/no question shown before a destructive lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub message: &'static str,
    pub title: &'static str,
}

/// Answer to a [`ConfirmRequest`]. Dismissing the dialog counts as `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

/// Result of a folder or file picker request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Cancelled,
    Selected(PathBuf),
}

/// File type restriction passed to the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub extension: &'static str,
    pub description: &'static str,
}

/// Modal dialogs, pickers and the busy indicator.
///
/// Each request future resolves at most once; cancellation is a regular
/// outcome rather than an error.
#[async_trait]
pub trait Dialogs: Send + Sync {
    async fn confirm(
        &self,
        request: ConfirmRequest,
    ) -> Result<Confirmation, ServiceError>;

    async fn pick_folder(
        &self,
        initial: Option<&Path>,
    ) -> Result<PickerOutcome, ServiceError>;

    async fn pick_file(
        &self,
        filter: FileFilter,
        initial: Option<&Path>,
    ) -> Result<PickerOutcome, ServiceError>;

    /// Show a busy indicator until the surface next refreshes.
    fn set_busy(&self);
}

/// Collaborators injected into a preferences session.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn PreferencesStore>,
    pub theme: Arc<dyn ThemeApplier>,
    pub notifier: Arc<dyn Notifier>,
    pub errors: Arc<dyn ErrorReporter>,
    pub dialogs: Arc<dyn Dialogs>,
}
