use thiserror::Error;

/// Structural problems found while validating a preferences record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("download temp folder is required")]
    MissingDownloadTempFolder,
    #[error("download folder is required")]
    MissingDownloadFolder,
    #[error("download folder and temp folder must differ")]
    SameDownloadFolders,
    #[error("download file name is required")]
    MissingFileName,
    #[error("download file name '{name}' contains invalid characters")]
    InvalidFileName { name: String },
    #[error("search load limit {value} is out of range")]
    LoadLimitOutOfRange { value: u32 },
    #[error("a channel name is required to search on startup")]
    MissingStartupChannel,
    #[error("favourite channel '{channel}' is listed twice")]
    DuplicateFavourite { channel: String },
    #[error("external player path is empty")]
    InvalidExternalPlayer,
    #[error("theme is required")]
    MissingTheme,
}

/// Boxed cause carried by a [`ServiceError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised by external collaborators.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The preferences store could not read or replace the record.
    #[error("preferences store failed")]
    Store(#[source] BoxError),
    /// The theme could not be applied.
    #[error("theme '{theme}' could not be applied")]
    Theme {
        theme: String,
        #[source]
        source: BoxError,
    },
    /// A dialog or picker could not be shown.
    #[error("dialog failed")]
    Dialog(#[source] BoxError),
}

impl ServiceError {
    pub fn store(source: impl Into<BoxError>) -> Self {
        Self::Store(source.into())
    }

    pub fn theme(
        theme: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Theme {
            theme: theme.into(),
            source: source.into(),
        }
    }

    pub fn dialog(source: impl Into<BoxError>) -> Self {
        Self::Dialog(source.into())
    }
}

/// Errors routed to the error reporter at a command boundary.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{command} failed")]
    Command {
        command: &'static str,
        #[source]
        source: ServiceError,
    },
}

impl SessionError {
    pub(crate) fn command(command: &'static str, source: ServiceError) -> Self {
        Self::Command { command, source }
    }

    /// Return the name of the command that failed.
    pub fn command_name(&self) -> &'static str {
        match self {
            Self::Command { command, .. } => command,
        }
    }
}
