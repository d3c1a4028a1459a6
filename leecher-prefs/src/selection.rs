use std::path::{Path, PathBuf};

use crate::command::PreferencesCommand;
use crate::model::Preferences;
use crate::services::{FileFilter, PickerOutcome};

/// Filter used when choosing an external player executable.
pub const PLAYER_FILTER: FileFilter = FileFilter {
    extension: "exe",
    description: "Executables",
};

/// Draft field populated from a folder or file picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathField {
    DownloadTempFolder,
    DownloadFolder,
    ExternalPlayer,
}

/// Picker flavour a [`PathField`] is chosen with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerKind {
    Folder,
    File(FileFilter),
}

impl PathField {
    pub fn picker(self) -> PickerKind {
        match self {
            Self::DownloadTempFolder | Self::DownloadFolder => {
                PickerKind::Folder
            },
            Self::ExternalPlayer => PickerKind::File(PLAYER_FILTER),
        }
    }

    /// Return the current value, used as the picker's initial selection.
    pub fn current(self, preferences: &Preferences) -> Option<PathBuf> {
        let value: Option<&Path> = match self {
            Self::DownloadTempFolder => {
                Some(preferences.download_temp_folder())
            },
            Self::DownloadFolder => Some(preferences.download_folder()),
            Self::ExternalPlayer => preferences.external_player(),
        };
        value.map(Path::to_path_buf)
    }

    /// Write a picker result into the draft. Returns whether the draft
    /// changed; cancelled pickers leave it untouched.
    pub fn apply(
        self,
        preferences: &mut Preferences,
        outcome: PickerOutcome,
    ) -> bool {
        let PickerOutcome::Selected(path) = outcome else {
            return false;
        };

        match self {
            Self::DownloadTempFolder => {
                preferences.set_download_temp_folder(path)
            },
            Self::DownloadFolder => preferences.set_download_folder(path),
            Self::ExternalPlayer => preferences.set_external_player(Some(path)),
        }
        true
    }

    /// Return the command that requests this field's picker.
    pub fn command(self) -> PreferencesCommand {
        match self {
            Self::DownloadTempFolder => {
                PreferencesCommand::ChooseDownloadTempFolder
            },
            Self::DownloadFolder => PreferencesCommand::ChooseDownloadFolder,
            Self::ExternalPlayer => PreferencesCommand::ChooseExternalPlayer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DownloadTempFolder => "download temp folder",
            Self::DownloadFolder => "download folder",
            Self::ExternalPlayer => "external player",
        }
    }
}

/// Switch playback back to the built-in player.
pub fn clear_external_player(preferences: &mut Preferences) -> bool {
    let had_player = preferences.external_player().is_some();
    preferences.set_external_player(None);
    had_player
}
