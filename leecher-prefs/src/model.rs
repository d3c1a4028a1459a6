use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

const DEFAULT_THEME: &str = "Dark";
const DEFAULT_FILE_NAME: &str = "{date}_{id}_{game}.mp4";
const DEFAULT_LOAD_LIMIT: u32 = 10;
const APP_FOLDER: &str = "TwitchLeecher";

/// Inclusive bounds for the number of videos loaded per search.
pub const LOAD_LIMIT_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

const FORBIDDEN_FILE_NAME_CHARS: [char; 9] =
    ['<', '>', ':', '"', '|', '?', '*', '/', '\\'];

/// Application preferences record.
///
/// The committed copy is owned by a [`crate::PreferencesStore`]; editing
/// sessions work on a deep clone of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    app_check_for_updates: bool,
    app_show_donation_button: bool,
    theme: String,
    search_channel_name: Option<String>,
    search_favourite_channels: Vec<String>,
    search_load_limit: u32,
    search_on_startup: bool,
    download_temp_folder: PathBuf,
    download_folder: PathBuf,
    download_file_name: String,
    download_subfolders_for_favourites: bool,
    download_remove_completed: bool,
    misc_external_player: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            app_check_for_updates: true,
            app_show_donation_button: true,
            theme: String::from(DEFAULT_THEME),
            search_channel_name: None,
            search_favourite_channels: Vec::new(),
            search_load_limit: DEFAULT_LOAD_LIMIT,
            search_on_startup: false,
            download_temp_folder: std::env::temp_dir().join(APP_FOLDER),
            download_folder: default_download_folder(),
            download_file_name: String::from(DEFAULT_FILE_NAME),
            download_subfolders_for_favourites: false,
            download_remove_completed: false,
            misc_external_player: None,
        }
    }
}

impl Preferences {
    /// Return whether the application checks for updates on startup.
    pub fn app_check_for_updates(&self) -> bool {
        self.app_check_for_updates
    }

    /// Enable or disable the startup update check.
    pub fn set_app_check_for_updates(&mut self, value: bool) {
        self.app_check_for_updates = value;
    }

    /// Return whether the donation button is shown.
    pub fn app_show_donation_button(&self) -> bool {
        self.app_show_donation_button
    }

    /// Show or hide the donation button.
    pub fn set_app_show_donation_button(&mut self, value: bool) {
        self.app_show_donation_button = value;
    }

    /// Return the identifier of the selected visual theme.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Select the visual theme by identifier.
    pub fn set_theme(&mut self, value: impl Into<String>) {
        self.theme = value.into();
    }

    /// Return the channel name currently typed or selected in search.
    pub fn search_channel_name(&self) -> Option<&str> {
        self.search_channel_name.as_deref()
    }

    /// Replace the search channel; `None` clears it.
    pub fn set_search_channel_name(&mut self, value: Option<String>) {
        self.search_channel_name = value;
    }

    /// Return favourite channels in insertion order.
    pub fn favourite_channels(&self) -> &[String] {
        &self.search_favourite_channels
    }

    /// Return favourite channels for in-place edits.
    pub(crate) fn favourite_channels_mut(&mut self) -> &mut Vec<String> {
        &mut self.search_favourite_channels
    }

    /// Return how many videos a search loads.
    pub fn search_load_limit(&self) -> u32 {
        self.search_load_limit
    }

    /// Update the search load limit. Range is checked by `validate`.
    pub fn set_search_load_limit(&mut self, value: u32) {
        self.search_load_limit = value;
    }

    /// Return whether a search runs when the application starts.
    pub fn search_on_startup(&self) -> bool {
        self.search_on_startup
    }

    /// Enable or disable the startup search.
    pub fn set_search_on_startup(&mut self, value: bool) {
        self.search_on_startup = value;
    }

    /// Return the folder used for in-progress downloads.
    pub fn download_temp_folder(&self) -> &Path {
        &self.download_temp_folder
    }

    /// Update the folder used for in-progress downloads.
    pub fn set_download_temp_folder(&mut self, value: PathBuf) {
        self.download_temp_folder = value;
    }

    /// Return the folder finished downloads are moved to.
    pub fn download_folder(&self) -> &Path {
        &self.download_folder
    }

    /// Update the folder finished downloads are moved to.
    pub fn set_download_folder(&mut self, value: PathBuf) {
        self.download_folder = value;
    }

    /// Return the file name template for downloaded videos.
    pub fn download_file_name(&self) -> &str {
        &self.download_file_name
    }

    /// Update the file name template for downloaded videos.
    pub fn set_download_file_name(&mut self, value: impl Into<String>) {
        self.download_file_name = value.into();
    }

    /// Return whether favourite channels get their own download subfolder.
    pub fn download_subfolders_for_favourites(&self) -> bool {
        self.download_subfolders_for_favourites
    }

    /// Enable or disable per-favourite download subfolders.
    pub fn set_download_subfolders_for_favourites(&mut self, value: bool) {
        self.download_subfolders_for_favourites = value;
    }

    /// Return whether completed downloads are removed from the queue.
    pub fn download_remove_completed(&self) -> bool {
        self.download_remove_completed
    }

    /// Enable or disable removal of completed downloads.
    pub fn set_download_remove_completed(&mut self, value: bool) {
        self.download_remove_completed = value;
    }

    /// Return the external player, `None` meaning built-in playback.
    pub fn external_player(&self) -> Option<&Path> {
        self.misc_external_player.as_deref()
    }

    /// Update the external player; `None` restores built-in playback.
    pub fn set_external_player(&mut self, value: Option<PathBuf>) {
        self.misc_external_player = value;
    }

    /// Check the record for structural errors. An empty result means the
    /// record may be committed.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if is_blank_path(&self.download_temp_folder) {
            errors.push(ValidationError::MissingDownloadTempFolder);
        }

        if is_blank_path(&self.download_folder) {
            errors.push(ValidationError::MissingDownloadFolder);
        } else if self.download_folder == self.download_temp_folder {
            errors.push(ValidationError::SameDownloadFolders);
        }

        if is_blank(&self.download_file_name) {
            errors.push(ValidationError::MissingFileName);
        } else if self
            .download_file_name
            .contains(FORBIDDEN_FILE_NAME_CHARS.as_slice())
        {
            errors.push(ValidationError::InvalidFileName {
                name: self.download_file_name.clone(),
            });
        }

        if !LOAD_LIMIT_RANGE.contains(&self.search_load_limit) {
            errors.push(ValidationError::LoadLimitOutOfRange {
                value: self.search_load_limit,
            });
        }

        if self.search_on_startup
            && self.search_channel_name.as_deref().is_none_or(is_blank)
        {
            errors.push(ValidationError::MissingStartupChannel);
        }

        if let Some(channel) = first_duplicate(&self.search_favourite_channels)
        {
            errors.push(ValidationError::DuplicateFavourite {
                channel: channel.to_string(),
            });
        }

        if self.misc_external_player.as_deref().is_some_and(is_blank_path) {
            errors.push(ValidationError::InvalidExternalPlayer);
        }

        if is_blank(&self.theme) {
            errors.push(ValidationError::MissingTheme);
        }

        errors
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Compare channel names ignoring case. Each character is folded with its
/// full lowercase mapping, so `ß` and `ẞ` match.
pub(crate) fn same_channel(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}

fn is_blank_path(path: &Path) -> bool {
    path.to_str().is_some_and(is_blank)
}

fn first_duplicate(channels: &[String]) -> Option<&str> {
    channels.iter().enumerate().find_map(|(index, channel)| {
        channels[..index]
            .iter()
            .any(|earlier| same_channel(earlier, channel))
            .then_some(channel.as_str())
    })
}

fn default_download_folder() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home).join("Videos").join(APP_FOLDER);
    }

    std::env::temp_dir().join(APP_FOLDER).join("Downloads")
}
