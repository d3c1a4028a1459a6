//! Favourite channel list edits.
//!
//! The list behaves as a set under case-insensitive comparison. The casing
//! of the first inserted entry is kept and pushed back into the search box
//! when the same channel is added again with different casing.

use crate::model::{Preferences, is_blank, same_channel};

/// Effect of a favourites edit on the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavouriteChange {
    /// The channel was appended verbatim.
    Added(String),
    /// The channel already existed; the search box now shows the stored
    /// casing. Carries the name as it was typed.
    AlreadyPresent(String),
    /// The matching entry was removed. Carries the name as it was typed.
    Removed(String),
    /// Nothing to do: blank search box or unknown channel.
    Unchanged,
}

impl FavouriteChange {
    /// Return the user-visible notification for this change, if any.
    pub fn notification(&self) -> Option<String> {
        match self {
            Self::Added(channel) | Self::AlreadyPresent(channel) => {
                Some(format!("'{channel}' added!"))
            },
            Self::Removed(channel) => Some(format!("'{channel}' removed!")),
            Self::Unchanged => None,
        }
    }
}

/// Add the current search channel to the favourites.
pub fn add_favourite(preferences: &mut Preferences) -> FavouriteChange {
    let Some(current) = current_channel(preferences) else {
        return FavouriteChange::Unchanged;
    };

    match find_channel(preferences.favourite_channels(), &current) {
        Some(index) => {
            let existing = preferences.favourite_channels()[index].clone();
            preferences.set_search_channel_name(Some(existing));
            FavouriteChange::AlreadyPresent(current)
        },
        None => {
            preferences.favourite_channels_mut().push(current.clone());
            FavouriteChange::Added(current)
        },
    }
}

/// Remove the current search channel from the favourites and select the
/// first remaining entry.
pub fn remove_favourite(preferences: &mut Preferences) -> FavouriteChange {
    let Some(current) = current_channel(preferences) else {
        return FavouriteChange::Unchanged;
    };

    let Some(index) = find_channel(preferences.favourite_channels(), &current)
    else {
        return FavouriteChange::Unchanged;
    };

    preferences.favourite_channels_mut().remove(index);
    let next = preferences.favourite_channels().first().cloned();
    preferences.set_search_channel_name(next);
    FavouriteChange::Removed(current)
}

fn current_channel(preferences: &Preferences) -> Option<String> {
    preferences
        .search_channel_name()
        .filter(|name| !is_blank(name))
        .map(ToString::to_string)
}

fn find_channel(channels: &[String], channel: &str) -> Option<usize> {
    channels
        .iter()
        .position(|candidate| same_channel(candidate, channel))
}
