/// User-triggered operations dispatched to a preferences session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferencesCommand {
    /// The channel search box changed.
    SetSearchChannel(String),
    /// The channel dropdown was opened; clears the search box.
    OpenChannelDropdown,
    CloseChannelDropdown,
    AddFavourite,
    RemoveFavourite,
    ChooseDownloadTempFolder,
    ChooseDownloadFolder,
    ChooseExternalPlayer,
    ClearExternalPlayer,
    /// A theme was picked from the available themes.
    SetTheme(String),
    /// Validate and commit the draft.
    Save,
    /// Discard the draft after confirmation.
    Undo,
    /// Commit factory defaults after confirmation.
    Defaults,
    /// The editing surface is about to be hidden.
    Hide,
}

impl PreferencesCommand {
    /// Short name used in logs and error reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetSearchChannel(_) => "set search channel",
            Self::OpenChannelDropdown => "open channel dropdown",
            Self::CloseChannelDropdown => "close channel dropdown",
            Self::AddFavourite => "add favourite",
            Self::RemoveFavourite => "remove favourite",
            Self::ChooseDownloadTempFolder => "choose download temp folder",
            Self::ChooseDownloadFolder => "choose download folder",
            Self::ChooseExternalPlayer => "choose external player",
            Self::ClearExternalPlayer => "clear external player",
            Self::SetTheme(_) => "set theme",
            Self::Save => "save",
            Self::Undo => "undo",
            Self::Defaults => "defaults",
            Self::Hide => "hide",
        }
    }
}

/// How a dispatched command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    /// Nothing happened: blank input, cancelled picker or declined prompt.
    Skipped,
    /// The draft failed validation and was not committed.
    Rejected,
    /// A collaborator failed; the error was already reported.
    Failed,
}

/// Actions published to the surrounding menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Save,
    Undo,
    Default,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] =
        [MenuAction::Save, MenuAction::Undo, MenuAction::Default];

    pub fn label(self) -> &'static str {
        match self {
            Self::Save => "Save",
            Self::Undo => "Undo",
            Self::Default => "Default",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Save => "fa-solid fa-floppy-disk",
            Self::Undo => "fa-solid fa-rotate-left",
            Self::Default => "fa-solid fa-wrench",
        }
    }

    pub fn command(self) -> PreferencesCommand {
        match self {
            Self::Save => PreferencesCommand::Save,
            Self::Undo => PreferencesCommand::Undo,
            Self::Default => PreferencesCommand::Defaults,
        }
    }
}
