use leecher_prefs::PreferencesCommand;
use thiserror::Error;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Command(PreferencesCommand),
    Show,
    Themes,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

pub(crate) const HELP: &str = "\
commands:
  channel <name>   type a channel name into the search box
  dropdown | close open or close the favourites dropdown
  add | remove     add or remove the search channel from favourites
  temp | folder    choose the download temp folder / download folder
  player | clear-player
                   choose or clear the external player
  theme <id>       select a theme (see 'themes')
  save | undo | defaults
  show | themes | hide | help | quit";

pub(crate) fn parse(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "channel" => PreferencesCommand::SetSearchChannel(
            required(rest, "channel")?.to_string(),
        ),
        "dropdown" => PreferencesCommand::OpenChannelDropdown,
        "close" => PreferencesCommand::CloseChannelDropdown,
        "add" => PreferencesCommand::AddFavourite,
        "remove" => PreferencesCommand::RemoveFavourite,
        "temp" => PreferencesCommand::ChooseDownloadTempFolder,
        "folder" => PreferencesCommand::ChooseDownloadFolder,
        "player" => PreferencesCommand::ChooseExternalPlayer,
        "clear-player" => PreferencesCommand::ClearExternalPlayer,
        "theme" => {
            PreferencesCommand::SetTheme(required(rest, "theme")?.to_string())
        },
        "save" => PreferencesCommand::Save,
        "undo" => PreferencesCommand::Undo,
        "defaults" => PreferencesCommand::Defaults,
        "hide" => PreferencesCommand::Hide,
        "show" => return Ok(Input::Show),
        "themes" => return Ok(Input::Themes),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" => return Ok(Input::Quit),
        other => return Err(InputError::Unknown(other.to_string())),
    };

    Ok(Input::Command(command))
}

fn required<'a>(
    value: &'a str,
    command: &'static str,
) -> Result<&'a str, InputError> {
    if value.is_empty() {
        return Err(InputError::MissingArgument(command));
    }
    Ok(value)
}
