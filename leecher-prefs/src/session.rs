use std::sync::Arc;

use crate::command::{CommandOutcome, MenuAction, PreferencesCommand};
use crate::draft::{DraftState, DraftStatus};
use crate::errors::{ServiceError, SessionError, ValidationError};
use crate::favourites::{self, FavouriteChange};
use crate::gate::CommandGate;
use crate::model::Preferences;
use crate::selection::{self, PathField, PickerKind};
use crate::services::{ConfirmRequest, Confirmation, Services};

/// Error attached to the current-preferences field when validation fails.
pub const INVALID_PREFERENCES: &str = "Invalid Preferences!";

const SAVED_MESSAGE: &str = "Preferences saved";

const UNDO_PROMPT: ConfirmRequest = ConfirmRequest {
    message: "Undo current changes and reload last saved preferences?",
    title: "Undo",
};

const DEFAULTS_PROMPT: ConfirmRequest = ConfirmRequest {
    message: "Load default preferences?",
    title: "Defaults",
};

/// State guarded by the session's command gate.
#[derive(Debug, Default)]
struct EditorState {
    draft: DraftState,
    channel_dropdown_open: bool,
}

/// Preferences editing session.
///
/// Every command runs inside one exclusion domain and is its own error
/// boundary: collaborator failures are routed to the
/// [`crate::ErrorReporter`] and surface as [`CommandOutcome::Failed`],
/// leaving the draft in place. Cloning the session shares its state.
#[derive(Clone)]
pub struct PreferencesSession {
    gate: Arc<CommandGate<EditorState>>,
    services: Services,
}

impl PreferencesSession {
    pub fn new(services: Services) -> Self {
        Self {
            gate: Arc::new(CommandGate::default()),
            services,
        }
    }

    /// Run a command through its handler.
    pub async fn dispatch(
        &self,
        command: PreferencesCommand,
    ) -> CommandOutcome {
        log::debug!("preferences command: {}", command.name());

        match command {
            PreferencesCommand::SetSearchChannel(name) => {
                self.set_search_channel(name).await
            },
            PreferencesCommand::OpenChannelDropdown => {
                self.open_channel_dropdown().await
            },
            PreferencesCommand::CloseChannelDropdown => {
                self.close_channel_dropdown().await
            },
            PreferencesCommand::AddFavourite => self.add_favourite().await,
            PreferencesCommand::RemoveFavourite => {
                self.remove_favourite().await
            },
            PreferencesCommand::ChooseDownloadTempFolder => {
                self.choose_path(PathField::DownloadTempFolder).await
            },
            PreferencesCommand::ChooseDownloadFolder => {
                self.choose_path(PathField::DownloadFolder).await
            },
            PreferencesCommand::ChooseExternalPlayer => {
                self.choose_path(PathField::ExternalPlayer).await
            },
            PreferencesCommand::ClearExternalPlayer => {
                self.clear_external_player().await
            },
            PreferencesCommand::SetTheme(theme) => self.set_theme(theme).await,
            PreferencesCommand::Save => self.save().await,
            PreferencesCommand::Undo => self.undo().await,
            PreferencesCommand::Defaults => self.defaults().await,
            PreferencesCommand::Hide => self.on_before_hidden().await,
        }
    }

    /// Actions the session publishes to the menu bar.
    pub fn menu_actions(&self) -> [MenuAction; 3] {
        MenuAction::ALL
    }

    pub async fn execute(&self, action: MenuAction) -> CommandOutcome {
        self.dispatch(action.command()).await
    }

    /// Return a snapshot of the draft, creating the draft if absent.
    pub async fn draft(&self) -> Preferences {
        let store = self.services.store.as_ref();
        self.gate
            .run_exclusive(|state| state.draft.draft(store).clone())
            .await
    }

    /// Edit the draft inside the exclusion domain.
    pub async fn update_draft<R>(
        &self,
        edit: impl FnOnce(&mut Preferences) -> R,
    ) -> R {
        let store = self.services.store.as_ref();
        self.gate
            .run_exclusive(|state| edit(state.draft.draft(store)))
            .await
    }

    pub async fn status(&self) -> DraftStatus {
        self.gate.run_exclusive(|state| state.draft.status()).await
    }

    /// Errors recorded by the last save attempt on the current draft.
    pub async fn validation_errors(&self) -> Vec<ValidationError> {
        self.gate
            .run_exclusive(|state| state.draft.errors().to_vec())
            .await
    }

    /// Aggregated error shown next to the preferences form.
    pub async fn current_preferences_error(&self) -> Option<&'static str> {
        match self.status().await {
            DraftStatus::DraftInvalid => Some(INVALID_PREFERENCES),
            DraftStatus::NoDraft | DraftStatus::DraftValid => None,
        }
    }

    pub async fn is_channel_dropdown_open(&self) -> bool {
        self.gate
            .run_exclusive(|state| state.channel_dropdown_open)
            .await
    }

    pub fn available_themes(&self) -> Vec<String> {
        self.services.store.available_themes()
    }

    pub async fn set_search_channel(&self, name: String) -> CommandOutcome {
        self.update_draft(|draft| draft.set_search_channel_name(Some(name)))
            .await;
        CommandOutcome::Completed
    }

    pub async fn set_theme(&self, theme: String) -> CommandOutcome {
        self.update_draft(|draft| draft.set_theme(theme)).await;
        CommandOutcome::Completed
    }

    /// Clear the search box and open the channel dropdown.
    pub async fn open_channel_dropdown(&self) -> CommandOutcome {
        let store = self.services.store.as_ref();
        self.gate
            .run_exclusive(|state| {
                state.draft.draft(store).set_search_channel_name(None);
                state.channel_dropdown_open = true;
            })
            .await;
        CommandOutcome::Completed
    }

    pub async fn close_channel_dropdown(&self) -> CommandOutcome {
        self.gate
            .run_exclusive(|state| state.channel_dropdown_open = false)
            .await;
        CommandOutcome::Completed
    }

    pub async fn add_favourite(&self) -> CommandOutcome {
        self.edit_favourites(favourites::add_favourite).await
    }

    pub async fn remove_favourite(&self) -> CommandOutcome {
        self.edit_favourites(favourites::remove_favourite).await
    }

    /// Ask the picker for a path and write the choice into the draft.
    ///
    /// The gate is held until the picker resolves, so the choice is applied
    /// to the same draft the request was issued from.
    pub async fn choose_path(&self, field: PathField) -> CommandOutcome {
        let result = self.try_choose_path(field).await;
        self.finish(field.command().name(), result)
    }

    pub async fn clear_external_player(&self) -> CommandOutcome {
        let changed =
            self.update_draft(selection::clear_external_player).await;
        if changed {
            CommandOutcome::Completed
        } else {
            CommandOutcome::Skipped
        }
    }

    /// Validate the draft and commit it when it has no errors.
    pub async fn save(&self) -> CommandOutcome {
        let result = self
            .gate
            .run_exclusive(|state| self.try_save(state))
            .await;
        self.finish(PreferencesCommand::Save.name(), result)
    }

    /// Discard the draft once the user confirms.
    pub async fn undo(&self) -> CommandOutcome {
        let result = self.try_undo().await;
        self.finish(PreferencesCommand::Undo.name(), result)
    }

    /// Commit factory defaults once the user confirms, bypassing the draft.
    pub async fn defaults(&self) -> CommandOutcome {
        let result = self.try_defaults().await;
        self.finish(PreferencesCommand::Defaults.name(), result)
    }

    /// Drop the draft when the editing surface is hidden.
    pub async fn on_before_hidden(&self) -> CommandOutcome {
        self.gate.run_exclusive(|state| state.draft.reset()).await;
        CommandOutcome::Completed
    }

    async fn edit_favourites(
        &self,
        edit: fn(&mut Preferences) -> FavouriteChange,
    ) -> CommandOutcome {
        let store = self.services.store.as_ref();
        let notifier = self.services.notifier.as_ref();
        self.gate
            .run_exclusive(|state| {
                let change = edit(state.draft.draft(store));
                match change.notification() {
                    Some(message) => {
                        notifier.notify(&message);
                        CommandOutcome::Completed
                    },
                    None => CommandOutcome::Skipped,
                }
            })
            .await
    }

    async fn try_choose_path(
        &self,
        field: PathField,
    ) -> Result<CommandOutcome, ServiceError> {
        let store = self.services.store.as_ref();
        let dialogs = self.services.dialogs.as_ref();
        let mut guard = self.gate.enter().await;
        let state = &mut *guard;

        let initial = field.current(state.draft.draft(store));
        let outcome = match field.picker() {
            PickerKind::Folder => {
                dialogs.pick_folder(initial.as_deref()).await?
            },
            PickerKind::File(filter) => {
                dialogs.pick_file(filter, initial.as_deref()).await?
            },
        };

        if field.apply(state.draft.draft(store), outcome) {
            log::debug!("{} updated from picker", field.label());
            Ok(CommandOutcome::Completed)
        } else {
            Ok(CommandOutcome::Skipped)
        }
    }

    fn try_save(
        &self,
        state: &mut EditorState,
    ) -> Result<CommandOutcome, ServiceError> {
        let services = &self.services;
        let store = services.store.as_ref();
        services.dialogs.set_busy();

        let errors = state.draft.validate(store);
        if !errors.is_empty() {
            log::warn!(
                "preferences not saved: {} validation error(s)",
                errors.len()
            );
            return Ok(CommandOutcome::Rejected);
        }

        let draft = state.draft.draft(store).clone();
        let theme = draft.theme().to_string();
        store.save(draft)?;
        services.theme.apply_theme(&theme)?;
        state.draft.reset();
        services.notifier.notify(SAVED_MESSAGE);
        Ok(CommandOutcome::Completed)
    }

    async fn try_undo(&self) -> Result<CommandOutcome, ServiceError> {
        let mut state = self.gate.enter().await;
        if !self.confirmed(UNDO_PROMPT).await? {
            return Ok(CommandOutcome::Skipped);
        }

        self.services.dialogs.set_busy();
        state.draft.reset();
        Ok(CommandOutcome::Completed)
    }

    async fn try_defaults(&self) -> Result<CommandOutcome, ServiceError> {
        let mut state = self.gate.enter().await;
        if !self.confirmed(DEFAULTS_PROMPT).await? {
            return Ok(CommandOutcome::Skipped);
        }

        let store = self.services.store.as_ref();
        self.services.dialogs.set_busy();
        store.save(store.create_default())?;
        self.services.theme.apply_theme(store.current().theme())?;
        state.draft.reset();
        log::info!("default preferences loaded");
        Ok(CommandOutcome::Completed)
    }

    async fn confirmed(
        &self,
        request: ConfirmRequest,
    ) -> Result<bool, ServiceError> {
        let answer = self.services.dialogs.confirm(request).await?;
        Ok(answer == Confirmation::Yes)
    }

    fn finish(
        &self,
        command: &'static str,
        result: Result<CommandOutcome, ServiceError>,
    ) -> CommandOutcome {
        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("preferences {command} failed: {err}");
                let error = SessionError::command(command, err);
                self.services.errors.report_and_show(&error);
                CommandOutcome::Failed
            },
        }
    }
}
