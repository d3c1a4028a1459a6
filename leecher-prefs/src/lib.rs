//! Preferences editing session for the Twitch Leecher front-ends.
//!
//! A session edits a draft copy of the committed preferences record and
//! either commits it (save), discards it (undo) or replaces the committed
//! record with factory defaults. The pieces are:
//! - [`Preferences`], the settings record, with [`Preferences::validate`].
//! - [`CommandGate`], the exclusion domain every mutating command runs in.
//! - [`favourites`] and [`selection`], the draft edits behind the
//!   favourite channel buttons and the folder/file pickers.
//! - [`PreferencesSession`], which wires the above to the injected
//!   [`Services`] and is the error boundary for every command.
//!
//! Front-ends usually:
//! 1. Implement the collaborator traits in [`services`] for their toolkit.
//! 2. Build a [`PreferencesSession`] from a [`Services`] bundle.
//! 3. Render [`PreferencesSession::draft`] and feed user input back through
//!    [`PreferencesSession::dispatch`] or the [`MenuAction`]s.

mod command;
mod draft;
mod errors;
pub mod favourites;
mod gate;
mod model;
pub mod selection;
mod session;
pub mod services;

#[cfg(test)]
mod testing;

pub use command::{CommandOutcome, MenuAction, PreferencesCommand};
pub use draft::DraftStatus;
pub use errors::{BoxError, ServiceError, SessionError, ValidationError};
pub use gate::CommandGate;
pub use model::{LOAD_LIMIT_RANGE, Preferences};
pub use session::{INVALID_PREFERENCES, PreferencesSession};
pub use services::{
    ConfirmRequest, Confirmation, Dialogs, ErrorReporter, FileFilter,
    Notifier, PickerOutcome, PreferencesStore, Services, ThemeApplier,
};
