//! Recording collaborators for session tests.

use std::collections::VecDeque;
use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::errors::{ServiceError, SessionError};
use crate::model::Preferences;
use crate::services::{
    ConfirmRequest, Confirmation, Dialogs, ErrorReporter, FileFilter,
    Notifier, PickerOutcome, PreferencesStore, Services, ThemeApplier,
};
use crate::session::PreferencesSession;

#[derive(Default)]
pub(crate) struct FakeStore {
    committed: Mutex<Arc<Preferences>>,
    saved: Mutex<Vec<Preferences>>,
    fail_saves: AtomicBool,
}

impl FakeStore {
    pub(crate) fn with(preferences: Preferences) -> Self {
        Self {
            committed: Mutex::new(Arc::new(preferences)),
            ..Default::default()
        }
    }

    pub(crate) fn saved(&self) -> Vec<Preferences> {
        self.saved.lock().expect("store lock").clone()
    }

    pub(crate) fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }

    /// Factory record handed out by `create_default`.
    pub(crate) fn factory() -> Preferences {
        let mut preferences = Preferences::default();
        preferences.set_theme("Factory");
        preferences
    }
}

impl PreferencesStore for FakeStore {
    fn current(&self) -> Arc<Preferences> {
        self.committed.lock().expect("store lock").clone()
    }

    fn save(&self, preferences: Preferences) -> Result<(), ServiceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ServiceError::store("disk full"));
        }

        self.saved
            .lock()
            .expect("store lock")
            .push(preferences.clone());
        *self.committed.lock().expect("store lock") = Arc::new(preferences);
        Ok(())
    }

    fn create_default(&self) -> Preferences {
        Self::factory()
    }

    fn available_themes(&self) -> Vec<String> {
        vec![String::from("Dark"), String::from("Light")]
    }
}

#[derive(Default)]
pub(crate) struct StubTheme {
    applied: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl StubTheme {
    pub(crate) fn applied(&self) -> Vec<String> {
        self.applied.lock().expect("theme lock").clone()
    }

    pub(crate) fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

impl ThemeApplier for StubTheme {
    fn apply_theme(&self, theme: &str) -> Result<(), ServiceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ServiceError::theme(theme, "renderer unavailable"));
        }

        self.applied
            .lock()
            .expect("theme lock")
            .push(theme.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct StubNotifier {
    messages: Mutex<Vec<String>>,
}

impl StubNotifier {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("notifier lock").clone()
    }
}

impl Notifier for StubNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .expect("notifier lock")
            .push(message.to_string());
    }
}

#[derive(Default)]
pub(crate) struct StubReporter {
    reports: Mutex<Vec<String>>,
}

impl StubReporter {
    pub(crate) fn reports(&self) -> Vec<String> {
        self.reports.lock().expect("reporter lock").clone()
    }
}

impl ErrorReporter for StubReporter {
    /// Records the error and its causes joined by `": "`.
    fn report_and_show(&self, error: &SessionError) {
        let mut report = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            report.push_str(": ");
            report.push_str(&cause.to_string());
            source = cause.source();
        }

        self.reports.lock().expect("reporter lock").push(report);
    }
}

/// Request observed by [`StubDialogs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DialogRequest {
    Confirm(&'static str),
    Folder(Option<PathBuf>),
    File(&'static str, Option<PathBuf>),
}

/// Dialogs answering from scripted queues. Confirmations default to `No`
/// and pickers to `Cancelled` once their queue runs dry.
#[derive(Default)]
pub(crate) struct StubDialogs {
    answers: Mutex<VecDeque<Confirmation>>,
    picks: Mutex<VecDeque<PickerOutcome>>,
    requests: Mutex<Vec<DialogRequest>>,
    hold: Option<Arc<Notify>>,
    hold_picks: Option<Arc<Notify>>,
    fail: AtomicBool,
    busy: AtomicUsize,
}

impl StubDialogs {
    /// Dialogs whose confirmations wait for [`StubDialogs::release`].
    pub(crate) fn held() -> Self {
        Self {
            hold: Some(Arc::new(Notify::new())),
            ..Default::default()
        }
    }

    /// Dialogs whose pickers wait for [`StubDialogs::release_pick`].
    pub(crate) fn held_picks() -> Self {
        Self {
            hold_picks: Some(Arc::new(Notify::new())),
            ..Default::default()
        }
    }

    pub(crate) fn answer(&self, answer: Confirmation) {
        self.answers.lock().expect("dialog lock").push_back(answer);
    }

    pub(crate) fn pick(&self, outcome: PickerOutcome) {
        self.picks.lock().expect("dialog lock").push_back(outcome);
    }

    pub(crate) fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub(crate) fn release(&self) {
        if let Some(hold) = &self.hold {
            hold.notify_one();
        }
    }

    pub(crate) fn release_pick(&self) {
        if let Some(hold) = &self.hold_picks {
            hold.notify_one();
        }
    }

    pub(crate) fn requests(&self) -> Vec<DialogRequest> {
        self.requests.lock().expect("dialog lock").clone()
    }

    pub(crate) fn busy_count(&self) -> usize {
        self.busy.load(Ordering::SeqCst)
    }

    fn record(&self, request: DialogRequest) -> Result<(), ServiceError> {
        self.requests.lock().expect("dialog lock").push(request);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ServiceError::dialog("no display"));
        }
        Ok(())
    }

    async fn next_pick(&self) -> PickerOutcome {
        if let Some(hold) = &self.hold_picks {
            hold.notified().await;
        }

        self.picks
            .lock()
            .expect("dialog lock")
            .pop_front()
            .unwrap_or(PickerOutcome::Cancelled)
    }
}

#[async_trait]
impl Dialogs for StubDialogs {
    async fn confirm(
        &self,
        request: ConfirmRequest,
    ) -> Result<Confirmation, ServiceError> {
        self.record(DialogRequest::Confirm(request.message))?;
        if let Some(hold) = &self.hold {
            hold.notified().await;
        }

        Ok(self
            .answers
            .lock()
            .expect("dialog lock")
            .pop_front()
            .unwrap_or(Confirmation::No))
    }

    async fn pick_folder(
        &self,
        initial: Option<&Path>,
    ) -> Result<PickerOutcome, ServiceError> {
        self.record(DialogRequest::Folder(initial.map(Path::to_path_buf)))?;
        Ok(self.next_pick().await)
    }

    async fn pick_file(
        &self,
        filter: FileFilter,
        initial: Option<&Path>,
    ) -> Result<PickerOutcome, ServiceError> {
        self.record(DialogRequest::File(
            filter.extension,
            initial.map(Path::to_path_buf),
        ))?;
        Ok(self.next_pick().await)
    }

    fn set_busy(&self) {
        self.busy.fetch_add(1, Ordering::SeqCst);
    }
}

/// Session wired to recording collaborators.
pub(crate) struct Harness {
    pub(crate) store: Arc<FakeStore>,
    pub(crate) theme: Arc<StubTheme>,
    pub(crate) notifier: Arc<StubNotifier>,
    pub(crate) errors: Arc<StubReporter>,
    pub(crate) dialogs: Arc<StubDialogs>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with_dialogs(StubDialogs::default())
    }

    pub(crate) fn with_dialogs(dialogs: StubDialogs) -> Self {
        Self {
            store: Arc::new(FakeStore::with(Preferences::default())),
            theme: Arc::default(),
            notifier: Arc::default(),
            errors: Arc::default(),
            dialogs: Arc::new(dialogs),
        }
    }

    pub(crate) fn session(&self) -> PreferencesSession {
        PreferencesSession::new(Services {
            store: self.store.clone(),
            theme: self.theme.clone(),
            notifier: self.notifier.clone(),
            errors: self.errors.clone(),
            dialogs: self.dialogs.clone(),
        })
    }
}
