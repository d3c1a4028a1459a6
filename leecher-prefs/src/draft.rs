use crate::errors::ValidationError;
use crate::model::Preferences;
use crate::services::PreferencesStore;

/// Observable lifecycle state of a session draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStatus {
    NoDraft,
    /// A draft exists and had no errors at the last validation point, or
    /// has not been validated yet.
    DraftValid,
    DraftInvalid,
}

#[derive(Debug)]
struct Draft {
    preferences: Preferences,
    errors: Vec<ValidationError>,
}

/// Owner of the single in-flight draft of a session.
///
/// The draft is cloned from the committed record on first access and
/// dropped on reset; the committed record is never touched here.
#[derive(Debug, Default)]
pub(crate) struct DraftState {
    draft: Option<Draft>,
}

impl DraftState {
    /// Return the draft, cloning it from the committed record if absent.
    pub(crate) fn draft(
        &mut self,
        store: &dyn PreferencesStore,
    ) -> &mut Preferences {
        &mut self.entry(store).preferences
    }

    /// Return the draft without materialising it.
    #[cfg(test)]
    pub(crate) fn existing(&self) -> Option<&Preferences> {
        self.draft.as_ref().map(|draft| &draft.preferences)
    }

    /// Drop the draft. Calling this without a draft is a no-op.
    pub(crate) fn reset(&mut self) {
        if self.draft.take().is_some() {
            log::debug!("preferences draft discarded");
        }
    }

    /// Validate the draft, materialising it first, and record the errors.
    pub(crate) fn validate(
        &mut self,
        store: &dyn PreferencesStore,
    ) -> &[ValidationError] {
        let draft = self.entry(store);
        draft.errors = draft.preferences.validate();
        &draft.errors
    }

    /// Errors recorded at the last validation point.
    pub(crate) fn errors(&self) -> &[ValidationError] {
        self.draft
            .as_ref()
            .map(|draft| draft.errors.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn status(&self) -> DraftStatus {
        match &self.draft {
            None => DraftStatus::NoDraft,
            Some(draft) if draft.errors.is_empty() => DraftStatus::DraftValid,
            Some(_) => DraftStatus::DraftInvalid,
        }
    }

    fn entry(&mut self, store: &dyn PreferencesStore) -> &mut Draft {
        self.draft.get_or_insert_with(|| {
            log::debug!("preferences draft cloned from committed record");
            Draft {
                preferences: Preferences::clone(&store.current()),
                errors: Vec::new(),
            }
        })
    }
}
