use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use leecher_prefs::{Preferences, PreferencesStore, ServiceError};
use thiserror::Error;

const PATH_OVERRIDE_VAR: &str = "LEECHER_PREFERENCES";

/// Themes shipped with the application.
pub(crate) const THEMES: [&str; 2] = ["Dark", "Light"];

/// Errors emitted while reading or writing the preferences file.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("preferences file could not be accessed")]
    Io(#[from] std::io::Error),
    #[error("preferences file is not valid JSON")]
    Json(#[from] serde_json::Error),
}

/// How the preferences file was found at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// Preferences store persisting the committed record as pretty JSON.
#[derive(Debug)]
pub(crate) struct JsonPreferencesStore {
    path: PathBuf,
    current: Mutex<Arc<Preferences>>,
}

impl JsonPreferencesStore {
    /// Open the store at the default location.
    pub(crate) fn open() -> Result<Self, StoreError> {
        Self::open_at(preferences_path())
    }

    pub(crate) fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        let (preferences, status) = load_preferences_from_path(&path)?;
        match &status {
            LoadStatus::Loaded => {
                log::info!("preferences loaded from {}", path.display());
            },
            LoadStatus::Missing => {
                log::info!("no preferences at {}; using defaults", path.display());
            },
            LoadStatus::Invalid(message) => {
                log::warn!("preferences file invalid: {message}");
            },
        }

        Ok(Self {
            path,
            current: Mutex::new(Arc::new(preferences)),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Stage the record beside the target file and rename it into place.
    fn persist(&self, preferences: &Preferences) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let staged = self.path.with_extension("json.tmp");
        fs::write(&staged, serde_json::to_vec_pretty(preferences)?)?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }
}

impl PreferencesStore for JsonPreferencesStore {
    fn current(&self) -> Arc<Preferences> {
        match self.current.lock() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, preferences: Preferences) -> Result<(), ServiceError> {
        self.persist(&preferences).map_err(ServiceError::store)?;

        let mut current = match self.current.lock() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        *current = Arc::new(preferences);
        log::debug!("preferences written to {}", self.path.display());
        Ok(())
    }

    fn create_default(&self) -> Preferences {
        Preferences::default()
    }

    fn available_themes(&self) -> Vec<String> {
        THEMES.iter().map(ToString::to_string).collect()
    }
}

fn load_preferences_from_path(
    path: &Path,
) -> Result<(Preferences, LoadStatus), StoreError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok((Preferences::default(), LoadStatus::Missing));
        },
        Err(err) => return Err(err.into()),
    };

    match serde_json::from_str::<Preferences>(&data) {
        Ok(preferences) => Ok((preferences, LoadStatus::Loaded)),
        Err(err) => Ok((
            Preferences::default(),
            LoadStatus::Invalid(format!("{err}")),
        )),
    }
}

fn preferences_path() -> PathBuf {
    if let Ok(path) = std::env::var(PATH_OVERRIDE_VAR) {
        return PathBuf::from(path);
    }

    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("twitch-leecher")
            .join("preferences.json");
    }

    std::env::temp_dir()
        .join("twitch-leecher")
        .join("preferences.json")
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use leecher_prefs::{Preferences, PreferencesStore, ServiceError};

    use super::{
        JsonPreferencesStore, LoadStatus, StoreError,
        load_preferences_from_path,
    };

    #[test]
    fn given_unwritable_path_when_saved_then_io_cause_is_kept() {
        let root = test_temp_dir("unwritable");
        let nested = root.join("nested");
        let store = JsonPreferencesStore::open_at(
            nested.join("preferences.json"),
        )
        .expect("store should open over a missing file");
        fs::write(&nested, "not a directory")
            .expect("blocking file should be written");

        let err = store
            .save(Preferences::default())
            .expect_err("save below a file should fail");

        assert!(matches!(err, ServiceError::Store(_)));
        let cause = err
            .source()
            .and_then(|cause| cause.downcast_ref::<StoreError>());
        assert!(matches!(cause, Some(StoreError::Io(_))));
        assert!(cause.and_then(|cause| cause.source()).is_some());
        assert_eq!(store.current().as_ref(), &Preferences::default());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_saved_record_when_store_reopened_then_record_is_loaded() {
        let root = test_temp_dir("reopen");
        let path = root.join("preferences.json");
        let store = JsonPreferencesStore::open_at(path.clone())
            .expect("store should open");
        let mut preferences = Preferences::default();
        preferences.set_theme("Light");
        preferences.set_external_player(Some(PathBuf::from("/usr/bin/mpv")));

        store.save(preferences.clone()).expect("save should succeed");
        let reopened =
            JsonPreferencesStore::open_at(path).expect("store should reopen");

        assert_eq!(reopened.current().as_ref(), &preferences);
        assert_eq!(store.current().as_ref(), &preferences);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_missing_file_when_loaded_then_defaults_are_used() {
        let root = test_temp_dir("missing");

        let (preferences, status) =
            load_preferences_from_path(&root.join("preferences.json"))
                .expect("missing file should not fail");

        assert_eq!(status, LoadStatus::Missing);
        assert_eq!(preferences, Preferences::default());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_invalid_json_when_loaded_then_defaults_with_invalid_status() {
        let root = test_temp_dir("invalid_json");
        let path = root.join("preferences.json");
        fs::write(&path, "{ this is not valid json")
            .expect("invalid test payload should be written");

        let (preferences, status) = load_preferences_from_path(&path)
            .expect("loading invalid preferences should not fail with io error");

        assert_eq!(preferences, Preferences::default());
        match status {
            LoadStatus::Invalid(message) => assert!(!message.is_empty()),
            other => panic!("expected invalid status, got {other:?}"),
        }

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    fn test_temp_dir(test_name: &str) -> PathBuf {
        static NEXT: AtomicUsize = AtomicUsize::new(0);

        let dir = std::env::temp_dir().join(format!(
            "leecher-store-{}-{}-{test_name}",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed),
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
