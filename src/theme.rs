//! Background themes and the persisted theme preference.

use crate::config::THEME_STORAGE_KEY;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Slate,
    Ocean,
    Sunset,
    Aurora,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Slate, Theme::Ocean, Theme::Sunset, Theme::Aurora];

    /// Identifier written to storage.
    pub fn key(self) -> &'static str {
        match self {
            Theme::Slate => "slate",
            Theme::Ocean => "ocean",
            Theme::Sunset => "sunset",
            Theme::Aurora => "aurora",
        }
    }

    pub fn from_key(key: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|theme| theme.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Slate => "Slate",
            Theme::Ocean => "Ocean",
            Theme::Sunset => "Sunset",
            Theme::Aurora => "Aurora",
        }
    }

    /// Background class applied to the app shell. Aurora is animated.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Slate => "bg-slate",
            Theme::Ocean => "bg-ocean",
            Theme::Sunset => "bg-sunset",
            Theme::Aurora => "bg-aurora",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to write local storage: {0}")]
    Write(String),
}

/// Key-value store holding the theme preference.
pub trait ThemeStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Origin-scoped `localStorage` of the current window.
pub struct BrowserThemeStore;

impl BrowserThemeStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        gloo_utils::window()
            .local_storage()
            .ok()
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

impl ThemeStore for BrowserThemeStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// In-process store, used off the browser.
#[derive(Default)]
pub struct MemoryThemeStore {
    entries: RefCell<HashMap<String, String>>,
}

impl ThemeStore for MemoryThemeStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read the saved theme, falling back to the default when the entry is
/// missing, unrecognized, or storage cannot be reached.
pub fn load_theme(store: &impl ThemeStore) -> Theme {
    match store.read(THEME_STORAGE_KEY) {
        Ok(Some(key)) => Theme::from_key(&key).unwrap_or_else(|| {
            debug!("ignoring unknown saved theme '{}'", key);
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(err) => {
            warn!("could not load theme: {}", err);
            Theme::default()
        }
    }
}

pub fn save_theme(store: &impl ThemeStore, theme: Theme) -> Result<(), StorageError> {
    store.write(THEME_STORAGE_KEY, theme.key())?;
    info!("theme set to {}", theme);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl ThemeStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn write(&self, _key: &str, value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write(value.to_string()))
        }
    }

    #[test]
    fn keys_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_key(theme.key()), Some(theme));
        }
        assert_eq!(Theme::from_key("neon"), None);
    }

    #[test]
    fn missing_preference_uses_default() {
        assert_eq!(load_theme(&MemoryThemeStore::default()), Theme::Slate);
    }

    #[test]
    fn saved_preference_is_restored() {
        let store = MemoryThemeStore::default();
        save_theme(&store, Theme::Sunset).unwrap();
        assert_eq!(
            store.read(THEME_STORAGE_KEY).unwrap().as_deref(),
            Some("sunset")
        );
        assert_eq!(load_theme(&store), Theme::Sunset);
    }

    #[test]
    fn unknown_preference_falls_back_silently() {
        let store = MemoryThemeStore::default();
        store.write(THEME_STORAGE_KEY, "neon").unwrap();
        assert_eq!(load_theme(&store), Theme::Slate);
    }

    #[test]
    fn storage_failures_do_not_escape_load() {
        assert_eq!(load_theme(&BrokenStore), Theme::Slate);
        assert!(matches!(
            save_theme(&BrokenStore, Theme::Aurora),
            Err(StorageError::Write(_))
        ));
    }
}
