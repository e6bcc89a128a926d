use std::collections::BTreeMap;

/// Storage key for the background-music preference.
pub const MUSIC_PREFERENCE_KEY: &str = "ode_music";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MusicPreference {
    On,
    Off,
}

impl MusicPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicPreference::On => "on",
            MusicPreference::Off => "off",
        }
    }

    /// Only the exact value `"on"` enables music.
    pub fn from_stored(raw: &str) -> Self {
        if raw == "on" {
            MusicPreference::On
        } else {
            MusicPreference::Off
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    StorageUnavailable,
    Io(String),
}

impl std::fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferenceError::StorageUnavailable => write!(f, "browser storage unavailable"),
            PreferenceError::Io(msg) => write!(f, "preference storage error: {msg}"),
        }
    }
}

impl std::error::Error for PreferenceError {}

/// String key/value storage for small page preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Reads the music preference, writing the default (`on`) back when nothing
/// (or an empty value) is stored yet.
pub fn load_music_preference<S: PreferenceStore + ?Sized>(
    store: &mut S,
) -> Result<MusicPreference, PreferenceError> {
    match store.get(MUSIC_PREFERENCE_KEY)? {
        Some(raw) if !raw.is_empty() => Ok(MusicPreference::from_stored(&raw)),
        _ => {
            store.set(MUSIC_PREFERENCE_KEY, MusicPreference::On.as_str())?;
            Ok(MusicPreference::On)
        }
    }
}

pub fn save_music_preference<S: PreferenceStore + ?Sized>(
    store: &mut S,
    preference: MusicPreference,
) -> Result<(), PreferenceError> {
    store.set(MUSIC_PREFERENCE_KEY, preference.as_str())
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{PreferenceError, PreferenceStore};

    /// `window.localStorage`-backed preferences.
    #[derive(Debug)]
    pub struct LocalStoragePreferenceStore {
        storage: web_sys::Storage,
    }

    impl LocalStoragePreferenceStore {
        pub fn new() -> Result<Self, PreferenceError> {
            let win = web_sys::window().ok_or(PreferenceError::StorageUnavailable)?;
            let storage = win
                .local_storage()
                .map_err(|e| PreferenceError::Io(format!("localStorage error: {:?}", e)))?
                .ok_or(PreferenceError::StorageUnavailable)?;
            Ok(Self { storage })
        }
    }

    impl PreferenceStore for LocalStoragePreferenceStore {
        fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
            self.storage
                .get_item(key)
                .map_err(|e| PreferenceError::Io(format!("get_item({key}) failed: {:?}", e)))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
            self.storage
                .set_item(key, value)
                .map_err(|e| PreferenceError::Io(format!("set_item({key}) failed: {:?}", e)))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStoragePreferenceStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStoragePreferenceStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStoragePreferenceStore {
    pub fn new() -> Result<Self, PreferenceError> {
        Err(PreferenceError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreferenceStore for LocalStoragePreferenceStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
        Err(PreferenceError::StorageUnavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
        Err(PreferenceError::StorageUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        InMemoryPreferenceStore, LocalStoragePreferenceStore, MUSIC_PREFERENCE_KEY,
        MusicPreference, PreferenceError, PreferenceStore, load_music_preference,
        save_music_preference,
    };

    #[test]
    fn missing_preference_defaults_on_and_is_written_back() {
        let mut store = InMemoryPreferenceStore::new();
        assert_eq!(load_music_preference(&mut store), Ok(MusicPreference::On));
        assert_eq!(
            store.get(MUSIC_PREFERENCE_KEY).unwrap(),
            Some("on".to_string())
        );
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut store = InMemoryPreferenceStore::new();
        store.set(MUSIC_PREFERENCE_KEY, "").unwrap();
        assert_eq!(load_music_preference(&mut store), Ok(MusicPreference::On));
        assert_eq!(
            store.get(MUSIC_PREFERENCE_KEY).unwrap().as_deref(),
            Some("on")
        );
    }

    #[test]
    fn off_survives_reload() {
        let mut store = InMemoryPreferenceStore::new();
        save_music_preference(&mut store, MusicPreference::Off).unwrap();
        assert_eq!(load_music_preference(&mut store), Ok(MusicPreference::Off));
        assert_eq!(load_music_preference(&mut store), Ok(MusicPreference::Off));
    }

    #[test]
    fn unknown_values_read_as_off_and_are_kept() {
        let mut store = InMemoryPreferenceStore::new();
        store.set(MUSIC_PREFERENCE_KEY, "loud").unwrap();
        assert_eq!(load_music_preference(&mut store), Ok(MusicPreference::Off));
        assert_eq!(
            store.get(MUSIC_PREFERENCE_KEY).unwrap().as_deref(),
            Some("loud")
        );
    }

    #[test]
    fn native_local_storage_is_unavailable() {
        assert!(matches!(
            LocalStoragePreferenceStore::new(),
            Err(PreferenceError::StorageUnavailable)
        ));
    }
}
