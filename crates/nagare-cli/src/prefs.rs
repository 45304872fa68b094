//! Remembered configuration and dark-mode flag.
//!
//! Storage failures are logged and swallowed: losing a remembered setting
//! must never stop CSS from being generated.

use nagare_core::TokenConfig;

use crate::store::KeyValueStore;

const CONFIG_KEY: &str = "tokenConfig";
const DARK_MODE_KEY: &str = "darkMode";

pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save_config(&mut self, config: &TokenConfig) {
        let json = match serde_json::to_string(config) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Error saving configuration: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(CONFIG_KEY, &json) {
            tracing::error!("Error saving configuration: {e}");
        }
    }

    /// Last saved configuration, if any and if it still parses.
    pub fn load_config(&self) -> Option<TokenConfig> {
        let saved = self.store.get(CONFIG_KEY)?;
        match serde_json::from_str(&saved) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Error loading configuration: {e}");
                None
            }
        }
    }

    pub fn clear_config(&mut self) {
        if let Err(e) = self.store.clear(CONFIG_KEY) {
            tracing::error!("Error clearing configuration: {e}");
        }
    }

    pub fn save_dark_mode(&mut self, dark: bool) {
        if let Err(e) = self.store.set(DARK_MODE_KEY, if dark { "true" } else { "false" }) {
            tracing::error!("Error saving dark mode preference: {e}");
        }
    }

    /// Missing or unrecognized values read as light mode.
    pub fn load_dark_mode(&self) -> bool {
        self.store.get(DARK_MODE_KEY).as_deref() == Some("true")
    }

    /// Whether a dark-mode choice has ever been stored.
    pub fn has_dark_mode(&self) -> bool {
        self.store.get(DARK_MODE_KEY).is_some()
    }
}
